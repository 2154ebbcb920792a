/*!
UTF-8 classification, assembly, and emission.
*/
use crate::encoding::conv::{Config, Continuation, Transcode};
use crate::encoding::{check_codepoint, Utf8};
use crate::error::Error;

/// The smallest codepoint that needs a sequence of the given number of continuation bytes.
const MIN_FOR_EXTRA: [u32; 4] = [0, 0x80, 0x800, 0x10000];

/**
Classify a leading byte.

Returns the bits it contributes to the codepoint, and how many continuation bytes must follow.  `0x80..=0xBF` (continuation bytes) and `0xF8..=0xFF` are never valid leaders.
*/
#[inline]
fn classify(lead: u8) -> Result<(u32, usize), Error> {
    match lead {
        0x01..=0x7F => Ok((lead as u32, 0)),
        0xC0..=0xDF => Ok(((lead & 0x1F) as u32, 1)),
        0xE0..=0xEF => Ok(((lead & 0x0F) as u32, 2)),
        0xF0..=0xF7 => Ok(((lead & 0x07) as u32, 3)),
        _ => Err(Error::InvalidUtf8Character),
    }
}

impl Transcode for Utf8 {
    fn decode_one(src: &[u8], cfg: &Config) -> Result<(u32, usize), Error> {
        let (mut cp, extra) = classify(src[0])?;
        if extra == 0 {
            return Ok((cp, 1));
        }

        if src.len() <= extra {
            return Err(Error::StringEndedInCharacter);
        }

        for &byte in &src[1..=extra] {
            if byte == 0 {
                return Err(Error::StringEndedInCharacter);
            }
            if !cfg.continuation.accepts(byte) {
                return Err(Error::InvalidUtf8Character);
            }
            cp = (cp << 6) | (byte & 0x3F) as u32;
        }

        if cfg.continuation == Continuation::Strict {
            if cp < MIN_FOR_EXTRA[extra] {
                return Err(Error::InvalidUtf8Character);
            }
            check_codepoint(cp)?;
        } else if cp == 0 {
            // An overlong zero would read back as the terminator.
            return Err(Error::InvalidUtf8Character);
        }

        Ok((cp, extra + 1))
    }

    #[inline]
    fn encoded_len(cp: u32) -> usize {
        match cp {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            0x800..=0xFFFF => 3,
            _ => 4,
        }
    }

    fn encode_one(cp: u32, dst: &mut [u8]) {
        match cp {
            0..=0x7F => {
                dst[0] = cp as u8;
            },
            0x80..=0x7FF => {
                dst[0] = 0xC0 | (cp >> 6) as u8;
                dst[1] = 0x80 | (cp & 0x3F) as u8;
            },
            0x800..=0xFFFF => {
                dst[0] = 0xE0 | (cp >> 12) as u8;
                dst[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
                dst[2] = 0x80 | (cp & 0x3F) as u8;
            },
            _ => {
                dst[0] = 0xF0 | (cp >> 18) as u8;
                dst[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
                dst[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
                dst[3] = 0x80 | (cp & 0x3F) as u8;
            },
        }
    }
}
