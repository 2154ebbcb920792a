/*!
UTF-16 surrogate pair handling.
*/
use crate::encoding::conv::{Config, Transcode};
use crate::encoding::Utf16;
use crate::error::Error;

const HIGH_FIRST: u16 = 0xD800;
const HIGH_LAST: u16 = 0xDBFF;
const LOW_FIRST: u16 = 0xDC00;
const LOW_LAST: u16 = 0xDFFF;

impl Transcode for Utf16 {
    fn decode_one(src: &[u16], _cfg: &Config) -> Result<(u32, usize), Error> {
        let unit = src[0];
        match unit {
            LOW_FIRST..=LOW_LAST => Err(Error::SurrogatePairInversion),
            HIGH_FIRST..=HIGH_LAST => {
                let low = *src.get(1).ok_or(Error::StringEndedInCharacter)?;
                if low == 0 {
                    return Err(Error::StringEndedInCharacter);
                }
                if low < LOW_FIRST || low > LOW_LAST {
                    return Err(Error::InvalidUtf16Character);
                }

                let high_bits = (unit - HIGH_FIRST) as u32;
                let low_bits = (low - LOW_FIRST) as u32;
                Ok(((high_bits << 10) + low_bits + 0x10000, 2))
            },
            _ => Ok((unit as u32, 1)),
        }
    }

    #[inline]
    fn encoded_len(cp: u32) -> usize {
        if cp <= 0xFFFF { 1 } else { 2 }
    }

    fn encode_one(cp: u32, dst: &mut [u16]) {
        if cp <= 0xFFFF {
            dst[0] = cp as u16;
        } else {
            let cp = cp - 0x10000;
            dst[0] = HIGH_FIRST + ((cp >> 10) & 0x3FF) as u16;
            dst[1] = LOW_FIRST + (cp & 0x3FF) as u16;
        }
    }
}
