/*!
Encoding conversion support.

This module holds the four bounded passes everything else is built from:

* `count`: how many codepoints a UTF-8 or UTF-16 buffer holds, validating it along the way.
* `measure`: how many UTF-8 or UTF-16 units a codepoint array encodes to.
* `decode_into`: UTF-8 or UTF-16 into a caller-supplied codepoint buffer.
* `encode_into`: a codepoint array into a caller-supplied UTF-8 or UTF-16 buffer.

Every pass stops at the first terminator or at the end of its source slice, whichever comes first.
*/
use libc::c_int;

use crate::encoding::{check_codepoint, Encoding, Unit};
use crate::error::Error;

pub mod utf16;
pub mod utf8;

/// The default limit on any length, count, or size: the largest C `int`.
pub const MAX_COUNT: usize = c_int::MAX as usize;

/**
How UTF-8 continuation bytes, and the values they assemble to, are checked.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Continuation {
    /**
    Standard UTF-8.  Continuation bytes must lie in `0x80..=0xBF`; overlong forms are invalid; values that are surrogates or above U+10FFFF are invalid codepoints.
    */
    Strict,

    /**
    Accepts continuation bytes in `0x80..=0xDF`, and does not range-check assembled values.  An assembled zero is still rejected, since it would read as the terminator.  Only useful for reading data produced by encoders that relied on this rule.
    */
    Lenient,
}

impl Continuation {
    #[inline]
    pub fn accepts(self, byte: u8) -> bool {
        match self {
            Continuation::Strict => byte >= 0x80 && byte <= 0xBF,
            Continuation::Lenient => byte >= 0x80 && byte <= 0xDF,
        }
    }
}

/**
Per-call settings for the transcoding passes.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /**
    The largest length, count, or size any pass may produce.  Exceeding it is an `Error::Overflow`.
    */
    pub max_count: usize,

    /**
    UTF-8 continuation checking rule.
    */
    pub continuation: Continuation,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_count: MAX_COUNT,
            continuation: Continuation::Strict,
        }
    }
}

/**
A variable-width encoding of codepoints.

Implemented by `Utf8` and `Utf16`.
*/
pub trait Transcode: Encoding {
    /**
    Decode the codepoint starting at `src[0]`.

    `src` is non-empty and `src[0]` is not the terminator.  Returns the codepoint and the number of units it occupied.
    */
    fn decode_one(src: &[Self::Unit], cfg: &Config) -> Result<(u32, usize), Error>;

    /**
    The number of units `cp` encodes to.  `cp` is a valid, non-zero codepoint.
    */
    fn encoded_len(cp: u32) -> usize;

    /**
    Encode `cp` into the start of `dst`, which holds at least `encoded_len(cp)` units.
    */
    fn encode_one(cp: u32, dst: &mut [Self::Unit]);
}

/**
Iterator over the codepoints of a bounded UTF-8 or UTF-16 buffer.

Stops at the first terminator or at the end of the buffer.  After yielding an error, it yields nothing more.
*/
pub struct Decode<'a, E> where E: Transcode {
    src: &'a [E::Unit],
    at: usize,
    cfg: Config,
    failed: bool,
}

impl<'a, E> Decode<'a, E> where E: Transcode {
    pub fn new(src: &'a [E::Unit], cfg: &Config) -> Self {
        Decode {
            src: src,
            at: 0,
            cfg: *cfg,
            failed: false,
        }
    }

    /**
    The offset of the next unit to be read.
    */
    pub fn offset(&self) -> usize {
        self.at
    }

    /**
    Returns `true` if the whole source has been consumed: either the end of the buffer or a terminator has been reached.
    */
    pub fn is_exhausted(&self) -> bool {
        match self.src.get(self.at) {
            Some(unit) => unit.is_zero(),
            None => true,
        }
    }
}

impl<'a, E> Iterator for Decode<'a, E> where E: Transcode {
    type Item = Result<u32, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_exhausted() {
            return None;
        }

        match E::decode_one(&self.src[self.at..], &self.cfg) {
            Ok((cp, used)) => {
                self.at += used;
                Some(Ok(cp))
            },
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            },
        }
    }
}

/**
Counts the codepoints in `src`, validating it without producing any output.
*/
pub fn count<E>(src: &[E::Unit], cfg: &Config) -> Result<usize, Error> where E: Transcode {
    let mut count = 0usize;
    for cp in Decode::<E>::new(src, cfg) {
        cp?;
        if count == cfg.max_count {
            return Err(Error::Overflow);
        }
        count += 1;
    }
    Ok(count)
}

/**
Computes the number of `E` units needed to encode `cps`, not counting the terminator.

Every codepoint is range-checked before it is accounted for.
*/
pub fn measure<E>(cps: &[u32], cfg: &Config) -> Result<usize, Error> where E: Transcode {
    let mut size = 0usize;
    for &cp in cps {
        if check_codepoint(cp)? == 0 {
            break;
        }
        size = size.checked_add(E::encoded_len(cp))
            .filter(|&size| size <= cfg.max_count)
            .ok_or(Error::Overflow)?;
    }
    Ok(size)
}

/**
Decodes `src` into the codepoint buffer `dst`.

`dst.len() - 1` codepoints may be written; the last slot is reserved for the terminator.  If the source still has codepoints left when that capacity is used up, this fails with `Error::BufferTooSmall`.  Returns the number of codepoints written.
*/
pub fn decode_into<E>(src: &[E::Unit], dst: &mut [u32], cfg: &Config) -> Result<usize, Error> where E: Transcode {
    let capacity = dst.len().checked_sub(1).ok_or(Error::BufferTooSmall)?;

    let mut iter = Decode::<E>::new(src, cfg);
    let mut written = 0;
    while written < capacity {
        let cp = match iter.next() {
            Some(cp) => cp?,
            None => break,
        };
        if written == cfg.max_count {
            return Err(Error::Overflow);
        }
        dst[written] = cp;
        written += 1;
    }

    if !iter.is_exhausted() {
        return Err(Error::BufferTooSmall);
    }

    dst[written] = 0;
    Ok(written)
}

/**
Encodes the codepoints in `cps` into `dst`.

`dst.len() - 1` units may be written; the last slot is reserved for the terminator.  A codepoint is never split: if its encoding does not fit, this fails with `Error::BufferTooSmall`.  Returns the number of units written.
*/
pub fn encode_into<E>(cps: &[u32], dst: &mut [E::Unit], cfg: &Config) -> Result<usize, Error> where E: Transcode {
    let capacity = dst.len().checked_sub(1).ok_or(Error::BufferTooSmall)?;

    let mut read = 0;
    let mut written = 0;
    while read < cps.len() && written < capacity {
        let cp = check_codepoint(cps[read])?;
        if cp == 0 {
            break;
        }

        let len = E::encoded_len(cp);
        if capacity - written < len {
            return Err(Error::BufferTooSmall);
        }
        if written + len > cfg.max_count {
            return Err(Error::Overflow);
        }

        E::encode_one(cp, &mut dst[written..written + len]);
        written += len;
        read += 1;
    }

    if read < cps.len() && cps[read] != 0 {
        return Err(Error::BufferTooSmall);
    }

    dst[written] = E::Unit::zero();
    Ok(written)
}
