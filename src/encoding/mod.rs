/*!
Encoding types and traits.

There are exactly three encodings: `Utf8`, `Utf16`, and `Utf32` (raw codepoint arrays).  Each is an uninhabited marker type; they exist only to select behaviour at compile time.
*/
pub mod conv;

use crate::error::Error;
use crate::sea::ZString;
use crate::transcoder::Options;

macro_rules! int_unit_impl {
    ($($ty_name:ty),*) => {
        $(
            impl Unit for $ty_name {
                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                #[inline]
                fn widen(&self) -> u32 {
                    *self as u32
                }
            }
        )*
    };
}

/**
Identifies a text encoding and the code unit it is stored in.
*/
pub trait Encoding {
    type Unit: Unit;

    /**
    Returns a string which can be used to uniquely identify this encoding in debug output.
    */
    fn debug_prefix() -> &'static str;
}

/**
A code unit.  The zero unit is the terminator, and is never part of the text itself.
*/
pub trait Unit: Copy + Eq + ::std::fmt::Debug {
    fn zero() -> Self;
    fn is_zero(&self) -> bool;

    /// The unit's value as a `u32`.
    fn widen(&self) -> u32;
}

int_unit_impl! { u8, u16, u32 }

/**
Conversion from one encoding into another.

Implemented for every ordered pair of distinct encodings.  Sources are bounded slices: scanning stops at the first terminator, or at the end of the slice, whichever comes first.
*/
pub trait TranscodeTo<Dst>: Encoding where Dst: Encoding {
    /**
    Transcode into a caller-supplied buffer.

    `dst` must have room for the result *and* a terminator; its capacity is `dst.len() - 1`.  Returns the number of units written, not counting the terminator.
    */
    fn transcode_into(src: &[Self::Unit], dst: &mut [Dst::Unit], opts: &mut Options) -> Result<usize, Error>;

    /**
    Transcode into a freshly allocated buffer, using the allocator in `opts`.
    */
    fn transcode(src: &[Self::Unit], opts: &mut Options) -> Result<ZString<Dst>, Error>;
}

/**
UTF-8, stored as bytes.
*/
pub enum Utf8 {}

impl Encoding for Utf8 {
    type Unit = u8;
    fn debug_prefix() -> &'static str { "Utf8" }
}

/**
UTF-16, stored as 16-bit code units in native byte order.
*/
pub enum Utf16 {}

impl Encoding for Utf16 {
    type Unit = u16;
    fn debug_prefix() -> &'static str { "Utf16" }
}

/**
Raw codepoints, one per 32-bit unit.
*/
pub enum Utf32 {}

impl Encoding for Utf32 {
    type Unit = u32;
    fn debug_prefix() -> &'static str { "Utf32" }
}

/// The largest valid codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// First codepoint of the surrogate band.
pub const SURROGATE_FIRST: u32 = 0xD800;

/// Last codepoint of the surrogate band.
pub const SURROGATE_LAST: u32 = 0xDFFF;

/**
Checks that `cp` may appear in a codepoint array.

Zero passes, since it is the terminator; anything above `MAX_CODEPOINT` or inside the surrogate band fails with `Error::InvalidCodepoint`.
*/
#[inline]
pub fn check_codepoint(cp: u32) -> Result<u32, Error> {
    if cp > MAX_CODEPOINT || (SURROGATE_FIRST..=SURROGATE_LAST).contains(&cp) {
        Err(Error::InvalidCodepoint)
    } else {
        Ok(cp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x0)]
    #[case(0x41)]
    #[case(0xD7FF)]
    #[case(0xE000)]
    #[case(0xFFFF)]
    #[case(0x10000)]
    #[case(0x10FFFF)]
    fn valid_codepoints(#[case] cp: u32) {
        assert_eq!(check_codepoint(cp), Ok(cp));
    }

    #[rstest]
    #[case(0xD800)]
    #[case(0xDBFF)]
    #[case(0xDC00)]
    #[case(0xDFFF)]
    #[case(0x110000)]
    #[case(u32::MAX)]
    fn invalid_codepoints(#[case] cp: u32) {
        assert_eq!(check_codepoint(cp), Err(Error::InvalidCodepoint));
    }
}
