/*!
Error taxonomy.

Every fallible operation in this crate fails with exactly one `Error`.  Each kind has a fixed negative code, which is what the C interface returns in place of a count.
*/
use libc::c_int;
use thiserror::Error;

/**
The reasons a length probe, count, estimate, or transcoding pass can fail.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// A null pointer was given as source or destination.
    #[error("null pointer given as source or destination")]
    NullPointer,

    /// An invalid UTF-8 leading or continuation byte was found.
    #[error("invalid UTF-8 character")]
    InvalidUtf8Character,

    /// A high surrogate was followed by something other than a low surrogate.
    #[error("invalid UTF-16 character")]
    InvalidUtf16Character,

    /// The input ended part-way through a multi-unit character.
    #[error("string ended in character")]
    StringEndedInCharacter,

    /// A codepoint above U+10FFFF, or inside the surrogate band.
    #[error("invalid codepoint")]
    InvalidCodepoint,

    /// A low surrogate was found without a preceding high surrogate.
    #[error("surrogate pair inversion")]
    SurrogatePairInversion,

    /// An allocator strategy is missing its allocate or free function.
    #[error("invalid allocator")]
    InvalidAllocator,

    /// No allocator was supplied, and default allocator support is compiled out.
    #[error("no allocator given and no default allocator available")]
    NullAllocator,

    /// The allocator could not provide a suitable buffer.
    #[error("failed to allocate memory")]
    BadAllocation,

    /// A length, size, or count exceeded the representable range.
    #[error("overflow while computing size")]
    Overflow,

    /// A parameter was out of range; usually a negative length.
    #[error("invalid parameter")]
    InvalidParameter,

    /// The destination or scratch buffer cannot hold the result.
    #[error("buffer too small to hold the result")]
    BufferTooSmall,
}

impl Error {
    /**
    Returns the stable negative code for this error.
    */
    pub fn code(self) -> c_int {
        match self {
            Error::NullPointer => -1,
            Error::InvalidUtf8Character => -2,
            Error::InvalidUtf16Character => -3,
            Error::StringEndedInCharacter => -4,
            Error::InvalidCodepoint => -5,
            Error::SurrogatePairInversion => -6,
            Error::InvalidAllocator => -7,
            Error::NullAllocator => -8,
            Error::BadAllocation => -9,
            Error::Overflow => -10,
            Error::InvalidParameter => -11,
            Error::BufferTooSmall => -12,
        }
    }

    /**
    The inverse of `code`.  Returns `None` for codes that do not name an error, including every non-negative value.
    */
    pub fn from_code(code: c_int) -> Option<Error> {
        let err = match code {
            -1 => Error::NullPointer,
            -2 => Error::InvalidUtf8Character,
            -3 => Error::InvalidUtf16Character,
            -4 => Error::StringEndedInCharacter,
            -5 => Error::InvalidCodepoint,
            -6 => Error::SurrogatePairInversion,
            -7 => Error::InvalidAllocator,
            -8 => Error::NullAllocator,
            -9 => Error::BadAllocation,
            -10 => Error::Overflow,
            -11 => Error::InvalidParameter,
            -12 => Error::BufferTooSmall,
            _ => return None,
        };
        Some(err)
    }
}
