/*!
This crate transcodes between zero-terminated UTF-8, UTF-16, and codepoint arrays, allocating through caller-supplied allocators.

For more details, see the [additional documentation](doc/index.html).

# Quick Reference

The following table describes the string types, and when to use them.  Every type is zero-terminated; "capacity" never counts the terminator.

| FFI Type | Documented properties | Rust Type |
| ---: | --- | --- |
| `*const u8` | Zero-terminated UTF-8 | `&[u8]` via `ZeroTerm::slice_units` |
| `*mut u8` | *Owned* zero-terminated UTF-8, from any allocator | `ZUtf8String` |
| `*const u16` | Zero-terminated UTF-16, native byte order | `&[u16]` via `ZeroTerm::slice_units` |
| `*mut u16` | *Owned* zero-terminated UTF-16, from any allocator | `ZUtf16String` |
| `*const u32` | Zero-terminated codepoint array | `&[u32]` via `ZeroTerm::slice_units` |
| `*mut u32` | *Owned* zero-terminated codepoint array, from any allocator | `ZCodepoints` |

All conversions go through `Options`, or through the `transcode` shorthand for the defaults:

```
# #[cfg(feature = "default-alloc")] {
use utfz::{Utf32, Utf8};

let cps = utfz::transcode::<Utf8, Utf32>("\u{C9}\u{800}\u{10000}".as_bytes()).unwrap();
assert_eq!(&cps[..], &[0xC9, 0x800, 0x10000][..]);
# }
```
*/
pub mod alloc;
#[doc(hidden)] pub mod doc;
pub mod encoding;
pub mod error;
pub mod sea;
pub mod structure;
pub mod transcoder;

#[cfg(feature = "c-exports")]
pub mod ffi;

pub use crate::alloc::{AllocPair, Allocator, Malloc};
pub use crate::encoding::conv::{Config, Continuation, MAX_COUNT};
pub use crate::encoding::{Encoding, TranscodeTo, Utf16, Utf32, Utf8};
pub use crate::error::Error;
pub use crate::sea::ZString;
pub use crate::structure::ZeroTerm;
pub use crate::transcoder::Options;

pub type ZUtf8String = ZString<Utf8>;
pub type ZUtf16String = ZString<Utf16>;
pub type ZCodepoints = ZString<Utf32>;

/**
Convert `src` into a newly allocated string, using the default options.
*/
pub fn transcode<S, D>(src: &[S::Unit]) -> Result<ZString<D>, Error>
where
    S: TranscodeTo<D>,
    D: Encoding,
{
    Options::new().transcode::<S, D>(src)
}
