/*!
C interface.

*Only available when the `c-exports` feature is enabled.*

Every function returns either a non-negative count or a negative `Error` code.  Sizes are C `int`s; negative sizes are rejected with `Error::InvalidParameter`.  Destination and scratch capacities exclude the terminator: a buffer passed with capacity `n` must have room for `n + 1` units.

Allocator pointers may be null, in which case the process-wide default is used.  Buffers returned through an `out` parameter belong to the caller, and must be released with the same allocator (`utfz_free` does this).  On failure, `*out` is set to null and nothing needs releasing.

| Suffix | Meaning |
| ------ | ------- |
| `n` | explicit source length |
| `m` | caller-supplied destination buffer |
| `l` | caller-supplied scratch codepoint buffer |
| `a` | explicit allocator |
*/
use std::ptr::{self, NonNull};

use libc::{c_int, c_void};

use crate::alloc::{AllocPair, Allocator};
use crate::encoding::conv::{self, Config, Transcode, MAX_COUNT};
use crate::encoding::{Encoding, TranscodeTo, Unit, Utf16, Utf32, Utf8};
use crate::error::Error;
use crate::structure::ZeroTerm;
use crate::transcoder::Options;

fn status(result: Result<usize, Error>) -> c_int {
    match result {
        Ok(n) => n as c_int,
        Err(err) => err.code(),
    }
}

fn length(len: c_int) -> Result<usize, Error> {
    if len < 0 {
        Err(Error::InvalidParameter)
    } else {
        Ok(len as usize)
    }
}

unsafe fn source<'a, U>(ptr: *const U, len: c_int) -> Result<&'a [U], Error> where U: Unit {
    if ptr.is_null() {
        return Err(Error::NullPointer);
    }
    ZeroTerm::slice_units_n(ptr, length(len)?)
}

unsafe fn buffer<'a, U>(ptr: *mut U, capacity: c_int) -> Result<&'a mut [U], Error> where U: Unit {
    if ptr.is_null() {
        return Err(Error::NullPointer);
    }
    ZeroTerm::slice_buffer_mut(ptr, length(capacity)?)
}

unsafe fn options<'a>(alloc: *const AllocPair) -> Options<'a> {
    match alloc.as_ref() {
        Some(pair) => Options::new().with_allocator(*pair),
        None => Options::new(),
    }
}

unsafe fn into_caller<S, D>(
    src: *const S::Unit,
    src_len: c_int,
    dst: *mut D::Unit,
    dst_cap: c_int,
    opts: &mut Options,
) -> Result<usize, Error>
where
    S: TranscodeTo<D>,
    D: Encoding,
{
    if src.is_null() || dst.is_null() {
        return Err(Error::NullPointer);
    }
    let src = source(src, src_len)?;
    let dst = buffer(dst, dst_cap)?;
    opts.transcode_into::<S, D>(src, dst)
}

unsafe fn into_allocated<S, D>(
    src: *const S::Unit,
    src_len: c_int,
    out: *mut *mut D::Unit,
    opts: &mut Options,
) -> Result<usize, Error>
where
    S: TranscodeTo<D>,
    D: Encoding,
{
    opts.allocator()?;
    if out.is_null() {
        return Err(Error::NullPointer);
    }
    *out = ptr::null_mut();

    let src = source(src, src_len)?;
    let result = opts.transcode::<S, D>(src)?;
    let len = result.len();
    *out = result.into_raw();
    Ok(len)
}

unsafe fn count_n<E>(src: *const E::Unit, src_len: c_int) -> Result<usize, Error> where E: Transcode {
    conv::count::<E>(source(src, src_len)?, &Config::default())
}

unsafe fn count_z<E>(src: *const E::Unit) -> Result<usize, Error> where E: Transcode {
    conv::count::<E>(ZeroTerm::slice_units(src, MAX_COUNT)?, &Config::default())
}

unsafe fn measure_n<E>(cps: *const u32, count: c_int) -> Result<usize, Error> where E: Transcode {
    conv::measure::<E>(source(cps, count)?, &Config::default())
}

unsafe fn measure_z<E>(cps: *const u32) -> Result<usize, Error> where E: Transcode {
    conv::measure::<E>(ZeroTerm::slice_units(cps, MAX_COUNT)?, &Config::default())
}

/// Number of bytes before the terminator of a UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn utfz_utf8_len(src: *const u8) -> c_int {
    status(ZeroTerm::probe(src, MAX_COUNT))
}

/// Number of code units before the terminator of a UTF-16 string.
#[no_mangle]
pub unsafe extern "C" fn utfz_utf16_len(src: *const u16) -> c_int {
    status(ZeroTerm::probe(src, MAX_COUNT))
}

/// Number of codepoints before the terminator of a codepoint array.
#[no_mangle]
pub unsafe extern "C" fn utfz_codepoints_len(cps: *const u32) -> c_int {
    status(ZeroTerm::probe(cps, MAX_COUNT))
}

/// Validates a zero-terminated UTF-8 string and counts its codepoints.
#[no_mangle]
pub unsafe extern "C" fn utfz_count_utf8(src: *const u8) -> c_int {
    status(count_z::<Utf8>(src))
}

/// Validates at most `src_len` bytes of UTF-8 and counts their codepoints.
#[no_mangle]
pub unsafe extern "C" fn utfz_count_utf8_n(src: *const u8, src_len: c_int) -> c_int {
    status(count_n::<Utf8>(src, src_len))
}

/// Validates a zero-terminated UTF-16 string and counts its codepoints.
#[no_mangle]
pub unsafe extern "C" fn utfz_count_utf16(src: *const u16) -> c_int {
    status(count_z::<Utf16>(src))
}

/// Validates at most `src_len` units of UTF-16 and counts their codepoints.
#[no_mangle]
pub unsafe extern "C" fn utfz_count_utf16_n(src: *const u16, src_len: c_int) -> c_int {
    status(count_n::<Utf16>(src, src_len))
}

/// Number of bytes needed to encode a zero-terminated codepoint array as UTF-8, excluding the terminator.
#[no_mangle]
pub unsafe extern "C" fn utfz_utf8_size(cps: *const u32) -> c_int {
    status(measure_z::<Utf8>(cps))
}

#[no_mangle]
pub unsafe extern "C" fn utfz_utf8_size_n(cps: *const u32, count: c_int) -> c_int {
    status(measure_n::<Utf8>(cps, count))
}

/// Number of units needed to encode a zero-terminated codepoint array as UTF-16, excluding the terminator.
#[no_mangle]
pub unsafe extern "C" fn utfz_utf16_size(cps: *const u32) -> c_int {
    status(measure_z::<Utf16>(cps))
}

#[no_mangle]
pub unsafe extern "C" fn utfz_utf16_size_n(cps: *const u32, count: c_int) -> c_int {
    status(measure_n::<Utf16>(cps, count))
}

macro_rules! export_direct {
    ($src:ty => $dst:ty, $nm:ident, $na:ident) => {
        #[no_mangle]
        pub unsafe extern "C" fn $nm(
            src: *const <$src as Encoding>::Unit,
            src_len: c_int,
            dst: *mut <$dst as Encoding>::Unit,
            dst_cap: c_int,
        ) -> c_int {
            status(into_caller::<$src, $dst>(src, src_len, dst, dst_cap, &mut Options::new()))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $na(
            src: *const <$src as Encoding>::Unit,
            src_len: c_int,
            out: *mut *mut <$dst as Encoding>::Unit,
            alloc: *const AllocPair,
        ) -> c_int {
            status(into_allocated::<$src, $dst>(src, src_len, out, &mut options(alloc)))
        }
    };
}

macro_rules! export_composite {
    ($src:ty => $dst:ty, $nma:ident, $nml:ident, $na:ident, $nla:ident) => {
        #[no_mangle]
        pub unsafe extern "C" fn $nma(
            src: *const <$src as Encoding>::Unit,
            src_len: c_int,
            dst: *mut <$dst as Encoding>::Unit,
            dst_cap: c_int,
            alloc: *const AllocPair,
        ) -> c_int {
            let mut opts = options(alloc);
            status(opts.allocator().and_then(|_| {
                into_caller::<$src, $dst>(src, src_len, dst, dst_cap, &mut opts)
            }))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $nml(
            src: *const <$src as Encoding>::Unit,
            src_len: c_int,
            dst: *mut <$dst as Encoding>::Unit,
            dst_cap: c_int,
            scratch: *mut u32,
            scratch_cap: c_int,
        ) -> c_int {
            status(buffer(scratch, scratch_cap).and_then(|scratch| {
                into_caller::<$src, $dst>(src, src_len, dst, dst_cap, &mut Options::new().with_scratch(scratch))
            }))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $na(
            src: *const <$src as Encoding>::Unit,
            src_len: c_int,
            out: *mut *mut <$dst as Encoding>::Unit,
            alloc: *const AllocPair,
        ) -> c_int {
            status(into_allocated::<$src, $dst>(src, src_len, out, &mut options(alloc)))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $nla(
            src: *const <$src as Encoding>::Unit,
            src_len: c_int,
            out: *mut *mut <$dst as Encoding>::Unit,
            scratch: *mut u32,
            scratch_cap: c_int,
            alloc: *const AllocPair,
        ) -> c_int {
            status(buffer(scratch, scratch_cap).and_then(|scratch| {
                into_allocated::<$src, $dst>(src, src_len, out, &mut options(alloc).with_scratch(scratch))
            }))
        }
    };
}

export_direct! { Utf8 => Utf32, utfz_utf8_to_codepoints_nm, utfz_utf8_to_codepoints_na }
export_direct! { Utf16 => Utf32, utfz_utf16_to_codepoints_nm, utfz_utf16_to_codepoints_na }
export_direct! { Utf32 => Utf8, utfz_codepoints_to_utf8_nm, utfz_codepoints_to_utf8_na }
export_direct! { Utf32 => Utf16, utfz_codepoints_to_utf16_nm, utfz_codepoints_to_utf16_na }

export_composite! {
    Utf8 => Utf16,
    utfz_utf8_to_utf16_nma, utfz_utf8_to_utf16_nml, utfz_utf8_to_utf16_na, utfz_utf8_to_utf16_nla
}
export_composite! {
    Utf16 => Utf8,
    utfz_utf16_to_utf8_nma, utfz_utf16_to_utf8_nml, utfz_utf16_to_utf8_na, utfz_utf16_to_utf8_nla
}

/**
Release a buffer returned through an `out` parameter.

`alloc` must be the allocator (or null, for the default) that was passed to the function which returned `ptr`.  Returns zero, or a negative error code if `alloc` cannot be resolved.
*/
#[no_mangle]
pub unsafe extern "C" fn utfz_free(ptr: *mut c_void, alloc: *const AllocPair) -> c_int {
    let alloc = match Allocator::resolve(alloc.as_ref()) {
        Ok(alloc) => alloc,
        Err(err) => return err.code(),
    };
    if let Some(ptr) = NonNull::new(ptr) {
        alloc.free(ptr);
    }
    0
}
