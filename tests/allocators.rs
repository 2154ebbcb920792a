extern crate libc;
extern crate utfz;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use std::cell::Cell;

use libc::{c_void, size_t};
use utfz::{AllocPair, Config, Continuation, Error, Options, Utf16, Utf32, Utf8, ZString};

thread_local! {
    static ALLOCATIONS: Cell<usize> = Cell::new(0);
    static OUTSTANDING: Cell<isize> = Cell::new(0);
}

unsafe extern "C" fn counting_alloc(size: size_t) -> *mut c_void {
    let ptr = libc::malloc(size);
    if !ptr.is_null() {
        ALLOCATIONS.with(|n| n.set(n.get() + 1));
        OUTSTANDING.with(|n| n.set(n.get() + 1));
    }
    ptr
}

unsafe extern "C" fn counting_free(ptr: *mut c_void) {
    if !ptr.is_null() {
        OUTSTANDING.with(|n| n.set(n.get() - 1));
    }
    libc::free(ptr);
}

unsafe extern "C" fn failing_alloc(_size: size_t) -> *mut c_void {
    std::ptr::null_mut()
}

/// Resets the counters; the harness may reuse a thread between tests.
fn counting() -> AllocPair {
    ALLOCATIONS.with(|n| n.set(0));
    OUTSTANDING.with(|n| n.set(0));
    AllocPair::new(counting_alloc, counting_free)
}

fn allocations() -> usize {
    ALLOCATIONS.with(|n| n.get())
}

fn outstanding() -> isize {
    OUTSTANDING.with(|n| n.get())
}

fn lenient() -> Config {
    Config { continuation: Continuation::Lenient, ..Config::default() }
}

#[test]
fn test_result_owns_buffer() {
    let mut opts = Options::new().with_allocator(counting());
    {
        let cps = opts.transcode::<Utf8, Utf32>("gªrçon".as_bytes()).expect(here!());
        assert_eq!(cps.len(), 6);
        assert_eq!(format!("{:?}", cps), "ZUtf32A\"g\\x{aa}r\\x{e7}on\"");
        assert_eq!((allocations(), outstanding()), (1, 1));
    }
    assert_eq!(outstanding(), 0);
}

#[test]
fn test_composite_releases_intermediate() {
    let mut opts = Options::new().with_allocator(counting());
    let utf16 = opts.transcode::<Utf8, Utf16>("gªrçon".as_bytes()).expect(here!());
    assert_eq!(&utf16[..], &[0x67, 0xAA, 0x72, 0xE7, 0x6F, 0x6E][..]);

    // Intermediate codepoints, then the result.
    assert_eq!(allocations(), 2);
    assert_eq!(outstanding(), 1);
    drop(utf16);
    assert_eq!(outstanding(), 0);
}

#[test]
fn test_composite_failure_releases_intermediate() {
    // Decodes to U+110000 under the lenient rule, which no encoder accepts.
    let src = b"\xF4\x90\x80\x80";
    let mut opts = Options::new().with_config(lenient()).with_allocator(counting());

    assert_eq!(opts.transcode::<Utf8, Utf16>(src).err(), Some(Error::InvalidCodepoint));
    assert_eq!((allocations(), outstanding()), (1, 0));

    let mut dst = [0u16; 8];
    assert_eq!(opts.transcode_into::<Utf8, Utf16>(src, &mut dst), Err(Error::InvalidCodepoint));
    assert_eq!((allocations(), outstanding()), (2, 0));
}

#[test]
fn test_caller_buffer_too_small_releases_intermediate() {
    let mut opts = Options::new().with_allocator(counting());
    let mut dst = [0u8; 3];
    let result = opts.transcode_into::<Utf16, Utf8>(&[0x61, 0xD83D, 0xDE00, 0], &mut dst);
    assert_eq!(result, Err(Error::BufferTooSmall));
    assert_eq!((allocations(), outstanding()), (1, 0));
}

#[test]
fn test_invalid_source_allocates_nothing() {
    let mut opts = Options::new().with_allocator(counting());
    assert_eq!(opts.transcode::<Utf8, Utf32>(b"ab\x80").err(), Some(Error::InvalidUtf8Character));
    assert_eq!(opts.transcode::<Utf32, Utf8>(&[0x41, 0xD800]).err(), Some(Error::InvalidCodepoint));
    assert_eq!(opts.transcode::<Utf8, Utf16>(b"\xC9").err(), Some(Error::StringEndedInCharacter));
    assert_eq!(allocations(), 0);
}

#[test]
fn test_scratch_avoids_intermediate() {
    let mut scratch = [0u32; 16];
    let mut opts = Options::new().with_allocator(counting()).with_scratch(&mut scratch);

    let utf8 = opts.transcode::<Utf16, Utf8>(&[0x48, 0xD83D, 0xDE00]).expect(here!());
    assert_eq!(&utf8[..], "H\u{1F600}".as_bytes());
    assert_eq!((allocations(), outstanding()), (1, 1));

    let mut dst = [0u16; 4];
    let n = opts.transcode_into::<Utf8, Utf16>(&utf8, &mut dst).expect(here!());
    assert_eq!(&dst[..n + 1], &[0x48, 0xD83D, 0xDE00, 0]);
    assert_eq!(allocations(), 1);
}

#[test]
fn test_failing_allocator() {
    let pair = AllocPair { alloc: Some(failing_alloc), ..counting() };
    let mut opts = Options::new().with_allocator(pair);
    assert_eq!(opts.transcode::<Utf8, Utf32>(b"abc").err(), Some(Error::BadAllocation));
    assert_eq!(opts.transcode::<Utf16, Utf8>(&[0x61]).err(), Some(Error::BadAllocation));
}

#[test]
fn test_incomplete_allocator() {
    let pair = AllocPair { free: None, ..counting() };
    let mut opts = Options::new().with_allocator(pair);
    assert_eq!(opts.transcode::<Utf32, Utf16>(&[0x41]).err(), Some(Error::InvalidAllocator));
    assert_eq!(allocations(), 0);
}

#[test]
fn test_ownership_transfer() {
    let mut opts = Options::new().with_allocator(counting());
    let utf16 = opts.transcode::<Utf32, Utf16>(&[0x10437]).expect(here!());
    let alloc = utf16.allocator();

    let raw = utf16.into_raw();
    assert_eq!(outstanding(), 1);
    unsafe {
        assert_eq!(std::slice::from_raw_parts(raw, 3), &[0xD801, 0xDC37, 0]);
    }

    let utf16 = unsafe { ZString::<Utf16>::from_raw(raw, alloc).expect(here!()) };
    assert_eq!(&utf16[..], &[0xD801, 0xDC37][..]);
    drop(utf16);
    assert_eq!(outstanding(), 0);
}

#[cfg(not(feature = "default-alloc"))]
#[test]
fn test_no_default_allocator() {
    let mut opts = Options::new();
    assert_eq!(opts.transcode::<Utf8, Utf32>(b"abc").err(), Some(Error::NullAllocator));

    // Caller buffers never need an allocator.
    let mut scratch = [0u32; 4];
    let mut dst = [0u16; 4];
    let mut opts = Options::new().with_scratch(&mut scratch);
    assert_eq!(opts.transcode_into::<Utf8, Utf16>(b"abc", &mut dst), Ok(3));
}
