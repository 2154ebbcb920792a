#![cfg(feature = "default-alloc")]
extern crate utfz;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use utfz::{Error, Options, Utf16, Utf32, Utf8};

#[test]
fn test_hello_world() {
    const CPS: &'static [u32] = &[
        'H' as u32, 'e' as u32, 'l' as u32, 'l' as u32, 'o' as u32, ' ' as u32,
        'W' as u32, 'o' as u32, 'r' as u32, 'l' as u32, 'd' as u32, ' ' as u32,
        '!' as u32, 0,
    ];

    let utf8 = unsafe { Options::new().transcode_ptr::<Utf32, Utf8>(CPS.as_ptr()).expect(here!()) };
    assert_eq!(&utf8[..], b"Hello World !");
    assert_eq!(utf8.len(), CPS.len() - 1);
    assert_eq!(format!("{:?}", utf8), "ZUtf8C\"Hello World !\"");
}

#[test]
fn test_multi_width() {
    const CPS: &'static [u32] = &[0xC9, 0x800, 0x10000, 0];

    let utf8 = utfz::transcode::<Utf32, Utf8>(CPS).expect(here!());
    assert_eq!(&utf8[..], "\u{C9}\u{800}\u{10000}".as_bytes());

    let utf16 = utfz::transcode::<Utf32, Utf16>(CPS).expect(here!());
    assert_eq!(utf16.as_units_with_term(), &[0xC9, 0x800, 0xD800, 0xDC00, 0]);

    let back = utfz::transcode::<Utf16, Utf32>(&utf16).expect(here!());
    assert_eq!(back.as_units_with_term(), CPS);
}

#[test]
fn test_truncated_lead() {
    assert_eq!(utfz::transcode::<Utf8, Utf32>(b"\xC9").err(), Some(Error::StringEndedInCharacter));
    assert_eq!(utfz::transcode::<Utf8, Utf32>(b"\xC9\0\x89").err(), Some(Error::StringEndedInCharacter));
}

#[test]
fn test_orphan_continuation() {
    assert_eq!(utfz::transcode::<Utf8, Utf32>(b"\x80").err(), Some(Error::InvalidUtf8Character));
    assert_eq!(utfz::transcode::<Utf8, Utf16>(b"ok\x80").err(), Some(Error::InvalidUtf8Character));
}

#[test]
fn test_lone_low_surrogate() {
    assert_eq!(utfz::transcode::<Utf16, Utf32>(&[0xDC00, 0]).err(), Some(Error::SurrogatePairInversion));
    assert_eq!(utfz::transcode::<Utf16, Utf8>(&[0xDC00, 0]).err(), Some(Error::SurrogatePairInversion));
}

#[test]
fn test_beyond_max() {
    const CPS: &'static [u32] = &[0x110000, 0];
    assert_eq!(utfz::transcode::<Utf32, Utf8>(CPS).err(), Some(Error::InvalidCodepoint));
    assert_eq!(utfz::transcode::<Utf32, Utf16>(CPS).err(), Some(Error::InvalidCodepoint));
}

#[test]
fn test_empty() {
    let mut opts = Options::new();

    let cps = opts.transcode::<Utf8, Utf32>(b"").expect(here!());
    assert_eq!(cps.as_units_with_term(), &[0]);
    let cps = opts.transcode::<Utf16, Utf32>(&[0]).expect(here!());
    assert_eq!(cps.as_units_with_term(), &[0]);
    let utf8 = opts.transcode::<Utf32, Utf8>(&[0]).expect(here!());
    assert_eq!(utf8.as_units_with_term(), b"\0");
    let utf16 = opts.transcode::<Utf8, Utf16>(b"\0").expect(here!());
    assert_eq!(utf16.as_units_with_term(), &[0]);

    let mut dst = [0xFFFFu16];
    assert_eq!(opts.transcode_into::<Utf32, Utf16>(&[], &mut dst), Ok(0));
    assert_eq!(dst, [0]);
    assert_eq!(opts.transcode_into::<Utf32, Utf16>(&[], &mut []), Err(Error::BufferTooSmall));
}

#[test]
fn test_exact_fit() {
    let mut opts = Options::new();
    let mut dst = [0xFFu8; 4];
    assert_eq!(opts.transcode_into::<Utf16, Utf8>(&[0x67, 0xAA, 0], &mut dst), Ok(3));
    assert_eq!(&dst, b"g\xC2\xAA\0");

    let mut dst = [0xFFu8; 3];
    assert_eq!(opts.transcode_into::<Utf16, Utf8>(&[0x67, 0xAA, 0], &mut dst), Err(Error::BufferTooSmall));
}

#[test]
fn test_terminated_pointers() {
    let mut opts = Options::new();
    let utf16 = unsafe { opts.transcode_ptr::<Utf8, Utf16>("gªrçon\0".as_ptr()).expect(here!()) };
    assert_eq!(&utf16[..], &[0x67, 0xAA, 0x72, 0xE7, 0x6F, 0x6E][..]);

    let null = unsafe { opts.transcode_ptr::<Utf16, Utf8>(std::ptr::null()) };
    assert_eq!(null.err(), Some(Error::NullPointer));
}
