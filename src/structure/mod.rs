/*!
Zero-terminated string structure.

Strings handed over from foreign code are pointers to the first unit, with a terminating zero unit.  This module finds that terminator (the *length probe*), and turns such pointers into bounded slices that the transcoding passes can work on.
*/
use std::slice;

use crate::encoding::Unit;
use crate::error::Error;

/**
Strings represented by a pointer to the first unit, terminated by a zero unit.
*/
pub enum ZeroTerm {}

impl ZeroTerm {
    /**
    Returns the number of units before the terminator.

    No validation of the units themselves is done.  Fails with `Error::NullPointer` if `ptr` is null, or `Error::Overflow` if more than `max` units precede the terminator.

    # Safety

    If non-null, `ptr` must point to a readable sequence of units containing a terminator, or at least `max + 1` units.
    */
    pub unsafe fn probe<U>(ptr: *const U, max: usize) -> Result<usize, Error> where U: Unit {
        if ptr.is_null() {
            return Err(Error::NullPointer);
        }

        let mut len = 0;
        while !(*ptr.add(len)).is_zero() {
            if len == max {
                return Err(Error::Overflow);
            }
            len += 1;
        }
        Ok(len)
    }

    /**
    Borrow the units of a zero-terminated string, *excluding* the terminator.

    # Safety

    As for `probe`; the memory must also remain valid and unmodified for `'a`.
    */
    pub unsafe fn slice_units<'a, U>(ptr: *const U, max: usize) -> Result<&'a [U], Error> where U: Unit {
        let len = ZeroTerm::probe(ptr, max)?;
        Ok(slice::from_raw_parts(ptr, len))
    }

    /**
    Borrow `len` units starting at `ptr`, as for an explicitly bounded string.  The units may or may not contain a terminator.

    # Safety

    If non-null, `ptr` must point to `len` readable units which remain valid and unmodified for `'a`.
    */
    pub unsafe fn slice_units_n<'a, U>(ptr: *const U, len: usize) -> Result<&'a [U], Error> where U: Unit {
        if ptr.is_null() {
            return Err(Error::NullPointer);
        }
        Ok(slice::from_raw_parts(ptr, len))
    }

    /**
    Mutably borrow a destination buffer with room for `capacity` units *plus* the terminator.

    # Safety

    If non-null, `ptr` must point to `capacity + 1` writable units which are not aliased for `'a`.
    */
    pub unsafe fn slice_buffer_mut<'a, U>(ptr: *mut U, capacity: usize) -> Result<&'a mut [U], Error> where U: Unit {
        if ptr.is_null() {
            return Err(Error::NullPointer);
        }
        let total = capacity.checked_add(1).ok_or(Error::Overflow)?;
        Ok(slice::from_raw_parts_mut(ptr, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn probes_each_unit_width() {
        unsafe {
            assert_eq!(ZeroTerm::probe(b"hello\0".as_ptr(), usize::MAX), Ok(5));
            assert_eq!(ZeroTerm::probe([0x41u16, 0xD800, 0].as_ptr(), usize::MAX), Ok(2));
            assert_eq!(ZeroTerm::probe([0x110000u32, 0].as_ptr(), usize::MAX), Ok(1));
            assert_eq!(ZeroTerm::probe([0u32].as_ptr(), usize::MAX), Ok(0));
        }
    }

    #[test]
    fn null_pointer() {
        unsafe {
            assert_eq!(ZeroTerm::probe(ptr::null::<u8>(), usize::MAX), Err(Error::NullPointer));
            assert_eq!(ZeroTerm::slice_units_n(ptr::null::<u16>(), 3).err(), Some(Error::NullPointer));
            assert_eq!(ZeroTerm::slice_buffer_mut(ptr::null_mut::<u32>(), 3).err(), Some(Error::NullPointer));
        }
    }

    #[test]
    fn overflow_at_limit() {
        let src = b"abcd\0";
        unsafe {
            assert_eq!(ZeroTerm::probe(src.as_ptr(), 4), Ok(4));
            assert_eq!(ZeroTerm::probe(src.as_ptr(), 3), Err(Error::Overflow));
            assert_eq!(ZeroTerm::slice_units(src.as_ptr(), 4), Ok(&b"abcd"[..]));
        }
    }
}
