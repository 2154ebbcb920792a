/*!
Owned zero-terminated strings.
*/
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::mem;
use std::ops::Deref;
use std::ptr::NonNull;
use std::slice;

use crate::alloc::Allocator;
use crate::encoding::{Encoding, Unit};
use crate::error::Error;
use crate::structure::ZeroTerm;

/**
An owned, zero-terminated string, allocated through a caller-chosen `Allocator`.

This is the result of every allocating conversion.  It dereferences to the units of the string, *excluding* the terminator; the terminator is always present in memory just past the last unit.

The buffer is released with the same `Allocator` that produced it when the `ZString` is dropped.  Use `into_raw` to hand it to foreign code instead.

# Parameters

`E` defines the encoding of the string data.  *e.g.* `Utf8` for bytes, and `Utf32` for codepoint arrays.
*/
pub struct ZString<E> where E: Encoding {
    ptr: NonNull<E::Unit>,
    len: usize,
    capacity: usize,
    alloc: Allocator,
    _marker: PhantomData<E>,
}

impl<E> ZString<E> where E: Encoding {
    /**
    Allocate a zeroed buffer with room for `capacity` units plus the terminator.
    */
    pub(crate) fn with_capacity(capacity: usize, alloc: Allocator) -> Result<Self, Error> {
        let total = capacity.checked_add(1).ok_or(Error::Overflow)?;
        let ptr = alloc.alloc_units::<E::Unit>(total)?;
        Ok(ZString {
            ptr: ptr,
            len: 0,
            capacity: capacity,
            alloc: alloc,
            _marker: PhantomData,
        })
    }

    /**
    The whole buffer, including the slot reserved for the terminator.
    */
    pub(crate) fn buffer_mut(&mut self) -> &mut [E::Unit] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity + 1) }
    }

    /**
    Record how many units are in use.  `len` must not exceed the capacity, and the unit at `len` must be the terminator.
    */
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity);
        self.len = len;
    }

    /**
    Takes ownership of a zero-terminated buffer allocated by `alloc`.

    # Safety

    `ptr` must have been allocated by the strategy `alloc` was resolved from, must be zero-terminated, and must not be owned by anything else.
    */
    pub unsafe fn from_raw(ptr: *mut E::Unit, alloc: Allocator) -> Result<Self, Error> {
        let len = ZeroTerm::probe(ptr as *const E::Unit, usize::MAX - 1)?;
        let ptr = NonNull::new(ptr).ok_or(Error::NullPointer)?;
        Ok(ZString {
            ptr: ptr,
            len: len,
            capacity: len,
            alloc: alloc,
            _marker: PhantomData,
        })
    }

    /**
    Relinquishes ownership of this string and returns a pointer to its first unit.

    The caller becomes responsible for releasing it, using the free function of `self.allocator()`.
    */
    pub fn into_raw(self) -> *mut E::Unit {
        let ptr = self.ptr.as_ptr();
        mem::forget(self);
        ptr
    }

    /**
    The allocator that owns this buffer.
    */
    pub fn allocator(&self) -> Allocator {
        self.alloc
    }

    pub fn as_ptr(&self) -> *const E::Unit {
        self.ptr.as_ptr()
    }

    pub fn as_units(&self) -> &[E::Unit] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /**
    Returns the units of the string, *including* the zero terminator.
    */
    pub fn as_units_with_term(&self) -> &[E::Unit] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }
}

impl<E> AsRef<[E::Unit]> for ZString<E> where E: Encoding {
    fn as_ref(&self) -> &[E::Unit] {
        self.as_units()
    }
}

impl<E> Debug for ZString<E> where E: Encoding {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Z{}{}\"", E::debug_prefix(), self.alloc.debug_prefix())?;
        for unit in self.as_units() {
            match unit.widen() {
                cu @ 0x20..=0x7E if cu != 0x22 && cu != 0x5C => write!(fmt, "{}", cu as u8 as char)?,
                cu => write!(fmt, "\\x{{{:x}}}", cu)?,
            }
        }
        write!(fmt, "\"")
    }
}

impl<E> Deref for ZString<E> where E: Encoding {
    type Target = [E::Unit];

    fn deref(&self) -> &[E::Unit] {
        self.as_units()
    }
}

impl<E> Drop for ZString<E> where E: Encoding {
    fn drop(&mut self) {
        unsafe {
            self.alloc.free(self.ptr);
        }
    }
}

impl<E> Eq for ZString<E> where E: Encoding {}

impl<E> PartialEq for ZString<E> where E: Encoding {
    fn eq(&self, other: &ZString<E>) -> bool {
        self.as_units() == other.as_units()
    }
}

impl<E> PartialEq<[E::Unit]> for ZString<E> where E: Encoding {
    fn eq(&self, other: &[E::Unit]) -> bool {
        self.as_units() == other
    }
}

impl<'a, E> PartialEq<&'a [E::Unit]> for ZString<E> where E: Encoding {
    fn eq(&self, other: &&'a [E::Unit]) -> bool {
        self.as_units() == *other
    }
}
