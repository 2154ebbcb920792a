/*!
Allocation types.

Any operation that hands back a freshly allocated buffer does so through an *allocator strategy*: a pair of C-compatible function pointers, one to allocate a number of bytes, one to free a previous allocation.  Callers may supply their own pair; if they don't, a process-wide default backed by the C runtime heap is used instead (unless the `default-alloc` feature is disabled).
*/
use std::mem;
use std::ptr::NonNull;

use libc::{c_void, size_t};
use tracing::{debug, trace};

use crate::error::Error;

/**
Allocate the given number of bytes, returning null on failure.

The returned pointer must be suitably aligned for any of the unit types used by this crate.  `malloc` satisfies this.
*/
pub type AllocFn = unsafe extern "C" fn(size: size_t) -> *mut c_void;

/**
Free a pointer previously returned by the paired `AllocFn`.
*/
pub type FreeFn = unsafe extern "C" fn(ptr: *mut c_void);

/**
An allocator strategy, as supplied by a caller.

Either function may be missing, in which case the strategy is *invalid*, and any attempt to use it fails with `Error::InvalidAllocator`.  This type is binary-compatible with a C struct of two nullable function pointers.
*/
#[derive(Copy, Clone, Debug, Default)]
#[repr(C)]
pub struct AllocPair {
    pub alloc: Option<AllocFn>,
    pub free: Option<FreeFn>,
}

impl AllocPair {
    /**
    Construct a complete strategy from an allocate and free function.
    */
    pub fn new(alloc: AllocFn, free: FreeFn) -> Self {
        AllocPair {
            alloc: Some(alloc),
            free: Some(free),
        }
    }

    /**
    Returns `true` if both functions are present.
    */
    pub fn is_complete(&self) -> bool {
        self.alloc.is_some() && self.free.is_some()
    }
}

/**
Represents the C runtime heap allocator.
*/
pub enum Malloc {}

impl Malloc {
    /**
    The `malloc`/`free` strategy.
    */
    pub fn pair() -> AllocPair {
        AllocPair::new(libc::malloc, libc::free)
    }

    fn debug_prefix() -> &'static str { "C" }
}

/**
A resolved allocator strategy: both functions are known to be present.

Values of this type are obtained from `Allocator::resolve`.  They are plain function pointers, so they are `Copy`, and every owned buffer carries the `Allocator` that produced it.
*/
#[derive(Copy, Clone, Debug)]
pub struct Allocator {
    alloc: AllocFn,
    free: FreeFn,
    is_default: bool,
}

impl Allocator {
    /**
    Resolve a caller-supplied strategy.

    If `pair` is `None`, the process-wide default is used; if there is no default (`default-alloc` is disabled), this fails with `Error::NullAllocator`.  A strategy with only one of its two functions fails with `Error::InvalidAllocator`.
    */
    pub fn resolve(pair: Option<&AllocPair>) -> Result<Self, Error> {
        let (pair, is_default) = match pair {
            Some(pair) => (*pair, false),
            None => (default_pair()?, true),
        };

        match (pair.alloc, pair.free) {
            (Some(alloc), Some(free)) => Ok(Allocator { alloc, free, is_default }),
            _ => {
                debug!("rejecting incomplete allocator strategy");
                Err(Error::InvalidAllocator)
            },
        }
    }

    /**
    Allocate room for `units` values of type `U`.

    The memory is zeroed before being returned, so it is always safe to view it as a slice of integers.

    # Failure

    Fails with `Error::Overflow` if the size in bytes cannot be represented, and `Error::BadAllocation` if the strategy returns null or a pointer that is not aligned for `U`.
    */
    pub fn alloc_units<U: Copy>(&self, units: usize) -> Result<NonNull<U>, Error> {
        let bytes = units.checked_mul(mem::size_of::<U>())
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(Error::Overflow)?;

        let ptr = unsafe { (self.alloc)(bytes as size_t) } as *mut U;
        trace!(bytes, ?ptr, "allocated");

        let ptr = NonNull::new(ptr).ok_or(Error::BadAllocation)?;
        if (ptr.as_ptr() as usize) % mem::align_of::<U>() != 0 {
            debug!(?ptr, align = mem::align_of::<U>(), "allocator returned a misaligned pointer");
            unsafe { self.free(ptr) };
            return Err(Error::BadAllocation);
        }

        unsafe {
            std::ptr::write_bytes(ptr.as_ptr() as *mut u8, 0, bytes);
        }
        Ok(ptr)
    }

    /**
    Free an allocation.

    # Safety

    `ptr` must have been returned by `alloc_units` on an `Allocator` with the same free function, and must not have been freed already.
    */
    pub unsafe fn free<U>(&self, ptr: NonNull<U>) {
        trace!(ptr = ?ptr.as_ptr(), "freeing");
        (self.free)(ptr.as_ptr() as *mut c_void);
    }

    /**
    The strategy this allocator was resolved from.
    */
    pub fn pair(&self) -> AllocPair {
        AllocPair::new(self.alloc, self.free)
    }

    /**
    Returns a short string identifying this allocator in debug output.
    */
    pub fn debug_prefix(&self) -> &'static str {
        if self.is_default {
            Malloc::debug_prefix()
        } else {
            "A"
        }
    }
}

#[cfg(feature = "default-alloc")]
fn default_pair() -> Result<AllocPair, Error> {
    Ok(Malloc::pair())
}

#[cfg(not(feature = "default-alloc"))]
fn default_pair() -> Result<AllocPair, Error> {
    debug!("no allocator supplied and default allocator support is disabled");
    Err(Error::NullAllocator)
}
