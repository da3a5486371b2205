use std::{
    ffi::CStr,
    fmt::{self, Debug, Display},
    ptr, slice, str,
};

use crate::{
    alloc::{allocate, deallocate},
    error::StringError,
    str_ptr::FfiStrPtr,
};

/// An owned, growable UTF-8 byte buffer that can be passed by value across
/// an FFI boundary.
///
/// Not null terminated. `capacity == 0` is the empty state: nothing is
/// allocated and there is nothing to release. Otherwise `buf` is an
/// exclusively owned allocation of `capacity` bytes of which the first `len`
/// are in use.
///
/// The contents are claimed-valid UTF-8; the crate never validates them.
/// The only ways to feed in arbitrary bytes are the `unsafe` constructors.
#[repr(C)]
pub struct FfiString {
    buf: *mut u8,
    len: usize,
    capacity: usize,
}

impl FfiString {
    /// Create a new empty string. Does not allocate.
    #[inline]
    pub const fn new() -> FfiString {
        FfiString {
            buf: ptr::null_mut(),
            len: 0,
            capacity: 0,
        }
    }

    /// Create an empty string with `capacity` bytes preallocated.
    /// Does not allocate if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<FfiString, StringError> {
        if capacity == 0 {
            return Ok(FfiString::new());
        }

        let buf = allocate(capacity).ok_or(StringError::AllocationFailed)?;
        Ok(FfiString {
            buf: buf.as_ptr(),
            len: 0,
            capacity,
        })
    }

    /// Copy the bytes of a view into a new string sized exactly to its
    /// length. An empty view yields the empty state without allocating.
    ///
    /// On allocation failure no partial copy is observable.
    pub fn from_str_ptr(str: FfiStrPtr<'_>) -> Result<FfiString, StringError> {
        if str.is_empty() {
            return Ok(FfiString::new());
        }

        let buf = allocate(str.len()).ok_or(StringError::AllocationFailed)?;
        unsafe {
            ptr::copy_nonoverlapping(str.as_ptr(), buf.as_ptr(), str.len());
        }

        Ok(FfiString {
            buf: buf.as_ptr(),
            len: str.len(),
            capacity: str.len(),
        })
    }

    /// View over the current contents.
    ///
    /// The view is tied to this string and any later append invalidates it,
    /// appends may relocate the backing storage.
    #[inline]
    pub fn as_str_ptr(&self) -> FfiStrPtr<'_> {
        unsafe { FfiStrPtr::from_raw_parts(self.buf, self.len) }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        if self.buf.is_null() {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.buf, self.len) }
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        unsafe { str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Length of the contents in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes currently allocated. Always at least [len](Self::len).
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append the bytes of a view.
    ///
    /// An empty view is a no-op. If the bytes do not fit the current
    /// allocation, capacity is doubled until they do and the contents are
    /// relocated. On [AllocationFailed](StringError::AllocationFailed) or
    /// [CapacityOverflow](StringError::CapacityOverflow) the string is left
    /// exactly as it was, the old allocation is only released after the new
    /// one has been fully populated.
    pub fn push(&mut self, str: FfiStrPtr<'_>) -> Result<(), StringError> {
        if str.is_empty() {
            return Ok(());
        }

        let required = self
            .len
            .checked_add(str.len())
            .ok_or(StringError::CapacityOverflow)?;

        if required <= self.capacity {
            unsafe {
                ptr::copy_nonoverlapping(str.as_ptr(), self.buf.add(self.len), str.len());
            }
            self.len = required;
            return Ok(());
        }

        let new_capacity = grow_capacity(self.capacity, required)?;
        let new_buf = allocate(new_capacity).ok_or(StringError::AllocationFailed)?;
        log::trace!("relocate: {} => {} bytes", self.capacity, new_capacity);

        unsafe {
            if self.len != 0 {
                ptr::copy_nonoverlapping(self.buf, new_buf.as_ptr(), self.len);
            }
            ptr::copy_nonoverlapping(str.as_ptr(), new_buf.as_ptr().add(self.len), str.len());

            if self.capacity != 0 {
                deallocate(self.buf, self.capacity);
            }
        }

        self.buf = new_buf.as_ptr();
        self.capacity = new_capacity;
        self.len = required;

        Ok(())
    }

    /// Append a string slice.
    #[inline]
    pub fn push_str(&mut self, string: &str) -> Result<(), StringError> {
        self.push(FfiStrPtr::from_str(string))
    }

    /// Append the contents of a C string, excluding the terminator.
    ///
    /// ## Safety
    /// `cstr` must contain valid UTF-8.
    #[inline]
    pub unsafe fn push_cstr(&mut self, cstr: &CStr) -> Result<(), StringError> {
        self.push(FfiStrPtr::from_cstr(cstr))
    }

    /// Append a character.
    #[inline]
    pub fn push_char(&mut self, ch: char) -> Result<(), StringError> {
        let mut buf = [0; 4];
        let string = ch.encode_utf8(&mut buf);
        self.push_str(string)
    }

    /// Release the allocation, if any, and reset to the empty state.
    ///
    /// Safe to call again on an already released string. Dropping the string
    /// does the same thing.
    pub fn release(&mut self) {
        if self.capacity != 0 {
            unsafe { deallocate(self.buf, self.capacity) };
        }

        self.buf = ptr::null_mut();
        self.len = 0;
        self.capacity = 0;
    }
}

/// Next capacity for growth: double from `current` (or 1) until `required`
/// fits, failing explicitly if the doubling sequence overflows.
fn grow_capacity(current: usize, required: usize) -> Result<usize, StringError> {
    let mut capacity = if current == 0 { 1 } else { current };

    while capacity < required {
        capacity = capacity
            .checked_mul(2)
            .ok_or(StringError::CapacityOverflow)?;
    }

    Ok(capacity)
}

impl Drop for FfiString {
    fn drop(&mut self) {
        self.release();
    }
}

impl Default for FfiString {
    fn default() -> Self {
        FfiString::new()
    }
}

impl TryFrom<&str> for FfiString {
    type Error = StringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        FfiString::from_str_ptr(FfiStrPtr::from_str(value))
    }
}

impl PartialEq for FfiString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for FfiString {}

impl PartialEq<&str> for FfiString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Debug for FfiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for FfiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}
