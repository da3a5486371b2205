use std::{
    ffi::CStr,
    fmt::{self, Debug, Display},
    marker::PhantomData,
    ptr, slice, str,
};

use crate::{error::StringError, string::FfiString};

/// A non-owning wide pointer to a UTF-8 string slice.
///
/// Not null terminated: the (pointer, length) pair is the sole source of
/// truth, the bytes are never scanned for a terminator. The referenced
/// memory must stay valid and unchanged for as long as the view is used. A
/// view taken from an [FfiString] is invalidated by any later append to it,
/// because appends may relocate the backing storage.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct FfiStrPtr<'a> {
    buf: *const u8,
    len: usize,
    _marker: PhantomData<&'a [u8]>,
}

impl<'a> FfiStrPtr<'a> {
    /// The empty view. Carries a null pointer and zero length.
    #[inline]
    pub const fn empty() -> FfiStrPtr<'a> {
        FfiStrPtr {
            buf: ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// View over a string slice.
    #[inline]
    pub const fn from_str(string: &'a str) -> FfiStrPtr<'a> {
        if string.is_empty() {
            return FfiStrPtr::empty();
        }

        FfiStrPtr {
            buf: string.as_ptr(),
            len: string.len(),
            _marker: PhantomData,
        }
    }

    /// View over the contents of a C string, excluding the terminator. An
    /// empty C string yields the empty view.
    ///
    /// ## Safety
    /// `cstr` must contain valid UTF-8.
    #[inline]
    pub unsafe fn from_cstr(cstr: &'a CStr) -> FfiStrPtr<'a> {
        let bytes = cstr.to_bytes();
        if bytes.is_empty() {
            return FfiStrPtr::empty();
        }

        FfiStrPtr {
            buf: bytes.as_ptr(),
            len: bytes.len(),
            _marker: PhantomData,
        }
    }

    /// View over raw parts received across an FFI boundary.
    ///
    /// ## Safety
    /// `buf` must point to `len` bytes of valid UTF-8 that stay valid and
    /// unchanged for the lifetime of the view, or be null with `len == 0`.
    #[inline]
    pub const unsafe fn from_raw_parts(buf: *const u8, len: usize) -> FfiStrPtr<'a> {
        FfiStrPtr {
            buf,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const u8 {
        self.buf
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        if self.buf.is_null() {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.buf, self.len) }
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        unsafe { str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Sub-view of up to `len` bytes starting at `start`, clamped to the end
    /// of this view. A `start` at or past the end yields the empty view.
    ///
    /// Borrows the same backing memory, nothing is allocated.
    #[inline]
    pub fn substr(&self, start: usize, len: usize) -> FfiStrPtr<'a> {
        if start >= self.len {
            return FfiStrPtr::empty();
        }

        let len = len.min(self.len - start);
        FfiStrPtr {
            buf: unsafe { self.buf.add(start) },
            len,
            _marker: PhantomData,
        }
    }

    /// Copy this view into a new owned [FfiString].
    #[inline]
    pub fn to_ffi_string(&self) -> Result<FfiString, StringError> {
        FfiString::from_str_ptr(*self)
    }
}

impl PartialEq for FfiStrPtr<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }

        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for FfiStrPtr<'_> {}

impl PartialEq<&str> for FfiStrPtr<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> From<&'a str> for FfiStrPtr<'a> {
    fn from(value: &'a str) -> Self {
        FfiStrPtr::from_str(value)
    }
}

impl Debug for FfiStrPtr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for FfiStrPtr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}
