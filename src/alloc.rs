//! The crate's single allocation boundary.
//!
//! Every byte an [FfiString](crate::FfiString) owns is obtained and returned
//! through this pair. Retargeting memory management, for example to a pool
//! allocator, is done by swapping the process `#[global_allocator]`; nothing
//! else in the crate changes.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Allocate `size` bytes. Returns None if the allocator cannot satisfy the
/// request.
#[inline]
pub(crate) fn allocate(size: usize) -> Option<NonNull<u8>> {
    debug_assert!(size != 0, "allocate: zero sized allocation");

    let layout = Layout::from_size_align(size, 1).ok()?;
    let buf = unsafe { alloc::alloc(layout) };
    NonNull::new(buf)
}

/// Release an allocation made by [allocate].
///
/// ## Safety
/// `buf` must have been returned by [allocate] called with this exact `size`
/// and must not be used afterwards.
#[inline]
pub(crate) unsafe fn deallocate(buf: *mut u8, size: usize) {
    debug_assert!(size != 0, "deallocate: zero sized allocation");

    let layout = Layout::from_size_align_unchecked(size, 1);
    alloc::dealloc(buf, layout);
}
