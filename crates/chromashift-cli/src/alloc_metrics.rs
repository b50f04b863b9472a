//! Heap allocation counting through a wrapping global allocator.
//!
//! The counters live in an [`AllocationObserver`] handed to the allocator at
//! construction, so the tool decides whether to install one (the
//! `alloc-metrics` feature) and the transfer code never sees it.
#![allow(unsafe_code)]
// `GlobalAlloc` is an unsafe trait; the impl only forwards to the wrapped allocator.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Receives allocation events. Called from inside the allocator, so
/// implementations must not allocate.
pub trait AllocationObserver: Sync {
    fn allocated(&self, bytes: usize);
    fn freed(&self, bytes: usize);
}

/// Running totals of allocated and freed bytes.
#[derive(Debug, Default)]
pub struct AllocationMetrics {
    total_allocated: AtomicUsize,
    total_freed: AtomicUsize,
}

impl AllocationMetrics {
    pub const fn new() -> Self {
        Self {
            total_allocated: AtomicUsize::new(0),
            total_freed: AtomicUsize::new(0),
        }
    }

    pub fn total_allocated(&self) -> usize {
        self.total_allocated.load(Ordering::Relaxed)
    }

    pub fn total_freed(&self) -> usize {
        self.total_freed.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> AllocationSnapshot {
        let total_allocated = self.total_allocated();
        let total_freed = self.total_freed();
        AllocationSnapshot {
            total_allocated,
            total_freed,
            current_usage: total_allocated.saturating_sub(total_freed),
        }
    }
}

impl AllocationObserver for AllocationMetrics {
    fn allocated(&self, bytes: usize) {
        self.total_allocated.fetch_add(bytes, Ordering::Relaxed);
    }

    fn freed(&self, bytes: usize) {
        self.total_freed.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// Point-in-time copy of [`AllocationMetrics`]; `current_usage` is the live byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationSnapshot {
    pub total_allocated: usize,
    pub total_freed: usize,
    pub current_usage: usize,
}

/// Global allocator wrapper that reports every allocation to an observer.
pub struct CountingAllocator<O: 'static, A = System> {
    inner: A,
    observer: &'static O,
}

impl<O: 'static> CountingAllocator<O, System> {
    pub const fn new(observer: &'static O) -> Self {
        Self {
            inner: System,
            observer,
        }
    }
}

unsafe impl<O: AllocationObserver + 'static, A: GlobalAlloc> GlobalAlloc
    for CountingAllocator<O, A>
{
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: the caller upholds `GlobalAlloc::alloc`'s contract for `layout`.
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            self.observer.allocated(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: same contract as `alloc`.
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.observer.allocated(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by this allocator (and thus `inner`) with `layout`.
        unsafe { self.inner.dealloc(ptr, layout) };
        self.observer.freed(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: `ptr`/`layout` come from this allocator; the caller guarantees `new_size`.
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.observer.freed(layout.size());
            self.observer.allocated(new_size);
        }
        new_ptr
    }
}
