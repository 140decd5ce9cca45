//! Thread-scoped stack of active read bundles.
//!
//! A read pushes a bundle on entry and pops it on exit; nested reads on the
//! same thread see the innermost bundle through [`ReadBundleContext::current`].

use super::bundle::ReadBundle;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a bundle on the context stack.
pub type SharedBundle = Rc<RefCell<ReadBundle>>;

thread_local! {
    // `None` once the last bundle is popped so idle threads hold nothing.
    static STACK: RefCell<Option<Vec<SharedBundle>>> = const { RefCell::new(None) };
}

/// Static accessors for the current thread's bundle stack.
pub struct ReadBundleContext;

impl ReadBundleContext {
    /// Push `bundle`, making it the current one. Returns the shared handle.
    pub fn push(bundle: ReadBundle) -> SharedBundle {
        let shared = Rc::new(RefCell::new(bundle));
        Self::push_shared(Rc::clone(&shared));
        shared
    }

    /// Push an existing handle, e.g. to share one bundle across reads.
    pub fn push_shared(bundle: SharedBundle) {
        STACK.with(|stack| {
            stack.borrow_mut().get_or_insert_with(Vec::new).push(bundle);
        });
    }

    /// The innermost active bundle, if any.
    pub fn current() -> Option<SharedBundle> {
        STACK.with(|stack| stack.borrow().as_ref().and_then(|s| s.last().cloned()))
    }

    /// Pop the innermost bundle. Popping the last one releases the stack.
    pub fn pop() -> Option<SharedBundle> {
        STACK.with(|stack| {
            let mut slot = stack.borrow_mut();
            let popped = slot.as_mut().and_then(Vec::pop);
            if slot.as_ref().is_some_and(Vec::is_empty) {
                *slot = None;
            }
            popped
        })
    }

    /// Drop every bundle on this thread.
    pub fn clear() {
        STACK.with(|stack| {
            stack.borrow_mut().take();
        });
    }

    /// Number of bundles on this thread's stack.
    pub fn depth() -> usize {
        STACK.with(|stack| stack.borrow().as_ref().map_or(0, Vec::len))
    }

    /// Whether the thread currently holds any stack storage.
    pub fn is_allocated() -> bool {
        STACK.with(|stack| stack.borrow().is_some())
    }

    /// Push `bundle` for the lifetime of the returned guard.
    pub fn enter(bundle: ReadBundle) -> ReadBundleGuard {
        let bundle = Self::push(bundle);
        ReadBundleGuard { bundle }
    }
}

/// Pops its bundle from the context when dropped.
#[must_use = "the bundle is popped as soon as the guard is dropped"]
pub struct ReadBundleGuard {
    bundle: SharedBundle,
}

impl ReadBundleGuard {
    pub fn bundle(&self) -> &SharedBundle {
        &self.bundle
    }
}

impl Drop for ReadBundleGuard {
    fn drop(&mut self) {
        // The context may already have been cleared by the request scope.
        if ReadBundleContext::current().is_some_and(|top| Rc::ptr_eq(&top, &self.bundle)) {
            ReadBundleContext::pop();
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
