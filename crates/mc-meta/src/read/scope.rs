//! Request boundary: everything request-scoped is released on drop.

use super::context::ReadBundleContext;
use super::request_cache::RequestEntityCache;

/// Guard spanning one request on the current thread.
///
/// Dropping it clears the read bundle stack and the request entity cache,
/// including on early return or panic.
#[must_use = "request state is cleared as soon as the scope is dropped"]
pub struct RequestScope {
    _private: (),
}

impl RequestScope {
    pub fn begin() -> Self {
        Self::release();
        Self { _private: () }
    }

    fn release() {
        ReadBundleContext::clear();
        RequestEntityCache::clear();
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        Self::release();
    }
}
