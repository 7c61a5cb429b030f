use crate::{RequestSpec, Response, Result};


pub mod reqwest;

/// A pluggable executor for one-shot HTTP calls. Production code takes a
/// `&dyn RequestExecutor` (or a generic bound) and unit tests hand it a
/// double returning canned [`Response`] values.
///
/// Every operation is synchronous and blocking, performs exactly one round
/// trip, and never retries. Implementations hold no per-call state, so a
/// single executor can be shared across threads.
pub trait RequestExecutor {
    /// Sends a GET request described by `spec`.
    fn get(&self, spec: &RequestSpec) -> Result<Response>;

    /// Sends a POST request described by `spec`.
    fn post(&self, spec: &RequestSpec) -> Result<Response>;

    /// Sends a PUT request described by `spec`.
    fn put(&self, spec: &RequestSpec) -> Result<Response>;

    /// Sends a DELETE request described by `spec`.
    fn delete(&self, spec: &RequestSpec) -> Result<Response>;
}
