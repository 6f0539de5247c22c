//! Object-store abstraction for bucket and object operations.

use std::future::Future;
use std::pin::Pin;

/// Result of a download: the byte count the provider reported for the
/// transfer alongside the buffer that was actually populated.
///
/// The two are kept separate so the round-trip pipeline can detect short
/// reads from the external client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchedObject {
    /// Byte count reported by the download operation.
    pub reported_len: usize,
    /// Bytes read into memory.
    pub bytes: Vec<u8>,
}

/// Future returned by object-store operations.
pub type StoreFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Minimal interface implemented by object-storage providers.
pub trait ObjectStore {
    /// Provider-specific error type returned by the store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists the names of all buckets visible to the caller.
    fn list_buckets(&self) -> StoreFuture<'_, Vec<String>, Self::Error>;

    /// Creates a bucket with the given name in the store's region.
    fn create_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, (), Self::Error>;

    /// Uploads the body under the given bucket and key. Chunking of large
    /// payloads is the provider's concern.
    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        body: Vec<u8>,
    ) -> StoreFuture<'a, (), Self::Error>;

    /// Downloads the object into memory, returning the provider-reported
    /// byte count alongside the buffer.
    fn get_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> StoreFuture<'a, FetchedObject, Self::Error>;
}
