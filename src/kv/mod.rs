//! KV Module
//!
//! Authoritative in-memory store, the caching proxy in front of it, and the
//! snapshot format.

mod entry;
mod proxy;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use entry::{Entry, Outcome};
pub use proxy::CacheProxy;
pub use snapshot::Snapshot;
pub use stats::ProxyStats;
pub use store::Store;
