//! Source cache layer.
//!
//! Read-only access to provider inventory gathered by an external
//! collector:
//! - `CacheKey`: exact `service / operation / region [/ resource]` path
//! - `CacheEntry`: `Absent`, `Data` or `Error`, always matched in full
//! - `SourceCache`: the snapshot store and its lookups
//! - `SourceTrace`: which paths a rule consulted

mod entry;
mod key;
mod store;
mod trace;

pub use entry::{CacheEntry, CacheError};
pub use key::CacheKey;
pub use store::SourceCache;
pub use trace::SourceTrace;
