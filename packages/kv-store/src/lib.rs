//! gopherkv-store: Key-Value Store Traits
//!
//! This is the narrow waist between the directory compiler and whatever ends
//! up serving the compiled tree. Everything at this level is pure bytes under
//! string keys - no menu semantics, no path validation.
//!
//! Use this layer for:
//! - Staging a compilation in memory before committing it
//! - Writing menus and blobs into Redis for its Gopher mode
//! - Test doubles that record every write
//!
//! # Example
//!
//! ```rust
//! use gopherkv_store::{Bytes, InMemoryStore, KvReader, KvWriter};
//!
//! let mut store = InMemoryStore::new();
//! store.set("/About.txt", Bytes::from_static(b"hello")).unwrap();
//!
//! assert_eq!(
//!     store.get("/About.txt").unwrap(),
//!     Some(Bytes::from_static(b"hello"))
//! );
//! ```
//!
//! # Redis Support
//!
//! The `redis` feature (on by default) provides [`RedisStore`], a synchronous
//! connection that issues one `SET` per write.

pub use bytes::Bytes;

mod error;
mod in_memory;
mod traits;

#[cfg(feature = "redis")]
mod redis_store;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use traits::{KvReader, KvStore, KvWriter};

#[cfg(feature = "redis")]
pub use redis_store::RedisStore;
