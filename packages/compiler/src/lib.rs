//! gopherkv-compiler: Directory Trees to Gopher Menus
//!
//! Compiles a directory into the keys a key-value store needs to serve it
//! over Gopher:
//! - one menu per directory, stored under the directory's key prefix
//! - one blob per regular file, stored under the file's selector
//! - `.link` files become menu lines pointing at other servers
//!
//! Filenames drive the layout. `0010-Old_Posts` sorts by its `0010` token,
//! shows up as "Old Posts" and lives under the `Old_Posts/` key. A name with
//! no `-` is a modifier such as `REVERSE`, which flips a directory's order.
//!
//! [`MenuDocument::parse`] reads a stored menu back into [`MenuRecord`]s, for
//! tools that inspect or verify what a run wrote.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use gopherkv_compiler::{compile, CompileOptions, KeyPrefix, MemoryFilesystem};
//! use gopherkv_store::InMemoryStore;
//!
//! let fs = MemoryFilesystem::new("/site")
//!     .with_file("/site/REVERSE", "")
//!     .with_file("/site/01-First.txt", "1")
//!     .with_file("/site/02-Second.txt", "2");
//!
//! let mut store = InMemoryStore::new();
//! compile(&fs, &mut store, Path::new("/site"), &KeyPrefix::root(), &CompileOptions::default())
//!     .unwrap();
//!
//! let menu = std::str::from_utf8(store.value("/").unwrap()).unwrap();
//! assert!(menu.starts_with("0Second.txt\t/Second.txt\t"));
//! ```

mod compiler;
mod error;
mod filesystem;
mod item_type;
mod link;
mod menu;
mod naming;
mod prefix;

pub use compiler::{compile, CompileOptions, CompileReport, Diagnostic};
pub use error::CompileError;
pub use filesystem::{Filesystem, LocalFilesystem, MemoryFilesystem};
pub use item_type::{FileClass, ItemType, MENU_TYPE};
pub use link::{LinkError, LinkReference, DEFAULT_GOPHER_PORT};
pub use menu::{MenuDocument, MenuParseError, MenuRecord};
pub use naming::{emission_order, is_hidden, ContentName, EntryName, REVERSE_MODIFIER};
pub use prefix::{KeyPrefix, PrefixError};

// Re-export the store layer for convenience
pub use gopherkv_store::{Bytes, KvWriter, StoreError};
