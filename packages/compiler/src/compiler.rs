//! The directory compiler.
//!
//! Walks a tree depth-first. Every directory produces one menu, stored under
//! the directory's key prefix; every regular file produces a menu line and,
//! unless it is a link, a blob stored under its selector.

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use gopherkv_store::KvWriter;
use serde::Serialize;

use crate::error::CompileError;
use crate::filesystem::Filesystem;
use crate::item_type::{FileClass, MENU_TYPE};
use crate::link::LinkReference;
use crate::menu::{MenuDocument, MenuRecord};
use crate::naming::{emission_order, ContentName, EntryName};
use crate::prefix::KeyPrefix;

/// Settings shared by every directory of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Host written into records for local content.
    pub local_host: String,
    /// Port written into records for local content.
    pub local_port: u16,
    /// Treat every entry as content: keep ordering prefixes in selectors and
    /// render modifiers.
    pub process_all: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            local_host: "localhost".to_string(),
            local_port: 70,
            process_all: false,
        }
    }
}

/// An entry that was skipped without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A `.link` file whose content is not a usable URI.
    MalformedLink { path: PathBuf, reason: String },
    /// A name that cannot be written into a menu line.
    UnrepresentableName { path: PathBuf, reason: String },
}

impl Diagnostic {
    pub fn path(&self) -> &Path {
        match self {
            Diagnostic::MalformedLink { path, .. } => path,
            Diagnostic::UnrepresentableName { path, .. } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedLink { path, reason } => {
                write!(f, "skipping link {}: {}", path.display(), reason)
            }
            Diagnostic::UnrepresentableName { path, reason } => {
                write!(f, "skipping {}: {}", path.display(), reason)
            }
        }
    }
}

/// What a run wrote, and what it skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    pub menus_written: usize,
    pub blobs_written: usize,
    pub links_resolved: usize,
    pub modifiers_skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileReport {
    /// Total number of store writes.
    pub fn keys_written(&self) -> usize {
        self.menus_written + self.blobs_written
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Traversal state of one directory.
#[derive(Debug, Clone)]
struct DirectoryContext {
    path: PathBuf,
    prefix: KeyPrefix,
}

/// Compile the tree at `root` into `store`, rooted at `prefix`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use gopherkv_compiler::{compile, key_prefix, CompileOptions, MemoryFilesystem};
/// use gopherkv_store::InMemoryStore;
///
/// let fs = MemoryFilesystem::new("/site").with_file("/site/0-About.txt", "hello");
/// let mut store = InMemoryStore::new();
///
/// let report = compile(
///     &fs,
///     &mut store,
///     Path::new("/site"),
///     &key_prefix!("/"),
///     &CompileOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(report.menus_written, 1);
/// assert_eq!(store.value("/About.txt").unwrap().as_ref(), b"hello");
/// assert_eq!(
///     store.value("/").unwrap().as_ref(),
///     b"0About.txt\t/About.txt\tlocalhost\t70\n"
/// );
/// ```
pub fn compile<F, S>(
    fs: &F,
    store: &mut S,
    root: &Path,
    prefix: &KeyPrefix,
    options: &CompileOptions,
) -> Result<CompileReport, CompileError>
where
    F: Filesystem + ?Sized,
    S: KvWriter + ?Sized,
{
    let mut compiler = Compiler {
        fs,
        store,
        options,
        report: CompileReport::default(),
    };
    compiler.compile_directory(DirectoryContext {
        path: root.to_path_buf(),
        prefix: prefix.clone(),
    })?;
    Ok(compiler.report)
}

struct Compiler<'a, F: ?Sized, S: ?Sized> {
    fs: &'a F,
    store: &'a mut S,
    options: &'a CompileOptions,
    report: CompileReport,
}

impl<F, S> Compiler<'_, F, S>
where
    F: Filesystem + ?Sized,
    S: KvWriter + ?Sized,
{
    fn compile_directory(&mut self, ctx: DirectoryContext) -> Result<(), CompileError> {
        let names = self
            .fs
            .list_entries(&ctx.path)
            .map_err(|source| CompileError::ListDirectory {
                path: ctx.path.clone(),
                source,
            })?;

        let mut document = MenuDocument::new();
        for name in emission_order(names) {
            let entry_path = ctx.path.join(&name);
            let content = match EntryName::parse(&name, self.options.process_all) {
                EntryName::Modifier => {
                    log::trace!("Skipping modifier {}", entry_path.display());
                    self.report.modifiers_skipped += 1;
                    continue;
                }
                EntryName::Content(content) => content,
            };

            if let Some(reason) = unrepresentable(&name) {
                self.diagnose(Diagnostic::UnrepresentableName {
                    path: entry_path,
                    reason: reason.to_string(),
                });
                continue;
            }

            let is_dir =
                self.fs
                    .is_directory(&entry_path)
                    .map_err(|source| CompileError::Stat {
                        path: entry_path.clone(),
                        source,
                    })?;

            let record = if is_dir {
                Some(self.compile_subdirectory(&ctx, entry_path, content)?)
            } else {
                self.compile_file(&ctx, &entry_path, content)?
            };
            if let Some(record) = record {
                document.push(record);
            }
        }

        log::debug!(
            "Writing menu {} ({} records)...",
            ctx.prefix,
            document.len()
        );
        self.set(ctx.prefix.as_str(), document.to_bytes())?;
        self.report.menus_written += 1;
        Ok(())
    }

    fn compile_subdirectory(
        &mut self,
        ctx: &DirectoryContext,
        path: PathBuf,
        content: ContentName,
    ) -> Result<MenuRecord, CompileError> {
        let child = ctx.prefix.child(&content.selector);
        let record = MenuRecord::new(
            MENU_TYPE,
            content.title,
            child.as_str(),
            &self.options.local_host,
            self.options.local_port,
        );
        self.compile_directory(DirectoryContext {
            path,
            prefix: child,
        })?;
        Ok(record)
    }

    /// Returns `None` when the file was skipped with a diagnostic.
    fn compile_file(
        &mut self,
        ctx: &DirectoryContext,
        path: &Path,
        content: ContentName,
    ) -> Result<Option<MenuRecord>, CompileError> {
        let data = self
            .fs
            .read_file(path)
            .map_err(|source| CompileError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        match FileClass::from_extension(content.extension.as_deref()) {
            FileClass::Link => match LinkReference::from_bytes(&data) {
                Ok(link) => {
                    self.report.links_resolved += 1;
                    Ok(Some(link.into_record(content.title)))
                }
                Err(e) => {
                    self.diagnose(Diagnostic::MalformedLink {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                    Ok(None)
                }
            },
            FileClass::Content(item_type) => {
                let key = ctx.prefix.entry_key(&content.selector);
                log::debug!("Writing blob {} ({} bytes)...", key, data.len());
                self.set(&key, Bytes::from(data))?;
                self.report.blobs_written += 1;
                Ok(Some(MenuRecord::new(
                    item_type.code(),
                    content.title,
                    key,
                    &self.options.local_host,
                    self.options.local_port,
                )))
            }
        }
    }

    fn set(&mut self, key: &str, value: Bytes) -> Result<(), CompileError> {
        self.store
            .set(key, value)
            .map_err(|source| CompileError::Store {
                key: key.to_string(),
                source,
            })
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.report.diagnostics.push(diagnostic);
    }
}

/// Why `name` cannot appear in a menu line, if it cannot.
fn unrepresentable(name: &str) -> Option<&'static str> {
    if name.contains(['\t', '\r', '\n']) {
        Some("name contains a tab or line break")
    } else if name.contains(char::REPLACEMENT_CHARACTER) {
        Some("name is not valid UTF-8")
    } else {
        None
    }
}
