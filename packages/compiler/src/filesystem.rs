//! The filesystem the compiler reads from.
//!
//! Paths are always passed explicitly; nothing here changes the process
//! working directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of a directory tree.
pub trait Filesystem {
    /// Names of the entries of `dir`, in no particular order.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Whether `path` is a directory (following symlinks).
    fn is_directory(&self, path: &Path) -> io::Result<bool>;

    /// The full contents of the file at `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<T: Filesystem + ?Sized> Filesystem for &T {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).list_entries(dir)
    }

    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        (**self).is_directory(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// The local disk, through `std::fs`.
///
/// Names that are not valid UTF-8 are converted lossily; the compiler
/// recognizes the replacement character and skips such entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::metadata(path)?.is_dir())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        log::trace!("Reading {}...", path.display());
        fs::read(path)
    }
}

#[derive(Debug, Clone)]
enum Node {
    /// Children in insertion order.
    Dir(Vec<String>),
    File(Vec<u8>),
}

/// An in-memory directory tree.
///
/// Listings come back in insertion order, which like a real directory is
/// unrelated to name order.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use gopherkv_compiler::{Filesystem, MemoryFilesystem};
///
/// let fs = MemoryFilesystem::new("/site")
///     .with_file("/site/01-Posts/01-hello.txt", "hi")
///     .with_dir("/site/02-Empty");
///
/// assert!(fs.is_directory(Path::new("/site/01-Posts")).unwrap());
/// assert_eq!(fs.list_entries(Path::new("/site")).unwrap(), vec!["01-Posts", "02-Empty"]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    nodes: HashMap<PathBuf, Node>,
}

impl MemoryFilesystem {
    /// Create a tree containing only the empty directory `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(root.into(), Node::Dir(Vec::new()));
        Self { nodes }
    }

    /// Add a directory, creating missing parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.nodes.get(path) {
            Some(Node::Dir(_)) => return,
            Some(Node::File(_)) => {}
            None => self.attach(path),
        }
        self.nodes.insert(path.to_path_buf(), Node::Dir(Vec::new()));
    }

    /// Add or replace a file, creating missing parents.
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if !self.nodes.contains_key(path) {
            self.attach(path);
        }
        self.nodes
            .insert(path.to_path_buf(), Node::File(contents.into()));
    }

    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Register `path` as a child of its parent directory.
    fn attach(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        self.add_dir(parent);
        if let Some(Node::Dir(children)) = self.nodes.get_mut(parent) {
            children.push(name.to_string_lossy().into_owned());
        }
    }

    fn node(&self, path: &Path) -> io::Result<&Node> {
        self.nodes.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {}", path.display()),
            )
        })
    }
}

impl Filesystem for MemoryFilesystem {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        match self.node(dir)? {
            Node::Dir(children) => Ok(children.clone()),
            Node::File(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", dir.display()),
            )),
        }
    }

    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        Ok(matches!(self.node(path)?, Node::Dir(_)))
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.node(path)? {
            Node::File(contents) => Ok(contents.clone()),
            Node::Dir(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", path.display()),
            )),
        }
    }
}
