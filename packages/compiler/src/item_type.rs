//! Gopher item types and the extension table that picks them.

use std::fmt;

/// Type code of a menu (directory) record.
pub const MENU_TYPE: char = '1';

/// The content types a local file can be published as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// `0`: plain text, also the fallback.
    Text,
    /// `9`: binary file.
    Binary,
    /// `g`: GIF image.
    Gif,
    /// `h`: HTML document.
    Html,
    /// `I`: any other image.
    Image,
}

impl ItemType {
    /// The single-character Gopher type code.
    pub const fn code(self) -> char {
        match self {
            ItemType::Text => '0',
            ItemType::Binary => '9',
            ItemType::Gif => 'g',
            ItemType::Html => 'h',
            ItemType::Image => 'I',
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What to do with a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    /// Publish the file's bytes under its selector with this type.
    Content(ItemType),
    /// The file holds a URI pointing somewhere else; resolve it instead.
    Link,
}

impl FileClass {
    /// Classify by extension, ignoring case. Unknown or missing extensions
    /// are plain text.
    ///
    /// ```rust
    /// use gopherkv_compiler::{FileClass, ItemType};
    ///
    /// assert_eq!(FileClass::from_extension(Some("PNG")), FileClass::Content(ItemType::Image));
    /// assert_eq!(FileClass::from_extension(Some("link")), FileClass::Link);
    /// assert_eq!(FileClass::from_extension(None), FileClass::Content(ItemType::Text));
    /// ```
    pub fn from_extension(extension: Option<&str>) -> FileClass {
        let Some(extension) = extension else {
            return FileClass::Content(ItemType::Text);
        };

        match extension.to_ascii_lowercase().as_str() {
            "zip" | "bin" | "gz" | "tgz" => FileClass::Content(ItemType::Binary),
            "gif" => FileClass::Content(ItemType::Gif),
            "html" | "htm" => FileClass::Content(ItemType::Html),
            "jpg" | "jpeg" | "png" => FileClass::Content(ItemType::Image),
            "link" => FileClass::Link,
            _ => FileClass::Content(ItemType::Text),
        }
    }
}
