//! `.link` files: menu entries that point at another Gopher server.
//!
//! The file holds a single URI such as `gopher://example.org:7070/1foo`.
//! Following the Gopher URL layout, the first character of the path is the
//! item type and the remainder is the selector on the remote host.

use std::str::FromStr;

use url::{Host, Url};

use crate::item_type::MENU_TYPE;
use crate::menu::MenuRecord;

/// Port assumed when the URI carries none and its scheme has no default.
pub const DEFAULT_GOPHER_PORT: u16 = 70;

/// Why a link file could not be resolved.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("link content is not valid UTF-8")]
    NotUtf8,

    #[error("link content is not a URI: {0}")]
    Parse(#[from] url::ParseError),

    #[error("link URI has no host: {uri}")]
    MissingHost { uri: String },

    #[error("link selector contains a tab or line break")]
    BreaksMenuLine,
}

/// The remote resource named by a link file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub type_code: char,
    pub selector: String,
    pub host: String,
    pub port: u16,
}

impl LinkReference {
    /// Parse the raw bytes of a link file.
    pub fn from_bytes(content: &[u8]) -> Result<Self, LinkError> {
        let text = std::str::from_utf8(content).map_err(|_| LinkError::NotUtf8)?;
        text.parse()
    }

    /// The menu line for this link, shown under `title`.
    pub fn into_record(self, title: impl Into<String>) -> MenuRecord {
        MenuRecord::new(self.type_code, title, self.selector, self.host, self.port)
    }
}

impl FromStr for LinkReference {
    type Err = LinkError;

    /// ```rust
    /// use gopherkv_compiler::LinkReference;
    ///
    /// let link: LinkReference = "gopher://example.org:7070/1foo".parse().unwrap();
    /// assert_eq!(link.type_code, '1');
    /// assert_eq!(link.selector, "foo");
    /// assert_eq!(link.host, "example.org");
    /// assert_eq!(link.port, 7070);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let uri = Url::parse(text)?;

        let host = match uri.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => {
                return Err(LinkError::MissingHost {
                    uri: uri.to_string(),
                })
            }
        };
        let port = uri.port_or_known_default().unwrap_or(DEFAULT_GOPHER_PORT);

        // `Url` normalizes `.` and `..` segments and percent-encodes the
        // path, but the selector must reach the remote server as written.
        let path = written_path(text).unwrap_or(uri.path());
        if path.contains(['\t', '\r', '\n']) {
            return Err(LinkError::BreaksMenuLine);
        }
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut chars = path.chars();
        let (type_code, selector) = match chars.next() {
            Some(code) => (code, chars.as_str().to_string()),
            None => (MENU_TYPE, String::new()),
        };

        Ok(LinkReference {
            type_code,
            selector,
            host,
            port,
        })
    }
}

/// The path of `text` exactly as written: everything after the authority,
/// up to any query or fragment. `None` when there is no `//` authority.
fn written_path(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("://")?;
    let start = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let rest = &rest[start..];
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}
