//! Key prefixes: the `/`-separated keys menus are stored under.

use std::fmt;
use std::str::FromStr;

/// Errors related to key prefix parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// The prefix string was empty.
    Empty,
    /// The prefix does not end in `/`.
    MissingTrailingSlash { prefix: String },
}

impl fmt::Display for PrefixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixError::Empty => write!(f, "key prefix must not be empty"),
            PrefixError::MissingTrailingSlash { prefix } => {
                write!(f, "key prefix '{}' must end with '/'", prefix)
            }
        }
    }
}

impl std::error::Error for PrefixError {}

/// A validated key prefix.
///
/// A prefix names one directory's menu and is the stem of every key written
/// for that directory's entries. It is never empty and always ends in `/`,
/// so joining a selector onto it never needs a separator check.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Parse a prefix string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gopherkv_compiler::KeyPrefix;
    ///
    /// let prefix = KeyPrefix::parse("/gopher/").unwrap();
    /// assert_eq!(prefix.entry_key("About.txt"), "/gopher/About.txt");
    ///
    /// assert!(KeyPrefix::parse("/gopher").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PrefixError> {
        if s.is_empty() {
            return Err(PrefixError::Empty);
        }
        if !s.ends_with('/') {
            return Err(PrefixError::MissingTrailingSlash {
                prefix: s.to_string(),
            });
        }
        Ok(KeyPrefix(s.to_string()))
    }

    /// The conventional root prefix, `/`.
    pub fn root() -> Self {
        KeyPrefix("/".to_string())
    }

    /// The prefix of a subdirectory: `self + selector + "/"`.
    #[must_use]
    pub fn child(&self, selector: &str) -> KeyPrefix {
        let mut key = String::with_capacity(self.0.len() + selector.len() + 1);
        key.push_str(&self.0);
        key.push_str(selector);
        key.push('/');
        KeyPrefix(key)
    }

    /// The key of a file inside this directory: `self + selector`.
    pub fn entry_key(&self, selector: &str) -> String {
        format!("{}{}", self.0, selector)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for KeyPrefix {
    fn default() -> Self {
        Self::root()
    }
}

impl FromStr for KeyPrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for KeyPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Macro for prefix literals.
///
/// # Example
///
/// ```rust
/// use gopherkv_compiler::key_prefix;
///
/// let p = key_prefix!("/docs/");
/// assert_eq!(p.as_str(), "/docs/");
/// ```
#[macro_export]
macro_rules! key_prefix {
    ($s:expr) => {
        $crate::KeyPrefix::parse($s).expect("invalid key prefix literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_trailing_slash() {
        assert_eq!(KeyPrefix::parse("/").unwrap().as_str(), "/");
        assert_eq!(KeyPrefix::parse("/a/b/").unwrap().as_str(), "/a/b/");
        // Relative prefixes are allowed; only the trailing slash matters.
        assert_eq!(KeyPrefix::parse("site/").unwrap().as_str(), "site/");
    }

    #[test]
    fn parse_rejects_bad_prefixes() {
        assert_eq!(KeyPrefix::parse(""), Err(PrefixError::Empty));
        assert_eq!(
            KeyPrefix::parse("/docs"),
            Err(PrefixError::MissingTrailingSlash {
                prefix: "/docs".to_string()
            })
        );
    }

    #[test]
    fn child_and_entry_keys() {
        let root = KeyPrefix::root();
        let docs = root.child("docs");
        assert_eq!(docs.as_str(), "/docs/");
        assert_eq!(docs.child("old").as_str(), "/docs/old/");
        assert_eq!(docs.entry_key("About.html"), "/docs/About.html");
    }

    #[test]
    fn from_str_and_display() {
        let p: KeyPrefix = "/x/".parse().unwrap();
        assert_eq!(p.to_string(), "/x/");
        assert_eq!(KeyPrefix::default(), key_prefix!("/"));
    }

    #[test]
    fn error_display() {
        let e = PrefixError::MissingTrailingSlash {
            prefix: "/docs".to_string(),
        };
        assert!(format!("{}", e).contains("/docs"));
        assert!(format!("{}", PrefixError::Empty).contains("empty"));
    }
}
