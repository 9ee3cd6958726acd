//! The filename grammar.
//!
//! A filename carries two independent pieces of information:
//!
//! - an ordering token before the first `-` (`0000-About`), which sorts the
//!   entry but never reaches the menu, and
//! - an extension after the first `.` of the title (`About.html`), which
//!   picks the Gopher type code.
//!
//! A name with no `-` at all is a *modifier* (`REVERSE`, `HEADER`): it
//! configures the directory and is not rendered, unless every entry is being
//! processed as content.

/// Name of the modifier that reverses a directory's emission order.
pub const REVERSE_MODIFIER: &str = "REVERSE";

/// How a single directory entry name is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryName {
    /// A modifier; not rendered as content.
    Modifier,
    /// A renderable entry.
    Content(ContentName),
}

/// The parts of a renderable entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentName {
    /// Key segment for the entry, relative to its directory's prefix.
    pub selector: String,
    /// Display title: the selector with `_` shown as spaces.
    pub title: String,
    /// Everything after the first `.` of the title, if any.
    pub extension: Option<String>,
}

impl EntryName {
    /// Interpret `name`.
    ///
    /// With `process_all` set, every name is content and is used verbatim as
    /// its selector. Otherwise the first `-` token is stripped, and a name
    /// that has no second token is a modifier. Trailing empty tokens (from
    /// trailing `-`) are ignored.
    ///
    /// ```rust
    /// use gopherkv_compiler::{EntryName, ContentName};
    ///
    /// let name = EntryName::parse("0000-About_me.html", false);
    /// assert_eq!(
    ///     name,
    ///     EntryName::Content(ContentName {
    ///         selector: "About_me.html".to_string(),
    ///         title: "About me.html".to_string(),
    ///         extension: Some("html".to_string()),
    ///     })
    /// );
    ///
    /// assert_eq!(EntryName::parse("REVERSE", false), EntryName::Modifier);
    /// ```
    pub fn parse(name: &str, process_all: bool) -> EntryName {
        let selector = if process_all {
            name.to_string()
        } else {
            let mut tokens: Vec<&str> = name.split('-').collect();
            while tokens.last() == Some(&"") {
                tokens.pop();
            }
            if tokens.len() <= 1 {
                return EntryName::Modifier;
            }
            tokens[1..].join("-")
        };

        let title = selector.replace('_', " ");
        let extension = title.split_once('.').map(|(_, ext)| ext.to_string());

        EntryName::Content(ContentName {
            selector,
            title,
            extension,
        })
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, EntryName::Modifier)
    }
}

/// Hidden entries (leading `.`) are never listed.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Put visible names in emission order.
///
/// Hidden names are dropped, the rest sorted, and the whole order reversed
/// when a [`REVERSE_MODIFIER`] entry is present.
pub fn emission_order(names: Vec<String>) -> Vec<String> {
    let mut visible: Vec<String> = names.into_iter().filter(|n| !is_hidden(n)).collect();
    visible.sort();
    if visible.iter().any(|n| n == REVERSE_MODIFIER) {
        visible.reverse();
    }
    visible
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Titles are selectors with `_` shown as spaces, nothing else.
        #[test]
        fn prop_title_mirrors_selector(name in "[a-zA-Z0-9_.-]{1,24}", all in any::<bool>()) {
            if let EntryName::Content(c) = EntryName::parse(&name, all) {
                prop_assert!(!c.title.contains('_'));
                prop_assert_eq!(c.title.len(), c.selector.len());
                prop_assert_eq!(c.selector.replace('_', " "), c.title);
            }
        }

        /// In process-all mode nothing is a modifier and the name is untouched.
        #[test]
        fn prop_process_all_is_verbatim(name in "[^/]{1,24}") {
            match EntryName::parse(&name, true) {
                EntryName::Content(c) => prop_assert_eq!(c.selector, name),
                EntryName::Modifier => prop_assert!(false, "modifier in process-all mode"),
            }
        }

        /// A name without `-` is always a modifier in normal mode.
        #[test]
        fn prop_dashless_is_modifier(name in "[a-zA-Z0-9_.]{1,24}") {
            prop_assert!(EntryName::parse(&name, false).is_modifier());
        }

        /// The stripped selector is always a suffix of the original name.
        #[test]
        fn prop_selector_is_suffix(prefix in "[0-9]{1,4}", rest in "[a-zA-Z][a-zA-Z0-9_.]{0,16}") {
            let name = format!("{prefix}-{rest}");
            match EntryName::parse(&name, false) {
                EntryName::Content(c) => prop_assert_eq!(c.selector, rest),
                EntryName::Modifier => prop_assert!(false, "{} parsed as a modifier", name),
            }
        }

        /// Emission order never contains hidden names and keeps every visible one.
        #[test]
        fn prop_emission_order_keeps_visible(names in proptest::collection::vec("[.a-z0-9-]{1,8}", 0..12)) {
            let visible = names.iter().filter(|n| !is_hidden(n)).count();
            let ordered = emission_order(names);
            prop_assert_eq!(ordered.len(), visible);
            prop_assert!(ordered.iter().all(|n| !is_hidden(n)));
        }
    }
}
