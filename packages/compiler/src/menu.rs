//! Gopher menu records and documents.
//!
//! The wire format is the classic one, one record per line:
//!
//! ```text
//! <type><title>\t<selector>\t<host>\t<port>\n
//! ```
//!
//! A Gopher server reading the store depends on exact field order and
//! delimiters, so this module is the only place lines are produced.

use std::fmt;

use bytes::Bytes;

/// One line of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    pub type_code: char,
    pub title: String,
    pub selector: String,
    pub host: String,
    pub port: u16,
}

impl MenuRecord {
    pub fn new(
        type_code: char,
        title: impl Into<String>,
        selector: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            type_code,
            title: title.into(),
            selector: selector.into(),
            host: host.into(),
            port,
        }
    }

    /// Parse one line, with or without its trailing newline.
    pub fn parse_line(line: &str) -> Result<Self, MenuParseError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let mut chars = line.chars();
        let type_code = chars.next().ok_or(MenuParseError::EmptyLine)?;

        let fields: Vec<&str> = chars.as_str().split('\t').collect();
        let &[title, selector, host, port] = fields.as_slice() else {
            return Err(MenuParseError::FieldCount {
                found: fields.len(),
            });
        };
        let port = port.parse().map_err(|_| MenuParseError::InvalidPort {
            port: port.to_string(),
        })?;

        Ok(MenuRecord::new(type_code, title, selector, host, port))
    }
}

impl fmt::Display for MenuRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}{}\t{}\t{}\t{}",
            self.type_code, self.title, self.selector, self.host, self.port
        )
    }
}

/// Errors from reading a menu back.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuParseError {
    #[error("empty menu line")]
    EmptyLine,
    #[error("expected 4 tab-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("invalid port '{port}'")]
    InvalidPort { port: String },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<MenuParseError>,
    },
}

/// The menu of one directory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuDocument {
    records: Vec<MenuRecord>,
}

impl MenuDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MenuRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MenuRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The serialized document, ready to store.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.to_string())
    }

    /// Parse a stored document back into records.
    pub fn parse(text: &str) -> Result<Self, MenuParseError> {
        let records = text
            .lines()
            .enumerate()
            .map(|(i, line)| {
                MenuRecord::parse_line(line).map_err(|e| MenuParseError::Line {
                    line: i + 1,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }
}

impl fmt::Display for MenuDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl FromIterator<MenuRecord> for MenuDocument {
    fn from_iter<I: IntoIterator<Item = MenuRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_to_wire_format() {
        let record = MenuRecord::new('h', "About.html", "/About.html", "localhost", 70);
        assert_eq!(
            record.to_string(),
            "hAbout.html\t/About.html\tlocalhost\t70\n"
        );
    }

    #[test]
    fn empty_selector_still_has_all_fields() {
        let record = MenuRecord::new('1', "Elsewhere.link", "", "example.org", 70);
        assert_eq!(record.to_string(), "1Elsewhere.link\t\texample.org\t70\n");
    }

    #[test]
    fn document_concatenates_in_order() {
        let doc: MenuDocument = vec![
            MenuRecord::new('1', "Posts", "/Posts/", "h", 7070),
            MenuRecord::new('0', "Readme", "/Readme", "h", 7070),
        ]
        .into_iter()
        .collect();

        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.to_bytes(),
            Bytes::from_static(b"1Posts\t/Posts/\th\t7070\n0Readme\t/Readme\th\t7070\n")
        );
    }

    #[test]
    fn empty_document_is_empty_bytes() {
        let doc = MenuDocument::new();
        assert!(doc.is_empty());
        assert!(doc.to_bytes().is_empty());
    }

    #[test]
    fn parse_reads_back_serialized_document() {
        let mut doc = MenuDocument::new();
        doc.push(MenuRecord::new('I', "cat.png", "/pics/cat.png", "gopher.local", 70));
        doc.push(MenuRecord::new('1', "Far away", "", "example.org", 7070));

        let parsed = MenuDocument::parse(&doc.to_string()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn parse_line_errors() {
        assert_eq!(MenuRecord::parse_line(""), Err(MenuParseError::EmptyLine));
        assert_eq!(
            MenuRecord::parse_line("0title\tsel\thost"),
            Err(MenuParseError::FieldCount { found: 3 })
        );
        assert_eq!(
            MenuRecord::parse_line("0title\tsel\thost\tseventy"),
            Err(MenuParseError::InvalidPort {
                port: "seventy".to_string()
            })
        );
    }

    #[test]
    fn parse_reports_line_number() {
        let err = MenuDocument::parse("0a\t/a\th\t70\nbroken\n").unwrap_err();
        assert!(matches!(err, MenuParseError::Line { line: 2, .. }));
        assert!(err.to_string().starts_with("line 2:"));
    }
}
