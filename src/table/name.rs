//! Table names
//!
//! A logical file is addressed by a caller-supplied table name. Names are
//! validated up front so they can be spliced into DDL/DML safely.

use std::fmt;

use crate::error::{Result, SqlFsError};

/// Longest accepted identifier segment (in bytes)
pub const MAX_SEGMENT_LEN: usize = 128;

/// A validated, optionally schema-qualified table name
///
/// Accepted forms: `table` or `schema.table`, where each segment matches
/// `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    schema: Option<String>,
    table: String,
}

impl TableName {
    /// Parse and validate a table name
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw.split('.').collect();
        let (schema, table) = match segments.as_slice() {
            [table] => (None, *table),
            [schema, table] => (Some(*schema), *table),
            _ => {
                return Err(SqlFsError::InvalidName(format!(
                    "{:?}: expected `table` or `schema.table`",
                    raw
                )))
            }
        };

        if let Some(schema) = schema {
            Self::check_segment(raw, schema)?;
        }
        Self::check_segment(raw, table)?;

        Ok(Self {
            schema: schema.map(str::to_string),
            table: table.to_string(),
        })
    }

    /// The schema qualifier, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The unqualified table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Render as a quoted SQL identifier: `"schema"."table"`
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{}\".\"{}\"", schema, self.table),
            None => format!("\"{}\"", self.table),
        }
    }

    fn check_segment(raw: &str, segment: &str) -> Result<()> {
        let mut chars = segment.chars();
        let valid_head = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_head || !valid_tail {
            return Err(SqlFsError::InvalidName(format!(
                "{:?}: segment {:?} is not a valid identifier",
                raw, segment
            )));
        }
        if segment.len() > MAX_SEGMENT_LEN {
            return Err(SqlFsError::InvalidName(format!(
                "{:?}: segment longer than {} bytes",
                raw, MAX_SEGMENT_LEN
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

impl std::str::FromStr for TableName {
    type Err = SqlFsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let name = TableName::parse("unitest42").unwrap();
        assert_eq!(name.schema(), None);
        assert_eq!(name.table(), "unitest42");
        assert_eq!(name.quoted(), "\"unitest42\"");
        assert_eq!(name.to_string(), "unitest42");
    }

    #[test]
    fn test_qualified_name() {
        let name = TableName::parse("main.model_file").unwrap();
        assert_eq!(name.schema(), Some("main"));
        assert_eq!(name.table(), "model_file");
        assert_eq!(name.quoted(), "\"main\".\"model_file\"");
        assert_eq!(name.to_string(), "main.model_file");
    }

    #[test]
    fn test_rejects_injection() {
        assert!(matches!(
            TableName::parse("t; DROP TABLE x"),
            Err(SqlFsError::InvalidName(_))
        ));
        assert!(TableName::parse("t\"").is_err());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("1abc").is_err());
        assert!(TableName::parse("a.b.c").is_err());
        assert!(TableName::parse(".t").is_err());
        assert!(TableName::parse("s.").is_err());
    }

    #[test]
    fn test_rejects_overlong_segment() {
        let long = "a".repeat(MAX_SEGMENT_LEN + 1);
        assert!(TableName::parse(&long).is_err());
        assert!(TableName::parse(&"a".repeat(MAX_SEGMENT_LEN)).is_ok());
    }
}
