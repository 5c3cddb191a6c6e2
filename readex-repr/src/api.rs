//! Public API for tree documents
//!
//! Trees travel between tools as versioned JSON documents. The version is
//! checked on read so stale documents fail loudly instead of rendering junk.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{ReprError, ReprResult};
use crate::expr::Expr;

/// Current document format version
pub const FORMAT_VERSION: u16 = 1;

/// A serialized tree with its format version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDocument {
    /// Format version the document was written with
    pub version: u16,
    /// Optional label shown by tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Root node
    pub root: Expr,
}

impl TreeDocument {
    /// Wrap a root node at the current version
    pub fn new(root: Expr) -> Self {
        Self {
            version: FORMAT_VERSION,
            name: None,
            root,
        }
    }

    /// Attach a name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn check_version(self) -> ReprResult<Self> {
        if self.version != FORMAT_VERSION {
            return Err(ReprError::Version {
                expected: FORMAT_VERSION,
                actual: self.version,
            });
        }
        Ok(self)
    }
}

/// Decode a document from a reader
pub fn read_tree<R: Read>(reader: R) -> ReprResult<TreeDocument> {
    let doc: TreeDocument = serde_json::from_reader(reader)?;
    doc.check_version()
}

/// Encode a document to a writer as pretty JSON
pub fn write_tree<W: Write>(doc: &TreeDocument, writer: W) -> ReprResult<()> {
    serde_json::to_writer_pretty(writer, doc)?;
    Ok(())
}

/// Decode a document from a string
pub fn from_json_str(text: &str) -> ReprResult<TreeDocument> {
    let doc: TreeDocument = serde_json::from_str(text)?;
    doc.check_version()
}

/// Encode a document to a pretty JSON string
pub fn to_json_string(doc: &TreeDocument) -> ReprResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{BinaryOp, ExprBuilder};
    use crate::types::TypeRef;

    fn sample() -> TreeDocument {
        let mut b = ExprBuilder::new();
        let i = b.variable("i", TypeRef::INT);
        let j = b.variable("j", TypeRef::INT);
        TreeDocument::new(Expr::binary(BinaryOp::Add, Expr::var(&i), Expr::var(&j)))
            .with_name("sum")
    }

    #[test]
    fn test_string_roundtrip() {
        let doc = sample();
        let text = to_json_string(&doc).expect("encode");
        let back = from_json_str(&text).expect("decode");
        assert_eq!(doc, back);
    }

    #[test]
    fn test_reader_writer_roundtrip() {
        let doc = sample();
        let mut buf = Vec::new();
        write_tree(&doc, &mut buf).expect("write");
        let back = read_tree(buf.as_slice()).expect("read");
        assert_eq!(doc, back);
    }

    #[test]
    fn test_version_mismatch() {
        let mut doc = sample();
        doc.version = 99;
        let text = serde_json::to_string(&doc).expect("encode");
        match from_json_str(&text) {
            Err(ReprError::Version { expected, actual }) => {
                assert_eq!(expected, FORMAT_VERSION);
                assert_eq!(actual, 99);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(from_json_str("{"), Err(ReprError::Json(_))));
    }
}
