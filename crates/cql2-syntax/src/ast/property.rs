use crate::ast::span::Span;
use std::fmt;

/// Property reference as written in the filter.
///
/// Dotted identifiers (`address.city`) become nested paths; a quoted
/// identifier is a single segment taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    pub segments: Vec<String>,
    pub quoted: bool,
    pub span: Span,
}

impl PropertyPath {
    pub fn dotted(name: &str, span: Span) -> Self {
        Self {
            segments: name.split('.').map(|s| s.to_string()).collect(),
            quoted: false,
            span,
        }
    }

    pub fn quoted(name: &str, span: Span) -> Self {
        Self {
            segments: vec![name.to_string()],
            quoted: true,
            span,
        }
    }

    /// Normalized property name with `/` between nested segments.
    pub fn to_path(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.to_path().replace('"', "\"\""))
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}
