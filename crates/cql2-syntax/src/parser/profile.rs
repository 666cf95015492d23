use bitflags::bitflags;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

bitflags! {
    /// Pre-CQL2 syntax a profile may opt back into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LegacySyntax: u8 {
        /// `[` `]` as grouping brackets.
        const BRACKET_GROUPING = 0b001;
        /// Case-insensitive `ILIKE`.
        const ILIKE            = 0b010;
        /// Timestamps without a UTC offset, read as UTC.
        const NAIVE_TIMESTAMPS = 0b100;
    }
}

/// Grammar variant accepted by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarProfile {
    pub name: String,
    pub legacy: LegacySyntax,
    /// Read `'#RRGGBB'` strings as color literals. On by default; turn it
    /// off to keep such strings as plain text.
    pub color_literals: bool,
    /// Function names with no grammar production, matched case-insensitively.
    pub rejected_functions: Vec<String>,
    /// Nesting limit for groups, negations and function arguments.
    pub max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 100;

impl GrammarProfile {
    /// Strict CQL2 text encoding.
    pub fn cql2() -> Self {
        Self {
            name: "cql2".to_string(),
            legacy: LegacySyntax::empty(),
            color_literals: true,
            rejected_functions: ["BBOX", "RELATE", "DWITHIN", "BEYOND"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_legacy(mut self, legacy: LegacySyntax) -> Self {
        self.legacy |= legacy;
        self
    }

    pub fn with_color_literals(mut self, enabled: bool) -> Self {
        self.color_literals = enabled;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn allows(&self, syntax: LegacySyntax) -> bool {
        self.legacy.contains(syntax)
    }

    pub fn rejects_function(&self, name: &str) -> bool {
        self.rejected_functions
            .iter()
            .any(|f| f.eq_ignore_ascii_case(name))
    }
}

impl Default for GrammarProfile {
    fn default() -> Self {
        Self::cql2()
    }
}

lazy_static! {
    /// Words from older filter dialects that CQL2 dropped, with the
    /// replacement to suggest. Keys are lowercase.
    pub(crate) static ref LEGACY_WORDS: HashMap<&'static str, &'static str> = HashMap::from([
        ("eq", "use '=' instead of 'eq'"),
        ("neq", "use '<>' instead of 'neq'"),
        ("lt", "use '<' instead of 'lt'"),
        ("lte", "use '<=' instead of 'lte'"),
        ("gt", "use '>' instead of 'gt'"),
        ("gte", "use '>=' instead of 'gte'"),
        ("ilike", "ILIKE is not part of CQL2; use LIKE with casei()"),
        ("exists", "EXISTS is not part of CQL2; use PropertyExists()"),
        ("does", "DOES-NOT-EXIST is not part of CQL2"),
        ("before", "use T_BEFORE(a, b)"),
        ("after", "use T_AFTER(a, b)"),
        ("during", "use T_DURING(a, b)"),
        ("tequals", "use T_EQUALS(a, b)"),
    ]);

    static ref KEYWORDS: HashSet<&'static str> = HashSet::from([
        "AND", "OR", "NOT", "BETWEEN", "LIKE", "IS", "NULL", "IN", "TRUE", "FALSE",
    ]);

    static ref GEOMETRY_KEYWORDS: HashSet<&'static str> = HashSet::from([
        "POINT",
        "LINESTRING",
        "POLYGON",
        "MULTIPOINT",
        "MULTILINESTRING",
        "MULTIPOLYGON",
        "GEOMETRYCOLLECTION",
    ]);
}

/// True for words the lexer always reads as keywords.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

pub(crate) fn is_geometry_keyword(word: &str) -> bool {
    GEOMETRY_KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

pub(crate) fn legacy_hint(word: &str) -> Option<&'static str> {
    LEGACY_WORDS.get(word.to_ascii_lowercase().as_str()).copied()
}
