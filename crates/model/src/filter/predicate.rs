use crate::filter::expression::Expression;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean node of a filter tree.
///
/// `IN` has no variant of its own: it is stored as an `Or` of `Eq`
/// comparisons sharing the same left-hand expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Comparison {
        op: ComparisonOp,
        left: Expression,
        right: Expression,
    },
    /// Inclusive on both ends.
    Between {
        value: Expression,
        low: Expression,
        high: Expression,
    },
    Like {
        value: Expression,
        pattern: String,
        match_case: bool,
    },
    IsNull {
        value: Expression,
    },
    Spatial {
        op: SpatialOp,
        geom1: Expression,
        geom2: Expression,
    },
    Temporal {
        op: TemporalOp,
        instant: Expression,
        other: Expression,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn compare(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        Filter::Comparison { op, left, right }
    }

    pub fn not(clause: Filter) -> Self {
        Filter::Not(Box::new(clause))
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Filter::And(_) | Filter::Or(_) | Filter::Not(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialOp {
    Intersects,
    Disjoint,
    Within,
    Contains,
    Touches,
    Crosses,
    Overlaps,
    Equals,
}

impl SpatialOp {
    pub const ALL: [SpatialOp; 8] = [
        SpatialOp::Intersects,
        SpatialOp::Disjoint,
        SpatialOp::Within,
        SpatialOp::Contains,
        SpatialOp::Touches,
        SpatialOp::Crosses,
        SpatialOp::Overlaps,
        SpatialOp::Equals,
    ];

    pub fn function_name(self) -> &'static str {
        match self {
            SpatialOp::Intersects => "S_INTERSECTS",
            SpatialOp::Disjoint => "S_DISJOINT",
            SpatialOp::Within => "S_WITHIN",
            SpatialOp::Contains => "S_CONTAINS",
            SpatialOp::Touches => "S_TOUCHES",
            SpatialOp::Crosses => "S_CROSSES",
            SpatialOp::Overlaps => "S_OVERLAPS",
            SpatialOp::Equals => "S_EQUALS",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.function_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SpatialOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalOp {
    Before,
    After,
    During,
    TEquals,
}

impl TemporalOp {
    pub const ALL: [TemporalOp; 4] = [
        TemporalOp::Before,
        TemporalOp::After,
        TemporalOp::During,
        TemporalOp::TEquals,
    ];

    pub fn function_name(self) -> &'static str {
        match self {
            TemporalOp::Before => "T_BEFORE",
            TemporalOp::After => "T_AFTER",
            TemporalOp::During => "T_DURING",
            TemporalOp::TEquals => "T_EQUALS",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.function_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TemporalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}
