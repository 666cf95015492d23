use crate::errors::ConfigError;
use cql2_model::{SpatialOp, TemporalOp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// Value-returning function.
    #[default]
    Generic,
    Spatial(SpatialOp),
    Temporal(TemporalOp),
}

impl FunctionKind {
    pub fn is_predicate(self) -> bool {
        !matches!(self, FunctionKind::Generic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    #[serde(default)]
    pub kind: FunctionKind,
    pub min_args: usize,
    /// `None` means variadic.
    #[serde(default)]
    pub max_args: Option<usize>,
}

impl FunctionSignature {
    pub fn generic(name: &str, min_args: usize, max_args: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            kind: FunctionKind::Generic,
            min_args,
            max_args,
        }
    }

    pub fn fixed(name: &str, arity: usize) -> Self {
        Self::generic(name, arity, Some(arity))
    }

    pub fn spatial(op: SpatialOp) -> Self {
        Self {
            kind: FunctionKind::Spatial(op),
            ..Self::fixed(op.function_name(), 2)
        }
    }

    pub fn temporal(op: TemporalOp) -> Self {
        Self {
            kind: FunctionKind::Temporal(op),
            ..Self::fixed(op.function_name(), 2)
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.is_none_or(|max| count <= max)
    }

    /// Human-readable arity, e.g. `2`, `1 to 3` or `at least 2`.
    pub fn arity(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{} to {}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidSignature {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("empty function name"));
        }
        if self.max_args.is_some_and(|max| max < self.min_args) {
            return Err(invalid("max_args is smaller than min_args"));
        }
        if self.kind.is_predicate() && !self.accepts(2) {
            return Err(invalid("spatial and temporal predicates take two arguments"));
        }
        Ok(())
    }
}

/// Functions known to the semantic builder, looked up case-insensitively.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionSignature>,
}

impl FunctionRegistry {
    /// Registry with the CQL2 predicates and the built-in value functions.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        for op in SpatialOp::ALL {
            registry.register(FunctionSignature::spatial(op));
        }
        for op in TemporalOp::ALL {
            registry.register(FunctionSignature::temporal(op));
        }

        // Case and accent folding
        registry.register(FunctionSignature::fixed("casei", 1));
        registry.register(FunctionSignature::fixed("accenti", 1));

        // Math
        registry.register(FunctionSignature::fixed("abs", 1));
        registry.register(FunctionSignature::fixed("ceil", 1));
        registry.register(FunctionSignature::fixed("floor", 1));
        registry.register(FunctionSignature::fixed("round", 1));

        // Geometry
        registry.register(FunctionSignature::fixed("area", 1));
        registry.register(FunctionSignature::fixed("length", 1));
        registry.register(FunctionSignature::fixed("centroid", 1));
        registry.register(FunctionSignature::fixed("boundary", 1));
        registry.register(FunctionSignature::fixed("buffer", 2));
        registry.register(FunctionSignature::fixed("distance", 2));

        // Strings
        registry.register(FunctionSignature::fixed("strConcat", 2));
        registry.register(FunctionSignature::fixed("strLength", 1));
        registry.register(FunctionSignature::fixed("strToLowerCase", 1));
        registry.register(FunctionSignature::fixed("strToUpperCase", 1));
        registry.register(FunctionSignature::fixed("strSubstring", 3));
        registry.register(FunctionSignature::generic("Concatenate", 1, None));

        // Styling
        registry.register(FunctionSignature::generic("Interpolate", 2, None));
        registry.register(FunctionSignature::generic("Categorize", 3, None));
        registry.register(FunctionSignature::generic("Recode", 3, None));

        registry.register(FunctionSignature::fixed("PropertyExists", 1));
        registry.register(FunctionSignature::fixed("now", 0));

        registry
    }

    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Adds or replaces a signature.
    pub fn register(&mut self, signature: FunctionSignature) {
        self.functions
            .insert(signature.name.to_lowercase(), signature);
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(&name.to_lowercase())
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.values().map(|s| s.name.as_str()).collect()
    }

    /// Registers every signature in a JSON array such as
    /// `[{"name": "geohash", "min_args": 1, "max_args": 2}]`.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let signatures: Vec<FunctionSignature> = serde_json::from_str(json)?;
        for signature in &signatures {
            signature.validate()?;
        }
        for signature in signatures {
            self.register(signature);
        }
        Ok(())
    }

    /// Built-in registry extended with the signatures in `json`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.extend_from_json(json)?;
        Ok(registry)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
