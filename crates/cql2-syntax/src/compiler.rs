use crate::{
    ast::{expr::Expr, predicate::Predicate},
    errors::{ConfigError, CqlError},
    lexer::{Lexer, error::LexError, token::Token},
    parser::{Parser, profile::GrammarProfile},
    semantic::{builder::Builder, functions::FunctionRegistry},
};
use cql2_model::{Expression, Filter, FilterFactory, ModelFactory, TextWktReader, WktReader};
use tracing::debug;

/// Settings shared by every compilation.
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    pub profile: GrammarProfile,
    pub functions: FunctionRegistry,
    /// Pass unregistered value functions through to the factory.
    pub allow_unknown_functions: bool,
}

impl CompilerConfig {
    pub fn with_profile(mut self, profile: GrammarProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_unknown_functions(mut self, allow: bool) -> Self {
        self.allow_unknown_functions = allow;
        self
    }

    /// Registers extra function signatures given as a JSON array.
    pub fn with_functions_json(mut self, json: &str) -> Result<Self, ConfigError> {
        self.functions.extend_from_json(json)?;
        Ok(self)
    }
}

/// Compiles CQL2 text into filter trees.
///
/// Holds no per-call state, so one instance can serve many threads.
pub struct Compiler {
    config: CompilerConfig,
    wkt: Box<dyn WktReader>,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            wkt: Box::new(TextWktReader),
        }
    }

    pub fn with_wkt_reader(mut self, reader: impl WktReader + 'static) -> Self {
        self.wkt = Box::new(reader);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new().tokenize(text)
    }

    pub fn parse_filter_ast(&self, text: &str) -> Result<Predicate, CqlError> {
        let tokens = self.tokenize(text)?;
        debug!(tokens = tokens.len(), "tokenized input");
        let mut parser = Parser::new(text, &tokens, &self.config.profile, self.wkt.as_ref());
        Ok(parser.parse_filter()?)
    }

    pub fn parse_expression_ast(&self, text: &str) -> Result<Expr, CqlError> {
        let tokens = self.tokenize(text)?;
        debug!(tokens = tokens.len(), "tokenized input");
        let mut parser = Parser::new(text, &tokens, &self.config.profile, self.wkt.as_ref());
        Ok(parser.parse_expression()?)
    }

    pub fn compile_filter_with<F: FilterFactory>(
        &self,
        text: &str,
        factory: &F,
    ) -> Result<F::Filter, CqlError> {
        debug!(profile = %self.config.profile.name, len = text.len(), "compiling filter");
        let result = self
            .parse_filter_ast(text)
            .and_then(|ast| Ok(self.builder(factory).build_filter(&ast)?));
        if let Err(err) = &result {
            debug!(error = %err, "filter rejected");
        }
        result
    }

    pub fn compile_expression_with<F: FilterFactory>(
        &self,
        text: &str,
        factory: &F,
    ) -> Result<F::Expr, CqlError> {
        debug!(profile = %self.config.profile.name, len = text.len(), "compiling expression");
        let result = self
            .parse_expression_ast(text)
            .and_then(|ast| Ok(self.builder(factory).build_expression(&ast)?));
        if let Err(err) = &result {
            debug!(error = %err, "expression rejected");
        }
        result
    }

    pub fn compile_filter(&self, text: &str) -> Result<Filter, CqlError> {
        self.compile_filter_with(text, &ModelFactory)
    }

    pub fn compile_expression(&self, text: &str) -> Result<Expression, CqlError> {
        self.compile_expression_with(text, &ModelFactory)
    }

    fn builder<'a, F: FilterFactory>(&'a self, factory: &'a F) -> Builder<'a, F> {
        Builder::new(factory, &self.config.functions)
            .allow_unknown_functions(self.config.allow_unknown_functions)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}
