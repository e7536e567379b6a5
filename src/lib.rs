//! Configurable CSS selector parser.
//!
//! A [`Parser`] is compiled from a grammar: a CSS level preset
//! ([`CssLevel`]), a custom [`SyntaxDefinition`], optional CSS modules, and
//! strict or lenient error handling. Parsed selectors are plain serde values
//! that can be rendered back to canonical text with [`render`] and walked
//! with [`traverse`].
//!
//! ```rust
//! use cssel::{create_parser, render, CssLevel, ParserOptions};
//!
//! let parser = create_parser(
//!     ParserOptions::default()
//!         .with_syntax(CssLevel::Selectors3)
//!         .with_modules(["css-position-3"]),
//! )
//! .unwrap();
//! let selector = parser.parse("ul  >li:nth-child( 2n + 1 ):sticky").unwrap();
//! assert_eq!(render(&selector), "ul > li:nth-child(2n+1):sticky");
//! ```

use once_cell::sync::Lazy;

pub mod ast;
pub mod chars;
pub mod errors;
pub mod indexes;
pub mod parser;
pub mod render;
pub mod signatures;
pub mod syntax;
pub mod traverse;

pub use crate::ast::{
    AstAttribute, AstAttributeValue, AstClassName, AstEntity, AstFormula, AstFormulaOfSelector,
    AstId, AstNamespace, AstNamespaceName, AstPseudoArgument, AstPseudoClass, AstPseudoElement,
    AstRule, AstRuleItem, AstSelector, AstString, AstSubstitution, AstTagName, AstWildcardTag,
};
pub use crate::errors::{ConfigError, ParserError};
pub use crate::parser::{create_parser, Parser, ParserOptions};
pub use crate::render::render;
pub use crate::syntax::{extend_syntax_definition, CssLevel, SyntaxDefinition, SyntaxInput};
pub use crate::traverse::{hooks, traverse, traverse_fn, Flow, TraversalContext, Visitor};

static DEFAULT_PARSER: Lazy<Result<Parser, ConfigError>> =
    Lazy::new(|| create_parser(ParserOptions::default()));

/// Parses `input` with the default options: the `latest` level, strict mode,
/// no substitutions.
pub fn parse(input: &str) -> Result<AstSelector, ParserError> {
    match &*DEFAULT_PARSER {
        Ok(parser) => parser.parse(input),
        Err(err) => Err(ParserError::new(err.to_string(), 0, input)),
    }
}
