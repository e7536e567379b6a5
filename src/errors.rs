//! Error types for selector parsing and grammar configuration.
//!
//! Two failure classes exist and they never mix:
//!
//! - [`ConfigError`] is raised while compiling a syntax definition (in
//!   [`create_parser`](crate::create_parser)). It is fatal for that
//!   configuration.
//! - [`ParserError`] is raised by [`Parser::parse`](crate::Parser::parse) for
//!   malformed input. It carries the offending input so `miette` can render a
//!   labelled report.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::signatures::{PseudoAtom, PseudoKind};

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// Raised when a selector string does not match the compiled grammar.
///
/// `position` is a 0-based character index into the input, clamped to the
/// last character.
///
/// # Examples
///
/// ```rust
/// let err = cssel::parse("div,").unwrap_err();
/// assert_eq!(err.position, 3);
/// assert!(err.message.contains("Expected rule but end of input reached."));
/// ```
#[derive(Debug, Clone)]
pub struct ParserError {
    pub message: String,
    pub position: usize,
    pub help: Option<String>,
    span: SourceSpan,
    source: Arc<NamedSource<String>>,
}

impl ParserError {
    pub const NAME: &'static str = "ParserError";

    pub(crate) fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            help: None,
            span: char_span(input, position),
            source: Arc::new(NamedSource::new("selector", input.to_string())),
        }
    }

    pub(crate) fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Error class name, always `"ParserError"`.
    pub fn name(&self) -> &'static str {
        Self::NAME
    }
}

// Labels are byte ranges; `position` counts characters.
fn char_span(input: &str, position: usize) -> SourceSpan {
    let start = input
        .char_indices()
        .nth(position)
        .map(|(offset, _)| offset)
        .unwrap_or(input.len());
    let len = input[start..].chars().next().map_or(0, char::len_utf8);
    SourceSpan::from(start..start + len)
}

impl PartialEq for ParserError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.position == other.position
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at position {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParserError {}

impl Diagnostic for ParserError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("cssel::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some("here".into()), self.span);
        Some(Box::new(std::iter::once(label)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source)
    }
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// Raised while resolving or compiling a syntax definition.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Namespaces cannot be enabled while tags are disabled.")]
    #[diagnostic(
        code(cssel::config::namespace_without_tag),
        help("enable `tag` or disable `namespace`")
    )]
    NamespaceWithoutTag,

    #[error("Conflicting {atom} argument type for \"{name}\": \"{existing}\" vs \"{conflicting}\".")]
    #[diagnostic(code(cssel::config::conflicting_signature))]
    ConflictingSignature {
        atom: PseudoAtom,
        name: String,
        existing: PseudoKind,
        conflicting: PseudoKind,
    },

    #[error("Unknown CSS module: \"{0}\".")]
    #[diagnostic(code(cssel::config::unknown_module))]
    UnknownModule(String),

    #[error("Unknown CSS level: \"{0}\".")]
    #[diagnostic(code(cssel::config::unknown_level))]
    UnknownLevel(String),

    #[error("Invalid syntax definition: {0}")]
    #[diagnostic(code(cssel::config::invalid_definition))]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid syntax definition: {0}")]
    #[diagnostic(code(cssel::config::invalid_definition))]
    InvalidYaml(#[from] serde_yaml::Error),
}
