//! Selector parser construction.
//!
//! [`create_parser`] resolves a syntax (level, custom definition, modules),
//! validates it and compiles it into immutable lookup tables. The returned
//! [`Parser`] is cheap to clone and may be shared across threads; each
//! [`Parser::parse`] call runs its own scanner over the input.
//!
//! # Examples
//!
//! ```rust
//! use cssel::{create_parser, CssLevel, ParserOptions};
//!
//! let parser = create_parser(ParserOptions::default().with_syntax(CssLevel::Css2)).unwrap();
//! assert!(parser.parse("a:hover > b").is_ok());
//! assert!(parser.parse("a ~ b").is_err());
//! ```

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ast::AstSelector;
use crate::errors::{ConfigError, ParserError};
use crate::indexes::{NameIndex, TokenIndex};
use crate::signatures::{calculate_signatures, PseudoAtom, PseudoSignatures};
use crate::syntax::{
    resolve_syntax, Notation, Section, SyntaxDefinition, SyntaxInput, UnknownPolicy, XmlOptions,
};

mod scanner;

use scanner::Scanner;

// ============================================================================
// OPTIONS
// ============================================================================

/// Options accepted by [`create_parser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Level preset or custom definition. Defaults to `latest`.
    pub syntax: SyntaxInput,
    /// Allow `$name` placeholders for attribute values and pseudo arguments.
    pub substitutes: bool,
    /// Reject inputs that browsers tolerate (`--ident`, unclosed brackets at
    /// end of input). Defaults to `true`.
    pub strict: bool,
    /// Extra CSS modules layered over the syntax, by name.
    pub modules: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            syntax: SyntaxInput::default(),
            substitutes: false,
            strict: true,
            modules: Vec::new(),
        }
    }
}

impl ParserOptions {
    pub fn with_syntax(mut self, syntax: impl Into<SyntaxInput>) -> Self {
        self.syntax = syntax.into();
        self
    }

    pub fn with_substitutes(mut self, substitutes: bool) -> Self {
        self.substitutes = substitutes;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.extend(modules.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// COMPILED SYNTAX
// ============================================================================

#[derive(Debug)]
pub(crate) struct AttributeRules {
    pub operators: TokenIndex,
    pub modifiers: NameIndex,
    pub accept_unknown_modifiers: bool,
    pub modifiers_enabled: bool,
}

#[derive(Debug)]
pub(crate) struct PseudoRules {
    pub signatures: PseudoSignatures,
    pub accept_unknown: bool,
}

#[derive(Debug)]
pub(crate) struct PseudoElementRules {
    pub rules: PseudoRules,
    pub single_colon: bool,
    pub double_colon: bool,
}

/// Capability tables derived from a resolved [`SyntaxDefinition`].
#[derive(Debug)]
pub(crate) struct CompiledSyntax {
    pub strict: bool,
    pub substitutes: bool,
    pub tag: bool,
    pub tag_wildcard: bool,
    pub namespace: bool,
    pub namespace_wildcard: bool,
    pub ids: bool,
    pub class_names: bool,
    pub nesting: bool,
    pub combinators: TokenIndex,
    pub attributes: Option<AttributeRules>,
    pub pseudo_classes: Option<PseudoRules>,
    pub pseudo_elements: Option<PseudoElementRules>,
}

impl CompiledSyntax {
    fn compile(
        definition: &SyntaxDefinition,
        strict: bool,
        substitutes: bool,
    ) -> Result<Self, ConfigError> {
        let (tag, tag_wildcard) = xml_flags(&definition.tag);
        let (namespace, namespace_wildcard) = xml_flags(&definition.namespace);
        if namespace && !tag {
            return Err(ConfigError::NamespaceWithoutTag);
        }

        let attributes = definition.attributes.options().map(|options| {
            let modifiers = NameIndex::new(
                options
                    .case_sensitivity_modifiers
                    .iter()
                    .flatten()
                    .cloned(),
            );
            let accept_unknown_modifiers =
                options.unknown_case_sensitivity_modifiers == Some(UnknownPolicy::Accept);
            AttributeRules {
                operators: TokenIndex::new(options.operators.iter().flatten()),
                modifiers_enabled: accept_unknown_modifiers || !modifiers.is_empty(),
                modifiers,
                accept_unknown_modifiers,
            }
        });

        let pseudo_classes = match definition.pseudo_classes.options() {
            Some(options) => Some(PseudoRules {
                signatures: match &options.definitions {
                    Some(definitions) => calculate_signatures(PseudoAtom::Class, definitions)?,
                    None => PseudoSignatures::new(),
                },
                accept_unknown: options.unknown == Some(UnknownPolicy::Accept),
            }),
            None => None,
        };

        let pseudo_elements = match definition.pseudo_elements.options() {
            Some(options) => {
                let notation = options.notation.unwrap_or(Notation::DoubleColon);
                Some(PseudoElementRules {
                    rules: PseudoRules {
                        signatures: match &options.definitions {
                            Some(definitions) => {
                                calculate_signatures(PseudoAtom::Element, definitions)?
                            }
                            None => PseudoSignatures::new(),
                        },
                        accept_unknown: options.unknown == Some(UnknownPolicy::Accept),
                    },
                    single_colon: matches!(notation, Notation::SingleColon | Notation::Both),
                    double_colon: matches!(notation, Notation::DoubleColon | Notation::Both),
                })
            }
            None => None,
        };

        Ok(CompiledSyntax {
            strict,
            substitutes,
            tag,
            tag_wildcard,
            namespace,
            namespace_wildcard,
            ids: definition.ids.unwrap_or(false),
            class_names: definition.class_names.unwrap_or(false),
            nesting: definition.nesting_selector.unwrap_or(false),
            combinators: TokenIndex::new(definition.combinators.iter().flatten()),
            attributes,
            pseudo_classes,
            pseudo_elements,
        })
    }
}

fn xml_flags(section: &Section<XmlOptions>) -> (bool, bool) {
    match section.options() {
        Some(options) => (true, options.wildcard.unwrap_or(false)),
        None => (false, false),
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// A compiled selector parser.
///
/// Parsing never mutates the parser; scan state lives in a per-call value.
#[derive(Clone)]
pub struct Parser {
    syntax: Arc<CompiledSyntax>,
}

impl Parser {
    /// Parses a selector string into an [`AstSelector`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] with a character position for any input the
    /// compiled grammar does not accept.
    pub fn parse(&self, input: &str) -> Result<AstSelector, ParserError> {
        let selector = Scanner::new(&self.syntax, input).parse()?;
        trace!(
            input_len = input.len(),
            rules = selector.rules.len(),
            "parsed selector"
        );
        Ok(selector)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("strict", &self.syntax.strict)
            .field("substitutes", &self.syntax.substitutes)
            .finish_non_exhaustive()
    }
}

/// Resolves and compiles the configured syntax.
///
/// # Errors
///
/// - [`ConfigError::NamespaceWithoutTag`] when namespaces are enabled but tags are not
/// - [`ConfigError::ConflictingSignature`] when a pseudo name is declared with two argument kinds
/// - [`ConfigError::UnknownModule`] for an unregistered module name
pub fn create_parser(options: ParserOptions) -> Result<Parser, ConfigError> {
    let definition = resolve_syntax(&options.syntax, &options.modules)?;
    let syntax = CompiledSyntax::compile(&definition, options.strict, options.substitutes)?;

    debug!(
        strict = syntax.strict,
        substitutes = syntax.substitutes,
        tag = syntax.tag,
        namespace = syntax.namespace,
        attributes = syntax.attributes.is_some(),
        pseudo_classes = syntax.pseudo_classes.as_ref().map_or(0, |p| p.signatures.len()),
        pseudo_elements = syntax
            .pseudo_elements
            .as_ref()
            .map_or(0, |p| p.rules.signatures.len()),
        "compiled selector parser"
    );

    Ok(Parser {
        syntax: Arc::new(syntax),
    })
}
