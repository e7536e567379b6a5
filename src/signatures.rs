//! Pseudo-class and pseudo-element argument signatures.
//!
//! Syntax definitions list pseudo names per argument category
//! (`NoArgument`, `String`, `Selector`, `Formula`, `FormulaOfSelector`). The
//! parser needs the opposite view: for a given name, what argument may
//! follow it. [`calculate_signatures`] performs that inversion once per
//! compiled parser.

use std::collections::HashMap;
use std::fmt;

use crate::errors::ConfigError;
use crate::syntax::{PseudoCategory, PseudoDefinitions};

// ============================================================================
// SIGNATURE TYPES
// ============================================================================

/// Which of the two pseudo atom classes a signature table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoAtom {
    Class,
    Element,
}

impl PseudoAtom {
    pub fn as_str(&self) -> &'static str {
        match self {
            PseudoAtom::Class => "pseudo-class",
            PseudoAtom::Element => "pseudo-element",
        }
    }
}

impl fmt::Display for PseudoAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Argument shape accepted inside the parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoKind {
    NoArgument,
    String,
    Selector,
    Formula,
}

impl fmt::Display for PseudoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PseudoKind::NoArgument => "NoArgument",
            PseudoKind::String => "String",
            PseudoKind::Selector => "Selector",
            PseudoKind::Formula => "Formula",
        };
        f.write_str(name)
    }
}

/// Resolved argument contract of one pseudo name.
///
/// `optional` means the bare form (no parentheses) is also accepted.
/// `of_selector` only applies to `Formula` and allows `An+B of <rule>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoSignature {
    pub kind: PseudoKind,
    pub optional: bool,
    pub of_selector: bool,
}

impl PseudoSignature {
    /// Signature used for names accepted through `unknown: accept`.
    pub const UNKNOWN: PseudoSignature = PseudoSignature {
        kind: PseudoKind::String,
        optional: true,
        of_selector: false,
    };

    const fn bare() -> Self {
        PseudoSignature {
            kind: PseudoKind::NoArgument,
            optional: false,
            of_selector: false,
        }
    }
}

pub type PseudoSignatures = HashMap<String, PseudoSignature>;

// ============================================================================
// RESOLUTION
// ============================================================================

/// Inverts a per-category name listing into per-name signatures.
///
/// A name listed under `NoArgument` and one other category becomes an
/// optional signature of that category. Two different argument-bearing
/// categories for one name are a [`ConfigError::ConflictingSignature`].
///
/// # Examples
///
/// ```rust
/// use cssel::signatures::{calculate_signatures, PseudoAtom, PseudoKind};
/// use cssel::syntax::{PseudoCategory, PseudoDefinitions};
///
/// let mut defs = PseudoDefinitions::new();
/// defs.insert(PseudoCategory::NoArgument, Some(vec!["host".into()]));
/// defs.insert(PseudoCategory::Selector, Some(vec!["host".into()]));
/// let signatures = calculate_signatures(PseudoAtom::Class, &defs).unwrap();
/// assert_eq!(signatures["host"].kind, PseudoKind::Selector);
/// assert!(signatures["host"].optional);
/// ```
pub fn calculate_signatures(
    atom: PseudoAtom,
    definitions: &PseudoDefinitions,
) -> Result<PseudoSignatures, ConfigError> {
    let mut signatures = PseudoSignatures::new();

    let listed = definitions
        .iter()
        .filter_map(|(category, names)| names.as_ref().map(|names| (*category, names)));

    for (category, names) in listed {
        for name in names {
            let signature = signatures
                .entry(name.clone())
                .or_insert_with(PseudoSignature::bare);
            apply_category(atom, name, signature, category)?;
        }
    }

    Ok(signatures)
}

fn apply_category(
    atom: PseudoAtom,
    name: &str,
    signature: &mut PseudoSignature,
    category: PseudoCategory,
) -> Result<(), ConfigError> {
    let kind = match category {
        PseudoCategory::NoArgument => {
            signature.optional = true;
            return Ok(());
        }
        PseudoCategory::String => PseudoKind::String,
        PseudoCategory::Selector => PseudoKind::Selector,
        PseudoCategory::Formula => PseudoKind::Formula,
        PseudoCategory::FormulaOfSelector => {
            signature.of_selector = true;
            PseudoKind::Formula
        }
    };

    if signature.kind != PseudoKind::NoArgument && signature.kind != kind {
        return Err(ConfigError::ConflictingSignature {
            atom,
            name: name.to_string(),
            existing: signature.kind,
            conflicting: kind,
        });
    }
    signature.kind = kind;
    Ok(())
}
