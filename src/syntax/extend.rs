//! Structural merge of syntax definitions.
//!
//! `extend(base, extension)` walks every field with a fixed rule:
//!
//! - scalars are replaced when the extension specifies them
//! - lists are concatenated, base first
//! - pseudo definitions are concatenated per category, and a category set to
//!   `false` in the extension is removed
//! - a section set to `false` in the extension is disabled outright; an
//!   unspecified section keeps the base; two enabled sections merge field by
//!   field

use super::{
    AttributesDefinition, PseudoClassesDefinition, PseudoDefinitions, PseudoElementsDefinition,
    Section, SyntaxDefinition, XmlOptions,
};

/// Field-wise merge of two values of the same shape.
pub trait Merge: Clone {
    fn merge(base: &Self, extension: &Self) -> Self;
}

/// Layers `extension` on top of `base`.
///
/// # Examples
///
/// ```rust
/// use cssel::syntax::{extend_syntax_definition, SyntaxDefinition};
///
/// let base = SyntaxDefinition { combinators: Some(vec![">".into()]), ..Default::default() };
/// let ext = SyntaxDefinition { combinators: Some(vec!["~".into()]), ids: Some(true), ..Default::default() };
/// let merged = extend_syntax_definition(&base, &ext);
/// assert_eq!(merged.combinators, Some(vec![">".to_string(), "~".to_string()]));
/// assert_eq!(merged.ids, Some(true));
/// ```
pub fn extend_syntax_definition(
    base: &SyntaxDefinition,
    extension: &SyntaxDefinition,
) -> SyntaxDefinition {
    SyntaxDefinition::merge(base, extension)
}

impl SyntaxDefinition {
    /// Method form of [`extend_syntax_definition`].
    pub fn extend(&self, extension: &SyntaxDefinition) -> SyntaxDefinition {
        extend_syntax_definition(self, extension)
    }
}

// ============================================================================
// FIELD RULES
// ============================================================================

pub fn replace_if_specified<T: Clone>(base: &Option<T>, extension: &Option<T>) -> Option<T> {
    extension.clone().or_else(|| base.clone())
}

pub fn concat_optional<T: Clone>(base: &Option<Vec<T>>, extension: &Option<Vec<T>>) -> Option<Vec<T>> {
    match (base, extension) {
        (Some(base), Some(extension)) => Some(base.iter().chain(extension).cloned().collect()),
        _ => replace_if_specified(base, extension),
    }
}

pub fn merge_section<T: Merge>(base: &Section<T>, extension: &Section<T>) -> Section<T> {
    match (base, extension) {
        (_, Section::Unspecified) => base.clone(),
        (Section::Enabled(base), Section::Enabled(extension)) => {
            Section::Enabled(T::merge(base, extension))
        }
        _ => extension.clone(),
    }
}

pub fn merge_definitions(
    base: &Option<PseudoDefinitions>,
    extension: &Option<PseudoDefinitions>,
) -> Option<PseudoDefinitions> {
    let (Some(base), Some(extension)) = (base, extension) else {
        return replace_if_specified(base, extension);
    };
    let mut merged = base.clone();
    for (category, names) in extension {
        match names {
            None => {
                merged.remove(category);
            }
            Some(names) => {
                let slot = merged.entry(*category).or_insert(None);
                let existing = slot.take().unwrap_or_default();
                *slot = Some(existing.into_iter().chain(names.iter().cloned()).collect());
            }
        }
    }
    Some(merged)
}

// ============================================================================
// MERGE IMPLEMENTATIONS
// ============================================================================

impl Merge for SyntaxDefinition {
    fn merge(base: &Self, extension: &Self) -> Self {
        SyntaxDefinition {
            base_syntax: replace_if_specified(&base.base_syntax, &extension.base_syntax),
            modules: base.modules.iter().chain(&extension.modules).cloned().collect(),
            tag: merge_section(&base.tag, &extension.tag),
            namespace: merge_section(&base.namespace, &extension.namespace),
            ids: replace_if_specified(&base.ids, &extension.ids),
            class_names: replace_if_specified(&base.class_names, &extension.class_names),
            nesting_selector: replace_if_specified(
                &base.nesting_selector,
                &extension.nesting_selector,
            ),
            combinators: concat_optional(&base.combinators, &extension.combinators),
            attributes: merge_section(&base.attributes, &extension.attributes),
            pseudo_classes: merge_section(&base.pseudo_classes, &extension.pseudo_classes),
            pseudo_elements: merge_section(&base.pseudo_elements, &extension.pseudo_elements),
        }
    }
}

impl Merge for XmlOptions {
    fn merge(base: &Self, extension: &Self) -> Self {
        XmlOptions {
            wildcard: replace_if_specified(&base.wildcard, &extension.wildcard),
        }
    }
}

impl Merge for AttributesDefinition {
    fn merge(base: &Self, extension: &Self) -> Self {
        AttributesDefinition {
            operators: concat_optional(&base.operators, &extension.operators),
            case_sensitivity_modifiers: concat_optional(
                &base.case_sensitivity_modifiers,
                &extension.case_sensitivity_modifiers,
            ),
            unknown_case_sensitivity_modifiers: replace_if_specified(
                &base.unknown_case_sensitivity_modifiers,
                &extension.unknown_case_sensitivity_modifiers,
            ),
        }
    }
}

impl Merge for PseudoClassesDefinition {
    fn merge(base: &Self, extension: &Self) -> Self {
        PseudoClassesDefinition {
            unknown: replace_if_specified(&base.unknown, &extension.unknown),
            definitions: merge_definitions(&base.definitions, &extension.definitions),
        }
    }
}

impl Merge for PseudoElementsDefinition {
    fn merge(base: &Self, extension: &Self) -> Self {
        PseudoElementsDefinition {
            unknown: replace_if_specified(&base.unknown, &extension.unknown),
            notation: replace_if_specified(&base.notation, &extension.notation),
            definitions: merge_definitions(&base.definitions, &extension.definitions),
        }
    }
}
