//! AST module for CSS selectors
//!
//! This module provides the node types produced by the parser and consumed by
//! the renderer and the traversal engine. Every node owns its children; there
//! is no sharing and no mutation after construction.
//!
//! The JSON form (via serde) tags every rule item, namespace, attribute value
//! and pseudo argument with a `"type"` discriminant, e.g.
//! `{"type":"ClassName","name":"foo"}`.
//!
//! A top-level [`AstSelector`] is the one untagged node: it serializes as
//! `{"rules":[...]}`. The same selector used as a pseudo argument is tagged by
//! [`AstPseudoArgument`], so it reads `{"type":"Selector","rules":[...]}`.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

pub mod factory;

pub use factory::*;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A comma-separated group of rules. Each rule is an independent alternative;
/// order is kept for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AstSelector {
    pub rules: Vec<AstRule>,
}

/// One compound selector plus an optional link to the next compound.
///
/// `nested_rule` carries the right-hand side of a combinator chain: in
/// `a > b`, the rule for `a` holds a nested rule for `b` whose `combinator`
/// is `">"`. A nested rule without a combinator is a descendant relation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Rule", rename_all = "camelCase")]
pub struct AstRule {
    pub items: Vec<AstRuleItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combinator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_rule: Option<Box<AstRule>>,
}

/// Atoms of a compound selector. At most one `TagName`/`WildcardTag`, and
/// only in first position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AstRuleItem {
    TagName(AstTagName),
    WildcardTag(AstWildcardTag),
    Id(AstId),
    ClassName(AstClassName),
    NestingSelector,
    Attribute(AstAttribute),
    PseudoClass(AstPseudoClass),
    PseudoElement(AstPseudoElement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstTagName {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<AstNamespace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AstWildcardTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<AstNamespace>,
}

/// Namespace prefix: `ns|`, `*|` or `|`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AstNamespace {
    NamespaceName(AstNamespaceName),
    WildcardNamespace,
    NoNamespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNamespaceName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstClassName {
    pub name: String,
}

/// `[ns|name op value modifier]`. `operator` and `value` are either both
/// present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstAttribute {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<AstNamespace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AstAttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitivity_modifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AstAttributeValue {
    String(AstString),
    Substitution(AstSubstitution),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstPseudoClass {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<AstPseudoArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstPseudoElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<AstPseudoArgument>,
}

/// Argument of a functional pseudo-class or pseudo-element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AstPseudoArgument {
    String(AstString),
    Substitution(AstSubstitution),
    Selector(AstSelector),
    Formula(AstFormula),
    FormulaOfSelector(AstFormulaOfSelector),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstString {
    pub value: String,
}

/// `$name` placeholder, only produced when substitutes are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstSubstitution {
    pub name: String,
}

/// `An+B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstFormula {
    pub a: i64,
    pub b: i64,
}

/// `An+B of <compound selector>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstFormulaOfSelector {
    pub a: i64,
    pub b: i64,
    pub selector: AstRule,
}

// ============================================================================
// ENTITY VIEW
// ============================================================================

/// Borrowed view over any AST node, used by [`render`](crate::render) and
/// [`traverse`](crate::traverse) to dispatch on the node type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AstEntity<'a> {
    Selector(&'a AstSelector),
    Rule(&'a AstRule),
    TagName(&'a AstTagName),
    WildcardTag(&'a AstWildcardTag),
    NamespaceName(&'a AstNamespaceName),
    WildcardNamespace,
    NoNamespace,
    Id(&'a AstId),
    ClassName(&'a AstClassName),
    NestingSelector,
    Attribute(&'a AstAttribute),
    PseudoClass(&'a AstPseudoClass),
    PseudoElement(&'a AstPseudoElement),
    String(&'a AstString),
    Substitution(&'a AstSubstitution),
    Formula(&'a AstFormula),
    FormulaOfSelector(&'a AstFormulaOfSelector),
}

macro_rules! entity_kinds {
    ($( $variant:ident => $predicate:ident ),* $(,)?) => {
        impl<'a> AstEntity<'a> {
            /// Discriminant name of the node, e.g. `"PseudoClass"`.
            pub fn kind(&self) -> &'static str {
                match self {
                    $( AstEntity::$variant { .. } => stringify!($variant), )*
                }
            }

            $(
                #[doc = concat!("Returns true if this node is a `", stringify!($variant), "`.")]
                pub fn $predicate(&self) -> bool {
                    matches!(self, AstEntity::$variant { .. })
                }
            )*
        }
    };
}

entity_kinds! {
    Selector => is_selector,
    Rule => is_rule,
    TagName => is_tag_name,
    WildcardTag => is_wildcard_tag,
    NamespaceName => is_namespace_name,
    WildcardNamespace => is_wildcard_namespace,
    NoNamespace => is_no_namespace,
    Id => is_id,
    ClassName => is_class_name,
    NestingSelector => is_nesting_selector,
    Attribute => is_attribute,
    PseudoClass => is_pseudo_class,
    PseudoElement => is_pseudo_element,
    String => is_string,
    Substitution => is_substitution,
    Formula => is_formula,
    FormulaOfSelector => is_formula_of_selector,
}

macro_rules! entity_from_node {
    ($( $node:ty => $variant:ident ),* $(,)?) => {
        $(
            impl<'a> From<&'a $node> for AstEntity<'a> {
                fn from(node: &'a $node) -> Self {
                    AstEntity::$variant(node)
                }
            }
        )*
    };
}

entity_from_node! {
    AstSelector => Selector,
    AstRule => Rule,
    AstTagName => TagName,
    AstWildcardTag => WildcardTag,
    AstNamespaceName => NamespaceName,
    AstId => Id,
    AstClassName => ClassName,
    AstAttribute => Attribute,
    AstPseudoClass => PseudoClass,
    AstPseudoElement => PseudoElement,
    AstString => String,
    AstSubstitution => Substitution,
    AstFormula => Formula,
    AstFormulaOfSelector => FormulaOfSelector,
}

impl<'a> From<&'a AstRuleItem> for AstEntity<'a> {
    fn from(item: &'a AstRuleItem) -> Self {
        match item {
            AstRuleItem::TagName(node) => AstEntity::TagName(node),
            AstRuleItem::WildcardTag(node) => AstEntity::WildcardTag(node),
            AstRuleItem::Id(node) => AstEntity::Id(node),
            AstRuleItem::ClassName(node) => AstEntity::ClassName(node),
            AstRuleItem::NestingSelector => AstEntity::NestingSelector,
            AstRuleItem::Attribute(node) => AstEntity::Attribute(node),
            AstRuleItem::PseudoClass(node) => AstEntity::PseudoClass(node),
            AstRuleItem::PseudoElement(node) => AstEntity::PseudoElement(node),
        }
    }
}

impl<'a> From<&'a AstNamespace> for AstEntity<'a> {
    fn from(namespace: &'a AstNamespace) -> Self {
        match namespace {
            AstNamespace::NamespaceName(node) => AstEntity::NamespaceName(node),
            AstNamespace::WildcardNamespace => AstEntity::WildcardNamespace,
            AstNamespace::NoNamespace => AstEntity::NoNamespace,
        }
    }
}

impl<'a> From<&'a AstAttributeValue> for AstEntity<'a> {
    fn from(value: &'a AstAttributeValue) -> Self {
        match value {
            AstAttributeValue::String(node) => AstEntity::String(node),
            AstAttributeValue::Substitution(node) => AstEntity::Substitution(node),
        }
    }
}

impl<'a> From<&'a AstPseudoArgument> for AstEntity<'a> {
    fn from(argument: &'a AstPseudoArgument) -> Self {
        match argument {
            AstPseudoArgument::String(node) => AstEntity::String(node),
            AstPseudoArgument::Substitution(node) => AstEntity::Substitution(node),
            AstPseudoArgument::Selector(node) => AstEntity::Selector(node),
            AstPseudoArgument::Formula(node) => AstEntity::Formula(node),
            AstPseudoArgument::FormulaOfSelector(node) => AstEntity::FormulaOfSelector(node),
        }
    }
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl AstRule {
    /// Iterates this rule and every rule chained through `nested_rule`.
    pub fn chain(&self) -> impl Iterator<Item = &AstRule> {
        std::iter::successors(Some(self), |rule| rule.nested_rule.as_deref())
    }
}

impl AstRuleItem {
    pub fn as_entity(&self) -> AstEntity<'_> {
        AstEntity::from(self)
    }
}
