//! Constructors for AST nodes.
//!
//! Free functions build each node kind with its required fields; optional
//! fields are attached with the `with_*` builder methods. The `From` impls at
//! the bottom lift concrete nodes into the enums that hold them, so a rule can
//! be assembled without spelling out wrapper variants:
//!
//! ```rust
//! use cssel::ast;
//! let rule = ast::rule(vec![
//!     ast::tag_name("div").into(),
//!     ast::class_name("foo").into(),
//! ]);
//! assert_eq!(cssel::render(&ast::selector(vec![rule])), "div.foo");
//! ```

use super::*;

// ============================================================================
// SELECTORS AND RULES
// ============================================================================

pub fn selector(rules: Vec<AstRule>) -> AstSelector {
    AstSelector { rules }
}

pub fn rule(items: Vec<AstRuleItem>) -> AstRule {
    AstRule {
        items,
        combinator: None,
        nested_rule: None,
    }
}

impl AstRule {
    pub fn with_combinator(mut self, combinator: impl Into<String>) -> Self {
        self.combinator = Some(combinator.into());
        self
    }

    pub fn with_nested_rule(mut self, nested: AstRule) -> Self {
        self.nested_rule = Some(Box::new(nested));
        self
    }
}

// ============================================================================
// RULE ITEMS
// ============================================================================

pub fn tag_name(name: impl Into<String>) -> AstTagName {
    AstTagName {
        name: name.into(),
        namespace: None,
    }
}

pub fn wildcard_tag() -> AstWildcardTag {
    AstWildcardTag { namespace: None }
}

impl AstTagName {
    pub fn with_namespace(mut self, namespace: AstNamespace) -> Self {
        self.namespace = Some(namespace);
        self
    }
}

impl AstWildcardTag {
    pub fn with_namespace(mut self, namespace: AstNamespace) -> Self {
        self.namespace = Some(namespace);
        self
    }
}

pub fn namespace_name(name: impl Into<String>) -> AstNamespace {
    AstNamespace::NamespaceName(AstNamespaceName { name: name.into() })
}

pub fn wildcard_namespace() -> AstNamespace {
    AstNamespace::WildcardNamespace
}

pub fn no_namespace() -> AstNamespace {
    AstNamespace::NoNamespace
}

pub fn id(name: impl Into<String>) -> AstId {
    AstId { name: name.into() }
}

pub fn class_name(name: impl Into<String>) -> AstClassName {
    AstClassName { name: name.into() }
}

pub fn nesting_selector() -> AstRuleItem {
    AstRuleItem::NestingSelector
}

/// Presence-only attribute `[name]`.
pub fn attribute(name: impl Into<String>) -> AstAttribute {
    AstAttribute {
        name: name.into(),
        namespace: None,
        operator: None,
        value: None,
        case_sensitivity_modifier: None,
    }
}

impl AstAttribute {
    pub fn with_namespace(mut self, namespace: AstNamespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Sets operator and value together; the renderer drops one without
    /// the other.
    pub fn with_value(
        mut self,
        operator: impl Into<String>,
        value: impl Into<AstAttributeValue>,
    ) -> Self {
        self.operator = Some(operator.into());
        self.value = Some(value.into());
        self
    }

    pub fn with_case_sensitivity_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.case_sensitivity_modifier = Some(modifier.into());
        self
    }
}

pub fn pseudo_class(name: impl Into<String>) -> AstPseudoClass {
    AstPseudoClass {
        name: name.into(),
        argument: None,
    }
}

pub fn pseudo_element(name: impl Into<String>) -> AstPseudoElement {
    AstPseudoElement {
        name: name.into(),
        argument: None,
    }
}

impl AstPseudoClass {
    pub fn with_argument(mut self, argument: impl Into<AstPseudoArgument>) -> Self {
        self.argument = Some(argument.into());
        self
    }
}

impl AstPseudoElement {
    pub fn with_argument(mut self, argument: impl Into<AstPseudoArgument>) -> Self {
        self.argument = Some(argument.into());
        self
    }
}

// ============================================================================
// VALUES AND ARGUMENTS
// ============================================================================

pub fn string(value: impl Into<String>) -> AstString {
    AstString {
        value: value.into(),
    }
}

pub fn substitution(name: impl Into<String>) -> AstSubstitution {
    AstSubstitution { name: name.into() }
}

pub fn formula(a: i64, b: i64) -> AstFormula {
    AstFormula { a, b }
}

pub fn formula_of_selector(a: i64, b: i64, selector: AstRule) -> AstFormulaOfSelector {
    AstFormulaOfSelector { a, b, selector }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! lift {
    ($target:ident { $( $node:ty => $variant:ident ),* $(,)? }) => {
        $(
            impl From<$node> for $target {
                fn from(node: $node) -> Self {
                    $target::$variant(node)
                }
            }
        )*
    };
}

lift!(AstRuleItem {
    AstTagName => TagName,
    AstWildcardTag => WildcardTag,
    AstId => Id,
    AstClassName => ClassName,
    AstAttribute => Attribute,
    AstPseudoClass => PseudoClass,
    AstPseudoElement => PseudoElement,
});

lift!(AstAttributeValue {
    AstString => String,
    AstSubstitution => Substitution,
});

lift!(AstPseudoArgument {
    AstString => String,
    AstSubstitution => Substitution,
    AstSelector => Selector,
    AstFormula => Formula,
    AstFormulaOfSelector => FormulaOfSelector,
});

impl From<AstNamespaceName> for AstNamespace {
    fn from(node: AstNamespaceName) -> Self {
        AstNamespace::NamespaceName(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_fill_optional_fields() {
        let attr = attribute("href")
            .with_namespace(no_namespace())
            .with_value("^=", string("https"))
            .with_case_sensitivity_modifier("i");
        assert_eq!(attr.operator.as_deref(), Some("^="));
        assert_eq!(attr.value, Some(AstAttributeValue::String(string("https"))));
        assert_eq!(attr.namespace, Some(AstNamespace::NoNamespace));
        assert_eq!(attr.case_sensitivity_modifier.as_deref(), Some("i"));
    }

    #[test]
    fn test_entity_predicates() {
        let item: AstRuleItem = pseudo_class("hover").into();
        let entity = item.as_entity();
        assert!(entity.is_pseudo_class());
        assert!(!entity.is_pseudo_element());
        assert_eq!(entity.kind(), "PseudoClass");

        let ns = wildcard_namespace();
        assert!(AstEntity::from(&ns).is_wildcard_namespace());
        assert_eq!(AstEntity::NestingSelector.kind(), "NestingSelector");
    }

    #[test]
    fn test_rule_chain() {
        let r = rule(vec![tag_name("a").into()])
            .with_nested_rule(rule(vec![tag_name("b").into()]).with_combinator(">"));
        let names: Vec<usize> = r.chain().map(|r| r.items.len()).collect();
        assert_eq!(names, vec![1, 1]);
        assert_eq!(r.chain().nth(1).and_then(|r| r.combinator.as_deref()), Some(">"));
    }
}
