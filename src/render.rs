//! Rendering of AST nodes back to selector text.
//!
//! Output is canonical: whitespace is normalised, combinators are surrounded
//! by single spaces, strings are double-quoted, and identifiers are escaped
//! so that parsing the output yields the same tree.
//!
//! # Examples
//!
//! ```rust
//! use cssel::{ast, render};
//!
//! let selector = ast::selector(vec![ast::rule(vec![
//!     ast::tag_name("a").into(),
//!     ast::id("user-23").into(),
//!     ast::class_name("user").into(),
//!     ast::pseudo_class("visited").into(),
//!     ast::pseudo_element("before").into(),
//! ])]);
//! assert_eq!(render(&selector), "a#user-23.user:visited::before");
//! ```

use crate::ast::{
    AstAttribute, AstAttributeValue, AstEntity, AstNamespace, AstPseudoArgument, AstRule,
};
use crate::chars::{is_ident_escape, is_string_escape};

/// Renders any AST node.
///
/// A bare string node, which only occurs inside attribute values and pseudo
/// arguments, renders as a quoted string.
pub fn render<'a>(node: impl Into<AstEntity<'a>>) -> String {
    let mut out = String::new();
    write_entity(&mut out, node.into());
    out
}

fn write_entity(out: &mut String, entity: AstEntity<'_>) {
    match entity {
        AstEntity::Selector(selector) => {
            for (i, rule) in selector.rules.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_rule(out, rule);
            }
        }
        AstEntity::Rule(rule) => write_rule(out, rule),
        AstEntity::TagName(tag) => {
            write_namespace(out, tag.namespace.as_ref());
            out.push_str(&escape_identifier(&tag.name));
        }
        AstEntity::WildcardTag(tag) => {
            write_namespace(out, tag.namespace.as_ref());
            out.push('*');
        }
        AstEntity::NamespaceName(namespace) => {
            out.push_str(&escape_identifier(&namespace.name));
            out.push('|');
        }
        AstEntity::WildcardNamespace => out.push_str("*|"),
        AstEntity::NoNamespace => out.push('|'),
        AstEntity::Id(id) => {
            out.push('#');
            out.push_str(&escape_identifier(&id.name));
        }
        AstEntity::ClassName(class) => {
            out.push('.');
            out.push_str(&escape_identifier(&class.name));
        }
        AstEntity::NestingSelector => out.push('&'),
        AstEntity::Attribute(attribute) => write_attribute(out, attribute),
        AstEntity::PseudoClass(pseudo) => {
            out.push(':');
            write_pseudo(out, &pseudo.name, pseudo.argument.as_ref());
        }
        AstEntity::PseudoElement(pseudo) => {
            out.push_str("::");
            write_pseudo(out, &pseudo.name, pseudo.argument.as_ref());
        }
        AstEntity::String(string) => out.push_str(&escape_string(&string.value)),
        AstEntity::Substitution(substitution) => {
            out.push('$');
            out.push_str(&escape_identifier(&substitution.name));
        }
        AstEntity::Formula(formula) => out.push_str(&render_formula(formula.a, formula.b)),
        AstEntity::FormulaOfSelector(formula) => {
            out.push_str(&render_formula(formula.a, formula.b));
            out.push_str(" of ");
            write_rule(out, &formula.selector);
        }
    }
}

fn write_rule(out: &mut String, rule: &AstRule) {
    if let Some(combinator) = &rule.combinator {
        out.push_str(combinator);
        out.push(' ');
    }
    for item in &rule.items {
        write_entity(out, item.into());
    }
    if let Some(nested) = &rule.nested_rule {
        out.push(' ');
        write_rule(out, nested);
    }
}

fn write_namespace(out: &mut String, namespace: Option<&AstNamespace>) {
    if let Some(namespace) = namespace {
        write_entity(out, namespace.into());
    }
}

fn write_attribute(out: &mut String, attribute: &AstAttribute) {
    out.push('[');
    write_namespace(out, attribute.namespace.as_ref());
    out.push_str(&escape_identifier(&attribute.name));
    if let (Some(operator), Some(value)) = (&attribute.operator, &attribute.value) {
        out.push_str(operator);
        match value {
            AstAttributeValue::String(string) => out.push_str(&escape_string(&string.value)),
            AstAttributeValue::Substitution(_) => write_entity(out, value.into()),
        }
        if let Some(modifier) = &attribute.case_sensitivity_modifier {
            out.push(' ');
            out.push_str(&escape_identifier(modifier));
        }
    }
    out.push(']');
}

fn write_pseudo(out: &mut String, name: &str, argument: Option<&AstPseudoArgument>) {
    out.push_str(&escape_identifier(name));
    let Some(argument) = argument else {
        return;
    };
    out.push('(');
    match argument {
        // Pseudo string arguments are raw text, not quoted strings.
        AstPseudoArgument::String(string) => out.push_str(&escape_identifier(&string.value)),
        other => write_entity(out, other.into()),
    }
    out.push(')');
}

// ============================================================================
// ESCAPING
// ============================================================================

/// Escapes a name so it reads back as a single identifier.
///
/// ```rust
/// use cssel::render::escape_identifier;
/// assert_eq!(escape_identifier("a.b"), "a\\.b");
/// assert_eq!(escape_identifier("1st"), "\\31 st");
/// assert_eq!(escape_identifier("--x"), "-\\-x");
/// ```
pub fn escape_identifier(name: &str) -> String {
    let leading_hyphen = name.starts_with('-');
    let mut result = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let digit_forbidden = i == 0 || (i == 1 && leading_hyphen);
        if is_ident_escape(c) || (c == '-' && i == 1 && leading_hyphen) {
            result.push('\\');
            result.push(c);
        } else if c == '-'
            || c == '_'
            || c.is_ascii_alphabetic()
            || (c.is_ascii_digit() && !digit_forbidden)
        {
            result.push(c);
        } else {
            result.push_str(&format!("\\{:x} ", c as u32));
        }
    }
    result.trim().to_string()
}

/// Quotes a string value with double quotes.
pub fn escape_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            c if is_string_escape(c) => {
                result.push_str(&format!("\\{:x}", c as u32));
                if chars.peek().is_some() {
                    result.push(' ');
                }
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Canonical `An+B`.
pub fn render_formula(a: i64, b: i64) -> String {
    if a == 0 {
        return b.to_string();
    }
    let mut result = match a {
        1 => String::new(),
        -1 => "-".to_string(),
        a => a.to_string(),
    };
    result.push('n');
    if b > 0 {
        result.push('+');
    }
    if b != 0 {
        result.push_str(&b.to_string());
    }
    result
}
