// tests/parser_tests.rs

use cssel::ast;
use cssel::syntax::{PseudoClassesDefinition, Section, UnknownPolicy};
use cssel::{
    create_parser, parse, AstPseudoArgument, AstRuleItem, AstSelector, CssLevel, Parser,
    ParserError, ParserOptions, SyntaxDefinition,
};

fn parser(options: ParserOptions) -> Parser {
    create_parser(options).unwrap()
}

fn custom(definition: &str) -> Parser {
    parser(ParserOptions::default().with_syntax(SyntaxDefinition::from_json_str(definition).unwrap()))
}

fn lenient() -> Parser {
    parser(ParserOptions::default().with_strict(false))
}

fn single_rule(items: Vec<AstRuleItem>) -> AstSelector {
    ast::selector(vec![ast::rule(items)])
}

fn error(result: Result<AstSelector, ParserError>) -> ParserError {
    result.expect_err("expected a parse error")
}

// ---
// Identifiers
// ---

#[test]
fn test_parse_tag_and_class() {
    assert_eq!(
        parse("div.foo").unwrap(),
        single_rule(vec![ast::tag_name("div").into(), ast::class_name("foo").into()])
    );
}

#[test]
fn test_parse_hex_escapes_in_identifier() {
    let expected = single_rule(vec![ast::id("hello\nworld").into()]);
    for input in [
        "#hello\\aworld",
        "#hello\\a world",
        "#hello\\a\tworld",
        "#hello\\a\r\nworld",
        "#hello\\00000aworld",
    ] {
        assert_eq!(parse(input).unwrap(), expected, "input: {input:?}");
    }
}

#[test]
fn test_parse_invalid_hex_escape_becomes_replacement_char() {
    assert_eq!(
        parse("#a\\0 b").unwrap(),
        single_rule(vec![ast::id("a\u{fffd}b").into()])
    );
    assert_eq!(
        parse("#a\\d800 b").unwrap(),
        single_rule(vec![ast::id("a\u{fffd}b").into()])
    );
}

#[test]
fn test_double_hyphen_identifier_strict_vs_lenient() {
    let err = error(parse("#--id"));
    assert!(err.message.contains("two hyphens"), "{}", err.message);
    assert_eq!(
        lenient().parse("#--id").unwrap(),
        single_rule(vec![ast::id("--id").into()])
    );
}

#[test]
fn test_identifier_errors() {
    assert_eq!(
        error(parse("#-")).message,
        "Identifiers cannot consist of a single hyphen."
    );
    assert_eq!(
        error(parse("#-1")).message,
        "Identifiers cannot start with hyphens followed by digits."
    );
    assert_eq!(
        error(lenient().parse("#--1")).message,
        "Identifiers cannot start with hyphens followed by digits."
    );
    assert_eq!(error(parse("#")).message, "Expected ID name.");
    assert_eq!(error(parse(".1")).message, "Expected class name.");
    assert_eq!(
        error(parse("a - b")).message,
        "Identifiers cannot consist of a single hyphen."
    );
}

#[test]
fn test_unicode_identifier() {
    assert_eq!(parse("#ÈÈ").unwrap(), single_rule(vec![ast::id("ÈÈ").into()]));
}

// ---
// Tags and namespaces
// ---

#[test]
fn test_parse_namespaces() {
    assert_eq!(
        parse("ns|div").unwrap(),
        single_rule(vec![ast::tag_name("div")
            .with_namespace(ast::namespace_name("ns"))
            .into()])
    );
    assert_eq!(
        parse("|div").unwrap(),
        single_rule(vec![ast::tag_name("div")
            .with_namespace(ast::no_namespace())
            .into()])
    );
    assert_eq!(
        parse("*|*").unwrap(),
        single_rule(vec![ast::wildcard_tag()
            .with_namespace(ast::wildcard_namespace())
            .into()])
    );
    assert_eq!(
        parse("\\*|\\*").unwrap(),
        single_rule(vec![ast::tag_name("*")
            .with_namespace(ast::namespace_name("*"))
            .into()])
    );
}

#[test]
fn test_tag_must_lead_the_rule() {
    for input in ["[href=\"#\"]a", "[href=\"#\"]|b", ":nth-child(2n)a"] {
        assert_eq!(
            error(parse(input)).message,
            "Unexpected tag/namespace start.",
            "input: {input:?}"
        );
    }
}

#[test]
fn test_disabled_capabilities() {
    let empty = custom("{}");
    assert_eq!(error(empty.parse("div")).message, "Tag names are not enabled.");
    assert_eq!(error(empty.parse("*")).message, "Wildcard tag name is not enabled.");
    assert_eq!(error(empty.parse(".a")).message, "Class names are not enabled.");
    assert_eq!(error(empty.parse("#a")).message, "IDs are not enabled.");
    assert_eq!(error(empty.parse("[a]")).message, "Attributes are not enabled.");
    assert_eq!(error(empty.parse(":hover")).message, "Pseudo-classes are not enabled.");

    let tags_only = custom(r#"{"tag": true}"#);
    assert_eq!(error(tags_only.parse("ns|div")).message, "Namespaces are not enabled.");
    assert_eq!(error(tags_only.parse("|div")).message, "Namespaces are not enabled.");

    let no_wildcard = custom(r#"{"tag": true, "namespace": {"wildcard": false}}"#);
    assert_eq!(
        error(no_wildcard.parse("*|div")).message,
        "Wildcard namespace is not enabled."
    );
}

// ---
// Attributes
// ---

#[test]
fn test_parse_attribute_with_modifier() {
    assert_eq!(
        parse("[attr^=\"value\" i]").unwrap(),
        single_rule(vec![ast::attribute("attr")
            .with_value("^=", ast::string("value"))
            .with_case_sensitivity_modifier("i")
            .into()])
    );
    assert_eq!(
        parse("[ attr = value i ]").unwrap(),
        single_rule(vec![ast::attribute("attr")
            .with_value("=", ast::string("value"))
            .with_case_sensitivity_modifier("i")
            .into()])
    );
}

#[test]
fn test_parse_attribute_strings() {
    let expected = single_rule(vec![ast::attribute("attr")
        .with_value("=", ast::string("hello\nworld"))
        .into()]);
    for input in [
        "[attr=\"hello\\aworld\"]",
        "[attr=\"hell\\o\\aworld\"]",
        "[attr=\"hell\\\no\\aworld\"]",
        "[attr='hello\\a world']",
    ] {
        assert_eq!(parse(input).unwrap(), expected, "input: {input:?}");
    }
}

#[test]
fn test_attribute_operator_longest_match() {
    assert_eq!(
        parse("[attr|=val]").unwrap(),
        single_rule(vec![ast::attribute("attr")
            .with_value("|=", ast::string("val"))
            .into()])
    );
    assert_eq!(
        parse("[ns|attr]").unwrap(),
        single_rule(vec![ast::attribute("attr")
            .with_namespace(ast::namespace_name("ns"))
            .into()])
    );
}

#[test]
fn test_attribute_errors() {
    assert_eq!(
        error(parse("[attr!=x]")).message,
        "Expected a valid attribute selector operator."
    );
    assert_eq!(
        error(parse("[attr=x q]")).message,
        "Unknown attribute case sensitivity modifier."
    );
    let css2 = parser(ParserOptions::default().with_syntax(CssLevel::Css2));
    assert_eq!(
        error(css2.parse("[attr=x i]")).message,
        "Attribute case sensitivity modifiers are not enabled."
    );
    let progressive = parser(ParserOptions::default().with_syntax(CssLevel::Progressive));
    assert!(progressive.parse("[attr=x q]").is_ok());
}

// ---
// Pseudo-classes and pseudo-elements
// ---

#[test]
fn test_parse_formulas() {
    let nth = |a, b| {
        single_rule(vec![ast::pseudo_class("nth-child")
            .with_argument(ast::formula(a, b))
            .into()])
    };
    assert_eq!(parse(":nth-child(2n+1)").unwrap(), nth(2, 1));
    assert_eq!(parse(":nth-child(even)").unwrap(), nth(2, 0));
    assert_eq!(parse(":nth-child(odd)").unwrap(), nth(2, 1));
    assert_eq!(parse(":nth-child( -n + 3 )").unwrap(), nth(-1, 3));
    assert_eq!(parse(":nth-child(+n)").unwrap(), nth(1, 0));
    assert_eq!(parse(":nth-child(-2n-1)").unwrap(), nth(-2, -1));
    assert_eq!(parse(":nth-child(5)").unwrap(), nth(0, 5));
    assert_eq!(parse(":nth-child(-5)").unwrap(), nth(0, -5));
    assert_eq!(parse(":nth-child(3\\6e)").unwrap(), nth(3, 0));
}

#[test]
fn test_formula_errors() {
    assert_eq!(error(parse(":nth-child(evan)")).message, "Formula parse error.");
    assert_eq!(
        error(parse(":nth-child(-x)")).message,
        "Formula parse error: expected \"n\"."
    );
    assert_eq!(
        error(parse(":nth-child(99999999999999999999n)")).message,
        "Formula coefficient is out of range."
    );
}

#[test]
fn test_formula_of_selector() {
    assert_eq!(
        parse(":nth-child(2n of .a)").unwrap(),
        single_rule(vec![ast::pseudo_class("nth-child")
            .with_argument(ast::formula_of_selector(
                2,
                0,
                ast::rule(vec![ast::class_name("a").into()])
            ))
            .into()])
    );
    let selectors3 = parser(ParserOptions::default().with_syntax(CssLevel::Selectors3));
    assert!(selectors3.parse(":nth-child(2n of .a)").is_err());
}

#[test]
fn test_selector_argument_is_relative() {
    let selector = parse("a:has(> img, + b)").unwrap();
    let AstRuleItem::PseudoClass(has) = &selector.rules[0].items[1] else {
        panic!("expected :has");
    };
    let Some(AstPseudoArgument::Selector(argument)) = &has.argument else {
        panic!("expected a selector argument");
    };
    assert_eq!(argument.rules.len(), 2);
    assert_eq!(argument.rules[0].combinator.as_deref(), Some(">"));
    assert_eq!(argument.rules[1].combinator.as_deref(), Some("+"));
}

#[test]
fn test_string_argument_is_trimmed() {
    assert_eq!(
        parse(":lang( en-US )").unwrap(),
        single_rule(vec![ast::pseudo_class("lang")
            .with_argument(ast::string("en-US"))
            .into()])
    );
    assert_eq!(
        error(parse(":lang( )")).message,
        "Expected pseudo-class argument value."
    );
}

#[test]
fn test_argument_presence() {
    assert_eq!(
        error(parse(":not")).message,
        "Argument is required for pseudo-class \"not\"."
    );
    assert_eq!(
        error(parse(":hover(x)")).message,
        "Pseudo-class \"hover\" does not accept an argument."
    );
    // NoArgument plus Selector: both forms are valid.
    assert!(parse(":host").is_ok());
    assert!(parse(":host(.dark)").is_ok());
}

#[test]
fn test_unknown_pseudo_class_with_module() {
    let syntax = SyntaxDefinition {
        base_syntax: Some(CssLevel::Selectors4),
        pseudo_classes: Section::Enabled(PseudoClassesDefinition {
            unknown: Some(UnknownPolicy::Reject),
            definitions: None,
        }),
        ..Default::default()
    };
    let strict = parser(ParserOptions::default().with_syntax(syntax.clone()));
    let err = error(strict.parse(":sticky"));
    assert_eq!(err.position, 0);
    assert!(err.message.contains("Unknown pseudo-class: \"sticky\""), "{}", err.message);
    assert!(err.message.contains("css-position-3"), "{}", err.message);
    assert!(err.help.is_some());

    let positioned = parser(
        ParserOptions::default()
            .with_syntax(syntax)
            .with_modules(["css-position-3"]),
    );
    assert_eq!(
        positioned.parse(":sticky").unwrap(),
        single_rule(vec![ast::pseudo_class("sticky").into()])
    );
}

#[test]
fn test_unknown_pseudo_error_position_points_at_colon() {
    let css2 = parser(ParserOptions::default().with_syntax(CssLevel::Css2));
    let err = error(css2.parse("a:nope"));
    assert_eq!(err.position, 1);
    assert_eq!(err.message, "Unknown pseudo-class: \"nope\".");
}

#[test]
fn test_pseudo_element_notation() {
    assert_eq!(
        parse("::before").unwrap(),
        single_rule(vec![ast::pseudo_element("before").into()])
    );
    // Single colon works for names listed as pseudo-elements.
    assert_eq!(
        parse(":before").unwrap(),
        single_rule(vec![ast::pseudo_element("before").into()])
    );
    let css2 = parser(ParserOptions::default().with_syntax(CssLevel::Css2));
    assert_eq!(
        error(css2.parse("::before")).message,
        "Pseudo elements double colon notation is not enabled."
    );
    assert_eq!(
        parse("::part(label)").unwrap(),
        single_rule(vec![ast::pseudo_element("part")
            .with_argument(ast::selector(vec![ast::rule(vec![ast::tag_name("label").into()])]))
            .into()])
    );
}

#[test]
fn test_pseudo_element_rejects_formula() {
    let elements = custom(
        r#"{"pseudoElements": {"definitions": {"Formula": ["nth"]}}}"#,
    );
    assert_eq!(
        error(elements.parse("::nth(2n)")).message,
        "Pseudo-elements cannot have formula argument."
    );
}

#[test]
fn test_progressive_accepts_unknown_pseudos() {
    let progressive = parser(ParserOptions::default().with_syntax(CssLevel::Progressive));
    assert_eq!(
        progressive.parse(":unknown(hello)").unwrap(),
        single_rule(vec![ast::pseudo_class("unknown")
            .with_argument(ast::string("hello"))
            .into()])
    );
    assert!(progressive.parse("::x-custom").is_ok());
    assert_eq!(
        progressive.parse("[a=b x]").unwrap(),
        single_rule(vec![ast::attribute("a")
            .with_value("=", ast::string("b"))
            .with_case_sensitivity_modifier("x")
            .into()])
    );
    assert_eq!(
        error(parse("[a=b x]")).message,
        "Unknown attribute case sensitivity modifier."
    );
    assert_eq!(
        error(progressive.parse(":unknown(hello)a")).message,
        "Unexpected tag/namespace start."
    );
}

// ---
// Rules and combinators
// ---

#[test]
fn test_combinator_chain() {
    let expected = ast::selector(vec![ast::rule(vec![ast::tag_name("a").into()])
        .with_nested_rule(
            ast::rule(vec![ast::tag_name("b").into()])
                .with_combinator(">")
                .with_nested_rule(ast::rule(vec![ast::tag_name("c").into()])),
        )]);
    assert_eq!(parse("a > b c").unwrap(), expected);
    assert_eq!(parse("a>b c").unwrap(), expected);
    assert_eq!(parse("  a  >  b   c  ").unwrap(), expected);
}

#[test]
fn test_column_combinator_longest_match() {
    let selector = parse("a || b").unwrap();
    let nested = selector.rules[0].nested_rule.as_deref().unwrap();
    assert_eq!(nested.combinator.as_deref(), Some("||"));
}

#[test]
fn test_combinator_not_enabled() {
    let css2 = parser(ParserOptions::default().with_syntax(CssLevel::Css2));
    assert_eq!(error(css2.parse("a ~ b")).message, "Expected rule but \"~\" found.");
}

#[test]
fn test_long_descendant_chain() {
    let input = vec!["a"; 5000].join(" ");
    let selector = parse(&input).unwrap();
    assert_eq!(selector.rules[0].chain().count(), 5000);
}

#[test]
fn test_nesting_selector() {
    assert_eq!(
        parse("&.a").unwrap(),
        single_rule(vec![ast::nesting_selector(), ast::class_name("a").into()])
    );
    let selectors4 = parser(ParserOptions::default().with_syntax(CssLevel::Selectors4));
    assert_eq!(
        error(selectors4.parse("&.a")).message,
        "Nesting selector is not enabled."
    );
    let nested = parser(
        ParserOptions::default()
            .with_syntax(CssLevel::Selectors4)
            .with_modules(["css-nesting-1"]),
    );
    assert!(nested.parse("& > b").is_ok());
}

// ---
// Errors and positions
// ---

#[test]
fn test_error_positions() {
    let err = error(parse("div,"));
    assert_eq!(err.position, 3);
    assert_eq!(err.message, "Expected rule but end of input reached.");
    assert_eq!(err.name(), "ParserError");

    let err = error(parse(""));
    assert_eq!(err.position, 0);

    let err = error(parse("a)"));
    assert_eq!(err.message, "Expected end of input but \")\" found.");
    assert_eq!(err.position, 1);
}

#[test]
fn test_error_display() {
    let err = error(parse("div,"));
    assert_eq!(
        err.to_string(),
        "Parse error at position 3: Expected rule but end of input reached."
    );
}

#[test]
fn test_strict_requires_closing_brackets() {
    assert_eq!(
        error(parse("[attr")).message,
        "Expected a valid attribute selector operator."
    );
    assert_eq!(
        error(parse("[attr=val")).message,
        "Expected end of attribute selector."
    );
    assert_eq!(
        error(parse(":not(a")).message,
        "Expected \")\" but end of input reached."
    );
}

#[test]
fn test_lenient_end_of_input() {
    let lenient = lenient();
    assert_eq!(
        lenient.parse("[attr").unwrap(),
        single_rule(vec![ast::attribute("attr").into()])
    );
    assert_eq!(
        lenient.parse("[attr=val i").unwrap(),
        single_rule(vec![ast::attribute("attr")
            .with_value("=", ast::string("val"))
            .with_case_sensitivity_modifier("i")
            .into()])
    );
    assert_eq!(
        lenient.parse(":lang(en").unwrap(),
        single_rule(vec![ast::pseudo_class("lang")
            .with_argument(ast::string("en"))
            .into()])
    );
    assert_eq!(
        lenient.parse(":lang(en\\").unwrap(),
        single_rule(vec![ast::pseudo_class("lang")
            .with_argument(ast::string("en\\"))
            .into()])
    );
}

#[test]
fn test_nesting_depth_limit() {
    let nested = |depth: usize| format!("{}a{}", ":not(".repeat(depth), ")".repeat(depth));
    assert!(parse(&nested(64)).is_ok());
    for depth in [65, 257, 1000] {
        assert_eq!(
            error(parse(&nested(depth))).message,
            "Maximum selector nesting depth exceeded."
        );
    }
}

// ---
// Substitutions
// ---

#[test]
fn test_substitutions() {
    let substitutes = parser(ParserOptions::default().with_substitutes(true));
    assert_eq!(
        substitutes.parse("[attr=$value]").unwrap(),
        single_rule(vec![ast::attribute("attr")
            .with_value("=", ast::substitution("value"))
            .into()])
    );
    assert_eq!(
        substitutes.parse(":nth-child($n)").unwrap(),
        single_rule(vec![ast::pseudo_class("nth-child")
            .with_argument(ast::substitution("n"))
            .into()])
    );
    assert_eq!(
        error(substitutes.parse("[attr=$]")).message,
        "Expected substitute name."
    );
    assert!(parse("[attr=$value]").is_err());
}

#[test]
fn test_parser_is_reusable_across_threads() {
    let parser = parser(ParserOptions::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || parser.parse(&format!(".c{i}")).unwrap())
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            single_rule(vec![ast::class_name(format!("c{i}")).into()])
        );
    }
}
