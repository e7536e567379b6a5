//! Property-based tests for parse/render stability
//!
//! Generated selectors cover every atom kind of the `latest` level. For each
//! one the canonical rendering must re-parse to the same tree, and a second
//! render must not change the text.

use cssel::{parse, render};
use proptest::prelude::*;

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_-]{0,8}",
        "-[a-z][a-z0-9]{0,4}",
        "_[a-zA-Z0-9]{0,6}",
        // Escaped punctuation and non-ASCII letters.
        "[a-z]{1,3}\\\\[.#:]{1}[a-z]{0,3}",
        "[a-z]{1,3}[é\u{4e2d}][a-z]{0,3}",
    ]
}

fn string_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[a-zA-Z0-9 _.-]{0,10}", "[a-z]{1,4}\\\\\"[a-z]{1,4}"]
}

fn formula_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("odd".to_string()),
        Just("even".to_string()),
        (-20i64..20).prop_map(|b| b.to_string()),
        (-9i64..10, -9i64..10).prop_map(|(a, b)| format!("{a}n{b:+}")),
        (1i64..10).prop_map(|a| format!("{a}n")),
    ]
}

fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier_strategy().prop_map(|name| format!(".{name}")),
        identifier_strategy().prop_map(|name| format!("#{name}")),
        identifier_strategy().prop_map(|name| format!("[{name}]")),
        (
            identifier_strategy(),
            prop::sample::select(vec!["=", "~=", "|=", "^=", "$=", "*="]),
            string_strategy(),
            prop::sample::select(vec!["", " i", " s"]),
        )
            .prop_map(|(name, op, value, modifier)| format!("[{name}{op}\"{value}\"{modifier}]")),
        prop::sample::select(vec![":hover", ":first-child", ":focus-within", "::before", "::marker"])
            .prop_map(str::to_string),
        formula_strategy().prop_map(|f| format!(":nth-child({f})")),
        formula_strategy().prop_map(|f| format!(":nth-of-type({f})")),
        identifier_strategy().prop_map(|name| format!(":lang({name})")),
        identifier_strategy().prop_map(|name| format!(":not(.{name})")),
    ]
}

fn compound_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just(String::new()),
            Just("*".to_string()),
            identifier_strategy(),
            identifier_strategy().prop_map(|ns| format!("{ns}|a")),
            Just("*|b".to_string()),
        ],
        prop::collection::vec(atom_strategy(), 0..4),
    )
        .prop_filter_map("empty compound", |(tag, atoms)| {
            let compound = format!("{tag}{}", atoms.concat());
            (!compound.is_empty()).then_some(compound)
        })
}

fn selector_strategy() -> impl Strategy<Value = String> {
    let rule = (
        compound_strategy(),
        prop::collection::vec(
            (
                prop::sample::select(vec![" ", " > ", "+", " ~ ", " || "]),
                compound_strategy(),
            ),
            0..3,
        ),
    )
        .prop_map(|(head, tail)| {
            let mut rule = head;
            for (combinator, compound) in tail {
                rule.push_str(combinator);
                rule.push_str(&compound);
            }
            rule
        });
    prop::collection::vec(rule, 1..3).prop_map(|rules| rules.join(" , "))
}

proptest! {
    #[test]
    fn test_render_reparses_to_same_tree(input in selector_strategy()) {
        let selector = parse(&input);
        prop_assert!(selector.is_ok(), "failed to parse {:?}: {:?}", input, selector.as_ref().err());
        let selector = selector.unwrap();
        let rendered = render(&selector);
        let reparsed = parse(&rendered);
        prop_assert!(reparsed.is_ok(), "failed to re-parse {:?}", rendered);
        prop_assert_eq!(&reparsed.unwrap(), &selector);
    }

    #[test]
    fn test_render_is_idempotent(input in selector_strategy()) {
        let once = render(&parse(&input).unwrap());
        let twice = render(&parse(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_is_deterministic(input in selector_strategy()) {
        prop_assert_eq!(parse(&input).unwrap(), parse(&input).unwrap());
    }

    #[test]
    fn test_parse_never_panics(input in "[a-z.#:\\[\\]()=\"' >+~|*,$\\\\-]{0,24}") {
        let _ = parse(&input);
    }
}
