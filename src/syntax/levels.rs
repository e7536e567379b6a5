//! Predefined CSS levels.
//!
//! Each level extends the previous one. `latest` is Selectors Level 4 with
//! every latest-eligible module layered in; `progressive` is `latest` with
//! unknown pseudo names and case-sensitivity modifiers accepted.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{
    css_modules, extend_syntax_definition, pseudo_definitions, AttributesDefinition, Notation,
    PseudoCategory, PseudoClassesDefinition, PseudoElementsDefinition, Section, SyntaxDefinition,
    UnknownPolicy, XmlOptions,
};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CssLevel {
    #[serde(rename = "css1")]
    Css1,
    #[serde(rename = "css2")]
    Css2,
    #[serde(rename = "css3")]
    Css3,
    #[serde(rename = "selectors-3")]
    Selectors3,
    #[serde(rename = "selectors-4")]
    Selectors4,
    #[serde(rename = "latest")]
    Latest,
    #[serde(rename = "progressive")]
    Progressive,
}

impl CssLevel {
    pub const ALL: [CssLevel; 7] = [
        CssLevel::Css1,
        CssLevel::Css2,
        CssLevel::Css3,
        CssLevel::Selectors3,
        CssLevel::Selectors4,
        CssLevel::Latest,
        CssLevel::Progressive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CssLevel::Css1 => "css1",
            CssLevel::Css2 => "css2",
            CssLevel::Css3 => "css3",
            CssLevel::Selectors3 => "selectors-3",
            CssLevel::Selectors4 => "selectors-4",
            CssLevel::Latest => "latest",
            CssLevel::Progressive => "progressive",
        }
    }

    /// The preset definition for this level. `css3` is an alias of
    /// `selectors-3`.
    pub fn definition(&self) -> &'static SyntaxDefinition {
        match self {
            CssLevel::Css1 => &CSS1,
            CssLevel::Css2 => &CSS2,
            CssLevel::Css3 | CssLevel::Selectors3 => &SELECTORS3,
            CssLevel::Selectors4 => &SELECTORS4,
            CssLevel::Latest => &LATEST,
            CssLevel::Progressive => &PROGRESSIVE,
        }
    }
}

impl fmt::Display for CssLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CssLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_string()))
    }
}

// ============================================================================
// PRESETS
// ============================================================================

fn names(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|name| name.to_string()).collect())
}

static CSS1: Lazy<SyntaxDefinition> = Lazy::new(|| SyntaxDefinition {
    tag: Section::Enabled(XmlOptions::default()),
    ids: Some(true),
    class_names: Some(true),
    combinators: Some(Vec::new()),
    pseudo_elements: Section::Enabled(PseudoElementsDefinition {
        unknown: Some(UnknownPolicy::Reject),
        notation: Some(Notation::SingleColon),
        definitions: Some(pseudo_definitions([(
            PseudoCategory::NoArgument,
            &["first-letter", "first-line"][..],
        )])),
    }),
    pseudo_classes: Section::Enabled(PseudoClassesDefinition {
        unknown: Some(UnknownPolicy::Reject),
        definitions: Some(pseudo_definitions([(
            PseudoCategory::NoArgument,
            &["link", "visited", "active"][..],
        )])),
    }),
    ..Default::default()
});

static CSS2: Lazy<SyntaxDefinition> = Lazy::new(|| {
    extend_syntax_definition(
        &CSS1,
        &SyntaxDefinition {
            tag: Section::Enabled(XmlOptions { wildcard: Some(true) }),
            combinators: names(&[">", "+"]),
            attributes: Section::Enabled(AttributesDefinition {
                unknown_case_sensitivity_modifiers: Some(UnknownPolicy::Reject),
                operators: names(&["=", "~=", "|="]),
                case_sensitivity_modifiers: None,
            }),
            pseudo_elements: Section::Enabled(PseudoElementsDefinition {
                definitions: Some(pseudo_definitions([(
                    PseudoCategory::NoArgument,
                    &["before", "after"][..],
                )])),
                ..Default::default()
            }),
            pseudo_classes: Section::Enabled(PseudoClassesDefinition {
                unknown: Some(UnknownPolicy::Reject),
                definitions: Some(pseudo_definitions([
                    (PseudoCategory::NoArgument, &["hover", "focus", "first-child"][..]),
                    (PseudoCategory::String, &["lang"][..]),
                ])),
            }),
            ..Default::default()
        },
    )
});

static SELECTORS3: Lazy<SyntaxDefinition> = Lazy::new(|| {
    extend_syntax_definition(
        &CSS2,
        &SyntaxDefinition {
            namespace: Section::Enabled(XmlOptions { wildcard: Some(true) }),
            combinators: names(&["~"]),
            attributes: Section::Enabled(AttributesDefinition {
                operators: names(&["^=", "$=", "*="]),
                ..Default::default()
            }),
            pseudo_elements: Section::Enabled(PseudoElementsDefinition {
                notation: Some(Notation::Both),
                ..Default::default()
            }),
            pseudo_classes: Section::Enabled(PseudoClassesDefinition {
                unknown: None,
                definitions: Some(pseudo_definitions([
                    (
                        PseudoCategory::NoArgument,
                        &[
                            "root",
                            "last-child",
                            "first-of-type",
                            "last-of-type",
                            "only-child",
                            "only-of-type",
                            "empty",
                            "target",
                            "enabled",
                            "disabled",
                            "checked",
                            "indeterminate",
                        ][..],
                    ),
                    (
                        PseudoCategory::Formula,
                        &["nth-child", "nth-last-child", "nth-of-type", "nth-last-of-type"][..],
                    ),
                    (PseudoCategory::Selector, &["not"][..]),
                ])),
            }),
            ..Default::default()
        },
    )
});

static SELECTORS4: Lazy<SyntaxDefinition> = Lazy::new(|| {
    extend_syntax_definition(
        &SELECTORS3,
        &SyntaxDefinition {
            combinators: names(&["||"]),
            attributes: Section::Enabled(AttributesDefinition {
                case_sensitivity_modifiers: names(&["i", "I", "s", "S"]),
                ..Default::default()
            }),
            pseudo_classes: Section::Enabled(PseudoClassesDefinition {
                unknown: None,
                definitions: Some(pseudo_definitions([
                    (
                        PseudoCategory::NoArgument,
                        &[
                            "any-link",
                            "local-link",
                            "target-within",
                            "scope",
                            "current",
                            "past",
                            "future",
                            "focus-within",
                            "focus-visible",
                            "read-write",
                            "read-only",
                            "placeholder-shown",
                            "default",
                            "valid",
                            "invalid",
                            "in-range",
                            "out-of-range",
                            "required",
                            "optional",
                            "blank",
                            "user-invalid",
                        ][..],
                    ),
                    (PseudoCategory::Formula, &["nth-col", "nth-last-col"][..]),
                    (PseudoCategory::String, &["dir"][..]),
                    (
                        PseudoCategory::FormulaOfSelector,
                        &["nth-child", "nth-last-child"][..],
                    ),
                    (PseudoCategory::Selector, &["current", "is", "where", "has"][..]),
                ])),
            }),
            ..Default::default()
        },
    )
});

static LATEST: Lazy<SyntaxDefinition> = Lazy::new(|| {
    css_modules()
        .filter(|module| module.latest)
        .fold(SELECTORS4.clone(), |definition, module| {
            extend_syntax_definition(&module.definition, &definition)
        })
});

static PROGRESSIVE: Lazy<SyntaxDefinition> = Lazy::new(|| {
    extend_syntax_definition(
        &LATEST,
        &SyntaxDefinition {
            pseudo_elements: Section::Enabled(PseudoElementsDefinition {
                unknown: Some(UnknownPolicy::Accept),
                ..Default::default()
            }),
            pseudo_classes: Section::Enabled(PseudoClassesDefinition {
                unknown: Some(UnknownPolicy::Accept),
                definitions: None,
            }),
            attributes: Section::Enabled(AttributesDefinition {
                unknown_case_sensitivity_modifiers: Some(UnknownPolicy::Accept),
                ..Default::default()
            }),
            ..Default::default()
        },
    )
});
