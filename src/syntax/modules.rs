//! CSS module fragments.
//!
//! A module is a partial [`SyntaxDefinition`] adding the selectors of one W3C
//! CSS module (positioning pseudo-classes, shadow parts, nesting, ...).
//! Modules are layered by name through `ParserOptions::modules` or a
//! definition's own `modules` list. Modules flagged `latest` are already part
//! of [`CssLevel::Latest`](super::CssLevel::Latest).
//!
//! The registry also backs a reverse index from pseudo names to the levels
//! and modules defining them, used to make unknown-pseudo errors actionable.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{
    pseudo_definitions, CssLevel, PseudoCategory, PseudoClassesDefinition, PseudoDefinitions,
    PseudoElementsDefinition, Section, SyntaxDefinition,
};

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone)]
pub struct CssModule {
    pub name: &'static str,
    /// Included in the `latest` level.
    pub latest: bool,
    pub definition: SyntaxDefinition,
}

fn pseudo_classes(definitions: PseudoDefinitions) -> Section<PseudoClassesDefinition> {
    Section::Enabled(PseudoClassesDefinition {
        unknown: None,
        definitions: Some(definitions),
    })
}

fn pseudo_elements(definitions: PseudoDefinitions) -> Section<PseudoElementsDefinition> {
    Section::Enabled(PseudoElementsDefinition {
        definitions: Some(definitions),
        ..Default::default()
    })
}

fn position_module(name: &'static str, latest: bool, names: &[&str]) -> CssModule {
    CssModule {
        name,
        latest,
        definition: SyntaxDefinition {
            pseudo_classes: pseudo_classes(pseudo_definitions([(PseudoCategory::NoArgument, names)])),
            ..Default::default()
        },
    }
}

static MODULES: Lazy<Vec<CssModule>> = Lazy::new(|| {
    vec![
        position_module("css-position-1", false, &["static", "relative", "absolute"]),
        position_module(
            "css-position-2",
            false,
            &["static", "relative", "absolute", "fixed"],
        ),
        position_module(
            "css-position-3",
            false,
            &["sticky", "fixed", "absolute", "relative", "static"],
        ),
        position_module(
            "css-position-4",
            true,
            &["sticky", "fixed", "absolute", "relative", "static", "initial"],
        ),
        CssModule {
            name: "css-scoping-1",
            latest: true,
            definition: SyntaxDefinition {
                pseudo_classes: pseudo_classes(pseudo_definitions([
                    (PseudoCategory::NoArgument, &["host", "host-context"][..]),
                    (PseudoCategory::Selector, &["host", "host-context"][..]),
                ])),
                pseudo_elements: pseudo_elements(pseudo_definitions([(
                    PseudoCategory::Selector,
                    &["slotted"][..],
                )])),
                ..Default::default()
            },
        },
        CssModule {
            name: "css-pseudo-4",
            latest: true,
            definition: SyntaxDefinition {
                pseudo_elements: pseudo_elements(pseudo_definitions([
                    (
                        PseudoCategory::NoArgument,
                        &[
                            "marker",
                            "selection",
                            "target-text",
                            "spelling-error",
                            "grammar-error",
                            "backdrop",
                            "placeholder",
                            "file-selector-button",
                        ][..],
                    ),
                    (PseudoCategory::String, &["highlight"][..]),
                ])),
                ..Default::default()
            },
        },
        CssModule {
            name: "css-shadow-parts-1",
            latest: true,
            definition: SyntaxDefinition {
                pseudo_elements: pseudo_elements(pseudo_definitions([(
                    PseudoCategory::Selector,
                    &["part"][..],
                )])),
                ..Default::default()
            },
        },
        CssModule {
            name: "css-nesting-1",
            latest: true,
            definition: SyntaxDefinition {
                nesting_selector: Some(true),
                ..Default::default()
            },
        },
    ]
});

/// All registered modules in registration order.
pub fn css_modules() -> impl Iterator<Item = &'static CssModule> {
    MODULES.iter()
}

pub fn css_module(name: &str) -> Option<&'static CssModule> {
    MODULES.iter().find(|module| module.name == name)
}

// ============================================================================
// PSEUDO LOCATION INDEX
// ============================================================================

/// Where each pseudo name is defined, by level or module name.
#[derive(Debug, Default)]
pub struct PseudoLocations {
    pseudo_classes: HashMap<String, Vec<&'static str>>,
    pseudo_elements: HashMap<String, Vec<&'static str>>,
}

impl PseudoLocations {
    pub fn pseudo_class(&self, name: &str) -> &[&'static str] {
        self.pseudo_classes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pseudo_element(&self, name: &str) -> &[&'static str] {
        self.pseudo_elements.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn record(&mut self, source: &'static str, definition: &SyntaxDefinition) {
        if let Some(definitions) = definition
            .pseudo_classes
            .options()
            .and_then(|options| options.definitions.as_ref())
        {
            record_names(&mut self.pseudo_classes, source, definitions);
        }
        if let Some(definitions) = definition
            .pseudo_elements
            .options()
            .and_then(|options| options.definitions.as_ref())
        {
            record_names(&mut self.pseudo_elements, source, definitions);
        }
    }
}

fn record_names(
    index: &mut HashMap<String, Vec<&'static str>>,
    source: &'static str,
    definitions: &PseudoDefinitions,
) {
    for name in definitions.values().flatten().flatten() {
        let sources = index.entry(name.clone()).or_default();
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
}

static LOCATIONS: Lazy<PseudoLocations> = Lazy::new(|| {
    let mut locations = PseudoLocations::default();
    let levels = [
        CssLevel::Css1,
        CssLevel::Css2,
        CssLevel::Selectors3,
        CssLevel::Selectors4,
        CssLevel::Latest,
    ];
    for level in levels {
        locations.record(level.as_str(), level.definition());
    }
    for module in css_modules() {
        locations.record(module.name, &module.definition);
    }
    locations
});

pub fn pseudo_locations() -> &'static PseudoLocations {
    &LOCATIONS
}
