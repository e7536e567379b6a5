//! Grammar configuration for the selector parser.
//!
//! A [`SyntaxDefinition`] is a plain value describing which selector atoms
//! are permitted. Definitions are assembled from named presets
//! ([`CssLevel`]), optional module fragments ([`CssModule`]) and ad-hoc
//! overrides, combined with [`extend_syntax_definition`].
//!
//! Every section mirrors the camelCase JSON shape used by syntax files, so a
//! definition can be loaded directly:
//!
//! ```rust
//! use cssel::syntax::{Section, SyntaxDefinition, UnknownPolicy};
//!
//! let def = SyntaxDefinition::from_json_str(
//!     r#"{"baseSyntax": "css2", "pseudoClasses": {"unknown": "accept"}, "attributes": false}"#,
//! ).unwrap();
//! assert_eq!(def.attributes, Section::Disabled);
//! let classes = def.pseudo_classes.options().unwrap();
//! assert_eq!(classes.unknown, Some(UnknownPolicy::Accept));
//! ```

// ============================================================================
// IMPORTS
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::errors::ConfigError;

pub mod extend;
pub mod levels;
pub mod modules;

pub use extend::extend_syntax_definition;
pub use levels::CssLevel;
pub use modules::{css_module, css_modules, pseudo_locations, CssModule, PseudoLocations};

// ============================================================================
// SECTIONS
// ============================================================================

/// A capability that can be left alone, switched off, or configured.
///
/// In syntax files `false` maps to [`Section::Disabled`], `true` to the
/// section's flag defaults and an object to [`Section::Enabled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<T> {
    Unspecified,
    Disabled,
    Enabled(T),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Unspecified
    }
}

impl<T> Section<T> {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Section::Unspecified)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Section::Enabled(_))
    }

    pub fn options(&self) -> Option<&T> {
        match self {
            Section::Enabled(options) => Some(options),
            _ => None,
        }
    }
}

/// Options types that may appear inside a [`Section`].
pub trait SectionOptions: Default {
    /// Value used when a section is written as a bare `true`.
    fn enabled_by_flag() -> Self {
        Self::default()
    }
}

impl<'de, T> Deserialize<'de> for Section<T>
where
    T: SectionOptions + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<O> {
            Flag(bool),
            Options(O),
        }

        Ok(match Option::<Raw<T>>::deserialize(deserializer)? {
            None => Section::Unspecified,
            Some(Raw::Flag(false)) => Section::Disabled,
            Some(Raw::Flag(true)) => Section::Enabled(T::enabled_by_flag()),
            Some(Raw::Options(options)) => Section::Enabled(options),
        })
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Section::Unspecified => serializer.serialize_none(),
            Section::Disabled => serializer.serialize_bool(false),
            Section::Enabled(options) => options.serialize(serializer),
        }
    }
}

// ============================================================================
// SECTION OPTIONS
// ============================================================================

/// Options for `tag` and `namespace`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<bool>,
}

impl SectionOptions for XmlOptions {
    fn enabled_by_flag() -> Self {
        XmlOptions {
            wildcard: Some(true),
        }
    }
}

/// How names missing from the definitions are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    Accept,
    Reject,
}

/// Accepted pseudo-element prefixes. Absent means double colon only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    SingleColon,
    DoubleColon,
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributesDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitivity_modifiers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_case_sensitivity_modifiers: Option<UnknownPolicy>,
}

impl SectionOptions for AttributesDefinition {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PseudoClassesDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<UnknownPolicy>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "definitions::serialize",
        deserialize_with = "definitions::deserialize"
    )]
    pub definitions: Option<PseudoDefinitions>,
}

impl SectionOptions for PseudoClassesDefinition {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PseudoElementsDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<UnknownPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<Notation>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "definitions::serialize",
        deserialize_with = "definitions::deserialize"
    )]
    pub definitions: Option<PseudoDefinitions>,
}

impl SectionOptions for PseudoElementsDefinition {}

// ============================================================================
// PSEUDO DEFINITIONS
// ============================================================================

/// Argument category a pseudo name is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PseudoCategory {
    NoArgument,
    String,
    Selector,
    Formula,
    FormulaOfSelector,
}

/// Names per argument category. A `None` entry removes that category when
/// used as an extension.
pub type PseudoDefinitions = BTreeMap<PseudoCategory, Option<Vec<String>>>;

/// Builds [`PseudoDefinitions`] from static name lists.
pub fn pseudo_definitions<'a, I>(entries: I) -> PseudoDefinitions
where
    I: IntoIterator<Item = (PseudoCategory, &'a [&'a str])>,
{
    entries
        .into_iter()
        .map(|(category, names)| {
            let names = names.iter().map(|name| name.to_string()).collect();
            (category, Some(names))
        })
        .collect()
}

// Definitions accept a plain name list (all `NoArgument`) or a category map
// whose values are name lists or `false`.
mod definitions {
    use super::*;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNames {
        List(Vec<String>),
        Flag(bool),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDefinitions {
        List(Vec<String>),
        Map(BTreeMap<PseudoCategory, Option<RawNames>>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PseudoDefinitions>, D::Error> {
        let raw = match Option::<RawDefinitions>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let definitions = match raw {
            RawDefinitions::List(names) => {
                BTreeMap::from([(PseudoCategory::NoArgument, Some(names))])
            }
            RawDefinitions::Map(map) => {
                let mut definitions = PseudoDefinitions::new();
                for (category, names) in map {
                    let names = match names {
                        Some(RawNames::List(names)) => Some(names),
                        None | Some(RawNames::Flag(false)) => None,
                        Some(RawNames::Flag(true)) => {
                            return Err(D::Error::custom(format!(
                                "expected a name list or false for {category:?}"
                            )))
                        }
                    };
                    definitions.insert(category, names);
                }
                definitions
            }
        };
        Ok(Some(definitions))
    }

    pub fn serialize<S: Serializer>(
        definitions: &Option<PseudoDefinitions>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let Some(definitions) = definitions else {
            return serializer.serialize_none();
        };
        let mut map = serializer.serialize_map(Some(definitions.len()))?;
        for (category, names) in definitions {
            match names {
                Some(names) => map.serialize_entry(category, names)?,
                None => map.serialize_entry(category, &false)?,
            }
        }
        map.end()
    }
}

// ============================================================================
// SYNTAX DEFINITION
// ============================================================================

/// Full grammar description. Unset fields mean "inherit" when the definition
/// is used as an extension and "disabled" when it is compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyntaxDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_syntax: Option<CssLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
    #[serde(skip_serializing_if = "Section::is_unspecified")]
    pub tag: Section<XmlOptions>,
    #[serde(skip_serializing_if = "Section::is_unspecified")]
    pub namespace: Section<XmlOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nesting_selector: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combinators: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Section::is_unspecified")]
    pub attributes: Section<AttributesDefinition>,
    #[serde(skip_serializing_if = "Section::is_unspecified")]
    pub pseudo_classes: Section<PseudoClassesDefinition>,
    #[serde(skip_serializing_if = "Section::is_unspecified")]
    pub pseudo_elements: Section<PseudoElementsDefinition>,
}

impl SyntaxDefinition {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// The `syntax` parser option: a preset name or a custom definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyntaxInput {
    Level(CssLevel),
    Definition(SyntaxDefinition),
}

impl Default for SyntaxInput {
    fn default() -> Self {
        SyntaxInput::Level(CssLevel::Latest)
    }
}

impl From<CssLevel> for SyntaxInput {
    fn from(level: CssLevel) -> Self {
        SyntaxInput::Level(level)
    }
}

impl From<SyntaxDefinition> for SyntaxInput {
    fn from(definition: SyntaxDefinition) -> Self {
        SyntaxInput::Definition(definition)
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Produces the final definition a parser is compiled from.
///
/// The base level (if any) is applied first. Then every module named by the
/// definition, followed by `extra_modules`, is layered underneath the
/// accumulated definition, so explicit settings win over module scalars
/// while name lists accumulate.
pub fn resolve_syntax(
    input: &SyntaxInput,
    extra_modules: &[String],
) -> Result<SyntaxDefinition, ConfigError> {
    let mut definition = match input {
        SyntaxInput::Level(level) => level.definition().clone(),
        SyntaxInput::Definition(definition) => definition.clone(),
    };

    if let Some(base) = definition.base_syntax {
        definition = extend_syntax_definition(base.definition(), &definition);
    }

    let module_names: Vec<String> = definition
        .modules
        .iter()
        .chain(extra_modules)
        .cloned()
        .collect();

    for name in &module_names {
        let module = css_module(name).ok_or_else(|| ConfigError::UnknownModule(name.clone()))?;
        debug!(module = %module.name, "layering css module");
        definition = extend_syntax_definition(&module.definition, &definition);
    }

    Ok(definition)
}
