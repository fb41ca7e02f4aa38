//! Declarative TOML catalog definitions, user-extensible without recompiling.
//!
//! ```toml
//! [[features]]
//! id = "es.array.group-by"
//! kind = "static-member"
//! owner = "Object"
//! member = "groupBy"
//!
//! [[features]]
//! id = "es.aggregate-error.cause"
//! kind = "call"
//! name = "AggregateError"
//! argument_count = 3
//!
//! [aliases]
//! "es.object" = ["es.object.assign", "es.object.keys"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use polytrim_core::errors::CatalogError;
use serde::{Deserialize, Serialize};

use super::aliases::AliasTable;
use super::rules::{ArgumentPredicate, CatalogEntry, Rule};

/// A TOML-defined catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlFeatureDef {
    pub id: String,
    pub kind: String,
    /// Global name, method/property name, or callee name.
    pub name: Option<String>,
    pub owner: Option<String>,
    pub member: Option<String>,
    pub argument_count: Option<usize>,
    pub min_arguments: Option<usize>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TomlCatalogFile {
    #[serde(default)]
    pub features: Vec<TomlFeatureDef>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

/// Compiled contents of one catalog file.
#[derive(Debug, Clone, Default)]
pub struct CatalogFile {
    pub entries: Vec<CatalogEntry>,
    pub aliases: AliasTable,
}

/// Loader for TOML catalog definitions.
pub struct TomlCatalogLoader;

impl TomlCatalogLoader {
    pub fn load_from_str(toml_str: &str) -> Result<CatalogFile, CatalogError> {
        let file: TomlCatalogFile = toml::from_str(toml_str)
            .map_err(|e| CatalogError::InvalidDefinition(format!("TOML parse error: {e}")))?;

        let mut entries = Vec::with_capacity(file.features.len());
        for def in file.features {
            if def.enabled == Some(false) {
                continue;
            }
            entries.push(Self::compile(def)?);
        }

        let mut aliases = AliasTable::default();
        for (alias, targets) in file.aliases {
            if targets.is_empty() {
                return Err(CatalogError::InvalidDefinition(format!(
                    "alias '{alias}' has no targets"
                )));
            }
            aliases.insert(alias, targets.into_iter().map(Into::into).collect());
        }

        tracing::debug!(
            entries = entries.len(),
            aliases = aliases.len(),
            "loaded catalog definitions"
        );
        Ok(CatalogFile { entries, aliases })
    }

    pub fn load_from_file(path: &Path) -> Result<CatalogFile, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::InvalidDefinition(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::load_from_str(&content)
    }

    fn compile(def: TomlFeatureDef) -> Result<CatalogEntry, CatalogError> {
        let required = |value: Option<String>, field: &str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CatalogError::MissingField {
                    id: def.id.clone(),
                    field: field.to_string(),
                })
        };

        let rule = match def.kind.trim().to_ascii_lowercase().as_str() {
            "global" => Rule::Global(required(def.name.clone(), "name")?),
            "static-member" | "static_member" | "member" => Rule::StaticMember {
                owner: required(def.owner.clone(), "owner")?,
                member: required(def.member.clone(), "member")?,
            },
            "method" | "generic-method" => Rule::GenericMethod(required(def.name.clone(), "name")?),
            "property" | "generic-property" => {
                Rule::GenericProperty(required(def.name.clone(), "name")?)
            }
            "call" | "predicate-call" => {
                let predicate = match (def.argument_count, def.min_arguments) {
                    (Some(n), None) => ArgumentPredicate::Exactly(n),
                    (None, Some(n)) => ArgumentPredicate::AtLeast(n),
                    (Some(_), Some(_)) => {
                        return Err(CatalogError::InvalidDefinition(format!(
                            "feature '{}' sets both argument_count and min_arguments",
                            def.id
                        )))
                    }
                    (None, None) => {
                        return Err(CatalogError::MissingField {
                            id: def.id.clone(),
                            field: "argument_count".to_string(),
                        })
                    }
                };
                Rule::PredicateCall {
                    callee: required(def.name.clone(), "name")?,
                    predicate,
                }
            }
            _ => {
                return Err(CatalogError::UnknownRuleKind {
                    id: def.id.clone(),
                    kind: def.kind.clone(),
                })
            }
        };

        if def.id.trim().is_empty() {
            return Err(CatalogError::InvalidDefinition(
                "feature id must not be empty".to_string(),
            ));
        }
        Ok(CatalogEntry::new(def.id, rule))
    }
}
