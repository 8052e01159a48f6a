//! Catalog module for random set data
//!
//! This module holds the species catalog and its loaders: JSON text through
//! serde, or a Python dict handed over by the host application.

mod species;
mod stats;
mod weights;

pub use species::*;
pub use stats::*;
pub use weights::*;

use crate::error::{BuildError, Result};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
use pyo3::Bound;
use regex::Regex;
use serde::{Deserialize, Deserializer};

/// Characters dropped when normalizing a species name into an id
static NON_ID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid id pattern"));

/// Normalize a display name into a lookup id ("Iron Valiant" -> "ironvaliant")
pub fn to_id(name: &str) -> String {
    NON_ID_CHARS
        .replace_all(&name.to_lowercase(), "")
        .into_owned()
}

/// Immutable species catalog
///
/// Species keep their declaration order for listing; lookup goes through a
/// hash index on the exact key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    species: Vec<(String, SpeciesEntry)>,
    index: AHashMap<String, usize>,
}

impl Catalog {
    /// Build from entries in declaration order; a repeated name replaces the earlier entry
    pub fn from_entries(entries: impl IntoIterator<Item = (String, SpeciesEntry)>) -> Self {
        let mut catalog = Catalog::default();
        for (name, entry) in entries {
            match catalog.index.get(&name) {
                Some(&slot) => catalog.species[slot].1 = entry,
                None => {
                    catalog.index.insert(name.clone(), catalog.species.len());
                    catalog.species.push((name, entry));
                }
            }
        }
        catalog
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog from raw JSON bytes
    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Look up a species by its exact key
    #[inline]
    pub fn get(&self, name: &str) -> Option<&SpeciesEntry> {
        self.index.get(name).map(|&slot| &self.species[slot].1)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.species.iter().map(|(name, _)| name.as_str())
    }

    /// Species names matching a partial query, best matches first
    ///
    /// Names whose id starts with the query come first, then names whose id
    /// contains it; both groups keep catalog order.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = to_id(query);
        if needle.is_empty() {
            return self.names().take(limit).collect();
        }

        let mut prefixed = Vec::new();
        let mut contained = Vec::new();
        for name in self.names() {
            let id = to_id(name);
            if id.starts_with(&needle) {
                prefixed.push(name);
            } else if id.contains(&needle) {
                contained.push(name);
            }
        }

        prefixed.extend(contained);
        prefixed.truncate(limit);
        prefixed
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = deserialize_ordered::<D, SpeciesEntry>(deserializer)?;
        Ok(Catalog::from_entries(entries))
    }
}

// ============================================================================
// Python dict deserialization
// ============================================================================

/// Helper to get a required item from a dict
fn get_item<'py>(dict: &Bound<'py, PyDict>, name: &str) -> pyo3::PyResult<Bound<'py, pyo3::PyAny>> {
    dict.get_item(name)?
        .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(name.to_string()))
}

/// Helper to get an optional item, treating `None` as absent
fn get_item_opt<'py>(
    dict: &Bound<'py, PyDict>,
    name: &str,
) -> pyo3::PyResult<Option<Bound<'py, pyo3::PyAny>>> {
    skip_none(dict.get_item(name), |v| v.is_none())
}

/// Drop a present-but-`None` value, keeping lookup errors
fn skip_none<T>(
    lookup: pyo3::PyResult<Option<T>>,
    is_none: impl Fn(&T) -> bool,
) -> pyo3::PyResult<Option<T>> {
    Ok(lookup?.filter(|v| !is_none(v)))
}

/// Deserialize a catalog from a Python dict
/// Expected format: {species: {"level": int, "roles": {role: RoleSet, ...}}, ...}
pub fn deserialize_catalog(dict: &Bound<'_, PyDict>) -> pyo3::PyResult<Catalog> {
    let mut entries = Vec::with_capacity(dict.len());

    for (key, value) in dict.iter() {
        let name: String = key.extract()?;
        let species: Bound<'_, PyDict> = value.extract().map_err(|_| {
            BuildError::DeserializationError(format!("species '{}' is not a dict", name))
        })?;
        entries.push((name, extract_species(&species)?));
    }

    Ok(Catalog::from_entries(entries))
}

fn extract_species(dict: &Bound<'_, PyDict>) -> pyo3::PyResult<SpeciesEntry> {
    let level: u32 = get_item(dict, "level")?.extract()?;
    let roles_dict: Bound<'_, PyDict> = get_item(dict, "roles")?.extract()?;

    let mut roles = Vec::with_capacity(roles_dict.len());
    for (key, value) in roles_dict.iter() {
        let name: String = key.extract()?;
        let role: Bound<'_, PyDict> = value.extract()?;
        roles.push((name, extract_role(&role)?));
    }

    Ok(SpeciesEntry { level, roles })
}

fn extract_role(dict: &Bound<'_, PyDict>) -> pyo3::PyResult<RoleSet> {
    Ok(RoleSet {
        weight: get_item(dict, "weight")?.extract()?,
        abilities: extract_weight_table(&get_item(dict, "abilities")?.extract()?)?,
        items: extract_weight_table(&get_item(dict, "items")?.extract()?)?,
        tera_types: extract_weight_table(&get_item(dict, "teraTypes")?.extract()?)?,
        moves: extract_weight_table(&get_item(dict, "moves")?.extract()?)?,
        evs: extract_overrides(get_item_opt(dict, "evs")?)?,
        ivs: extract_overrides(get_item_opt(dict, "ivs")?)?,
    })
}

fn extract_weight_table(dict: &Bound<'_, PyDict>) -> pyo3::PyResult<WeightTable> {
    let mut table = WeightTable::new();
    for (key, value) in dict.iter() {
        let name: String = key.extract()?;
        let weight: f64 = value.extract()?;
        table.insert(name, weight);
    }
    Ok(table)
}

fn extract_overrides(obj: Option<Bound<'_, pyo3::PyAny>>) -> pyo3::PyResult<StatOverrides> {
    let mut overrides = StatOverrides::default();
    let Some(obj) = obj else {
        return Ok(overrides);
    };

    let dict: Bound<'_, PyDict> = obj.extract()?;
    for (key, value) in dict.iter() {
        let key: String = key.extract()?;
        let stat = Stat::from_key(&key)
            .ok_or_else(|| BuildError::DeserializationError(format!("unknown stat '{}'", key)))?;
        overrides.set(stat, value.extract()?);
    }
    Ok(overrides)
}
