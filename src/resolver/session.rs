//! BuildSession - Python handle on a resolved build
//!
//! Holds the resolved build in Rust memory together with its pre-rendered
//! team-sheet text, so the host can display it without re-formatting.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::catalog::{Stat, StatSpread};

use super::ResolvedBuild;

#[pyclass]
pub struct BuildSession {
    species: String,
    build: ResolvedBuild,
    /// Pre-rendered team-sheet text
    paste: String,
}

impl BuildSession {
    pub fn new(species: impl Into<String>, build: ResolvedBuild) -> Self {
        let species = species.into();
        let paste = build.to_paste(&species);
        Self {
            species,
            build,
            paste,
        }
    }

    pub fn build(&self) -> &ResolvedBuild {
        &self.build
    }
}

fn spread_to_dict<'py>(py: Python<'py>, spread: &StatSpread) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for stat in Stat::ALL {
        dict.set_item(stat.key(), spread.get(stat))?;
    }
    Ok(dict)
}

// ============================================================================
// PyMethods Implementation
// ============================================================================

#[pymethods]
impl BuildSession {
    #[getter]
    fn species(&self) -> &str {
        &self.species
    }

    /// Role the build was drawn from
    #[getter]
    fn name(&self) -> &str {
        &self.build.name
    }

    #[getter]
    fn level(&self) -> u32 {
        self.build.level
    }

    #[getter]
    fn ability(&self) -> &str {
        &self.build.ability
    }

    #[getter]
    fn item(&self) -> &str {
        &self.build.item
    }

    #[getter]
    fn tera(&self) -> &str {
        &self.build.tera
    }

    #[getter]
    fn moves(&self) -> Vec<String> {
        self.build.moves.to_vec()
    }

    #[getter]
    fn evs(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        Ok(spread_to_dict(py, &self.build.evs)?.into())
    }

    #[getter]
    fn ivs(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        Ok(spread_to_dict(py, &self.build.ivs)?.into())
    }

    /// Team-sheet text, e.g. "Pikachu @ Light Ball\nAbility: Static\n..."
    fn to_paste(&self) -> &str {
        &self.paste
    }

    /// Get the whole build as a dict
    fn to_dict(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let dict = PyDict::new(py);
        dict.set_item("species", &self.species)?;
        dict.set_item("name", &self.build.name)?;
        dict.set_item("level", self.build.level)?;
        dict.set_item("ability", &self.build.ability)?;
        dict.set_item("item", &self.build.item)?;
        dict.set_item("tera", &self.build.tera)?;
        dict.set_item("evs", spread_to_dict(py, &self.build.evs)?)?;
        dict.set_item("ivs", spread_to_dict(py, &self.build.ivs)?)?;
        dict.set_item("moves", PyList::new(py, self.build.moves.iter())?)?;
        Ok(dict.into())
    }

    fn __repr__(&self) -> String {
        format!(
            "BuildSession(species={:?}, role={:?}, moves={:?})",
            self.species,
            self.build.name,
            self.build.moves.as_slice()
        )
    }
}
