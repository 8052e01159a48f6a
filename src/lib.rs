//! Random Set Core - Weighted random competitive set generator
//!
//! This crate resolves a random build (role, ability, item, tera type, stat
//! spreads and four moves) for a species from a weighted catalog, with
//! Python bindings via PyO3.

use pyo3::prelude::*;

pub mod catalog;
pub mod error;
pub mod moveset;
pub mod picker;
pub mod random;
pub mod resolver;

use crate::catalog::{deserialize_catalog, Catalog};
use crate::error::BuildError;
use crate::resolver::{BuildResolver, BuildSession, ResolveOptions};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::types::PyDict;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

// ============================================================================
// Cached Catalog
// ============================================================================

/// Global cached resolver (catalog + options)
static CACHED_RESOLVER: OnceCell<Arc<RwLock<BuildResolver>>> = OnceCell::new();

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a catalog handed over as either JSON text or a dict
fn load_catalog(catalog: &Bound<'_, PyAny>) -> PyResult<Catalog> {
    if let Ok(text) = catalog.extract::<String>() {
        return Ok(Catalog::from_json_str(&text)?);
    }
    let dict: Bound<'_, PyDict> = catalog.extract().map_err(|_| {
        BuildError::DeserializationError("catalog must be a dict or a JSON string".to_string())
    })?;
    deserialize_catalog(&dict)
}

fn cached_resolver() -> PyResult<Arc<RwLock<BuildResolver>>> {
    CACHED_RESOLVER
        .get()
        .cloned()
        .ok_or_else(|| BuildError::CatalogNotInitialized.into())
}

/// Store `resolver` in `cell`, replacing whatever a previous load left there
///
/// Racing first loads all land: the winner seeds the cell, the others swap in
/// under the write lock.
fn install_resolver(cell: &OnceCell<Arc<RwLock<BuildResolver>>>, resolver: BuildResolver) {
    let mut pending = Some(resolver);
    let shared = cell.get_or_init(|| Arc::new(RwLock::new(pending.take().unwrap_or_default())));
    if let Some(resolver) = pending {
        *shared.write() = resolver;
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Resolve and wrap a build for Python
fn resolve_session(
    resolver: &BuildResolver,
    species: &str,
    seed: Option<u64>,
) -> PyResult<Option<BuildSession>> {
    let mut rng = make_rng(seed);
    let build = resolver.resolve(species, &mut rng)?;
    Ok(build.map(|b| BuildSession::new(species, b)))
}

// ============================================================================
// Python Functions
// ============================================================================

/// Load the species catalog (call once at startup, or again to refresh)
///
/// # Arguments
/// * `catalog` - Catalog as a dict or JSON text: {species: {"level": int, "roles": {...}}}
/// * `normalize_weights` - Scale rolls by table totals so under-summing tables still select
#[pyfunction]
#[pyo3(signature = (catalog, normalize_weights=false))]
fn init_catalog(catalog: &Bound<'_, PyAny>, normalize_weights: bool) -> PyResult<()> {
    let catalog = load_catalog(catalog)?;
    let resolver = BuildResolver::new(catalog, ResolveOptions { normalize_weights });

    install_resolver(&CACHED_RESOLVER, resolver);
    Ok(())
}

/// Check if the catalog is initialized
#[pyfunction]
fn is_catalog_initialized() -> bool {
    CACHED_RESOLVER.get().is_some()
}

/// All species names in catalog order
#[pyfunction]
fn species_names() -> PyResult<Vec<String>> {
    let resolver = cached_resolver()?;
    let guard = resolver.read();
    Ok(guard.catalog().names().map(str::to_string).collect())
}

/// Species names matching a partial query (for autocomplete)
#[pyfunction]
#[pyo3(signature = (query, limit=10))]
fn suggest_species(query: &str, limit: usize) -> PyResult<Vec<String>> {
    let resolver = cached_resolver()?;
    let guard = resolver.read();
    Ok(guard
        .catalog()
        .suggest(query, limit)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Resolve a random set for a species
///
/// # Arguments
/// * `species` - Exact catalog key, e.g. "Pikachu"
/// * `seed` - Optional seed for a reproducible result
///
/// # Returns
/// A BuildSession, or None if the species is unknown or no role was selected
///
/// # Raises
/// RuntimeError if `init_catalog` was not called first,
/// ValueError if the catalog data for the species is malformed
#[pyfunction]
#[pyo3(signature = (species, seed=None))]
fn random_set(species: &str, seed: Option<u64>) -> PyResult<Option<BuildSession>> {
    let resolver = cached_resolver()?;
    let guard = resolver.read();
    resolve_session(&guard, species, seed)
}

/// Resolve a random set asynchronously
///
/// Resolution runs on a Tokio blocking thread so the asyncio loop stays free.
///
/// # Example (Python)
/// ```python
/// session = await random_set_async("Pikachu")
/// print(session.to_paste())
/// ```
#[pyfunction]
#[pyo3(signature = (species, seed=None))]
fn random_set_async<'py>(
    py: Python<'py>,
    species: String,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyAny>> {
    // Get cached resolver before entering async context
    let resolver = cached_resolver()?;

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let session = tokio::task::spawn_blocking(move || {
            let guard = resolver.read();
            resolve_session(&guard, &species, seed)
        })
        .await
        .map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Resolve task panicked: {}",
                e
            ))
        })??;

        Ok(session)
    })
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn random_set_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_catalog, m)?)?;
    m.add_function(wrap_pyfunction!(is_catalog_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(species_names, m)?)?;
    m.add_function(wrap_pyfunction!(suggest_species, m)?)?;
    m.add_function(wrap_pyfunction!(random_set, m)?)?;
    m.add_function(wrap_pyfunction!(random_set_async, m)?)?;
    m.add_class::<BuildSession>()?;
    Ok(())
}
