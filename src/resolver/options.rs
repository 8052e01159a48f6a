//! Resolver configuration

use serde::Deserialize;

/// Options controlling how weight tables are sampled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Scale role, ability, item and tera rolls by the table total
    ///
    /// Off by default: a table whose weights sum below 1 can then come up
    /// empty, which surfaces as no role (`None`) or a `NoSelection` error.
    /// The move pool always scales by its remaining total.
    pub normalize_weights: bool,
}

impl ResolveOptions {
    /// Roll scale for a table with the given total weight
    #[inline]
    pub fn scale(&self, total: f64) -> f64 {
        if self.normalize_weights {
            total
        } else {
            1.0
        }
    }
}
