//! Weighted random selection

use crate::catalog::WeightTable;
use crate::error::{BuildError, Result};
use crate::random::RandomSource;

/// Return the index of the first entry whose cumulative weight reaches `roll`
///
/// Entries are walked in order and the scan stops at the first match, so
/// declaration order breaks ties. `None` when the weights sum to less than
/// `roll`.
#[inline]
pub fn select_by_roll<I>(weights: I, roll: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut cumulative = 0.0;
    for (index, weight) in weights.into_iter().enumerate() {
        cumulative += weight;
        if roll <= cumulative {
            return Some(index);
        }
    }
    None
}

/// Draw one key from a weight table
///
/// The uniform roll is scaled by `total`. Plain probability tables pass
/// `1.0`; callers that have removed entries pass the remaining sum. `Ok(None)`
/// means the weights did not reach the roll.
pub fn pick<'a, R>(
    table: &'a WeightTable,
    total: f64,
    field: &'static str,
    rng: &mut R,
) -> Result<Option<&'a str>>
where
    R: RandomSource + ?Sized,
{
    if table.is_empty() {
        return Err(BuildError::EmptyWeightTable { field });
    }

    let roll = rng.next_f64() * total;
    Ok(select_by_roll(table.iter().map(|(_, w)| w), roll).map(|i| table.entries()[i].0.as_str()))
}

/// Draw one key from a probability table whose weights sum to 1
#[inline]
pub fn pick_weighted<'a, R>(
    table: &'a WeightTable,
    field: &'static str,
    rng: &mut R,
) -> Result<Option<&'a str>>
where
    R: RandomSource + ?Sized,
{
    pick(table, 1.0, field, rng)
}
