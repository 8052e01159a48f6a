//! Move set assembly

use crate::catalog::WeightTable;
use crate::error::{BuildError, Result};
use crate::picker::pick;
use crate::random::RandomSource;
use crate::resolver::ResolveOptions;
use smallvec::SmallVec;
use tracing::warn;

/// Number of moves in a finished set
pub const MOVESET_SIZE: usize = 4;

/// Weight sentinel marking a move that is always included
pub const FORCED_WEIGHT: f64 = 1.0;

/// Exactly four distinct move names
pub type MoveSet = SmallVec<[String; MOVESET_SIZE]>;

/// Assemble four moves from a move pool
///
/// Forced moves are taken first in declaration order, then the remaining
/// slots are filled by weighted draws without replacement. Forced moves past
/// the fourth are dropped.
///
/// Each draw is a plain `[0, 1)` roll against the remaining weights, so a
/// pool whose leftover weights no longer reach the roll fails with
/// `MoveSelectionFailed`. With `normalize_weights` the roll is scaled by the
/// remaining total instead.
pub fn assemble<R>(moves: &WeightTable, options: ResolveOptions, rng: &mut R) -> Result<MoveSet>
where
    R: RandomSource + ?Sized,
{
    let mut selected = MoveSet::new();
    let mut remaining = WeightTable::new();
    let mut dropped = 0usize;

    for (name, weight) in moves.iter() {
        if weight == FORCED_WEIGHT {
            if selected.len() < MOVESET_SIZE {
                selected.push(name.to_string());
            } else {
                dropped += 1;
            }
        } else {
            remaining.insert(name, weight);
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = ?selected, "more than 4 forced moves, keeping the first 4");
    }

    let forced = selected.len();
    if forced + remaining.len() < MOVESET_SIZE {
        return Err(BuildError::InsufficientMoves {
            forced,
            available: remaining.len(),
        });
    }

    while selected.len() < MOVESET_SIZE {
        // Re-summed per draw so the scale matches the scan's cumulative sum exactly
        let scale = options.scale(remaining.total());
        let next = pick(&remaining, scale, "moves", rng)?
            .ok_or(BuildError::MoveSelectionFailed {
                remaining: remaining.len(),
            })?
            .to_string();

        remaining.remove(&next);
        selected.push(next);
    }

    Ok(selected)
}
