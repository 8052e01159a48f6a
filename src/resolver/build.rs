//! Resolved build structure and team-sheet rendering

use crate::catalog::{Stat, StatSpread};
use crate::moveset::MoveSet;
use serde::Serialize;
use std::fmt::Write;

/// A concrete build resolved from one role of a species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBuild {
    /// Role name the build was drawn from
    pub name: String,
    pub level: u32,
    pub ability: String,
    pub item: String,
    pub tera: String,
    pub evs: StatSpread,
    pub ivs: StatSpread,
    pub moves: MoveSet,
}

impl ResolvedBuild {
    /// Render as an importable team-sheet block
    ///
    /// ```text
    /// Pikachu @ Light Ball
    /// Ability: Static
    /// Tera Type: Electric
    /// EVs: 85 HP / 85 Atk / 85 Def / 85 SpA / 85 SpD / 85 Spe
    /// Serious Nature
    /// IVs: 31 HP / 31 Atk / 31 Def / 31 SpA / 31 SpD / 31 Spe
    /// - Thunderbolt
    /// ```
    pub fn to_paste(&self, species: &str) -> String {
        let mut out = String::with_capacity(256);
        // Writing into a String cannot fail
        let _ = writeln!(out, "{} @ {}", species, self.item);
        let _ = writeln!(out, "Ability: {}", self.ability);
        let _ = writeln!(out, "Tera Type: {}", self.tera);
        let _ = writeln!(out, "EVs: {}", render_spread(&self.evs));
        out.push_str("Serious Nature\n");
        let _ = writeln!(out, "IVs: {}", render_spread(&self.ivs));
        for name in &self.moves {
            let _ = writeln!(out, "- {}", name);
        }
        out
    }
}

/// "85 HP / 252 Atk / ..." in team-sheet order
pub fn render_spread(spread: &StatSpread) -> String {
    Stat::ALL
        .iter()
        .map(|stat| format!("{} {}", spread.get(*stat), stat.label()))
        .collect::<Vec<_>>()
        .join(" / ")
}
