//! Stat spreads (EVs / IVs) and their per-role overrides

use serde::{Deserialize, Serialize};

/// Default effort value per stat
pub const DEFAULT_EV: i32 = 85;
/// Default innate value per stat
pub const DEFAULT_IV: i32 = 31;

/// The six battle stats, in team-sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    /// Catalog key, e.g. "spa"
    pub fn key(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
        }
    }

    /// Team-sheet label, e.g. "SpA"
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Atk",
            Stat::Def => "Def",
            Stat::Spa => "SpA",
            Stat::Spd => "SpD",
            Stat::Spe => "Spe",
        }
    }

    pub fn from_key(key: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Partial stat mapping; unset stats fall back to the default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatOverrides {
    pub hp: Option<i32>,
    pub atk: Option<i32>,
    pub def: Option<i32>,
    pub spa: Option<i32>,
    pub spd: Option<i32>,
    pub spe: Option<i32>,
}

impl StatOverrides {
    pub fn get(&self, stat: Stat) -> Option<i32> {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        let slot = match stat {
            Stat::Hp => &mut self.hp,
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spa => &mut self.spa,
            Stat::Spd => &mut self.spd,
            Stat::Spe => &mut self.spe,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        Stat::ALL.iter().all(|s| self.get(*s).is_none())
    }
}

/// Complete six-stat vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSpread {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
}

impl StatSpread {
    /// Same value for every stat
    pub const fn uniform(value: i32) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    /// Default effort values: 85 everywhere
    pub const fn default_evs() -> Self {
        Self::uniform(DEFAULT_EV)
    }

    /// Default innate values: 31 everywhere
    pub const fn default_ivs() -> Self {
        Self::uniform(DEFAULT_IV)
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    /// Overridden stats replace the base value, the rest are kept
    pub fn merged(self, overrides: &StatOverrides) -> Self {
        Self {
            hp: overrides.hp.unwrap_or(self.hp),
            atk: overrides.atk.unwrap_or(self.atk),
            def: overrides.def.unwrap_or(self.def),
            spa: overrides.spa.unwrap_or(self.spa),
            spd: overrides.spd.unwrap_or(self.spd),
            spe: overrides.spe.unwrap_or(self.spe),
        }
    }

    /// Values in team-sheet order
    pub fn to_array(&self) -> [i32; 6] {
        Stat::ALL.map(|s| self.get(s))
    }
}
