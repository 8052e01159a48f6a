//! Main build resolver

use crate::catalog::{Catalog, RoleSet, SpeciesEntry, StatSpread, WeightTable};
use crate::error::{BuildError, Result};
use crate::moveset::assemble;
use crate::picker::{pick, select_by_roll};
use crate::random::RandomSource;
use tracing::debug;

use super::{ResolveOptions, ResolvedBuild};

/// Resolves random builds against a loaded catalog
#[derive(Debug, Clone, Default)]
pub struct BuildResolver {
    catalog: Catalog,
    options: ResolveOptions,
}

impl BuildResolver {
    pub fn new(catalog: Catalog, options: ResolveOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve a random build for `species`
    ///
    /// `Ok(None)` when the species is unknown or no role was selected.
    pub fn resolve<R>(&self, species: &str, rng: &mut R) -> Result<Option<ResolvedBuild>>
    where
        R: RandomSource + ?Sized,
    {
        resolve_with(&self.catalog, species, self.options, rng)
    }
}

/// Resolve a random build with default options
#[inline]
pub fn resolve<R>(catalog: &Catalog, species: &str, rng: &mut R) -> Result<Option<ResolvedBuild>>
where
    R: RandomSource + ?Sized,
{
    resolve_with(catalog, species, ResolveOptions::default(), rng)
}

/// Resolve a random build for `species` from `catalog`
pub fn resolve_with<R>(
    catalog: &Catalog,
    species: &str,
    options: ResolveOptions,
    rng: &mut R,
) -> Result<Option<ResolvedBuild>>
where
    R: RandomSource + ?Sized,
{
    let entry = match catalog.get(species) {
        Some(entry) => entry,
        None => {
            debug!(species, "species not in catalog");
            return Ok(None);
        }
    };

    let (role_name, role) = match select_role(entry, options, rng) {
        Some(selected) => selected,
        None => {
            debug!(species, "role roll exceeded total role weight");
            return Ok(None);
        }
    };
    debug!(species, role = role_name, "role selected");

    let build = resolve_role(role_name, role, entry.level, options, rng)
        .map_err(|e| e.in_role(species, role_name))?;

    debug!(
        species,
        role = role_name,
        ability = %build.ability,
        item = %build.item,
        tera = %build.tera,
        "build resolved"
    );
    Ok(Some(build))
}

/// Pick a role by a cumulative scan over role weights
fn select_role<'a, R>(
    entry: &'a SpeciesEntry,
    options: ResolveOptions,
    rng: &mut R,
) -> Option<(&'a str, &'a RoleSet)>
where
    R: RandomSource + ?Sized,
{
    let roll = rng.next_f64() * options.scale(entry.total_role_weight());
    select_by_roll(entry.roles.iter().map(|(_, role)| role.weight), roll)
        .map(|index| {
            let (name, role) = &entry.roles[index];
            (name.as_str(), role)
        })
}

/// Resolve every weighted choice of a selected role
fn resolve_role<R>(
    role_name: &str,
    role: &RoleSet,
    level: u32,
    options: ResolveOptions,
    rng: &mut R,
) -> Result<ResolvedBuild>
where
    R: RandomSource + ?Sized,
{
    let ability = pick_required(&role.abilities, "abilities", options, rng)?;
    let item = pick_required(&role.items, "items", options, rng)?;
    let tera = pick_required(&role.tera_types, "teraTypes", options, rng)?;

    let evs = StatSpread::default_evs().merged(&role.evs);
    let ivs = StatSpread::default_ivs().merged(&role.ivs);

    let moves = assemble(&role.moves, options, rng)?;

    Ok(ResolvedBuild {
        name: role_name.to_string(),
        level,
        ability,
        item,
        tera,
        evs,
        ivs,
        moves,
    })
}

/// One independent draw that must produce a value
fn pick_required<R>(
    table: &WeightTable,
    field: &'static str,
    options: ResolveOptions,
    rng: &mut R,
) -> Result<String>
where
    R: RandomSource + ?Sized,
{
    pick(table, options.scale(table.total()), field, rng)?
        .map(str::to_string)
        .ok_or(BuildError::NoSelection { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRolls;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PIKACHU: &str = r#"{
        "Pikachu": {
            "level": 100,
            "roles": {
                "Attacker": {
                    "weight": 1,
                    "abilities": {"Static": 1},
                    "items": {"Light Ball": 1},
                    "teraTypes": {"Electric": 1},
                    "moves": {"Thunderbolt": 1, "Volt Tackle": 1, "Iron Tail": 1, "Knock Off": 1},
                    "evs": {},
                    "ivs": {}
                }
            }
        }
    }"#;

    const GHOLDENGO: &str = r#"{
        "Gholdengo": {
            "level": 76,
            "roles": {
                "Bulky Attacker": {
                    "weight": 0.5,
                    "abilities": {"Good as Gold": 1},
                    "items": {"Leftovers": 0.6, "Choice Scarf": 0.4},
                    "teraTypes": {"Fighting": 0.3, "Steel": 0.3, "Water": 0.4},
                    "moves": {"Make It Rain": 1, "Shadow Ball": 1, "Nasty Plot": 0.6, "Recover": 0.8, "Focus Blast": 0.3, "Trick": 0.3},
                    "evs": {"atk": 0},
                    "ivs": {"atk": 0}
                },
                "Fast Attacker": {
                    "weight": 0.3,
                    "abilities": {"Good as Gold": 1},
                    "items": {"Choice Specs": 1},
                    "teraTypes": {"Ghost": 0.5, "Steel": 0.5},
                    "moves": {"Make It Rain": 1, "Shadow Ball": 1, "Focus Blast": 0.5, "Trick": 0.5, "Thunderbolt": 0.5}
                }
            }
        }
    }"#;

    #[test]
    fn test_pikachu_all_forced() {
        let catalog = Catalog::from_json_str(PIKACHU).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let build = resolve(&catalog, "Pikachu", &mut rng).unwrap().unwrap();

        assert_eq!(build.name, "Attacker");
        assert_eq!(build.level, 100);
        assert_eq!(build.ability, "Static");
        assert_eq!(build.item, "Light Ball");
        assert_eq!(build.tera, "Electric");
        assert_eq!(build.evs, StatSpread::uniform(85));
        assert_eq!(build.ivs, StatSpread::uniform(31));

        let mut moves: Vec<&str> = build.moves.iter().map(String::as_str).collect();
        moves.sort_unstable();
        assert_eq!(moves, vec!["Iron Tail", "Knock Off", "Thunderbolt", "Volt Tackle"]);
    }

    #[test]
    fn test_missing_species() {
        let catalog = Catalog::from_json_str(PIKACHU).unwrap();
        let mut rng = FixedRolls::new(vec![0.1]);
        assert!(resolve(&catalog, "Missingno", &mut rng).unwrap().is_none());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_empty_catalog() {
        let mut rng = FixedRolls::new(vec![0.1]);
        assert!(resolve(&Catalog::default(), "Pikachu", &mut rng).unwrap().is_none());
    }

    #[test]
    fn test_single_full_weight_role_always_selected() {
        let catalog = Catalog::from_json_str(PIKACHU).unwrap();
        for roll in [0.0, 0.25, 0.5, 0.999_999] {
            let mut rng = FixedRolls::new(vec![roll]);
            let build = resolve(&catalog, "Pikachu", &mut rng).unwrap();
            assert_eq!(build.map(|b| b.name), Some("Attacker".to_string()));
        }
    }

    #[test]
    fn test_role_under_sum_returns_none() {
        // Role weights sum to 0.8; a role roll of 0.9 selects nothing
        let catalog = Catalog::from_json_str(GHOLDENGO).unwrap();
        let mut rng = FixedRolls::new(vec![0.9]);
        assert!(resolve(&catalog, "Gholdengo", &mut rng).unwrap().is_none());
    }

    #[test]
    fn test_role_under_sum_normalized() {
        let catalog = Catalog::from_json_str(GHOLDENGO).unwrap();
        let options = ResolveOptions {
            normalize_weights: true,
        };
        // 0.9 * 0.8 = 0.72 lands in "Fast Attacker"
        let mut rng = FixedRolls::new(vec![0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let build = resolve_with(&catalog, "Gholdengo", options, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(build.name, "Fast Attacker");
        assert_eq!(build.item, "Choice Specs");
    }

    #[test]
    fn test_scripted_rolls() {
        let catalog = Catalog::from_json_str(GHOLDENGO).unwrap();
        // role, ability, item, tera, then two move draws
        let mut rng = FixedRolls::new(vec![0.2, 0.5, 0.7, 0.65, 0.0, 0.0]);
        let build = resolve(&catalog, "Gholdengo", &mut rng).unwrap().unwrap();

        assert_eq!(build.name, "Bulky Attacker");
        assert_eq!(build.ability, "Good as Gold");
        assert_eq!(build.item, "Choice Scarf");
        assert_eq!(build.tera, "Water");
        assert_eq!(build.evs.to_array(), [85, 0, 85, 85, 85, 85]);
        assert_eq!(build.ivs.to_array(), [31, 0, 31, 31, 31, 31]);
        assert_eq!(
            build.moves.as_slice(),
            ["Make It Rain", "Shadow Ball", "Nasty Plot", "Recover"]
        );
        assert_eq!(rng.consumed(), 6);
    }

    #[test]
    fn test_same_rolls_same_build() {
        let catalog = Catalog::from_json_str(GHOLDENGO).unwrap();
        let rolls = vec![0.41, 0.13, 0.77, 0.52, 0.91, 0.05, 0.33];
        let first = resolve(&catalog, "Gholdengo", &mut FixedRolls::new(rolls.clone())).unwrap();
        let second = resolve(&catalog, "Gholdengo", &mut FixedRolls::new(rolls)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolver_struct_uses_options() {
        let catalog = Catalog::from_json_str(GHOLDENGO).unwrap();
        let resolver = BuildResolver::new(
            catalog,
            ResolveOptions {
                normalize_weights: true,
            },
        );
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(resolver.resolve("Gholdengo", &mut rng).unwrap().is_some());
        }
    }

    #[test]
    fn test_under_sum_ability_is_error_with_context() {
        let catalog = Catalog::from_json_str(
            r#"{"Ditto": {"level": 88, "roles": {"Scarf": {
                "weight": 1,
                "abilities": {"Imposter": 0.5},
                "items": {"Choice Scarf": 1},
                "teraTypes": {"Normal": 1},
                "moves": {"Transform": 1, "A": 0.5, "B": 0.5, "C": 0.5}
            }}}}"#,
        )
        .unwrap();
        let mut rng = FixedRolls::new(vec![0.1, 0.8]);
        let err = resolve(&catalog, "Ditto", &mut rng).unwrap_err();

        match err {
            BuildError::Role {
                species,
                role,
                source,
            } => {
                assert_eq!(species, "Ditto");
                assert_eq!(role, "Scarf");
                assert!(matches!(*source, BuildError::NoSelection { field: "abilities" }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_short_move_pool_is_error() {
        let catalog = Catalog::from_json_str(
            r#"{"Smeargle": {"level": 95, "roles": {"Lead": {
                "weight": 1,
                "abilities": {"Own Tempo": 1},
                "items": {"Focus Sash": 1},
                "teraTypes": {"Ghost": 1},
                "moves": {"Spore": 1, "Sticky Web": 1}
            }}}}"#,
        )
        .unwrap();
        let mut rng = FixedRolls::new(vec![0.5]);
        let err = resolve(&catalog, "Smeargle", &mut rng).unwrap_err();
        assert!(err.to_string().starts_with("Smeargle (Lead): Move pool exhausted"));
    }

    #[test]
    fn test_move_draw_miss_is_error_with_context() {
        let catalog = Catalog::from_json_str(
            r#"{"Slaking": {"level": 83, "roles": {"Choice Item user": {
                "weight": 1,
                "abilities": {"Truant": 1},
                "items": {"Choice Band": 1},
                "teraTypes": {"Normal": 1},
                "moves": {"Body Slam": 0.3, "Giga Impact": 0.3, "Knock Off": 0.3, "Earthquake": 0.3}
            }}}}"#,
        )
        .unwrap();
        // role, ability, item, tera, then three moves land and the fourth misses
        let mut rng = FixedRolls::new(vec![0.5]);
        let err = resolve(&catalog, "Slaking", &mut rng).unwrap_err();

        match err {
            BuildError::Role {
                species,
                role,
                source,
            } => {
                assert_eq!(species, "Slaking");
                assert_eq!(role, "Choice Item user");
                assert!(matches!(
                    *source,
                    BuildError::MoveSelectionFailed { remaining: 1 }
                ));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(rng.consumed(), 8);

        let options = ResolveOptions {
            normalize_weights: true,
        };
        let mut rng = FixedRolls::new(vec![0.5]);
        let build = resolve_with(&catalog, "Slaking", options, &mut rng).unwrap();
        assert_eq!(build.map(|b| b.moves.len()), Some(4));
    }
}
