//! Boss roster loader.
//!
//! The world generator rolls every boss once per epoch and writes the result
//! as RON. Mechanics keep the generator's dual shape: a single identifier for
//! floor bosses, a list for the Warden and the Raid Boss.

use std::path::Path;

use anyhow::{Context, bail, ensure};
use boss_core::{
    Boss, BossArena, BossId, BossRole, CombatStats, MechanicSet, RoomId,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Which kind of encounter a roster entry describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossRoleSpec {
    Floor,
    Warden,
    Raid,
}

/// One boss as written by the generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossSpec {
    pub id: u32,
    pub name: String,
    pub room: u32,
    pub floor: u32,
    pub role: BossRoleSpec,
    /// Pre-rolled max HP. Ignored for the Raid Boss, which scales at activation.
    #[serde(default)]
    pub hp_max: u32,
    pub mechanics: MechanicSet,
    #[serde(default)]
    pub pow: u32,
    #[serde(default)]
    pub def: u32,
    #[serde(default)]
    pub spd: u32,
    /// Defaults to the floor number, capped at 5.
    #[serde(default)]
    pub tier: Option<u32>,
}

/// Whole roster file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSpec {
    /// Seed for the arena's deterministic RNG draws (relocation).
    pub seed: u64,
    pub bosses: Vec<BossSpec>,
}

impl BossSpec {
    fn check(&self) -> LoadResult<()> {
        let count = self.mechanics.len();
        match self.role {
            BossRoleSpec::Floor => ensure!(
                count == 1,
                "floor boss '{}' must roll exactly one mechanic, got {count}",
                self.name
            ),
            BossRoleSpec::Warden => ensure!(
                count == 2,
                "Warden '{}' must roll exactly two mechanics, got {count}",
                self.name
            ),
            BossRoleSpec::Raid => ensure!(
                count >= 1,
                "raid boss '{}' must roll at least one mechanic",
                self.name
            ),
        }
        if self.role != BossRoleSpec::Raid {
            ensure!(self.hp_max > 0, "boss '{}' needs a positive hp_max", self.name);
        }
        Ok(())
    }

    /// Builds the arena record. Raid bosses start dormant.
    pub fn into_boss(self) -> LoadResult<Boss> {
        self.check()?;
        let id = BossId(self.id);
        let room = RoomId(self.room);
        let stats = CombatStats::new(self.pow, self.def, self.spd);

        let mut boss = match self.role {
            BossRoleSpec::Raid => Boss::dormant_raid(id, self.name, room, self.floor, self.mechanics),
            BossRoleSpec::Floor => {
                Boss::new(id, self.name, room, self.floor, self.hp_max, self.mechanics)
            }
            BossRoleSpec::Warden => {
                Boss::new(id, self.name, room, self.floor, self.hp_max, self.mechanics)
                    .with_role(BossRole::FLOOR_BOSS | BossRole::WARDEN)
            }
        }
        .with_stats(stats);
        if let Some(tier) = self.tier {
            boss = boss.with_tier(tier);
        }
        Ok(boss)
    }
}

/// Loader for boss rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<BossArena> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid roster {}", path.display()))
    }

    /// Parses RON roster text into a fresh arena.
    ///
    /// At most one Raid Boss is allowed per epoch.
    pub fn parse(content: &str) -> LoadResult<BossArena> {
        let roster: RosterSpec = ron::from_str(content).context("Failed to parse roster RON")?;
        Self::build(roster)
    }

    pub fn build(roster: RosterSpec) -> LoadResult<BossArena> {
        let raids = roster
            .bosses
            .iter()
            .filter(|spec| spec.role == BossRoleSpec::Raid)
            .count();
        if raids > 1 {
            bail!("roster declares {raids} raid bosses; at most one is allowed");
        }

        let mut arena = BossArena::new(roster.seed);
        for spec in roster.bosses {
            let name = spec.name.clone();
            let boss = spec
                .into_boss()
                .with_context(|| format!("Invalid roster entry '{name}'"))?;
            arena
                .insert_boss(boss)
                .with_context(|| format!("Failed to place boss '{name}'"))?;
        }
        Ok(arena)
    }

    /// The Warden must sit on the configured final floor.
    pub fn check_final_floor(arena: &BossArena, final_floor: u32) -> LoadResult<()> {
        for warden in arena.bosses().filter(|boss| boss.is_warden()) {
            ensure!(
                warden.floor == final_floor,
                "Warden '{}' is on floor {}, but the final floor is {final_floor}",
                warden.name,
                warden.floor
            );
        }
        Ok(())
    }
}
