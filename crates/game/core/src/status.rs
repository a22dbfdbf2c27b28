//! One-line Raid Boss summary for status displays.

use std::fmt;

use crate::state::BossArena;

/// Snapshot of the Raid Boss for display. Renders via [`fmt::Display`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaidStatus {
    /// No raid boss rolled, or it has not been activated yet.
    Inactive,
    Defeated {
        name: String,
    },
    Active {
        name: String,
        hp: u32,
        hp_max: u32,
        phase: u32,
        pct: u32,
        fighters: usize,
    },
}

impl RaidStatus {
    pub fn of(arena: &BossArena) -> Self {
        let Some(boss) = arena.raid_boss() else {
            return Self::Inactive;
        };
        if boss.is_dormant() {
            return Self::Inactive;
        }
        if !boss.is_alive() {
            return Self::Defeated {
                name: boss.name.clone(),
            };
        }
        Self::Active {
            name: boss.name.clone(),
            hp: boss.hp,
            hp_max: boss.hp_max,
            phase: boss.phase,
            pct: boss.hp_pct(),
            fighters: arena.fighter_count(boss.id),
        }
    }
}

impl fmt::Display for RaidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => f.write_str("No raid boss active."),
            Self::Defeated { name } => write!(f, "The {name} has been defeated!"),
            Self::Active {
                name,
                hp,
                hp_max,
                phase,
                pct,
                fighters,
            } => write!(f, "{name} HP:{hp}/{hp_max} P{phase} {pct}% {fighters} fighters"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DamageBoss, RecordContribution};
    use crate::state::{BossId, PlayerId};
    use crate::test_support::*;

    #[test]
    fn renders_active_raid() {
        let config = config();
        let mut arena = arena_with(active_raid_boss(9, 1500));
        run(&mut arena, &config, DamageBoss::new(BossId(9), 300)).unwrap();
        run(&mut arena, &config, RecordContribution::new(BossId(9), PlayerId(1), 200)).unwrap();
        run(&mut arena, &config, RecordContribution::new(BossId(9), PlayerId(2), 100)).unwrap();

        assert_eq!(
            RaidStatus::of(&arena).to_string(),
            "Hollow King HP:1200/1500 P1 80% 2 fighters"
        );
    }

    #[test]
    fn dormant_and_missing_read_inactive() {
        assert_eq!(
            RaidStatus::of(&BossArena::new(1)).to_string(),
            "No raid boss active."
        );
        assert_eq!(RaidStatus::of(&arena_with(raid_boss(9))), RaidStatus::Inactive);
    }

    #[test]
    fn defeated_raid() {
        let config = config();
        let mut arena = arena_with(active_raid_boss(9, 100));
        run(&mut arena, &config, DamageBoss::new(BossId(9), 100)).unwrap();
        assert_eq!(
            RaidStatus::of(&arena).to_string(),
            "The Hollow King has been defeated!"
        );
    }
}
