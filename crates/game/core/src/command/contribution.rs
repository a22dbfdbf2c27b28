//! Contribution ledger and engagement gate.

use super::{CommandError, CommandTransition, boss_ref};
use crate::env::EncounterEnv;
use crate::events::{BossEvent, BossEventKind};
use crate::mechanic::MechanicKind;
use crate::state::{BossArena, BossId, PlayerId, Timestamp, format_remaining};

/// Adds damage to a player's running total against a boss.
///
/// With `lockout` in the boss's mechanics the player is locked out for the
/// configured window starting now.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordContribution {
    pub boss: BossId,
    pub player: PlayerId,
    pub damage: u32,
}

impl RecordContribution {
    pub fn new(boss: BossId, player: PlayerId, damage: u32) -> Self {
        Self {
            boss,
            player,
            damage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContributionOutcome {
    pub total_damage: u64,
    pub lockout_until: Option<Timestamp>,
}

impl CommandTransition for RecordContribution {
    type Output = ContributionOutcome;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        boss_ref(arena, self.boss).map(|_| ())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let config = env.config();
        let now = env.now();
        let boss = boss_ref(arena, self.boss)?;
        let locks_out = boss.has(&MechanicKind::Lockout);
        let name = boss.name.clone();

        let record = arena.contribution_entry(self.boss, self.player);
        record.total_damage = record.total_damage.saturating_add(u64::from(self.damage));
        record.last_engaged_at = Some(now);

        if locks_out {
            let until = now + config.lockout_secs;
            record.lockout_until = Some(until);
            events.push(BossEvent::new(
                self.boss,
                BossEventKind::LockedOut {
                    player: self.player,
                    until,
                },
                format!(
                    "The {} shuts you out. Return in {}.",
                    name,
                    format_remaining(config.lockout_secs)
                ),
                config.message_char_limit,
            ));
        }

        Ok(ContributionOutcome {
            total_damage: record.total_damage,
            lockout_until: record.lockout_until,
        })
    }
}

/// Answer of the engagement gate. Rejections are values with a reason, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Engagement {
    Ready { name: String },
    /// Raid boss that has not been activated yet.
    Dormant { name: String },
    Defeated { name: String },
    LockedOut { remaining_secs: u64 },
}

impl Engagement {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Player-facing explanation.
    pub fn reason(&self) -> String {
        match self {
            Self::Ready { name } => format!("The {name} awaits."),
            Self::Dormant { name } => format!("The {name} has not stirred yet."),
            Self::Defeated { name } => format!("The {name} has been defeated."),
            Self::LockedOut { remaining_secs } => format!(
                "You're locked out. Return in {}.",
                format_remaining(*remaining_secs)
            ),
        }
    }
}

/// Whether `player` may engage `boss` at `now`.
///
/// Dead bosses reject everyone; otherwise any stored lockout still in the
/// future rejects the player, whether or not `lockout` is still rolled.
pub fn can_engage(
    arena: &BossArena,
    boss: BossId,
    player: PlayerId,
    now: Timestamp,
) -> Result<Engagement, CommandError> {
    let record = boss_ref(arena, boss)?;
    let name = record.name.clone();
    if record.is_dormant() {
        return Ok(Engagement::Dormant { name });
    }
    if !record.is_alive() {
        return Ok(Engagement::Defeated { name });
    }
    let remaining = arena
        .contribution(boss, player)
        .and_then(|contribution| contribution.lockout_remaining(now));
    Ok(match remaining {
        Some(remaining_secs) => Engagement::LockedOut { remaining_secs },
        None => Engagement::Ready { name },
    })
}
