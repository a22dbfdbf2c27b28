//! Mutating commands against the boss arena.
//!
//! Every state change is an explicit command value driven through
//! `pre_validate -> apply -> post_validate` by [`crate::engine::BossEngine`].
//! Commands read time, day number and tunables from the [`EncounterEnv`] so
//! they stay deterministic under replay.
mod contribution;
mod damage;
mod error;
mod flee;
mod phase;
mod regen;
mod split;
mod summon;

pub use contribution::{ContributionOutcome, Engagement, RecordContribution, can_engage};
pub use damage::{DamageBoss, DamageMinion, DamageOutcome, MinionDamageOutcome};
pub use error::CommandError;
pub use flee::{Relocate, Relocation};
pub use phase::{Activate, ActivationOutcome, PhaseOutcome, TransitionPhase};
pub use regen::{
    RaidRegen, RegenBurst, RegenOnEngagement, RegenRaidBoss, engagement_heal, raid_regen,
};
pub use split::TrySplit;
pub use summon::SpawnAdd;

use crate::env::EncounterEnv;
use crate::events::BossEvent;
use crate::state::{Boss, BossArena, BossId, MinionId};

/// Defines how one command mutates the arena.
///
/// Validation hooks see the arena before and after mutation respectively and
/// must stay side-effect free. `apply` may assume `pre_validate` passed.
pub trait CommandTransition {
    type Output;

    fn pre_validate(&self, _arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        Ok(())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError>;

    fn post_validate(&self, _arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Every mutation the engine accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    DamageBoss(DamageBoss),
    DamageMinion(DamageMinion),
    RegenOnEngagement(RegenOnEngagement),
    RegenRaidBoss(RegenRaidBoss),
    RegenBurst(RegenBurst),
    Activate(Activate),
    TransitionPhase(TransitionPhase),
    RecordContribution(RecordContribution),
    TrySplit(TrySplit),
    SpawnAdd(SpawnAdd),
    Relocate(Relocate),
}

/// Fieldless tag of a [`Command`], used in errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    DamageBoss,
    DamageMinion,
    RegenOnEngagement,
    RegenRaidBoss,
    RegenBurst,
    Activate,
    TransitionPhase,
    RecordContribution,
    TrySplit,
    SpawnAdd,
    Relocate,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::DamageBoss(_) => CommandKind::DamageBoss,
            Self::DamageMinion(_) => CommandKind::DamageMinion,
            Self::RegenOnEngagement(_) => CommandKind::RegenOnEngagement,
            Self::RegenRaidBoss(_) => CommandKind::RegenRaidBoss,
            Self::RegenBurst(_) => CommandKind::RegenBurst,
            Self::Activate(_) => CommandKind::Activate,
            Self::TransitionPhase(_) => CommandKind::TransitionPhase,
            Self::RecordContribution(_) => CommandKind::RecordContribution,
            Self::TrySplit(_) => CommandKind::TrySplit,
            Self::SpawnAdd(_) => CommandKind::SpawnAdd,
            Self::Relocate(_) => CommandKind::Relocate,
        }
    }

    /// Boss the command targets. Minion damage targets no boss directly.
    pub fn boss(&self) -> Option<BossId> {
        match self {
            Self::DamageBoss(c) => Some(c.boss),
            Self::DamageMinion(_) => None,
            Self::RegenOnEngagement(c) => Some(c.boss),
            Self::RegenRaidBoss(c) => Some(c.boss),
            Self::RegenBurst(c) => Some(c.boss),
            Self::Activate(c) => Some(c.boss),
            Self::TransitionPhase(c) => Some(c.boss),
            Self::RecordContribution(c) => Some(c.boss),
            Self::TrySplit(c) => Some(c.boss),
            Self::SpawnAdd(c) => Some(c.boss),
            Self::Relocate(c) => Some(c.boss),
        }
    }
}

macro_rules! impl_into_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(command: $variant) -> Self {
                    Command::$variant(command)
                }
            }
        )*
    };
}

impl_into_command!(
    DamageBoss,
    DamageMinion,
    RegenOnEngagement,
    RegenRaidBoss,
    RegenBurst,
    Activate,
    TransitionPhase,
    RecordContribution,
    TrySplit,
    SpawnAdd,
    Relocate,
);

/// Successful result of one command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandResult {
    Damage(DamageOutcome),
    MinionDamage(MinionDamageOutcome),
    /// HP restored by a regen command (0 when nothing applied).
    Healed(u32),
    Activated(ActivationOutcome),
    Phase(PhaseOutcome),
    Contribution(ContributionOutcome),
    /// Child created by this call, `None` when the split was not due or already happened.
    Split(Option<BossId>),
    /// Minion spawned by this call, `None` when the summon cap is reached.
    Spawned(Option<MinionId>),
    Relocated(Relocation),
}

impl CommandResult {
    pub fn healed(&self) -> Option<u32> {
        match self {
            Self::Healed(amount) => Some(*amount),
            _ => None,
        }
    }
}

pub(crate) fn boss_ref(arena: &BossArena, boss: BossId) -> Result<&Boss, CommandError> {
    arena.boss(boss).ok_or(CommandError::BossNotFound { boss })
}

pub(crate) fn boss_mut(arena: &mut BossArena, boss: BossId) -> Result<&mut Boss, CommandError> {
    arena.boss_mut(boss).ok_or(CommandError::BossNotFound { boss })
}

/// Shared post-condition: `0 <= hp <= hp_max`.
pub(crate) fn check_hp_bounds(arena: &BossArena, boss: BossId) -> Result<(), CommandError> {
    let record = boss_ref(arena, boss)?;
    if record.hp > record.hp_max {
        return Err(CommandError::HpOutOfBounds {
            boss,
            hp: record.hp,
            hp_max: record.hp_max,
        });
    }
    Ok(())
}

/// Raid boss that has been activated.
pub(crate) fn awake_raid_boss(arena: &BossArena, boss: BossId) -> Result<&Boss, CommandError> {
    let record = boss_ref(arena, boss)?;
    if !record.is_raid_boss() {
        return Err(CommandError::NotRaidBoss { boss });
    }
    if record.is_dormant() {
        return Err(CommandError::Dormant { boss });
    }
    Ok(record)
}
