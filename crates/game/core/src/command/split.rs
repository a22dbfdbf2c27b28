use super::{CommandError, CommandTransition, boss_ref, check_hp_bounds};
use crate::env::EncounterEnv;
use crate::events::{BossEvent, BossEventKind};
use crate::mechanic::MechanicKind;
use crate::state::{Boss, BossArena, BossId, BossRole};

/// One-shot cloning of a `splitting` boss at half health.
///
/// The parent records its child in `split_child`, and the child carries
/// `split_parent`; both fields make repeated calls no-ops. Children never
/// split again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrySplit {
    pub boss: BossId,
}

impl TrySplit {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }

    fn is_due(parent: &Boss) -> bool {
        parent.has(&MechanicKind::Splitting)
            && parent.split_child.is_none()
            && parent.split_parent.is_none()
            && parent.is_alive()
            && !parent.above_half()
            && parent.hp_max / 2 > 0
    }
}

impl CommandTransition for TrySplit {
    type Output = Option<BossId>;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        boss_ref(arena, self.boss).map(|_| ())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let parent = boss_ref(arena, self.boss)?;
        if !Self::is_due(parent) {
            return Ok(None);
        }

        let half = parent.hp_max / 2;
        let mut child = Boss::new(
            BossId(0),
            format!("{} (Split)", parent.name),
            parent.room,
            parent.floor,
            half,
            parent.mechanics.clone(),
        )
        .with_stats(parent.stats)
        .with_tier(parent.tier)
        .with_role(BossRole::FLOOR_BOSS);
        child.split_parent = Some(parent.id);
        let message = format!("{} splits! A second form appears nearby.", parent.name);

        child.id = arena.allocate_boss_id()?;
        let child_id = arena.insert_boss(child)?;
        if let Some(parent) = arena.boss_mut(self.boss) {
            parent.split_child = Some(child_id);
        }

        events.push(BossEvent::new(
            self.boss,
            BossEventKind::Split { child: child_id },
            message,
            env.config().message_char_limit,
        ));
        Ok(Some(child_id))
    }

    fn post_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        check_hp_bounds(arena, self.boss)?;
        match boss_ref(arena, self.boss)?.split_child {
            Some(child) => check_hp_bounds(arena, child),
            None => Ok(()),
        }
    }
}
