use super::{CombatModifiers, EncounterContext, Exchange};
use crate::env::EncounterEnv;
use crate::mechanic::MechanicCatalog;
use crate::state::{Boss, BossArena, BossId, PlayerSnapshot};

/// Folds a boss's mechanics over one combat round.
///
/// Mechanics run in list order and each sees the damage left by the previous
/// one. Flags are unioned and messages concatenated, each capped to the
/// configured length. Dispatch is read-only; the caller applies the result
/// through `DamageBoss`.
#[derive(Clone, Debug)]
pub struct MechanicDispatcher {
    catalog: MechanicCatalog,
}

impl MechanicDispatcher {
    pub fn new(catalog: MechanicCatalog) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(MechanicCatalog::standard())
    }

    pub fn catalog(&self) -> &MechanicCatalog {
        &self.catalog
    }

    pub fn apply(
        &self,
        boss: &Boss,
        player: &PlayerSnapshot,
        base_damage: u32,
        round: u32,
        context: &EncounterContext<'_>,
    ) -> CombatModifiers {
        let exchange = Exchange {
            boss,
            player,
            round,
            context,
        };
        let mut out = CombatModifiers::passthrough(base_damage);
        for kind in &boss.mechanics {
            (self.catalog.rule(kind))(&exchange, &mut out);
        }
        out.cap_messages(context.config.message_char_limit);
        out
    }

    /// Looks the boss up in `arena` and dispatches with live minion and fighter counts.
    ///
    /// Returns `None` when the boss does not exist.
    pub fn dispatch(
        &self,
        arena: &BossArena,
        env: &EncounterEnv<'_>,
        boss: BossId,
        player: &PlayerSnapshot,
        base_damage: u32,
        round: u32,
    ) -> Option<CombatModifiers> {
        let record = arena.boss(boss)?;
        let context = EncounterContext::from_arena(arena, boss, env.day(), env.config());
        Some(self.apply(record, player, base_damage, round, &context))
    }
}

impl Default for MechanicDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::env::EpochContext;
    use crate::mechanic::{MechanicKind, MechanicSet};
    use crate::state::{Minion, PlayerId, RoomId};

    fn boss(mechanics: MechanicSet, hp: u32) -> Boss {
        Boss::new(BossId(1), "Pit Lord", RoomId(7), 1, 100, mechanics).with_hp(hp)
    }

    fn player() -> PlayerSnapshot {
        PlayerSnapshot::new(PlayerId(3), 50, 6, 3, 2)
    }

    #[test]
    fn armored_halves_above_half_health() {
        let config = EngineConfig::default();
        let context = EncounterContext::new(1, &config);
        let dispatcher = MechanicDispatcher::standard();
        let armored = MechanicSet::single(MechanicKind::Armored);

        let healthy = dispatcher.apply(&boss(armored.clone(), 80), &player(), 20, 1, &context);
        assert_eq!(healthy.damage, 10);

        let wounded = dispatcher.apply(&boss(armored, 40), &player(), 20, 1, &context);
        assert_eq!(wounded.damage, 20);
    }

    #[test]
    fn composition_is_sequential() {
        let config = EngineConfig::default();
        let context = EncounterContext::new(1, &config);
        let dispatcher = MechanicDispatcher::standard();
        let warden = boss(
            MechanicSet::parse(["armored", "retaliator"]).unwrap(),
            80,
        );

        let out = dispatcher.apply(&warden, &player(), 50, 1, &context);
        // armored: 50 -> 25, retaliator reflects 25 / 5 = 5 (not 50 / 5)
        assert_eq!(out.damage, 25);
        assert_eq!(out.extra_damage_to_player, 5);
        assert_eq!(out.messages.len(), 2);
    }

    #[test]
    fn flags_union_across_mechanics() {
        let config = EngineConfig::default();
        let context = EncounterContext::new(2, &config);
        let dispatcher = MechanicDispatcher::standard();
        let warden = boss(MechanicSet::parse(["stalwart", "phasing"]).unwrap(), 100);

        let out = dispatcher.apply(&warden, &player(), 30, 1, &context);
        assert!(out.flee_blocked);
        assert!(out.boss_immune);
        assert_eq!(out.damage, 0);
    }

    #[test]
    fn unknown_mechanic_is_a_noop() {
        let config = EngineConfig::default();
        let context = EncounterContext::new(1, &config);
        let dispatcher = MechanicDispatcher::standard();
        let odd = boss(MechanicSet::parse(["moonwalk"]).unwrap(), 100);

        assert_eq!(
            dispatcher.apply(&odd, &player(), 17, 1, &context),
            CombatModifiers::passthrough(17)
        );
    }

    #[test]
    fn dispatch_is_deterministic() {
        let config = EngineConfig::default();
        let context = EncounterContext::new(3, &config).with_fighters(2);
        let dispatcher = MechanicDispatcher::standard();
        let raid = boss(
            MechanicSet::parse(["aura_damage", "windup_strike", "armor_phase"]).unwrap(),
            70,
        );

        for round in 1..8 {
            let a = dispatcher.apply(&raid, &player(), 13, round, &context);
            let b = dispatcher.apply(&raid, &player(), 13, round, &context);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn messages_are_capped() {
        let mut config = EngineConfig::default();
        config.message_char_limit = 8;
        let context = EncounterContext::new(1, &config);
        let dispatcher = MechanicDispatcher::standard();
        let out = dispatcher.apply(
            &boss(MechanicSet::single(MechanicKind::Armored), 100),
            &player(),
            20,
            1,
            &context,
        );
        assert_eq!(out.messages, vec!["Armor ab".to_string()]);
    }

    #[test]
    fn dispatch_counts_living_minions() {
        let config = EngineConfig::default();
        let mut arena = BossArena::new(1);
        arena
            .insert_boss(boss(MechanicSet::single(MechanicKind::Summoner), 100))
            .unwrap();
        let id = arena.allocate_minion_id().unwrap();
        arena.insert_minion(Minion::for_floor(id, BossId(1), RoomId(7), 1));

        let env = EncounterEnv::new(&config, EpochContext::default());
        let dispatcher = MechanicDispatcher::standard();
        let out = dispatcher
            .dispatch(&arena, &env, BossId(1), &player(), 9, 1)
            .unwrap();
        assert!(out.boss_immune);

        arena.minion_mut(id).unwrap().hp = 0;
        let out = dispatcher
            .dispatch(&arena, &env, BossId(1), &player(), 9, 1)
            .unwrap();
        assert_eq!(out.damage, 9);
        assert!(
            dispatcher
                .dispatch(&arena, &env, BossId(2), &player(), 9, 1)
                .is_none()
        );
    }
}
