use crate::config::EngineConfig;
use crate::state::{Boss, BossArena, BossId, PlayerSnapshot};

/// World facts a mechanic may consult besides the boss and the attacker.
#[derive(Clone, Copy, Debug)]
pub struct EncounterContext<'a> {
    /// Current epoch day.
    pub day: u32,
    /// Living minions summoned by this boss.
    pub living_minions: usize,
    /// Players that have dealt damage to this boss.
    pub fighters: usize,
    pub config: &'a EngineConfig,
}

impl<'a> EncounterContext<'a> {
    pub fn new(day: u32, config: &'a EngineConfig) -> Self {
        Self {
            day,
            living_minions: 0,
            fighters: 0,
            config,
        }
    }

    /// Reads minion and contributor counts for `boss` from the arena.
    pub fn from_arena(arena: &BossArena, boss: BossId, day: u32, config: &'a EngineConfig) -> Self {
        Self {
            day,
            living_minions: arena.living_minions(boss).count(),
            fighters: arena.fighter_count(boss),
            config,
        }
    }

    pub fn with_living_minions(mut self, count: usize) -> Self {
        self.living_minions = count;
        self
    }

    pub fn with_fighters(mut self, count: usize) -> Self {
        self.fighters = count;
        self
    }
}

/// Everything one mechanic rule sees during a combat round.
#[derive(Clone, Copy, Debug)]
pub struct Exchange<'a> {
    pub boss: &'a Boss,
    pub player: &'a PlayerSnapshot,
    pub round: u32,
    pub context: &'a EncounterContext<'a>,
}

impl Exchange<'_> {
    pub fn config(&self) -> &EngineConfig {
        self.context.config
    }

    /// First of the 75/50/25% marks a hit of `damage` would carry the boss across.
    pub fn crossed_mark(&self, damage: u32) -> Option<u32> {
        const MARKS: [u32; 3] = [75, 50, 25];
        let before = u64::from(self.boss.hp);
        let after = before.saturating_sub(u64::from(damage));
        MARKS.into_iter().find(|pct| {
            let mark = u64::from(self.boss.hp_max) * u64::from(*pct) / 100;
            before > mark && after <= mark
        })
    }
}
