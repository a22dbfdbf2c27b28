//! Authoritative encounter state.
//!
//! [`BossArena`] owns every boss, minion and contribution record addressed by
//! stable integer ids. Runtime layers clone or query the arena but mutate it
//! exclusively through [`crate::engine::BossEngine`].
pub mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::StateError;
pub use types::{
    BaseStat, Boss, BossId, BossRole, CombatStats, ContributionRecord, Minion, MinionId, PlayerId,
    PlayerSnapshot, RegenClock, RoomId, Timestamp, format_remaining,
};

/// Arena of boss entities plus the records that hang off them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossArena {
    /// RNG seed for deterministic relocation rolls.
    ///
    /// Set once at epoch generation and never modified.
    pub seed: u64,

    /// Number of commands applied so far. Mixed into RNG seeds.
    pub nonce: u64,

    /// Sequential allocators. Never reused.
    next_boss_id: u32,
    next_minion_id: u32,

    bosses: BTreeMap<BossId, Boss>,
    minions: BTreeMap<MinionId, Minion>,
    contributions: BTreeMap<(BossId, PlayerId), ContributionRecord>,
}

impl BossArena {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            next_boss_id: 1,
            next_minion_id: 1,
            bosses: BTreeMap::new(),
            minions: BTreeMap::new(),
            contributions: BTreeMap::new(),
        }
    }

    /// Registers a boss produced by the generation subsystem under its own id.
    pub fn insert_boss(&mut self, boss: Boss) -> Result<BossId, StateError> {
        let id = boss.id;
        if self.bosses.contains_key(&id) {
            return Err(StateError::DuplicateBoss { id });
        }
        if boss.hp > boss.hp_max {
            return Err(StateError::HpAboveMax {
                id,
                hp: boss.hp,
                hp_max: boss.hp_max,
            });
        }
        self.next_boss_id = self.next_boss_id.max(id.0.saturating_add(1));
        self.bosses.insert(id, boss);
        Ok(id)
    }

    /// Allocates a fresh boss id.
    pub fn allocate_boss_id(&mut self) -> Result<BossId, StateError> {
        let id = self.next_boss_id;
        self.next_boss_id = id
            .checked_add(1)
            .ok_or(StateError::IdOverflow { current: id })?;
        Ok(BossId(id))
    }

    /// Allocates a fresh minion id.
    pub fn allocate_minion_id(&mut self) -> Result<MinionId, StateError> {
        let id = self.next_minion_id;
        self.next_minion_id = id
            .checked_add(1)
            .ok_or(StateError::IdOverflow { current: id })?;
        Ok(MinionId(id))
    }

    pub fn boss(&self, id: BossId) -> Option<&Boss> {
        self.bosses.get(&id)
    }

    pub fn boss_mut(&mut self, id: BossId) -> Option<&mut Boss> {
        self.bosses.get_mut(&id)
    }

    pub fn bosses(&self) -> impl Iterator<Item = &Boss> {
        self.bosses.values()
    }

    /// The epoch's Raid Boss, if one was generated.
    pub fn raid_boss(&self) -> Option<&Boss> {
        self.bosses.values().find(|boss| boss.is_raid_boss())
    }

    pub fn minion(&self, id: MinionId) -> Option<&Minion> {
        self.minions.get(&id)
    }

    pub fn minion_mut(&mut self, id: MinionId) -> Option<&mut Minion> {
        self.minions.get_mut(&id)
    }

    pub(crate) fn insert_minion(&mut self, minion: Minion) {
        self.minions.insert(minion.id, minion);
    }

    /// Minions tied to `summoner` that still have HP.
    pub fn living_minions(&self, summoner: BossId) -> impl Iterator<Item = &Minion> {
        self.minions
            .values()
            .filter(move |m| m.summoner == summoner && m.is_alive())
    }

    pub fn contribution(&self, boss: BossId, player: PlayerId) -> Option<&ContributionRecord> {
        self.contributions.get(&(boss, player))
    }

    pub(crate) fn contribution_entry(
        &mut self,
        boss: BossId,
        player: PlayerId,
    ) -> &mut ContributionRecord {
        self.contributions.entry((boss, player)).or_default()
    }

    /// All contribution records against `boss`, ordered by player id.
    pub fn contributions_for(
        &self,
        boss: BossId,
    ) -> impl Iterator<Item = (PlayerId, &ContributionRecord)> {
        self.contributions
            .range((boss, PlayerId(0))..=(boss, PlayerId(u32::MAX)))
            .map(|((_, player), record)| (*player, record))
    }

    /// Players that have dealt damage to `boss`.
    pub fn fighter_count(&self, boss: BossId) -> usize {
        self.contributions_for(boss)
            .filter(|(_, record)| record.total_damage > 0)
            .count()
    }
}
