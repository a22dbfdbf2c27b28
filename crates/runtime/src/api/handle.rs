//! Cloneable façade for issuing commands to the encounter worker.
//!
//! [`EncounterHandle`] hides channel plumbing and offers one async helper per
//! engine operation, plus [`EncounterHandle::strike`] for a full combat round.
use tokio::sync::{broadcast, mpsc, oneshot};

use boss_core::{
    Activate, ActivationOutcome, BossArena, BossEvent, BossId, CombatModifiers, Command,
    ContributionOutcome, DamageBoss, DamageMinion, DamageOutcome, Engagement,
    ExecutionOutcome, MinionDamageOutcome, MinionId, PhaseOutcome, PlayerId, PlayerSnapshot,
    RaidStatus, RecordContribution, RegenBurst, RegenOnEngagement, RegenRaidBoss, Relocate,
    Relocation, SpawnAdd, TransitionPhase, TrySplit,
};

use super::errors::{Result, RuntimeError, expect_result};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Request, StrikeRequest};

/// Everything one player's attack changed, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrikeOutcome {
    /// Mechanic effects; `extra_damage_to_player` and `messages` are for the caller to apply.
    pub modifiers: CombatModifiers,
    pub damage: DamageOutcome,
    /// Recorded only against the Raid Boss.
    pub contribution: Option<ContributionOutcome>,
    pub split: Option<BossId>,
    pub relocation: Option<Relocation>,
    pub events: Vec<BossEvent>,
}

/// Client-facing handle to interact with the encounter
#[derive(Clone)]
pub struct EncounterHandle {
    request_tx: mpsc::Sender<Request>,
    event_bus: EventBus,
}

impl EncounterHandle {
    pub(crate) fn new(request_tx: mpsc::Sender<Request>, event_bus: EventBus) -> Self {
        Self {
            request_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Run any command through the engine.
    pub async fn execute(&self, command: impl Into<Command>) -> Result<ExecutionOutcome> {
        let command = command.into();
        self.request(|reply| Request::Execute { command, reply })
            .await?
    }

    /// Evaluate the boss's mechanics for one exchange without changing anything.
    pub async fn dispatch(
        &self,
        boss: BossId,
        player: PlayerSnapshot,
        base_damage: u32,
        round: u32,
    ) -> Result<CombatModifiers> {
        let strike = StrikeRequest {
            boss,
            player,
            base_damage,
            round,
        };
        self.request(|reply| Request::Dispatch { strike, reply })
            .await?
    }

    /// One full exchange: mechanics, damage, contribution, split and flee.
    ///
    /// Either every step commits or none does.
    pub async fn strike(
        &self,
        boss: BossId,
        player: PlayerSnapshot,
        base_damage: u32,
        round: u32,
    ) -> Result<StrikeOutcome> {
        let strike = StrikeRequest {
            boss,
            player,
            base_damage,
            round,
        };
        self.request(|reply| Request::Strike { strike, reply })
            .await?
    }

    pub async fn damage(&self, boss: BossId, amount: u32) -> Result<DamageOutcome> {
        let outcome = self.execute(DamageBoss::new(boss, amount)).await?;
        expect_result!(outcome, Damage)
    }

    pub async fn damage_minion(&self, minion: MinionId, amount: u32) -> Result<MinionDamageOutcome> {
        let outcome = self.execute(DamageMinion::new(minion, amount)).await?;
        expect_result!(outcome, MinionDamage)
    }

    /// Heal a floor boss or the Warden when a player engages it. Returns HP restored.
    pub async fn regen_on_engagement(&self, boss: BossId) -> Result<u32> {
        let outcome = self.execute(RegenOnEngagement::new(boss)).await?;
        expect_result!(outcome, Healed)
    }

    /// Catch the Raid Boss up on elapsed regen intervals. Returns HP restored.
    pub async fn regen_raid_boss(&self, boss: BossId) -> Result<u32> {
        let outcome = self.execute(RegenRaidBoss::new(boss)).await?;
        expect_result!(outcome, Healed)
    }

    pub async fn regen_burst(&self, boss: BossId) -> Result<u32> {
        let outcome = self.execute(RegenBurst::new(boss)).await?;
        expect_result!(outcome, Healed)
    }

    pub async fn activate(&self, boss: BossId, active_players: u32) -> Result<ActivationOutcome> {
        let outcome = self.execute(Activate::new(boss, active_players)).await?;
        expect_result!(outcome, Activated)
    }

    pub async fn check_phase(&self, boss: BossId) -> Result<PhaseOutcome> {
        let outcome = self.execute(TransitionPhase::new(boss)).await?;
        expect_result!(outcome, Phase)
    }

    pub async fn record_contribution(
        &self,
        boss: BossId,
        player: PlayerId,
        damage: u32,
    ) -> Result<ContributionOutcome> {
        let outcome = self
            .execute(RecordContribution::new(boss, player, damage))
            .await?;
        expect_result!(outcome, Contribution)
    }

    /// Returns the child's id when this call performed the split.
    pub async fn try_split(&self, boss: BossId) -> Result<Option<BossId>> {
        let outcome = self.execute(TrySplit::new(boss)).await?;
        expect_result!(outcome, Split)
    }

    /// Returns the new minion, or `None` when the summon cap is reached.
    pub async fn spawn_add(&self, boss: BossId) -> Result<Option<MinionId>> {
        let outcome = self.execute(SpawnAdd::new(boss)).await?;
        expect_result!(outcome, Spawned)
    }

    /// Move the Raid Boss to another eligible room on its floor.
    pub async fn flee(&self, boss: BossId) -> Result<Relocation> {
        let outcome = self.execute(Relocate::new(boss)).await?;
        expect_result!(outcome, Relocated)
    }

    /// Engagement gate, evaluated at the worker's current time.
    pub async fn can_engage(&self, boss: BossId, player: PlayerId) -> Result<Engagement> {
        self.request(|reply| Request::CanEngage {
            boss,
            player,
            reply,
        })
        .await?
    }

    pub async fn raid_status(&self) -> Result<RaidStatus> {
        self.request(|reply| Request::RaidStatus { reply }).await
    }

    /// Query the current arena (read-only copy)
    pub async fn query_arena(&self) -> Result<BossArena> {
        self.request(|reply| Request::QueryArena { reply }).await
    }

    /// Persist the arena now. Returns the nonce it was stored under.
    pub async fn snapshot(&self) -> Result<u64> {
        self.request(|reply| Request::Snapshot { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Encounter` - activation, phase, defeat, split, flee and lockout narration
    /// - `Topic::Command` - executed and rejected commands
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
