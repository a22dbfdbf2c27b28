//! Encounter worker that owns the authoritative [`BossArena`].
//!
//! Receives requests from [`crate::EncounterHandle`], executes commands via
//! [`BossEngine`], and publishes events to the [`EventBus`]. Requests are
//! handled one at a time, which gives every boss serialized, all-or-nothing
//! updates: two killing blows can never both report a defeat, and a split can
//! never produce two children.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use boss_core::{
    BossArena, BossEngine, BossId, CombatModifiers, Command, DamageBoss,
    EncounterEnv, Engagement, EngineConfig, ErrorSeverity, ExecuteError, ExecutionOutcome,
    GameError, MechanicDispatcher, PlayerId, PlayerSnapshot, RaidStatus, RecordContribution,
    Relocate, Timestamp, TrySplit, can_engage,
};

use crate::api::{Result, RuntimeError, StrikeOutcome, expect_result};
use crate::clock::{Clock, EpochCalendar};
use crate::events::{CommandEvent, EncounterEvent, Event, EventBus};
use crate::oracle::OracleBundle;
use crate::repository::ArenaRepository;

/// One player's attack for a full combat round.
#[derive(Clone, Copy, Debug)]
pub struct StrikeRequest {
    pub boss: BossId,
    pub player: PlayerSnapshot,
    pub base_damage: u32,
    pub round: u32,
}

/// Requests that can be sent to the encounter worker
pub enum Request {
    /// Run one command through the engine.
    Execute {
        command: Command,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Dispatch, damage, contribution, split and flee as one unit.
    Strike {
        strike: StrikeRequest,
        reply: oneshot::Sender<Result<StrikeOutcome>>,
    },
    /// Read-only mechanic evaluation.
    Dispatch {
        strike: StrikeRequest,
        reply: oneshot::Sender<Result<CombatModifiers>>,
    },
    CanEngage {
        boss: BossId,
        player: PlayerId,
        reply: oneshot::Sender<Result<Engagement>>,
    },
    RaidStatus {
        reply: oneshot::Sender<RaidStatus>,
    },
    QueryArena {
        reply: oneshot::Sender<BossArena>,
    },
    /// Persist the current arena and reply with its nonce.
    Snapshot {
        reply: oneshot::Sender<Result<u64>>,
    },
}

/// Events produced while handling one request; published only once the
/// request's outcome is final.
#[derive(Default)]
struct Journal {
    events: Vec<Event>,
}

impl Journal {
    /// Keeps only rejections, for requests that were rolled back.
    fn rejections_only(mut self) -> Self {
        self.events
            .retain(|event| matches!(event, Event::Command(CommandEvent::Rejected { .. })));
        self
    }
}

/// Background task that processes encounter requests.
pub struct EncounterWorker {
    arena: BossArena,
    config: EngineConfig,
    oracles: OracleBundle,
    dispatcher: MechanicDispatcher,
    clock: Arc<dyn Clock>,
    calendar: EpochCalendar,
    repository: Option<Arc<dyn ArenaRepository>>,
    request_rx: mpsc::Receiver<Request>,
    event_bus: EventBus,
}

impl EncounterWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        arena: BossArena,
        config: EngineConfig,
        oracles: OracleBundle,
        clock: Arc<dyn Clock>,
        calendar: EpochCalendar,
        repository: Option<Arc<dyn ArenaRepository>>,
        request_rx: mpsc::Receiver<Request>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            bosses = arena.bosses().count(),
            nonce = arena.nonce,
            raid = ?arena.raid_boss().map(|boss| boss.id),
            "EncounterWorker initialized"
        );

        Self {
            arena,
            config,
            oracles,
            dispatcher: MechanicDispatcher::standard(),
            clock,
            calendar,
            repository,
            request_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            self.handle_request(request).await;
        }
        debug!(nonce = self.arena.nonce, "EncounterWorker stopped");
    }

    async fn handle_request(&mut self, request: Request) {
        match request {
            Request::Execute { command, reply } => {
                let result = self.handle_execute(command).await;
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Request::Strike { strike, reply } => {
                let result = self.handle_strike(strike).await;
                if reply.send(result).is_err() {
                    debug!("Strike reply channel closed (caller dropped)");
                }
            }
            Request::Dispatch { strike, reply } => {
                let result = self.handle_dispatch(strike);
                if reply.send(result).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Request::CanEngage {
                boss,
                player,
                reply,
            } => {
                let result = can_engage(&self.arena, boss, player, self.clock.now())
                    .map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("CanEngage reply channel closed (caller dropped)");
                }
            }
            Request::RaidStatus { reply } => {
                if reply.send(RaidStatus::of(&self.arena)).is_err() {
                    debug!("RaidStatus reply channel closed (caller dropped)");
                }
            }
            Request::QueryArena { reply } => {
                if reply.send(self.arena.clone()).is_err() {
                    debug!("QueryArena reply channel closed (caller dropped)");
                }
            }
            Request::Snapshot { reply } => {
                let result = self.handle_snapshot().await;
                if reply.send(result).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn handle_execute(&mut self, command: Command) -> Result<ExecutionOutcome> {
        let at = self.clock.now();
        let env = self.oracles.env(&self.config, self.calendar.context(at));
        let mut journal = Journal::default();

        let result = execute_command(&mut self.arena, &env, &command, at, &mut journal);
        self.publish(journal);
        let outcome = result?;
        self.persist().await;
        Ok(outcome)
    }

    fn handle_dispatch(&self, strike: StrikeRequest) -> Result<CombatModifiers> {
        let at = self.clock.now();
        let env = self.oracles.env(&self.config, self.calendar.context(at));
        self.dispatcher
            .dispatch(
                &self.arena,
                &env,
                strike.boss,
                &strike.player,
                strike.base_damage,
                strike.round,
            )
            .ok_or(RuntimeError::BossNotFound { boss: strike.boss })
    }

    async fn handle_strike(&mut self, strike: StrikeRequest) -> Result<StrikeOutcome> {
        let at = self.clock.now();
        let env = self.oracles.env(&self.config, self.calendar.context(at));
        let before = self.arena.clone();
        let mut journal = Journal::default();

        match run_strike(
            &mut self.arena,
            &env,
            &self.dispatcher,
            &strike,
            at,
            &mut journal,
        ) {
            Ok(outcome) => {
                self.publish(journal);
                self.persist().await;
                Ok(outcome)
            }
            Err(err) => {
                self.arena = before;
                self.publish(journal.rejections_only());
                Err(err)
            }
        }
    }

    /// Writes the current arena on the blocking pool; the worker waits for the
    /// write so snapshots land in nonce order.
    async fn handle_snapshot(&self) -> Result<u64> {
        let nonce = self.arena.nonce;
        let Some(repository) = self.repository.clone() else {
            return Ok(nonce);
        };
        let arena = self.arena.clone();
        tokio::task::spawn_blocking(move || repository.save(nonce, &arena))
            .await
            .map_err(RuntimeError::SnapshotTask)??;
        Ok(nonce)
    }

    /// Saves after a committed change. Failures are logged, not surfaced: the
    /// in-memory arena stays authoritative.
    async fn persist(&self) {
        if let Err(err) = self.handle_snapshot().await {
            warn!(nonce = self.arena.nonce, error = %err, "failed to persist arena snapshot");
        }
    }

    fn publish(&self, journal: Journal) {
        for event in journal.events {
            match &event {
                Event::Encounter(narrative) => info!(
                    boss = %narrative.event.boss,
                    kind = %narrative.event.kind,
                    nonce = narrative.nonce,
                    "{}",
                    narrative.event.message
                ),
                Event::Command(CommandEvent::Executed { nonce, kind, boss }) => {
                    trace!(nonce, %kind, ?boss, "command executed");
                }
                Event::Command(CommandEvent::Rejected {
                    nonce,
                    kind,
                    stage,
                    severity,
                    code,
                    message,
                }) => {
                    if severity.is_internal() {
                        warn!(nonce, %kind, stage = stage.as_str(), code = code.as_str(), "{message}");
                    } else {
                        debug!(nonce, %kind, stage = stage.as_str(), code = code.as_str(), "{message}");
                    }
                }
            }
            self.event_bus.publish(event);
        }
    }
}

/// Runs one command and journals its outcome.
fn execute_command(
    arena: &mut BossArena,
    env: &EncounterEnv<'_>,
    command: &Command,
    at: Timestamp,
    journal: &mut Journal,
) -> std::result::Result<ExecutionOutcome, ExecuteError> {
    let nonce = arena.nonce;
    let kind = command.kind();

    match BossEngine::new(arena).execute(env, command) {
        Ok(outcome) => {
            journal.events.push(Event::Command(CommandEvent::Executed {
                nonce,
                kind,
                boss: command.boss(),
            }));
            journal
                .events
                .extend(outcome.events.iter().cloned().map(|event| {
                    Event::Encounter(EncounterEvent { nonce, at, event })
                }));
            Ok(outcome)
        }
        Err(err) => {
            journal.events.push(Event::Command(CommandEvent::Rejected {
                nonce,
                kind,
                stage: err.stage(),
                severity: err.severity(),
                code: err.error_code().to_string(),
                message: err.to_string(),
            }));
            Err(err)
        }
    }
}

fn run_strike(
    arena: &mut BossArena,
    env: &EncounterEnv<'_>,
    dispatcher: &MechanicDispatcher,
    strike: &StrikeRequest,
    at: Timestamp,
    journal: &mut Journal,
) -> Result<StrikeOutcome> {
    let boss = strike.boss;
    let modifiers = dispatcher
        .dispatch(
            arena,
            env,
            boss,
            &strike.player,
            strike.base_damage,
            strike.round,
        )
        .ok_or(RuntimeError::BossNotFound { boss })?;
    let mut events = Vec::new();

    let outcome = execute_command(
        arena,
        env,
        &DamageBoss::new(boss, modifiers.damage).into(),
        at,
        journal,
    )?;
    events.extend(outcome.events);
    let damage = expect_result!(outcome, Damage)?;

    let is_raid = arena.boss(boss).is_some_and(|record| record.is_raid_boss());
    let contribution = if is_raid {
        let record = RecordContribution::new(boss, strike.player.id, damage.dealt);
        let outcome = execute_command(arena, env, &record.into(), at, journal)?;
        events.extend(outcome.events);
        Some(expect_result!(outcome, Contribution)?)
    } else {
        None
    };

    let outcome = execute_command(arena, env, &TrySplit::new(boss).into(), at, journal)?;
    events.extend(outcome.events);
    let split = expect_result!(outcome, Split)?;

    // Only the Raid Boss can relocate; a floor boss rolling `boss_flees` just takes the hit.
    let relocation = if is_raid && modifiers.boss_flees && !damage.defeated {
        match execute_command(arena, env, &Relocate::new(boss).into(), at, journal) {
            Ok(outcome) => {
                events.extend(outcome.events);
                Some(expect_result!(outcome, Relocated)?)
            }
            Err(err) if err.severity() == ErrorSeverity::Recoverable => {
                warn!(%boss, error = %err, "boss could not flee; staying put");
                None
            }
            Err(err) => return Err(err.into()),
        }
    } else {
        None
    };

    Ok(StrikeOutcome {
        modifiers,
        damage,
        contribution,
        split,
        relocation,
        events,
    })
}
