use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use boss_content::ContentFactory;
use boss_core::{BossArena, BossId, PlayerId, RoomId, Timestamp};
use encounter_runtime::{
    ArenaRepository, EncounterRuntime, FileArenaRepository, InMemoryArenaRepo, ManualClock,
    RepositoryError, RuntimeConfig, RuntimeError,
};
use tempfile::TempDir;

const START: Timestamp = Timestamp(1_700_000_000);
const HOLLOW_KING: BossId = BossId(9);

fn bundled_content() -> boss_content::EncounterContent {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    ContentFactory::new(data_dir)
        .load_all()
        .expect("bundled content should load")
}

#[tokio::test]
async fn every_committed_command_is_snapshotted() {
    let temp_dir = TempDir::new().unwrap();
    let config = RuntimeConfig {
        snapshot_dir: Some(temp_dir.path().to_path_buf()),
        epoch_start: START,
        ..RuntimeConfig::default()
    };

    let runtime = EncounterRuntime::builder()
        .config(config)
        .content(bundled_content())
        .clock(ManualClock::new(START))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.activate(HOLLOW_KING, 3).await.unwrap();
    handle.damage(HOLLOW_KING, 100).await.unwrap();
    // Rejected commands do not advance the nonce or write a snapshot.
    handle.activate(HOLLOW_KING, 3).await.unwrap_err();

    let repo = FileArenaRepository::new(temp_dir.path()).unwrap();
    assert_eq!(repo.list_nonces().unwrap(), vec![1, 2]);

    let latest = repo.latest().unwrap().expect("snapshot on disk");
    let raid = latest.boss(HOLLOW_KING).unwrap();
    assert_eq!((raid.hp, raid.hp_max), (800, 900));
}

#[tokio::test]
async fn builder_restores_latest_snapshot() {
    let repository = Arc::new(InMemoryArenaRepo::new());

    let first = EncounterRuntime::builder()
        .content(bundled_content())
        .clock(ManualClock::new(START))
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = first.handle();
    handle.activate(HOLLOW_KING, 5).await.unwrap();
    handle
        .record_contribution(HOLLOW_KING, PlayerId(3), 250)
        .await
        .unwrap();
    drop(handle);
    first.shutdown().await.unwrap();

    // A fresh roster is ignored in favour of the stored arena.
    let second = EncounterRuntime::builder()
        .content(bundled_content())
        .clock(ManualClock::new(START + 60))
        .repository(repository.clone())
        .restore_latest(true)
        .build()
        .await
        .unwrap();
    let arena = second.handle().query_arena().await.unwrap();

    assert_eq!(arena.nonce, 2);
    assert_eq!(arena.boss(HOLLOW_KING).unwrap().hp_max, 1_500);
    let record = arena.contribution(HOLLOW_KING, PlayerId(3)).unwrap();
    assert_eq!(record.total_damage, 250);

    // The bundled Hollow King rolls `lockout`.
    let gate = second
        .handle()
        .can_engage(HOLLOW_KING, PlayerId(3))
        .await
        .unwrap();
    assert!(!gate.is_allowed());
}

#[tokio::test]
async fn restore_without_snapshot_falls_back_to_arena() {
    let runtime = EncounterRuntime::builder()
        .content(bundled_content())
        .repository(Arc::new(InMemoryArenaRepo::new()))
        .restore_latest(true)
        .build()
        .await
        .unwrap();

    let arena = runtime.handle().query_arena().await.unwrap();
    assert_eq!(arena.nonce, 0);
    assert_eq!(arena.boss(BossId(1)).unwrap().room, RoomId(12));
}

#[tokio::test]
async fn restore_without_arena_or_snapshot_fails() {
    let err = EncounterRuntime::builder()
        .repository(Arc::new(InMemoryArenaRepo::new()))
        .restore_latest(true)
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(err, RuntimeError::MissingArena));
}

#[tokio::test]
async fn explicit_snapshot_reports_nonce() {
    let repository = Arc::new(InMemoryArenaRepo::new());
    let runtime = EncounterRuntime::builder()
        .content(bundled_content())
        .repository(repository.clone())
        .build()
        .await
        .unwrap();

    assert_eq!(runtime.handle().snapshot().await.unwrap(), 0);
    assert!(repository.exists(0));
}

/// In-memory store that remembers which thread performed each save.
#[derive(Default)]
struct ThreadTrackingRepo {
    inner: InMemoryArenaRepo,
    save_threads: Mutex<Vec<ThreadId>>,
}

impl ArenaRepository for ThreadTrackingRepo {
    fn save(&self, nonce: u64, arena: &BossArena) -> Result<(), RepositoryError> {
        self.save_threads.lock().unwrap().push(thread::current().id());
        self.inner.save(nonce, arena)
    }

    fn load(&self, nonce: u64) -> Result<Option<BossArena>, RepositoryError> {
        self.inner.load(nonce)
    }

    fn exists(&self, nonce: u64) -> bool {
        self.inner.exists(nonce)
    }

    fn delete(&self, nonce: u64) -> Result<(), RepositoryError> {
        self.inner.delete(nonce)
    }

    fn list_nonces(&self) -> Result<Vec<u64>, RepositoryError> {
        self.inner.list_nonces()
    }
}

#[tokio::test]
async fn snapshots_are_written_off_the_worker_thread() {
    let repository = Arc::new(ThreadTrackingRepo::default());
    let runtime = EncounterRuntime::builder()
        .content(bundled_content())
        .clock(ManualClock::new(START))
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.activate(HOLLOW_KING, 2).await.unwrap();
    handle.damage(HOLLOW_KING, 50).await.unwrap();

    // The write has finished by the time the command replies.
    assert_eq!(repository.list_nonces().unwrap(), vec![1, 2]);

    // The test's current-thread runtime also drives the worker task.
    let runtime_thread = thread::current().id();
    let save_threads = repository.save_threads.lock().unwrap().clone();
    assert_eq!(save_threads.len(), 2);
    assert!(save_threads.iter().all(|id| *id != runtime_thread));
}
