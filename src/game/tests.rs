//! Whole-round scenarios driven in simulated time.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::{ConfigError, StoreError};
use crate::game::effects::{Burst, Celebration};
use crate::game::store::{BestScoreStore, MemoryStore};
use crate::game::timers::{VirtualHandle, VirtualTimers};
use crate::game::{HitOutcome, Miss, Phase, Round, Slot, Snapshot, Timer};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Burst>>>);

impl Recorder {
    fn count(&self, burst: &Burst) -> usize {
        self.0.borrow().iter().filter(|b| *b == burst).count()
    }

    fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl Celebration for Recorder {
    fn celebrate(&mut self, burst: &Burst) {
        self.0.borrow_mut().push(*burst);
    }
}

struct BrokenStore;

impl BestScoreStore for BrokenStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        Err(io::Error::other("disk gone").into())
    }

    fn write(&mut self, _best: u32) -> Result<(), StoreError> {
        Err(io::Error::other("disk gone").into())
    }
}

struct Game {
    round: Round<VirtualHandle>,
    timers: VirtualTimers,
    store: MemoryStore,
    bursts: Recorder,
}

impl Game {
    fn new(config: GameConfig) -> Self {
        Self::with_store(config, MemoryStore::new())
    }

    fn with_store(config: GameConfig, store: MemoryStore) -> Self {
        let bursts = Recorder::default();
        let round = Round::new(
            config,
            Box::new(store.clone()),
            Box::new(bursts.clone()),
            Box::new(StdRng::seed_from_u64(42)),
        )
        .expect("valid config");
        Self {
            round,
            timers: VirtualTimers::new(),
            store,
            bursts,
        }
    }

    fn start(&mut self) {
        self.round.start_round(&mut self.timers);
    }

    fn end(&mut self) {
        self.round.end_round(&mut self.timers);
    }

    fn hit(&mut self, index: usize) -> HitOutcome {
        self.round.attempt_hit(index, &mut self.timers)
    }

    fn spawn(&mut self, index: usize) -> u64 {
        self.round.force_spawn(index, &mut self.timers)
    }

    fn advance_ms(&mut self, ms: u64) {
        let round = &mut self.round;
        self.timers.advance(Duration::from_millis(ms), |timers, timer| {
            round.fire(timer, timers);
        });
    }

    fn snapshot(&self) -> Snapshot {
        self.round.snapshot()
    }

    fn slot(&self, index: usize) -> Slot {
        self.round.snapshot().slots[index]
    }

    fn armed(&self, select: impl Fn(&Timer) -> bool) -> usize {
        self.timers.pending().filter(|(_, timer)| select(timer)).count()
    }
}

/// Default timings, but spawn ticks too far apart to fire within a round.
fn quiet() -> GameConfig {
    GameConfig {
        min_pop_interval_ms: 60_000,
        max_pop_interval_ms: 60_000,
        ..GameConfig::default()
    }
}

fn is_clock_or_spawn(timer: &Timer) -> bool {
    matches!(timer, Timer::ClockTick { .. } | Timer::SpawnTick { .. })
}

#[test]
fn test_new_controller_is_idle() {
    let game = Game::new(GameConfig::default());
    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.time_remaining, 30);
    assert_eq!(snapshot.slots.len(), 9);
    assert_eq!(game.timers.pending().count(), 0);
}

#[test]
fn test_start_round_arms_clock_and_spawns_immediately() {
    let mut game = Game::new(GameConfig::default());
    game.start();

    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, Phase::Active);
    assert_eq!(snapshot.slots.iter().filter(|s| s.visible).count(), 1);
    assert_eq!(game.armed(|t| matches!(t, Timer::ClockTick { round: 1 })), 1);
    assert_eq!(game.armed(|t| matches!(t, Timer::SpawnTick { round: 1 })), 1);
    assert_eq!(game.armed(|t| matches!(t, Timer::Dwell { round: 1, .. })), 1);
}

#[test]
fn test_forced_mole_hit_scores_and_clears_after_reset_delay() {
    let mut game = Game::new(GameConfig::default());
    game.start();
    game.spawn(3);

    assert_eq!(game.hit(3), HitOutcome::Scored { index: 3, score: 10 });
    assert_eq!(game.slot(3), Slot { visible: true, hit: true });
    assert_eq!(game.bursts.count(&Burst::HIT), 1);

    game.advance_ms(199);
    assert_eq!(game.slot(3), Slot { visible: true, hit: true });
    game.advance_ms(1);
    assert_eq!(game.slot(3), Slot::EMPTY);
    assert_eq!(game.round.score(), 10);
}

#[test]
fn test_round_without_hits_ends_when_clock_runs_out() {
    let mut game = Game::new(GameConfig { round_duration: 30, ..GameConfig::default() });
    game.start();

    let mut seen = Vec::new();
    for second in 1..=30 {
        game.advance_ms(1000);
        seen.push(game.round.time_remaining());
        let expected = if second < 30 { Phase::Active } else { Phase::Ended };
        assert_eq!(game.round.phase(), expected, "after {}s", second);
    }
    assert_eq!(seen, (0..30).rev().collect::<Vec<u32>>());

    game.advance_ms(5000);
    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, Phase::Ended);
    assert_eq!(snapshot.time_remaining, 0);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.best_score, 0);
    assert_eq!(game.store.value(), None);
    assert_eq!(game.bursts.count(&Burst::NEW_BEST), 0);
    assert_eq!(game.armed(is_clock_or_spawn), 0);
}

#[test]
fn test_nothing_changes_after_round_end() {
    let mut game = Game::new(GameConfig::default());
    game.start();
    game.spawn(0);
    game.spawn(1);
    game.hit(1);
    game.advance_ms(100);

    game.end();
    assert_eq!(game.round.phase(), Phase::Ended);
    assert_eq!(game.armed(is_clock_or_spawn), 0);

    let frozen = game.snapshot();
    let bursts = game.bursts.0.borrow().len();
    game.advance_ms(10_000);

    assert_eq!(game.snapshot(), frozen);
    assert_eq!(game.bursts.0.borrow().len(), bursts);
    assert_eq!(game.timers.pending().count(), 0);
}

#[test]
fn test_full_board_spawn_tick_only_rearms() {
    let mut game = Game::new(GameConfig { mole_count: 3, ..GameConfig::default() });
    game.start();
    for index in 0..3 {
        game.spawn(index);
    }
    let full = game.snapshot();
    assert!(full.slots.iter().all(|s| s.visible));
    let dwells = game.armed(|t| matches!(t, Timer::Dwell { .. }));

    let tick = game
        .timers
        .take(|t| matches!(t, Timer::SpawnTick { .. }))
        .expect("spawn tick armed");
    assert!(!game.round.fire(tick, &mut game.timers));

    assert_eq!(game.snapshot(), full);
    assert_eq!(game.armed(|t| matches!(t, Timer::Dwell { .. })), dwells);
    assert_eq!(game.armed(|t| matches!(t, Timer::SpawnTick { .. })), 1);
}

#[test]
fn test_hit_on_hidden_slot_changes_nothing() {
    let mut game = Game::new(quiet());
    game.start();
    let hidden = game
        .snapshot()
        .slots
        .iter()
        .position(|s| !s.visible)
        .expect("one mole leaves eight hidden slots");
    let before = game.snapshot();
    let armed = game.timers.pending().count();

    assert_eq!(game.hit(hidden), HitOutcome::Missed(Miss::NotVisible));
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.timers.pending().count(), armed);
    assert!(game.bursts.is_empty());
}

#[test]
fn test_hits_outside_active_round_are_ignored() {
    let mut game = Game::new(quiet());
    assert_eq!(game.hit(0), HitOutcome::Missed(Miss::NotActive));

    game.start();
    game.spawn(2);
    game.end();
    let ended = game.snapshot();
    assert!(ended.slots[2].visible);

    assert_eq!(game.hit(2), HitOutcome::Missed(Miss::NotActive));
    assert_eq!(game.snapshot(), ended);
    assert!(game.bursts.is_empty());
}

#[test]
fn test_second_hit_on_same_mole_is_ignored() {
    let mut game = Game::new(quiet());
    game.start();
    game.spawn(2);

    assert_eq!(game.hit(2), HitOutcome::Scored { index: 2, score: 10 });
    assert_eq!(game.hit(2), HitOutcome::Missed(Miss::AlreadyHit));
    assert_eq!(game.hit(42), HitOutcome::Missed(Miss::OutOfRange));
    assert_eq!(game.round.score(), 10);
    assert_eq!(game.bursts.count(&Burst::HIT), 1);
}

#[test]
fn test_stale_dwell_does_not_hide_new_occupant() {
    let mut game = Game::new(GameConfig { mole_count: 1, ..quiet() });
    game.start();
    assert!(game.slot(0).visible);

    game.hit(0);
    game.advance_ms(200);
    assert_eq!(game.slot(0), Slot::EMPTY);

    game.spawn(0);
    game.advance_ms(800);
    assert_eq!(game.slot(0), Slot { visible: true, hit: false });

    game.advance_ms(200);
    assert_eq!(game.slot(0), Slot::EMPTY);
}

#[test]
fn test_late_hit_is_cleared_by_dwell_first() {
    let mut game = Game::new(quiet());
    game.start();
    game.spawn(4);

    game.advance_ms(900);
    assert_eq!(game.hit(4), HitOutcome::Scored { index: 4, score: 10 });
    game.advance_ms(100);
    assert_eq!(game.slot(4), Slot::EMPTY);
    game.advance_ms(100);
    assert_eq!(game.slot(4), Slot::EMPTY);
    assert_eq!(game.round.score(), 10);
}

#[test]
fn test_timers_from_previous_round_are_inert() {
    let mut game = Game::new(quiet());
    game.start();
    let first = game.snapshot().hittable().next().expect("initial mole");
    game.hit(first);
    game.advance_ms(100);

    game.start();
    assert_eq!(game.round.round_number(), 2);
    assert_eq!(game.round.score(), 0);
    assert_eq!(game.armed(|t| matches!(t, Timer::ClockTick { .. })), 1);
    assert_eq!(game.armed(|t| matches!(t, Timer::SpawnTick { .. })), 1);
    game.spawn(first);

    // Round one's cleanup (t=200) and dwell (t=1000) both pass here.
    game.advance_ms(150);
    assert_eq!(game.slot(first), Slot { visible: true, hit: false });
    game.advance_ms(800);
    assert_eq!(game.slot(first), Slot { visible: true, hit: false });
    assert_eq!(game.round.time_remaining(), 30);

    game.advance_ms(100);
    assert_eq!(game.slot(first), Slot::EMPTY);
    assert_eq!(game.round.time_remaining(), 29);
}

#[test]
fn test_new_best_is_persisted_and_celebrated_once() {
    let mut game = Game::new(quiet());
    game.start();
    for index in 0..3 {
        game.spawn(index);
        game.hit(index);
    }
    assert_eq!(game.round.score(), 30);

    game.advance_ms(30_000);
    assert_eq!(game.round.phase(), Phase::Ended);
    assert_eq!(game.round.best_score(), 30);
    assert_eq!(game.store.value(), Some(30));
    assert_eq!(game.bursts.count(&Burst::NEW_BEST), 1);
    assert_eq!(game.bursts.count(&Burst::HIT), 3);

    game.end();
    assert_eq!(game.bursts.count(&Burst::NEW_BEST), 1);

    game.start();
    game.advance_ms(30_000);
    assert_eq!(game.round.phase(), Phase::Ended);
    assert_eq!(game.round.score(), 0);
    assert_eq!(game.round.best_score(), 30);
    assert_eq!(game.bursts.count(&Burst::NEW_BEST), 1);
}

#[test]
fn test_stored_best_is_kept_when_not_beaten() {
    let mut game = Game::with_store(quiet(), MemoryStore::with_value(50));
    assert_eq!(game.snapshot().best_score, 50);

    game.start();
    for index in 0..2 {
        game.spawn(index);
        game.hit(index);
    }
    game.advance_ms(30_000);

    assert_eq!(game.round.score(), 20);
    assert_eq!(game.round.best_score(), 50);
    assert_eq!(game.store.value(), Some(50));
    assert_eq!(game.bursts.count(&Burst::NEW_BEST), 0);
}

#[test]
fn test_broken_store_does_not_stop_play() {
    let bursts = Recorder::default();
    let mut round: Round<VirtualHandle> = Round::new(
        quiet(),
        Box::new(BrokenStore),
        Box::new(bursts.clone()),
        Box::new(StdRng::seed_from_u64(5)),
    )
    .unwrap();
    let mut timers = VirtualTimers::new();
    assert_eq!(round.best_score(), 0);

    round.start_round(&mut timers);
    let index = round.snapshot().hittable().next().expect("initial mole");
    round.attempt_hit(index, &mut timers);
    round.end_round(&mut timers);

    assert_eq!(round.best_score(), 10);
    assert_eq!(bursts.count(&Burst::NEW_BEST), 1);
}

#[test]
fn test_invariants_hold_over_a_played_round() {
    let mut game = Game::new(GameConfig::default());
    game.start();

    let mut last_score = 0;
    let mut zero_ticks = 0;
    let mut last_time = game.round.time_remaining();

    for _ in 0..(31_000 / 50) {
        let targets: Vec<usize> = match game.round.phase() {
            Phase::Active => game.snapshot().hittable().collect(),
            _ => Vec::new(),
        };
        for index in targets {
            let before = game.snapshot();
            game.hit(index);
            let after = game.snapshot();
            let changed = before
                .slots
                .iter()
                .zip(after.slots.iter())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1);
        }

        game.advance_ms(50);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.score % 10, 0);
        assert!(snapshot.score >= last_score);
        assert!(snapshot.time_remaining <= 30);
        assert!(snapshot.slots.iter().all(|s| !s.hit || s.visible));
        if snapshot.phase == Phase::Active {
            assert!(game.armed(|t| matches!(t, Timer::ClockTick { .. })) <= 1);
            assert!(game.armed(|t| matches!(t, Timer::SpawnTick { .. })) <= 1);
        }
        if snapshot.time_remaining == 0 && last_time != 0 {
            zero_ticks += 1;
        }
        last_score = snapshot.score;
        last_time = snapshot.time_remaining;
    }

    assert_eq!(zero_ticks, 1);
    assert_eq!(game.round.phase(), Phase::Ended);
    assert!(game.round.score() > 0);
    assert_eq!(game.round.best_score(), game.round.score());
    assert_eq!(game.store.value(), Some(game.round.score()));
}

#[test]
fn test_unplayable_config_is_rejected_before_any_round() {
    let inverted = GameConfig {
        min_pop_interval_ms: 2000,
        max_pop_interval_ms: 1000,
        ..GameConfig::default()
    };
    let zero_pause = GameConfig {
        min_pop_interval_ms: 0,
        max_pop_interval_ms: 0,
        ..GameConfig::default()
    };

    for (config, expected) in [(inverted, (2000, 1000)), (zero_pause, (0, 0))] {
        let result: Result<Round<VirtualHandle>, ConfigError> = Round::new(
            config,
            Box::new(MemoryStore::new()),
            Box::new(Recorder::default()),
            Box::new(StdRng::seed_from_u64(1)),
        );
        match result {
            Err(ConfigError::PopInterval { min, max }) => assert_eq!((min, max), expected),
            Err(err) => panic!("unexpected error: {}", err),
            Ok(_) => panic!("config should have been rejected"),
        }
    }

    let empty = GameConfig { mole_count: 0, ..GameConfig::default() };
    let result: Result<Round<VirtualHandle>, ConfigError> = Round::new(
        empty,
        Box::new(MemoryStore::new()),
        Box::new(Recorder::default()),
        Box::new(StdRng::seed_from_u64(1)),
    );
    assert!(matches!(result, Err(ConfigError::EmptyBoard)));
}
