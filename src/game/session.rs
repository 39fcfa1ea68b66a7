//! Session state machine.
//!
//! A [`Session`] owns everything a game needs: configuration, the rope, both
//! player slots, the random source and a logical clock. Time only moves when
//! the caller advances it, which keeps the whole game deterministic for a
//! given seed and input sequence and lets it run headless.
//!
//! ```text
//!  Start ──begin──▶ Countdown ──(4 s)──▶ Playing ──win──▶ End
//!                      ▲                                   │
//!                      └──────────────restart──────────────┘
//! ```

use crate::config::Config;
use crate::error::ConfigError;
use crate::game::scheduler::Scheduler;
use crate::game::{CountdownLabel, GameEvent, Phase, PlayerSlot, Rope, Slot, generate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

/// First value shown by the countdown.
pub const COUNTDOWN_FROM: u8 = 3;

/// Time between countdown steps, and between "Fight" and play.
pub const COUNTDOWN_STEP_MS: u64 = 1000;

/// Delay before a new problem after a correct answer.
pub const CORRECT_REGEN_MS: u64 = 200;

/// Delay before a new problem after a wrong answer.
pub const INCORRECT_REGEN_MS: u64 = 400;

/// Delay between the winning answer and the winner overlay.
pub const REVEAL_DELAY_MS: u64 = 500;

/// Work deferred onto the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Countdown(CountdownLabel),
    StartPlaying,
    Regenerate(Slot),
    RevealWinner(Slot),
}

/// One local two-player game.
#[derive(Debug)]
pub struct Session {
    config: Config,
    rng: StdRng,
    phase: Phase,
    rope: Rope,
    slots: [PlayerSlot; 2],
    countdown: Option<CountdownLabel>,
    winner: Option<Slot>,
    epoch: u64,
    now_ms: u64,
    scheduler: Scheduler<Timer>,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a session in the [`Phase::Start`] phase.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(seed, "session created");

        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::Start,
            rope: Rope::default(),
            slots: [PlayerSlot::default(); 2],
            countdown: None,
            winner: None,
            epoch: 0,
            now_ms: 0,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current rope position.
    #[must_use]
    pub const fn rope_position(&self) -> f64 {
        self.rope.position()
    }

    /// The rope.
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Derived power bar value for `slot`.
    #[must_use]
    pub fn power(&self, slot: Slot) -> u8 {
        self.rope.power(&self.config, slot)
    }

    /// Round state of `slot`.
    #[must_use]
    pub const fn slot(&self, slot: Slot) -> &PlayerSlot {
        &self.slots[slot.index()]
    }

    /// Winner of the last finished round, while in [`Phase::End`].
    #[must_use]
    pub const fn winner(&self) -> Option<Slot> {
        self.winner
    }

    /// Countdown step currently shown, while in [`Phase::Countdown`].
    #[must_use]
    pub const fn countdown_label(&self) -> Option<CountdownLabel> {
        self.countdown
    }

    /// Logical time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Round epoch; timers from older epochs are discarded.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Logical time of the next pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Take every event emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leave the start screen and begin the countdown.
    ///
    /// Returns `false` (and does nothing) outside [`Phase::Start`].
    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Start {
            trace!(phase = ?self.phase, "begin ignored");
            return false;
        }
        self.start_countdown();
        true
    }

    /// Start another round after a win.
    ///
    /// Returns `false` (and does nothing) outside [`Phase::End`].
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::End {
            trace!(phase = ?self.phase, "restart ignored");
            return false;
        }
        self.start_countdown();
        true
    }

    /// Return to the start screen, dropping all pending timers.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.scheduler.clear();
        self.rope.reset();
        for slot in &mut self.slots {
            slot.clear();
        }
        self.countdown = None;
        self.winner = None;
        self.set_phase(Phase::Start);
        self.emit(GameEvent::RopePositionChanged(self.rope.position()));
        debug!(epoch = self.epoch, "session reset");
    }

    /// Judge `value` as `slot`'s answer to its current problem.
    ///
    /// Returns `Some(correct)` if the answer was judged, or `None` when it
    /// was ignored: outside [`Phase::Playing`], or while the slot waits for
    /// its next problem.
    pub fn submit_answer(&mut self, slot: Slot, value: u32) -> Option<bool> {
        if self.phase != Phase::Playing {
            trace!(%slot, phase = ?self.phase, "answer ignored");
            return None;
        }
        let state = &mut self.slots[slot.index()];
        if !state.accepts_answers() {
            trace!(%slot, "answer ignored while locked");
            return None;
        }
        let correct = state.problem()?.is_correct(value);
        state.lock();

        trace!(%slot, value, correct, "answer judged");
        self.emit(GameEvent::AnswerJudged { slot, correct });

        let delay = if correct {
            CORRECT_REGEN_MS
        } else {
            INCORRECT_REGEN_MS
        };
        self.schedule(delay, Timer::Regenerate(slot));

        let winner = self.rope.apply(&self.config, slot, correct);
        if let Some(winner) = winner {
            self.rope.clamp_to_zone(&self.config, winner);
        }
        self.emit(GameEvent::RopePositionChanged(self.rope.position()));

        if let Some(winner) = winner {
            self.end(winner);
        }

        Some(correct)
    }

    /// Move the clock forward by `elapsed_ms`, firing due timers.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.advance_to(self.now_ms.saturating_add(elapsed_ms));
    }

    /// Move the clock to `now_ms`, firing due timers in order.
    ///
    /// The clock never runs backwards; an earlier `now_ms` is a no-op.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(entry) = self.scheduler.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(entry.due_ms);
            if entry.epoch != self.epoch {
                trace!(task = ?entry.task, epoch = entry.epoch, "stale timer discarded");
                continue;
            }
            self.fire(entry.task);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::Countdown(label) => self.countdown_step(label),
            Timer::StartPlaying => self.start_playing(),
            Timer::Regenerate(slot) => {
                // Problems freeze once the round is decided
                if self.phase == Phase::Playing {
                    self.new_problem(slot);
                }
            }
            Timer::RevealWinner(slot) => {
                if self.phase == Phase::End {
                    self.emit(GameEvent::WinnerRevealed(slot));
                }
            }
        }
    }

    fn start_countdown(&mut self) {
        self.epoch += 1;
        self.winner = None;
        self.set_phase(Phase::Countdown);
        debug!(epoch = self.epoch, "countdown started");
        self.countdown_step(CountdownLabel::Count(COUNTDOWN_FROM));
    }

    fn countdown_step(&mut self, label: CountdownLabel) {
        self.countdown = Some(label);
        self.emit(GameEvent::CountdownTick(label));

        let next = match label {
            CountdownLabel::Count(n) if n > 1 => Timer::Countdown(CountdownLabel::Count(n - 1)),
            CountdownLabel::Count(_) => Timer::Countdown(CountdownLabel::Fight),
            CountdownLabel::Fight => Timer::StartPlaying,
        };
        self.schedule(COUNTDOWN_STEP_MS, next);
    }

    fn start_playing(&mut self) {
        self.countdown = None;
        self.rope.reset();
        self.set_phase(Phase::Playing);
        self.emit(GameEvent::RopePositionChanged(self.rope.position()));
        for slot in Slot::ALL {
            self.new_problem(slot);
        }
    }

    fn end(&mut self, winner: Slot) {
        self.winner = Some(winner);
        self.set_phase(Phase::End);
        self.emit(GameEvent::GameEnded(winner));
        self.schedule(REVEAL_DELAY_MS, Timer::RevealWinner(winner));
        debug!(%winner, epoch = self.epoch, "round won");
    }

    fn new_problem(&mut self, slot: Slot) {
        let problem = generate(&self.config, &mut self.rng);
        self.slots[slot.index()].assign(problem);
        self.emit(GameEvent::ProblemChanged { slot, problem });
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
        self.emit(GameEvent::PhaseChanged(phase));
    }

    fn schedule(&mut self, delay_ms: u64, timer: Timer) {
        self.scheduler
            .schedule(self.now_ms.saturating_add(delay_ms), self.epoch, timer);
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SlotStatus;

    /// Time from `begin` until play starts.
    const TO_PLAYING_MS: u64 = 4 * COUNTDOWN_STEP_MS;

    fn playing_session(seed: u64) -> Session {
        let mut session = Session::new(Config::default(), seed).unwrap();
        assert!(session.begin());
        session.advance(TO_PLAYING_MS);
        assert_eq!(session.phase(), Phase::Playing);
        session.drain_events();
        session
    }

    fn answer(session: &Session, slot: Slot) -> u32 {
        session.slot(slot).problem().unwrap().answer
    }

    fn wrong_answer(session: &Session, slot: Slot) -> u32 {
        let p = session.slot(slot).problem().unwrap();
        *p.options.iter().find(|&&o| o != p.answer).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = Config {
            win_zone_width: 55.0,
            ..Config::default()
        };
        assert!(Session::new(config, 1).is_err());
    }

    #[test]
    fn test_countdown_sequence() {
        let mut session = Session::new(Config::default(), 1).unwrap();
        assert!(session.begin());
        assert_eq!(session.phase(), Phase::Countdown);
        assert_eq!(session.countdown_label(), Some(CountdownLabel::Count(3)));

        session.advance(1000);
        assert_eq!(session.countdown_label(), Some(CountdownLabel::Count(2)));
        session.advance(1000);
        assert_eq!(session.countdown_label(), Some(CountdownLabel::Count(1)));
        session.advance(1000);
        assert_eq!(session.countdown_label(), Some(CountdownLabel::Fight));
        session.advance(999);
        assert_eq!(session.phase(), Phase::Countdown);
        session.advance(1);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.countdown_label(), None);

        let ticks: Vec<CountdownLabel> = session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::CountdownTick(label) => Some(label),
                _ => None,
            })
            .collect();
        assert_eq!(
            ticks,
            vec![
                CountdownLabel::Count(3),
                CountdownLabel::Count(2),
                CountdownLabel::Count(1),
                CountdownLabel::Fight,
            ]
        );
    }

    #[test]
    fn test_playing_starts_fresh() {
        let session = playing_session(5);
        assert!((session.rope_position() - 50.0).abs() < 1e-9);
        for slot in Slot::ALL {
            assert!(session.slot(slot).problem().is_some());
            assert_eq!(session.slot(slot).status(), SlotStatus::Idle);
        }
    }

    #[test]
    fn test_begin_only_from_start() {
        let mut session = playing_session(2);
        assert!(!session.begin());
        assert!(!session.restart());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_correct_answer_regenerates_after_200ms() {
        let mut session = playing_session(3);
        let before = *session.slot(Slot::P1).problem().unwrap();

        let value = answer(&session, Slot::P1);
        assert_eq!(session.submit_answer(Slot::P1, value), Some(true));
        assert!((session.rope_position() - 45.0).abs() < 1e-9);
        assert_eq!(session.slot(Slot::P1).status(), SlotStatus::Locked);

        session.advance(199);
        assert_eq!(session.slot(Slot::P1).status(), SlotStatus::Locked);
        assert_eq!(*session.slot(Slot::P1).problem().unwrap(), before);

        session.advance(1);
        assert_eq!(session.slot(Slot::P1).status(), SlotStatus::Idle);
        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::ProblemChanged { slot: Slot::P1, .. }
        )));
    }

    #[test]
    fn test_wrong_answer_regenerates_after_400ms() {
        let mut session = playing_session(4);

        let value = wrong_answer(&session, Slot::P2);
        assert_eq!(session.submit_answer(Slot::P2, value), Some(false));
        assert!((session.rope_position() - 47.0).abs() < 1e-9);

        session.advance(399);
        assert_eq!(session.slot(Slot::P2).status(), SlotStatus::Locked);
        session.advance(1);
        assert_eq!(session.slot(Slot::P2).status(), SlotStatus::Idle);
    }

    #[test]
    fn test_double_submit_ignored_while_locked() {
        let mut session = playing_session(6);
        let value = answer(&session, Slot::P1);

        assert_eq!(session.submit_answer(Slot::P1, value), Some(true));
        assert_eq!(session.submit_answer(Slot::P1, value), None);
        assert!((session.rope_position() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_event_order_for_answer() {
        let mut session = playing_session(8);
        let value = answer(&session, Slot::P2);
        session.submit_answer(Slot::P2, value);

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::AnswerJudged {
                    slot: Slot::P2,
                    correct: true
                },
                GameEvent::RopePositionChanged(55.0),
            ]
        );
    }

    #[test]
    fn test_win_clamps_and_ends() {
        let mut session = playing_session(9);

        for _ in 0..7 {
            let value = answer(&session, Slot::P1);
            assert_eq!(session.submit_answer(Slot::P1, value), Some(true));
            session.advance(CORRECT_REGEN_MS);
        }

        assert_eq!(session.phase(), Phase::End);
        assert_eq!(session.winner(), Some(Slot::P1));
        assert!((session.rope_position() - 16.66).abs() < 1e-9);
        assert_eq!(session.power(Slot::P1), 100);
    }

    #[test]
    fn test_winner_revealed_after_delay() {
        let mut session = playing_session(10);
        for _ in 0..7 {
            let value = answer(&session, Slot::P2);
            session.submit_answer(Slot::P2, value);
            if session.phase() == Phase::End {
                break;
            }
            session.advance(CORRECT_REGEN_MS);
        }
        session.drain_events();

        session.advance(REVEAL_DELAY_MS - 1);
        assert!(session.drain_events().is_empty());
        session.advance(1);
        assert_eq!(session.drain_events(), vec![GameEvent::WinnerRevealed(Slot::P2)]);
    }

    #[test]
    fn test_restart_discards_stale_timers() {
        let mut session = playing_session(12);
        for _ in 0..7 {
            let value = answer(&session, Slot::P1);
            session.submit_answer(Slot::P1, value);
            if session.phase() == Phase::End {
                break;
            }
            session.advance(CORRECT_REGEN_MS);
        }
        assert_eq!(session.phase(), Phase::End);
        let old_epoch = session.epoch();

        // Restart before the reveal and regeneration timers fire.
        assert!(session.restart());
        assert_eq!(session.epoch(), old_epoch + 1);
        session.drain_events();

        session.advance(REVEAL_DELAY_MS);
        let events = session.drain_events();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::WinnerRevealed(_))));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ProblemChanged { .. })));
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut session = playing_session(13);
        let value = answer(&session, Slot::P1);
        session.submit_answer(Slot::P1, value);

        session.reset();
        assert_eq!(session.phase(), Phase::Start);
        assert!(session.slot(Slot::P1).problem().is_none());
        assert!(session.next_due().is_none());
        assert!((session.rope_position() - 50.0).abs() < 1e-9);
        assert!(session.begin());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut session = Session::new(Config::default(), 1).unwrap();
        session.advance_to(500);
        session.advance_to(100);
        assert_eq!(session.now_ms(), 500);
    }
}
