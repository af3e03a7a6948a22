//! Wheel Engine
//!
//! Owns the animation state machine:
//!
//! ```text
//!   Idle ──request_spin──▶ Spinning ──tween done──▶ Settled
//!    ▲                        │                        │
//!    └──────request_reset─────┴────────────────────────┘
//! ```
//!
//! All transitions happen on `&mut self`, either from an explicit request or
//! from a frame handed back by the [`FrameScheduler`]. At most one frame
//! request is outstanding at any time; starting a spin or resetting cancels it
//! before anything new is scheduled.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::core::angle::normalize_degrees;
use crate::core::rng::RandomSource;
use crate::MIN_SPIN_ENTRIES;

use super::animation::{ActiveSpin, AnimationState, SettledSpin, SpinTween, WheelPhase};
use super::entries::{EntrySet, WeightMap};
use super::error::WheelError;
use super::events::{WheelEvent, WheelEventData};
use super::locator::segment_at;
use super::planner::RotationPlanner;
use super::scheduler::{FrameHandle, FrameScheduler, Millis, VirtualScheduler};
use super::selection::{select_index, select_uniform};
use super::weights::Distribution;

/// Returned when a spin is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinTicket {
    /// Sequence number of the spin.
    pub spin_id: u32,
    /// Index drawn by the selection engine.
    pub expected_index: usize,
    /// Entry at `expected_index`.
    pub expected_winner: String,
    /// Planned stop angle.
    pub target_angle: f64,
    /// Extra full turns in the plan.
    pub extra_turns: u32,
    /// Set when the supplied weights were rejected and the spin used a
    /// uniform distribution instead.
    pub weight_fallback: Option<WheelError>,
}

/// Observable wheel state, refreshed every frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    /// Current rotation (degrees).
    pub angle: f64,
    /// Current phase.
    pub phase: WheelPhase,
    /// Spin in flight or settled, if any.
    pub spin_id: Option<u32>,
    /// Settled winner, if any.
    pub winner: Option<String>,
}

/// The selection and rotation engine.
pub struct WheelEngine<S: FrameScheduler, R: RandomSource> {
    config: EngineConfig,
    planner: RotationPlanner,
    scheduler: S,
    rng: R,
    state: AnimationState,
    angle: f64,
    pending_frame: Option<FrameHandle>,
    next_spin_id: u32,
    events: Vec<WheelEvent>,
}

impl<S: FrameScheduler, R: RandomSource> WheelEngine<S, R> {
    /// Create an idle engine and start the idle driver.
    pub fn new(config: EngineConfig, scheduler: S, rng: R) -> Self {
        let planner = RotationPlanner::new(config.min_extra_turns, config.max_extra_turns);
        let mut engine = Self {
            config,
            planner,
            scheduler,
            rng,
            state: AnimationState::Idle,
            angle: 0.0,
            pending_frame: None,
            next_spin_id: 1,
            events: Vec::new(),
        };
        engine.start_idle();
        engine
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Start a spin over a snapshot of `entries`.
    ///
    /// `weights` is read once. A missing or empty map means uniform odds; an
    /// invalid one is reported on the ticket and replaced by uniform odds.
    /// Refused without any state change while a spin is in flight or with
    /// fewer than two entries. Spinning from `Settled` clears the previous
    /// winner first.
    pub fn request_spin(
        &mut self,
        entries: impl Into<EntrySet>,
        weights: Option<&WeightMap>,
    ) -> Result<SpinTicket, WheelError> {
        if matches!(self.state, AnimationState::Spinning(_)) {
            debug!("Spin refused: already spinning");
            return Err(WheelError::AlreadySpinning);
        }

        let entries: EntrySet = entries.into();
        if entries.len() < MIN_SPIN_ENTRIES {
            debug!("Spin refused: {} entries", entries.len());
            return Err(WheelError::InsufficientEntries {
                count: entries.len(),
                required: MIN_SPIN_ENTRIES,
            });
        }

        let now = self.scheduler.now();
        let spin_id = self.next_spin_id;

        let weighted = weights
            .filter(|w| !w.is_empty())
            .map(|w| Distribution::from_weights(&entries, Some(w)));
        let (distribution, weight_fallback) = match weighted {
            None => (None, None),
            Some(Ok(distribution)) => (Some(distribution), None),
            Some(Err(err)) => {
                warn!("Spin {}: {}; using uniform odds", spin_id, err);
                self.events.push(WheelEvent::new(
                    now,
                    spin_id,
                    WheelEventData::WeightsRejected {
                        reason: err.to_string(),
                    },
                ));
                (None, Some(err))
            }
        };

        let expected_index = match &distribution {
            Some(distribution) => select_index(distribution, &mut self.rng),
            None => select_uniform(entries.len(), &mut self.rng),
        };

        self.cancel_pending_frame();
        if let AnimationState::Settled(previous) = &self.state {
            self.events
                .push(WheelEvent::new(now, previous.spin_id, WheelEventData::WinnerCleared));
        }

        // Visually identical; keeps the tween short of float trouble
        let start_angle = normalize_degrees(self.angle);
        self.angle = start_angle;

        let plan = self
            .planner
            .plan(expected_index, entries.len(), start_angle, &mut self.rng);

        info!(
            "Spin {} started: {} entries, aiming at #{} ({:?}), target {:.2}° (+{} turns)",
            spin_id,
            entries.len(),
            expected_index,
            entries.name(expected_index).unwrap_or_default(),
            plan.target_angle,
            plan.extra_turns
        );

        let ticket = SpinTicket {
            spin_id,
            expected_index,
            expected_winner: entries.name(expected_index).unwrap_or_default().to_string(),
            target_angle: plan.target_angle,
            extra_turns: plan.extra_turns,
            weight_fallback,
        };

        self.events.push(WheelEvent::spin_started(
            now,
            spin_id,
            entries.len(),
            expected_index,
            plan.target_angle,
            plan.extra_turns,
        ));

        self.state = AnimationState::Spinning(ActiveSpin {
            spin_id,
            entries,
            tween: SpinTween {
                start_angle,
                target_angle: plan.target_angle,
                start_time: now,
                duration: self.config.spin_duration_ms,
            },
            expected_index,
            last_segment: None,
        });
        self.next_spin_id = self.next_spin_id.wrapping_add(1);
        self.schedule_frame();

        Ok(ticket)
    }

    /// Return to `Idle`, cancelling a spin in flight or clearing a settled
    /// winner. Returns `false` if the wheel was already idle.
    pub fn request_reset(&mut self) -> bool {
        let now = self.scheduler.now();

        match std::mem::take(&mut self.state) {
            AnimationState::Idle => return false,
            AnimationState::Spinning(spin) => {
                info!("Spin {} cancelled at {:.2}°", spin.spin_id, self.angle);
                self.events.push(WheelEvent::new(
                    now,
                    spin.spin_id,
                    WheelEventData::SpinCancelled { angle: self.angle },
                ));
            }
            AnimationState::Settled(settled) => {
                debug!("Spin {} winner cleared", settled.spin_id);
                self.events
                    .push(WheelEvent::new(now, settled.spin_id, WheelEventData::WinnerCleared));
            }
        }

        self.cancel_pending_frame();
        self.start_idle();
        true
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Deliver every due frame from the scheduler and drain the event queue.
    pub fn pump(&mut self) -> Vec<WheelEvent> {
        for handle in self.scheduler.take_due() {
            self.on_frame(handle);
        }
        self.drain_events()
    }

    /// Handle one frame callback. Handles other than the outstanding request
    /// are stale and ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame != Some(handle) {
            trace!("Ignoring stale frame {}", handle.id());
            return;
        }
        self.pending_frame = None;

        let now = self.scheduler.now();
        match self.state.phase() {
            WheelPhase::Idle => self.advance_idle(),
            WheelPhase::Spinning => self.advance_spin(now),
            WheelPhase::Settled => self.advance_settled(now),
        }
    }

    /// Take queued events.
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance_idle(&mut self) {
        self.angle = normalize_degrees(self.angle + self.config.idle_step_degrees);
        self.schedule_frame();
    }

    fn advance_spin(&mut self, now: Millis) {
        let AnimationState::Spinning(spin) = &mut self.state else {
            return;
        };

        let angle = spin.tween.sample(now);
        let segment = segment_at(angle, spin.entries.len());
        let ticked = spin.last_segment.is_some_and(|previous| previous != segment);
        spin.last_segment = Some(segment);
        let spin_id = spin.spin_id;
        let complete = spin.tween.is_complete(now);

        #[cfg(feature = "debug-tracing")]
        trace!(spin_id, angle, segment, "spin frame");

        self.angle = angle;
        if ticked {
            self.events.push(WheelEvent::tick(now, spin_id, segment));
        }

        if complete {
            self.settle(now);
        } else {
            self.schedule_frame();
        }
    }

    /// Reconcile the landed segment and move to `Settled`.
    fn settle(&mut self, now: Millis) {
        let AnimationState::Spinning(spin) = std::mem::take(&mut self.state) else {
            return;
        };

        let final_angle = spin.tween.target_angle;
        self.angle = final_angle;

        let winner_index = segment_at(final_angle, spin.entries.len());
        if winner_index != spin.expected_index {
            warn!(
                "Spin {}: landed on #{} but selection drew #{}; reporting the landed segment",
                spin.spin_id, winner_index, spin.expected_index
            );
        }

        let delay = self.config.winner_cue_delay_ms;
        let mut settled = SettledSpin {
            spin_id: spin.spin_id,
            entries: spin.entries,
            final_angle,
            winner_index,
            expected_index: spin.expected_index,
            winner_cue_at: Some(now + delay),
        };

        info!(
            "Spin {} settled at {:.2}° on #{} ({:?})",
            settled.spin_id,
            final_angle,
            winner_index,
            settled.winner()
        );

        self.events.push(WheelEvent::settled(
            now,
            settled.spin_id,
            settled.winner(),
            winner_index,
            settled.expected_index,
            final_angle,
        ));

        if delay <= 0.0 {
            self.events
                .push(WheelEvent::winner_cue(now, settled.spin_id, settled.winner()));
            settled.winner_cue_at = None;
            self.state = AnimationState::Settled(settled);
        } else {
            self.state = AnimationState::Settled(settled);
            self.schedule_frame();
        }
    }

    fn advance_settled(&mut self, now: Millis) {
        let AnimationState::Settled(settled) = &mut self.state else {
            return;
        };

        let Some(due) = settled.winner_cue_at else {
            return;
        };

        if now >= due {
            settled.winner_cue_at = None;
            let event = WheelEvent::winner_cue(now, settled.spin_id, settled.winner());
            self.events.push(event);
        } else {
            self.schedule_frame();
        }
    }

    fn start_idle(&mut self) {
        if matches!(self.state, AnimationState::Idle) && self.pending_frame.is_none() {
            self.schedule_frame();
        }
    }

    fn schedule_frame(&mut self) {
        self.cancel_pending_frame();
        self.pending_frame = Some(self.scheduler.schedule_next());
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Current rotation in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> WheelPhase {
        self.state.phase()
    }

    /// Winner of the settled spin, if any.
    pub fn settled_winner(&self) -> Option<&str> {
        match &self.state {
            AnimationState::Settled(settled) => Some(settled.winner()),
            _ => None,
        }
    }

    /// Angle and phase pair for observers.
    pub fn snapshot(&self) -> WheelSnapshot {
        let spin_id = match &self.state {
            AnimationState::Idle => None,
            AnimationState::Spinning(spin) => Some(spin.spin_id),
            AnimationState::Settled(settled) => Some(settled.spin_id),
        };
        WheelSnapshot {
            angle: self.angle,
            phase: self.phase(),
            spin_id,
            winner: self.settled_winner().map(str::to_string),
        }
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler (to advance a virtual clock).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Mutably borrow the random source (to reseed between spins).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: RandomSource> WheelEngine<VirtualScheduler, R> {
    /// Advance the virtual clock one frame and process it.
    pub fn step(&mut self) -> Vec<WheelEvent> {
        self.scheduler.advance_frame();
        self.pump()
    }

    /// Step until the current spin has settled and its winner cue has fired,
    /// or `max_frames` have passed.
    pub fn run_until_settled(&mut self, max_frames: usize) -> Vec<WheelEvent> {
        let mut events = self.drain_events();
        for _ in 0..max_frames {
            if self.phase() == WheelPhase::Settled && !self.has_pending_frame() {
                break;
            }
            events.extend(self.step());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{DeterministicRng, ReplaySource};
    use crate::wheel::error::WeightFault;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn engine(seed: u64) -> WheelEngine<VirtualScheduler, DeterministicRng> {
        WheelEngine::new(
            EngineConfig::default(),
            VirtualScheduler::new(FRAME_MS),
            DeterministicRng::new(seed),
        )
    }

    fn abcd() -> EntrySet {
        EntrySet::new(["A", "B", "C", "D"])
    }

    fn settled_events(events: &[WheelEvent]) -> Vec<&WheelEvent> {
        events
            .iter()
            .filter(|e| matches!(e.data, WheelEventData::Settled { .. }))
            .collect()
    }

    #[test]
    fn test_starts_idle_with_frame_pending() {
        let engine = engine(1);
        assert_eq!(engine.phase(), WheelPhase::Idle);
        assert!(engine.has_pending_frame());
        assert_eq!(engine.scheduler().pending(), 1);
    }

    #[test]
    fn test_idle_driver_rotates_and_wraps() {
        let mut engine = engine(1);
        engine.step();
        assert!((engine.angle() - 0.3).abs() < 1e-12);

        for _ in 0..1199 {
            engine.step();
        }
        // 1200 frames × 0.3° = one full turn
        assert!(engine.angle() < 1e-6 || (360.0 - engine.angle()) < 1e-6);
        assert!(engine.angle() < 360.0);
    }

    #[test]
    fn test_spin_requires_two_entries() {
        let mut engine = engine(1);
        let err = engine.request_spin(EntrySet::new(["solo"]), None).unwrap_err();
        assert_eq!(err, WheelError::InsufficientEntries { count: 1, required: 2 });
        assert_eq!(engine.phase(), WheelPhase::Idle);
        assert!(engine.has_pending_frame());
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_second_spin_refused_while_spinning() {
        let mut engine = engine(1);
        let ticket = engine.request_spin(abcd(), None).unwrap();
        engine.step();

        let angle = engine.angle();
        let err = engine.request_spin(abcd(), None).unwrap_err();
        assert_eq!(err, WheelError::AlreadySpinning);

        // Unchanged
        assert_eq!(engine.angle(), angle);
        match engine.state() {
            AnimationState::Spinning(spin) => assert_eq!(spin.spin_id, ticket.spin_id),
            other => panic!("expected spinning, got {other:?}"),
        }
    }

    #[test]
    fn test_spin_settles_on_expected_winner() {
        let mut engine = engine(42);
        let ticket = engine.request_spin(abcd(), None).unwrap();
        assert!(ticket.weight_fallback.is_none());

        let events = engine.run_until_settled(1000);
        let settled = settled_events(&events);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].settled_winner(), Some(ticket.expected_winner.as_str()));
        assert!(!settled[0].is_discrepancy());

        assert_eq!(engine.phase(), WheelPhase::Settled);
        assert_eq!(engine.angle(), ticket.target_angle);
        assert_eq!(engine.settled_winner(), Some(ticket.expected_winner.as_str()));
    }

    #[test]
    fn test_draw_060_lands_on_c() {
        let mut engine = WheelEngine::new(
            EngineConfig::default(),
            VirtualScheduler::new(FRAME_MS),
            ReplaySource::new(vec![0.60, 0.0]),
        );
        let ticket = engine.request_spin(abcd(), None).unwrap();
        assert_eq!(ticket.expected_index, 2);
        assert_eq!(ticket.extra_turns, 3);

        engine.run_until_settled(1000);
        assert_eq!(engine.settled_winner(), Some("C"));
    }

    #[test]
    fn test_spin_is_monotone_and_settles_on_time() {
        let mut engine = engine(7);
        engine.step();
        let ticket = engine.request_spin(abcd(), None).unwrap();
        let start = engine.angle();
        let started_at = engine.scheduler().now();

        let mut previous = start;
        let mut settled_at = None;
        for _ in 0..1000 {
            let events = engine.step();
            let angle = engine.angle();
            assert!(angle >= previous, "moved backwards");
            assert!(angle <= ticket.target_angle, "overshot target");
            previous = angle;

            if !settled_events(&events).is_empty() {
                settled_at = Some(engine.scheduler().now());
                break;
            }
        }

        let settled_at = settled_at.expect("spin never settled");
        let elapsed = settled_at - started_at;
        assert!(elapsed >= 3500.0 && elapsed < 3500.0 + 2.0 * FRAME_MS);
    }

    #[test]
    fn test_ticks_follow_segment_changes() {
        let mut engine = engine(3);
        engine.request_spin(abcd(), None).unwrap();
        let events = engine.run_until_settled(1000);

        let ticks: Vec<usize> = events
            .iter()
            .filter_map(|e| match e.data {
                WheelEventData::Tick { segment } => Some(segment),
                _ => None,
            })
            .collect();

        // At least three full turns over four segments
        assert!(ticks.len() >= 12, "only {} ticks", ticks.len());
        for pair in ticks.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_winner_cue_fires_after_delay() {
        let mut engine = engine(5);
        engine.request_spin(abcd(), None).unwrap();
        let events = engine.run_until_settled(1000);

        let settled_at = settled_events(&events)[0].at;
        let cue = events
            .iter()
            .find(|e| matches!(e.data, WheelEventData::WinnerCue { .. }))
            .expect("winner cue missing");

        assert!(cue.at - settled_at >= 200.0);
        assert!(cue.at - settled_at < 200.0 + 2.0 * FRAME_MS);
        assert!(!engine.has_pending_frame());
    }

    #[test]
    fn test_settled_wheel_does_not_move() {
        let mut engine = engine(9);
        engine.request_spin(abcd(), None).unwrap();
        engine.run_until_settled(1000);

        let angle = engine.angle();
        for _ in 0..100 {
            assert!(engine.step().is_empty());
            assert_eq!(engine.angle(), angle);
        }
        assert_eq!(engine.phase(), WheelPhase::Settled);
    }

    #[test]
    fn test_reset_mid_spin_cancels() {
        let mut engine = engine(11);
        engine.request_spin(abcd(), None).unwrap();
        for _ in 0..30 {
            engine.step();
        }

        assert!(engine.request_reset());
        assert_eq!(engine.phase(), WheelPhase::Idle);
        assert_eq!(engine.scheduler().pending(), 1);

        let events = engine.drain_events();
        assert!(matches!(events[0].data, WheelEventData::SpinCancelled { .. }));

        // Idle again, no settle ever arrives
        for _ in 0..500 {
            let events = engine.step();
            assert!(settled_events(&events).is_empty());
            assert_eq!(engine.phase(), WheelPhase::Idle);
        }
    }

    #[test]
    fn test_reset_clears_winner_and_pending_cue() {
        let mut engine = engine(13);
        engine.request_spin(abcd(), None).unwrap();

        // Step until just settled; cue still pending
        while engine.phase() != WheelPhase::Settled {
            engine.step();
        }
        assert!(engine.has_pending_frame());

        assert!(engine.request_reset());
        assert_eq!(engine.settled_winner(), None);

        for _ in 0..50 {
            let events = engine.step();
            assert!(!events
                .iter()
                .any(|e| matches!(e.data, WheelEventData::WinnerCue { .. })));
        }
    }

    #[test]
    fn test_reset_when_idle_is_noop() {
        let mut engine = engine(1);
        assert!(!engine.request_reset());
        assert_eq!(engine.scheduler().pending(), 1);
    }

    #[test]
    fn test_spin_from_settled_starts_new_spin() {
        let mut engine = engine(21);
        let first = engine.request_spin(abcd(), None).unwrap();
        engine.run_until_settled(1000);

        let second = engine.request_spin(abcd(), None).unwrap();
        assert_eq!(second.spin_id, first.spin_id + 1);
        assert_eq!(engine.phase(), WheelPhase::Spinning);
        assert!(engine.angle() < 360.0);

        let events = engine.drain_events();
        assert!(events.iter().any(|e| e.data == WheelEventData::WinnerCleared));
    }

    #[test]
    fn test_spin_cancels_idle_frame() {
        let mut engine = engine(1);
        assert_eq!(engine.scheduler().pending(), 1);
        engine.request_spin(abcd(), None).unwrap();
        assert_eq!(engine.scheduler().pending(), 1);
    }

    #[test]
    fn test_stale_frame_ignored() {
        let mut engine = engine(1);
        let stale = engine.scheduler_mut().schedule_next();
        engine.scheduler_mut().advance_frame();
        let angle = engine.angle();

        engine.on_frame(stale);
        assert_eq!(engine.angle(), angle);
    }

    #[test]
    fn test_invalid_weights_fall_back_to_uniform() {
        let mut engine = engine(17);
        let weights = WeightMap::from([("A".to_string(), -2.0)]);
        let ticket = engine.request_spin(abcd(), Some(&weights)).unwrap();

        assert!(matches!(
            ticket.weight_fallback,
            Some(WheelError::InvalidWeight(WeightFault::Negative { .. }))
        ));

        let events = engine.drain_events();
        assert!(matches!(events[0].data, WheelEventData::WeightsRejected { .. }));
        assert_eq!(engine.phase(), WheelPhase::Spinning);
    }

    #[test]
    fn test_entries_are_copied_on_start() {
        let mut engine = engine(19);
        let mut names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let ticket = engine.request_spin(names.as_slice(), None).unwrap();

        names.clear();
        names.push("Z".to_string());

        engine.run_until_settled(1000);
        assert_eq!(engine.settled_winner(), Some(ticket.expected_winner.as_str()));
    }

    #[test]
    fn test_weighted_spins_follow_weights() {
        let mut engine = WheelEngine::new(
            EngineConfig {
                spin_duration_ms: 50.0,
                winner_cue_delay_ms: 0.0,
                ..EngineConfig::default()
            },
            VirtualScheduler::new(FRAME_MS),
            DeterministicRng::new(31),
        );
        let entries = EntrySet::new(["A", "B"]);
        let weights = WeightMap::from([("A".to_string(), 3.0), ("B".to_string(), 1.0)]);

        let spins = 2000;
        let mut a_wins = 0;
        for _ in 0..spins {
            engine.request_spin(entries.clone(), Some(&weights)).unwrap();
            engine.run_until_settled(100);
            if engine.settled_winner() == Some("A") {
                a_wins += 1;
            }
        }

        let freq = a_wins as f64 / spins as f64;
        assert!((freq - 0.75).abs() < 0.04, "frequency {freq}");
    }

    #[test]
    fn test_snapshot_tracks_state() {
        let mut engine = engine(23);
        assert_eq!(engine.snapshot().phase, WheelPhase::Idle);
        assert_eq!(engine.snapshot().spin_id, None);

        let ticket = engine.request_spin(abcd(), None).unwrap();
        assert_eq!(engine.snapshot().spin_id, Some(ticket.spin_id));

        engine.run_until_settled(1000);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, WheelPhase::Settled);
        assert_eq!(snapshot.winner.as_deref(), Some(ticket.expected_winner.as_str()));
    }
}
