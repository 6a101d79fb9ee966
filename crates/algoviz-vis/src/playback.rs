//! Playback controls for a captured step log.

use std::time::Duration;

use algoviz_core::AnimationStep;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisError};
use crate::store::VisualState;

/// User speed setting, 1 (slowest) to 100 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(100);

    /// Clamp `value` into `1..=100`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Pause between two steps: `max(1, 400 - 4 * speed)` milliseconds.
    pub fn delay(self) -> Duration {
        let ms = 400i64 - 4 * i64::from(self.0);
        Duration::from_millis(ms.max(1) as u64)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing running; the previous run (if any) completed
    Idle,
    /// Applying one step per tick
    Running,
    /// Run held; ticks do nothing until resumed
    Paused,
    /// The previous run was cancelled
    Stopped,
}

/// Result of one [`Playback::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Step with this index was applied
    Applied(usize),
    /// The log is exhausted and the run has been finalized
    Completed,
    /// Paused; nothing applied
    Held,
    /// No run in progress
    Inactive,
}

/// Playback controller for one step log.
///
/// `start` snapshots the state so `seek` can rebuild any prefix of the log
/// by re-applying steps from that snapshot.
#[derive(Debug)]
pub struct Playback {
    steps: Vec<AnimationStep>,
    /// Index of the next step to apply
    next: usize,
    state: PlaybackState,
    speed: Speed,
    snapshot: Option<Box<VisualState>>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            next: 0,
            state: PlaybackState::Idle,
            speed: Speed::default(),
            snapshot: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Running or paused.
    pub fn is_active(&self) -> bool {
        matches!(self.state, PlaybackState::Running | PlaybackState::Paused)
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn delay(&self) -> Duration {
        self.speed.delay()
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Index of the last applied step.
    pub fn current_step(&self) -> Option<usize> {
        self.next.checked_sub(1)
    }

    /// Fraction of the log applied (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.next as f64 / self.steps.len() as f64
        }
    }

    /// Capture `steps` and begin a run. Rejected while another run is active.
    pub fn start(&mut self, steps: Vec<AnimationStep>, store: &mut VisualState) -> Result<()> {
        if self.is_active() {
            return Err(VisError::AlreadyRunning);
        }
        store.is_playing = true;
        store.is_sorted = false;
        store.current_step = None;
        store.clear_step_emphasis();

        self.steps = steps;
        self.next = 0;
        self.snapshot = Some(Box::new(store.clone()));
        self.state = PlaybackState::Running;
        Ok(())
    }

    /// Apply the next step. After the last step has been applied the
    /// following tick completes the run.
    pub fn tick(&mut self, store: &mut VisualState) -> Tick {
        match self.state {
            PlaybackState::Running => {}
            PlaybackState::Paused => return Tick::Held,
            PlaybackState::Idle | PlaybackState::Stopped => return Tick::Inactive,
        }
        match self.apply_next(store) {
            Some(i) => Tick::Applied(i),
            None => {
                self.complete(store);
                Tick::Completed
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Running;
        true
    }

    /// Apply one step while paused. At the end of the log this completes
    /// the run and returns `None`.
    pub fn step_forward(&mut self, store: &mut VisualState) -> Result<Option<usize>> {
        if self.state != PlaybackState::Paused {
            return Err(VisError::NotRunning);
        }
        let applied = self.apply_next(store);
        if applied.is_none() {
            self.complete(store);
        }
        Ok(applied)
    }

    /// Rebuild the state as it was after the first `position` steps.
    /// Returns the clamped position.
    pub fn seek(&mut self, position: usize, store: &mut VisualState) -> Result<usize> {
        if !self.is_active() {
            return Err(VisError::NotRunning);
        }
        let Some(snapshot) = &self.snapshot else {
            return Err(VisError::NotRunning);
        };
        let position = position.min(self.steps.len());
        *store = VisualState::clone(snapshot);
        for step in &self.steps[..position] {
            store.apply(step);
        }
        self.next = position;
        store.current_step = self.current_step();
        Ok(position)
    }

    /// Cancel the run. Remaining steps are dropped, transient marks are
    /// cleared and already applied mutations stay.
    pub fn stop(&mut self, store: &mut VisualState) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = PlaybackState::Stopped;
        self.steps.clear();
        self.next = 0;
        self.snapshot = None;

        store.clear_transient();
        store.is_playing = false;
        store.is_sorted = false;
        store.current_step = None;
        true
    }

    /// Forget the last run without touching the store.
    pub fn reset(&mut self) {
        let speed = self.speed;
        *self = Self::new();
        self.speed = speed;
    }

    fn apply_next(&mut self, store: &mut VisualState) -> Option<usize> {
        let step = self.steps.get(self.next)?;
        store.apply(step);
        let index = self.next;
        self.next += 1;
        store.current_step = Some(index);
        Some(index)
    }

    fn complete(&mut self, store: &mut VisualState) {
        store.clear_step_emphasis();
        store.is_playing = false;
        store.is_sorted = true;
        self.state = PlaybackState::Idle;
        self.snapshot = None;
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub current_step: Option<usize>,
    pub total_steps: usize,
    pub speed: Speed,
    pub delay_ms: u64,
    pub progress: f64,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            state: playback.state,
            current_step: playback.current_step(),
            total_steps: playback.total_steps(),
            speed: playback.speed,
            delay_ms: playback.delay().as_millis() as u64,
            progress: playback.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble_log() -> Vec<AnimationStep> {
        vec![
            AnimationStep::compare([0, 1]),
            AnimationStep::swap(0, 1),
            AnimationStep::compare([1, 2]),
            AnimationStep::swap(1, 2),
            AnimationStep::compare([0, 1]),
        ]
    }

    fn store() -> VisualState {
        VisualState {
            array: vec![3, 2, 1],
            ..VisualState::default()
        }
    }

    fn run(playback: &mut Playback, store: &mut VisualState) -> usize {
        let mut applied = 0;
        while let Tick::Applied(_) = playback.tick(store) {
            applied += 1;
        }
        applied
    }

    #[test]
    fn delay_follows_speed() {
        assert_eq!(Speed::new(1).delay(), Duration::from_millis(396));
        assert_eq!(Speed::new(50).delay(), Duration::from_millis(200));
        assert_eq!(Speed::new(100).delay(), Duration::from_millis(1));
        assert_eq!(Speed::new(0), Speed::MIN);
        assert_eq!(Speed::new(250), Speed::MAX);
    }

    #[test]
    fn runs_to_completion() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.start(bubble_log(), &mut state).unwrap();
        assert!(state.is_playing);

        assert_eq!(run(&mut playback, &mut state), 5);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(state.array, vec![2, 1, 3]);
        assert!(state.is_sorted);
        assert!(!state.is_playing);
        assert!(state.highlight.is_empty());
        assert_eq!(state.current_step, Some(4));
        assert_eq!(playback.tick(&mut state), Tick::Inactive);
    }

    #[test]
    fn completion_takes_one_extra_tick() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.start(vec![AnimationStep::found([2])], &mut state).unwrap();
        assert_eq!(playback.tick(&mut state), Tick::Applied(0));
        assert!(state.is_playing);
        assert_eq!(playback.tick(&mut state), Tick::Completed);
        assert_eq!(state.found, vec![2]);
    }

    #[test]
    fn rejects_second_start() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.start(bubble_log(), &mut state).unwrap();
        playback.pause();
        let err = playback.start(bubble_log(), &mut state).unwrap_err();
        assert!(matches!(err, VisError::AlreadyRunning));
    }

    #[test]
    fn pause_holds_and_steps() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.start(bubble_log(), &mut state).unwrap();
        playback.tick(&mut state);

        assert!(playback.pause());
        assert_eq!(playback.tick(&mut state), Tick::Held);
        assert_eq!(playback.step_forward(&mut state).unwrap(), Some(1));
        assert_eq!(state.array, vec![2, 3, 1]);

        assert!(playback.resume());
        assert_eq!(playback.tick(&mut state), Tick::Applied(2));
    }

    #[test]
    fn stop_keeps_applied_mutations() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.start(bubble_log(), &mut state).unwrap();
        playback.tick(&mut state);
        playback.tick(&mut state);
        playback.tick(&mut state);

        assert!(playback.stop(&mut state));
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(state.array, vec![2, 3, 1]);
        assert!(state.highlight.is_empty());
        assert!(!state.is_sorted);
        assert!(!state.is_playing);
        assert_eq!(playback.total_steps(), 0);
        assert_eq!(playback.tick(&mut state), Tick::Inactive);

        // A stopped run can be replaced by a fresh one.
        playback.start(bubble_log(), &mut state).unwrap();
    }

    #[test]
    fn seek_matches_sequential_ticks() {
        let log = bubble_log();
        for target in 0..=log.len() {
            let mut sequential = Playback::new();
            let mut expected = store();
            sequential.start(log.clone(), &mut expected).unwrap();
            for _ in 0..target {
                sequential.tick(&mut expected);
            }

            let mut scrubbed = Playback::new();
            let mut state = store();
            scrubbed.start(log.clone(), &mut state).unwrap();
            scrubbed.tick(&mut state);
            scrubbed.tick(&mut state);
            scrubbed.seek(target, &mut state).unwrap();

            assert_eq!(state, expected, "seek to {}", target);
        }
    }

    #[test]
    fn seek_clamps_to_log_length() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.start(bubble_log(), &mut state).unwrap();
        assert_eq!(playback.seek(99, &mut state).unwrap(), 5);
        assert_eq!(playback.progress(), 1.0);
        assert!(matches!(
            Playback::new().seek(1, &mut state),
            Err(VisError::NotRunning)
        ));
    }

    #[test]
    fn status_conversion() {
        let mut playback = Playback::new();
        let mut state = store();
        playback.set_speed(Speed::new(75));
        playback.start(bubble_log(), &mut state).unwrap();
        playback.tick(&mut state);

        let status: PlaybackStatus = (&playback).into();
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.current_step, Some(0));
        assert_eq!(status.total_steps, 5);
        assert_eq!(status.delay_ms, 100);
    }
}
