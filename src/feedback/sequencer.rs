//! Timed visual feedback for a submitted answer.
//!
//! The sequencer owns no clock. Callers pass `Instant`s in, which keeps it
//! deterministic under test and lets any host loop (TUI tick, blocking sleep)
//! drive it.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::quiz::OPTIONS_PER_ROUND;

/// Default length of the spin/fade animation.
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(500);

/// Default delay from `play` until the answer is resolved.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(700);

/// Opacity unselected options fade to.
pub const FADED_OPACITY: f32 = 0.25;

/// Scale unselected options shrink to.
pub const SHRUNK_SCALE: f32 = 0.7;

/// Durations of a feedback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTiming {
    /// How long the animation runs.
    pub animation: Duration,
    /// When the sequence completes, measured from `play`.
    pub settle: Duration,
}

impl Default for FeedbackTiming {
    fn default() -> Self {
        Self {
            animation: DEFAULT_ANIMATION,
            settle: DEFAULT_SETTLE,
        }
    }
}

impl FeedbackTiming {
    /// Build timing from millisecond values. `settle` is raised to at least
    /// `animation` so the animation always finishes first.
    pub fn from_millis(animation_ms: u64, settle_ms: u64) -> Self {
        Self {
            animation: Duration::from_millis(animation_ms),
            settle: Duration::from_millis(settle_ms.max(animation_ms)),
        }
    }
}

/// How a renderer should draw one option at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionVisual {
    /// Clockwise rotation in degrees, 0..=360.
    pub rotation_degrees: f32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// 1.0 is natural size.
    pub scale: f32,
}

impl OptionVisual {
    /// No transform applied.
    pub const NEUTRAL: OptionVisual = OptionVisual {
        rotation_degrees: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    /// Whether this is the untransformed state.
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Emitted once when a sequence has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackComplete {
    /// Option that was animated.
    pub selected: usize,
}

/// Errors from the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    /// A sequence is already in flight.
    #[error("Feedback for option {0} is still playing")]
    AlreadyPlaying(usize),
}

#[derive(Debug, Clone, Copy)]
struct ActiveSequence {
    selected: usize,
    started: Instant,
}

/// Plays at most one feedback sequence at a time.
#[derive(Debug, Clone, Default)]
pub struct FeedbackSequencer {
    timing: FeedbackTiming,
    active: Option<ActiveSequence>,
}

impl FeedbackSequencer {
    /// Create a sequencer with the given timing.
    pub fn new(timing: FeedbackTiming) -> Self {
        Self {
            timing,
            active: None,
        }
    }

    /// Timing in use.
    pub fn timing(&self) -> FeedbackTiming {
        self.timing
    }

    /// Start animating `selected` at `now`.
    pub fn play(&mut self, selected: usize, now: Instant) -> Result<(), FeedbackError> {
        if let Some(active) = self.active {
            return Err(FeedbackError::AlreadyPlaying(active.selected));
        }
        self.active = Some(ActiveSequence {
            selected,
            started: now,
        });
        debug!(selected, settle_ms = self.timing.settle.as_millis() as u64, "feedback started");
        Ok(())
    }

    /// Whether a sequence is in flight.
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Option being animated, if any.
    pub fn selected(&self) -> Option<usize> {
        self.active.map(|a| a.selected)
    }

    /// Instant at which the pending sequence settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.active.map(|a| a.started + self.timing.settle)
    }

    /// Complete the sequence if its deadline has passed.
    ///
    /// Returns `Some` exactly once per `play`.
    pub fn poll(&mut self, now: Instant) -> Option<FeedbackComplete> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        let active = self.active.take()?;
        debug!(selected = active.selected, "feedback settled");
        Some(FeedbackComplete {
            selected: active.selected,
        })
    }

    /// Drop the pending sequence without completing it.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Animation progress in 0.0..=1.0, eased.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let active = self.active?;
        let elapsed = now.saturating_duration_since(active.started);
        let linear = if self.timing.animation.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.timing.animation.as_secs_f32()).min(1.0)
        };
        Some(smoothstep(linear))
    }

    /// Visual state of option `index` at `now`.
    pub fn visual(&self, index: usize, now: Instant) -> OptionVisual {
        let (Some(active), Some(t)) = (self.active, self.progress(now)) else {
            return OptionVisual::NEUTRAL;
        };
        if index >= OPTIONS_PER_ROUND {
            return OptionVisual::NEUTRAL;
        }
        if index == active.selected {
            OptionVisual {
                rotation_degrees: 360.0 * t,
                opacity: 1.0,
                scale: 1.0,
            }
        } else {
            OptionVisual {
                rotation_degrees: 0.0,
                opacity: lerp(1.0, FADED_OPACITY, t),
                scale: lerp(1.0, SHRUNK_SCALE, t),
            }
        }
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
