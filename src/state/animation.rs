//! Open-extent animation.
//!
//! One [`AnimationController`] owns the numeric extent of the dropdown panel.
//! Opening and closing both go through the same handle, so a new `start`
//! supersedes whatever run is in flight. Time only advances through `tick`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ===== Easing =====

/// Timing curve applied to animation progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

// ===== Phase =====

/// Dropdown open/close phase.
///
/// `Closed` is the only phase with the option list unmounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    /// Whether the option list is mounted (the `open` flag).
    pub fn is_open(self) -> bool {
        !matches!(self, Phase::Closed)
    }
}

// ===== AnimationController =====

#[derive(Debug, Clone)]
struct Run {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
    generation: u64,
}

/// A run that reached its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    /// Generation returned by the `start` call that began the run.
    pub generation: u64,
}

/// Single animated value with last-call-wins semantics.
#[derive(Debug, Clone)]
pub struct AnimationController {
    value: f32,
    run: Option<Run>,
    generation: u64,
}

impl AnimationController {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            run: None,
            generation: 0,
        }
    }

    /// Current interpolated value.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Start animating from the current value to `target`.
    ///
    /// Any in-flight run is superseded and will never complete.
    /// Returns the generation identifying this run.
    pub fn start(&mut self, target: f32, duration: Duration, easing: Easing) -> u64 {
        self.generation += 1;
        self.run = Some(Run {
            from: self.value,
            to: target,
            elapsed: Duration::ZERO,
            duration,
            easing,
            generation: self.generation,
        });
        self.generation
    }

    /// Drop the in-flight run, leaving the value where it is.
    pub fn stop(&mut self) {
        self.run = None;
    }

    /// Advance by `dt`. Returns the completion when the run reaches its target.
    pub fn tick(&mut self, dt: Duration) -> Option<Completion> {
        let run = self.run.as_mut()?;
        run.elapsed = run.elapsed.saturating_add(dt);

        let progress = if run.duration.is_zero() {
            1.0
        } else {
            (run.elapsed.as_secs_f32() / run.duration.as_secs_f32()).min(1.0)
        };

        if progress >= 1.0 {
            let completion = Completion {
                generation: run.generation,
            };
            self.value = run.to;
            self.run = None;
            return Some(completion);
        }

        let eased = run.easing.apply(progress);
        self.value = run.from + (run.to - run.from) * eased;
        None
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(0.0)
    }
}
