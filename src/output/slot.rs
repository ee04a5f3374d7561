use std::time::{Duration, Instant};

use crossbeam::atomic::AtomicCell;

use crate::{foundation::core::SourceId, transition::model::BlendSample};

/// Value held by the single program output slot.
///
/// A `Copy` snapshot of the bound blend. Progress is derived from the
/// caller-supplied instant, so the snapshot stays valid for the whole blend
/// window without further writes: repeated sampling after the window yields
/// an identical steady state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputBinding {
    /// Outgoing source of the blend, if one is running.
    pub old: Option<SourceId>,
    /// Incoming (or steady-state) source.
    pub new: Option<SourceId>,
    /// When the blend window opened; `None` when idle.
    pub started_at: Option<Instant>,
    /// Length of the blend window.
    pub duration: Duration,
}

impl OutputBinding {
    /// Binding with nothing presented.
    pub fn empty() -> Self {
        Self {
            old: None,
            new: None,
            started_at: None,
            duration: Duration::ZERO,
        }
    }

    /// Blend progress at `now` in `[0, 1]`; `1.0` when idle.
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Steady-state source at `now`: the target once the window elapsed,
    /// the outgoing source while a blend is still running.
    pub fn presented(&self, now: Instant) -> Option<SourceId> {
        if self.progress(now) >= 1.0 {
            self.new
        } else {
            self.old
        }
    }

    /// Render-side view at `now`.
    pub fn sample(&self, now: Instant) -> BlendSample {
        let progress = self.progress(now);
        if progress >= 1.0 {
            BlendSample {
                old: None,
                new: self.new,
                progress: 1.0,
            }
        } else {
            BlendSample {
                old: self.old,
                new: self.new,
                progress,
            }
        }
    }
}

/// The program output slot: "output source 0".
///
/// The single piece of mutable state shared between the control and render
/// paths. The engine replaces the whole binding with one atomic store; the
/// previous value stays fully valid until the new one is installed, so the
/// render callback never observes a half-updated binding and never blocks.
#[derive(Debug)]
pub struct OutputSlot {
    binding: AtomicCell<OutputBinding>,
}

impl OutputSlot {
    pub(crate) fn new() -> Self {
        Self {
            binding: AtomicCell::new(OutputBinding::empty()),
        }
    }

    /// The current binding snapshot.
    pub fn load(&self) -> OutputBinding {
        self.binding.load()
    }

    /// The presented (steady-state) source at `now`.
    pub fn current(&self, now: Instant) -> Option<SourceId> {
        self.load().presented(now)
    }

    /// Render-side read at `now`.
    pub fn sample(&self, now: Instant) -> BlendSample {
        self.load().sample(now)
    }

    /// Engine-only mutation point.
    pub(crate) fn store(&self, binding: OutputBinding) {
        self.binding.store(binding);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/slot.rs"]
mod tests;
