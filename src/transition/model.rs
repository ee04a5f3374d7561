use std::time::{Duration, Instant};

use crate::{
    foundation::core::{SourceId, TransitionMode},
    foundation::error::{MixdeckError, MixdeckResult},
    output::slot::OutputBinding,
};

/// Stable identifier of the cut transition kind.
pub const CUT_TRANSITION_ID: &str = "cut_transition";
/// Stable identifier of the fade transition kind.
pub const FADE_TRANSITION_ID: &str = "fade_transition";
/// Stable identifier of the swipe transition kind.
pub const SWIPE_TRANSITION_ID: &str = "swipe_transition";

/// Descriptor of a transition style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionKind {
    /// Stable kind identifier, the key presets reference.
    pub id: &'static str,
    /// Display name shown in a selection list.
    pub name: &'static str,
    /// Whether the kind exposes vendor-specific properties. Only
    /// configurable kinds surface a properties-editor affordance.
    pub configurable: bool,
    /// Zero-duration semantics: the target is presented on the very next
    /// sample regardless of the configured duration.
    pub instant: bool,
}

const BUILTIN_KINDS: &[TransitionKind] = &[
    TransitionKind {
        id: CUT_TRANSITION_ID,
        name: "Cut",
        configurable: false,
        instant: true,
    },
    TransitionKind {
        id: FADE_TRANSITION_ID,
        name: "Fade",
        configurable: false,
        instant: false,
    },
    TransitionKind {
        id: SWIPE_TRANSITION_ID,
        name: "Swipe",
        configurable: true,
        instant: false,
    },
];

/// The built-in transition kind table.
///
/// Non-configurable kinds are instantiated once per engine at construction
/// and reused for the process lifetime; configurable kinds are created on
/// first use.
pub fn builtin_transition_kinds() -> &'static [TransitionKind] {
    BUILTIN_KINDS
}

/// Resolve a kind identifier against the built-in table.
pub fn parse_transition_kind(id: &str) -> MixdeckResult<TransitionKind> {
    let id = id.trim().to_ascii_lowercase();
    if id.is_empty() {
        return Err(MixdeckError::validation(
            "transition kind must be non-empty",
        ));
    }
    BUILTIN_KINDS
        .iter()
        .find(|k| k.id == id)
        .copied()
        .ok_or_else(|| MixdeckError::validation(format!("unknown transition kind '{id}'")))
}

/// One render-side view of the output: what to draw and how far along.
///
/// An idle output has `old = None` and `progress = 1.0`; the renderer draws
/// `new` at full weight. Sampling strictly after a blend's duration window
/// yields the same steady-state value on every subsequent sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendSample {
    /// Outgoing source, present only while a blend is in its window.
    pub old: Option<SourceId>,
    /// Incoming (or steady-state) source.
    pub new: Option<SourceId>,
    /// Blend progress in `[0, 1]`.
    pub progress: f64,
}

#[derive(Clone, Copy, Debug)]
struct ActiveBlend {
    from: Option<SourceId>,
    to: SourceId,
    started_at: Instant,
    duration: Duration,
}

/// A reusable, stateful blend between an "old" and a "new" source.
///
/// At most one blend is active per instance. An instance with no assigned
/// sources is idle and reusable; instances live for the process duration and
/// are never duplicated per use.
#[derive(Clone, Debug)]
pub struct Transition {
    kind: TransitionKind,
    shown: Option<SourceId>,
    blend: Option<ActiveBlend>,
}

impl Transition {
    /// Create an idle instance of the given kind.
    pub fn new(kind: TransitionKind) -> Self {
        Self {
            kind,
            shown: None,
            blend: None,
        }
    }

    /// The kind descriptor this instance was created from.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Whether no blend is in flight.
    pub fn is_idle(&self) -> bool {
        self.blend.is_none()
    }

    /// Immediately present `target`, discarding any in-flight blend.
    ///
    /// This is the cut path and the swap-protocol priming step: the next
    /// sample already shows `target` at full weight.
    pub fn set(&mut self, target: Option<SourceId>) {
        self.shown = target;
        self.blend = None;
    }

    /// Start presenting `target`.
    ///
    /// Cut mode, instant kinds, and zero durations present immediately.
    /// Otherwise an interpolated blend runs from the currently presented
    /// source over `duration`, after which sampling yields `target` as a
    /// stable steady state.
    pub fn start(
        &mut self,
        mode: TransitionMode,
        duration: Duration,
        target: SourceId,
        now: Instant,
    ) {
        if mode == TransitionMode::Cut || self.kind.instant || duration.is_zero() {
            self.set(Some(target));
            return;
        }
        let from = self.presented(now);
        if from == Some(target) {
            // Already showing the target; nothing to interpolate.
            self.set(Some(target));
            return;
        }
        self.shown = from;
        self.blend = Some(ActiveBlend {
            from,
            to: target,
            started_at: now,
            duration,
        });
    }

    /// The steady-state source at `now`: the blend target once the window
    /// has elapsed, the outgoing source while it is still running.
    pub fn presented(&self, now: Instant) -> Option<SourceId> {
        match &self.blend {
            Some(blend) if blend_done(blend, now) => Some(blend.to),
            Some(blend) => blend.from,
            None => self.shown,
        }
    }

    /// Render-side view of this instance at `now`.
    pub fn sample(&self, now: Instant) -> BlendSample {
        self.binding().sample(now)
    }

    /// Settle any in-flight blend to its target immediately and return the
    /// source now presented. Used when the instance is swapped out of the
    /// output mid-blend: the output jumps to the blend target instead of
    /// stepping back to the outgoing source.
    pub fn settle(&mut self) -> Option<SourceId> {
        if let Some(blend) = self.blend.take() {
            self.shown = Some(blend.to);
        }
        self.shown
    }

    /// Settle a finished blend: the instance becomes idle showing the
    /// target. Returns true exactly when a blend completed on this call.
    pub fn complete_if_done(&mut self, now: Instant) -> bool {
        match &self.blend {
            Some(blend) if blend_done(blend, now) => {
                self.shown = Some(blend.to);
                self.blend = None;
                true
            }
            _ => false,
        }
    }

    /// Return to the idle, unassigned state (after being swapped out of the
    /// output slot).
    pub fn reset(&mut self) {
        self.shown = None;
        self.blend = None;
    }

    /// Snapshot of the instance's state for publication to the output slot.
    pub(crate) fn binding(&self) -> OutputBinding {
        match &self.blend {
            Some(blend) => OutputBinding {
                old: blend.from,
                new: Some(blend.to),
                started_at: Some(blend.started_at),
                duration: blend.duration,
            },
            None => OutputBinding {
                old: None,
                new: self.shown,
                started_at: None,
                duration: Duration::ZERO,
            },
        }
    }
}

fn blend_done(blend: &ActiveBlend, now: Instant) -> bool {
    now.saturating_duration_since(blend.started_at) >= blend.duration
}

#[cfg(test)]
#[path = "../../tests/unit/transition/model.rs"]
mod tests;
