use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    foundation::core::{SourceId, TransitionMode},
    output::slot::OutputSlot,
    transition::model::{
        FADE_TRANSITION_ID, Transition, TransitionKind, builtin_transition_kinds,
        parse_transition_kind,
    },
};

/// Default session transition duration in milliseconds.
pub(crate) const DEFAULT_DURATION_MS: u64 = 300;

/// Owns the transition instances and the program output slot.
///
/// All visible scene changes pass through this engine: it is the only writer
/// of the [`OutputSlot`], and every mutation is published as one whole-value
/// atomic store. The instances for non-configurable kinds are created once
/// here and reused across every cut and fade.
pub struct TransitionEngine {
    slot: Arc<OutputSlot>,
    transitions: Vec<Transition>,
    bound: Option<usize>,
    duration: Duration,
    properties_visible: bool,
}

impl TransitionEngine {
    /// Create an engine with one instance per non-configurable built-in
    /// kind, the fade transition bound.
    pub fn new() -> Self {
        let transitions: Vec<Transition> = builtin_transition_kinds()
            .iter()
            .filter(|kind| !kind.configurable)
            .map(|kind| Transition::new(*kind))
            .collect();
        let fade = transitions
            .iter()
            .position(|t| t.kind().id == FADE_TRANSITION_ID);

        let mut engine = Self {
            slot: Arc::new(OutputSlot::new()),
            transitions,
            bound: None,
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            properties_visible: false,
        };
        if let Some(fade) = fade {
            engine.set_transition(fade);
        }
        engine
    }

    /// Shared handle to the program output slot for render-side readers.
    pub fn output(&self) -> Arc<OutputSlot> {
        Arc::clone(&self.slot)
    }

    /// Bound transition instances, in creation order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Resolve an instance index by display name.
    pub fn find_transition(&self, name: &str) -> Option<usize> {
        self.transitions
            .iter()
            .position(|t| t.kind().name == name)
    }

    /// Kind descriptor of the transition currently bound to the output.
    pub fn bound_kind(&self) -> Option<TransitionKind> {
        self.bound.map(|i| self.transitions[i].kind())
    }

    /// Whether a properties-editor affordance should be surfaced for the
    /// bound transition.
    pub fn properties_visible(&self) -> bool {
        self.properties_visible
    }

    /// Session transition duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    /// Adjust the session transition duration (applies to subsequent timed
    /// transitions, not any blend already in flight).
    pub fn set_duration_ms(&mut self, ms: u64) {
        self.duration = Duration::from_millis(ms);
    }

    /// Find the instance for a kind id, creating one on first use.
    ///
    /// Unknown kind ids resolve to `None` (no-op for callers).
    pub fn ensure_kind(&mut self, kind_id: &str) -> Option<usize> {
        // Normalize before searching so spelling variants of a known id
        // resolve to the existing instance instead of growing the list.
        let kind = match parse_transition_kind(kind_id) {
            Ok(kind) => kind,
            Err(err) => {
                tracing::debug!(kind_id, %err, "unknown transition kind ignored");
                return None;
            }
        };
        if let Some(idx) = self
            .transitions
            .iter()
            .position(|t| t.kind().id == kind.id)
        {
            return Some(idx);
        }
        self.transitions.push(Transition::new(kind));
        Some(self.transitions.len() - 1)
    }

    /// Atomically replace the transition bound at the output slot.
    ///
    /// Swap protocol: any blend in flight on the outgoing instance settles
    /// to its target, the newly selected instance picks up that source, then
    /// the slot is rebound with one atomic store and the old instance resets
    /// to idle. An idle output carries over unchanged (no gap, no duplicate
    /// frame); a mid-blend swap lands on the blend target rather than
    /// stepping back to the outgoing source. With nothing previously bound,
    /// the instance is bound directly.
    pub fn set_transition(&mut self, index: usize) {
        if index >= self.transitions.len() {
            tracing::debug!(index, "set_transition with unknown index ignored");
            return;
        }
        match self.bound {
            Some(prev) if prev == index => {}
            Some(prev) => {
                let live = self.transitions[prev].settle();
                self.transitions[index].set(live);
                self.bound = Some(index);
                self.publish();
                self.transitions[prev].reset();
            }
            None => {
                self.bound = Some(index);
                self.publish();
            }
        }
        self.properties_visible = self.transitions[index].kind().configurable;
    }

    /// Present `target` through the bound transition.
    ///
    /// With `force`, a bound instant kind, or a zero effective duration the
    /// slot presents `target` on the very next sample. Otherwise a timed
    /// blend starts from the currently presented source over the session
    /// duration (or `duration_override`, used by quick presets).
    ///
    /// Returns whether a timed blend was started; cut paths and no-ops
    /// (nothing bound) return false. The caller observing `false` may treat
    /// the change as already complete.
    pub fn transition_to(
        &mut self,
        target: SourceId,
        force: bool,
        duration_override: Option<Duration>,
        now: Instant,
    ) -> bool {
        let Some(index) = self.bound else {
            tracing::debug!(?target, "transition_to with no transition bound ignored");
            return false;
        };
        let transition = &mut self.transitions[index];
        if force {
            transition.set(Some(target));
        } else {
            let duration = duration_override.unwrap_or(self.duration);
            transition.start(TransitionMode::Auto, duration, target, now);
        }
        let started = !self.transitions[index].is_idle();
        self.publish();
        started
    }

    /// Presented (steady-state) source at `now`.
    pub fn current(&self, now: Instant) -> Option<SourceId> {
        self.slot.current(now)
    }

    /// Control-thread pump: settle a finished blend and republish the slot
    /// in steady state. Returns true exactly when a blend completed on this
    /// call; the bound instance is then idle and reusable.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(index) = self.bound else {
            return false;
        };
        if self.transitions[index].complete_if_done(now) {
            self.publish();
            return true;
        }
        false
    }

    fn publish(&self) {
        let binding = match self.bound {
            Some(index) => self.transitions[index].binding(),
            None => crate::output::slot::OutputBinding::empty(),
        };
        self.slot.store(binding);
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/engine.rs"]
mod tests;
