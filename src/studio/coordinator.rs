use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    foundation::core::{SceneId, SourceId},
    graph::provider::SceneGraph,
    output::slot::OutputSlot,
    studio::quick::QuickTransitionRegistry,
    transition::engine::TransitionEngine,
};

/// Orchestrates single-output vs dual-output ("studio") operation.
///
/// Two states, initial state single-output:
///
/// - **Single-output**: selecting a scene and transitioning are the same
///   action; every selection goes straight through the engine.
/// - **Studio**: entered and exited only by [`toggle_studio_mode`]. Selection
///   changes steer the preview side only; program changes happen on the
///   explicit [`perform_transition`] trigger.
///
/// The coordinator never writes the output slot itself — all visible changes
/// pass through the engine's swap/interpolation path, so no frame shows a
/// partially-bound state. The mode flag lives here as instance state; pass
/// the coordinator to anything that needs to query it.
///
/// Scene duplicates made for studio mode are the only graph ownership this
/// type holds, released at defined points: blend completion, replacement by
/// a newer duplicate, or studio-mode exit.
///
/// [`toggle_studio_mode`]: StudioCoordinator::toggle_studio_mode
/// [`perform_transition`]: StudioCoordinator::perform_transition
pub struct StudioCoordinator<G: SceneGraph> {
    graph: G,
    engine: TransitionEngine,
    quick: QuickTransitionRegistry,
    studio_mode: bool,
    current_scene: Option<SceneId>,
    /// Staged duplicate currently targeted on the program side.
    staged: Option<SceneId>,
    /// Duplicate leaving through an in-flight blend; released on completion.
    retiring: Option<SceneId>,
    preview_source: Option<SourceId>,
}

impl<G: SceneGraph> StudioCoordinator<G> {
    /// Create a coordinator in single-output mode over `graph`.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            engine: TransitionEngine::new(),
            quick: QuickTransitionRegistry::new(),
            studio_mode: false,
            current_scene: None,
            staged: None,
            retiring: None,
            preview_source: None,
        }
    }

    /// The scene graph provider.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access to the scene graph provider.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// The transition engine.
    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    /// Mutable access to the transition engine (duration control, transition
    /// selection list).
    pub fn engine_mut(&mut self) -> &mut TransitionEngine {
        &mut self.engine
    }

    /// The quick-transition registry.
    pub fn quick_transitions(&self) -> &QuickTransitionRegistry {
        &self.quick
    }

    /// Mutable access to the quick-transition registry.
    pub fn quick_transitions_mut(&mut self) -> &mut QuickTransitionRegistry {
        &mut self.quick
    }

    /// Shared handle to the program output slot for render-side readers.
    pub fn output(&self) -> Arc<OutputSlot> {
        self.engine.output()
    }

    /// Whether dual-output ("studio") mode is active.
    pub fn is_studio_mode(&self) -> bool {
        self.studio_mode
    }

    /// The selected scene: the program scene in single-output mode, the
    /// preview selection in studio mode.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.current_scene
    }

    /// Content of the preview display; `None` outside studio mode.
    pub fn preview_source(&self) -> Option<SourceId> {
        self.preview_source
    }

    /// Presented program source at `now`.
    pub fn program_source(&self, now: Instant) -> Option<SourceId> {
        self.engine.current(now)
    }

    /// Selection-changed handler.
    ///
    /// Single-output mode: selecting a scene and transitioning are the same
    /// action. Studio mode: updates the preview side only, the program output
    /// is untouched. Unknown scenes are a silent no-op with the selection
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub fn set_current_scene(&mut self, scene: SceneId, force: bool, now: Instant) {
        let Some(root) = self.graph.root_source(scene) else {
            tracing::debug!(?scene, "selection of unknown scene ignored");
            return;
        };
        if self.studio_mode {
            self.preview_source = Some(root);
        } else {
            self.transition_with(scene, force, None, now);
        }
        self.current_scene = Some(scene);
    }

    /// Transition the program output to `scene` through the bound
    /// transition.
    ///
    /// Under studio mode the scene is first duplicated with private refs and
    /// the duplicate's root becomes the target, insulating program from
    /// later preview edits. Of the duplicates already held, the one the
    /// blend still presents is retired and released once the blend
    /// completes; any other is released right away. Single-output
    /// transitions target the scene root directly, no duplication.
    #[tracing::instrument(skip(self))]
    pub fn transition_to_scene(&mut self, scene: SceneId, force: bool, now: Instant) {
        self.transition_with(scene, force, None, now);
    }

    /// "Perform transition" trigger: blend program to the current selection.
    ///
    /// The studio-mode action behind the transition button. In single-output
    /// mode this degenerates to re-selecting the current scene, which is the
    /// same operation by construction.
    #[tracing::instrument(skip(self))]
    pub fn perform_transition(&mut self, now: Instant) {
        let Some(scene) = self.current_scene else {
            tracing::debug!("perform_transition with no scene selected ignored");
            return;
        };
        self.transition_with(scene, false, None, now);
    }

    /// Explicit mode toggle.
    ///
    /// Entry: the current scene is duplicated privately and the duplicate is
    /// bound as both the transition's target and the preview content — the
    /// program pixels are untouched since the duplicate is content-identical.
    /// Exit: program force-transitions directly to the current scene
    /// (bypassing timed interpolation), then every staged duplicate is
    /// released.
    #[tracing::instrument(skip(self))]
    pub fn toggle_studio_mode(&mut self, now: Instant) {
        self.studio_mode = !self.studio_mode;
        if self.studio_mode {
            let Some(scene) = self.current_scene else {
                return;
            };
            let Some(dup) = self.graph.duplicate_scene(scene, true) else {
                tracing::debug!(?scene, "studio entry: scene vanished, staging skipped");
                return;
            };
            let Some(dup_root) = self.graph.root_source(dup) else {
                self.graph.release_scene(dup);
                return;
            };
            self.engine.transition_to(dup_root, true, None, now);
            self.staged = Some(dup);
            self.preview_source = Some(dup_root);
        } else {
            if let Some(scene) = self.current_scene {
                self.transition_with(scene, true, None, now);
            }
            self.release_staging();
            self.preview_source = None;
        }
    }

    /// Quick-transition selection: resolve the preset at `index`, rebind its
    /// kind through the swap protocol and transition to the current
    /// selection with the preset duration instead of the session default.
    /// An index outside the populated range is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn select_quick(&mut self, index: usize, now: Instant) {
        let Some(preset) = self.quick.get(index) else {
            tracing::debug!(index, "quick transition index out of range ignored");
            return;
        };
        let kind_id = preset.transition.clone();
        let duration = Duration::from_millis(preset.duration_ms);
        let Some(transition) = self.engine.ensure_kind(&kind_id) else {
            return;
        };
        self.engine.set_transition(transition);
        let Some(scene) = self.current_scene else {
            return;
        };
        self.transition_with(scene, false, Some(duration), now);
    }

    /// Control-thread pump: settles finished blends and releases the retired
    /// duplicate once its blend completes.
    pub fn tick(&mut self, now: Instant) {
        if self.engine.tick(now)
            && let Some(scene) = self.retiring.take()
        {
            self.graph.release_scene(scene);
        }
    }

    fn transition_with(
        &mut self,
        scene: SceneId,
        force: bool,
        duration_override: Option<Duration>,
        now: Instant,
    ) {
        let Some(root) = self.graph.root_source(scene) else {
            tracing::debug!(?scene, "transition to unknown scene ignored");
            return;
        };

        let target = if self.studio_mode {
            let Some(dup) = self.graph.duplicate_scene(scene, true) else {
                return;
            };
            let Some(dup_root) = self.graph.root_source(dup) else {
                self.graph.release_scene(dup);
                return;
            };
            // The new blend starts from whatever the slot presents at `now`.
            // Of the previous duplicates, only the one owning that source is
            // still reachable; it stays alive as `retiring` while the others
            // are released immediately. On an interrupted take that keeps the
            // blend's outgoing scene and frees the abandoned target, not the
            // other way around.
            let live = self.engine.current(now);
            let mut keep = None;
            for old in [self.retiring.take(), self.staged.take()]
                .into_iter()
                .flatten()
            {
                if keep.is_none() && live.is_some() && self.graph.root_source(old) == live {
                    keep = Some(old);
                } else {
                    self.graph.release_scene(old);
                }
            }
            self.retiring = keep;
            self.staged = Some(dup);
            dup_root
        } else {
            root
        };

        let started = self
            .engine
            .transition_to(target, force, duration_override, now);
        if !started {
            // Cut path completed synchronously; nothing keeps the retired
            // duplicate alive.
            if let Some(old) = self.retiring.take() {
                self.graph.release_scene(old);
            }
        }
    }

    fn release_staging(&mut self) {
        if let Some(scene) = self.retiring.take() {
            self.graph.release_scene(scene);
        }
        if let Some(scene) = self.staged.take() {
            self.graph.release_scene(scene);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/studio/coordinator.rs"]
mod tests;
