//! Mixdeck is the preview/program switching core of a live video-production
//! tool.
//!
//! It decides which composited scene is live, how a transition interpolates
//! between two scenes over time, and how the dual-output ("studio") split
//! keeps a staged preview composition independent from the program output.
//!
//! # Control flow overview
//!
//! 1. **Select**: a user action designates a target scene
//!    ([`StudioCoordinator::set_current_scene`]).
//! 2. **Stage or go live**: in single-output mode the selection transitions
//!    immediately; in studio mode it only updates the preview side.
//! 3. **Blend**: on trigger, the [`TransitionEngine`] runs a timed blend from
//!    the current program content to the target and publishes the result to
//!    the [`OutputSlot`] with one atomic store per mutation.
//! 4. **Render**: an external scheduler invokes [`ProgramView::render`] once
//!    per display refresh; it samples the slot without taking a lock.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-owned graph**: scenes and sources belong to an external provider
//!   behind the [`SceneGraph`] trait; the core holds non-owning handles plus
//!   at most the scoped duplicates it releases deterministically.
//! - **One writer, many readers**: the output slot is mutated only by the
//!   engine on the control thread and read concurrently by the render
//!   callback; no reader ever observes a half-updated binding.
//! - **Explicit time**: every operation that depends on the clock takes the
//!   current [`std::time::Instant`], so behavior is reproducible in tests.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod graph;
mod output;
mod render;
mod studio;
mod transition;

pub use foundation::core::{SceneId, SourceId, TransitionMode, VideoInfo};
pub use foundation::error::{MixdeckError, MixdeckResult};
pub use graph::memory::MemoryGraph;
pub use graph::provider::SceneGraph;
pub use output::slot::{OutputBinding, OutputSlot};
pub use render::view::{DrawBackend, PROGRAM_EDGE_SIZE, ProgramView, Viewport, fit_rect};
pub use studio::coordinator::StudioCoordinator;
pub use studio::quick::{QuickTransition, QuickTransitionRegistry};
pub use transition::engine::TransitionEngine;
pub use transition::model::{
    BlendSample, CUT_TRANSITION_ID, FADE_TRANSITION_ID, SWIPE_TRANSITION_ID, Transition,
    TransitionKind, builtin_transition_kinds, parse_transition_kind,
};
