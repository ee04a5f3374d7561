use crate::foundation::core::{SceneId, SourceId};

/// Narrow port onto the host-owned composition graph.
///
/// The provider owns every scene and source; the switching core holds
/// non-owning handles only. The one exception is [`duplicate_scene`], which
/// transfers exactly one ownership to the caller — the coordinator releases
/// such duplicates deterministically via [`release_scene`] when they stop
/// being a transition source.
///
/// All methods tolerate unknown handles: lookups return `None` and
/// [`release_scene`] on an unknown handle leaves the graph unchanged.
///
/// [`duplicate_scene`]: SceneGraph::duplicate_scene
/// [`release_scene`]: SceneGraph::release_scene
pub trait SceneGraph {
    /// Resolve the root source of a scene, the handle a transition targets.
    fn root_source(&self, scene: SceneId) -> Option<SourceId>;

    /// Reverse lookup from a root source to its scene, if the source is one.
    fn scene_of_source(&self, source: SourceId) -> Option<SceneId>;

    /// Duplicate a scene as a private copy.
    ///
    /// With `private_refs` the duplicate carries its own reference-counted
    /// bindings to the scene's sub-sources, so later edits to the original's
    /// item list do not affect the copy. Duplication is a reference/metadata
    /// copy, synchronous on the control thread.
    fn duplicate_scene(&mut self, scene: SceneId, private_refs: bool) -> Option<SceneId>;

    /// Release one ownership of a scene obtained from
    /// [`SceneGraph::duplicate_scene`].
    fn release_scene(&mut self, scene: SceneId);
}
