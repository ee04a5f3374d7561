use std::collections::BTreeMap;

use crate::{
    foundation::core::{SceneId, SourceId},
    graph::provider::SceneGraph,
};

#[derive(Clone, Debug)]
struct SceneEntry {
    name: String,
    root: SourceId,
    sources: Vec<SourceId>,
    refs: u32,
    /// Whether this entry holds its own references to its sub-sources
    /// (created scenes and private-ref duplicates do; shared duplicates
    /// borrow the original's).
    owns_items: bool,
}

/// Reference-counted in-memory scene graph provider.
///
/// The default [`SceneGraph`] backend: named scenes, ordered source lists,
/// private-ref duplicates. Hosts embedding the core against a real
/// composition graph implement [`SceneGraph`] themselves; this one also gives
/// tests observable reference counts.
#[derive(Clone, Debug, Default)]
pub struct MemoryGraph {
    scenes: BTreeMap<SceneId, SceneEntry>,
    roots: BTreeMap<SourceId, SceneId>,
    source_refs: BTreeMap<SourceId, u32>,
    next_id: u64,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Create a named scene with a fresh root source and no items.
    pub fn create_scene(&mut self, name: impl Into<String>) -> SceneId {
        let scene = SceneId(self.alloc());
        let root = SourceId(self.alloc());
        self.scenes.insert(
            scene,
            SceneEntry {
                name: name.into(),
                root,
                sources: Vec::new(),
                refs: 1,
                owns_items: true,
            },
        );
        self.roots.insert(root, scene);
        self.source_refs.insert(root, 1);
        scene
    }

    /// Append a new source to a scene's item list.
    pub fn add_source(&mut self, scene: SceneId) -> Option<SourceId> {
        if !self.scenes.contains_key(&scene) {
            return None;
        }
        let source = SourceId(self.alloc());
        self.source_refs.insert(source, 1);
        let entry = self.scenes.get_mut(&scene)?;
        entry.sources.push(source);
        Some(source)
    }

    /// Scene display name, if the scene is alive.
    pub fn scene_name(&self, scene: SceneId) -> Option<&str> {
        self.scenes.get(&scene).map(|e| e.name.as_str())
    }

    /// Ordered sub-sources of a scene.
    pub fn scene_sources(&self, scene: SceneId) -> Option<&[SourceId]> {
        self.scenes.get(&scene).map(|e| e.sources.as_slice())
    }

    /// Whether the scene handle currently resolves.
    pub fn contains(&self, scene: SceneId) -> bool {
        self.scenes.contains_key(&scene)
    }

    /// Reference count of a source; zero once fully released.
    pub fn source_ref_count(&self, source: SourceId) -> u32 {
        self.source_refs.get(&source).copied().unwrap_or(0)
    }

    /// Number of live scenes (duplicates included).
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn release_source(&mut self, source: SourceId) {
        if let Some(refs) = self.source_refs.get_mut(&source) {
            *refs -= 1;
            if *refs == 0 {
                self.source_refs.remove(&source);
            }
        }
    }
}

impl SceneGraph for MemoryGraph {
    fn root_source(&self, scene: SceneId) -> Option<SourceId> {
        self.scenes.get(&scene).map(|e| e.root)
    }

    fn scene_of_source(&self, source: SourceId) -> Option<SceneId> {
        self.roots.get(&source).copied()
    }

    fn duplicate_scene(&mut self, scene: SceneId, private_refs: bool) -> Option<SceneId> {
        let (name, sources) = {
            let entry = self.scenes.get(&scene)?;
            (format!("{} (copy)", entry.name), entry.sources.clone())
        };

        if private_refs {
            for &source in &sources {
                if let Some(refs) = self.source_refs.get_mut(&source) {
                    *refs += 1;
                }
            }
        }

        let dup = SceneId(self.alloc());
        let root = SourceId(self.alloc());
        self.scenes.insert(
            dup,
            SceneEntry {
                name,
                root,
                sources,
                refs: 1,
                owns_items: private_refs,
            },
        );
        self.roots.insert(root, dup);
        self.source_refs.insert(root, 1);
        Some(dup)
    }

    fn release_scene(&mut self, scene: SceneId) {
        let remove = match self.scenes.get_mut(&scene) {
            Some(entry) => {
                entry.refs -= 1;
                entry.refs == 0
            }
            None => {
                tracing::debug!(?scene, "release of unknown scene ignored");
                false
            }
        };
        if !remove {
            return;
        }

        let entry = match self.scenes.remove(&scene) {
            Some(entry) => entry,
            None => return,
        };
        self.roots.remove(&entry.root);
        self.release_source(entry.root);
        if entry.owns_items {
            for source in entry.sources {
                self.release_source(source);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/memory.rs"]
mod tests;
