use crate::{
    foundation::error::{MixdeckError, MixdeckResult},
    transition::model::parse_transition_kind,
};

/// Immutable (display name, transition kind, duration) preset selectable
/// with one action.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuickTransition {
    /// Display name of the preset.
    pub name: String,
    /// Transition kind identifier, validated against the built-in table.
    pub transition: String,
    /// Blend duration in milliseconds, overriding the session default.
    pub duration_ms: u64,
}

/// Registry mapping an opaque index to a quick-transition preset.
///
/// Duplicates are permitted; display order is insertion order. Selection by
/// an index outside the populated range is a no-op at the coordinator.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct QuickTransitionRegistry {
    items: Vec<QuickTransition>,
}

impl QuickTransitionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a preset, returning its index.
    pub fn add(&mut self, preset: QuickTransition) -> usize {
        self.items.push(preset);
        self.items.len() - 1
    }

    /// Resolve a preset by index.
    pub fn get(&self, index: usize) -> Option<&QuickTransition> {
        self.items.get(index)
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry holds no presets.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Presets in display (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &QuickTransition> {
        self.items.iter()
    }

    /// Load a registry from JSON, validating every kind id against the
    /// built-in table.
    pub fn from_json(json: &str) -> MixdeckResult<Self> {
        let registry: Self =
            serde_json::from_str(json).map_err(|e| MixdeckError::serde(e.to_string()))?;
        for preset in &registry.items {
            parse_transition_kind(&preset.transition)?;
        }
        Ok(registry)
    }

    /// Serialize the registry to JSON.
    pub fn to_json(&self) -> MixdeckResult<String> {
        serde_json::to_string(self).map_err(|e| MixdeckError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/studio/quick.rs"]
mod tests;
