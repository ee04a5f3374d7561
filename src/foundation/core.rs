use crate::foundation::error::{MixdeckError, MixdeckResult};

/// Non-owning handle to a renderable source.
///
/// A scene's root is itself addressable as a source: the handle bound to the
/// output slot after a transition completes is the target scene's root.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SourceId(pub u64);

/// Non-owning handle to a composited scene owned by the graph provider.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SceneId(pub u64);

/// How a transition presents its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransitionMode {
    /// Instantaneous: the next rendered frame already shows the target.
    Cut,
    /// Timed: interpolated frames over the configured duration window.
    Auto,
}

/// Base video resolution reported by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoInfo {
    /// Canvas width in pixels.
    pub base_width: u32,
    /// Canvas height in pixels.
    pub base_height: u32,
}

impl VideoInfo {
    /// Build a [`VideoInfo`], rejecting degenerate resolutions.
    pub fn new(base_width: u32, base_height: u32) -> MixdeckResult<Self> {
        if base_width == 0 || base_height == 0 {
            return Err(MixdeckError::validation(
                "video base resolution must be non-zero",
            ));
        }
        Ok(Self {
            base_width,
            base_height,
        })
    }
}
