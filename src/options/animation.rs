use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::FramePolicy;

/// Animation playback parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Clip frames advanced per second of playback.
    #[schemars(title = "Frame Rate", range(min = 1.0, max = 240.0), extend("step" = 1.0))]
    pub fps: f32,
    /// What happens after the last frame of a clip.
    #[schemars(title = "At Clip End")]
    pub frame_policy: FramePolicy,
    /// Start playing as soon as a clip is selected.
    #[schemars(title = "Autoplay")]
    pub autoplay: bool,
    /// Blend between neighbouring frames instead of snapping to whole
    /// frames.
    #[schemars(title = "Interpolate Frames")]
    pub interpolate: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            fps: 60.0,
            frame_policy: FramePolicy::Wrap,
            autoplay: true,
            interpolate: true,
        }
    }
}
