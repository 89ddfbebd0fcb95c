//! Clip playback over a single skeleton.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::clip::AnimationClip;
use super::pose::Pose;
use super::skeleton::Skeleton;
use crate::error::RigError;
use crate::options::AnimationOptions;

/// What playback does after the last frame of a clip.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FramePolicy {
    /// Loop back to frame 0.
    #[default]
    Wrap,
    /// Hold the last frame and stop playing.
    Clamp,
}

/// Frame sequencer that keeps an evaluated [`Pose`] for the current frame.
///
/// Time is fed in with [`tick`](Self::tick); whole frames are advanced at
/// the configured rate and the remainder carries over to the next tick.
/// With interpolation on, the remainder also blends the pose towards the
/// next frame.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    skeleton: Skeleton,
    clips: Vec<AnimationClip>,
    pose: Pose,
    current_clip: usize,
    current_frame: usize,
    /// Seconds per frame.
    frame_duration: f32,
    /// Seconds accumulated towards the next frame.
    elapsed: f32,
    playing: bool,
    autoplay: bool,
    interpolate: bool,
    policy: FramePolicy,
}

impl AnimationPlayer {
    /// Player for `skeleton` with no clips, showing the bind pose.
    pub fn new(skeleton: Skeleton, options: &AnimationOptions) -> Self {
        let pose = Pose::from_bind_pose(&skeleton);
        let mut player = Self {
            skeleton,
            clips: Vec::new(),
            pose,
            current_clip: 0,
            current_frame: 0,
            frame_duration: 1.0 / 60.0,
            elapsed: 0.0,
            playing: false,
            autoplay: true,
            interpolate: true,
            policy: FramePolicy::Wrap,
        };
        player.apply_options(options);
        player
    }

    /// Apply playback rate, end-of-clip policy, autoplay and
    /// interpolation.
    pub fn apply_options(&mut self, options: &AnimationOptions) {
        self.set_fps(options.fps);
        self.policy = options.frame_policy;
        self.autoplay = options.autoplay;
        self.set_interpolate(options.interpolate);
    }

    /// Register a clip, returning its index.
    ///
    /// Clips that do not match the skeleton are rejected with
    /// [`RigError::ClipMismatch`]. The first clip added becomes current.
    pub fn add_clip(&mut self, clip: AnimationClip) -> Result<usize, RigError> {
        if let Err(reason) = clip.validate_against(&self.skeleton) {
            log::warn!("rejected clip '{}': {reason}", clip.name());
            return Err(RigError::ClipMismatch {
                clip: clip.name().to_owned(),
                reason,
            });
        }
        log::debug!(
            "added clip '{}' ({} frames)",
            clip.name(),
            clip.frame_count()
        );
        self.clips.push(clip);
        let index = self.clips.len() - 1;
        if index == 0 {
            let _ = self.select_clip(0);
        }
        Ok(index)
    }

    /// Make clip `index` current and rewind it. Returns false if no such
    /// clip exists.
    pub fn select_clip(&mut self, index: usize) -> bool {
        if index >= self.clips.len() {
            return false;
        }
        self.current_clip = index;
        self.current_frame = 0;
        self.elapsed = 0.0;
        self.playing = self.autoplay;
        self.refresh_pose();
        true
    }

    /// Switch to the next clip, wrapping to the first.
    pub fn next_clip(&mut self) {
        if self.clips.is_empty() {
            return;
        }
        let _ = self.select_clip((self.current_clip + 1) % self.clips.len());
    }

    /// Switch to the previous clip, wrapping to the last.
    pub fn previous_clip(&mut self) {
        if self.clips.is_empty() {
            return;
        }
        let count = self.clips.len();
        let _ = self.select_clip((self.current_clip + count - 1) % count);
    }

    /// Advance playback by `dt` seconds. Returns true if the frame changed.
    ///
    /// Negative and non-finite `dt` are ignored.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing || self.clips.is_empty() || !dt.is_finite() {
            return false;
        }
        self.elapsed += dt.max(0.0);
        let frames = (self.elapsed / self.frame_duration).floor();
        if frames < 1.0 {
            if self.interpolate {
                self.refresh_pose();
            }
            return false;
        }
        self.elapsed -= frames * self.frame_duration;
        self.advance(frames as usize)
    }

    /// Advance exactly one frame, playing or not. Returns true if the frame
    /// changed.
    pub fn step(&mut self) -> bool {
        self.advance(1)
    }

    /// Jump to `frame`, wrapped or clamped by the frame policy.
    pub fn seek(&mut self, frame: usize) {
        let Some(clip) = self.clips.get(self.current_clip) else {
            return;
        };
        let target = match self.policy {
            FramePolicy::Wrap => clip.wrap_frame(frame),
            FramePolicy::Clamp => clip.clamp_frame(frame),
        };
        if let Some(target) = target {
            self.current_frame = target;
            self.elapsed = 0.0;
            self.refresh_pose();
        }
    }

    /// Toggle between playing and paused.
    ///
    /// Resuming a clamped clip that stopped on its last frame rewinds it.
    pub fn toggle_playback(&mut self) {
        self.playing = !self.playing;
        if !self.playing {
            return;
        }
        self.elapsed = 0.0;
        let at_end = self
            .current_clip()
            .is_some_and(|clip| self.current_frame + 1 >= clip.frame_count());
        if self.policy == FramePolicy::Clamp && at_end {
            self.seek(0);
        }
    }

    /// Set playback speed in frames per second (clamped to >= 0.1).
    pub fn set_fps(&mut self, fps: f32) {
        self.frame_duration = 1.0 / fps.max(0.1);
    }

    /// Set what happens after the last frame.
    pub fn set_frame_policy(&mut self, policy: FramePolicy) {
        self.policy = policy;
    }

    /// Turn blending between neighbouring frames on or off.
    pub fn set_interpolate(&mut self, interpolate: bool) {
        if self.interpolate != interpolate {
            self.interpolate = interpolate;
            self.refresh_pose();
        }
    }

    /// Whether the pose blends towards the next frame.
    pub fn interpolates(&self) -> bool {
        self.interpolate
    }

    /// Evaluated pose of the current frame.
    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Skeleton driven by this player.
    #[inline]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Current clip, if any clip was added.
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.clips.get(self.current_clip)
    }

    /// Index of the current clip.
    pub fn current_clip_index(&self) -> usize {
        self.current_clip
    }

    /// Number of registered clips.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Index of the current frame.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Whether time is advancing frames.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Active end-of-clip policy.
    pub fn frame_policy(&self) -> FramePolicy {
        self.policy
    }

    fn advance(&mut self, frames: usize) -> bool {
        // Registered clips always have at least one frame.
        let Some(frame_count) =
            self.current_clip().map(AnimationClip::frame_count)
        else {
            return false;
        };
        let previous = self.current_frame;
        match self.policy {
            FramePolicy::Wrap => {
                self.current_frame =
                    (previous + frames % frame_count) % frame_count;
            }
            FramePolicy::Clamp => {
                let last = frame_count - 1;
                self.current_frame = previous.saturating_add(frames).min(last);
                if self.current_frame == last && self.playing {
                    log::debug!("clip reached its last frame, stopping");
                    self.playing = false;
                    self.elapsed = 0.0;
                }
            }
        }
        if self.current_frame == previous {
            return false;
        }
        self.refresh_pose();
        true
    }

    fn refresh_pose(&mut self) {
        let Some(clip) = self.clips.get(self.current_clip) else {
            return;
        };
        // A stopped clamped clip has no next frame to blend into.
        let blend = if self.interpolate && self.playing {
            (self.elapsed / self.frame_duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if blend > 0.0 {
            let frame = self.current_frame as f32 + blend;
            self.pose.evaluate_blended(&self.skeleton, clip, frame);
        } else {
            self.pose.evaluate(&self.skeleton, clip, self.current_frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::animation::skeleton::Bone;
    use crate::math::Transform;

    fn bones() -> Vec<Bone> {
        vec![Bone::root("root"), Bone::child("tip", 0)]
    }

    /// Clip whose root sits at x = frame index.
    fn slide(name: &str, frames: usize) -> AnimationClip {
        AnimationClip::from_frames(
            name,
            bones(),
            (0..frames)
                .map(|frame| {
                    vec![
                        Transform::from_translation(Vec3::new(
                            frame as f32,
                            0.0,
                            0.0,
                        )),
                        Transform::from_translation(Vec3::Y),
                    ]
                })
                .collect(),
        )
        .unwrap()
    }

    fn player(options: &AnimationOptions) -> AnimationPlayer {
        let skeleton = Skeleton::with_identity_bind_pose(bones()).unwrap();
        AnimationPlayer::new(skeleton, options)
    }

    fn root_x(player: &AnimationPlayer) -> f32 {
        player.pose().transforms()[0].translation.x
    }

    #[test]
    fn starts_on_bind_pose_without_clips() {
        let mut player = player(&AnimationOptions::default());
        assert_eq!(player.pose().len(), 2);
        assert!(!player.tick(1.0));
        assert!(!player.step());
        assert!(player.current_clip().is_none());
    }

    #[test]
    fn first_clip_is_evaluated_at_frame_zero() {
        let mut player = player(&AnimationOptions::default());
        assert_eq!(player.add_clip(slide("walk", 4)).unwrap(), 0);
        assert!(player.is_playing());
        assert_eq!(player.current_frame(), 0);
        assert!(player.pose().transforms()[1]
            .translation
            .abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn mismatched_clip_is_rejected() {
        let mut player = player(&AnimationOptions::default());
        let clip = AnimationClip::from_frames(
            "wrong",
            vec![Bone::root("root")],
            vec![vec![Transform::IDENTITY]],
        )
        .unwrap();
        let err = player.add_clip(clip).unwrap_err();
        assert!(matches!(
            err,
            RigError::ClipMismatch { ref clip, .. } if clip == "wrong"
        ));
        assert_eq!(player.clip_count(), 0);
    }

    #[test]
    fn tick_advances_whole_frames_and_carries_remainder() {
        let options = AnimationOptions {
            fps: 10.0,
            interpolate: false,
            ..AnimationOptions::default()
        };
        let mut player = player(&options);
        let _ = player.add_clip(slide("walk", 8)).unwrap();

        assert!(!player.tick(0.05));
        assert_eq!(player.current_frame(), 0);
        assert!(player.tick(0.06));
        assert_eq!(player.current_frame(), 1);
        assert!(player.tick(0.25));
        assert_eq!(player.current_frame(), 3);
        assert!((root_x(&player) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn interpolation_blends_by_carried_remainder() {
        let options = AnimationOptions {
            fps: 10.0,
            ..AnimationOptions::default()
        };
        let mut player = player(&options);
        let _ = player.add_clip(slide("walk", 8)).unwrap();

        assert!(!player.tick(0.025));
        assert_eq!(player.current_frame(), 0);
        assert!((root_x(&player) - 0.25).abs() < 1e-4);

        assert!(player.tick(0.1));
        assert_eq!(player.current_frame(), 1);
        assert!((root_x(&player) - 1.25).abs() < 1e-4);

        player.set_interpolate(false);
        assert!((root_x(&player) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_time_is_ignored() {
        let options = AnimationOptions {
            fps: 30.0,
            ..AnimationOptions::default()
        };
        let mut player = player(&options);
        let _ = player.add_clip(slide("walk", 8)).unwrap();

        assert!(!player.tick(f32::INFINITY));
        assert!(!player.tick(f32::NAN));
        assert_eq!(player.current_frame(), 0);
        let advanced = (0..5).filter(|_| player.tick(1.0 / 30.0)).count();
        assert!(advanced >= 4);
        assert!((4..=5).contains(&player.current_frame()));
        assert!(root_x(&player).is_finite());
    }

    #[test]
    fn wrap_policy_loops() {
        let mut player = player(&AnimationOptions::default());
        let _ = player.add_clip(slide("walk", 3)).unwrap();
        assert!(player.step());
        assert!(player.step());
        assert!(player.step());
        assert_eq!(player.current_frame(), 0);
        assert!(player.is_playing());

        player.seek(7);
        assert_eq!(player.current_frame(), 1);
    }

    #[test]
    fn clamp_policy_stops_on_last_frame() {
        let options = AnimationOptions {
            fps: 10.0,
            frame_policy: FramePolicy::Clamp,
            ..AnimationOptions::default()
        };
        let mut player = player(&options);
        let _ = player.add_clip(slide("wave", 4)).unwrap();

        assert!(player.tick(10.0));
        assert_eq!(player.current_frame(), 3);
        assert!(!player.is_playing());
        assert!(!player.tick(1.0));
        assert!((root_x(&player) - 3.0).abs() < 1e-6);

        player.seek(99);
        assert_eq!(player.current_frame(), 3);

        // Resuming at the end rewinds.
        player.toggle_playback();
        assert!(player.is_playing());
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn paused_player_ignores_time_but_steps() {
        let mut player = player(&AnimationOptions::default());
        let _ = player.add_clip(slide("walk", 4)).unwrap();
        player.toggle_playback();
        assert!(!player.is_playing());
        assert!(!player.tick(1.0));
        assert_eq!(player.current_frame(), 0);
        assert!(player.step());
        assert_eq!(player.current_frame(), 1);
    }

    #[test]
    fn clip_cycling_wraps_and_rewinds() {
        let mut player = player(&AnimationOptions::default());
        let _ = player.add_clip(slide("a", 4)).unwrap();
        let _ = player.add_clip(slide("b", 4)).unwrap();
        let _ = player.add_clip(slide("c", 4)).unwrap();
        assert_eq!(player.current_clip().map(AnimationClip::name), Some("a"));

        let _ = player.step();
        player.next_clip();
        assert_eq!(player.current_clip_index(), 1);
        assert_eq!(player.current_frame(), 0);

        player.previous_clip();
        player.previous_clip();
        assert_eq!(player.current_clip().map(AnimationClip::name), Some("c"));
        player.next_clip();
        assert_eq!(player.current_clip_index(), 0);
    }

    #[test]
    fn autoplay_off_waits_for_toggle() {
        let options = AnimationOptions {
            autoplay: false,
            ..AnimationOptions::default()
        };
        let mut player = player(&options);
        let _ = player.add_clip(slide("idle", 2)).unwrap();
        assert!(!player.is_playing());
        player.toggle_playback();
        assert!(player.is_playing());
    }

    #[test]
    fn frame_policy_serializes_as_snake_case() {
        let json = serde_json::to_string(&FramePolicy::Clamp).unwrap();
        assert_eq!(json, "\"clamp\"");
    }
}
