//! Headless camrig demo: animates a three-bone arm while a third-person
//! camera circles it, logging what a renderer would receive.
//!
//! Usage: `camrig [options.toml]`

use std::f32::consts::PI;
use std::path::Path;

use camrig::animation::{
    AnimationClip, AnimationPlayer, Bone, Pose, SkinPalette, Skeleton,
};
use camrig::camera::{Camera, CameraController, CameraMode};
use camrig::input::{InputEvent, InputTracker};
use camrig::math::Transform;
use camrig::options::Options;
use camrig::RigError;
use glam::{Quat, Vec3};

/// Simulated frame rate of the demo loop.
const FRAME_TIME: f32 = 1.0 / 60.0;
/// Simulated run length.
const SECONDS: f32 = 3.0;
/// Frames in the baked swing clip.
const SWING_FRAMES: usize = 48;
/// Bone length of the demo arm.
const SEGMENT: f32 = 1.5;

fn arm_bones() -> Vec<Bone> {
    vec![
        Bone::root("shoulder"),
        Bone::child("elbow", 0),
        Bone::child("wrist", 1),
    ]
}

fn arm_skeleton() -> Result<Skeleton, RigError> {
    let bind_pose = (0..3)
        .map(|bone| {
            Transform::from_translation(Vec3::new(
                0.0,
                SEGMENT * bone as f32,
                0.0,
            ))
        })
        .collect();
    Skeleton::new(arm_bones(), bind_pose)
}

/// One full swing: the shoulder sweeps around Z, the elbow bends twice as
/// fast and the wrist stays straight.
fn swing_clip() -> Result<AnimationClip, RigError> {
    let frames = (0..SWING_FRAMES)
        .map(|frame| {
            let phase = 2.0 * PI * frame as f32 / SWING_FRAMES as f32;
            vec![
                Transform::from_rotation(Quat::from_rotation_z(
                    0.6 * phase.sin(),
                )),
                Transform::new(
                    Vec3::new(0.0, SEGMENT, 0.0),
                    Quat::from_rotation_z(0.4 * (2.0 * phase).sin().abs()),
                    Vec3::ONE,
                ),
                Transform::from_translation(Vec3::new(0.0, SEGMENT, 0.0)),
            ]
        })
        .collect();
    AnimationClip::from_frames("swing", arm_bones(), frames)
}

fn log_pose(frame: usize, pose: &Pose) {
    for (bone, transform) in arm_bones().iter().zip(pose.transforms()) {
        log::info!(
            "  frame {frame:>2} {:<8} at {:.3?}",
            bone.name,
            transform.translation
        );
    }
}

fn run(options: &Options) -> Result<(), RigError> {
    let skeleton = arm_skeleton()?;
    let mut palette = SkinPalette::from_bind_pose(&skeleton);
    let mut player = AnimationPlayer::new(skeleton, &options.animation);
    let _ = player.add_clip(swing_clip()?)?;

    let camera = Camera::new(
        Vec3::new(0.0, 2.0, 8.0),
        Vec3::new(0.0, SEGMENT, 0.0),
        Vec3::Y,
        options.camera.fovy,
    );
    let mut controller = CameraController::new(camera, options.camera.clone());
    controller.set_mode(CameraMode::ThirdPerson);

    let mut tracker =
        InputTracker::with_key_bindings(options.keybindings.clone());
    let _ = tracker.handle_event(&InputEvent::CursorMoved { x: 0.0, y: 0.0 });

    let frames = (SECONDS / FRAME_TIME).round() as usize;
    let mut uniforms = Vec::new();
    for frame in 0..frames {
        // Scripted input: drag the mouse right, zoom in once per second.
        let _ = tracker.handle_event(&InputEvent::MouseMotion {
            dx: 4.0,
            dy: 0.0,
        });
        if frame % 60 == 30 {
            let _ = tracker.handle_event(&InputEvent::Scroll { delta: 1.0 });
        }
        controller.update(&tracker.snapshot(FRAME_TIME));
        tracker.end_frame();

        let _ = player.tick(FRAME_TIME);
        palette.update(player.pose());
        palette.write_uniforms(&mut uniforms);

        if frame % 30 == 0 {
            let camera = &controller.camera;
            log::info!(
                "t={:.2}s camera at {:.3?} looking at {:.3?} ({:.2} away)",
                frame as f32 * FRAME_TIME,
                camera.position,
                camera.target,
                camera.target_distance()
            );
            log_pose(player.current_frame(), player.pose());
        }
    }

    let uniform = controller.uniform(16.0 / 9.0);
    log::info!(
        "final view-projection ready ({} bytes), {} bone matrices ({} bytes)",
        bytemuck::bytes_of(&uniform).len(),
        uniforms.len(),
        bytemuck::cast_slice::<_, u8>(&uniforms).len()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = std::env::args()
        .nth(1)
        .map_or_else(Options::default, |path| {
            Options::load_or_default(Path::new(&path))
        });

    if let Err(e) = run(&options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
