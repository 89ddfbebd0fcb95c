//! Pose evaluation, skinning and camera update benchmarks.
#![allow(missing_docs, clippy::unwrap_used)]

use camrig::animation::{
    evaluate_pose, AnimationClip, Bone, Pose, SkinPalette, Skeleton,
};
use camrig::camera::{update_camera, Camera, CameraMode};
use camrig::input::{CameraAction, CameraInput};
use camrig::math::Transform;
use camrig::options::CameraOptions;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec2, Vec3};

/// Binary-tree rig: bone `i` hangs off bone `(i - 1) / 2`.
fn tree_rig(bone_count: usize, frames: usize) -> (Skeleton, AnimationClip) {
    let bones: Vec<Bone> = (0..bone_count)
        .map(|i| {
            let name = format!("bone_{i}");
            if i == 0 {
                Bone::root(name)
            } else {
                Bone::child(name, (i - 1) / 2)
            }
        })
        .collect();
    let skeleton = Skeleton::with_identity_bind_pose(bones.clone()).unwrap();
    let poses = (0..frames * bone_count)
        .map(|i| {
            Transform::new(
                Vec3::new(0.0, 1.0, 0.0),
                Quat::from_rotation_z(0.01 * i as f32),
                Vec3::ONE,
            )
        })
        .collect();
    let clip = AnimationClip::new("bench", bones, frames, poses).unwrap();
    (skeleton, clip)
}

fn pose_evaluation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_evaluate");

    for count in [16, 64, 256, 1024] {
        let (skeleton, clip) = tree_rig(count, 30);
        let mut pose = Pose::new();
        let mut frame = 0;

        group.bench_function(format!("{count}_bones"), |b| {
            b.iter(|| {
                frame += 1;
                pose.evaluate(&skeleton, &clip, black_box(frame));
            });
        });
    }
    group.finish();
}

fn allocating_evaluation_benchmark(c: &mut Criterion) {
    let (skeleton, clip) = tree_rig(64, 30);
    c.bench_function("evaluate_pose_64_bones", |b| {
        b.iter(|| black_box(evaluate_pose(&skeleton, &clip, black_box(7))));
    });
}

fn skin_palette_benchmark(c: &mut Criterion) {
    let (skeleton, clip) = tree_rig(64, 30);
    let pose = evaluate_pose(&skeleton, &clip, 3);
    let mut palette = SkinPalette::from_bind_pose(&skeleton);
    c.bench_function("skin_palette_64_bones", |b| {
        b.iter(|| palette.update(black_box(&pose)));
    });
}

fn camera_update_benchmark(c: &mut Criterion) {
    let options = CameraOptions::default();
    let input = CameraInput::idle(1.0 / 60.0)
        .with_down(CameraAction::Forward)
        .with_down(CameraAction::YawLeft)
        .with_mouse_delta(Vec2::new(3.0, -2.0))
        .with_wheel(0.5);
    let mut group = c.benchmark_group("camera_update");

    for mode in [
        CameraMode::Free,
        CameraMode::Orbital,
        CameraMode::FirstPerson,
        CameraMode::ThirdPerson,
    ] {
        let mut camera = Camera::default();
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| {
                update_camera(&mut camera, mode, black_box(&input), &options);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    pose_evaluation_benchmark,
    allocating_evaluation_benchmark,
    skin_palette_benchmark,
    camera_update_benchmark
);
criterion_main!(benches);
