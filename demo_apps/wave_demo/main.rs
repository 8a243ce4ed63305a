//! Waves an arm for a few seconds and logs where the hand ends up.
//!
//! The skeleton starts out "loading" to show the bootstrap retry; it becomes
//! ready a few frames later, the way an asynchronously imported model would.
//!
//! ```text
//! RUST_LOG=debug cargo run -p wave_demo -- 240
//! ```

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use glam::{Quat, Vec3};
use skelanim::prelude::*;

const SHOULDER: &str = "Armature/Hips/Spine/Shoulder.R";
const ELBOW: &str = "Armature/Hips/Spine/Shoulder.R/Elbow.R";
const HAND: &str = "Armature/Hips/Spine/Shoulder.R/Elbow.R/Hand.R";

/// Frames after which the fake asset import finishes.
const READY_AFTER_FRAMES: u64 = 5;

fn build_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::loading("waver");
    let hips = skeleton.add_joint(
        "Armature/Hips",
        None,
        JointTransform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
    );
    let spine = skeleton.add_joint(
        "Armature/Hips/Spine",
        Some(hips),
        JointTransform::from_translation(Vec3::new(0.0, 0.4, 0.0)),
    );
    let shoulder = skeleton.add_joint(
        SHOULDER,
        Some(spine),
        JointTransform::new(
            Vec3::new(-0.2, 0.3, 0.0),
            Quat::from_rotation_z(-0.2),
            Vec3::ONE,
        ),
    );
    let elbow = skeleton.add_joint(
        ELBOW,
        Some(shoulder),
        JointTransform::from_translation(Vec3::new(-0.3, 0.0, 0.0)),
    );
    skeleton.add_joint(
        HAND,
        Some(elbow),
        JointTransform::from_translation(Vec3::new(-0.25, 0.0, 0.0)),
    );
    skeleton
}

/// Raise the arm, wave the forearm twice, lower it again.
fn wave_timeline() -> Result<Timeline> {
    let raised = Quat::from_rotation_z(-FRAC_PI_2 - 0.3);
    let elbow_out = Quat::from_rotation_z(-0.6);
    let elbow_in = Quat::from_rotation_z(0.2);

    Timeline::new(
        vec![
            // Replaced by the live pose at bootstrap
            Keyframe::new(0.0, Pose::new()),
            Keyframe::new(0.6, Pose::new().with(SHOULDER, raised).with(ELBOW, elbow_out)),
            Keyframe::new(0.9, Pose::new().with(ELBOW, elbow_in)),
            Keyframe::new(1.2, Pose::new().with(SHOULDER, raised).with(ELBOW, elbow_out)),
            Keyframe::new(1.5, Pose::new().with(SHOULDER, raised).with(ELBOW, elbow_in)),
            Keyframe::new(
                2.2,
                Pose::new()
                    .with(SHOULDER, Quat::from_rotation_z(-0.2))
                    .with(ELBOW, Quat::IDENTITY),
            ),
        ],
        3.0,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames: u64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 180,
    };

    let mut rigs: SlotMap<SkeletonKey, Skeleton> = SlotMap::with_key();
    let key = rigs.insert(build_skeleton());

    let settings = AnimatorSettings::default().with_retry(RetryPolicy {
        max_attempts: 20,
        delay: 0.05,
    });
    let mut system = AnimationSystem::new(settings);
    let handle = system.attach_and_animate(
        &rigs,
        key,
        wave_timeline()?,
        Easing::InOutCosine,
        &[SHOULDER, ELBOW, HAND],
    )?;

    let hand = rigs[key]
        .find(HAND)
        .ok_or_else(|| anyhow::anyhow!("skeleton has no hand joint"))?;
    let mut timer = FrameTimer::new().with_max_delta(0.1);

    while timer.frame_count < frames {
        std::thread::sleep(Duration::from_millis(16));
        let dt = timer.tick();

        if timer.frame_count == READY_AFTER_FRAMES {
            rigs[key].set_status(RigStatus::Ready);
        }

        system.update(&mut rigs, dt);

        if let Some((failed, err)) = system.take_failures().into_iter().next() {
            anyhow::bail!("animator {failed:?} failed: {err}");
        }

        if timer.frame_count % 30 == 0 {
            let world = rigs[key].compute_world_matrices();
            let p: Vec3 = world[hand].translation.into();
            let looped = system
                .animator(handle)
                .map_or(0.0, |a| a.clock().looped());
            log::info!(
                "frame {:>4}  t={looped:.2}s  hand=({:+.2}, {:+.2}, {:+.2})",
                timer.frame_count,
                p.x,
                p.y,
                p.z
            );
        }
    }

    system.detach(handle);
    log::info!("Done after {:.2}s", timer.elapsed.as_secs_f32());
    Ok(())
}
