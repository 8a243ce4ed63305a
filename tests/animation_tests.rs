//! Animation Core Tests
//!
//! Tests for:
//! - Timeline construction, sorting and one-shot bootstrap
//! - Segment resolution (hold-first, hold-last, bracketing, degenerate segments)
//! - Cursor resolver agreement with the linear reference
//! - Shortest-arc slerp
//! - Loop wrapping and the accumulating clock
//! - Animator tick: write-back, hold policy, channel preservation

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::{Quat, Vec3};

use skelanim::animation::animator::{Animator, AnimatorPhase};
use skelanim::animation::clock::AnimationClock;
use skelanim::animation::easing::Easing;
use skelanim::animation::interpolate::slerp_rotation;
use skelanim::animation::pose::{Keyframe, Pose};
use skelanim::animation::resolver::{KeyframeCursor, resolve, resolve_with_cursor};
use skelanim::animation::timeline::{Timeline, wrap_time};
use skelanim::errors::AnimatorError;
use skelanim::scene::{JointTransform, Skeleton, SkeletonRig};
use skelanim::utils::JointId;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn quat_approx(a: Quat, b: Quat) -> bool {
    a.angle_between(b) < 1e-3
}

fn empty_keys(times: &[f32]) -> Vec<Keyframe> {
    times.iter().map(|&t| Keyframe::new(t, Pose::new())).collect()
}

fn timeline(times: &[f32], loop_period: f32) -> Timeline {
    Timeline::new(empty_keys(times), loop_period).unwrap()
}

/// Root -> Arm -> Hand, each offset and scaled so channel preservation is visible.
fn arm_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::new("arm");
    let root = skeleton.add_joint("Rig/Root", None, JointTransform::IDENTITY);
    let arm = skeleton.add_joint(
        "Rig/Root/Arm",
        Some(root),
        JointTransform::new(Vec3::new(0.0, 1.5, 0.0), Quat::IDENTITY, Vec3::splat(2.0)),
    );
    skeleton.add_joint(
        "Rig/Root/Arm/Hand",
        Some(arm),
        JointTransform::new(
            Vec3::new(0.0, 0.8, 0.1),
            Quat::from_rotation_z(0.3),
            Vec3::ONE,
        ),
    );
    skeleton
}

// ============================================================================
// Timeline
// ============================================================================

#[test]
fn timeline_sorts_out_of_order_keyframes() {
    let tl = timeline(&[2.0, 0.0, 1.0, 3.0], 4.0);
    let times: Vec<f32> = tl.keyframes().iter().map(|k| k.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0]);
    assert!(approx(tl.duration(), 3.0));
}

#[test]
fn timeline_rejects_bad_loop_period() {
    assert_eq!(
        Timeline::new(empty_keys(&[0.0]), 0.0).unwrap_err(),
        AnimatorError::InvalidLoopPeriod(0.0)
    );
    assert!(Timeline::new(empty_keys(&[0.0]), -1.0).is_err());
    assert!(Timeline::new(empty_keys(&[0.0]), f32::NAN).is_err());
}

#[test]
fn keyframe_time_clamped_non_negative() {
    assert_eq!(Keyframe::new(-2.0, Pose::new()).time, 0.0);
    assert_eq!(Keyframe::new(f32::INFINITY, Pose::new()).time, 0.0);
}

#[test]
fn bootstrap_replaces_first_pose_once() {
    let mut tl = Timeline::new(
        vec![
            Keyframe::new(1.0, Pose::new().with("A", Quat::from_rotation_x(1.0))),
            Keyframe::new(0.0, Pose::new().with("A", Quat::from_rotation_y(1.0))),
        ],
        2.0,
    )
    .unwrap();

    let live = Quat::from_rotation_z(0.25);
    tl.bootstrap(Pose::new().with("A", live)).unwrap();
    assert!(tl.is_bootstrapped());

    let a = JointId::new("A");
    assert_eq!(tl.keyframes()[0].time, 0.0);
    assert_eq!(tl.keyframes()[0].pose.get(a), Some(live));
    assert_eq!(
        tl.keyframes()[1].pose.get(a),
        Some(Quat::from_rotation_x(1.0))
    );

    assert_eq!(
        tl.bootstrap(Pose::new()).unwrap_err(),
        AnimatorError::AlreadyBootstrapped
    );
    assert_eq!(tl.keyframes()[0].pose.get(a), Some(live));
}

#[test]
fn bootstrap_drops_authored_joints_missing_from_live_pose() {
    let mut tl = Timeline::new(
        vec![
            Keyframe::new(
                0.0,
                Pose::new()
                    .with("A", Quat::from_rotation_x(0.5))
                    .with("B", Quat::from_rotation_y(0.5)),
            ),
            Keyframe::new(1.0, Pose::new().with("B", Quat::IDENTITY)),
        ],
        2.0,
    )
    .unwrap();

    let live = Quat::from_rotation_z(0.1);
    tl.bootstrap(Pose::new().with("A", live)).unwrap();

    let first = &tl.keyframes()[0].pose;
    assert!(!first.contains(JointId::new("B")));
    assert_eq!(first.iter().collect::<Vec<_>>(), vec![(JointId::new("A"), live)]);
}

#[test]
fn bootstrap_on_empty_timeline_creates_keyframe() {
    let mut tl = Timeline::new(Vec::new(), 1.0).unwrap();
    tl.bootstrap(Pose::new().with("A", Quat::IDENTITY)).unwrap();
    assert_eq!(tl.keyframes().len(), 1);
    assert_eq!(tl.keyframes()[0].time, 0.0);
}

// ============================================================================
// Segment Resolver
// ============================================================================

#[test]
fn resolve_empty_timeline_is_none() {
    let tl = Timeline::new(Vec::new(), 1.0).unwrap();
    assert!(resolve(&tl, 0.5).is_none());
}

#[test]
fn resolve_before_first_holds_first() {
    let tl = timeline(&[1.0, 2.0, 3.0], 4.0);
    for t in [0.0, 0.5, 0.999] {
        let seg = resolve(&tl, t).unwrap();
        assert!(seg.is_hold());
        assert_eq!(seg.index, 0);
        assert_eq!(seg.progress, 0.0);
        assert_eq!(seg.prev.time, 1.0);
    }
}

#[test]
fn resolve_at_or_after_last_holds_last() {
    let tl = timeline(&[0.0, 1.0, 2.0], 4.0);
    for t in [2.0, 2.5, 3.99, 100.0] {
        let seg = resolve(&tl, t).unwrap();
        assert!(seg.is_hold(), "t={t}");
        assert_eq!(seg.index, 2);
        assert_eq!(seg.progress, 0.0);
    }
}

#[test]
fn resolve_brackets_interior_times() {
    let times = [0.0, 0.5, 1.25, 3.0];
    let tl = timeline(&times, 4.0);
    for i in 0..times.len() - 1 {
        for frac in [0.1, 0.5, 0.9] {
            let t = times[i] + (times[i + 1] - times[i]) * frac;
            let seg = resolve(&tl, t).unwrap();
            assert_eq!(seg.index, i, "t={t}");
            assert_eq!(seg.prev.time, times[i]);
            assert_eq!(seg.next.time, times[i + 1]);
            assert!(seg.progress > 0.0 && seg.progress < 1.0);
            assert!((seg.progress - frac).abs() < 1e-4);
        }
    }
}

#[test]
fn resolve_exact_keyframe_time_picks_first_matching_pair() {
    let tl = timeline(&[0.0, 1.0, 2.0], 4.0);
    let seg = resolve(&tl, 1.0).unwrap();
    assert_eq!(seg.index, 0);
    assert_eq!(seg.progress, 1.0);
}

#[test]
fn resolve_single_keyframe_always_holds() {
    let tl = timeline(&[0.5], 1.0);
    for t in [0.0, 0.5, 0.9] {
        let seg = resolve(&tl, t).unwrap();
        assert!(seg.is_hold());
        assert_eq!(seg.progress, 0.0);
    }
}

#[test]
fn resolve_degenerate_segment_progress_is_zero() {
    // Two keyframes sharing the first timestamp form a zero-length segment
    let tl = timeline(&[1.0, 1.0, 2.0], 4.0);
    let seg = resolve(&tl, 1.0).unwrap();
    assert_eq!(seg.index, 0);
    assert!(!seg.is_hold());
    assert_eq!(seg.progress, 0.0);

    // Interior duplicates are shadowed by the preceding pair
    let tl = timeline(&[0.0, 1.0, 1.0, 2.0], 4.0);
    let seg = resolve(&tl, 1.0).unwrap();
    assert_eq!(seg.index, 0);
    assert_eq!(seg.progress, 1.0);
    let seg = resolve(&tl, 1.5).unwrap();
    assert_eq!(seg.index, 2);
    assert!((seg.progress - 0.5).abs() < EPSILON);
}

#[test]
fn resolve_nan_holds_first() {
    let tl = timeline(&[0.0, 1.0], 2.0);
    let seg = resolve(&tl, f32::NAN).unwrap();
    assert_eq!(seg.index, 0);
    assert!(seg.is_hold());
}

#[test]
fn cursor_resolver_matches_linear_scan() {
    let tl = timeline(&[0.0, 0.25, 0.5, 0.5, 1.0, 1.5, 2.75, 3.0], 4.0);
    let mut cursor = KeyframeCursor::default();

    // Forward playback, then a loop wrap, then random scrubbing
    let mut times: Vec<f32> = (0..160).map(|i| i as f32 * 0.025).collect();
    times.extend([3.9, 0.1, 2.8, 0.5, 0.25, 1.0, 0.0, 3.0, 2.9, 0.49]);

    for t in times {
        let reference = resolve(&tl, t).unwrap();
        let cached = resolve_with_cursor(&tl, t, &mut cursor).unwrap();
        assert_eq!(reference.index, cached.index, "t={t}");
        assert_eq!(reference.is_hold(), cached.is_hold(), "t={t}");
        assert_eq!(reference.progress, cached.progress, "t={t}");
    }
}

// ============================================================================
// Slerp
// ============================================================================

#[test]
fn slerp_equal_endpoints_is_identity_op() {
    let qs = [
        Quat::IDENTITY,
        Quat::from_rotation_y(FRAC_PI_2),
        Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0).normalize(), 2.5),
    ];
    for q in qs {
        for t in [0.0, 0.3, 1.0, 1.4] {
            let r = slerp_rotation(q, q, t);
            assert!(quat_approx(r, q.normalize()));
            assert!(r.is_normalized());
        }
    }
}

#[test]
fn slerp_halfway_about_y() {
    let r = slerp_rotation(Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2), 0.5);
    assert!(quat_approx(r, Quat::from_rotation_y(FRAC_PI_4)));
}

#[test]
fn slerp_takes_shortest_arc() {
    let a = Quat::from_rotation_y(0.2);
    // Same orientation, opposite hemisphere
    let b = -Quat::from_rotation_y(0.6);
    let r = slerp_rotation(a, b, 0.5);
    assert!(quat_approx(r, Quat::from_rotation_y(0.4)));
}

#[test]
fn slerp_normalizes_inputs() {
    let a = Quat::from_xyzw(0.0, 0.0, 0.0, 2.0);
    let b = Quat::from_rotation_x(PI / 3.0) * 3.0;
    let r = slerp_rotation(a, b, 1.0);
    assert!(r.is_normalized());
    assert!(quat_approx(r, Quat::from_rotation_x(PI / 3.0)));
}

// ============================================================================
// Looping
// ============================================================================

#[test]
fn wrap_time_stays_in_period() {
    for clock in [0.0, 3.999, 4.0, 4.5, 8.0, 123.456, -0.5, -1e-9] {
        let t = wrap_time(clock, 4.0);
        assert!((0.0..4.0).contains(&t), "clock={clock} -> {t}");
    }
    assert!(approx(wrap_time(4.5, 4.0), 0.5));
    assert!(approx(wrap_time(-0.5, 4.0), 3.5));
}

#[test]
fn clock_accumulates_and_wraps() {
    let mut clock = AnimationClock::new(2.0);
    assert!(approx(clock.advance(0.5), 0.5));
    assert!(approx(clock.advance(1.0), 1.5));
    assert!(approx(clock.advance(1.0), 0.5));
    assert_eq!(clock.cycles(), 1);
    assert!((clock.elapsed() - 2.5).abs() < 1e-9);
}

#[test]
fn clock_ignores_invalid_deltas() {
    let mut clock = AnimationClock::new(2.0);
    clock.advance(0.25);
    clock.advance(-1.0);
    clock.advance(f32::NAN);
    clock.advance(f32::INFINITY);
    assert!(approx(clock.looped(), 0.25));
}

// ============================================================================
// Animator
// ============================================================================

fn y_swing_timeline(loop_period: f32) -> Timeline {
    Timeline::new(
        vec![
            Keyframe::new(0.0, Pose::new()),
            Keyframe::new(
                2.0,
                Pose::new().with("Rig/Root/Arm", Quat::from_rotation_y(FRAC_PI_2)),
            ),
        ],
        loop_period,
    )
    .unwrap()
}

fn bootstrapped(timeline: Timeline, easing: Easing, joints: &[&str], rig: &Skeleton) -> Animator {
    let ids = joints.iter().map(|p| JointId::new(p)).collect();
    let mut animator = Animator::new(timeline, easing, ids);
    animator.bootstrap(rig).unwrap();
    animator
}

#[test]
fn animator_is_noop_before_bootstrap() {
    let mut rig = arm_skeleton();
    let before = rig.clone();
    let mut animator = Animator::new(
        y_swing_timeline(4.0),
        Easing::Linear,
        vec![JointId::new("Rig/Root/Arm")],
    );
    assert_eq!(animator.phase(), AnimatorPhase::Unbound);

    let stats = animator.tick(1.0, &mut rig);
    assert_eq!(stats.driven, 0);
    assert_eq!(animator.clock().elapsed(), 0.0);
    for (a, b) in rig.joints().iter().zip(before.joints()) {
        assert_eq!(a.transform, b.transform);
    }
}

#[test]
fn animator_phases() {
    let mut rig = arm_skeleton();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::Linear, &["Rig/Root/Arm"], &rig);
    assert_eq!(animator.phase(), AnimatorPhase::Bootstrapped);
    animator.tick(0.1, &mut rig);
    assert_eq!(animator.phase(), AnimatorPhase::Running);
}

#[test]
fn scenario_quarter_turn_about_y() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::Linear, &["Rig/Root/Arm"], &rig);

    // clock = 1: halfway between identity and 90 degrees
    let stats = animator.tick(1.0, &mut rig);
    assert_eq!(stats.driven, 1);
    assert!(approx(stats.time, 1.0));
    let r = rig.joint_transform(arm).unwrap().rotation;
    assert!(quat_approx(r, Quat::from_rotation_y(FRAC_PI_4)), "got {r:?}");

    // clock = 3: past the last keyframe, hold it
    animator.tick(2.0, &mut rig);
    let r = rig.joint_transform(arm).unwrap().rotation;
    assert!(quat_approx(r, Quat::from_rotation_y(FRAC_PI_2)), "got {r:?}");

    // clock = 5 wraps to 1 again
    animator.tick(2.0, &mut rig);
    let r = rig.joint_transform(arm).unwrap().rotation;
    assert!(quat_approx(r, Quat::from_rotation_y(FRAC_PI_4)), "got {r:?}");
}

#[test]
fn tick_preserves_translation_and_scale() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let before = rig.joint_transform(arm).unwrap();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::InOutCosine, &["Rig/Root/Arm"], &rig);

    for _ in 0..10 {
        animator.tick(0.37, &mut rig);
        let now = rig.joint_transform(arm).unwrap();
        assert_eq!(now.translation, before.translation);
        assert_eq!(now.scale, before.scale);
        assert!(now.rotation.is_normalized());
    }
}

#[test]
fn unbound_and_missing_joints_untouched() {
    let mut rig = arm_skeleton();
    let root = rig.find("Rig/Root").unwrap();
    let hand = rig.find("Rig/Root/Arm/Hand").unwrap();
    let root_before = rig.joint_transform(root).unwrap();
    let hand_before = rig.joint_transform(hand).unwrap();

    // Hand is bound but never keyed after the bootstrap pose; Root is not bound
    let mut animator = bootstrapped(
        y_swing_timeline(4.0),
        Easing::Linear,
        &["Rig/Root/Arm", "Rig/Root/Arm/Hand", "Rig/Missing"],
        &rig,
    );
    assert_eq!(animator.binding().unwrap().len(), 2);

    let stats = animator.tick(1.0, &mut rig);
    assert_eq!(stats.driven, 1);
    assert_eq!(stats.held, 1);

    let root_after = rig.joint_transform(root).unwrap();
    let hand_after = rig.joint_transform(hand).unwrap();
    assert_eq!(root_after.rotation.to_array(), root_before.rotation.to_array());
    assert_eq!(hand_after.rotation.to_array(), hand_before.rotation.to_array());
    assert_eq!(hand_after, hand_before);
}

#[test]
fn bootstrap_captures_live_rotation_exactly() {
    let mut rig = Skeleton::new("single");
    let live = Quat::from_xyzw(0.1, 0.2, 0.3, 0.927_361_85);
    rig.add_joint("A", None, JointTransform::from_rotation(live));

    let tl = Timeline::new(
        vec![
            Keyframe::new(0.0, Pose::new()),
            Keyframe::new(1.0, Pose::new().with("A", Quat::IDENTITY)),
        ],
        2.0,
    )
    .unwrap();
    let animator = bootstrapped(tl, Easing::Linear, &["A"], &rig);

    let captured = animator.timeline().keyframes()[0]
        .pose
        .get(JointId::new("A"))
        .unwrap();
    assert_eq!(captured.to_array(), live.to_array());
}

#[test]
fn bootstrap_is_idempotent_after_success() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::Linear, &["Rig/Root/Arm"], &rig);

    animator.tick(1.0, &mut rig);
    // A second bootstrap must not recapture the animated rotation
    animator.bootstrap(&rig).unwrap();
    let first = animator.timeline().keyframes()[0]
        .pose
        .get(JointId::new("Rig/Root/Arm"))
        .unwrap();
    assert_eq!(first, Quat::IDENTITY);
    assert!(rig.joint_transform(arm).is_some());
}

#[test]
fn unbind_allows_rebootstrap_against_new_instance() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::Linear, &["Rig/Root/Arm"], &rig);
    animator.tick(1.0, &mut rig);

    animator.unbind();
    assert_eq!(animator.phase(), AnimatorPhase::Unbound);
    assert!(!animator.timeline().is_bootstrapped());
    assert_eq!(animator.clock().elapsed(), 0.0);

    // Recaptures the rotation the previous run left on the joint
    let left_over = rig.joint_transform(arm).unwrap().rotation;
    animator.bootstrap(&rig).unwrap();
    assert_eq!(animator.phase(), AnimatorPhase::Bootstrapped);
    let first = animator.timeline().keyframes()[0]
        .pose
        .get(JointId::new("Rig/Root/Arm"))
        .unwrap();
    assert_eq!(first, left_over);
}

#[test]
fn cycle_consistency_at_loop_start() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let tl = Timeline::new(
        vec![
            Keyframe::new(0.0, Pose::new()),
            Keyframe::new(
                1.0,
                Pose::new().with("Rig/Root/Arm", Quat::from_rotation_x(1.0)),
            ),
            Keyframe::new(
                3.0,
                Pose::new().with("Rig/Root/Arm", Quat::from_rotation_z(-0.5)),
            ),
        ],
        4.0,
    )
    .unwrap();
    let mut animator = bootstrapped(tl, Easing::OutBack, &["Rig/Root/Arm"], &rig);

    let mut at_zero = Vec::new();
    for _ in 0..3 {
        // 16 quarter-second ticks is exactly one period
        for _ in 0..16 {
            animator.tick(0.25, &mut rig);
        }
        assert_eq!(animator.clock().looped(), 0.0);
        at_zero.push(rig.joint_transform(arm).unwrap().rotation);
    }
    assert_eq!(at_zero[0], at_zero[1]);
    assert_eq!(at_zero[1], at_zero[2]);
}

#[test]
fn sample_scrubs_without_advancing_clock() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::Linear, &["Rig/Root/Arm"], &rig);

    animator.sample(2.0, &mut rig);
    let r = rig.joint_transform(arm).unwrap().rotation;
    assert!(quat_approx(r, Quat::from_rotation_y(FRAC_PI_2)));
    animator.sample(0.0, &mut rig);
    let r = rig.joint_transform(arm).unwrap().rotation;
    assert!(quat_approx(r, Quat::IDENTITY));
    assert_eq!(animator.clock().elapsed(), 0.0);
}

#[test]
fn overshoot_easing_extrapolates_past_target() {
    let mut rig = arm_skeleton();
    let arm = rig.find("Rig/Root/Arm").unwrap();
    let mut animator = bootstrapped(y_swing_timeline(4.0), Easing::OutBack, &["Rig/Root/Arm"], &rig);

    // Near the end of the segment ease-out-back exceeds 1
    let stats = animator.sample(1.8, &mut rig);
    assert!(stats.eased > 1.0);
    let r = rig.joint_transform(arm).unwrap().rotation;
    let (_, angle) = r.to_axis_angle();
    assert!(angle > FRAC_PI_2, "angle={angle}");
}
