use glam::Quat;

/// Shortest-arc spherical interpolation between two rotations.
///
/// Both ends are normalized first and the result is normalized again, so
/// slightly denormalized authored data cannot accumulate drift. `t` is not
/// clamped: overshooting easing curves extrapolate past either end.
#[inline]
#[must_use]
pub fn slerp_rotation(from: Quat, to: Quat, t: f32) -> Quat {
    let from = from.normalize();
    let to = to.normalize();
    if from == to {
        return from;
    }
    // glam's slerp flips `to` when the dot product is negative
    from.slerp(to, t).normalize()
}
