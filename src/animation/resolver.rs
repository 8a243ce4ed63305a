//! Segment resolution
//!
//! Maps a looped time onto the pair of keyframes that brackets it and the
//! normalized progress inside that pair.

use crate::animation::pose::Keyframe;
use crate::animation::timeline::Timeline;

const MAX_SCAN_OFFSET: usize = 3;

/// Bracketing keyframes for one instant.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub prev: &'a Keyframe,
    pub next: &'a Keyframe,
    /// Index of `prev` in the timeline
    pub index: usize,
    /// Linear progress from `prev` to `next`, in `[0, 1]`
    pub progress: f32,
}

impl Segment<'_> {
    /// `true` when both ends are the same keyframe (holding the first or last pose).
    #[inline]
    #[must_use]
    pub fn is_hold(&self) -> bool {
        std::ptr::eq(self.prev, self.next)
    }
}

/// Resolves `time` against the timeline's keyframes.
///
/// Reference behavior, an O(n) scan:
/// - before the first keyframe: `(first, first, 0)`
/// - at or past the last keyframe: `(last, last, 0)`
/// - otherwise the first pair with `k[i].time <= time <= k[i+1].time`
///
/// NaN is treated as "before the first keyframe".
/// Returns `None` only for an empty timeline.
#[must_use]
pub fn resolve(timeline: &Timeline, time: f32) -> Option<Segment<'_>> {
    resolve_keyframes(timeline.keyframes(), time)
}

/// [`resolve`] over a raw, time-sorted keyframe slice.
#[must_use]
pub fn resolve_keyframes(keyframes: &[Keyframe], time: f32) -> Option<Segment<'_>> {
    let (first, last) = (keyframes.first()?, keyframes.last()?);

    if time.is_nan() || time < first.time {
        return Some(hold(first, 0));
    }
    if time >= last.time {
        return Some(hold(last, keyframes.len() - 1));
    }

    keyframes
        .windows(2)
        .enumerate()
        .find(|(_, pair)| pair[0].time <= time && time <= pair[1].time)
        .map(|(i, pair)| segment(&pair[0], &pair[1], i, time))
}

/// Remembers the last resolved segment between ticks.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Cursor-accelerated variant of [`resolve`].
///
/// Playback moves forward a little each tick, so the answer is almost always
/// the cached segment or one of the next few. A short scan from the cursor is
/// tried first, falling back to a binary search on loop wrap or scrubbing.
/// Always returns the same segment as [`resolve`].
pub fn resolve_with_cursor<'a>(
    timeline: &'a Timeline,
    time: f32,
    cursor: &mut KeyframeCursor,
) -> Option<Segment<'a>> {
    let keyframes = timeline.keyframes();
    let (first, last) = (keyframes.first()?, keyframes.last()?);
    let len = keyframes.len();

    if time.is_nan() || time < first.time {
        cursor.last_index = 0;
        return Some(hold(first, 0));
    }
    if time >= last.time {
        cursor.last_index = len - 1;
        return Some(hold(last, len - 1));
    }

    // From here on len >= 2 and first.time <= time < last.time.
    // The answer is the first i with time <= k[i+1].time; k[i].time <= time
    // then holds automatically.
    let is_answer = |i: usize| {
        time <= keyframes[i + 1].time && (i == 0 || time > keyframes[i].time)
    };

    let start = cursor.last_index.min(len - 2);
    let local = (0..=MAX_SCAN_OFFSET)
        .map(|offset| start + offset)
        .take_while(|&i| i < len - 1)
        .find(|&i| is_answer(i));

    let index = local.unwrap_or_else(|| {
        // First keyframe at or after `time`, minus one
        let next = keyframes.partition_point(|k| k.time < time);
        next.max(1) - 1
    });

    cursor.last_index = index;
    Some(segment(&keyframes[index], &keyframes[index + 1], index, time))
}

fn hold(keyframe: &Keyframe, index: usize) -> Segment<'_> {
    Segment {
        prev: keyframe,
        next: keyframe,
        index,
        progress: 0.0,
    }
}

fn segment<'a>(prev: &'a Keyframe, next: &'a Keyframe, index: usize, time: f32) -> Segment<'a> {
    let span = next.time - prev.time;
    // Two keyframes sharing a timestamp snap to the earlier one
    let progress = if span > 0.0 {
        ((time - prev.time) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Segment {
        prev,
        next,
        index,
        progress,
    }
}
