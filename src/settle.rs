// SPDX-License-Identifier: MPL-2.0
//! Settle and recenter animation math.
//!
//! After a drag the ring glides to the nearest slice boundary; after a tap it
//! glides until the tapped slot faces the viewer. Both run the same fixed
//! 300 ms linear animation. When an animation completes, the display order is
//! rotated by the number of slice boundaries crossed so the accumulated angle
//! can be reset to zero with no visible change.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Length of every settle/recenter animation.
pub const SETTLE_DURATION: Duration = Duration::from_millis(300);

/// Target angle that snaps the given accumulated angle to the nearest slice
/// boundary, overshooting past the boundary when more than half a slice has
/// been crossed in the drag direction.
#[must_use]
pub fn settle_target(acc_angle: f32, slice_angle: f32) -> f32 {
    if slice_angle <= 0.0 {
        return acc_angle;
    }

    let retain = acc_angle % slice_angle;
    if retain.abs() > slice_angle / 2.0 {
        if acc_angle > 0.0 {
            acc_angle + (slice_angle - retain)
        } else {
            acc_angle - (slice_angle + retain)
        }
    } else {
        acc_angle - retain
    }
}

/// Target angle that brings `slot` to the frontmost (0°) position by the
/// rotation of smallest magnitude, wrapping at ±180°.
#[must_use]
pub fn recenter_target(slot: usize, slice_angle: f32, acc_angle: f32) -> f32 {
    let angle = (slot as f32 * slice_angle + acc_angle) % 360.0;

    let rotation = if angle > 180.0 {
        360.0 - angle
    } else if angle < -180.0 {
        -(360.0 + angle)
    } else {
        -angle
    };

    acc_angle + rotation
}

/// Net number of slice positions crossed by `acc_angle`, reduced modulo the
/// ring length with the sign of the rotation preserved.
#[must_use]
pub fn retain_count(acc_angle: f32, slice_angle: f32, len: usize) -> i32 {
    if slice_angle <= 0.0 || len == 0 {
        return 0;
    }

    let crossed = (acc_angle / slice_angle).round() as i32;
    crossed % len as i32
}

/// Rotates the display order by `retain` single steps: positive moves the
/// last slot to the front, negative moves the first slot to the back.
pub fn rotate_display(display: &mut VecDeque<usize>, retain: i32) {
    if display.is_empty() {
        return;
    }

    for _ in 0..retain.unsigned_abs() {
        if retain > 0 {
            if let Some(last) = display.pop_back() {
                display.push_front(last);
            }
        } else if let Some(first) = display.pop_front() {
            display.push_back(first);
        }
    }
}

/// A single in-flight settle/recenter animation.
///
/// The animation is advanced by frame timestamps rather than wall-clock
/// polling: the first [`progress`](Self::progress) call anchors the start
/// time, later calls interpolate linearly until the duration elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    from: f32,
    to: f32,
    started_at: Option<Instant>,
}

impl Animation {
    /// Creates an animation, or `None` when start and target coincide.
    #[must_use]
    pub fn new(from: f32, to: f32) -> Option<Self> {
        if (from - to).abs() < f32::EPSILON {
            return None;
        }

        Some(Self {
            from,
            to,
            started_at: None,
        })
    }

    /// The angle the animation is heading toward.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Advances to the frame at `now` and returns the interpolated angle
    /// together with whether the animation just reached its end.
    pub fn progress(&mut self, now: Instant) -> (f32, bool) {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let fraction = (elapsed.as_secs_f32() / SETTLE_DURATION.as_secs_f32()).min(1.0);

        (
            self.from + (self.to - self.from) * fraction,
            fraction >= 1.0,
        )
    }
}
