// SPDX-License-Identifier: MPL-2.0
//! Ring projection math.
//!
//! Children sit on a virtual circle that is rotated about the y axis. Each
//! slot is projected onto the horizontal axis of the container (a flat ring,
//! not a sphere): the x coordinate follows the sine of the slot's angle, the
//! apparent depth follows its cosine, and the depth drives both the scale of
//! the child and its paint order.

use iced::Size;

/// Divisor applied to the depth distance when deriving the scale, so that
/// children shrink at half the rate they recede.
const SCALE_DISTANCE_FACTOR: f32 = 2.0;

/// Projected placement of a single slot for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildFrame {
    /// Horizontal center of the child within the container.
    pub center_x: f32,
    /// Vertical center; always mid-height of the container.
    pub center_y: f32,
    /// Scale applied to the child, maximal for the frontmost slot.
    pub scale: f32,
    /// Depth distance from the point of the ring nearest the viewer.
    pub distance: f32,
}

/// Projects one slot of the ring into a [`ChildFrame`].
///
/// `angle = slot * slice_angle + acc_angle`, in degrees. A non-positive or
/// non-finite radius is a degenerate measurement: every child coincides at
/// the container center at scale 1 instead of propagating NaN.
#[must_use]
pub fn child_frame(
    slot: usize,
    acc_angle: f32,
    slice_angle: f32,
    radius: f32,
    factor: f32,
    container: Size,
) -> ChildFrame {
    let center = Size::new(
        if container.width.is_finite() {
            container.width / 2.0
        } else {
            0.0
        },
        if container.height.is_finite() {
            container.height / 2.0
        } else {
            0.0
        },
    );

    if !(radius.is_finite() && radius > 0.0) {
        return ChildFrame {
            center_x: center.width,
            center_y: center.height,
            scale: 1.0,
            distance: 0.0,
        };
    }

    let radians = (slot as f32 * slice_angle + acc_angle).to_radians();
    let center_x = center.width + (radians.sin() * radius).round();
    let distance = radius - radius * radians.cos();
    let scale = (2.0 * radius - distance / SCALE_DISTANCE_FACTOR) * factor / (2.0 * radius);

    ChildFrame {
        center_x,
        center_y: center.height,
        scale: scale.max(0.0),
        distance,
    }
}

/// Derives the scale factor that makes the two slots nearest the viewer touch
/// edge to edge when they sit parallel to the viewing plane.
///
/// Degenerate inputs (no radius, zero-width child, a single-slot ring where
/// the formula collapses) fall back to a factor of 1.
#[must_use]
pub fn scale_factor(radius: f32, slice_angle: f32, child_width: f32) -> f32 {
    if !(radius.is_finite() && radius > 0.0) || child_width <= 0.0 {
        return 1.0;
    }

    let half = (slice_angle / 2.0).to_radians();
    let distance = radius - radius * half.cos();
    let ratio = (2.0 * radius - distance / SCALE_DISTANCE_FACTOR) / (2.0 * radius);
    let factor = 2.0 * half.sin() * radius / (child_width * ratio);

    if factor.is_finite() && factor > f32::EPSILON {
        factor
    } else {
        1.0
    }
}

/// Index of the frontmost slot: minimal depth distance, i.e. maximal scale.
/// Ties keep the first-encountered slot.
#[must_use]
pub fn front_slot(frames: &[ChildFrame]) -> Option<usize> {
    let mut front: Option<usize> = None;
    for (slot, frame) in frames.iter().enumerate() {
        match front {
            Some(best) if frame.scale <= frames[best].scale => {}
            _ => front = Some(slot),
        }
    }
    front
}

/// Slot indices in paint order, back to front.
///
/// Slots are drawn in ascending scale so nearer children cover farther ones;
/// the frontmost slot (first-encountered maximum) is always painted last.
#[must_use]
pub fn paint_order(frames: &[ChildFrame]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..frames.len()).collect();
    order.sort_by(|&a, &b| frames[a].scale.total_cmp(&frames[b].scale));

    if let Some(front) = front_slot(frames) {
        order.retain(|&slot| slot != front);
        order.push(front);
    }

    order
}
