// SPDX-License-Identifier: MPL-2.0
//! Container state for the ring.
//!
//! [`RingState`] owns everything that outlives a single layout pass: the
//! display order (which child identity occupies which slot), the accumulated
//! rotation angle, the gesture tracker, and the at-most-one in-flight
//! animation. The widget adapter in [`crate::ring`] keeps an instance of this
//! in the widget tree and drives it from platform events.

use std::collections::VecDeque;
use std::time::Instant;

use iced::Size;
use log::debug;

use crate::geometry::{self, ChildFrame};
use crate::gesture::Tracker;
use crate::settle::{self, Animation};

/// Degrees of rotation produced by one pixel of drag on a ring of radius 1.
/// A quarter turn per radius-length of travel.
const DEGREES_PER_RADIUS: f32 = 90.0;

/// Rotation and display-order state of one ring instance.
#[derive(Debug, Default)]
pub struct RingState {
    /// Slot → identity index. Rotated only when an animation completes.
    display: VecDeque<usize>,
    /// Total signed rotation since the display order was last normalized.
    acc_angle: f32,
    /// Angular width of one slot; `360 / n`.
    slice_angle: f32,
    /// Tap/drag discrimination for the current pointer sequence.
    pub gesture: Tracker,
    /// The single in-flight settle/recenter animation, if any. Replacing it
    /// supersedes the previous animation without running its completion step.
    animation: Option<Animation>,
}

impl RingState {
    /// (Re)attaches the ring to `n` children.
    ///
    /// A no-op while the child count is unchanged; otherwise the display
    /// order, angle and any in-flight animation are reset. An empty ring is
    /// legal and leaves every operation inert.
    pub fn ensure_children(&mut self, n: usize) {
        if self.display.len() == n {
            return;
        }

        self.display = (0..n).collect();
        self.acc_angle = 0.0;
        self.slice_angle = if n > 0 { 360.0 / n as f32 } else { 0.0 };
        self.animation = None;
        self.gesture = Tracker::new(crate::gesture::DEFAULT_TOUCH_SLOP);
        debug!("ring attached: {n} slots, slice {}", self.slice_angle);
    }

    /// Number of slots on the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.display.len()
    }

    /// Whether the ring has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// The accumulated rotation angle, in degrees.
    #[must_use]
    pub fn acc_angle(&self) -> f32 {
        self.acc_angle
    }

    /// The angular width of one slot, in degrees.
    #[must_use]
    pub fn slice_angle(&self) -> f32 {
        self.slice_angle
    }

    /// Identity index of the child currently occupying `slot`.
    #[must_use]
    pub fn identity_at(&self, slot: usize) -> Option<usize> {
        self.display.get(slot).copied()
    }

    /// Inverse of the display order: for each identity index, the slot it
    /// currently occupies.
    #[must_use]
    pub fn slots_by_identity(&self) -> Vec<usize> {
        let mut slots = vec![0; self.display.len()];
        for (slot, &identity) in self.display.iter().enumerate() {
            slots[identity] = slot;
        }
        slots
    }

    /// Projects every slot for the current angle. Recomputed from scratch on
    /// each call; frames are never cached across angle changes.
    #[must_use]
    pub fn frames(&self, radius: f32, factor: f32, container: Size) -> Vec<ChildFrame> {
        (0..self.display.len())
            .map(|slot| {
                geometry::child_frame(
                    slot,
                    self.acc_angle,
                    self.slice_angle,
                    radius,
                    factor,
                    container,
                )
            })
            .collect()
    }

    /// Applies a horizontal drag delta: a full radius of travel rotates the
    /// ring by a quarter turn, so tighter rings spin faster per pixel.
    pub fn rotate(&mut self, delta_x: f32, radius: f32) {
        if !(radius.is_finite() && radius > 0.0) {
            return;
        }

        self.acc_angle += delta_x * DEGREES_PER_RADIUS / radius;
    }

    /// Starts the post-drag settle toward the nearest slice boundary,
    /// superseding any animation already in flight.
    pub fn begin_settle(&mut self) {
        let target = settle::settle_target(self.acc_angle, self.slice_angle);
        debug!("settle from {} to {target}", self.acc_angle);
        self.animation = Animation::new(self.acc_angle, target);
    }

    /// Starts the recenter animation that brings `slot` to the front,
    /// superseding any animation already in flight.
    pub fn recenter(&mut self, slot: usize) {
        if slot >= self.display.len() {
            return;
        }

        let target = settle::recenter_target(slot, self.slice_angle, self.acc_angle);
        debug!("recenter slot {slot} from {} to {target}", self.acc_angle);
        self.animation = Animation::new(self.acc_angle, target);
    }

    /// Drops the in-flight animation, freezing the angle where it is.
    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Whether a settle/recenter animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advances the in-flight animation to the frame at `now` and returns
    /// whether another frame is needed.
    ///
    /// On completion (exactly once per animation) the display order is
    /// rotated by the number of slice boundaries crossed and the accumulated
    /// angle is reset to zero, leaving the picture unchanged.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let (angle, finished) = animation.progress(now);
        self.acc_angle = angle;

        if finished {
            let retain =
                settle::retain_count(self.acc_angle, self.slice_angle, self.display.len());
            settle::rotate_display(&mut self.display, retain);
            debug!("animation done at {}: rotated display by {retain}", self.acc_angle);
            self.acc_angle = 0.0;
            self.animation = None;
        }

        self.animation.is_some()
    }
}
