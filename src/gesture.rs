// SPDX-License-Identifier: MPL-2.0
//! Pointer tracking for the ring: tap versus drag discrimination.
//!
//! A pointer sequence starts in [`Phase::Reset`]. The first move whose
//! horizontal travel from the press position exceeds the slop threshold
//! claims the sequence as a drag; that move only primes the tracking state,
//! rotation deltas start with the following move. A release before the
//! threshold is crossed is a tap.

use iced::Point;

/// Minimum horizontal travel, in logical pixels, before a press turns into
/// a drag. Matches the touch slop used by common platform toolkits.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Where the tracker is within a pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No drag claimed; a release in this phase is a tap.
    #[default]
    Reset,
    /// The slop threshold was crossed; moves feed rotation.
    Moving,
}

/// Pointer events the tracker understands.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Pointer went down inside the ring.
    Pressed(Point),
    /// Pointer moved.
    Moved(Point),
    /// Pointer went up.
    Released(Point),
    /// The sequence was lost (window defocus, touch cancel).
    Cancelled,
}

/// What the container should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// The slop threshold was crossed just now; claim the gesture. The
    /// crossing move itself produces no rotation.
    Claim,
    /// An in-drag move; rotate by the horizontal delta since the last move.
    Rotate {
        /// Horizontal pixel delta.
        delta_x: f32,
    },
    /// A drag ended; settle to the nearest slice boundary.
    Settle,
    /// A press was released without dragging.
    Tap(Point),
}

/// Per-pointer-sequence state.
#[derive(Debug, Clone, Copy)]
pub struct Tracker {
    phase: Phase,
    down: Option<Point>,
    last: Option<Point>,
    slop: f32,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_SLOP)
    }
}

impl Tracker {
    /// Creates a tracker with the given slop threshold.
    #[must_use]
    pub fn new(slop: f32) -> Self {
        Self {
            phase: Phase::Reset,
            down: None,
            last: None,
            slop,
        }
    }

    /// Adjusts the slop threshold without disturbing a live sequence.
    pub fn set_slop(&mut self, slop: f32) {
        self.slop = slop;
    }

    /// Whether a drag is currently in progress.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.phase == Phase::Moving
    }

    /// The last pointer position seen in the current sequence.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last
    }

    /// Handle a pointer event.
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Pressed(position) => {
                self.phase = Phase::Reset;
                self.down = Some(position);
                self.last = Some(position);
                Effect::None
            }
            Message::Moved(position) => {
                let Some(down) = self.down else {
                    // A move with no preceding press is a plain hover.
                    return Effect::None;
                };

                match self.phase {
                    Phase::Reset => {
                        if (position.x - down.x).abs() > self.slop {
                            self.phase = Phase::Moving;
                            self.last = Some(position);
                            Effect::Claim
                        } else {
                            self.last = Some(position);
                            Effect::None
                        }
                    }
                    Phase::Moving => {
                        let delta_x = position.x - self.last.map_or(position.x, |last| last.x);
                        self.last = Some(position);
                        Effect::Rotate { delta_x }
                    }
                }
            }
            Message::Released(position) => {
                let was_moving = self.phase == Phase::Moving;
                let had_press = self.down.is_some();
                self.clear();

                if was_moving {
                    Effect::Settle
                } else if had_press {
                    Effect::Tap(position)
                } else {
                    Effect::None
                }
            }
            Message::Cancelled => {
                self.clear();
                Effect::None
            }
        }
    }

    fn clear(&mut self) {
        self.phase = Phase::Reset;
        self.down = None;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_is_a_tap() {
        let mut tracker = Tracker::default();
        assert_eq!(tracker.handle(Message::Pressed(Point::new(100.0, 50.0))), Effect::None);
        assert_eq!(
            tracker.handle(Message::Released(Point::new(102.0, 51.0))),
            Effect::Tap(Point::new(102.0, 51.0))
        );
        assert!(!tracker.is_moving());
    }

    #[test]
    fn moves_within_slop_do_not_claim() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        assert_eq!(tracker.handle(Message::Moved(Point::new(105.0, 50.0))), Effect::None);
        assert!(!tracker.is_moving());
    }

    #[test]
    fn crossing_slop_claims_without_rotating() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        assert_eq!(
            tracker.handle(Message::Moved(Point::new(109.0, 50.0))),
            Effect::Claim
        );
        assert!(tracker.is_moving());
    }

    #[test]
    fn rotation_starts_on_the_move_after_the_claim() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        tracker.handle(Message::Moved(Point::new(109.0, 50.0)));

        // The delta is measured from the claiming move, not from the press.
        assert_eq!(
            tracker.handle(Message::Moved(Point::new(119.0, 50.0))),
            Effect::Rotate { delta_x: 10.0 }
        );
        assert_eq!(
            tracker.handle(Message::Moved(Point::new(112.0, 50.0))),
            Effect::Rotate { delta_x: -7.0 }
        );
    }

    #[test]
    fn leftward_drags_claim_too() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        assert_eq!(
            tracker.handle(Message::Moved(Point::new(90.0, 50.0))),
            Effect::Claim
        );
    }

    #[test]
    fn vertical_movement_never_claims() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        assert_eq!(
            tracker.handle(Message::Moved(Point::new(100.0, 500.0))),
            Effect::None
        );
        assert!(!tracker.is_moving());
    }

    #[test]
    fn releasing_a_drag_settles() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        tracker.handle(Message::Moved(Point::new(120.0, 50.0)));
        assert_eq!(
            tracker.handle(Message::Released(Point::new(120.0, 50.0))),
            Effect::Settle
        );
        assert!(!tracker.is_moving());
        assert!(tracker.last_position().is_none());
    }

    #[test]
    fn hover_moves_without_press_are_ignored() {
        let mut tracker = Tracker::default();
        assert_eq!(tracker.handle(Message::Moved(Point::new(10.0, 10.0))), Effect::None);
        assert_eq!(
            tracker.handle(Message::Released(Point::new(10.0, 10.0))),
            Effect::None
        );
    }

    #[test]
    fn cancel_discards_the_sequence() {
        let mut tracker = Tracker::default();
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        tracker.handle(Message::Moved(Point::new(120.0, 50.0)));
        assert_eq!(tracker.handle(Message::Cancelled), Effect::None);
        assert_eq!(
            tracker.handle(Message::Released(Point::new(120.0, 50.0))),
            Effect::None
        );
    }

    #[test]
    fn custom_slop_is_respected() {
        let mut tracker = Tracker::new(20.0);
        tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
        assert_eq!(tracker.handle(Message::Moved(Point::new(115.0, 50.0))), Effect::None);
        assert_eq!(
            tracker.handle(Message::Moved(Point::new(121.0, 50.0))),
            Effect::Claim
        );
    }
}
