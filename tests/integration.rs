// SPDX-License-Identifier: MPL-2.0
//! End-to-end exercises of the ring's rotation pipeline: pointer events
//! through the gesture tracker into the container state, then the settle
//! and recenter animations through to display-order normalization.

use std::time::{Duration, Instant};

use iced::{Point, Size};

use iced_ring::geometry;
use iced_ring::gesture::{Effect, Message, Tracker};
use iced_ring::settle::SETTLE_DURATION;
use iced_ring::state::RingState;

const EPSILON: f32 = 1e-3;

/// Feeds a gesture effect into the container the way the widget does.
fn apply(state: &mut RingState, effect: Effect, radius: f32) {
    match effect {
        Effect::Claim => state.cancel_animation(),
        Effect::Rotate { delta_x } => state.rotate(delta_x, radius),
        Effect::Settle => state.begin_settle(),
        Effect::Tap(_) | Effect::None => {}
    }
}

fn run_to_completion(state: &mut RingState, start: Instant) {
    let mut now = start;
    while state.tick(now) {
        now += Duration::from_millis(16);
        assert!(
            now - start < SETTLE_DURATION + Duration::from_secs(1),
            "animation never completed"
        );
    }
}

#[test]
fn drag_release_settles_on_a_slice_boundary() {
    let mut state = RingState::default();
    state.ensure_children(4);
    let radius = 90.0;

    // Drag right: press, cross the slop, then two rotating moves totalling
    // 160 px, i.e. 160° on a radius-90 ring.
    let mut tracker = Tracker::default();
    tracker.handle(Message::Pressed(Point::new(100.0, 50.0)));
    let effect = tracker.handle(Message::Moved(Point::new(110.0, 50.0)));
    assert_eq!(effect, Effect::Claim);
    apply(&mut state, effect, radius);

    for x in [190.0, 270.0] {
        let effect = tracker.handle(Message::Moved(Point::new(x, 50.0)));
        assert!(matches!(effect, Effect::Rotate { .. }));
        apply(&mut state, effect, radius);
    }
    assert!((state.acc_angle() - 160.0).abs() < EPSILON);

    let effect = tracker.handle(Message::Released(Point::new(270.0, 50.0)));
    assert_eq!(effect, Effect::Settle);
    apply(&mut state, effect, radius);
    assert!(state.is_animating());

    run_to_completion(&mut state, Instant::now());

    // 160° settles at 180°: two slices crossed, angle renormalized.
    assert!(state.acc_angle().abs() < EPSILON);
    let display: Vec<_> = (0..4).filter_map(|slot| state.identity_at(slot)).collect();
    assert_eq!(display, vec![2, 3, 0, 1]);
}

#[test]
fn tap_recenters_the_clicked_child() {
    let mut state = RingState::default();
    state.ensure_children(6);

    let mut tracker = Tracker::default();
    tracker.handle(Message::Pressed(Point::new(200.0, 100.0)));
    let effect = tracker.handle(Message::Released(Point::new(200.0, 100.0)));
    assert!(matches!(effect, Effect::Tap(_)));

    // The widget resolves the tap to slot 3 and recenters it.
    let identity = state.identity_at(3).unwrap();
    assert_eq!(identity, 3);
    state.recenter(3);
    run_to_completion(&mut state, Instant::now());

    // The clicked child now occupies the frontmost slot at angle zero.
    assert_eq!(state.identity_at(0), Some(identity));
    assert!(state.acc_angle().abs() < EPSILON);
    let frames = state.frames(200.0, 1.0, Size::new(800.0, 200.0));
    assert_eq!(geometry::front_slot(&frames), Some(0));
}

#[test]
fn rapid_tap_during_settle_supersedes_the_animation() {
    let mut state = RingState::default();
    state.ensure_children(4);

    state.rotate(130.0, 90.0);
    state.begin_settle();
    let start = Instant::now();
    state.tick(start);
    state.tick(start + Duration::from_millis(100));
    assert!(state.is_animating());

    // A tap replaces the settle; only one writer to the angle remains.
    state.recenter(2);
    run_to_completion(&mut state, start + Duration::from_millis(100));

    assert!(state.acc_angle().abs() < EPSILON);
    assert_eq!(state.identity_at(0), Some(2));
}

#[test]
fn full_revolution_restores_the_original_order() {
    let mut state = RingState::default();
    state.ensure_children(5);
    let original: Vec<_> = (0..5).filter_map(|slot| state.identity_at(slot)).collect();

    // Five single-slice settles in the same direction walk the display
    // order all the way around.
    for _ in 0..5 {
        state.rotate(80.0, 90.0); // 80° with 72° slices settles one ahead
        state.begin_settle();
        run_to_completion(&mut state, Instant::now());
        assert!(state.acc_angle().abs() < EPSILON);
    }

    let display: Vec<_> = (0..5).filter_map(|slot| state.identity_at(slot)).collect();
    assert_eq!(display, original);
}

#[test]
fn frames_track_the_angle_during_a_settle() {
    let mut state = RingState::default();
    state.ensure_children(4);
    let container = Size::new(800.0, 200.0);

    state.rotate(130.0, 90.0);
    state.begin_settle();

    let start = Instant::now();
    state.tick(start);
    let before = state.frames(200.0, 1.0, container);
    state.tick(start + Duration::from_millis(150));
    let mid = state.frames(200.0, 1.0, container);

    // 130° → 90°: halfway through the angle is 110°, so slot 3 (at -40° of
    // the front once settled) is nearer the front than it was.
    assert!(state.acc_angle() > 90.0 && state.acc_angle() < 130.0);
    assert!(mid[3].distance < before[3].distance);
    assert!(mid[3].scale > before[3].scale);
}
