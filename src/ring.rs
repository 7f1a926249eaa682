// SPDX-License-Identifier: MPL-2.0
//! The `Ring` container widget.
//!
//! Lays its children out along a virtual circle rotated about the y axis,
//! spins them in response to horizontal drags, and snaps to the nearest
//! slice boundary when a drag ends. Tapping a child recenters it and
//! notifies the `on_select` handler with the child's identity index: its
//! position in the original child list, independent of how the display
//! order has been rotated since.

use iced::advanced::layout::{self, Layout};
use iced::advanced::mouse;
use iced::advanced::overlay;
use iced::advanced::renderer;
use iced::advanced::widget::{self, tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{
    touch, window, Element, Event, Length, Point, Rectangle, Size, Transformation, Vector,
};

use crate::geometry::{self, ChildFrame};
use crate::gesture::{self, DEFAULT_TOUCH_SLOP};
use crate::state::RingState;

/// A container that arranges a fixed set of children on a rotatable ring.
pub struct Ring<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer> {
    children: Vec<Element<'a, Message, Theme, Renderer>>,
    height: Length,
    touch_slop: f32,
    on_select: Option<Box<dyn Fn(usize) -> Message + 'a>>,
}

impl<'a, Message, Theme, Renderer> Ring<'a, Message, Theme, Renderer> {
    /// Creates a ring from the given children. Their order assigns the
    /// identity indices reported by [`on_select`](Self::on_select).
    pub fn new(
        children: impl IntoIterator<Item = Element<'a, Message, Theme, Renderer>>,
    ) -> Self {
        Self {
            children: children.into_iter().collect(),
            height: Length::Shrink,
            touch_slop: DEFAULT_TOUCH_SLOP,
            on_select: None,
        }
    }

    /// Sets the height of the ring. Defaults to the tallest child.
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Overrides the drag threshold in logical pixels.
    pub fn touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Sets the message produced when a child is tapped. The handler
    /// receives the child's identity index and fires before the recenter
    /// animation starts.
    pub fn on_select(mut self, on_select: impl Fn(usize) -> Message + 'a) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }
}

/// Helper function to create a [`Ring`].
pub fn ring<'a, Message, Theme, Renderer>(
    children: impl IntoIterator<Item = Element<'a, Message, Theme, Renderer>>,
) -> Ring<'a, Message, Theme, Renderer> {
    Ring::new(children)
}

/// The ring radius derived from the container width.
fn radius_of(bounds: Rectangle) -> f32 {
    bounds.width / 4.0
}

/// The bounding box of a child after its draw-time scale about its center.
fn scaled_bounds(bounds: Rectangle, scale: f32) -> Rectangle {
    Rectangle {
        x: bounds.center_x() - bounds.width * scale / 2.0,
        y: bounds.center_y() - bounds.height * scale / 2.0,
        width: bounds.width * scale,
        height: bounds.height * scale,
    }
}

/// Recomputes the per-slot frames for the current layout. The scale factor
/// is derived from the first child's intrinsic width each pass, mirroring
/// the measurement step.
fn frames_for_layout(state: &RingState, layout: Layout<'_>) -> Vec<ChildFrame> {
    let bounds = layout.bounds();
    let radius = radius_of(bounds);
    let first_width = layout
        .children()
        .next()
        .map_or(0.0, |child| child.bounds().width);
    let factor = geometry::scale_factor(radius, state.slice_angle(), first_width);

    state.frames(radius, factor, bounds.size())
}

/// The topmost slot under `position`, honoring the paint order: among
/// overlapping children the one drawn last wins.
fn hit_slot(state: &RingState, layout: Layout<'_>, position: Point) -> Option<usize> {
    let frames = frames_for_layout(state, layout);
    let child_bounds: Vec<Rectangle> = layout.children().map(|child| child.bounds()).collect();

    geometry::paint_order(&frames)
        .into_iter()
        .rev()
        .find(|&slot| {
            state.identity_at(slot).is_some_and(|identity| {
                child_bounds.get(identity).is_some_and(|&bounds| {
                    scaled_bounds(bounds, frames[slot].scale).contains(position)
                })
            })
        })
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Ring<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, self.height)
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<RingState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(RingState::default())
    }

    fn children(&self) -> Vec<widget::Tree> {
        self.children.iter().map(widget::Tree::new).collect()
    }

    fn diff(&self, tree: &mut widget::Tree) {
        tree.diff_children(&self.children);
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let state = tree.state.downcast_mut::<RingState>();
        state.ensure_children(self.children.len());

        let max = limits.max();
        let child_limits = layout::Limits::new(Size::ZERO, max);

        let mut nodes = Vec::with_capacity(self.children.len());
        let mut content_height = 0.0_f32;
        for (child, child_tree) in self.children.iter_mut().zip(&mut tree.children) {
            let node = child
                .as_widget_mut()
                .layout(child_tree, renderer, &child_limits);
            content_height = content_height.max(node.size().height);
            nodes.push(node);
        }

        let size = limits.resolve(
            Length::Fill,
            self.height,
            Size::new(max.width, content_height),
        );
        let radius = size.width / 4.0;
        let first_width = nodes.first().map_or(0.0, |node| node.size().width);
        let factor = geometry::scale_factor(radius, state.slice_angle(), first_width);
        log::debug!(
            "ring layout {}x{}: radius {radius}, factor {factor}",
            size.width,
            size.height
        );

        let frames = state.frames(radius, factor, size);
        let slots = state.slots_by_identity();
        let children = nodes
            .into_iter()
            .enumerate()
            .map(|(identity, node)| {
                let frame = frames[slots[identity]];
                let child_size = node.size();
                node.move_to(Point::new(
                    frame.center_x - child_size.width / 2.0,
                    frame.center_y - child_size.height / 2.0,
                ))
            })
            .collect();

        layout::Node::with_children(size, children)
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<RingState>();
        state.ensure_children(self.children.len());
        state.gesture.set_slop(self.touch_slop);

        let bounds = layout.bounds();

        let message = match event {
            Event::Window(window::Event::RedrawRequested(now)) => {
                if state.is_animating() {
                    let running = state.tick(*now);
                    shell.invalidate_layout();
                    if running {
                        shell.request_redraw();
                    }
                }
                None
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                cursor.position_over(bounds).map(gesture::Message::Pressed)
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                bounds
                    .contains(*position)
                    .then_some(gesture::Message::Pressed(*position))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(gesture::Message::Moved(*position))
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                Some(gesture::Message::Moved(*position))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => Some(
                cursor
                    .position()
                    .or_else(|| state.gesture.last_position())
                    .map_or(gesture::Message::Cancelled, gesture::Message::Released),
            ),
            Event::Touch(touch::Event::FingerLifted { position, .. }) => {
                Some(gesture::Message::Released(*position))
            }
            Event::Touch(touch::Event::FingerLost { .. }) => Some(gesture::Message::Cancelled),
            _ => None,
        };

        let mut drag_owned = false;
        if let Some(message) = message {
            let effect = state.gesture.handle(message);
            drag_owned = matches!(
                effect,
                gesture::Effect::Claim | gesture::Effect::Rotate { .. } | gesture::Effect::Settle
            );

            match effect {
                gesture::Effect::Claim => {
                    // The drag now owns the angle; stop any in-flight
                    // animation before it writes to the same state.
                    state.cancel_animation();
                    shell.capture_event();
                }
                gesture::Effect::Rotate { delta_x } => {
                    state.rotate(delta_x, radius_of(bounds));
                    shell.invalidate_layout();
                    shell.request_redraw();
                    shell.capture_event();
                }
                gesture::Effect::Settle => {
                    state.begin_settle();
                    if state.is_animating() {
                        shell.request_redraw();
                    }
                    shell.capture_event();
                }
                gesture::Effect::Tap(position) => {
                    if let Some(slot) = hit_slot(state, layout, position) {
                        if let Some(identity) = state.identity_at(slot) {
                            // Notify first, then start the recenter.
                            if let Some(on_select) = &self.on_select {
                                shell.publish((on_select)(identity));
                            }
                            state.recenter(slot);
                            if state.is_animating() {
                                shell.request_redraw();
                            }
                        }
                    }
                }
                gesture::Effect::None => {}
            }
        }

        // Once a drag owns the pointer sequence (from the claiming move
        // through the final release), descendants see none of it.
        if drag_owned || state.gesture.is_moving() {
            return;
        }

        for ((child, child_tree), child_layout) in self
            .children
            .iter_mut()
            .zip(&mut tree.children)
            .zip(layout.children())
        {
            child.as_widget_mut().update(
                child_tree,
                event,
                child_layout,
                cursor,
                renderer,
                clipboard,
                shell,
                viewport,
            );
        }
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        if self.children.is_empty() {
            return;
        }

        let state = tree.state.downcast_ref::<RingState>();
        let frames = frames_for_layout(state, layout);
        let layouts: Vec<Layout<'_>> = layout.children().collect();

        // Back to front, so nearer children paint over farther ones.
        for slot in geometry::paint_order(&frames) {
            let Some(identity) = state.identity_at(slot) else {
                continue;
            };

            let child_layout = layouts[identity];
            let child_bounds = child_layout.bounds();
            let scale = frames[slot].scale;
            let transformation = Transformation::translate(
                child_bounds.center_x() * (1.0 - scale),
                child_bounds.center_y() * (1.0 - scale),
            ) * Transformation::scale(scale);

            renderer.with_transformation(transformation, |renderer| {
                self.children[identity].as_widget().draw(
                    &tree.children[identity],
                    renderer,
                    theme,
                    style,
                    child_layout,
                    cursor,
                    viewport,
                );
            });
        }
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<RingState>();
        if state.gesture.is_moving() {
            return mouse::Interaction::Grabbing;
        }

        if let Some(position) = cursor.position_over(layout.bounds()) {
            if hit_slot(state, layout, position).is_some() {
                return mouse::Interaction::Pointer;
            }
        }

        self.children
            .iter()
            .zip(&tree.children)
            .zip(layout.children())
            .map(|((child, child_tree), child_layout)| {
                child.as_widget().mouse_interaction(
                    child_tree,
                    child_layout,
                    cursor,
                    viewport,
                    renderer,
                )
            })
            .max()
            .unwrap_or_default()
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        operation.container(None, layout.bounds());
        operation.traverse(&mut |operation| {
            self.children
                .iter_mut()
                .zip(&mut tree.children)
                .zip(layout.children())
                .for_each(|((child, child_tree), child_layout)| {
                    child
                        .as_widget_mut()
                        .operate(child_tree, child_layout, renderer, operation);
                });
        });
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut widget::Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        overlay::from_children(
            &mut self.children,
            tree,
            layout,
            renderer,
            viewport,
            translation,
        )
    }
}

impl<'a, Message, Theme, Renderer> From<Ring<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(ring: Ring<'a, Message, Theme, Renderer>) -> Self {
        Self::new(ring)
    }
}
