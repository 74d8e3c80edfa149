// SPDX-License-Identifier: GPL-3.0-only

//! Free-positioning card layer
//!
//! Cards sit at their model position, in wall order (newest on top). A
//! press on a card body starts a drag; the card follows the cursor,
//! clamped to the layer, and the drop position is published as
//! [`Message::PhotoDragEnd`] relative to the layer's top-left corner.
//!
//! Each card has two children, laid out as `[body, controls]`. Controls
//! only draw and receive events while their card is hovered and nothing
//! is being dragged.

use crate::app::state::Message;
use crate::constants::ui::{CARD_CONTROL_SIZE, CARD_PADDING, CARD_PHOTO_HEIGHT, DEVELOPING_VEIL_ALPHA};
use crate::photo::PhotoId;
use cosmic::iced::advanced::widget::{Operation, Tree, tree};
use cosmic::iced::advanced::{Clipboard, Layout, Shell, Widget, layout, mouse, renderer};
use cosmic::iced::event::Status;
use cosmic::iced::{
    Border, Color, Element, Event, Length, Point, Rectangle, Shadow, Size, Vector,
};
use cosmic::{Renderer, Theme};

/// How far the controls row sticks out past the card edge
const CONTROLS_OVERHANG: f32 = 8.0;

/// Warm sepia veil over a photo that is still developing
const VEIL_COLOR: Color = Color::from_rgba(0.44, 0.33, 0.2, DEVELOPING_VEIL_ALPHA);

/// Placement data for one card
#[derive(Debug, Clone, Copy)]
pub struct CardSlot {
    pub id: PhotoId,
    pub position: Point,
    pub developing: bool,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    id: PhotoId,
    /// Cursor position when the drag started
    grab: Point,
    offset: Vector,
}

#[derive(Default)]
struct WallState {
    drag: Option<Drag>,
    /// Size last reported through [`Message::WallResized`]
    reported_size: Option<Size>,
}

pub struct PhotoWallWidget<'a> {
    slots: Vec<CardSlot>,
    /// Interleaved `[body, controls]` per slot
    children: Vec<Element<'a, Message, Theme, Renderer>>,
}

impl<'a> PhotoWallWidget<'a> {
    pub fn new(
        cards: impl IntoIterator<
            Item = (
                CardSlot,
                Element<'a, Message, Theme, Renderer>,
                Element<'a, Message, Theme, Renderer>,
            ),
        >,
    ) -> Self {
        let mut slots = Vec::new();
        let mut children = Vec::new();
        for (slot, body, controls) in cards {
            slots.push(slot);
            children.push(body);
            children.push(controls);
        }
        Self { slots, children }
    }

    /// Index of the topmost card under the cursor (body or controls)
    fn hovered(&self, layout: Layout<'_>, cursor: mouse::Cursor) -> Option<usize> {
        let children: Vec<Layout<'_>> = layout.children().collect();
        (0..self.slots.len()).rev().find(|&i| {
            let body = children[2 * i].bounds();
            let controls = children[2 * i + 1].bounds();
            cursor.is_over(body) || cursor.is_over(controls)
        })
    }
}

/// Keep a card of `size` at `position` inside `bounds` (both relative)
fn clamp_to(position: Point, size: Size, bounds: Size) -> Point {
    let max_x = (bounds.width - size.width).max(0.0);
    let max_y = (bounds.height - size.height).max(0.0);
    Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

impl<'a> Widget<Message, Theme, Renderer> for PhotoWallWidget<'a> {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<WallState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(WallState::default())
    }

    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn children(&self) -> Vec<Tree> {
        self.children.iter().map(Tree::new).collect()
    }

    fn diff(&mut self, tree: &mut Tree) {
        tree.diff_children(&mut self.children);
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let size = limits.max();
        let drag = tree.state.downcast_ref::<WallState>().drag;

        let mut nodes = Vec::with_capacity(self.children.len());
        for (i, slot) in self.slots.iter().enumerate() {
            let body_limits = layout::Limits::new(Size::ZERO, Size::new(size.width, f32::INFINITY));
            let body_node =
                self.children[2 * i]
                    .as_widget()
                    .layout(&mut tree.children[2 * i], renderer, &body_limits);
            let body_size = body_node.size();

            let position = match drag {
                Some(drag) if drag.id == slot.id => {
                    clamp_to(slot.position + drag.offset, body_size, size)
                }
                _ => slot.position,
            };

            let controls_limits = layout::Limits::new(
                Size::ZERO,
                Size::new(body_size.width + 2.0 * CONTROLS_OVERHANG, CARD_CONTROL_SIZE),
            );
            let controls_node = self.children[2 * i + 1].as_widget().layout(
                &mut tree.children[2 * i + 1],
                renderer,
                &controls_limits,
            );

            nodes.push(body_node.move_to(position));
            nodes.push(controls_node.move_to(Point::new(
                position.x - CONTROLS_OVERHANG,
                position.y - CONTROLS_OVERHANG,
            )));
        }

        layout::Node::with_children(size, nodes)
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        use cosmic::iced::advanced::Renderer as _;

        let dragging = tree.state.downcast_ref::<WallState>().drag.is_some();
        let hovered = if dragging {
            None
        } else {
            self.hovered(layout, cursor)
        };
        let children: Vec<Layout<'_>> = layout.children().collect();

        for (i, slot) in self.slots.iter().enumerate() {
            let body_layout = children[2 * i];
            let body = body_layout.bounds();

            // Drop shadow under the paper
            renderer.fill_quad(
                renderer::Quad {
                    bounds: body,
                    border: Border {
                        radius: 2.0.into(),
                        ..Default::default()
                    },
                    shadow: Shadow {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                        offset: Vector::new(0.0, 8.0),
                        blur_radius: 20.0,
                    },
                },
                Color::WHITE,
            );

            self.children[2 * i].as_widget().draw(
                &tree.children[2 * i],
                renderer,
                theme,
                style,
                body_layout,
                cursor,
                viewport,
            );

            if slot.developing {
                let padding = f32::from(CARD_PADDING);
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: body.x + padding,
                            y: body.y + padding,
                            width: (body.width - 2.0 * padding).max(0.0),
                            height: CARD_PHOTO_HEIGHT,
                        },
                        border: Border::default(),
                        shadow: Default::default(),
                    },
                    VEIL_COLOR,
                );
            }

            if hovered == Some(i) {
                self.children[2 * i + 1].as_widget().draw(
                    &tree.children[2 * i + 1],
                    renderer,
                    theme,
                    style,
                    children[2 * i + 1],
                    cursor,
                    viewport,
                );
            }
        }
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> Status {
        let bounds = layout.bounds();

        {
            let state = tree.state.downcast_mut::<WallState>();
            if state.reported_size != Some(bounds.size()) {
                state.reported_size = Some(bounds.size());
                shell.publish(Message::WallResized(bounds.size()));
            }

            if let Some(drag) = state.drag.as_mut() {
                match event {
                    Event::Mouse(mouse::Event::CursorMoved { position }) => {
                        drag.offset = position - drag.grab;
                        shell.invalidate_layout();
                        return Status::Captured;
                    }
                    Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                        let id = drag.id;
                        state.drag = None;
                        if let Some(index) = self.slots.iter().position(|slot| slot.id == id)
                            && let Some(card) = layout.children().nth(2 * index)
                        {
                            let card = card.bounds();
                            shell.publish(Message::PhotoDragEnd(
                                id,
                                card.x - bounds.x,
                                card.y - bounds.y,
                            ));
                        }
                        shell.invalidate_layout();
                        return Status::Captured;
                    }
                    _ => return Status::Ignored,
                }
            }
        }

        let Some(index) = self.hovered(layout, cursor) else {
            return Status::Ignored;
        };

        let children: Vec<Layout<'_>> = layout.children().collect();
        let status = self.children[2 * index + 1].as_widget_mut().on_event(
            &mut tree.children[2 * index + 1],
            event.clone(),
            children[2 * index + 1],
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
        if status == Status::Captured {
            return Status::Captured;
        }

        if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event
            && let Some(grab) = cursor.position_over(children[2 * index].bounds())
        {
            let state = tree.state.downcast_mut::<WallState>();
            state.drag = Some(Drag {
                id: self.slots[index].id,
                grab,
                offset: Vector::new(0.0, 0.0),
            });
            return Status::Captured;
        }

        Status::Ignored
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        if tree.state.downcast_ref::<WallState>().drag.is_some() {
            return mouse::Interaction::Grabbing;
        }

        let Some(index) = self.hovered(layout, cursor) else {
            return mouse::Interaction::default();
        };
        let children: Vec<Layout<'_>> = layout.children().collect();

        let interaction = self.children[2 * index + 1].as_widget().mouse_interaction(
            &tree.children[2 * index + 1],
            children[2 * index + 1],
            cursor,
            viewport,
            renderer,
        );
        if interaction != mouse::Interaction::default() {
            return interaction;
        }

        if cursor.is_over(children[2 * index].bounds()) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }

    fn operate(
        &self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        for ((child, child_tree), child_layout) in self
            .children
            .iter()
            .zip(tree.children.iter_mut())
            .zip(layout.children())
        {
            child
                .as_widget()
                .operate(child_tree, child_layout, renderer, operation);
        }
    }
}

impl<'a> From<PhotoWallWidget<'a>> for Element<'a, Message, Theme, Renderer> {
    fn from(widget: PhotoWallWidget<'a>) -> Self {
        Element::new(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let p = clamp_to(Point::new(10.0, 20.0), Size::new(50.0, 50.0), Size::new(200.0, 200.0));
        assert_eq!(p, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_clamp_to_edges() {
        let bounds = Size::new(200.0, 100.0);
        let card = Size::new(50.0, 40.0);
        assert_eq!(clamp_to(Point::new(-30.0, -5.0), card, bounds), Point::ORIGIN);
        assert_eq!(
            clamp_to(Point::new(500.0, 500.0), card, bounds),
            Point::new(150.0, 60.0)
        );
    }

    #[test]
    fn test_clamp_oversized_card_pins_to_origin() {
        let p = clamp_to(Point::new(30.0, 30.0), Size::new(300.0, 300.0), Size::new(200.0, 200.0));
        assert_eq!(p, Point::ORIGIN);
    }
}
