// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Layers, bottom to top:
//! - wall background
//! - photo cards (photo_wall_widget)
//! - camera body in the bottom-left corner (capture_surface)
//! - title pill and footer
//! - white flash while a snapshot is taken

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::alignment::{Horizontal, Vertical};
use cosmic::iced::{Background, Border, Color, Length};
use cosmic::widget;

/// Warm wall color behind the cards
const WALL_COLOR: Color = Color::from_rgb(0.91, 0.89, 0.85);

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let background = widget::container(widget::Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(WALL_COLOR)),
                ..Default::default()
            });

        let camera_layer = widget::container(self.build_capture_surface())
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Left)
            .align_y(Vertical::Bottom)
            .padding(ui::CAMERA_MARGIN);

        let title_pill = widget::container(widget::text(fl!("wall-title")).size(14))
            .padding([6, 16])
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.8))),
                text_color: Some(Color::from_rgb(0.25, 0.25, 0.28)),
                border: Border {
                    radius: 999.0.into(),
                    width: 1.0,
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
                },
                ..Default::default()
            });

        let header = widget::container(title_pill)
            .width(Length::Fill)
            .align_x(Horizontal::Right)
            .padding(spacing.space_m);

        let footer = widget::container(widget::text(fl!("powered-by")).size(11))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Bottom)
            .padding(spacing.space_s)
            .style(|_theme| widget::container::Style {
                text_color: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.4)),
                ..Default::default()
            });

        let mut layers = cosmic::iced::widget::stack![
            background,
            self.build_photo_wall(),
            footer,
            header,
            camera_layer,
        ]
        .width(Length::Fill)
        .height(Length::Fill);

        if self.flash_active {
            let flash_overlay = widget::container(widget::Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| widget::container::Style {
                    background: Some(Background::Color(Color::WHITE)),
                    ..Default::default()
                });
            layers = layers.push(flash_overlay);
        }

        layers.into()
    }
}
