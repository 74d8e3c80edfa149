// SPDX-License-Identifier: GPL-3.0-only

//! Camera body: live preview lens, status line and shutter

use crate::app::state::{AppModel, CameraState, Message};
use crate::backends::camera::types::CameraFrame;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Color, ContentFit, Length};
use cosmic::widget::{self, image::Handle};

/// Cream camera body
const BODY_COLOR: Color = Color::from_rgb(0.949, 0.925, 0.882);
/// Shutter button face
const SHUTTER_COLOR: Color = Color::from_rgb(0.839, 0.549, 0.522);
/// Shutter face while the gate is closed
const SHUTTER_DISABLED_COLOR: Color = Color::from_rgb(0.6, 0.6, 0.6);
/// Lens ring and empty lens
const LENS_COLOR: Color = Color::from_rgb(0.13, 0.13, 0.14);

/// RGBA bytes for the preview, flipped horizontally when mirroring
pub(crate) fn preview_pixels(frame: &CameraFrame, mirror: bool) -> Vec<u8> {
    let bytes = frame.data.to_vec();
    if !mirror {
        return bytes;
    }
    match image::RgbaImage::from_raw(frame.width, frame.height, bytes) {
        Some(mut image) => {
            image::imageops::flip_horizontal_in_place(&mut image);
            image.into_raw()
        }
        // Malformed frame; show it as-is
        None => frame.data.to_vec(),
    }
}

/// Image handle for the lens preview
pub(crate) fn preview_handle(frame: &CameraFrame, mirror: bool) -> Handle {
    Handle::from_rgba(frame.width, frame.height, preview_pixels(frame, mirror))
}

impl AppModel {
    /// Build the camera body shown in the bottom-left corner
    pub fn build_capture_surface(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let body = widget::column()
            .push(self.build_lens())
            .push(self.build_camera_status())
            .push(widget::vertical_space())
            .push(self.build_shutter())
            .spacing(spacing.space_s)
            .align_x(Alignment::Center)
            .padding(spacing.space_m);

        widget::container(body)
            .width(Length::Fixed(ui::CAMERA_BODY_WIDTH))
            .height(Length::Fixed(ui::CAMERA_BODY_HEIGHT))
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(BODY_COLOR)),
                border: Border {
                    radius: 24.0.into(),
                    width: 1.0,
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                },
                shadow: cosmic::iced::Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
                    offset: cosmic::iced::Vector::new(0.0, 12.0),
                    blur_radius: 30.0,
                },
                ..Default::default()
            })
            .into()
    }

    fn build_lens(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.preview {
            Some(handle) if self.camera.is_streaming() => widget::image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            _ => widget::Space::new(Length::Fill, Length::Fill).into(),
        };

        widget::container(content)
            .width(Length::Fixed(ui::LENS_SIZE))
            .height(Length::Fixed(ui::LENS_SIZE))
            .padding(6)
            .clip(true)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(LENS_COLOR)),
                border: Border {
                    radius: (ui::LENS_SIZE / 2.0).into(),
                    width: 4.0,
                    color: Color::from_rgb(0.25, 0.25, 0.27),
                },
                ..Default::default()
            })
            .into()
    }

    fn build_camera_status(&self) -> Element<'_, Message> {
        let status: Element<'_, Message> = match &self.camera {
            CameraState::Starting => widget::text(fl!("starting-camera")).size(12).into(),
            CameraState::Streaming { .. } => {
                widget::Space::new(Length::Shrink, Length::Shrink).into()
            }
            CameraState::Failed(_) => widget::column()
                .push(
                    widget::text(fl!("camera-error"))
                        .size(12)
                        .align_x(cosmic::iced::alignment::Horizontal::Center),
                )
                .push(widget::button::standard(fl!("retry")).on_press(Message::RetryCamera))
                .spacing(6)
                .align_x(Alignment::Center)
                .into(),
        };

        let text_color = if matches!(self.camera, CameraState::Failed(_)) {
            Color::from_rgb(0.75, 0.2, 0.2)
        } else {
            Color::from_rgb(0.3, 0.3, 0.3)
        };
        widget::container(status)
            .style(move |_theme| widget::container::Style {
                text_color: Some(text_color),
                ..Default::default()
            })
            .into()
    }

    fn build_shutter(&self) -> Element<'_, Message> {
        let enabled = self.can_capture();
        let color = if enabled {
            SHUTTER_COLOR
        } else {
            SHUTTER_DISABLED_COLOR
        };

        let face = widget::container(widget::Space::new(
            Length::Fixed(ui::SHUTTER_BUTTON_INNER),
            Length::Fixed(ui::SHUTTER_BUTTON_INNER),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: (ui::SHUTTER_BUTTON_INNER / 2.0).into(),
                width: 3.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
            },
            ..Default::default()
        });

        let mut button = widget::button::custom(
            widget::container(face)
                .center_x(Length::Fixed(ui::SHUTTER_BUTTON_OUTER))
                .center_y(Length::Fixed(ui::SHUTTER_BUTTON_OUTER)),
        )
        .padding(0)
        .width(Length::Fixed(ui::SHUTTER_BUTTON_OUTER))
        .height(Length::Fixed(ui::SHUTTER_BUTTON_OUTER));

        // No handler while the gate is closed
        if enabled {
            button = button.on_press(Message::Capture);
        }
        button.into()
    }
}
