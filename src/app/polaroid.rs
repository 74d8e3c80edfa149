// SPDX-License-Identifier: GPL-3.0-only

//! Polaroid card pieces
//!
//! A card is split in two elements so the wall widget can show the
//! controls only while the card is hovered:
//! - the body (photo, caption, date)
//! - the controls row (delete on the left, download on the right)

use crate::app::photo_wall_widget::{CardSlot, PhotoWallWidget};
use crate::app::state::{AppModel, Message};
use crate::constants::caption::FALLBACK_DATE_FORMAT;
use crate::constants::ui;
use crate::fl;
use crate::photo::PhotoRecord;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Color, ContentFit, Length, Point};
use cosmic::widget::{self, icon, image::Handle};

const CARD_COLOR: Color = Color::WHITE;
const INK_COLOR: Color = Color::from_rgb(0.2, 0.2, 0.22);
const PAPER_GRAIN: Color = Color::from_rgb(0.09, 0.09, 0.1);
const DELETE_COLOR: Color = Color::from_rgb(0.86, 0.24, 0.24);
const DOWNLOAD_COLOR: Color = Color::from_rgb(0.15, 0.15, 0.17);

/// Extra space below the caption, the classic wide polaroid margin
const CARD_BOTTOM_PADDING: u16 = 32;

impl AppModel {
    /// Build the free-positioned layer holding every card
    pub fn build_photo_wall(&self) -> Element<'_, Message> {
        let cards = self.wall.photos().iter().map(|photo| {
            let slot = CardSlot {
                id: photo.id,
                position: Point::new(photo.position.x, photo.position.y),
                developing: photo.is_developing,
            };
            let body = card_body(photo, self.photo_handles.get(&photo.id));
            (slot, body, card_controls(photo))
        });

        PhotoWallWidget::new(cards).into()
    }
}

/// White card with the photo, caption and capture date
fn card_body<'a>(photo: &PhotoRecord, handle: Option<&Handle>) -> Element<'a, Message> {
    let inner_width = ui::CARD_WIDTH - 2.0 * f32::from(ui::CARD_PADDING);

    let picture: Element<'a, Message> = match handle {
        Some(handle) => widget::image(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(inner_width))
            .height(Length::Fixed(ui::CARD_PHOTO_HEIGHT))
            .into(),
        None => widget::container(widget::Space::new(Length::Fill, Length::Fill))
            .width(Length::Fixed(inner_width))
            .height(Length::Fixed(ui::CARD_PHOTO_HEIGHT))
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(PAPER_GRAIN)),
                ..Default::default()
            })
            .into(),
    };

    let caption: Element<'a, Message> = if photo.has_caption() {
        widget::text(photo.caption.clone())
            .size(ui::CAPTION_TEXT_SIZE)
            .align_x(cosmic::iced::alignment::Horizontal::Center)
            .width(Length::Fill)
            .into()
    } else {
        widget::text(fl!("captioning"))
            .size(ui::TIMESTAMP_TEXT_SIZE + 2)
            .align_x(cosmic::iced::alignment::Horizontal::Center)
            .width(Length::Fill)
            .into()
    };

    let date = widget::row()
        .push(widget::horizontal_space())
        .push(
            widget::text(photo.captured_at.format(FALLBACK_DATE_FORMAT).to_string())
                .size(ui::TIMESTAMP_TEXT_SIZE),
        )
        .width(Length::Fill);

    let column = widget::column()
        .push(picture)
        .push(widget::container(caption).padding([10, 0, 0, 0]).width(Length::Fill))
        .push(date)
        .spacing(4)
        .width(Length::Fixed(inner_width));

    widget::container(column)
        .width(Length::Fixed(ui::CARD_WIDTH))
        .padding([
            ui::CARD_PADDING,
            ui::CARD_PADDING,
            CARD_BOTTOM_PADDING,
            ui::CARD_PADDING,
        ])
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(CARD_COLOR)),
            text_color: Some(INK_COLOR),
            border: Border {
                radius: 2.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

/// Round icon button in a fixed color
fn control_button<'a>(icon_name: &'static str, color: Color, message: Message) -> Element<'a, Message> {
    widget::container(
        widget::button::icon(icon::from_name(icon_name).size(16))
            .on_press(message)
            .padding(6),
    )
    .center_x(Length::Fixed(ui::CARD_CONTROL_SIZE))
    .center_y(Length::Fixed(ui::CARD_CONTROL_SIZE))
    .style(move |_theme| widget::container::Style {
        background: Some(Background::Color(color)),
        icon_color: Some(Color::WHITE),
        border: Border {
            radius: (ui::CARD_CONTROL_SIZE / 2.0).into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

/// Delete and download controls spanning the card's top edge
fn card_controls<'a>(photo: &PhotoRecord) -> Element<'a, Message> {
    widget::row()
        .push(control_button(
            "user-trash-symbolic",
            DELETE_COLOR,
            Message::DeletePhoto(photo.id),
        ))
        .push(widget::horizontal_space())
        .push(control_button(
            "document-save-symbolic",
            DOWNLOAD_COLOR,
            Message::DownloadPhoto(photo.id),
        ))
        .align_y(Alignment::Center)
        .width(Length::Fill)
        .into()
}
