// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, CameraState, ContextPage, Message};
use crate::caption::gemini::api_key_from_env;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    ///
    /// Appearance, camera, captioning and storage sections.
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_dropdown = widget::dropdown(
            &self.theme_options,
            Some(self.config.app_theme as usize),
            Message::SetAppTheme,
        );

        let mirror_toggle =
            widget::toggler(self.config.mirror_preview).on_toggle(|_| Message::ToggleMirrorPreview);

        let camera_status = match &self.camera {
            CameraState::Starting => fl!("starting-camera"),
            CameraState::Streaming { name } => name.clone(),
            CameraState::Failed(reason) => reason.clone(),
        };

        let (width, height) = self.config.capture_resolution();

        let credential_status = if api_key_from_env().is_some() {
            fl!("caption-key-found")
        } else {
            fl!("caption-key-missing")
        };

        let photo_dir = crate::storage::photo_dir();
        let open_folder = widget::button::standard(fl!("open-folder"))
            .on_press(Message::LaunchUrl(photo_dir.display().to_string()));

        let heading = |label: String| widget::text(label).size(16).font(cosmic::font::bold());

        let settings_column: Element<'_, Message> = widget::column()
            .push(heading(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("camera")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(camera_status).size(13))
            .push(widget::text(format!("{width} × {height}")).size(12))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::row()
                    .push(widget::text(fl!("mirror-preview")).size(14))
                    .push(widget::horizontal_space().width(Length::Fill))
                    .push(mirror_toggle)
                    .align_y(Alignment::Center),
            )
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("captions")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(self.config.caption_model.clone()).size(13))
            .push(widget::text(credential_status).size(12))
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(heading(fl!("photos-folder")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(photo_dir.display().to_string()).size(12))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(open_folder)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("version", version = env!("GIT_VERSION")))
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
