// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! - `state`: Application state types (AppModel, Message, CameraState)
//! - `capture_surface`: Camera body with live preview and shutter
//! - `polaroid`: Card body and hover controls for one photo
//! - `photo_wall_widget`: Free-positioning, draggable card layer
//! - `settings`: Settings drawer UI
//! - `view`: Main view composition
//! - `update`: Message dispatch to `handlers`

mod capture_surface;
mod handlers;
mod photo_wall_widget;
mod polaroid;
mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera;
use crate::config::Config;
use crate::fl;
use crate::photo::{PhotoWall, Placement};
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, CameraState, ContextPage, Message};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Reverse-DNS application id, shared with the command line
pub const APP_ID: &str = "io.github.photobooth";

const REPOSITORY: &str = "https://github.com/photobooth-app/photobooth";

/// How often the camera subscription checks the pipeline bus
const BUS_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(500);

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_name("camera-photo-symbolic").handle())
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) = Config::load(Self::APP_ID);

        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let captioner = crate::caption::from_config(&config);
        let app_theme = config.app_theme;

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            wall: PhotoWall::new(Placement::from_entropy()),
            photo_handles: HashMap::new(),
            captioner,
            camera: CameraState::default(),
            camera_generation: 0,
            current_frame: None,
            preview: None,
            is_capturing: false,
            flash_active: false,
            theme_options: vec![
                fl!("theme-system"),
                fl!("theme-dark"),
                fl!("theme-light"),
            ],
        };

        (app, cosmic::command::set_theme(app_theme.theme()))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let generation = self.camera_generation;
        let remembered_path = self.config.last_camera_path.clone();
        let (width, height) = self.config.capture_resolution();
        let mirror = self.config.mirror_preview;

        // Restarts whenever the user retries or changes a stream setting
        let camera_sub = Subscription::run_with_id(
            ("camera", generation, width, height, mirror),
            cosmic::iced::stream::channel(100, move |mut output| async move {
                info!(generation, "Camera subscription started");

                let (sender, mut receiver) = cosmic::iced::futures::channel::mpsc::channel(4);
                let opened = tokio::task::spawn_blocking(move || {
                    camera::open_preferred(remembered_path.as_deref(), width, height, sender)
                })
                .await;

                let (device, pipeline) = match opened {
                    Ok(Ok(opened)) => opened,
                    Ok(Err(e)) => {
                        error!(error = %e, "Failed to open camera");
                        let _ = output.send(Message::CameraFailed(e.to_string())).await;
                        return;
                    }
                    Err(e) => {
                        error!(error = %e, "Camera startup task failed");
                        let _ = output.send(Message::CameraFailed(e.to_string())).await;
                        return;
                    }
                };

                if output
                    .send(Message::CameraReady(device.name.clone(), device.path.clone()))
                    .await
                    .is_err()
                {
                    return;
                }

                let mut bus_poll = tokio::time::interval(BUS_POLL_INTERVAL);
                loop {
                    tokio::select! {
                        frame = receiver.next() => {
                            let Some(frame) = frame else {
                                warn!("Camera frame stream ended");
                                let _ = output
                                    .send(Message::CameraFailed(
                                        crate::errors::CameraError::Disconnected.to_string(),
                                    ))
                                    .await;
                                break;
                            };
                            let preview = capture_surface::preview_handle(&frame, mirror);
                            // Dropping frames is fine for live preview; only the latest matters.
                            if let Err(e) = output.try_send(Message::CameraFrame(Arc::new(frame), preview))
                                && e.is_disconnected()
                            {
                                break;
                            }
                        }
                        _ = bus_poll.tick() => {
                            if let Some(err) = pipeline.poll_error() {
                                error!(error = %err, "Camera stopped");
                                let _ = output.send(Message::CameraFailed(err.to_string())).await;
                                break;
                            }
                            if output.is_closed() {
                                break;
                            }
                        }
                    }
                }

                info!("Camera subscription finished");
                drop(pipeline);
            }),
        );

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
