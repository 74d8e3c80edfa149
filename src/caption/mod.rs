// SPDX-License-Identifier: GPL-3.0-only

//! Photo captioning
//!
//! A [`Captioner`] turns an encoded image into a short line of text. The
//! booth never surfaces captioning errors: [`caption_or_fallback`] replaces
//! any failure with the capture date.

pub mod gemini;

pub use gemini::GeminiCaptioner;

use crate::constants::caption::{EMPTY_RESPONSE_CAPTION, FALLBACK_DATE_FORMAT};
use crate::errors::CaptionError;
use crate::photo::ImagePayload;
use chrono::{DateTime, Local};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{info, warn};

/// Image-to-text service
pub trait Captioner: Send + Sync {
    /// Request a caption for an encoded image
    ///
    /// The returned future owns everything it needs so it can outlive the
    /// card it was issued for.
    fn caption(&self, image: ImagePayload) -> BoxFuture<'static, Result<String, CaptionError>>;
}

/// Captioner shared between the UI and background tasks
pub type SharedCaptioner = Arc<dyn Captioner>;

/// Captioner that always fails with the same error
///
/// Stands in when the real client cannot be built, so every photo still
/// ends up with the fallback caption.
pub struct Disabled(pub CaptionError);

impl Captioner for Disabled {
    fn caption(&self, _image: ImagePayload) -> BoxFuture<'static, Result<String, CaptionError>> {
        futures::future::ready(Err(self.0.clone())).boxed()
    }
}

/// Build the configured captioner, degrading to [`Disabled`] on failure
pub fn from_config(config: &crate::config::Config) -> SharedCaptioner {
    match GeminiCaptioner::from_config(config) {
        Ok(gemini) => {
            if !gemini.has_credential() {
                warn!("No GEMINI_API_KEY or API_KEY set; captions will show the capture date");
            }
            Arc::new(gemini)
        }
        Err(err) => {
            warn!(error = %err, "Captioning client unavailable");
            Arc::new(Disabled(err))
        }
    }
}

/// Caption shown when the service cannot be reached
pub fn fallback_caption(captured_at: &DateTime<Local>) -> String {
    captured_at.format(FALLBACK_DATE_FORMAT).to_string()
}

/// Trim service output; an empty answer becomes the stock caption
pub fn normalize_caption(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        EMPTY_RESPONSE_CAPTION.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Caption an image, falling back to the capture date on any failure
pub async fn caption_or_fallback(
    captioner: SharedCaptioner,
    image: ImagePayload,
    captured_at: DateTime<Local>,
) -> String {
    match captioner.caption(image).await {
        Ok(text) => {
            let caption = normalize_caption(&text);
            info!(caption = %caption, "Caption received");
            caption
        }
        Err(err) => {
            warn!(error = %err, "Captioning failed, using capture date");
            fallback_caption(&captured_at)
        }
    }
}
