use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use serde_json::Value;

use crate::{
    config::{ENV_WEBHOOK_URL, Settings},
    foundation::coerce::{lookup, text},
    foundation::error::{PitchcardError, PitchcardResult},
    publish::{PublishReceipt, Publisher},
};

/// Posts the image and caption as `multipart/form-data` to a webhook.
///
/// Form fields: `caption` (text) and `image` (PNG file). A bearer token is sent when set.
pub struct WebhookPublisher {
    client: Client,
    url: String,
    token: Option<String>,
}

impl WebhookPublisher {
    pub fn new(
        url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> PitchcardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PitchcardError::publish(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }

    pub fn from_settings(settings: &Settings) -> PitchcardResult<Self> {
        let url = settings
            .webhook_url
            .clone()
            .ok_or_else(|| PitchcardError::publish(format!("{ENV_WEBHOOK_URL} is not set")))?;
        Self::new(url, settings.webhook_token.clone(), settings.http_timeout)
    }
}

impl Publisher for WebhookPublisher {
    #[tracing::instrument(skip(self, caption), fields(url = %self.url))]
    fn publish(&self, image: &Path, caption: &str) -> PitchcardResult<PublishReceipt> {
        let bytes = std::fs::read(image).map_err(|e| PitchcardError::io(image, e))?;
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "match.png".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/png")
            .map_err(|e| PitchcardError::publish(format!("build upload: {e}")))?;
        let form = multipart::Form::new()
            .text("caption", caption.to_string())
            .part("image", part);

        let mut req = self.client.post(&self.url).multipart(form);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .map_err(|e| PitchcardError::publish(format!("upload failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(PitchcardError::publish(format!(
                "webhook returned {status}: {}",
                body.trim()
            )));
        }

        let remote_id = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| text(lookup(&v, &["id"])));
        Ok(PublishReceipt {
            caption: caption.to_string(),
            remote_id,
        })
    }
}
