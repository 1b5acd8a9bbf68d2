//! Publishing a finished graphic to an external channel.
//!
//! Publishing always happens after the image is on disk, and a failure here never removes it.

use std::path::Path;

use crate::{
    config::Settings,
    foundation::error::{PitchcardError, PitchcardResult},
    model::MatchMetadata,
};

mod ledger;
#[cfg(feature = "http")]
mod webhook;

pub use ledger::PostedLedger;
#[cfg(feature = "http")]
pub use webhook::WebhookPublisher;

/// What a publisher reports back after a successful post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishReceipt {
    pub caption: String,
    /// Remote identifier of the post, when the channel returns one.
    pub remote_id: Option<String>,
}

pub trait Publisher {
    fn publish(&self, image: &Path, caption: &str) -> PitchcardResult<PublishReceipt>;
}

/// Default post copy: `"Home 2 - 1 Away | Competition | Round | Status"`, empty parts left out.
pub fn compose_caption(metadata: &MatchMetadata) -> String {
    let (home, away) = (&metadata.home, &metadata.away);
    let headline = format!("{} {} - {} {}", home.name, home.score, away.score, away.name);

    [
        Some(headline.trim()),
        Some(metadata.competition.trim()),
        metadata.round.as_deref().map(str::trim),
        Some(metadata.status.trim()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" | ")
}

/// Publish `image` with `caption_override` when it has content, else the default caption.
#[tracing::instrument(skip(publisher, metadata), fields(match_id = %metadata.match_id))]
pub fn publish_match(
    publisher: &dyn Publisher,
    metadata: &MatchMetadata,
    image: &Path,
    caption_override: Option<&str>,
) -> PitchcardResult<PublishReceipt> {
    if !image.is_file() {
        return Err(PitchcardError::io(
            image,
            std::io::Error::new(std::io::ErrorKind::NotFound, "image to publish is missing"),
        ));
    }

    let caption = caption_override
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| compose_caption(metadata));

    let receipt = publisher.publish(image, &caption)?;
    tracing::info!(remote_id = ?receipt.remote_id, "published");
    Ok(receipt)
}

/// Build the configured publisher.
///
/// Fails with [`PitchcardError::CapabilityMissing`] when no publishing backend was compiled
/// in, and with [`PitchcardError::Publish`] when credentials are missing.
pub fn create_publisher(settings: &Settings) -> PitchcardResult<Box<dyn Publisher>> {
    #[cfg(feature = "http")]
    {
        Ok(Box::new(WebhookPublisher::from_settings(settings)?))
    }
    #[cfg(not(feature = "http"))]
    {
        let _ = settings;
        Err(PitchcardError::capability(
            "publishing not compiled in (enable the `http` feature)",
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/publish/mod.rs"]
mod tests;
