//! End-to-end entry points: payload in, PNG out.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    compose::{Palette, compose_match_graphic},
    config::default_output_path,
    foundation::error::{PitchcardError, PitchcardResult},
    model::MatchReport,
    normalize::normalize_report,
    publish::{PostedLedger, Publisher, publish_match},
    render::{RenderBackend, render_to_path},
    source::MatchSource,
};

/// A written graphic together with the report it was drawn from.
#[derive(Clone, Debug)]
pub struct GeneratedGraphic {
    pub report: MatchReport,
    pub path: PathBuf,
}

/// Compose and render an already-normalized report to `output`.
#[tracing::instrument(skip(report, palette, backend), fields(match_id = %report.metadata.match_id))]
pub fn create_match_graphic(
    report: &MatchReport,
    palette: &Palette,
    output: &Path,
    backend: &mut dyn RenderBackend,
) -> PitchcardResult<PathBuf> {
    let plan = compose_match_graphic(report, palette);
    render_to_path(&plan, backend, output)
}

/// Normalize `raw`, then compose and render it to `output`.
///
/// Nothing is written when normalization fails.
pub fn generate_from_payload(
    raw: &Value,
    desired_titles: Option<&[String]>,
    palette: &Palette,
    output: &Path,
    backend: &mut dyn RenderBackend,
) -> PitchcardResult<GeneratedGraphic> {
    let report = normalize_report(raw, desired_titles)?;
    let path = create_match_graphic(&report, palette, output, backend)?;
    Ok(GeneratedGraphic { report, path })
}

/// Fetch the payload for `match_id` from `source` and run [`generate_from_payload`].
pub fn generate_from_source(
    source: &dyn MatchSource,
    match_id: &str,
    desired_titles: Option<&[String]>,
    palette: &Palette,
    output: &Path,
    backend: &mut dyn RenderBackend,
) -> PitchcardResult<GeneratedGraphic> {
    let raw = source.fetch(match_id)?;
    generate_from_payload(&raw, desired_titles, palette, output, backend)
}

/// Shared inputs for a run over several matches.
pub struct BatchJob<'a> {
    pub desired_titles: Option<&'a [String]>,
    pub palette: &'a Palette,
    /// Each graphic is written to `<output_dir>/match_<id>.png`.
    pub output_dir: &'a Path,
    /// When set, every rendered graphic is published and recorded in the ledger.
    pub publisher: Option<&'a dyn Publisher>,
}

/// Outcome of [`generate_batch`].
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub generated: Vec<GeneratedGraphic>,
    /// Ids already in the ledger, left untouched.
    pub skipped: Vec<String>,
    pub published: Vec<String>,
    pub failed: Vec<(String, PitchcardError)>,
}

/// Generate (and optionally publish) each match in `match_ids`, in order.
///
/// Ids already in `ledger` are skipped. A failing match is logged and collected in
/// [`BatchSummary::failed`] without stopping the run; only a ledger write failure aborts,
/// since carrying on could publish the same match twice.
#[tracing::instrument(skip_all, fields(matches = match_ids.len()))]
pub fn generate_batch(
    source: &dyn MatchSource,
    match_ids: &[String],
    job: &BatchJob<'_>,
    ledger: &mut PostedLedger,
    backend: &mut dyn RenderBackend,
) -> PitchcardResult<BatchSummary> {
    let mut summary = BatchSummary::default();

    for match_id in match_ids {
        if ledger.contains(match_id) {
            tracing::debug!(match_id, "already published");
            summary.skipped.push(match_id.clone());
            continue;
        }

        let generated = match generate_one(source, match_id, job, backend) {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!(match_id, error = %e, "match failed");
                summary.failed.push((match_id.clone(), e));
                continue;
            }
        };

        if let Some(publisher) = job.publisher {
            match publish_match(publisher, &generated.report.metadata, &generated.path, None) {
                Ok(_) => {
                    ledger.record(match_id)?;
                    summary.published.push(match_id.clone());
                }
                Err(e) => {
                    tracing::warn!(match_id, error = %e, "publish failed");
                    summary.failed.push((match_id.clone(), e));
                }
            }
        }
        summary.generated.push(generated);
    }

    tracing::info!(
        generated = summary.generated.len(),
        published = summary.published.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "batch finished"
    );
    Ok(summary)
}

fn generate_one(
    source: &dyn MatchSource,
    match_id: &str,
    job: &BatchJob<'_>,
    backend: &mut dyn RenderBackend,
) -> PitchcardResult<GeneratedGraphic> {
    let output = job.output_dir.join(default_output_path(match_id)?);
    generate_from_source(
        source,
        match_id,
        job.desired_titles,
        job.palette,
        &output,
        backend,
    )
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
