use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pitchcard::{
    BackendKind, BatchJob, FileSource, LeagueSource, Palette, PostedLedger, RenderBackend,
    RenderSettings, Settings, create_backend, create_publisher, default_output_path,
    generate_batch, generate_from_source, publish_match,
};

/// Generate a match-report graphic (and optionally publish it).
#[derive(Parser, Debug)]
#[command(name = "pitchcard", version)]
struct Cli {
    /// Match identifier.
    #[arg(required_unless_present = "league", conflicts_with = "league")]
    match_id: Option<String>,

    /// Output PNG path (default: match_<id>.png).
    #[arg(long, short, conflicts_with = "league")]
    output: Option<PathBuf>,

    /// Stat titles to show, in order (case-insensitive).
    #[arg(long, num_args = 0..)]
    stats: Option<Vec<String>>,

    /// Publish the image after rendering.
    #[arg(long, default_value_t = false)]
    publish: bool,

    /// Caption to publish instead of the generated one.
    #[arg(long, conflicts_with = "league")]
    caption: Option<String>,

    /// Read the match payload from a local JSON file instead of fetching it.
    #[arg(long, conflicts_with_all = ["league", "payload_dir"])]
    payload: Option<PathBuf>,

    /// Read `<id>.json` payloads and `league_<id>.json` listings from a directory.
    #[arg(long)]
    payload_dir: Option<PathBuf>,

    /// Palette JSON overriding the default colours.
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Process every finished, not yet published match of a league
    /// (id defaults to PITCHCARD_LEAGUE_ID).
    #[arg(long, num_args = 0..=1, value_name = "ID")]
    league: Option<Option<u32>>,

    /// Directory league-mode graphics are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let palette = match &cli.palette {
        Some(path) => Palette::from_path(path).context("load palette")?,
        None => Palette::default(),
    };
    let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default())
        .context("create render backend")?;
    let source = match_source(&cli, &settings).context("create match source")?;

    let (source, backend) = (source.as_ref(), backend.as_mut());
    match cli.league {
        Some(league) => run_league(&cli, &settings, league, &palette, source, backend),
        None => run_single(&cli, &settings, &palette, source, backend),
    }
}

fn run_single(
    cli: &Cli,
    settings: &Settings,
    palette: &Palette,
    source: &dyn LeagueSource,
    backend: &mut dyn RenderBackend,
) -> anyhow::Result<()> {
    let match_id = cli.match_id.as_deref().context("a match id is required")?;
    let output = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(match_id).context("choose output path")?,
    };

    let generated = generate_from_source(
        source,
        match_id,
        cli.stats.as_deref(),
        palette,
        &output,
        backend,
    )
    .with_context(|| format!("generate graphic for match {match_id}"))?;

    println!("{}", generated.path.display());

    if cli.publish {
        let publisher = create_publisher(settings).context("create publisher")?;
        let receipt = publish_match(
            publisher.as_ref(),
            &generated.report.metadata,
            &generated.path,
            cli.caption.as_deref(),
        )
        .context("publish graphic")?;
        eprintln!("published: {}", receipt.caption);
    }
    Ok(())
}

fn run_league(
    cli: &Cli,
    settings: &Settings,
    league: Option<u32>,
    palette: &Palette,
    source: &dyn LeagueSource,
    backend: &mut dyn RenderBackend,
) -> anyhow::Result<()> {
    let league_id = league
        .or(settings.league_id)
        .context("no league id: pass --league <ID> or set PITCHCARD_LEAGUE_ID")?;

    let fixtures = source
        .completed_matches(league_id)
        .with_context(|| format!("list finished matches of league {league_id}"))?;
    let mut ledger = PostedLedger::load(&settings.ledger_path).context("load posted-match ledger")?;
    let publisher = if cli.publish {
        Some(create_publisher(settings).context("create publisher")?)
    } else {
        None
    };

    let ids: Vec<String> = fixtures.into_iter().map(|m| m.id).collect();
    let job = BatchJob {
        desired_titles: cli.stats.as_deref(),
        palette,
        output_dir: &cli.output_dir,
        publisher: publisher.as_deref(),
    };
    let summary = generate_batch(source, &ids, &job, &mut ledger, backend)
        .context("record published match")?;

    for generated in &summary.generated {
        println!("{}", generated.path.display());
    }
    for (match_id, err) in &summary.failed {
        eprintln!("match {match_id}: {err}");
    }
    if !summary.failed.is_empty() {
        anyhow::bail!(
            "{} of {} matches failed",
            summary.failed.len(),
            ids.len() - summary.skipped.len()
        );
    }
    Ok(())
}

fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
}

fn match_source(cli: &Cli, settings: &Settings) -> anyhow::Result<Box<dyn LeagueSource>> {
    if let Some(path) = &cli.payload {
        return Ok(Box::new(FileSource::single(path)));
    }
    if let Some(dir) = &cli.payload_dir {
        return Ok(Box::new(FileSource::in_dir(dir)));
    }
    remote_source(settings)
}

#[cfg(feature = "http")]
fn remote_source(settings: &Settings) -> anyhow::Result<Box<dyn LeagueSource>> {
    Ok(Box::new(pitchcard::FotmobSource::from_settings(settings)?))
}

#[cfg(not(feature = "http"))]
fn remote_source(_settings: &Settings) -> anyhow::Result<Box<dyn LeagueSource>> {
    Err(pitchcard::PitchcardError::capability(
        "fetching over http not compiled in (enable the `http` feature, or pass --payload)",
    )
    .into())
}
