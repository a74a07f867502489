//! Staged conversion pipeline: ingest, identify, extract, validate,
//! encode. Each stage is a plain function so `convert` and `inspect`
//! can share the front half.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, ensure};
use patron_classify::{ColumnAssignment, IdentificationEngine, TrackerConfig};
use patron_extract::Extractor;
use patron_flat::{FlatLayout, FlatWriter};
use patron_ingest::{Grid, HeaderMode, IngestOptions, load_name_lists, read_grid_with_options};
use patron_model::{CandidateRecord, FlatRecord, Locale, NameLists, RequirementPolicy, RunConfig};
use patron_validate::{ValidationOutcome, Validator};
use tracing::{debug, info};

/// Resolved configuration shared by every stage.
pub struct PipelineContext {
    pub config: RunConfig,
    pub policy: RequirementPolicy,
    pub locale: Locale,
    pub name_lists: NameLists,
}

/// Loads the run configuration and resolves the locale, policy, and
/// name corpora it points at. Without a configuration file the
/// built-in policy applies; a file must name its required fields.
pub fn prepare(config_path: Option<&Path>) -> Result<PipelineContext> {
    let (config, policy) = match config_path {
        Some(path) => {
            let config = RunConfig::load(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            let policy = config.policy()?;
            (config, policy)
        }
        None => (RunConfig::default(), RequirementPolicy::default()),
    };
    let locale = config.resolve_locale()?;
    let name_lists = load_name_lists(
        config.common_first_names.as_deref(),
        config.common_last_names.as_deref(),
        config.street_names.as_deref(),
    )
    .context("failed to load name corpora")?;
    debug!(
        locale = %locale.code,
        given_names = name_lists.has_given(),
        family_names = name_lists.has_family(),
        street_suffixes = name_lists.has_street_suffixes(),
        "pipeline context ready"
    );
    Ok(PipelineContext {
        config,
        policy,
        locale,
        name_lists,
    })
}

/// Reads the input grid. An explicit delimiter flag beats the
/// configuration file, which beats sniffing.
pub fn ingest(
    ctx: &PipelineContext,
    input: &Path,
    delimiter: Option<char>,
    header: HeaderMode,
) -> Result<Grid> {
    let delimiter = match delimiter.or(ctx.config.delimiter) {
        Some(c) => {
            ensure!(c.is_ascii(), "delimiter must be an ASCII character");
            Some(c as u8)
        }
        None => None,
    };
    let grid = read_grid_with_options(input, IngestOptions { delimiter, header })
        .with_context(|| format!("failed to read {}", input.display()))?;
    info!(
        rows = grid.row_count(),
        columns = grid.width(),
        "input ingested"
    );
    Ok(grid)
}

/// Runs column identification over the whole grid.
pub fn identify(
    ctx: &PipelineContext,
    grid: &Grid,
    tracker: TrackerConfig,
) -> Result<ColumnAssignment> {
    let engine = IdentificationEngine::new(&ctx.locale, &ctx.name_lists, tracker)?;
    Ok(engine.identify(grid.iter_rows()))
}

/// Replays the grid against a frozen assignment.
pub fn extract(
    ctx: &PipelineContext,
    grid: &Grid,
    assignment: &ColumnAssignment,
) -> Result<Vec<CandidateRecord>> {
    let extractor = Extractor::new(&ctx.locale, &ctx.name_lists, assignment)?;
    Ok(extractor.extract_all(grid.iter_rows()))
}

/// Applies the requirement policy and value rules.
pub fn validate(ctx: &PipelineContext, candidates: Vec<CandidateRecord>) -> Result<ValidationOutcome> {
    let validator = Validator::new(&ctx.policy, &ctx.locale)?;
    Ok(validator.validate_all(candidates))
}

/// Picks the flat layout: an explicit flag beats the configuration
/// file, which beats the built-in Symphony layout.
pub fn resolve_layout(ctx: &PipelineContext, cli_layout: Option<&Path>) -> Result<FlatLayout> {
    match cli_layout.or(ctx.config.layout.as_deref()) {
        Some(path) => FlatLayout::load(path)
            .with_context(|| format!("failed to load layout from {}", path.display())),
        None => Ok(FlatLayout::symphony_default()),
    }
}

/// Encodes records to a file, or to stdout when no path was given.
pub fn encode(layout: &FlatLayout, records: &[FlatRecord], output: Option<&Path>) -> Result<usize> {
    let written = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_records(BufWriter::new(file), layout, records)?
        }
        None => write_records(io::stdout().lock(), layout, records)?,
    };
    info!(records = written, "flat output written");
    Ok(written)
}

fn write_records<W: Write>(writer: W, layout: &FlatLayout, records: &[FlatRecord]) -> Result<usize> {
    let mut flat = FlatWriter::new(writer, layout)?;
    flat.write_all(records)?;
    let written = flat.records_written();
    flat.finish()?;
    Ok(written)
}
