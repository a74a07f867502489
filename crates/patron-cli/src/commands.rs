//! Subcommand entry points.

use std::time::Instant;

use anyhow::Result;
use patron_classify::TrackerConfig;
use patron_ingest::HeaderMode;
use tracing::info;

use patron_cli::pipeline;

use crate::cli::{ConvertArgs, HeaderArg, InspectArgs, ProfileArg};
use crate::types::{ConvertResult, InspectResult};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let ctx = pipeline::prepare(args.config.as_deref())?;
    let layout = pipeline::resolve_layout(&ctx, args.layout.as_deref())?;

    let ingest_start = Instant::now();
    let grid = pipeline::ingest(&ctx, &args.input, args.delimiter, header_mode(args.header))?;
    let rows_read = grid.row_count();
    info!(
        rows = rows_read,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let identify_start = Instant::now();
    let assignment = pipeline::identify(&ctx, &grid, tracker_config(args.profile))?;
    info!(
        assigned = assignment.assigned_count(),
        duration_ms = identify_start.elapsed().as_millis(),
        "identification complete"
    );

    let candidates = pipeline::extract(&ctx, &grid, &assignment)?;
    let outcome = pipeline::validate(&ctx, candidates)?;

    let review: Vec<_> = outcome
        .review
        .iter()
        .map(|(record, reasons)| (record.row, reasons.clone()))
        .collect();
    let accepted = outcome.accepted.len();
    let mut records = outcome.accepted;
    if args.include_review {
        records.extend(outcome.review.into_iter().map(|(record, _)| record));
        records.sort_by_key(|record| record.row);
    }
    let records_written = if args.dry_run {
        0
    } else {
        pipeline::encode(&layout, &records, args.output.as_deref())?
    };

    Ok(ConvertResult {
        input: args.input.clone(),
        output: args.output.clone(),
        rows_read,
        assignment,
        accepted,
        review,
        rejections: outcome.rejections,
        records_written,
        dry_run: args.dry_run,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let ctx = pipeline::prepare(args.config.as_deref())?;
    let grid = pipeline::ingest(&ctx, &args.input, args.delimiter, header_mode(args.header))?;
    let rows_read = grid.row_count();
    let assignment = pipeline::identify(&ctx, &grid, tracker_config(args.profile))?;
    Ok(InspectResult {
        input: args.input.clone(),
        rows_read,
        assignment,
    })
}

fn header_mode(arg: HeaderArg) -> HeaderMode {
    match arg {
        HeaderArg::Auto => HeaderMode::Auto,
        HeaderArg::Skip => HeaderMode::Skip,
        HeaderArg::Keep => HeaderMode::Keep,
    }
}

fn tracker_config(arg: ProfileArg) -> TrackerConfig {
    match arg {
        ProfileArg::Default => TrackerConfig::default(),
        ProfileArg::Strict => TrackerConfig::strict(),
        ProfileArg::Relaxed => TrackerConfig::relaxed(),
    }
}
