//! `css` and `script` commands.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use super::args::TranslateArgs;
use super::batch::{BatchJob, FileOutcome, collect_jobs, run_batch};
use crate::config::cfg;
use crate::dom;
use crate::smil::{OutputMode, TranslateError, TranslateOptions, TranslateStats, translate_document};
use crate::{debug, log};

/// Translate a single document or a directory of documents.
pub fn run(args: &TranslateArgs, mode: OutputMode) -> Result<()> {
    let config = cfg();
    let options = config.translate_options(mode);

    if !args.input.is_dir() {
        if mode == OutputMode::Script && is_svg(&args.input) {
            return Err(TranslateError::unsupported("JavaScript in .svg images").into());
        }
        translate_file(&args.input, &args.output, &options)?;
        return Ok(());
    }

    prepare_output_dir(&args.output)?;
    let jobs = collect_jobs(&args.input, &args.output, &config.batch, Path::to_path_buf);
    run_batch(mode.name(), &jobs, |job: &BatchJob| {
        // Images cannot run script
        if mode == OutputMode::Script && is_svg(&job.input) {
            debug!("translate"; "skipping {}", job.input.display());
            return Ok(FileOutcome::Skipped);
        }
        translate_file(&job.input, &job.output, &options)?;
        Ok(FileOutcome::Written)
    })
}

/// Read, translate and write one document.
///
/// Nothing is written when translation fails.
pub fn translate_file(
    input: &Path,
    output: &Path,
    options: &TranslateOptions,
) -> Result<TranslateStats> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let mut doc = dom::parse(&source, input)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    let stats = translate_document(&mut doc, options)
        .with_context(|| format!("failed to translate {}", input.display()))?;

    // Untouched documents are copied byte for byte
    if stats.animations == 0 {
        write_output(output, &source)?;
    } else {
        write_output(output, &dom::render(&doc))?;
    }
    log!("translate"; "{}", output.display());
    debug!(
        "translate";
        "{}: {} animations, {} generated ids",
        input.display(),
        stats.animations,
        stats.generated_ids
    );
    Ok(stats)
}

/// The output side of a directory run must be a directory.
pub(super) fn prepare_output_dir(output: &Path) -> Result<()> {
    if output.exists() && !output.is_dir() {
        bail!(
            "input is a directory but output `{}` is not",
            output.display()
        );
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))
}

/// Write a file, creating parent directories.
pub(super) fn write_output(output: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(output, content).with_context(|| format!("failed to write {}", output.display()))
}

/// `.svg` documents are images.
pub(super) fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
