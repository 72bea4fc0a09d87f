//! Directory batches.
//!
//! Every document of a batch is independent: failures are reported per
//! file and the batch fails at the end if any document failed.

use anyhow::{Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::BatchConfig;
use crate::log;
use crate::logger::ProgressLine;
use crate::utils::plural::plural_count;

/// One input document and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    Skipped,
}

/// Collect batch jobs from `input_dir`, mirroring paths under `output_dir`.
///
/// `rename` maps the relative input path to the relative output path.
pub fn collect_jobs(
    input_dir: &Path,
    output_dir: &Path,
    batch: &BatchConfig,
    rename: impl Fn(&Path) -> PathBuf,
) -> Vec<BatchJob> {
    let depth = if batch.recursive { usize::MAX } else { 1 };

    let mut jobs: Vec<_> = WalkDir::new(input_dir)
        .max_depth(depth)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| batch.accepts(path))
        .filter_map(|input| {
            let relative = input.strip_prefix(input_dir).ok()?.to_path_buf();
            Some(BatchJob {
                output: output_dir.join(rename(&relative)),
                input,
            })
        })
        .collect();

    jobs.sort_by(|a, b| a.input.cmp(&b.input));
    jobs
}

/// Run `process` over every job in parallel.
pub fn run_batch<F>(label: &'static str, jobs: &[BatchJob], process: F) -> Result<()>
where
    F: Fn(&BatchJob) -> Result<FileOutcome> + Sync,
{
    if jobs.is_empty() {
        log!(label; "no documents to process");
        return Ok(());
    }

    let progress = ProgressLine::new(label, jobs.len());
    let skipped = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    jobs.par_iter().for_each(|job| {
        let ok = match process(job) {
            Ok(FileOutcome::Written) => true,
            Ok(FileOutcome::Skipped) => {
                skipped.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log!("error"; "{}: {:#}", job.input.display(), e);
                false
            }
        };
        progress.inc(!ok);
    });
    progress.finish();

    let skipped = skipped.into_inner();
    let failed = failed.into_inner();
    let written = jobs.len() - skipped - failed;

    log!(
        label;
        "{} written, {} skipped",
        plural_count(written, "document"),
        skipped
    );
    if failed > 0 {
        bail!("{} of {} failed", plural_count(failed, "document"), jobs.len());
    }
    Ok(())
}
