//! `frame` command: side-by-side comparison pages.
//!
//! ```html
//! <!DOCTYPE html><style>iframe { width: 25% }</style>
//! <iframe src="../css/a.html"></iframe>
//! <iframe src="../smil/a.html"></iframe>
//! <iframe src="../wa/a.html"></iframe>
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use super::args::TranslateArgs;
use super::batch::{FileOutcome, collect_jobs, run_batch};
use super::translate::{is_svg, prepare_output_dir, write_output};
use crate::config::{FrameConfig, cfg};
use crate::log;

/// Write one comparison page per input document.
pub fn run(args: &TranslateArgs) -> Result<()> {
    let config = cfg();

    if !args.input.is_dir() {
        return write_frame(&args.input, &args.output, &config.frame);
    }

    prepare_output_dir(&args.output)?;
    let jobs = collect_jobs(&args.input, &args.output, &config.batch, |relative| {
        relative.with_extension("html")
    });
    run_batch("frame", &jobs, |job| {
        write_frame(&job.input, &job.output, &config.frame)?;
        Ok(FileOutcome::Written)
    })
}

fn write_frame(input: &Path, output: &Path, frame: &FrameConfig) -> Result<()> {
    let name = input
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid input file name {}", input.display()))?;

    write_output(output, &frame_page(name, !is_svg(input), frame))?;
    log!("frame"; "{}", output.display());
    Ok(())
}

/// Render the comparison page for the document `name`.
///
/// The script rendition is only linked when the document can host script.
pub fn frame_page(name: &str, with_script: bool, frame: &FrameConfig) -> String {
    let mut page = format!(
        "<!DOCTYPE html><style>iframe {{ width: {} }}</style>\n",
        frame.width
    );
    let mut dirs = vec![&frame.css_dir, &frame.smil_dir];
    if with_script {
        dirs.push(&frame.script_dir);
    }
    for dir in dirs {
        page.push_str(&format!("<iframe src=\"../{dir}/{name}\"></iframe>\n"));
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_frame_page_html() {
        let page = frame_page("a.html", true, &FrameConfig::default());
        assert_eq!(
            page,
            "<!DOCTYPE html><style>iframe { width: 25% }</style>\n\
             <iframe src=\"../css/a.html\"></iframe>\n\
             <iframe src=\"../smil/a.html\"></iframe>\n\
             <iframe src=\"../wa/a.html\"></iframe>\n"
        );
    }

    #[test]
    fn test_frame_page_svg_has_no_script_frame() {
        let page = frame_page("a.svg", false, &FrameConfig::default());
        assert!(page.contains("../smil/a.svg"));
        assert!(!page.contains("../wa/"));
    }

    #[test]
    fn test_frame_batch_renames_to_html() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("spin.svg"), "<svg/>").unwrap();
        fs::write(input.join("page.xhtml"), "<html/>").unwrap();

        let args = TranslateArgs {
            input,
            output: output.clone(),
        };
        run(&args).unwrap();

        let spin = fs::read_to_string(output.join("spin.html")).unwrap();
        assert!(spin.contains("../css/spin.svg"));
        assert!(!spin.contains("../wa/"));
        let page = fs::read_to_string(output.join("page.html")).unwrap();
        assert!(page.contains("../wa/page.xhtml"));
    }
}
