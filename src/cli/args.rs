//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::smil::OutputMode;

/// Translate SMIL animations in SVG and HTML documents
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: smil.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Log every translated animation
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Replace SMIL animations with CSS keyframe animations
    Css {
        #[command(flatten)]
        args: TranslateArgs,
    },

    /// Replace SMIL animations with Web Animations script
    #[command(visible_alias = "wa")]
    Script {
        #[command(flatten)]
        args: TranslateArgs,
    },

    /// Write pages comparing the CSS, SMIL and script renditions
    Frame {
        #[command(flatten)]
        args: TranslateArgs,
    },
}

impl Commands {
    /// Translation mode, `None` for frame pages.
    pub const fn mode(&self) -> Option<OutputMode> {
        match self {
            Self::Css { .. } => Some(OutputMode::Css),
            Self::Script { .. } => Some(OutputMode::Script),
            Self::Frame { .. } => None,
        }
    }

    pub const fn args(&self) -> &TranslateArgs {
        match self {
            Self::Css { args } | Self::Script { args } | Self::Frame { args } => args,
        }
    }
}

/// Input and output paths shared by every command.
///
/// When both are directories every matching document of `input` is
/// processed into `output`.
#[derive(clap::Args, Debug, Clone)]
pub struct TranslateArgs {
    /// Input document or directory
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub input: PathBuf,

    /// Output document or directory
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["smil-translate", "css", "in.svg", "out.svg"]).unwrap();
        assert_eq!(cli.command.mode(), Some(OutputMode::Css));
        assert_eq!(cli.command.args().input, PathBuf::from("in.svg"));
        assert!(!cli.verbose);

        let cli =
            Cli::try_parse_from(["smil-translate", "wa", "-v", "in.html", "out.html"]).unwrap();
        assert_eq!(cli.command.mode(), Some(OutputMode::Script));
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["smil-translate", "-C", "x.toml", "frame", "a", "b"]).unwrap();
        assert_eq!(cli.command.mode(), None);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Cli::try_parse_from(["smil-translate", "css", "in.svg"]).is_err());
    }
}
