use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postlens")]
#[command(version)]
#[command(about = "Feature tables, salient terms and activity series for a post archive")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every analysis command
#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Archive to analyze (tweets.js, JSON array or JSONL)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Config file (defaults to $POSTLENS_CONFIG, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export the per-post feature table
    Features {
        #[command(flatten)]
        io: IoArgs,

        #[arg(short, long, value_enum, default_value_t = TableFormat::Csv)]
        format: TableFormat,
    },

    /// Most salient terms of the corpus
    Terms {
        #[command(flatten)]
        io: IoArgs,

        /// Number of terms (overrides config top_terms)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Post counts per day, week or month
    Activity {
        #[command(flatten)]
        io: IoArgs,

        /// day, week or month (overrides config period)
        #[arg(short, long)]
        period: Option<String>,

        /// Include empty periods between the first and last post
        #[arg(long)]
        dense: bool,

        #[arg(short, long, value_enum, default_value_t = TableFormat::Json)]
        format: TableFormat,
    },

    /// Most representative posts
    Summarize {
        #[command(flatten)]
        io: IoArgs,

        /// Number of posts (overrides config num_results)
        #[arg(short = 'n', long)]
        num_results: Option<usize>,
    },

    /// Full report: diagnostics, corpus statistics, feature summary,
    /// summary and activity buckets
    Report {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["postlens", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_features() {
        let cli = Cli::try_parse_from(["postlens", "features", "--input", "tweets.js"]).unwrap();
        if let Commands::Features { io, format } = cli.command {
            assert_eq!(io.input, PathBuf::from("tweets.js"));
            assert!(io.config.is_none());
            assert_eq!(format, TableFormat::Csv);
        } else {
            panic!("Expected Features command");
        }
    }

    #[test]
    fn test_cli_parse_activity() {
        let cli = Cli::try_parse_from([
            "postlens", "activity", "-i", "a.json", "--period", "month", "--dense", "-o",
            "out.csv", "--format", "csv",
        ])
        .unwrap();
        if let Commands::Activity {
            io,
            period,
            dense,
            format,
        } = cli.command
        {
            assert_eq!(period.as_deref(), Some("month"));
            assert!(dense);
            assert_eq!(io.output, Some(PathBuf::from("out.csv")));
            assert_eq!(format, TableFormat::Csv);
        } else {
            panic!("Expected Activity command");
        }
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["postlens", "terms"]).is_err());
        let cli = Cli::try_parse_from(["postlens", "terms", "-i", "a.js", "-n", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Terms { top: Some(5), .. }));
    }
}
