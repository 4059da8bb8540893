pub mod activity;
pub mod features;
pub mod report;
pub mod summarize;
pub mod terms;
pub mod version;

use crate::cli::IoArgs;
use postlens_salience::Analysis;
use std::path::Path;

/// Load the config and archive named by `io` and run the pipeline
fn analyze(io: &IoArgs) -> anyhow::Result<Analysis> {
    let config = postlens_io::load_config(io.config.as_deref())?;
    let records = postlens_io::load_archive(&io.input)?;
    Ok(Analysis::run(records, config))
}

/// Write `text` to `output`, or print it when no output file was given
fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            postlens_io::atomic_write(path, text.as_bytes())?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => print!("{}", text),
    }
    Ok(())
}
