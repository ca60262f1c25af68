//! `jdlforge merge`: fold several documents into one, left to right.

use tracing::{debug, instrument};

use crate::{
    cli::MergeArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(files = args.files.len()))]
pub fn execute(args: MergeArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = super::document_service(config);

    let documents = args
        .files
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "loading");
            service
                .load(path)
                .with_cli_context(|| format!("loading {}", path.display()))
        })
        .collect::<CliResult<Vec<_>>>()?;

    let merged = service
        .merge_all(documents)
        .with_cli_context(|| "merging")?;
    super::emit(&merged, &args.write, output)
}
