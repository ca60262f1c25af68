//! `jdlforge print`: build one document and render it.

use tracing::instrument;

use crate::{
    cli::{PrintArgs, WriteArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: PrintArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let jdl = super::document_service(config)
        .load(&args.file)
        .with_cli_context(|| format!("loading {}", args.file.display()))?;
    super::emit(&jdl, &WriteArgs::default(), output)
}
