//! `jdlforge export`: turn a generated application's entity files into JDL.

use tracing::{info, instrument};

use jdlforge_adapters::LocalEntityConfigStore;
use jdlforge_core::application::ImportService;

use crate::{
    cli::ExportArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(args: ExportArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    if !args.dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a directory", args.dir.display()),
        });
    }

    let store = LocalEntityConfigStore::new(&args.dir).with_entity_dir(&config.defaults.config_dir);
    let entity_dir = store.entity_dir();
    let jdl = ImportService::new(Box::new(store))
        .import()
        .with_cli_context(|| format!("importing {}", args.dir.display()))?;

    if jdl.entity_count() == 0 {
        output.warning(&format!("No entities found in {}", entity_dir.display()))?;
    }
    info!(entities = jdl.entity_count(), "exported");

    super::emit(&jdl, &args.write, output)
}
