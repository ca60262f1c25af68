//! `jdlforge validate`: check relationships and cross references.
//!
//! Repairs and consistency issues are reported as warnings; with `--strict`
//! (or `validation.strict = true`) they fail the command like rule errors do.

use serde_json::json;
use tracing::instrument;

use jdlforge_core::application::ValidationReport;

use crate::{
    cli::ValidateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: ValidateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = super::document_service(config);
    let jdl = service
        .load(&args.file)
        .with_cli_context(|| format!("loading {}", args.file.display()))?;
    let strict = args.strict || config.validation.strict;
    let report = service
        .validate(&jdl, strict)
        .with_cli_context(|| "validating")?;

    if output.is_json() {
        output.json(&report_json(&report))?;
    } else {
        print_report(&report, output)?;
    }

    report.into_result().with_cli_context(|| "validating")?;
    Ok(())
}

fn print_report(report: &ValidationReport, output: &OutputManager) -> CliResult<()> {
    for repair in &report.repairs {
        output.warning(&format!("repaired {repair}"))?;
    }
    for issue in &report.consistency {
        output.warning(&issue.to_string())?;
    }
    for error in &report.errors {
        output.error(&error.to_string())?;
    }
    if report.is_valid() {
        output.success(&format!(
            "{} entities, {} relationships: valid",
            report.document.entity_count(),
            report.document.relationship_count()
        ))?;
    }
    Ok(())
}

fn report_json(report: &ValidationReport) -> serde_json::Value {
    let strings = |items: Vec<String>| serde_json::Value::from(items);
    json!({
        "valid": report.is_valid(),
        "strict": report.strict,
        "errors": strings(report.errors.iter().map(ToString::to_string).collect()),
        "repairs": strings(report.repairs.iter().map(ToString::to_string).collect()),
        "consistency": strings(report.consistency.iter().map(ToString::to_string).collect()),
    })
}
