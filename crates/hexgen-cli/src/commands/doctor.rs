//! `hexgen doctor`: report which registries know about a module.

use tracing::instrument;

use hexgen_core::application::{CheckStatus, DiagnosticReport};

use super::Project;
use crate::{
    cli::{DoctorArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Exits non-zero when any check fails, so the command can gate CI.
#[instrument(skip_all, fields(module = %args.module))]
pub fn execute(
    args: DoctorArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = Project::open(&global, &config)?.diagnostic_service();
    let report = service.diagnose(&args.module, args.entity.as_deref())?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        print_report(&report, &output)?;
    }

    if report.is_healthy() {
        Ok(())
    } else {
        let failures = report.failures();
        Err(CliError::Unhealthy {
            module: report.module,
            failures,
        })
    }
}

fn print_report(report: &DiagnosticReport, output: &OutputManager) -> CliResult<()> {
    if !output.supports_color() {
        // One [PASS]/[FAIL] line per check, stable for scripts.
        for line in report.render_plain().lines() {
            output.print(line)?;
        }
        return Ok(());
    }

    output.header(&format!("Registries for module '{}'", report.module))?;
    let plain = report.render_plain();
    for (check, line) in report.checks.iter().zip(plain.lines()) {
        let text = line
            .trim_start_matches("[PASS] ")
            .trim_start_matches("[FAIL] ");
        match check.status {
            CheckStatus::Pass => output.success(text)?,
            CheckStatus::Fail | CheckStatus::Error(_) => output.failure(text)?,
        }
    }
    Ok(())
}
