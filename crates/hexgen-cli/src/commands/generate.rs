//! `hexgen entity|command|query|controller`.
//!
//! Responsibility: translate CLI arguments into a `GenerationRequest`, call
//! the core generation service, and display the report. No business logic
//! lives here.

use tracing::{info, instrument};

use hexgen_core::{
    application::{FileStatus, GenerationReport, RegistrationStatus},
    domain::{GenerationOptions, GenerationRequest, GeneratorKind},
};

use super::Project;
use crate::{
    cli::{ControllerArgs, EntityArgs, GenerateFlags, GlobalArgs, MessageArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(module = %args.module, entity = %args.name))]
pub fn entity(
    args: EntityArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let properties = if args.interactive {
        Some(prompt_properties()?)
    } else {
        args.properties
    };

    let mut request = GenerationRequest::new(args.module, args.name)
        .with_options(options(args.flags, &config));
    request.properties = properties;
    run(GeneratorKind::Entity, request, &global, &config, &output)
}

/// Commands and queries share their arguments.
#[instrument(skip_all, fields(generator = %generator, module = %args.module, name = %args.name))]
pub fn message(
    generator: GeneratorKind,
    args: MessageArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut request = GenerationRequest::new(args.module, args.name)
        .with_options(options(args.flags, &config));
    if !args.entities.is_empty() {
        request = request.with_entities(args.entities);
    }
    run(generator, request, &global, &config, &output)
}

#[instrument(skip_all, fields(module = %args.module, controller = %args.name))]
pub fn controller(
    args: ControllerArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = GenerationRequest::new(args.module, args.name)
        .with_options(options(args.flags, &config));
    run(GeneratorKind::Controller, request, &global, &config, &output)
}

fn options(flags: GenerateFlags, config: &AppConfig) -> GenerationOptions {
    GenerationOptions {
        register: flags.register || config.generation.auto_register,
        force: flags.force,
        dry_run: flags.dry_run,
    }
}

fn run(
    generator: GeneratorKind,
    request: GenerationRequest,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let project = Project::open(global, config)?;
    info!(root = %project.root().display(), "Project opened");
    let service = project.generation_service()?;

    let report = service.generate(generator, &request)?;
    print_report(&report, output)
}

fn print_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    let prefix = if report.dry_run { "Dry run: " } else { "" };
    output.header(&format!(
        "{prefix}{} '{}' in module '{}'",
        report.generator, report.name, report.module
    ))?;

    for file in &report.files {
        match file.status {
            FileStatus::Created => output.success(&format!("created {}", file.path))?,
            FileStatus::Overwritten => output.warning(&format!("overwrote {}", file.path))?,
            FileStatus::Planned => output.info(&format!("would write {}", file.path))?,
        }
    }

    if !report.properties.is_empty() {
        let props: Vec<String> = report.properties.iter().map(ToString::to_string).collect();
        output.print(&format!("  properties: {}", props.join(", ")))?;
    }

    if let Some(c) = &report.classification {
        output.print(&format!(
            "  intent: {}, entities: [{}]",
            c.intent(),
            c.inferred_entities().join(", ")
        ))?;
    }

    for reg in &report.registrations {
        let what = format!("{} '{}' in {}", reg.kind.label(), reg.key, reg.path);
        match reg.status {
            RegistrationStatus::Added => output.success(&format!("registered {what}"))?,
            RegistrationStatus::AlreadyPresent => {
                output.info(&format!("already registered: {what}"))?
            }
            RegistrationStatus::Planned => output.info(&format!("would register {what}"))?,
        }
    }

    Ok(())
}

/// Ask for properties one line at a time until an empty line.
///
/// Each line is validated as entered; a line may hold several clauses.
#[cfg(feature = "interactive")]
fn prompt_properties() -> CliResult<String> {
    use dialoguer::{Input, theme::ColorfulTheme};
    use hexgen_core::domain::parse_properties;

    use crate::error::CliError;

    let theme = ColorfulTheme::default();
    let mut clauses: Vec<String> = Vec::new();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt(format!(
                "Property #{} (name:type(min,max):options, empty to finish)",
                clauses.len() + 1
            ))
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() {
                    return Ok(());
                }
                parse_properties(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| CliError::IoError {
                message: "cannot read property from the terminal".into(),
                source: std::io::Error::other(e),
            })?;

        let line = line.trim();
        if line.is_empty() {
            break;
        }
        clauses.push(line.to_string());
    }
    Ok(clauses.join(","))
}

#[cfg(not(feature = "interactive"))]
fn prompt_properties() -> CliResult<String> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
