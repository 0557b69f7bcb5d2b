//! `hexgen init`: write a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const HEADER: &str = "\
# hexgen configuration
#
# Every key can be overridden from the environment:
#   HEXGEN_<SECTION>__<KEY>, e.g. HEXGEN_GENERATION__AUTO_REGISTER=true
# Set a [registries] path to \"\" to leave that registry unconfigured.

";

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(args.global)?;

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let body = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(&config_path, format!("{HEADER}{body}"))
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}

fn target_path(global: bool) -> CliResult<PathBuf> {
    if !global {
        return Ok(PathBuf::from(LOCAL_CONFIG_FILE));
    }
    AppConfig::global_config_path().ok_or_else(|| CliError::ConfigError {
        message: "no user configuration directory on this platform".into(),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_target_is_hexgen_toml() {
        assert_eq!(target_path(false).unwrap(), PathBuf::from("hexgen.toml"));
    }

    #[test]
    fn written_defaults_load_back() {
        let body = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let text = format!("{HEADER}{body}");
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.layout(), AppConfig::default().layout());
        assert_eq!(parsed.registries.route_declaration, "config/routes.yaml");
    }
}
