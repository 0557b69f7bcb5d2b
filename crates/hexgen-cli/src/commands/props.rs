//! `hexgen props`: parse a property specification without generating.

use hexgen_core::{domain::parse_properties, error::HexgenError};

use crate::{cli::PropsArgs, error::CliResult, output::OutputManager};

pub fn execute(args: PropsArgs, output: OutputManager) -> CliResult<()> {
    let properties = parse_properties(&args.spec).map_err(HexgenError::from)?;

    if output.is_json() {
        output.json(&properties)?;
        return Ok(());
    }

    if properties.is_empty() {
        output.info("No properties")?;
        return Ok(());
    }

    let noun = if properties.len() == 1 { "property" } else { "properties" };
    output.header(&format!("{} {noun}", properties.len()))?;
    for p in &properties {
        let bounds = match p.constraints().bounds() {
            Some((min, max)) => format!(
                " {}..{}",
                min.unwrap_or_default(),
                max.unwrap_or_default()
            ),
            None => String::new(),
        };
        let mut flags = Vec::new();
        if p.flags().unique {
            flags.push("unique");
        }
        if p.flags().nullable {
            flags.push("nullable");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        output.print(&format!("  {:<20} {}{bounds}{flags}", p.name(), p.base_type()))?;
    }
    Ok(())
}
