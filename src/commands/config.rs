use crate::HashwatchContext;
use crate::config::Config;
use crate::output;
use anyhow::Result;
use colored::Colorize;

/// Execute config command to get/set configuration values
///
/// # Errors
///
/// Returns an error if:
/// - Failed to set or unset configuration value
/// - Failed to save configuration
pub fn execute(
    ctx: &mut HashwatchContext,
    key: Option<&str>,
    value: Option<String>,
    unset: bool,
    list: bool,
) -> Result<()> {
    let Some(key) = key.filter(|_| !list) else {
        show_all_config(&ctx.config);
        return Ok(());
    };

    if unset {
        ctx.config.unset(key)?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Unset {key}"));
    } else if let Some(val) = value {
        ctx.config.set(key, val.clone())?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Set {key} = {val}"));
    } else if let Some(val) = ctx.config.get(key) {
        println!("{val}");
    } else {
        return Err(anyhow::anyhow!("Unknown configuration key: {key}"));
    }

    Ok(())
}

/// Show all configuration values grouped by section
fn show_all_config(config: &Config) {
    let mut current_section = "";
    for key in Config::keys() {
        let Some((section, name)) = key.split_once('.') else {
            continue;
        };
        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("{}", format!("[{section}]").bold());
            current_section = section;
        }
        println!("  {name} = {}", config.get(key).unwrap_or_default());
    }
}
