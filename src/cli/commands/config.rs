//! Configuration command implementations

use crate::cli::{ConfigCommands, Output};
use crate::config::{BenchConfig, ConfigOverrides};
use anyhow::Result;

/// Execute config commands
pub async fn execute(cmd: ConfigCommands, config_path: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config_path, output).await,
    }
}

async fn show(config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = BenchConfig::load_with(config_path, &ConfigOverrides::default())?;

    output.verbose(&format!(
        "Merged from defaults{}, user/repo files and WORDBENCH_ environment",
        config_path.map(|p| format!(", {}", p)).unwrap_or_default()
    ));
    // Printed even in quiet mode so it can be piped into a file
    print!("{}", config.to_toml()?);

    Ok(())
}
