use anyhow::Result;
use encarte_config::Config;
use std::path::PathBuf;

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands, config: &Config, explicit: Option<PathBuf>) -> Result<()> {
    match cmd {
        ConfigCommands::Path => {
            let path = explicit.unwrap_or_else(Config::config_path);
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
    }

    Ok(())
}
