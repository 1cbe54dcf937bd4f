use anyhow::{Result, bail};
use restomod_config::Config;

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands) -> Result<()> {
    let path = Config::config_path();
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config already exists at {}. Use --force to overwrite",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            println!("✓ Wrote default config to {}", path.display());
            Ok(())
        }
    }
}
