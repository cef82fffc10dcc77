//! Config command - create or show user configuration

use super::ConfigAction;
use anyhow::Result;
use chared::config::UserConfig;
use chared::store::ModelStore;
use console::style;

pub fn run(action: ConfigAction, config: &UserConfig, store: &ModelStore) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("{} Config at {}", style("✓").green(), style(path.display()).cyan());
        }
        ConfigAction::Show => {
            match UserConfig::user_config_path() {
                Some(path) if path.exists() => println!("# {}", path.display()),
                _ => println!("# no config file; defaults and environment only"),
            }
            print!("{}", toml::to_string_pretty(config)?);
            println!("\n# effective models directory: {}", store.dir().display());
        }
    }
    Ok(())
}
