use std::path::PathBuf;

use anyhow::Result;
use daylog_core::config::DaylogConfig;
use daylog_core::storage::FileStorage;
use owo_colors::OwoColorize;

pub fn run(mut config: DaylogConfig, data_dir: Option<PathBuf>) -> Result<()> {
    let config_path = DaylogConfig::config_path()?;

    if let Some(dir) = data_dir {
        config.data_dir = dir;
        config.save(&config_path)?;
        println!("{}", "Data directory updated".green());
    }

    let storage = FileStorage::new(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", storage.dir().display());
    println!("  Log file:   {}", storage.path_for(&config.storage_key).display());
    println!("  Export to:  {}", config.export_file);

    Ok(())
}
