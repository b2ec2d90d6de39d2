//! `logsheet config` — Configuration management commands.

use logsheet_config::{AppConfig, DirectoryStore};

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if !AppConfig::config_path().exists() {
                warnings.push("No config file — defaults in use (run `logsheet config init`)".to_string());
            }

            match DirectoryStore::open_default().load() {
                Ok(Some(saved)) if !std::path::Path::new(&saved.directory).is_dir() => {
                    warnings.push(format!("Saved directory does not exist: {}", saved.directory));
                }
                Ok(_) => {}
                Err(e) => warnings.push(format!("Saved directory unreadable: {e}")),
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Mode:      {}", config.insertion_mode);
            println!("   Logsheet:  {}", config.files.logsheet);
            println!("   Updates:   {}", config.files.updates);
            println!("   Output:    {}", config.files.output);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = logsheet_config::AppConfig::config_path();
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }
}
