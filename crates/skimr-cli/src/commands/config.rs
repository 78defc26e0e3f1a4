use anyhow::Result;

use skimr_core::AppConfig;

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote configuration to {}", path.display());

    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    let mut redacted = config.clone();
    if redacted.ai.openai_api_key.is_some() {
        redacted.ai.openai_api_key = Some("<redacted>".to_string());
    }
    if redacted.ai.claude_api_key.is_some() {
        redacted.ai.claude_api_key = Some("<redacted>".to_string());
    }

    print!("{}", redacted.to_toml()?);
    Ok(())
}
