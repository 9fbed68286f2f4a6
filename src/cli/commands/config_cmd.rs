//! Configuration display command.

/// Print the resolved settings as a TOML config file.
pub fn cmd_config_show(settings: &crate::config::Settings) -> anyhow::Result<()> {
    let toml = toml::to_string_pretty(&settings.to_config())?;
    print!("{}", toml);
    Ok(())
}
