//! Reading and writing `~/.config/campusdesk/config.toml`.
//!
//! The file holds the `[api]`, `[list]`, `[theme]` and `[keybindings]`
//! sections of [`AppConfig`]. Every section is optional.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::{debug, info};

use crate::config::AppConfig;

const APP_DIR: &str = "campusdesk";
const FILE_NAME: &str = "config.toml";

/// Location of the console's config file, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
}

/// Load the console configuration, falling back to built-in defaults when
/// there is no config file.
pub fn load() -> Result<AppConfig> {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            debug!("no config directory on this platform, using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no campusdesk config, using defaults");
        return Ok(AppConfig::default());
    }

    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading campusdesk config {}", path.display()))?;
    let config: AppConfig = toml::from_str(&text).wrap_err_with(|| {
        format!(
            "{} is not a valid campusdesk config (expected [api], [list], [theme] or [keybindings])",
            path.display()
        )
    })?;
    debug!(path = %path.display(), base_url = %config.api.base_url, "loaded config");
    Ok(config)
}

/// Remember the chosen colour theme for the next session.
pub fn save_theme(theme_name: &str) -> Result<()> {
    match config_path() {
        Some(path) => save_theme_to(&path, theme_name),
        None => Ok(()),
    }
}

/// Rewrite only `[theme] name` in the file at `path`.
///
/// The other sections are reloaded from disk first, so command-line
/// overrides of the running session never end up in the file.
pub fn save_theme_to(path: &Path, theme_name: &str) -> Result<()> {
    let mut config = load_from(path)?;
    config.theme.name = theme_name.to_string();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating config directory {}", dir.display()))?;
    }
    let text = toml::to_string_pretty(&config).wrap_err("serialising campusdesk config")?;
    fs::write(path, text).wrap_err_with(|| format!("writing campusdesk config {}", path.display()))?;
    info!(path = %path.display(), theme = theme_name, "saved theme");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("campusdesk-config-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join(FILE_NAME)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_from(&scratch("missing")).unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.theme.name, "Catppuccin Mocha");
    }

    #[test]
    fn test_reads_api_and_list_sections() {
        let path = scratch("read");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "[api]\nbase_url = \"https://admin.example.edu/api\"\ntimeout_secs = 5\n\n[list]\ndefault_page_size = 50\n",
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://admin.example.edu/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.list.page_size().get(), 50);
    }

    #[test]
    fn test_malformed_file_names_path_and_sections() {
        let path = scratch("broken");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = load_from(&path).unwrap_err().to_string();
        assert!(err.contains("config.toml"));
        assert!(err.contains("[keybindings]"));
    }

    #[test]
    fn test_saving_theme_keeps_other_sections() {
        let path = scratch("theme");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[api]\ntimeout_secs = 30\n").unwrap();

        save_theme_to(&path, "Catppuccin Latte").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.theme.name, "Catppuccin Latte");
        assert_eq!(config.api.timeout_secs, 30);
    }
}
