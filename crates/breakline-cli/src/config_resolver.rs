//! Locates the `breakline.toml` that applies to a checked path.
//!
//! Priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `breakline.toml` or `.breakline.toml` in the project directory or the
//!    nearest ancestor that has one
//! 3. `~/.breakline/config.toml` (global fallback)
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.breakline/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["breakline.toml", ".breakline.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Resolution with the global directory passed in.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // 1. Explicit path from --config flag
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // 2. Project-level config, nearest directory first
    if let Some(candidate) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    // 3. Global fallback
    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Looks for a project config in `start` and then in each ancestor.
///
/// A file path starts the search at its parent directory.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = if start.is_file() {
        start.parent().unwrap_or(start)
    } else {
        start
    };
    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Returns the global config directory path.
///
/// `$BREAKLINE_CONFIG_DIR` when set, else `~/.breakline/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("BREAKLINE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".breakline"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();

        // Even when project config exists, explicit wins
        let project = tmp.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("breakline.toml"), "").unwrap();

        let result = resolve_inner(&project, Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn project_breakline_toml_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("breakline.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("breakline.toml"))
        );
    }

    #[test]
    fn breakline_toml_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("breakline.toml"), "").unwrap();
        fs::write(tmp.path().join(".breakline.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("breakline.toml"))
        );
    }

    #[test]
    fn project_config_found_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("breakline.toml"), "").unwrap();
        let nested = tmp.path().join("packages/web/src");
        fs::create_dir_all(&nested).unwrap();

        let result = resolve_inner(&nested, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("breakline.toml"))
        );
    }

    #[test]
    fn nearest_project_config_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("breakline.toml"), "").unwrap();
        let package = tmp.path().join("packages/web");
        fs::create_dir_all(&package).unwrap();
        fs::write(package.join(".breakline.toml"), "").unwrap();

        let result = resolve_inner(&package, None, None);
        assert_eq!(result, ConfigSource::Project(package.join(".breakline.toml")));
    }

    #[test]
    fn file_path_searches_from_its_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("breakline.toml"), "").unwrap();
        let file = tmp.path().join("app.js");
        fs::write(&file, "").unwrap();

        let result = resolve_inner(&file, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("breakline.toml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn no_config_anywhere_returns_default() {
        let project = TempDir::new().unwrap();
        let result = resolve_inner(project.path(), None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn ancestor_project_config_beats_global() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".breakline.toml"), "").unwrap();
        let nested = project.path().join("src/components");
        fs::create_dir_all(&nested).unwrap();

        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(&nested, None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Project(project.path().join(".breakline.toml"))
        );
    }
}
