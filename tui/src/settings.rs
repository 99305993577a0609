//! Settings of the driver, optionally read from a file.

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use torus_life_lib::{Backend, Config};

/// Errors when reading a settings file.
#[derive(Debug, Display, Error)]
pub(crate) enum SettingsError {
    /// Cannot read settings file {0:?}: {1}.
    Io(PathBuf, #[source] io::Error),
    /// Unknown settings format {0:?}. Use `.toml`, `.json`, `.yaml` or `.yml`.
    UnknownFormat(PathBuf),
    /// Invalid TOML settings: {0}
    Toml(#[from] toml::de::Error),
    /// Invalid JSON settings: {0}
    Json(#[from] serde_json::Error),
    /// Invalid YAML settings: {0}
    Yaml(#[from] serde_yaml::Error),
}

/// Formats of settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Chooses the format by the extension of the file.
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Settings of the driver.
///
/// Missing fields take their default values.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Delay between two generations when playing, in milliseconds.
    pub(crate) delay_ms: u64,
    /// Whether to print the world after every generation.
    pub(crate) print: bool,
    /// Where named saves go.
    pub(crate) save_dir: PathBuf,
    pub(crate) backend: Backend,
    pub(crate) threads: Option<usize>,
    pub(crate) fallback_to_scalar: bool,
    pub(crate) max_randomize_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let config = Config::default();
        Settings {
            delay_ms: 200,
            print: true,
            save_dir: PathBuf::from("configurations"),
            backend: config.backend,
            threads: config.threads,
            fallback_to_scalar: config.fallback_to_scalar,
            max_randomize_attempts: config.max_randomize_attempts,
        }
    }
}

impl Settings {
    /// Reads settings from a file. The format is chosen by the extension.
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let format =
            Format::from_path(path).ok_or_else(|| SettingsError::UnknownFormat(path.into()))?;
        let text = fs::read_to_string(path).map_err(|e| SettingsError::Io(path.into(), e))?;
        Settings::parse(&text, format)
    }

    /// Parses settings in the given format.
    pub(crate) fn parse(text: &str, format: Format) -> Result<Self, SettingsError> {
        let settings = match format {
            Format::Toml => toml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(settings)
    }

    pub(crate) fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The world configuration with these settings and the given size.
    pub(crate) fn config(&self, height: isize, width: isize) -> Config {
        Config::new(height, width)
            .set_backend(self.backend)
            .set_threads(self.threads)
            .set_fallback_to_scalar(self.fallback_to_scalar)
            .set_max_randomize_attempts(self.max_randomize_attempts)
    }

    /// Where a save named `name` goes.
    pub(crate) fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(format!("{}.txt", name))
    }

    /// Resolves a world file to load.
    ///
    /// A path that does not exist is looked up as a save name in
    /// the save directory. If that does not exist either, the path is
    /// returned unchanged, so that the error mentions it.
    pub(crate) fn resolve(&self, path: &Path) -> PathBuf {
        if !path.exists() {
            if let Some(name) = path.to_str() {
                let saved = self.save_path(name);
                if saved.exists() {
                    return saved;
                }
            }
        }
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn formats() {
        assert_eq!(Format::from_path(Path::new("a.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("settings")), None);
        assert_eq!(Format::from_path(Path::new("a.ini")), None);
    }

    #[test]
    fn parse_toml() -> Result<(), Box<dyn Error>> {
        let settings = Settings::parse(
            "delay_ms = 50\nbackend = \"parallel\"\nthreads = 2\n",
            Format::Toml,
        )?;
        assert_eq!(settings.delay_ms, 50);
        assert_eq!(settings.backend, Backend::Parallel);
        assert_eq!(settings.threads, Some(2));
        assert!(settings.print);
        assert_eq!(settings.save_dir, PathBuf::from("configurations"));
        Ok(())
    }

    #[test]
    fn parse_json() -> Result<(), Box<dyn Error>> {
        let settings = Settings::parse(
            r#"{"print": false, "backend": "vectorized", "save_dir": "saves"}"#,
            Format::Json,
        )?;
        assert!(!settings.print);
        assert_eq!(settings.backend, Backend::Vectorized);
        assert_eq!(settings.save_path("x"), Path::new("saves").join("x.txt"));
        Ok(())
    }

    #[test]
    fn parse_yaml() -> Result<(), Box<dyn Error>> {
        let settings = Settings::parse(
            "fallback_to_scalar: true\nmax_randomize_attempts: 3\n",
            Format::Yaml,
        )?;
        assert!(settings.fallback_to_scalar);
        let config = settings.config(5, 7);
        assert_eq!((config.height, config.width), (5, 7));
        assert_eq!(config.max_randomize_attempts, 3);
        assert!(config.fallback_to_scalar);
        Ok(())
    }

    #[test]
    fn invalid_settings() {
        assert!(Settings::parse("backend = \"gpu\"", Format::Toml).is_err());
        assert!(Settings::parse("{\"delay_ms\": -1}", Format::Json).is_err());
        assert!(matches!(
            Settings::load("settings.ini"),
            Err(SettingsError::UnknownFormat(_))
        ));
    }

    #[test]
    fn resolve_saved_names() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let settings = Settings {
            save_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        fs::write(settings.save_path("blinker"), "height = 3\nwidth = 3\nstart =\n")?;

        assert_eq!(
            settings.resolve(Path::new("blinker")),
            dir.path().join("blinker.txt")
        );
        assert_eq!(
            settings.resolve(Path::new("missing")),
            PathBuf::from("missing")
        );
        Ok(())
    }
}
