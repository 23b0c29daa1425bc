//! Profile metadata read from a `profile.config` file.
//!
//! The file holds one `key=value` pair per line. The key is the word run
//! immediately before the first `=` that follows a word character; the value
//! is everything after that `=`. Unknown keys are warned about and ignored,
//! as are lines without a key.
//!
//! ```text
//! technologyName=Shop Language
//! version=1.2
//! profileDescription=Modeling language for shop floors.
//! url=https://example.com/shop
//! support=https://example.com/shop/support
//! profileLogoRelPath=assets/logo.bmp
//! profileIconRelPath=assets/icon.bmp
//! ```

use std::{fs, io, path::Path};

use log::{info, warn};

/// File name looked up next to the model file.
pub const PROFILE_CONFIG_FILE_NAME: &str = "profile.config";

/// Description used when none is configured.
pub const DEFAULT_DESCRIPTION: &str = "My created MDG Technology.";

/// Profile metadata overriding the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileConfig {
    logo_rel_path: Option<String>,
    icon_rel_path: Option<String>,
    technology_name: Option<String>,
    version: Option<f64>,
    url: Option<String>,
    support: Option<String>,
    description: Option<String>,
}

impl ProfileConfig {
    /// Parse the contents of a `profile.config` file.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            config.parse_line(line);
        }
        config
    }

    /// Read and parse a `profile.config` file.
    ///
    /// A missing or unreadable file is not an error: defaults are used and
    /// a warning is logged.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                info!(path = path.display().to_string(); "Loading profile configuration");
                Self::parse(&text)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = path.display().to_string(); "No profile configuration found, using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = path.display().to_string(), err = err.to_string();
                    "Error reading the profile configuration, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Read the `profile.config` that sits next to `model_path`.
    pub fn discover(model_path: &Path) -> Self {
        let dir = model_path.parent().unwrap_or_else(|| Path::new(""));
        Self::load(&dir.join(PROFILE_CONFIG_FILE_NAME))
    }

    fn parse_line(&mut self, line: &str) {
        let Some((key, value)) = split_key_value(line) else {
            if !line.trim().is_empty() {
                warn!(line; "Invalid profile configuration line");
            }
            return;
        };

        let value = value.to_string();
        match key {
            "profileLogoRelPath" => self.logo_rel_path = Some(value),
            "profileIconRelPath" => self.icon_rel_path = Some(value),
            "technologyName" => self.technology_name = Some(value),
            "version" => match value.trim().parse::<f64>() {
                Ok(version) => self.version = Some(version),
                Err(_) => warn!(value; "Invalid version format"),
            },
            "url" => self.url = Some(value),
            "support" => self.support = Some(value),
            "profileDescription" => self.description = Some(value),
            _ => warn!(key; "Unknown profile configuration key"),
        }
    }

    /// Relative path of the profile logo bitmap.
    pub fn logo_rel_path(&self) -> Option<&str> {
        non_empty(&self.logo_rel_path)
    }

    /// Relative path of the profile icon bitmap.
    pub fn icon_rel_path(&self) -> Option<&str> {
        non_empty(&self.icon_rel_path)
    }

    /// Name overriding the profile package name everywhere.
    pub fn technology_name(&self) -> Option<&str> {
        non_empty(&self.technology_name)
    }

    /// Configured version; zero counts as unset.
    pub fn version(&self) -> Option<f64> {
        self.version.filter(|version| *version != 0.0)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn support(&self) -> Option<&str> {
        non_empty(&self.support)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// Version as written into the document (`1`, `1.5`).
    pub fn version_text(&self) -> String {
        self.version().unwrap_or(1.0).to_string()
    }

    /// Log the effective configuration.
    pub fn log_summary(&self) {
        info!(
            logo = self.logo_rel_path().unwrap_or_default(),
            icon = self.icon_rel_path().unwrap_or_default(),
            technology_name = self.technology_name().unwrap_or_default(),
            version = self.version_text(),
            url = self.url().unwrap_or_default(),
            support = self.support().unwrap_or_default(),
            description = self.description().unwrap_or(DEFAULT_DESCRIPTION);
            "Configuration for creating the profile"
        );
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Find the leftmost `word=` and split around it.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let (eq, _) = line.char_indices().find(|&(index, c)| {
        c == '=' && line[..index].chars().next_back().is_some_and(is_word)
    })?;

    let key_start = line[..eq]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word(c))
        .last()
        .map_or(eq, |(index, _)| index);

    Some((&line[key_start..eq], &line[eq + 1..]))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_all_keys() {
        let config = ProfileConfig::parse(
            "technologyName=Shop Language\n\
             version=1.5\n\
             profileDescription=Shops.\n\
             url=https://example.com\n\
             support=https://example.com/help\n\
             profileLogoRelPath=img/logo.bmp\n\
             profileIconRelPath=img/icon.bmp\n",
        );
        assert_eq!(config.technology_name(), Some("Shop Language"));
        assert_eq!(config.version(), Some(1.5));
        assert_eq!(config.version_text(), "1.5");
        assert_eq!(config.description(), Some("Shops."));
        assert_eq!(config.url(), Some("https://example.com"));
        assert_eq!(config.support(), Some("https://example.com/help"));
        assert_eq!(config.logo_rel_path(), Some("img/logo.bmp"));
        assert_eq!(config.icon_rel_path(), Some("img/icon.bmp"));
    }

    #[test]
    fn test_defaults() {
        let config = ProfileConfig::parse("");
        assert_eq!(config, ProfileConfig::default());
        assert_eq!(config.version_text(), "1");
        assert!(config.technology_name().is_none());
    }

    #[test]
    fn test_invalid_version_is_ignored() {
        let config = ProfileConfig::parse("version=one\nurl=x");
        assert!(config.version().is_none());
        assert_eq!(config.url(), Some("x"));
    }

    #[test]
    fn test_zero_version_counts_as_unset() {
        assert_eq!(ProfileConfig::parse("version=0").version_text(), "1");
    }

    #[test]
    fn test_unknown_and_malformed_lines_are_ignored() {
        let config = ProfileConfig::parse("colour=red\njust text\n\n=novalue\nurl=u");
        assert_eq!(config.url(), Some("u"));
        assert!(config.technology_name().is_none());
    }

    #[test]
    fn test_split_key_value() {
        assert_eq!(split_key_value("url=a=b"), Some(("url", "a=b")));
        assert_eq!(split_key_value("my key=value"), Some(("key", "value")));
        assert_eq!(split_key_value("  version=2"), Some(("version", "2")));
        assert_eq!(split_key_value("=x a=b"), Some(("a", "b")));
        assert_eq!(split_key_value("no pair"), None);
        assert_eq!(split_key_value("= lonely"), None);
    }

    #[test]
    fn test_discover_next_to_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join(PROFILE_CONFIG_FILE_NAME)).unwrap();
        writeln!(file, "technologyName=Found").unwrap();

        let config = ProfileConfig::discover(&dir.path().join("model.toml"));
        assert_eq!(config.technology_name(), Some("Found"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProfileConfig::load(&dir.path().join("absent.config"));
        assert_eq!(config, ProfileConfig::default());
    }
}
