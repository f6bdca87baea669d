/// Console configuration
use crate::error::{ConfigError, Result};
use insyd_client::ClientConfig;
use insyd_core::{Session, UserId, DEFAULT_USER_ID};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "insyd.toml";

/// Log file used by the terminal UI when none is configured.
pub const DEFAULT_TUI_LOG_FILE: &str = "insyd.log";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default)]
    pub profile: Profile,

    /// Takes precedence over the profile's base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LogSettings {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Which deployment of the notifications API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Local development proxy
    Development,
    /// Deployed origin
    #[default]
    Production,
}

impl Profile {
    pub fn base_url(&self) -> &'static str {
        match self {
            Profile::Development => "http://localhost:3000/api",
            Profile::Production => "https://api-node-insyd.onrender.com/api",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

/// Values given on the command line, applied over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub profile: Option<Profile>,
}

impl AppConfig {
    /// Load configuration from file, environment, and command line
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(overrides, None)
    }

    /// Like [`AppConfig::load`], but reads `INSYD_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        overrides: &Overrides,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        // An explicit file must exist; the default one is optional
        match &overrides.config_file {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.as_path()));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // INSYD_API__BASE_URL -> api.base_url
        settings = settings.add_source(
            config::Environment::with_prefix("INSYD")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        settings = settings
            .set_override_option("api.base_url", overrides.base_url.clone())?
            .set_override_option(
                "api.profile",
                overrides.profile.map(|p| p.as_str().to_string()),
            )?;

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.session.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "session.user_id must not be empty (set INSYD_SESSION__USER_ID)".to_string(),
            ));
        }

        if let Some(url) = &self.api.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "api.base_url must start with http:// or https://, got '{}'",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Effective API base URL
    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.api.profile.base_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url()).with_timeout(self.timeout())
    }

    pub fn session(&self) -> Session {
        Session::new(UserId::new(self.session.user_id.trim()))
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        profile: Profile::default(),
        base_url: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_session() -> SessionSettings {
    SessionSettings {
        user_id: default_user_id(),
    }
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
            log: LogSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.profile, Profile::Production);
        assert_eq!(config.base_url(), "https://api-node-insyd.onrender.com/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.session().user_id().as_str(), "user123");
        assert!(config.log.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [api]
            profile = "development"
            timeout_secs = 3

            [session]
            user_id = "alice"

            [log]
            file = "/tmp/insyd-test.log"
            "#,
        );

        let overrides = Overrides {
            config_file: Some(file.path().to_path_buf()),
            ..Overrides::default()
        };
        let config = AppConfig::load_with_env(&overrides, no_env()).unwrap();

        assert_eq!(config.api.profile, Profile::Development);
        assert_eq!(config.base_url(), "http://localhost:3000/api");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.session.user_id, "alice");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/insyd-test.log")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let overrides = Overrides {
            config_file: Some(PathBuf::from("/definitely/not/here/insyd.toml")),
            ..Overrides::default()
        };
        let result = AppConfig::load_with_env(&overrides, no_env());
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config(
            r#"
            [api]
            timeout_secs = 3
            "#,
        );
        let overrides = Overrides {
            config_file: Some(file.path().to_path_buf()),
            ..Overrides::default()
        };

        let config = AppConfig::load_with_env(
            &overrides,
            env(&[
                ("INSYD_API__TIMEOUT_SECS", "7"),
                ("INSYD_API__BASE_URL", "http://10.0.0.5:8080/api"),
                ("INSYD_SESSION__USER_ID", "bob"),
            ]),
        )
        .unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(7));
        assert_eq!(config.base_url(), "http://10.0.0.5:8080/api");
        assert_eq!(config.session.user_id, "bob");
    }

    #[test]
    fn test_numeric_looking_user_id_stays_a_string() {
        let config = AppConfig::load_with_env(
            &Overrides::default(),
            env(&[
                ("INSYD_SESSION__USER_ID", "007"),
                ("INSYD_API__TIMEOUT_SECS", "15"),
            ]),
        )
        .unwrap();

        assert_eq!(config.session.user_id, "007");
        assert_eq!(config.session().user_id().as_str(), "007");
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_command_line_wins() {
        let overrides = Overrides {
            config_file: None,
            base_url: Some("http://127.0.0.1:9999/api".to_string()),
            profile: Some(Profile::Development),
        };

        let config = AppConfig::load_with_env(
            &overrides,
            env(&[("INSYD_API__BASE_URL", "http://ignored/api")]),
        )
        .unwrap();

        assert_eq!(config.api.profile, Profile::Development);
        assert_eq!(config.base_url(), "http://127.0.0.1:9999/api");
    }

    #[test]
    fn test_profile_from_command_line_without_base_url() {
        let overrides = Overrides {
            profile: Some(Profile::Development),
            ..Overrides::default()
        };
        let config = AppConfig::load_with_env(&overrides, no_env()).unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_blank_user() {
        let mut config = AppConfig::default();
        config.session.user_id = "   ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_schemeless_url() {
        let mut config = AppConfig::default();
        config.api.base_url = Some("localhost:3000".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("dev".parse::<Profile>().unwrap(), Profile::Development);
        assert_eq!("Production".parse::<Profile>().unwrap(), Profile::Production);
        assert!(matches!(
            "staging".parse::<Profile>(),
            Err(ConfigError::UnknownProfile(_))
        ));
    }
}
