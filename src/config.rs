use crate::error::{PrReportError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Credential file contents, read from `$XDG_CONFIG_HOME/pr-report/config.toml`.
/// The file is optional; every field may be absent.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolved credentials for the GitHub client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Token(String),
    Basic { username: String, password: String },
}

/// Applies the credential precedence: token flag, then username/password
/// flags, then file token, then file username/password.
pub fn resolve_credentials(
    token_flag: Option<&str>,
    username_flag: Option<&str>,
    password_flag: Option<&str>,
    config: &Config,
) -> Result<Credentials> {
    if let Some(token) = token_flag {
        return Ok(Credentials::Token(token.to_string()));
    }

    match (username_flag, password_flag) {
        (Some(username), Some(password)) => {
            return Ok(Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(PrReportError::Config(
                "--username and --password must be supplied together".into(),
            ));
        }
        (None, None) => {}
    }

    if let Some(ref token) = config.auth.token {
        return Ok(Credentials::Token(token.clone()));
    }

    if let (Some(username), Some(password)) = (&config.auth.username, &config.auth.password) {
        return Ok(Credentials::Basic {
            username: username.clone(),
            password: password.clone(),
        });
    }

    Err(PrReportError::MissingCredentials)
}

pub fn config_path() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("pr-report").join("config.toml");
        return Ok(path);
    }

    let home = dirs::home_dir()
        .ok_or_else(|| PrReportError::Config("Cannot find home directory".into()))?;
    Ok(home.join(".config").join("pr-report").join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}
