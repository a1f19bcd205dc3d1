//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_CAPTCHA_TIMEOUT_SECONDS, DEFAULT_MAIL_TIMEOUT_SECONDS, DEFAULT_OWNER_NAME, DEFAULT_RESUME_FILENAME,
    DEFAULT_RESUME_PATH, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DOWNLOAD_LINK_PATH,
    LEGACY_DEFAULT_SECRET, RECAPTCHA_VERIFY_URL,
};
use crate::error::AppError;

/// Unprefixed variable names still honoured by the loader, mapped onto config keys.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("JWT_SECRET", "token.secret"),
    ("EMAIL_USER", "mail.username"),
    ("EMAIL_PASS", "mail.password"),
    ("FRONTEND_URL", "links.base_url"),
    ("RECAPTCHA_SECRET_KEY", "captcha.secret_key"),
    ("PORT", "app.port"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub log: LogSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    pub token: TokenSettings,
    pub mail: MailSettings,
    pub links: LinkSettings,
    pub resume: ResumeSettings,
    pub captcha: CaptchaSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsSettings {
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenSettings {
    pub secret: String,
    /// Reject a link after its first successful download.
    pub single_use: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub sender: Option<String>,
    /// Signature used in outgoing mail.
    pub owner_name: String,
    /// Recipient of contact form notifications.
    pub owner_address: Option<String>,
    pub timeout_seconds: u64,
}

impl MailSettings {
    pub fn sender_address(&self) -> &str {
        self.sender.as_deref().unwrap_or(&self.username)
    }

    pub fn owner_address(&self) -> &str {
        self.owner_address.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LinkSettings {
    /// Public URL of the frontend; links point at its download page.
    pub base_url: String,
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResumeSettings {
    pub path: String,
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaptchaSettings {
    pub secret_key: String,
    pub verify_url: String,
    pub timeout_seconds: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            );
        let builder = apply_legacy_env(builder, |name| std::env::var(name).ok())?;
        Self::from_builder(builder)
    }

    /// Seed a builder with every optional setting.
    pub fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 3001)?
            .set_default("app.name", "folio-server")?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("token.single_use", false)?
            .set_default("mail.smtp_host", DEFAULT_SMTP_HOST)?
            .set_default("mail.smtp_port", i64::from(DEFAULT_SMTP_PORT))?
            .set_default("mail.owner_name", DEFAULT_OWNER_NAME)?
            .set_default("mail.timeout_seconds", DEFAULT_MAIL_TIMEOUT_SECONDS as i64)?
            .set_default("links.base_url", "http://localhost:5173")?
            .set_default("links.path", DOWNLOAD_LINK_PATH)?
            .set_default("resume.path", DEFAULT_RESUME_PATH)?
            .set_default("resume.filename", DEFAULT_RESUME_FILENAME)?
            .set_default("captcha.verify_url", RECAPTCHA_VERIFY_URL)?
            .set_default("captcha.timeout_seconds", DEFAULT_CAPTCHA_TIMEOUT_SECONDS as i64)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server must not start with.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.token.secret.trim();
        if secret.is_empty() {
            return Err(AppError::InvalidConfig("token.secret must be set".into()));
        }
        if secret == LEGACY_DEFAULT_SECRET {
            return Err(AppError::InvalidConfig(
                "token.secret uses the well-known default value".into(),
            ));
        }
        if self.mail.username.trim().is_empty() || self.mail.password.is_empty() {
            return Err(AppError::InvalidConfig(
                "mail.username and mail.password must be set".into(),
            ));
        }
        if !(self.links.base_url.starts_with("http://") || self.links.base_url.starts_with("https://")) {
            return Err(AppError::InvalidConfig(format!(
                "links.base_url must be an absolute http(s) URL, got '{}'",
                self.links.base_url
            )));
        }
        if self.captcha.secret_key.trim().is_empty() {
            return Err(AppError::InvalidConfig("captcha.secret_key must be set".into()));
        }
        if !matches!(self.log.format.as_str(), "pretty" | "json") {
            return Err(AppError::InvalidConfig(format!(
                "log.format must be 'pretty' or 'json', got '{}'",
                self.log.format
            )));
        }
        Ok(())
    }
}

fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (name, key) in LEGACY_ENV {
        builder = builder.set_override_option(*key, lookup(name))?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ConfigBuilder<DefaultState> {
        AppConfig::with_defaults(Config::builder())
            .unwrap()
            .set_override("token.secret", "0123456789abcdef0123456789abcdef")
            .unwrap()
            .set_override("mail.username", "owner@example.com")
            .unwrap()
            .set_override("mail.password", "app-password")
            .unwrap()
            .set_override("captcha.secret_key", "captcha-secret")
            .unwrap()
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = AppConfig::from_builder(base()).unwrap();
        assert_eq!(config.app.port, 3001);
        assert_eq!(config.links.path, "/download-resume");
        assert_eq!(config.resume.filename, "seife-bekele-resume.pdf");
        assert!(!config.token.single_use);
        assert_eq!(config.mail.sender_address(), "owner@example.com");
        assert_eq!(config.mail.owner_address(), "owner@example.com");
    }

    #[test]
    fn missing_secret_is_fatal() {
        let builder = AppConfig::with_defaults(Config::builder())
            .unwrap()
            .set_override("mail.username", "owner@example.com")
            .unwrap()
            .set_override("mail.password", "app-password")
            .unwrap()
            .set_override("captcha.secret_key", "captcha-secret")
            .unwrap();
        assert!(matches!(
            AppConfig::from_builder(builder),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn empty_or_default_secret_is_rejected() {
        let empty = base().set_override("token.secret", "  ").unwrap();
        assert!(matches!(
            AppConfig::from_builder(empty),
            Err(AppError::InvalidConfig(_))
        ));

        let legacy = base().set_override("token.secret", "your-secret-key").unwrap();
        assert!(matches!(
            AppConfig::from_builder(legacy),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let builder = base().set_override("links.base_url", "folio.dev").unwrap();
        assert!(matches!(
            AppConfig::from_builder(builder),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn legacy_variables_map_onto_sections() {
        let builder = apply_legacy_env(base(), |name| match name {
            "JWT_SECRET" => Some("legacy-secret-value-0123456789".to_string()),
            "FRONTEND_URL" => Some("https://folio.dev".to_string()),
            "PORT" => Some("8088".to_string()),
            _ => None,
        })
        .unwrap();

        let config = AppConfig::from_builder(builder).unwrap();
        assert_eq!(config.token.secret, "legacy-secret-value-0123456789");
        assert_eq!(config.links.base_url, "https://folio.dev");
        assert_eq!(config.app.port, 8088);
        assert_eq!(config.mail.username, "owner@example.com");
    }
}
