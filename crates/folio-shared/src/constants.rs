//! Application-wide constants

/// Lifetime of a resume download link.
pub const LINK_TOKEN_TTL_HOURS: i64 = 24;

/// Path segment the frontend serves the download page under.
pub const DOWNLOAD_LINK_PATH: &str = "/download-resume";

pub const DEFAULT_RESUME_FILENAME: &str = "seife-bekele-resume.pdf";
pub const DEFAULT_RESUME_PATH: &str = "assets/resume.pdf";

pub const DEFAULT_OWNER_NAME: &str = "Seife Bekele";

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_MAIL_TIMEOUT_SECONDS: u64 = 15;

pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";
pub const DEFAULT_CAPTCHA_TIMEOUT_SECONDS: u64 = 10;

/// Placeholder secret from old sample environments; never accepted.
pub const LEGACY_DEFAULT_SECRET: &str = "your-secret-key";

// Messages returned to the UI
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_LINK_SENT: &str = "Download link sent to your email";
pub const MSG_LINK_SEND_FAILED: &str = "Failed to send download link";
pub const MSG_INVALID_LINK: &str = "Invalid or expired download link";
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_CAPTCHA_FAILED: &str = "reCAPTCHA verification failed";
pub const MSG_CONTACT_SENT: &str = "Message sent successfully";
pub const MSG_CONTACT_FAILED: &str = "Failed to send message";
pub const MSG_DOWNLOAD_FAILED: &str = "Failed to download resume";
