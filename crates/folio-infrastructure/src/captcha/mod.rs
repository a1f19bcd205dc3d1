//! Captcha verifier adapters

pub mod recaptcha;

pub use recaptcha::RecaptchaVerifier;
