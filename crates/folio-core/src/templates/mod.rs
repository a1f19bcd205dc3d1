//! Mail bodies rendered with handlebars
//!
//! Values are HTML-escaped on render, which matters for the contact form
//! where every field comes from the visitor.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::DomainError;

const RESUME_LINK: &str = "resume_link";
const CONTACT_NOTIFICATION: &str = "contact_notification";
const CONTACT_CONFIRMATION: &str = "contact_confirmation";

#[derive(Serialize)]
struct ResumeLinkView<'a> {
    link: &'a str,
    ttl_hours: i64,
    owner_name: &'a str,
}

#[derive(Serialize)]
struct ContactNotificationView<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct ContactConfirmationView<'a> {
    owner_name: &'a str,
}

pub struct MailTemplates {
    registry: Handlebars<'static>,
}

impl MailTemplates {
    pub fn new() -> Result<Self, DomainError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for (name, source) in [
            (RESUME_LINK, include_str!("resume_link.hbs")),
            (CONTACT_NOTIFICATION, include_str!("contact_notification.hbs")),
            (CONTACT_CONFIRMATION, include_str!("contact_confirmation.hbs")),
        ] {
            registry
                .register_template_string(name, source)
                .map_err(|e| DomainError::TemplateError(e.to_string()))?;
        }

        Ok(Self { registry })
    }

    pub fn resume_link(&self, link: &str, ttl_hours: i64, owner_name: &str) -> Result<String, DomainError> {
        self.render(
            RESUME_LINK,
            &ResumeLinkView {
                link,
                ttl_hours,
                owner_name,
            },
        )
    }

    pub fn contact_notification(&self, name: &str, email: &str, message: &str) -> Result<String, DomainError> {
        self.render(
            CONTACT_NOTIFICATION,
            &ContactNotificationView { name, email, message },
        )
    }

    pub fn contact_confirmation(&self, owner_name: &str) -> Result<String, DomainError> {
        self.render(CONTACT_CONFIRMATION, &ContactConfirmationView { owner_name })
    }

    fn render<T: Serialize>(&self, name: &str, view: &T) -> Result<String, DomainError> {
        self.registry
            .render(name, view)
            .map_err(|e| DomainError::TemplateError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_link_embeds_link_and_ttl() {
        let templates = MailTemplates::new().unwrap();
        let html = templates
            .resume_link("https://folio.dev/download-resume/abc.def_ghi-jkl", 24, "Seife Bekele")
            .unwrap();

        assert!(html.contains(r#"<a href="https://folio.dev/download-resume/abc.def_ghi-jkl">"#));
        assert!(html.contains("link expires in 24 hours"));
        assert!(html.contains("Seife Bekele"));
    }

    #[test]
    fn contact_fields_are_escaped() {
        let templates = MailTemplates::new().unwrap();
        let html = templates
            .contact_notification("<b>Eve</b>", "eve@example.com", "<script>alert(1)</script>")
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    }

    #[test]
    fn confirmation_is_signed() {
        let templates = MailTemplates::new().unwrap();
        let html = templates.contact_confirmation("Seife Bekele").unwrap();
        assert!(html.contains("Thank you for reaching out!"));
        assert!(html.contains("Seife Bekele"));
    }
}
