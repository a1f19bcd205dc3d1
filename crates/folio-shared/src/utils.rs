//! Utility functions

/// Mask the local part of an email address for log output.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let visible: String = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 }).collect();
        format!("{}***{}", visible, domain)
    } else {
        "***".to_string()
    }
}

/// Join a base URL, a path prefix and a trailing segment with single slashes.
pub fn join_url(base: &str, prefix: &str, segment: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        prefix.trim_matches('/'),
        segment
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("ab@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-address"), "***");
    }

    #[test]
    fn mask_handles_empty_local_part() {
        assert_eq!(mask_email("@example.com"), "***@example.com");
    }

    #[test]
    fn joins_without_double_slashes() {
        assert_eq!(
            join_url("https://folio.dev/", "/download-resume", "abc"),
            "https://folio.dev/download-resume/abc"
        );
        assert_eq!(
            join_url("http://localhost:5173", "download-resume", "t.k.n"),
            "http://localhost:5173/download-resume/t.k.n"
        );
    }
}
