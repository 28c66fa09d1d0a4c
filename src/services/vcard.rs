//! vCard 3.0 export of a profile.

use crate::ports::Profile;

/// MIME type of the generated card.
pub const VCARD_CONTENT_TYPE: &str = "text/vcard";

/// Renders `profile` as a vCard 3.0 document with CRLF line endings.
///
/// Empty fields are skipped. The card always links back to the public page
/// at `{app_url}/{username}`.
#[must_use]
pub fn render_vcard(profile: &Profile, app_url: &str) -> String {
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    let mut push = |property: &str, value: Option<&String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            lines.push(format!("{property}:{}", escape(value)));
        }
    };
    push("FN", profile.full_name.as_ref());
    push("ORG", profile.company.as_ref());
    push("TEL;TYPE=work", profile.phone.as_ref());
    push("EMAIL", profile.email.as_ref());
    push("URL", profile.website.as_ref());

    let username = profile.username.as_deref().unwrap_or_default();
    lines.push(format!("URL:{}/{username}", app_url.trim_end_matches('/')));
    lines.push("END:VCARD".to_string());

    lines.join("\r\n")
}

/// Escapes a property value: backslash, `;`, `,` and newlines.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_present_fields_in_order() {
        let profile = Profile {
            id: "u1".into(),
            username: Some("alice".into()),
            full_name: Some("Alice Example".into()),
            company: Some("Acme".into()),
            phone: Some("+1 555 0100".into()),
            email: Some("alice@example.com".into()),
            website: Some("https://alice.dev".into()),
            ..Profile::default()
        };

        let card = render_vcard(&profile, "https://taptag.example/");

        assert_eq!(
            card,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Alice Example\r\nORG:Acme\r\n\
             TEL;TYPE=work:+1 555 0100\r\nEMAIL:alice@example.com\r\n\
             URL:https://alice.dev\r\nURL:https://taptag.example/alice\r\nEND:VCARD"
        );
    }

    #[test]
    fn skips_missing_and_empty_fields() {
        let profile = Profile {
            id: "u1".into(),
            username: Some("bob".into()),
            company: Some(String::new()),
            ..Profile::default()
        };

        let card = render_vcard(&profile, "https://taptag.example");

        assert_eq!(
            card,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nURL:https://taptag.example/bob\r\nEND:VCARD"
        );
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape(r"a\b;c,d"), r"a\\b\;c\,d");
        assert_eq!(escape("line1\nline2"), r"line1\nline2");
    }
}
