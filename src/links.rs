//! Link derivation for phone numbers, email addresses and CTA buttons.
//!
//! Business phone numbers are stored the way they should be displayed
//! (`"(555) 123-4567"`). Telephony links need the dial-able form: an
//! optional leading `+` followed by digits only.

use crate::content::{Cta, HomeCta};

/// Reduce a display phone number to its dial-able form.
///
/// Keeps every ASCII digit, and a `+` only when no digit has been kept yet
/// (the international prefix). Everything else is dropped.
///
/// - `"+1 (555) 123-4567"` → `"+15551234567"`
/// - `"(555) 123-4567"` → `"5551234567"`
/// - `"555-1234"` → `"5551234"`
/// - `"555 + 1234"` → `"5551234"`
pub fn dial_digits(phone: &str) -> String {
    let mut out = String::with_capacity(phone.len());
    for c in phone.chars() {
        match c {
            '0'..='9' => out.push(c),
            '+' if out.is_empty() => out.push(c),
            _ => {}
        }
    }
    out
}

/// `tel:` href for a display phone number.
pub fn tel_href(phone: &str) -> String {
    format!("tel:{}", dial_digits(phone))
}

/// `mailto:` href for an email address.
pub fn mailto_href(email: &str) -> String {
    format!("mailto:{email}")
}

/// URL path of a service page.
pub fn service_path(slug: &str) -> String {
    format!("/services/{slug}/")
}

impl Cta {
    /// Explicit button link, or the phone link when none is given.
    pub fn resolve_href(&self, phone: &str) -> String {
        self.button_href
            .clone()
            .unwrap_or_else(|| tel_href(phone))
    }
}

impl HomeCta {
    /// Explicit button link, or the phone link when none is given.
    pub fn resolve_href(&self, phone: &str) -> String {
        self.button_href
            .clone()
            .unwrap_or_else(|| tel_href(phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn international_number_keeps_plus() {
        assert_eq!(tel_href("+1 (555) 123-4567"), "tel:+15551234567");
    }

    #[test]
    fn local_number_digits_only() {
        assert_eq!(tel_href("555-1234"), "tel:5551234");
        assert_eq!(tel_href("(555) 123-4567"), "tel:5551234567");
    }

    #[test]
    fn plus_after_digits_dropped() {
        assert_eq!(dial_digits("555 + 1234"), "5551234");
        assert_eq!(dial_digits("+44 +20 7946 0958"), "+442079460958");
    }

    #[test]
    fn leading_plus_after_whitespace_kept() {
        assert_eq!(dial_digits("  +33 1 23"), "+33123");
    }

    #[test]
    fn no_non_digit_survives() {
        let dialed = dial_digits("Call: 1-800-FLOWERS ext. 42");
        assert_eq!(dialed, "180042");
        assert!(dialed.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn empty_phone_gives_bare_scheme() {
        assert_eq!(tel_href(""), "tel:");
    }

    #[test]
    fn mailto_prefix() {
        assert_eq!(mailto_href("hi@example.com"), "mailto:hi@example.com");
    }

    #[test]
    fn service_path_has_trailing_slash() {
        assert_eq!(service_path("roofing"), "/services/roofing/");
    }

    #[test]
    fn cta_uses_explicit_href() {
        let cta = Cta {
            headline: "Ready?".to_string(),
            button_text: "Book".to_string(),
            button_href: Some("/contact".to_string()),
        };
        assert_eq!(cta.resolve_href("(555) 123-4567"), "/contact");
    }

    #[test]
    fn cta_falls_back_to_phone() {
        let cta = Cta {
            headline: "Ready?".to_string(),
            button_text: "Call".to_string(),
            button_href: None,
        };
        assert_eq!(cta.resolve_href("(555) 123-4567"), "tel:5551234567");
    }

    #[test]
    fn home_cta_falls_back_to_phone() {
        let cta = HomeCta {
            headline: "Get started".to_string(),
            description: "Free quotes".to_string(),
            button_text: "Call now".to_string(),
            button_href: None,
        };
        assert_eq!(cta.resolve_href("+1 555 000 1111"), "tel:+15550001111");
    }
}
