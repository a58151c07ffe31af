use sha2::{Digest, Sha256};

use crate::app::services::escape::escape_html;

/// Canonical form Gravatar hashes: trimmed, lowercase, without one
/// surrounding pair of angle brackets as found in `Name <addr>` headers.
pub fn normalize_email(raw: &str) -> String {
    let email = raw.trim().to_lowercase();
    let email = email.strip_prefix('<').unwrap_or(&email);
    let email = email.strip_suffix('>').unwrap_or(email);
    email.to_string()
}

/// Hex SHA-256 of the normalized address.
///
/// Gravatar accepts SHA-256 as well as MD5, so the avatar is the same, but
/// URLs differ from those of cgit's stock `email-gravatar` filter, which uses
/// MD5.
pub fn email_hash(raw: &str) -> String {
    hex::encode(Sha256::digest(normalize_email(raw).as_bytes()))
}

/// `<img>` tag for the address followed by the escaped, trimmed text.
pub fn annotate(email: &str, text: &str, base_url: &str, size: u32) -> String {
    format!(
        "<img src='{base}{hash}?s={size}&amp;d=retro' width='{size}' height='{size}' alt='Gravatar' /> {text}",
        base = base_url,
        hash = email_hash(email),
        size = size,
        text = escape_html(text.trim()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  <Jason@Example.COM> "), "jason@example.com");
        assert_eq!(normalize_email("jason@example.com"), "jason@example.com");
        assert_eq!(normalize_email("<<a@b>>"), "<a@b>");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn test_email_hash_matches_known_digest() {
        // sha256("") is a fixed, well-known value.
        assert_eq!(
            email_hash("<>"),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_ignores_case_and_brackets() {
        assert_eq!(email_hash("<A@B.org>"), email_hash("a@b.org"));
        assert_eq!(email_hash("a@b.org").len(), 64);
    }

    #[test]
    fn test_annotate_template() {
        let out = annotate("a@b.org", "  Jason <dev>  \n", "//www.gravatar.com/avatar/", 13);
        let hash = email_hash("a@b.org");
        assert_eq!(
            out,
            format!(
                "<img src='//www.gravatar.com/avatar/{hash}?s=13&amp;d=retro' width='13' height='13' alt='Gravatar' /> Jason &lt;dev&gt;"
            )
        );
    }
}
