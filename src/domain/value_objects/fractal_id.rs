//! Registry key value object
//!
//! The registry stores fractals under an opaque string id. Builds publish
//! under the `ArtifactIdentity` string, so ids normally look like
//! `acme-ui::button::1.0.0`. In URLs and file names the id is percent-encoded
//! as a single path segment.

use std::fmt;

use super::ArtifactIdentity;

/// Validated registry key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FractalId(String);

/// Rejected registry key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFractalId {
    #[error("fractal id must not be empty")]
    Empty,

    #[error("fractal id '{0}' is reserved")]
    Reserved(String),

    #[error("fractal id contains control characters")]
    ControlCharacter,

    #[error("malformed percent-encoding in '{0}'")]
    MalformedEncoding(String),
}

impl FractalId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidFractalId> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidFractalId::Empty);
        }
        if id == "." || id == ".." {
            return Err(InvalidFractalId::Reserved(id));
        }
        if id.chars().any(char::is_control) {
            return Err(InvalidFractalId::ControlCharacter);
        }
        Ok(Self(id))
    }

    /// Decode a percent-encoded URL path segment.
    pub fn from_segment(segment: &str) -> Result<Self, InvalidFractalId> {
        let decoded = percent_decode(segment)
            .ok_or_else(|| InvalidFractalId::MalformedEncoding(segment.to_string()))?;
        Self::new(decoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form, safe as a URL path segment and as a file name.
    pub fn encoded(&self) -> String {
        percent_encode(&self.0)
    }

    /// Name of the per-id storage document.
    pub fn storage_file_name(&self) -> String {
        format!("{}.json", self.encoded())
    }
}

impl fmt::Display for FractalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&ArtifactIdentity> for FractalId {
    fn from(identity: &ArtifactIdentity) -> Self {
        // Identity segments are never empty, so the string is a valid key.
        Self(identity.to_string())
    }
}

impl AsRef<str> for FractalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.'
}

/// Encode everything outside `[A-Za-z0-9._-]`.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

/// Decode `%XX` sequences. Returns `None` on truncated or non-hex escapes and
/// on invalid UTF-8.
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_converts_to_id() {
        let identity = ArtifactIdentity::new("acme", "Button.tsx", "1.0.0");
        let id = FractalId::from(&identity);
        assert_eq!(id.as_str(), "acme::button::1.0.0");
    }

    #[test]
    fn encoded_id_escapes_separator() {
        let id = FractalId::new("acme::button::1.0.0").unwrap();
        assert_eq!(id.encoded(), "acme%3A%3Abutton%3A%3A1.0.0");
        assert_eq!(id.storage_file_name(), "acme%3A%3Abutton%3A%3A1.0.0.json");
    }

    #[test]
    fn segment_round_trip() {
        let id = FractalId::new("scope/pkg::Wide Thing::1.0.0").unwrap();
        let back = FractalId::from_segment(&id.encoded()).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn plain_slug_is_unchanged() {
        let id = FractalId::from_segment("button-fractal").unwrap();
        assert_eq!(id.as_str(), "button-fractal");
        assert_eq!(id.encoded(), "button-fractal");
    }

    #[test]
    fn traversal_ids_are_rejected() {
        assert_eq!(FractalId::new(""), Err(InvalidFractalId::Empty));
        assert!(matches!(
            FractalId::new(".."),
            Err(InvalidFractalId::Reserved(_))
        ));
        assert!(matches!(
            FractalId::from_segment("%2E%2E"),
            Err(InvalidFractalId::Reserved(_))
        ));
    }

    #[test]
    fn slash_is_encoded_in_file_names() {
        let id = FractalId::new("../etc/passwd").unwrap();
        assert!(!id.storage_file_name().contains('/'));
    }

    #[test]
    fn malformed_escape_is_rejected() {
        assert!(matches!(
            FractalId::from_segment("abc%4"),
            Err(InvalidFractalId::MalformedEncoding(_))
        ));
        assert!(matches!(
            FractalId::from_segment("abc%zz"),
            Err(InvalidFractalId::MalformedEncoding(_))
        ));
    }
}
