//! Artifact identity value object
//!
//! `package :: kebab-file-base :: version`. The identity is a pure function of
//! the owning package, the file base name and the package version, so
//! rebuilding the same source under the same version always overwrites the
//! same registry entry.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Separator between identity segments. Never produced inside a segment.
pub const SEPARATOR: &str = "::";

/// Globally unique name of a built fractal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactIdentity {
    package: String,
    component: String,
    version: String,
}

impl ArtifactIdentity {
    /// Build an identity from a package name, a component file name and a
    /// package version.
    ///
    /// The package name has `@` and `/` replaced by `-` (leading/trailing
    /// dashes trimmed) and the file name is reduced to its kebab-cased stem.
    /// `:` becomes `-` in every segment so the separator stays unambiguous.
    pub fn new(package_name: &str, file_name: &str, version: &str) -> Self {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());

        Self {
            package: clean_package_name(package_name),
            component: kebab_case(&stem),
            version: version.replace(':', "-"),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Filesystem-safe form used for build output file names.
    pub fn safe_file_name(&self) -> String {
        safe_file_name(&self.to_string())
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.package,
            self.component,
            self.version,
            sep = SEPARATOR
        )
    }
}

/// Error parsing an identity string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fractal identity '{input}': expected package::component::version")]
pub struct IdentityParseError {
    pub input: String,
}

impl FromStr for ArtifactIdentity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        match parts.as_slice() {
            [package, component, version]
                if !package.is_empty() && !component.is_empty() && !version.is_empty() =>
            {
                Ok(Self {
                    package: package.to_string(),
                    component: component.to_string(),
                    version: version.to_string(),
                })
            }
            _ => Err(IdentityParseError {
                input: s.to_string(),
            }),
        }
    }
}

/// `ButtonGroup` -> `button-group`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else if c == ':' {
            out.push('-');
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    match out.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

/// `@acme/ui-kit` -> `acme-ui-kit`
pub fn clean_package_name(name: &str) -> String {
    name.replace(['@', '/', ':'], "-").trim_matches('-').to_string()
}

/// `acme::button::1.0.0` -> `acme_button_1_0_0`
pub fn safe_file_name(name: &str) -> String {
    name.replace(SEPARATOR, "_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_identity_from_scoped_package() {
        let id = ArtifactIdentity::new("@acme/ui-kit", "ButtonGroup.tsx", "1.2.0");
        assert_eq!(id.to_string(), "acme-ui-kit::button-group::1.2.0");
    }

    #[test]
    fn identity_is_deterministic() {
        let a = ArtifactIdentity::new("my-app", "Card.jsx", "0.1.0");
        let b = ArtifactIdentity::new("my-app", "Card.jsx", "0.1.0");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn version_changes_identity() {
        let a = ArtifactIdentity::new("my-app", "Card.jsx", "0.1.0");
        let b = ArtifactIdentity::new("my-app", "Card.jsx", "0.2.0");
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn kebab_case_handles_leading_capital() {
        assert_eq!(kebab_case("StatsCard"), "stats-card");
        assert_eq!(kebab_case("navigation"), "navigation");
        assert_eq!(kebab_case("NavigationDemo"), "navigation-demo");
    }

    #[test]
    fn clean_package_name_trims_separators() {
        assert_eq!(clean_package_name("@scope/pkg"), "scope-pkg");
        assert_eq!(clean_package_name("plain"), "plain");
        assert_eq!(clean_package_name("trailing/"), "trailing");
    }

    #[test]
    fn safe_file_name_replaces_separator_and_dots() {
        let id = ArtifactIdentity::new("@acme/ui", "Button.tsx", "1.0.0");
        assert_eq!(id.safe_file_name(), "acme-ui_button_1_0_0");
    }

    #[test]
    fn parse_round_trips_display() {
        let id = ArtifactIdentity::new("@acme/ui", "StatsCard.tsx", "2.0.0-beta.1");
        let parsed: ArtifactIdentity = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn colons_never_leak_into_segments() {
        let id = ArtifactIdentity::new("acme:ui", "A::B.tsx", "1.0.0:rc");
        assert_eq!(id.to_string(), "acme-ui::a---b::1.0.0-rc");
        assert_ne!(id, ArtifactIdentity::new("acme", "Ui.tsx", "1.0.0"));
        let parsed: ArtifactIdentity = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_wrong_segment_count() {
        assert!("just-a-slug".parse::<ArtifactIdentity>().is_err());
        assert!("a::b".parse::<ArtifactIdentity>().is_err());
        assert!("a::b::c::d".parse::<ArtifactIdentity>().is_err());
        assert!("a::::c".parse::<ArtifactIdentity>().is_err());
    }
}
