//! Property tests for artifact identities.

use proptest::prelude::*;

use fractal::domain::value_objects::{safe_file_name, ArtifactIdentity, SEPARATOR};

fn package_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,12}",
        ("[a-z][a-z0-9-]{0,8}", "[a-z][a-z0-9-]{0,8}").prop_map(|(s, n)| format!("@{s}/{n}")),
    ]
}

fn file_name() -> impl Strategy<Value = String> {
    ("[A-Z][A-Za-z0-9]{0,12}", prop_oneof!["tsx", "ts", "jsx", "js"])
        .prop_map(|(stem, ext)| format!("{stem}.{ext}"))
}

/// File names and versions that may carry `:`, legal on unix filesystems
fn colon_file_name() -> impl Strategy<Value = String> {
    prop_oneof![
        file_name(),
        "[A-Z][A-Za-z0-9:]{0,12}".prop_map(|stem| format!("{stem}.tsx")),
    ]
}

fn colon_version() -> impl Strategy<Value = String> {
    prop_oneof![version(), "[0-9][0-9.:]{0,8}"]
}

fn version() -> impl Strategy<Value = String> {
    (0u32..20, 0u32..20, 0u32..20).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the identity is a pure function of its inputs.
    #[test]
    fn property_identity_is_deterministic(
        pkg in package_name(),
        file in file_name(),
        ver in version()
    ) {
        let a = ArtifactIdentity::new(&pkg, &file, &ver);
        let b = ArtifactIdentity::new(&pkg, &file, &ver);
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    /// PROPERTY: a version bump always yields a different identity.
    #[test]
    fn property_version_change_changes_identity(
        pkg in package_name(),
        file in file_name(),
        ver in version(),
        other in version()
    ) {
        prop_assume!(ver != other);
        prop_assert_ne!(
            ArtifactIdentity::new(&pkg, &file, &ver),
            ArtifactIdentity::new(&pkg, &file, &other)
        );
    }

    /// PROPERTY: identities have three non-empty segments and parse back.
    #[test]
    fn property_identity_parses_back(
        pkg in package_name(),
        file in colon_file_name(),
        ver in colon_version()
    ) {
        let identity = ArtifactIdentity::new(&pkg, &file, &ver);
        let text = identity.to_string();
        prop_assert_eq!(text.split(SEPARATOR).count(), 3);
        prop_assert!(!identity.package().contains('@') && !identity.package().contains('/'));
        prop_assert!(!identity.component().contains(':') && !identity.version().contains(':'));
        let parsed: ArtifactIdentity = text.parse().unwrap();
        prop_assert_eq!(parsed, identity);
    }

    /// PROPERTY: safe file names only use `[A-Za-z0-9_-]`.
    #[test]
    fn property_safe_file_name_is_filesystem_safe(name in ".{0,40}") {
        let safe = safe_file_name(&name);
        prop_assert!(
            safe.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "unsafe characters in {safe:?}"
        );
    }
}
