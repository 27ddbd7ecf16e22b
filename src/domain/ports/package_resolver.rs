//! Package resolver port

use std::path::Path;

use crate::domain::entities::PackageInfo;
use crate::domain::value_objects::ArtifactIdentity;

/// Finds the package that owns a source file
pub trait PackageResolver: Send + Sync {
    /// Nearest ancestor `package.json` with a name and a version.
    fn find_closest_package(&self, file: &Path) -> Option<PackageInfo>;

    /// Deterministic identity for `file_name` inside `package`.
    fn generate_fractal_name(&self, package: &PackageInfo, file_name: &str) -> ArtifactIdentity {
        ArtifactIdentity::new(&package.name, file_name, &package.version)
    }
}
