//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod directive;
mod fractal_id;
mod hash;
mod identity;

pub use directive::{starts_with_directive, Classification, DIRECTIVE};
pub use fractal_id::{percent_decode, percent_encode, FractalId, InvalidFractalId};
pub use hash::ContentHash;
pub use identity::{
    clean_package_name, kebab_case, safe_file_name, ArtifactIdentity, IdentityParseError,
    SEPARATOR,
};
