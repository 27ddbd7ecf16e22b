//! Domain Services
//!
//! Pure source analyses and transformations. Everything here works on
//! strings and token streams; file and process I/O stays in the
//! infrastructure and application layers.

pub mod compiler;
pub mod dependency_analyzer;
pub mod fractal_analyzer;
pub mod lexer;
pub mod style_extractor;
pub mod transformer;

pub use compiler::{CompileError, CompiledFractal, FractalCompiler, DEFAULT_SERVER_TARGET};
pub use dependency_analyzer::{filter_declared, package_name, referenced_packages};
pub use fractal_analyzer::{find_internal_references, ImportedComponent};
pub use lexer::{significant_tokens, tokenize, Token, TokenKind};
pub use style_extractor::{extract_styles, ExtractedStyles};
pub use transformer::{
    component_name_from_path, has_leading_directive, strip_directive, TransformedSource,
    Transformer, DEFAULT_REGISTER_MODULE,
};
