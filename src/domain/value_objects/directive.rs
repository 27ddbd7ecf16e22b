//! Directive value object
//!
//! A source file opts into the fractal pipeline by starting with the
//! `"use fractal"` directive. Detection is modelled as a classification step
//! so other strategies can replace the textual convention.

/// The directive text, without quotes.
pub const DIRECTIVE: &str = "use fractal";

const QUOTED_DIRECTIVES: [&str; 2] = ["\"use fractal\"", "'use fractal'"];

/// Result of classifying a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// File opts into the fractal pipeline
    Fractal,
    /// Any other file
    Ordinary,
}

impl Classification {
    /// Classify raw file content by its leading directive.
    ///
    /// Only the first non-whitespace content counts: a directive appearing
    /// later in the body is not a directive.
    pub fn of_content(content: &str) -> Self {
        if starts_with_directive(content) {
            Classification::Fractal
        } else {
            Classification::Ordinary
        }
    }

    pub fn is_fractal(&self) -> bool {
        matches!(self, Classification::Fractal)
    }
}

/// Returns true when `content`, after leading whitespace, begins with the
/// quoted directive literal (double or single quotes).
pub fn starts_with_directive(content: &str) -> bool {
    let trimmed = content.trim_start();
    QUOTED_DIRECTIVES.iter().any(|d| trimmed.starts_with(d))
}
