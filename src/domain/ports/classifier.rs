//! Source classifier port
//!
//! Detection is a classification step, decoupled from any one textual
//! convention. The directive classifier in `infrastructure::detector` is the
//! shipped strategy.

use std::path::Path;

use crate::domain::value_objects::Classification;

pub trait SourceClassifier: Send + Sync {
    /// Classify one file. Unreadable files are `Ordinary`, never an error.
    fn classify(&self, path: &Path) -> Classification;

    fn is_fractal(&self, path: &Path) -> bool {
        self.classify(path).is_fractal()
    }
}
