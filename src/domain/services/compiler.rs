//! Server-side fractal compiler
//!
//! Prepares a published source for the registry: checks the directive,
//! pulls inline styles out, strips the directive and lowers the rest to
//! CommonJS through the bundler's single-file transform.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::ports::{
    BundleError, Bundler, JsxTransform, Loader, ModuleFormat, TransformRequest,
};

use super::style_extractor::extract_styles;
use super::transformer::strip_directive;

/// Default syntax level for registry code
pub const DEFAULT_SERVER_TARGET: &str = "es2015";

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Missing fractal directive")]
    MissingDirective,

    #[error(transparent)]
    Bundle(#[from] BundleError),
}

impl CompileError {
    /// True when the input itself was rejected (as opposed to the bundler
    /// being unavailable).
    pub fn is_invalid_source(&self) -> bool {
        match self {
            CompileError::MissingDirective => true,
            CompileError::Bundle(err) => err.is_rejection(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFractal {
    pub code: String,
    pub styles: Option<String>,
}

pub struct FractalCompiler {
    bundler: Arc<dyn Bundler>,
    target: String,
}

impl FractalCompiler {
    pub fn new(bundler: Arc<dyn Bundler>) -> Self {
        Self {
            bundler,
            target: DEFAULT_SERVER_TARGET.to_string(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn compile(&self, source: &str, id: &str) -> Result<CompiledFractal, CompileError> {
        let body = strip_directive(source).ok_or(CompileError::MissingDirective)?;
        let extracted = extract_styles(&body, id);

        let code = self.bundler.transform(&TransformRequest {
            source: extracted.code,
            loader: Loader::Tsx,
            format: ModuleFormat::Cjs,
            jsx: JsxTransform::default(),
            target: self.target.clone(),
            sourcefile: Some(id.to_string()),
        })?;

        Ok(CompiledFractal {
            code,
            styles: extracted.styles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{BundleOutput, BundleRequest};
    use std::sync::Mutex;

    /// Bundler that echoes the transform input and records requests
    #[derive(Default)]
    struct EchoBundler {
        requests: Mutex<Vec<TransformRequest>>,
        reject: bool,
    }

    impl Bundler for EchoBundler {
        fn bundle(&self, _request: &BundleRequest) -> Result<BundleOutput, BundleError> {
            unreachable!("compile never bundles")
        }

        fn transform(&self, request: &TransformRequest) -> Result<String, BundleError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.reject {
                return Err(BundleError::Failed {
                    status: Some(1),
                    stderr: "syntax error".into(),
                });
            }
            Ok(format!("/* compiled */ {}", request.source))
        }
    }

    #[test]
    fn compiles_directive_source() {
        let bundler = Arc::new(EchoBundler::default());
        let compiler = FractalCompiler::new(bundler.clone());
        let out = compiler
            .compile(
                "\"use fractal\";\nexport default () => <button className=\"btn\">Hi</button>;",
                "button-fractal",
            )
            .unwrap();

        assert!(out.code.starts_with("/* compiled */ export default"));
        assert_eq!(out.styles, None);

        let requests = bundler.requests.lock().unwrap();
        assert_eq!(requests[0].loader, Loader::Tsx);
        assert_eq!(requests[0].format, ModuleFormat::Cjs);
        assert_eq!(requests[0].target, "es2015");
        assert!(!requests[0].source.contains("use fractal"));
    }

    #[test]
    fn missing_directive_is_rejected_before_bundling() {
        let bundler = Arc::new(EchoBundler::default());
        let compiler = FractalCompiler::new(bundler.clone());
        let err = compiler.compile("export default 1;", "x").unwrap_err();
        assert!(matches!(err, CompileError::MissingDirective));
        assert!(err.is_invalid_source());
        assert!(bundler.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn styles_are_returned_separately() {
        let compiler = FractalCompiler::new(Arc::new(EchoBundler::default()));
        let out = compiler
            .compile(
                "'use fractal'\nexport default () => <div><style>{`.btn{color:red}`}</style></div>;",
                "button-fractal",
            )
            .unwrap();
        assert_eq!(out.styles.as_deref(), Some(".btn{color:red}"));
        assert!(!out.code.contains("<style>"));
    }

    #[test]
    fn bundler_rejection_is_invalid_source() {
        let compiler = FractalCompiler::new(Arc::new(EchoBundler {
            reject: true,
            ..Default::default()
        }))
        .with_target("es2017");
        let err = compiler.compile("\"use fractal\";\nconst = ;", "x").unwrap_err();
        assert!(matches!(err, CompileError::Bundle(_)));
        assert!(err.is_invalid_source());
    }
}
