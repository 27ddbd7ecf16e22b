//! esbuild subprocess adapter

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::domain::ports::{
    BundleError, BundleOutput, BundleRequest, Bundler, TransformRequest,
};

/// Drives the `esbuild` executable
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    program: PathBuf,
}

impl Default for EsbuildBundler {
    fn default() -> Self {
        Self::new("esbuild")
    }
}

impl EsbuildBundler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for a bundle request.
    pub fn bundle_args(request: &BundleRequest) -> Vec<String> {
        let mut args = vec![
            request.entry.display().to_string(),
            "--bundle".to_string(),
            format!("--format={}", request.format.as_str()),
            format!("--platform={}", request.platform.as_str()),
            format!("--target={}", request.target),
        ];
        args.extend(request.externals.iter().map(|e| format!("--external:{}", e)));
        if request.minify {
            args.push("--minify".to_string());
        }
        if request.sourcemap {
            args.push("--sourcemap".to_string());
        }
        args.push(format!("--outfile={}", request.outfile.display()));
        args.push("--loader:.jsx=jsx".to_string());
        args.push("--loader:.tsx=tsx".to_string());
        args.push("--log-level=warning".to_string());
        args
    }

    /// Command-line arguments for a stdin transform.
    pub fn transform_args(request: &TransformRequest) -> Vec<String> {
        let mut args = vec![
            format!("--loader={}", request.loader.as_str()),
            format!("--format={}", request.format.as_str()),
            "--jsx=transform".to_string(),
            format!("--jsx-factory={}", request.jsx.factory),
            format!("--jsx-fragment={}", request.jsx.fragment),
            format!("--target={}", request.target),
            "--log-level=warning".to_string(),
        ];
        if let Some(name) = &request.sourcefile {
            args.push(format!("--sourcefile={}", name));
        }
        args
    }

    fn spawn_error(&self, e: std::io::Error) -> BundleError {
        if e.kind() == ErrorKind::NotFound {
            BundleError::NotFound {
                program: self.program.display().to_string(),
            }
        } else {
            BundleError::Io(e)
        }
    }

    fn check(output: Output) -> Result<Output, BundleError> {
        if output.status.success() {
            Ok(output)
        } else {
            Err(BundleError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Bundler for EsbuildBundler {
    fn bundle(&self, request: &BundleRequest) -> Result<BundleOutput, BundleError> {
        tracing::debug!(entry = %request.entry.display(), "esbuild bundle");
        let output = Command::new(&self.program)
            .args(Self::bundle_args(request))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        Self::check(output)?;

        if !request.outfile.is_file() {
            return Err(BundleError::MissingOutput {
                path: request.outfile.clone(),
            });
        }
        let map_path = {
            let mut name = request.outfile.clone().into_os_string();
            name.push(".map");
            PathBuf::from(name)
        };
        Ok(BundleOutput {
            code_path: request.outfile.clone(),
            map_path: (request.sourcemap && map_path.is_file()).then_some(map_path),
        })
    }

    fn transform(&self, request: &TransformRequest) -> Result<String, BundleError> {
        tracing::debug!(sourcefile = ?request.sourcefile, "esbuild transform");
        let mut child = Command::new(&self.program)
            .args(Self::transform_args(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // feed stdin from a second thread so a chatty child cannot block us
        let stdin = child.stdin.take();
        let source = request.source.as_bytes();
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(source)?;
                }
                Ok::<(), std::io::Error>(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let (output, written) = output;
        let output = Self::check(output?)?;
        // a broken pipe only matters if esbuild also failed, which `check` reports
        if let Err(e) = written {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(BundleError::Io(e));
            }
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
