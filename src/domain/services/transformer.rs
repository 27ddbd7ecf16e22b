//! Fractal transformer
//!
//! Turns one directive-bearing component source into a bundler-ready entry:
//! the leading directive is removed and federation glue is appended so the
//! module registers its exported component under the full fractal name.
//!
//! All analysis works on the token stream from [`super::lexer`]. Type
//! stripping and JSX lowering are left to the bundler.

use std::path::Path;

use crate::domain::value_objects::DIRECTIVE;

use super::lexer::{significant_tokens, Token, TokenKind};

/// Default module providing `registerModule`
pub const DEFAULT_REGISTER_MODULE: &str = "@fractal/core";

/// Output of a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedSource {
    pub code: String,
    /// Local symbol registered and re-exported
    pub component_name: String,
    pub fractal_name: String,
}

/// Source-to-entry transformer
#[derive(Debug, Clone)]
pub struct Transformer {
    register_module: String,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTER_MODULE)
    }
}

impl Transformer {
    pub fn new(register_module: impl Into<String>) -> Self {
        Self {
            register_module: register_module.into(),
        }
    }

    /// Transform `source` (the contents of `file_path`). Pure.
    pub fn transform(&self, source: &str, file_path: &Path, fractal_name: &str) -> TransformedSource {
        let tokens = significant_tokens(source);
        let exports = ExportSurface::scan(source, &tokens);
        let component_name = exports
            .component_name
            .clone()
            .unwrap_or_else(|| component_name_from_path(file_path));

        let body = strip_directive(source).unwrap_or_else(|| source.to_string());

        let mut code = String::with_capacity(body.len() + 256);
        code.push_str(&format!(
            "import {{ registerModule }} from '{}';\n\n",
            escape_single_quoted(&self.register_module)
        ));
        code.push_str(body.trim());
        code.push_str("\n\n");
        code.push_str("if (typeof window !== 'undefined') {\n");
        code.push_str(&format!(
            "  registerModule('{}', {});\n",
            escape_single_quoted(fractal_name),
            component_name
        ));
        code.push_str("}\n");

        let named = !exports.exports_name(&component_name);
        let default = !exports.has_default;
        if named || default {
            code.push('\n');
        }
        if named {
            code.push_str(&format!("export {{ {} }};\n", component_name));
        }
        if default {
            code.push_str(&format!("export default {};\n", component_name));
        }

        TransformedSource {
            code,
            component_name,
            fractal_name: fractal_name.to_string(),
        }
    }

    /// Read `path` and transform it.
    pub fn transform_file(&self, path: &Path, fractal_name: &str) -> std::io::Result<TransformedSource> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.transform(&source, path, fractal_name))
    }
}

/// Remove the directive statement when it is the first statement.
///
/// Leading comments and whitespace may precede the directive. The statement
/// is the string literal plus an optional `;`; trailing blanks and one line
/// break after it are removed too. Returns `None` when the source does not
/// start with the directive.
pub fn strip_directive(source: &str) -> Option<String> {
    let tokens = significant_tokens(source);
    let (start, end) = directive_span(source, &tokens)?;

    let bytes = source.as_bytes();
    let mut cut = end;
    while cut < bytes.len() && (bytes[cut] == b' ' || bytes[cut] == b'\t') {
        cut += 1;
    }
    if bytes.get(cut) == Some(&b'\r') && bytes.get(cut + 1) == Some(&b'\n') {
        cut += 2;
    } else if bytes.get(cut) == Some(&b'\n') {
        cut += 1;
    }

    let mut out = String::with_capacity(source.len());
    out.push_str(&source[..start]);
    out.push_str(&source[cut..]);
    Some(out)
}

/// True when the directive is the first statement.
pub fn has_leading_directive(source: &str) -> bool {
    directive_span(source, &significant_tokens(source)).is_some()
}

fn directive_span(source: &str, tokens: &[Token]) -> Option<(usize, usize)> {
    let first = tokens.first()?;
    if first.kind != TokenKind::String || first.string_value(source)? != DIRECTIVE {
        return None;
    }
    match tokens.get(1) {
        Some(next) if next.is_punct(source, ";") => Some((first.start, next.end)),
        // without a semicolon the statement must end at a line break
        Some(next) if next.newline_before => Some((first.start, first.end)),
        None => Some((first.start, first.end)),
        Some(_) => None,
    }
}

/// Capitalized identifier derived from a file stem: `stats-card` -> `StatsCard`
pub fn component_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = String::with_capacity(stem.len());
    for part in stem.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$')) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Fractal");
    }
    name
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Top-level export statements of a module
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ExportSurface {
    /// First exported declaration, else the identifier of `export default X`
    component_name: Option<String>,
    named: Vec<String>,
    has_default: bool,
}

const DECL_KEYWORDS: &[&str] = &["function", "class", "const", "let", "var"];

impl ExportSurface {
    fn scan(src: &str, tokens: &[Token]) -> Self {
        let mut surface = ExportSurface::default();
        let mut declared: Option<String> = None;
        let mut default_ident: Option<String> = None;
        let mut depth = 0i32;
        let mut i = 0;

        while i < tokens.len() {
            let t = &tokens[i];
            if t.is_punct(src, "{") {
                depth += 1;
            } else if t.is_punct(src, "}") {
                depth -= 1;
            } else if depth == 0 && t.is_ident(src, "export") {
                i = surface.scan_export(src, tokens, i + 1, &mut declared, &mut default_ident);
                continue;
            }
            i += 1;
        }

        surface.component_name = declared.or(default_ident);
        surface
    }

    /// Scan one export statement starting after `export`. Returns the index
    /// to resume scanning from.
    fn scan_export(
        &mut self,
        src: &str,
        tokens: &[Token],
        mut i: usize,
        declared: &mut Option<String>,
        default_ident: &mut Option<String>,
    ) -> usize {
        let is_default = tokens.get(i).is_some_and(|t| t.is_ident(src, "default"));
        if is_default {
            self.has_default = true;
            i += 1;
        }

        if !is_default && tokens.get(i).is_some_and(|t| t.is_punct(src, "{")) {
            return self.scan_export_list(src, tokens, i + 1);
        }

        if tokens.get(i).is_some_and(|t| t.is_ident(src, "async")) {
            i += 1;
        }
        let Some(keyword) = tokens.get(i) else {
            return i;
        };
        let keyword_text = keyword.text(src);

        if keyword.kind == TokenKind::Ident && DECL_KEYWORDS.contains(&keyword_text) {
            i += 1;
            if keyword_text == "function" && tokens.get(i).is_some_and(|t| t.is_punct(src, "*")) {
                i += 1;
            }
            if let Some(name) = tokens.get(i).filter(|t| t.kind == TokenKind::Ident) {
                let name = name.text(src).to_string();
                if !is_default {
                    self.named.push(name.clone());
                }
                declared.get_or_insert(name);
                return i + 1;
            }
            return i;
        }

        // `export default Name;`
        if is_default && keyword.kind == TokenKind::Ident {
            let ends = match tokens.get(i + 1) {
                None => true,
                Some(next) => next.is_punct(src, ";") || next.newline_before,
            };
            if ends {
                default_ident.get_or_insert(keyword_text.to_string());
                return i + 1;
            }
        }
        i
    }

    /// `export { a, b as c, d as default }`
    fn scan_export_list(&mut self, src: &str, tokens: &[Token], mut i: usize) -> usize {
        let mut item: Vec<&str> = Vec::new();
        while let Some(t) = tokens.get(i) {
            i += 1;
            if t.is_punct(src, ",") || t.is_punct(src, "}") {
                self.push_export_item(&item);
                item.clear();
                if t.is_punct(src, "}") {
                    break;
                }
            } else {
                item.push(t.text(src));
            }
        }
        i
    }

    fn push_export_item(&mut self, item: &[&str]) {
        let exported = match item {
            [local] => *local,
            [_, "as", exported] => *exported,
            _ => return,
        };
        if exported == "default" {
            self.has_default = true;
        } else {
            self.named.push(exported.to_string());
        }
    }

    fn exports_name(&self, name: &str) -> bool {
        self.named.iter().any(|n| n == name)
    }
}
