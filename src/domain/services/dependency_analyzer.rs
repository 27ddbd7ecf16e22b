//! Dependency usage analysis
//!
//! Declared dependencies of the owning package are filtered down to the
//! packages the fractal source actually references.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::{DependencySet, PackageDescriptor};

use super::lexer::{significant_tokens, Token, TokenKind};

/// Package names referenced by `import`, `export ... from`, dynamic
/// `import()` and `require()`. Relative and absolute specifiers are ignored.
pub fn referenced_packages(source: &str) -> BTreeSet<String> {
    module_specifiers(source)
        .iter()
        .filter_map(|s| package_name(s))
        .collect()
}

/// Every module specifier in the source, in order of appearance.
pub fn module_specifiers(source: &str) -> Vec<String> {
    let tokens = significant_tokens(source);
    let mut specifiers = Vec::new();

    for (i, t) in tokens.iter().enumerate() {
        if t.kind != TokenKind::Ident || is_member_access(source, &tokens, i) {
            continue;
        }
        let found = match t.text(source) {
            "import" => import_specifier(source, &tokens, i),
            "export" => export_from_specifier(source, &tokens, i),
            "require" => call_specifier(source, &tokens, i),
            _ => None,
        };
        if let Some(spec) = found {
            specifiers.push(spec.to_string());
        }
    }
    specifiers
}

/// `react-dom/client` -> `react-dom`, `@scope/pkg/sub` -> `@scope/pkg`.
/// `None` for relative or absolute paths.
pub fn package_name(specifier: &str) -> Option<String> {
    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    let mut parts = specifier.split('/');
    let first = parts.next()?;
    if first.starts_with('@') {
        let second = parts.next().filter(|s| !s.is_empty())?;
        Some(format!("{}/{}", first, second))
    } else {
        Some(first.to_string())
    }
}

/// Keep only declared dependencies that appear in `used`.
pub fn filter_declared(declared: &PackageDescriptor, used: &BTreeSet<String>) -> DependencySet {
    let keep = |deps: &BTreeMap<String, String>| -> BTreeMap<String, String> {
        deps.iter()
            .filter(|(name, _)| used.contains(*name))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    };
    DependencySet {
        production: keep(&declared.dependencies),
        development: keep(&declared.dev_dependencies),
        peer: keep(&declared.peer_dependencies),
    }
}

fn is_member_access(src: &str, tokens: &[Token], i: usize) -> bool {
    i > 0 && (tokens[i - 1].is_punct(src, ".") || tokens[i - 1].is_punct(src, "?."))
}

fn string_at<'a>(src: &'a str, tokens: &[Token], i: usize) -> Option<&'a str> {
    let t = tokens.get(i)?;
    if t.kind == TokenKind::String {
        t.string_value(src)
    } else {
        None
    }
}

/// `import x from 's'`, `import 's'`, `import('s')`
fn import_specifier<'a>(src: &'a str, tokens: &[Token], i: usize) -> Option<&'a str> {
    let next = tokens.get(i + 1)?;
    if next.kind == TokenKind::String {
        return next.string_value(src);
    }
    if next.is_punct(src, "(") {
        return call_specifier(src, tokens, i);
    }
    if next.is_punct(src, ".") {
        // import.meta
        return None;
    }
    from_clause(src, tokens, i + 1)
}

/// `export * from 's'`, `export { a } from 's'`
fn export_from_specifier<'a>(src: &'a str, tokens: &[Token], i: usize) -> Option<&'a str> {
    let next = tokens.get(i + 1)?;
    if next.is_punct(src, "*") || next.is_punct(src, "{") {
        from_clause(src, tokens, i + 1)
    } else {
        None
    }
}

/// `name('s')`
fn call_specifier<'a>(src: &'a str, tokens: &[Token], i: usize) -> Option<&'a str> {
    if !tokens.get(i + 1)?.is_punct(src, "(") {
        return None;
    }
    let spec = string_at(src, tokens, i + 2)?;
    tokens.get(i + 3)?.is_punct(src, ")").then_some(spec)
}

/// Find `from '<spec>'` before the statement ends.
fn from_clause<'a>(src: &'a str, tokens: &[Token], start: usize) -> Option<&'a str> {
    let mut depth = 0i32;
    for j in start..tokens.len() {
        let t = &tokens[j];
        if t.is_punct(src, "{") {
            depth += 1;
        } else if t.is_punct(src, "}") {
            depth -= 1;
        } else if depth == 0 && t.is_punct(src, ";") {
            return None;
        } else if depth == 0 && t.is_ident(src, "from") {
            return string_at(src, tokens, j + 1);
        } else if depth == 0 && (t.is_ident(src, "import") || t.is_ident(src, "export")) && j > start {
            return None;
        }
    }
    None
}
