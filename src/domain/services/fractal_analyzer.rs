//! Internal fractal reference analysis
//!
//! Finds other fractals a source composes: capitalized imports rendered as
//! JSX elements whose own source is a fractal, plus every literal name
//! passed to `registerModule(...)`.

use std::collections::BTreeSet;

use super::lexer::{significant_tokens, Token, TokenKind};

/// A capitalized binding imported from a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedComponent {
    /// Local binding name (after `as`)
    pub local: String,
    pub specifier: String,
}

/// Internal references, sorted and deduplicated.
///
/// `is_fractal` decides whether an imported component rendered as JSX is
/// itself a fractal (normally by resolving and classifying its file).
pub fn find_internal_references(
    source: &str,
    mut is_fractal: impl FnMut(&ImportedComponent) -> bool,
) -> Vec<String> {
    let tokens = significant_tokens(source);
    let rendered = jsx_element_names(source, &tokens);

    let mut refs = BTreeSet::new();
    for component in imported_components(source, &tokens) {
        if rendered.contains(&component.local) && is_fractal(&component) {
            refs.insert(component.local);
        }
    }
    refs.extend(registered_names(source, &tokens));
    refs.into_iter().collect()
}

fn is_component_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Capitalized default and named import bindings.
pub fn imported_components(src: &str, tokens: &[Token]) -> Vec<ImportedComponent> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].is_ident(src, "import") || (i > 0 && tokens[i - 1].is_punct(src, ".")) {
            i += 1;
            continue;
        }

        let mut locals = Vec::new();
        let mut j = i + 1;
        if tokens.get(j).is_some_and(|t| t.is_ident(src, "type")) {
            j += 1;
        }
        // default binding
        if let Some(t) = tokens.get(j) {
            if t.kind == TokenKind::Ident && !t.is_ident(src, "from") {
                locals.push(t.text(src).to_string());
                j += 1;
                if tokens.get(j).is_some_and(|t| t.is_punct(src, ",")) {
                    j += 1;
                }
            }
        }
        // named bindings
        if tokens.get(j).is_some_and(|t| t.is_punct(src, "{")) {
            j += 1;
            let mut item: Vec<&str> = Vec::new();
            while let Some(t) = tokens.get(j) {
                j += 1;
                if t.is_punct(src, ",") || t.is_punct(src, "}") {
                    match item.as_slice() {
                        [name] | [_, "as", name] | ["type", name] | ["type", _, "as", name] => {
                            locals.push(name.to_string())
                        }
                        _ => {}
                    }
                    item.clear();
                    if t.is_punct(src, "}") {
                        break;
                    }
                } else {
                    item.push(t.text(src));
                }
            }
        }

        let from = tokens.get(j).filter(|t| t.is_ident(src, "from"));
        let spec = tokens.get(j + 1).and_then(|t| t.string_value(src));
        if let (Some(_), Some(spec)) = (from, spec) {
            out.extend(
                locals
                    .into_iter()
                    .filter(|l| is_component_name(l))
                    .map(|local| ImportedComponent {
                        local,
                        specifier: spec.to_string(),
                    }),
            );
            i = j + 2;
        } else {
            i += 1;
        }
    }
    out
}

/// Capitalized names opened as JSX elements: `<Name`, `<Name/>`, `<Name>`.
pub fn jsx_element_names(src: &str, tokens: &[Token]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for i in 0..tokens.len() {
        let Some(name) = tokens.get(i + 1) else {
            break;
        };
        if !tokens[i].is_punct(src, "<") || name.kind != TokenKind::Ident {
            continue;
        }
        let text = name.text(src);
        if !is_component_name(text) || !opens_jsx(src, tokens, i) {
            continue;
        }
        if tokens.get(i + 2).is_some_and(|t| t.is_punct(src, ".")) {
            continue;
        }
        names.insert(text.to_string());
    }
    names
}

/// Whether the `<` at `i` starts an element rather than a comparison or a
/// type argument list.
fn opens_jsx(src: &str, tokens: &[Token], i: usize) -> bool {
    let Some(prev) = i.checked_sub(1).map(|p| &tokens[p]) else {
        return true;
    };
    match prev.kind {
        TokenKind::Ident => matches!(prev.text(src), "return" | "yield" | "await" | "default"),
        TokenKind::Number | TokenKind::String | TokenKind::Template | TokenKind::Regex => false,
        TokenKind::Punct => !matches!(prev.text(src), ")" | "]"),
        TokenKind::LineComment | TokenKind::BlockComment => true,
    }
}

/// String literals passed as the first argument to `registerModule(...)`.
pub fn registered_names(src: &str, tokens: &[Token]) -> Vec<String> {
    let mut names = Vec::new();
    for i in 0..tokens.len() {
        if !tokens[i].is_ident(src, "registerModule") {
            continue;
        }
        if !tokens.get(i + 1).is_some_and(|t| t.is_punct(src, "(")) {
            continue;
        }
        if let Some(value) = tokens
            .get(i + 2)
            .filter(|t| matches!(t.kind, TokenKind::String | TokenKind::Template))
            .and_then(|t| t.string_value(src))
        {
            names.push(value.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#""use fractal";
import React from 'react';
import Badge from './Badge';
import { Chart as LineChart, Tooltip, helper } from './widgets';
import Avatar from './Avatar';

export default function Card() {
  const small = count < Limit;
  return (
    <div>
      <Badge label="new" />
      <LineChart data={[]}></LineChart>
      <Tooltip.Trigger />
    </div>
  );
}

registerModule('acme::legacy::1.0.0', Card);
"#;

    #[test]
    fn imported_components_resolve_aliases() {
        let tokens = significant_tokens(SOURCE);
        let locals: Vec<String> = imported_components(SOURCE, &tokens)
            .into_iter()
            .map(|c| c.local)
            .collect();
        assert_eq!(locals, vec!["React", "Badge", "LineChart", "Tooltip", "Avatar"]);
    }

    #[test]
    fn jsx_names_skip_comparisons_and_members() {
        let tokens = significant_tokens(SOURCE);
        let names = jsx_element_names(SOURCE, &tokens);
        assert!(names.contains("Badge"));
        assert!(names.contains("LineChart"));
        assert!(!names.contains("Limit"));
        assert!(!names.contains("Tooltip"));
        assert!(!names.contains("Avatar"));
    }

    #[test]
    fn generic_type_arguments_are_not_elements() {
        let src = "const [v, setV] = useState<Count>(0);";
        let tokens = significant_tokens(src);
        assert!(jsx_element_names(src, &tokens).is_empty());
    }

    #[test]
    fn internal_references_use_predicate_and_register_calls() {
        let refs = find_internal_references(SOURCE, |c| c.local == "Badge");
        assert_eq!(refs, vec!["Badge", "acme::legacy::1.0.0"]);
    }

    #[test]
    fn predicate_sees_specifier() {
        let mut seen = Vec::new();
        find_internal_references(SOURCE, |c| {
            seen.push((c.local.clone(), c.specifier.clone()));
            false
        });
        assert!(seen.contains(&("LineChart".to_string(), "./widgets".to_string())));
    }

    #[test]
    fn broken_source_yields_empty() {
        assert!(find_internal_references("<<<{{{ '", |_| true).is_empty());
    }
}
