//! Inline style extraction
//!
//! Collects CSS from a component source so the registry can serve it next to
//! the compiled code:
//!
//! - `<style>{`css`}</style>` and `<style>css</style>` blocks are removed and
//!   their trimmed content kept;
//! - side-effect imports of `.css` files are dropped;
//! - `styled.tag`css`` and `styled('tag')`css`` become a plain
//!   `React.createElement` wrapper carrying a generated class, and the CSS is
//!   scoped to that class.

use crate::domain::value_objects::safe_file_name;

use super::lexer::{significant_tokens, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedStyles {
    pub code: String,
    /// `None` when no CSS was found
    pub styles: Option<String>,
}

/// Extract styles, generating random class suffixes.
pub fn extract_styles(source: &str, id: &str) -> ExtractedStyles {
    extract_styles_with(source, id, random_suffix)
}

/// Extract styles with a caller-supplied class suffix generator.
pub fn extract_styles_with(
    source: &str,
    id: &str,
    mut suffix: impl FnMut() -> String,
) -> ExtractedStyles {
    let tokens = significant_tokens(source);
    let class_prefix = format!("f-{}", safe_file_name(id));

    let mut edits: Vec<Edit> = Vec::new();
    let mut styles = String::new();
    let mut i = 0;

    while i < tokens.len() {
        if let Some((edit, css)) = style_block(source, &tokens, i) {
            styles.push_str(css.trim());
            styles.push('\n');
            i = skip_past(&tokens, i, edit.end);
            edits.push(edit);
            continue;
        }
        if let Some((edit, next)) = css_import(source, &tokens, i) {
            edits.push(edit);
            i = next;
            continue;
        }
        if let Some((start, end, tag, css, next)) = styled_template(source, &tokens, i) {
            let class = format!("{}-{}", class_prefix, suffix());
            styles.push_str(&format!(".{} {{ {} }}\n", class, css.trim()));
            edits.push(Edit {
                start,
                end,
                replacement: format!(
                    "props => React.createElement('{}', {{ ...props, className: '{}' }})",
                    tag, class
                ),
            });
            i = next;
            continue;
        }
        i += 1;
    }

    let code = apply_edits(source, &edits);
    let styles = styles.trim();
    ExtractedStyles {
        code: code.trim().to_string(),
        styles: (!styles.is_empty()).then(|| styles.to_string()),
    }
}

fn random_suffix() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..6].to_string()
}

struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

fn apply_edits(source: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    out
}

fn skip_past(tokens: &[Token], from: usize, end: usize) -> usize {
    let mut i = from;
    while i < tokens.len() && tokens[i].start < end {
        i += 1;
    }
    i
}

/// `<style ...>` at token `i`, up to the matching `</style>`.
fn style_block(src: &str, tokens: &[Token], i: usize) -> Option<(Edit, String)> {
    let open = tokens.get(i)?;
    let name = tokens.get(i + 1)?;
    if !open.is_punct(src, "<") || !name.is_ident(src, "style") || name.start != open.end {
        return None;
    }

    // end of the opening tag: first `>` outside attribute braces
    let mut depth = 0;
    let mut j = i + 2;
    let open_end = loop {
        let t = tokens.get(j)?;
        if t.is_punct(src, "{") {
            depth += 1;
        } else if t.is_punct(src, "}") {
            depth -= 1;
        } else if depth == 0 && t.is_punct(src, ">") {
            break t.end;
        }
        j += 1;
    };

    let rest = src[open_end..].to_ascii_lowercase();
    let close_rel = rest.find("</style>")?;
    let close_start = open_end + close_rel;
    let close_end = close_start + "</style>".len();

    let content = src[open_end..close_start].trim();
    let css = match content
        .strip_prefix('{')
        .and_then(|c| c.strip_suffix('}'))
        .map(str::trim)
    {
        Some(inner) => inner.strip_prefix('`')?.strip_suffix('`')?.to_string(),
        None if !content.contains('<') => content.to_string(),
        None => return None,
    };

    Some((
        Edit {
            start: open.start,
            end: close_end,
            replacement: String::new(),
        },
        css,
    ))
}

/// `import './x.css';` at token `i`
fn css_import(src: &str, tokens: &[Token], i: usize) -> Option<(Edit, usize)> {
    let import = tokens.get(i)?;
    let spec = tokens.get(i + 1)?;
    if !import.is_ident(src, "import") || spec.kind != TokenKind::String {
        return None;
    }
    if !spec.string_value(src)?.ends_with(".css") {
        return None;
    }

    let (mut end, next) = match tokens.get(i + 2) {
        Some(t) if t.is_punct(src, ";") => (t.end, i + 3),
        _ => (spec.end, i + 2),
    };
    let bytes = src.as_bytes();
    while end < bytes.len() && bytes[end].is_ascii_whitespace() {
        end += 1;
    }

    Some((
        Edit {
            start: import.start,
            end,
            replacement: String::new(),
        },
        next,
    ))
}

/// `styled.tag`css`` or `styled('tag')`css`` at token `i`.
/// Returns `(start, end, tag, css, next_index)`.
fn styled_template(
    src: &str,
    tokens: &[Token],
    i: usize,
) -> Option<(usize, usize, String, String, usize)> {
    let styled = tokens.get(i)?;
    if !styled.is_ident(src, "styled") {
        return None;
    }
    if i > 0 && tokens[i - 1].is_punct(src, ".") {
        return None;
    }

    let (tag, template_index) = match (tokens.get(i + 1), tokens.get(i + 2)) {
        (Some(dot), Some(tag)) if dot.is_punct(src, ".") && tag.kind == TokenKind::Ident => {
            (tag.text(src).to_string(), i + 3)
        }
        (Some(paren), Some(tag)) if paren.is_punct(src, "(") && tag.kind == TokenKind::String => {
            let close = tokens.get(i + 3)?;
            if !close.is_punct(src, ")") {
                return None;
            }
            (tag.string_value(src)?.to_string(), i + 4)
        }
        _ => return None,
    };

    let template = tokens.get(template_index)?;
    if template.kind != TokenKind::Template {
        return None;
    }
    let css = template.string_value(src)?;
    if css.trim().is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    Some((
        styled.start,
        template.end,
        tag,
        css.to_string(),
        template_index + 1,
    ))
}
