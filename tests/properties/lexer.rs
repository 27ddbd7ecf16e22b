//! Property tests for the JavaScript lexer and the analyses built on it.

use proptest::prelude::*;

use fractal::domain::services::{extract_styles, strip_directive, tokenize};
use fractal::domain::value_objects::starts_with_directive;

/// Fragments that exercise the lexer's hard cases
fn js_like() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("'use fractal';".to_string()),
        Just("\"str\\\"ing\"".to_string()),
        Just("`tpl ${a + `in${b}`} end`".to_string()),
        Just("/re[/]x/g".to_string()),
        Just("a / b / c".to_string()),
        Just("// line\n".to_string()),
        Just("/* block */".to_string()),
        Just("<div className=\"x\">it's</div>".to_string()),
        Just("<style>{`.a{}`}</style>".to_string()),
        Just("import x from 'y';".to_string()),
        "[ -~\n]{0,12}",
    ];
    proptest::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: tokenizing never panics and spans stay ordered and in bounds.
    #[test]
    fn property_tokenize_is_total(src in any::<String>()) {
        let tokens = tokenize(&src);
        let mut last_end = 0;
        for t in &tokens {
            prop_assert!(t.start >= last_end && t.start < t.end && t.end <= src.len());
            prop_assert!(src.is_char_boundary(t.start) && src.is_char_boundary(t.end));
            last_end = t.end;
        }
    }

    /// PROPERTY: the same holds for JavaScript-shaped input.
    #[test]
    fn property_tokenize_js_like(src in js_like()) {
        let tokens = tokenize(&src);
        prop_assert!(tokens.iter().all(|t| t.end <= src.len()));
    }

    /// PROPERTY: stripping the directive leaves a source without one.
    #[test]
    fn property_strip_directive_removes_it(body in js_like()) {
        let src = format!("'use fractal';\n{body}");
        prop_assert!(starts_with_directive(&src));
        let stripped = strip_directive(&src).unwrap();
        prop_assert!(stripped.len() < src.len());
        prop_assert!(stripped.ends_with(&body));
    }

    /// PROPERTY: style extraction never panics and never grows a style-free source.
    #[test]
    fn property_style_extraction_is_total(src in js_like()) {
        let out = extract_styles(&src, "acme::card::1.0.0");
        if out.styles.is_none() && !src.contains("styled") {
            prop_assert!(out.code.len() <= src.len());
        }
    }
}
