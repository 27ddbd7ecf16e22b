//! Browser delivery wrapper for compiled fractal code

/// Wrap CommonJS output in an expression that evaluates to `module.exports`.
///
/// `require('react')` resolves to `window.React`; any other name goes through
/// the host's module table at `window.__fractalModules`, falling back to an
/// empty object.
pub fn wrap_commonjs(compiled: &str) -> String {
    format!(
        "(function() {{
  const module = {{ exports: {{}} }};
  const exports = module.exports;
  const React = window.React;
  const require = (name) =>
    name === 'react' ? window.React :
    window.__fractalModules?.getModule(name) || {{}};

  {compiled}

  return module.exports;
}})()"
    )
}
