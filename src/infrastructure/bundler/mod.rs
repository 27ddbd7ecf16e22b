//! Bundler adapters

mod esbuild;

pub use esbuild::EsbuildBundler;
