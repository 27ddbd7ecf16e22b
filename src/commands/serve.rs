use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use fractal::domain::services::FractalCompiler;
use fractal::infrastructure::EsbuildBundler;
use fractal::{FractalError, RegistryRouter, RegistryServer, RegistryStore};

use crate::ui::context::UiContext;

pub fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    storage: Option<PathBuf>,
    ui: UiContext,
) -> Result<()> {
    let config = super::load_config(Path::new("."), &ui)?;
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);
    let storage = storage.unwrap_or(config.server.storage);

    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("invalid --host '{host}'; expected an IP address"))?;
    let addr = SocketAddr::new(ip, port);

    let compiler = FractalCompiler::new(Arc::new(EsbuildBundler::new(config.bundler.esbuild)))
        .with_target(config.bundler.server_target);
    let store = RegistryStore::open(&storage, compiler).map_err(FractalError::from)?;
    let public_url = config.server.public_url.clone();
    let router = RegistryRouter::new(Arc::new(store))
        .with_public_url(public_url.clone())
        .with_max_body_bytes(config.server.max_body_bytes);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    runtime.block_on(async move {
        let server = RegistryServer::bind(addr, router)
            .await
            .with_context(|| format!("binding {addr}"))?;
        let local = server.local_addr()?;

        if ui.json {
            crate::ui::json::emit_for(
                "serve",
                serde_json::json!({
                    "event": "listening",
                    "address": local.to_string(),
                    "storage": storage.display().to_string(),
                }),
            )?;
        } else {
            print!(
                "{}",
                crate::ui::views::serve::render_serve_header(
                    local,
                    &storage,
                    public_url.as_deref(),
                    ui.color,
                    ui.unicode,
                )
            );
        }

        server
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "could not listen for Ctrl+C");
                    std::future::pending::<()>().await;
                }
            })
            .await;
        anyhow::Ok(())
    })
}
