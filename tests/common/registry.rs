//! In-process registry over a real socket

use std::net::SocketAddr;
use std::sync::Arc;

use fractal::domain::services::FractalCompiler;
use fractal::infrastructure::EsbuildBundler;
use fractal::{RegistryRouter, RegistryServer, RegistryStore};
use tokio::sync::oneshot;

use super::env::TestEnv;

/// A running registry; dropping it stops the server
pub struct TestRegistry {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestRegistry {
    /// Registry storing under `<project>/store`, compiling with the
    /// fake bundler. Call from within a tokio runtime.
    pub async fn start(env: &TestEnv) -> Self {
        Self::start_with(env, |router| router).await
    }

    pub async fn start_with(
        env: &TestEnv,
        configure: impl FnOnce(RegistryRouter) -> RegistryRouter,
    ) -> Self {
        let compiler = FractalCompiler::new(Arc::new(EsbuildBundler::new(env.esbuild.clone())));
        let store = RegistryStore::open(env.project_path("store"), compiler).unwrap();
        let router = configure(RegistryRouter::new(Arc::new(store)));

        let server = RegistryServer::bind("127.0.0.1:0".parse().unwrap(), router)
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(server.run_until(async {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestRegistry {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
