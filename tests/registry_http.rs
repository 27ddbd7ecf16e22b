//! Registry HTTP API over a real socket
#![cfg(unix)]

mod common;

use common::*;
use serde_json::{json, Value};

const ENCODED_BUTTON: &str = "acme-widgets%3A%3Abutton%3A%3A1.2.0";

async fn publish(client: &reqwest::Client, base: &str, id: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{base}/fractals/{id}"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let env = TestEnv::new();
    let registry = TestRegistry::start(&env).await;

    let response = reqwest::get(format!("{}/health", registry.url())).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn publish_then_fetch_round_trip() {
    let env = TestEnv::new();
    let registry = TestRegistry::start(&env).await;
    let client = reqwest::Client::new();
    let base = registry.url();

    let manifest = json!({"name": BUTTON_ID, "dependencies": {"production": {"react": "^18.2.0"}}});
    let response = publish(
        &client,
        &base,
        ENCODED_BUTTON,
        json!({"source": BUTTON_TSX, "manifest": manifest}),
    )
    .await;
    assert_eq!(response.status(), 200);
    let receipt: Value = response.json().await.unwrap();
    assert_eq!(receipt["id"], BUTTON_ID);
    assert_eq!(receipt["hasManifest"], true);
    assert!(receipt["createdAt"].is_string());

    let metadata: Value = client
        .get(format!("{base}/fractals/{ENCODED_BUTTON}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(metadata["url"], format!("{base}/fractals/{ENCODED_BUTTON}/code"));
    assert_eq!(
        metadata["manifestUrl"],
        format!("{base}/fractals/{ENCODED_BUTTON}/manifest")
    );
    assert_eq!(metadata["hasManifest"], true);

    let code = client
        .get(metadata["url"].as_str().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(code.status(), 200);
    assert!(code.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/javascript"));
    let code = code.text().await.unwrap();
    assert!(code.contains("module.exports"), "{code}");
    assert!(code.contains("window.__fractalModules"), "{code}");

    let stored_manifest: Value = client
        .get(metadata["manifestUrl"].as_str().unwrap())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored_manifest, manifest);

    // the record survives on disk under the encoded id
    assert!(env
        .project_path(&format!("store/{ENCODED_BUTTON}.json"))
        .is_file());

    let list: Value = client
        .get(format!("{base}/fractals"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!({"fractals": [BUTTON_ID]}));
}

#[tokio::test]
async fn missing_directive_is_rejected() {
    let env = TestEnv::new();
    let registry = TestRegistry::start(&env).await;
    let client = reqwest::Client::new();

    let response = publish(
        &client,
        &registry.url(),
        "plain",
        json!({"source": "export default () => null;"}),
    )
    .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing fractal directive");

    let missing = client
        .get(format!("{}/fractals/plain", registry.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn bundler_rejection_is_unprocessable() {
    let env = TestEnv::new();
    let registry = TestRegistry::start(&env).await;

    let response = publish(
        &reqwest::Client::new(),
        &registry.url(),
        "broken",
        json!({"source": BROKEN_TSX}),
    )
    .await;

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn unknown_code_is_an_empty_404() {
    let env = TestEnv::new();
    let registry = TestRegistry::start(&env).await;

    let response = reqwest::get(format!("{}/fractals/nothing/code", registry.url()))
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn public_url_overrides_the_host() {
    let env = TestEnv::new();
    let registry = TestRegistry::start_with(&env, |router| {
        router.with_public_url(Some("https://fractals.example.com".to_string()))
    })
    .await;
    let client = reqwest::Client::new();

    publish(&client, &registry.url(), "button-fractal", json!({"source": BUTTON_TSX})).await;
    let metadata: Value = client
        .get(format!("{}/fractals/button-fractal", registry.url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        metadata["url"],
        "https://fractals.example.com/fractals/button-fractal/code"
    );
    assert_eq!(metadata["hasManifest"], false);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let env = TestEnv::new();
    let registry =
        TestRegistry::start_with(&env, |router| router.with_max_body_bytes(64)).await;

    let response = publish(
        &reqwest::Client::new(),
        &registry.url(),
        "big",
        json!({"source": format!("'use fractal';\n{}", "x".repeat(1024))}),
    )
    .await;

    assert_eq!(response.status(), 413);
}
