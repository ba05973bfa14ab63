/*!
 * HTTP Tests
 * Round trip through the axum server on an ephemeral port
 */

use file_service::api::serve;
use file_service::{FileEngine, SandboxRoot};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_round_trip() {
    let temp = TempDir::new().unwrap();
    let engine = FileEngine::new(SandboxRoot::new(temp.path()).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, engine, async move {
        let _ = stop_rx.await;
    }));

    let client = reqwest::Client::new();
    let url = format!("http://{}/filesystem", addr);

    let created: Value = client
        .post(&url)
        .json(&json!({
            "jsonrpc": "2.0",
            "method": "create",
            "params": [{"path": "hello.txt", "directory": false}],
            "id": 1
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created, json!({"jsonrpc": "2.0", "result": null, "id": 1}));

    let response = client
        .post(&url)
        .json(&json!({
            "jsonrpc": "2.0",
            "method": "getFileInfo",
            "params": {"path": "missing.txt"},
            "id": 2
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let missing: Value = response.json().await.unwrap();
    assert_eq!(missing["error"]["code"], json!(-32001));

    let notified = client
        .post(&url)
        .json(&json!({
            "jsonrpc": "2.0",
            "method": "append",
            "params": {"path": "hello.txt", "data": "hi"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(notified.status(), reqwest::StatusCode::NO_CONTENT);
    assert!(notified.bytes().await.unwrap().is_empty());

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], json!("healthy"));

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
    assert_eq!(std::fs::read_to_string(temp.path().join("hello.txt")).unwrap(), "hi");
}
