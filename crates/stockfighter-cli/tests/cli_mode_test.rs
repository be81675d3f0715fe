use serde_json::json;
use tokio::process::Command;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stockfighter(server: &MockServer) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_stockfighter"));
    command
        .env("STOCKFIGHTER_BASE_URL", server.uri())
        .env("STOCKFIGHTER_API_KEY", "cli-test-key")
        .args(["--log-level", "error"]);
    command
}

#[tokio::test]
async fn cli_quote_prints_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ob/api/venues/TESTEX/stocks/FOOBAR/quote"))
        .and(header("X-Starfighter-Authorization", "cli-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "bid": 5100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = stockfighter(&server)
        .args(["quote", "TESTEX", "FOOBAR"])
        .output()
        .await
        .expect("Failed to start stockfighter binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(printed["bid"], 5100);
}

#[tokio::test]
async fn cli_order_posts_wire_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ob/api/venues/TESTEX/stocks/FOOBAR/orders"))
        .and(body_string(
            r#"{"account":"EXB123456","venue":"TESTEX","symbol":"FOOBAR","price":12300,"qty":100,"direction":"buy","orderType":"limit"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "id": 99})))
        .expect(1)
        .mount(&server)
        .await;

    let output = stockfighter(&server)
        .args([
            "order", "TESTEX", "FOOBAR", "--account", "EXB123456", "--price", "12300", "--qty",
            "100", "--direction", "buy",
        ])
        .output()
        .await
        .expect("Failed to start stockfighter binary");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[tokio::test]
async fn cli_api_failure_exits_non_zero_but_prints_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gm/instances/7/stop"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "instance not found"})),
        )
        .mount(&server)
        .await;

    let output = stockfighter(&server)
        .args(["level", "stop", "7"])
        .output()
        .await
        .expect("Failed to start stockfighter binary");

    assert!(!output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(printed["error"], "instance not found");
}

#[tokio::test]
async fn cli_missing_api_key_is_rejected() {
    let server = MockServer::start().await;
    let output = Command::new(env!("CARGO_BIN_EXE_stockfighter"))
        .env_remove("STOCKFIGHTER_API_KEY")
        .env("STOCKFIGHTER_BASE_URL", server.uri())
        .arg("heartbeat")
        .output()
        .await
        .expect("Failed to start stockfighter binary");

    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
