use fixtures::{spawn_on_ephemeral_port, EndpointScript, SubmitEndpoint};
use serde_json::{json, Value};

async fn get_json(client: &reqwest::Client, url: &str) -> Value {
    let response = client.get(url).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_static_replies() {
    let endpoint = SubmitEndpoint::new(EndpointScript::default());
    let (base, server) = spawn_on_ephemeral_port(endpoint.router()).await.unwrap();
    let client = reqwest::Client::new();

    assert_eq!(
        get_json(&client, &format!("{base}/success.json")).await,
        json!({ "status": "success" })
    );

    let error = get_json(&client, &format!("{base}/error.json")).await;
    assert_eq!(error["status"], "error");
    assert!(error["reason"].as_str().is_some_and(|r| !r.is_empty()));

    assert_eq!(
        get_json(&client, &format!("{base}/progress.json")).await,
        json!({ "status": "progress", "timeout": 1000 })
    );

    assert_eq!(
        get_json(&client, &format!("{base}/unknown.json")).await,
        json!({ "status": "queued" })
    );

    server.abort();
}

#[tokio::test]
async fn test_broken_route_is_not_json() {
    let endpoint = SubmitEndpoint::new(EndpointScript::default());
    let (base, server) = spawn_on_ephemeral_port(endpoint.router()).await.unwrap();

    let body = reqwest::get(format!("{base}/broken"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(serde_json::from_str::<Value>(&body).is_err());

    server.abort();
}

#[tokio::test]
async fn test_scripted_route_over_http() {
    let endpoint = SubmitEndpoint::new(EndpointScript::error_after(1, 25, "Duplicate phone"));
    let (base, server) = spawn_on_ephemeral_port(endpoint.router()).await.unwrap();
    let client = reqwest::Client::new();
    let url = format!("{base}/submit");

    assert_eq!(
        get_json(&client, &url).await,
        json!({ "status": "progress", "timeout": 25 })
    );
    assert_eq!(
        get_json(&client, &url).await,
        json!({ "status": "error", "reason": "Duplicate phone" })
    );
    assert_eq!(endpoint.hits(), 2);

    server.abort();
}
