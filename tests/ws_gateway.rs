//! Integration tests: WebSocket admission, echo, fan-out, and the admin API
//! against a live server on an ephemeral port.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use companion_gateway::app_state::AppState;
use companion_gateway::domain::ConnectionRegistry;
use companion_gateway::server::build_app;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> SocketAddr {
    let registry = Arc::new(ConnectionRegistry::new());
    let app = build_app(AppState::new(registry, 16), Duration::from_secs(5));

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn connect(addr: SocketAddr, query: &str) -> Client {
    let url = format!("ws://{addr}/ws{query}");
    let Ok((client, _)) = tokio_tungstenite::connect_async(url).await else {
        panic!("websocket handshake failed");
    };
    client
}

async fn active_connections(addr: SocketAddr) -> Vec<String> {
    let Ok(response) = reqwest::get(format!("http://{addr}/active-connections")).await else {
        panic!("active-connections request failed");
    };
    let Ok(body) = response.json::<Value>().await else {
        panic!("active-connections body is not json");
    };
    let Some(list) = body["activeConnections"].as_array() else {
        panic!("activeConnections is not an array: {body}");
    };
    list.iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Polls the admin listing until `predicate` holds (registration and
/// unregistration happen on the server's socket task).
async fn wait_for<F>(addr: SocketAddr, predicate: F)
where
    F: Fn(&[String]) -> bool,
{
    for _ in 0..100 {
        if predicate(&active_connections(addr).await) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not reached in time");
}

async fn notify(addr: SocketAddr, body: Value) -> Value {
    let client = reqwest::Client::new();
    let Ok(response) = client
        .post(format!("http://{addr}/notify-user"))
        .json(&body)
        .send()
        .await
    else {
        panic!("notify-user request failed");
    };
    let Ok(body) = response.json::<Value>().await else {
        panic!("notify-user body is not json");
    };
    body
}

async fn next_json(client: &mut Client) -> Value {
    let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(2), client.next()).await
    else {
        panic!("no frame received");
    };
    let Ok(text) = msg.into_text() else {
        panic!("frame is not text");
    };
    let Ok(value) = serde_json::from_str(text.as_str()) else {
        panic!("frame is not json: {}", text.as_str());
    };
    value
}

#[tokio::test]
async fn missing_user_id_is_closed_with_4001() {
    let addr = start_server().await;
    let mut client = connect(addr, "").await;

    let Ok(Some(Ok(Message::Close(Some(frame))))) =
        tokio::time::timeout(Duration::from_secs(2), client.next()).await
    else {
        panic!("expected a close frame");
    };
    assert_eq!(u16::from(frame.code), 4001);
    assert_eq!(frame.reason.as_str(), "User ID is required");
    assert!(active_connections(addr).await.is_empty());
}

#[tokio::test]
async fn blank_user_id_is_closed_with_4001() {
    let addr = start_server().await;
    let mut client = connect(addr, "?userId=").await;

    let Ok(Some(Ok(Message::Close(Some(frame))))) =
        tokio::time::timeout(Duration::from_secs(2), client.next()).await
    else {
        panic!("expected a close frame");
    };
    assert_eq!(u16::from(frame.code), 4001);
}

#[tokio::test]
async fn whitespace_user_id_is_closed_with_4001() {
    let addr = start_server().await;
    let mut client = connect(addr, "?userId=%20%20").await;

    let Ok(Some(Ok(Message::Close(Some(frame))))) =
        tokio::time::timeout(Duration::from_secs(2), client.next()).await
    else {
        panic!("expected a close frame");
    };
    assert_eq!(u16::from(frame.code), 4001);
    assert!(active_connections(addr).await.is_empty());
}

#[tokio::test]
async fn inbound_frames_are_echoed() {
    let addr = start_server().await;
    let mut client = connect(addr, "?userId=echo").await;

    assert!(client.send(Message::text(r#"{"hello":"world"}"#)).await.is_ok());
    assert_eq!(next_json(&mut client).await, json!({"hello": "world"}));
}

#[tokio::test]
async fn notification_fans_out_to_every_connection() {
    let addr = start_server().await;
    let mut a = connect(addr, "?userId=u1").await;
    let mut b = connect(addr, "?userId=u1").await;
    wait_for(addr, |users| users == ["u1".to_string()]).await;

    let ack = notify(
        addr,
        json!({"userId": "u1", "notification": {"message": "msg", "type": "info", "extra": 1}}),
    )
    .await;
    assert_eq!(ack, json!({"status": "Notification sent"}));

    let expected = json!({"notification": {"message": "msg", "type": "info", "extra": 1}});
    assert_eq!(next_json(&mut a).await, expected);
    assert_eq!(next_json(&mut b).await, expected);
}

#[tokio::test]
async fn closing_last_connection_removes_user() {
    let addr = start_server().await;
    let mut a = connect(addr, "?userId=u1").await;
    let mut b = connect(addr, "?userId=u1").await;
    wait_for(addr, |users| users.contains(&"u1".to_string())).await;

    assert!(a.close(None).await.is_ok());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(active_connections(addr).await, vec!["u1".to_string()]);

    // Remaining connection still receives notifications.
    notify(addr, json!({"userId": "u1", "notification": "still here"})).await;
    let frame = next_json(&mut b).await;
    assert_eq!(frame["notification"]["message"], json!("still here"));

    assert!(b.close(None).await.is_ok());
    wait_for(addr, <[String]>::is_empty).await;
}

#[tokio::test]
async fn notifying_offline_user_is_acknowledged() {
    let addr = start_server().await;
    let ack = notify(
        addr,
        json!({"userId": "nonexistent-user", "notification": {"message": "hello", "type": "info"}}),
    )
    .await;
    assert_eq!(ack, json!({"status": "Notification sent"}));
}

#[tokio::test]
async fn health_reports_live_connections() {
    let addr = start_server().await;
    let _client = connect(addr, "?userId=u1").await;
    wait_for(addr, |users| !users.is_empty()).await;

    let Ok(response) = reqwest::get(format!("http://{addr}/health")).await else {
        panic!("health request failed");
    };
    let body = tokio_test::assert_ok!(response.json::<Value>().await);
    assert_eq!(body["activeUsers"], json!(1));
    assert_eq!(body["activeConnections"], json!(1));
}
