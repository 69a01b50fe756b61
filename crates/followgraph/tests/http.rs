//! Integration tests for the HTTP page source against a local server.
//!
//! A minimal one-request-per-connection HTTP server replays canned
//! responses and records the request heads it received.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use followgraph::{
    AccountId, Cursor, Error, FriendsListClient, PageSource, Session, fetch_following,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct Canned {
    status: &'static str,
    body: &'static str,
}

/// Serve `responses` in order, one per connection. Returns the base URL and
/// the recorded request heads.
async fn serve(responses: Vec<Canned>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/i/api", listener.local_addr().unwrap());
    let heads = Arc::new(Mutex::new(Vec::new()));

    let recorded = Arc::clone(&heads);
    tokio::spawn(async move {
        for canned in responses {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            recorded
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&head).into_owned());

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                canned.status,
                canned.body.len(),
                canned.body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });

    (base_url, heads)
}

fn session() -> Session {
    let mut session = Session::default();
    session
        .headers
        .insert("x-csrf-token".into(), "csrf-value".into());
    session.cookies.insert("ct0".into(), "csrf-value".into());
    session.cookies.insert("auth_token".into(), "secret".into());
    session
}

const PAGE_ONE: &str = r#"{"next_cursor_str":"1815661646446788134","users":[{"id_str":"12","screen_name":"jack","name":"jack","description":"","followers_count":6500000,"url":null}]}"#;
const PAGE_TWO: &str = r#"{"next_cursor_str":"0","users":[{"id_str":"44196397","screen_name":"elonmusk","name":"Elon Musk","description":"","followers_count":200000000,"url":null}]}"#;

#[tokio::test]
async fn request_carries_query_and_session() {
    let (base_url, heads) = serve(vec![Canned { status: "200 OK", body: PAGE_ONE }]).await;
    let client = FriendsListClient::new(&base_url, 100, Duration::from_secs(5), &session()).unwrap();

    let page = client
        .fetch_page(AccountId(1_312_083_283), &Cursor::Start)
        .await
        .unwrap();

    assert_eq!(page.profiles.len(), 1);
    assert_eq!(page.profiles[0].handle, "jack");

    let head = heads.lock().unwrap()[0].to_lowercase();
    assert!(head.starts_with(
        "get /i/api/1.1/friends/list.json?include_followed_by=1&user_id=1312083283&count=100&cursor=-1 "
    ), "{head}");
    assert!(head.contains("x-csrf-token: csrf-value"), "{head}");
    assert!(head.contains("cookie: auth_token=secret; ct0=csrf-value"), "{head}");
}

#[tokio::test]
async fn non_success_status_is_transient_error() {
    let (base_url, _) = serve(vec![Canned {
        status: "429 Too Many Requests",
        body: r#"{"errors":[{"code":88}]}"#,
    }])
    .await;
    let client =
        FriendsListClient::new(&base_url, 100, Duration::from_secs(5), &Session::default()).unwrap();

    let err = client
        .fetch_page(AccountId(1), &Cursor::Start)
        .await
        .unwrap_err();

    assert!(err.is_transient());
    match err {
        Error::Status { status, url } => {
            assert_eq!(status.as_u16(), 429);
            assert!(url.ends_with("/1.1/friends/list.json"));
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (base_url, _) = serve(vec![Canned { status: "200 OK", body: "{\"users\": [" }]).await;
    let client =
        FriendsListClient::new(&base_url, 100, Duration::from_secs(5), &Session::default()).unwrap();

    let err = client
        .fetch_page(AccountId(1), &Cursor::Start)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

// Real time: a paused clock would auto-advance into the request timeout
// while the client waits on the socket.
#[tokio::test]
async fn full_walk_follows_the_server_cursor() {
    let (base_url, heads) = serve(vec![
        Canned { status: "200 OK", body: PAGE_ONE },
        Canned { status: "200 OK", body: PAGE_TWO },
    ])
    .await;
    let client =
        FriendsListClient::new(&base_url, 50, Duration::from_secs(5), &Session::default()).unwrap();

    let profiles = fetch_following(&client, AccountId(1_312_083_283)).await.unwrap();

    let handles: Vec<_> = profiles.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["jack", "elonmusk"]);
    let heads = heads.lock().unwrap();
    assert_eq!(heads.len(), 2);
    assert!(heads[1].contains("count=50&cursor=1815661646446788134 "), "{}", heads[1]);
}
