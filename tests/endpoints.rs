//! End-to-end tests over real TCP connections.

use std::time::Duration;

use greeter_service::http::Reflection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn root_returns_greeting() {
    let server = common::start_server().await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(res.text().await.unwrap(), "Hello!");

    server.shutdown.trigger();
}

#[tokio::test]
async fn goaway_returns_go() {
    let server = common::start_server().await;

    let res = common::client().get(server.url("/goaway")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Go!");

    server.shutdown.trigger();
}

#[tokio::test]
async fn reflect_echoes_request_headers() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/reflect"))
        .header("X-Test", "abc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");

    let reflection: Reflection = res.json().await.unwrap();
    assert_eq!(reflection.headers["X-Test"], "abc");
    assert_eq!(reflection.headers["Host"], server.addr.to_string());

    server.shutdown.trigger();
}

#[tokio::test]
async fn unknown_path_is_404_and_wrong_method_is_405() {
    let server = common::start_server().await;
    let client = common::client();

    for path in ["/missing", "/goaway/extra", "/Reflect"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 404, "{path}");
    }

    for path in ["/", "/goaway", "/reflect"] {
        let res = client.post(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 405, "{path}");
        let res = client.delete(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 405, "{path}");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let server = common::start_server().await;
    let client = common::client();

    let mut bodies = Vec::new();
    for _ in 0..5 {
        let res = client
            .get(server.url("/reflect"))
            .header("X-Test", "same")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        bodies.push(res.text().await.unwrap());
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));

    server.shutdown.trigger();
}

#[tokio::test]
async fn serves_concurrent_clients() {
    let server = common::start_server().await;
    let client = common::client();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let client = client.clone();
        let url = server.url("/");
        handles.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            (res.status().as_u16(), res.text().await.unwrap())
        }));
    }

    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, "Hello!");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn broken_connections_do_not_stop_the_listener() {
    let server = common::start_server().await;

    // Garbage instead of a request line.
    let mut garbage = TcpStream::connect(server.addr).await.unwrap();
    garbage.write_all(b"\x00\x01\x02 not http\r\n\r\n").await.unwrap();
    let mut sink = Vec::new();
    let _ = tokio::time::timeout(Duration::from_secs(2), garbage.read_to_end(&mut sink)).await;

    // Request cut off halfway through the headers.
    let mut truncated = TcpStream::connect(server.addr).await.unwrap();
    truncated.write_all(b"GET / HTTP/1.1\r\nHost: x").await.unwrap();
    drop(truncated);

    tokio::time::sleep(Duration::from_millis(50)).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Hello!");

    server.shutdown.trigger();
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let server = common::start_server().await;
    let addr = server.addr;

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());

    assert!(TcpStream::connect(addr).await.is_err());
}
