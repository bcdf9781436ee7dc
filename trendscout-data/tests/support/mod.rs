//! Minimal in-process stand-in for the trends bridge service.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use url::Url;

/// How the fake bridge answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMode {
    /// Six rising queries per seed, two of them headline garbage.
    Healthy,
    /// Related queries succeed; interest lookups fail with a server error.
    BrokenInterest,
    /// Every request hangs well past any client timeout.
    Stalled,
}

/// Start the fake bridge on `runtime` and return its base URL.
pub fn spawn_bridge(runtime: &Runtime, mode: BridgeMode) -> String {
    runtime.block_on(async move {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|err| panic!("bind fake bridge: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("fake bridge address: {err}"));
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(handle(stream, mode));
            }
        });
        format!("http://{addr}")
    })
}

async fn handle(mut stream: TcpStream, mode: BridgeMode) {
    let Some(target) = read_target(&mut stream).await else {
        return;
    };
    if mode == BridgeMode::Stalled {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    let (status, body) = respond(&target, mode);
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_target(stream: &mut TcpStream) -> Option<String> {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        request.extend_from_slice(chunk.get(..read)?);
    }
    let text = String::from_utf8_lossy(&request);
    text.split_whitespace().nth(1).map(str::to_owned)
}

fn respond(target: &str, mode: BridgeMode) -> (&'static str, String) {
    let Ok(url) = Url::parse(&format!("http://bridge{target}")) else {
        return ("400 Bad Request", "{}".to_owned());
    };
    let terms: Vec<String> = url
        .query_pairs()
        .filter(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .collect();
    match url.path() {
        "/related" => ("200 OK", related_body(&terms)),
        "/interest" if mode == BridgeMode::BrokenInterest => {
            ("500 Internal Server Error", "{}".to_owned())
        }
        "/interest" => ("200 OK", interest_body(&terms)),
        _ => ("404 Not Found", "{}".to_owned()),
    }
}

fn related_body(seeds: &[String]) -> String {
    let rising: serde_json::Map<String, serde_json::Value> = seeds
        .iter()
        .map(|seed| {
            let queries = [
                format!("{seed} planner"),
                format!("why does {seed} keep failing?"),
                format!("{seed} ______ quiz"),
                format!("{seed} checker"),
                format!("{seed} scanner"),
                format!("{seed} sixth result"),
            ]
            .into_iter()
            .map(|query| serde_json::json!({ "query": query }))
            .collect();
            (seed.clone(), serde_json::Value::Array(queries))
        })
        .collect();
    serde_json::json!({ "rising": rising }).to_string()
}

fn interest_body(keywords: &[String]) -> String {
    let series: serde_json::Map<String, serde_json::Value> = keywords
        .iter()
        .map(|keyword| (keyword.clone(), serde_json::json!(vec![50.0; 14])))
        .collect();
    serde_json::json!({ "series": series }).to_string()
}
