//! IPC integration tests: a real Unix socket server with length-delimited
//! MessagePack frames, backed by the in-memory store.

use brain_core::ipc::{BrainRequest, BrainResponse};
use brain_core::{BrainConfig, MemoryCollection, ThoughtStore};
use brain_server::server::run_unix_server;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UnixStream;
use tokio::sync::broadcast;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

async fn connect(path: &std::path::Path) -> UnixStream {
    for _ in 0..50 {
        if let Ok(stream) = UnixStream::connect(path).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("IPC server did not come up at {}", path.display());
}

async fn call(
    framed: &mut Framed<UnixStream, LengthDelimitedCodec>,
    request: &BrainRequest,
) -> BrainResponse {
    let bytes = rmp_serde::to_vec_named(request).unwrap();
    framed.send(Bytes::from(bytes)).await.unwrap();
    let frame = framed.next().await.unwrap().unwrap();
    rmp_serde::from_slice(&frame).unwrap()
}

#[tokio::test]
async fn test_ipc_ping_ingest_list_and_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("brain.sock");
    let socket_str = socket.to_str().unwrap().to_string();

    let store = ThoughtStore::new(Arc::new(MemoryCollection::new()));
    let (tx, _rx) = broadcast::channel(1);
    let shutdown = tx.subscribe();
    let server = tokio::spawn(async move {
        run_unix_server(&socket_str, store, BrainConfig::default(), shutdown).await
    });

    let stream = connect(&socket).await;
    let codec = LengthDelimitedCodec::builder().little_endian().new_codec();
    let mut framed = Framed::new(stream, codec);

    let resp = call(&mut framed, &BrainRequest::Ping).await;
    assert!(resp.is_ok());

    let resp = call(
        &mut framed,
        &BrainRequest::Ingest {
            payload: json!({"content": "bookmark this article", "modality": "link"}),
        },
    )
    .await;
    assert!(resp.is_ok(), "{:?}", resp.error);
    let data = resp.data.unwrap();
    assert_eq!(data["folder"], "reads");
    let id = data["id"].clone();

    let resp = call(
        &mut framed,
        &BrainRequest::List {
            folder: Some("reads".to_string()),
            limit: Some(10),
        },
    )
    .await;
    let data = resp.data.unwrap();
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["items"][0]["id"], id);

    let resp = call(
        &mut framed,
        &BrainRequest::Ingest {
            payload: json!({"content": "x", "modality": "smoke-signal"}),
        },
    )
    .await;
    assert!(!resp.is_ok());

    tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not shut down");
    assert!(result.unwrap().is_ok());
    assert!(!socket.exists(), "socket file should be removed on shutdown");
}

#[tokio::test]
async fn test_ipc_garbage_frame_gets_error_response() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("brain.sock");
    let socket_str = socket.to_str().unwrap().to_string();

    let store = ThoughtStore::new(Arc::new(MemoryCollection::new()));
    let (tx, _rx) = broadcast::channel(1);
    let shutdown = tx.subscribe();
    tokio::spawn(async move {
        run_unix_server(&socket_str, store, BrainConfig::default(), shutdown).await
    });

    let stream = connect(&socket).await;
    let codec = LengthDelimitedCodec::builder().little_endian().new_codec();
    let mut framed = Framed::new(stream, codec);

    framed.send(Bytes::from_static(b"\xc1not msgpack")).await.unwrap();
    let frame = framed.next().await.unwrap().unwrap();
    let resp: BrainResponse = rmp_serde::from_slice(&frame).unwrap();
    assert!(!resp.is_ok());
    assert!(resp.error.unwrap().contains("Deserialization error"));

    let _ = tx.send(());
}
