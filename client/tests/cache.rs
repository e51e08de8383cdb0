//! Response cache behavior across the transport.

mod common;

use std::time::Duration;

use common::*;
use pretty_assertions::assert_eq;
use restorm_client::{Method, ModelOps, RequestOptions};
use serde_json::json;

#[tokio::test]
async fn repeated_get_within_ttl_skips_the_transport() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));
    handler.queue(json!([{ "id": 1 }]));

    let first = User::all(&client).await.unwrap();
    let second = User::all(&client).await.unwrap();

    assert_eq!(handler.calls(), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn expired_entry_is_refetched_and_refreshed() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(40));
    handler.queue(json!([{ "id": 1 }]));
    handler.queue(json!([{ "id": 1 }, { "id": 2 }]));

    let first = User::all(&client).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    let second = User::all(&client).await.unwrap();

    assert_eq!(handler.calls(), 2);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);

    // the refetch refreshed the cache
    let third = User::all(&client).await.unwrap();
    assert_eq!(handler.calls(), 2);
    assert_eq!(third.len(), 2);
}

#[tokio::test]
async fn differently_filtered_requests_do_not_collide() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));
    handler.queue(json!([{ "id": 1, "status": "active" }]));
    handler.queue(json!([]));

    let active = User::filter(&client, json!({ "status": "active" })).all().await.unwrap();
    let archived = User::filter(&client, json!({ "status": "archived" })).all().await.unwrap();

    assert_eq!(handler.calls(), 2);
    assert_eq!(active.len(), 1);
    assert_eq!(archived.len(), 0);
}

#[tokio::test]
async fn writes_bypass_the_cache_entirely() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));
    handler.queue(json!({ "id": 1 }));
    handler.queue(json!({ "id": 2 }));

    let _ = User::create(&client, json!({ "name": "A" })).await.unwrap();
    let _ = User::create(&client, json!({ "name": "B" })).await.unwrap();

    // both POSTs reached the transport, and nothing landed in the cache
    assert_eq!(handler.calls(), 2);
    assert!(client.get_cache("users").is_none());
}

#[tokio::test]
async fn failed_calls_never_populate_the_cache() {
    let handler = FailingHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));

    assert!(User::all(&client).await.is_err());
    assert!(User::all(&client).await.is_err());

    assert_eq!(handler.calls(), 2);
    assert!(client.get_cache("users").is_none());
}

#[tokio::test]
async fn manual_invalidation_forces_a_refetch() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));
    handler.queue(json!([{ "id": 1 }]));
    handler.queue(json!([{ "id": 1 }, { "id": 2 }]));

    let _ = User::all(&client).await.unwrap();
    assert!(client.get_cache("users").is_some());

    client.delete_cache("users");
    let refreshed = User::all(&client).await.unwrap();

    assert_eq!(handler.calls(), 2);
    assert_eq!(refreshed.len(), 2);
}

#[tokio::test]
async fn clear_cache_drops_every_entry() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));
    handler.queue(json!([]));
    handler.queue(json!([]));

    let _ = User::all(&client).await.unwrap();
    let _ = Media::query(&client).all().await.unwrap();
    assert!(client.get_cache("users").is_some());
    assert!(client.get_cache("medias").is_some());

    client.clear_cache();
    assert!(client.get_cache("users").is_none());
    assert!(client.get_cache("medias").is_none());
}

#[tokio::test]
async fn cached_payload_is_returned_verbatim() {
    let handler = MockHandler::new();
    let client = cached_client_with(handler.clone(), Duration::from_millis(1000));
    handler.queue(json!([{ "id": 7, "name": "Cedric" }]));

    let _ = client.call("users", RequestOptions::default()).await.unwrap();
    let entry = client.get_cache("users").unwrap();
    assert_eq!(entry.data, json!([{ "id": 7, "name": "Cedric" }]));

    let again = client
        .call("users", RequestOptions::default().method(Method::GET))
        .await
        .unwrap();
    assert_eq!(again, json!([{ "id": 7, "name": "Cedric" }]));
}
