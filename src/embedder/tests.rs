use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use super::*;

#[test]
fn test_batching_small() {
    let batcher = Batcher::new(3);
    let items = vec![
        "sent1".to_string(),
        "sent2".to_string(),
        "sent3".to_string(),
        "sent4".to_string(),
        "sent5".to_string(),
    ];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 3);
    assert_eq!(batches[1].len(), 2);
}

#[test]
fn test_batching_exact_size() {
    let batcher = Batcher::new(5);
    let items = vec!["a".to_string(); 10];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 5);
    assert_eq!(batches[1].len(), 5);
}

#[test]
fn test_batching_empty() {
    let batcher = Batcher::new(100);
    let items: Vec<String> = vec![];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 0);
}

#[test]
fn test_batch_size_floor_is_one() {
    let batcher = Batcher::new(0);
    let items = vec!["a".to_string(), "b".to_string()];
    assert_eq!(batcher.split(&items).len(), 2);
}

#[test]
fn test_model_info_default() {
    let model = EmbeddingModelInfo::default();
    assert_eq!(model.name, "sentence-transformers/all-MiniLM-L6-v2");
    assert_eq!(model.dim, 384);
    assert_eq!(model.max_batch, 32);
}

#[test]
fn test_model_info_custom() {
    let model = EmbeddingModelInfo::new("custom-model", 768, 64);
    assert_eq!(model.name, "custom-model");
    assert_eq!(model.dim, 768);
    assert_eq!(model.max_batch, 64);
}

#[test]
fn test_registry_shares_one_handle_per_device() {
    let registry = ModelRegistry::new("http://localhost:18115", EmbeddingModelInfo::default());

    let a = registry.client("cpu");
    let b = registry.client("cpu");
    let c = registry.client("cuda");

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(c.device(), "cuda");
}

#[tokio::test]
async fn test_client_empty_input() {
    let client = EmbeddingClient::new("http://localhost:18115", "cpu");
    let result = client.embed(vec![]).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 0);
}

#[tokio::test]
async fn test_client_posts_texts_and_device() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/embed")
                .json_body(json!({"texts": ["一文目。", "二文目。"], "device": "cpu"}));
            then.status(200)
                .json_body(json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}));
        })
        .await;

    let client = EmbeddingClient::new(server.base_url(), "cpu");
    let embeddings = client
        .embed(vec!["一文目。".to_string(), "二文目。".to_string()])
        .await
        .unwrap();

    assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_client_surfaces_server_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/embed");
            then.status(500).body("model load failed");
        })
        .await;

    let client = EmbeddingClient::new(server.base_url(), "cpu");
    let result = client.embed(vec!["一文目。".to_string()]).await;
    assert!(result.is_err());
}

// Integration test - requires the embedding server running
#[tokio::test]
#[ignore]
async fn test_client_round_trip() {
    let client = EmbeddingClient::new("http://localhost:18115", "cpu");
    let texts = vec![
        "This is a test sentence.".to_string(),
        "Another test sentence here.".to_string(),
    ];

    let embeddings = client.embed(texts).await.unwrap();
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].len(), 384);

    // service returns L2-normalized vectors
    let norm: f32 = embeddings[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 0.01, "Vector should be normalized");
}
