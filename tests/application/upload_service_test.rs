use std::sync::Arc;

use menuscribe::application::ports::BlobStore;
use menuscribe::application::services::{UploadError, UploadService};
use menuscribe::domain::AssetKind;
use menuscribe::infrastructure::storage::ObjectBlobStore;

use crate::helpers::{byte_stream, fake_jpeg};

fn create_service() -> (Arc<ObjectBlobStore>, UploadService) {
    let store = Arc::new(ObjectBlobStore::in_memory());
    let service = UploadService::new(Arc::clone(&store) as Arc<dyn BlobStore>);
    (store, service)
}

#[tokio::test]
async fn given_image_when_uploading_then_bytes_are_retrievable_by_reference() {
    let (store, service) = create_service();
    let data = fake_jpeg();

    let asset = service
        .upload(AssetKind::Image, Some("menu.jpg"), byte_stream(&data))
        .await
        .unwrap();

    assert_eq!(asset.kind, AssetKind::Image);
    assert_eq!(asset.original_name, "menu.jpg");
    assert_eq!(asset.size_bytes, data.len() as u64);
    assert_eq!(store.get(&asset.storage_path).await.unwrap(), data);
}

#[tokio::test]
async fn given_missing_filename_when_uploading_then_returns_empty_filename() {
    let (_store, service) = create_service();

    let result = service
        .upload(AssetKind::Audio, None, byte_stream(b"RIFF"))
        .await;

    assert!(matches!(result, Err(UploadError::EmptyFilename(AssetKind::Audio))));
}

#[tokio::test]
async fn given_blank_filename_when_uploading_then_returns_empty_filename() {
    let (_store, service) = create_service();

    let result = service
        .upload(AssetKind::Image, Some("   "), byte_stream(b"x"))
        .await;

    assert!(matches!(result, Err(UploadError::EmptyFilename(AssetKind::Image))));
}

#[tokio::test]
async fn given_unusable_filename_when_uploading_then_returns_invalid_filename() {
    let (_store, service) = create_service();

    let result = service
        .upload(AssetKind::Image, Some("///"), byte_stream(b"x"))
        .await;

    assert!(matches!(
        result,
        Err(UploadError::InvalidFilename {
            kind: AssetKind::Image,
            ..
        })
    ));
}

#[tokio::test]
async fn given_same_filename_twice_when_uploading_then_references_differ() {
    let (store, service) = create_service();

    let first = service
        .upload(AssetKind::Image, Some("menu.jpg"), byte_stream(b"first"))
        .await
        .unwrap();
    let second = service
        .upload(AssetKind::Image, Some("menu.jpg"), byte_stream(b"second"))
        .await
        .unwrap();

    assert_ne!(first.storage_path, second.storage_path);
    assert_eq!(store.get(&first.storage_path).await.unwrap(), b"first");
    assert_eq!(store.get(&second.storage_path).await.unwrap(), b"second");
}

#[tokio::test]
async fn given_stream_over_size_limit_when_uploading_then_returns_too_large() {
    let (_store, service) = create_service();
    let chunks: Vec<Result<bytes::Bytes, std::io::Error>> = vec![
        Ok(bytes::Bytes::from_static(b"RIFF")),
        Err(std::io::Error::new(
            std::io::ErrorKind::FileTooLarge,
            "length limit exceeded",
        )),
    ];

    let result = service
        .upload(
            AssetKind::Audio,
            Some("order.wav"),
            Box::pin(futures::stream::iter(chunks)),
        )
        .await;

    assert!(matches!(result, Err(UploadError::TooLarge(AssetKind::Audio))));
}

#[tokio::test]
async fn given_broken_stream_when_uploading_then_returns_malformed() {
    let (_store, service) = create_service();
    let chunks: Vec<Result<bytes::Bytes, std::io::Error>> =
        vec![Err(std::io::Error::other("connection reset"))];

    let result = service
        .upload(
            AssetKind::Image,
            Some("menu.jpg"),
            Box::pin(futures::stream::iter(chunks)),
        )
        .await;

    assert!(matches!(result, Err(UploadError::Malformed(_))));
}
