use super::*;

use image::{DynamicImage, RgbImage};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

fn token() -> SessionToken {
    SessionToken { session: Uuid::new_v4(), generation: 3 }
}

#[test]
fn decode_file_reads_png_dimensions() {
    let file = DroppedFile::new("wide.png", png_bytes(800, 200));
    let image = decode_file(&file).expect("decode");
    assert_eq!(image.name, "wide.png");
    assert_eq!((image.width, image.height), (800, 200));
    assert!(image.data_uri.starts_with("data:image/png;base64,"));
}

#[test]
fn decode_file_data_uri_carries_original_bytes() {
    let bytes = png_bytes(4, 4);
    let image = decode_file(&DroppedFile::new("a.png", bytes.clone())).expect("decode");
    let encoded = image.data_uri.trim_start_matches("data:image/png;base64,");
    assert_eq!(STANDARD.decode(encoded).expect("base64"), bytes);
}

#[test]
fn decode_file_rejects_non_images() {
    let file = DroppedFile::new("notes.txt", b"just some text".to_vec());
    assert!(matches!(decode_file(&file), Err(DecodeError::Unsupported { name }) if name == "notes.txt"));
}

#[test]
fn decode_file_rejects_unaccepted_formats() {
    // BMP magic: recognised by guess_format, not accepted by the panels.
    let mut bytes = b"BM".to_vec();
    bytes.extend_from_slice(&[0; 64]);
    let file = DroppedFile::new("old.bmp", bytes);
    assert!(matches!(decode_file(&file), Err(DecodeError::Unsupported { .. })));
}

#[test]
fn decode_file_reports_truncated_png() {
    let mut bytes = png_bytes(10, 10);
    bytes.truncate(20);
    let file = DroppedFile::new("broken.png", bytes);
    assert!(matches!(decode_file(&file), Err(DecodeError::Image { .. })));
}

#[tokio::test]
async fn batch_keeps_order_and_continues_past_bad_files() {
    let token = token();
    let files = vec![
        DroppedFile::new("first.png", png_bytes(10, 20)),
        DroppedFile::new("bad.txt", b"nope".to_vec()),
        DroppedFile::new("second.png", png_bytes(30, 40)),
    ];
    let pending = PendingPlacement::new(token, PlacementTarget::Foreground, files);
    assert_eq!(pending.len(), 3);
    assert_eq!(pending.token(), token);

    let batch = pending.decode().await;
    assert_eq!(batch.token, token);
    assert_eq!(batch.target, PlacementTarget::Foreground);
    let names: Vec<&str> = batch.images.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["first.png", "second.png"]);
    assert_eq!(batch.failures.len(), 1);
}

#[tokio::test]
async fn empty_batch_decodes_to_nothing() {
    let pending = PendingPlacement::new(token(), PlacementTarget::Background, Vec::new());
    assert!(pending.is_empty());
    let batch = pending.decode().await;
    assert!(batch.images.is_empty());
    assert!(batch.failures.is_empty());
}

#[tokio::test]
async fn dropped_file_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("pinplate-{}.png", Uuid::new_v4()));
    tokio::fs::write(&path, png_bytes(2, 2)).await.expect("write");
    let file = DroppedFile::read(&path).await.expect("read");
    let _ = tokio::fs::remove_file(&path).await;
    assert!(file.name.ends_with(".png"));
    assert_eq!(decode_file(&file).expect("decode").width, 2);
}
