use mnist_idx::idx::{validate_magic, Header, RawStream, RecordKind, IMAGE_MAGIC, LABEL_MAGIC};
use mnist_idx::IdxError;
use std::io::Cursor;

#[test]
fn test_magic_numbers_differ_only_in_kind_byte() {
    assert_eq!(IMAGE_MAGIC, 0x0000_0803);
    assert_eq!(LABEL_MAGIC, 0x0000_0801);
    assert_eq!(IMAGE_MAGIC ^ LABEL_MAGIC, 0x0000_0002);
}

#[test]
fn test_validate_magic_advances_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = vec![0x00, 0x00, 0x08, 0x03, 0xAA];
    let mut stream = RawStream::new("images", Cursor::new(bytes));
    validate_magic(&mut stream, RecordKind::Image)?;
    assert_eq!(stream.offset(), 4);
    Ok(())
}

#[test]
fn test_label_magic_rejected_for_images() {
    let bytes = Header::new(RecordKind::Label, 3, Vec::new()).to_bytes();
    let mut stream = RawStream::new("labels.idx", Cursor::new(bytes));
    match validate_magic(&mut stream, RecordKind::Image) {
        Err(IdxError::InvalidFormat {
            file,
            expected,
            found,
        }) => {
            assert_eq!(file, "labels.idx");
            assert_eq!(expected, IMAGE_MAGIC);
            assert_eq!(found, LABEL_MAGIC);
        }
        other => panic!("expected InvalidFormat, got {:?}", other),
    }
}

#[test]
fn test_corrupted_first_byte_is_invalid_format() {
    let mut bytes = Header::new(RecordKind::Image, 1, vec![28, 28]).to_bytes();
    bytes[0] = 0xFF;
    let mut stream = RawStream::new("images", Cursor::new(bytes));
    assert!(matches!(
        Header::read(&mut stream, RecordKind::Image),
        Err(IdxError::InvalidFormat { found: 0xFF00_0803, .. })
    ));
}

#[test]
fn test_short_magic_is_truncated() {
    let mut stream = RawStream::new("tiny", Cursor::new(vec![0x00, 0x00]));
    assert!(matches!(
        validate_magic(&mut stream, RecordKind::Label),
        Err(IdxError::TruncatedStream {
            needed: 4,
            available: 2,
            ..
        })
    ));
    assert_eq!(stream.offset(), 0);
}

#[test]
fn test_header_read_image_and_label() -> Result<(), Box<dyn std::error::Error>> {
    let image_header = Header::new(RecordKind::Image, 60_000, vec![28, 28]);
    let mut stream = RawStream::new("images", Cursor::new(image_header.to_bytes()));
    let read = Header::read(&mut stream, RecordKind::Image)?;
    assert_eq!(read, image_header);
    assert_eq!(read.record_len(), 784);
    assert_eq!(stream.offset(), 16);

    let label_header = Header::new(RecordKind::Label, 10_000, Vec::new());
    let mut stream = RawStream::new("labels", Cursor::new(label_header.to_bytes()));
    let read = Header::read(&mut stream, RecordKind::Label)?;
    assert_eq!(read.count, 10_000);
    assert!(read.dimensions.is_empty());
    assert_eq!(read.record_len(), 1);
    assert_eq!(stream.offset(), 8);
    Ok(())
}
