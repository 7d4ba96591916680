use std::fs;

use huffzip::{compress_file, decompress_file, output_path_for, Direction, TransformError};

const SAMPLE: &str = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.txt");
    fs::write(&input, SAMPLE).unwrap();

    let compressed = output_path_for(&input, Direction::Compress);
    let report = compress_file(&input, &compressed).unwrap();
    assert_eq!(compressed.file_name().unwrap(), "sample.bin");
    assert_eq!(report.input_len, SAMPLE.len());
    assert_eq!(report.output_len, fs::metadata(&compressed).unwrap().len() as usize);

    let restored = dir.path().join("restored.txt");
    let report = decompress_file(&compressed, &restored).unwrap();
    assert_eq!(report.output_len, SAMPLE.len());
    assert_eq!(fs::read_to_string(&restored).unwrap(), SAMPLE);
}

#[test]
fn test_empty_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, b"").unwrap();

    let compressed = dir.path().join("empty.bin");
    compress_file(&input, &compressed).unwrap();
    let restored = dir.path().join("empty.out");
    decompress_file(&compressed, &restored).unwrap();
    assert!(fs::read(&restored).unwrap().is_empty());
}

#[test]
fn test_codec_error_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("garbage.bin");
    fs::write(&input, [0u8, 0, 0]).unwrap();

    let output = dir.path().join("garbage.txt");
    let err = decompress_file(&input, &output).unwrap_err();
    assert!(matches!(err, TransformError::Codec(_)));
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = compress_file(&dir.path().join("absent.txt"), &dir.path().join("absent.bin"))
        .unwrap_err();
    match err {
        TransformError::Io { path, .. } => assert!(path.ends_with("absent.txt")),
        other => panic!("expected Io error, got {other:?}"),
    }
}
