use pescope::{read_binary, write_bytes};
use tempfile::tempdir;

#[test]
fn read_binary_round_trips_file_content() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("blob.bin");
    let content = [0u8, 0xFF, 0x10, 0x80];
    std::fs::write(&path, content).expect("write blob");

    let read = read_binary(&path).expect("read blob");
    assert_eq!(read, content);
}

#[test]
fn read_binary_reports_the_offending_path() {
    let err = read_binary(std::path::Path::new("/no/such/file.exe"))
        .expect_err("missing file must error");
    assert!(format!("{err:#}").contains("/no/such/file.exe"));
}

#[test]
fn write_bytes_to_file_is_byte_exact() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("dump.bin");
    let content = [0x00, 0x01, 0xFE, 0xFF];

    write_bytes(Some(&out), &content).expect("write dump");
    assert_eq!(std::fs::read(&out).expect("read dump"), content);
}
