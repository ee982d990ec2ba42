use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn member(date: u64, data: &[u8]) -> Vec<u8> {
    let mut bytes = format!(
        "{:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
        "x.o/",
        date,
        501,
        20,
        100644,
        data.len()
    )
    .into_bytes();
    bytes.extend_from_slice(data);
    bytes
}

fn archive(dates: &[u64]) -> Vec<u8> {
    let mut bytes = b"!<arch>\n".to_vec();
    for date in dates {
        bytes.extend(member(*date, b"data"));
    }
    bytes
}

fn date_of_first_member(bytes: &[u8], offset: usize) -> &[u8] {
    &bytes[offset + 8 + 16..offset + 8 + 28]
}

fn run(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arstamp"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn bare_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("libx.a");
    fs::write(&path, archive(&[1, 100, 300, 200])).unwrap();

    let output = run(&[path.as_path()]);
    assert!(output.status.success(), "{:?}", output);

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes, archive(&[300, 100, 300, 200]));
    assert_eq!(date_of_first_member(&bytes, 0), b"300         ");
}

#[test]
fn fat_archive() {
    let slice = archive(&[5, 1_700_000_000, 1_600_000_000]);
    let offset = 64u32;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xcafe_babeu32.to_be_bytes());
    bytes.extend_from_slice(&2u32.to_be_bytes());
    for i in 0..2 {
        bytes.extend_from_slice(&[0, 0, 0, 7]);
        bytes.extend_from_slice(&[0, 0, 0, 3]);
        let start = offset + i * slice.len() as u32;
        bytes.extend_from_slice(&start.to_be_bytes());
        bytes.extend_from_slice(&(slice.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 2]);
    }
    bytes.resize(offset as usize, 0);
    bytes.extend_from_slice(&slice);
    bytes.extend_from_slice(&slice);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("libfat.a");
    fs::write(&path, &bytes).unwrap();

    let output = run(&[path.as_path()]);
    assert!(output.status.success(), "{:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Set first member date to 1700000000").count(), 2);

    let patched = fs::read(&path).unwrap();
    assert_eq!(patched.len(), bytes.len());
    let first = offset as usize;
    let second = first + slice.len();
    assert_eq!(date_of_first_member(&patched, first), b"1700000000  ");
    assert_eq!(date_of_first_member(&patched, second), b"1700000000  ");
    assert_eq!(&patched[..first], &bytes[..first]);
}

#[test]
fn single_member() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("libone.a");
    let bytes = archive(&[42]);
    fs::write(&path, &bytes).unwrap();

    let output = run(&[path.as_path()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not update archive"), "{}", stderr);
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn not_an_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"just some text\n").unwrap();

    let output = run(&[path.as_path()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not a valid archive"), "{}", stderr);
    assert_eq!(fs::read(&path).unwrap(), b"just some text\n");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.a");
    let output = run(&[path.as_path()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not open archive"), "{}", stderr);
}

#[test]
fn usage() {
    let output = run(&[]);
    assert!(!output.status.success());

    let a = Path::new("a");
    let output = run(&[a, a]);
    assert!(!output.status.success());

    let output = run(&[Path::new("-v"), a]);
    assert!(!output.status.success());
}
