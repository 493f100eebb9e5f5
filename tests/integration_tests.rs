mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::{create_test_image_files, image_bytes};
use image::ImageFormat;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;
use zip::ZipArchive;

fn pic_compress() -> Command {
    Command::cargo_bin("pic-compress").unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = pic_compress();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_compress_help() {
    let mut cmd = pic_compress();
    cmd.args(["compress", "--help"]);
    cmd.assert().success();
}

#[test]
fn test_batch_help() {
    let mut cmd = pic_compress();
    cmd.args(["batch", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--quality"));
}

#[test]
fn test_compress_missing_args() {
    let mut cmd = pic_compress();
    cmd.args(["compress"]);
    cmd.assert().failure();
}

#[test]
fn test_compress_nonexistent_file() {
    let mut cmd = pic_compress();
    cmd.args(["compress", "nonexistent.jpg", "output.jpg"]);
    cmd.assert().failure();
}

#[test]
fn test_batch_missing_args() {
    let mut cmd = pic_compress();
    cmd.args(["batch"]);
    cmd.assert().failure();
}

#[test]
fn test_batch_nonexistent_input() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = pic_compress();
    cmd.current_dir(temp_dir.path());
    cmd.args(["batch", "nonexistent"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No image files found"));
}

#[test]
fn test_batch_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("empty");
    fs::create_dir(&input_dir).unwrap();
    let archive = temp_dir.path().join("out.zip");

    let mut cmd = pic_compress();
    cmd.arg("batch")
        .arg(&input_dir)
        .arg("-o")
        .arg(&archive);
    cmd.assert().success();
    assert!(!archive.exists());
}

#[test]
fn test_compress_with_invalid_quality() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.png");
    let output_file = temp_dir.path().join("output.png");
    fs::write(&test_file, image_bytes(16, 16, ImageFormat::Png)).unwrap();

    let mut cmd = pic_compress();
    cmd.arg("compress")
        .arg(&test_file)
        .arg(&output_file)
        .args(["-q", "0"]);
    cmd.assert().failure();
    assert!(!output_file.exists());
}

#[test]
fn test_compress_fake_image_fails() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("fake.jpg");
    let output_file = temp_dir.path().join("output.jpg");

    let mut file = File::create(&test_file).unwrap();
    file.write_all(b"fake jpeg data").unwrap();

    let mut cmd = pic_compress();
    cmd.arg("compress").arg(&test_file).arg(&output_file);
    cmd.assert().failure();
}

#[test]
fn test_compress_real_image() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("photo.jpg");
    input
        .write_binary(&image_bytes(64, 48, ImageFormat::Jpeg))
        .unwrap();
    let output = temp.child("nested/photo.jpg");

    let mut cmd = pic_compress();
    cmd.arg("compress")
        .arg(input.path())
        .arg(output.path())
        .args(["-q", "40"]);
    cmd.assert().success();

    output.assert(predicate::path::is_file());
    let written = fs::read(output.path()).unwrap();
    assert_eq!(image::guess_format(&written).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_batch_writes_archive_and_skips_text() {
    let temp_dir = TempDir::new().unwrap();
    create_test_image_files(temp_dir.path());
    let archive_path = temp_dir.path().join("out").join("images.zip");

    let mut cmd = pic_compress();
    cmd.arg("batch")
        .arg(temp_dir.path())
        .arg("-o")
        .arg(&archive_path)
        .args(["-q", "50"]);
    cmd.assert().success();

    let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["logo.png", "photo.jpg"]);
}

#[test]
fn test_batch_save_dir() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.png")
        .write_binary(&image_bytes(20, 20, ImageFormat::Png))
        .unwrap();
    temp.child("b.jpg")
        .write_binary(&image_bytes(20, 20, ImageFormat::Jpeg))
        .unwrap();
    let save_dir = temp.child("saved");
    let archive = temp.child("bundle.zip");

    let mut cmd = pic_compress();
    cmd.arg("--quiet")
        .arg("batch")
        .arg(temp.child("a.png").path())
        .arg(temp.child("b.jpg").path())
        .arg("-o")
        .arg(archive.path())
        .arg("-d")
        .arg(save_dir.path());
    cmd.assert().success().stdout(predicate::str::is_empty());

    archive.assert(predicate::path::is_file());
    save_dir.child("a.png").assert(predicate::path::is_file());
    save_dir.child("b.jpg").assert(predicate::path::is_file());
}

#[test]
fn test_batch_glob_pattern() {
    let temp_dir = TempDir::new().unwrap();
    create_test_image_files(temp_dir.path());
    let archive_path = temp_dir.path().join("jpegs.zip");
    let pattern = temp_dir.path().join("*.jpg");

    let mut cmd = pic_compress();
    cmd.arg("batch")
        .arg(pattern.to_string_lossy().as_ref())
        .arg("-o")
        .arg(&archive_path);
    cmd.assert().success();

    let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["photo.jpg"]);
}

#[test]
fn test_batch_reports_unreadable_inputs_in_summary() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.png");
    fs::write(&good, image_bytes(16, 16, ImageFormat::Png)).unwrap();

    // Sparse file just over the 100 MiB input limit
    let huge = temp_dir.path().join("huge.png");
    File::create(&huge)
        .unwrap()
        .set_len(100 * 1024 * 1024 + 1)
        .unwrap();
    let archive_path = temp_dir.path().join("out.zip");

    let mut cmd = pic_compress();
    cmd.arg("batch")
        .arg(&good)
        .arg(&huge)
        .arg("-o")
        .arg(&archive_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Failed files: 1"))
        .stdout(predicate::str::contains("huge.png: File too large"));

    let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["good.png"]);
}
