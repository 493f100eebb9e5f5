mod common;

use common::{jpeg_file, png_file, text_file};
use pic_compress::{
    build_archive, recompress, BatchController, CompressionError, CompressionOptions,
    InputFile, SilentObserver,
};
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn archive_names(bytes: Vec<u8>) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[tokio::test]
async fn recompress_reports_original_length() {
    for file in [png_file("a.png"), jpeg_file("b.jpg")] {
        for quality in [0.0, 0.25, 0.5, 1.0] {
            let record = recompress(&file, quality).await.unwrap();
            assert_eq!(record.original_size, file.size());
            assert_eq!(
                record.compressed_url.resolve().unwrap().len() as u64,
                record.compressed_size
            );
        }
    }
}

#[tokio::test]
async fn non_image_is_rejected_and_store_untouched() {
    let controller = BatchController::new();
    controller
        .run_batch(&[png_file("keep.png")], &CompressionOptions::default(), &mut SilentObserver)
        .await;
    let before = controller.snapshot();

    let result = recompress(&text_file("notes.txt"), 0.5).await;
    assert!(matches!(result, Err(CompressionError::UnsupportedType(_))));

    let after = controller.snapshot();
    assert_eq!(after.file_names(), vec!["keep.png"]);
    assert_eq!(after.generation(), before.generation());
}

#[tokio::test]
async fn two_file_batch_builds_two_entry_archive() {
    let controller = BatchController::new();
    let files = vec![png_file("a.png"), jpeg_file("b.jpg")];
    let options = CompressionOptions::new(Some(50)).unwrap();

    let summary = controller
        .run_batch(&files, &options, &mut SilentObserver)
        .await;
    assert_eq!(summary.processed, 2);

    let store = controller.snapshot();
    assert_eq!(store.len(), 2);
    for file in &files {
        let record = store.get(file.name()).unwrap();
        assert_eq!(record.original_size, file.size());
    }

    let archive = build_archive(&store).unwrap().unwrap();
    let mut names = archive_names(archive);
    names.sort();
    assert_eq!(names, vec!["a.png", "b.jpg"]);
}

#[tokio::test]
async fn archive_bytes_match_stored_records() {
    let controller = BatchController::new();
    let files = vec![jpeg_file("one.jpg"), png_file("two.png"), jpeg_file("three.jpg")];
    controller
        .run_batch(&files, &CompressionOptions::new(Some(30)).unwrap(), &mut SilentObserver)
        .await;
    let store = controller.snapshot();

    let bytes = build_archive(&store).unwrap().unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), store.len());

    for record in store.iter() {
        let mut entry = archive.by_name(&record.file_name).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        assert_eq!(data, record.compressed_url.resolve().unwrap());
    }
}

#[tokio::test]
async fn quality_change_replaces_all_entries() {
    let controller = BatchController::new();
    let files = vec![jpeg_file("a.jpg"), png_file("b.png")];

    let first = controller
        .run_batch(&files, &CompressionOptions::new(Some(95)).unwrap(), &mut SilentObserver)
        .await;
    let second = controller
        .run_batch(&files, &CompressionOptions::new(Some(20)).unwrap(), &mut SilentObserver)
        .await;

    let store = controller.snapshot();
    assert_eq!(store.generation(), second.generation);
    assert_ne!(store.generation(), first.generation);
    assert_eq!(store.file_names(), vec!["a.jpg", "b.png"]);
    assert_eq!(store.total_compressed_size(), second.total_compressed_size);
}

#[tokio::test]
async fn superseded_batch_leaks_nothing() {
    let controller = BatchController::new();
    let options = CompressionOptions::default();
    let stale_files = vec![png_file("x.png")];
    let current_files = vec![png_file("y.png"), jpeg_file("z.jpg")];
    let mut stale_observer = SilentObserver;
    let mut current_observer = SilentObserver;

    let (stale, current) = tokio::join!(
        controller.run_batch(&stale_files, &options, &mut stale_observer),
        controller.run_batch(&current_files, &options, &mut current_observer),
    );

    assert!(stale.superseded);
    assert_eq!(stale.processed, 0);
    assert!(!current.superseded);
    assert_eq!(current.processed, 2);

    let store = controller.snapshot();
    assert_eq!(store.generation(), current.generation);
    assert_eq!(store.file_names(), vec!["y.png", "z.jpg"]);
    assert!(!store.contains("x.png"));
}

#[tokio::test]
async fn bad_files_do_not_abort_the_batch() {
    let controller = BatchController::new();
    let files = vec![
        text_file("readme.txt"),
        png_file("good.png"),
        InputFile::new("corrupt.jpg", "image/jpeg", vec![0xFF, 0xD8, 0x00]),
        jpeg_file("also-good.jpg"),
    ];

    let summary = controller
        .run_batch(&files, &CompressionOptions::default(), &mut SilentObserver)
        .await;

    assert_eq!(summary.processed, 2);
    let failed: Vec<_> = summary.failures.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(failed, vec!["readme.txt", "corrupt.jpg"]);
    assert_eq!(
        controller.snapshot().file_names(),
        vec!["good.png", "also-good.jpg"]
    );
}
