use chroma_filter::image_io;
use chroma_filter::pipeline::{FilterSettings, ItemStatus, Operation, ProcessQueue, QueueItem};
use chroma_filter::TargetColor;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chroma_filter_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Green backdrop with a red square in the middle.
fn keyed_image() -> RgbaImage {
    RgbaImage::from_fn(8, 8, |x, y| {
        if (2..6).contains(&x) && (2..6).contains(&y) {
            Rgba([200, 30, 30, 255])
        } else {
            Rgba([5, 250, 8, 255])
        }
    })
}

#[test]
fn batch_from_files_to_png() {
    let dir = scratch_dir("batch");
    let input = dir.join("subject.jpg.png");
    image_io::save_png(&keyed_image(), &input).unwrap();

    let mut queue = ProcessQueue::new();
    queue.push(QueueItem::open(&input).unwrap()).unwrap();
    assert_eq!(queue.get(0).unwrap().name, "subject.jpg.png");
    assert_eq!(queue.get(0).unwrap().status(), ItemStatus::Pending);

    let report = queue.process_all();
    assert_eq!(report.processed, 1);
    assert_eq!(queue.get(0).unwrap().matched(), 64 - 16);

    let out_dir = dir.join("out");
    let saved = queue.save_processed(&out_dir);
    assert!(saved.failed.is_empty());
    let written = saved.written;
    assert_eq!(written, vec![out_dir.join("removed_bg_subject.jpg.png")]);

    let result = image_io::load_image(&written[0]).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(result.get_pixel(0, 0).0, [5, 250, 8, 0]);
    assert_eq!(result.get_pixel(3, 3).0, [200, 30, 30, 255]);
}

#[test]
fn eye_dropper_then_enhance() {
    let mut item = QueueItem::new("square", keyed_image());
    let picked = image_io::sample_color(item.original(), 4, 4).unwrap();
    assert_eq!(picked, TargetColor::new(200, 30, 30));

    item.settings = FilterSettings {
        target: picked,
        threshold: 1,
        operation: Operation::EnhanceColor { boost: 2.0 },
    };
    assert_eq!(item.process().unwrap(), 16);
    assert_eq!(item.current().get_pixel(4, 4).0, [255, 60, 60, 255]);
    assert_eq!(item.current().get_pixel(0, 0).0, [5, 250, 8, 255]);

    // picking again reads the unfiltered pixel, not the boosted one
    assert_eq!(image_io::sample_color(item.original(), 4, 4).unwrap(), picked);
}

#[test]
fn unprocessed_items_are_not_saved() {
    let dir = scratch_dir("unprocessed");
    let mut queue = ProcessQueue::new();
    queue.push(QueueItem::new("a.png", keyed_image())).unwrap();
    let saved = queue.save_processed(&dir);
    assert!(saved.written.is_empty() && saved.failed.is_empty());
    assert_eq!(queue.save_zip(&dir.join("batch.zip")).unwrap(), 0);
    assert!(!dir.join("batch.zip").exists());
    std::fs::remove_dir_all(&dir).ok();
}

fn processed_queue(sources: &[&str]) -> ProcessQueue {
    let mut queue = ProcessQueue::new();
    for source in sources {
        let mut item = QueueItem::new(
            Path::new(source).file_name().unwrap().to_string_lossy(),
            keyed_image(),
        );
        item.source = Some(PathBuf::from(source));
        queue.push(item).unwrap();
    }
    queue.process_all();
    queue
}

#[test]
fn failed_write_does_not_stop_the_batch() {
    let dir = scratch_dir("blocked");
    // a directory where the first PNG should go makes that write fail
    std::fs::create_dir_all(dir.join("removed_bg_first.png")).unwrap();

    let queue = processed_queue(&["in/first.png", "in/second.png"]);
    let saved = queue.save_processed(&dir);
    let second_exists = dir.join("removed_bg_second.png").is_file();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(saved.written, vec![dir.join("removed_bg_second.png")]);
    assert_eq!(saved.failed.len(), 1);
    assert_eq!(saved.failed[0].0, "first.png");
    assert!(second_exists);
}

#[test]
fn same_stem_inputs_get_distinct_outputs() {
    let dir = scratch_dir("collide");
    let queue = processed_queue(&["a/shot.png", "b/shot.png", "c/shot.jpg"]);
    let saved = queue.save_processed(&dir);
    let on_disk = std::fs::read_dir(&dir).unwrap().count();
    std::fs::remove_dir_all(&dir).ok();

    assert!(saved.failed.is_empty());
    assert_eq!(
        saved.written,
        vec![
            dir.join("removed_bg_shot.png"),
            dir.join("removed_bg_shot_1.png"),
            dir.join("removed_bg_shot_2.png"),
        ]
    );
    assert_eq!(on_disk, 3);
}

#[test]
fn zip_bundles_every_processed_image() {
    let dir = scratch_dir("zip");
    let archive_path = dir.join("nested/batch.zip");
    let queue = processed_queue(&["a/shot.png", "b/shot.png", "cat.jpg"]);
    assert_eq!(queue.save_zip(&archive_path).unwrap(), 3);

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();

    let mut png = Vec::new();
    std::io::Read::read_to_end(&mut archive.by_name("cat.png").unwrap(), &mut png).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(names, ["cat.png", "shot.png", "shot_1.png"]);
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [5, 250, 8, 0]);
}
