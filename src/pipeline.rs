use image::RgbaImage;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use web_time::Instant;

use crate::buffer::RgbaBuffer;
use crate::color::{ColorKey, TargetColor};
use crate::error::FilterError;
use crate::filter;
use crate::image_io;

/// Most images a queue will hold.
pub const MAX_QUEUE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    RemoveBackground,
    EnhanceColor { boost: f32 },
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::RemoveBackground => "Remove background",
            Operation::EnhanceColor { .. } => "Enhance color",
        }
    }

    /// File name prefix for processed output.
    pub fn output_prefix(self) -> &'static str {
        match self {
            Operation::RemoveBackground => "removed_bg_",
            Operation::EnhanceColor { .. } => "enhanced_",
        }
    }
}

/// Per-image filter parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    pub target: TargetColor,
    pub threshold: i32,
    pub operation: Operation,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            target: TargetColor::GREEN,
            threshold: 30,
            operation: Operation::RemoveBackground,
        }
    }
}

impl FilterSettings {
    pub fn key(&self) -> ColorKey {
        ColorKey::new(self.target, self.threshold)
    }

    /// Run the configured operation over `buffer`, returning the matched pixel count.
    pub fn apply(&self, buffer: &mut RgbaBuffer<'_>) -> usize {
        match self.operation {
            Operation::RemoveBackground => filter::remove_background(buffer, self.key()),
            Operation::EnhanceColor { boost } => filter::enhance_color(buffer, self.key(), boost),
        }
    }
}

/// Filter a copy of `source`. Returns the result and the matched pixel count.
pub fn process(
    source: &RgbaImage,
    settings: &FilterSettings,
) -> Result<(RgbaImage, usize), FilterError> {
    let mut out = source.clone();
    let (width, height) = out.dimensions();
    let mut view = RgbaBuffer::new(&mut out, width, height)?;
    let matched = settings.apply(&mut view);
    Ok((out, matched))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Done,
}

/// One queued image. Processing always starts again from the original, so
/// re-running with new settings never compounds.
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub name: String,
    pub source: Option<PathBuf>,
    pub settings: FilterSettings,
    original: RgbaImage,
    processed: Option<RgbaImage>,
    matched: usize,
}

impl QueueItem {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            source: None,
            settings: FilterSettings::default(),
            original: image,
            processed: None,
            matched: 0,
        }
    }

    pub fn open(path: &Path) -> Result<Self, FilterError> {
        let image = image_io::load_image(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut item = Self::new(name, image);
        item.source = Some(path.to_path_buf());
        Ok(item)
    }

    pub fn status(&self) -> ItemStatus {
        if self.processed.is_some() {
            ItemStatus::Done
        } else {
            ItemStatus::Pending
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.original.dimensions()
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn processed(&self) -> Option<&RgbaImage> {
        self.processed.as_ref()
    }

    /// The processed image if there is one, else the original.
    pub fn current(&self) -> &RgbaImage {
        self.processed.as_ref().unwrap_or(&self.original)
    }

    /// Pixels matched by the last run.
    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn process(&mut self) -> Result<usize, FilterError> {
        let (out, matched) = process(&self.original, &self.settings)?;
        log::debug!(
            "{}: {} matched {} of {} pixels",
            self.name,
            self.settings.operation.name(),
            matched,
            out.width() as usize * out.height() as usize,
        );
        self.processed = Some(out);
        self.matched = matched;
        Ok(matched)
    }
}

/// Outcome of [`ProcessQueue::process_all`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: Vec<(String, FilterError)>,
    pub elapsed_ms: f64,
}

/// Outcome of [`ProcessQueue::save_processed`].
#[derive(Debug, Default)]
pub struct SaveReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, FilterError)>,
}

/// Ordered queue of images with a current selection.
#[derive(Debug, Default)]
pub struct ProcessQueue {
    items: Vec<QueueItem>,
    current: Option<usize>,
}

impl ProcessQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        MAX_QUEUE - self.items.len()
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&QueueItem> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut QueueItem> {
        self.items.get_mut(index)
    }

    /// Append an item. The first item pushed into an empty queue becomes current.
    pub fn push(&mut self, item: QueueItem) -> Result<usize, FilterError> {
        if self.items.len() >= MAX_QUEUE {
            return Err(FilterError::QueueFull(MAX_QUEUE));
        }
        self.items.push(item);
        let index = self.items.len() - 1;
        if self.current.is_none() {
            self.current = Some(index);
        }
        Ok(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut QueueItem> {
        self.current.and_then(|i| self.items.get_mut(i))
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Remove an item, keeping the selection on the same image where possible.
    /// Removing the selected item moves the selection to the first one.
    pub fn remove(&mut self, index: usize) -> Option<QueueItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.current = match self.current {
            _ if self.items.is_empty() => None,
            Some(c) if c == index => Some(0),
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Some(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current = None;
    }

    /// Copy `settings` onto every queued item.
    pub fn apply_settings_to_all(&mut self, settings: FilterSettings) {
        for item in &mut self.items {
            item.settings = settings;
        }
    }

    /// Process only the selected item.
    pub fn process_current(&mut self) -> Option<Result<usize, FilterError>> {
        self.current_mut().map(QueueItem::process)
    }

    /// Process every item with its own settings. Items are independent
    /// buffers, so on native targets they run in parallel.
    pub fn process_all(&mut self) -> BatchReport {
        let start = Instant::now();

        #[cfg(not(target_arch = "wasm32"))]
        let results: Vec<Result<usize, FilterError>> = {
            use rayon::prelude::*;
            self.items.par_iter_mut().map(QueueItem::process).collect()
        };
        #[cfg(target_arch = "wasm32")]
        let results: Vec<Result<usize, FilterError>> =
            self.items.iter_mut().map(QueueItem::process).collect();

        let mut report = BatchReport::default();
        for (item, result) in self.items.iter().zip(results) {
            match result {
                Ok(_) => report.processed += 1,
                Err(e) => report.failed.push((item.name.clone(), e)),
            }
        }
        report.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "Processed {} / {} images in {:.1}ms",
            report.processed,
            self.items.len(),
            report.elapsed_ms,
        );
        report
    }

    /// Processed items paired with a file name that is unique within this
    /// batch, so inputs sharing a stem don't overwrite each other.
    fn planned_outputs(&self, with_prefix: bool) -> Vec<(&QueueItem, &RgbaImage, String)> {
        let mut taken = HashSet::new();
        let mut planned = Vec::new();
        for item in &self.items {
            let Some(img) = item.processed() else {
                continue;
            };
            let input = item
                .source
                .clone()
                .unwrap_or_else(|| PathBuf::from(&item.name));
            let prefix = if with_prefix {
                item.settings.operation.output_prefix()
            } else {
                ""
            };
            let name = image_io::claim_unique_name(
                &mut taken,
                image_io::output_file_name(&input, prefix),
            );
            planned.push((item, img, name));
        }
        planned
    }

    /// Write every processed item as PNG into `out_dir`. A failed write is
    /// logged and recorded, and the remaining items are still written.
    pub fn save_processed(&self, out_dir: &Path) -> SaveReport {
        let mut report = SaveReport::default();
        for (item, img, name) in self.planned_outputs(true) {
            let path = out_dir.join(name);
            match image_io::save_png(img, &path) {
                Ok(()) => report.written.push(path),
                Err(e) => {
                    log::error!("{}: can't write {}: {e}", item.name, path.display());
                    report.failed.push((item.name.clone(), e));
                }
            }
        }
        report
    }

    /// Bundle every processed item into one zip archive as `<stem>.png`.
    /// Returns the number of images stored; nothing is written when none are processed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_zip(&self, archive: &Path) -> Result<usize, FilterError> {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let planned = self.planned_outputs(false);
        if planned.is_empty() {
            return Ok(0);
        }
        if let Some(dir) = archive.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| FilterError::Io(dir.to_path_buf(), e))?;
        }
        let file = std::fs::File::create(archive)
            .map_err(|e| FilterError::Io(archive.to_path_buf(), e))?;
        let mut zip = zip::ZipWriter::new(file);
        // PNG data is already deflated
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for (_, img, name) in &planned {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&image_io::encode_png(img)?)
                .map_err(|e| FilterError::Io(archive.to_path_buf(), e))?;
        }
        zip.finish()?;
        log::info!("Zipped {} images into {}", planned.len(), archive.display());
        Ok(planned.len())
    }
}
