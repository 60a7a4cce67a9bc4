//! Asset-load bookkeeping: the fetch-layer aggregate, the progress tracker
//! exposed to the UI, and decoded texture data.

use crate::error::AssetError;
use image::io::Reader as ImageReader;
use std::io::Cursor;

/// Decoded RGBA8 pixels ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decode an encoded image (JPEG or PNG) into tightly packed RGBA8.
    /// The format is sniffed from the bytes, not taken from the URL.
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let rgba = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .decode()?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Observable load state: a monotonic percentage and a one-way loaded flag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadProgress {
    pub percent: f32,
    pub loaded: bool,
}

/// Folds per-item and aggregate load signals into [`LoadProgress`].
///
/// `on_all_loaded` is authoritative for the loaded transition; the item
/// count only feeds diagnostics since the two signals may arrive out of
/// phase.
#[derive(Debug, Default)]
pub struct AssetLoadTracker {
    total: usize,
    items_loaded: usize,
    progress: LoadProgress,
}

impl AssetLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, total: usize) {
        self.total = total;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn items_loaded(&self) -> usize {
        self.items_loaded
    }

    pub fn on_item_loaded(&mut self) {
        self.items_loaded = (self.items_loaded + 1).min(self.total);
    }

    /// Apply a fraction in [0, 1]. Values below the current progress are
    /// ignored. Returns whether the percentage changed.
    pub fn on_progress(&mut self, fraction: f32) -> bool {
        if self.progress.loaded || !fraction.is_finite() {
            return false;
        }
        let percent = (fraction * 100.0).clamp(0.0, 100.0);
        if percent > self.progress.percent {
            self.progress.percent = percent;
            true
        } else {
            false
        }
    }

    /// Mark everything loaded. Returns `true` only for the first call.
    pub fn on_all_loaded(&mut self) -> bool {
        if self.progress.loaded {
            return false;
        }
        self.progress.percent = 100.0;
        self.progress.loaded = true;
        true
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    pub fn is_loaded(&self) -> bool {
        self.progress.loaded
    }
}

/// Result of settling one item in a [`LoadBatch`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchStatus {
    /// Settled items over total.
    pub fraction: f32,
    /// True exactly once, when the last item settles.
    pub completed: bool,
}

/// Fetch-layer aggregate: counts settled items, failures included, so a
/// missing image never holds back the "all loaded" signal.
#[derive(Debug, Default)]
pub struct LoadBatch {
    settled: Vec<bool>,
    settled_count: usize,
    failed: usize,
    completed: bool,
}

impl LoadBatch {
    pub fn new(total: usize) -> Self {
        Self {
            settled: vec![false; total],
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.settled.len()
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.settled_count == self.settled.len()
    }

    /// Record item `index` as finished. Duplicates and unknown indices return
    /// `None`.
    pub fn settle(&mut self, index: usize, ok: bool) -> Option<BatchStatus> {
        let slot = self.settled.get_mut(index)?;
        if *slot {
            return None;
        }
        *slot = true;
        self.settled_count += 1;
        if !ok {
            self.failed += 1;
        }
        Some(BatchStatus {
            fraction: self.settled_count as f32 / self.settled.len() as f32,
            completed: self.take_completion(),
        })
    }

    /// Completion signal for a batch that is already complete, e.g. an empty
    /// one. Fires once.
    pub fn take_completion(&mut self) -> bool {
        if self.is_complete() && !self.completed {
            self.completed = true;
            true
        } else {
            false
        }
    }
}
