use std::path::{Path, PathBuf};

use crate::charts::{SampleViews, build_sample_views};
use crate::data::loader::load_file;
use crate::data::model::{Dataset, SampleId};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// File the dataset came from.
    pub source_path: Option<PathBuf>,

    /// Sample chosen in the selector.
    pub selected: Option<SampleId>,

    /// Views derived for `selected` (None after a failed lookup).
    pub views: Option<SampleViews>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether `status_message` reports a failure.
    pub is_error: bool,
}

impl AppState {
    /// Read and ingest a dataset file. On failure the previous dataset and
    /// views are dropped so no stale charts stay on screen.
    pub fn load_from_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} samples ({} metadata, {} measurement records) from {}",
                    dataset.len(),
                    dataset.metadata.len(),
                    dataset.samples.len(),
                    path.display()
                );
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.dataset = None;
                self.source_path = None;
                self.selected = None;
                self.views = None;
                self.set_error(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and show its first sample.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let first = dataset.names.first().cloned();
        let empty = dataset.is_empty();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.is_error = false;

        match first {
            Some(id) if !empty => self.select_sample(id),
            _ => {
                self.selected = None;
                self.views = None;
                self.set_info("Dataset contains no samples.".to_string());
            }
        }
    }

    /// File name of the loaded dataset, for the top bar.
    pub fn source_label(&self) -> Option<String> {
        let path = self.source_path.as_ref()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Some(name)
    }

    /// Rebuild every view for `id` from the loaded dataset.
    pub fn select_sample(&mut self, id: SampleId) {
        let Some(dataset) = &self.dataset else {
            return;
        };

        match build_sample_views(dataset, &id) {
            Ok(views) => {
                log::info!("Selected sample {id}");
                self.views = Some(views);
                self.status_message = None;
                self.is_error = false;
            }
            Err(e) => {
                log::error!("Cannot render sample {id}: {e}");
                self.views = None;
                self.set_error(format!("Error: {e}"));
            }
        }
        self.selected = Some(id);
    }

    /// Selector entries in document order.
    pub fn sample_names(&self) -> &[SampleId] {
        self.dataset
            .as_ref()
            .map(|ds| ds.names.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_error(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.is_error = true;
    }

    pub fn set_info(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.is_error = false;
    }
}
