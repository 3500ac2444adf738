use std::path::PathBuf;

use msku_map::MappingRun;
use msku_model::MappingOptions;

/// Everything `msku map` reports after a run that got past loading.
#[derive(Debug)]
pub struct MapResult {
    pub mapping_path: PathBuf,
    pub input_path: PathBuf,
    /// Where the annotated table was written; `None` on dry runs or failure.
    pub output_path: Option<PathBuf>,
    pub options: MappingOptions,
    pub run: MappingRun,
    /// Failures writing the output, report or events files.
    pub write_errors: Vec<String>,
}

impl MapResult {
    pub fn has_write_errors(&self) -> bool {
        !self.write_errors.is_empty()
    }
}
