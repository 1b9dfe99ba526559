//! Batch analysis and report export

pub mod batch;
pub mod report;

pub use batch::{collect_audio_files, process_folder, save_results, AUDIO_EXTENSIONS};
pub use report::{export_report, ReportFormat};
