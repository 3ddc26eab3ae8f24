/// Background jobs
pub mod exports;

pub use exports::{ExportJobQueue, ExportWorker};
