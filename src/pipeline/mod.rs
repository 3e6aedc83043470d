//! Upload processing module.

mod processor;

pub use processor::{Upload, UploadPipeline};
