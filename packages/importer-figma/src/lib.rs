pub mod api;
pub mod client;
pub mod convert;
pub mod error;

pub use api::{FigmaFile, FigmaNode, FigmaNodeKind, LayoutMode};
pub use client::{
    extract_file_key, handle_request, FigmaAction, FigmaClient, FigmaImportRequest, FigmaOutcome,
};
pub use convert::{bucket_heading_level, bucket_spacing, convert_file, list_frames, FrameInfo};
pub use error::{FigmaError, FigmaResult};
