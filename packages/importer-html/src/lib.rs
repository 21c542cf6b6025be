pub mod convert;
pub mod error;
pub mod scanner;

pub use convert::{import_markup, import_markup_response};
pub use error::{MarkupError, MarkupResult};
