pub mod convert;
pub mod error;
pub mod jsx;
pub mod scan;

pub use convert::{import_script, import_script_response};
pub use error::{ScriptError, ScriptResult};
