pub mod document;
pub mod id;
pub mod node;
pub mod registry;
pub mod style;

pub use document::{Diagnostic, DiagnosticLevel, DocumentError, ScreenSpec, SPEC_VERSION};
pub use id::{IdGenerator, ROOT_ID};
pub use node::{DataSource, Interaction, InteractionTrigger, Node, NodeKind, PropValue, StyleMap};
pub use registry::{is_container, prop_schema, tag_to_kind, PropKind, PropSpec};
