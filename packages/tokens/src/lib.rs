pub mod resolver;
pub mod table;

pub use resolver::{
    effective_style, resolve, resolve_style, tokens_for_category, TokenEntry, BASE_BREAKPOINT,
};
pub use table::{TokenDef, TokenGroup, TokenTable, TokenTableError, TokenValue};
