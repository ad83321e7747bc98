pub mod logging;
pub mod text;

pub use text::{escape_html, generate_id, normalize, Debouncer};
