pub mod html_table;
pub mod normalizer;

pub use html_table::{HtmlTableImporter, ImportedTable};
pub use normalizer::{is_skill_column, normalize_cell};
