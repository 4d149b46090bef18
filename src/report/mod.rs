pub mod assembler;
pub mod export;

pub use assembler::{assemble_top_report, render_text, ReportRow, RoleReport, TopReport};
pub use export::CsvExporter;
