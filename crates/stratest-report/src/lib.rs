pub mod format;
pub mod fs;
pub mod history;
pub mod html;
pub mod labels;
pub mod report;

pub use crate::format::NumberLocale;
pub use crate::history::{HistoryPage, RowTag};
pub use crate::labels::label;
pub use crate::report::{ReportResult, ReportTable, ReportValue};
