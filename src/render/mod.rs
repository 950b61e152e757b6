mod number_format;
mod row_positions;
mod series_track;
mod summary;
mod table_renderer;
mod table_style;

pub use number_format::{PLACEHOLDER, format_general};
pub use summary::{render_group_summary, render_summary};
pub use table_renderer::TableRenderer;
pub use table_style::TableStyle;
