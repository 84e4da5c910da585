//! TUI Widgets
//!
//! Panes of the inspector that are larger than a few lines.

mod detail;
mod results;
mod schema;

pub use detail::render_detail;
pub use results::{render_footer, render_results, render_search_bar};
pub use schema::render_schema;
