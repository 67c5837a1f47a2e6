//! Presentation: view-model building and HTML output.

pub mod html;
pub mod view;

pub use html::{escape_html, render_page};
pub use view::{build_page_view, ExpansionState, PageView};
