mod html;
mod text;

pub use html::{render_detail_html, render_list_html};
pub use text::render_text;

use crate::controller::Screen;

/// Output format for screens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Text,
    Html,
}

/// Render a whole screen in the given mode
pub fn render(screen: &Screen, mode: RenderMode) -> String {
    match mode {
        RenderMode::Text => render_text(screen),
        RenderMode::Html => {
            let mut out = render_list_html(&screen.list);
            out.push_str(&render_detail_html(&screen.detail));
            out
        }
    }
}

/// Placeholder for absent category/area values
pub(crate) const MISSING: &str = "—";
