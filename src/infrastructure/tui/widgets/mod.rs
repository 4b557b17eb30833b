pub mod autocomplete_list;
pub mod theme;

pub use autocomplete_list::{NO_MATCHES, render, render_summary};
pub use theme::Theme;
