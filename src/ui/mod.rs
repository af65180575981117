mod projects;
mod theme;

pub use projects::render as render_projects;
pub use theme::apply_theme;
