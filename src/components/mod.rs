pub mod app;
pub mod helix_backdrop;
pub mod snake_backdrop;
pub mod theme_toggle;
