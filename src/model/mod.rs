pub mod helix;
pub mod snake;

pub use helix::HelixField;
pub use snake::{Cell, Direction, Mode, SnakeGame};
