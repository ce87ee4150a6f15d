pub mod providers;
pub mod render;
pub mod templates;

pub use providers::*;
pub use render::*;
pub use templates::*;
