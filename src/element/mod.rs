pub mod attrs;
pub mod canvas;
