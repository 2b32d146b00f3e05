pub mod composite;
pub mod cpu;
pub mod frame;
pub mod grid;
pub mod surface;
