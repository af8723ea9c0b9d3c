pub mod color;
pub mod controller;
pub mod devices;
pub mod effects;
pub mod grid;
pub mod protocol;
