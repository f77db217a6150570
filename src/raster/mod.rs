mod canvas;

pub use canvas::{Canvas, Rgb};
