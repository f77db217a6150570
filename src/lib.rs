pub mod app;
pub mod config;
pub mod data;
pub mod hover;
pub mod map;
pub mod playback;
pub mod raster;
pub mod scale;
pub mod timeline;
pub mod ui;

#[cfg(test)]
mod test_support;
