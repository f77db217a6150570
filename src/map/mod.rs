mod cache;
mod geometry;
mod projection;
mod registry;
mod renderer;

pub use cache::{CacheStrategy, FrameCache, MapView};
pub use geometry::Shape;
pub use projection::{MapProjection, Viewport, DESIGN_HEIGHT};
pub use registry::{id_color, Region, RegionRegistry, ID_BACKGROUND};
pub use renderer::{
    fire_fill, FrameRenderer, Scene, BACKGROUND, HIGHLIGHT_STROKE, MARKER_FILL, MAX_FIRES_FILL,
    NO_FIRES_FILL,
};
