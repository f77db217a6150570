use crate::map::projection::Viewport;
use crate::map::renderer::{FrameRenderer, Scene};
use crate::raster::Canvas;
use log::info;
use rayon::prelude::*;
use std::cell::OnceCell;
use std::time::Instant;

/// How frames are produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheStrategy {
    /// Render every frame up front; playback only swaps buffers
    #[default]
    Eager,
    /// Like `Eager`, but rendered one by one on the calling thread
    Sequential,
    /// Render each frame on first display and keep it
    Lazy,
}

/// Frame index -> rendered frame
pub enum FrameCache {
    Eager(Vec<Canvas>),
    Lazy(Vec<OnceCell<Canvas>>),
}

impl FrameCache {
    /// Build (or reserve) one frame per month of the scene's time range.
    /// Eager builds fan out over the rayon pool and return in index order.
    /// Sequential builds never leave the calling thread.
    pub fn build(scene: &Scene, renderer: &FrameRenderer, strategy: CacheStrategy) -> Self {
        let count = scene.time.frame_count();
        match strategy {
            CacheStrategy::Eager => {
                let frames = (0..count)
                    .into_par_iter()
                    .map(|i| {
                        let (month, year) = scene.time.month_year(i).unwrap_or_default();
                        renderer.render_frame(scene, month, year)
                    })
                    .collect();
                FrameCache::Eager(frames)
            }
            CacheStrategy::Sequential => FrameCache::Eager(
                (0..count)
                    .map(|i| {
                        let (month, year) = scene.time.month_year(i).unwrap_or_default();
                        renderer.render_frame(scene, month, year)
                    })
                    .collect(),
            ),
            CacheStrategy::Lazy => FrameCache::Lazy((0..count).map(|_| OnceCell::new()).collect()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FrameCache::Eager(frames) => frames.len(),
            FrameCache::Lazy(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frames rendered so far
    pub fn ready(&self) -> usize {
        match self {
            FrameCache::Eager(frames) => frames.len(),
            FrameCache::Lazy(cells) => cells.iter().filter(|c| c.get().is_some()).count(),
        }
    }

    pub fn get(&self, index: usize, scene: &Scene, renderer: &FrameRenderer) -> Option<&Canvas> {
        match self {
            FrameCache::Eager(frames) => frames.get(index),
            FrameCache::Lazy(cells) => {
                let cell = cells.get(index)?;
                let (month, year) = scene.time.month_year(index)?;
                Some(cell.get_or_init(|| renderer.render_frame(scene, month, year)))
            }
        }
    }
}

/// Everything rendered for one buffer size: id buffer and frame cache
pub struct MapView {
    renderer: FrameRenderer,
    id_buffer: Canvas,
    frames: FrameCache,
}

impl MapView {
    pub fn build(scene: &Scene, viewport: Viewport, strategy: CacheStrategy) -> Self {
        let started = Instant::now();
        let renderer = FrameRenderer::new(scene, viewport);
        let id_buffer = renderer.render_id_buffer(scene);
        let frames = FrameCache::build(scene, &renderer, strategy);
        info!(
            "Built {}x{} map view: {} of {} frames ready ({:?}) in {:.1?}",
            renderer.viewport().width,
            renderer.viewport().height,
            frames.ready(),
            frames.len(),
            strategy,
            started.elapsed()
        );
        Self { renderer, id_buffer, frames }
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn viewport(&self) -> &Viewport {
        self.renderer.viewport()
    }

    pub fn id_buffer(&self) -> &Canvas {
        &self.id_buffer
    }

    pub fn frames(&self) -> &FrameCache {
        &self.frames
    }

    pub fn frame(&self, index: usize, scene: &Scene) -> Option<&Canvas> {
        self.frames.get(index, scene, &self.renderer)
    }
}
