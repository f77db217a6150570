use crate::config::Config;
use crate::data::shapes::load_region_shapes;
use crate::data::Dataset;
use crate::hover::{self, HoverDetail};
use crate::map::{CacheStrategy, MapProjection, MapView, RegionRegistry, Scene, Viewport};
use crate::playback::Playback;
use crate::raster::Canvas;
use crate::ui::{Control, Hit, ScreenLayout};
use anyhow::Result;
use log::{debug, info};
use ratatui::layout::Rect;
use std::borrow::Cow;
use std::collections::HashMap;

/// Load tables and map asset, then pair every region with its projected outline
pub fn load_scene(config: &Config) -> Result<Scene> {
    let dataset = Dataset::load(&config.data_paths())?;
    let codes: Vec<&str> = dataset.regions().iter().map(|r| r.code.as_str()).collect();
    let outlines = load_region_shapes(&config.map, &codes)?;

    let projection = MapProjection::fit(outlines.values());
    let shapes: HashMap<_, _> = outlines
        .iter()
        .map(|(code, shape)| (code.clone(), projection.project_shape(shape)))
        .collect();
    let registry = RegionRegistry::build(&dataset, shapes)?;
    info!(
        "Registered {} regions on a {:.0}x{:.0} design map",
        registry.len(),
        projection.design_size().x,
        projection.design_size().y
    );

    Ok(Scene {
        dataset,
        registry,
        time: config.time,
    })
}

/// Application state
pub struct App {
    pub scene: Scene,
    pub view: MapView,
    pub playback: Playback,
    pub layout: ScreenLayout,
    pub should_quit: bool,
    /// Current mouse position (terminal column/row)
    pub mouse_pos: Option<(u16, u16)>,
    /// Element under a held mouse button
    pub pressed: Option<Hit>,
    strategy: CacheStrategy,
}

impl App {
    /// Build the id buffer and frame cache for a `width` x `height` terminal
    pub fn new(scene: Scene, config: &Config, width: u16, height: u16) -> Self {
        let layout = ScreenLayout::new(Rect::new(0, 0, width, height), scene.time.num_years());
        let view = build_view(&scene, &layout, config.strategy);
        let playback = Playback::new(scene.time, config.cadence);
        Self {
            scene,
            view,
            playback,
            layout,
            should_quit: false,
            mouse_pos: None,
            pressed: None,
            strategy: config.strategy,
        }
    }

    /// Recompute the layout; rebuild frames only if the map buffer changed size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ScreenLayout::new(Rect::new(0, 0, width, height), self.scene.time.num_years());
        let (w, h) = self.layout.map_pixels();
        let current = self.view.viewport();
        if current.width != w || current.height != h {
            self.view = build_view(&self.scene, &self.layout, self.strategy);
        }
    }

    /// One display tick
    pub fn tick(&mut self) {
        if self.playback.tick() {
            debug!("Advanced to {}", self.scene.time.label(self.playback.frame()));
        }
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_play(&mut self) {
        self.playback.toggle();
        debug!("Playback {:?}", self.playback.state());
    }

    pub fn stop(&mut self) {
        self.playback.stop();
        debug!("Playback stopped");
    }

    pub fn step_month(&mut self, delta: i32) {
        self.playback.step_month(delta);
    }

    pub fn step_year(&mut self, delta: i32) {
        self.playback.step_year(delta);
    }

    /// Update mouse cursor position
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Mouse button down: apply whatever control is under the cursor
    pub fn press(&mut self, col: u16, row: u16) {
        self.pressed = self.layout.hit_test(col, row);
        if let Some(hit) = self.pressed {
            self.apply(hit);
        }
    }

    /// Mouse button released
    pub fn release(&mut self) {
        self.pressed = None;
    }

    pub fn apply(&mut self, hit: Hit) {
        match hit {
            Hit::Control(Control::Pause) => self.playback.pause(),
            Hit::Control(Control::Play) => self.playback.play(),
            Hit::Control(Control::Stop) => self.playback.stop(),
            Hit::Month(i) => self.playback.jump_to_month(i),
            Hit::Year(i) => self.playback.jump_to_year(i),
        }
        debug!("{hit:?} -> {}", self.scene.time.label(self.playback.frame()));
    }

    /// Clickable element under the mouse (rollover)
    pub fn hovered_hit(&self) -> Option<Hit> {
        self.mouse_pos.and_then(|(col, row)| self.layout.hit_test(col, row))
    }

    /// The precomputed frame for the current month
    pub fn current_frame(&self) -> Option<&Canvas> {
        self.view.frame(self.playback.frame(), &self.scene)
    }

    /// Region under the mouse, sampled from the id buffer (either half of the cell)
    pub fn hovered(&self) -> Option<HoverDetail<'_>> {
        let (col, row) = self.mouse_pos?;
        let (x, y) = self.layout.map_pixel_at(col, row);
        let region = hover::region_at_cell(self.view.id_buffer(), &self.scene.registry, x, y)?;
        let (month, year) = self.playback.month_year();
        hover::resolve(&self.scene, region, month, year)
    }

    /// Current frame, with the hovered region outlined on a copy
    pub fn display_frame(&self) -> Option<Cow<'_, Canvas>> {
        let frame = self.current_frame()?;
        let Some(detail) = self.hovered() else {
            return Some(Cow::Borrowed(frame));
        };
        let (month, year) = self.playback.month_year();
        let entry = self.scene.dataset.regions().get(detail.region)?.entry(month, year)?;
        let mut canvas = frame.clone();
        self.view.renderer().render_highlight(&mut canvas, detail.region, entry);
        Some(Cow::Owned(canvas))
    }
}

fn build_view(scene: &Scene, layout: &ScreenLayout, strategy: CacheStrategy) -> MapView {
    let (width, height) = layout.map_pixels();
    let viewport = Viewport::fit(scene.design_size(), width, height);
    MapView::build(scene, viewport, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use crate::map::HIGHLIGHT_STROKE;
    use crate::playback::PlaybackState;
    use crate::test_support::{scene, FIRES, PLANTED, POSITIONS};
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    /// AC and AM side by side, in lon/lat
    const MAP_ASSET: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "id": "AC", "properties": {},
         "geometry": {"type": "Polygon", "coordinates": [[[-74,-11],[-66,-11],[-66,-7],[-74,-7],[-74,-11]]]}},
        {"type": "Feature", "properties": {"code": "AM"},
         "geometry": {"type": "Polygon", "coordinates": [[[-66,-9],[-56,-9],[-56,2],[-66,2],[-66,-9]]]}}
    ]}"#;

    const DATA_FILES: [&str; 4] = [
        "fires_data.csv",
        "planted_forests_data.csv",
        "positions.csv",
        "brazil.geojson",
    ];

    fn write_data_dir(dir: &Path) {
        for (name, contents) in DATA_FILES.iter().zip([FIRES, PLANTED, POSITIONS, MAP_ASSET]) {
            fs::write(dir.join(name), contents).unwrap();
        }
    }

    fn config_for(dir: &Path) -> Config {
        let data_dir = dir.to_str().unwrap();
        Config::from_args(&Args::parse_from([
            "brazil-fires",
            "--data-dir",
            data_dir,
            "--start-year",
            "2006",
            "--end-year",
            "2007",
        ]))
        .unwrap()
    }

    fn app() -> App {
        let config = Config::from_args(&Args::parse_from(["brazil-fires", "--start-year", "2006", "--end-year", "2007"]))
            .unwrap();
        App::new(scene(), &config, 100, 40)
    }

    /// Terminal cell over a design-space point
    fn cell_over(app: &App, x: f64, y: f64) -> (u16, u16) {
        let p = app.view.viewport().to_buffer(glam::DVec2::new(x, y));
        let inner = app.layout.map_inner;
        (inner.x + p.x as u16, inner.y + (p.y / 2.0) as u16)
    }

    #[test]
    fn test_frames_sized_to_map_panel() {
        let app = app();
        let (w, h) = app.layout.map_pixels();
        let frame = app.current_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (w, h));
        assert_eq!(app.view.frames().len(), 24);
    }

    #[test]
    fn test_hover_over_region() {
        let mut app = app();
        let (col, row) = cell_over(&app, 4.0, 4.0);
        app.set_mouse_pos(col, row);
        let detail = app.hovered().unwrap();
        assert_eq!(detail.code, "AC");
        assert_eq!(detail.fire_count, 120);

        let shown = app.display_frame().unwrap();
        assert!(matches!(shown, Cow::Owned(_)));
        assert!(shown.palette().contains(&HIGHLIGHT_STROKE));
    }

    #[test]
    fn test_hover_outside_map() {
        let mut app = app();
        app.set_mouse_pos(0, 0);
        assert!(app.hovered().is_none());
        app.set_mouse_pos(99, 39);
        assert!(app.hovered().is_none());
        assert!(matches!(app.display_frame(), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_hover_follows_current_month() {
        let mut app = app();
        let (col, row) = cell_over(&app, 30.0, 8.0);
        app.set_mouse_pos(col, row);
        assert_eq!(app.hovered().unwrap().code, "AM");
        // AM has no February data, so nothing is selectable there
        app.step_month(1);
        assert!(app.hovered().is_none());
    }

    #[test]
    fn test_clicks_drive_playback() {
        let mut app = app();
        let play = app.layout.button(Control::Play);
        app.press(play.x, play.y);
        assert_eq!(app.playback.state(), PlaybackState::Playing);
        assert_eq!(app.pressed, Some(Hit::Control(Control::Play)));
        app.release();
        assert_eq!(app.pressed, None);

        let year = app.layout.year_columns()[1];
        app.press(year, app.layout.year_dot_row());
        let month = app.layout.month_columns()[5];
        app.press(month, app.layout.month_dot_row());
        assert_eq!(app.playback.month_year(), (6, 2007));
        assert!(app.playback.is_playing());

        let stop = app.layout.button(Control::Stop);
        app.press(stop.x, stop.y);
        assert_eq!(app.playback.month_year(), (1, 2006));
        assert_eq!(app.playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_load_scene_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        let config = config_for(dir.path());

        let scene = load_scene(&config).unwrap();
        assert_eq!(scene.registry.len(), 2);
        assert_eq!(scene.dataset.region("AC").unwrap().entry(1, 2006).unwrap().planted_area_ha, 150_000);
        assert_eq!(scene.dataset.anchor("AM"), Some(glam::IVec2::new(28, 8)));
        // Mercator fit to the design height
        assert!((scene.design_size().y - crate::map::DESIGN_HEIGHT).abs() < 1e-6);

        let ac = scene.registry.get(scene.registry.index_of("AC").unwrap()).unwrap();
        let (min, max) = ac
            .shape
            .points()
            .fold((glam::DVec2::MAX, glam::DVec2::MIN), |(lo, hi), p| (lo.min(p), hi.max(p)));
        let center = (min + max) / 2.0;

        let mut app = App::new(scene, &config, 100, 40);
        let (col, row) = cell_over(&app, center.x, center.y);
        app.set_mouse_pos(col, row);
        let detail = app.hovered().unwrap();
        assert_eq!(detail.code, "AC");
        assert_eq!(detail.fire_count, 120);
    }

    #[test]
    fn test_load_scene_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        let config = config_for(dir.path());

        for name in DATA_FILES {
            let path = dir.path().join(name);
            let moved = dir.path().join(format!("{name}.bak"));
            fs::rename(&path, &moved).unwrap();

            let err = load_scene(&config).err().unwrap();
            let message = format!("{err:#}");
            assert!(
                message.contains(&path.display().to_string()),
                "error for missing {name} does not name it: {message}"
            );

            fs::rename(&moved, &path).unwrap();
        }
        assert!(load_scene(&config).is_ok());
    }

    #[test]
    fn test_load_scene_fails_on_missing_region_shape() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        let only_ac = MAP_ASSET.replace(r#""code": "AM""#, r#""code": "PA""#);
        fs::write(dir.path().join("brazil.geojson"), only_ac).unwrap();

        let err = load_scene(&config_for(dir.path())).err().unwrap();
        assert!(format!("{err:#}").contains("AM"));
    }

    #[test]
    fn test_resize_rebuilds_only_on_size_change() {
        let mut app = app();
        app.resize(100, 40);
        assert_eq!(app.view.viewport().width, app.layout.map_pixels().0);
        app.resize(60, 30);
        let (w, h) = app.layout.map_pixels();
        let frame = app.current_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (w, h));
    }
}
