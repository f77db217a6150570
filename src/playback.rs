use crate::timeline::{TimeRange, START_MONTH};

/// Display ticks between frame advances while playing
pub const DEFAULT_CADENCE: u32 = 35;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// Current frame selection and the play/pause state machine.
///
/// Only explicit commands change the state; ticks only move the index
/// while playing.
#[derive(Clone, Debug)]
pub struct Playback {
    range: TimeRange,
    frame: usize,
    state: PlaybackState,
    ticks: u32,
    cadence: u32,
}

impl Playback {
    pub fn new(range: TimeRange, cadence: u32) -> Self {
        Self {
            range,
            frame: range.start_index(),
            state: PlaybackState::Paused,
            ticks: 0,
            cadence: cadence.max(1),
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// (month, year) of the current frame
    pub fn month_year(&self) -> (u32, i32) {
        self.range
            .month_year(self.frame)
            .unwrap_or((START_MONTH, self.range.start_year()))
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Paused => self.play(),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Rewind to the start month of the start year and pause
    pub fn stop(&mut self) {
        self.state = PlaybackState::Paused;
        self.frame = self.range.start_index();
        self.ticks = 0;
    }

    /// Advance the display clock by one tick. Returns true if the frame changed.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.ticks += 1;
        if self.ticks < self.cadence {
            return false;
        }
        self.ticks = 0;
        self.frame = (self.frame + 1) % self.range.frame_count();
        true
    }

    /// Jump to a month (0-based) within the current year
    pub fn jump_to_month(&mut self, month_idx: usize) {
        let (_, year) = self.month_year();
        if let Some(idx) = self.range.index(month_idx as u32 + 1, year) {
            self.frame = idx;
        }
    }

    /// Jump to a year (0-based from the start year), keeping the month
    pub fn jump_to_year(&mut self, year_idx: usize) {
        let (month, _) = self.month_year();
        if let Some(idx) = self.range.index(month, self.range.start_year() + year_idx as i32) {
            self.frame = idx;
        }
    }

    /// Step the month by `delta`, wrapping within the current year
    pub fn step_month(&mut self, delta: i32) {
        let (month, _) = self.month_year();
        let month_idx = (month as i32 - 1 + delta).rem_euclid(12);
        self.jump_to_month(month_idx as usize);
    }

    /// Step the year by `delta`, wrapping within the range
    pub fn step_year(&mut self, delta: i32) {
        let (_, year) = self.month_year();
        let years = self.range.num_years() as i32;
        let year_idx = (year - self.range.start_year() + delta).rem_euclid(years);
        self.jump_to_year(year_idx as usize);
    }
}
