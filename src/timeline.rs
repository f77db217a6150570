use anyhow::{bail, Result};

/// First month shown by every time range
pub const START_MONTH: u32 = 1;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Inclusive span of years covered by the frame cache.
///
/// Frames are addressed linearly: `index = (year - start_year) * 12 + (month - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    start_year: i32,
    end_year: i32,
}

impl TimeRange {
    pub fn new(start_year: i32, end_year: i32) -> Result<Self> {
        if end_year < start_year {
            bail!("end year {end_year} is before start year {start_year}");
        }
        Ok(Self { start_year, end_year })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Middle year, labelled on the year timeline
    pub fn mid_year(&self) -> i32 {
        self.start_year + (self.end_year - self.start_year) / 2
    }

    pub fn num_years(&self) -> usize {
        (self.end_year - self.start_year + 1) as usize
    }

    pub fn frame_count(&self) -> usize {
        self.num_years() * 12
    }

    /// Frame index for (month, year), `None` outside the range
    pub fn index(&self, month: u32, year: i32) -> Option<usize> {
        if !(1..=12).contains(&month) || year < self.start_year || year > self.end_year {
            return None;
        }
        Some((year - self.start_year) as usize * 12 + (month - 1) as usize)
    }

    /// Inverse of [`TimeRange::index`]
    pub fn month_year(&self, index: usize) -> Option<(u32, i32)> {
        if index >= self.frame_count() {
            return None;
        }
        let month = (index % 12) as u32 + 1;
        let year = self.start_year + (index / 12) as i32;
        Some((month, year))
    }

    /// Index of the first frame (start month of the start year)
    pub fn start_index(&self) -> usize {
        (START_MONTH - 1) as usize
    }

    /// "January 2006"
    pub fn label(&self, index: usize) -> String {
        match self.month_year(index) {
            Some((month, year)) => format!("{} {}", MONTH_NAMES[month as usize - 1], year),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> TimeRange {
        TimeRange::new(2006, 2016).unwrap()
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(range().num_years(), 11);
        assert_eq!(range().frame_count(), 132);
        assert_eq!(range().mid_year(), 2011);
    }

    #[test]
    fn test_index_round_trip() {
        let r = range();
        for year in 2006..=2016 {
            for month in 1..=12 {
                let idx = r.index(month, year).unwrap();
                assert_eq!(r.month_year(idx), Some((month, year)));
            }
        }
    }

    #[test]
    fn test_index_formula() {
        let r = range();
        assert_eq!(r.index(1, 2006), Some(0));
        assert_eq!(r.index(12, 2006), Some(11));
        assert_eq!(r.index(1, 2007), Some(12));
        assert_eq!(r.index(12, 2016), Some(131));
        assert_eq!(r.start_index(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let r = range();
        assert_eq!(r.index(0, 2006), None);
        assert_eq!(r.index(13, 2006), None);
        assert_eq!(r.index(1, 2005), None);
        assert_eq!(r.index(1, 2017), None);
        assert_eq!(r.month_year(132), None);
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert!(TimeRange::new(2016, 2006).is_err());
        assert_eq!(TimeRange::new(2010, 2010).unwrap().frame_count(), 12);
    }

    #[test]
    fn test_label() {
        assert_eq!(range().label(0), "January 2006");
        assert_eq!(range().label(131), "December 2016");
    }
}
