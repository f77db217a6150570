//! Two-region scene drawn directly in pixel space, shared by unit tests.
//!
//! ```text
//! x: 0        20        36   40
//!    +---AC---+---AM----+
//!    |        |         |      AM spans y 0..16
//!    |     *  +---------+      AC spans y 0..20, anchor * at (16, 16)
//!    +--------+
//! ```

use crate::data::{parse_positions, Dataset};
use crate::map::{RegionRegistry, Scene, Shape};
use crate::timeline::TimeRange;
use glam::DVec2;
use std::collections::HashMap;

pub const FIRES: &str = "\
state,name,month,year,number
AC,Acre,1,2006,120.4
AC,Acre,2,2006,30
AM,Amazonas,1,2006,25963
AC,Acre,1,2007,0.5
";

pub const PLANTED: &str = "\
state,name,year,area
AC,Acre,2006,150000
";

pub const POSITIONS: &str = "\
state,name,x,y
AC,Acre,16,16
AM,Amazonas,28,8
";

pub fn scene() -> Scene {
    scene_with_positions(POSITIONS)
}

pub fn scene_with_positions(positions: &str) -> Scene {
    let mut dataset = Dataset::parse_fires(FIRES).unwrap();
    dataset.apply_planted(PLANTED).unwrap();
    dataset.set_anchors(parse_positions(positions).unwrap());

    let shapes = HashMap::from([
        ("AC".to_string(), Shape::rect(DVec2::ZERO, DVec2::new(20.0, 20.0))),
        ("AM".to_string(), Shape::rect(DVec2::new(20.0, 0.0), DVec2::new(36.0, 16.0))),
    ]);
    let registry = RegionRegistry::build(&dataset, shapes).unwrap();
    Scene {
        dataset,
        registry,
        time: TimeRange::new(2006, 2007).unwrap(),
    }
}
