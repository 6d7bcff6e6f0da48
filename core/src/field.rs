use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FIELD_SIZE, ROBOTS_PER_TEAM};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub const ALL: [Alliance; 2] = [Alliance::Red, Alliance::Blue];
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::Red => write!(f, "red"),
            Alliance::Blue => write!(f, "blue"),
        }
    }
}

/// A position on the field, in field units.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflection through the field center. Maps one alliance's half onto the other's.
    pub fn mirrored(self) -> Self {
        Self {
            x: FIELD_SIZE - self.x,
            y: FIELD_SIZE - self.y,
        }
    }

    pub fn on_field(self) -> bool {
        Zone::FIELD.contains(self)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Coral,
    Processor,
    Barge,
}

/// Axis-aligned rectangle, bounds inclusive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub min: Point,
    pub max: Point,
}

impl Zone {
    pub const FIELD: Zone = Zone::new(0.0, 0.0, FIELD_SIZE, FIELD_SIZE);

    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Mirroring swaps which corner is the minimum, so re-derive both.
    pub fn mirrored(&self) -> Self {
        let a = self.min.mirrored();
        let b = self.max.mirrored();
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point {
            x: rng.gen_range(self.min.x..=self.max.x),
            y: rng.gen_range(self.min.y..=self.max.y),
        }
    }
}

/// Zones for one alliance. Red's layout is canonical, blue's is its reflection.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ZoneTable {
    pub coral: Zone,
    pub processor: Zone,
    pub barge: Zone,
}

const RED_ZONES: ZoneTable = ZoneTable {
    coral: Zone::new(0.0, 0.0, 3.0, 3.0),
    processor: Zone::new(0.0, 7.0, 3.0, 10.0),
    barge: Zone::new(4.0, 3.0, 6.0, 7.0),
};

const RED_START: [Point; ROBOTS_PER_TEAM] = [
    Point::new(1.5, 2.5),
    Point::new(1.5, 5.0),
    Point::new(1.5, 7.5),
];

impl ZoneTable {
    pub fn for_alliance(alliance: Alliance) -> Self {
        match alliance {
            Alliance::Red => RED_ZONES,
            Alliance::Blue => RED_ZONES.mirrored(),
        }
    }

    pub fn mirrored(&self) -> Self {
        Self {
            coral: self.coral.mirrored(),
            processor: self.processor.mirrored(),
            barge: self.barge.mirrored(),
        }
    }

    pub fn get(&self, kind: ZoneKind) -> &Zone {
        match kind {
            ZoneKind::Coral => &self.coral,
            ZoneKind::Processor => &self.processor,
            ZoneKind::Barge => &self.barge,
        }
    }
}

pub fn start_positions(alliance: Alliance) -> [Point; ROBOTS_PER_TEAM] {
    match alliance {
        Alliance::Red => RED_START,
        Alliance::Blue => RED_START.map(Point::mirrored),
    }
}
