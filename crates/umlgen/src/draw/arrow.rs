//! Connector geometry between two class boxes.
//!
//! A connector is anchored at the centers of its two boxes. The tip starts
//! at the midpoint of the anchors and is walked along the shaft until the
//! next step would enter the target box, so the arrowhead always ends just
//! outside the target's border. The two wings of the arrowhead are unit
//! segments whose angles come from the [`Heading`] table.

use std::{
    cmp::Ordering,
    f64::consts::{FRAC_PI_2, FRAC_PI_6},
};

use umlgen_core::geometry::{ClassBox, Point};

use super::Segment;

/// Wing angle relative to the base angle when the base angle points along
/// the shaft (east-facing and vertical shafts).
const REAR_WING: f64 = 5.0 * FRAC_PI_6;

/// Wing angle relative to the base angle for west-facing shafts, whose
/// base angle points back along the shaft.
const FRONT_WING: f64 = FRAC_PI_6;

/// Length of each arrowhead wing, in grid units.
const WING_LENGTH: f64 = 1.0;

/// Direction of a shaft on screen, where y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    East,
    West,
    North,
    South,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Heading {
    /// Classifies a shaft vector, `None` for the zero vector.
    pub fn from_delta(delta: Point) -> Option<Self> {
        let (dx, dy) = (delta.x(), delta.y());
        let heading = match (dx.partial_cmp(&0.0)?, dy.partial_cmp(&0.0)?) {
            (Ordering::Equal, Ordering::Equal) => return None,
            (Ordering::Greater, Ordering::Equal) => Self::East,
            (Ordering::Less, Ordering::Equal) => Self::West,
            (Ordering::Equal, Ordering::Less) => Self::North,
            (Ordering::Equal, Ordering::Greater) => Self::South,
            (Ordering::Greater, Ordering::Less) => Self::NorthEast,
            (Ordering::Less, Ordering::Less) => Self::NorthWest,
            (Ordering::Greater, Ordering::Greater) => Self::SouthEast,
            (Ordering::Less, Ordering::Greater) => Self::SouthWest,
        };
        Some(heading)
    }

    /// Angle the wing offsets are measured from.
    ///
    /// Axis-aligned headings use fixed angles; diagonal headings use
    /// `atan(dy / dx)`, which points along the shaft for east-facing
    /// diagonals and against it for west-facing ones.
    fn base_angle(self, delta: Point) -> f64 {
        match self {
            Self::East | Self::West => 0.0,
            Self::North => -FRAC_PI_2,
            Self::South => FRAC_PI_2,
            Self::NorthEast | Self::NorthWest | Self::SouthEast | Self::SouthWest => {
                (delta.y() / delta.x()).atan()
            }
        }
    }

    /// Left and right wing offsets from the base angle.
    ///
    /// Left and right are taken facing along the shaft.
    fn wing_offsets(self) -> (f64, f64) {
        match self {
            Self::East | Self::North | Self::South | Self::NorthEast | Self::SouthEast => {
                (-REAR_WING, REAR_WING)
            }
            Self::West | Self::NorthWest | Self::SouthWest => (FRONT_WING, -FRONT_WING),
        }
    }

    /// One walking step along the shaft toward the target.
    ///
    /// Axis-aligned shafts move one unit. Diagonal shafts move half a unit
    /// along x, scaled down for steep slopes so that neither component
    /// exceeds half a unit.
    fn step(self, delta: Point) -> Point {
        match self {
            Self::East => Point::new(1.0, 0.0),
            Self::West => Point::new(-1.0, 0.0),
            Self::North => Point::new(0.0, -1.0),
            Self::South => Point::new(0.0, 1.0),
            Self::NorthEast | Self::NorthWest | Self::SouthEast | Self::SouthWest => {
                let slope = delta.y() / delta.x();
                let direction = delta.x().signum();
                // An unscaled step of 0.5 * slope can jump over a target thinner than that.
                Point::new(0.5 * direction, 0.5 * slope * direction)
                    .scale(1.0 / slope.abs().max(1.0))
            }
        }
    }
}

/// A directed arrow from one class box to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    heading: Heading,
    shaft_start: Point,
    tip: Point,
    wing_left: Point,
    wing_right: Point,
}

impl Connector {
    /// Computes the arrow from `source` to `target`.
    ///
    /// Returns `None` when no arrow can be drawn: the centers coincide or
    /// the source center lies inside the target.
    pub fn between(source: &ClassBox, target: &ClassBox) -> Option<Self> {
        let start = source.center();
        let end = target.center();
        let delta = end.sub_point(start);
        let heading = Heading::from_delta(delta)?;
        if target.contains(start) {
            return None;
        }

        let step = heading.step(delta);
        // Walking the whole shaft from either end takes at most this many steps.
        let max_steps = (delta.hypot() / step.hypot()).ceil() as usize + 1;

        let mut tip = start.midpoint(end);
        for _ in 0..max_steps {
            if !target.contains(tip) {
                break;
            }
            tip = tip.sub_point(step);
        }
        for _ in 0..max_steps {
            let next = tip.add_point(step);
            if target.contains(next) {
                break;
            }
            tip = next;
        }

        let base = heading.base_angle(delta);
        let (left, right) = heading.wing_offsets();
        let wing = |offset: f64| {
            let angle = base + offset;
            tip.add_point(Point::new(angle.cos(), angle.sin()).scale(WING_LENGTH))
        };

        Some(Self {
            heading,
            shaft_start: start,
            tip,
            wing_left: wing(left),
            wing_right: wing(right),
        })
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Center of the source box
    pub fn shaft_start(&self) -> Point {
        self.shaft_start
    }

    /// End of the shaft, just outside the target box
    pub fn tip(&self) -> Point {
        self.tip
    }

    pub fn wing_left(&self) -> Point {
        self.wing_left
    }

    pub fn wing_right(&self) -> Point {
        self.wing_right
    }

    /// Shaft, left wing and right wing, in drawing order.
    pub fn segments(&self) -> [Segment; 3] {
        [
            Segment::new(self.shaft_start, self.tip),
            Segment::new(self.tip, self.wing_left),
            Segment::new(self.tip, self.wing_right),
        ]
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use umlgen_core::geometry::BoxSize;

    use super::*;

    fn box_pair_strategy() -> impl Strategy<Value = (ClassBox, ClassBox)> {
        (
            (1u32..60, 1u32..60, 3u32..20, 2u32..10),
            (1u32..60, 1u32..60, 3u32..20, 2u32..10),
        )
            .prop_map(|((ax, ay, aw, ah), (bx, by, bw, bh))| {
                (
                    ClassBox::new(Point::new(f64::from(ax), f64::from(ay)), BoxSize::new(aw, ah)),
                    ClassBox::new(Point::new(f64::from(bx), f64::from(by)), BoxSize::new(bw, bh)),
                )
            })
            .prop_filter("boxes must not conflict", |(a, b)| !a.conflicts_with(b))
    }

    /// The tip never lands inside the target and stays within reach of
    /// both boxes' bounding rectangle.
    fn check_tip_outside_target(source: ClassBox, target: ClassBox) -> Result<(), TestCaseError> {
        let connector = Connector::between(&source, &target);
        prop_assert!(connector.is_some());
        let connector = connector.unwrap();
        let tip = connector.tip();

        prop_assert!(!target.contains(tip));
        prop_assert!(tip.x() >= source.min_x().min(target.min_x()));
        prop_assert!(tip.x() <= source.max_x().max(target.max_x()));
        prop_assert!(tip.y() >= source.min_y().min(target.min_y()));
        prop_assert!(tip.y() <= source.max_y().max(target.max_y()));
        Ok(())
    }

    /// Both wings are unit length and symmetric about the shaft.
    fn check_wings_symmetric(source: ClassBox, target: ClassBox) -> Result<(), TestCaseError> {
        let connector = Connector::between(&source, &target).unwrap();
        let tip = connector.tip();
        let shaft = tip.sub_point(connector.shaft_start());
        let left = connector.wing_left().sub_point(tip);
        let right = connector.wing_right().sub_point(tip);

        prop_assert!((left.hypot() - 1.0).abs() < 1e-9);
        prop_assert!((right.hypot() - 1.0).abs() < 1e-9);

        let along = |v: Point| (shaft.x() * v.x() + shaft.y() * v.y()) / shaft.hypot();
        let across = |v: Point| (shaft.x() * v.y() - shaft.y() * v.x()) / shaft.hypot();
        prop_assert!(along(left) < 0.0);
        prop_assert!((along(left) - along(right)).abs() < 1e-9);
        prop_assert!((across(left) + across(right)).abs() < 1e-9);
        Ok(())
    }

    proptest! {
        #[test]
        fn tip_outside_target((source, target) in box_pair_strategy()) {
            check_tip_outside_target(source, target)?;
        }

        #[test]
        fn wings_symmetric((source, target) in box_pair_strategy()) {
            check_wings_symmetric(source, target)?;
        }
    }
}
