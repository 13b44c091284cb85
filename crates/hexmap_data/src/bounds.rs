use serde::{Deserialize, Serialize};

use crate::{
    coord::{CubeCoord, Radius, RangeIter},
    layout::{HexLayout, OffsetCoord},
    math::{Int, UInt},
};

/// The region of the plane a map occupies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridBounds {
    /// No fixed region; every coordinate is in bounds, and there is nothing to iterate.
    #[default]
    Unbounded,
    /// Every cell within `radius` of `center`.
    Hexagon { center: CubeCoord, radius: Radius },
    /// `width` by `height` cells in axial space, starting at `min` and growing along `+q` and `+r`.
    Parallelogram { min: CubeCoord, width: UInt, height: UInt },
    /// `cols` by `rows` cells in offset space, starting at `min`.
    OffsetRect { min: OffsetCoord, cols: UInt, rows: UInt },
}

impl GridBounds {
    #[inline]
    #[must_use]
    pub const fn hexagon(center: CubeCoord, radius: Radius) -> Self {
        Self::Hexagon { center, radius }
    }

    /// A parallelogram anchored at `(0, 0, 0)`.
    #[inline]
    #[must_use]
    pub const fn parallelogram(width: UInt, height: UInt) -> Self {
        Self::Parallelogram {
            min: CubeCoord::ZERO,
            width,
            height,
        }
    }

    /// An offset rectangle anchored at column 0, row 0.
    #[inline]
    #[must_use]
    pub const fn offset_rect(cols: UInt, rows: UInt) -> Self {
        Self::OffsetRect {
            min: OffsetCoord::new(0, 0),
            cols,
            rows,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        !matches!(self, GridBounds::Unbounded)
    }

    #[must_use]
    pub fn contains(&self, coord: CubeCoord) -> bool {
        match *self {
            GridBounds::Unbounded => true,
            GridBounds::Hexagon { center, radius } => coord.distance_to(center) <= radius,
            GridBounds::Parallelogram { min, width, height } => {
                let d = coord - min;

                within(d.q(), width) && within(d.r(), height)
            }
            GridBounds::OffsetRect { min, cols, rows } => {
                let d = HexLayout::offset_from_cube(coord) - min;

                within(d.x, cols) && within(d.y, rows)
            }
        }
    }

    /// The number of cells in the bounds; 0 when unbounded.
    #[must_use]
    pub const fn len(&self) -> usize {
        match *self {
            GridBounds::Unbounded => 0,
            GridBounds::Hexagon { radius, .. } => CubeCoord::range_count(radius),
            GridBounds::Parallelogram { width, height, .. } => width as usize * height as usize,
            GridBounds::OffsetRect { cols, rows, .. } => cols as usize * rows as usize,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn iter(&self) -> BoundsIter {
        BoundsIter::new(*self)
    }
}

#[inline]
fn within(delta: Int, extent: UInt) -> bool {
    delta >= 0 && (delta as UInt) < extent
}

/// Iterator over every coordinate of a [`GridBounds`].
///
/// Hexagons come out in [`CubeCoord::range`] order; the rectangular shapes come out
/// row by row, with the first axis (`q` or column) varying fastest.
#[derive(Debug, Clone)]
pub struct BoundsIter {
    bounds: GridBounds,
    hexagon: Option<RangeIter>,
    index: usize,
    count: usize,
}

impl BoundsIter {
    fn new(bounds: GridBounds) -> Self {
        let hexagon = match bounds {
            GridBounds::Hexagon { center, radius } => Some(center.range(radius)),
            _ => None,
        };

        Self {
            bounds,
            hexagon,
            index: 0,
            count: bounds.len(),
        }
    }
}

impl Iterator for BoundsIter {
    type Item = CubeCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let index = self.index;
        self.index += 1;

        match self.bounds {
            GridBounds::Unbounded => None,
            GridBounds::Hexagon { .. } => self.hexagon.as_mut().and_then(Iterator::next),
            GridBounds::Parallelogram { min, width, .. } => {
                let width = width as usize;

                Some(min + CubeCoord::new((index % width) as Int, (index / width) as Int))
            }
            GridBounds::OffsetRect { min, cols, .. } => {
                let cols = cols as usize;
                let offset = min + OffsetCoord::new((index % cols) as Int, (index / cols) as Int);

                Some(HexLayout::cube_from_offset(offset))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}

impl IntoIterator for GridBounds {
    type Item = CubeCoord;
    type IntoIter = BoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        BoundsIter::new(self)
    }
}
