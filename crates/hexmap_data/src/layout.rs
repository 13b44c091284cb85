//! Conversions between cells, world space and offset coordinates.
//!
//! The world-space formulas are the usual ones from
//! ['Hexagonal Grids'](https://www.redblobgames.com/grids/hexagons/#hex-to-pixel),
//! expressed as a forward and an inverse 2x2 matrix per orientation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    coord::{CubeCoord, FractionalHex},
    math::{Float, IVec2, Matrix2, Vec2, consts},
};

/// An ['offset coord'](https://www.redblobgames.com/grids/hexagons/#coordinates-offset)
/// in the format `[col, row]`.
pub type OffsetCoord = IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("cell size must be a finite positive number, got {0}")]
    InvalidCellSize(Float),
}

/// Which way up the hexagons sit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// A vertex points up; rows of cells are horizontal.
    #[default]
    PointyTop,
    /// An edge is on top; columns of cells are vertical.
    FlatTop,
}

impl Orientation {
    /// Maps `(q, r)` to world space for a cell size of 1.
    #[inline]
    #[must_use]
    pub fn forward(self) -> Matrix2 {
        match self {
            Orientation::PointyTop => Matrix2::new(consts::SQRT_3, consts::SQRT_3 / 2.0, 0.0, 3.0 / 2.0),
            Orientation::FlatTop => Matrix2::new(3.0 / 2.0, 0.0, consts::SQRT_3 / 2.0, consts::SQRT_3),
        }
    }

    /// Maps world space to fractional `(q, r)` for a cell size of 1.
    #[inline]
    #[must_use]
    pub fn inverse(self) -> Matrix2 {
        match self {
            Orientation::PointyTop => Matrix2::new(consts::SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0),
            Orientation::FlatTop => Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, consts::SQRT_3 / 3.0),
        }
    }

    /// The angle of the first corner, in units of 60 degrees.
    #[inline]
    #[must_use]
    const fn start_angle(self) -> Float {
        match self {
            Orientation::PointyTop => 0.5,
            Orientation::FlatTop => 0.0,
        }
    }
}

/// How cells are laid out in world space.
///
/// `cell_size` is the distance from a cell's center to any of its corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "raw::HexLayoutRaw", into = "raw::HexLayoutRaw")]
pub struct HexLayout {
    orientation: Orientation,
    cell_size: Float,
    origin: Vec2,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            cell_size: 1.0,
            origin: Vec2::zero(),
        }
    }
}

impl HexLayout {
    /// Creates a layout with the cell `(0, 0, 0)` centered on the world origin.
    pub fn new(orientation: Orientation, cell_size: Float) -> Result<Self, LayoutError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(LayoutError::InvalidCellSize(cell_size));
        }

        Ok(Self {
            orientation,
            cell_size,
            origin: Vec2::zero(),
        })
    }

    /// Moves the center of the cell `(0, 0, 0)` to `origin`.
    #[inline]
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> Float {
        self.cell_size
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// The world position of the center of `coord`.
    #[inline]
    #[must_use]
    pub fn to_world(&self, coord: CubeCoord) -> Vec2 {
        self.fract_to_world(FractionalHex::from(coord))
    }

    #[inline]
    #[must_use]
    pub fn fract_to_world(&self, hex: FractionalHex) -> Vec2 {
        self.orientation.forward() * Vec2::new(hex.q, hex.r) * self.cell_size + self.origin
    }

    /// The unrounded hex-space position of `pos`.
    #[inline]
    #[must_use]
    pub fn to_hex_raw(&self, pos: Vec2) -> FractionalHex {
        let local = (pos - self.origin) / self.cell_size;
        let hex = self.orientation.inverse() * local;

        FractionalHex::new(hex.x, hex.y)
    }

    /// The cell containing `pos`.
    #[inline]
    #[must_use]
    pub fn to_hex(&self, pos: Vec2) -> CubeCoord {
        self.to_hex_raw(pos).round()
    }

    /// The six corners of `coord` in world space, counter-clockwise in a y-up frame.
    #[must_use]
    pub fn corners(&self, coord: CubeCoord) -> [Vec2; 6] {
        let center = self.to_world(coord);
        let start = self.orientation.start_angle();

        core::array::from_fn(|i| {
            let angle = consts::FRAC_PI_3 * (start + i as Float);

            center + Vec2::new(angle.cos(), angle.sin()) * self.cell_size
        })
    }

    /// Converts to the offset coordinate of `coord`.
    ///
    /// Offset coordinates use the "odd-q" convention for both orientations:
    /// the column is `q`, and odd columns sit half a row lower than even ones.
    #[inline]
    #[must_use]
    pub const fn offset_from_cube(coord: CubeCoord) -> OffsetCoord {
        let q = coord.q();

        OffsetCoord::new(q, coord.r() + (q - (q & 1)) / 2)
    }

    /// Converts from an offset coordinate, see [`HexLayout::offset_from_cube`].
    #[inline]
    #[must_use]
    pub const fn cube_from_offset(offset: OffsetCoord) -> CubeCoord {
        let col = offset.x;

        CubeCoord::new(col, offset.y - (col - (col & 1)) / 2)
    }
}

mod raw {
    use serde::{Deserialize, Serialize};

    use super::{HexLayout, LayoutError, Orientation};
    use crate::math::{Float, Vec2};

    #[derive(Serialize, Deserialize)]
    pub(super) struct HexLayoutRaw {
        orientation: Orientation,
        cell_size: Float,
        #[serde(default)]
        origin: (Float, Float),
    }

    impl TryFrom<HexLayoutRaw> for HexLayout {
        type Error = LayoutError;

        fn try_from(value: HexLayoutRaw) -> Result<Self, Self::Error> {
            let (x, y) = value.origin;

            Ok(HexLayout::new(value.orientation, value.cell_size)?.with_origin(Vec2::new(x, y)))
        }
    }

    impl From<HexLayout> for HexLayoutRaw {
        fn from(value: HexLayout) -> Self {
            Self {
                orientation: value.orientation,
                cell_size: value.cell_size,
                origin: (value.origin.x, value.origin.y),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn matrices_are_inverses() {
        for orientation in [Orientation::PointyTop, Orientation::FlatTop] {
            let product = orientation.forward() * orientation.inverse();

            for (got, want) in product
                .into_row_array()
                .into_iter()
                .zip(Matrix2::identity().into_row_array())
            {
                assert_abs_diff_eq!(got, want, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn rejects_bad_cell_sizes() {
        for size in [0.0, -1.0, Float::NAN, Float::INFINITY] {
            assert!(HexLayout::new(Orientation::FlatTop, size).is_err());
        }
    }
}
