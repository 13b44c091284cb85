use std::{
    fmt::{Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::{Float, Int, UInt};

/// The type used for search and range radii, in cells.
pub type Radius = UInt;

/// The largest radius [`CubeCoord::range`] and [`CubeCoord::ring`] walk; larger radii are clamped to it.
pub const MAX_RADIUS: Radius = (Int::MAX / 2) as Radius;

#[inline]
const fn clamp_radius(radius: Radius) -> Radius {
    if radius > MAX_RADIUS { MAX_RADIUS } else { radius }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("cube coordinate ({q}, {r}, {s}) does not satisfy q + r + s = 0")]
    InvalidCoordinate { q: Int, r: Int, s: Int },
}

/// One of the six edge directions of a hexagon.
///
/// The names describe a pointy-top layout on a y-down screen. The order of the
/// variants is the order used everywhere a coordinate's neighbors are listed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction at `index`, or [`None`] if `index` is not in `0..6`.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 6 { Some(Self::ALL[index]) } else { None }
    }

    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }

    /// The unit offset of this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> CubeCoord {
        match self {
            Self::East => CubeCoord::new(1, 0),
            Self::NorthEast => CubeCoord::new(1, -1),
            Self::NorthWest => CubeCoord::new(0, -1),
            Self::West => CubeCoord::new(-1, 0),
            Self::SouthWest => CubeCoord::new(-1, 1),
            Self::SouthEast => CubeCoord::new(0, 1),
        }
    }
}

impl From<HexDirection> for CubeCoord {
    fn from(value: HexDirection) -> Self {
        value.offset()
    }
}

/// The address of a single hex cell, in cube coordinates.
///
/// `q + r + s == 0` holds for every value of this type: [`CubeCoord::new`] derives `s`,
/// and [`CubeCoord::try_new`] refuses components that break the constraint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Int; 3]", into = "[Int; 3]")]
pub struct CubeCoord {
    q: Int,
    r: Int,
    s: Int,
}

impl CubeCoord {
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates the coordinate `(q, r, -q - r)`.
    #[inline]
    #[must_use]
    pub const fn new(q: Int, r: Int) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Creates the coordinate `(q, r, s)`, failing if the components don't sum to zero.
    #[inline]
    pub const fn try_new(q: Int, r: Int, s: Int) -> Result<Self, CoordError> {
        if q as i64 + r as i64 + s as i64 != 0 {
            return Err(CoordError::InvalidCoordinate { q, r, s });
        }

        Ok(Self { q, r, s })
    }

    #[inline]
    #[must_use]
    pub const fn q(self) -> Int {
        self.q
    }

    #[inline]
    #[must_use]
    pub const fn r(self) -> Int {
        self.r
    }

    #[inline]
    #[must_use]
    pub const fn s(self) -> Int {
        self.s
    }

    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [Int; 3] {
        [self.q, self.r, self.s]
    }

    #[inline]
    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }

    #[inline]
    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }

    #[inline]
    #[must_use]
    pub const fn mul(self, rhs: Int) -> Self {
        Self::new(self.q * rhs, self.r * rhs)
    }

    #[inline]
    #[must_use]
    pub const fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }

    /// Distance from the origin, in cells.
    #[inline]
    #[must_use]
    pub const fn length(self) -> UInt {
        let [q, r, s] = [self.q.unsigned_abs(), self.r.unsigned_abs(), self.s.unsigned_abs()];

        // with q + r + s = 0, the largest component is half the sum of all three
        if q >= r && q >= s {
            q
        } else if r >= q && r >= s {
            r
        } else {
            s
        }
    }

    /// The number of steps between `self` and `other`.
    #[inline]
    #[must_use]
    pub const fn distance_to(self, other: Self) -> UInt {
        self.sub(other).length()
    }

    #[inline]
    #[must_use]
    pub const fn neighbor(self, direction: HexDirection) -> Self {
        self.add(direction.offset())
    }

    /// All six neighbors, in [`HexDirection::ALL`] order.
    #[inline]
    #[must_use]
    pub const fn neighbors(self) -> [Self; 6] {
        [
            self.neighbor(HexDirection::ALL[0]),
            self.neighbor(HexDirection::ALL[1]),
            self.neighbor(HexDirection::ALL[2]),
            self.neighbor(HexDirection::ALL[3]),
            self.neighbor(HexDirection::ALL[4]),
            self.neighbor(HexDirection::ALL[5]),
        ]
    }

    /// The number of cells within `radius` of any cell, the cell itself included.
    ///
    /// `radius` is clamped to [`MAX_RADIUS`], and the count saturates at `usize::MAX`.
    #[inline]
    #[must_use]
    pub const fn range_count(radius: Radius) -> usize {
        let radius = clamp_radius(radius) as usize;

        3usize.saturating_mul(radius).saturating_mul(radius + 1).saturating_add(1)
    }

    /// Every cell within `radius` of `self`.
    ///
    /// Cells come out column by column: `dq` runs from `-radius` to `radius`, and `dr`
    /// runs over the part of `[-radius, radius]` that keeps `ds` in range.
    #[inline]
    #[must_use]
    pub fn range(self, radius: Radius) -> RangeIter {
        RangeIter::new(self, radius)
    }

    /// The cells at exactly `radius` from `self`, walking the ring in direction order.
    ///
    /// A radius of 0 yields only `self`.
    #[must_use]
    pub fn ring(self, radius: Radius) -> Vec<Self> {
        let radius = clamp_radius(radius);
        if radius == 0 {
            return vec![self];
        }

        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut current = self.add(HexDirection::SouthWest.offset().mul(radius as Int));

        for direction in HexDirection::ALL {
            for _ in 0..radius {
                results.push(current);
                current = current.neighbor(direction);
            }
        }

        results
    }

    /// The cells on the straight line from `self` to `other`, both ends included.
    #[must_use]
    pub fn line_to(self, other: Self) -> Vec<Self> {
        let n = self.distance_to(other);
        if n == 0 {
            return vec![self];
        }

        // nudged off the cell edges so that the rounding never sees an exact tie
        let a = FractionalHex::from(self).nudged();
        let b = FractionalHex::from(other).nudged();

        (0..=n)
            .map(|i| a.lerp(b, i as Float / n as Float).round())
            .collect()
    }

    /// Creates a minimal string of the coordinate.
    #[inline]
    #[must_use]
    pub fn to_minimal_string(self) -> String {
        format!("{},{},{}", self.q, self.r, self.s)
    }
}

impl Display for CubeCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {})", self.q, self.r, self.s))
    }
}

impl TryFrom<[Int; 3]> for CubeCoord {
    type Error = CoordError;

    fn try_from([q, r, s]: [Int; 3]) -> Result<Self, Self::Error> {
        Self::try_new(q, r, s)
    }
}

impl From<CubeCoord> for [Int; 3] {
    fn from(value: CubeCoord) -> Self {
        value.to_array()
    }
}

impl Add for CubeCoord {
    type Output = CubeCoord;

    fn add(self, rhs: CubeCoord) -> Self::Output {
        self.add(rhs)
    }
}

impl Sub for CubeCoord {
    type Output = CubeCoord;

    fn sub(self, rhs: CubeCoord) -> Self::Output {
        self.sub(rhs)
    }
}

impl Mul<Int> for CubeCoord {
    type Output = CubeCoord;

    fn mul(self, rhs: Int) -> Self::Output {
        self.mul(rhs)
    }
}

impl Mul<CubeCoord> for Int {
    type Output = CubeCoord;

    fn mul(self, rhs: CubeCoord) -> Self::Output {
        rhs.mul(self)
    }
}

impl Neg for CubeCoord {
    type Output = CubeCoord;

    fn neg(self) -> Self::Output {
        self.neg()
    }
}

/// Iterator over [`CubeCoord::range`].
#[derive(Debug, Clone)]
pub struct RangeIter {
    center: CubeCoord,
    radius: Int,
    dq: Int,
    dr: Int,
    remaining: usize,
}

impl RangeIter {
    fn new(center: CubeCoord, radius: Radius) -> Self {
        let radius = clamp_radius(radius);
        let signed = radius as Int;

        Self {
            center,
            radius: signed,
            dq: -signed,
            dr: Self::dr_start(-signed, signed),
            remaining: CubeCoord::range_count(radius),
        }
    }

    #[inline]
    fn dr_start(dq: Int, radius: Int) -> Int {
        (-radius).max(-dq - radius)
    }

    #[inline]
    fn dr_end(dq: Int, radius: Int) -> Int {
        radius.min(-dq + radius)
    }
}

impl Iterator for RangeIter {
    type Item = CubeCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let result = self.center.add(CubeCoord::new(self.dq, self.dr));

        self.dr += 1;
        if self.dr > Self::dr_end(self.dq, self.radius) {
            self.dq += 1;
            self.dr = Self::dr_start(self.dq, self.radius);
        }

        self.remaining -= 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeIter {}

/// A point in hex space with fractional components, as produced by world-to-hex math.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FractionalHex {
    pub q: Float,
    pub r: Float,
}

impl FractionalHex {
    #[inline]
    #[must_use]
    pub const fn new(q: Float, r: Float) -> Self {
        Self { q, r }
    }

    #[inline]
    #[must_use]
    pub fn s(self) -> Float {
        -self.q - self.r
    }

    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: Float) -> Self {
        Self {
            q: (other.q - self.q).mul_add(t, self.q),
            r: (other.r - self.r).mul_add(t, self.r),
        }
    }

    #[inline]
    #[must_use]
    fn nudged(self) -> Self {
        const EPSILON: Float = 1e-4;

        Self {
            q: self.q + EPSILON,
            r: self.r + EPSILON,
        }
    }

    /// Rounds to the cell containing this point.
    ///
    /// Each axis is rounded on its own, then the axis that moved the furthest is
    /// recomputed from the other two, so the result always satisfies `q + r + s = 0`.
    /// On equal errors `q` is only fixed when its error is strictly the largest, and `r`
    /// only when its error strictly exceeds that of `s`.
    #[must_use]
    pub fn round(self) -> CubeCoord {
        let s = self.s();

        let mut q_r = self.q.round();
        let mut r_r = self.r.round();
        let s_r = s.round();

        let q_diff = (q_r - self.q).abs();
        let r_diff = (r_r - self.r).abs();
        let s_diff = (s_r - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q_r = -r_r - s_r;
        } else if r_diff > s_diff {
            r_r = -q_r - s_r;
        }

        // s is derived from the other two, which fixes it when it had the worst error
        CubeCoord::new(q_r as Int, r_r as Int)
    }
}

impl From<CubeCoord> for FractionalHex {
    fn from(value: CubeCoord) -> Self {
        Self::new(value.q as Float, value.r as Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_iter_walks_columns() {
        let collected = CubeCoord::ZERO.range(1).collect::<Vec<_>>();

        assert_eq!(
            collected,
            [
                CubeCoord::new(-1, 0),
                CubeCoord::new(-1, 1),
                CubeCoord::new(0, -1),
                CubeCoord::new(0, 0),
                CubeCoord::new(0, 1),
                CubeCoord::new(1, -1),
                CubeCoord::new(1, 0),
            ]
        );
    }

    #[test]
    fn range_iter_reports_exact_size() {
        let mut iter = CubeCoord::new(3, -7).range(4);
        assert_eq!(iter.len(), 61);

        iter.next();
        assert_eq!(iter.len(), 60);
        assert_eq!(iter.count(), 60);
    }

    #[test]
    fn oversized_radii_are_clamped() {
        assert_eq!(clamp_radius(Radius::MAX), MAX_RADIUS);
        assert_eq!(CubeCoord::range_count(Radius::MAX), CubeCoord::range_count(MAX_RADIUS));

        let mut iter = CubeCoord::ZERO.range(Radius::MAX);
        assert_eq!(iter.len(), CubeCoord::range_count(MAX_RADIUS));
        assert_eq!(iter.next(), Some(CubeCoord::new(-(MAX_RADIUS as Int), 0)));
    }

    #[test]
    fn nudge_stays_inside_cell() {
        let coord = CubeCoord::new(-4, 9);

        assert_eq!(FractionalHex::from(coord).nudged().round(), coord);
    }
}
