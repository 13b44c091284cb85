use hashbrown::{HashMap, hash_map};
use hexmap_data::{
    bounds::GridBounds,
    coord::{CubeCoord, Radius},
    layout::HexLayout,
    math::Vec2,
};
use rand::{Rng, distributions::Standard};

use crate::{
    cell::{CellState, CellType, PassabilityTable},
    config::GridConfig,
    path::{Path, PathFinder},
};

/// A write to the grid, waiting to be picked up by whoever relays it.
///
/// `state` is `None` when the cell was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub coord: CubeCoord,
    pub state: Option<CellState>,
}

/// The cells of one map, and how they sit in world space.
///
/// Every write queues a [`CellChange`]. The queue only shrinks through
/// [`HexGrid::drain_changes`] or [`HexGrid::clear_changes`], so an owner that does not
/// relay changes should discard them after bulk writes.
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    layout: HexLayout,
    bounds: GridBounds,
    passability: PassabilityTable,
    cells: HashMap<CubeCoord, CellState>,
    changes: Vec<CellChange>,
}

impl HexGrid {
    /// Creates an empty grid. Nothing is generated.
    pub fn new(layout: HexLayout, bounds: GridBounds) -> Self {
        Self {
            layout,
            bounds,
            ..Default::default()
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            layout: config.layout,
            bounds: config.bounds,
            passability: config.passability.clone(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    #[inline]
    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    #[inline]
    pub fn passability(&self) -> &PassabilityTable {
        &self.passability
    }

    /// The number of present cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubeCoord, CellState)> + '_ {
        self.cells.iter().map(|(coord, state)| (*coord, *state))
    }

    /// A cell of `kind` as this grid's passability table sees it.
    #[inline]
    pub fn state_of(&self, kind: CellType) -> CellState {
        CellState::from_table(kind, &self.passability)
    }

    /// Inserts or overwrites the cell at `coord`.
    ///
    /// Coordinates outside the bounds are still written.
    pub fn set_cell(&mut self, coord: CubeCoord, state: CellState) {
        if !self.bounds.contains(coord) {
            log::warn!("Writing cell {coord} outside of the grid bounds {:?}", self.bounds);
        }

        self.cells.insert(coord, state);
        self.changes.push(CellChange {
            coord,
            state: Some(state),
        });
    }

    /// Returns `None` when no cell is present at `coord`.
    #[inline]
    pub fn get_cell(&self, coord: CubeCoord) -> Option<CellState> {
        self.cells.get(&coord).copied()
    }

    #[inline]
    pub fn contains(&self, coord: CubeCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Removes the cell at `coord` and returns it, if there was one.
    pub fn remove_cell(&mut self, coord: CubeCoord) -> Option<CellState> {
        let removed = self.cells.remove(&coord);

        if removed.is_some() {
            self.changes.push(CellChange { coord, state: None });
        }

        removed
    }

    /// Absent cells are never passable.
    #[inline]
    pub fn is_passable(&self, coord: CubeCoord) -> bool {
        self.cells.get(&coord).is_some_and(|state| state.passable)
    }

    /// Every present cell within `radius` of `center`, in [`CubeCoord::range`] order.
    pub fn cells_in_range(&self, center: CubeCoord, radius: Radius) -> impl Iterator<Item = CubeCoord> + '_ {
        center.range(radius).filter(|coord| self.cells.contains_key(coord))
    }

    /// Removes every cell, queueing a removal for each.
    pub fn clear(&mut self) {
        self.changes
            .extend(self.cells.drain().map(|(coord, _)| CellChange { coord, state: None }));
    }

    /// The six neighbors of `coord`, present or not.
    #[inline]
    pub fn neighbors_of(&self, coord: CubeCoord) -> [CubeCoord; 6] {
        coord.neighbors()
    }

    pub fn passable_neighbors(&self, coord: CubeCoord) -> impl Iterator<Item = CubeCoord> + '_ {
        coord.neighbors().into_iter().filter(|n| self.is_passable(*n))
    }

    /// Changes the type of the cell at `coord`, resetting its passability from the table.
    ///
    /// Returns `false` and does nothing when no cell is present.
    pub fn set_cell_type(&mut self, coord: CubeCoord, kind: CellType) -> bool {
        let state = self.state_of(kind);

        match self.cells.entry(coord) {
            hash_map::Entry::Occupied(mut entry) => {
                entry.insert(state);
                self.changes.push(CellChange {
                    coord,
                    state: Some(state),
                });

                true
            }
            hash_map::Entry::Vacant(_) => false,
        }
    }

    /// Moves the cell at `coord` on to the next type, and returns that type.
    pub fn cycle_cell_type(&mut self, coord: CubeCoord) -> Option<CellType> {
        let next = self.cells.get(&coord)?.kind.next();

        self.set_cell_type(coord, next);

        Some(next)
    }

    #[inline]
    pub fn world_to_hex(&self, pos: Vec2) -> CubeCoord {
        self.layout.to_hex(pos)
    }

    #[inline]
    pub fn hex_to_world(&self, coord: CubeCoord) -> Vec2 {
        self.layout.to_world(coord)
    }

    #[inline]
    pub fn corners(&self, coord: CubeCoord) -> [Vec2; 6] {
        self.layout.corners(coord)
    }

    /// Fills every coordinate of the bounds with `kind`, returning how many cells were written.
    pub fn generate(&mut self, kind: CellType) -> usize {
        self.generate_with(|_| kind)
    }

    /// Fills every coordinate of the bounds with a uniformly random type.
    pub fn generate_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.generate_with(|_| rng.sample(Standard))
    }

    /// Fills every coordinate of the bounds with the type `f` picks for it.
    ///
    /// Unbounded grids have nothing to fill, and are left untouched.
    pub fn generate_with(&mut self, mut f: impl FnMut(CubeCoord) -> CellType) -> usize {
        if !self.bounds.is_bounded() {
            log::warn!("Cannot generate cells for an unbounded grid");

            return 0;
        }

        let mut count = 0;
        for coord in self.bounds {
            let state = self.state_of(f(coord));

            self.set_cell(coord, state);
            count += 1;
        }

        log::debug!("Generated {count} cells in {:?}", self.bounds);

        count
    }

    /// Takes every change queued since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> impl Iterator<Item = CellChange> + '_ {
        self.changes.drain(..)
    }

    /// Drops every queued change without looking at it.
    #[inline]
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    #[inline]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// The shortest walk over passable cells from `start` to `goal`, see [`PathFinder`].
    pub fn find_path(&self, start: CubeCoord, goal: CubeCoord) -> Path {
        PathFinder::default().find(self, start, goal)
    }
}
