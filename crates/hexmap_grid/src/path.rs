//! Shortest paths over walkable cells.
//!
//! The search is A* with a unit step cost and cube distance as the heuristic. That
//! heuristic is consistent, so a cell never needs revisiting once it has been expanded,
//! and expanded cells go into a closed set.
//!
//! Among open cells with the same `f`, the one that was discovered first is expanded first.
//! A cell keeps its discovery order when a cheaper route to it is found.

use core::{cmp::Reverse, ops::Deref};
use std::collections::BinaryHeap;

use hashbrown::{HashMap, hash_map};
use hexmap_data::{coord::CubeCoord, math::UInt};

use crate::grid::HexGrid;

/// Anything a path can be searched over.
pub trait Walkable {
    fn is_walkable(&self, coord: CubeCoord) -> bool;
}

impl Walkable for HexGrid {
    #[inline]
    fn is_walkable(&self, coord: CubeCoord) -> bool {
        self.is_passable(coord)
    }
}

impl<F: Fn(CubeCoord) -> bool> Walkable for F {
    #[inline]
    fn is_walkable(&self, coord: CubeCoord) -> bool {
        self(coord)
    }
}

/// A walk from start to goal, both included. Empty when the goal cannot be reached.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<CubeCoord>);

impl Path {
    #[inline]
    pub fn into_inner(self) -> Vec<CubeCoord> {
        self.0
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        !self.0.is_empty()
    }

    /// The number of steps taken, if the goal was reached.
    #[inline]
    pub fn cost(&self) -> Option<UInt> {
        self.0.len().checked_sub(1).map(|steps| steps as UInt)
    }
}

impl Deref for Path {
    type Target = [CubeCoord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Path {
    type Item = CubeCoord;
    type IntoIter = std::vec::IntoIter<CubeCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a CubeCoord;
    type IntoIter = core::slice::Iter<'a, CubeCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    g: UInt,
    parent: Option<CubeCoord>,
    /// discovery order, for tie-breaking
    seq: u64,
    closed: bool,
}

/// An A* path search. See the [module docs](self) for the ordering rules.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PathFinder {
    limit: Option<usize>,
}

impl PathFinder {
    /// Gives up after expanding `limit` cells.
    ///
    /// Needed when searching something without an edge, like a closure that accepts
    /// every coordinate, where an unreachable goal would otherwise never be ruled out.
    #[inline]
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Finds a shortest path from `start` to `goal`.
    ///
    /// `start == goal` gives the single-cell path, whether or not that cell is walkable.
    /// Otherwise every step after `start` lands on a walkable cell.
    pub fn find(&self, map: &impl Walkable, start: CubeCoord, goal: CubeCoord) -> Path {
        if start == goal {
            return Path(vec![start]);
        }

        let mut nodes = HashMap::<CubeCoord, Node>::new();
        let mut open = BinaryHeap::<Reverse<(UInt, u64, CubeCoord)>>::new();
        let mut seq = 0;
        let mut expansions = 0usize;

        nodes.insert(
            start,
            Node {
                g: 0,
                parent: None,
                seq,
                closed: false,
            },
        );
        open.push(Reverse((start.distance_to(goal), seq, start)));

        while let Some(Reverse((f, _, current))) = open.pop() {
            let Some(node) = nodes.get_mut(&current) else {
                continue;
            };
            // stale entry, left behind when a cheaper route was found
            if node.closed || node.g + current.distance_to(goal) != f {
                continue;
            }
            node.closed = true;
            let g = node.g;

            if current == goal {
                let path = reconstruct(&nodes, goal);

                log::debug!("Found path from {start} to {goal}: {g} steps, {expansions} expansions");

                return path;
            }

            if self.limit.is_some_and(|limit| expansions >= limit) {
                log::debug!("Gave up on path from {start} to {goal} after {expansions} expansions");

                return Path::default();
            }
            expansions += 1;

            log::trace!("Expanding {current} with g = {g}, f = {f}");

            for neighbor in current.neighbors() {
                if !map.is_walkable(neighbor) {
                    continue;
                }

                let tentative = g + 1;

                match nodes.entry(neighbor) {
                    hash_map::Entry::Occupied(mut entry) => {
                        let node = entry.get_mut();

                        if node.closed || tentative >= node.g {
                            continue;
                        }

                        node.g = tentative;
                        node.parent = Some(current);
                        open.push(Reverse((tentative + neighbor.distance_to(goal), node.seq, neighbor)));
                    }
                    hash_map::Entry::Vacant(entry) => {
                        seq += 1;
                        entry.insert(Node {
                            g: tentative,
                            parent: Some(current),
                            seq,
                            closed: false,
                        });
                        open.push(Reverse((tentative + neighbor.distance_to(goal), seq, neighbor)));
                    }
                }
            }
        }

        log::debug!("No path from {start} to {goal} after {expansions} expansions");

        Path::default()
    }
}

fn reconstruct(nodes: &HashMap<CubeCoord, Node>, goal: CubeCoord) -> Path {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(parent) = nodes.get(&current).and_then(|node| node.parent) {
        path.push(parent);
        current = parent;
    }

    path.reverse();

    Path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_stops_open_ended_searches() {
        let finder = PathFinder::default().with_limit(500);
        let goal = CubeCoord::new(100, 0);

        // the goal is walled off, but the plane around it goes on forever
        let map = |coord: CubeCoord| coord.distance_to(goal) > 1;

        assert!(!finder.find(&map, CubeCoord::ZERO, goal).is_found());
    }

    #[test]
    fn ties_go_to_the_earliest_discovered() {
        let path = PathFinder::default().find(&|_: CubeCoord| true, CubeCoord::ZERO, CubeCoord::new(2, -1));

        // both east and north-east start an optimal walk; east is discovered first
        assert_eq!(path.cost(), Some(2));
        assert_eq!(path[1], CubeCoord::new(1, 0));
    }
}
