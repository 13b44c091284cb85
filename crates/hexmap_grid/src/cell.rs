use std::collections::BTreeMap;

use enum_map::{Enum, EnumMap};
use rand::{
    Rng,
    distributions::{Distribution, Standard},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The terrain of a cell.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Enum, EnumIter, Display,
)]
pub enum CellType {
    #[default]
    Grass,
    Desert,
    Water,
    Rock,
    Lava,
    Forest,
    Mountain,
}

impl CellType {
    /// The type after this one, wrapping around at the end of the catalogue.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_usize((self.into_usize() + 1) % Self::LENGTH)
    }

    /// Whether units can walk over this type, unless a [`PassabilityTable`] says otherwise.
    #[inline]
    #[must_use]
    pub const fn default_passable(self) -> bool {
        !matches!(self, CellType::Water | CellType::Lava | CellType::Mountain)
    }
}

/// Picks a type uniformly, for `rng.sample(Standard)`.
impl Distribution<CellType> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CellType {
        CellType::from_usize(rng.gen_range(0..CellType::LENGTH))
    }
}

/// Which cell types can be walked over.
///
/// Serialized as a map of the entries that differ from
/// [`CellType::default_passable`]; anything missing takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<CellType, bool>", into = "BTreeMap<CellType, bool>")]
pub struct PassabilityTable(EnumMap<CellType, bool>);

impl Default for PassabilityTable {
    fn default() -> Self {
        Self(EnumMap::from_fn(CellType::default_passable))
    }
}

impl PassabilityTable {
    #[inline]
    #[must_use]
    pub fn is_passable(&self, kind: CellType) -> bool {
        self.0[kind]
    }

    #[inline]
    pub fn set(&mut self, kind: CellType, passable: bool) {
        self.0[kind] = passable;
    }

    #[inline]
    #[must_use]
    pub fn with(mut self, kind: CellType, passable: bool) -> Self {
        self.set(kind, passable);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellType, bool)> + '_ {
        self.0.iter().map(|(kind, passable)| (kind, *passable))
    }
}

impl From<BTreeMap<CellType, bool>> for PassabilityTable {
    fn from(value: BTreeMap<CellType, bool>) -> Self {
        let mut this = Self::default();

        for (kind, passable) in value {
            this.set(kind, passable);
        }

        this
    }
}

impl From<PassabilityTable> for BTreeMap<CellType, bool> {
    fn from(value: PassabilityTable) -> Self {
        value.iter().filter(|(kind, passable)| kind.default_passable() != *passable).collect()
    }
}

/// What the grid stores for each present cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellState {
    pub kind: CellType,
    pub passable: bool,
}

impl Default for CellState {
    fn default() -> Self {
        Self::new(CellType::default())
    }
}

impl CellState {
    /// A cell of `kind` with its default passability.
    #[inline]
    #[must_use]
    pub const fn new(kind: CellType) -> Self {
        Self {
            kind,
            passable: kind.default_passable(),
        }
    }

    /// A cell of `kind` with passability looked up in `table`.
    #[inline]
    #[must_use]
    pub fn from_table(kind: CellType, table: &PassabilityTable) -> Self {
        Self {
            kind,
            passable: table.is_passable(kind),
        }
    }

    /// Overrides the passability that came with the type.
    #[inline]
    #[must_use]
    pub const fn with_passable(mut self, passable: bool) -> Self {
        self.passable = passable;
        self
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn next_visits_every_type() {
        let mut kind = CellType::Grass;
        let mut seen = Vec::new();

        for _ in 0..CellType::LENGTH {
            seen.push(kind);
            kind = kind.next();
        }

        assert_eq!(kind, CellType::Grass);
        assert_eq!(seen, CellType::iter().collect::<Vec<_>>());
    }

    #[test]
    fn table_serializes_only_overrides() {
        let table = PassabilityTable::default().with(CellType::Water, true).with(CellType::Rock, true);
        let map = BTreeMap::from(table.clone());

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&CellType::Water), Some(&true));
        assert_eq!(PassabilityTable::from(map), table);
    }
}
