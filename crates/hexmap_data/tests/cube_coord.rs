use std::collections::BTreeSet;

use hexmap_data::coord::{CoordError, CubeCoord, FractionalHex, HexDirection};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn set_of(coords: impl IntoIterator<Item = CubeCoord>) -> BTreeSet<CubeCoord> {
    coords.into_iter().collect()
}

fn random_coords(seed: u64, n: usize, extent: i32) -> Vec<CubeCoord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| CubeCoord::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent)))
        .collect()
}

#[test]
fn test_construction() {
    let c = CubeCoord::new(3, -5);
    assert_eq!(c.to_array(), [3, -5, 2]);

    assert_eq!(CubeCoord::try_new(3, -5, 2), Ok(c));
    assert_eq!(
        CubeCoord::try_new(1, 1, 1),
        Err(CoordError::InvalidCoordinate { q: 1, r: 1, s: 1 })
    );
    assert_eq!(CubeCoord::try_from([0, 0, 1]), Err(CoordError::InvalidCoordinate { q: 0, r: 0, s: 1 }));
}

#[test]
fn test_distance() {
    assert_eq!(CubeCoord::ZERO.distance_to(CubeCoord::new(4, 0)), 4);
    assert_eq!(CubeCoord::new(-2, 3).distance_to(CubeCoord::new(1, -1)), 4);

    let coords = random_coords(7, 40, 500);
    for &a in &coords {
        assert_eq!(a.distance_to(a), 0);

        for &b in &coords {
            assert_eq!(a.distance_to(b), b.distance_to(a));

            for &c in coords.iter().take(10) {
                assert!(a.distance_to(c) <= a.distance_to(b) + b.distance_to(c));
            }
        }
    }
}

#[test]
fn test_distance_far_from_origin() {
    let far = CubeCoord::new(1 << 30, 1 << 30);

    assert_eq!(far.s(), i32::MIN);
    assert_eq!(far.length(), 1 << 31);
    assert_eq!(far.distance_to(CubeCoord::ZERO), 1 << 31);
    assert_eq!(far.distance_to(far.neighbor(HexDirection::West)), 1);

    let a = CubeCoord::new(i32::MAX, -i32::MAX);
    assert_eq!(a.length(), i32::MAX as u32);
    assert_eq!(CubeCoord::new(-5, 2).length(), 5);
}

#[test]
fn test_neighbors() {
    #[track_caller]
    fn test(coord: CubeCoord) {
        let neighbors = coord.neighbors();

        assert_eq!(set_of(neighbors).len(), 6);

        for (i, direction) in HexDirection::ALL.into_iter().enumerate() {
            assert_eq!(neighbors[i], coord.neighbor(direction));
            assert_eq!(coord.distance_to(neighbors[i]), 1);
            assert_eq!(coord.neighbor(direction).neighbor(direction.opposite()), coord);
        }
    }

    test(CubeCoord::ZERO);
    for coord in random_coords(11, 50, 500) {
        test(coord);
    }

    assert_eq!(CubeCoord::ZERO.neighbors()[0], CubeCoord::new(1, 0));
    assert_eq!(CubeCoord::ZERO.neighbors()[5], CubeCoord::new(0, 1));
}

#[test]
fn test_direction_index() {
    for (i, direction) in HexDirection::ALL.into_iter().enumerate() {
        assert_eq!(direction.index(), i);
        assert_eq!(HexDirection::from_index(i), Some(direction));
        assert_eq!(direction.opposite().opposite(), direction);
        assert_eq!(direction.offset() + direction.opposite().offset(), CubeCoord::ZERO);
    }

    assert_eq!(HexDirection::from_index(6), None);
    assert_eq!(HexDirection::East.opposite(), HexDirection::West);
    assert_eq!(HexDirection::NorthEast.opposite(), HexDirection::SouthWest);
}

#[test]
fn test_range() {
    for center in [CubeCoord::ZERO, CubeCoord::new(17, -40)] {
        for radius in 0..8 {
            let range = center.range(radius).collect::<Vec<_>>();

            assert_eq!(range.len(), 3 * radius as usize * (radius as usize + 1) + 1);
            assert_eq!(range.len(), CubeCoord::range_count(radius));
            assert_eq!(set_of(range.iter().copied()).len(), range.len());
            assert!(range.iter().all(|c| c.distance_to(center) <= radius));
        }
    }

    assert_eq!(CubeCoord::new(5, 5).range(0).collect::<Vec<_>>(), [CubeCoord::new(5, 5)]);
}

#[test]
fn test_ring() {
    let center = CubeCoord::new(-3, 8);

    assert_eq!(center.ring(0), [center]);

    for radius in 1..6 {
        let ring = center.ring(radius);

        assert_eq!(ring.len(), 6 * radius as usize);
        assert_eq!(set_of(ring.iter().copied()).len(), ring.len());
        assert!(ring.iter().all(|c| c.distance_to(center) == radius));
    }
}

#[test]
fn test_line() {
    let a = CubeCoord::new(0, 0);
    let b = CubeCoord::new(3, 0);

    assert_eq!(a.line_to(b), [a, CubeCoord::new(1, 0), CubeCoord::new(2, 0), b]);
    assert_eq!(a.line_to(a), [a]);

    for (a, b) in random_coords(3, 20, 12).into_iter().zip(random_coords(4, 20, 12)) {
        let line = a.line_to(b);

        assert_eq!(line.len(), a.distance_to(b) as usize + 1);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
        assert!(line.windows(2).all(|w| w[0].distance_to(w[1]) == 1));
    }
}

#[test]
fn test_round() {
    #[track_caller]
    fn test(q: f32, r: f32, expected: CubeCoord) {
        let rounded = FractionalHex::new(q, r).round();

        assert_eq!(rounded.q() + rounded.r() + rounded.s(), 0);
        assert_eq!(rounded, expected);
    }

    test(0.0, 0.0, CubeCoord::ZERO);
    test(0.4, 0.4, CubeCoord::new(0, 1));
    test(0.3, -0.2, CubeCoord::ZERO);
    test(2.9, -1.1, CubeCoord::new(3, -1));
    test(-0.6, 0.6, CubeCoord::new(-1, 1));

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10_000 {
        let q = rng.gen_range(-100.0..100.0);
        let r = rng.gen_range(-100.0..100.0);
        let rounded = FractionalHex::new(q, r).round();

        assert_eq!(rounded.q() + rounded.r() + rounded.s(), 0);
        // fixing one axis moves the result at most one step from per-axis rounding
        assert!(rounded.distance_to(CubeCoord::new(q.round() as i32, r.round() as i32)) <= 1);
    }
}

#[test]
fn test_display() {
    let c = CubeCoord::new(1, -3);

    assert_eq!(c.to_string(), "(1, -3, 2)");
    assert_eq!(c.to_minimal_string(), "1,-3,2");
}

#[test]
fn test_cube_coord_serde() {
    let c = CubeCoord::new(123, -456);

    let serialized = ron::to_string(&c).unwrap();
    let deserialized: CubeCoord = ron::from_str(&serialized).unwrap();

    assert_eq!(c, deserialized);
    assert!(ron::from_str::<CubeCoord>("(1, 2, 3)").is_err());
}
