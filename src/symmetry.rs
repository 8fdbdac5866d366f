//! Dihedral symmetry normalization (C3).
//!
//! The group acting on a shape is the dihedral group of order `2P`:
//! rotations and rotate-then-flip. Canonical representatives are simply the
//! integer-minimum of an orbit, which is cheap because `Shape` is already
//! totally ordered by its packed value.

use smallvec::SmallVec;

use crate::config::Config;
use crate::shape::Shape;

/// Bounded by `2 * P <= 8` for every validated configuration.
pub type Orbit = SmallVec<[Shape; 8]>;

/// The full dihedral orbit of `shape`: every rotation and every
/// rotation-then-flip, sorted ascending and deduplicated.
pub fn equivalent_shapes(cfg: Config, shape: Shape) -> Orbit {
    let mut orbit: Orbit = SmallVec::new();
    for k in 0..cfg.parts {
        let rotated = shape.rotate(cfg, k);
        orbit.push(rotated);
        orbit.push(rotated.flip(cfg));
    }
    orbit.sort_unstable();
    orbit.dedup();
    orbit
}

/// The canonical (integer-minimum) representative of `shape`'s dihedral orbit.
pub fn canonical(cfg: Config, shape: Shape) -> Shape {
    equivalent_shapes(cfg, shape)[0]
}

/// The mirror pair of a west-half shape `h`: `{h, h.flip().rotate(P/2)}`,
/// collapsing to a single element when the half is self-mirror.
pub fn equivalent_halves(cfg: Config, half: Shape) -> Orbit {
    let mirrored = half.flip(cfg).rotate(cfg, cfg.half_parts());
    let mut orbit: Orbit = SmallVec::new();
    orbit.push(half);
    orbit.push(mirrored);
    orbit.sort_unstable();
    orbit.dedup();
    orbit
}

/// The canonical (integer-minimum) representative of `half`'s mirror pair.
pub fn canonical_half(cfg: Config, half: Shape) -> Shape {
    equivalent_halves(cfg, half)[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Cell;

    fn cfg4() -> Config {
        Config::new(4, 4).unwrap()
    }

    #[test]
    fn canonical_is_the_orbit_minimum() {
        let cfg = cfg4();
        let s = Shape::empty().set(cfg, 0, 2, Cell::Shape);
        let c = canonical(cfg, s);
        for variant in equivalent_shapes(cfg, s) {
            assert!(c <= variant);
        }
    }

    #[test]
    fn canonical_is_a_fixed_point() {
        let cfg = cfg4();
        let s = Shape::empty()
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 1, 1, Cell::Crystal);
        let c = canonical(cfg, s);
        assert_eq!(canonical(cfg, c), c);
    }

    #[test]
    fn self_mirror_half_collapses_to_one_element() {
        let cfg = cfg4();
        // Empty half is trivially self-mirror.
        let h = Shape::empty();
        assert_eq!(equivalent_halves(cfg, h).len(), 1);
    }

    #[test]
    fn mirror_pair_has_at_most_two_elements() {
        let cfg = cfg4();
        let h = Shape::empty().set(cfg, 0, 0, Cell::Shape);
        assert!(equivalent_halves(cfg, h).len() <= 2);
        assert!(equivalent_halves(cfg, h).contains(&h));
    }
}
