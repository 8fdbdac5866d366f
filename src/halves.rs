//! Half pre-seeder (C5).
//!
//! Bootstraps the `halves` index before the main driver starts, from the
//! quarters the conservative searcher (C4) already found. Only sound when
//! `P == 4`, since that's the only width where two quarters exactly fill a
//! west half; for any other part count this degrades to seeding just the
//! empty half, per the open question resolved in the design notes.

use crate::config::Config;
use crate::physics::collapse;
use crate::sets::{HalfIndex, ShapeSet};
use crate::symmetry::canonical_half;
use crate::shape::Shape;

/// Build the initial `halves` index.
pub fn seed(cfg: Config, quarters: &ShapeSet) -> HalfIndex {
    let mut halves = HalfIndex::new();

    if cfg.parts != 4 {
        halves.insert(Shape::empty());
        return halves;
    }

    for &q0 in quarters {
        for &q1 in quarters {
            let combined = q0.union(q1.rotate(cfg, 1));
            let settled = collapse(cfg, combined);
            let canonical = canonical_half(cfg, settled);
            halves.insert(canonical);
        }
    }

    halves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quarters;

    #[test]
    fn p4_seeder_always_includes_the_empty_half() {
        let cfg = Config::new(4, 4).unwrap();
        let quads = quarters::search(cfg);
        let halves = seed(cfg, &quads);
        assert!(halves.contains(Shape::empty()));
    }

    #[test]
    fn non_p4_seeder_yields_only_the_empty_half() {
        // P=4 is the only validated width with a real pre-seeder; this
        // exercises the degrade-to-empty-half path directly since this
        // repository doesn't validate a non-4 production config.
        let cfg = Config::new(3, 3).unwrap();
        let quads = quarters::search(cfg);
        let halves = seed(cfg, &quads);
        assert_eq!(halves.len(), 1);
        assert!(halves.contains(Shape::empty()));
    }
}
