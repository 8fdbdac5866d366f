//! Conservative quarter searcher (C4).
//!
//! A restricted BFS over shapes confined to part 0 (a *quarter*). Every
//! quarter discoverable by *some* full-width construction is padded out to
//! a full shape with a "filler" in the other parts, run through one real
//! operator, then masked back down to part 0. Conservative: it can miss a
//! quarter a cleverer search would find, but it never invents one that no
//! construction reaches.
//!
//! Because a quarter only ever has bits set in part 0, its cell contents
//! pack into `2*layers` bits once the part-0 stride is squeezed out — small
//! enough that local dedup is a dense [`bitvec::vec::BitVec`] indexed by
//! that packed key, the same trick the reference implementation's
//! `PiecePlacer::seen` uses for its own bounded local search, rather than a
//! hash set.

use std::collections::VecDeque;

use bitvec::vec::BitVec;

use crate::config::Config;
use crate::physics;
use crate::sets::{self, ShapeSet};
use crate::shape::{Cell, Shape};

/// Pack a quarter's part-0 cells into a dense key of `2*layers` bits,
/// contiguous regardless of `parts` (unlike the shape's own packed value,
/// whose part-0 cells are strided `2*parts` bits apart).
fn quarter_key(cfg: Config, shape: Shape) -> usize {
    let mut key = 0usize;
    for layer in 0..cfg.layers {
        key |= (shape.get(cfg, layer, 0) as usize) << (2 * layer as usize);
    }
    key
}

/// Every part-0-only cell in layers `[0, up_to)` set to Shape, used to pad
/// a quarter into a full shape before running a real operator on it.
fn filler(cfg: Config, up_to: u8) -> Shape {
    let mut out = Shape::empty();
    for layer in 0..up_to {
        for part in 1..cfg.parts {
            out = out.set(cfg, layer, part, Cell::Shape);
        }
    }
    out
}

/// Successor quarters reachable from `q` in one conservative step.
fn successors(cfg: Config, q: Shape) -> Vec<Shape> {
    let mut out = Vec::new();
    let occupied = q.layers(cfg);

    for l in occupied..cfg.layers {
        out.push(q.set(cfg, l, 0, Cell::Shape));
    }
    if occupied < cfg.layers {
        out.push(q.set(cfg, occupied, 0, Cell::Pin));
    }

    let padded = q.union(filler(cfg, occupied));
    let part0 = cfg.part0_mask();

    out.push(physics::pin(cfg, padded).mask(part0));
    out.push(physics::crystalize(cfg, padded).mask(part0));

    for l in 0..occupied {
        let with_anchor = padded.set(cfg, l, cfg.parts - 1, Cell::Crystal);
        out.push(physics::cut(cfg, with_anchor).mask(part0));
    }

    out
}

/// Run the conservative quarter search to completion and return every
/// quarter it discovers.
pub fn search(cfg: Config) -> ShapeSet {
    let space = 1usize << (2 * cfg.layers as u32);
    let mut seen = BitVec::repeat(false, space);
    let mut quads = sets::shape_set();
    let mut queue = VecDeque::new();

    let empty = Shape::empty();
    seen.set(quarter_key(cfg, empty), true);
    quads.insert(empty);
    queue.push_back(empty);

    while let Some(q) = queue.pop_front() {
        for candidate in successors(cfg, q) {
            let key = quarter_key(cfg, candidate);
            if !seen[key] {
                seen.set(key, true);
                quads.insert(candidate);
                queue.push_back(candidate);
            }
        }
    }

    quads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_always_contains_the_empty_quarter() {
        let cfg = Config::new(4, 4).unwrap();
        let quads = search(cfg);
        assert!(quads.contains(&Shape::empty()));
    }

    #[test]
    fn search_discovers_a_single_standalone_shape_cell() {
        let cfg = Config::new(4, 4).unwrap();
        let quads = search(cfg);
        let single = Shape::empty().set(cfg, 0, 0, Cell::Shape);
        assert!(quads.contains(&single));
    }

    #[test]
    fn quarter_key_stays_within_the_dedup_bitvec_bound() {
        // A layer-1 cell's packed Shape value (2 << (2*parts)) is far larger
        // than 2^(2*layers); the dedup key must not be that raw value.
        let cfg = Config::new(4, 4).unwrap();
        let layer1 = Shape::empty().set(cfg, 1, 0, Cell::Shape);
        assert!(quarter_key(cfg, layer1) < (1usize << (2 * cfg.layers as u32)));
    }

    #[test]
    fn search_discovers_a_shape_cell_stacked_on_layer_one() {
        let cfg = Config::new(4, 4).unwrap();
        let quads = search(cfg);
        let stacked = Shape::empty()
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 1, 0, Cell::Shape);
        assert!(quads.contains(&stacked));
    }

    #[test]
    fn search_does_not_panic_for_five_layers() {
        let cfg = Config::new(5, 4).unwrap();
        let quads = search(cfg);
        assert!(quads.contains(&Shape::empty()));
    }

    #[test]
    fn every_discovered_quarter_is_confined_to_part_zero() {
        let cfg = Config::new(4, 4).unwrap();
        let quads = search(cfg);
        for q in quads {
            for layer in 0..cfg.layers {
                for part in 1..cfg.parts {
                    assert_eq!(q.get(cfg, layer, part), Cell::Empty);
                }
            }
        }
    }
}
