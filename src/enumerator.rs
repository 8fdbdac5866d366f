//! Main enumeration driver (C6).
//!
//! Two interleaved frontiers: the half frontier (every swap-combination of
//! already-known halves) and a generic queue of category-2 candidates. The
//! half frontier always gets priority; a shape discovered to be
//! half-combinable after being queued as category-2 is reclassified rather
//! than double-processed. See the design doc's "reclassification race" note
//! for why cancellation goes through queue membership rather than mutating
//! the queue itself.

use crate::config::Config;
use crate::physics;
use crate::sets::{self, HalfIndex, ShapeSet, WorkQueue};
use crate::shape::{Cell, Shape};
use crate::symmetry::{canonical, canonical_half, equivalent_halves, equivalent_shapes};
use crate::{halves, quarters};

/// How often to emit an `info!` progress line, counted by equivalence-class
/// size contributions (§5) — each `process`ed canonical shape counts for
/// `equivalent_shapes(s).len()`, not 1, since that's how many raw shapes it
/// represents.
const PROGRESS_INTERVAL: u64 = 10_000_000;

/// The raw product of a completed enumeration run, before C7 sorts and
/// persists it.
pub struct EnumerationOutput {
    pub halves: HalfIndex,
    pub shapes: ShapeSet,
    pub quarters: ShapeSet,
}

/// `true` if `shape` can be built by swapping two already-known halves.
///
/// When `before` is `Some(bound)`, only halves with index strictly less
/// than `bound` count — used by the half frontier to ask "could an
/// *earlier* pair of halves already account for this shape".
pub fn combinable(cfg: Config, halves: &HalfIndex, shape: Shape, before: Option<usize>) -> bool {
    let west = cfg.west_mask();
    for a in 0..cfg.half_parts() {
        let left = canonical_half(cfg, shape.rotate(cfg, a).mask(west));
        let right = canonical_half(cfg, shape.rotate(cfg, a + cfg.half_parts()).mask(west));

        let (Some(li), Some(ri)) = (halves.index_of(left), halves.index_of(right)) else {
            continue;
        };
        match before {
            Some(bound) if li < bound && ri < bound => return true,
            None => return true,
            _ => {}
        }
    }
    false
}

/// Every single-layer connected piece `stack` can be asked to drop: one Pin
/// at each part, every contiguous Shape arc shorter than a full ring at
/// every rotation, and the full ring. All pre-positioned at the top layer.
fn single_layer_shapes(cfg: Config) -> Vec<Shape> {
    let top = cfg.layers - 1;
    let mut out = Vec::new();

    for part in 0..cfg.parts {
        out.push(Shape::empty().set(cfg, top, part, Cell::Pin));
    }

    for len in 1..cfg.parts {
        for start in 0..cfg.parts {
            let mut piece = Shape::empty();
            for k in 0..len {
                let part = (start + k) % cfg.parts;
                piece = piece.set(cfg, top, part, Cell::Shape);
            }
            out.push(piece);
        }
    }

    let mut ring = Shape::empty();
    for part in 0..cfg.parts {
        ring = ring.set(cfg, top, part, Cell::Shape);
    }
    out.push(ring);

    out
}

/// Admit `t` into the generic frontier unless it's already accounted for by
/// two known halves.
fn enqueue(cfg: Config, halves: &HalfIndex, shapes: &mut ShapeSet, queue: &mut WorkQueue, t: Shape) {
    if combinable(cfg, halves, t, None) {
        return;
    }
    let canon = canonical(cfg, t);
    if shapes.insert(canon) {
        queue.push(canon);
    }
}

/// Grow `quarters`/`halves` from `s` and enqueue every descendant reachable
/// by one game operation.
fn process(
    cfg: Config,
    s: Shape,
    quarters: &mut ShapeSet,
    halves: &mut HalfIndex,
    shapes: &mut ShapeSet,
    queue: &mut WorkQueue,
    single_layer: &[Shape],
) {
    for a in 0..cfg.parts {
        quarters.insert(s.rotate(cfg, a).mask(cfg.part0_mask()));
    }

    for a in 0..cfg.parts {
        let cut_half = physics::cut(cfg, s.rotate(cfg, a));
        let h = canonical_half(cfg, cut_half);
        halves.insert(h);
    }

    for &piece in single_layer {
        enqueue(cfg, halves, shapes, queue, physics::stack(cfg, s, piece));
    }
    enqueue(cfg, halves, shapes, queue, physics::pin(cfg, s));
    enqueue(cfg, halves, shapes, queue, physics::crystalize(cfg, s));
}

/// Run the full two-frontier enumeration to completion.
pub fn run(cfg: Config) -> EnumerationOutput {
    log::debug!("quarter search starting");
    let mut quarters = quarters::search(cfg);
    log::debug!("quarter search done: {} quarters", quarters.len());

    let mut halves = halves::seed(cfg, &quarters);
    log::debug!("half pre-seed done: {} halves", halves.len());

    let mut shapes = sets::shape_set();
    let mut queue = WorkQueue::new();
    let single_layer = single_layer_shapes(cfg);

    let mut next_half = 0usize;
    let mut processed: u64 = 0;
    let mut last_progress: u64 = 0;

    while next_half < halves.len() || !queue.is_empty() {
        if next_half < halves.len() {
            let base = halves.get(next_half);
            let mut temp = sets::shape_set();

            for variant in equivalent_halves(cfg, base) {
                let east = variant.rotate(cfg, cfg.half_parts());

                for i in 0..=next_half {
                    let other = halves.get(i);
                    let candidate = east.union(other);
                    let s = canonical(cfg, candidate);

                    if !temp.insert(s) {
                        continue;
                    }
                    if combinable(cfg, &halves, s, Some(next_half)) {
                        continue;
                    }

                    if queue.contains(s) {
                        queue.cancel(s);
                        shapes.remove(&s);
                        process(cfg, s, &mut quarters, &mut halves, &mut shapes, &mut queue, &single_layer);
                        processed += equivalent_shapes(cfg, s).len() as u64;
                    } else if shapes.contains(&s) {
                        shapes.remove(&s);
                    } else {
                        process(cfg, s, &mut quarters, &mut halves, &mut shapes, &mut queue, &single_layer);
                        processed += equivalent_shapes(cfg, s).len() as u64;
                    }

                    if processed - last_progress >= PROGRESS_INTERVAL {
                        log::info!("{processed} canonical shapes processed");
                        last_progress = processed;
                    }
                }
            }

            log::trace!("half frontier step {next_half}/{}", halves.len());
            next_half += 1;
        } else if let Some(s) = queue.pop() {
            process(cfg, s, &mut quarters, &mut halves, &mut shapes, &mut queue, &single_layer);
            processed += equivalent_shapes(cfg, s).len() as u64;
            if processed - last_progress >= PROGRESS_INTERVAL {
                log::info!("{processed} canonical shapes processed");
                last_progress = processed;
            }
        }
    }

    EnumerationOutput {
        halves,
        shapes,
        quarters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_layer_shapes_has_the_expected_count() {
        let cfg = Config::new(4, 4).unwrap();
        let pieces = single_layer_shapes(cfg);
        // 4 pins + (3 arc lengths * 4 rotations) + 1 ring
        assert_eq!(pieces.len(), 4 + 3 * 4 + 1);
    }

    #[test]
    fn run_on_a_tiny_config_terminates_and_keeps_the_empty_shape() {
        let cfg = Config::new(2, 4).unwrap();
        let out = run(cfg);
        // The empty shape is always constructible (it's the seed); it's
        // category-1 (combinable from the empty half with itself) so it
        // never appears in `shapes`, but `halves` must contain it.
        assert!(out.halves.contains(Shape::empty()));
    }

    #[test]
    fn run_never_leaves_a_half_swap_combinable_shape_in_shapes() {
        let cfg = Config::new(2, 4).unwrap();
        let out = run(cfg);
        for &s in &out.shapes {
            assert!(!combinable(cfg, &out.halves, s, None));
        }
    }
}
