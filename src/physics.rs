//! Physics operators (C2): support, gravity, stacking, cutting, pin-pushing,
//! crystallizing.
//!
//! Every operator here is a pure function of `(Config, Shape[, extra
//! arguments])` returning a new [`Shape`] (or, for [`supported_mask`], a
//! bitmask in the same cell-aligned convention as [`Shape::find`]). None of
//! them hold state between calls, matching the "no global singletons"
//! discipline the reference implementation uses for its board-physics code
//! ([`Piece::place`], [`Piece::cw`], ...).

use crate::config::Config;
use crate::shape::{Cell, Shape};

/// Every cell considered supported, encoded the same way [`Shape::find`]
/// encodes a match: `0b11` at a supported cell, `0b00` otherwise.
///
/// See the strict-support rules in the design doc (§4.2). Deliberately does
/// **not** treat mutual-support cycles as supported: propagation only
/// starts from layer 0 and walks outward/upward/downward along the four
/// rules, so two cells that support only each other, with no path back to
/// the ground, never get marked.
pub fn supported_mask(cfg: Config, shape: Shape) -> u64 {
    let parts = cfg.parts;
    let layers = cfg.layers;
    let idx = |l: u8, p: u8| -> usize { l as usize * parts as usize + p as usize };

    let mut supported = vec![false; layers as usize * parts as usize];
    let mut stack = Vec::new();

    for part in 0..parts {
        if !shape.get(cfg, 0, part).is_empty() {
            supported[idx(0, part)] = true;
            stack.push((0u8, part));
        }
    }

    while let Some((l, p)) = stack.pop() {
        let cell = shape.get(cfg, l, p);

        // Rule 2: directly above a supported cell, if non-empty.
        if l + 1 < layers {
            let above = shape.get(cfg, l + 1, p);
            if !above.is_empty() && !supported[idx(l + 1, p)] {
                supported[idx(l + 1, p)] = true;
                stack.push((l + 1, p));
            }
        }

        // Rule 3: Shape/Crystal cells support horizontally-adjacent Shape/Crystal cells.
        if matches!(cell, Cell::Shape | Cell::Crystal) {
            for neighbor_part in [(p + parts - 1) % parts, (p + 1) % parts] {
                let neighbor = shape.get(cfg, l, neighbor_part);
                if matches!(neighbor, Cell::Shape | Cell::Crystal) && !supported[idx(l, neighbor_part)]
                {
                    supported[idx(l, neighbor_part)] = true;
                    stack.push((l, neighbor_part));
                }
            }
        }

        // Rule 4: a supported Crystal supports a Crystal directly below it.
        if cell == Cell::Crystal && l > 0 {
            let below = shape.get(cfg, l - 1, p);
            if below == Cell::Crystal && !supported[idx(l - 1, p)] {
                supported[idx(l - 1, p)] = true;
                stack.push((l - 1, p));
            }
        }
    }

    let mut mask = 0u64;
    for l in 0..layers {
        for p in 0..parts {
            if supported[idx(l, p)] {
                mask |= 0b11 << (2 * (l as u32 * parts as u32 + p as u32));
            }
        }
    }
    mask
}

/// Convert every Crystal cell touching `seed` — and every Crystal 6-adjacent
/// (±part, ±layer) to an already-broken Crystal — to [`Cell::Empty`].
///
/// `seed` uses the same cell-aligned bitmask convention as [`Shape::find`]:
/// a cell seeds breakage if its 2-bit field in `seed` is nonzero and the
/// shape holds a Crystal there.
pub fn break_crystals(cfg: Config, shape: Shape, seed: u64) -> Shape {
    let parts = cfg.parts;
    let layers = cfg.layers;
    let idx = |l: u8, p: u8| -> usize { l as usize * parts as usize + p as usize };

    let mut broken = vec![false; layers as usize * parts as usize];
    let mut stack = Vec::new();

    for l in 0..layers {
        for p in 0..parts {
            let shift = 2 * (l as u32 * parts as u32 + p as u32);
            let seeded = (seed >> shift) & 0b11 != 0;
            if seeded && shape.get(cfg, l, p) == Cell::Crystal {
                broken[idx(l, p)] = true;
                stack.push((l, p));
            }
        }
    }

    while let Some((l, p)) = stack.pop() {
        let mut neighbors: smallvec::SmallVec<[(u8, u8); 4]> = smallvec::SmallVec::new();
        neighbors.push((l, (p + parts - 1) % parts));
        neighbors.push((l, (p + 1) % parts));
        if l > 0 {
            neighbors.push((l - 1, p));
        }
        if l + 1 < layers {
            neighbors.push((l + 1, p));
        }

        for (nl, np) in neighbors {
            if !broken[idx(nl, np)] && shape.get(cfg, nl, np) == Cell::Crystal {
                broken[idx(nl, np)] = true;
                stack.push((nl, np));
            }
        }
    }

    let mut result = shape;
    for l in 0..layers {
        for p in 0..parts {
            if broken[idx(l, p)] {
                result = result.set(cfg, l, p, Cell::Empty);
            }
        }
    }
    result
}

/// Lowest 2·parts bits: the cell-aligned mask of layer 0.
fn layer0_mask(cfg: Config) -> u64 {
    (1u64 << (2 * cfg.parts as u32)) - 1
}

/// Drop an incoming single-layer connected `piece` (already positioned at
/// the topmost layer) onto `base` until it rests on the ground or on
/// existing material; discard it unchanged if it doesn't fit at all.
#[must_use]
pub fn stack(cfg: Config, base: Shape, piece: Shape) -> Shape {
    let full = cfg.full_mask();
    let empty_mask = base.find(cfg, Cell::Empty);
    let non_empty = full & !empty_mask;

    if piece.0 & non_empty != 0 {
        return base;
    }

    let mut piece = piece;
    let bottom = layer0_mask(cfg);
    let layer_width = 2 * cfg.parts as u32;

    loop {
        if piece.0 & bottom != 0 {
            break;
        }
        let shifted = Shape(piece.0 >> layer_width);
        if shifted.0 & base.0 != 0 {
            break;
        }
        piece = shifted;
    }

    base | piece
}

/// Gravity: let every unsupported cell fall until it is supported or rests
/// on the ground, breaking unsupported Crystal cells as they fall.
#[must_use]
pub fn collapse(cfg: Config, shape: Shape) -> Shape {
    let supported = supported_mask(cfg, shape);
    let full = cfg.full_mask();

    let mut acc = Shape(shape.0 & supported);
    let mut falling = Shape(shape.0 & !supported & full);

    // Unsupported crystals shatter rather than fall.
    for l in 0..cfg.layers {
        for p in 0..cfg.parts {
            if falling.get(cfg, l, p) == Cell::Crystal {
                falling = falling.set(cfg, l, p, Cell::Empty);
            }
        }
    }

    let parts = cfg.parts;
    let layers = cfg.layers;
    let top = layers - 1;
    let mut processed = vec![false; layers as usize * parts as usize];
    let idx = |l: u8, p: u8| -> usize { l as usize * parts as usize + p as usize };

    for l in 0..layers {
        for p in 0..parts {
            if processed[idx(l, p)] {
                continue;
            }
            let cell = falling.get(cfg, l, p);
            match cell {
                Cell::Empty => continue,
                Cell::Pin => {
                    processed[idx(l, p)] = true;
                    let piece = Shape::empty().set(cfg, top, p, Cell::Pin);
                    acc = stack(cfg, acc, piece);
                }
                Cell::Shape => {
                    let mut run: Vec<u8> = vec![p];
                    processed[idx(l, p)] = true;

                    if p == 0 {
                        let mut q = parts - 1;
                        while q > 0
                            && !processed[idx(l, q)]
                            && falling.get(cfg, l, q) == Cell::Shape
                        {
                            run.push(q);
                            processed[idx(l, q)] = true;
                            q -= 1;
                        }
                    }

                    let mut q = p + 1;
                    while q < parts && !processed[idx(l, q)] && falling.get(cfg, l, q) == Cell::Shape
                    {
                        run.push(q);
                        processed[idx(l, q)] = true;
                        q += 1;
                    }

                    let mut piece = Shape::empty();
                    for &part in &run {
                        piece = piece.set(cfg, top, part, Cell::Shape);
                    }
                    acc = stack(cfg, acc, piece);
                }
                Cell::Crystal => unreachable!("falling crystals were shattered above"),
            }
        }
    }

    acc
}

/// Break crystals in the east half, discard the east half, and let the
/// remaining west half settle under gravity.
#[must_use]
pub fn cut(cfg: Config, shape: Shape) -> Shape {
    let west = cfg.west_mask();
    let east = cfg.full_mask() & !west;

    let seed = shape.find(cfg, Cell::Crystal) & east;
    let broken = break_crystals(cfg, shape, seed);
    let west_only = broken.mask(west);

    collapse(cfg, west_only)
}

/// Push a new row of pins under the shape, shifting everything else up one
/// layer and breaking any crystals that would be pushed off the top.
#[must_use]
pub fn pin(cfg: Config, shape: Shape) -> Shape {
    let mut pins = Shape::empty();
    for p in 0..cfg.parts {
        if !shape.get(cfg, 0, p).is_empty() {
            pins = pins.set(cfg, 0, p, Cell::Pin);
        }
    }

    let top = cfg.layers - 1;
    let top_layer_mask = {
        let mut m = 0u64;
        for p in 0..cfg.parts {
            m |= 0b11 << (2 * (top as u32 * cfg.parts as u32 + p as u32));
        }
        m
    };
    let seed = shape.find(cfg, Cell::Crystal) & top_layer_mask;
    let broken = break_crystals(cfg, shape, seed);

    let layer_width = 2 * cfg.parts as u32;
    let shifted = Shape((broken.0 << layer_width) & cfg.full_mask());

    collapse(cfg, shifted | pins)
}

/// Turn every Empty or Pin cell within the occupied layers into Crystal.
/// Shape and Crystal cells are unaffected; no gravity is applied.
#[must_use]
pub fn crystalize(cfg: Config, shape: Shape) -> Shape {
    let occupied = shape.layers(cfg);
    let mut result = shape;
    for l in 0..occupied {
        for p in 0..cfg.parts {
            if matches!(result.get(cfg, l, p), Cell::Empty | Cell::Pin) {
                result = result.set(cfg, l, p, Cell::Crystal);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg4() -> Config {
        Config::new(4, 4).unwrap()
    }

    #[test]
    fn ground_cells_are_supported() {
        let cfg = cfg4();
        let s = Shape::empty().set(cfg, 0, 0, Cell::Shape);
        let mask = supported_mask(cfg, s);
        assert_eq!(mask & 0b11, 0b11);
    }

    #[test]
    fn isolated_cell_falls_to_ground() {
        let cfg = cfg4();
        let s = Shape::empty().set(cfg, 3, 0, Cell::Shape);
        let collapsed = collapse(cfg, s);
        assert_eq!(collapsed, Shape::empty().set(cfg, 0, 0, Cell::Shape));
    }

    #[test]
    fn collapse_is_idempotent() {
        let cfg = cfg4();
        let s = Shape::empty()
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 1, 0, Cell::Shape)
            .set(cfg, 3, 1, Cell::Shape);
        let once = collapse(cfg, s);
        let twice = collapse(cfg, once);
        assert_eq!(once, twice);
    }

    #[test]
    fn wraparound_run_falls_as_one_piece() {
        let cfg = cfg4();
        // Three connected cells spanning the part-0 wrap, floating above the ground.
        let s = Shape::empty()
            .set(cfg, 2, 3, Cell::Shape)
            .set(cfg, 2, 0, Cell::Shape)
            .set(cfg, 2, 1, Cell::Shape);
        let collapsed = collapse(cfg, s);
        let expected = Shape::empty()
            .set(cfg, 0, 3, Cell::Shape)
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 0, 1, Cell::Shape);
        assert_eq!(collapsed, expected);
    }

    #[test]
    fn unsupported_crystal_shatters_instead_of_falling() {
        let cfg = cfg4();
        let s = Shape::empty().set(cfg, 2, 0, Cell::Crystal);
        let collapsed = collapse(cfg, s);
        assert_eq!(collapsed, Shape::empty());
    }

    #[test]
    fn cut_keeps_only_the_west_half() {
        let cfg = cfg4();
        let s = Shape::empty()
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 0, 1, Cell::Shape)
            .set(cfg, 0, 2, Cell::Shape)
            .set(cfg, 0, 3, Cell::Shape);
        let cut_shape = cut(cfg, s);
        let expected = Shape::empty()
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 0, 1, Cell::Shape);
        assert_eq!(cut_shape, expected);
    }

    #[test]
    fn pin_pushes_a_new_ground_row_and_shifts_up() {
        let cfg = cfg4();
        let s = Shape::empty().set(cfg, 0, 0, Cell::Shape);
        let pinned = pin(cfg, s);
        assert_eq!(pinned.get(cfg, 0, 0), Cell::Pin);
        assert_eq!(pinned.get(cfg, 1, 0), Cell::Shape);
    }

    #[test]
    fn crystalize_fills_empty_and_pin_below_the_top() {
        let cfg = cfg4();
        let s = Shape::empty()
            .set(cfg, 0, 0, Cell::Shape)
            .set(cfg, 1, 1, Cell::Pin);
        let crystallized = crystalize(cfg, s);
        assert_eq!(crystallized.get(cfg, 0, 1), Cell::Crystal);
        assert_eq!(crystallized.get(cfg, 1, 1), Cell::Crystal);
        assert_eq!(crystallized.get(cfg, 0, 0), Cell::Shape);
        // Above the occupied height, nothing is touched.
        assert_eq!(crystallized.get(cfg, 2, 0), Cell::Empty);
    }
}
