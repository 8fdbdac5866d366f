//! Textual shape representation (§6), used by the lookup tool's CLI.
//!
//! Short form: per-layer strings joined by `:`, one character per cell
//! (`-` Empty, `P` Pin, `c` Crystal, anything else Shape). Long form: the
//! same layout with two characters per cell, the second being a color that
//! this engine ignores entirely (color has no bearing on creatability).

use std::fmt;

use crate::config::Config;
use crate::shape::{Cell, Shape};

/// A textual shape string that doesn't match either the short or long form
/// for the given configuration.
#[derive(Debug)]
pub struct ParseShapeError {
    pub input: String,
}

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid shape string: {:?}", self.input)
    }
}

impl std::error::Error for ParseShapeError {}

fn char_to_cell(c: char) -> Cell {
    match c {
        '-' => Cell::Empty,
        'P' => Cell::Pin,
        'c' | 'C' => Cell::Crystal,
        _ => Cell::Shape,
    }
}

fn cell_to_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '-',
        Cell::Pin => 'P',
        Cell::Crystal => 'c',
        Cell::Shape => 'S',
    }
}

/// Parse either the short or long textual form into a [`Shape`].
pub fn parse(cfg: Config, text: &str) -> Result<Shape, ParseShapeError> {
    let layers: Vec<&str> = text.split(':').collect();
    if layers.len() != cfg.layers as usize {
        return Err(ParseShapeError {
            input: text.to_owned(),
        });
    }

    let short_len = cfg.parts as usize;
    let long_len = cfg.parts as usize * 2;

    let mut shape = Shape::empty();
    for (layer_idx, layer_str) in layers.iter().enumerate() {
        let chars: Vec<char> = layer_str.chars().collect();
        let layer = layer_idx as u8;

        if chars.len() == short_len {
            for (part, &c) in chars.iter().enumerate() {
                let cell = char_to_cell(c);
                if !cell.is_empty() {
                    shape = shape.set(cfg, layer, part as u8, cell);
                }
            }
        } else if chars.len() == long_len {
            for part in 0..cfg.parts as usize {
                let c = chars[part * 2];
                let cell = char_to_cell(c);
                if !cell.is_empty() {
                    shape = shape.set(cfg, layer, part as u8, cell);
                }
            }
        } else {
            return Err(ParseShapeError {
                input: text.to_owned(),
            });
        }
    }

    Ok(shape)
}

/// Format a shape in short form (one character per cell).
pub fn format_short(cfg: Config, shape: Shape) -> String {
    let mut out = String::new();
    for layer in 0..cfg.layers {
        if layer > 0 {
            out.push(':');
        }
        for part in 0..cfg.parts {
            out.push(cell_to_char(shape.get(cfg, layer, part)));
        }
    }
    out
}
