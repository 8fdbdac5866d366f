//! Binary dump persistence (C7, §6).
//!
//! Fixed-width, native-endian, two arrays back to back:
//! `u32 n_halves`, `Shape[n_halves]`, `u32 n_shapes`, `Shape[n_shapes]`,
//! both sorted ascending. This is a local artifact, not a portable
//! archive: endianness and word size follow the producing host.
//!
//! Deliberately diverges from the reference implementation's
//! `board_list` module, which LEB128-delta-encodes its entries for
//! compactness — here the layout is part of the specified wire contract,
//! so fixed-width fields are correct even though they're less dense.

use std::io::{self, BufReader, BufWriter, Read, Write};

use crate::shape::Shape;

/// The two persisted sets, already sorted ascending by integer value.
pub struct Dump {
    pub halves: Vec<Shape>,
    pub shapes: Vec<Shape>,
}

fn write_shapes<W: Write>(w: &mut W, shapes: &[Shape]) -> io::Result<()> {
    w.write_all(&(shapes.len() as u32).to_ne_bytes())?;
    for shape in shapes {
        w.write_all(&shape.0.to_ne_bytes())?;
    }
    Ok(())
}

fn read_shapes<R: Read>(r: &mut R) -> io::Result<Vec<Shape>> {
    let mut count_bytes = [0u8; 4];
    r.read_exact(&mut count_bytes)?;
    let count = u32::from_ne_bytes(count_bytes) as usize;

    let mut out = Vec::with_capacity(count);
    let mut value_bytes = [0u8; 8];
    for _ in 0..count {
        r.read_exact(&mut value_bytes)?;
        out.push(Shape(u64::from_ne_bytes(value_bytes)));
    }
    Ok(out)
}

/// Write `dump` to `writer` in the format described above.
pub fn write<W: Write>(writer: W, dump: &Dump) -> io::Result<()> {
    let mut w = BufWriter::new(writer);
    write_shapes(&mut w, &dump.halves)?;
    write_shapes(&mut w, &dump.shapes)?;
    w.flush()
}

/// Read a dump previously produced by [`write`].
pub fn read<R: Read>(reader: R) -> io::Result<Dump> {
    let mut r = BufReader::new(reader);
    let halves = read_shapes(&mut r)?;
    let shapes = read_shapes(&mut r)?;
    Ok(Dump { halves, shapes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_an_in_memory_buffer() {
        let dump = Dump {
            halves: vec![Shape(0), Shape(5), Shape(200)],
            shapes: vec![Shape(1), Shape(3)],
        };

        let mut buf = Vec::new();
        write(&mut buf, &dump).unwrap();

        let loaded = read(&buf[..]).unwrap();
        assert_eq!(loaded.halves, dump.halves);
        assert_eq!(loaded.shapes, dump.shapes);
    }

    #[test]
    fn empty_sets_round_trip() {
        let dump = Dump {
            halves: vec![],
            shapes: vec![],
        };
        let mut buf = Vec::new();
        write(&mut buf, &dump).unwrap();
        let loaded = read(&buf[..]).unwrap();
        assert!(loaded.halves.is_empty());
        assert!(loaded.shapes.is_empty());
    }

    #[test]
    fn truncated_input_is_an_io_error() {
        let buf = [1u8, 0, 0, 0];
        assert!(read(&buf[..]).is_err());
    }
}
