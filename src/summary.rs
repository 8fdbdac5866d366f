//! Summary statistics for the enumeration driver's CLI (§6, §10).
//!
//! Printed as plain text by default, or as JSON with `--json`, mirroring
//! `packing_cli`'s final-state `serde_json::to_string` output.

use std::time::Duration;

use serde::Serialize;

use crate::enumerator::EnumerationOutput;

#[derive(Serialize)]
pub struct Summary {
    pub quarters: usize,
    pub halves: usize,
    pub shapes: usize,
    pub elapsed_secs: f64,
}

impl Summary {
    pub fn new(output: &EnumerationOutput, elapsed: Duration) -> Summary {
        Summary {
            quarters: output.quarters.len(),
            halves: output.halves.len(),
            shapes: output.shapes.len(),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "quarters: {}", self.quarters)?;
        writeln!(f, "halves:   {}", self.halves)?;
        writeln!(f, "shapes:   {}", self.shapes)?;
        write!(f, "elapsed:  {:.3}s", self.elapsed_secs)
    }
}
