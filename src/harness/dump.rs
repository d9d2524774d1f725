//! Human-readable pixel grids for verbose output.

use std::io::{self, Write};

use crate::foundation::core::Depth;

/// Print `rows` rows of `words_per_row` words as space-separated pixels, one line per row.
///
/// Every pixel a word holds is printed, padding included. Values are decimal below 4 bpp and
/// zero-padded hex from 4 bpp up.
pub fn dump_buffer<W: Write + ?Sized>(
    out: &mut W,
    words: &[u32],
    words_per_row: usize,
    rows: usize,
    depth: Depth,
    msb: bool,
) -> io::Result<()> {
    let bits = depth.bits();
    let mask = depth.pixel_mask();
    let shift = if msb { 32 - bits } else { 0 };
    let hex_digits = (bits / 4) as usize;

    for row in words.chunks(words_per_row.max(1)).take(rows) {
        let mut sep = "";
        for &word in row {
            let mut word = word;
            for _ in 0..depth.pixels_per_word() {
                let pixel = (word >> shift) & mask;
                if hex_digits == 0 {
                    write!(out, "{sep}{pixel}")?;
                } else {
                    write!(out, "{sep}{pixel:0hex_digits$X}")?;
                }
                sep = " ";
                word = match (msb, bits) {
                    (_, 32) => 0,
                    (true, _) => word << bits,
                    (false, _) => word >> bits,
                };
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/harness/dump.rs"]
mod tests;
