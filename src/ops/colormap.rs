//! Colour-map configuration and the lookup tables colour-mapped operations read (and some
//! rules write).

use std::ops::{Deref, DerefMut};

use crate::foundation::core::Depth;
use crate::random::sequencer::Sequencer;

/// Entries in each indexed colour-map table (15-bit index space).
pub const LOOKUP_ENTRIES: usize = 32768;

/// Direct channel truncation: each of the four channels is masked out of the source pixel and
/// shifted (left for positive shifts, right for negative) into place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FixedPart {
    /// Short label, `"<src bits per channel><dst bits per channel>"`.
    pub label: &'static str,
    /// Per-channel source masks.
    pub masks: [u32; 4],
    /// Per-channel shifts.
    pub shifts: [i32; 4],
}

impl FixedPart {
    /// Map one source pixel.
    pub fn apply(&self, pixel: u32) -> u32 {
        self.masks
            .iter()
            .zip(self.shifts)
            .fold(0, |acc, (&mask, shift)| {
                let v = pixel & mask;
                acc | if shift >= 0 { v << shift } else { v >> -shift }
            })
    }
}

/// 5-bit channels down to 3 bits.
pub static MAP_5_3: FixedPart = FixedPart {
    label: "53",
    masks: [0x7000, 0x0380, 0x001C, 0x0000],
    shifts: [-6, -4, -2, 0],
};
/// 5-bit channels down to 4 bits.
pub static MAP_5_4: FixedPart = FixedPart {
    label: "54",
    masks: [0x7800, 0x03C0, 0x001E, 0x0000],
    shifts: [-3, -2, -1, 0],
};
/// 5-bit channels up to 8 bits (16 bpp to 32 bpp).
pub static MAP_5_8: FixedPart = FixedPart {
    label: "58",
    masks: [0x7C00, 0x03E0, 0x001F, 0x0000],
    shifts: [9, 6, 3, 0],
};
/// 8-bit channels down to 3 bits.
pub static MAP_8_3: FixedPart = FixedPart {
    label: "83",
    masks: [0xE00000, 0x00E000, 0x0000E0, 0x000000],
    shifts: [-15, -10, -5, 0],
};
/// 8-bit channels down to 4 bits.
pub static MAP_8_4: FixedPart = FixedPart {
    label: "84",
    masks: [0xF00000, 0x00F000, 0x0000F0, 0x000000],
    shifts: [-12, -8, -4, 0],
};
/// 8-bit channels down to 5 bits (32 bpp to 16 bpp).
pub static MAP_8_5: FixedPart = FixedPart {
    label: "85",
    masks: [0xF80000, 0x00F800, 0x0000F8, 0x000000],
    shifts: [-9, -6, -3, 0],
};

/// Indexed lookup: the (possibly fixed-mapped) pixel is masked and used as a table index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct IndexedPart {
    /// Index mask (`cmMask`).
    pub mask: u32,
    /// Depth whose table is consulted; always the destination depth.
    pub table: Depth,
}

/// Colour-map configuration of one operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ColorMap {
    /// Channel truncation tables, if any.
    pub fixed: Option<&'static FixedPart>,
    /// Table lookup, if any.
    pub indexed: Option<IndexedPart>,
}

impl ColorMap {
    /// No remapping at all.
    pub const NONE: ColorMap = ColorMap {
        fixed: None,
        indexed: None,
    };

    /// Either part is active.
    pub fn is_present(&self) -> bool {
        self.fixed.is_some() || self.indexed.is_some()
    }

    /// `cmMask`, zero when there is no indexed part.
    pub fn index_mask(&self) -> u32 {
        self.indexed.map_or(0, |i| i.mask)
    }

    /// Map a source pixel; `table` must be the indexed table when an indexed part is set.
    pub fn map(&self, pixel: u32, table: Option<&[u32]>) -> u32 {
        let v = self.fixed.map_or(pixel, |f| f.apply(pixel));
        match (self.indexed, table) {
            (Some(ix), Some(table)) => table[(v & ix.mask) as usize % table.len()],
            _ => v,
        }
    }
}

/// One random lookup table per destination depth, plus the scratch space used to snapshot a
/// table around an engine call.
#[derive(Clone, Debug)]
pub struct LookupTables {
    tables: Vec<Vec<u32>>,
    backup: Vec<u32>,
}

impl LookupTables {
    /// All-zero tables.
    pub fn zeroed() -> Self {
        Self {
            tables: vec![vec![0; LOOKUP_ENTRIES]; Depth::ALL.len()],
            backup: vec![0; LOOKUP_ENTRIES],
        }
    }

    /// Random tables: for each depth in increasing order, one draw per entry (two for 32 bpp,
    /// the second shifted up 16 bits), masked to the depth.
    pub fn generate(seq: &mut Sequencer) -> Self {
        let mut out = Self::zeroed();
        for (depth, table) in Depth::ALL.iter().zip(out.tables.iter_mut()) {
            for slot in table.iter_mut() {
                let mut v = seq.next();
                if *depth == Depth::D32 {
                    v ^= seq.next() << 16;
                }
                *slot = v & depth.pixel_mask();
            }
        }
        out
    }

    /// Read-only view of the table for `depth`.
    pub fn table(&self, depth: Depth) -> &[u32] {
        &self.tables[depth.log2() as usize]
    }

    /// Borrow the table for `depth`; its contents are restored when the guard drops.
    pub fn scoped(&mut self, depth: Depth) -> ScopedTable<'_> {
        let table = &mut self.tables[depth.log2() as usize];
        self.backup.copy_from_slice(table);
        ScopedTable {
            table,
            backup: &self.backup,
        }
    }
}

/// Mutable access to one lookup table that undoes every write on drop.
///
/// Some rules accumulate into the table; without the restore, iteration `i` would leak into
/// iteration `i + 1` and single iterations could not be replayed.
pub struct ScopedTable<'a> {
    table: &'a mut [u32],
    backup: &'a [u32],
}

impl Deref for ScopedTable<'_> {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        self.table
    }
}

impl DerefMut for ScopedTable<'_> {
    fn deref_mut(&mut self) -> &mut [u32] {
        self.table
    }
}

impl Drop for ScopedTable<'_> {
    fn drop(&mut self) {
        self.table.copy_from_slice(self.backup);
    }
}

/// Gamma and ungamma tables passed to component-alpha operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GammaTables {
    /// Forward table.
    pub gamma: [u8; 256],
    /// Inverse table.
    pub ungamma: [u8; 256],
}

impl GammaTables {
    /// Draw both tables, interleaved entry by entry, keeping the low byte of each draw.
    pub fn generate(seq: &mut Sequencer) -> Self {
        let mut out = Self {
            gamma: [0; 256],
            ungamma: [0; 256],
        };
        for i in 0..256 {
            out.gamma[i] = seq.next() as u8;
            out.ungamma[i] = seq.next() as u8;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/colormap.rs"]
mod tests;
