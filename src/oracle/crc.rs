//! Reflected CRC-32 (polynomial `0xEDB88320`, initial and final XOR `0xFFFFFFFF`).

const POLY: u32 = 0xEDB8_8320;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { POLY ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static TABLE: [u32; 256] = build_table();

/// Incremental CRC-32 that can be resumed from any earlier result.
#[derive(Clone, Copy, Debug)]
pub struct Crc32(u32);

impl Crc32 {
    /// Resume from a previous finished CRC (`0` for a fresh one).
    pub fn resume(crc: u32) -> Self {
        Self(crc ^ 0xFFFF_FFFF)
    }

    /// Feed bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut c = self.0;
        for &b in bytes {
            c = (c >> 8) ^ TABLE[((c ^ u32::from(b)) & 0xFF) as usize];
        }
        self.0 = c;
    }

    /// Feed 32-bit words in little-endian byte order.
    pub fn update_words(&mut self, words: &[u32]) {
        for w in words {
            self.update(&w.to_le_bytes());
        }
    }

    /// Finished value.
    pub fn finish(self) -> u32 {
        self.0 ^ 0xFFFF_FFFF
    }
}

/// CRC-32 of `bytes`, continuing from `crc`.
pub fn crc32(crc: u32, bytes: &[u8]) -> u32 {
    let mut h = Crc32::resume(crc);
    h.update(bytes);
    h.finish()
}

/// CRC-32 over the first `byte_len` bytes of a word buffer, viewed as little-endian bytes.
///
/// Words (and bytes) past `byte_len` never influence the result.
pub fn region_digest(words: &[u32], byte_len: usize) -> u32 {
    let whole = (byte_len / 4).min(words.len());
    let mut h = Crc32::resume(0);
    h.update_words(&words[..whole]);
    let tail = byte_len - whole * 4;
    if tail > 0
        && let Some(w) = words.get(whole)
    {
        h.update(&w.to_le_bytes()[..tail]);
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/crc.rs"]
mod tests;
