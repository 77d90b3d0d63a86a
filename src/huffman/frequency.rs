use crate::huffman::K_NUM_SYMBOLS;

/// Occurrence count of every byte value in an input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ByteFrequency {
    counts: [u64; K_NUM_SYMBOLS],
    distinct: usize,
}

impl Default for ByteFrequency {
    fn default() -> Self {
        Self { counts: [0; K_NUM_SYMBOLS], distinct: 0 }
    }
}

impl ByteFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(input: &[u8]) -> Self {
        let mut freqs = Self::new();
        for &byte in input {
            freqs.add(byte);
        }
        freqs
    }

    #[inline(always)]
    pub fn add(&mut self, byte: u8) {
        let slot = &mut self.counts[byte as usize];
        if *slot == 0 {
            self.distinct += 1;
        }
        *slot += 1;
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values seen.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The `(byte, count)` pairs with a non-zero count, by increasing byte value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(b, &c)| (b as u8, c))
    }
}

impl FromIterator<(u8, u64)> for ByteFrequency {
    /// Collects explicit counts; zero counts are skipped and repeated bytes accumulate.
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut freqs = Self::new();
        for (byte, count) in iter {
            if count == 0 {
                continue;
            }
            if freqs.counts[byte as usize] == 0 {
                freqs.distinct += 1;
            }
            freqs.counts[byte as usize] += count;
        }
        freqs
    }
}
