/// Occurrence counts for every byte value present in an input.
///
/// Symbols are kept in order of first appearance, which is the order the
/// tree builder uses to break ties between equal weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: [usize; 256],
    order: Vec<u8>,
}

impl Frequencies {
    /// Count every byte of `bytes` in a single pass.
    pub fn count(bytes: &[u8]) -> Self {
        bytes.iter().copied().fold(
            Frequencies {
                counts: [0; 256],
                order: Vec::new(),
            },
            |mut acc, byte| {
                let slot = &mut acc.counts[byte as usize];
                if *slot == 0 {
                    acc.order.push(byte);
                }
                *slot += 1;
                acc
            },
        )
    }

    /// Count for `byte`, or `None` if it never occurs.
    pub fn get(&self, byte: u8) -> Option<usize> {
        match self.counts[byte as usize] {
            0 => None,
            n => Some(n),
        }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts, i.e. the input length.
    pub fn total(&self) -> usize {
        self.order.iter().map(|&b| self.counts[b as usize]).sum()
    }

    /// `(symbol, count)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.order.iter().map(|&b| (b, self.counts[b as usize]))
    }
}

impl From<&[u8]> for Frequencies {
    fn from(bytes: &[u8]) -> Self {
        Frequencies::count(bytes)
    }
}
