use std::collections::BTreeMap;
use std::fmt;

/// Longest code a [`Code`] can hold.
///
/// A tree deep enough to exceed this would need symbol counts far beyond
/// what fits in memory, since depth grows with the log of the total weight.
pub const MAX_CODE_LEN: usize = 128;

/// A root-to-leaf path, most significant bit first. `0` = left, `1` = right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    bits: u128,
    len: usize,
}

impl Code {
    pub fn new(bits: u128, len: usize) -> Self {
        debug_assert!(len <= MAX_CODE_LEN);
        Code { bits, len }
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The path extended by one edge.
    pub fn child(&self, right: bool) -> Code {
        Code::new((self.bits << 1) | right as u128, self.len + 1)
    }

    /// Bit `i`, counted from the root.
    pub fn bit(&self, i: usize) -> bool {
        (self.bits >> (self.len - 1 - i)) & 1 == 1
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (self.len == 0 || other.bits >> (other.len - self.len) == self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a tree's leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub(crate) fn insert(&mut self, byte: u8, code: Code) {
        self.codes.insert(byte, code);
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(b, c)| (*b, c))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Total encoded length in bits for the given per-symbol counts.
    pub fn encoded_bits(&self, counts: impl IntoIterator<Item = (u8, usize)>) -> usize {
        counts
            .into_iter()
            .filter_map(|(b, n)| self.get(b).map(|c| c.len() * n))
            .sum()
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (byte, code) in self.iter() {
            writeln!(f, "{:>6} ({:3}) -> {}", format!("{:?}", byte as char), byte, code)?;
        }
        Ok(())
    }
}
