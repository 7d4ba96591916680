use crate::code_table::Code;

/// Growable bit string packed MSB-first into bytes.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &Code) {
        for i in 0..code.len() {
            self.push_bit(code.bit(i));
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bits[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// Drop bits past `len`, clearing them in the last byte.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.bit_count {
            return;
        }
        self.bits.truncate(len.div_ceil(8));
        if len % 8 != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= 0xFFu8 << (8 - len % 8);
            }
        }
        self.bit_count = len;
    }
}

impl From<(usize, Vec<u8>)> for BitVec {
    /// Bits beyond `bit_count` in the last byte are kept as-is.
    fn from((bit_count, bits): (usize, Vec<u8>)) -> Self {
        debug_assert!(bit_count <= bits.len() * 8);
        BitVec { bits, bit_count }
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut v = BitVec::new();
        for bit in iter {
            v.push_bit(bit);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_str(s: &str) -> BitVec {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_push_msb_first() {
        let v = from_str("1010000011");
        assert_eq!(v.len(), 10);
        assert_eq!(v.as_bytes(), &[0b1010_0000, 0b1100_0000]);
    }

    #[test]
    fn test_push_code() {
        let mut v = BitVec::new();
        v.push_code(&Code::new(0b011, 3));
        v.push_code(&Code::new(0b1, 1));
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![false, true, true, true]);
        assert_eq!(v.get(3), Some(true));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn test_truncate_clears_tail() {
        let mut v = from_str("1111111111");
        v.truncate(3);
        assert_eq!(v.len(), 3);
        assert_eq!(v.as_bytes(), &[0b1110_0000]);

        v.truncate(8);
        assert_eq!(v.len(), 3);

        v.truncate(0);
        assert!(v.is_empty());
        assert!(v.as_bytes().is_empty());
    }
}
