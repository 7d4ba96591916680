//! Byte packing of an encoded bit string.
//!
//! On the wire a payload is one padding byte `P` followed by the data bytes.
//! The low `P` bits of the last data byte are filler. A payload with no bits
//! is the single byte `0x00`.

use tracing::trace;

use crate::bit_vec::BitVec;
use crate::error::HuffmanError;

/// A padded bit string plus the count of filler bits in its last byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPayload {
    padding: u8,
    data: Vec<u8>,
}

impl PackedPayload {
    /// Pack `bits` into whole bytes, zero-filling the final byte.
    pub fn pack(bits: &BitVec) -> Self {
        let padding = ((8 - bits.len() % 8) % 8) as u8;
        trace!(bits = bits.len(), padding, "packed payload");
        PackedPayload {
            padding,
            data: bits.as_bytes().to_vec(),
        }
    }

    /// The payload holding zero bits.
    pub fn empty() -> Self {
        PackedPayload {
            padding: 0,
            data: Vec::new(),
        }
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8 - self.padding as usize
    }

    /// Recover the bit string with the padding trimmed off.
    pub fn unpack(&self) -> Result<BitVec, HuffmanError> {
        self.validate()?;
        let mut bits = BitVec::from((self.data.len() * 8, self.data.clone()));
        bits.truncate(self.bit_len());
        Ok(bits)
    }

    /// Wire form: padding byte, then data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() + 1);
        bytes.push(self.padding);
        bytes.extend_from_slice(&self.data);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HuffmanError> {
        let (&padding, data) = bytes
            .split_first()
            .ok_or_else(|| HuffmanError::payload("missing padding byte"))?;
        let payload = PackedPayload {
            padding,
            data: data.to_vec(),
        };
        payload.validate()?;
        Ok(payload)
    }

    fn validate(&self) -> Result<(), HuffmanError> {
        if self.padding > 7 {
            return Err(HuffmanError::payload(format!(
                "padding {} exceeds 7",
                self.padding
            )));
        }
        if self.data.is_empty() && self.padding != 0 {
            return Err(HuffmanError::payload(format!(
                "padding {} with no data bytes",
                self.padding
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitVec {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_pack_four_bits() {
        let payload = PackedPayload::pack(&bits("1110"));
        assert_eq!(payload.padding(), 4);
        assert_eq!(payload.data(), &[0b1110_0000]);
        assert_eq!(payload.to_bytes(), vec![4, 0b1110_0000]);
        assert_eq!(payload.bit_len(), 4);
    }

    #[test]
    fn test_pack_whole_bytes() {
        let payload = PackedPayload::pack(&bits("1000000100000001"));
        assert_eq!(payload.padding(), 0);
        assert_eq!(payload.to_bytes(), vec![0, 0x81, 0x01]);
    }

    #[test]
    fn test_empty_payload() {
        let payload = PackedPayload::pack(&BitVec::new());
        assert_eq!(payload, PackedPayload::empty());
        assert_eq!(payload.to_bytes(), vec![0]);
        assert!(payload.unpack().unwrap().is_empty());
    }

    #[test]
    fn test_unpack_trims_padding() {
        for s in ["1", "0101011", "11111111", "101010101", "0000000000000"] {
            let original = bits(s);
            let payload = PackedPayload::pack(&original);
            let wire = PackedPayload::from_bytes(&payload.to_bytes()).unwrap();
            assert_eq!(wire.unpack().unwrap(), original, "bits {s}");
        }
    }

    #[test]
    fn test_unpack_ignores_garbage_in_padding() {
        let payload = PackedPayload::from_bytes(&[5, 0b1011_1111]).unwrap();
        assert_eq!(payload.unpack().unwrap(), bits("101"));
    }

    #[test]
    fn test_rejects_bad_padding() {
        assert!(matches!(
            PackedPayload::from_bytes(&[8, 0xFF]),
            Err(HuffmanError::MalformedPayload(_))
        ));
        assert!(matches!(
            PackedPayload::from_bytes(&[3]),
            Err(HuffmanError::MalformedPayload(_))
        ));
        assert!(matches!(
            PackedPayload::from_bytes(&[]),
            Err(HuffmanError::MalformedPayload(_))
        ));
    }
}
