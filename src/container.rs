//! Container layout:
//!
//! ```text
//! offset 0    : u32 big-endian, N = length of the tree region
//! offset 4    : N bytes, serialized tree (empty for empty input)
//! offset 4+N  : padding byte P (0..=7)
//! offset 5+N  : packed code bits, MSB first
//! ```

use std::io::{Cursor, Read};

use crate::error::HuffmanError;
use crate::payload::PackedPayload;

const LENGTH_PREFIX: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub tree_data: Vec<u8>,
    pub payload: PackedPayload,
}

impl Container {
    pub fn new(tree_data: Vec<u8>, payload: PackedPayload) -> Self {
        Container { tree_data, payload }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, HuffmanError> {
        let tree_len = u32::try_from(self.tree_data.len()).map_err(|_| {
            HuffmanError::tree(format!(
                "serialized tree of {} bytes does not fit the length prefix",
                self.tree_data.len()
            ))
        })?;

        let payload = self.payload.to_bytes();
        let mut bytes = Vec::with_capacity(LENGTH_PREFIX + self.tree_data.len() + payload.len());
        bytes.extend_from_slice(&tree_len.to_be_bytes());
        bytes.extend_from_slice(&self.tree_data);
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    pub fn parse(data: &[u8]) -> Result<Container, HuffmanError> {
        let mut cursor = Cursor::new(data);

        let mut tree_len_bytes = [0u8; LENGTH_PREFIX];
        cursor.read_exact(&mut tree_len_bytes).map_err(|_| {
            HuffmanError::truncated(format!(
                "{} bytes is shorter than the {}-byte length prefix",
                data.len(),
                LENGTH_PREFIX
            ))
        })?;
        let tree_len = u32::from_be_bytes(tree_len_bytes) as usize;

        let rest = &data[LENGTH_PREFIX..];
        if tree_len > rest.len() {
            return Err(HuffmanError::truncated(format!(
                "tree length {} exceeds the {} bytes remaining",
                tree_len,
                rest.len()
            )));
        }
        let (tree_data, payload) = rest.split_at(tree_len);

        // Non-zero padding promises at least one data byte after it.
        match payload {
            [] => return Err(HuffmanError::truncated("missing padding byte")),
            [padding] if (1..=7).contains(padding) => {
                return Err(HuffmanError::truncated(format!(
                    "padding {} declared but no data bytes follow",
                    padding
                )));
            }
            _ => {}
        }

        Ok(Container {
            tree_data: tree_data.to_vec(),
            payload: PackedPayload::from_bytes(payload)?,
        })
    }

    /// Total size once serialized.
    pub fn serialized_len(&self) -> usize {
        LENGTH_PREFIX + self.tree_data.len() + 1 + self.payload.data().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_vec::BitVec;

    fn payload(bits: &str) -> PackedPayload {
        PackedPayload::pack(&bits.chars().map(|c| c == '1').collect::<BitVec>())
    }

    #[test]
    fn test_layout() {
        let container = Container::new(b"TREE".to_vec(), payload("1110"));
        let bytes = container.serialize().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 4, b'T', b'R', b'E', b'E', 4, 0b1110_0000]);
        assert_eq!(container.serialized_len(), bytes.len());
        assert_eq!(Container::parse(&bytes).unwrap(), container);
    }

    #[test]
    fn test_empty_container() {
        let container = Container::new(Vec::new(), PackedPayload::empty());
        let bytes = container.serialize().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0]);
        assert_eq!(container.serialized_len(), 5);
        assert_eq!(Container::parse(&bytes).unwrap(), container);
    }

    #[test]
    fn test_short_prefix() {
        for data in [&[][..], &[0][..], &[0, 0, 0][..]] {
            assert!(matches!(
                Container::parse(data),
                Err(HuffmanError::TruncatedContainer(_))
            ));
        }
    }

    #[test]
    fn test_tree_length_overruns_buffer() {
        let bytes = [0, 0, 1, 0, b'x', 0];
        assert!(matches!(
            Container::parse(&bytes),
            Err(HuffmanError::TruncatedContainer(_))
        ));
    }

    #[test]
    fn test_missing_payload() {
        assert!(matches!(
            Container::parse(&[0, 0, 0, 1, b'x']),
            Err(HuffmanError::TruncatedContainer(_))
        ));
        assert!(matches!(
            Container::parse(&[0, 0, 0, 1, b'x', 3]),
            Err(HuffmanError::TruncatedContainer(_))
        ));
    }

    #[test]
    fn test_bad_padding_is_malformed() {
        assert!(matches!(
            Container::parse(&[0, 0, 0, 0, 9, 0xFF]),
            Err(HuffmanError::MalformedPayload(_))
        ));
    }
}
