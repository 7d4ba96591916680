use tracing::{debug, trace};

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::container::Container;
use crate::error::HuffmanError;
use crate::frequency::Frequencies;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::payload::PackedPayload;

/// Encoder/decoder bound to one tree.
///
/// `None` is the tree of empty input: it encodes only the empty sequence.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: Option<HuffmanTree>,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: Option<HuffmanTree>) -> Self {
        let encode_table = tree
            .as_ref()
            .map(HuffmanTree::generate_table)
            .unwrap_or_default();
        HuffmanCodec { tree, encode_table }
    }

    /// A codec whose tree is fitted to `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::new(HuffmanTree::from_bytes(data))
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    /// Encode `data` into a complete container.
    ///
    /// The decoder emits exactly as many symbols as the tree's weights sum
    /// to, so `data` must have the same byte counts the tree was built from
    /// (any reordering of that input is fine). Fails with `MalformedPayload`
    /// on a byte the tree has no leaf for, or on a count mismatch.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
        let mut bit_vec = BitVec::with_capacity(data.len());
        for &byte in data {
            let code = self.encode_table.get(byte).ok_or_else(|| {
                HuffmanError::payload(format!("byte {} not in encode table", byte))
            })?;
            bit_vec.push_code(code);
        }
        self.check_counts(data)?;

        let tree_data = match &self.tree {
            Some(tree) => tree.serialize()?,
            None => Vec::new(),
        };
        let payload = PackedPayload::pack(&bit_vec);
        debug!(
            input = data.len(),
            bits = bit_vec.len(),
            padding = payload.padding(),
            tree_bytes = tree_data.len(),
            "encoded"
        );
        for (byte, code) in self.encode_table.iter() {
            trace!(byte, %code, "code");
        }

        Container::new(tree_data, payload).serialize()
    }

    fn check_counts(&self, data: &[u8]) -> Result<(), HuffmanError> {
        let Some(tree) = &self.tree else {
            return Ok(());
        };
        let counts = Frequencies::count(data);
        for (byte, weight) in tree.leaves() {
            let found = counts.get(byte).unwrap_or(0);
            if found != weight {
                return Err(HuffmanError::payload(format!(
                    "byte {} occurs {} times but the tree expects {}",
                    byte, found, weight
                )));
            }
        }
        Ok(())
    }

    /// Decode a complete container. The embedded tree is used, not `self`'s.
    pub fn decode(data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
        let container = Container::parse(data)?;
        let tree = HuffmanTree::deserialize(&container.tree_data)?;
        let bits = container.payload.unpack()?;

        let Some(tree) = tree else {
            if !bits.is_empty() {
                return Err(HuffmanError::payload(format!(
                    "{} bits present but the tree is empty",
                    bits.len()
                )));
            }
            debug!("decoded empty container");
            return Ok(Vec::new());
        };

        let result = walk(&tree, &bits)?;
        debug!(bits = bits.len(), output = result.len(), "decoded");
        Ok(result)
    }
}

/// Walk the tree once per symbol until the root weight worth of symbols has
/// been emitted.
fn walk(tree: &HuffmanTree, bits: &BitVec) -> Result<Vec<u8>, HuffmanError> {
    let expected = tree.symbol_count();
    // Every symbol costs at least one bit.
    if expected > bits.len() {
        return Err(HuffmanError::underflow(format!(
            "{} bits cannot hold {} symbols",
            bits.len(),
            expected
        )));
    }
    let mut result = Vec::with_capacity(expected);
    let mut bits = bits.iter();

    if let HuffNode::Leaf { byte, .. } = *tree.node(tree.root()) {
        for bit in bits.by_ref().take(expected) {
            if bit {
                return Err(HuffmanError::payload("1 bit under a single-leaf tree"));
            }
            result.push(byte);
        }
    } else {
        while result.len() < expected {
            let mut current = tree.node(tree.root());
            loop {
                match current {
                    HuffNode::Leaf { byte, .. } => {
                        result.push(*byte);
                        break;
                    }
                    HuffNode::Internal { left, right, .. } => {
                        let Some(bit) = bits.next() else {
                            return Err(HuffmanError::underflow(format!(
                                "bits ran out after {} of {} symbols",
                                result.len(),
                                expected
                            )));
                        };
                        current = tree.node(if bit { *right } else { *left });
                    }
                }
            }
        }
    }

    if result.len() < expected {
        return Err(HuffmanError::underflow(format!(
            "bits ran out after {} of {} symbols",
            result.len(),
            expected
        )));
    }
    let extra = bits.count();
    if extra > 0 {
        return Err(HuffmanError::payload(format!(
            "{} bits left over after the last symbol",
            extra
        )));
    }
    Ok(result)
}
