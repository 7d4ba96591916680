use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::code_table::{Code, CodeTable, MAX_CODE_LEN};
use crate::error::HuffmanError;
use crate::frequency::Frequencies;
use crate::min_heap::MinHeap;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        byte: u8,
    },
    Internal {
        weight: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap key for tree construction. Arena indices are handed out in creation
/// order (leaves by first appearance, then merged nodes), so ordering by
/// `(weight, id)` is a fixed, reproducible tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    weight: usize,
    id: NodeId,
}

/// A Huffman prefix tree. Always holds at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree for `bytes`, or `None` when `bytes` is empty.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        HuffmanTree::from_frequencies(&Frequencies::count(bytes))
    }

    /// Huffman's algorithm over a min-heap. The first node extracted in each
    /// round becomes the left child.
    pub fn from_frequencies(frequencies: &Frequencies) -> Option<Self> {
        let mut nodes: Vec<HuffNode> = frequencies
            .iter()
            .map(|(byte, weight)| HuffNode::Leaf { weight, byte })
            .collect();

        let mut heap = MinHeap::build(
            nodes
                .iter()
                .enumerate()
                .map(|(id, node)| HeapEntry {
                    weight: node.weight(),
                    id,
                })
                .collect(),
        );

        loop {
            let x = heap.extract_min()?;
            let Some(y) = heap.extract_min() else {
                let tree = HuffmanTree { nodes, root: x.id };
                debug!(
                    symbols = frequencies.len(),
                    nodes = tree.nodes.len(),
                    depth = tree.depth(),
                    "built huffman tree"
                );
                return Some(tree);
            };

            let weight = x.weight + y.weight;
            let id = nodes.len();
            nodes.push(HuffNode::Internal {
                weight,
                left: x.id,
                right: y.id,
            });
            heap.insert(HeapEntry { weight, id });
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id]
    }

    /// Number of symbols the tree was built from, i.e. the root weight.
    pub fn symbol_count(&self) -> usize {
        self.nodes[self.root].weight()
    }

    /// `(symbol, weight)` for every leaf, in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            HuffNode::Leaf { byte, weight } => Some((*byte, *weight)),
            HuffNode::Internal { .. } => None,
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root], HuffNode::Leaf { .. })
    }

    /// Longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                HuffNode::Leaf { .. } => max = max.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        max
    }

    /// Walk the tree, `0` per left edge and `1` per right edge. A lone leaf
    /// gets the code `0` so every occurrence still costs one bit.
    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::default();

        if let HuffNode::Leaf { byte, .. } = self.nodes[self.root] {
            table.insert(byte, Code::new(0, 1));
            return table;
        }

        let mut stack = vec![(self.root, Code::default())];
        while let Some((id, code)) = stack.pop() {
            match &self.nodes[id] {
                HuffNode::Leaf { byte, .. } => table.insert(*byte, code),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((*right, code.child(true)));
                    stack.push((*left, code.child(false)));
                }
            }
        }
        table
    }

    /// JSON record form: `{"char", "freq", "left", "right"}` per node,
    /// `null` for absent children.
    pub fn serialize(&self) -> Result<Vec<u8>, HuffmanError> {
        let record = self.to_record(self.root);
        serde_json::to_vec(&record).map_err(|e| HuffmanError::tree(e.to_string()))
    }

    /// Inverse of [`serialize`](Self::serialize). An empty region (or a JSON
    /// `null`) is the tree of empty input and yields `None`.
    pub fn deserialize(data: &[u8]) -> Result<Option<HuffmanTree>, HuffmanError> {
        if data.is_empty() {
            return Ok(None);
        }
        let record: Option<NodeRecord> =
            serde_json::from_slice(data).map_err(|e| HuffmanError::tree(e.to_string()))?;
        let Some(record) = record else {
            return Ok(None);
        };

        let mut nodes = Vec::new();
        let mut seen = [false; 256];
        let root = insert_record(record, 0, &mut nodes, &mut seen)?;
        Ok(Some(HuffmanTree { nodes, root }))
    }

    fn to_record(&self, id: NodeId) -> NodeRecord {
        match &self.nodes[id] {
            HuffNode::Leaf { weight, byte } => NodeRecord {
                symbol: Some(*byte),
                freq: *weight,
                left: None,
                right: None,
            },
            HuffNode::Internal {
                weight,
                left,
                right,
            } => NodeRecord {
                symbol: None,
                freq: *weight,
                left: Some(Box::new(self.to_record(*left))),
                right: Some(Box::new(self.to_record(*right))),
            },
        }
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
        label: &str,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match &self.nodes[id] {
            HuffNode::Leaf { byte, weight } => writeln!(
                f,
                "{}{}-> Leaf: {:?} ({}) [weight: {}]",
                indent, label, *byte as char, byte, weight
            ),
            HuffNode::Internal {
                weight,
                left,
                right,
            } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                self.fmt_node(f, *left, depth + 1, "L")?;
                self.fmt_node(f, *right, depth + 1, "R")
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.fmt_node(f, self.root, 0, "root")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    #[serde(rename = "char")]
    symbol: Option<u8>,
    freq: usize,
    left: Option<Box<NodeRecord>>,
    right: Option<Box<NodeRecord>>,
}

/// Validate `record` and push it into the arena, children first.
fn insert_record(
    record: NodeRecord,
    depth: usize,
    nodes: &mut Vec<HuffNode>,
    seen: &mut [bool; 256],
) -> Result<NodeId, HuffmanError> {
    // Unreachable through serde_json's default nesting limit; kept so the
    // arena never holds a code wider than `Code` can store.
    if depth > MAX_CODE_LEN {
        return Err(HuffmanError::tree(format!(
            "tree deeper than {} levels",
            MAX_CODE_LEN
        )));
    }

    let node = match (record.symbol, record.left, record.right) {
        (Some(byte), None, None) => {
            if record.freq == 0 {
                return Err(HuffmanError::tree(format!("leaf {} has zero frequency", byte)));
            }
            if std::mem::replace(&mut seen[byte as usize], true) {
                return Err(HuffmanError::tree(format!("symbol {} appears twice", byte)));
            }
            HuffNode::Leaf {
                weight: record.freq,
                byte,
            }
        }
        (None, Some(left), Some(right)) => {
            let left = insert_record(*left, depth + 1, nodes, seen)?;
            let right = insert_record(*right, depth + 1, nodes, seen)?;
            let sum = nodes[left].weight().checked_add(nodes[right].weight());
            if sum != Some(record.freq) {
                return Err(HuffmanError::tree(format!(
                    "internal frequency {} is not the sum of its children",
                    record.freq
                )));
            }
            HuffNode::Internal {
                weight: record.freq,
                left,
                right,
            }
        }
        (Some(byte), _, _) => {
            return Err(HuffmanError::tree(format!("leaf {} has children", byte)));
        }
        (None, _, _) => {
            return Err(HuffmanError::tree("internal node needs exactly two children"));
        }
    };

    nodes.push(node);
    Ok(nodes.len() - 1)
}
