//! Huffman tree stored in an arena
//!
//! Nodes are addressed by [`NodeId`]. Leaves for symbols 0..=255 occupy ids
//! 0..=255; every merge appends one internal node. The priority queue orders
//! nodes by `(weight, id)`, so among equal weights leaves win over internal
//! nodes and older nodes win over newer ones. The node popped first becomes
//! the 0-child. Encoder and decoder rebuild identical trees from the same
//! frequency table because this order is total.

use super::FrequencyTable;
use crate::{CompressError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node inside its tree's arena
pub type NodeId = usize;

/// A Huffman tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    /// Symbol with its frequency
    Leaf {
        /// Byte value
        symbol: u8,
        /// Occurrence count
        weight: u64,
    },
    /// Merge of two subtrees
    Internal {
        /// Child reached by a 0 bit
        zero: NodeId,
        /// Child reached by a 1 bit
        one: NodeId,
        /// Sum of the children's weights
        weight: u64,
    },
}

impl HuffmanNode {
    /// Total frequency of the subtree
    pub fn weight(&self) -> u64 {
        match *self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => weight,
        }
    }

    /// True for leaf nodes
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Per-symbol bit sequences, left edge = `false`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Vec<bool>>,
}

impl CodeTable {
    /// Code for `symbol`
    pub fn code(&self, symbol: u8) -> &[bool] {
        &self.codes[symbol as usize]
    }

    /// Code lengths indexed by symbol
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.codes.iter().map(Vec::len)
    }
}

/// Arena-backed Huffman tree
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    fn empty() -> Self {
        Self {
            nodes: Vec::with_capacity(2 * 256 - 1),
            root: 0,
        }
    }

    fn push_leaf(&mut self, symbol: u8, weight: u64) -> NodeId {
        self.nodes.push(HuffmanNode::Leaf { symbol, weight });
        self.nodes.len() - 1
    }

    fn push_internal(&mut self, zero: NodeId, one: NodeId) -> Result<NodeId> {
        let (Some(left), Some(right)) = (self.nodes.get(zero), self.nodes.get(one)) else {
            return Err(CompressError::InvalidNode(format!(
                "children {zero} and {one} not in a tree of {} nodes",
                self.nodes.len()
            )));
        };
        if zero == one {
            return Err(CompressError::InvalidNode(format!(
                "node {zero} cannot be both children"
            )));
        }
        let weight = left.weight() + right.weight();
        self.nodes.push(HuffmanNode::Internal { zero, one, weight });
        Ok(self.nodes.len() - 1)
    }

    /// Build the tree for a full 256-entry frequency table
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut tree = Self::empty();
        let mut queue = BinaryHeap::with_capacity(256);
        for (symbol, &count) in (0..=255u8).zip(frequencies.counts()) {
            let id = tree.push_leaf(symbol, count as u64);
            queue.push(Reverse((count as u64, id)));
        }

        loop {
            let Some(Reverse((_, zero))) = queue.pop() else {
                return Err(CompressError::InvalidNode("empty frequency table".into()));
            };
            let Some(Reverse((_, one))) = queue.pop() else {
                tree.root = zero;
                return Ok(tree);
            };
            let id = tree.push_internal(zero, one)?;
            queue.push(Reverse((tree.nodes[id].weight(), id)));
        }
    }

    /// Root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True for a tree with no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follow one edge from an internal node; leaves stay put
    pub fn step(&self, from: NodeId, bit: bool) -> NodeId {
        match self.nodes[from] {
            HuffmanNode::Internal { zero, one, .. } => {
                if bit {
                    one
                } else {
                    zero
                }
            }
            HuffmanNode::Leaf { .. } => from,
        }
    }

    /// Walk root to every leaf and collect the codes
    pub fn code_table(&self) -> CodeTable {
        let mut codes = vec![Vec::new(); 256];
        let mut pending = vec![(self.root, Vec::new())];

        while let Some((id, prefix)) = pending.pop() {
            match self.nodes[id] {
                HuffmanNode::Leaf { symbol, .. } => codes[symbol as usize] = prefix,
                HuffmanNode::Internal { zero, one, .. } => {
                    let mut one_prefix = prefix.clone();
                    one_prefix.push(true);
                    let mut zero_prefix = prefix;
                    zero_prefix.push(false);
                    pending.push((one, one_prefix));
                    pending.push((zero, zero_prefix));
                }
            }
        }

        CodeTable { codes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prefix_free(table: &CodeTable) -> bool {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                if a != b && table.code(b).starts_with(table.code(a)) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_weights_sum_to_total() {
        let frequencies = FrequencyTable::from_data(b"abracadabra").unwrap();
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        assert_eq!(tree.node(tree.root()).weight(), 11);
        assert_eq!(tree.len(), 511);
        assert!(!tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_frequent_symbols_get_short_codes() {
        let frequencies = FrequencyTable::from_data(b"aaaaaaaaaaaaaaaabbbbbbbbc").unwrap();
        let table = HuffmanTree::from_frequencies(&frequencies)
            .unwrap()
            .code_table();
        assert_eq!(table.code(b'a').len(), 1);
        assert!(table.code(b'b').len() <= table.code(b'c').len());
        assert!(table.lengths().all(|len| len > 0));
        assert!(is_prefix_free(&table));
    }

    #[test]
    fn test_all_zero_frequencies_still_build() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::default()).unwrap();
        let table = tree.code_table();
        // 256 equal weights merge into a perfectly balanced tree
        assert!(table.lengths().all(|len| len == 8));
        assert!(is_prefix_free(&table));
    }

    #[test]
    fn test_build_is_deterministic() {
        let frequencies = FrequencyTable::from_data(b"the quick brown fox").unwrap();
        let first = HuffmanTree::from_frequencies(&frequencies).unwrap().code_table();
        let second = HuffmanTree::from_frequencies(&frequencies).unwrap().code_table();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_follows_edges() {
        let frequencies = FrequencyTable::from_data(b"ab").unwrap();
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        let table = tree.code_table();
        let mut at = tree.root();
        for &bit in table.code(b'b') {
            at = tree.step(at, bit);
        }
        assert_eq!(*tree.node(at), HuffmanNode::Leaf { symbol: b'b', weight: 1 });
        assert_eq!(tree.step(at, true), at);
    }

    #[test]
    fn test_invalid_internal_node() {
        let mut tree = HuffmanTree::empty();
        let leaf = tree.push_leaf(1, 4);
        assert!(matches!(
            tree.push_internal(leaf, 9),
            Err(CompressError::InvalidNode(_))
        ));
        assert!(tree.push_internal(leaf, leaf).is_err());
    }
}
