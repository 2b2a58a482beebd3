//! Encoder-side phrase trie
//!
//! Node 0 is the root; nodes 1..=256 are the single-byte phrases, so the
//! root child for byte `b` is node `b + 1` with dictionary index `b`.

use std::collections::HashMap;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct TrieNode {
    /// Dictionary index of the phrase spelled from the root; `None` for the root
    index: Option<usize>,
    children: HashMap<u8, NodeId>,
}

/// Longest-match cursor over a growing phrase dictionary
#[derive(Debug)]
pub struct LzwTrie {
    nodes: Vec<TrieNode>,
    cursor: NodeId,
    phrases: usize,
    max_dict_size: usize,
}

impl LzwTrie {
    /// Trie holding the 256 single-byte phrases
    pub fn new(max_dict_size: usize) -> Self {
        let mut nodes = Vec::with_capacity(max_dict_size.min(1 << 16) + 1);
        nodes.push(TrieNode::default());
        for byte in 0..=255u8 {
            nodes.push(TrieNode {
                index: Some(byte as usize),
                children: HashMap::new(),
            });
            nodes[ROOT].children.insert(byte, byte as usize + 1);
        }
        Self {
            nodes,
            cursor: ROOT,
            phrases: 256,
            max_dict_size,
        }
    }

    /// Number of phrases assigned so far
    pub fn phrases(&self) -> usize {
        self.phrases
    }

    /// True once no further phrase can be added
    pub fn is_full(&self) -> bool {
        self.phrases + 1 >= self.max_dict_size
    }

    /// Feed one byte
    ///
    /// Returns the index of the current phrase when `byte` cannot extend it.
    /// The extension becomes a new phrase unless the dictionary is full, and
    /// the cursor restarts at the single-byte phrase for `byte`.
    pub fn next(&mut self, byte: u8) -> Option<usize> {
        if let Some(&child) = self.nodes[self.cursor].children.get(&byte) {
            self.cursor = child;
            return None;
        }

        if !self.is_full() {
            self.nodes.push(TrieNode {
                index: Some(self.phrases),
                children: HashMap::new(),
            });
            let child = self.nodes.len() - 1;
            self.nodes[self.cursor].children.insert(byte, child);
            self.phrases += 1;
        }

        let index = self.nodes[self.cursor].index;
        self.cursor = byte as usize + 1;
        index
    }

    /// Index of the partially matched phrase, if the cursor left the root
    pub fn pending(&self) -> Option<usize> {
        self.nodes[self.cursor].index
    }
}
