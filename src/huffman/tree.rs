use std::fmt::{self, Write};

use crate::huffman::frequency::ByteFrequency;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum HuffNode {
    Leaf {
        byte: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(byte: u8, freq: u64) -> Self {
        HuffNode::Leaf { byte, freq }
    }

    /// Joins two subtrees; `smaller` becomes the left (`0`) child.
    pub fn merge(smaller: HuffNode, larger: HuffNode) -> Self {
        HuffNode::Internal {
            freq: smaller.freq() + larger.freq(),
            left: Box::new(smaller),
            right: Box::new(larger),
        }
    }

    pub fn freq(&self) -> u64 {
        match self {
            HuffNode::Leaf { freq, .. } | HuffNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Byte of the leftmost leaf below this node.
    pub(crate) fn first_byte(&self) -> u8 {
        match self {
            HuffNode::Leaf { byte, .. } => *byte,
            HuffNode::Internal { left, .. } => left.first_byte(),
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, freq } => writeln!(f, "{}{} (freq {})", indent, symbol_label(*byte), freq),
            HuffNode::Internal { freq, left, right } => {
                writeln!(f, "{}(freq {})", indent, freq)?;
                left.fmt_indented(f, depth + 1)?;
                right.fmt_indented(f, depth + 1)
            }
        }
    }

    fn write_dot(&self, out: &mut String, next_id: &mut usize) -> usize {
        let id = *next_id;
        *next_id += 1;

        // Writing into a String cannot fail
        match self {
            HuffNode::Leaf { byte, freq } => {
                let _ = writeln!(out, "  n{} [shape=box, label=\"{}\\n{}\"];", id, symbol_label(*byte), freq);
            }
            HuffNode::Internal { freq, left, right } => {
                let _ = writeln!(out, "  n{} [label=\"{}\"];", id, freq);
                let l = left.write_dot(out, next_id);
                let r = right.write_dot(out, next_id);
                let _ = writeln!(out, "  n{} -> n{} [label=\"0\"];", id, l);
                let _ = writeln!(out, "  n{} -> n{} [label=\"1\"];", id, r);
            }
        }

        id
    }
}

/// Printable form of a byte: the character itself when it is plain ASCII, hex otherwise.
fn symbol_label(byte: u8) -> String {
    if byte.is_ascii_graphic() && byte != b'"' && byte != b'\\' {
        format!("'{}'", byte as char)
    } else {
        format!("{:#04x}", byte)
    }
}

/// Nodes sorted by non-increasing frequency, so the two lightest are at the tail.
///
/// A node put back into the queue goes right after the last node that is
/// strictly heavier, i.e. ahead of every node of equal frequency.
#[derive(Default, Debug)]
struct NodeQueue {
    nodes: Vec<HuffNode>,
}

impl NodeQueue {
    fn from_frequencies(freqs: &ByteFrequency) -> Self {
        let mut nodes: Vec<HuffNode> = freqs.iter().map(|(b, f)| HuffNode::leaf(b, f)).collect();
        // Stable: equal frequencies keep increasing byte order
        nodes.sort_by(|a, b| b.freq().cmp(&a.freq()));
        Self { nodes }
    }

    #[inline(always)]
    fn pop_min(&mut self) -> Option<HuffNode> {
        self.nodes.pop()
    }

    fn put(&mut self, node: HuffNode) {
        let at = self
            .nodes
            .iter()
            .rposition(|n| n.freq() > node.freq())
            .map_or(0, |i| i + 1);
        self.nodes.insert(at, node);
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree for `freqs`, or `None` when there is nothing to code.
    ///
    /// A single distinct byte yields a lone leaf with no internal node.
    pub fn build(freqs: &ByteFrequency) -> Option<Self> {
        let mut queue = NodeQueue::from_frequencies(freqs);

        loop {
            let smaller = queue.pop_min()?;
            match queue.pop_min() {
                Some(larger) => queue.put(HuffNode::merge(smaller, larger)),
                None => {
                    log::debug!(
                        "Built Huffman tree: {} leaves, depth {}",
                        smaller.leaf_count(),
                        smaller.depth()
                    );
                    return Some(HuffmanTree { root: smaller });
                }
            }
        }
    }

    pub fn from_bytes(input: &[u8]) -> Option<Self> {
        Self::build(&ByteFrequency::count(input))
    }

    /// Sum of all leaf frequencies.
    pub fn weight(&self) -> u64 {
        self.root.freq()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn internal_count(&self) -> usize {
        self.leaf_count() - 1
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Graphviz rendering; edges are labelled with the bit they stand for.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph Tree {\n");
        let mut next_id = 0;
        self.root.write_dot(&mut out, &mut next_id);
        out.push_str("}\n");
        out
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt_indented(f, 0)
    }
}
