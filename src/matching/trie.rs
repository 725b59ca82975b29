//! Interpreted trie for states with many literal siblings.
//!
//! Literals are grouped by byte length first, since a segment can only equal a literal of
//! the same length. Inside a group the trie branches on whichever byte position splits the
//! remaining literals most evenly (case-folded), until a group is small enough to scan.
//! Every path ends in a full-literal check, so branching only narrows the candidates and
//! never decides a match on its own.

use std::collections::BTreeMap;

use super::ascii::{scalar_eq, AsciiLiteral};
use super::options::Vectorize;
use super::segment::PathSegment;

/// Groups at or below this size are scanned instead of branched.
const SCAN_MAX: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Leaf {
    text: Box<str>,
    destination: usize,
    ascii: Option<AsciiLiteral>,
}

impl Leaf {
    #[inline]
    fn matches(&self, bytes: &[u8]) -> bool {
        match &self.ascii {
            Some(lit) => lit.matches(bytes),
            None => scalar_eq(bytes, self.text.as_bytes()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TrieNode {
    /// Candidate leaves, checked in order
    Scan(Box<[usize]>),
    /// Branch on the folded byte at `position`; edges sorted by byte
    Branch {
        position: usize,
        edges: Box<[(u8, usize)]>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LengthGroup {
    len: usize,
    root: usize,
}

/// Jump table that walks a length-keyed, byte-branching trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTrieJumpTable {
    default_destination: usize,
    exit_destination: usize,
    groups: Box<[LengthGroup]>,
    nodes: Vec<TrieNode>,
    leaves: Vec<Leaf>,
}

impl CompiledTrieJumpTable {
    /// Compile `entries` (case-insensitively distinct literals) into a trie.
    #[must_use]
    pub fn new(
        default_destination: usize,
        exit_destination: usize,
        entries: &[(String, usize)],
        vectorize: Vectorize,
    ) -> Self {
        let leaves: Vec<Leaf> = entries
            .iter()
            .map(|(text, destination)| Leaf {
                text: text.as_str().into(),
                destination: *destination,
                ascii: if vectorize.applies_to(text.len()) {
                    AsciiLiteral::new(text.as_bytes())
                } else {
                    None
                },
            })
            .collect();

        let mut by_len: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, leaf) in leaves.iter().enumerate() {
            by_len.entry(leaf.text.len()).or_default().push(i);
        }

        let mut table = Self {
            default_destination,
            exit_destination,
            groups: Box::default(),
            nodes: Vec::new(),
            leaves,
        };

        let groups: Vec<LengthGroup> = by_len
            .into_iter()
            .map(|(len, members)| {
                let root = table.build_node(members, len, &mut Vec::new());
                LengthGroup { len, root }
            })
            .collect();
        table.groups = groups.into_boxed_slice();
        table
    }

    fn folded_byte(&self, leaf: usize, position: usize) -> u8 {
        self.leaves[leaf].text.as_bytes()[position].to_ascii_lowercase()
    }

    /// Position (not yet branched on) with the most distinct folded bytes among `members`.
    fn best_position(&self, members: &[usize], len: usize, used: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for position in (0..len).filter(|p| !used.contains(p)) {
            let mut seen: Vec<u8> = members
                .iter()
                .map(|&m| self.folded_byte(m, position))
                .collect();
            seen.sort_unstable();
            seen.dedup();
            if seen.len() > 1 && best.map_or(true, |(_, count)| seen.len() > count) {
                best = Some((position, seen.len()));
            }
        }
        best.map(|(position, _)| position)
    }

    fn build_node(&mut self, members: Vec<usize>, len: usize, used: &mut Vec<usize>) -> usize {
        let position = if members.len() <= SCAN_MAX {
            None
        } else {
            self.best_position(&members, len, used)
        };

        let Some(position) = position else {
            self.nodes.push(TrieNode::Scan(members.into_boxed_slice()));
            return self.nodes.len() - 1;
        };

        let mut partitions: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for m in members {
            partitions
                .entry(self.folded_byte(m, position))
                .or_default()
                .push(m);
        }

        // Reserve this node's slot before the children so the root stays first in its group.
        let index = self.nodes.len();
        self.nodes.push(TrieNode::Scan(Box::default()));

        used.push(position);
        let edges: Box<[(u8, usize)]> = partitions
            .into_iter()
            .map(|(byte, group)| (byte, self.build_node(group, len, used)))
            .collect();
        used.pop();

        self.nodes[index] = TrieNode::Branch { position, edges };
        index
    }

    #[inline]
    #[must_use]
    pub fn destination(&self, path: &str, segment: PathSegment) -> usize {
        if segment.is_empty() {
            return self.exit_destination;
        }

        let len = segment.length as usize;
        let Ok(group) = self.groups.binary_search_by_key(&len, |g| g.len) else {
            return self.default_destination;
        };

        let bytes = segment.bytes(path);
        let mut node = self.groups[group].root;
        loop {
            match &self.nodes[node] {
                TrieNode::Scan(members) => {
                    return members
                        .iter()
                        .map(|&m| &self.leaves[m])
                        .find(|leaf| leaf.matches(bytes))
                        .map_or(self.default_destination, |leaf| leaf.destination);
                }
                TrieNode::Branch { position, edges } => {
                    let Some(byte) = bytes.get(*position) else {
                        return self.default_destination;
                    };
                    let byte = byte.to_ascii_lowercase();
                    match edges.binary_search_by_key(&byte, |(b, _)| *b) {
                        Ok(i) => node = edges[i].1,
                        Err(_) => return self.default_destination,
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn default_destination(&self) -> usize {
        self.default_destination
    }

    #[must_use]
    pub fn exit_destination(&self) -> usize {
        self.exit_destination
    }

    /// Number of literals compiled into the trie.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Depth of the deepest branch chain, for diagnostics.
    #[must_use]
    pub fn max_branch_depth(&self) -> usize {
        self.groups
            .iter()
            .map(|g| self.depth_from(g.root))
            .max()
            .unwrap_or(0)
    }

    fn depth_from(&self, node: usize) -> usize {
        match &self.nodes[node] {
            TrieNode::Scan(_) => 0,
            TrieNode::Branch { edges, .. } => {
                1 + edges
                    .iter()
                    .map(|(_, child)| self.depth_from(*child))
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}
