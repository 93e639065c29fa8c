use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

const ROOT: usize = 0;

struct SuffixNode {
    start: usize,
    // `None` marks an open leaf edge that grows with the text.
    end: Option<usize>,
    link: Option<usize>,
    // Ordered so the lexicographic walk can take the greatest edge.
    next: BTreeMap<char, usize>,
}

impl SuffixNode {
    const fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end, link: None, next: BTreeMap::new() }
    }

    /// Length of the incoming edge given the current text position.
    fn edge_length(&self, position: usize) -> usize {
        self.end.unwrap_or(position + 1).min(position + 1) - self.start
    }
}

/// An online suffix tree built with Ukkonen's algorithm.
///
/// Characters are appended one at a time in amortized constant work per
/// character; after each [`push`](SuffixTree::push) the tree indexes every
/// suffix of the text so far. Internal state is the classic active point
/// (node, edge, length) plus the count of suffixes still to be inserted.
///
/// # Examples
///
/// ```
/// use ordkit::SuffixTree;
///
/// let mut tree = SuffixTree::new("leetcode");
/// assert_eq!(tree.lex_greatest_suffix(), "tcode");
///
/// tree.push('z');
/// assert_eq!(tree.lex_greatest_suffix(), "z");
/// ```
pub struct SuffixTree {
    nodes: Vec<SuffixNode>,
    text: Vec<char>,
    need_suffix_link: Option<usize>,
    remainder: usize,
    active_node: usize,
    active_edge: usize,
    active_length: usize,
}

impl SuffixTree {
    /// Builds the suffix tree of `text` by feeding it character by character.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut nodes = Vec::with_capacity(2 * text.len() + 2);
        nodes.push(SuffixNode::new(0, Some(0)));

        let mut tree = Self {
            nodes,
            text: Vec::with_capacity(text.len()),
            need_suffix_link: None,
            remainder: 0,
            active_node: ROOT,
            active_edge: 0,
            active_length: 0,
        };
        for ch in text.chars() {
            tree.push(ch);
        }
        tree
    }

    /// Number of characters indexed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn alloc(&mut self, start: usize, end: Option<usize>) -> usize {
        self.nodes.push(SuffixNode::new(start, end));
        self.nodes.len() - 1
    }

    /// Resolves the suffix link left pending by the previous internal-node
    /// event in this phase, then leaves `node` pending in its place.
    fn add_suffix_link(&mut self, node: usize) {
        if let Some(pending) = self.need_suffix_link {
            self.nodes[pending].link = Some(node);
        }
        self.need_suffix_link = Some(node);
    }

    /// Canonicalizes the active point: if it sits at or past the end of the
    /// edge to `next`, hop onto `next` and shorten the active length.
    fn walk_down(&mut self, next: usize, position: usize) -> bool {
        let edge_length = self.nodes[next].edge_length(position);
        if self.active_length >= edge_length {
            self.active_edge += edge_length;
            self.active_length -= edge_length;
            self.active_node = next;
            true
        } else {
            false
        }
    }

    /// Appends one character, extending every suffix of the text.
    pub fn push(&mut self, c: char) {
        self.text.push(c);
        let position = self.text.len() - 1;
        self.need_suffix_link = None;
        self.remainder += 1;

        while self.remainder > 0 {
            if self.active_length == 0 {
                self.active_edge = position;
            }
            let edge = self.text[self.active_edge];

            if let Some(&next) = self.nodes[self.active_node].next.get(&edge) {
                if self.walk_down(next, position) {
                    continue;
                }

                if self.text[self.nodes[next].start + self.active_length] == c {
                    // The character is already on the edge: this and all
                    // shorter suffixes are implicitly present.
                    self.active_length += 1;
                    self.add_suffix_link(self.active_node);
                    break;
                }

                // Mismatch inside the edge: split it, hanging the old
                // remainder and a fresh open leaf off the new internal node.
                let split_end = self.nodes[next].start + self.active_length;
                let split = self.alloc(self.nodes[next].start, Some(split_end));
                self.nodes[self.active_node].next.insert(edge, split);

                let leaf = self.alloc(position, None);
                self.nodes[split].next.insert(c, leaf);

                self.nodes[next].start += self.active_length;
                let next_edge = self.text[self.nodes[next].start];
                self.nodes[split].next.insert(next_edge, next);

                self.add_suffix_link(split);
            } else {
                let leaf = self.alloc(position, None);
                self.nodes[self.active_node].next.insert(edge, leaf);
                self.add_suffix_link(self.active_node);
            }

            self.remainder -= 1;

            if self.active_node == ROOT && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = position + 1 - self.remainder;
            } else {
                self.active_node = self.nodes[self.active_node].link.unwrap_or(ROOT);
            }
        }
    }

    /// Returns the lexicographically greatest suffix of the indexed text, by
    /// repeatedly following the greatest outgoing edge from the root.
    #[must_use]
    pub fn lex_greatest_suffix(&self) -> String {
        let mut out = String::new();
        let mut current = &self.nodes[ROOT];

        while let Some((_, &index)) = current.next.iter().next_back() {
            current = &self.nodes[index];
            let end = current.end.unwrap_or(self.text.len()).min(self.text.len());
            out.extend(&self.text[current.start..end]);
        }

        out
    }
}

impl Default for SuffixTree {
    fn default() -> Self {
        Self::new("")
    }
}
