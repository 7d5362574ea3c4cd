// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `vlc` module provides support for decoding variable-length codes (VLC).

use log::warn;

use super::ReadBitsLtr;

/// The maximum length of a codeword supported by a [`Codebook`].
pub const MAX_CODE_LEN: u32 = 32;

#[derive(Copy, Clone, Debug)]
enum Node<E: Copy> {
    /// Indicies of the child nodes reached by a 0 and a 1 bit, respectively.
    Branch([u32; 2]),
    /// A complete codeword.
    Leaf(E),
}

/// A `Codebook` is a binary decoding tree for a prefix-free set of codewords.
///
/// Node 0 is always the root. A child index of 0 therefore marks an absent child.
#[derive(Clone, Debug)]
pub struct Codebook<E: Copy> {
    nodes: Vec<Node<E>>,
}

impl<E: Copy> Codebook<E> {
    /// Build a codebook from parallel slices of codewords, codeword lengths, and values.
    ///
    /// Entries with a length of 0 are unused and skipped.
    pub fn new(codes: &[u32], lens: &[u8], values: &[E]) -> Self {
        assert!(codes.len() == lens.len() && codes.len() == values.len());

        let mut nodes = vec![Node::Branch([0, 0])];

        for ((&code, &len), &value) in codes.iter().zip(lens).zip(values) {
            let len = u32::from(len);

            if len == 0 {
                continue;
            }

            debug_assert!(len <= MAX_CODE_LEN);

            let mut node = 0usize;

            for i in (0..len).rev() {
                let bit = ((code >> i) & 1) as usize;

                let children = match nodes[node] {
                    Node::Branch(children) => children,
                    _ => {
                        // A shorter codeword is a prefix of this one.
                        warn!("vlc: codeword {:#x} of length {} is not prefix-free", code, len);
                        break;
                    }
                };

                if i == 0 {
                    let leaf = nodes.len() as u32;
                    nodes.push(Node::Leaf(value));
                    Codebook::link(&mut nodes, node, children, bit, leaf);
                }
                else if children[bit] == 0 {
                    let branch = nodes.len() as u32;
                    nodes.push(Node::Branch([0, 0]));
                    Codebook::link(&mut nodes, node, children, bit, branch);
                    node = branch as usize;
                }
                else {
                    node = children[bit] as usize;
                }
            }
        }

        Codebook { nodes }
    }

    fn link(nodes: &mut [Node<E>], node: usize, mut children: [u32; 2], bit: usize, child: u32) {
        children[bit] = child;
        nodes[node] = Node::Branch(children);
    }

    /// Decode one codeword from the bitstream. Returns the value and the codeword length.
    pub fn read<B: ReadBitsLtr + ?Sized>(&self, bs: &mut B) -> Option<(E, u32)> {
        let mut node = 0usize;
        let mut len = 0;

        loop {
            match self.nodes[node] {
                Node::Leaf(value) => return Some((value, len)),
                Node::Branch(children) => {
                    if len >= MAX_CODE_LEN {
                        return None;
                    }

                    let next = children[usize::from(bs.read_bit())];
                    len += 1;

                    if next == 0 {
                        return None;
                    }

                    node = next as usize;
                }
            }
        }
    }

    /// Returns true if the codebook contains no codewords.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BitReaderLtr;

    #[test]
    fn verify_codebook_decode() {
        // 0 -> 'a', 10 -> 'b', 110 -> 'c', 111 -> 'd'
        let codes = [0b0, 0b10, 0b110, 0b111];
        let lens = [1, 2, 3, 3];
        let values = ['a', 'b', 'c', 'd'];

        let codebook = Codebook::new(&codes, &lens, &values);
        assert!(!codebook.is_empty());

        // b a d c a
        let mut bs = BitReaderLtr::new(&[0b1001_1111, 0b0000_0000]);

        assert_eq!(bs.read_codebook(&codebook), Some(('b', 2)));
        assert_eq!(bs.read_codebook(&codebook), Some(('a', 1)));
        assert_eq!(bs.read_codebook(&codebook), Some(('d', 3)));
        assert_eq!(bs.read_codebook(&codebook), Some(('c', 3)));
        assert_eq!(bs.read_codebook(&codebook), Some(('a', 1)));
    }

    #[test]
    fn verify_codebook_incomplete_code() {
        // Only 00 and 01 are defined. A leading 1 bit is not a codeword.
        let codebook = Codebook::new(&[0b00, 0b01], &[2, 2], &[1u8, 2]);

        let mut bs = BitReaderLtr::new(&[0b0110_0000]);

        assert_eq!(bs.read_codebook(&codebook), Some((2, 2)));
        assert_eq!(bs.read_codebook(&codebook), None);
    }
}
