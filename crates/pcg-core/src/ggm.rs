//! Half-tree GGM expansion.
//!
//! Implements the tree expansion of the [`Half-Tree`](https://eprint.iacr.org/2022/1431.pdf)
//! construction: a node `s` expands into `left = H(s)` and `right = s ⊕ left`, where `H` is the
//! circular correlation-robust hash [`FixedKeyAes::ccr`](crate::aes::FixedKeyAes::ccr).
//!
//! Since every parent is the XOR of its children, the XOR of all nodes in a level is the same for
//! every level. Rooting level 1 at `(k, k ⊕ Δ)` makes that XOR equal to `Δ`, so the XOR of the
//! left children `K0` and of the right children `K1` of any level satisfy `K1 = K0 ⊕ Δ`. This is
//! exactly a COT correlation, which is why a single block per level suffices to let the
//! punctured party recover its half.

use crate::{aes::FIXED_KEY_AES, Block};

/// The children of an expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    /// Left child.
    pub left: Block,
    /// Right child.
    pub right: Block,
    /// Control bit, the least significant bit of the left child.
    pub control: bool,
}

/// Expands `seed` into its two children.
#[inline]
pub fn expand(seed: Block) -> Expansion {
    let left = FIXED_KEY_AES.ccr(seed);

    Expansion {
        left,
        right: seed ^ left,
        control: left.lsb(),
    }
}

/// A half-tree of a fixed depth.
///
/// The tree is stored in a caller-owned arena of `2^depth` blocks. Level `l` occupies the first
/// `2^l` positions and is expanded in place into level `l + 1`.
#[derive(Debug, Clone, Copy)]
pub struct HalfTree {
    depth: usize,
}

impl HalfTree {
    /// Creates a new half-tree description.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    #[inline]
    pub fn new(depth: usize) -> Self {
        assert!(depth > 0, "half-tree depth must be positive");
        Self { depth }
    }

    /// Returns the depth of the tree.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of leaves of the tree.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        1 << self.depth
    }

    /// Sets level 1 of a full tree to `(key, key ⊕ delta)`.
    #[inline]
    pub fn init(&self, tree: &mut [Block], key: Block, delta: Block) {
        assert_eq!(tree.len(), self.leaf_count());

        tree[0] = key;
        tree[1] = key ^ delta;
    }

    /// Expands `level - 1` into `level`, returning the XOR of the left children.
    pub fn expand_level(&self, tree: &mut [Block], level: usize) -> Block {
        assert_eq!(tree.len(), self.leaf_count());
        assert!((2..=self.depth).contains(&level));

        let parents = 1 << (level - 1);

        let mut k0 = Block::ZERO;
        for i in (0..parents).rev() {
            let Expansion { left, right, .. } = expand(tree[i]);
            tree[2 * i] = left;
            tree[2 * i + 1] = right;
            k0 ^= left;
        }

        k0
    }

    /// Sets level 1 of a punctured tree.
    ///
    /// The node selected by `alpha_bit` is unknown and zeroed, its sibling is `key`.
    #[inline]
    pub fn init_punctured(&self, tree: &mut [Block], key: Block, alpha_bit: bool) {
        assert_eq!(tree.len(), self.leaf_count());

        tree[alpha_bit as usize] = Block::ZERO;
        tree[!alpha_bit as usize] = key;
    }

    /// Expands `level - 1` of a punctured tree into `level`.
    ///
    /// Every node except the punctured node `path` of `level - 1` is expanded. The children of
    /// `path` are zeroed, then the child not selected by `alpha_bit` is recovered from `k`, the XOR
    /// of all the children on its side.
    pub fn reconstruct_level(
        &self,
        tree: &mut [Block],
        level: usize,
        path: usize,
        alpha_bit: bool,
        k: Block,
    ) {
        assert_eq!(tree.len(), self.leaf_count());
        assert!((2..=self.depth).contains(&level));

        let parents = 1 << (level - 1);
        assert!(path < parents);

        for i in (0..parents).rev() {
            if i == path {
                tree[2 * i] = Block::ZERO;
                tree[2 * i + 1] = Block::ZERO;
            } else {
                let Expansion { left, right, .. } = expand(tree[i]);
                tree[2 * i] = left;
                tree[2 * i + 1] = right;
            }
        }

        let side = !alpha_bit as usize;
        let sibling = 2 * path + side;
        tree[sibling] = (side..2 * parents)
            .step_by(2)
            .fold(k, |acc, j| acc ^ tree[j]);
    }

    /// Generates a full tree, writing the left-sum of each level into `k0`.
    ///
    /// `k0[0]` is `key` and `k0[i]` is the XOR of the left nodes of level `i + 1`.
    pub fn gen(&self, key: Block, delta: Block, tree: &mut [Block], k0: &mut [Block]) {
        assert_eq!(k0.len(), self.depth);

        self.init(tree, key, delta);
        k0[0] = key;
        for level in 2..=self.depth {
            k0[level - 1] = self.expand_level(tree, level);
        }
    }

    /// Reconstructs a full tree except the leaf at `alpha`, which is left zeroed.
    ///
    /// `k[i]` is the XOR of the nodes of level `i + 1` on the side opposite to the `i`-th
    /// (most significant first) bit of `alpha`.
    pub fn reconstruct(&self, tree: &mut [Block], k: &[Block], alpha: usize) {
        assert_eq!(k.len(), self.depth);
        assert!(alpha < self.leaf_count());

        let bit = |level: usize| (alpha >> (self.depth - level)) & 1 == 1;

        self.init_punctured(tree, k[0], bit(1));
        for level in 2..=self.depth {
            let path = alpha >> (self.depth - level + 1);
            self.reconstruct_level(tree, level, path, bit(level), k[level - 1]);
        }
    }
}
