//! Block module - a shape instance bound to syllables and a color
//!
//! Blocks are values: rotation never mutates, it returns a new block with the
//! next rotation state. Prior states stay usable for previews and undo.

use arrayvec::ArrayVec;

use crate::core::shapes::{mask_at, Mask, ShapeKind};
use crate::types::{BlockColor, Rotation};

/// A placeable block: shape, syllables, color, rotation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: u32,
    kind: ShapeKind,
    /// One syllable per mask cell; chars[k] is bound to mask cell k
    chars: ArrayVec<char, 4>,
    color: BlockColor,
    rotation: Rotation,
    is_bomb: bool,
}

impl Block {
    /// Create a block in spawn orientation.
    ///
    /// # Panics
    ///
    /// Panics when the character count does not match the shape size; the
    /// generator owns that invariant and a mismatch is a programming error.
    pub fn new(id: u32, kind: ShapeKind, chars: &[char], color: BlockColor) -> Self {
        assert_eq!(
            chars.len(),
            kind.size(),
            "block {id}: {} chars for a {}-cell shape",
            chars.len(),
            kind.size()
        );
        Self {
            id,
            kind,
            chars: chars.iter().copied().collect(),
            color,
            rotation: Rotation::Deg0,
            is_bomb: false,
        }
    }

    /// Mark this block as a bomb
    pub fn into_bomb(mut self) -> Self {
        self.is_bomb = true;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn is_bomb(&self) -> bool {
        self.is_bomb
    }

    /// Number of cells
    pub fn size(&self) -> usize {
        self.kind.size()
    }

    /// Syllables in mask-cell order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Mask offsets for the current rotation state.
    ///
    /// The k-th offset carries the k-th character: the transform permutes
    /// coordinates, never the binding, so a rotated block shows a genuine
    /// quarter turn rather than a relabeling.
    pub fn cells(&self) -> Mask {
        mask_at(self.kind, self.rotation)
    }

    /// A new block rotated one quarter turn clockwise
    pub fn rotated(&self) -> Self {
        let mut next = self.clone();
        next.rotation = self.rotation.rotate_cw();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Block {
        Block::new(7, ShapeKind::ThreeL, &['가', '나', '다'], BlockColor::Blue)
    }

    #[test]
    fn test_new_block_spawn_state() {
        let b = sample();
        assert_eq!(b.rotation(), Rotation::Deg0);
        assert_eq!(b.chars(), &['가', '나', '다']);
        assert!(!b.is_bomb());
    }

    #[test]
    #[should_panic(expected = "chars for a")]
    fn test_char_count_mismatch_panics() {
        Block::new(1, ShapeKind::Two, &['가'], BlockColor::Red);
    }

    #[test]
    fn test_rotated_is_a_new_value() {
        let b = sample();
        let r = b.rotated();
        assert_eq!(b.rotation(), Rotation::Deg0);
        assert_eq!(r.rotation(), Rotation::Deg90);
        // Binding is positional, so characters are untouched
        assert_eq!(r.chars(), b.chars());
    }

    #[test]
    fn test_four_rotations_reproduce_block() {
        let b = sample();
        let back = b.rotated().rotated().rotated().rotated();
        assert_eq!(back, b);
        assert_eq!(back.cells(), b.cells());
    }

    #[test]
    fn test_character_follows_cell_through_rotation() {
        let b = sample();
        // '나' sits on mask cell 1 at (1,0); after one cw turn the same
        // mask cell moves to (0,0)
        assert_eq!(b.cells()[1], (1, 0));
        let r = b.rotated();
        assert_eq!(r.cells()[1], (0, 0));
        assert_eq!(r.chars()[1], '나');
    }

    #[test]
    fn test_bomb_flag() {
        let b = Block::new(9, ShapeKind::One, &['폭'], BlockColor::Red).into_bomb();
        assert!(b.is_bomb());
    }
}
