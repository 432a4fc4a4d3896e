//! Shapes module - block shape catalog and rotation transform
//!
//! Every shape is a normalized mask of (row, col) offsets: the mask touches
//! row 0 and col 0, cells are listed in reading order, and the character at
//! chars[k] stays bound to mask cell k through every rotation. The clockwise
//! transform maps (r, c) to (c, h-1-r) for a mask of row extent h, so four
//! applications reproduce the original mask cell-for-cell.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{MaskOffset, Rotation};

/// Rotated mask, at most four cells
pub type Mask = ArrayVec<MaskOffset, 4>;

/// Block shape catalog, grouped by cell count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Single cell
    One,
    /// Horizontal pair
    Two,
    /// Horizontal triple
    ThreeI,
    /// Corner triple
    ThreeL,
    /// Horizontal quad
    FourI,
    /// Square
    FourO,
    /// L-quad
    FourL,
    /// Skew quad
    FourS,
    /// T-quad
    FourT,
}

/// Shapes with exactly one cell
const SIZE_1: [ShapeKind; 1] = [ShapeKind::One];
/// Shapes with exactly two cells
const SIZE_2: [ShapeKind; 1] = [ShapeKind::Two];
/// Shapes with exactly three cells
const SIZE_3: [ShapeKind; 2] = [ShapeKind::ThreeI, ShapeKind::ThreeL];
/// Shapes with exactly four cells
const SIZE_4: [ShapeKind; 5] = [
    ShapeKind::FourI,
    ShapeKind::FourO,
    ShapeKind::FourL,
    ShapeKind::FourS,
    ShapeKind::FourT,
];

impl ShapeKind {
    /// Spawn-orientation mask, normalized to touch row 0 and col 0
    pub fn base_mask(&self) -> &'static [MaskOffset] {
        match self {
            ShapeKind::One => &[(0, 0)],
            ShapeKind::Two => &[(0, 0), (0, 1)],
            ShapeKind::ThreeI => &[(0, 0), (0, 1), (0, 2)],
            ShapeKind::ThreeL => &[(0, 0), (1, 0), (1, 1)],
            ShapeKind::FourI => &[(0, 0), (0, 1), (0, 2), (0, 3)],
            ShapeKind::FourO => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            ShapeKind::FourL => &[(0, 0), (1, 0), (2, 0), (2, 1)],
            ShapeKind::FourS => &[(0, 1), (0, 2), (1, 0), (1, 1)],
            ShapeKind::FourT => &[(0, 0), (0, 1), (0, 2), (1, 1)],
        }
    }

    /// Number of cells in this shape
    pub fn size(&self) -> usize {
        self.base_mask().len()
    }
}

/// All shape variants with exactly `size` cells.
///
/// # Panics
///
/// Panics for sizes outside 1..=4; asking for an undefined size is a
/// programming error, not a recoverable condition.
pub fn shapes_for_size(size: usize) -> &'static [ShapeKind] {
    match size {
        1 => &SIZE_1,
        2 => &SIZE_2,
        3 => &SIZE_3,
        4 => &SIZE_4,
        _ => panic!("undefined shape size: {size}"),
    }
}

/// Pick a shape of the given size uniformly
pub fn random_shape(size: usize, rng: &mut SimpleRng) -> ShapeKind {
    let variants = shapes_for_size(size);
    variants[rng.pick_index(variants.len())]
}

/// Rotate a mask one quarter turn clockwise.
///
/// Cell order is preserved, which keeps character bindings intact.
pub fn rotate_mask_cw(mask: &[MaskOffset]) -> Mask {
    let h = mask.iter().map(|&(r, _)| r).max().unwrap_or(0) + 1;
    mask.iter().map(|&(r, c)| (c, h - 1 - r)).collect()
}

/// Mask for a shape at the given rotation state
pub fn mask_at(kind: ShapeKind, rotation: Rotation) -> Mask {
    let mut mask: Mask = kind.base_mask().iter().copied().collect();
    for _ in 0..rotation.quarter_turns() {
        mask = rotate_mask_cw(&mask);
    }
    mask
}
