//! Variable blocks of the factorization `A ≈ Y·X`.

use std::fmt;

/// The factor that is free in a given subproblem.
///
/// Exactly one block is the optimization variable per iteration; the other
/// is held fixed at its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// Left factor Y (m×k)
    Left,
    /// Right factor X (k×n)
    Right,
}

impl Block {
    /// Block solved for at the given one-based iteration.
    ///
    /// Odd iterations solve for X, even iterations for Y.
    pub fn for_iteration(iteration: usize) -> Self {
        if iteration % 2 == 1 {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Shape of this block for an m×n target with inner rank k.
    pub fn shape(self, rows: usize, cols: usize, rank: usize) -> (usize, usize) {
        match self {
            Self::Left => (rows, rank),
            Self::Right => (rank, cols),
        }
    }

    /// Conventional symbol of the factor.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Left => "Y",
            Self::Right => "X",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_alternate() {
        assert_eq!(Block::for_iteration(1), Block::Right);
        assert_eq!(Block::for_iteration(2), Block::Left);
        for i in 1..20 {
            assert_ne!(Block::for_iteration(i + 1), Block::for_iteration(i));
        }
    }

    #[test]
    fn test_shapes() {
        assert_eq!(Block::Left.shape(10, 8, 3), (10, 3));
        assert_eq!(Block::Right.shape(10, 8, 3), (3, 8));
        assert_eq!(Block::Left.to_string(), "Y");
        assert_eq!(Block::Right.to_string(), "X");
    }
}
