//! Corner roles of a cube cell and the 8-bit configuration byte.
//!
//! ```text
//!        BUL───────BUR         Bit weights:
//!        /│        /│            BLL=1   BLR=2   BUR=4   BUL=8
//!     FUL─┼─────FUR │            FLL=16  FLR=32  FUR=64  FUL=128
//!      │ BLL──────┼BLR
//!      │/         │/           +Y (up)
//!     FLL───────FLR              │  +Z (back)
//!                                │ /
//!                                └───+X (right)
//! ```
//!
//! The anchor of every cell is its front-low-left node. Moving back is +1 on
//! the fastest varying lattice axis (z), up is +Z (y) and right is +Y*Z (x).

/// One of the 8 named corners of a cube cell.
///
/// The discriminant is the bit index of the corner in the configuration byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
  BackLowLeft = 0,
  BackLowRight = 1,
  BackUpRight = 2,
  BackUpLeft = 3,
  FrontLowLeft = 4,
  FrontLowRight = 5,
  FrontUpRight = 6,
  FrontUpLeft = 7,
}

impl Corner {
  /// All corners in bit order.
  pub const ALL: [Corner; 8] = [
    Corner::BackLowLeft,
    Corner::BackLowRight,
    Corner::BackUpRight,
    Corner::BackUpLeft,
    Corner::FrontLowLeft,
    Corner::FrontLowRight,
    Corner::FrontUpRight,
    Corner::FrontUpLeft,
  ];

  /// Corner for a bit index (only the low 3 bits are used).
  #[inline]
  pub const fn from_bit(bit: u8) -> Corner {
    Self::ALL[(bit & 7) as usize]
  }

  #[inline]
  pub const fn bit(self) -> u8 {
    self as u8
  }

  /// Weight of this corner in the configuration byte.
  #[inline]
  pub const fn weight(self) -> u8 {
    1 << self as u8
  }

  /// Position inside the unit cube as `[x, y, z]`.
  pub const fn offset(self) -> [u8; 3] {
    match self {
      Corner::BackLowLeft => [0, 0, 1],
      Corner::BackLowRight => [1, 0, 1],
      Corner::BackUpRight => [1, 1, 1],
      Corner::BackUpLeft => [0, 1, 1],
      Corner::FrontLowLeft => [0, 0, 0],
      Corner::FrontLowRight => [1, 0, 0],
      Corner::FrontUpRight => [1, 1, 0],
      Corner::FrontUpLeft => [0, 1, 0],
    }
  }

  /// Flat node index of this corner relative to the cell anchor, for a lattice
  /// with `[X, Y, Z]` nodes laid out x-major with z fastest.
  #[inline]
  pub const fn lattice_offset(self, dims: [usize; 3]) -> usize {
    let [x, y, z] = self.offset();
    x as usize * dims[1] * dims[2] + y as usize * dims[2] + z as usize
  }

  /// Short label used in debug output (`"FUL"`, `"BLR"`, ...).
  pub const fn label(self) -> &'static str {
    match self {
      Corner::BackLowLeft => "BLL",
      Corner::BackLowRight => "BLR",
      Corner::BackUpRight => "BUR",
      Corner::BackUpLeft => "BUL",
      Corner::FrontLowLeft => "FLL",
      Corner::FrontLowRight => "FLR",
      Corner::FrontUpRight => "FUR",
      Corner::FrontUpLeft => "FUL",
    }
  }
}

/// Build the configuration byte from 8 active flags indexed by corner bit.
#[inline]
pub const fn configuration(active: [bool; 8]) -> u8 {
  let mut value = 0u8;
  let mut bit = 0;
  while bit < 8 {
    if active[bit] {
      value |= 1 << bit;
    }
    bit += 1;
  }
  value
}

/// Corners set in a configuration byte, in bit order.
pub fn corners_of(configuration: u8) -> impl Iterator<Item = Corner> {
  Corner::ALL
    .into_iter()
    .filter(move |corner| configuration & corner.weight() != 0)
}

#[cfg(test)]
#[path = "corner_test.rs"]
mod corner_test;
