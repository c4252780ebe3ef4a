//! Configuration byte to face-group tables, generated at compile time.
//!
//! Each of the 256 entries is an ordered list of *face groups*: planar patches
//! of 3 or 4 corners drawn as a triangle fan. A sealed face resets the vertex
//! cache of the cell once emitted, so the next group of the same cell gets
//! fresh vertices and shades with a hard edge.
//!
//! # Exterior table
//!
//! The faces of the convex hull of the active corners. A cube corner set is
//! always one of:
//!
//! ```text
//! active  shape                      faces  triangles
//! ──────  ─────────────────────────  ─────  ─────────
//!  0-2    nothing                      0        0
//!   3     corner cut (double sided)    2        2
//!   4     face or slab (double sided)  2        4
//!   4     tetrahedron / bent           4        4
//!   5     pyramid / wedge            5-6        6
//!   6     prism                      5-8        8
//!   7     cube minus a corner          7       10
//!   8     cube                         6       12
//! ```
//!
//! A coplanar active set has no inside, so both windings are emitted as two
//! separate groups. Quads split on the plane's default diagonal unless the
//! configuration is listed in [`DIAGONAL_OVERRIDES`].
//!
//! # Interior table
//!
//! For a viewer inside a hollow shell only the cavity walls matter:
//!
//! - 3 active corners on one cube face: one triangle facing the cell center,
//!   sharing vertices with whatever comes next.
//! - active set made of whole cube faces (not all 8 corners): each face as an
//!   inward facing quad.
//! - anything else: nothing.
//!
//! # Winding
//!
//! For a triangle `(a, b, c)` the normal is `(b - a) × (c - a)`, which points
//! away from the solid (exterior) or towards the cell center (interior).

use crate::corner::Corner;

/// Maximum number of face groups in a single table entry.
pub const MAX_FACES: usize = 8;

/// Corner masks of the 6 cube faces: back, low, right, left, up, front.
pub const CUBE_FACES: [u8; 6] = [0x0f, 0x33, 0x66, 0x99, 0xcc, 0xf0];

/// Default diagonal used to split each planar 4-corner set into two triangles.
///
/// The first 6 rows are the cube faces in [`CUBE_FACES`] order, the other 6
/// the diagonal slabs.
pub const QUAD_DIAGONALS: [(u8, Corner, Corner); 12] = [
  (0x0f, Corner::BackLowLeft, Corner::BackUpRight),
  (0x33, Corner::BackLowLeft, Corner::FrontLowRight),
  (0x66, Corner::BackUpRight, Corner::FrontLowRight),
  (0x99, Corner::BackLowLeft, Corner::FrontUpLeft),
  (0xcc, Corner::BackUpLeft, Corner::FrontUpRight),
  (0xf0, Corner::FrontLowRight, Corner::FrontUpLeft),
  (0x3c, Corner::BackUpRight, Corner::FrontLowLeft),
  (0x69, Corner::BackLowLeft, Corner::FrontUpRight),
  (0x96, Corner::BackLowRight, Corner::FrontUpLeft),
  (0xaa, Corner::BackLowRight, Corner::FrontUpLeft),
  (0x55, Corner::BackLowLeft, Corner::FrontUpRight),
  (0xc3, Corner::BackLowRight, Corner::FrontUpLeft),
];

/// Configurations that split a planar set on the other diagonal:
/// `(config, plane mask, d0, d1)`.
pub const DIAGONAL_OVERRIDES: [(u8, u8, Corner, Corner); 17] = [
  (61, 0x3c, Corner::FrontLowRight, Corner::BackUpLeft),
  (62, 0x3c, Corner::FrontLowRight, Corner::BackUpLeft),
  (85, 0x55, Corner::FrontLowLeft, Corner::BackUpRight),
  (87, 0x55, Corner::FrontLowLeft, Corner::BackUpRight),
  (107, 0x69, Corner::BackUpLeft, Corner::FrontLowRight),
  (109, 0x69, Corner::BackUpLeft, Corner::FrontLowRight),
  (117, 0x55, Corner::FrontLowLeft, Corner::BackUpRight),
  (159, 0x96, Corner::BackUpRight, Corner::FrontLowLeft),
  (207, 0xc3, Corner::FrontUpRight, Corner::BackLowLeft),
  (211, 0xc3, Corner::BackLowLeft, Corner::FrontUpRight),
  (222, 0xcc, Corner::BackUpRight, Corner::FrontUpLeft),
  (227, 0xc3, Corner::BackLowLeft, Corner::FrontUpRight),
  (238, 0xaa, Corner::BackUpLeft, Corner::FrontLowRight),
  (243, 0xc3, Corner::FrontUpRight, Corner::BackLowLeft),
  (246, 0x96, Corner::FrontLowLeft, Corner::BackUpRight),
  (249, 0x69, Corner::BackUpLeft, Corner::FrontLowRight),
  (252, 0x3c, Corner::BackUpLeft, Corner::FrontLowRight),
];

/// Diagonal `(d0, d1)` that splits the planar set `mask` in `config`.
pub const fn quad_diagonal(config: u8, mask: u8) -> (Corner, Corner) {
  let mut i = 0;
  while i < DIAGONAL_OVERRIDES.len() {
    let (c, m, d0, d1) = DIAGONAL_OVERRIDES[i];
    if c == config && m == mask {
      return (d0, d1);
    }
    i += 1;
  }

  i = 0;
  while i < QUAD_DIAGONALS.len() {
    let (m, d0, d1) = QUAD_DIAGONALS[i];
    if m == mask {
      return (d0, d1);
    }
    i += 1;
  }
  panic!("planar corner set without a quad diagonal");
}

/// A planar group of 3 or 4 corners, ordered for a fan from the first corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
  corners: [Corner; 4],
  len: u8,
  seal: bool,
}

impl Face {
  const EMPTY: Face = Face {
    corners: [Corner::BackLowLeft; 4],
    len: 0,
    seal: false,
  };

  /// Corners in fan order.
  #[inline]
  pub fn corners(&self) -> &[Corner] {
    &self.corners[..self.len as usize]
  }

  /// Whether the cell's vertex cache is reset after this face.
  #[inline]
  pub const fn is_sealed(&self) -> bool {
    self.seal
  }

  #[inline]
  pub const fn triangle_count(&self) -> usize {
    (self.len as usize).saturating_sub(2)
  }

  /// Fan triangles: `(c0, c1, c2)`, `(c0, c2, c3)`.
  pub fn triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
    let first = self.corners[0];
    (1..(self.len as usize).saturating_sub(1))
      .map(move |i| [first, self.corners[i], self.corners[i + 1]])
  }
}

/// All face groups emitted for one configuration byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellFaces {
  faces: [Face; MAX_FACES],
  len: u8,
}

impl CellFaces {
  const EMPTY: CellFaces = CellFaces {
    faces: [Face::EMPTY; MAX_FACES],
    len: 0,
  };

  #[inline]
  pub fn faces(&self) -> &[Face] {
    &self.faces[..self.len as usize]
  }

  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn triangle_count(&self) -> usize {
    self.faces().iter().map(Face::triangle_count).sum()
  }

  /// Every triangle of every face, in emission order.
  pub fn triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
    self.faces().iter().flat_map(|face| face.triangles())
  }

  const fn with_face(mut self, face: Face) -> Self {
    if (self.len as usize) < MAX_FACES {
      self.faces[self.len as usize] = face;
      self.len += 1;
    }
    self
  }
}

/// Which of the two tables a shell triangulates with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
  Interior,
  Exterior,
}

impl TableKind {
  #[inline]
  pub fn table(self) -> &'static [CellFaces; 256] {
    match self {
      TableKind::Interior => &INTERIOR_TABLE,
      TableKind::Exterior => &EXTERIOR_TABLE,
    }
  }
}

/// Solid exterior skin, one entry per configuration byte.
pub static EXTERIOR_TABLE: [CellFaces; 256] = generate_exterior_table();

/// Hollow interior walls, one entry per configuration byte.
pub static INTERIOR_TABLE: [CellFaces; 256] = generate_interior_table();

// =============================================================================
// Compile-time generation
// =============================================================================

const fn generate_exterior_table() -> [CellFaces; 256] {
  let mut table = [CellFaces::EMPTY; 256];
  let mut config = 0usize;

  while config < 256 {
    table[config] = hull_faces(config as u8);
    config += 1;
  }

  table
}

const fn generate_interior_table() -> [CellFaces; 256] {
  let mut table = [CellFaces::EMPTY; 256];
  let mut config = 0usize;

  while config < 256 {
    table[config] = cavity_faces(config as u8);
    config += 1;
  }

  table
}

/// Hull faces keyed by (plane corner mask, normal sign) so that every triple
/// spanning the same face only contributes it once.
struct HullBuilder {
  config: u8,
  cell: CellFaces,
  masks: [u8; 16],
  signs: [[i32; 3]; 16],
  seen: usize,
}

impl HullBuilder {
  const fn new(config: u8) -> Self {
    Self {
      config,
      cell: CellFaces::EMPTY,
      masks: [0; 16],
      signs: [[0; 3]; 16],
      seen: 0,
    }
  }

  const fn with_plane(mut self, mask: u8, outward: [i32; 3]) -> Self {
    let sign = [
      outward[0].signum(),
      outward[1].signum(),
      outward[2].signum(),
    ];

    let mut i = 0;
    while i < self.seen {
      if self.masks[i] == mask
        && self.signs[i][0] == sign[0]
        && self.signs[i][1] == sign[1]
        && self.signs[i][2] == sign[2]
      {
        return self;
      }
      i += 1;
    }

    if self.seen < 16 {
      self.masks[self.seen] = mask;
      self.signs[self.seen] = sign;
      self.seen += 1;
    }
    self.cell = self.cell.with_face(oriented_face(self.config, mask, outward, true));
    self
  }
}

const fn hull_faces(config: u8) -> CellFaces {
  if config.count_ones() < 3 {
    return CellFaces::EMPTY;
  }

  let mut hull = HullBuilder::new(config);
  let mut i = 0u8;
  while i < 8 {
    let mut j = i + 1;
    while is_set(config, i) && j < 8 {
      let mut k = j + 1;
      while is_set(config, j) && k < 8 {
        if is_set(config, k) {
          hull = support_plane(hull, config, i, j, k);
        }
        k += 1;
      }
      j += 1;
    }
    i += 1;
  }

  hull.cell
}

/// Adds the plane through corners `i`, `j`, `k` if every active corner lies
/// on one side of it. A plane holding every active corner is added twice.
const fn support_plane(mut hull: HullBuilder, config: u8, i: u8, j: u8, k: u8) -> HullBuilder {
  let origin = position(i);
  let normal = cross(sub(position(j), origin), sub(position(k), origin));
  if normal[0] == 0 && normal[1] == 0 && normal[2] == 0 {
    return hull;
  }

  let mut above = 0;
  let mut below = 0;
  let mut plane = 0u8;
  let mut p = 0u8;
  while p < 8 {
    if is_set(config, p) {
      let d = dot(normal, sub(position(p), origin));
      if d > 0 {
        above += 1;
      } else if d < 0 {
        below += 1;
      } else {
        plane |= 1 << p;
      }
    }
    p += 1;
  }

  if above == 0 {
    hull = hull.with_plane(plane, normal);
  }
  if below == 0 {
    hull = hull.with_plane(plane, neg(normal));
  }
  hull
}

const fn cavity_faces(config: u8) -> CellFaces {
  let mut cell = CellFaces::EMPTY;

  if config.count_ones() == 3 {
    let mut f = 0;
    while f < CUBE_FACES.len() {
      if config & CUBE_FACES[f] == config {
        // Points towards the cell center; doubled coordinates keep it integral.
        let corners = corner_list(config);
        let a = position(corners[0]);
        let inward = [1 - 2 * a[0], 1 - 2 * a[1], 1 - 2 * a[2]];
        return cell.with_face(oriented_face(config, config, inward, false));
      }
      f += 1;
    }
    return cell;
  }

  if config == 0xff {
    return cell;
  }

  let mut covered = 0u8;
  let mut f = 0;
  while f < CUBE_FACES.len() {
    if config & CUBE_FACES[f] == CUBE_FACES[f] {
      covered |= CUBE_FACES[f];
    }
    f += 1;
  }
  if covered == 0 || covered != config {
    return cell;
  }

  f = 0;
  while f < CUBE_FACES.len() {
    let mask = CUBE_FACES[f];
    if config & mask == mask {
      // 4 * center minus the sum of the face corners.
      let corners = corner_list(mask);
      let mut inward = [2, 2, 2];
      let mut c = 0;
      while c < 4 {
        let p = position(corners[c]);
        inward[0] -= p[0];
        inward[1] -= p[1];
        inward[2] -= p[2];
        c += 1;
      }
      cell = cell.with_face(oriented_face(config, mask, inward, true));
    }
    f += 1;
  }

  cell
}

/// Orders the corners of `mask` so the fan winds around `normal`.
const fn oriented_face(config: u8, mask: u8, normal: [i32; 3], seal: bool) -> Face {
  let corners = corner_list(mask);
  let mut face = Face::EMPTY;
  face.seal = seal;

  if mask.count_ones() == 3 {
    let (a, mut b, mut c) = (corners[0], corners[1], corners[2]);
    if winding(a, b, c, normal) < 0 {
      let t = b;
      b = c;
      c = t;
    }
    face.corners = [
      Corner::from_bit(a),
      Corner::from_bit(b),
      Corner::from_bit(c),
      Corner::from_bit(a),
    ];
    face.len = 3;
    return face;
  }

  let (d0, d1) = quad_diagonal(config, mask);
  let (d0, d1) = (d0 as u8, d1 as u8);
  let mut others = [0u8; 2];
  let mut n = 0;
  let mut c = 0;
  while c < 4 {
    if corners[c] != d0 && corners[c] != d1 {
      others[n] = corners[c];
      n += 1;
    }
    c += 1;
  }

  let (mut ea, mut eb) = (others[0], others[1]);
  if winding(d0, ea, d1, normal) < 0 {
    let t = ea;
    ea = eb;
    eb = t;
  }

  face.corners = [
    Corner::from_bit(d0),
    Corner::from_bit(ea),
    Corner::from_bit(d1),
    Corner::from_bit(eb),
  ];
  face.len = 4;
  face
}

/// Sign of `((b - a) × (c - a)) · normal`.
const fn winding(a: u8, b: u8, c: u8, normal: [i32; 3]) -> i32 {
  let pa = position(a);
  dot(cross(sub(position(b), pa), sub(position(c), pa)), normal)
}

/// Bit indices set in `mask`, ascending. Unused slots are 0.
const fn corner_list(mask: u8) -> [u8; 8] {
  let mut out = [0u8; 8];
  let mut n = 0;
  let mut bit = 0u8;
  while bit < 8 {
    if is_set(mask, bit) {
      out[n] = bit;
      n += 1;
    }
    bit += 1;
  }
  out
}

#[inline(always)]
const fn is_set(mask: u8, bit: u8) -> bool {
  (mask >> bit) & 1 == 1
}

#[inline(always)]
const fn position(bit: u8) -> [i32; 3] {
  let o = Corner::from_bit(bit).offset();
  [o[0] as i32, o[1] as i32, o[2] as i32]
}

#[inline(always)]
const fn sub(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
  [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline(always)]
const fn neg(a: [i32; 3]) -> [i32; 3] {
  [-a[0], -a[1], -a[2]]
}

#[inline(always)]
const fn cross(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
  [
    a[1] * b[2] - a[2] * b[1],
    a[2] * b[0] - a[0] * b[2],
    a[0] * b[1] - a[1] * b[0],
  ]
}

#[inline(always)]
const fn dot(a: [i32; 3], b: [i32; 3]) -> i32 {
  a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tables_test;
