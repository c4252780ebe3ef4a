use super::*;
use crate::corner::Corner::*;

fn pos(corner: Corner) -> [i32; 3] {
  let o = corner.offset();
  [o[0] as i32, o[1] as i32, o[2] as i32]
}

fn normal_of(tri: [Corner; 3]) -> [i32; 3] {
  let a = pos(tri[0]);
  cross(sub(pos(tri[1]), a), sub(pos(tri[2]), a))
}

fn face_corners(cell: &CellFaces) -> Vec<Vec<Corner>> {
  cell.faces().iter().map(|f| f.corners().to_vec()).collect()
}

fn is_coplanar(config: u8) -> bool {
  config.count_ones() == 3 || QUAD_DIAGONALS.iter().any(|&(mask, _, _)| mask == config)
}

#[test]
fn test_degenerate_configurations_are_empty() {
  for config in 0u16..=255 {
    let config = config as u8;
    if config.count_ones() < 3 {
      assert!(EXTERIOR_TABLE[config as usize].is_empty(), "exterior {}", config);
      assert!(INTERIOR_TABLE[config as usize].is_empty(), "interior {}", config);
    }
  }
}

#[test]
fn test_full_cube_is_six_quads() {
  let cell = &EXTERIOR_TABLE[255];
  assert_eq!(cell.faces().len(), 6);
  assert_eq!(cell.triangle_count(), 12);
  assert!(cell.faces().iter().all(|f| f.corners().len() == 4 && f.is_sealed()));

  assert_eq!(
    face_corners(cell),
    vec![
      vec![BackLowLeft, BackLowRight, BackUpRight, BackUpLeft],
      vec![BackLowLeft, FrontLowLeft, FrontLowRight, BackLowRight],
      vec![BackLowLeft, BackUpLeft, FrontUpLeft, FrontLowLeft],
      vec![BackUpRight, BackLowRight, FrontLowRight, FrontUpRight],
      vec![BackUpLeft, BackUpRight, FrontUpRight, FrontUpLeft],
      vec![FrontLowRight, FrontLowLeft, FrontUpLeft, FrontUpRight],
    ]
  );
}

#[test]
fn test_exterior_triangle_counts_by_active_corners() {
  for config in 0u16..=255 {
    let config = config as u8;
    let cell = &EXTERIOR_TABLE[config as usize];
    let expected = match config.count_ones() {
      0..=2 => 0,
      3 => 2,
      4 => 4,
      5 => 6,
      6 => 8,
      7 => 10,
      _ => 12,
    };
    assert_eq!(cell.triangle_count(), expected, "config {}", config);
    assert!(cell.faces().len() <= MAX_FACES);
  }
}

#[test]
fn test_corner_cut_is_double_sided() {
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[7]),
    vec![
      vec![BackLowLeft, BackLowRight, BackUpRight],
      vec![BackLowLeft, BackUpRight, BackLowRight],
    ]
  );
}

#[test]
fn test_tetrahedron_faces() {
  // BLL, BLR, BUR, FLL
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[23]),
    vec![
      vec![BackLowLeft, BackLowRight, BackUpRight],
      vec![BackLowLeft, FrontLowLeft, BackLowRight],
      vec![BackLowLeft, BackUpRight, FrontLowLeft],
      vec![BackLowRight, FrontLowLeft, BackUpRight],
    ]
  );
}

#[test]
fn test_planar_sets_emit_both_windings() {
  for &(mask, _, _) in QUAD_DIAGONALS.iter() {
    let cell = &EXTERIOR_TABLE[mask as usize];
    assert_eq!(cell.faces().len(), 2, "mask {:#04x}", mask);
    let n0 = normal_of(cell.faces()[0].triangles().next().unwrap());
    let n1 = normal_of(cell.faces()[1].triangles().next().unwrap());
    assert_eq!(n0, neg(n1), "mask {:#04x}", mask);
  }
}

#[test]
fn test_exterior_winding_points_away_from_solid() {
  for config in 0u16..=255 {
    let config = config as u8;
    if config.count_ones() < 3 || is_coplanar(config) {
      continue;
    }

    let active: Vec<_> = crate::corner::corners_of(config).collect();
    // Centroid scaled by the corner count to stay integral.
    let mut centroid = [0i32; 3];
    for &corner in &active {
      let p = pos(corner);
      for axis in 0..3 {
        centroid[axis] += p[axis];
      }
    }
    let count = active.len() as i32;

    for tri in EXTERIOR_TABLE[config as usize].triangles() {
      let a = pos(tri[0]);
      let to_center = [
        centroid[0] - count * a[0],
        centroid[1] - count * a[1],
        centroid[2] - count * a[2],
      ];
      assert!(
        dot(normal_of(tri), to_center) < 0,
        "config {} triangle {:?} faces inwards",
        config,
        tri
      );
    }
  }
}

#[test]
fn test_quads_split_on_preferred_diagonal() {
  for config in 0u16..=255 {
    let config = config as u8;
    for face in EXTERIOR_TABLE[config as usize].faces() {
      let corners = face.corners();
      if corners.len() != 4 {
        continue;
      }
      let mask = corners.iter().fold(0u8, |m, c| m | c.weight());
      let (d0, d1) = quad_diagonal(config, mask);
      assert_eq!((corners[0], corners[2]), (d0, d1), "config {}", config);
    }
  }
}

#[test]
fn test_diagonal_overrides_only_touch_their_config() {
  for &(config, mask, d0, d1) in DIAGONAL_OVERRIDES.iter() {
    assert_eq!(quad_diagonal(config, mask), (d0, d1));
    let default = QUAD_DIAGONALS.iter().find(|row| row.0 == mask).unwrap();
    assert_eq!(quad_diagonal(0, mask), (default.1, default.2));
    assert_ne!((d0, d1), (default.1, default.2), "config {}", config);
  }
}

#[test]
fn test_ambiguous_configurations_are_pinned() {
  // Diagonal slab, both windings.
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[60]),
    vec![
      vec![BackUpRight, BackUpLeft, FrontLowLeft, FrontLowRight],
      vec![BackUpRight, FrontLowRight, FrontLowLeft, BackUpLeft],
    ]
  );
  // Slab plus an apex, slab split on FLR-BUL.
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[61]),
    vec![
      vec![BackLowLeft, BackUpRight, BackUpLeft],
      vec![BackLowLeft, FrontLowRight, BackUpRight],
      vec![BackLowLeft, BackUpLeft, FrontLowLeft],
      vec![BackLowLeft, FrontLowLeft, FrontLowRight],
      vec![FrontLowRight, FrontLowLeft, BackUpLeft, BackUpRight],
    ]
  );
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[85]),
    vec![
      vec![FrontLowLeft, BackLowLeft, BackUpRight, FrontUpRight],
      vec![FrontLowLeft, FrontUpRight, BackUpRight, BackLowLeft],
    ]
  );
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[86]),
    vec![
      vec![BackLowRight, BackUpRight, FrontLowLeft],
      vec![BackLowRight, FrontUpRight, BackUpRight],
      vec![BackLowRight, FrontLowLeft, FrontUpRight],
      vec![BackUpRight, FrontUpRight, FrontLowLeft],
    ]
  );
  // Up quad split on BUR-FUL.
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[222]),
    vec![
      vec![BackLowRight, BackUpRight, BackUpLeft],
      vec![BackLowRight, FrontUpRight, BackUpRight],
      vec![BackLowRight, BackUpLeft, FrontLowLeft],
      vec![BackLowRight, FrontLowLeft, FrontUpRight],
      vec![BackUpRight, FrontUpRight, FrontUpLeft, BackUpLeft],
      vec![BackUpLeft, FrontUpLeft, FrontLowLeft],
      vec![FrontLowLeft, FrontUpLeft, FrontUpRight],
    ]
  );
  assert_eq!(
    face_corners(&EXTERIOR_TABLE[231]),
    vec![
      vec![BackLowLeft, BackLowRight, BackUpRight],
      vec![BackLowLeft, FrontLowRight, BackLowRight],
      vec![BackLowLeft, BackUpRight, FrontUpLeft],
      vec![BackLowLeft, FrontUpLeft, FrontLowRight],
      vec![BackUpRight, BackLowRight, FrontLowRight, FrontUpRight],
      vec![BackUpRight, FrontUpRight, FrontUpLeft],
      vec![FrontLowRight, FrontUpLeft, FrontUpRight],
    ]
  );
}

#[test]
fn test_exterior_faces_are_sealed() {
  for cell in EXTERIOR_TABLE.iter() {
    assert!(cell.faces().iter().all(Face::is_sealed));
  }
}

#[test]
fn test_interior_corner_triangle_faces_center() {
  let cell = &INTERIOR_TABLE[7];
  assert_eq!(
    face_corners(cell),
    vec![vec![BackLowLeft, BackUpRight, BackLowRight]]
  );
  assert!(!cell.faces()[0].is_sealed());

  for config in 0u16..=255 {
    let config = config as u8;
    if config.count_ones() != 3 {
      continue;
    }
    let on_one_face = CUBE_FACES.iter().any(|&face| config & face == config);
    let cell = &INTERIOR_TABLE[config as usize];
    assert_eq!(cell.triangle_count(), on_one_face as usize, "config {}", config);

    for tri in cell.triangles() {
      let a = pos(tri[0]);
      let inward = [1 - 2 * a[0], 1 - 2 * a[1], 1 - 2 * a[2]];
      assert!(dot(normal_of(tri), inward) > 0, "config {}", config);
    }
  }
}

#[test]
fn test_interior_whole_faces() {
  assert_eq!(
    face_corners(&INTERIOR_TABLE[63]),
    vec![
      vec![BackLowLeft, BackUpLeft, BackUpRight, BackLowRight],
      vec![BackLowLeft, BackLowRight, FrontLowRight, FrontLowLeft],
    ]
  );
  assert_eq!(INTERIOR_TABLE[254].faces().len(), 3);
  assert!(INTERIOR_TABLE[254].faces().iter().all(Face::is_sealed));

  for &face in CUBE_FACES.iter() {
    let cell = &INTERIOR_TABLE[face as usize];
    assert_eq!(cell.faces().len(), 1);
    assert_eq!(cell.triangle_count(), 2);
  }
}

#[test]
fn test_interior_skips_redundant_fills() {
  assert!(INTERIOR_TABLE[255].is_empty());

  for config in 0u16..=255 {
    let config = config as u8;
    if config.count_ones() == 5 {
      assert!(INTERIOR_TABLE[config as usize].is_empty(), "config {}", config);
    }
  }

  // Diagonal slabs are not cube faces.
  assert!(INTERIOR_TABLE[0x3c].is_empty());
}
