//! Per-vertex normals from triangle geometry using glam SIMD.

use glam::Vec3A;

use crate::types::{MeshOutput, NormalMode};

/// Recalculate every vertex normal from the triangle list.
///
/// - `AreaWeighted`: each face adds its unnormalized normal, so larger faces
///   dominate.
/// - `AngleWeighted`: Thürmer & Wüthrich's "Mean Weighted by Angle" (MWA);
///   each face adds its unit normal scaled by the interior angle at the
///   vertex.
///
/// Vertices that end up with no usable contribution point up.
pub fn recalculate(output: &mut MeshOutput, mode: NormalMode) {
  // Reset all normals
  for vertex in &mut output.vertices {
    vertex.normal = [0.0, 0.0, 0.0];
  }

  let indices = &output.indices;
  let vertices = &mut output.vertices;

  for tri in indices.chunks_exact(3) {
    let i0 = tri[0] as usize;
    let i1 = tri[1] as usize;
    let i2 = tri[2] as usize;

    let p0 = Vec3A::from_array(vertices[i0].position);
    let p1 = Vec3A::from_array(vertices[i1].position);
    let p2 = Vec3A::from_array(vertices[i2].position);

    let e01 = p1 - p0;
    let e02 = p2 - p0;
    let e12 = p2 - p1;

    let face_normal = e01.cross(e02);
    let face_len_sq = face_normal.length_squared();

    // Skip degenerate triangles
    if face_len_sq < 1e-12 {
      continue;
    }

    match mode {
      NormalMode::AreaWeighted => {
        let add = face_normal.to_array();
        add_to_normal(&mut vertices[i0].normal, &add);
        add_to_normal(&mut vertices[i1].normal, &add);
        add_to_normal(&mut vertices[i2].normal, &add);
      }
      NormalMode::AngleWeighted => {
        let unit = face_normal * face_len_sq.sqrt().recip();

        let weighted0 = unit * vertex_angle(e01, e02);
        add_to_normal(&mut vertices[i0].normal, &weighted0.to_array());

        let weighted1 = unit * vertex_angle(-e01, e12);
        add_to_normal(&mut vertices[i1].normal, &weighted1.to_array());

        let weighted2 = unit * vertex_angle(-e02, -e12);
        add_to_normal(&mut vertices[i2].normal, &weighted2.to_array());
      }
    }
  }

  // Normalize all normals
  for vertex in &mut output.vertices {
    let n = Vec3A::from_array(vertex.normal);
    let len_sq = n.length_squared();
    if len_sq < 1e-12 {
      vertex.normal = [0.0, 1.0, 0.0];
    } else {
      vertex.normal = (n * len_sq.sqrt().recip()).to_array();
    }
  }
}

/// Angle between two edge vectors at a vertex, in radians.
#[inline]
fn vertex_angle(e1: Vec3A, e2: Vec3A) -> f32 {
  let len1_sq = e1.length_squared();
  let len2_sq = e2.length_squared();

  if len1_sq < 1e-12 || len2_sq < 1e-12 {
    return 0.0;
  }

  let cos_angle = e1.dot(e2) / (len1_sq.sqrt() * len2_sq.sqrt());

  // Clamp to [-1, 1] to handle floating point errors
  cos_angle.clamp(-1.0, 1.0).acos()
}

#[inline(always)]
fn add_to_normal(normal: &mut [f32; 3], add: &[f32; 3]) {
  normal[0] += add[0];
  normal[1] += add[1];
  normal[2] += add[2];
}

#[cfg(test)]
#[path = "normals_test.rs"]
mod normals_test;
