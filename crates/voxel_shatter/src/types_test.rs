use super::*;

#[test]
fn test_aabb_encapsulate() {
  let mut aabb = MinMaxAABB::empty();
  assert!(!aabb.is_valid());

  aabb.encapsulate([1.0, 2.0, 3.0]);
  aabb.encapsulate([-1.0, -2.0, -3.0]);

  assert_eq!(aabb.min, [-1.0, -2.0, -3.0]);
  assert_eq!(aabb.max, [1.0, 2.0, 3.0]);
  assert!(aabb.is_valid());
}

#[test]
fn test_mesh_output_clear() {
  let mut output = MeshOutput::new();
  output.vertices.push(Vertex::default());
  output.indices.extend([0, 0, 0]);
  output.recompute_bounds();
  output.clear();

  assert!(output.is_empty());
  assert_eq!(output.triangle_count(), 0);
  assert!(!output.bounds.is_valid());
}

#[test]
fn test_triangle_contains() {
  let tri = Triangle([4, 7, 9]);
  assert!(tri.contains(4));
  assert!(tri.contains(9));
  assert!(!tri.contains(5));
}

#[test]
fn test_mesh_output_triangles() {
  let mut output = MeshOutput::new();
  output.vertices = vec![
    Vertex::new([0.0, 0.0, 0.0]),
    Vertex::new([1.0, 0.0, 0.0]),
    Vertex::new([0.0, 1.0, 0.0]),
    Vertex::new([1.0, 1.0, 0.0]),
  ];
  output.indices = vec![0, 1, 2, 2, 1, 3];
  output.recompute_bounds();

  let tris: Vec<_> = output.triangles().collect();
  assert_eq!(tris, vec![Triangle([0, 1, 2]), Triangle([2, 1, 3])]);
  assert_eq!(output.bounds.max, [1.0, 1.0, 0.0]);
  assert_eq!(output.positions().count(), 4);
}

#[test]
fn test_shell_config_builder() {
  let config = ShellConfig::new()
    .with_spacing(0.25)
    .with_normal_mode(NormalMode::AngleWeighted);

  assert_eq!(config.spacing, 0.25);
  assert_eq!(config.variant, ShellVariant::Exterior);
  assert_eq!(config.normal_mode, NormalMode::AngleWeighted);
  assert!(config.validate().is_ok());
}

#[test]
fn test_attenuator_is_clamped() {
  let config = ShellConfig::new().with_attenuator(1000.0);
  assert_eq!(config.variant, ShellVariant::Interior { attenuator: 500.0 });

  let config = ShellConfig::new().with_attenuator(0.5);
  assert_eq!(config.variant, ShellVariant::Interior { attenuator: 1.0 });
  assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_values() {
  assert_eq!(
    ShellConfig::new().with_spacing(0.0).validate(),
    Err(ShatterError::InvalidSpacing(0.0))
  );
  assert!(ShellConfig::new()
    .with_spacing(f32::NAN)
    .validate()
    .is_err());
  assert_eq!(
    ShellConfig::new().with_attenuator(-2.0).validate(),
    Err(ShatterError::InvalidAttenuator(-2.0))
  );
}

#[test]
fn test_default_interior_attenuator() {
  assert_eq!(
    ShellVariant::interior(),
    ShellVariant::Interior {
      attenuator: DEFAULT_ATTENUATOR
    }
  );
  assert!(ShellVariant::Exterior.is_exterior());
}
