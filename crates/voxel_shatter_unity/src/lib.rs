//! Unity FFI bridge for voxel_shatter.
//!
//! C# owns the GameObjects and physics; Rust owns the shells. A collision on
//! the C# side becomes one `shatter_apply_impact` call, after which the mesh
//! buffers are read back with `shatter_get_mesh`.
//!
//! # Architecture
//!
//! ```text
//! C# (Unity)                           Rust (voxel_shatter_unity)
//! ┌───────────────────┐                ┌─────────────────────────┐
//! │ ShatterShell      │                │ ShellState              │
//! │                   │  shatter_      │  - config: ShellConfig  │
//! │ Start():          │  build()       │  - shell: VoxelShell    │
//! │   occupancy ──────┼──────────────► │                         │
//! │                   │                │ apply_impact():         │
//! │ OnCollision():    │  shatter_      │  1. Remove / add / dent │
//! │   point, force ───┼──apply_impact─►│  2. Rebuild buffers     │
//! │                   │ ◄──────────────│                         │
//! │   Upload mesh     │  FfiMeshData   │                         │
//! └───────────────────┘                └─────────────────────────┘
//! ```
//!
//! # Status codes
//!
//! | Code | Meaning                                    |
//! |------|--------------------------------------------|
//! | 0    | Success                                    |
//! | -1   | Null pointer                               |
//! | -2   | Failed to acquire lock                     |
//! | -3   | Shell not found (or not built yet)         |
//! | -4   | Metrics feature not enabled (compile-time) |
//! | -5   | Invalid argument                           |

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use glam::Vec3;

use voxel_shatter::{
    ImpactKind, ImpactOutcome, NodeState, NormalMode, OccupancyGrid, ShellConfig, ShellVariant,
    Vertex, VoxelShell,
};

const STATUS_OK: i32 = 0;
const STATUS_NULL: i32 = -1;
const STATUS_LOCK: i32 = -2;
const STATUS_NOT_FOUND: i32 = -3;
#[cfg(not(feature = "metrics"))]
const STATUS_METRICS_DISABLED: i32 = -4;
const STATUS_INVALID: i32 = -5;

// =============================================================================
// FFI Types
// =============================================================================

/// Plain 3-component vector. Matches C# FfiVec3 exactly.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct FfiVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<FfiVec3> for Vec3 {
    fn from(v: FfiVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for FfiVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<[f32; 3]> for FfiVec3 {
    fn from(v: [f32; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

/// Shell configuration passed from Unity.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FfiShellConfig {
    /// Distance between adjacent lattice nodes in world units
    pub spacing: f32,
    /// Interior only: impact force divisor, clamped to [1, 500]
    pub attenuator: f32,
    /// 0 = exterior (solid), 1 = interior (hollow)
    pub variant: u8,
    /// 0 = area weighted, 1 = angle weighted
    pub normal_mode: u8,
    /// Padding for alignment
    pub _pad: [u8; 2],
}

impl FfiShellConfig {
    fn to_config(self) -> Option<ShellConfig> {
        let normal_mode = match self.normal_mode {
            0 => NormalMode::AreaWeighted,
            1 => NormalMode::AngleWeighted,
            _ => return None,
        };
        let config = ShellConfig::default()
            .with_spacing(self.spacing)
            .with_normal_mode(normal_mode);

        match self.variant {
            0 => Some(config.with_variant(ShellVariant::Exterior)),
            1 => Some(config.with_attenuator(self.attenuator)),
            _ => None,
        }
    }
}

/// What an impact did.
///
/// `kind`: 0 = nothing in range, 1 = removed, 2 = added, 3 = displaced.
/// `node` is -1 when nothing happened; `from`/`to` are only set for
/// displacement.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct FfiImpactResult {
    pub kind: i32,
    pub node: i32,
    pub from: FfiVec3,
    pub to: FfiVec3,
}

impl From<ImpactOutcome> for FfiImpactResult {
    fn from(outcome: ImpactOutcome) -> Self {
        match outcome {
            ImpactOutcome::NoCandidate => Self {
                kind: 0,
                node: -1,
                ..Default::default()
            },
            ImpactOutcome::Removed { node } => Self {
                kind: 1,
                node: node as i32,
                ..Default::default()
            },
            ImpactOutcome::Added { node } => Self {
                kind: 2,
                node: node as i32,
                ..Default::default()
            },
            ImpactOutcome::Displaced { node, from, to } => Self {
                kind: 3,
                node: node as i32,
                from: from.into(),
                to: to.into(),
            },
        }
    }
}

/// Mesh buffers of a shell.
/// Pointers are valid until the next build, impact or destroy on that shell.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FfiMeshData {
    /// Pointer to vertex data (position + normal)
    pub vertices_ptr: *const Vertex,
    /// Number of vertices
    pub vertices_count: u32,
    /// Pointer to index data, 3 per triangle
    pub indices_ptr: *const u32,
    /// Number of indices
    pub indices_count: u32,
    pub bounds_min: FfiVec3,
    pub bounds_max: FfiVec3,
}

impl Default for FfiMeshData {
    fn default() -> Self {
        Self {
            vertices_ptr: std::ptr::null(),
            vertices_count: 0,
            indices_ptr: std::ptr::null(),
            indices_count: 0,
            bounds_min: FfiVec3::default(),
            bounds_max: FfiVec3::default(),
        }
    }
}

/// Node classification sizes. The interior variant reports inactive nodes as
/// activable and never has deactivated ones.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FfiNodeCounts {
    pub total: u32,
    pub active: u32,
    pub activable: u32,
    pub deactivated: u32,
}

// =============================================================================
// FFI Metrics Types
// =============================================================================

/// Timing histogram stats (from RollingWindow).
///
/// Each timing category provides these computed statistics from a 128-sample
/// rolling window.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct FfiTimingStats {
    /// Most recent sample in microseconds.
    pub last_us: u64,
    /// Mean of window in microseconds.
    pub avg_us: u64,
    /// Minimum in window in microseconds.
    pub min_us: u64,
    /// Maximum in window in microseconds.
    pub max_us: u64,
    /// Number of samples in window (up to 128).
    pub sample_count: u32,
    /// Padding for alignment.
    pub _pad: u32,
}

/// Rust-side metrics snapshot for FFI export.
/// Access via `shatter_get_metrics()`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct FfiMetricsSnapshot {
    /// Mesh rebuild timing stats.
    pub build: FfiTimingStats,
    /// Total rebuilds of this shell.
    pub total_builds: u64,

    // Impact counters
    pub removed: u64,
    pub added: u64,
    pub displaced: u64,
    pub missed: u64,

    // Current mesh
    /// Approximate vertex and index buffer size.
    pub mesh_memory_bytes: u64,
    pub vertex_count: u32,
    pub triangle_count: u32,
}

// =============================================================================
// Shell State
// =============================================================================

/// A registered shell. Created empty; `shatter_build` fills it.
struct ShellState {
    config: ShellConfig,
    shell: Option<VoxelShell>,
}

impl ShellState {
    fn new(config: ShellConfig) -> Self {
        Self {
            config,
            shell: None,
        }
    }

    fn node_counts(&self) -> FfiNodeCounts {
        let Some(shell) = &self.shell else {
            return FfiNodeCounts::default();
        };

        let total = shell.graph().len() as u32;
        match shell.node_sets() {
            Some(sets) => FfiNodeCounts {
                total,
                active: sets.count(NodeState::Active) as u32,
                activable: sets.count(NodeState::Activable) as u32,
                deactivated: sets.count(NodeState::Deactivated) as u32,
            },
            None => {
                let active = shell.graph().active_count() as u32;
                FfiNodeCounts {
                    total,
                    active,
                    activable: total - active,
                    deactivated: 0,
                }
            }
        }
    }
}

// =============================================================================
// Global Shell Storage
// =============================================================================

/// Global shell storage with thread-safe access.
static SHELLS: Mutex<Option<HashMap<i32, ShellState>>> = Mutex::new(None);
static NEXT_SHELL_ID: AtomicI32 = AtomicI32::new(1);

/// Run `f` on a registered shell, mapping lock and lookup failures to
/// status codes.
fn with_shell(shell_id: i32, f: impl FnOnce(&mut ShellState) -> i32) -> i32 {
    let Ok(mut guard) = SHELLS.lock() else {
        return STATUS_LOCK;
    };

    let Some(ref mut shells) = *guard else {
        return STATUS_NOT_FOUND;
    };

    match shells.get_mut(&shell_id) {
        Some(state) => f(state),
        None => STATUS_NOT_FOUND,
    }
}

// =============================================================================
// FFI Functions
// =============================================================================

/// Returns the library version as a packed u32: 0xMMmmpp (major.minor.patch).
#[no_mangle]
pub extern "C" fn voxel_shatter_version() -> u32 {
    0x000100 // v0.1.0
}

/// Register a new shell. The mesh is empty until `shatter_build`.
///
/// # Returns
/// - Positive shell_id on success
/// - -2 if failed to acquire lock
/// - -5 if the configuration is invalid
#[no_mangle]
pub extern "C" fn shatter_create(config: FfiShellConfig) -> i32 {
    let Some(config) = config.to_config() else {
        return STATUS_INVALID;
    };
    if config.validate().is_err() {
        return STATUS_INVALID;
    }

    let Ok(mut guard) = SHELLS.lock() else {
        return STATUS_LOCK;
    };

    let shells = guard.get_or_insert_with(HashMap::new);
    let shell_id = NEXT_SHELL_ID.fetch_add(1, Ordering::SeqCst);
    shells.insert(shell_id, ShellState::new(config));

    shell_id
}

/// Destroy a shell and free its resources.
///
/// # Returns
/// - 0 on success
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found
#[no_mangle]
pub extern "C" fn shatter_destroy(shell_id: i32) -> i32 {
    let Ok(mut guard) = SHELLS.lock() else {
        return STATUS_LOCK;
    };

    let Some(ref mut shells) = *guard else {
        return STATUS_NOT_FOUND;
    };

    if shells.remove(&shell_id).is_some() {
        STATUS_OK
    } else {
        STATUS_NOT_FOUND
    }
}

/// Build (or rebuild from scratch) a shell from an occupancy grid.
///
/// # Safety
/// - `occupancy` must point to `x * y * z` bytes, x-major and z-fastest.
///   Any non-zero byte is an occupied cell.
///
/// # Returns
/// - 0 on success
/// - -1 if occupancy is null
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found
/// - -5 if the dimensions are invalid
#[no_mangle]
pub unsafe extern "C" fn shatter_build(
    shell_id: i32,
    occupancy: *const u8,
    x: u32,
    y: u32,
    z: u32,
) -> i32 {
    if occupancy.is_null() {
        return STATUS_NULL;
    }

    let dims = [x as usize, y as usize, z as usize];
    let Some(len) = dims[0].checked_mul(dims[1]).and_then(|xy| xy.checked_mul(dims[2])) else {
        return STATUS_INVALID;
    };
    let bytes = std::slice::from_raw_parts(occupancy, len);
    let cells = bytes.iter().map(|&b| b != 0).collect();

    let Ok(grid) = OccupancyGrid::from_flat(dims, cells) else {
        return STATUS_INVALID;
    };

    with_shell(shell_id, |state| {
        match VoxelShell::build_from_grid(&grid, state.config.clone()) {
            Ok(shell) => {
                state.shell = Some(shell);
                STATUS_OK
            }
            Err(_) => STATUS_INVALID,
        }
    })
}

/// Apply one impact to a built shell.
///
/// # Safety
/// - `out` must point to a valid FfiImpactResult struct.
///
/// # Parameters
/// - `point`: Impact position in shell-local space
/// - `force`: Impact force (for Unity collisions, the negated relative velocity)
/// - `kind`: 0 = remove, 1 = add (ignored by interior shells)
///
/// # Returns
/// - 0 on success (including impacts that found nothing, see `out.kind`)
/// - -1 if out is null
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found or not built
/// - -5 if kind is unknown
#[no_mangle]
pub unsafe extern "C" fn shatter_apply_impact(
    shell_id: i32,
    point: FfiVec3,
    force: FfiVec3,
    kind: i32,
    out: *mut FfiImpactResult,
) -> i32 {
    if out.is_null() {
        return STATUS_NULL;
    }

    let kind = match kind {
        0 => ImpactKind::Remove,
        1 => ImpactKind::Add,
        _ => return STATUS_INVALID,
    };

    with_shell(shell_id, |state| {
        let Some(shell) = state.shell.as_mut() else {
            return STATUS_NOT_FOUND;
        };

        let outcome = shell.apply_impact_kind(point.into(), force.into(), kind);
        *out = outcome.into();
        STATUS_OK
    })
}

/// Get pointers to a shell's mesh buffers.
///
/// # Safety
/// - `out` must point to a valid FfiMeshData struct.
///
/// # Returns
/// - 0 on success
/// - -1 if out is null
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found or not built
#[no_mangle]
pub unsafe extern "C" fn shatter_get_mesh(shell_id: i32, out: *mut FfiMeshData) -> i32 {
    if out.is_null() {
        return STATUS_NULL;
    }

    with_shell(shell_id, |state| {
        let Some(shell) = &state.shell else {
            return STATUS_NOT_FOUND;
        };

        let mesh = shell.mesh();
        *out = if mesh.is_empty() {
            FfiMeshData::default()
        } else {
            FfiMeshData {
                vertices_ptr: mesh.vertices.as_ptr(),
                vertices_count: mesh.vertices.len() as u32,
                indices_ptr: mesh.indices.as_ptr(),
                indices_count: mesh.indices.len() as u32,
                bounds_min: mesh.bounds.min.into(),
                bounds_max: mesh.bounds.max.into(),
            }
        };
        STATUS_OK
    })
}

/// Get node classification sizes. An unbuilt shell reports zeros.
///
/// # Safety
/// - `out` must point to a valid FfiNodeCounts struct.
///
/// # Returns
/// - 0 on success
/// - -1 if out is null
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found
#[no_mangle]
pub unsafe extern "C" fn shatter_node_counts(shell_id: i32, out: *mut FfiNodeCounts) -> i32 {
    if out.is_null() {
        return STATUS_NULL;
    }

    with_shell(shell_id, |state| {
        *out = state.node_counts();
        STATUS_OK
    })
}

/// Get current metrics snapshot for a shell.
///
/// Stats are computed from a 128-sample rolling window.
///
/// # Safety
/// - `out` must point to a valid FfiMetricsSnapshot struct.
///
/// # Returns
/// - 0 on success
/// - -1 if out is null
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found or not built
/// - -4 if metrics feature not enabled (compile-time)
#[no_mangle]
pub unsafe extern "C" fn shatter_get_metrics(shell_id: i32, out: *mut FfiMetricsSnapshot) -> i32 {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = (shell_id, out);
        return STATUS_METRICS_DISABLED;
    }

    #[cfg(feature = "metrics")]
    {
        if out.is_null() {
            return STATUS_NULL;
        }

        with_shell(shell_id, |state| {
            let Some(shell) = &state.shell else {
                return STATUS_NOT_FOUND;
            };

            let metrics = shell.metrics();
            let (min_us, max_us) = metrics.build_timings.min_max().unwrap_or((0, 0));

            *out = FfiMetricsSnapshot {
                build: FfiTimingStats {
                    last_us: metrics.last_build_us,
                    avg_us: metrics.avg_build_timing_us() as u64,
                    min_us,
                    max_us,
                    sample_count: metrics.build_timings.len() as u32,
                    _pad: 0,
                },
                total_builds: metrics.total_builds,
                removed: metrics.removed,
                added: metrics.added,
                displaced: metrics.displaced,
                missed: metrics.missed,
                mesh_memory_bytes: metrics.mesh_memory_bytes(),
                vertex_count: metrics.vertex_count,
                triangle_count: metrics.triangle_count,
            };
            STATUS_OK
        })
    }
}

/// Zero a shell's timings and impact counters. The build total is kept.
///
/// # Returns
/// - 0 on success
/// - -2 if failed to acquire lock
/// - -3 if shell_id not found or not built
#[no_mangle]
pub extern "C" fn shatter_reset_metrics(shell_id: i32) -> i32 {
    with_shell(shell_id, |state| match &mut state.shell {
        Some(shell) => {
            shell.metrics_mut().reset();
            STATUS_OK
        }
        None => STATUS_NOT_FOUND,
    })
}

/// Runtime toggle for metrics collection across all shells.
#[no_mangle]
pub extern "C" fn shatter_set_metrics_enabled(enabled: bool) {
    voxel_shatter::metrics::set_enabled(enabled);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn exterior_config() -> FfiShellConfig {
        FfiShellConfig {
            spacing: 1.0,
            attenuator: 100.0,
            variant: 0,
            normal_mode: 0,
            _pad: [0; 2],
        }
    }

    /// Hollow cube occupancy, x-major and z-fastest.
    fn hollow_cube(size: u32) -> Vec<u8> {
        let mut cells = Vec::new();
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    let edge = |c: u32| c == 0 || c == size - 1;
                    cells.push((edge(x) || edge(y) || edge(z)) as u8);
                }
            }
        }
        cells
    }

    #[test]
    fn test_version() {
        assert_eq!(voxel_shatter_version(), 0x000100);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = exterior_config();
        config.spacing = 0.0;
        assert_eq!(shatter_create(config), STATUS_INVALID);

        let mut config = exterior_config();
        config.variant = 7;
        assert_eq!(shatter_create(config), STATUS_INVALID);
    }

    #[test]
    fn test_exterior_shell_lifecycle() {
        let occupancy = hollow_cube(4);

        unsafe {
            let shell_id = shatter_create(exterior_config());
            assert!(shell_id > 0, "Expected positive shell_id, got {}", shell_id);

            let mut mesh = FfiMeshData::default();
            assert_eq!(shatter_get_mesh(shell_id, &mut mesh), STATUS_NOT_FOUND, "Not built yet");

            let status = shatter_build(shell_id, occupancy.as_ptr(), 4, 4, 4);
            assert_eq!(status, STATUS_OK, "Build should succeed");

            assert_eq!(shatter_get_mesh(shell_id, &mut mesh), STATUS_OK);
            assert!(mesh.indices_count > 0);
            assert_eq!(mesh.indices_count % 3, 0);
            assert!(!mesh.vertices_ptr.is_null());

            let mut counts = FfiNodeCounts::default();
            assert_eq!(shatter_node_counts(shell_id, &mut counts), STATUS_OK);
            assert_eq!(counts.total, 64);
            assert_eq!(counts.active, 56);
            assert_eq!(counts.activable, 8);

            let mut result = FfiImpactResult::default();
            let point = FfiVec3 {
                x: -1.5,
                y: -1.5,
                z: -1.5,
            };
            let status = shatter_apply_impact(shell_id, point, FfiVec3::default(), 0, &mut result);
            assert_eq!(status, STATUS_OK);
            assert_eq!(result.kind, 1);
            assert_eq!(result.node, 0);

            assert_eq!(shatter_node_counts(shell_id, &mut counts), STATUS_OK);
            assert_eq!(counts.deactivated, 1);
            assert_eq!(counts.active + counts.activable + counts.deactivated, counts.total);

            let status = shatter_destroy(shell_id);
            assert_eq!(status, STATUS_OK, "Destroy should succeed");

            let status = shatter_destroy(shell_id);
            assert_eq!(status, STATUS_NOT_FOUND, "Double destroy should return -3");
        }
    }

    #[test]
    fn test_interior_impact_reports_displacement() {
        let occupancy = hollow_cube(3);
        let config = FfiShellConfig {
            variant: 1,
            attenuator: 10.0,
            ..exterior_config()
        };

        unsafe {
            let shell_id = shatter_create(config);
            assert!(shell_id > 0);
            assert_eq!(shatter_build(shell_id, occupancy.as_ptr(), 3, 3, 3), STATUS_OK);

            let mut result = FfiImpactResult::default();
            let point = FfiVec3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            };
            let force = FfiVec3 {
                x: 0.0,
                y: -5.0,
                z: 0.0,
            };
            assert_eq!(shatter_apply_impact(shell_id, point, force, 0, &mut result), STATUS_OK);
            assert_eq!(result.kind, 3);
            assert_eq!(result.from, point);
            assert_eq!(
                result.to,
                FfiVec3 {
                    x: 0.0,
                    y: 0.5,
                    z: 0.0,
                }
            );

            shatter_destroy(shell_id);
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let occupancy = hollow_cube(3);

        unsafe {
            let shell_id = shatter_create(exterior_config());
            assert_eq!(shatter_build(shell_id, std::ptr::null(), 3, 3, 3), STATUS_NULL);
            assert_eq!(shatter_build(shell_id, occupancy.as_ptr(), 1, 3, 3), STATUS_INVALID);
            assert_eq!(shatter_build(shell_id, occupancy.as_ptr(), 3, 3, 3), STATUS_OK);

            let mut result = FfiImpactResult::default();
            let zero = FfiVec3::default();
            assert_eq!(shatter_apply_impact(shell_id, zero, zero, 9, &mut result), STATUS_INVALID);
            assert_eq!(
                shatter_apply_impact(shell_id, zero, zero, 0, std::ptr::null_mut()),
                STATUS_NULL
            );
            assert_eq!(shatter_apply_impact(-42, zero, zero, 0, &mut result), STATUS_NOT_FOUND);

            shatter_destroy(shell_id);
        }
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_metrics_snapshot() {
        let occupancy = hollow_cube(3);

        unsafe {
            let shell_id = shatter_create(exterior_config());
            assert_eq!(shatter_build(shell_id, occupancy.as_ptr(), 3, 3, 3), STATUS_OK);

            let mut snapshot = FfiMetricsSnapshot::default();
            assert_eq!(shatter_get_metrics(shell_id, &mut snapshot), STATUS_OK);
            assert_eq!(snapshot.total_builds, 1);
            assert_eq!(snapshot.build.sample_count, 1);
            assert!(snapshot.triangle_count > 0);
            assert_eq!(
                snapshot.mesh_memory_bytes,
                snapshot.vertex_count as u64 * 24 + snapshot.triangle_count as u64 * 12
            );

            shatter_destroy(shell_id);
        }
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_reset_metrics_keeps_build_total() {
        let occupancy = hollow_cube(3);

        unsafe {
            let shell_id = shatter_create(exterior_config());
            assert_eq!(shatter_reset_metrics(shell_id), STATUS_NOT_FOUND, "Not built yet");
            assert_eq!(shatter_build(shell_id, occupancy.as_ptr(), 3, 3, 3), STATUS_OK);

            let mut result = FfiImpactResult::default();
            let corner = FfiVec3 {
                x: -1.0,
                y: -1.0,
                z: -1.0,
            };
            let zero = FfiVec3::default();
            assert_eq!(shatter_apply_impact(shell_id, corner, zero, 0, &mut result), STATUS_OK);

            let mut snapshot = FfiMetricsSnapshot::default();
            assert_eq!(shatter_get_metrics(shell_id, &mut snapshot), STATUS_OK);
            assert_eq!(snapshot.removed, 1);
            assert_eq!(snapshot.total_builds, 2);

            assert_eq!(shatter_reset_metrics(shell_id), STATUS_OK);
            assert_eq!(shatter_get_metrics(shell_id, &mut snapshot), STATUS_OK);
            assert_eq!(snapshot.removed, 0);
            assert_eq!(snapshot.build.sample_count, 0);
            assert_eq!(snapshot.mesh_memory_bytes, 0);
            assert_eq!(snapshot.total_builds, 2);

            shatter_destroy(shell_id);
            assert_eq!(shatter_reset_metrics(shell_id), STATUS_NOT_FOUND);
        }
    }
}
