//! Camera placement for still images.
//!
//! Framing derives a pose from principal axes of the focus atoms; the core
//! camera turns that pose into view and projection transforms for the
//! rasterizer.

/// Perspective camera built from a frame.
pub mod core;
/// Principal axes by Jacobi eigen-decomposition.
pub mod axes;
/// Pose computation with canonical sign disambiguation.
pub mod framing;

pub use axes::PrincipalAxes;
pub use framing::{
    canonical_basis, frame, frame_canonical, frame_with_mode, reference_point,
    signed_plane_distance, CameraFrame, Flip, FramingError,
};
