//! Principal axes of a point cloud.
//!
//! Covariance of the positions is diagonalised with cyclic Jacobi
//! rotations in f64. Axis signs are fixed from the eigenvectors alone
//! (largest-magnitude component positive), so the result depends only on
//! the covariance and is identical for a structure and its mirror image.

use glam::{DVec3, Vec3};

const MAX_SWEEPS: usize = 50;
const OFF_DIAGONAL_EPSILON: f64 = 1e-30;

/// Centroid and variance-ranked orthonormal axes of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    /// Mean position.
    pub centroid: Vec3,
    /// Direction of largest variance.
    pub major: Vec3,
    /// Direction of intermediate variance.
    pub middle: Vec3,
    /// Direction of smallest variance; `major × middle`.
    pub minor: Vec3,
    /// Variances along `major`, `middle`, `minor`.
    pub variances: [f64; 3],
}

impl PrincipalAxes {
    /// Axes of `positions`, or `None` for an empty slice.
    #[must_use]
    pub fn from_positions(positions: &[Vec3]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let n = positions.len() as f64;
        let centroid = positions.iter().map(|p| p.as_dvec3()).sum::<DVec3>() / n;

        let mut cov = [[0.0f64; 3]; 3];
        for p in positions {
            let d = (p.as_dvec3() - centroid).to_array();
            for (row, cov_row) in cov.iter_mut().enumerate() {
                for (col, c) in cov_row.iter_mut().enumerate() {
                    *c += d[row] * d[col];
                }
            }
        }
        for c in cov.iter_mut().flatten() {
            *c /= n;
        }

        let (values, vectors) = jacobi_eigen(cov);
        let mut order = [0usize, 1, 2];
        // Stable sort keeps identity order for equal variances.
        order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

        let major = normalize_sign(vectors[order[0]]);
        let middle = normalize_sign(vectors[order[1]]);
        let minor = major.cross(middle).normalize_or_zero();

        Some(Self {
            centroid: centroid.as_vec3(),
            major: major.as_vec3(),
            middle: middle.as_vec3(),
            minor: minor.as_vec3(),
            variances: [values[order[0]], values[order[1]], values[order[2]]],
        })
    }
}

/// Flip `v` so its largest-magnitude component is positive. Ties go to the
/// lowest index.
fn normalize_sign(v: DVec3) -> DVec3 {
    let a = v.abs();
    let dominant = if a.x >= a.y && a.x >= a.z {
        v.x
    } else if a.y >= a.z {
        v.y
    } else {
        v.z
    };
    if dominant < 0.0 {
        -v
    } else {
        v
    }
}

/// Eigenvalues and eigenvectors of a symmetric 3×3 matrix (row-major).
fn jacobi_eigen(mut a: [[f64; 3]; 3]) -> ([f64; 3], [DVec3; 3]) {
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _ in 0..MAX_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < OFF_DIAGONAL_EPSILON {
            break;
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            if a[p][q] != 0.0 {
                rotate(&mut a, &mut v, p, q);
            }
        }
    }

    let column = |j: usize| DVec3::new(v[0][j], v[1][j], v[2][j]);
    ([a[0][0], a[1][1], a[2][2]], [column(0), column(1), column(2)])
}

/// One Jacobi rotation zeroing `a[p][q]`.
fn rotate(a: &mut [[f64; 3]; 3], v: &mut [[f64; 3]; 3], p: usize, q: usize) {
    let apq = a[p][q];
    let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
    let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    a[p][p] -= t * apq;
    a[q][q] += t * apq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    let r = 3 - p - q;
    let arp = a[r][p];
    let arq = a[r][q];
    a[r][p] = c * arp - s * arq;
    a[p][r] = a[r][p];
    a[r][q] = s * arp + c * arq;
    a[q][r] = a[r][q];

    for row in v.iter_mut() {
        let vp = row[p];
        let vq = row[q];
        row[p] = c * vp - s * vq;
        row[q] = s * vp + c * vq;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn cloud() -> Vec<Vec3> {
        // Elongated along (1, 1, 0), flat along the third axis.
        let mut points = Vec::new();
        for i in -10..=10 {
            let t = i as f32;
            points.push(Vec3::new(t, t, 0.0));
            points.push(Vec3::new(t + 1.0, t - 1.0, 0.3));
            points.push(Vec3::new(t - 1.0, t + 1.0, -0.3));
        }
        points
    }

    #[test]
    fn axes_are_orthonormal_and_ranked() {
        let axes = PrincipalAxes::from_positions(&cloud()).unwrap();
        for v in [axes.major, axes.middle, axes.minor] {
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(axes.major.dot(axes.middle), 0.0, epsilon = 1e-5);
        assert_relative_eq!(axes.major.dot(axes.minor), 0.0, epsilon = 1e-5);
        assert!(axes.variances[0] >= axes.variances[1]);
        assert!(axes.variances[1] >= axes.variances[2]);

        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(axes.major.dot(diagonal).abs(), 1.0, epsilon = 1e-4);
        assert!(axes.minor.z.abs() > 0.9);
    }

    #[test]
    fn mirrored_cloud_has_identical_axes() {
        let points = cloud();
        let mirrored: Vec<Vec3> = points.iter().map(|p| -*p).collect();
        let a = PrincipalAxes::from_positions(&points).unwrap();
        let b = PrincipalAxes::from_positions(&mirrored).unwrap();
        assert_eq!(a.major, b.major);
        assert_eq!(a.middle, b.middle);
        assert_eq!(a.minor, b.minor);
        assert_eq!(a.centroid, -b.centroid);
    }

    #[test]
    fn single_point_gives_identity_axes() {
        let axes = PrincipalAxes::from_positions(&[Vec3::ONE]).unwrap();
        assert_eq!(axes.centroid, Vec3::ONE);
        assert_eq!(axes.major, Vec3::X);
        assert_eq!(axes.middle, Vec3::Y);
        assert_eq!(axes.minor, Vec3::Z);
        assert!(PrincipalAxes::from_positions(&[]).is_none());
    }
}
