use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Angle and vector helpers shared by the steering stages
// ---------------------------------------------------------------------------

/// Squared length at or below which a vector has no usable direction.
pub const DEGENERATE_NORM_SQ: f64 = 1e-6;

/// Wraps an angle into (-pi, pi].
pub fn wrap_angle(a: f64) -> f64 {
    let r = (a + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps the upper bound onto -pi; the interval is open there.
    if r <= -PI { r + TAU } else { r }
}

/// Blends `a` toward `b` along the shorter arc. `t` is clamped to [0, 1].
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    a + wrap_angle(b - a) * t.clamp(0.0, 1.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fraction of the remaining gap closed in `dt` by a first-order lag with `rate` (1/s).
pub fn exp_blend(dt: f64, rate: f64) -> f64 {
    1.0 - (-dt * rate).exp()
}

/// Unit vector along `v`, or `None` when `v` is too short to have a direction.
pub fn safe_normalize(v: Vector2<f64>) -> Option<Vector2<f64>> {
    let n2 = v.norm_squared();
    if n2 > DEGENERATE_NORM_SQ && n2.is_finite() {
        Some(v / n2.sqrt())
    } else {
        None
    }
}

/// Unit vector for a heading measured from +x toward +z.
pub fn heading_vector(yaw: f64) -> Vector2<f64> {
    Vector2::new(yaw.cos(), yaw.sin())
}

pub fn heading_of(dir: &Vector2<f64>) -> f64 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_in_half_open_interval() {
        let mut a = -50.0;
        while a < 50.0 {
            let w = wrap_angle(a);
            assert!(w > -PI && w <= PI, "wrap_angle({}) = {}", a, w);
            a += 0.137;
        }
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
    }

    #[test]
    fn wrap_is_periodic() {
        for &a in &[0.3, -2.9, 3.0, 1e-3, -1.5] {
            for k in -4..=4 {
                let shifted = wrap_angle(a + TAU * k as f64);
                assert!(
                    (shifted - wrap_angle(a)).abs() < 1e-9,
                    "k={} a={} -> {} vs {}",
                    k,
                    a,
                    shifted,
                    wrap_angle(a)
                );
            }
        }
    }

    #[test]
    fn lerp_angle_takes_short_way_round() {
        // 170 deg -> -170 deg is a 20 deg step through pi, not 340 deg back.
        let a = 170.0_f64.to_radians();
        let b = -170.0_f64.to_radians();
        let mid = wrap_angle(lerp_angle(a, b, 0.5));
        assert!((mid.abs() - PI).abs() < 1e-9);
    }

    #[test]
    fn lerp_angle_clamps_fraction() {
        assert_eq!(lerp_angle(0.0, 1.0, 2.0), 1.0);
        assert_eq!(lerp_angle(0.0, 1.0, -1.0), 0.0);
    }

    #[test]
    fn safe_normalize_rejects_tiny_vectors() {
        assert!(safe_normalize(Vector2::new(1e-4, 1e-4)).is_none());
        assert!(safe_normalize(Vector2::zeros()).is_none());
        let u = safe_normalize(Vector2::new(3.0, 4.0)).unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn exp_blend_limits() {
        assert_eq!(exp_blend(0.0, 10.0), 0.0);
        assert!((exp_blend(100.0, 10.0) - 1.0).abs() < 1e-12);
    }
}
