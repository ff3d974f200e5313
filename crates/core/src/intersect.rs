//! Analytic ray/circle intersection.
//!
//! A ray `origin + t * direction` meets the circle `|p| = r` where
//! `|d|² t² + 2 (o·d) t + |o|² − r² = 0`. The roots are found in f64 and the
//! intersection points are returned in the ray's f32 space.

use glam::Vec2;

/// Discriminants closer to zero than this are treated as a double root.
pub const EQN_EPS: f64 = 1e-16;

/// Real roots of a quadratic equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    None,
    One(f64),
    /// Larger root first.
    Two(f64, f64),
}

impl QuadraticRoots {
    /// Roots as a vector, in the order stored.
    pub fn to_vec(self) -> Vec<f64> {
        match self {
            Self::None => Vec::new(),
            Self::One(x) => vec![x],
            Self::Two(x0, x1) => vec![x0, x1],
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

fn is_zero(x: f64) -> bool {
    x > -EQN_EPS && x < EQN_EPS
}

/// Solves `a x² + b x + c = 0`.
///
/// Works on the normal form `x² + p x + q = 0` with `p = b / 2a` and
/// `q = c / a`. When `a` is zero the equation is linear and at most one root
/// is returned.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if is_zero(a) {
        if is_zero(b) {
            return QuadraticRoots::None;
        }
        return QuadraticRoots::One(-c / b);
    }

    let p = b / (2.0 * a);
    let q = c / a;
    let discriminant = p * p - q;

    if is_zero(discriminant) {
        QuadraticRoots::One(-p)
    } else if discriminant < 0.0 {
        QuadraticRoots::None
    } else {
        let sqrt_d = discriminant.sqrt();
        QuadraticRoots::Two(sqrt_d - p, -sqrt_d - p)
    }
}

/// A 2D ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Ray2 {
    /// Ray starting at `from` and heading towards `to`.
    ///
    /// Returns `None` if the two points coincide.
    pub fn through(from: Vec2, to: Vec2) -> Option<Self> {
        let direction = (to - from).try_normalize()?;
        Some(Self {
            origin: from,
            direction,
        })
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// Points where the infinite line of `ray` crosses the circle of `radius`
/// centred on the origin.
///
/// Both forward and backward hits are reported; callers that only want hits
/// in front of the origin filter on the sign of `t` themselves.
pub fn intersect_circle(ray: &Ray2, radius: f32) -> Vec<Vec2> {
    let o = ray.origin.as_dvec2();
    let d = ray.direction.as_dvec2();
    let r = f64::from(radius);

    let a = d.dot(d);
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - r * r;

    solve_quadratic(a, b, c)
        .to_vec()
        .into_iter()
        .map(|t| ray.at(t as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_roots() {
        // (x - 1)(x - 3) = x² - 4x + 3
        assert_eq!(solve_quadratic(1.0, -4.0, 3.0), QuadraticRoots::Two(3.0, 1.0));
    }

    #[test]
    fn double_root() {
        // (x + 2)² = x² + 4x + 4
        assert_eq!(solve_quadratic(1.0, 4.0, 4.0), QuadraticRoots::One(-2.0));
    }

    #[test]
    fn no_real_roots() {
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), QuadraticRoots::None);
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn non_unit_leading_coefficient() {
        // 2x² - 8 = 0
        assert_eq!(solve_quadratic(2.0, 0.0, -8.0), QuadraticRoots::Two(2.0, -2.0));
    }

    #[test]
    fn linear_equation_when_a_is_zero() {
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0), QuadraticRoots::One(2.0));
        assert_eq!(solve_quadratic(0.0, 0.0, 1.0), QuadraticRoots::None);
    }

    #[test]
    fn ray_through_coincident_points_is_none() {
        assert!(Ray2::through(Vec2::ONE, Vec2::ONE).is_none());
    }

    #[test]
    fn horizontal_ray_through_centre_hits_both_sides() {
        let ray = Ray2::through(Vec2::new(-5.0, 0.0), Vec2::new(-4.0, 0.0)).unwrap();
        let mut hits = intersect_circle(&ray, 2.0);
        hits.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(hits.len(), 2);
        assert!((hits[0] - Vec2::new(-2.0, 0.0)).length() < 1e-5, "got {hits:?}");
        assert!((hits[1] - Vec2::new(2.0, 0.0)).length() < 1e-5, "got {hits:?}");
    }

    #[test]
    fn tangent_ray_hits_once() {
        let ray = Ray2::through(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 2.0)).unwrap();
        let hits = intersect_circle(&ray, 2.0);
        assert_eq!(hits.len(), 1, "got {hits:?}");
        assert!((hits[0] - Vec2::new(0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn missing_ray_has_no_hits() {
        let ray = Ray2::through(Vec2::new(-5.0, 3.0), Vec2::new(5.0, 3.0)).unwrap();
        assert!(intersect_circle(&ray, 2.0).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hits_lie_on_circle(
                ox in -10.0_f32..10.0,
                oy in -10.0_f32..10.0,
                angle in 0.0_f32..std::f32::consts::TAU,
                radius in 0.5_f32..5.0,
            ) {
                let origin = Vec2::new(ox, oy);
                let ray = Ray2 { origin, direction: Vec2::from_angle(angle) };
                for hit in intersect_circle(&ray, radius) {
                    prop_assert!(
                        (hit.length() - radius).abs() < 1e-3,
                        "hit {hit:?} not on circle of radius {radius}"
                    );
                }
            }

            #[test]
            fn roots_satisfy_equation(r0 in -100.0_f64..100.0, r1 in -100.0_f64..100.0) {
                // (x - r0)(x - r1) = x² - (r0 + r1) x + r0 r1
                let roots = solve_quadratic(1.0, -(r0 + r1), r0 * r1);
                for x in roots.to_vec() {
                    let y = x * x - (r0 + r1) * x + r0 * r1;
                    prop_assert!(y.abs() < 1e-6 * (1.0 + r0.abs() * r1.abs()), "residual {y}");
                }
            }
        }
    }
}
