/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// A 2-component vector (position or velocity).
pub type Vec2 = [f64; DIM];

/// Elementwise difference `b - a`.
#[inline]
pub fn diff(a: &Vec2, b: &Vec2) -> Vec2 {
    [b[0] - a[0], b[1] - a[1]]
}

/// Squared Euclidean distance between `a` and `b`.
#[inline]
pub fn sq_dist(a: &Vec2, b: &Vec2) -> f64 {
    let d = diff(a, b);
    dot(&d, &d)
}

/// Dot product of `a` and `b`.
#[inline]
pub fn dot(a: &Vec2, b: &Vec2) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_is_b_minus_a() {
        assert_eq!(diff(&[1.0, 2.0], &[4.0, 6.0]), [3.0, 4.0]);
    }

    #[test]
    fn sq_dist_of_3_4_triangle() {
        assert!((sq_dist(&[0.0, 0.0], &[3.0, 4.0]) - 25.0).abs() < 1e-15);
    }

    #[test]
    fn dot_orthogonal_is_zero() {
        assert_eq!(dot(&[1.0, 0.0], &[0.0, 5.0]), 0.0);
        assert_eq!(dot(&[2.0, 3.0], &[4.0, -1.0]), 5.0);
    }
}
