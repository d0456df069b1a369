//! Market move grid.
//!
//! The grid is a half-open range `[start, stop)` sampled every `step`,
//! using the same floating-point stepping as a numeric `arange`:
//!
//! - point count is `ceil((stop - start) / step)`, or zero when that is not
//!   positive (zero step, wrong-sign step, empty range)
//! - point 0 is `start`, point 1 is `start + step`
//! - point `i >= 2` is `start + i * delta` with `delta = (start + step) - start`
//!
//! The stop value is never snapped onto the grid, so the last point may sit
//! an epsilon away from an exact multiple of the step. Callers must not
//! rely on the last point being exactly representable.

/// Evenly spaced, ordered market moves.
///
/// # Examples
/// ```
/// use pricer_trs::MoveGrid;
///
/// let grid = MoveGrid::new(-0.20, 0.21, 0.05);
/// assert_eq!(grid.len(), 9);
/// assert_eq!(grid.point(0), Some(-0.20));
///
/// // Wrong-sign step yields no points
/// assert!(MoveGrid::new(0.0, 1.0, -0.1).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveGrid {
    start: f64,
    step: f64,
    delta: f64,
    len: usize,
}

impl MoveGrid {
    /// Build the grid for `[start, stop)` with the given step.
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        let span = if step == 0.0 {
            0.0
        } else {
            (stop - start) / step
        };

        // NaN spans fail the comparison and give an empty grid
        let len = if span > 0.0 { span.ceil() as usize } else { 0 };

        Self {
            start,
            step,
            delta: (start + step) - start,
            len,
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First point of the range (inclusive).
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Nominal increment between points.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The `index`-th point, or `None` past the end.
    pub fn point(&self, index: usize) -> Option<f64> {
        (index < self.len).then(|| self.value_at(index))
    }

    /// Iterate the points in grid order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.value_at(i))
    }

    /// Collect the points into a vector.
    pub fn points(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub(crate) fn value_at(&self, index: usize) -> f64 {
        match index {
            0 => self.start,
            1 => self.start + self.step,
            i => self.start + i as f64 * self.delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_range_has_nine_points() {
        let grid = MoveGrid::new(-0.20, 0.21, 0.05);
        let points = grid.points();
        assert_eq!(points.len(), 9);

        let expected = [-0.20, -0.15, -0.10, -0.05, 0.0, 0.05, 0.10, 0.15, 0.20];
        for (actual, expected) in points.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*actual, *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_points_are_ascending() {
        let points = MoveGrid::new(-0.5, 0.5, 0.01).points();
        assert!(points.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_negative_step_descends() {
        let points = MoveGrid::new(0.2, -0.2, -0.1).points();
        assert_eq!(points.len(), 4);
        assert!(points.windows(2).all(|w| w[0] > w[1]));
        assert!(points.iter().all(|p| *p > -0.2));
    }

    #[test]
    fn test_stop_is_exclusive() {
        let grid = MoveGrid::new(0.0, 0.2, 0.05);
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|p| p < 0.2));
    }

    #[test]
    fn test_empty_range() {
        assert!(MoveGrid::new(0.0, 0.0, 0.05).is_empty());
    }

    #[test]
    fn test_zero_step_is_empty() {
        let grid = MoveGrid::new(0.0, 1.0, 0.0);
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn test_wrong_sign_step_is_empty() {
        assert!(MoveGrid::new(-0.2, 0.2, -0.05).is_empty());
        assert!(MoveGrid::new(0.2, -0.2, 0.05).is_empty());
    }

    #[test]
    fn test_single_point() {
        let grid = MoveGrid::new(0.1, 0.15, 0.1);
        assert_eq!(grid.points(), vec![0.1]);
    }

    #[test]
    fn test_count_uses_ceiling_not_accumulation() {
        // Repeated addition of 0.1 stays below 1.0 after ten steps; the
        // ceiling rule still stops at ten points.
        assert_eq!(MoveGrid::new(0.0, 1.0, 0.1).len(), 10);
    }

    #[test]
    fn test_point_past_end() {
        let grid = MoveGrid::new(0.0, 0.1, 0.05);
        assert_eq!(grid.len(), 2);
        assert!(grid.point(2).is_none());
    }

    #[test]
    fn test_second_point_is_start_plus_step() {
        let grid = MoveGrid::new(-0.20, 0.21, 0.05);
        assert_eq!(grid.point(1), Some(-0.20 + 0.05));
    }
}
