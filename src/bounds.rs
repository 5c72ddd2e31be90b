use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its min and max corners.
///
/// A well-formed box has `min <= max` on both axes. Nothing here checks that;
/// intersection results for malformed boxes are unspecified.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox2D {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(DVec2::new(min_x, min_y), DVec2::new(max_x, max_y))
    }

    /// Box centered on `center` reaching `extent` out on each axis.
    pub fn from_center_extent(center: DVec2, extent: DVec2) -> Self {
        Self::new(center - extent, center + extent)
    }

    /// Overlap test on both axes. Touching edges count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &BoundingBox2D) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// True when `other` lies entirely inside this box (edges included).
    #[inline]
    pub fn contains(&self, other: &BoundingBox2D) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    /// Half-width and half-height.
    #[inline]
    pub fn extent(&self) -> DVec2 {
        (self.max - self.min) / 2.0
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Finite corners with `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Splits the box at its center into four quadrants sharing edges.
    ///
    /// Order is fixed: top-right, top-left, bottom-left, bottom-right.
    pub fn quadrants(&self) -> [BoundingBox2D; 4] {
        let min = self.min;
        let max = self.max;
        let center = self.center();
        [
            BoundingBox2D::new(center, max),
            BoundingBox2D::new(DVec2::new(min.x, center.y), DVec2::new(center.x, max.y)),
            BoundingBox2D::new(min, center),
            BoundingBox2D::new(DVec2::new(center.x, min.y), DVec2::new(max.x, center.y)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D::from_coords(min_x, min_y, max_x, max_y)
    }

    #[test]
    fn test_intersects() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        let b = bb(5.0, 5.0, 15.0, 15.0);
        let c = bb(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&bb(10.0, 0.0, 20.0, 10.0)));
        assert!(a.intersects(&bb(0.0, 10.0, 10.0, 20.0)));
        assert!(a.intersects(&bb(10.0, 10.0, 20.0, 20.0)));
        assert!(!a.intersects(&bb(10.000001, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        // overlaps on x only
        assert!(!a.intersects(&bb(2.0, 11.0, 8.0, 12.0)));
        // overlaps on y only
        assert!(!a.intersects(&bb(-5.0, 2.0, -1.0, 8.0)));
    }

    #[test]
    fn test_degenerate_point_box() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&bb(5.0, 5.0, 5.0, 5.0)));
        assert!(a.intersects(&bb(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_center_and_extent() {
        let a = bb(10.0, 20.0, 30.0, 60.0);
        assert_eq!(a.center(), DVec2::new(20.0, 40.0));
        assert_eq!(a.extent(), DVec2::new(10.0, 20.0));
        assert_eq!(a.width(), 20.0);
        assert_eq!(a.height(), 40.0);
        assert_eq!(BoundingBox2D::from_center_extent(a.center(), a.extent()), a);
    }

    #[test]
    fn test_quadrant_order() {
        let [tr, tl, bl, br] = bb(0.0, 0.0, 100.0, 100.0).quadrants();
        assert_eq!(tr, bb(50.0, 50.0, 100.0, 100.0));
        assert_eq!(tl, bb(0.0, 50.0, 50.0, 100.0));
        assert_eq!(bl, bb(0.0, 0.0, 50.0, 50.0));
        assert_eq!(br, bb(50.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let parent = bb(-7.5, 3.0, 12.5, 41.0);
        let quads = parent.quadrants();

        let total: f64 = quads.iter().map(|q| q.area()).sum();
        assert!((total - parent.area()).abs() < 1e-9);

        for q in &quads {
            assert!(parent.contains(q));
        }

        // Siblings only ever meet on a shared edge or corner.
        for i in 0..4 {
            for j in (i + 1)..4 {
                let a = quads[i];
                let b = quads[j];
                assert!(a.intersects(&b));
                let overlap_w = a.max.x.min(b.max.x) - a.min.x.max(b.min.x);
                let overlap_h = a.max.y.min(b.max.y) - a.min.y.max(b.min.y);
                assert!(overlap_w == 0.0 || overlap_h == 0.0, "{i} and {j} overlap");
            }
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(bb(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(bb(1.0, 1.0, 1.0, 1.0).is_valid());
        assert!(!bb(2.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!bb(0.0, 0.0, f64::INFINITY, 1.0).is_valid());
        assert!(!bb(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }
}
