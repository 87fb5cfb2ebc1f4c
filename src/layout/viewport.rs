use super::Rect;
use crate::geo::{GeoPoint, PlanarPoint};

/// Side of the square preview viewport (px).
pub const DEFAULT_VIEWPORT_PX: f64 = 200.0;
/// Inset on every side of the viewport (px).
pub const DEFAULT_MARGIN_PX: f64 = 10.0;
/// Bounds used when there are no points to measure.
pub const DEFAULT_BOUNDS: Rect = Rect::new(
    DEFAULT_MARGIN_PX,
    DEFAULT_MARGIN_PX,
    DEFAULT_VIEWPORT_PX - 2.0 * DEFAULT_MARGIN_PX,
    DEFAULT_VIEWPORT_PX - 2.0 * DEFAULT_MARGIN_PX,
);

/// Smallest coordinate range (degrees) used as a divisor.
const MIN_RANGE_DEG: f64 = 1e-9;

/// Fit a ring into a square viewport of `viewport_px`, inset by `margin_px`.
///
/// Longitude maps to x and latitude to y, flipped so north is up. Each axis
/// is scaled on its own, so the ring's bounding box fills the available area.
pub fn ring_to_viewport(ring: &[GeoPoint], margin_px: f64, viewport_px: f64) -> Vec<PlanarPoint> {
    if ring.is_empty() {
        return Vec::new();
    }

    let mut min_lng = f64::INFINITY;
    let mut max_lng = f64::NEG_INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for p in ring {
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
    }

    let lng_range = (max_lng - min_lng).max(MIN_RANGE_DEG);
    let lat_range = (max_lat - min_lat).max(MIN_RANGE_DEG);
    let avail = viewport_px - 2.0 * margin_px;

    ring.iter()
        .map(|p| PlanarPoint {
            x: margin_px + (p.lng - min_lng) / lng_range * avail,
            y: margin_px + (max_lat - p.lat) / lat_range * avail,
        })
        .collect()
}

/// Min/max extents of `points`, or [`DEFAULT_BOUNDS`] when there are none.
pub fn bounding_rect(points: &[PlanarPoint]) -> Rect {
    if points.is_empty() {
        return DEFAULT_BOUNDS;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_ring_projects_to_nothing() {
        assert!(ring_to_viewport(&[], 10.0, 200.0).is_empty());
    }

    #[test]
    fn bounding_box_fills_inset_viewport_north_up() {
        let ring = [
            GeoPoint::new(36.0, -120.0), // south-west
            GeoPoint::new(36.0, -119.0), // south-east
            GeoPoint::new(36.5, -119.0), // north-east
            GeoPoint::new(36.5, -120.0), // north-west
        ];
        let pts = ring_to_viewport(&ring, 10.0, 200.0);
        // South-west lands bottom-left.
        assert!(approx(pts[0].x, 10.0) && approx(pts[0].y, 190.0));
        // North-east lands top-right.
        assert!(approx(pts[2].x, 190.0) && approx(pts[2].y, 10.0));

        let bounds = bounding_rect(&pts);
        assert!(approx(bounds.x, 10.0) && approx(bounds.y, 10.0));
        assert!(approx(bounds.w, 180.0) && approx(bounds.h, 180.0));
    }

    #[test]
    fn degenerate_range_does_not_divide_by_zero() {
        let ring = [
            GeoPoint::new(36.0, -120.0),
            GeoPoint::new(36.0, -119.0),
            GeoPoint::new(36.0, -119.5),
        ];
        let pts = ring_to_viewport(&ring, 10.0, 200.0);
        assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(pts.iter().all(|p| approx(p.y, 10.0)));
        assert!(!bounding_rect(&pts).is_drawable());
    }

    #[test]
    fn empty_points_give_default_bounds() {
        assert_eq!(bounding_rect(&[]), DEFAULT_BOUNDS);
        assert_eq!(DEFAULT_BOUNDS, Rect::new(10.0, 10.0, 180.0, 180.0));
    }
}
