use super::{GeoPoint, PlanarPoint};

/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Square feet per square meter.
pub const SQ_FT_PER_SQ_M: f64 = 10.7639;

/// Arithmetic mean of the ring's vertices.
///
/// This is a centroid of vertices, not an area centroid. It is close enough
/// for small, roughly convex parcels, which is all the flat-earth projection
/// below is good for anyway. Returns `None` for an empty ring.
pub fn reference_point(ring: &[GeoPoint]) -> Option<GeoPoint> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (lat_sum, lng_sum) = ring
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(GeoPoint::new(lat_sum / n, lng_sum / n))
}

/// Equirectangular projection of `p` onto the plane tangent at `origin`, in meters.
pub fn project_tangent(p: GeoPoint, origin: GeoPoint) -> PlanarPoint {
    let to_rad = std::f64::consts::PI / 180.0;
    let x = (p.lng - origin.lng) * to_rad * EARTH_RADIUS_M * (origin.lat * to_rad).cos();
    let y = (p.lat - origin.lat) * to_rad * EARTH_RADIUS_M;
    PlanarPoint::new(x, y)
}

/// Unsigned shoelace area of a closed planar ring.
pub fn shoelace_area(points: &[PlanarPoint]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    (twice / 2.0).abs()
}

/// Estimate the floor area enclosed by `ring` in square feet.
///
/// Rings with fewer than three vertices have zero area. The result is always
/// finite and non-negative, and does not depend on winding direction or on
/// which vertex the ring starts at.
pub fn estimate_area_sq_ft(ring: &[GeoPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let Some(origin) = reference_point(ring) else {
        return 0.0;
    };

    let projected: Vec<PlanarPoint> = ring.iter().map(|&p| project_tangent(p, origin)).collect();
    let sq_ft = shoelace_area(&projected) * SQ_FT_PER_SQ_M;

    if sq_ft.is_finite() {
        sq_ft.max(0.0)
    } else {
        tracing::debug!("Non-finite area for {}-vertex ring, reporting 0", ring.len());
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRESNO: GeoPoint = GeoPoint::new(36.7378, -119.7871);

    /// Axis-aligned rectangle of `w_m` x `h_m` meters centered on `center`.
    fn rect_ring(center: GeoPoint, w_m: f64, h_m: f64) -> Vec<GeoPoint> {
        let deg_per_m_lat = 180.0 / (std::f64::consts::PI * EARTH_RADIUS_M);
        let deg_per_m_lng = deg_per_m_lat / (center.lat.to_radians()).cos();
        let dlat = h_m / 2.0 * deg_per_m_lat;
        let dlng = w_m / 2.0 * deg_per_m_lng;
        vec![
            GeoPoint::new(center.lat - dlat, center.lng - dlng),
            GeoPoint::new(center.lat - dlat, center.lng + dlng),
            GeoPoint::new(center.lat + dlat, center.lng + dlng),
            GeoPoint::new(center.lat + dlat, center.lng - dlng),
        ]
    }

    #[test]
    fn fewer_than_three_points_is_zero() {
        assert_eq!(estimate_area_sq_ft(&[]), 0.0);
        assert_eq!(estimate_area_sq_ft(&[FRESNO]), 0.0);
        assert_eq!(
            estimate_area_sq_ft(&[FRESNO, GeoPoint::new(36.74, -119.78)]),
            0.0
        );
    }

    #[test]
    fn hundred_by_fifty_meter_lot() {
        let area = estimate_area_sq_ft(&rect_ring(FRESNO, 100.0, 50.0));
        let expected = 100.0 * 50.0 * SQ_FT_PER_SQ_M;
        assert!(
            (area - expected).abs() / expected < 0.01,
            "area={area}, expected≈{expected}"
        );
    }

    #[test]
    fn invariant_under_reversal_and_rotation() {
        let ring = vec![
            GeoPoint::new(36.7370, -119.7880),
            GeoPoint::new(36.7372, -119.7860),
            GeoPoint::new(36.7385, -119.7858),
            GeoPoint::new(36.7390, -119.7875),
            GeoPoint::new(36.7381, -119.7884),
        ];
        let base = estimate_area_sq_ft(&ring);
        assert!(base > 0.0);

        let mut reversed = ring.clone();
        reversed.reverse();
        assert!((estimate_area_sq_ft(&reversed) - base).abs() < 1e-6 * base);

        for shift in 1..ring.len() {
            let mut rotated = ring.clone();
            rotated.rotate_left(shift);
            assert!((estimate_area_sq_ft(&rotated) - base).abs() < 1e-6 * base);
        }
    }

    #[test]
    fn degenerate_rings_are_finite_and_non_negative() {
        // Duplicate consecutive points.
        let dup = vec![FRESNO, FRESNO, FRESNO, GeoPoint::new(36.74, -119.78)];
        let a = estimate_area_sq_ft(&dup);
        assert!(a.is_finite() && a >= 0.0);

        // Collinear.
        let line = vec![
            GeoPoint::new(36.0, -119.0),
            GeoPoint::new(36.1, -119.0),
            GeoPoint::new(36.2, -119.0),
        ];
        assert!(estimate_area_sq_ft(&line).abs() < 1e-6);

        // Bow-tie.
        let bowtie = vec![
            GeoPoint::new(36.7370, -119.7880),
            GeoPoint::new(36.7380, -119.7860),
            GeoPoint::new(36.7370, -119.7860),
            GeoPoint::new(36.7380, -119.7880),
        ];
        let b = estimate_area_sq_ft(&bowtie);
        assert!(b.is_finite() && b >= 0.0);
    }

    #[test]
    fn non_finite_coordinates_normalize_to_zero() {
        let ring = vec![
            GeoPoint::new(f64::NAN, -119.0),
            GeoPoint::new(36.1, -119.0),
            GeoPoint::new(36.2, -118.9),
        ];
        assert_eq!(estimate_area_sq_ft(&ring), 0.0);
    }

    #[test]
    fn reference_point_is_vertex_mean() {
        let p = reference_point(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(2.0, 4.0)]).unwrap();
        assert_eq!(p, GeoPoint::new(1.0, 2.0));
        assert!(reference_point(&[]).is_none());
    }
}
