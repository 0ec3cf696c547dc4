use crate::{Float, HitPair, Polygon, Ray, Segment, SegmentIntersection, Vect};

/// Find where `ray` first meets the obstacle boundary, and where it meets the
/// backplane.
///
/// Every polygon edge is tested; only point-type intersections count
/// (collinear overlaps are misses). Candidates are ranked by horizontal
/// distance from the ray's origin with a strict `<`, so among equidistant
/// edges (a ray grazing a vertex) the first edge in traversal order wins.
///
/// Returns `None` when either intersection is missing: such a ray casts no
/// shadow and contributes nothing to the mesh. Deterministic: the same ray
/// against the same scene always resolves identically.
pub fn resolve(ray: &Ray, polygon: &Polygon, backplane: &Segment) -> Option<HitPair> {
    let ray_segment = ray.segment();

    let mut closest: Option<(Float, Vect)> = None;

    for edge in polygon.edges() {
        if let SegmentIntersection::Point(p) = ray_segment.intersection(&edge) {
            let dist = (p.x - ray.origin.x).abs();

            if closest.as_ref().map(|(best, _)| dist < *best).unwrap_or(true) {
                closest = Some((dist, p));
            }
        }
    }

    let (_, obstacle) = closest?;

    match ray_segment.intersection(backplane) {
        SegmentIntersection::Point(backplane_hit) => Some(HitPair {
            obstacle,
            backplane: backplane_hit,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GEOMETRY_EPSILON;

    fn backplane_at(x: Float, half_extent: Float) -> Segment {
        Segment::new([x, -half_extent], [x, half_extent])
    }

    #[test]
    fn ray_through_the_rotated_square() {
        // Square of side 6 at the origin, rotated 30 degrees; a ray at y = 0
        // must hit the boundary within the rotated bounding range and the
        // backplane at exactly (10, 0).
        let polygon = Polygon::square(6., [0., 0.], 30.).unwrap();
        let ray = Ray::horizontal(-10., 10., 0.);

        let pair = resolve(&ray, &polygon, &backplane_at(10., 10.)).unwrap();

        let half_diagonal = 3. * Float::sqrt(2.);
        assert!(pair.obstacle.x.abs() <= half_diagonal);
        assert!(pair.obstacle.y.abs() < GEOMETRY_EPSILON);

        assert_eq!(pair.backplane, Vect::new(10., 0.));
    }

    #[test]
    fn nearest_edge_wins() {
        // A ray through the interior crosses the boundary twice; the hit must
        // be the crossing closest to the ray's origin on the left.
        let polygon = Polygon::square(6., [0., 0.], 30.).unwrap();
        let ray = Ray::horizontal(-10., 10., 0.);

        let pair = resolve(&ray, &polygon, &backplane_at(10., 10.)).unwrap();

        let mut crossings = vec![];
        for edge in polygon.edges() {
            if let SegmentIntersection::Point(p) = ray.segment().intersection(&edge) {
                crossings.push(p);
            }
        }

        assert_eq!(crossings.len(), 2);
        for p in crossings {
            assert!((pair.obstacle.x - ray.origin.x).abs() <= (p.x - ray.origin.x).abs());
        }

        // The entry point is on the left half of the square.
        assert!(pair.obstacle.x < 0.);
    }

    #[test]
    fn ray_above_the_obstacle_misses() {
        let polygon = Polygon::square(6., [0., 0.], 30.).unwrap();
        let ray = Ray::horizontal(-10., 10., 9.9);

        assert_eq!(resolve(&ray, &polygon, &backplane_at(10., 10.)), None);
    }

    #[test]
    fn ray_below_the_obstacle_misses() {
        let polygon = Polygon::square(6., [0., 0.], 30.).unwrap();
        let ray = Ray::horizontal(-10., 10., -8.);

        assert_eq!(resolve(&ray, &polygon, &backplane_at(10., 10.)), None);
    }

    #[test]
    fn missing_backplane_drops_the_pair() {
        // The backplane sits outside the ray's x-extent: no pair even though
        // the obstacle is hit.
        let polygon = Polygon::square(6., [0., 0.], 30.).unwrap();
        let ray = Ray::horizontal(-10., 10., 0.);

        assert_eq!(resolve(&ray, &polygon, &backplane_at(11., 10.)), None);
    }

    #[test]
    fn collinear_edge_is_not_a_hit() {
        // An axis-aligned square has two horizontal edges; a ray exactly
        // collinear with the top edge must resolve deterministically to a
        // point hit on a vertical edge, not panic or hit the overlap.
        let polygon = Polygon::square(6., [0., 0.], 0.).unwrap();
        let ray = Ray::horizontal(-10., 10., 3.);

        let pair = resolve(&ray, &polygon, &backplane_at(10., 10.)).unwrap();

        // The vertical edges still cross the ray at their endpoints.
        assert!((pair.obstacle.x.abs() - 3.).abs() < GEOMETRY_EPSILON);
    }

    #[test]
    fn resolution_is_deterministic() {
        let polygon = Polygon::square(6., [1., -1.], 12.).unwrap();
        let ray = Ray::horizontal(-10., 10., -0.5);
        let backplane = backplane_at(10., 10.);

        assert_eq!(
            resolve(&ray, &polygon, &backplane),
            resolve(&ray, &polygon, &backplane)
        );
    }
}
