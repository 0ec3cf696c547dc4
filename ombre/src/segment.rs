use crate::{Vect, GEOMETRY_EPSILON};

/// A bounded, directed line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vect,
    pub end: Vect,
}

/// The result of intersecting two segments.
///
/// Collinear configurations (overlapping or not) are reported as
/// [`Collinear`](Self::Collinear), never as a point, even when the overlap is
/// a single shared endpoint. Callers that only care about transversal
/// crossings treat it as a miss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    Empty,
    Point(Vect),
    Collinear,
}

impl Segment {
    #[inline]
    pub fn new(start: impl Into<Vect>, end: impl Into<Vect>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    #[inline]
    pub fn direction(&self) -> Vect {
        self.end - self.start
    }

    /// Intersect `self` with `other`.
    ///
    /// Solves `self.start + t * r = other.start + u * s` and accepts the
    /// solution only when both parameters lie in `[0, 1]`. A vanishing
    /// denominator means the segments are parallel: collinear if the offset
    /// between them is also parallel to `r`, disjoint otherwise.
    pub fn intersection(&self, other: &Self) -> SegmentIntersection {
        let r = self.direction();
        let s = other.direction();
        let qp = other.start - self.start;

        let denom = r.perp(&s);
        if denom.abs() < GEOMETRY_EPSILON {
            return if qp.perp(&r).abs() < GEOMETRY_EPSILON {
                SegmentIntersection::Collinear
            } else {
                SegmentIntersection::Empty
            };
        }

        let t = qp.perp(&s) / denom;
        let u = qp.perp(&r) / denom;

        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            SegmentIntersection::Point(self.start + r * t)
        } else {
            SegmentIntersection::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transversal_crossing() {
        let a = Segment::new([-1., 0.], [1., 0.]);
        let b = Segment::new([0., -1.], [0., 1.]);

        let SegmentIntersection::Point(p) = a.intersection(&b) else {
            panic!("expected a point intersection");
        };

        assert!((p - Vect::new(0., 0.)).norm() < GEOMETRY_EPSILON);
    }

    #[test]
    fn crossing_is_symmetric() {
        let a = Segment::new([-3., -3.], [3., 3.]);
        let b = Segment::new([-3., 3.], [3., -3.]);

        assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        let a = Segment::new([-1., 0.], [1., 0.]);
        let b = Segment::new([2., -1.], [2., 1.]);

        assert_eq!(a.intersection(&b), SegmentIntersection::Empty);
    }

    #[test]
    fn lines_cross_but_segments_miss() {
        // The supporting lines intersect at the origin, outside both segments.
        let a = Segment::new([1., 1.], [2., 2.]);
        let b = Segment::new([-1., 1.], [-2., 2.]);

        assert_eq!(a.intersection(&b), SegmentIntersection::Empty);
    }

    #[test]
    fn parallel_offset_segments_are_empty() {
        let a = Segment::new([0., 0.], [4., 0.]);
        let b = Segment::new([0., 1.], [4., 1.]);

        assert_eq!(a.intersection(&b), SegmentIntersection::Empty);
    }

    #[test]
    fn collinear_overlap_is_not_a_point() {
        let a = Segment::new([0., 2.], [4., 2.]);
        let b = Segment::new([2., 2.], [6., 2.]);

        assert_eq!(a.intersection(&b), SegmentIntersection::Collinear);
    }

    #[test]
    fn collinear_disjoint_is_still_collinear() {
        let a = Segment::new([0., 0.], [1., 0.]);
        let b = Segment::new([5., 0.], [6., 0.]);

        assert_eq!(a.intersection(&b), SegmentIntersection::Collinear);
    }

    #[test]
    fn shared_endpoint_is_a_point() {
        let a = Segment::new([0., 0.], [1., 1.]);
        let b = Segment::new([1., 1.], [2., 0.]);

        let SegmentIntersection::Point(p) = a.intersection(&b) else {
            panic!("expected a point intersection");
        };

        assert!((p - Vect::new(1., 1.)).norm() < GEOMETRY_EPSILON);
    }
}
