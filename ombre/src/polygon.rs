use crate::{ConfigError, Float, Segment, Vect};

use nalgebra::Rotation2;

/// An immutable obstacle polygon.
///
/// The vertex loop is produced once at construction, with any rotation and
/// translation already baked in. Moving or rotating an obstacle means
/// building a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vect>,
}

impl Polygon {
    /// Build a polygon from an explicit (closed) vertex loop.
    pub fn try_new(vertices: Vec<Vect>) -> Result<Self, ConfigError> {
        if vertices.len() < 3 {
            return Err(ConfigError::TooFewVertices(vertices.len()));
        }

        Ok(Self { vertices })
    }

    /// Build a square obstacle from its side length, center, and rotation
    /// (in degrees, counterclockwise).
    ///
    /// The square is laid out axis-aligned around the origin, rotated, then
    /// translated to `center`.
    pub fn square(
        side_length: Float,
        center: impl Into<Vect>,
        rotation_degrees: Float,
    ) -> Result<Self, ConfigError> {
        if side_length <= 0. {
            return Err(ConfigError::NonPositiveSideLength(side_length));
        }

        let h = side_length / 2.;
        let rotation = Rotation2::new(rotation_degrees.to_radians());
        let center = center.into();

        let vertices = [[-h, -h], [h, -h], [h, h], [-h, h]]
            .map(Vect::from)
            .map(|corner| rotation * corner + center)
            .to_vec();

        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vect] {
        &self.vertices
    }

    /// One segment per consecutive vertex pair, including the closing
    /// last-to-first edge.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Whether `p` lies strictly inside the polygon (even-odd crossing rule).
    pub fn contains(&self, p: &Vect) -> bool {
        let mut inside = false;
        let mut j = self.vertices.len() - 1;

        for i in 0..self.vertices.len() {
            let (a, b) = (&self.vertices[i], &self.vertices[j]);

            if (a.y > p.y) != (b.y > p.y) {
                let x_at_py = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_at_py {
                    inside = !inside;
                }
            }

            j = i;
        }

        inside
    }
}
