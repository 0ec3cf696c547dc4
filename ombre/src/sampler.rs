use crate::{ConfigError, Float, Segment, Vect};

use rand::Rng;

/// The square simulation domain, spanning `[-half_extent, half_extent]` in
/// both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    half_extent: Float,
}

impl Domain {
    pub fn new(half_extent: Float) -> Result<Self, ConfigError> {
        if half_extent <= 0. {
            return Err(ConfigError::NonPositiveDomainExtent(half_extent));
        }

        Ok(Self { half_extent })
    }

    #[inline]
    pub fn half_extent(&self) -> Float {
        self.half_extent
    }

    #[inline]
    pub fn x_min(&self) -> Float {
        -self.half_extent
    }

    #[inline]
    pub fn x_max(&self) -> Float {
        self.half_extent
    }

    #[inline]
    pub fn y_min(&self) -> Float {
        -self.half_extent
    }

    #[inline]
    pub fn y_max(&self) -> Float {
        self.half_extent
    }
}

/// A horizontal light ray, directed left to right across the whole domain.
///
/// Both endpoints share the same `y` exactly, which is what keeps sampled
/// rays perfectly parallel to each other. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vect,
    pub end: Vect,
}

impl Ray {
    #[inline]
    pub fn horizontal(x_min: Float, x_max: Float, y: Float) -> Self {
        Self {
            origin: Vect::new(x_min, y),
            end: Vect::new(x_max, y),
        }
    }

    #[inline]
    pub fn y(&self) -> Float {
        self.origin.y
    }

    #[inline]
    pub fn segment(&self) -> Segment {
        Segment::new(self.origin, self.end)
    }
}

/// Draws one new ray per call from an explicitly owned random generator.
///
/// The generator is the only source of randomness in the whole simulation;
/// hand in a seeded one (see [`rand::SeedableRng`]) for reproducible runs.
#[derive(Clone, Debug)]
pub struct RaySampler<R> {
    rng: R,
}

impl<R: Rng> RaySampler<R> {
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The next ray: from the domain's left edge to its right edge, at a
    /// vertical offset drawn uniformly from the domain's y-range.
    pub fn next_ray(&mut self, domain: &Domain) -> Ray {
        let y = self.rng.gen_range(domain.y_min()..=domain.y_max());

        Ray::horizontal(domain.x_min(), domain.x_max(), y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn non_positive_extent_is_rejected() {
        assert_eq!(
            Domain::new(0.),
            Err(ConfigError::NonPositiveDomainExtent(0.))
        );
        assert_eq!(
            Domain::new(-1.),
            Err(ConfigError::NonPositiveDomainExtent(-1.))
        );
    }

    #[test]
    fn rays_are_horizontal_and_span_the_domain() {
        let domain = Domain::new(10.).unwrap();
        let mut sampler = RaySampler::new(StdRng::seed_from_u64(1));

        for _ in 0..100 {
            let ray = sampler.next_ray(&domain);

            assert_eq!(ray.origin.y, ray.end.y);
            assert_eq!(ray.origin.x, -10.);
            assert_eq!(ray.end.x, 10.);
            assert!((-10. ..=10.).contains(&ray.y()));
        }
    }

    #[test]
    fn same_seed_same_rays() {
        let domain = Domain::new(7.5).unwrap();

        let mut a = RaySampler::new(StdRng::seed_from_u64(42));
        let mut b = RaySampler::new(StdRng::seed_from_u64(42));

        for _ in 0..32 {
            assert_eq!(a.next_ray(&domain), b.next_ray(&domain));
        }
    }
}
