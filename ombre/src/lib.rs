pub use nalgebra;
pub use rand;

use nalgebra::SVector;

pub type Float = f64;

/// A point (or displacement) in the 2D simulation plane.
pub type Vect = SVector<Float, 2>;

/// Tolerance used by all geometric predicates in this crate.
///
/// Large enough to absorb the roundoff of coordinates at the scale of the
/// simulation domain, small enough to not swallow genuine crossings.
pub const GEOMETRY_EPSILON: Float = Float::EPSILON * 64.0;

mod polygon;
mod resolver;
mod sampler;
mod scene;
mod segment;

pub use polygon::*;
pub use resolver::*;
pub use sampler::*;
pub use scene::*;
pub use segment::*;

/// Why a simulation (or one of its pieces) could not be constructed.
///
/// Validation happens once, up front: after construction succeeds, no
/// geometric operation in this crate can fail fatally.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveSideLength(Float),
    NonPositiveDomainExtent(Float),
    ZeroSpawnPeriod,
    TooFewVertices(usize),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::NonPositiveSideLength(l) => {
                write!(f, "obstacle side length must be positive, got {l}")
            }
            Self::NonPositiveDomainExtent(e) => {
                write!(f, "domain half-extent must be positive, got {e}")
            }
            Self::ZeroSpawnPeriod => f.write_str("spawn period must be at least 1"),
            Self::TooFewVertices(n) => {
                write!(f, "a polygon needs at least 3 vertices, got {n}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
