use crate::{resolve, ConfigError, Domain, Float, Polygon, Ray, RaySampler, Segment, Vect};

use rand::Rng;

/// The two points where one ray crosses the obstacle boundary and the
/// backplane, respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitPair {
    pub obstacle: Vect,
    pub backplane: Vect,
}

/// Three ordered points, ready to be handed to a renderer as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle(pub [Vect; 3]);

/// Append-only history of everything the simulation has produced so far.
///
/// Nothing is ever removed or rewritten; readers only ever observe fully
/// formed entries through the slice views below.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    rays: Vec<Ray>,
    hit_pairs: Vec<HitPair>,
    triangles: Vec<Triangle>,
}

impl SceneState {
    fn push_ray(&mut self, ray: Ray) {
        self.rays.push(ray);
    }

    /// Append a hit pair and extend the shadow strip.
    ///
    /// Once a second pair exists, every new pair closes the quad between
    /// itself and its predecessor, split into two triangles emitted in a
    /// fixed order:
    ///
    /// - `(prev.obstacle, cur.obstacle, prev.backplane)`
    /// - `(prev.backplane, cur.obstacle, cur.backplane)`
    ///
    /// The winding still flips with the vertical order of consecutive
    /// samples, so renderers must draw these with face culling disabled.
    fn push_hit_pair(&mut self, pair: HitPair) {
        if let Some(prev) = self.hit_pairs.last().copied() {
            self.triangles
                .push(Triangle([prev.obstacle, pair.obstacle, prev.backplane]));
            self.triangles
                .push(Triangle([prev.backplane, pair.obstacle, pair.backplane]));
        }

        self.hit_pairs.push(pair);
    }

    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    #[inline]
    pub fn hit_pairs(&self) -> &[HitPair] {
        &self.hit_pairs
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

/// Description of the square obstacle, before vertex generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleParams {
    pub side_length: Float,
    pub center: Vect,
    pub rotation_degrees: Float,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        Self {
            side_length: 6.,
            center: Vect::zeros(),
            rotation_degrees: 30.,
        }
    }
}

/// Global simulation parameters, validated once by [`Simulation::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// The domain spans `[-domain_half_extent, domain_half_extent]` in both axes.
    pub domain_half_extent: Float,
    pub obstacle: ObstacleParams,
    /// x-coordinate of the vertical backplane, spanning the domain's full
    /// y-range. Defaults to the domain's right edge.
    pub backplane_x: Float,
    /// A new ray is sampled every `spawn_period`-th tick.
    pub spawn_period: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            domain_half_extent: 10.,
            obstacle: ObstacleParams::default(),
            backplane_x: 10.,
            spawn_period: 10,
        }
    }
}

/// The tick-driven shadow simulation.
///
/// One logical thread drives it: each [`tick`](Self::tick) may sample a ray,
/// resolve it, and extend the scene, after which the caller is free to read
/// the scene through the slice accessors until the next tick.
#[derive(Clone, Debug)]
pub struct Simulation<R> {
    polygon: Polygon,
    backplane: Segment,
    domain: Domain,
    sampler: RaySampler<R>,
    scene: SceneState,
    spawn_period: u64,
    frame: u64,
}

impl<R: Rng> Simulation<R> {
    /// Validate `params` and build the scene. Fails fast with a descriptive
    /// [`ConfigError`]; nothing is partially constructed.
    pub fn new(params: SimulationParams, rng: R) -> Result<Self, ConfigError> {
        if params.spawn_period == 0 {
            return Err(ConfigError::ZeroSpawnPeriod);
        }

        let domain = Domain::new(params.domain_half_extent)?;

        let polygon = Polygon::square(
            params.obstacle.side_length,
            params.obstacle.center,
            params.obstacle.rotation_degrees,
        )?;

        let backplane = Segment::new(
            [params.backplane_x, domain.y_min()],
            [params.backplane_x, domain.y_max()],
        );

        Ok(Self {
            polygon,
            backplane,
            domain,
            sampler: RaySampler::new(rng),
            scene: SceneState::default(),
            spawn_period: params.spawn_period,
            frame: 0,
        })
    }

    /// Advance the simulation by one frame.
    ///
    /// A ray is sampled only on every `spawn_period`-th call (the first call
    /// included); the others just advance the frame counter.
    pub fn tick(&mut self) {
        if self.frame % self.spawn_period == 0 {
            self.step();
        }

        self.frame += 1;
    }

    /// Sample, resolve, and record exactly one ray, ignoring the throttle.
    ///
    /// The ray always enters the history; a hit pair (and up to two new
    /// triangles) only when it crosses both the obstacle and the backplane.
    pub fn step(&mut self) {
        let ray = self.sampler.next_ray(&self.domain);
        self.scene.push_ray(ray);

        if let Some(pair) = resolve(&ray, &self.polygon, &self.backplane) {
            self.scene.push_hit_pair(pair);
        }
    }

    /// The obstacle's vertex loop (closed: the last vertex connects back to
    /// the first).
    #[inline]
    pub fn obstacle_outline(&self) -> &[Vect] {
        self.polygon.vertices()
    }

    #[inline]
    pub fn ray_history(&self) -> &[Ray] {
        self.scene.rays()
    }

    #[inline]
    pub fn hit_pairs(&self) -> &[HitPair] {
        self.scene.hit_pairs()
    }

    #[inline]
    pub fn shadow_triangles(&self) -> &[Triangle] {
        self.scene.triangles()
    }

    #[inline]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn backplane(&self) -> &Segment {
        &self.backplane
    }

    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[inline]
    pub fn spawn_period(&self) -> u64 {
        self.spawn_period
    }
}
