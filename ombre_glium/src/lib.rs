use ombre::{nalgebra as na, rand::Rng, Simulation, Vect};

pub use glium as gl;
pub use ombre;

use gl::{backend::glutin::DisplayCreationError, glutin};
use glutin::{dpi, event_loop, window};

mod app;

use app::ShadowRenderData;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex2 {
    pub position: [f32; 2],
}

gl::implement_vertex!(Vertex2, position);

impl From<Vect> for Vertex2 {
    fn from(v: Vect) -> Self {
        Self {
            position: v.map(|s| s as f32).into(),
        }
    }
}

/// Colors (RGBA) for each primitive class the scene produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub bg_color: [f32; 4],
    pub obstacle_color: [f32; 4],
    /// The most recently sampled ray.
    pub ray_color: [f32; 4],
    /// The occluded stretches, from each obstacle hit to its backplane hit.
    pub occluded_color: [f32; 4],
    /// The hit-point markers on the obstacle and the backplane.
    pub hit_color: [f32; 4],
    /// The triangulated shadow infill.
    pub shadow_color: [f32; 4],
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            bg_color: [0., 0., 0., 1.],
            obstacle_color: [1., 1., 1., 1.],
            ray_color: [0., 1., 0., 1.],
            occluded_color: [1., 0., 1., 1.],
            hit_color: [1., 0., 0., 1.],
            shadow_color: [0.5, 0.5, 0.5, 0.8],
        }
    }
}

/// A handle for the window used to visualize simulations.
pub struct SimulationWindow {
    events_loop: event_loop::EventLoop<()>,
    display: gl::Display,
}

impl SimulationWindow {
    /// Create a new window to visualize simulations in from a `winit`
    /// [`WindowBuilder`](window::WindowBuilder) and a [`glutin::ContextBuilder`].
    #[inline]
    pub fn new<T: glutin::ContextCurrentState>(
        wb: window::WindowBuilder,
        cb: glutin::ContextBuilder<T>,
    ) -> Result<Self, DisplayCreationError> {
        let events_loop = event_loop::EventLoop::default();
        gl::Display::new(wb, cb, &events_loop).map(|display| Self {
            events_loop,
            display,
        })
    }

    /// Run `simulation` in this window, ticking it once per frame, until the
    /// window is closed.
    pub fn run<R: Rng + 'static>(self, simulation: Simulation<R>, params: RenderParams) {
        let Self {
            events_loop,
            display,
        } = self;

        log::info!(
            "visualizing a domain of half-extent {}, one ray every {} frame(s)",
            simulation.domain().half_extent(),
            simulation.spawn_period(),
        );

        let render_data = ShadowRenderData::new(&simulation, &display, params);

        render_data.run(simulation, display, events_loop);
    }
}

impl Default for SimulationWindow {
    #[inline]
    fn default() -> Self {
        Self::new(
            window::WindowBuilder::new()
                .with_inner_size(dpi::LogicalSize::new(800, 800))
                .with_title("Ombre"),
            glutin::ContextBuilder::new()
                .with_vsync(true)
                .with_multisampling(1 << 3),
        )
        .expect("failed to build display")
    }
}
