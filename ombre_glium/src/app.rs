use super::*;

use gl::index::{NoIndices, PrimitiveType};
use na::Orthographic3;
use ombre::Simulation;

const LINE_LOOP: NoIndices = NoIndices(PrimitiveType::LineLoop);
const LINES: NoIndices = NoIndices(PrimitiveType::LinesList);
const TRIANGLES: NoIndices = NoIndices(PrimitiveType::TrianglesList);
const POINTS: NoIndices = NoIndices(PrimitiveType::Points);

const VERTEX_SHADER_SRC: &str = r"
    #version 140

    in vec2 position;
    uniform mat4 projection;

    void main() {
        gl_Position = projection * vec4(position, 0.0, 1.0);
    }
";

const FRAGMENT_SHADER_SRC: &str = r"
    #version 140

    uniform vec4 color_vec;

    out vec4 color;

    void main() {
        color = color_vec;
    }
";

const HIT_MARKER_GEOMETRY_SHADER_SRC: &str = r"
    #version 330

    layout (points) in;
    layout (line_strip, max_vertices = 4) out;

    mat4 translate(vec2 delta) {
        return(mat4(
            vec4(1.0, 0.0, 0.0, 0.0),
            vec4(0.0, 1.0, 0.0, 0.0),
            vec4(0.0, 0.0, 1.0, 0.0),
            vec4(delta, 0.0, 1.0)
        ));
    }

    uniform float aspect;

    void main() {
        vec4 pos = gl_in[0].gl_Position;

        float v = 0.0125;

        vec2 t1 = vec2(v, v * aspect);

        gl_Position = translate(t1) * pos;
        EmitVertex();

        gl_Position = translate(-t1) * pos;
        EmitVertex();
        EndPrimitive();

        vec2 t2 = vec2(v, -v * aspect);

        gl_Position = translate(t2) * pos;
        EmitVertex();

        gl_Position = translate(-t2) * pos;
        EmitVertex();
        EndPrimitive();
    }
";

/// GPU-side mirror of the scene's append-only logs.
///
/// Buffers are re-uploaded only when the corresponding log has grown since
/// the last frame; the obstacle outline never changes after construction.
pub(crate) struct ShadowRenderData {
    obstacle: gl::VertexBuffer<Vertex2>,
    latest_ray: gl::VertexBuffer<Vertex2>,
    occluded: gl::VertexBuffer<Vertex2>,
    hit_markers: gl::VertexBuffer<Vertex2>,
    shadow: gl::VertexBuffer<Vertex2>,
    uploaded_rays: usize,
    uploaded_pairs: usize,
    program: gl::Program,
    marker_program: gl::Program,
    params: RenderParams,
    half_extent: f32,
}

impl ShadowRenderData {
    pub(crate) fn new<R: Rng>(
        simulation: &Simulation<R>,
        display: &gl::Display,
        params: RenderParams,
    ) -> Self {
        let program =
            gl::Program::from_source(display, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC, None)
                .unwrap();

        let marker_program = gl::Program::from_source(
            display,
            VERTEX_SHADER_SRC,
            FRAGMENT_SHADER_SRC,
            Some(HIT_MARKER_GEOMETRY_SHADER_SRC),
        )
        .unwrap();

        let outline: Vec<Vertex2> = simulation
            .obstacle_outline()
            .iter()
            .copied()
            .map(Vertex2::from)
            .collect();

        Self {
            obstacle: gl::VertexBuffer::immutable(display, &outline).unwrap(),
            latest_ray: gl::VertexBuffer::empty_immutable(display, 0).unwrap(),
            occluded: gl::VertexBuffer::empty_immutable(display, 0).unwrap(),
            hit_markers: gl::VertexBuffer::empty_immutable(display, 0).unwrap(),
            shadow: gl::VertexBuffer::empty_immutable(display, 0).unwrap(),
            uploaded_rays: 0,
            uploaded_pairs: 0,
            program,
            marker_program,
            params,
            half_extent: simulation.domain().half_extent() as f32,
        }
    }

    /// Re-upload the buffers whose source logs have grown.
    fn sync<R: Rng>(&mut self, simulation: &Simulation<R>, display: &gl::Display) {
        let rays = simulation.ray_history();
        if rays.len() != self.uploaded_rays {
            // Only the newest ray is drawn; older ones have either been
            // absorbed into the shadow strip or missed entirely.
            let latest = rays.last().unwrap();
            let vertices = [Vertex2::from(latest.origin), Vertex2::from(latest.end)];

            self.latest_ray = gl::VertexBuffer::immutable(display, &vertices).unwrap();
            self.uploaded_rays = rays.len();
        }

        let pairs = simulation.hit_pairs();
        if pairs.len() != self.uploaded_pairs {
            let last = pairs.last().unwrap();
            log::debug!(
                "hit pair #{}: obstacle ({:.3}, {:.3}), backplane ({:.3}, {:.3})",
                pairs.len(),
                last.obstacle.x,
                last.obstacle.y,
                last.backplane.x,
                last.backplane.y,
            );

            let mut occluded = Vec::with_capacity(pairs.len() * 2);
            let mut markers = Vec::with_capacity(pairs.len() * 2);

            for pair in pairs {
                occluded.push(Vertex2::from(pair.obstacle));
                occluded.push(Vertex2::from(pair.backplane));
                markers.push(Vertex2::from(pair.obstacle));
                markers.push(Vertex2::from(pair.backplane));
            }

            let shadow: Vec<Vertex2> = simulation
                .shadow_triangles()
                .iter()
                .flat_map(|tri| tri.0)
                .map(Vertex2::from)
                .collect();

            self.occluded = gl::VertexBuffer::immutable(display, &occluded).unwrap();
            self.hit_markers = gl::VertexBuffer::immutable(display, &markers).unwrap();
            self.shadow = gl::VertexBuffer::immutable(display, &shadow).unwrap();
            self.uploaded_pairs = pairs.len();
        }
    }

    pub(crate) fn run<R: Rng + 'static>(
        mut self,
        mut simulation: Simulation<R>,
        display: gl::Display,
        events_loop: glutin::event_loop::EventLoop<()>,
    ) {
        use glutin::{event, event_loop};

        events_loop.run(move |ev, _, control_flow| match ev {
            event::Event::WindowEvent { event, .. } => match event {
                event::WindowEvent::CloseRequested => {
                    log::info!(
                        "closing after {} rays, {} hit pairs, {} triangles",
                        simulation.ray_history().len(),
                        simulation.hit_pairs().len(),
                        simulation.shadow_triangles().len(),
                    );
                    *control_flow = event_loop::ControlFlow::Exit;
                }

                event::WindowEvent::Resized(physical_size) => {
                    display.gl_window().resize(physical_size);
                }
                _ => {}
            },
            event::Event::RedrawRequested(_) => {
                simulation.tick();
                self.sync(&simulation, &display);
                self.render(&display);
            }
            event::Event::MainEventsCleared => display.gl_window().window().request_redraw(),
            _ => (),
        });
    }

    /// An aspect-corrected orthographic projection framing the whole domain.
    fn projection(&self, display: &gl::Display) -> (Orthographic3<f32>, f32) {
        let dpi::PhysicalSize { width, height } = display.gl_window().window().inner_size();
        let aspect = if height == 0 {
            1.
        } else {
            width as f32 / height as f32
        };

        let e = self.half_extent;
        let (w, h) = if aspect >= 1. {
            (e * aspect, e)
        } else {
            (e, e / aspect)
        };

        (Orthographic3::new(-w, w, -h, h, -1., 1.), aspect)
    }

    fn render(&self, display: &gl::Display) {
        let (ortho, aspect) = self.projection(display);
        let projection: [[f32; 4]; 4] = (*ortho.as_matrix()).into();

        let mut target = display.draw();

        use gl::Surface;
        let [r, g, b, a] = self.params.bg_color;
        target.clear_color(r, g, b, a);

        let draw_params = gl::DrawParameters {
            blend: gl::Blend::alpha_blending(),
            // The strip's winding is not consistent, faces must never be culled.
            backface_culling: gl::draw_parameters::BackfaceCullingMode::CullingDisabled,
            ..Default::default()
        };

        for (buffer, indices, color) in [
            (&self.shadow, TRIANGLES, self.params.shadow_color),
            (&self.occluded, LINES, self.params.occluded_color),
            (&self.obstacle, LINE_LOOP, self.params.obstacle_color),
            (&self.latest_ray, LINES, self.params.ray_color),
        ] {
            target
                .draw(
                    buffer,
                    indices,
                    &self.program,
                    &gl::uniform! {
                        projection: projection,
                        color_vec: color,
                    },
                    &draw_params,
                )
                .unwrap();
        }

        target
            .draw(
                &self.hit_markers,
                POINTS,
                &self.marker_program,
                &gl::uniform! {
                    projection: projection,
                    color_vec: self.params.hit_color,
                    aspect: aspect,
                },
                &draw_params,
            )
            .unwrap();

        target.finish().unwrap();
    }
}
