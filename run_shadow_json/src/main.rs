use ombre::{
    rand::{rngs::StdRng, SeedableRng},
    Simulation, SimulationParams,
};
use ombre_json::{serde_json, JsonDes};

use std::{error::Error, fs::File};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);

    let params = match args.next() {
        Some(file_path) => {
            SimulationParams::from_json(&serde_json::from_reader(File::open(file_path)?)?)?
        }
        None => SimulationParams::default(),
    };

    let rng = match args.next() {
        Some(arg) => StdRng::seed_from_u64(
            arg.parse()
                .expect("expected an integer rng seed as second argument"),
        ),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "obstacle: side {}, rotated {} degrees, centered at ({}, {}); backplane at x = {}",
        params.obstacle.side_length,
        params.obstacle.rotation_degrees,
        params.obstacle.center.x,
        params.obstacle.center.y,
        params.backplane_x,
    );

    let simulation = Simulation::new(params, rng)?;

    ombre_glium::SimulationWindow::default().run(simulation, Default::default());

    Ok(())
}
