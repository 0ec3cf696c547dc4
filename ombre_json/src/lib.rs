use ombre::{Float, ObstacleParams, SimulationParams, Vect};

use std::error::Error;

pub use serde_json;

/// Read a fixed-size array of floats out of a JSON array, rejecting wrong
/// lengths and non-numeric entries.
pub fn json_array_to_float_array<const N: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; N]> {
    let array: &[serde_json::Value; N] = json_array.try_into().ok()?;

    let mut coords = [0.; N];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64()?;
    }
    Some(coords)
}

pub fn json_array_to_vector(json_array: &[serde_json::Value]) -> Option<Vect> {
    json_array_to_float_array(json_array).map(Vect::from)
}

fn float_field(
    json: &serde_json::Value,
    name: &str,
    default: Float,
) -> Result<Float, Box<dyn Error>> {
    match json.get(name) {
        Some(value) => value
            .as_f64()
            .ok_or_else(|| format!("\"{name}\" must be a number").into()),
        None => Ok(default),
    }
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl JsonSer for ObstacleParams {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "side_length": self.side_length,
            "center": self.center.as_slice(),
            "rotation_degrees": self.rotation_degrees,
        })
    }
}

impl JsonDes for ObstacleParams {
    /// Deserialize obstacle parameters from a JSON object.
    ///
    /// The JSON object must follow the following format (every field is
    /// optional and falls back to its default):
    ///
    /// ```json
    /// {
    ///     "side_length": 6.0,
    ///     "center": [0.0, 0.0],
    ///     "rotation_degrees": 30.0
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let defaults = Self::default();

        let center = match json.get("center") {
            Some(value) => {
                let array = value.as_array().ok_or("\"center\" must be an array")?;
                json_array_to_vector(array).ok_or("\"center\" must hold exactly 2 numbers")?
            }
            None => defaults.center,
        };

        Ok(Self {
            side_length: float_field(json, "side_length", defaults.side_length)?,
            center,
            rotation_degrees: float_field(json, "rotation_degrees", defaults.rotation_degrees)?,
        })
    }
}

impl JsonSer for SimulationParams {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "domain_half_extent": self.domain_half_extent,
            "obstacle": self.obstacle.to_json(),
            "backplane_x": self.backplane_x,
            "spawn_period": self.spawn_period,
        })
    }
}

impl JsonDes for SimulationParams {
    /// Deserialize simulation parameters from a JSON object.
    ///
    /// The JSON object must follow the following format (every field is
    /// optional and falls back to its default; when `backplane_x` is absent
    /// it tracks the domain's right edge):
    ///
    /// ```json
    /// {
    ///     "domain_half_extent": 10.0,
    ///     "obstacle": { /* see ObstacleParams */ },
    ///     "backplane_x": 10.0,
    ///     "spawn_period": 10
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let defaults = Self::default();

        let domain_half_extent =
            float_field(json, "domain_half_extent", defaults.domain_half_extent)?;

        let obstacle = match json.get("obstacle") {
            Some(value) => ObstacleParams::from_json(value)?,
            None => defaults.obstacle,
        };

        let backplane_x = float_field(json, "backplane_x", domain_half_extent)?;

        let spawn_period = match json.get("spawn_period") {
            Some(value) => value
                .as_u64()
                .ok_or("\"spawn_period\" must be a positive integer")?,
            None => defaults.spawn_period,
        };

        Ok(Self {
            domain_half_extent,
            obstacle,
            backplane_x,
            spawn_period,
        })
    }
}
