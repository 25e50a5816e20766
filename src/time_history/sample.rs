use nalgebra::Vector3;

use crate::constants::{Seconds, TsId};

/// One time-history sample of a channel.
///
/// Scalar quantities (pressure) keep their value in `components.x` with the other
/// two components at zero. The magnitude is never stored: [`Sample::magnitude`]
/// always derives it from the components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub ts_id: TsId,
    pub time: Seconds,
    pub components: Vector3<f64>,
}

impl Sample {
    pub fn new(ts_id: TsId, time: Seconds, components: Vector3<f64>) -> Self {
        Sample {
            ts_id,
            time,
            components,
        }
    }

    /// Euclidean norm `sqrt(x² + y² + z²)` of the components.
    pub fn magnitude(&self) -> f64 {
        self.components.norm()
    }
}

#[cfg(test)]
mod test_sample {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude_is_euclidean_norm() {
        let sample = Sample::new(10, 0.1, Vector3::new(3.0, -4.0, 12.0));
        assert_relative_eq!(sample.magnitude(), 13.0, epsilon = 1e-12);

        let pressure = Sample::new(10, 0.1, Vector3::new(-2.5, 0.0, 0.0));
        assert_relative_eq!(pressure.magnitude(), 2.5, epsilon = 1e-12);
    }
}
