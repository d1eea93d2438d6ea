//! Multi-axis noise: one scalar [`NoiseModel`] per axis, sampled
//! independently (no cross-axis correlation).

use nalgebra::Vector3;
use rand::Rng;

use crate::model::NoiseModel;

// ---------------------------------------------------------------------------
// AxisBank
// ---------------------------------------------------------------------------

/// Independent noise per axis.
///
/// Covers both the 3-axis IMU channels and the 12-slot joint channels; the
/// [`Vector3`] helpers are thin views over the slice API.
#[derive(Clone, Debug)]
pub struct AxisBank {
    models: Vec<NoiseModel>,
}

impl AxisBank {
    /// Create from a list of per-axis noise models.
    #[must_use]
    pub const fn new(models: Vec<NoiseModel>) -> Self {
        Self { models }
    }

    /// Create from a single noise model cloned across `dim` axes.
    #[must_use]
    pub fn uniform_across(model: &NoiseModel, dim: usize) -> Self {
        Self {
            models: vec![model.clone(); dim],
        }
    }

    /// Number of axes.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.models.len()
    }

    /// Returns a reference to the per-axis models.
    #[must_use]
    pub fn models(&self) -> &[NoiseModel] {
        &self.models
    }

    /// Sample one value per axis into `out` (same length as the bank).
    pub fn sample_into<R: Rng + ?Sized>(&mut self, out: &mut [f64], rng: &mut R) {
        debug_assert_eq!(out.len(), self.models.len());
        for (slot, model) in out.iter_mut().zip(self.models.iter_mut()) {
            *slot = model.sample(rng);
        }
    }

    /// Add per-axis noise to `values` in place.
    pub fn apply_slice<R: Rng + ?Sized>(&mut self, values: &mut [f64], rng: &mut R) {
        debug_assert_eq!(values.len(), self.models.len());
        for (value, model) in values.iter_mut().zip(self.models.iter_mut()) {
            *value = model.apply(*value, rng);
        }
    }

    /// Sample a 3-axis bank as a [`Vector3`].
    ///
    /// # Panics
    ///
    /// Panics if the bank does not have exactly 3 axes.
    pub fn sample_vector3<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vector3<f64> {
        assert_eq!(self.models.len(), 3, "sample_vector3 requires a 3-axis bank");
        let mut out = [0.0; 3];
        self.sample_into(&mut out, rng);
        Vector3::new(out[0], out[1], out[2])
    }

    /// Add 3-axis noise to a [`Vector3`].
    ///
    /// # Panics
    ///
    /// Panics if the bank does not have exactly 3 axes.
    pub fn apply_vector3<R: Rng + ?Sized>(
        &mut self,
        value: &Vector3<f64>,
        rng: &mut R,
    ) -> Vector3<f64> {
        value + self.sample_vector3(rng)
    }

    /// Accumulated state per axis (non-zero only for random-walk axes).
    #[must_use]
    pub fn current(&self) -> Vec<f64> {
        self.models.iter().map(NoiseModel::current).collect()
    }

    /// Reset all axes.  Call only on explicit re-initialization.
    pub fn reset(&mut self) {
        for model in &mut self.models {
            model.reset();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn bank_dim() {
        let bank = AxisBank::new(vec![
            NoiseModel::white(0.1).unwrap(),
            NoiseModel::white(0.2).unwrap(),
        ]);
        assert_eq!(bank.dim(), 2);
    }

    #[test]
    fn uniform_across_clones() {
        let bank = AxisBank::uniform_across(&NoiseModel::white(0.1).unwrap(), 12);
        assert_eq!(bank.dim(), 12);
    }

    #[test]
    fn sample_into_fills_all_slots() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::white(1.0).unwrap(), 5);
        let mut out = [0.0; 5];
        bank.sample_into(&mut out, &mut rng);
        assert!(out.iter().all(|v| v.abs() > f64::EPSILON));
    }

    #[test]
    fn apply_slice_is_elementwise() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::white(0.0).unwrap(), 3);
        let mut values = [1.0, 2.0, 3.0];
        bank.apply_slice(&mut values, &mut rng);
        assert_eq!(values, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn sample_vector3_shape() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::white(1.0).unwrap(), 3);
        let v = bank.sample_vector3(&mut rng);
        assert!(v.norm() > 0.0);
    }

    #[test]
    #[should_panic(expected = "sample_vector3 requires a 3-axis bank")]
    fn sample_vector3_wrong_dim_panics() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::white(1.0).unwrap(), 4);
        let _ = bank.sample_vector3(&mut rng);
    }

    #[test]
    fn apply_vector3_noiseless_is_identity() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::white(0.0).unwrap(), 3);
        let v = Vector3::new(0.1, -0.2, 9.81);
        assert_relative_eq!(bank.apply_vector3(&v, &mut rng), v);
    }

    #[test]
    fn deterministic_across_identical_seeds() {
        let run = || {
            let mut rng = test_rng();
            let mut bank = AxisBank::uniform_across(&NoiseModel::white(1.0).unwrap(), 3);
            bank.sample_vector3(&mut rng)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn walk_axes_are_independent() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::random_walk(1.0).unwrap(), 3);
        let v = bank.sample_vector3(&mut rng);
        assert_ne!(v.x, v.y);
        assert_ne!(v.y, v.z);
    }

    #[test]
    fn reset_clears_walk_state() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::random_walk(1.0).unwrap(), 3);
        bank.sample_vector3(&mut rng);
        assert!(bank.current().iter().any(|v| v.abs() > f64::EPSILON));
        bank.reset();
        assert!(bank.current().iter().all(|v| v.abs() < f64::EPSILON));
    }

    #[test]
    fn current_tracks_last_walk_sample() {
        let mut rng = test_rng();
        let mut bank = AxisBank::uniform_across(&NoiseModel::random_walk(0.5).unwrap(), 3);
        let v = bank.sample_vector3(&mut rng);
        let current = bank.current();
        assert_relative_eq!(current[0], v.x);
        assert_relative_eq!(current[1], v.y);
        assert_relative_eq!(current[2], v.z);
    }

    // -- Send + Sync --

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn axis_bank_is_send_sync() {
        assert_send_sync::<AxisBank>();
    }
}
