use nalgebra::DVectorView;

pub mod ok_system;

pub trait SolvedSystem {
    /// Weighted combination of the conditioning values.
    fn estimate(&self, values: &[f64]) -> f64;
    fn weights(&self) -> DVectorView<'_, f64>;
}
