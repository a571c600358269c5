use crate::scalar::Field;
use ndarray::{ArrayD, Dimension, IxDyn};

/// Dense amplitude tensor of one excitation class, tagged with its index
/// labels (e.g. "ai" or "abij"). The element storage is kept in row-major
/// order so that the flat element index doubles as the position within the
/// global index range of the owning [`FockVector`](crate::fock::FockVector).
#[derive(Clone, Debug)]
pub struct Tensor<F> {
    labels: &'static str,
    data: ArrayD<F>,
}

impl<F: Field> Tensor<F> {
    pub fn zeros(labels: &'static str, shape: &[usize]) -> Self {
        assert_eq!(
            labels.len(),
            shape.len(),
            "one index label per tensor axis is required"
        );
        Tensor {
            labels,
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    pub fn labels(&self) -> &'static str {
        self.labels
    }

    pub fn data(&self) -> &ArrayD<F> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<F> {
        &mut self.data
    }

    /// Number of elements of the tensor.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at the given row-major flat position.
    pub fn flat(&self, index: usize) -> F {
        self.as_slice()[index]
    }

    /// Overwrites the element at the given row-major flat position.
    pub fn set_flat(&mut self, index: usize, value: F) {
        let slice = self
            .data
            .as_slice_mut()
            .expect("amplitude tensors are stored contiguously");
        slice[index] = value;
    }

    fn as_slice(&self) -> &[F] {
        self.data
            .as_slice()
            .expect("amplitude tensors are stored contiguously")
    }

    /// Zeroes every element in which the two axes of any given pair carry
    /// the same orbital index. These slices are the Pauli-forbidden
    /// (non-antisymmetrizable or doubly-degenerate) excitations.
    pub fn zero_equal_pairs(&mut self, pairs: &[(usize, usize)]) {
        if pairs.is_empty() {
            return;
        }
        for (index, value) in self.data.indexed_iter_mut() {
            if pairs.iter().any(|&(p, q)| index[p] == index[q]) {
                *value = F::zero();
            }
        }
    }

    /// Applies `T[x] <- T[x] - T[permute(x)]` for one index transposition,
    /// with the right-hand side taken from the tensor before the update.
    pub fn antisymmetrize(&mut self, permutation: &[usize]) {
        assert_eq!(
            permutation.len(),
            self.data.ndim(),
            "transposition must cover every tensor axis"
        );
        let permuted = self.data.clone().permuted_axes(permutation);
        self.data -= &permuted;
    }

    /// Zeroes every element whose per-axis indices are neither all even nor
    /// all odd, i.e. whose index digits mix the two spin sublattices.
    pub fn zero_mixed_spin(&mut self) {
        for (index, value) in self.data.indexed_iter_mut() {
            let digits = (0..index.ndim()).map(|axis| index[axis]);
            let mut all_even = true;
            let mut all_odd = true;
            for digit in digits {
                all_even &= digit % 2 == 0;
                all_odd &= digit % 2 == 1;
            }
            if !(all_even || all_odd) {
                *value = F::zero();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::Tensor;

    fn doubles_2x2() -> Tensor<f64> {
        Tensor::zeros("abij", &[2, 2, 2, 2])
    }

    #[test]
    fn pauli_filter_zeroes_repeated_indices() {
        let mut t = doubles_2x2();
        for i in 0..t.len() {
            t.set_flat(i, 1.0);
        }
        t.zero_equal_pairs(&[(0, 1), (2, 3)]);
        assert_eq!(t.data()[[0, 0, 0, 1]], 0.0);
        assert_eq!(t.data()[[0, 1, 0, 0]], 0.0);
        assert_eq!(t.data()[[1, 1, 1, 1]], 0.0);
        assert_eq!(t.data()[[0, 1, 1, 0]], 1.0);
    }

    #[test]
    fn antisymmetrization_uses_the_pre_update_tensor() {
        let mut t = doubles_2x2();
        t.data_mut()[[0, 1, 0, 1]] = 1.0;
        // hole exchange then particle exchange, as in the builder
        t.antisymmetrize(&[0, 1, 3, 2]);
        t.antisymmetrize(&[1, 0, 2, 3]);
        assert_eq!(t.data()[[0, 1, 0, 1]], 1.0);
        assert_eq!(t.data()[[0, 1, 1, 0]], -1.0);
        assert_eq!(t.data()[[1, 0, 0, 1]], -1.0);
        assert_eq!(t.data()[[1, 0, 1, 0]], 1.0);
    }

    #[test]
    fn spin_filter_keeps_pure_parity_elements() {
        let mut t: Tensor<f64> = Tensor::zeros("ai", &[3, 3]);
        for i in 0..t.len() {
            t.set_flat(i, 1.0);
        }
        t.zero_mixed_spin();
        assert_eq!(t.data()[[0, 2]], 1.0);
        assert_eq!(t.data()[[1, 1]], 1.0);
        assert_eq!(t.data()[[0, 1]], 0.0);
        assert_eq!(t.data()[[2, 1]], 0.0);
    }
}
