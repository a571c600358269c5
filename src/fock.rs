use crate::comm::{local_range, Communicator};
use crate::scalar::Field;
use crate::tensor::Tensor;
use approx::relative_eq;
use ndarray::Zip;
use std::ops::{AddAssign, Mul, MulAssign, SubAssign};

/// Direct sum of amplitude tensors, one per excitation class, with the
/// vector-space operations the subspace builder needs: addition, scalar
/// multiplication, conjugating inner product and element access through a
/// global flat index that concatenates the component element ranges in
/// declared order.
#[derive(Clone, Debug)]
pub struct FockVector<F> {
    components: Vec<Tensor<F>>,
    index_ends: Vec<usize>,
}

impl<F: Field> FockVector<F> {
    pub fn new(components: Vec<Tensor<F>>) -> Self {
        let mut index_ends = Vec::with_capacity(components.len());
        let mut end: usize = 0;
        for tensor in &components {
            end += tensor.len();
            index_ends.push(end);
        }
        FockVector {
            components,
            index_ends,
        }
    }

    /// A structurally identical vector with every element set to zero.
    pub fn zeros_like(&self) -> Self {
        let components: Vec<Tensor<F>> = self
            .components
            .iter()
            .map(|t| Tensor::zeros(t.labels(), t.data().shape()))
            .collect();
        FockVector::new(components)
    }

    pub fn components_count(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, i: usize) -> &Tensor<F> {
        &self.components[i]
    }

    pub fn component_mut(&mut self, i: usize) -> &mut Tensor<F> {
        &mut self.components[i]
    }

    /// Total number of degrees of freedom across all components. Global
    /// flat indices run from 0 to this value (exclusive).
    pub fn dimension(&self) -> usize {
        self.index_ends.last().copied().unwrap_or(0)
    }

    /// Translates (component, element within component) into a global index.
    pub fn get_index(&self, component: usize, component_index: usize) -> usize {
        let base = if component > 0 {
            self.index_ends[component - 1]
        } else {
            0
        };
        base + component_index
    }

    /// Translates a global index back into (component, element within
    /// component). An out-of-range index is a programming error.
    pub fn from_index(&self, index: usize) -> (usize, usize) {
        let mut base: usize = 0;
        for (component, &end) in self.index_ends.iter().enumerate() {
            if index < end {
                return (component, index - base);
            }
            base = end;
        }
        panic!(
            "global index {} out of bounds for a vector of dimension {}",
            index,
            self.dimension()
        );
    }

    /// Reads the elements of the index block owned by this rank, together
    /// with their global indices.
    pub fn read_local<C: Communicator<F>>(&self, comm: &C) -> Vec<(usize, F)> {
        local_range(self.dimension(), comm.rank(), comm.size())
            .map(|global| {
                let (component, local) = self.from_index(global);
                (global, self.components[component].flat(local))
            })
            .collect()
    }

    /// Collective element write. Every rank passes its contribution (in the
    /// builder only the root has one); the root's list is replicated
    /// through the world's broadcast and applied everywhere so that all
    /// ranks observe the same vector afterwards.
    pub fn write<C: Communicator<F>>(&mut self, elements: &[(usize, F)], comm: &C) {
        for (global, value) in comm.broadcast(elements) {
            let (component, local) = self.from_index(global);
            self.components[component].set_flat(local, value);
        }
    }

    /// Conjugating inner product: the elements of `self` are conjugated.
    pub fn dot(&self, other: &FockVector<F>) -> F {
        self.check_compatibility(other);
        let mut result = F::zero();
        for (mine, theirs) in self.components.iter().zip(&other.components) {
            Zip::from(mine.data())
                .and(theirs.data())
                .for_each(|&x, &y| result += Field::conj(x) * y);
        }
        result
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).abs().sqrt()
    }

    pub(crate) fn check_compatibility(&self, other: &FockVector<F>) {
        assert_eq!(
            self.components.len(),
            other.components.len(),
            "number of component tensors does not match"
        );
        for (mine, theirs) in self.components.iter().zip(&other.components) {
            assert_eq!(
                mine.labels(),
                theirs.labels(),
                "component index labels do not match"
            );
            assert_eq!(
                mine.data().shape(),
                theirs.data().shape(),
                "component tensor shapes do not match"
            );
        }
    }
}

impl<F: Field> AddAssign<&FockVector<F>> for FockVector<F> {
    fn add_assign(&mut self, rhs: &FockVector<F>) {
        self.check_compatibility(rhs);
        for (mine, theirs) in self.components.iter_mut().zip(&rhs.components) {
            *mine.data_mut() += theirs.data();
        }
    }
}

impl<F: Field> SubAssign<&FockVector<F>> for FockVector<F> {
    fn sub_assign(&mut self, rhs: &FockVector<F>) {
        self.check_compatibility(rhs);
        for (mine, theirs) in self.components.iter_mut().zip(&rhs.components) {
            *mine.data_mut() -= theirs.data();
        }
    }
}

impl<F: Field> MulAssign<F> for FockVector<F> {
    fn mul_assign(&mut self, scalar: F) {
        for tensor in &mut self.components {
            *tensor.data_mut() *= scalar;
        }
    }
}

impl<F: Field> Mul<F> for &FockVector<F> {
    type Output = FockVector<F>;

    fn mul(self, scalar: F) -> FockVector<F> {
        let mut result = self.clone();
        result *= scalar;
        result
    }
}

/// Panics unless the given vectors are pairwise orthogonal and of unit norm
/// within the given tolerance.
pub fn check_orthonormality<F: Field>(basis: &[FockVector<F>], tolerance: f64) {
    for (i, vector) in basis.iter().enumerate() {
        let norm: f64 = vector.norm();
        assert!(
            relative_eq!(norm, 1.0, epsilon = tolerance),
            "vector {} has norm {}",
            i,
            norm
        );
        for (j, other) in basis.iter().enumerate().skip(i + 1) {
            let overlap: f64 = vector.dot(other).abs();
            assert!(
                overlap < tolerance,
                "vectors {} and {} overlap by {}",
                i,
                j,
                overlap
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::FockVector;
    use crate::comm::SerialWorld;
    use crate::tensor::Tensor;
    use num_complex::Complex64;

    fn singles_doubles() -> FockVector<f64> {
        FockVector::new(vec![
            Tensor::zeros("ai", &[2, 2]),
            Tensor::zeros("abij", &[2, 2, 2, 2]),
        ])
    }

    #[test]
    fn index_translation_roundtrip() {
        let v = singles_doubles();
        assert_eq!(v.dimension(), 4 + 16);
        for global in 0..v.dimension() {
            let (component, local) = v.from_index(global);
            assert_eq!(v.get_index(component, local), global);
        }
        assert_eq!(v.from_index(3), (0, 3));
        assert_eq!(v.from_index(4), (1, 0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_index_panics() {
        singles_doubles().from_index(20);
    }

    #[test]
    fn write_and_read_back() {
        let comm = SerialWorld;
        let mut v = singles_doubles();
        v.write(&[(1, 1.0), (4, -2.0)], &comm);
        let elements = v.read_local(&comm);
        assert_eq!(elements.len(), v.dimension());
        assert_eq!(elements[1], (1, 1.0));
        assert_eq!(elements[4], (4, -2.0));
        assert_eq!(elements[0], (0, 0.0));
    }

    #[test]
    fn vector_space_operations() {
        let comm = SerialWorld;
        let mut a = singles_doubles();
        let mut b = singles_doubles();
        a.write(&[(0, 3.0)], &comm);
        b.write(&[(0, 1.0), (5, 2.0)], &comm);
        a -= &b;
        assert_eq!(a.component(0).flat(0), 2.0);
        assert_eq!(a.component(1).flat(1), -2.0);
        a += &b;
        a *= 2.0;
        assert_eq!(a.component(0).flat(0), 6.0);
        let scaled = &b * -1.0;
        assert_eq!(scaled.component(0).flat(0), -1.0);
    }

    #[test]
    fn dot_conjugates_the_left_operand() {
        let comm = SerialWorld;
        let mut a = FockVector::new(vec![Tensor::<Complex64>::zeros("ai", &[1, 1])]);
        let mut b = a.zeros_like();
        a.write(&[(0, Complex64::new(0.0, 1.0))], &comm);
        b.write(&[(0, Complex64::new(0.0, 1.0))], &comm);
        // <i|i> = conj(i) * i = 1
        assert_eq!(a.dot(&b), Complex64::new(1.0, 0.0));
        assert!((a.norm() - 1.0).abs() < 1e-14);
    }

    #[test]
    #[should_panic(expected = "shapes do not match")]
    fn incompatible_operands_panic() {
        let a = singles_doubles();
        let mut b = FockVector::new(vec![
            Tensor::zeros("ai", &[3, 2]),
            Tensor::zeros("abij", &[2, 2, 2, 2]),
        ]);
        b += &a;
    }
}
