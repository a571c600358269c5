/*!

# Diagonal preconditioner for EOM-CC Davidson eigensolvers

The similarity-transformed Hamiltonian is never materialized, so the
Davidson driver relies on two services built from an estimate of its
diagonal: an initial subspace of orthonormal, physically admissible guess
vectors seeded at the globally lowest diagonal elements, and the
Davidson-Liu correction `(lambda - D)^-1 r` applied to residual vectors.

Both services share one memoized diagonal estimate and run as collectives:
every rank of the world enters every public method in the same order, the
root rank takes the seed decisions and the collective broadcast/write
primitives replicate their effect.

*/

use crate::comm::Communicator;
use crate::defaults::NORM_TOLERANCE;
use crate::eom::manifold::{AxisKind, Manifold};
use crate::eom::selection::lowest_elements;
use crate::fock::FockVector;
use crate::scalar::Field;
use crate::settings::EomSettings;
use log::{debug, info};
use ndarray::{Array1, ArrayView2, Zip};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Normal;
use std::error;
use std::fmt;

/// The ranked candidate pool was consumed before the requested number of
/// orthonormal basis vectors could be built. Fatal for the caller.
#[derive(Debug, PartialEq, Eq)]
pub struct BasisExhausted;

impl fmt::Display for BasisExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Initial basis construction ran out of diagonal candidates!")
    }
}

impl error::Error for BasisExhausted {}

/// Diagonal preconditioner of one excitation manifold.
///
/// Holds the orbital-energy diagonals of the one-body blocks and the lazily
/// computed diagonal estimate; the manifold descriptor supplies the block
/// shapes, the Pauli filter and the antisymmetrization of each block.
pub struct EomPreconditioner<'w, F, C> {
    manifold: Manifold,
    settings: EomSettings,
    comm: &'w C,
    fij_diagonal: Array1<F>,
    fab_diagonal: Array1<F>,
    diagonal: Option<FockVector<F>>,
}

impl<'w, F: Field, C: Communicator<F>> EomPreconditioner<'w, F, C> {
    /// Builds the preconditioner from the hole-hole block `Fij` and the
    /// particle-particle block `Fab` of the one-body Hamiltonian. Only
    /// their diagonals enter the estimate.
    pub fn new(
        manifold: Manifold,
        fij: ArrayView2<F>,
        fab: ArrayView2<F>,
        settings: EomSettings,
        comm: &'w C,
    ) -> Self {
        assert_eq!(fij.nrows(), fij.ncols(), "Fij must be square");
        assert_eq!(fab.nrows(), fab.ncols(), "Fab must be square");
        assert_eq!(
            fij.nrows(),
            manifold.n_occ,
            "Fij must match the occupied space of the manifold"
        );
        assert_eq!(
            fab.nrows(),
            manifold.n_virt,
            "Fab must match the virtual space of the manifold"
        );
        EomPreconditioner {
            manifold,
            settings,
            comm,
            fij_diagonal: fij.diag().to_owned(),
            fab_diagonal: fab.diag().to_owned(),
            diagonal: None,
        }
    }

    /// Computes the diagonal estimate of the similarity-transformed
    /// Hamiltonian: every element is the sum of its particle-axis orbital
    /// energies minus the sum of its hole-axis orbital energies, e.g.
    /// `Fab[a,a] + Fab[b,b] - Fij[i,i] - Fij[j,j]` for a doubles block.
    /// Memoized; repeated calls are no-ops.
    pub fn calculate_diagonal(&mut self) {
        if self.diagonal.is_some() {
            return;
        }
        let mut diagonal: FockVector<F> = self.manifold.empty_vector();
        for (c, spec) in self.manifold.components.iter().enumerate() {
            let kinds: Vec<AxisKind> = spec.axes().collect();
            for (index, value) in diagonal.component_mut(c).data_mut().indexed_iter_mut() {
                let mut element = F::zero();
                for (axis, kind) in kinds.iter().enumerate() {
                    match kind {
                        AxisKind::Particle => element += self.fab_diagonal[index[axis]],
                        AxisKind::Hole => element -= self.fij_diagonal[index[axis]],
                    }
                }
                *value = element;
            }
        }
        self.diagonal = Some(diagonal);
    }

    /// The memoized diagonal estimate, computed on first use.
    pub fn diagonal(&mut self) -> &FockVector<F> {
        self.calculate_diagonal();
        self.diagonal.as_ref().unwrap()
    }

    /// Builds `n_roots` orthonormal, physically admissible guess vectors,
    /// seeded in the order of the globally ranked diagonal candidates.
    ///
    /// Collective: the candidate funnel gathers on the root, the root picks
    /// each seed and the broadcast/write pair replicates it, so every rank
    /// assembles identical vectors and observes [`BasisExhausted`] at the
    /// same point.
    pub fn initial_basis(&mut self, n_roots: usize) -> Result<Vec<FockVector<F>>, BasisExhausted> {
        self.calculate_diagonal();
        let diagonal = self.diagonal.as_ref().unwrap();
        info!(
            "Getting initial basis of {} vectors for the {} manifold",
            n_roots, self.manifold.name
        );
        if self.settings.random_guess {
            info!(
                "Randomizing the initial guess (sigma = {})",
                self.settings.random_sigma
            );
        }

        // globally ranked candidate list; filled on the root rank only
        let trial_count: usize = self.settings.trial_factor * n_roots;
        let ranked: Vec<(usize, F)> =
            lowest_elements(diagonal.read_local(self.comm), trial_count, self.comm);

        let normal: Normal<f64> = Normal::new(0.0, self.settings.random_sigma)
            .expect("the noise standard deviation must be finite and non-negative");
        let mut rng: StdRng = StdRng::seed_from_u64(self.settings.random_seed);

        let mut basis: Vec<FockVector<F>> = Vec::with_capacity(n_roots);
        let mut next_candidate: usize = 0;
        let mut rejected: usize = 0;
        while basis.len() < n_roots {
            // The seed decision is taken on the root; its effect reaches
            // every rank through the broadcast and the collective write.
            let chosen: Vec<(usize, F)> = if self.comm.rank() == 0 {
                match ranked.get(next_candidate) {
                    Some(&(index, _)) => vec![(index, F::one())],
                    None => Vec::new(),
                }
            } else {
                Vec::new()
            };
            let seed: Vec<(usize, F)> = self.comm.broadcast(&chosen);
            if seed.is_empty() {
                // an empty broadcast means the root ran out of candidates
                return Err(BasisExhausted);
            }
            next_candidate += 1;

            let mut candidate: FockVector<F> = diagonal.zeros_like();
            candidate.write(&seed, self.comm);

            if self.settings.random_guess {
                for c in 0..candidate.components_count() {
                    for value in candidate.component_mut(c).data_mut().iter_mut() {
                        *value += F::gaussian(&mut rng, &normal);
                    }
                }
            }

            self.apply_physicality(&mut candidate);
            if self.settings.spin_filter {
                for c in 0..candidate.components_count() {
                    candidate.component_mut(c).zero_mixed_spin();
                }
            }

            // orthogonalize against the accepted vectors
            for accepted in &basis {
                let overlap: F = accepted.dot(&candidate);
                candidate -= &(accepted * overlap);
            }

            let norm: f64 = candidate.norm();
            if norm < NORM_TOLERANCE {
                debug!(
                    "candidate {} discarded, norm {:e} after orthogonalization",
                    next_candidate - 1,
                    norm
                );
                rejected += 1;
                continue;
            }
            candidate *= F::from_re(1.0 / norm);

            // a candidate that does not renormalize stably is discarded too
            let renormalized: f64 = candidate.norm();
            if (renormalized - 1.0).abs() > NORM_TOLERANCE {
                rejected += 1;
                continue;
            }

            debug!("basis size {}", basis.len() + 1);
            basis.push(candidate);
        }
        info!(
            "Returning {} initial basis vectors ({} candidates discarded)",
            basis.len(),
            rejected
        );
        Ok(basis)
    }

    /// The Davidson-Liu correction `(re(lambda) - D)^-1 r`, applied
    /// elementwise against the diagonal estimate. Denominators below the
    /// singularity threshold are damped to zero instead of inverted, so the
    /// correction never fails. The result is filtered and antisymmetrized
    /// exactly like a guess vector.
    pub fn correction(&mut self, lambda: Complex64, residual: &FockVector<F>) -> FockVector<F> {
        self.calculate_diagonal();
        let diagonal = self.diagonal.as_ref().unwrap();
        diagonal.check_compatibility(residual);

        let shift: f64 = lambda.re;
        let threshold: f64 = self.settings.singularity_threshold;

        let mut correction: FockVector<F> = diagonal.zeros_like();
        for c in 0..correction.components_count() {
            Zip::from(correction.component_mut(c).data_mut())
                .and(residual.component(c).data())
                .and(diagonal.component(c).data())
                .for_each(|value, &r, &d| {
                    let denominator: F = F::from_re(shift) - d;
                    *value = if denominator.abs() < threshold {
                        F::zero()
                    } else {
                        r / denominator
                    };
                });
        }

        self.apply_physicality(&mut correction);
        for (c, spec) in self.manifold.components.iter().enumerate() {
            if spec.correction_scale != 1.0 {
                *correction.component_mut(c).data_mut() *= F::from_re(spec.correction_scale);
            }
        }
        correction
    }

    /// Zeroes the Pauli-forbidden slices of every block and antisymmetrizes
    /// each block over its defining index transpositions.
    fn apply_physicality(&self, vector: &mut FockVector<F>) {
        for (c, spec) in self.manifold.components.iter().enumerate() {
            let tensor = vector.component_mut(c);
            tensor.zero_equal_pairs(&spec.distinct_pairs);
            for transposition in &spec.transpositions {
                tensor.antisymmetrize(transposition);
            }
        }
    }
}
