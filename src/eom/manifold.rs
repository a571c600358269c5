use crate::fock::FockVector;
use crate::scalar::Field;
use crate::tensor::Tensor;

/// Kind of orbital space an amplitude-tensor axis runs over.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AxisKind {
    Particle,
    Hole,
}

/// Particle axes are labelled a-h, hole axes i-o, following the canonical
/// amplitude index convention.
pub fn axis_kind(label: char) -> AxisKind {
    match label {
        'a'..='h' => AxisKind::Particle,
        'i'..='o' => AxisKind::Hole,
        _ => panic!("unknown orbital index label '{}'", label),
    }
}

/// Structure of one excitation class within a manifold.
#[derive(Clone, Debug)]
pub struct ComponentSpec {
    pub labels: &'static str,
    /// Axis pairs that must carry distinct orbital indices; elements
    /// violating this are Pauli-forbidden and zeroed by the filter.
    pub distinct_pairs: Vec<(usize, usize)>,
    /// Axis transpositions over which the block is antisymmetrized.
    pub transpositions: Vec<Vec<usize>>,
    /// Rescaling of the block after the Davidson correction has been
    /// antisymmetrized, compensating the overcounting of the
    /// transpositions.
    pub correction_scale: f64,
}

impl ComponentSpec {
    pub fn axes(&self) -> impl Iterator<Item = AxisKind> + '_ {
        self.labels.chars().map(axis_kind)
    }
}

/// Excitation manifold of one EOM variant: the shapes and index-symmetry
/// contracts of its amplitude blocks. The four variants below instantiate
/// the same preconditioner with different block structures.
#[derive(Clone, Debug)]
pub struct Manifold {
    pub name: &'static str,
    pub n_occ: usize,
    pub n_virt: usize,
    pub components: Vec<ComponentSpec>,
}

impl Manifold {
    /// Particle-hole CCSD manifold: singles `ai` and doubles `abij`. The
    /// doubles block is antisymmetric under hole exchange and under
    /// particle exchange, and its `a == b` and `i == j` slices are
    /// Pauli-forbidden.
    pub fn particle_hole(n_occ: usize, n_virt: usize) -> Self {
        Manifold {
            name: "ccsd",
            n_occ,
            n_virt,
            components: vec![
                ComponentSpec {
                    labels: "ai",
                    distinct_pairs: Vec::new(),
                    transpositions: Vec::new(),
                    correction_scale: 1.0,
                },
                ComponentSpec {
                    labels: "abij",
                    distinct_pairs: vec![(0, 1), (2, 3)],
                    transpositions: vec![vec![0, 1, 3, 2], vec![1, 0, 2, 3]],
                    correction_scale: 0.25,
                },
            ],
        }
    }

    /// Electron-attachment manifold: one-particle `a` and two-particle
    /// one-hole `abi` blocks.
    pub fn electron_attachment(n_occ: usize, n_virt: usize) -> Self {
        Manifold {
            name: "ea",
            n_occ,
            n_virt,
            components: vec![
                ComponentSpec {
                    labels: "a",
                    distinct_pairs: Vec::new(),
                    transpositions: Vec::new(),
                    correction_scale: 1.0,
                },
                ComponentSpec {
                    labels: "abi",
                    distinct_pairs: vec![(0, 1)],
                    transpositions: vec![vec![1, 0, 2]],
                    correction_scale: 1.0,
                },
            ],
        }
    }

    /// Ionization manifold: one-hole `i` and one-particle two-hole `aij`
    /// blocks.
    pub fn ionization(n_occ: usize, n_virt: usize) -> Self {
        Manifold {
            name: "ip",
            n_occ,
            n_virt,
            components: vec![
                ComponentSpec {
                    labels: "i",
                    distinct_pairs: Vec::new(),
                    transpositions: Vec::new(),
                    correction_scale: 1.0,
                },
                ComponentSpec {
                    labels: "aij",
                    distinct_pairs: vec![(1, 2)],
                    transpositions: vec![vec![0, 2, 1]],
                    correction_scale: 1.0,
                },
            ],
        }
    }

    /// CIS manifold: the singles block alone.
    pub fn cis(n_occ: usize, n_virt: usize) -> Self {
        Manifold {
            name: "cis",
            n_occ,
            n_virt,
            components: vec![ComponentSpec {
                labels: "ai",
                distinct_pairs: Vec::new(),
                transpositions: Vec::new(),
                correction_scale: 1.0,
            }],
        }
    }

    /// Tensor shape of one component: particle axes run over the virtual
    /// space, hole axes over the occupied space.
    pub fn shape(&self, spec: &ComponentSpec) -> Vec<usize> {
        spec.axes()
            .map(|kind| match kind {
                AxisKind::Particle => self.n_virt,
                AxisKind::Hole => self.n_occ,
            })
            .collect()
    }

    /// A zero vector of the manifold's shape.
    pub fn empty_vector<F: Field>(&self) -> FockVector<F> {
        let components: Vec<Tensor<F>> = self
            .components
            .iter()
            .map(|spec| Tensor::zeros(spec.labels, &self.shape(spec)))
            .collect();
        FockVector::new(components)
    }
}
