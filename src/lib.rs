/*!

# eomcc

Diagonal preconditioner and distributed initial-subspace builder for
equation-of-motion coupled-cluster Davidson eigensolvers.

The similarity-transformed Hamiltonian of EOM-CC theory is never stored;
an iterative Davidson driver only needs its action on trial vectors, an
estimate of its diagonal and a preconditioned correction step. This crate
provides the diagonal side of that contract for the particle-hole (CCSD),
electron-attachment, ionization and CIS excitation manifolds:

- [`fock::FockVector`], the direct sum of amplitude tensors with the
  vector-space operations of the subspace algebra,
- [`eom::EomPreconditioner`], which estimates the diagonal, selects the
  globally lowest diagonal elements across the ranks of a world, builds an
  orthonormal and physically admissible initial basis and applies the
  damped Davidson-Liu correction,
- [`comm::Communicator`], the collective-communication seam behind which a
  distributed tensor runtime plugs in.

*/

pub mod comm;
pub mod defaults;
pub mod eom;
pub mod fock;
pub mod scalar;
pub mod settings;
pub mod tensor;
