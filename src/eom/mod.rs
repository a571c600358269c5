pub use manifold::{AxisKind, Manifold};
pub use preconditioner::{BasisExhausted, EomPreconditioner};

pub mod manifold;
pub mod preconditioner;
pub(crate) mod ranking;
pub(crate) mod selection;
