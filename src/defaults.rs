// EOM PRECONDITIONER
// diagonal entries below this magnitude are treated as Pauli-forbidden
// and ranked behind every finite candidate
pub const ZERO_MAGNITUDE_THRESHOLD: f64 = 1.0e-13;
// denominators |re(lambda) - d| below this value are damped to zero in the
// Davidson correction instead of being inverted
pub const SINGULARITY_THRESHOLD: f64 = 1.0e-4;
// candidate vectors with a norm below this value after orthogonalization
// are discarded
pub const NORM_TOLERANCE: f64 = 1.0e-10;
// each rank keeps trial_factor * n_roots candidates before the gather
pub const TRIAL_FACTOR: usize = 10;

// RANDOMIZED INITIAL GUESS
pub const RANDOM_GUESS: bool = false;
// standard deviation of the Gaussian noise added to each guess vector
pub const RANDOM_SIGMA: f64 = 1.0;
pub const RANDOM_SEED: u64 = 0;

// spin-sublattice filtering of the guess vectors
pub const SPIN_FILTER: bool = false;
