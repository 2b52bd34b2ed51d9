//! Exact inference of inherited gene copies and trait expression within a family pedigree.
//!
//! Every person carries 0, 1 or 2 copies of a variant allele, and may or may not express a trait. Given a
//! pedigree and a (possibly partial) set of observed traits, `InferenceEngine` enumerates every consistent
//! hypothesis, weighs it by its joint probability and returns the normalized per-person marginals.

pub mod gene;
pub mod probs;
pub mod inheritance;
pub mod pedigree;
pub mod hypothesis;
pub mod joint;
pub mod marginals;
pub mod inference;

mod error;
pub use error::InferenceError;

pub use gene::GeneCount;
pub use probs::{ProbabilityTables, ProbsError};
pub use pedigree::{Pedigree, PedigreeBuilder, PedigreeError, Person, PersonId, Parents};
pub use hypothesis::Hypothesis;
pub use marginals::{Marginals, Posterior, PersonMarginals};
pub use inference::{InferenceEngine, infer};
