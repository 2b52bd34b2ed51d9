//! Mendelian transmission of the variant allele, from one parent to a child, with mutation.

use crate::{gene::GeneCount, probs::ProbabilityTables};

/// Probability that a parent carrying `parent` copies transmits the variant allele to its child.
/// - `Zero`: only a mutation may produce the variant              -> `mu`
/// - `One` : either allele is picked, with or without mutation    -> `0.5`
/// - `Two` : the variant is transmitted unless it mutates away    -> `1 - mu`
#[inline]
pub fn pass_probability(tables: &ProbabilityTables, parent: GeneCount) -> f64 {
    let mu = tables.mutation_rate;
    match parent {
        GeneCount::Zero => mu,
        GeneCount::One  => 0.5,
        GeneCount::Two  => 1.0 - mu,
    }
}

/// Distribution of the child's gene copy count, given the probabilities `pm` and `pf` that its
/// mother and father respectively transmit the variant. Indexed by `GeneCount::index()`.
#[inline]
pub fn child_gene_distribution(pm: f64, pf: f64) -> [f64; 3] {
    [
        (1.0 - pm) * (1.0 - pf),
        pm * (1.0 - pf) + (1.0 - pm) * pf,
        pm * pf,
    ]
}
