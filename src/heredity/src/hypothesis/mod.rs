//! Enumeration of every evidence-consistent assignment of gene copies and traits over a pedigree.
//!
//! The hypothesis space of a pedigree of `n` persons contains `2^n` trait assignments and `3^n` gene assignments.
//! Every sequence returned here is lazy, finite, and restartable: each call starts an independent enumeration.

use std::sync::Arc;

use itertools::Itertools;

use crate::{
    gene::GeneCount,
    pedigree::{Pedigree, PersonId},
};

/// `genes[i]` = hypothesized number of variant copies carried by `PersonId(i)`
pub type GeneAssignment = Vec<GeneCount>;

/// `traits[i]` = hypothesized trait expression of `PersonId(i)`. Shared among every hypothesis built on top of
/// the same trait subset.
pub type TraitAssignment = Arc<[bool]>;

/// One complete assignment of gene copies and trait expression to every person of a pedigree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    pub genes : GeneAssignment,
    pub traits: TraitAssignment,
}

impl Hypothesis {
    pub fn new(genes: GeneAssignment, traits: TraitAssignment) -> Self {
        Self{genes, traits}
    }

    #[inline(always)]
    pub fn gene(&self, id: PersonId) -> GeneCount {
        self.genes[id.index()]
    }

    #[inline(always)]
    pub fn has_trait(&self, id: PersonId) -> bool {
        self.traits[id.index()]
    }
}

impl Pedigree {
    /// Iterate over every subset of persons hypothesized to exhibit the trait, discarding any subset which
    /// disagrees with an observed trait.
    pub fn trait_assignments(&self) -> impl Iterator<Item = TraitAssignment> + '_ {
        let n = self.len();
        (0..n).powerset()
            .map(move |have_trait| {
                let mut traits = vec![false; n];
                for i in have_trait {
                    traits[i] = true;
                }
                TraitAssignment::from(traits)
            })
            .filter(|traits| self.agrees_with(traits))
    }

    /// Iterate over every total gene assignment, exactly once each: pick a subset of persons carrying one copy, then
    /// a subset of the remaining persons carrying two copies. Everyone else carries no copy.
    pub fn gene_assignments(&self) -> impl Iterator<Item = GeneAssignment> {
        let n = self.len();
        (0..n).powerset().flat_map(move |one_gene| {
            let others: Vec<usize> = (0..n).filter(|i| !one_gene.contains(i)).collect();
            others.into_iter().powerset().map(move |two_genes| {
                let mut genes = vec![GeneCount::Zero; n];
                one_gene.iter().for_each(|i| genes[*i] = GeneCount::One);
                two_genes.into_iter().for_each(|i| genes[i] = GeneCount::Two);
                genes
            })
        })
    }

    /// Pair every gene assignment with a single trait assignment.
    pub fn hypotheses_for(&self, traits: TraitAssignment) -> impl Iterator<Item = Hypothesis> {
        self.gene_assignments().map(move |genes| Hypothesis::new(genes, Arc::clone(&traits)))
    }

    /// Iterate over the whole evidence-consistent hypothesis space.
    pub fn hypotheses(&self) -> impl Iterator<Item = Hypothesis> + '_ {
        self.trait_assignments().flat_map(|traits| self.hypotheses_for(traits))
    }

    /// Size of the evidence-consistent hypothesis space: `2^(unobserved persons) * 3^(persons)`.
    /// Returns `None` if this number does not fit within a `u64`.
    pub fn hypothesis_count(&self) -> Option<u64> {
        let n = u32::try_from(self.len()).ok()?;
        let unobserved = u32::try_from(self.unobserved()).ok()?;
        3u64.checked_pow(n)?.checked_mul(2u64.checked_pow(unobserved)?)
    }
}
