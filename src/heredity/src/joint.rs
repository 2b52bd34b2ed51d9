//! Probability of one complete hypothesis under the inheritance model.

use crate::{
    hypothesis::{Hypothesis, GeneAssignment, TraitAssignment},
    inheritance::{pass_probability, child_gene_distribution},
    pedigree::{Pedigree, PersonId, Parents},
    probs::ProbabilityTables,
};

/// Probability that `person` carries `genes[person]` copies, given the hypothesized copies of its parents.
/// Founders fall back on the unconditional gene prior.
#[inline]
pub fn local_gene_probability(pedigree: &Pedigree, tables: &ProbabilityTables, person: PersonId, genes: &GeneAssignment) -> f64 {
    let gene = genes[person.index()];
    match pedigree.person(person).parents {
        None => tables.prior(gene),
        Some(Parents{mother, father}) => {
            let pm = pass_probability(tables, genes[mother.index()]);
            let pf = pass_probability(tables, genes[father.index()]);
            child_gene_distribution(pm, pf)[gene.index()]
        }
    }
}

/// Probability that `person` expresses (or not) the trait as hypothesized in `traits`, given its gene copies.
#[inline]
pub fn local_trait_probability(tables: &ProbabilityTables, person: PersonId, genes: &GeneAssignment, traits: &TraitAssignment) -> f64 {
    tables.emission(genes[person.index()], traits[person.index()])
}

/// Joint probability of a complete hypothesis: the product, over every person, of its local gene and trait
/// probabilities. This is not normalized against the total probability mass of the evidence.
pub fn joint_probability(pedigree: &Pedigree, tables: &ProbabilityTables, hypothesis: &Hypothesis) -> f64 {
    pedigree.iter()
        .map(|(id, _)| {
            local_gene_probability(pedigree, tables, id, &hypothesis.genes)
            * local_trait_probability(tables, id, &hypothesis.genes, &hypothesis.traits)
        })
        .product()
}
