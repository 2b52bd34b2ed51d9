use std::{fmt::{self, Display, Formatter}, ops::AddAssign};

use log::trace;

use crate::{
    error::InferenceError,
    gene::GeneCount,
    hypothesis::Hypothesis,
    joint::joint_probability,
    pedigree::{Pedigree, PersonId},
    probs::ProbabilityTables,
};

/// Default number of decimals used when displaying probabilities.
pub const DEFAULT_PRECISION: usize = 4;

/// Gene copy and trait distributions of a single person.
/// # Fields:
/// - `gene`  : `gene[g]` = weight of carrying `g` copies of the variant.
/// - `traits`: `traits[0]` = weight of not expressing the trait | `traits[1]` = weight of expressing the trait.
///
/// Weights are unnormalized within a `Marginals` accumulator, and sum to one within a `Posterior`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PersonMarginals {
    pub gene  : [f64; 3],
    pub traits: [f64; 2],
}

impl PersonMarginals {
    #[inline]
    pub fn gene(&self, gene: GeneCount) -> f64 {
        self.gene[gene.index()]
    }

    #[inline]
    pub fn trait_probability(&self, has_trait: bool) -> f64 {
        self.traits[usize::from(has_trait)]
    }

    #[inline]
    fn add(&mut self, gene: GeneCount, has_trait: bool, weight: f64) {
        self.gene[gene.index()] += weight;
        self.traits[usize::from(has_trait)] += weight;
    }

    /// Rescale both distributions so that they each sum to one.
    /// Returns `None` if any of the two distributions carries no (or an invalid) probability mass.
    fn normalized(&self) -> Option<Self> {
        let gene_sum: f64 = self.gene.iter().sum();
        let trait_sum: f64 = self.traits.iter().sum();
        let valid = |sum: f64| sum.is_finite() && sum > 0.0;
        if !(valid(gene_sum) && valid(trait_sum)) {
            return None
        }
        Some(Self{
            gene  : self.gene.map(|w| w / gene_sum),
            traits: self.traits.map(|w| w / trait_sum),
        })
    }
}

/// Additive, per-person accumulator of hypothesis weights. `persons[i]` tracks `PersonId(i)`
///
/// Accumulation is commutative and associative: partial accumulators built over disjoint sets of hypotheses may be
/// merged in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct Marginals {
    persons: Vec<PersonMarginals>,
}

impl Marginals {
    /// Instantiate a zero-initialized accumulator for `n` persons.
    pub fn zeroed(n: usize) -> Self {
        Self{persons: vec![PersonMarginals::default(); n]}
    }

    /// Add `weight` to the gene and trait buckets selected by `hypothesis`, for every person.
    #[inline]
    pub fn accumulate(&mut self, hypothesis: &Hypothesis, weight: f64) {
        for (i, person) in self.persons.iter_mut().enumerate() {
            person.add(hypothesis.genes[i], hypothesis.traits[i], weight);
        }
    }

    /// Weigh every provided hypothesis by its joint probability, and fold them into a new accumulator.
    pub fn from_hypotheses<I>(pedigree: &Pedigree, tables: &ProbabilityTables, hypotheses: I) -> Self
    where   I: IntoIterator<Item = Hypothesis>
    {
        hypotheses.into_iter().fold(Self::zeroed(pedigree.len()), |mut marginals, hypothesis| {
            let weight = joint_probability(pedigree, tables, &hypothesis);
            trace!("{hypothesis:?} -> {weight:e}");
            marginals.accumulate(&hypothesis, weight);
            marginals
        })
    }

    /// Element-wise sum of two accumulators.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.persons.len(), other.persons.len());
        for (this, that) in self.persons.iter_mut().zip(&other.persons) {
            this.gene.iter_mut().zip(that.gene).for_each(|(w, v)| *w += v);
            this.traits.iter_mut().zip(that.traits).for_each(|(w, v)| *w += v);
        }
    }

    /// Access the raw (unnormalized) weights of a person.
    pub fn get(&self, id: PersonId) -> Option<&PersonMarginals> {
        self.persons.get(id.index())
    }

    /// Finalize this accumulator: rescale every person's gene and trait distributions so that they sum to one.
    ///
    /// # Errors
    /// - `InferenceError::ImpossibleEvidence` if any person did not accumulate any probability mass, i.e. the
    ///   evidence cannot be explained by any hypothesis.
    pub fn normalize(self, pedigree: &Pedigree) -> Result<Posterior, InferenceError> {
        let persons = pedigree.iter()
            .zip(&self.persons)
            .map(|((_, person), weights)| {
                weights.normalized().ok_or_else(|| InferenceError::ImpossibleEvidence{person: person.name.clone()})
            })
            .collect::<Result<Vec<_>, _>>()?;

        let names = pedigree.iter().map(|(_, person)| person.name.clone()).collect();
        Ok(Posterior{names, persons})
    }
}

impl AddAssign<&Marginals> for Marginals {
    fn add_assign(&mut self, other: &Marginals) {
        self.merge(other);
    }
}

/// Normalized, read-only per-person marginal distributions.
/// # Fields:
/// - `names`  : person names, ordered by `PersonId`.
/// - `persons`: `persons[i]` = normalized distributions of `PersonId(i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    names  : Vec<String>,
    persons: Vec<PersonMarginals>,
}

impl Posterior {
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, id: PersonId) -> Option<&PersonMarginals> {
        self.persons.get(id.index())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&PersonMarginals> {
        self.names.iter().position(|n| n == name).map(|i| &self.persons[i])
    }

    /// Iterate over every person's distributions, in lexicographic order of their names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonMarginals)> + '_ {
        self.names.iter().map(String::as_str).zip(&self.persons)
    }

    /// Tabulated view of these distributions: one header line, followed by one `PosteriorRecord` per person.
    pub fn records(&self, precision: usize) -> impl Iterator<Item = String> + '_ {
        let header = format!("{: <10} - P(gene=0) - P(gene=1) - P(gene=2) - P(trait) - P(no-trait)", "Name");
        std::iter::once(header).chain(
            self.iter().map(move |(name, marginals)| PosteriorRecord{name, marginals, precision}.to_string())
        )
    }
}

/// Human-readable report. Probabilities are printed with `DEFAULT_PRECISION` decimals, unless a precision was
/// requested through the formatter (e.g. `format!("{posterior:.6}")`)
impl Display for Posterior {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        for (name, marginals) in self.iter() {
            writeln!(f, "{name}:")?;
            writeln!(f, "  Gene:")?;
            for gene in GeneCount::ALL.iter().rev() {
                writeln!(f, "    {gene}: {:.precision$}", marginals.gene(*gene))?;
            }
            writeln!(f, "  Trait:")?;
            writeln!(f, "    True: {:.precision$}", marginals.trait_probability(true))?;
            writeln!(f, "    False: {:.precision$}", marginals.trait_probability(false))?;
        }
        Ok(())
    }
}

/// One line of a tabulated `Posterior`. Fields are separated with `" - "`
struct PosteriorRecord<'a> {
    name     : &'a str,
    marginals: &'a PersonMarginals,
    precision: usize,
}

impl Display for PosteriorRecord<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let precision = self.precision;
        let m = self.marginals;
        write!(f, "{: <10} - {:.precision$} - {:.precision$} - {:.precision$} - {:.precision$} - {:.precision$}",
            self.name,
            m.gene(GeneCount::Zero),
            m.gene(GeneCount::One),
            m.gene(GeneCount::Two),
            m.trait_probability(true),
            m.trait_probability(false),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hypothesis::TraitAssignment, pedigree::tests::common::*};

    fn hypothesis(genes: Vec<GeneCount>, traits: Vec<bool>) -> Hypothesis {
        Hypothesis::new(genes, TraitAssignment::from(traits))
    }

    #[test]
    fn accumulate_selects_buckets() {
        let mut marginals = Marginals::zeroed(2);
        marginals.accumulate(&hypothesis(vec![GeneCount::Two, GeneCount::Zero], vec![true, false]), 0.25);
        marginals.accumulate(&hypothesis(vec![GeneCount::One, GeneCount::Zero], vec![true, true]), 0.5);

        let first = marginals.get(PersonId(0)).expect("first");
        assert_eq!(first.gene, [0.0, 0.5, 0.25]);
        assert_eq!(first.traits, [0.0, 0.75]);

        let second = marginals.get(PersonId(1)).expect("second");
        assert_eq!(second.gene, [0.75, 0.0, 0.0]);
        assert_eq!(second.traits, [0.25, 0.5]);
    }

    #[test]
    fn merge_is_elementwise_sum() {
        let h = hypothesis(vec![GeneCount::One], vec![false]);
        let mut left = Marginals::zeroed(1);
        left.accumulate(&h, 0.125);
        let mut right = Marginals::zeroed(1);
        right.accumulate(&h, 0.25);
        right.accumulate(&hypothesis(vec![GeneCount::Two], vec![true]), 0.5);

        let mut merged = left.clone();
        merged += &right;

        let mut reversed = right.clone();
        reversed.merge(&left);
        assert_eq!(merged, reversed);

        let person = merged.get(PersonId(0)).expect("person");
        assert_eq!(person.gene, [0.0, 0.375, 0.5]);
        assert_eq!(person.traits, [0.375, 0.5]);
    }

    #[test]
    fn normalize_sums_to_one() -> Result<(), InferenceError> {
        let pedigree = mock_founder_pedigree("Harry", None);
        let mut marginals = Marginals::zeroed(1);
        marginals.accumulate(&hypothesis(vec![GeneCount::Zero], vec![false]), 3.0);
        marginals.accumulate(&hypothesis(vec![GeneCount::Two], vec![true]), 1.0);

        let posterior = marginals.normalize(&pedigree)?;
        let harry = posterior.get_by_name("Harry").expect("Harry");
        assert_eq!(harry.gene, [0.75, 0.0, 0.25]);
        assert_eq!(harry.traits, [0.75, 0.25]);
        assert!(posterior.get_by_name("Ron").is_none());
        Ok(())
    }

    #[test]
    fn normalize_rejects_empty_mass() {
        let pedigree = mock_founder_pedigree("Harry", None);
        let err = Marginals::zeroed(1).normalize(&pedigree).unwrap_err();
        assert!(matches!(err, InferenceError::ImpossibleEvidence{person} if person == "Harry"));
    }

    #[test]
    fn display_report() -> Result<(), InferenceError> {
        let pedigree = mock_founder_pedigree("Harry", None);
        let mut marginals = Marginals::zeroed(1);
        marginals.accumulate(&hypothesis(vec![GeneCount::Zero], vec![false]), 1.0);
        let posterior = marginals.normalize(&pedigree)?;

        let expected = "Harry:\n  Gene:\n    2: 0.0000\n    1: 0.0000\n    0: 1.0000\n  Trait:\n    True: 0.0000\n    False: 1.0000\n";
        assert_eq!(posterior.to_string(), expected);
        assert!(format!("{posterior:.1}").contains("    0: 1.0\n"));
        Ok(())
    }

    #[test]
    fn tabulated_records() -> Result<(), InferenceError> {
        let pedigree = mock_founder_pedigree("Harry", None);
        let mut marginals = Marginals::zeroed(1);
        marginals.accumulate(&hypothesis(vec![GeneCount::One], vec![true]), 1.0);
        let posterior = marginals.normalize(&pedigree)?;

        let records: Vec<String> = posterior.records(2).collect();
        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("Name"));
        assert_eq!(records[1], "Harry      - 0.00 - 1.00 - 0.00 - 1.00 - 0.00");
        Ok(())
    }
}
