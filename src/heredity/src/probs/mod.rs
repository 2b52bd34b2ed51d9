use std::{fs::File, path::Path};

use serde::{Serialize, Deserialize};
use log::debug;

use crate::gene::GeneCount;

mod error;
pub use error::ProbsError;

/// Tolerance used when checking that the gene prior sums to one.
const PRIOR_SUM_TOLERANCE: f64 = 1e-6;

/// Default unconditional probabilities of carrying 0, 1 or 2 copies of the variant.
pub const DEFAULT_GENE_PRIOR: [f64; 3] = [0.96, 0.03, 0.01];

/// Default probabilities of exhibiting the trait, given 0, 1 or 2 copies of the variant.
pub const DEFAULT_TRAIT_GIVEN_GENE: [f64; 3] = [0.01, 0.56, 0.65];

/// Default probability that a transmitted allele mutates.
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;

/// Immutable set of constants parameterizing the inheritance model.
/// # Fields:
/// - `gene_prior`      : `gene_prior[g]` = P(gene = g), for persons without recorded parents.
/// - `trait_given_gene`: `trait_given_gene[g]` = P(trait = true | gene = g). `1 - trait_given_gene[g]` for `false`.
/// - `mutation_rate`   : probability that a transmitted allele flips its state during inheritance.
///
/// Missing fields of a deserialized `.yaml` file fall back on their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbabilityTables {
    pub gene_prior      : [f64; 3],
    pub trait_given_gene: [f64; 3],
    pub mutation_rate   : f64,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        Self {
            gene_prior      : DEFAULT_GENE_PRIOR,
            trait_given_gene: DEFAULT_TRAIT_GIVEN_GENE,
            mutation_rate   : DEFAULT_MUTATION_RATE,
        }
    }
}

impl ProbabilityTables {
    /// Instantiate and validate a new set of probability tables.
    ///
    /// # Errors
    /// - if any probability is not finite or lies outside of `[0, 1]`
    /// - if `gene_prior` does not sum to one.
    pub fn new(gene_prior: [f64; 3], trait_given_gene: [f64; 3], mutation_rate: f64) -> Result<Self, ProbsError> {
        let tables = Self{gene_prior, trait_given_gene, mutation_rate};
        tables.validate()?;
        Ok(tables)
    }

    /// Deserialize and validate a set of probability tables from a `.yaml` file.
    ///
    /// # Errors
    /// - `ProbsError::Open` if `path` cannot be opened.
    /// - `ProbsError::Deserialize` if the file contents cannot be parsed.
    /// - any validation error (see `ProbabilityTables::validate()`)
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, ProbsError> {
        let path = path.as_ref();
        debug!("Loading probability tables from {}", path.display());
        let file = File::open(path).map_err(|err| ProbsError::Open(path.display().to_string(), err))?;
        let tables: Self = serde_yaml::from_reader(file).map_err(ProbsError::Deserialize)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Return a copy of these tables, using a different mutation rate.
    ///
    /// # Errors
    /// - if `mutation_rate` is not a valid probability.
    pub fn with_mutation_rate(self, mutation_rate: f64) -> Result<Self, ProbsError> {
        let tables = Self{mutation_rate, ..self};
        tables.validate()?;
        Ok(tables)
    }

    /// Ensure every value is a valid probability, and that the gene prior sums to one.
    ///
    /// # Errors
    /// - `ProbsError::OutOfRange` if any value is not finite or lies outside of `[0, 1]`
    /// - `ProbsError::PriorSum` if the gene prior does not sum to one.
    pub fn validate(&self) -> Result<(), ProbsError> {
        let named_values = self.gene_prior.iter().map(|p| ("gene_prior", *p))
            .chain(self.trait_given_gene.iter().map(|p| ("trait_given_gene", *p)))
            .chain(std::iter::once(("mutation_rate", self.mutation_rate)));

        for (field, value) in named_values {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ProbsError::OutOfRange{field, value})
            }
        }

        let sum: f64 = self.gene_prior.iter().sum();
        if (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(ProbsError::PriorSum(sum))
        }
        Ok(())
    }

    /// Unconditional probability of carrying `gene` copies.
    #[inline]
    pub fn prior(&self, gene: GeneCount) -> f64 {
        self.gene_prior[gene.index()]
    }

    /// Probability of the trait being expressed (`has_trait == true`) or not, given `gene` copies.
    #[inline]
    pub fn emission(&self, gene: GeneCount, has_trait: bool) -> f64 {
        let p_trait = self.trait_given_gene[gene.index()];
        match has_trait {
            true  => p_trait,
            false => 1.0 - p_trait,
        }
    }
}
