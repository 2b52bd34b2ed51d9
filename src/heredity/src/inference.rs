use log::{debug, info};
use rayon::prelude::*;

use crate::{
    error::InferenceError,
    hypothesis::TraitAssignment,
    marginals::{Marginals, Posterior},
    pedigree::Pedigree,
    probs::ProbabilityTables,
};

/// Default upper bound on the number of hypotheses a single inference run may enumerate.
pub const DEFAULT_MAX_HYPOTHESES: u64 = 1_000_000_000;

/// Exact inference of every person's gene and trait marginals, through the exhaustive enumeration of the
/// evidence-consistent hypothesis space of a pedigree.
/// # Fields:
/// - `tables`        : probability constants of the inheritance model.
/// - `threads`       : number of worker threads. `0` lets rayon decide.
/// - `max_hypotheses`: refuse to run on pedigrees whose hypothesis space exceeds this budget.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    tables        : ProbabilityTables,
    threads       : usize,
    max_hypotheses: u64,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(ProbabilityTables::default())
    }
}

impl InferenceEngine {
    pub fn new(tables: ProbabilityTables) -> Self {
        Self{tables, threads: 0, max_hypotheses: DEFAULT_MAX_HYPOTHESES}
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn with_max_hypotheses(mut self, max_hypotheses: u64) -> Self {
        self.max_hypotheses = max_hypotheses;
        self
    }

    /// Return the size of the hypothesis space of `pedigree`, if it fits within the budget of this engine.
    ///
    /// # Errors
    /// - `InferenceError::HypothesisBudget` if the hypothesis space is larger than `max_hypotheses` (or overflows)
    pub fn check_budget(&self, pedigree: &Pedigree) -> Result<u64, InferenceError> {
        match pedigree.hypothesis_count() {
            Some(count) if count <= self.max_hypotheses => Ok(count),
            count => Err(InferenceError::HypothesisBudget{
                count : count.map_or_else(|| String::from("> u64::MAX"), |c| c.to_string()),
                budget: self.max_hypotheses
            })
        }
    }

    /// Compute the normalized gene and trait marginals of every person within `pedigree`.
    ///
    /// The hypothesis space is partitioned by trait assignment: each partition is folded into its own accumulator
    /// by a worker thread, and partial accumulators are then merged following the enumeration order. The output is
    /// thus identical, regardless of the number of threads.
    ///
    /// # Errors
    /// - `HypothesisBudget`   if the hypothesis space of `pedigree` exceeds the budget of this engine.
    /// - `ThreadPool`         if rayon fails to spawn the requested number of threads.
    /// - `ImpossibleEvidence` if no hypothesis may explain the observed traits.
    pub fn run(&self, pedigree: &Pedigree) -> Result<Posterior, InferenceError> {
        let count = self.check_budget(pedigree)?;
        info!("Running inference over {} persons ({count} hypotheses)", pedigree.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|source| InferenceError::ThreadPool{threads: self.threads, source})?;
        debug!("Thread pool ready ({} threads)", pool.current_num_threads());

        // ---- Partition the hypothesis space.
        let trait_assignments: Vec<TraitAssignment> = pedigree.trait_assignments().collect();
        debug!("{} evidence-consistent trait assignments", trait_assignments.len());

        let progress = logger::Logger::progress_bar(trait_assignments.len() as u64, "Enumerating hypotheses");
        let partials: Vec<Marginals> = pool.install(|| {
            trait_assignments.into_par_iter()
                .map(|traits| {
                    let partial = Marginals::from_hypotheses(pedigree, &self.tables, pedigree.hypotheses_for(traits));
                    progress.inc(1);
                    partial
                })
                .collect()
        });
        progress.finish_and_clear();

        // ---- Ordered merge of every partial accumulator.
        let marginals = partials.iter().fold(Marginals::zeroed(pedigree.len()), |mut acc, partial| {
            acc += partial;
            acc
        });
        marginals.normalize(pedigree)
    }

    /// Single-threaded version of `run()`, folding every hypothesis within a single accumulator.
    pub fn run_sequential(&self, pedigree: &Pedigree) -> Result<Posterior, InferenceError> {
        let count = self.check_budget(pedigree)?;
        info!("Running sequential inference over {} persons ({count} hypotheses)", pedigree.len());
        Marginals::from_hypotheses(pedigree, &self.tables, pedigree.hypotheses()).normalize(pedigree)
    }
}

/// Run an exact inference over `pedigree` using default engine settings.
pub fn infer(pedigree: &Pedigree, tables: &ProbabilityTables) -> Result<Posterior, InferenceError> {
    InferenceEngine::new(*tables).run(pedigree)
}
