use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Impossible evidence: no hypothesis with a non-zero probability remains for {person}")]
    ImpossibleEvidence{person: String},

    #[error("The hypothesis space of this pedigree ({count}) exceeds the allowed budget of {budget} hypotheses")]
    HypothesisBudget{count: String, budget: u64},

    #[error("Failed to build a thread pool of {threads} threads: {source}")]
    ThreadPool{threads: usize, source: rayon::ThreadPoolBuildError},
}
