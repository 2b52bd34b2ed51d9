use std::{collections::BTreeMap, path::{Path, PathBuf}};

use clap::Parser;

use super::Fixture;

/// Tolerance used when comparing tabulated probabilities against expected values.
pub const TOLERANCE: f64 = 1e-4;

/// Run `heredity-rs infer` over a test pedigree, within a temporary output directory.
/// # Fields:
/// - `pedigree`  : copy of the input pedigree definition file.
/// - `output_dir`: temporary output directory. Removed once the runner is dropped.
pub struct HeredityRunner {
    pub pedigree  : Fixture,
    pub output_dir: Fixture,
}

impl HeredityRunner {
    pub fn new(pedigree: &str) -> Self {
        Self {
            pedigree  : Fixture::copy(&format!("pedigree/{pedigree}")),
            output_dir: Fixture::blank("heredity-test-output"),
        }
    }

    /// Path of the tabulated output file.
    pub fn output_file(&self) -> PathBuf {
        let stem = self.pedigree.file_stem().expect("Pedigree fixture should have a file stem");
        self.output_dir.join(stem).with_extension("marginals")
    }

    /// Command line arguments of an inference run. `extra_args` are appended as-is.
    pub fn args(&self, extra_args: &str) -> String {
        format!("heredity-rs infer {} --output-dir {} {extra_args}", self.pedigree, self.output_dir)
    }

    pub fn run(&self, extra_args: &str) -> anyhow::Result<()> {
        let cli = parser::Cli::parse_from(self.args(extra_args).split_whitespace());
        cli.serialize()?;
        heredity_rs::run(cli)
    }

    /// Locate the serialized arguments of the last run.
    pub fn serialized_args(&self) -> PathBuf {
        std::fs::read_dir(&*self.output_dir)
            .expect("Output directory should exist")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .find(|path| path.to_string_lossy().ends_with("-infer.yaml"))
            .expect("Serialized arguments should have been written")
    }
}

/// Parse a tabulated output file into a `name -> [P(gene=0), P(gene=1), P(gene=2), P(trait), P(no-trait)]` map.
pub fn read_marginals(path: &Path) -> BTreeMap<String, [f64; 5]> {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to open {}", path.display()));
    contents.lines().skip(1).map(|line| {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 6, "Invalid number of fields in line '{line}'");
        let mut values = [0.0; 5];
        for (value, field) in values.iter_mut().zip(&fields[1..]) {
            *value = field.parse().unwrap_or_else(|_| panic!("Invalid probability '{field}'"));
        }
        (fields[0].to_string(), values)
    }).collect()
}

pub fn assert_marginals_match(got: &BTreeMap<String, [f64; 5]>, want: &[(&str, [f64; 5])]) {
    assert_eq!(got.len(), want.len());
    for (name, expected) in want {
        let values = got.get(*name).unwrap_or_else(|| panic!("Missing person {name}"));
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < TOLERANCE, "{name}: got {values:?}, want {expected:?}");
        }
    }
}
