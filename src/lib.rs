
use parser::{Cli, Commands::{FromYaml, Infer}};
use heredity::{InferenceEngine, Pedigree, Posterior, ProbabilityTables};
use heredity_io::{read::PedigreeReader, write::GenericWriter};

use located_error::prelude::*;

#[macro_use]
extern crate log;

/// Load the probability tables requested by the user: default tables, or the contents of `--probs`, with an
/// optional `--mutation-rate` override.
pub fn load_tables(args: &parser::Infer) -> Result<ProbabilityTables> {
    let tables = match &args.probs {
        Some(path) => ProbabilityTables::from_yaml(path).loc("While loading probability tables")?,
        None       => ProbabilityTables::default(),
    };
    match args.mutation_rate {
        Some(mu) => tables.with_mutation_rate(mu).loc("While applying --mutation-rate"),
        None     => Ok(tables),
    }
}

/// Parse the input pedigree and compute the marginals of every person.
pub fn infer(args: &parser::Infer) -> Result<(Pedigree, Posterior)> {
    let tables = load_tables(args)?;
    debug!("{tables:?}");

    info!("Parsing pedigree definition file...");
    let pedigree = PedigreeReader::from_path(&args.pedigree)?.into_pedigree()?;
    info!("Found {} persons ({} founders, {} offsprings, {} unobserved traits)",
        pedigree.len(), pedigree.founders().count(), pedigree.offsprings().count(), pedigree.unobserved()
    );

    let engine = InferenceEngine::new(tables)
        .with_threads(args.threads)
        .with_max_hypotheses(args.max_hypotheses);
    let posterior = engine.run(&pedigree).loc("While running inference")?;
    Ok((pedigree, posterior))
}

/// Print the marginals to the console and, if an output directory was requested, write them within a
/// tab-separated file.
pub fn write_posterior(posterior: &Posterior, precision: usize, output_file: Option<&std::path::Path>) -> Result<()> {
    print!("{posterior:.precision$}");
    if let Some(path) = output_file {
        let mut writer = GenericWriter::new(Some(path))?;
        writer.write_iter(posterior.records(precision))?;
        info!("Marginals written to {}", path.display());
    }
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Infer {infer: args} => {
            // ---- Check output file permissions before running anything.
            if let Some(dir) = &args.output_dir {
                parser::valid_output_dir(dir.as_os_str())?;
            }
            let output_file = args.output_file()?;

            let (_, posterior) = infer(&args)?;
            write_posterior(&posterior, args.precision, output_file.as_deref())?;
        },

        FromYaml{yaml} => {
            let cli = Cli::deserialize(&yaml).loc("While replaying a previous run")?;
            self::run(cli)?;
        },
    };
    Ok(())
}
