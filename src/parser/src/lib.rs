use std::{
    fs::File,
    path::{Path, PathBuf},
    fmt::{self, Display, Formatter}, ffi::OsStr
};

use located_error::prelude::*;

use clap::{Parser, Subcommand, Args};
use serde::{Serialize, Deserialize};
use log::debug;

mod error;
pub use error::ParserError;

/// Extension of the tabulated marginals output file.
pub const MARGINALS_EXT: &str = "marginals";

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="heredity-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// heredity-rs: exact inference of gene and trait probabilities across a family pedigree
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-{module name}.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written at the root of the user-provided `--output-dir` folder. Nothing is written if the user
    ///   did not request an output directory.
    ///
    /// # Errors
    /// - if `serde_yaml` fails to parse `Self` to a string.
    /// - if the serialized arguments cannot be written within `--output-dir`
    pub fn serialize(&self) -> Result<()> {
        use ParserError::{SerializeArgs, WriteArgs};
        let serialized = serde_yaml::to_string(&self).map_err(SerializeArgs).loc("While serializing arguments")?;
        debug!("\n---- Command line args ----\n{}\n---", serialized);

        let Some(output_dir) = self.commands.output_dir() else {
            return Ok(())
        };

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_file = output_dir.join(format!("{current_time}-{}.yaml", self.commands.name()));
        std::fs::write(&output_file, serialized)
            .map_err(|err| WriteArgs(output_file.clone(), err))
            .loc("While serializing arguments")
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    /// - `OpenYaml` if the provided `.yaml` is invalid, or does not carry read permissions
    /// - `DeserializeArgs` if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        use ParserError::{OpenYaml, DeserializeArgs};
        let loc_msg = || format!("While deserializing arguments from {}", yaml.display());
        let file = File::open(yaml).map_err(|err| OpenYaml(yaml.to_path_buf(), err)).with_loc(loc_msg)?;
        serde_yaml::from_reader(file).map_err(DeserializeArgs).with_loc(loc_msg)
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Compute the gene copy and trait marginal probabilities of every person within a pedigree.
    Infer {
        #[clap(flatten)]
        infer: Infer
    },

    /// Run heredity-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a heredity-rs command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

impl Commands {
    /// Name of the subcommand, as used within serialized configuration file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Infer{..}    => "infer",
            Self::FromYaml{..} => "from-yaml",
        }
    }

    /// User-requested output directory, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        match self {
            Self::Infer{infer} => infer.output_dir.as_deref(),
            Self::FromYaml{..} => None,
        }
    }
}

#[derive(Args, Debug, Default, Clone, Serialize, Deserialize)]
pub struct Infer {
    /// Input pedigree definition file.
    ///
    /// Comma-separated file, with a header line and the columns 'name,mother,father,trait'. {n}
    /// - 'mother' and 'father' must either both be empty, or both name another person of the file. {n}
    /// - 'trait' is either '1' (expressed), '0' (not expressed), or empty (unknown).
    #[clap(parse(try_from_os_str=valid_input_file))]
    pub pedigree: PathBuf,

    /// Probability tables of the inheritance model.
    ///
    /// YAML file with the optional keys 'gene_prior' ([P(0), P(1), P(2)]), 'trait_given_gene'
    /// ([P(trait|0), P(trait|1), P(trait|2)]) and 'mutation_rate'. Missing keys fall back on their default value.
    #[clap(short='p', long, parse(try_from_os_str=valid_input_file))]
    pub probs: Option<PathBuf>,

    /// Probability that a transmitted allele mutates.
    ///
    /// Overrides the mutation rate of the default (or --probs) probability tables.
    #[clap(short='m', long, parse(try_from_str=parse_probability))]
    pub mutation_rate: Option<f64>,

    /// Number of worker threads.
    ///
    /// A value of 0 lets the program pick a sensible default (usually, the number of logical cores).
    #[clap(short='@', long, default_value("0"))]
    pub threads: usize,

    /// Maximal number of hypotheses the program may enumerate.
    ///
    /// The hypothesis space grows as 3^n * 2^u, where n is the number of persons and u the number of persons
    /// without an observed trait. Pedigrees exceeding this budget are rejected.
    #[clap(short='H', long, default_value("1000000000"))]
    pub max_hypotheses: u64,

    /// Number of decimals used when printing probabilities.
    #[clap(short='P', long, default_value("4"))]
    pub precision: usize,

    /// Output directory.
    ///
    /// When provided, marginals are written within a tab-separated '<pedigree stem>.marginals' file, along with
    /// a '.yaml' copy of the command line arguments. Marginals are printed to the console otherwise.
    #[clap(short, long, parse(try_from_os_str=valid_output_dir))]
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing output files.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

impl Infer {
    /// Get the path of the tabulated output file: '{output dir}/{pedigree file stem}.marginals'. Returns `None`
    /// if no output directory was requested.
    ///
    /// # Errors
    /// - if a file prefix cannot be created from the input pedigree filestem.
    /// - if the output file already exists and `--overwrite` was not provided.
    pub fn output_file(&self) -> Result<Option<PathBuf>> {
        let Some(output_dir) = &self.output_dir else {
            return Ok(None)
        };

        let file_prefix = self.pedigree.file_stem()
            .ok_or(ParserError::ParseOutputPrefix)
            .loc("While parsing command line arguments")?;

        let mut output_file = output_dir.join(file_prefix);
        output_file.set_extension(MARGINALS_EXT);
        self.can_write_file(&output_file)?;
        Ok(Some(output_file))
    }

    /// Check if a given file already exists ; raise an error if such is the case, and the user did not explicitly
    /// allow file overwriting.
    ///
    /// # Errors
    /// - If the provided `pathbuf` already exists and the user did not specifically allow for file
    ///   overwrite using the `--overwrite` argument
    pub fn can_write_file(&self, pathbuf: &Path) -> Result<bool> {
        if ! self.overwrite && pathbuf.exists() {
            return Err(ParserError::CannotOverwrite(pathbuf.display().to_string()))
                .loc( "While parsing command line arguments" )
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(&self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        if valid {
            Ok(())
        } else {
            Err(InvalidFileEntity(*self, path.display().to_string()))
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: &FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(*entity, path.display().to_string()))
            .loc("While parsing arguments.")
    }

    entity.validate(path).loc("While parsing arguments.")
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, &FileEntity::File)
        .loc("While checking for file validity")?;
    Ok(PathBuf::from(s))
}

/// Create the requested output directory (and its parents) if needed.
///
/// # Errors
/// - if the directory cannot be created, or if `s` points to an existing file.
pub fn valid_output_dir(s: &OsStr) -> Result<PathBuf> {
    let path = Path::new(s);
    if ! path.exists() {
        std::fs::create_dir_all(path)
            .map_err(|err| ParserError::CreateOutputDir(path.to_path_buf(), err))
            .loc("While creating output directory")?;
    }
    assert_filesystem_entity_is_valid(s, &FileEntity::Directory)
        .loc("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

/// Parse a user-provided probability, and ensure it lies within `[0, 1]`
fn parse_probability(s: &str) -> Result<f64> {
    let invalid = || ParserError::InvalidProbability(s.to_string());
    let value: f64 = s.trim().parse().map_err(|_| invalid()).loc("While parsing a probability")?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid()).loc("While parsing a probability")
    }
    Ok(value)
}
