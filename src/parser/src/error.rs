use std::path::PathBuf;

use thiserror::Error;
use crate::FileEntity;

#[derive(Error, Debug)]
pub enum ParserError{
    #[error("{0} {1} does not exist")]
    MissingFileEntity(FileEntity, String),

    #[error("{1} is not a {0}")]
    InvalidFileEntity(FileEntity, String),

    #[error("Failed to create output directory {}", .0.display())]
    CreateOutputDir(PathBuf, #[source] std::io::Error),

    #[error("Invalid value '{0}'. Expected a floating point number between 0 and 1")]
    InvalidProbability(String),

    #[error("Failed to generate an output file prefix. Note that file prefixes are generated from the input pedigree filestem")]
    ParseOutputPrefix,

    #[error("{0} already exists. Use --overwrite to force.")]
    CannotOverwrite(String),

    #[error("Failed to serialize command line arguments")]
    SerializeArgs(#[source] serde_yaml::Error),

    #[error("Unable to write serialized arguments into {}", .0.display())]
    WriteArgs(PathBuf, #[source] std::io::Error),

    #[error("Failed to open configuration file {}", .0.display())]
    OpenYaml(PathBuf, #[source] std::io::Error),

    #[error("Failed to deserialize command line arguments")]
    DeserializeArgs(#[source] serde_yaml::Error),
}
