use std::path::PathBuf;

use heredity::PedigreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PedigreeReaderError {
    #[error("Failed to open pedigree definition file '{}'", path.display())]
    OpenFile{path: PathBuf, #[source] source: std::io::Error},

    #[error("Invalid header. Expected the following columns: 'name,mother,father,trait'")]
    InvalidHeader(#[source] csv::Error),

    #[error("Failed to parse record n°{lineno} of the pedigree definition file")]
    InvalidRecord{lineno: usize, #[source] source: csv::Error},

    #[error("Invalid trait value '{0}'. Expected '1', '0', or an empty field")]
    TraitValue(String),

    #[error("Encountered a record without any name")]
    MissingName,

    #[error("Failed to add person '{name}' into the pedigree")]
    AddPerson{name: String, #[source] source: PedigreeError},

    #[error("Failed to validate the pedigree definition")]
    BuildPedigree(#[source] PedigreeError),
}
