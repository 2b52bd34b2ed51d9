use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use heredity::Pedigree;
use located_error::prelude::*;
use log::{debug, trace};
use serde::Deserialize;

mod error;
pub use error::PedigreeReaderError;

/// Required columns of a pedigree definition file.
pub const PEDIGREE_HEADER: [&str; 4] = ["name", "mother", "father", "trait"];

/// Raw, untyped line of a pedigree definition file. Empty fields are deserialized as `None`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    name            : Option<String>,
    mother          : Option<String>,
    father          : Option<String>,
    #[serde(rename = "trait")]
    observed_trait  : Option<String>,
}

/// A single person definition.
/// # Fields:
/// - `name`          : unique identifier of the person.
/// - `mother`        : name of the mother, if known.
/// - `father`        : name of the father, if known.
/// - `observed_trait`: `Some(true)` ('1'), `Some(false)` ('0') or `None` (empty field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name          : String,
    pub mother        : Option<String>,
    pub father        : Option<String>,
    pub observed_trait: Option<bool>,
}

impl TryFrom<RawRecord> for PersonRecord {
    type Error = PedigreeReaderError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let name = raw.name.ok_or(PedigreeReaderError::MissingName)?;
        let observed_trait = match raw.observed_trait.as_deref() {
            None      => None,
            Some("1") => Some(true),
            Some("0") => Some(false),
            Some(other) => return Err(PedigreeReaderError::TraitValue(other.to_string()))
        };
        Ok(Self{name, mother: raw.mother, father: raw.father, observed_trait})
    }
}

/// Pedigree definition file reader (`.csv` extension)
/// ### File characteristics:
/// - Comma-separated fields, with a header line.
/// - Columns: `name`, `mother`, `father`, `trait`
/// - Leading and trailing whitespace of every field is ignored.
#[derive(Debug, Clone)]
pub struct PedigreeReader {
    records: Vec<PersonRecord>,
}

impl PedigreeReader {
    /// Parse a pedigree definition file.
    /// # Arguments:
    /// - `path`: path leading to the `.csv` pedigree definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        use PedigreeReaderError::OpenFile;
        let path = path.as_ref();
        let loc_msg = || format!("While attempting to parse {}", path.display());
        debug!("Reading pedigree definition file {}", path.display());

        let file = File::open(path).map_err(|source| OpenFile{path: path.to_path_buf(), source}).with_loc(loc_msg)?;
        Self::from_reader(BufReader::new(file)).with_loc(loc_msg)
    }

    /// Parse a pedigree definition from any source implementing `Read`.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        use PedigreeReaderError::{InvalidHeader, InvalidRecord};
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        // ---- Ensure the required columns are present before deserializing anything.
        let header = reader.headers().map_err(InvalidHeader).loc("While reading the header line")?;
        let missing: Vec<&str> = PEDIGREE_HEADER.into_iter().filter(|col| !header.iter().any(|h| h == *col)).collect();
        if !missing.is_empty() {
            return loc!(format!("Missing column(s) {missing:?} in the pedigree definition header. Expected: {PEDIGREE_HEADER:?}"))
        }

        let mut records = Vec::new();
        for (i, raw) in reader.deserialize::<RawRecord>().enumerate() {
            let lineno = i + 2; // header is line 1
            let loc_msg = || format!("While parsing line n°{lineno} of the pedigree definition file");
            let raw = raw.map_err(|source| InvalidRecord{lineno, source}).with_loc(loc_msg)?;
            let record = PersonRecord::try_from(raw).with_loc(loc_msg)?;
            trace!("{record:?}");
            records.push(record);
        }
        Ok(Self{records})
    }

    /// Access every parsed record, in file order.
    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    /// Validate the parsed records into a `Pedigree`.
    pub fn into_pedigree(self) -> Result<Pedigree> {
        use PedigreeReaderError::{AddPerson, BuildPedigree};
        let mut builder = Pedigree::builder();
        for record in &self.records {
            builder.add_person(&record.name, record.mother.as_deref(), record.father.as_deref(), record.observed_trait)
                .map_err(|source| AddPerson{name: record.name.clone(), source})
                .loc("While building pedigree")?;
        }
        builder.build().map_err(BuildPedigree).loc("While building pedigree")
    }
}
