use std::{fs::File, io::{Write, BufWriter}, path::Path};
use anyhow::Result;
use regex::Regex;
use lazy_static::lazy_static;
use log::debug;

use located_error::LocatedError;

mod error;
pub use error::WriterError;

/// Field separator of every file written by a `GenericWriter`.
pub const WRITER_SEPARATOR: &str = "\t";

/// A generic file writer.
/// - source: Boxed `BufWriter` (can either handle file-writing, or stdout).
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>
}

impl<'a> GenericWriter<'a>{
    /// Instantiate a new `Writer`, linked to a file, or to stdout if `path` is `None`.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(path: Option<impl AsRef<Path>>) -> Result<GenericWriter<'a>>{
        Ok(GenericWriter{ source: match path {
            Some(path) => {
                let path = path.as_ref();
                debug!("Writing to {}", path.display());
                let file = File::create(path)
                    .map_err(|source| WriterError::CreateFile{path: path.to_path_buf(), source})
                    .loc("While creating file")?;
                BufWriter::new(Box::new(file))
            },
            None => {
                BufWriter::new(Box::new(std::io::stdout()))
            }
        }})
    }

    /// Write the contents of a generic iterator within a file/stdout.
    /// one Iteration step = one line.
    ///
    /// # Behavior
    /// For each item of the iterator, `write_iter` will search for the regular expression
    /// `[ ]+-[ ]+` and replace matches with `\t`. This effectively removes "Pretty-print"
    /// from the output.
    ///
    /// # Errors
    /// - If any of the Items within `iter` fails to get written within the file.
    ///
    /// # Panics
    /// - if parsing the regex required to delete pretty-print characters fails.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: std::fmt::Display,
    {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"[ ]+-[ ]+").expect("Failed to parse regex.");
        }
        for obj in iter {
            self.source.write_all(RE.replace_all(&format!("{obj}\n"), WRITER_SEPARATOR).as_bytes())
                .map_err(WriterError::IOError)
                .loc("While writing contents into file")?;
        }
        self.source.flush().loc("While flushing buffer contents of Writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_file() -> anyhow::Result<()> {
        let tmpdir   = tempfile::tempdir()?;
        let path     = tmpdir.path().join("family.marginals");
        let mut writer = GenericWriter::new(Some(&path))?;

        writer.write_iter(["Name       - P(gene=0) - P(trait)", "Harry      - 0.5351    - 0.2665"])?;

        let got = std::fs::read_to_string(&path)?;
        assert_eq!(got, "Name\tP(gene=0)\tP(trait)\nHarry\t0.5351\t0.2665\n");
        Ok(())
    }

    #[test]
    fn unwritable_path() {
        let tmpdir = tempfile::tempdir().expect("tempdir");
        let err = GenericWriter::new(Some(tmpdir.path().join("missing-dir").join("out.tsv"))).err().expect("should fail");
        assert!(err.chain().any(|e| matches!(e.downcast_ref::<WriterError>(), Some(WriterError::CreateFile{..}))));
    }
}
