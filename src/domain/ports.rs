use crate::utils::error::Result;
use std::path::Path;

pub trait FileSource {
    /// Reads a text file as lines without their terminators.
    ///
    /// `Ok(None)` means the file does not exist; that is not an error.
    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>>;
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        (**self).read_lines(path)
    }
}
