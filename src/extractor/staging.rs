use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Document bytes written to a temporary file for the lifetime of the guard.
///
/// The file is removed when the guard is dropped, whichever way the caller
/// leaves the scope.
#[derive(Debug)]
pub struct StagedDocument {
    file: NamedTempFile,
}

impl StagedDocument {
    pub fn stage_in(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("eoc-")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
