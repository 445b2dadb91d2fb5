use serde::Serialize;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provider {
    GoogleDrive,
    OneDrive,
    DirectPdf,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleDrive => "google_drive",
            Self::OneDrive => "onedrive",
            Self::DirectPdf => "direct_pdf",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A download location derived from a user-supplied sharing link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub canonical_url: Url,
    pub provider: Provider,
}
