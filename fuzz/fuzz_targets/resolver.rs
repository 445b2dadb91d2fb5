#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use eoc_rating::resolver::{Provider, classify, google_drive};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(url) = Url::parse(&raw) else {
        return;
    };

    // Drive links either resolve to the download endpoint or are rejected.
    if classify(&url, &[]) == Some(Provider::GoogleDrive)
        && let Ok(download) = google_drive::resolve(&url)
    {
        assert_eq!(download.host_str(), Some("drive.google.com"));
    }
});
