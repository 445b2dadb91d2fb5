use url::Url;

use super::errors::ResolveError;

const HOSTS: [&str; 2] = ["drive.google.com", "docs.google.com"];
const DOWNLOAD_ENDPOINT: &str = "https://drive.google.com/uc";

pub fn is_google_drive(url: &Url) -> bool {
    url.host_str().is_some_and(|host| HOSTS.contains(&host))
}

/// Rewrite a share link (`/file/d/{id}/...` or `?id={id}`) to the direct
/// download endpoint.
pub fn resolve(url: &Url) -> Result<Url, ResolveError> {
    let id = file_id(url).ok_or_else(|| ResolveError::MalformedLink {
        provider: "Google Drive",
        reason: "no file id in link".to_string(),
    })?;

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ResolveError::MalformedLink {
            provider: "Google Drive",
            reason: format!("invalid file id '{id}'"),
        });
    }

    let mut download = Url::parse(DOWNLOAD_ENDPOINT).map_err(|e| ResolveError::MalformedLink {
        provider: "Google Drive",
        reason: e.to_string(),
    })?;
    download
        .query_pairs_mut()
        .append_pair("export", "download")
        .append_pair("id", &id);
    Ok(download)
}

fn file_id(url: &Url) -> Option<String> {
    if let Some(segments) = url.path_segments() {
        let segments: Vec<&str> = segments.collect();
        if let Some(pos) = segments.windows(2).position(|w| w == ["file", "d"])
            && let Some(id) = segments.get(pos + 2)
            && !id.is_empty()
        {
            return Some(id.to_string());
        }
    }

    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}
