use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::errors::ResolveError;

const SHORT_LINK_HOSTS: [&str; 1] = ["1drv.ms"];
const SHARE_HOSTS: [&str; 3] = [
    "onedrive.live.com",
    "sharepoint.com",
    "microsoftpersonalcontent.com",
];

pub fn is_onedrive(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| is_short_link_host(host) || host_matches(host, &SHARE_HOSTS))
}

fn is_short_link_host(host: &str) -> bool {
    host_matches(host, &SHORT_LINK_HOSTS)
}

fn host_matches(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|d| host == *d || host.strip_suffix(d).is_some_and(|rest| rest.ends_with('.')))
}

/// Resolve a OneDrive link to a direct download URL, following the redirect
/// of short links first.
#[instrument(skip_all, fields(url = %url))]
pub async fn resolve(client: &Client, url: &Url) -> Result<Url, ResolveError> {
    let share_url = match url.host_str() {
        Some(host) if is_short_link_host(host) => follow_short_link(client, url).await?,
        _ => url.clone(),
    };
    Ok(download_url(share_url))
}

/// GET the short link and report where the redirect chain ends. The body is
/// never read.
pub async fn follow_short_link(client: &Client, url: &Url) -> Result<Url, ResolveError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| ResolveError::LinkResolution {
            url: url.to_string(),
            reason: if e.is_timeout() {
                "redirect timed out".to_string()
            } else {
                e.to_string()
            },
        })?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ResolveError::LinkResolution {
            url: url.to_string(),
            reason: format!("redirect ended with status {status}"),
        });
    }

    let final_url = response.url().clone();
    debug!(final_url = %final_url, "short link resolved");
    Ok(final_url)
}

/// Strip the share URL's query and fragment and ask for the file itself.
pub fn download_url(mut share_url: Url) -> Url {
    share_url.set_fragment(None);
    share_url.set_query(None);
    share_url.query_pairs_mut().append_pair("download", "1");
    share_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_hosts() {
        for link in [
            "https://1drv.ms/b/s!AbCdEf",
            "https://onedrive.live.com/redir?resid=1",
            "https://contoso-my.sharepoint.com/:b:/g/personal/doc",
            "https://public.am.files.1drv.com.microsoftpersonalcontent.com/x",
        ] {
            assert!(is_onedrive(&Url::parse(link).unwrap()), "{link}");
        }
        assert!(!is_onedrive(&Url::parse("https://notsharepoint.com/a.pdf").unwrap()));
        assert!(!is_onedrive(&Url::parse("https://example.com/onedrive.pdf").unwrap()));
    }

    #[test]
    fn download_url_replaces_query() {
        let url = Url::parse("https://contoso-my.sharepoint.com/:b:/g/personal/eoc.pdf?e=abc#top")
            .unwrap();
        assert_eq!(
            download_url(url).as_str(),
            "https://contoso-my.sharepoint.com/:b:/g/personal/eoc.pdf?download=1"
        );
    }

    #[tokio::test]
    async fn full_share_link_needs_no_network() {
        // An unroutable client proves no request is made.
        let client = Client::builder()
            .proxy(reqwest::Proxy::all("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        let url = Url::parse("https://onedrive.live.com/embed?resid=ABC&authkey=x").unwrap();
        let resolved = resolve(&client, &url).await.unwrap();
        assert_eq!(resolved.as_str(), "https://onedrive.live.com/embed?download=1");
    }
}
