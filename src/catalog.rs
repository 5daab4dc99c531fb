use reqwest::Client;
use reqwest::header;
use std::collections::HashMap;

use crate::error::AceError;
use crate::html;
use crate::portal::Portal;
use crate::session::SessionToken;

pub const PLATE_PREFIX: &str = "P";
pub const JOB_PREFIX: &str = "J";

/// Job id → plate links the job directory was observed under, in discovery
/// order. A job spanning several plates has one entry per plate; duplicate
/// observations are kept as-is, mirroring the raw crawl.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    order: Vec<String>,
    plates_by_job: HashMap<String, Vec<String>>,
}

impl JobCatalog {
    pub fn insert(&mut self, job_id: String, plate_link: String) {
        match self.plates_by_job.get_mut(&job_id) {
            Some(plates) => plates.push(plate_link),
            None => {
                self.order.push(job_id.clone());
                self.plates_by_job.insert(job_id, vec![plate_link]);
            }
        }
    }

    /// Job ids in the order they were first discovered.
    pub fn job_ids(&self) -> &[String] {
        &self.order
    }

    pub fn plates_for(&self, job_id: &str) -> Option<&[String]> {
        self.plates_by_job.get(job_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Authenticated GET of a directory-listing page, returning its anchor hrefs
/// optionally narrowed to those starting (case-insensitively) with
/// `begins_with`. Trailing slashes are left untouched; the caller trims as
/// needed.
pub async fn list_links(
    client: &Client,
    portal: &Portal,
    token: &SessionToken,
    remote_path: &str,
    begins_with: Option<&str>,
) -> Result<Vec<String>, AceError> {
    let url = portal.data_url(remote_path)?;
    tracing::debug!(%url, "listing directory");
    let response = client
        .get(url)
        .header(header::COOKIE, token.header_value()?)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AceError::ResponseStatusNotSuccess {
            status_code: status.to_string(),
        });
    }

    let body = response.text().await?;
    Ok(html::filter_prefix(html::extract_links(&body), begins_with))
}

/// One pass over the data tree: plate directories at the top level, job
/// directories inside each plate. The catalog is complete before any
/// download starts, since a job may span plates discovered at different
/// points of the crawl.
pub async fn build_catalog(
    client: &Client,
    portal: &Portal,
    token: &SessionToken,
    username: &str,
) -> Result<JobCatalog, AceError> {
    let data_dir = portal.data_dir(username);
    let mut catalog = JobCatalog::default();

    let plate_links = list_links(client, portal, token, &data_dir, Some(PLATE_PREFIX)).await?;
    tracing::debug!(plates = plate_links.len(), "plate directories found");

    for plate_link in plate_links {
        let plate_path = format!("{data_dir}{plate_link}");
        let job_links = list_links(client, portal, token, &plate_path, Some(JOB_PREFIX)).await?;
        for job_link in job_links {
            let job_id = job_link.trim_end_matches('/').to_string();
            catalog.insert(job_id, plate_link.clone());
        }
    }

    Ok(catalog)
}
