use futures::StreamExt;
use reqwest::{Client, Url, header};
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::catalog::{self, JobCatalog};
use crate::error::AceError;
use crate::fs_utils;
use crate::portal::Portal;
use crate::session::SessionToken;

/// Name of the local destination root mirroring the remote tree.
pub const DEST_ROOT: &str = "ace_sequencing";

/// What to do when the destination root already exists. The check is
/// existence only, not emptiness, so `Force` is advisory rather than
/// protective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Refuse,
    Force,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub files_downloaded: usize,
    pub files_failed: usize,
    pub jobs_skipped: usize,
}

/// Downloads every file of every requested job, strictly sequentially.
///
/// The local tree is `<dest_parent>/ace_sequencing/data/<plate><job>/<file>`,
/// where the plate link keeps its trailing slash as crawled, so plates nest
/// the job directories exactly as the remote listing does. A requested job id
/// absent from the catalog is reported and skipped. A failed file fetch is
/// reported, its partial file removed, and the run continues with the next
/// file.
pub async fn download_jobs(
    client: &Client,
    portal: &Portal,
    token: &SessionToken,
    catalog: &JobCatalog,
    username: &str,
    jobs: &[String],
    dest_parent: &Path,
    overwrite: OverwritePolicy,
) -> Result<DownloadSummary, AceError> {
    let dest = dest_parent.join(DEST_ROOT);
    if dest.exists() && overwrite == OverwritePolicy::Refuse {
        return Err(AceError::DestinationExists { path: dest });
    }
    fs_utils::ensure_dir(dest.join("data")).await?;

    let data_dir = portal.data_dir(username);
    let mut summary = DownloadSummary::default();

    for job_id in jobs {
        let Some(plate_links) = catalog.plates_for(job_id) else {
            println!("Job {job_id} not found. Skipping...");
            summary.jobs_skipped += 1;
            continue;
        };

        for plate_link in plate_links {
            let remote_dir = format!("{data_dir}{plate_link}{job_id}/");
            let local_dir = dest.join("data").join(format!("{plate_link}{job_id}"));
            fs_utils::ensure_dir(&local_dir).await?;

            let file_links = catalog::list_links(client, portal, token, &remote_dir, None).await?;
            for file_link in file_links {
                // sub-directories and dynamic links
                if file_link.ends_with('/') || file_link.contains('?') {
                    continue;
                }

                let url = portal.data_url(&format!("{remote_dir}{file_link}"))?;
                let target = local_dir.join(fs_utils::cleanup_filename(&file_link));
                println!("Downloading {url}");
                match fetch_file(client, token, url.clone(), &target).await {
                    Ok(bytes) => {
                        tracing::debug!(%url, bytes, "download finished");
                        summary.files_downloaded += 1;
                    }
                    Err(e) => {
                        tracing::error!(%url, error = %e, "download failed");
                        remove_partial(&target).await;
                        summary.files_failed += 1;
                    }
                }
            }
        }
    }

    Ok(summary)
}

/// In-process GET with the session cookie, streaming the body into `target`.
/// Returns the number of bytes written.
async fn fetch_file(
    client: &Client,
    token: &SessionToken,
    url: Url,
    target: &Path,
) -> Result<u64, AceError> {
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

    let mut file = tokio::fs::File::create(target).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

async fn remove_partial(target: &Path) {
    if let Err(e) = tokio::fs::remove_file(target).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %target.display(), error = %e, "could not remove partial file");
        }
    }
}
