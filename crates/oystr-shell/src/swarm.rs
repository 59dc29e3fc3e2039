//! Uploads to the local Swarm node's HTTP gateway.
//!
//! Files are posted raw to `bzz-raw:/`. Directories are posted as a tar
//! archive to `bzz:/`, which turns them into a manifest; when the directory
//! has an entry point it becomes the manifest's default path.

use std::path::Path;

use futures_util::future::LocalBoxFuture;
use oystr_menu::{UploadError, UploadKind, UploadRequest, Uploader};
use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// Swarm HTTP gateway client.
#[derive(Debug, Clone)]
pub struct SwarmGateway {
    client: reqwest::Client,
    base_url: String,
}

impl SwarmGateway {
    /// Client for the gateway at `base_url`, e.g. `http://localhost:8500`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint a request is posted to.
    #[must_use]
    pub fn endpoint(&self, request: &UploadRequest) -> String {
        match (request.kind, &request.default_file) {
            (UploadKind::File, _) => format!("{}/bzz-raw:/", self.base_url),
            (UploadKind::Directory, None) => format!("{}/bzz:/", self.base_url),
            (UploadKind::Directory, Some(entry)) => {
                format!("{}/bzz:/?defaultpath={entry}", self.base_url)
            }
        }
    }

    async fn post(&self, request: UploadRequest) -> Result<String, UploadError> {
        let url = self.endpoint(&request);
        let (body, content_type) = read_source(&request).await?;

        tracing::debug!(url = %url, bytes = body.len(), "Posting to Swarm gateway");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static(content_type))
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::Swarm(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Swarm(format!("gateway returned {status}")));
        }

        let hash = response
            .text()
            .await
            .map_err(|e| UploadError::Swarm(e.to_string()))?;
        let hash = hash.trim();
        if hash.is_empty() {
            return Err(UploadError::Swarm("gateway returned no hash".to_string()));
        }
        Ok(hash.to_string())
    }
}

impl Uploader for SwarmGateway {
    fn upload(&self, request: UploadRequest) -> LocalBoxFuture<'_, Result<String, UploadError>> {
        Box::pin(self.post(request))
    }
}

/// Read the file, or tar the directory, off the event loop.
async fn read_source(request: &UploadRequest) -> Result<(Vec<u8>, &'static str), UploadError> {
    let path = request.path.clone();
    let kind = request.kind;
    tokio::task::spawn_blocking(move || match kind {
        UploadKind::File => std::fs::read(&path)
            .map(|bytes| (bytes, "application/octet-stream"))
            .map_err(|e| UploadError::Source(format!("{}: {e}", path.display()))),
        UploadKind::Directory => tar_directory(&path).map(|bytes| (bytes, "application/x-tar")),
    })
    .await
    .map_err(|e| UploadError::Source(e.to_string()))?
}

/// Archive the contents of `dir` with paths relative to it.
pub fn tar_directory(dir: &Path) -> Result<Vec<u8>, UploadError> {
    let mut builder = tar::Builder::new(Vec::new());
    builder
        .append_dir_all(".", dir)
        .and_then(|()| builder.into_inner())
        .map_err(|e| UploadError::Source(format!("{}: {e}", dir.display())))
}
