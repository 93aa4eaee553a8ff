//! Admin REST API client
//!
//! `AdminApi` is the seam between UI actions and the backend; `HttpAdminApi`
//! is the reqwest implementation. Success is judged by a 2xx status only,
//! response bodies are never inspected for error fields.

use crate::error::ApiError;
use crate::types::*;
use crate::upload::UploadSession;
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Upload progress callback: `(bytes_sent, total_bytes)`
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn stats(&self) -> Result<Stats, ApiError>;
    async fn recent_activities(&self) -> Result<Vec<Activity>, ApiError>;

    async fn files(&self) -> Result<Vec<FileRecord>, ApiError>;
    async fn delete_file(&self, id: &Id) -> Result<(), ApiError>;
    async fn generate_links(&self, id: &Id) -> Result<GeneratedLinks, ApiError>;
    async fn upload_file(&self, session: &UploadSession, progress: ProgressFn) -> Result<(), ApiError>;
    async fn upload_url(&self, request: &UrlUpload) -> Result<(), ApiError>;

    async fn categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn create_category(&self, category: &NewCategory) -> Result<(), ApiError>;
    async fn delete_category(&self, id: &Id) -> Result<(), ApiError>;

    async fn users(&self) -> Result<Vec<UserRecord>, ApiError>;
    async fn delete_user(&self, id: &Id) -> Result<(), ApiError>;

    async fn logs(&self) -> Result<String, ApiError>;
}

pub struct HttpAdminApi {
    client: reqwest::Client,
    base: String,
}

impl HttpAdminApi {
    pub fn new(base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.trim().to_string(),
        }
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.base)
            .map_err(|e| ApiError::InvalidBase(format!("{}: {}", self.base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBase(self.base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments)?;
        debug!(%url, "GET");
        let response = check(self.client.get(url).send().await?)?;
        Ok(response.json::<T>().await?)
    }

    async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        let url = self.url(segments)?;
        debug!(%url, "DELETE");
        check(self.client.delete(url).send().await?)?;
        Ok(())
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<reqwest::Response, ApiError> {
        let url = self.url(segments)?;
        debug!(%url, "POST");
        check(self.client.post(url).json(body).send().await?)
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

/// The logs endpoint may hand back its text JSON-encoded; unwrap it if so
pub fn unwrap_log_body(body: String) -> String {
    if body.trim_start().starts_with('"') {
        if let Ok(text) = serde_json::from_str::<String>(&body) {
            return text;
        }
    }
    body
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn stats(&self) -> Result<Stats, ApiError> {
        self.get_json(&["admin", "stats"]).await
    }

    async fn recent_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.get_json(&["admin", "recent-activities"]).await
    }

    async fn files(&self) -> Result<Vec<FileRecord>, ApiError> {
        self.get_json(&["admin", "files"]).await
    }

    async fn delete_file(&self, id: &Id) -> Result<(), ApiError> {
        self.delete(&["admin", "files", id.as_str()]).await
    }

    async fn generate_links(&self, id: &Id) -> Result<GeneratedLinks, ApiError> {
        let url = self.url(&["admin", "files", id.as_str(), "links"])?;
        debug!(%url, "POST");
        let response = check(self.client.post(url).send().await?)?;
        Ok(response.json::<GeneratedLinks>().await?)
    }

    async fn upload_file(&self, session: &UploadSession, progress: ProgressFn) -> Result<(), ApiError> {
        let file_error = |source| ApiError::File {
            path: session.path.clone(),
            source,
        };
        let file = tokio::fs::File::open(&session.path).await.map_err(file_error)?;
        let total = file.metadata().await.map_err(file_error)?.len();

        let mut sent: u64 = 0;
        let stream = ReaderStream::new(file).inspect_ok(move |chunk| {
            sent += chunk.len() as u64;
            progress(sent, total);
        });
        let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
            .file_name(session.file_name.clone());

        let mut form = Form::new()
            .part("file", part)
            .text("description", session.description.clone());
        if let Some(category) = &session.category_id {
            form = form.text("category_id", category.to_string());
        }

        let url = self.url(&["admin", "upload-file"])?;
        debug!(%url, file = %session.file_name, bytes = total, "POST multipart");
        check(self.client.post(url).multipart(form).send().await?)?;
        Ok(())
    }

    async fn upload_url(&self, request: &UrlUpload) -> Result<(), ApiError> {
        self.post_json(&["admin", "upload-url"], request).await?;
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json(&["admin", "categories"]).await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<(), ApiError> {
        self.post_json(&["admin", "categories"], category).await?;
        Ok(())
    }

    async fn delete_category(&self, id: &Id) -> Result<(), ApiError> {
        self.delete(&["admin", "categories", id.as_str()]).await
    }

    async fn users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get_json(&["admin", "users"]).await
    }

    async fn delete_user(&self, id: &Id) -> Result<(), ApiError> {
        self.delete(&["admin", "users", id.as_str()]).await
    }

    async fn logs(&self) -> Result<String, ApiError> {
        let url = self.url(&["admin", "logs"])?;
        debug!(%url, "GET");
        let body = check(self.client.get(url).send().await?)?.text().await?;
        Ok(unwrap_log_body(body))
    }
}

/// In-memory `AdminApi` that records every call, for action tests
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeApi {
        calls: Mutex<Vec<&'static str>>,
        failing: HashSet<&'static str>,
        pub stats: Stats,
        pub activities: Vec<Activity>,
        pub files: Vec<FileRecord>,
        pub categories: Vec<Category>,
        pub users: Vec<UserRecord>,
        pub logs: String,
        pub uploaded: Mutex<Vec<UploadSession>>,
        pub created: Mutex<Vec<NewCategory>>,
        pub url_uploads: Mutex<Vec<UrlUpload>>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the named operation return HTTP 500
        pub fn failing(mut self, op: &'static str) -> Self {
            self.failing.insert(op);
            self
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, op: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
        }

        fn record(&self, op: &'static str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(op);
            if self.failing.contains(op) {
                Err(ApiError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl AdminApi for FakeApi {
        async fn stats(&self) -> Result<Stats, ApiError> {
            self.record("stats")?;
            Ok(self.stats.clone())
        }

        async fn recent_activities(&self) -> Result<Vec<Activity>, ApiError> {
            self.record("recent_activities")?;
            Ok(self.activities.clone())
        }

        async fn files(&self) -> Result<Vec<FileRecord>, ApiError> {
            self.record("files")?;
            Ok(self.files.clone())
        }

        async fn delete_file(&self, _id: &Id) -> Result<(), ApiError> {
            self.record("delete_file")
        }

        async fn generate_links(&self, _id: &Id) -> Result<GeneratedLinks, ApiError> {
            self.record("generate_links")?;
            Ok(GeneratedLinks::default())
        }

        async fn upload_file(&self, session: &UploadSession, progress: ProgressFn) -> Result<(), ApiError> {
            self.record("upload_file")?;
            // Small chunks, several inside the same whole percent
            for sent in [500, 501, 502, 1000] {
                progress(sent, 1000);
            }
            self.uploaded.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn upload_url(&self, request: &UrlUpload) -> Result<(), ApiError> {
            self.record("upload_url")?;
            self.url_uploads.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn categories(&self) -> Result<Vec<Category>, ApiError> {
            self.record("categories")?;
            Ok(self.categories.clone())
        }

        async fn create_category(&self, category: &NewCategory) -> Result<(), ApiError> {
            self.record("create_category")?;
            self.created.lock().unwrap().push(category.clone());
            Ok(())
        }

        async fn delete_category(&self, _id: &Id) -> Result<(), ApiError> {
            self.record("delete_category")
        }

        async fn users(&self) -> Result<Vec<UserRecord>, ApiError> {
            self.record("users")?;
            Ok(self.users.clone())
        }

        async fn delete_user(&self, _id: &Id) -> Result<(), ApiError> {
            self.record("delete_user")
        }

        async fn logs(&self) -> Result<String, ApiError> {
            self.record("logs")?;
            Ok(self.logs.clone())
        }
    }
}
