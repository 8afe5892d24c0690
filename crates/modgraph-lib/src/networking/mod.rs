pub mod repository;

use reqwest::{Client, StatusCode};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::trace;

pub use repository::MavenRepository;

/// Networking errors for repository access
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("Failed to parse XML from {url}: {source}")]
    XmlError {
        url: String,
        source: quick_xml::DeError,
    },

    #[error("Failed to parse JSON from {url}: {source}")]
    JsonError {
        url: String,
        source: serde_json::Error,
    },

    #[error("No version published for {artifact}")]
    NoVersion { artifact: String },

    #[error("Task join error: {source}")]
    TaskJoinError {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("Semaphore acquire error: {source}")]
    SemaphoreError {
        #[from]
        source: tokio::sync::AcquireError,
    },

    #[error("Invalid job count: {count} (must be > 0)")]
    InvalidJobCount { count: usize },
}

/// HTTP client and concurrency settings
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// Maximum number of concurrent requests
    pub max_jobs: usize,
    /// HTTP client timeout in seconds
    pub timeout_seconds: u64,
    /// Enable per-task tracing
    pub trace_requests: bool,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            max_jobs: 8,
            timeout_seconds: 30,
            trace_requests: false,
        }
    }
}

/// Shared HTTP client with a bound on in-flight requests
#[derive(Debug, Clone)]
pub struct NetworkingManager {
    client: Client,
    config: NetworkingConfig,
    semaphore: Arc<Semaphore>,
}

impl NetworkingManager {
    pub fn new(config: NetworkingConfig) -> Result<Self, NetworkingError> {
        trace!("Initializing networking manager");

        if config.max_jobs == 0 {
            return Err(NetworkingError::InvalidJobCount {
                count: config.max_jobs,
            });
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("modgraph/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let semaphore = Arc::new(Semaphore::new(config.max_jobs));

        trace!(
            "Networking manager initialized with {} concurrent jobs",
            config.max_jobs
        );

        Ok(Self {
            client,
            config,
            semaphore,
        })
    }

    pub fn max_jobs(&self) -> usize {
        self.config.max_jobs
    }

    /// HTTP client for manual requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Run `task_fn` for every item concurrently, at most `max_jobs` at a time.
    ///
    /// Results come back in input order. The outer error is only for task
    /// infrastructure failures (panics, closed semaphore).
    pub async fn run_all<T, R, F, Fut>(
        &self,
        items: Vec<T>,
        task_fn: F,
    ) -> Result<Vec<Result<R, NetworkingError>>, NetworkingError>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(Client, T) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<R, NetworkingError>> + Send,
    {
        trace!("Starting {} networking tasks", items.len());

        let task_fn = Arc::new(task_fn);
        let mut tasks = Vec::with_capacity(items.len());

        for item in items {
            let client = self.client.clone();
            let semaphore = self.semaphore.clone();
            let task_fn = task_fn.clone();
            let trace_requests = self.config.trace_requests;

            let task = tokio::spawn(async move {
                let _permit = semaphore.acquire().await?;

                let result = task_fn(client, item).await;

                if trace_requests {
                    match &result {
                        Ok(_) => trace!("Networking task completed"),
                        Err(e) => trace!("Networking task failed: {}", e),
                    }
                }

                Ok::<_, NetworkingError>(result)
            });

            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            results.push(task.await??);
        }

        trace!("Completed {} networking tasks", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
