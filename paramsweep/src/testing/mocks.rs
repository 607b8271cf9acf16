//! Submitter doubles for testing.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::{JobId, JobIds};
use crate::errors::SubmissionError;
use crate::executor::{SubmissionRequest, Submitter};

/// A submitter that records every request and returns synthetic job ids.
///
/// Each call creates one job per configured tag, numbered consecutively
/// from 1 across all calls.
#[derive(Debug)]
pub struct RecordingSubmitter {
    tags: Vec<String>,
    requests: Mutex<Vec<SubmissionRequest>>,
    next_id: Mutex<u64>,
}

impl Default for RecordingSubmitter {
    fn default() -> Self {
        Self::new(["preprocessing", "extraction", "projection", "enrollment", "scoring"])
    }
}

impl RecordingSubmitter {
    /// Creates a recording submitter returning jobs with the given tags.
    #[must_use]
    pub fn new(tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            requests: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Returns the number of submissions.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns all recorded requests.
    #[must_use]
    pub fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().clone()
    }

    fn record(&self, request: &SubmissionRequest) -> JobIds {
        self.requests.lock().push(request.clone());
        let mut next_id = self.next_id.lock();
        self.tags
            .iter()
            .map(|tag| {
                let id = JobId(*next_id);
                *next_id += 1;
                (tag.clone(), id)
            })
            .collect()
    }
}

#[async_trait]
impl Submitter for RecordingSubmitter {
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobIds, SubmissionError> {
        Ok(self.record(request))
    }
}

/// A recording submitter that rejects chosen calls (0-based).
#[derive(Debug, Default)]
pub struct FailingSubmitter {
    inner: RecordingSubmitter,
    fail_on: Vec<usize>,
    attempts: Mutex<usize>,
}

impl FailingSubmitter {
    /// Creates a submitter that fails on the given call indices.
    #[must_use]
    pub fn new(fail_on: impl IntoIterator<Item = usize>) -> Self {
        Self {
            inner: RecordingSubmitter::default(),
            fail_on: fail_on.into_iter().collect(),
            attempts: Mutex::new(0),
        }
    }

    /// Returns the number of submission attempts, failed ones included.
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }

    /// Returns the requests that were accepted.
    #[must_use]
    pub fn accepted(&self) -> Vec<SubmissionRequest> {
        self.inner.requests()
    }
}

#[async_trait]
impl Submitter for FailingSubmitter {
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobIds, SubmissionError> {
        let attempt = {
            let mut attempts = self.attempts.lock();
            *attempts += 1;
            *attempts - 1
        };
        if self.fail_on.contains(&attempt) {
            return Err(SubmissionError::rejected(format!(
                "submission {attempt} rejected by test"
            )));
        }
        self.inner.submit(request).await
    }
}
