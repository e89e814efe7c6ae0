use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use slurmchain::submit::{SchedulerBackend, SchedulerResponse, SubmitRequest};

/// What the fake answers for one script path.
#[derive(Debug, Clone)]
enum Scripted {
    Respond(SchedulerResponse),
    SpawnError(String),
}

/// A fake scheduler that:
/// - records every request it receives, in order
/// - accepts jobs with `Submitted batch job <n>`, n counting up from a
///   starting id
/// - can be told to reject, garble or fail to start for specific paths.
#[derive(Debug, Clone)]
pub struct FakeScheduler {
    requests: Arc<Mutex<Vec<SubmitRequest>>>,
    overrides: HashMap<String, Scripted>,
    next_id: u64,
}

impl FakeScheduler {
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            overrides: HashMap::new(),
            next_id: first_id,
        }
    }

    /// Exit with `code` when `path` is submitted.
    pub fn reject(mut self, path: &str, code: i32, stderr: &str) -> Self {
        self.overrides.insert(
            path.to_string(),
            Scripted::Respond(SchedulerResponse {
                exit_code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    /// Exit successfully with `stdout` when `path` is submitted.
    pub fn respond(mut self, path: &str, stdout: &str) -> Self {
        self.overrides.insert(
            path.to_string(),
            Scripted::Respond(SchedulerResponse::accepted(stdout)),
        );
        self
    }

    /// Answer with exactly `response` when `path` is submitted.
    pub fn script(mut self, path: &str, response: SchedulerResponse) -> Self {
        self.overrides
            .insert(path.to_string(), Scripted::Respond(response));
        self
    }

    /// Fail to invoke the scheduler at all when `path` is submitted.
    pub fn fail_to_start(mut self, path: &str, message: &str) -> Self {
        self.overrides
            .insert(path.to_string(), Scripted::SpawnError(message.to_string()));
        self
    }

    /// Shared handle to the recorded requests; stays valid after the fake
    /// was moved into a submitter.
    pub fn requests(&self) -> Arc<Mutex<Vec<SubmitRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Argument vectors of all recorded requests.
    pub fn argv_log(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(SubmitRequest::argv)
            .collect()
    }

    /// Paths of all recorded requests.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }
}

impl SchedulerBackend for FakeScheduler {
    fn submit<'a>(
        &'a mut self,
        request: &'a SubmitRequest,
    ) -> Pin<Box<dyn Future<Output = io::Result<SchedulerResponse>> + Send + 'a>> {
        self.requests.lock().unwrap().push(request.clone());

        let result = match self.overrides.get(&request.path) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::SpawnError(message)) => {
                Err(io::Error::new(io::ErrorKind::NotFound, message.clone()))
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                Ok(SchedulerResponse::accepted(format!(
                    "Submitted batch job {id}\n"
                )))
            }
        };

        Box::pin(async move { result })
    }
}
