use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{LcuClient, RawResponse, Request, RequestClient, Transport, TransportFailure};

/// Answers by path (query included); records every request seen.
/// The last queued response for a path repeats.
#[derive(Default)]
pub(crate) struct FakeLcu {
    routes: Mutex<HashMap<String, Vec<RawResponse>>>,
    seen: Mutex<Vec<Request>>,
}

impl FakeLcu {
    pub(crate) fn route(self: &Arc<Self>, path: &str, responses: Vec<RawResponse>) -> Arc<Self> {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), responses);
        Arc::clone(self)
    }

    pub(crate) fn seen(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeLcu {
    async fn execute(&self, request: &Request) -> Result<RawResponse, TransportFailure> {
        self.seen.lock().unwrap().push(request.clone());
        let path = request
            .url()
            .splitn(4, '/')
            .nth(3)
            .map(|p| format!("/{p}"))
            .unwrap_or_default();
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => Ok(queue.remove(0)),
            Some(queue) => Ok(queue[0].clone()),
            None => Ok(RawResponse::new(404, "")),
        }
    }
}

pub(crate) fn write_lockfile(dir: &Path, contents: &str) -> std::path::PathBuf {
    let lockfile = dir.join("lockfile");
    std::fs::write(&lockfile, contents).unwrap();
    lockfile
}

pub(crate) fn http(fake: Arc<FakeLcu>) -> RequestClient {
    RequestClient::with_transport(fake).with_base_delay(Duration::ZERO)
}

/// LCU client on port 54321 with secret `mypassword`
pub(crate) fn client(fake: Arc<FakeLcu>) -> (LcuClient, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let lockfile = write_lockfile(dir.path(), "LeagueClient:12345:54321:mypassword:https");
    (LcuClient::new(http(fake), lockfile), dir)
}
