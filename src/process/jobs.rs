use std::collections::BTreeMap;
use std::process::{Child, ExitStatus};

use tracing::{debug, warn};

/// Detached children, kept only so they can be reaped once they finish.
/// There is no way to signal, wait on or foreground a background job.
#[derive(Debug, Default)]
pub struct BackgroundJobs {
    children: BTreeMap<u32, Child>,
}

impl BackgroundJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, child: Child) -> u32 {
        let pid = child.id();
        self.children.insert(pid, child);
        pid
    }

    /// Collects every child that has exited since the last call.
    pub fn reap(&mut self) -> Vec<(u32, ExitStatus)> {
        let mut finished = Vec::new();

        self.children.retain(|&pid, child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid, %status, "background job finished");
                finished.push((pid, status));
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(pid, error = %e, "dropping background job that cannot be polled");
                false
            }
        });

        finished
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
