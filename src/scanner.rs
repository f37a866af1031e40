//! Concurrent directory traversal.
//!
//! ```text
//! caller: add(1) -> enqueue(root) -> wait() -> read totals
//!
//! queue (crossbeam unbounded)
//! ├── worker 0: list dir -> files: fetch_add(size) / dirs: add(1) + enqueue
//! ├── worker 1: ...
//! └── worker N: ...
//!
//! each task: WorkGuard dropped on exit -> done()
//! ```
//!
//! Every discovered directory becomes one [`DirectoryTask`]. The task is
//! registered with the [`WorkTracker`] before it is enqueued, so the
//! outstanding count cannot reach zero while a discovered directory is still
//! waiting to be listed.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, trace, warn};

use super::error::{DuError, Result, ScanError};
use super::source::{DirectorySource, Listing};
use super::tracker::WorkTracker;

/// One directory waiting to be listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTask
{
    pub path: PathBuf,
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport
{
    pub total_size: u64,
    /// Traversal tasks that ran to completion, including unreadable ones
    pub directories: u64,
    pub files: u64,
    pub errors: Vec<ScanError>,
    pub duration: Duration,
}

impl ScanReport
{
    pub fn is_complete(&self) -> bool
    {
        self.errors.is_empty()
    }
}

enum Message
{
    Scan(DirectoryTask),
    Stop,
}

#[derive(Default)]
struct SharedTotals
{
    bytes: AtomicU64,
    files: AtomicU64,
    directories: AtomicU64,
}

/// Per-worker view of the shared scan state
struct Dispatcher<S>
{
    source: Arc<S>,
    tracker: Arc<WorkTracker>,
    totals: Arc<SharedTotals>,
    queue: Sender<Message>,
    errors: Sender<ScanError>,
}

impl<S> Clone for Dispatcher<S>
{
    fn clone(&self) -> Self
    {
        Dispatcher {
            source: Arc::clone(&self.source),
            tracker: Arc::clone(&self.tracker),
            totals: Arc::clone(&self.totals),
            queue: self.queue.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<S: DirectorySource> Dispatcher<S>
{
    /// Registers `task` with the tracker, then hands it to the pool.
    fn enqueue(&self, task: DirectoryTask)
    {
        self.tracker.add(1);

        if self.queue.send(Message::Scan(task)).is_err() {
            // No worker left to run it.
            self.tracker.done();
        }
    }

    fn process(&self, task: DirectoryTask)
    {
        let _guard = self.tracker.guard();

        trace!(path = %task.path.display(), depth = task.depth, "listing directory");

        let listing = self.source.list(&task.path).unwrap_or_else(|error| {
            self.record(error);
            Listing::default()
        });

        for error in listing.errors {
            self.record(error);
        }

        for entry in listing.entries {
            if entry.is_directory {
                self.enqueue(DirectoryTask {
                    path: task.path.join(&entry.file_name),
                    depth: task.depth + 1,
                });
            } else {
                self.totals.bytes.fetch_add(entry.file_size, Ordering::Relaxed);
                self.totals.files.fetch_add(1, Ordering::Relaxed);
            }
        }

        // Published to the waiter by the tracker's lock when the guard drops.
        self.totals.directories.fetch_add(1, Ordering::Relaxed);
    }

    fn record(&self, error: ScanError)
    {
        warn!("skipping {}: {}", error.path.display(), error.reason);

        // The receiver outlives every worker.
        let _ = self.errors.send(error);
    }
}

fn worker_loop<S: DirectorySource>(dispatcher: Dispatcher<S>, receiver: Receiver<Message>)
{
    for message in receiver.iter() {
        let task = match message {
            Message::Scan(task) => task,
            Message::Stop => break,
        };

        let path = task.path.clone();
        let result = panic::catch_unwind(AssertUnwindSafe(|| dispatcher.process(task)));

        if result.is_err() {
            error!("worker panicked while listing {}", path.display());
            dispatcher.record(ScanError::new(path, "worker panicked while listing directory"));
        }
    }
}

fn stop_workers(queue: &Sender<Message>, handles: Vec<JoinHandle<()>>)
{
    for _ in 0..handles.len() {
        let _ = queue.send(Message::Stop);
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("worker thread exited abnormally");
        }
    }
}

/// Sums the sizes of every non-directory entry below a root, listing
/// directories in parallel on a fixed pool of worker threads.
pub struct Scanner<S>
{
    source: Arc<S>,
    jobs: usize,
}

impl<S: DirectorySource + 'static> Scanner<S>
{
    pub fn new(source: S, jobs: usize) -> Self
    {
        Scanner {
            source: Arc::new(source),
            jobs: jobs.max(1),
        }
    }

    /// Probes `root`, then scans the tree below it.
    ///
    /// The probe does not follow a symlinked root, so only a missing or
    /// unreachable root is fatal. A root that cannot be listed (a file, a
    /// dangling symlink) totals zero and lands in [`ScanReport::errors`],
    /// like every other failure below it.
    pub fn scan(&self, root: &Path) -> Result<ScanReport>
    {
        let metadata = fs::symlink_metadata(root).map_err(|source| DuError::RootInaccessible {
            path: root.to_path_buf(),
            source: source,
        })?;

        if !metadata.is_dir() {
            debug!(path = %root.display(), "root is not a plain directory, listing it anyway");
        }

        self.scan_tree(root)
    }

    /// Scans the tree below `root`, which the caller has already classified
    /// as a directory.
    pub fn scan_tree(&self, root: &Path) -> Result<ScanReport>
    {
        let start = Instant::now();

        let tracker = Arc::new(WorkTracker::new());
        let totals = Arc::new(SharedTotals::default());
        let (queue_tx, queue_rx) = unbounded::<Message>();
        let (error_tx, error_rx) = unbounded::<ScanError>();

        let dispatcher = Dispatcher {
            source: Arc::clone(&self.source),
            tracker: Arc::clone(&tracker),
            totals: Arc::clone(&totals),
            queue: queue_tx.clone(),
            errors: error_tx,
        };

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.jobs);

        for id in 0..self.jobs {
            let worker_dispatcher = dispatcher.clone();
            let receiver = queue_rx.clone();

            let spawned = thread::Builder::new()
                .name(format!("quick-du-{}", id))
                .spawn(move || worker_loop(worker_dispatcher, receiver));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(error) => {
                    stop_workers(&queue_tx, handles);
                    return Err(DuError::WorkerSpawn(error));
                }
            }
        }

        debug!(path = %root.display(), workers = handles.len(), "scan started");

        dispatcher.enqueue(DirectoryTask {
            path: root.to_path_buf(),
            depth: 0,
        });

        tracker.wait();
        stop_workers(&queue_tx, handles);

        let report = ScanReport {
            total_size: totals.bytes.load(Ordering::Relaxed),
            directories: totals.directories.load(Ordering::Relaxed),
            files: totals.files.load(Ordering::Relaxed),
            errors: error_rx.try_iter().collect(),
            duration: start.elapsed(),
        };

        debug!(
            directories = report.directories,
            files = report.files,
            bytes = report.total_size,
            errors = report.errors.len(),
            "scan finished"
        );

        Ok(report)
    }
}
