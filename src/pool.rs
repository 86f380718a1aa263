//! Fixed-size worker pool with blocking task joins.
//!
//! The parallel recursion needs exactly three things from its scheduler:
//! submit a closure as an independent unit of work, block on its result, and
//! shut the whole thing down once the top-level answer is in. Workers are
//! plain threads draining a shared channel of boxed jobs; a task's result
//! travels back over its own capacity-1 channel, so a join is just a
//! blocking `recv`.
//!
//! There is no cancellation. A job that panics takes its worker thread with
//! it; the panicked task (and any queued job that thread would have run
//! next) surfaces as a [`JoinError`] on join, which the hull computation
//! treats as fatal.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

/// Poll interval while waiting out the shutdown grace period.
const SHUTDOWN_POLL: Duration = Duration::from_millis(1);

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A submitted task was lost before delivering its result — its worker died
/// or the pool went away underneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct JoinError;

impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "worker task was lost before delivering a result")
    }
}

impl std::error::Error for JoinError {}

/// Handle to a submitted unit of work.
#[derive(Debug)]
pub(crate) struct Task<T> {
    result: Receiver<T>,
}

impl<T> Task<T> {
    /// Block until the task's result is available.
    ///
    /// # Errors
    /// Returns [`JoinError`] if the task can no longer deliver a result.
    pub fn join(self) -> Result<T, JoinError> {
        self.result.recv().map_err(|_| JoinError)
    }
}

/// Cloneable submission handle. Tasks running on the pool hold one of these
/// so they can fork further tasks without owning the pool itself.
#[derive(Clone, Debug)]
pub(crate) struct Spawner {
    injector: Sender<Job>,
}

impl Spawner {
    /// Queue `job` for execution on the pool and return a join handle for
    /// its result.
    pub fn submit<T, F>(&self, job: F) -> Task<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let boxed: Job = Box::new(move || {
            // The receiver may already be gone; the result is then simply
            // discarded.
            let _ = tx.send(job());
        });
        // If every worker has exited, the job is dropped here and the task's
        // join reports the loss.
        let _ = self.injector.send(boxed);
        Task { result: rx }
    }
}

/// A fixed set of worker threads sharing one job queue.
#[derive(Debug)]
pub(crate) struct WorkerPool {
    injector: Sender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn a pool with `workers` threads (at least one).
    ///
    /// # Panics
    /// Panics if the operating system refuses to spawn a thread.
    pub fn new(workers: usize) -> Self {
        let (injector, queue) = unbounded::<Job>();
        let workers = (0..workers.max(1))
            .map(|i| {
                let queue: Receiver<Job> = queue.clone();
                thread::Builder::new()
                    .name(format!("hull-worker-{i}"))
                    .spawn(move || {
                        while let Ok(job) = queue.recv() {
                            job();
                        }
                    })
                    .expect("failed to spawn hull worker thread")
            })
            .collect();

        Self { injector, workers }
    }

    /// A submission handle usable from inside tasks.
    pub fn spawner(&self) -> Spawner {
        Spawner {
            injector: self.injector.clone(),
        }
    }

    /// Stop accepting work from this handle and wait up to `grace` for the
    /// workers to drain and exit. Workers still busy when the grace period
    /// runs out are abandoned, not cancelled.
    ///
    /// Outstanding [`Spawner`] clones held by still-running tasks keep the
    /// queue open until those tasks finish.
    pub fn shutdown(self, grace: Duration) {
        drop(self.injector);
        let deadline = Instant::now() + grace;
        for worker in self.workers {
            while !worker.is_finished() && Instant::now() < deadline {
                thread::sleep(SHUTDOWN_POLL);
            }
            if worker.is_finished() {
                // The worker may have died panicking; that was already
                // reported through the affected task's join.
                let _ = worker.join();
            }
        }
    }
}
