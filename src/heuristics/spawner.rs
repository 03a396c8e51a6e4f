use log::error;

/// A reverse search packaged to run on its own.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Starts reverse searches without the caller waiting for them.
pub trait WorkerSpawner: Send + Sync {
    fn spawn(&self, job: Job);
}

/// One named OS thread per search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSpawner;

impl WorkerSpawner for ThreadSpawner {
    fn spawn(&self, job: Job) {
        let result = std::thread::Builder::new()
            .name("remaining-weight".to_string())
            .spawn(job);
        if let Err(err) = result {
            error!("could not start reverse search thread: {}", err);
        }
    }
}

/// Runs searches on the global rayon pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayonSpawner;

impl WorkerSpawner for RayonSpawner {
    fn spawn(&self, job: Job) {
        rayon::spawn(job);
    }
}

/// Runs the search to completion before returning. The table is fully
/// converged by the time `prepare` returns, which makes query results
/// deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineSpawner;

impl WorkerSpawner for InlineSpawner {
    fn spawn(&self, job: Job) {
        job();
    }
}
