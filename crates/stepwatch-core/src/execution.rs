//! Execution engines for controlling how independent series are processed
//!
//! Every series is an independent unit of work, so the only decision an
//! engine makes is whether those units run on the current thread or fan out
//! over a Rayon pool. Results always come back in task order.

#[cfg(feature = "parallel")]
use crate::Result;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Trait for execution engines that control how batches are run
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Run `f` for every index in `0..count`, collecting results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        self.strategy() == ExecutionStrategy::Parallel
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Uses the global Rayon pool unless a dedicated pool is supplied.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine with default thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine
}

/// Create a parallel engine on the global Rayon pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

/// Create an engine based on the enabled features
pub fn auto_engine() -> impl ExecutionEngine {
    #[cfg(feature = "parallel")]
    {
        parallel()
    }
    #[cfg(not(feature = "parallel"))]
    {
        sequential()
    }
}
