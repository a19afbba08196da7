//! A filter bound to the worker pool it resizes on.
use ::rayon::{ThreadPool, ThreadPoolBuilder};

use super::*;

/// Resizes with a fixed filter, on a dedicated worker pool or the global rayon pool.
#[derive(Debug)]
pub struct Resizer {
    filter: Filter,
    pool: Option<ThreadPool>,
}

impl Resizer {
    /// Resize on the global rayon pool
    pub fn new(filter: impl Into<Filter>) -> Self { Self { filter: filter.into(), pool: None } }
    /// Resize on a dedicated pool of `threads` workers
    /// # Errors
    /// If the pool cannot be built
    pub fn with_threads(filter: impl Into<Filter>, threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rescale-{}", i))
            .build()
            .with_context(|| format!("could not build a pool of {} resize workers", threads))?;
        debug!(threads = pool.current_num_threads(), "resize pool");
        Ok(Self { filter: filter.into(), pool: Some(pool) })
    }
    /// Filter and pool from a [`Config`]
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.threads {
            Some(threads) if threads > 0 => Self::with_threads(config.filter, threads),
            _ => Ok(Self::new(config.filter)),
        }
    }
    #[inline(always)]
    pub fn filter(&self) -> &Filter { &self.filter }
    /// Set the filter to use for resizing
    #[inline(always)]
    pub fn set_filter(&mut self, filter: impl Into<Filter>) { self.filter = filter.into(); }
    /// Number of workers a resize is spread over
    pub fn threads(&self) -> usize { self.pool.as_ref().map_or_else(::rayon::current_num_threads, ThreadPool::current_num_threads) }
    /// [`resize`](crate::resize()) with this filter, on this resizer's pool
    #[instrument(skip(self, src), level = "trace")]
    pub fn resize(&self, src: &SourceImage<'_>, width: i64, height: i64) -> Image<Nrgba> {
        match &self.pool {
            Some(pool) => pool.install(|| resize(src, width, height, &self.filter)),
            None => resize(src, width, height, &self.filter),
        }
    }
}
impl Default for Resizer {
    fn default() -> Self { Self::new(FilterType::default()) }
}
