//! Fork-join distribution of independent rows or columns over the current rayon pool.
use ::core::{
    marker::PhantomData,
    ops::Range,
    sync::atomic::{AtomicUsize, Ordering},
};

use super::*;

/// A worker's view of the shared index queue, yields indices until the queue is exhausted.
///
/// Every index of the dispatched range is yielded to exactly one worker.
#[derive(Debug)]
pub struct Indices<'a> {
    cursor: &'a AtomicUsize,
    end: usize,
}
impl Iterator for Indices<'_> {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<usize> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        if i < self.end {
            Some(i)
        } else {
            None
        }
    }
}

/// Run `worker` on `min(threads, range.len())` workers of the current rayon pool, blocking until all of them return.
///
/// Each worker is handed an [`Indices`] iterator over the same queue, so per-worker scratch
/// can be allocated once before the loop and reused for every index it pulls.
/// An empty range returns immediately without spawning anything.
pub fn parallel<F>(range: Range<usize>, worker: F)
where
    F: Fn(Indices<'_>) + Sync,
{
    let count = range.len();
    if count == 0 {
        return;
    }
    let workers = ::rayon::current_num_threads().clamp(1, count);
    trace!(start = range.start, count, workers, "parallel");
    let cursor = AtomicUsize::new(range.start);
    let end = range.end;
    ::rayon::scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| worker(Indices { cursor: &cursor, end }));
        }
    });
}

/// Shared mutable access to a buffer whose regions are written by different workers.
///
/// Writers are responsible for never handing out overlapping ranges concurrently,
/// in practice each row (or column) is owned by whichever worker pulled its index.
pub struct Disjoint<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}
unsafe impl<T: Send> Send for Disjoint<'_, T> {}
unsafe impl<T: Send> Sync for Disjoint<'_, T> {}
impl<'a, T> Disjoint<'a, T> {
    #[inline]
    pub fn new(buf: &'a mut [T]) -> Self { Self { ptr: buf.as_mut_ptr(), len: buf.len(), _marker: PhantomData } }
    #[inline(always)]
    pub fn len(&self) -> usize { self.len }
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.len == 0 }
    /// Borrow `range` of the buffer mutably.
    /// # Safety
    /// No other borrow of an overlapping range may be alive at the same time.
    /// # Panics
    /// If the range is out of bounds.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slice(&self, range: Range<usize>) -> &mut [T] {
        assert!(range.start <= range.end && range.end <= self.len, "Disjoint::slice: {:?} out of bounds for {}", range, self.len);
        ::core::slice::from_raw_parts_mut(self.ptr.add(range.start), range.end - range.start)
    }
}
impl<T> ::core::fmt::Debug for Disjoint<'_, T> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result { f.debug_struct("Disjoint").field("len", &self.len).finish() }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn every_index_once() {
        let seen = Mutex::new(Vec::new());
        parallel(3..103, |indices| {
            for i in indices {
                seen.lock().unwrap().push(i);
            }
        });
        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, (3..103).collect::<Vec<_>>());
    }

    #[test]
    fn empty_range_is_noop() {
        let calls = AtomicUsize::new(0);
        parallel(5..5, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(calls.into_inner(), 0);
    }

    #[test]
    fn workers_bounded_by_pool_and_count() {
        let pool = ::rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        for (count, expected) in [(1, 1), (3, 3), (50, 4)] {
            let workers = AtomicUsize::new(0);
            pool.install(|| {
                parallel(0..count, |indices| {
                    workers.fetch_add(1, Ordering::Relaxed);
                    indices.for_each(drop);
                })
            });
            assert_eq!(workers.into_inner(), expected, "{count} indices");
        }
    }

    #[test]
    fn disjoint_rows() {
        let (w, h) = (7, 31);
        let mut buf = vec![0u32; w * h];
        let out = Disjoint::new(&mut buf);
        parallel(0..h, |ys| {
            for y in ys {
                let row = unsafe { out.slice(y * w..(y + 1) * w) };
                for (x, v) in row.iter_mut().enumerate() {
                    *v = (y * w + x) as u32;
                }
            }
        });
        assert!(buf.iter().enumerate().all(|(i, &v)| v == i as u32));
    }

    #[test]
    #[should_panic]
    fn disjoint_out_of_bounds() {
        let mut buf = [0u8; 4];
        let out = Disjoint::new(&mut buf);
        let _ = unsafe { out.slice(2..5) };
    }
}
