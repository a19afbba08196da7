//! Per-axis convolution weights.
use super::*;

/// A source sample index and its normalized contribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEntry {
    pub index: usize,
    pub weight: Weight,
}

/// Abstracts the bounds used to index into the flat entries buffer for one destination coordinate
#[derive(Debug, Clone, Copy)]
struct Bound {
    /// The first entry for the coordinate
    start: usize,
    /// The number of entries for the coordinate
    len: usize,
}

/// Precomputed weights for every destination coordinate along one axis.
///
/// Entries of a coordinate sum to 1, or there are none at all when the filter gives
/// that coordinate no net weight (the pixel is left transparent).
#[derive(Debug, Clone)]
pub struct WeightTable {
    entries: Vec<WeightEntry>,
    bounds: Vec<Bound>,
}
impl WeightTable {
    /// Weights mapping `src_size` samples onto `dst_size` samples with `filter`.
    ///
    /// The kernel is stretched by the downscale ratio (never shrunk when upscaling),
    /// and each destination coordinate samples around `(v + 0.5) * ratio - 0.5`.
    #[instrument(skip(filter), level = "trace")]
    pub fn new(dst_size: usize, src_size: usize, filter: &Filter) -> Self {
        let Filter { kernel, support } = *filter;
        let ratio = src_size as Weight / dst_size as Weight;
        let scale = ratio.max(1.);
        let radius = (scale * support).ceil();
        let last = src_size as Weight - 1.;
        // a coordinate never samples more than the whole source line
        let span = (2. * radius + 1.).min(src_size as Weight).max(0.) as usize;
        let mut entries = Vec::with_capacity(dst_size.saturating_mul(span));
        let mut bounds = Vec::with_capacity(dst_size);
        for v in 0..dst_size {
            let center = (v as Weight + 0.5) * ratio - 0.5;
            let begin = (center - radius).ceil().max(0.);
            let end = (center + radius).floor().min(last);
            let start = entries.len();
            let mut sum = 0.;
            if begin <= end {
                for u in begin as usize..=end as usize {
                    let weight = kernel((u as Weight - center) / scale);
                    if weight != 0. {
                        sum += weight;
                        entries.push(WeightEntry { index: u, weight });
                    }
                }
            }
            if sum != 0. {
                for e in &mut entries[start..] {
                    e.weight /= sum;
                }
            } else {
                entries.truncate(start);
            }
            bounds.push(Bound { start, len: entries.len() - start });
        }
        debug!(dst_size, src_size, radius, entries = entries.len(), "weight table");
        Self { entries, bounds }
    }
    /// Number of destination coordinates
    #[inline(always)]
    pub fn len(&self) -> usize { self.bounds.len() }
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.bounds.is_empty() }
    /// Entries for destination coordinate `v`
    /// # Panics
    /// If `v >= self.len()`
    #[inline]
    pub fn get(&self, v: usize) -> &[WeightEntry] {
        let Bound { start, len } = self.bounds[v];
        &self.entries[start..start + len]
    }
    /// Entries of every destination coordinate in order
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[WeightEntry]> + '_ {
        self.bounds.iter().map(|&Bound { start, len }| &self.entries[start..start + len])
    }
}
