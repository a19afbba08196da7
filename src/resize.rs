//! Separable resampling: a horizontal and a vertical convolution pass, a nearest neighbor fast path, and a plain copy.
use super::*;

/// Whether an RGBA8 image of `width x height` stays within [`MAX_IMAGE_SIZE`]
#[inline]
pub fn fits(width: usize, height: usize) -> bool {
    width.checked_mul(height).and_then(|n| n.checked_mul(4)).map_or(false, |n| n <= MAX_IMAGE_SIZE)
}

/// Final `(width, height)` of a resize, `None` when the result is empty.
///
/// Negative targets, a `0x0` target or a source without pixels give `None`,
/// as does a target too large to allocate (see [`fits`]).
/// A single zero target dimension is derived from the source aspect ratio, at least 1.
pub fn target_dimensions((src_w, src_h): (usize, usize), width: i64, height: i64) -> Option<(usize, usize)> {
    if width < 0 || height < 0 || (width == 0 && height == 0) || src_w == 0 || src_h == 0 {
        return None;
    }
    let aspect = |target: i64, num: usize, den: usize| Weight::max(1., (target as Weight * num as Weight / den as Weight + 0.5).floor()) as usize;
    let w = if width == 0 { aspect(height, src_w, src_h) } else { width as usize };
    let h = if height == 0 { aspect(width, src_h, src_w) } else { height as usize };
    fits(w, h).then_some((w, h))
}

/// Round half up and saturate to a channel value
#[inline(always)]
pub fn clamp(x: Weight) -> u8 { ((x + 0.5) as i64).clamp(0, 0xff) as u8 }

/// Alpha-weighted convolution of one RGBA8 line, `None` when no alpha contributes.
#[inline]
fn convolve(line: &[u8], entries: &[WeightEntry]) -> Option<[u8; 4]> {
    let (mut r, mut g, mut b, mut a) = (0., 0., 0., 0.);
    for &WeightEntry { index, weight } in entries {
        let px = &line[index * 4..index * 4 + 4];
        let aw = px[3] as Weight * weight;
        r += px[0] as Weight * aw;
        g += px[1] as Weight * aw;
        b += px[2] as Weight * aw;
        a += aw;
    }
    if a == 0. {
        return None;
    }
    let inv = 1. / a;
    Some([clamp(r * inv), clamp(g * inv), clamp(b * inv), clamp(a)])
}

/// Resample every row of `src` to `width`, keeping the height.
#[instrument(skip(src, filter), level = "trace")]
pub fn resize_horizontal(src: &dyn PixelSource, width: usize, filter: &Filter) -> Image<Nrgba> {
    let (src_w, src_h) = src.dimensions();
    let weights = WeightTable::new(width, src_w, filter);
    let mut dst = Image::<Nrgba>::new(width, src_h);
    let row_len = width * 4;
    let out = Disjoint::new(dst.data_mut());
    parallel(0..src_h, |ys| {
        let mut line = vec![0u8; src_w * 4];
        for y in ys {
            src.scan(0, y, src_w, y + 1, &mut line);
            // SAFETY: one row per index
            let row = unsafe { out.slice(y * row_len..(y + 1) * row_len) };
            for (px, entries) in row.chunks_exact_mut(4).zip(weights.iter()) {
                if let Some(c) = convolve(&line, entries) {
                    px.copy_from_slice(&c);
                }
            }
        }
    });
    dst
}

/// Resample every column of `src` to `height`, keeping the width.
#[instrument(skip(src, filter), level = "trace")]
pub fn resize_vertical(src: &dyn PixelSource, height: usize, filter: &Filter) -> Image<Nrgba> {
    let (src_w, src_h) = src.dimensions();
    let weights = WeightTable::new(height, src_h, filter);
    let mut dst = Image::<Nrgba>::new(src_w, height);
    let row_len = src_w * 4;
    let out = Disjoint::new(dst.data_mut());
    parallel(0..src_w, |xs| {
        let mut line = vec![0u8; src_h * 4];
        for x in xs {
            src.scan(x, 0, x + 1, src_h, &mut line);
            for (y, entries) in weights.iter().enumerate() {
                if let Some(c) = convolve(&line, entries) {
                    let i = y * row_len + x * 4;
                    // SAFETY: one column per index
                    unsafe { out.slice(i..i + 4) }.copy_from_slice(&c);
                }
            }
        }
    });
    dst
}

/// Source index of destination index `i` for a nearest neighbor mapping
#[inline(always)]
fn nearest_index(i: usize, scale: Weight, len: usize) -> usize { (((i as Weight + 0.5) * scale) as usize).min(len - 1) }

/// Nearest neighbor resampling to `width x height`.
///
/// When shrinking on both axes only the sampled pixels are scanned,
/// otherwise the source is converted to RGBA8 once and pixels are copied from it.
#[instrument(skip(src), level = "trace")]
pub fn resize_nearest(src: &SourceImage<'_>, width: usize, height: usize) -> Image<Nrgba> {
    let (src_w, src_h) = src.dimensions();
    let dx = src_w as Weight / width as Weight;
    let dy = src_h as Weight / height as Weight;
    let mut dst = Image::<Nrgba>::new(width, height);
    let row_len = width * 4;
    let out = Disjoint::new(dst.data_mut());
    if dx > 1. && dy > 1. {
        trace!("nearest: scanning sampled pixels");
        let scanner = scanner(src);
        parallel(0..height, |ys| {
            for y in ys {
                let sy = nearest_index(y, dy, src_h);
                // SAFETY: one row per index
                let row = unsafe { out.slice(y * row_len..(y + 1) * row_len) };
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let sx = nearest_index(x, dx, src_w);
                    scanner.scan(sx, sy, sx + 1, sy + 1, px);
                }
            }
        });
    } else {
        trace!("nearest: copying from nrgba");
        let pixels = to_nrgba(src);
        let src_row_len = src_w * 4;
        parallel(0..height, |ys| {
            for y in ys {
                let sy = nearest_index(y, dy, src_h);
                let src_row = &pixels[sy * src_row_len..(sy + 1) * src_row_len];
                // SAFETY: one row per index
                let row = unsafe { out.slice(y * row_len..(y + 1) * row_len) };
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let sx = nearest_index(x, dx, src_w) * 4;
                    px.copy_from_slice(&src_row[sx..sx + 4]);
                }
            }
        });
    }
    dst
}

/// Resize `src` to `width x height` with `filter`, producing non-premultiplied RGBA8.
///
/// Never fails: negative or `0x0` targets and sources without pixels give an empty image,
/// and one zero target dimension is derived from the aspect ratio (see [`target_dimensions`]).
/// Filters with a support of 0 or less select nearest neighbor sampling.
/// Targets larger than [`MAX_IMAGE_SIZE`] bytes also give an empty image.
/// Work runs on the current rayon pool.
#[instrument(skip_all, level = "trace", fields(encoding = src.encoding()))]
pub fn resize(src: &SourceImage<'_>, width: i64, height: i64, filter: &Filter) -> Image<Nrgba> {
    let (src_w, src_h) = src.dimensions();
    let Some((w, h)) = target_dimensions((src_w, src_h), width, height) else {
        debug!(src_w, src_h, width, height, "empty resize");
        return Image::empty();
    };
    if filter.is_nearest() {
        debug!(src_w, src_h, w, h, "nearest");
        return resize_nearest(src, w, h);
    }
    let scanner = scanner(src);
    match (w != src_w, h != src_h) {
        (true, true) if fits(w, src_h) => {
            debug!(src_w, src_h, w, h, "horizontal then vertical");
            let tmp = resize_horizontal(&*scanner, w, filter);
            resize_vertical(&tmp.view(), h, filter)
        }
        (true, true) if fits(src_w, h) => {
            debug!(src_w, src_h, w, h, "vertical then horizontal");
            let tmp = resize_vertical(&*scanner, h, filter);
            resize_horizontal(&tmp.view(), w, filter)
        }
        (true, true) => {
            debug!(src_w, src_h, w, h, "intermediate too large");
            Image::empty()
        }
        (true, false) => {
            debug!(src_w, w, "horizontal");
            resize_horizontal(&*scanner, w, filter)
        }
        (false, true) => {
            debug!(src_h, h, "vertical");
            resize_vertical(&*scanner, h, filter)
        }
        (false, false) => {
            debug!(src_w, src_h, "copy");
            clone_image(&*scanner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::*;

    #[test]
    fn dimension_policy() {
        assert_eq!(target_dimensions((4, 2), -1, 5), None);
        assert_eq!(target_dimensions((4, 2), 5, -1), None);
        assert_eq!(target_dimensions((4, 2), 0, 0), None);
        assert_eq!(target_dimensions((0, 2), 3, 3), None);
        assert_eq!(target_dimensions((4, 0), 3, 3), None);
        assert_eq!(target_dimensions((4, 2), 3, 7), Some((3, 7)));
        assert_eq!(target_dimensions((4, 2), 0, 3), Some((6, 3)));
        assert_eq!(target_dimensions((4, 2), 3, 0), Some((3, 2)));
        assert_eq!(target_dimensions((100, 1), 1, 0), Some((1, 1)));
        assert_eq!(target_dimensions((1, 100), 0, 1), Some((1, 1)));
        assert_eq!(target_dimensions((4, 2), 1 << 20, 1 << 20), None);
        assert_eq!(target_dimensions((4, 2), i64::MAX, 1), None);
        assert_eq!(target_dimensions((1, 1 << 40), 0, 1 << 30), None);
    }

    #[test]
    fn fits_max_image_size() {
        assert!(fits(0, usize::MAX));
        assert!(fits(1 << 15, 1 << 15));
        assert!(!fits(1 << 30, 1));
        assert!(!fits(usize::MAX, 2));
    }

    #[test]
    fn clamp_rounds_half_up() {
        assert_eq!(clamp(-3.), 0);
        assert_eq!(clamp(-0.6), 0);
        assert_eq!(clamp(0.49), 0);
        assert_eq!(clamp(0.5), 1);
        assert_eq!(clamp(254.5), 255);
        assert_eq!(clamp(1e9), 255);
        assert_eq!(clamp(Weight::NAN), 0);
    }

    #[test]
    fn convolve_weights_by_alpha() {
        let line = [255, 0, 0, 255, 0, 0, 255, 0];
        let half = [WeightEntry { index: 0, weight: 0.5 }, WeightEntry { index: 1, weight: 0.5 }];
        // the transparent blue contributes nothing to the color
        assert_eq!(convolve(&line, &half), Some([255, 0, 0, 128]));
        assert_eq!(convolve(&line, &half[1..]), None);
        assert_eq!(convolve(&line, &[]), None);
    }

    #[test]
    fn nearest_index_clamps() {
        assert_eq!(nearest_index(0, 2., 4), 1);
        assert_eq!(nearest_index(1, 2., 4), 3);
        assert_eq!(nearest_index(9, 0.5, 4), 3);
        assert_eq!(nearest_index(3, 1.4, 4), 3);
    }

    #[test]
    fn passes_change_one_axis() {
        let img = Image::<Nrgba>::from_raw(vec![200u8; 6 * 4 * 4], 6, 4).unwrap();
        let view = img.view();
        let h = resize_horizontal(&view, 3, &FILTER_LANCZOS3);
        assert_eq!(ImageOps::dimensions(&h), (3, 4));
        let v = resize_vertical(&view, 9, &FILTER_CATMULL_ROM);
        assert_eq!(ImageOps::dimensions(&v), (6, 9));
        assert!(h.data().iter().chain(v.data()).all(|&c| c == 200));
    }
}
