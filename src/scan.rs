//! Uniform RGBA8 access to every [`SourceImage`] encoding.
//!
//! All scanners emit row-major, non-premultiplied 8-bit RGBA regardless of what they read.
use ::std::borrow::Cow;

use super::*;

/// Row/column accessor yielding non-premultiplied RGBA8 for a rectangle of pixels.
pub trait PixelSource: Sync {
    /// Pixel dimensions `(width, height)`
    fn dimensions(&self) -> (usize, usize);
    /// Fill `dst` with the pixels of `x1..x2` by `y1..y2`, row-major, 4 bytes per pixel.
    /// # Panics
    /// If the rectangle is out of bounds or `dst` is shorter than `(x2 - x1) * (y2 - y1) * 4`.
    fn scan(&self, x1: usize, y1: usize, x2: usize, y2: usize, dst: &mut [u8]);
}

/// Packed encodings that convert pixel by pixel to non-premultiplied RGBA8
pub trait ToNrgba: Pixel {
    fn to_nrgba(px: &Self::Repr) -> [u8; 4];
    /// Convert a row of pixels into `dst`
    #[inline]
    fn row_to_nrgba(row: &[Self::Repr], dst: &mut [u8]) {
        for (px, d) in row.iter().zip(dst.chunks_exact_mut(4)) {
            d.copy_from_slice(&Self::to_nrgba(px));
        }
    }
}
impl ToNrgba for Nrgba {
    #[inline(always)]
    fn to_nrgba(px: &[u8; 4]) -> [u8; 4] { *px }
    #[inline]
    fn row_to_nrgba(row: &[[u8; 4]], dst: &mut [u8]) { dst[..row.len() * 4].copy_from_slice(::bytemuck::cast_slice(row)) }
}
impl ToNrgba for Nrgba64 {
    #[inline(always)]
    fn to_nrgba(px: &[u16; 4]) -> [u8; 4] { px.map(Scalar::high_byte) }
}
impl ToNrgba for Rgba {
    #[inline(always)]
    fn to_nrgba(px: &[u8; 4]) -> [u8; 4] { unpremultiply(*px) }
}
impl ToNrgba for Rgba64 {
    #[inline(always)]
    fn to_nrgba(px: &[u16; 4]) -> [u8; 4] { unpremultiply(*px) }
}
impl ToNrgba for Gray {
    #[inline(always)]
    fn to_nrgba(&c: &u8) -> [u8; 4] { [c, c, c, 0xff] }
}
impl ToNrgba for Gray16 {
    #[inline(always)]
    fn to_nrgba(c: &u16) -> [u8; 4] {
        let c = c.high_byte();
        [c, c, c, 0xff]
    }
}

/// Premultiplied to straight alpha, keeping the 8 most significant bits.
///
/// The transparent/opaque tests look at the high byte of alpha only,
/// the divide uses the full-width channel values.
#[inline]
pub fn unpremultiply<T: Scalar>([r, g, b, a]: [T; 4]) -> [u8; 4] {
    match a.high_byte() {
        0 => [0; 4],
        0xff => [r.high_byte(), g.high_byte(), b.high_byte(), 0xff],
        alpha => {
            let (max, div, shift): (u32, u32, u32) = (T::MAX.as_(), a.as_(), T::BITS - 8);
            let c = |c: T| ((c.as_() * max / div) >> shift).min(0xff) as u8;
            [c(r), c(g), c(b), alpha]
        }
    }
}

/// 16-bit premultiplied (as returned by a [`ColorQuery`]) to 8-bit straight alpha
#[inline]
pub fn unpremultiply64([r, g, b, a]: [u16; 4]) -> [u8; 4] {
    match a {
        0xffff => [r.high_byte(), g.high_byte(), b.high_byte(), 0xff],
        0 => [0; 4],
        _ => {
            let c = |c: u16| ((c as u32 * 0xffff / a as u32) >> 8).min(0xff) as u8;
            [c(r), c(g), c(b), a.high_byte()]
        }
    }
}

impl<P: ToNrgba> PixelSource for ImageView<'_, P> {
    #[inline(always)]
    fn dimensions(&self) -> (usize, usize) { ImageOps::dimensions(self) }
    fn scan(&self, x1: usize, y1: usize, x2: usize, y2: usize, dst: &mut [u8]) {
        let len = (x2 - x1) * 4;
        for (y, dst) in (y1..y2).zip(dst.chunks_exact_mut(len.max(1))) {
            P::row_to_nrgba(self.row_span(y, x1, x2), dst);
        }
    }
}

/// JFIF Y'CbCr to RGB, 16.16 fixed point
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let y = (y as i32) << 16;
    let cb = cb as i32 - 128;
    let cr = cr as i32 - 128;
    let c = |v: i32| ((v + (1 << 15)) >> 16).clamp(0, 0xff) as u8;
    [c(y + 91881 * cr), c(y - 22554 * cb - 46802 * cr), c(y + 116130 * cb)]
}

impl PixelSource for YCbCr<'_> {
    #[inline(always)]
    fn dimensions(&self) -> (usize, usize) { YCbCr::dimensions(self) }
    fn scan(&self, x1: usize, y1: usize, x2: usize, y2: usize, dst: &mut [u8]) {
        let (luma, cb, cr) = (self.y(), self.cb(), self.cr());
        let mut out = dst.chunks_exact_mut(4);
        for y in y1..y2 {
            let row = self.luma_offset(0, y);
            for (x, d) in (x1..x2).zip(out.by_ref()) {
                let ic = self.chroma_offset(x, y);
                let [r, g, b] = ycbcr_to_rgb(luma[row + x], cb[ic], cr[ic]);
                d.copy_from_slice(&[r, g, b, 0xff]);
            }
        }
    }
}

/// Scanner over a [`Paletted`] image with its palette converted once
pub struct PalettedSource<'a> {
    indices: ImageView<'a, Index>,
    /// Every possible index, entries past the palette are transparent
    table: [[u8; 4]; MAX_PALETTE_LEN],
}
impl<'a> PalettedSource<'a> {
    pub fn new(paletted: &Paletted<'a>) -> Self {
        let mut table = [[0; 4]; MAX_PALETTE_LEN];
        for (t, &c) in table.iter_mut().zip(paletted.palette()) {
            *t = unpremultiply64(c);
        }
        Self { indices: paletted.indices(), table }
    }
}
impl PixelSource for PalettedSource<'_> {
    #[inline(always)]
    fn dimensions(&self) -> (usize, usize) { ImageOps::dimensions(&self.indices) }
    fn scan(&self, x1: usize, y1: usize, x2: usize, y2: usize, dst: &mut [u8]) {
        let mut out = dst.chunks_exact_mut(4);
        for y in y1..y2 {
            for (&i, d) in self.indices.row_span(y, x1, x2).iter().zip(out.by_ref()) {
                d.copy_from_slice(&self.table[i as usize]);
            }
        }
    }
}

/// Scanner querying each pixel of a [`ColorQuery`]
pub struct QuerySource<'a>(pub &'a dyn ColorQuery);
impl PixelSource for QuerySource<'_> {
    #[inline(always)]
    fn dimensions(&self) -> (usize, usize) { self.0.dimensions() }
    fn scan(&self, x1: usize, y1: usize, x2: usize, y2: usize, dst: &mut [u8]) {
        let mut out = dst.chunks_exact_mut(4);
        for y in y1..y2 {
            for (x, d) in (x1..x2).zip(out.by_ref()) {
                d.copy_from_slice(&unpremultiply64(self.0.rgba64(x, y)));
            }
        }
    }
}

/// Select the scanner for an image, once per resize.
pub fn scanner<'a>(src: &SourceImage<'a>) -> Box<dyn PixelSource + 'a> {
    match *src {
        SourceImage::Nrgba(v) => Box::new(v),
        SourceImage::Nrgba64(v) => Box::new(v),
        SourceImage::Rgba(v) => Box::new(v),
        SourceImage::Rgba64(v) => Box::new(v),
        SourceImage::Gray(v) => Box::new(v),
        SourceImage::Gray16(v) => Box::new(v),
        SourceImage::YCbCr(planes) => Box::new(planes),
        SourceImage::Paletted(ref paletted) => Box::new(PalettedSource::new(paletted)),
        SourceImage::Generic(query) => Box::new(QuerySource(query)),
    }
}

/// Copy every pixel of `src` into a new non-premultiplied RGBA8 image, one row per task.
#[instrument(skip_all, level = "trace")]
pub fn clone_image(src: &dyn PixelSource) -> Image<Nrgba> {
    let (w, h) = src.dimensions();
    let mut dst = Image::<Nrgba>::new(w, h);
    let row_len = w * 4;
    let out = Disjoint::new(dst.data_mut());
    parallel(0..h, |ys| {
        for y in ys {
            // SAFETY: one row per index
            let row = unsafe { out.slice(y * row_len..(y + 1) * row_len) };
            src.scan(0, y, w, y + 1, row);
        }
    });
    dst
}

/// The whole image as packed non-premultiplied RGBA8 bytes, borrowed when it already is.
pub fn to_nrgba<'a>(src: &SourceImage<'a>) -> Cow<'a, [u8]> {
    match *src {
        SourceImage::Nrgba(view) => Cow::Borrowed(view.as_raw()),
        ref other => {
            debug!(encoding = other.encoding(), "converting source to nrgba");
            Cow::Owned(clone_image(&*scanner(other)).into_raw().into_vec())
        }
    }
}
