//! Chroma-subsampled luma/chroma planes.

use super::*;

/// Chroma subsampling ratio of a [`YCbCr`] image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ChromaSubsampling {
    /// Full resolution chroma
    #[default]
    S444,
    /// Half horizontal chroma resolution
    S422,
    /// Half horizontal and half vertical chroma resolution
    S420,
    /// Half vertical chroma resolution
    S440,
    /// Quarter horizontal chroma resolution
    S411,
    /// Quarter horizontal and half vertical chroma resolution
    S410,
}
impl ChromaSubsampling {
    /// (horizontal, vertical) divisors from luma to chroma coordinates
    #[inline(always)]
    pub const fn divisors(self) -> (usize, usize) {
        match self {
            Self::S444 => (1, 1),
            Self::S422 => (2, 1),
            Self::S420 => (2, 2),
            Self::S440 => (1, 2),
            Self::S411 => (4, 1),
            Self::S410 => (4, 2),
        }
    }
    /// Dimensions of each chroma plane for a luma plane of `(width, height)`
    #[inline]
    pub const fn chroma_dimensions(self, (width, height): (usize, usize)) -> (usize, usize) {
        let (dx, dy) = self.divisors();
        (width.div_ceil(dx), height.div_ceil(dy))
    }
}

/// Borrowed planar Y'CbCr image (JFIF full range), one byte per sample.
///
/// Luma is `width * height` samples with row stride `y_stride`,
/// each chroma plane has row stride `c_stride` and the resolution given by [`ChromaSubsampling`].
#[derive(Debug, Clone, Copy)]
pub struct YCbCr<'a> {
    pub(crate) y: &'a [u8],
    pub(crate) cb: &'a [u8],
    pub(crate) cr: &'a [u8],
    pub(crate) y_stride: usize,
    pub(crate) c_stride: usize,
    pub(crate) subsampling: ChromaSubsampling,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

/// Minimal length of a plane with `rows` rows of `cols` samples spaced `stride` apart
#[inline]
fn plane_len((cols, rows): (usize, usize), stride: usize) -> Option<usize> {
    if rows == 0 || cols == 0 {
        Some(0)
    } else if stride < cols {
        None
    } else {
        (rows - 1).checked_mul(stride)?.checked_add(cols)
    }
}

impl<'a> YCbCr<'a> {
    /// Create a planar view.
    ///
    /// Returns `None` if a stride is narrower than its plane or a plane is too short for the dimensions.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        y: &'a [u8],
        cb: &'a [u8],
        cr: &'a [u8],
        y_stride: usize,
        c_stride: usize,
        subsampling: ChromaSubsampling,
        width: usize,
        height: usize,
    ) -> Option<Self> {
        let luma = plane_len((width, height), y_stride)?;
        let chroma = plane_len(subsampling.chroma_dimensions((width, height)), c_stride)?;
        if y.len() < luma || cb.len() < chroma || cr.len() < chroma {
            return None;
        }
        Some(Self { y, cb, cr, y_stride, c_stride, subsampling, width, height })
    }
    /// Tightly packed planes (strides equal to the plane widths)
    pub fn packed(y: &'a [u8], cb: &'a [u8], cr: &'a [u8], subsampling: ChromaSubsampling, width: usize, height: usize) -> Option<Self> {
        let (cw, _) = subsampling.chroma_dimensions((width, height));
        Self::new(y, cb, cr, width, cw, subsampling, width, height)
    }
    #[inline(always)]
    pub fn dimensions(&self) -> (usize, usize) { (self.width, self.height) }
    #[inline(always)]
    pub fn subsampling(&self) -> ChromaSubsampling { self.subsampling }
    /// Offset of the luma sample for (x, y)
    #[inline(always)]
    pub fn luma_offset(&self, x: usize, y: usize) -> usize { y * self.y_stride + x }
    /// Offset of the chroma samples covering luma (x, y)
    #[inline]
    pub fn chroma_offset(&self, x: usize, y: usize) -> usize {
        use ChromaSubsampling::*;
        match self.subsampling {
            S444 => y * self.c_stride + x,
            S422 => y * self.c_stride + x / 2,
            S420 => (y / 2) * self.c_stride + x / 2,
            S440 => (y / 2) * self.c_stride + x,
            other => {
                let (dx, dy) = other.divisors();
                (y / dy) * self.c_stride + x / dx
            }
        }
    }
    /// Luma plane
    #[inline(always)]
    pub fn y(&self) -> &'a [u8] { self.y }
    /// Blue-difference plane
    #[inline(always)]
    pub fn cb(&self) -> &'a [u8] { self.cb }
    /// Red-difference plane
    #[inline(always)]
    pub fn cr(&self) -> &'a [u8] { self.cr }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_dimensions_round_up() {
        assert_eq!(ChromaSubsampling::S444.chroma_dimensions((5, 3)), (5, 3));
        assert_eq!(ChromaSubsampling::S422.chroma_dimensions((5, 3)), (3, 3));
        assert_eq!(ChromaSubsampling::S420.chroma_dimensions((5, 3)), (3, 2));
        assert_eq!(ChromaSubsampling::S440.chroma_dimensions((5, 3)), (5, 2));
        assert_eq!(ChromaSubsampling::S411.chroma_dimensions((5, 3)), (2, 3));
        assert_eq!(ChromaSubsampling::S410.chroma_dimensions((5, 3)), (2, 2));
    }

    #[test]
    fn chroma_offsets() {
        let planes = [0u8; 64];
        let img = |s| YCbCr::new(&planes, &planes, &planes, 8, 8, s, 8, 4).unwrap();
        assert_eq!(img(ChromaSubsampling::S444).chroma_offset(3, 2), 2 * 8 + 3);
        assert_eq!(img(ChromaSubsampling::S422).chroma_offset(3, 2), 2 * 8 + 1);
        assert_eq!(img(ChromaSubsampling::S420).chroma_offset(3, 3), 8 + 1);
        assert_eq!(img(ChromaSubsampling::S440).chroma_offset(3, 3), 8 + 3);
        assert_eq!(img(ChromaSubsampling::S411).chroma_offset(7, 1), 8 + 1);
        assert_eq!(img(ChromaSubsampling::S410).chroma_offset(7, 3), 8 + 1);
    }

    #[test]
    fn rejects_short_planes() {
        let y = [0u8; 16];
        let c = [0u8; 4];
        assert!(YCbCr::packed(&y, &c, &c, ChromaSubsampling::S420, 4, 4).is_some());
        assert!(YCbCr::packed(&y, &c, &c, ChromaSubsampling::S422, 4, 4).is_none());
        assert!(YCbCr::new(&y, &c, &c, 3, 2, ChromaSubsampling::S420, 4, 4).is_none());
    }
}
