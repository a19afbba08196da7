//! Palette-indexed images.

use super::*;

/// Maximum number of palette entries addressable by an [`Index`] pixel
pub const MAX_PALETTE_LEN: usize = 256;

/// Borrowed palette-indexed image: one [`Index`] byte per pixel and up to 256 colors.
///
/// Palette colors are 16-bit premultiplied RGBA, the same form a [`ColorQuery`] returns.
/// Indices past the end of the palette read as transparent black.
#[derive(Debug, Clone, Copy)]
pub struct Paletted<'a> {
    pub(crate) indices: ImageView<'a, Index>,
    pub(crate) palette: &'a [[u16; 4]],
}
impl<'a> Paletted<'a> {
    /// Returns `None` if the palette has more than [`MAX_PALETTE_LEN`] colors.
    pub fn new(indices: ImageView<'a, Index>, palette: &'a [[u16; 4]]) -> Option<Self> {
        if palette.len() > MAX_PALETTE_LEN {
            return None;
        }
        Some(Self { indices, palette })
    }
    #[inline(always)]
    pub fn dimensions(&self) -> (usize, usize) { self.indices.dimensions() }
    #[inline(always)]
    pub fn indices(&self) -> ImageView<'a, Index> { self.indices }
    #[inline(always)]
    pub fn palette(&self) -> &'a [[u16; 4]] { self.palette }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_len_limit() {
        let pix = [0u8; 4];
        let view = ImageView::<Index>::from_raw(&pix, 2, 2).unwrap();
        assert!(Paletted::new(view, &[[0; 4]; 256]).is_some());
        assert!(Paletted::new(view, &[[0; 4]; 257]).is_none());
        assert_eq!(Paletted::new(view, &[]).map(|p| p.dimensions()), Some((2, 2)));
    }
}
