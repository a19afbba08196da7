//! The decoded images a resize can start from.

use super::*;

/// Per-pixel color access for encodings without a dedicated [`SourceImage`] variant.
///
/// Colors are 16 bits per channel with premultiplied alpha (`[r, g, b, a]`, each channel `<= a`).
pub trait ColorQuery: Sync {
    /// Pixel dimensions `(width, height)`
    fn dimensions(&self) -> (usize, usize);
    /// The premultiplied color at `(x, y)`, only called with in-bounds coordinates
    fn rgba64(&self, x: usize, y: usize) -> [u16; 4];
}

/// A caller-owned decoded image in one of the supported encodings.
#[derive(Clone, Copy)]
pub enum SourceImage<'a> {
    Nrgba(ImageView<'a, Nrgba>),
    Nrgba64(ImageView<'a, Nrgba64>),
    Rgba(ImageView<'a, Rgba>),
    Rgba64(ImageView<'a, Rgba64>),
    Gray(ImageView<'a, Gray>),
    Gray16(ImageView<'a, Gray16>),
    YCbCr(YCbCr<'a>),
    Paletted(Paletted<'a>),
    /// Fallback for any other encoding
    Generic(&'a dyn ColorQuery),
}
impl SourceImage<'_> {
    /// Pixel dimensions `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Self::Nrgba(v) => v.dimensions(),
            Self::Nrgba64(v) => v.dimensions(),
            Self::Rgba(v) => v.dimensions(),
            Self::Rgba64(v) => v.dimensions(),
            Self::Gray(v) => v.dimensions(),
            Self::Gray16(v) => v.dimensions(),
            Self::YCbCr(v) => v.dimensions(),
            Self::Paletted(v) => v.dimensions(),
            Self::Generic(q) => q.dimensions(),
        }
    }
    /// Short name of the encoding, for logging
    pub fn encoding(&self) -> &'static str {
        match self {
            Self::Nrgba(_) => "nrgba",
            Self::Nrgba64(_) => "nrgba64",
            Self::Rgba(_) => "rgba",
            Self::Rgba64(_) => "rgba64",
            Self::Gray(_) => "gray",
            Self::Gray16(_) => "gray16",
            Self::YCbCr(_) => "ycbcr",
            Self::Paletted(_) => "paletted",
            Self::Generic(_) => "generic",
        }
    }
}
impl ::core::fmt::Debug for SourceImage<'_> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        let (width, height) = self.dimensions();
        f.debug_struct("SourceImage")
            .field("encoding", &self.encoding())
            .field("width", &width)
            .field("height", &height)
            .finish()
    }
}

impl_From_view!(Nrgba, Nrgba64, Rgba, Rgba64, Gray, Gray16);

impl<'a> From<YCbCr<'a>> for SourceImage<'a> {
    #[inline(always)]
    fn from(planes: YCbCr<'a>) -> Self { SourceImage::YCbCr(planes) }
}
impl<'a> From<Paletted<'a>> for SourceImage<'a> {
    #[inline(always)]
    fn from(paletted: Paletted<'a>) -> Self { SourceImage::Paletted(paletted) }
}
impl<'a> From<&'a dyn ColorQuery> for SourceImage<'a> {
    #[inline(always)]
    fn from(query: &'a dyn ColorQuery) -> Self { SourceImage::Generic(query) }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Checker(usize, usize);
    impl ColorQuery for Checker {
        fn dimensions(&self) -> (usize, usize) { (self.0, self.1) }
        fn rgba64(&self, x: usize, y: usize) -> [u16; 4] {
            if (x + y) % 2 == 0 {
                [u16::MAX; 4]
            } else {
                [0, 0, 0, u16::MAX]
            }
        }
    }

    #[test]
    fn dimensions_per_variant() {
        let gray = Image::<Gray>::new(3, 5);
        assert_eq!(SourceImage::from(&gray).dimensions(), (3, 5));
        assert_eq!(SourceImage::from(&gray).encoding(), "gray");
        let checker = Checker(7, 2);
        let src = SourceImage::from(&checker as &dyn ColorQuery);
        assert_eq!(src.dimensions(), (7, 2));
        assert_eq!(src.encoding(), "generic");
        let y = [0u8; 4];
        let planes = YCbCr::packed(&y, &y, &y, ChromaSubsampling::S444, 2, 2).unwrap();
        assert_eq!(SourceImage::from(planes).dimensions(), (2, 2));
    }
}
