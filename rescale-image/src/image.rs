//! Image API used for packed pixel data, owned ([`Image`]) and borrowed ([`ImageView`]).
//! On overflows it will panic, images larger than [`MAX_IMAGE_SIZE`] bytes are not supported.
//! Zero width or height is allowed and describes an empty image without data.

use ::core::slice::ChunksExact;

use super::*;

const OVERFLOW_PANIC_MSG: &str = "rescale_image image overflow, rescale_image does not directly support images larger than 4GB";
const CAST_PANIC_MSG: &str = "rescale_image image byte cast error, please report this to us with your platform information";

/// Panics if the given dimensions would overflow the maximum image size.
#[inline]
fn checked_pixels_len<P: Pixel>(width: usize, height: usize) -> usize {
    let len = width.checked_mul(height).expect(OVERFLOW_PANIC_MSG);
    if len.checked_mul(::core::mem::size_of::<P::Repr>()).expect(OVERFLOW_PANIC_MSG) > MAX_IMAGE_SIZE {
        panic!("{}", OVERFLOW_PANIC_MSG);
    }
    len
}
/// Length in scalars of an image with the given dimensions, `None` on overflow
#[inline]
fn scalars_len<P: Pixel>(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(P::Repr::CHANNELS)
}
/// Cast a slice of scalars to a slice of pixel representations
#[inline]
pub(crate) fn pixelate<P: Pixel>(data: &[<P::Repr as PixelRepr>::Scalar]) -> &[P::Repr] {
    ::bytemuck::try_cast_slice::<<P::Repr as PixelRepr>::Scalar, P::Repr>(data).expect(CAST_PANIC_MSG)
}
/// Cast a slice of scalars to a slice of pixel representations
#[inline]
pub(crate) fn pixelate_mut<P: Pixel>(data: &mut [<P::Repr as PixelRepr>::Scalar]) -> &mut [P::Repr] {
    ::bytemuck::try_cast_slice_mut::<<P::Repr as PixelRepr>::Scalar, P::Repr>(data).expect(CAST_PANIC_MSG)
}
/// Cast a boxed slice of pixel representations to a boxed slice of scalars
#[inline]
pub(crate) fn unpixelate_box<P: Pixel>(pixels: Box<[P::Repr]>) -> Box<[<P::Repr as PixelRepr>::Scalar]> {
    ::bytemuck::try_cast_slice_box::<P::Repr, <P::Repr as PixelRepr>::Scalar>(pixels)
        .unwrap_or_else(|(e, _)| panic!("{} : {}", CAST_PANIC_MSG, e))
}

/// Any type that can be used as container for flat image pixel data within this library.
/// (e.g. Vec, Box, etc.)
///
/// Currently only implemented for types that implement `Into<Box<[Scalar]>>`
pub trait Container<P: Pixel>:
    Into<Box<[<P::Repr as PixelRepr>::Scalar]>> + ::core::ops::Deref<Target = [<P::Repr as PixelRepr>::Scalar]>
{
}
impl<P: Pixel, C: Into<Box<[<P::Repr as PixelRepr>::Scalar]>> + ::core::ops::Deref<Target = [<P::Repr as PixelRepr>::Scalar]>>
    Container<P> for C
{
}

/// Owned image with a pixel encoding `P`, row-major without padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Image<P: Pixel> {
    /// The image data
    pub(crate) data: Box<[<P::Repr as PixelRepr>::Scalar]>,
    /// The pixel width of the image
    pub(crate) width: usize,
    /// The pixel height of the image
    pub(crate) height: usize,
}
/// Explicitly immutable image view for use with unowned data
pub struct ImageView<'a, P: Pixel> {
    /// The image data
    pub(crate) data: &'a [<P::Repr as PixelRepr>::Scalar],
    /// The pixel width of the image
    pub(crate) width: usize,
    /// The pixel height of the image
    pub(crate) height: usize,
}
// derive(Clone, Copy) would require `P: Copy`
impl<P: Pixel> Clone for ImageView<'_, P> {
    #[inline(always)]
    fn clone(&self) -> Self { *self }
}
impl<P: Pixel> Copy for ImageView<'_, P> {}

impl<P: Pixel> Image<P> {
    /// Create a new image filled with the default pixel (all zeros).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: unpixelate_box::<P>(vec![P::DEFAULT; checked_pixels_len::<P>(width, height)].into_boxed_slice()),
            width,
            height,
        }
    }
    /// A 0x0 image without data
    #[inline]
    pub fn empty() -> Self { Self { data: Box::default(), width: 0, height: 0 } }
    /// Create a new image with the given data
    /// # Errors
    /// If the data is not of the correct length (width * height * channels)
    pub fn from_raw<C: Container<P>>(data: C, width: usize, height: usize) -> Result<Self, C> {
        if scalars_len::<P>(width, height) == Some(data.len()) {
            Ok(Self { data: data.into(), width, height })
        } else {
            Err(data)
        }
    }
    /// Create a new image view
    #[inline(always)]
    pub fn view(&self) -> ImageView<P> { ImageView::new(self) }
    /// Get the raw data of the image
    #[inline(always)]
    pub fn into_raw(self) -> Box<[<P::Repr as PixelRepr>::Scalar]> { self.data }
    /// Whether the image has no pixels
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}
impl<'a, P: Pixel> ImageView<'a, P> {
    /// Create a new image view of an owned image
    pub fn new(image: &'a Image<P>) -> Self { Self { data: image.data.as_ref(), width: image.width, height: image.height } }
    /// Create a new image view with the given data
    ///
    /// Returns `None` if the data is not of the correct length (width * height * channels)
    pub fn from_raw(data: &'a [<P::Repr as PixelRepr>::Scalar], width: usize, height: usize) -> Option<Self> {
        if scalars_len::<P>(width, height) == Some(data.len()) {
            Some(Self { data, width, height })
        } else {
            None
        }
    }
    /// The raw data, borrowed for the lifetime of the view rather than of `self`
    #[inline(always)]
    pub fn as_raw(&self) -> &'a [<P::Repr as PixelRepr>::Scalar] { self.data }
}
impl<P: Pixel> Default for Image<P> {
    fn default() -> Self { Self::empty() }
}
impl<P: Pixel> ::core::fmt::Debug for Image<P> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct("Image").field("width", &self.width).field("height", &self.height).finish_non_exhaustive()
    }
}
impl<P: Pixel> ::core::fmt::Debug for ImageView<'_, P> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct("ImageView").field("width", &self.width).field("height", &self.height).finish_non_exhaustive()
    }
}

/// Image operations
// # Safety
// - The dimensions of the image must be correct and consistent with the data length (width * height * channels)
// - The data must be in row-major order and contiguous
pub trait ImageOps: Sealed {
    type Scalar: Scalar;
    type PixelRepr: PixelRepr<Scalar = Self::Scalar>;
    type Pixel: Pixel<Repr = Self::PixelRepr>;
    /// Pixel width of the image, must be consistent with the data
    fn width(&self) -> usize;
    /// Pixel height of the image, must be consistent with the data
    fn height(&self) -> usize;
    /// Dimensions of the image
    #[inline]
    fn dimensions(&self) -> (usize, usize) { (self.width(), self.height()) }
    /// Get a reference to the underlying raw data.
    fn data(&self) -> &[Self::Scalar];
    /// Get a reference to the flattened pixel data.
    #[inline]
    fn pixels(&self) -> &[Self::PixelRepr] { pixelate::<Self::Pixel>(self.data()) }
    /// Get the pixel at (x, y)
    #[inline]
    fn get(&self, x: usize, y: usize) -> Option<&Self::PixelRepr> {
        if x < self.width() && y < self.height() {
            self.pixels().get(y * self.width() + x)
        } else {
            None
        }
    }
    /// Pixels `x1..x2` of row `y`
    ///
    /// # Panics
    /// If the span is out of bounds
    #[inline]
    fn row_span(&self, y: usize, x1: usize, x2: usize) -> &[Self::PixelRepr] {
        let start = y * self.width();
        &self.pixels()[start + x1..start + x2]
    }
    /// Clone `self` into a new [`Image`]
    #[inline]
    fn to_image(&self) -> Image<Self::Pixel> {
        Image { data: self.data().to_vec().into_boxed_slice(), width: self.width(), height: self.height() }
    }
    /// Create an iterator over the rows of this image, each row is a slice of pixels
    ///
    /// # Panics
    /// If the width is zero
    #[inline]
    fn rows(&self) -> ChunksExact<Self::PixelRepr> { self.pixels().chunks_exact(self.width()) }
}

/// Mutable image operations
pub trait ImageOpsMut: ImageOps {
    /// Get a mutable reference to the underlying raw data.
    fn data_mut(&mut self) -> &mut [Self::Scalar];
    /// Get a mutable reference to the flattened pixel data.
    #[inline]
    fn pixels_mut(&mut self) -> &mut [Self::PixelRepr] { pixelate_mut::<Self::Pixel>(self.data_mut()) }
}

impl<P: Pixel> Sealed for Image<P> {}
impl<P: Pixel> Sealed for ImageView<'_, P> {}

impl<P: Pixel> ImageOps for Image<P> {
    type Scalar = <P::Repr as PixelRepr>::Scalar;
    type PixelRepr = P::Repr;
    type Pixel = P;
    #[inline(always)]
    fn width(&self) -> usize { self.width }
    #[inline(always)]
    fn height(&self) -> usize { self.height }
    #[inline(always)]
    fn data(&self) -> &[Self::Scalar] { self.data.as_ref() }
}
impl<P: Pixel> ImageOpsMut for Image<P> {
    #[inline(always)]
    fn data_mut(&mut self) -> &mut [Self::Scalar] { self.data.as_mut() }
}
impl<'a, P: Pixel> ImageOps for ImageView<'a, P> {
    type Scalar = <P::Repr as PixelRepr>::Scalar;
    type PixelRepr = P::Repr;
    type Pixel = P;
    #[inline(always)]
    fn width(&self) -> usize { self.width }
    #[inline(always)]
    fn height(&self) -> usize { self.height }
    #[inline(always)]
    fn data(&self) -> &[Self::Scalar] { self.data }
}

macro_rules! impl_Index {
    () => {
        type Output = <Self as ImageOps>::PixelRepr;
        #[inline(always)]
        fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
            assert!(x < self.width() && y < self.height());
            &self.pixels()[y * self.width() + x]
        }
    };
}

impl<P: Pixel> ::core::ops::Index<(usize, usize)> for Image<P> {
    impl_Index!();
}
impl<'a, P: Pixel> ::core::ops::Index<(usize, usize)> for ImageView<'a, P> {
    impl_Index!();
}
impl<P: Pixel> ::core::ops::IndexMut<(usize, usize)> for Image<P> {
    #[inline(always)]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(x < self.width() && y < self.height());
        let i = y * self.width() + x;
        &mut self.pixels_mut()[i]
    }
}
impl<'a, P: Pixel> From<&'a Image<P>> for ImageView<'a, P> {
    #[inline(always)]
    fn from(value: &'a Image<P>) -> Self { ImageView { width: value.width, height: value.height, data: &value.data } }
}
