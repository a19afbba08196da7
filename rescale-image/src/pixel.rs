//! Scalar, Pixel Representation, and Pixel types and traits.
//!
//! Every encoding the resampler understands is a zero-sized [`Pixel`] type whose
//! [`Pixel::Repr`] is the flat in-memory layout of one pixel:
//!```ignore
//! Nrgba   => [u8; 4]   // straight alpha
//! Nrgba64 => [u16; 4]  // straight alpha
//! Rgba    => [u8; 4]   // premultiplied alpha
//! Rgba64  => [u16; 4]  // premultiplied alpha
//! Gray    => u8
//! Gray16  => u16
//! Index   => u8        // palette index, see [`Paletted`](crate::Paletted)
//! ```

use ::num_traits::{AsPrimitive, PrimInt, Unsigned};

use super::*;

/// The raw scalar data type of a channel (`u8` or `u16`)
pub trait Scalar:
    'static + Sealed + Clone + Copy + Send + Sync + Sized + ::bytemuck::Pod + PrimInt + Unsigned + AsPrimitive<u32>
{
    /// The `0` value of this scalar type
    const ZERO: Self;
    /// The maximum value of this scalar type
    const MAX: Self;
    /// Width of the scalar in bits
    const BITS: u32;
    /// The most significant 8 bits
    #[inline(always)]
    fn high_byte(self) -> u8 { (self.as_() >> (Self::BITS - 8)) as u8 }
}

macro_rules! impl_Scalar {
    ($($t:ty),*) => {
        $(
            impl Sealed for $t {}
            impl Scalar for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;
                const BITS: u32 = <$t>::BITS;
            }
        )*
    }
}
impl_Scalar!(u8, u16);

/// Representations of a pixel as an array of scalars
pub trait PixelRepr: 'static + Sealed + Clone + Copy + Send + Sync + Sized + ::bytemuck::Pod {
    /// The scalar type of the pixel
    type Scalar: Scalar;
    /// The number of channels in the pixel (e.g. 4 for RGBA or 1 for grayscale)
    const CHANNELS: usize;
    /// The repr with each scalar as 0
    const ZERO: Self;
}
impl<T: Scalar, const N: usize> Sealed for [T; N] {}
impl<T: Scalar, const N: usize> PixelRepr for [T; N] {
    type Scalar = T;
    const CHANNELS: usize = N;
    const ZERO: Self = [T::ZERO; N];
}
impl<T: Scalar> PixelRepr for T {
    type Scalar = Self;
    const CHANNELS: usize = 1;
    const ZERO: Self = <T as Scalar>::ZERO;
}

/// The building block of the crate, a pixel encoding that has a `Repr` defining its memory layout
///
/// To access the associated types and constants of your `Repr`, you need to use specifiers like this:
/// ```ignore
/// <<MyPixel as Pixel>::Repr as PixelRepr>::Scalar
/// ```
pub trait Pixel: Sized + Send + Sync + 'static {
    /// The representation of a pixel as a flat array of scalars or a single scalar
    type Repr: PixelRepr;
    /// The default repr to use when creating new images, defaults to [`PixelRepr::ZERO`]
    const DEFAULT: Self::Repr = Self::Repr::ZERO;
}

pixel! {
    /// 8-bit RGBA with straight (non-premultiplied) alpha, the canonical output encoding
    Nrgba => [u8; 4],
    /// 16-bit RGBA with straight (non-premultiplied) alpha
    Nrgba64 => [u16; 4],
    /// 8-bit RGBA with premultiplied alpha
    Rgba => [u8; 4],
    /// 16-bit RGBA with premultiplied alpha
    Rgba64 => [u16; 4],
    /// 8-bit luma
    Gray => u8,
    /// 16-bit luma
    Gray16 => u16,
    /// 8-bit palette index
    Index => u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_byte() {
        assert_eq!(0xabu8.high_byte(), 0xab);
        assert_eq!(0xabcdu16.high_byte(), 0xab);
        assert_eq!(u16::MAX.high_byte(), 0xff);
    }

    #[test]
    fn repr_channels() {
        assert_eq!(<<Nrgba as Pixel>::Repr as PixelRepr>::CHANNELS, 4);
        assert_eq!(<<Rgba64 as Pixel>::Repr as PixelRepr>::CHANNELS, 4);
        assert_eq!(<<Gray16 as Pixel>::Repr as PixelRepr>::CHANNELS, 1);
        assert_eq!(Nrgba::DEFAULT, [0u8; 4]);
    }
}
