//! Conversions between `image` crate buffers and this crate's views.
use ::image::{DynamicImage, GenericImageView, ImageBuffer, Luma, Rgba as ImageRgba, RgbaImage};

use super::*;

macro_rules! impl_From_ImageBuffer {
    ($($ip:ident<$t:ty> => $P:ident),+ $(,)?) => {
        $(
            impl<'a, C: ::core::ops::Deref<Target = [$t]>> From<&'a ImageBuffer<$ip<$t>, C>> for ImageView<'a, $P> {
                #[inline(always)]
                fn from(image: &'a ImageBuffer<$ip<$t>, C>) -> Self {
                    let (w, h) = image.dimensions();
                    Self { data: image.as_raw(), width: w as usize, height: h as usize }
                }
            }
        )+
    };
}
impl_From_ImageBuffer! {
    ImageRgba<u8> => Nrgba,
    ImageRgba<u16> => Nrgba64,
    Luma<u8> => Gray,
    Luma<u16> => Gray16,
}

/// Straight 8-bit RGBA to premultiplied 16-bit RGBA
#[inline]
fn premultiply([r, g, b, a]: [u8; 4]) -> [u16; 4] {
    let a = a as u32 * 0x101;
    let mul = |c: u8| (c as u32 * 0x101 * a / 0xffff) as u16;
    [mul(r), mul(g), mul(b), a as u16]
}

impl ColorQuery for DynamicImage {
    #[inline]
    fn dimensions(&self) -> (usize, usize) {
        let (w, h) = GenericImageView::dimensions(self);
        (w as usize, h as usize)
    }
    #[inline]
    fn rgba64(&self, x: usize, y: usize) -> [u16; 4] { premultiply(self.get_pixel(x as u32, y as u32).0) }
}

impl<'a> From<&'a DynamicImage> for SourceImage<'a> {
    /// Borrow the buffer directly where the layout matches an encoding, otherwise query colors per pixel.
    fn from(image: &'a DynamicImage) -> Self {
        match image {
            DynamicImage::ImageRgba8(buf) => SourceImage::Nrgba(buf.into()),
            DynamicImage::ImageRgba16(buf) => SourceImage::Nrgba64(buf.into()),
            DynamicImage::ImageLuma8(buf) => SourceImage::Gray(buf.into()),
            DynamicImage::ImageLuma16(buf) => SourceImage::Gray16(buf.into()),
            other => SourceImage::Generic(other),
        }
    }
}

impl From<Image<Nrgba>> for RgbaImage {
    #[inline]
    fn from(Image { data, width, height }: Image<Nrgba>) -> Self {
        // dimensions and length are consistent by construction
        match RgbaImage::from_raw(width as u32, height as u32, data.into_vec()) {
            Some(image) => image,
            None => RgbaImage::new(0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_image_variants() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, ImageRgba([1, 2, 3, 4])));
        assert_eq!(SourceImage::from(&rgba).encoding(), "nrgba");
        let rgb = DynamicImage::new_rgb8(3, 2);
        let src = SourceImage::from(&rgb);
        assert_eq!(src.encoding(), "generic");
        assert_eq!(src.dimensions(), (3, 2));
    }

    #[test]
    fn premultiplied_query() {
        assert_eq!(premultiply([255, 0, 128, 255]), [0xffff, 0, 128 * 0x101, 0xffff]);
        assert_eq!(premultiply([255, 255, 255, 0]), [0, 0, 0, 0]);
        assert_eq!(premultiply([255, 0, 0, 128]), [128 * 0x101, 0, 0, 128 * 0x101]);
    }

    #[test]
    fn into_rgba_image() {
        let mut img = Image::<Nrgba>::new(2, 1);
        img[(1, 0)] = [9, 8, 7, 6];
        let out = RgbaImage::from(img);
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.get_pixel(1, 0).0, [9, 8, 7, 6]);
    }
}
