/// Declare zero-sized pixel encodings and their representation.
macro_rules! pixel {
    ($($(#[$m:meta])* $name:ident => $repr:ty),+ $(,)?) => {
        $(
            $(#[$m])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
            pub struct $name;
            impl Pixel for $name {
                type Repr = $repr;
            }
        )+
    };
}

/// `From<ImageView<P>> for SourceImage` for each packed encoding
macro_rules! impl_From_view {
    ($($P:ident),+ $(,)?) => {
        $(
            impl<'a> From<ImageView<'a, $P>> for SourceImage<'a> {
                #[inline(always)]
                fn from(view: ImageView<'a, $P>) -> Self { SourceImage::$P(view) }
            }
            impl<'a> From<&'a Image<$P>> for SourceImage<'a> {
                #[inline(always)]
                fn from(image: &'a Image<$P>) -> Self { SourceImage::$P(image.view()) }
            }
        )+
    };
}
