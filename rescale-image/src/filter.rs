//! Image filters and kernels
use crate::Weight;

const PI: Weight = ::core::f64::consts::PI as Weight;

/// normalized sinc, `sin(pi x) / (pi x)`
#[inline]
pub fn sinc(x: Weight) -> Weight {
    if x == 0. {
        1.
    } else {
        let x = x * PI;
        x.sin() / x
    }
}

/// point kernel
#[inline(always)]
pub fn point_kernel(_: Weight) -> Weight { 1. }

/// average kernel
#[inline]
pub fn box_kernel(x: Weight) -> Weight {
    if x > -0.5 && x <= 0.5 {
        1.0
    } else {
        0.0
    }
}

/// linear kernel
#[inline(always)]
pub fn triangle_kernel(x: Weight) -> Weight { Weight::max(1. - x.abs(), 0.) }

#[inline]
pub fn hamming_kernel(x: Weight) -> Weight {
    let x = x.abs();
    if x == 0. {
        1.
    } else if x >= 1. {
        0.
    } else {
        let x = x * PI;
        (0.54 + 0.46 * x.cos()) * x.sin() / x
    }
}

/// inlined cubic_bc with b=0., c=0.5
#[inline]
pub fn catmull_rom_kernel(x: Weight) -> Weight {
    let x = x.abs();
    if x < 1. {
        const A: Weight = 9. / 6.;
        const B: Weight = 15. / 6.;
        (A * x - B) * x.powi(2) + 1.
    } else if x < 2.0 {
        const A: Weight = 15. / 6.;
        ((-0.5 * x + A) * x - 4.) * x + 2.
    } else {
        0.
    }
}

/// inlined cubic_bc with b=1./3., c=1./3.
#[inline]
pub fn mitchell_netravali_kernel(x: Weight) -> Weight {
    let x = x.abs();
    if x < 1. {
        const A: Weight = 7. / 6.;
        const B: Weight = 16. / 18.;
        (A * x - 2.) * x.powi(2) + B
    } else if x < 2. {
        const A: Weight = -7. / 18.;
        const B: Weight = 20. / 6.;
        const C: Weight = 32. / 18.;
        ((A * x + 2.) * x - B) * x + C
    } else {
        0.
    }
}

/// windowed sinc with a 3 lobe window
#[inline]
pub fn lanczos3_kernel(x: Weight) -> Weight {
    let x = x.abs();
    if x < 3. {
        sinc(x) * sinc(x / 3.)
    } else {
        0.
    }
}

/// A resampling filter: a kernel fn over distances in source samples and the support radius beyond which it is zero.
///
/// A support of `0` or less selects nearest neighbor sampling and the kernel is never evaluated.
#[derive(Clone, Copy)]
pub struct Filter {
    pub kernel: fn(Weight) -> Weight,
    pub support: Weight,
}
impl Filter {
    #[inline(always)]
    pub const fn new(support: Weight, kernel: fn(Weight) -> Weight) -> Self { Self { kernel, support } }
    /// Whether this filter selects nearest neighbor sampling instead of convolution
    #[inline(always)]
    pub fn is_nearest(&self) -> bool { self.support <= 0. }
}
impl ::core::fmt::Debug for Filter {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct("Filter").field("support", &self.support).finish_non_exhaustive()
    }
}
pub static FILTER_NEAREST: Filter = Filter { kernel: point_kernel, support: 0. };
pub static FILTER_BOX: Filter = Filter { kernel: box_kernel, support: 0.5 };
pub static FILTER_TRIANGLE: Filter = Filter { kernel: triangle_kernel, support: 1. };
pub static FILTER_HAMMING: Filter = Filter { kernel: hamming_kernel, support: 1. };
pub static FILTER_CATMULL_ROM: Filter = Filter { kernel: catmull_rom_kernel, support: 2. };
pub static FILTER_MITCHELL: Filter = Filter { kernel: mitchell_netravali_kernel, support: 2. };
pub static FILTER_LANCZOS3: Filter = Filter { kernel: lanczos3_kernel, support: 3. };

/// Dynamic filter type, selects one of the preset [`Filter`]s
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterType {
    /// Nearest neighbor filter, no interpolation
    Nearest,
    /// Box filter, also known as average filter
    Box,
    /// Triangle filter, also known as linear filter
    Triangle,
    /// Hamming filter, also known as cosine filter
    Hamming,
    /// Catmull-Rom filter, the standard cubic filter
    Catmull,
    /// Mitchell-Netravali filter, a better quality cubic filter
    Mitchell,
    /// Lanczos3 filter, a high quality filter (highest quality we provide)
    #[default]
    Lanczos,
}
impl FilterType {
    /// All filter types, lowest quality first
    pub const ALL: [FilterType; 7] = [Self::Nearest, Self::Box, Self::Triangle, Self::Hamming, Self::Catmull, Self::Mitchell, Self::Lanczos];
    /// Get the static filter for this type
    #[inline]
    pub fn filter(&self) -> Filter {
        match self {
            Self::Nearest => FILTER_NEAREST,
            Self::Box => FILTER_BOX,
            Self::Triangle => FILTER_TRIANGLE,
            Self::Hamming => FILTER_HAMMING,
            Self::Catmull => FILTER_CATMULL_ROM,
            Self::Mitchell => FILTER_MITCHELL,
            Self::Lanczos => FILTER_LANCZOS3,
        }
    }
    /// The canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Box => "box",
            Self::Triangle => "triangle",
            Self::Hamming => "hamming",
            Self::Catmull => "catmull",
            Self::Mitchell => "mitchell",
            Self::Lanczos => "lanczos",
        }
    }
}
impl From<FilterType> for Filter {
    #[inline(always)]
    fn from(filter_type: FilterType) -> Self { filter_type.filter() }
}
impl ::core::fmt::Display for FilterType {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result { f.write_str(self.name()) }
}
impl ::core::str::FromStr for FilterType {
    type Err = String;
    /// Case-insensitive, accepts the canonical names and a few common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(Self::Nearest),
            "box" | "average" => Ok(Self::Box),
            "triangle" | "linear" | "bilinear" => Ok(Self::Triangle),
            "hamming" => Ok(Self::Hamming),
            "catmull" | "catmull-rom" | "catmullrom" | "bicubic" => Ok(Self::Catmull),
            "mitchell" => Ok(Self::Mitchell),
            "lanczos" | "lanczos3" => Ok(Self::Lanczos),
            _ => Err(format!(
                "invalid filter {:?}, must be one of: {}",
                s,
                FilterType::ALL.iter().map(FilterType::name).collect::<Vec<_>>().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_peak_at_zero() {
        for filter_type in FilterType::ALL {
            assert!((filter_type.filter().kernel)(0.) > 0., "{filter_type}");
        }
    }

    #[test]
    fn kernels_vanish_outside_support() {
        for filter_type in FilterType::ALL.into_iter().filter(|t| *t != FilterType::Nearest) {
            let Filter { kernel, support } = filter_type.filter();
            assert_eq!(kernel(support + 0.01), 0., "{filter_type}");
            assert_eq!(kernel(-support - 0.01), 0., "{filter_type}");
        }
    }

    #[test]
    fn lanczos_zero_crossings() {
        for x in [1., 2., -1., -2.] {
            assert!(lanczos3_kernel(x).abs() < 1e-12);
        }
        assert!(lanczos3_kernel(1.5) < 0.);
    }

    #[test]
    fn nearest_selection() {
        assert!(FILTER_NEAREST.is_nearest());
        assert!(Filter::new(-1., triangle_kernel).is_nearest());
        assert!(!FILTER_LANCZOS3.is_nearest());
    }

    #[test]
    fn parse_names() {
        for filter_type in FilterType::ALL {
            assert_eq!(filter_type.name().parse::<FilterType>(), Ok(filter_type));
        }
        assert_eq!("Lanczos3".parse::<FilterType>(), Ok(FilterType::Lanczos));
        assert_eq!(" Catmull-Rom ".parse::<FilterType>(), Ok(FilterType::Catmull));
        assert!("gaussian".parse::<FilterType>().is_err());
    }
}
