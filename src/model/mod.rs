mod ad;
mod color;
mod element;

pub use ad::{Ad, Template};
pub use color::{DEFAULT_BACKGROUND, Rgb};
pub use element::{
    AdElement, ElementKind, Geometry, ImageFit, ImageProps, LogoProps, PriceProps, ProductProps,
    Rect, ShapeKind, ShapeProps, TextAlign, TextProps, TextRole,
};
