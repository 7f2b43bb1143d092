//! Shared ad builders for unit tests.

use crate::model::{
    Ad, AdElement, ElementKind, Geometry, ImageFit, ImageProps, LogoProps, PriceProps,
    ProductProps, ShapeProps, Template, TextProps, TextRole,
};

pub const fn rect(x: f64, y: f64, width: f64, height: f64) -> Geometry {
    Geometry {
        x,
        y,
        width,
        height,
        rotation: 0.0,
    }
}

pub fn banner(elements: Vec<AdElement>) -> Ad {
    Ad::new(Template::new(300, 250), elements)
}

pub fn text(id: &str, content: &str, color: &str, font_size: f64) -> AdElement {
    AdElement::new(
        id,
        rect(10.0, 10.0, 200.0, 40.0),
        ElementKind::Text(TextProps {
            content: content.to_string(),
            color: color.to_string(),
            font_size,
            ..TextProps::default()
        }),
    )
}

pub fn legal_text(id: &str, content: &str) -> AdElement {
    AdElement::new(
        id,
        rect(10.0, 220.0, 280.0, 20.0),
        ElementKind::Text(TextProps {
            content: content.to_string(),
            font_size: 12.0,
            role: TextRole::Legal,
            ..TextProps::default()
        }),
    )
}

pub fn price(id: &str, amount: f64, disclaimer: Option<&str>) -> AdElement {
    AdElement::new(
        id,
        rect(10.0, 120.0, 100.0, 40.0),
        ElementKind::Price(PriceProps {
            amount,
            color: Some("#E4002B".to_string()),
            font_size: Some(20.0),
            disclaimer: disclaimer.map(str::to_string),
            ..PriceProps::default()
        }),
    )
}

pub fn shape(id: &str, geometry: Geometry, fill: &str) -> AdElement {
    AdElement::new(
        id,
        geometry,
        ElementKind::Shape(ShapeProps {
            fill: Some(fill.to_string()),
            ..ShapeProps::default()
        }),
    )
}

pub fn image(id: &str, geometry: Geometry, natural: Option<(u32, u32)>, fit: ImageFit) -> AdElement {
    AdElement::new(
        id,
        geometry,
        ElementKind::Image(ImageProps {
            src: format!("{id}.png"),
            fit,
            natural_width: natural.map(|(w, _)| w),
            natural_height: natural.map(|(_, h)| h),
        }),
    )
}

pub fn product(id: &str, price: Option<f64>) -> AdElement {
    AdElement::new(
        id,
        rect(150.0, 60.0, 120.0, 120.0),
        ElementKind::Product(ProductProps {
            product_id: "sku-1".to_string(),
            name: "Sneaker".to_string(),
            price,
            image: None,
        }),
    )
}

pub fn logo(id: &str) -> AdElement {
    AdElement::new(
        id,
        rect(250.0, 10.0, 40.0, 40.0),
        ElementKind::Logo(LogoProps {
            src: "logo.svg".to_string(),
            brand: None,
        }),
    )
}

pub fn unknown(id: &str, type_name: &str) -> AdElement {
    AdElement::new(
        id,
        rect(0.0, 0.0, 10.0, 10.0),
        ElementKind::Unknown {
            type_name: type_name.to_string(),
            properties: serde_json::json!({}),
        },
    )
}

/// A banner that satisfies every default rule.
pub fn compliant_banner() -> Ad {
    banner(vec![
        text("headline", "Summer Sale", "#000000", 24.0),
        price(
            "price",
            19.99,
            Some("Offer valid while supplies last. Terms apply."),
        ),
    ])
}

/// Evaluate against the default configuration.
pub fn evaluate(ad: &Ad) -> crate::result::ComplianceResult {
    crate::engine::Evaluator::from_config(&crate::config::Config::default())
        .unwrap()
        .evaluate(ad)
        .unwrap()
}
