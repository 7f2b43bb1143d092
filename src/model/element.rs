use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position, size and rotation of an element on the canvas.
///
/// `x`/`y` are the top-left corner of the unrotated box; `rotation` is in
/// degrees around the box center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// True if `other` lies within `self` expanded by `tolerance` on every side.
    #[must_use]
    pub fn contains(&self, other: &Self, tolerance: f64) -> bool {
        other.left >= self.left - tolerance
            && other.top >= self.top - tolerance
            && other.right <= self.right + tolerance
            && other.bottom <= self.bottom + tolerance
    }
}

impl Geometry {
    /// Axis-aligned bounding box of the (possibly rotated) element.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let half_w = (self.width * cos).abs().mul_add(0.5, (self.height * sin).abs() * 0.5);
        let half_h = (self.width * sin).abs().mul_add(0.5, (self.height * cos).abs() * 0.5);
        Rect::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height, self.rotation]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// What a text element is for. Legal rules look for `Legal` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Headline,
    #[default]
    Body,
    Legal,
    #[serde(alias = "cta")]
    CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    pub color: String,
    pub align: TextAlign,
    pub role: TextRole,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_family: "Arial".to_string(),
            font_size: 16.0,
            font_weight: None,
            color: "#000000".to_string(),
            align: TextAlign::default(),
            role: TextRole::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    Cover,
    #[default]
    Contain,
    Fill,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub fit: ImageFit,
    /// Intrinsic pixel size of the source, when the editor knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Line,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeProps {
    pub shape: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductProps {
    pub product_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceProps {
    pub amount: f64,
    pub currency: String,
    /// "Was" price shown struck through next to `amount`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

impl Default for PriceProps {
    fn default() -> Self {
        Self {
            amount: 0.0,
            currency: "USD".to_string(),
            original_amount: None,
            color: None,
            font_size: None,
            disclaimer: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogoProps {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Element type together with the properties that are meaningful for it.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextProps),
    Image(ImageProps),
    Shape(ShapeProps),
    Product(ProductProps),
    Price(PriceProps),
    Logo(LogoProps),
    /// A `type` this crate does not know. Carried through untouched.
    Unknown {
        type_name: String,
        properties: Value,
    },
}

impl ElementKind {
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Shape(_) => "shape",
            Self::Product(_) => "product",
            Self::Price(_) => "price",
            Self::Logo(_) => "logo",
            Self::Unknown { type_name, .. } => type_name,
        }
    }

    fn from_parts(type_name: String, properties: Value) -> Result<Self, serde_json::Error> {
        let properties = match properties {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };
        Ok(match type_name.as_str() {
            "text" => Self::Text(serde_json::from_value(properties)?),
            "image" => Self::Image(serde_json::from_value(properties)?),
            "shape" => Self::Shape(serde_json::from_value(properties)?),
            "product" => Self::Product(serde_json::from_value(properties)?),
            "price" => Self::Price(serde_json::from_value(properties)?),
            "logo" => Self::Logo(serde_json::from_value(properties)?),
            _ => Self::Unknown {
                type_name,
                properties,
            },
        })
    }

    fn properties_value(&self) -> Value {
        let value = match self {
            Self::Text(p) => serde_json::to_value(p),
            Self::Image(p) => serde_json::to_value(p),
            Self::Shape(p) => serde_json::to_value(p),
            Self::Product(p) => serde_json::to_value(p),
            Self::Price(p) => serde_json::to_value(p),
            Self::Logo(p) => serde_json::to_value(p),
            Self::Unknown { properties, .. } => return properties.clone(),
        };
        value.unwrap_or_default()
    }
}

/// One visual object on the ad canvas.
///
/// On the wire an element is a flat object with a `type` tag and a
/// `properties` bag; in memory the bag is resolved into [`ElementKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElement", into = "RawElement")]
pub struct AdElement {
    pub id: String,
    pub geometry: Geometry,
    pub opacity: f64,
    pub locked: bool,
    pub kind: ElementKind,
}

impl AdElement {
    #[must_use]
    pub fn new(id: impl Into<String>, geometry: Geometry, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            geometry,
            opacity: 1.0,
            locked: false,
            kind,
        }
    }

    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.geometry.bounding_box()
    }
}

const fn default_opacity() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize)]
struct RawElement {
    id: String,
    #[serde(rename = "type")]
    element_type: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    properties: Value,
}

impl TryFrom<RawElement> for AdElement {
    type Error = String;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let kind = ElementKind::from_parts(raw.element_type, raw.properties)
            .map_err(|e| format!("element '{}': invalid properties: {e}", raw.id))?;
        Ok(Self {
            id: raw.id,
            geometry: Geometry {
                x: raw.x,
                y: raw.y,
                width: raw.width,
                height: raw.height,
                rotation: raw.rotation,
            },
            opacity: raw.opacity,
            locked: raw.locked,
            kind,
        })
    }
}

impl From<AdElement> for RawElement {
    fn from(element: AdElement) -> Self {
        Self {
            element_type: element.kind.type_name().to_string(),
            properties: element.kind.properties_value(),
            id: element.id,
            x: element.geometry.x,
            y: element.geometry.y,
            width: element.geometry.width,
            height: element.geometry.height,
            rotation: element.geometry.rotation,
            opacity: element.opacity,
            locked: element.locked,
        }
    }
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;
