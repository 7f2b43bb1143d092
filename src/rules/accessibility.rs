use crate::model::{Ad, AdElement, ElementKind, Geometry, Rect, Rgb, ShapeKind, ShapeProps};

use super::{
    Category, RULE_A11Y_CONTRAST, RULE_A11Y_FONT_SIZE, Rule, RuleDescriptor, RuleFault,
    RuleOutcome, Severity, plural, summarize,
};

/// Price text falls back to these when the editor leaves them unset.
const DEFAULT_PRICE_COLOR: &str = "#000000";
const DEFAULT_PRICE_FONT_SIZE: f64 = 16.0;

/// Readable text on an element: `(color, font size)`.
fn text_style(element: &AdElement) -> Option<(&str, f64)> {
    match &element.kind {
        ElementKind::Text(t) => Some((t.color.as_str(), t.font_size)),
        ElementKind::Price(p) => Some((
            p.color.as_deref().unwrap_or(DEFAULT_PRICE_COLOR),
            p.font_size.unwrap_or(DEFAULT_PRICE_FONT_SIZE),
        )),
        _ => None,
    }
}

/// Color behind `ad.elements[index]`: the topmost filled shape drawn before it
/// that fully covers it, composited over the canvas background.
fn background_behind(ad: &Ad, index: usize) -> Rgb {
    let canvas = ad.background_color();
    let target = ad.elements[index].bounding_box();

    ad.elements[..index]
        .iter()
        .rev()
        .find_map(|candidate| {
            let ElementKind::Shape(shape) = &candidate.kind else {
                return None;
            };
            let fill = Rgb::parse(shape.fill.as_deref()?).ok()?;
            covers(shape, &candidate.geometry, &target)
                .then(|| fill.blend_over(canvas, candidate.opacity))
        })
        .unwrap_or(canvas)
}

/// True if the painted area of a shape contains every corner of `target`.
///
/// Corners are mapped into the shape's unrotated frame, so rotated shapes
/// only cover what they actually paint. Lines never cover anything.
fn covers(shape: &ShapeProps, geometry: &Geometry, target: &Rect) -> bool {
    let half_w = geometry.width / 2.0;
    let half_h = geometry.height / 2.0;
    if half_w <= 0.0 || half_h <= 0.0 {
        return false;
    }
    let cx = geometry.x + half_w;
    let cy = geometry.y + half_h;
    let (sin, cos) = (-geometry.rotation).to_radians().sin_cos();

    let corners = [
        (target.left, target.top),
        (target.right, target.top),
        (target.left, target.bottom),
        (target.right, target.bottom),
    ];
    corners.iter().all(|&(x, y)| {
        let (dx, dy) = (x - cx, y - cy);
        let local_x = dx.mul_add(cos, -(dy * sin));
        let local_y = dx.mul_add(sin, dy * cos);
        match shape.shape {
            ShapeKind::Rectangle => {
                local_x.abs() <= half_w + EDGE_EPSILON && local_y.abs() <= half_h + EDGE_EPSILON
            }
            ShapeKind::Circle => {
                (local_x / half_w).powi(2) + (local_y / half_h).powi(2) <= 1.0 + EDGE_EPSILON
            }
            ShapeKind::Line => false,
        }
    })
}

/// Slack for floating-point error when a corner sits exactly on an edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Text must reach the WCAG contrast minimum against whatever it sits on.
#[derive(Debug, Clone, Copy)]
pub struct ContrastRule {
    min_ratio: f64,
    large_text_ratio: f64,
    large_text_size: f64,
}

impl ContrastRule {
    #[must_use]
    pub const fn new(min_ratio: f64, large_text_ratio: f64, large_text_size: f64) -> Self {
        Self {
            min_ratio,
            large_text_ratio,
            large_text_size,
        }
    }

    fn required_ratio(&self, font_size: f64) -> f64 {
        if font_size >= self.large_text_size {
            self.large_text_ratio
        } else {
            self.min_ratio
        }
    }
}

impl Rule for ContrastRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_A11Y_CONTRAST,
            "Text contrast",
            Category::Accessibility,
            Severity::Warning,
        )
        .with_description(
            "Text and prices must meet the minimum contrast ratio against their background.",
        )
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let mut checked = 0usize;
        let mut offenders = Vec::new();

        for (index, element) in ad.elements.iter().enumerate() {
            let Some((color, font_size)) = text_style(element) else {
                continue;
            };
            checked += 1;

            let Ok(foreground) = Rgb::parse(color) else {
                offenders.push(format!("{} has unreadable color '{color}'", element.id));
                continue;
            };
            let background = background_behind(ad, index);
            let ratio = foreground
                .blend_over(background, element.opacity)
                .contrast_ratio(background);
            let required = self.required_ratio(font_size);
            if ratio < required {
                offenders.push(format!("{} {ratio:.1}:1 (needs {required}:1)", element.id));
            }
        }

        if offenders.is_empty() {
            return Ok(RuleOutcome::pass(if checked == 0 {
                "No text to check".to_string()
            } else {
                format!(
                    "{} at or above the contrast minimum",
                    plural(checked, "text element is", "text elements are")
                )
            }));
        }

        Ok(RuleOutcome::fail(format!(
            "{} below the contrast minimum: {}",
            plural(offenders.len(), "text element is", "text elements are"),
            summarize(offenders)
        ))
        .with_suggestion(format!(
            "Increase contrast between text and its background to at least {}:1 ({}:1 for text of {}px or larger)",
            self.min_ratio, self.large_text_ratio, self.large_text_size
        )))
    }

    fn parameters(&self) -> String {
        format!(
            "{}/{}/{}",
            self.min_ratio, self.large_text_ratio, self.large_text_size
        )
    }
}

/// Text must be large enough to read at banner size.
#[derive(Debug, Clone, Copy)]
pub struct FontSizeRule {
    min_size: f64,
}

impl FontSizeRule {
    #[must_use]
    pub const fn new(min_size: f64) -> Self {
        Self { min_size }
    }
}

impl Rule for FontSizeRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_A11Y_FONT_SIZE,
            "Legible font size",
            Category::Accessibility,
            Severity::Warning,
        )
        .with_description("Text and prices must use at least the minimum font size.")
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let sized: Vec<(&str, f64)> = ad
            .elements
            .iter()
            .filter_map(|e| text_style(e).map(|(_, size)| (e.id.as_str(), size)))
            .collect();

        let offenders: Vec<String> = sized
            .iter()
            .filter(|(_, size)| *size < self.min_size)
            .map(|(id, size)| format!("{id} {size}px"))
            .collect();

        if offenders.is_empty() {
            return Ok(RuleOutcome::pass(if sized.is_empty() {
                "No text to check".to_string()
            } else {
                format!(
                    "{} at least {}px",
                    plural(sized.len(), "text element is", "text elements are"),
                    self.min_size
                )
            }));
        }

        Ok(RuleOutcome::fail(format!(
            "{} below {}px: {}",
            plural(offenders.len(), "text element is", "text elements are"),
            self.min_size,
            summarize(offenders)
        ))
        .with_suggestion(format!(
            "Increase font size to at least {}px",
            self.min_size
        )))
    }

    fn parameters(&self) -> String {
        self.min_size.to_string()
    }
}

#[cfg(test)]
#[path = "accessibility_tests.rs"]
mod tests;
