use crate::model::{Ad, ElementKind, ImageFit};

use super::{
    Category, RULE_QUALITY_BOUNDS, RULE_QUALITY_IMAGE, Rule, RuleDescriptor, RuleFault,
    RuleOutcome, Severity, plural, summarize,
};

/// Aspect ratios within this relative difference count as equal.
const ASPECT_TOLERANCE: f64 = 0.01;

/// No element may spill outside the template canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasBoundsRule {
    tolerance: f64,
}

impl CanvasBoundsRule {
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Rule for CanvasBoundsRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_QUALITY_BOUNDS,
            "Within canvas bounds",
            Category::Quality,
            Severity::Warning,
        )
        .with_description("Every element, including rotation, must fit inside the template canvas.")
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let canvas = ad.template.canvas();
        let offenders: Vec<String> = ad
            .elements
            .iter()
            .filter(|e| !canvas.contains(&e.bounding_box(), self.tolerance))
            .map(|e| e.id.clone())
            .collect();

        if offenders.is_empty() {
            return Ok(RuleOutcome::pass(format!(
                "All elements fit the {}x{} canvas",
                ad.template.width, ad.template.height
            )));
        }

        Ok(RuleOutcome::fail(format!(
            "{} the {}x{} canvas: {}",
            plural(offenders.len(), "element exceeds", "elements exceed"),
            ad.template.width,
            ad.template.height,
            summarize(offenders)
        ))
        .with_suggestion("Move or resize elements so they stay inside the canvas"))
    }

    fn parameters(&self) -> String {
        self.tolerance.to_string()
    }
}

/// Images must not be blown up past their native resolution or stretched.
#[derive(Debug, Clone, Copy)]
pub struct ImageResolutionRule {
    max_upscale: f64,
}

impl ImageResolutionRule {
    #[must_use]
    pub const fn new(max_upscale: f64) -> Self {
        Self { max_upscale }
    }
}

/// Scale factor applied to the source image when drawn into its box.
fn render_scale(fit: ImageFit, sx: f64, sy: f64) -> f64 {
    match fit {
        ImageFit::Contain => sx.min(sy),
        ImageFit::Cover | ImageFit::Fill => sx.max(sy),
    }
}

impl Rule for ImageResolutionRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_QUALITY_IMAGE,
            "Image resolution",
            Category::Quality,
            Severity::Info,
        )
        .with_description(
            "Images with a known native size must not be upscaled beyond the allowed factor \
             or stretched out of aspect.",
        )
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let mut checked = 0usize;
        let mut offenders = Vec::new();

        for element in &ad.elements {
            let ElementKind::Image(img) = &element.kind else {
                continue;
            };
            let (Some(nw), Some(nh)) = (img.natural_width, img.natural_height) else {
                continue;
            };
            if nw == 0 || nh == 0 {
                offenders.push(format!("{} has an empty source", element.id));
                continue;
            }
            checked += 1;

            let g = &element.geometry;
            let sx = g.width / f64::from(nw);
            let sy = g.height / f64::from(nh);
            let scale = render_scale(img.fit, sx, sy);
            if scale > self.max_upscale {
                offenders.push(format!("{} upscaled {scale:.2}x", element.id));
            }
            if img.fit == ImageFit::Fill && sy > 0.0 && (sx / sy - 1.0).abs() > ASPECT_TOLERANCE {
                offenders.push(format!("{} stretched", element.id));
            }
        }

        if offenders.is_empty() {
            return Ok(RuleOutcome::pass(if checked == 0 {
                "No images with known resolution".to_string()
            } else {
                format!(
                    "{} at native resolution or better",
                    plural(checked, "image is", "images are")
                )
            }));
        }

        Ok(RuleOutcome::fail(format!(
            "Image quality issues: {}",
            summarize(offenders)
        ))
        .with_suggestion(
            "Use higher resolution images and keep their aspect ratio (fit: contain or cover)",
        ))
    }

    fn parameters(&self) -> String {
        self.max_upscale.to_string()
    }
}

#[cfg(test)]
#[path = "quality_tests.rs"]
mod tests;
