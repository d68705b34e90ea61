//! Formatting options and template presets.
//!
//! The renderer interpolates these values verbatim. Range checks live here and
//! are applied by the HTTP layer before a render is requested.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const FONT_SIZE_RANGE: RangeInclusive<u8> = 9..=14;
pub const MARGIN_RANGE: RangeInclusive<f64> = 0.2..=1.0;
pub const ITEM_SPACING_RANGE: RangeInclusive<f64> = 0.02..=0.1;
pub const SECTION_SPACING_RANGE: RangeInclusive<f64> = 0.05..=0.3;

/// Named layout presets offered by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Template {
    #[default]
    #[serde(rename = "Standard Single-Column")]
    StandardSingleColumn,
    #[serde(rename = "Modern Two-Column")]
    ModernTwoColumn,
    #[serde(rename = "Compact Professional")]
    CompactProfessional,
}

/// Defaults bundled with a [`Template`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplatePreset {
    pub template: Template,
    pub name: &'static str,
    pub description: &'static str,
    pub margin: f64,
    pub font_size: u8,
    pub color_scheme: &'static str,
}

impl Template {
    pub const ALL: [Template; 3] = [
        Template::StandardSingleColumn,
        Template::ModernTwoColumn,
        Template::CompactProfessional,
    ];

    pub fn preset(self) -> TemplatePreset {
        match self {
            Template::StandardSingleColumn => TemplatePreset {
                template: self,
                name: "Standard Single-Column",
                description: "Classic professional resume layout",
                margin: 0.5,
                font_size: 11,
                color_scheme: "black",
            },
            Template::ModernTwoColumn => TemplatePreset {
                template: self,
                name: "Modern Two-Column",
                description: "Modern layout with skills sidebar",
                margin: 0.4,
                font_size: 10,
                color_scheme: "blue",
            },
            Template::CompactProfessional => TemplatePreset {
                template: self,
                name: "Compact Professional",
                description: "Space-efficient professional design",
                margin: 0.3,
                font_size: 10,
                color_scheme: "darkblue",
            },
        }
    }
}

/// Page geometry and spacing. Font size in points, everything else in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    pub template: Template,
    pub font_size: u8,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub item_spacing: f64,
    pub section_spacing: f64,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            template: Template::StandardSingleColumn,
            font_size: 11,
            margin_top: 0.5,
            margin_bottom: 0.5,
            margin_left: 0.5,
            margin_right: 0.5,
            item_spacing: 0.04,
            section_spacing: 0.15,
        }
    }
}

/// A single out-of-range field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} is outside {}..={}",
            self.field, self.value, self.min, self.max
        )
    }
}

impl FormattingOptions {
    /// Options seeded from a template's margin and font size, default spacing.
    pub fn from_template(template: Template) -> Self {
        let preset = template.preset();
        Self {
            template,
            font_size: preset.font_size,
            margin_top: preset.margin,
            margin_bottom: preset.margin,
            margin_left: preset.margin,
            margin_right: preset.margin,
            ..Self::default()
        }
    }

    /// Returns every field outside its allowed range. Empty means valid.
    pub fn range_violations(&self) -> Vec<RangeViolation> {
        let mut violations = Vec::new();

        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            violations.push(RangeViolation {
                field: "font_size",
                value: self.font_size as f64,
                min: *FONT_SIZE_RANGE.start() as f64,
                max: *FONT_SIZE_RANGE.end() as f64,
            });
        }

        let inches = [
            ("margin_top", self.margin_top, &MARGIN_RANGE),
            ("margin_bottom", self.margin_bottom, &MARGIN_RANGE),
            ("margin_left", self.margin_left, &MARGIN_RANGE),
            ("margin_right", self.margin_right, &MARGIN_RANGE),
            ("item_spacing", self.item_spacing, &ITEM_SPACING_RANGE),
            ("section_spacing", self.section_spacing, &SECTION_SPACING_RANGE),
        ];
        for (field, value, range) in inches {
            // NaN fails `contains`, so it is reported too.
            if !range.contains(&value) {
                violations.push(RangeViolation {
                    field,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }

        violations
    }
}
