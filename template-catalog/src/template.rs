use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Color token used when a section declares no color of its own.
pub const DEFAULT_SECTION_COLOR: &str = "slate";

/// One named section of a chart template.
///
/// The `key` is a free-form identifier unique within its template; it is the
/// join key between template, generated chart content and manual edits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateSection {
    pub key: String,
    pub name: String,
    /// Optional short label shown in compact section chips.
    pub short_label: Option<String>,
    /// Optional color token for section rendering.
    pub color: Option<String>,
}

impl TemplateSection {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            short_label: None,
            color: None,
        }
    }

    pub fn with_style(mut self, short_label: impl Into<String>, color: impl Into<String>) -> Self {
        self.short_label = Some(short_label.into());
        self.color = Some(color.into());
        self
    }
}

/// Resolved display metadata for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionStyle {
    pub label: String,
    pub color: String,
}

/// Resolve the display metadata for a section, falling back to a generated
/// label (first character of the display name, upper-cased) and the default
/// color token when the section registered none.
pub fn section_style(section: &TemplateSection) -> SectionStyle {
    let label = section.short_label.clone().unwrap_or_else(|| {
        section
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    });
    let color = section
        .color
        .clone()
        .unwrap_or_else(|| DEFAULT_SECTION_COLOR.to_string());
    SectionStyle { label, color }
}

/// A named, ordered set of chart sections for a medical specialty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    /// Specialty this template belongs to; `"general"` templates are visible
    /// to every specialty.
    pub specialty: String,
    pub sections: Vec<TemplateSection>,
}

impl Template {
    /// Look up a section by key.
    pub fn section(&self, key: &str) -> Option<&TemplateSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Section keys in declared order.
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_prefers_registered_metadata() {
        let section = TemplateSection::new("subjective", "Subjective").with_style("S", "blue");
        let style = section_style(&section);
        assert_eq!(style.label, "S");
        assert_eq!(style.color, "blue");
    }

    #[test]
    fn style_falls_back_to_generated_label_and_default_color() {
        let section = TemplateSection::new("endoscopy", "endoscopy findings");
        let style = section_style(&section);
        assert_eq!(style.label, "E");
        assert_eq!(style.color, DEFAULT_SECTION_COLOR);
    }

    #[test]
    fn style_handles_empty_name() {
        let section = TemplateSection::new("x", "");
        assert_eq!(section_style(&section).label, "");
    }
}
