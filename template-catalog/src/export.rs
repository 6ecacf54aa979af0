use std::collections::HashMap;

use crate::template::TemplateSection;

/// Render the "copy all" clipboard text for a chart.
///
/// Sections are emitted in the template's declared order as
/// `"[{name}]\n{content}"`, joined by a blank line. Sections with no content
/// still appear, with an empty body — the section list itself is part of the
/// user-visible contract, regardless of which sections the generator filled.
pub fn copy_all(sections: &[TemplateSection], contents: &HashMap<String, String>) -> String {
    sections
        .iter()
        .map(|section| {
            let body = contents.get(&section.key).map(String::as_str).unwrap_or("");
            format!("[{}]\n{}", section.name, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateSection;

    fn soap() -> Vec<TemplateSection> {
        vec![
            TemplateSection::new("subjective", "Subjective"),
            TemplateSection::new("objective", "Objective"),
            TemplateSection::new("assessment", "Assessment"),
            TemplateSection::new("plan", "Plan"),
        ]
    }

    #[test]
    fn empty_sections_are_preserved_in_order() {
        let mut contents = HashMap::new();
        contents.insert("subjective".to_string(), "Headache for 3 days".to_string());
        contents.insert("plan".to_string(), "Ibuprofen 400mg".to_string());

        let text = copy_all(&soap(), &contents);
        assert_eq!(
            text,
            "[Subjective]\nHeadache for 3 days\n\n[Objective]\n\n\n[Assessment]\n\n\n[Plan]\nIbuprofen 400mg"
        );
    }

    #[test]
    fn order_follows_template_not_content_map() {
        let mut contents = HashMap::new();
        for key in ["plan", "assessment", "objective", "subjective"] {
            contents.insert(key.to_string(), key.to_string());
        }
        let text = copy_all(&soap(), &contents);
        let subjective = text.find("[Subjective]").unwrap();
        let objective = text.find("[Objective]").unwrap();
        let assessment = text.find("[Assessment]").unwrap();
        let plan = text.find("[Plan]").unwrap();
        assert!(subjective < objective && objective < assessment && assessment < plan);
    }

    #[test]
    fn content_for_undeclared_sections_is_ignored() {
        let mut contents = HashMap::new();
        contents.insert("ghost".to_string(), "never rendered".to_string());
        let text = copy_all(&soap(), &contents);
        assert!(!text.contains("never rendered"));
    }
}
