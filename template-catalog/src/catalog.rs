use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::template::{Template, TemplateSection};

/// Specialty marker for templates visible to every specialty.
pub const GENERAL_SPECIALTY: &str = "general";

/// In-memory registry of chart templates, keyed by id.
///
/// Templates are read-mostly reference data: the catalog is populated at
/// startup with the built-ins plus any hospital-specific registrations, and
/// queried on every session start and chart render.
pub struct TemplateCatalog {
    templates: HashMap<Uuid, Template>,
    /// Ids in registration order, so listings are stable.
    order: Vec<Uuid>,
}

impl TemplateCatalog {
    /// Empty catalog, for tests and custom setups.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Catalog pre-populated with the built-in templates.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for template in builtin_templates() {
            // Built-ins are statically well-formed.
            let _ = catalog.register(template);
        }
        catalog
    }

    /// Register a template. Rejects templates with no sections or with
    /// duplicate section keys.
    pub fn register(&mut self, template: Template) -> CatalogResult<()> {
        if template.sections.is_empty() {
            return Err(CatalogError::EmptyTemplate(template.name));
        }
        let mut seen = std::collections::HashSet::new();
        for section in &template.sections {
            if !seen.insert(section.key.as_str()) {
                return Err(CatalogError::DuplicateSection {
                    template: template.name.clone(),
                    key: section.key.clone(),
                });
            }
        }
        if !self.templates.contains_key(&template.id) {
            self.order.push(template.id);
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    pub fn get_template(&self, id: Uuid) -> CatalogResult<&Template> {
        self.templates.get(&id).ok_or(CatalogError::NotFound(id))
    }

    /// Templates visible to a specialty: its own plus the general ones.
    pub fn list_for_specialty(&self, specialty: &str) -> Vec<&Template> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id))
            .filter(|t| t.specialty == specialty || t.specialty == GENERAL_SPECIALTY)
            .collect()
    }

    pub fn list_all(&self) -> Vec<&Template> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id))
            .collect()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Stable id for the built-in SOAP template.
pub const SOAP_TEMPLATE_ID: Uuid = Uuid::from_u128(0x50a9_0001);
/// Stable id for the built-in internal-medicine template.
pub const INTERNAL_MEDICINE_TEMPLATE_ID: Uuid = Uuid::from_u128(0x50a9_0002);
/// Stable id for the built-in gastroenterology template.
pub const GASTROENTEROLOGY_TEMPLATE_ID: Uuid = Uuid::from_u128(0x50a9_0003);
/// Stable id for the built-in otolaryngology template.
pub const OTOLARYNGOLOGY_TEMPLATE_ID: Uuid = Uuid::from_u128(0x50a9_0004);

fn soap_sections() -> Vec<TemplateSection> {
    vec![
        TemplateSection::new("subjective", "Subjective").with_style("S", "blue"),
        TemplateSection::new("objective", "Objective").with_style("O", "green"),
        TemplateSection::new("assessment", "Assessment").with_style("A", "amber"),
        TemplateSection::new("plan", "Plan").with_style("P", "violet"),
    ]
}

/// The built-in template set shipped with the catalog.
pub fn builtin_templates() -> Vec<Template> {
    let mut internal_medicine = soap_sections();
    internal_medicine.push(TemplateSection::new("chronicDisease", "Chronic Disease"));
    internal_medicine.push(TemplateSection::new("labResults", "Lab Results"));

    let mut gastroenterology = soap_sections();
    gastroenterology.push(TemplateSection::new("endoscopy", "Endoscopy"));

    let mut otolaryngology = soap_sections();
    otolaryngology.push(TemplateSection::new("audiometry", "Audiometry"));

    vec![
        Template {
            id: SOAP_TEMPLATE_ID,
            name: "SOAP".to_string(),
            specialty: GENERAL_SPECIALTY.to_string(),
            sections: soap_sections(),
        },
        Template {
            id: INTERNAL_MEDICINE_TEMPLATE_ID,
            name: "Internal Medicine".to_string(),
            specialty: "internal_medicine".to_string(),
            sections: internal_medicine,
        },
        Template {
            id: GASTROENTEROLOGY_TEMPLATE_ID,
            name: "Gastroenterology".to_string(),
            specialty: "gastroenterology".to_string(),
            sections: gastroenterology,
        },
        Template {
            id: OTOLARYNGOLOGY_TEMPLATE_ID,
            name: "Otolaryngology".to_string(),
            specialty: "otolaryngology".to_string(),
            sections: otolaryngology,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve_by_id() {
        let catalog = TemplateCatalog::with_builtins();
        let soap = catalog.get_template(SOAP_TEMPLATE_ID).unwrap();
        assert_eq!(soap.name, "SOAP");
        assert_eq!(
            soap.section_keys().collect::<Vec<_>>(),
            vec!["subjective", "objective", "assessment", "plan"]
        );
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = TemplateCatalog::with_builtins();
        assert!(matches!(
            catalog.get_template(Uuid::new_v4()),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn specialty_listing_includes_general_templates() {
        let catalog = TemplateCatalog::with_builtins();
        let listed = catalog.list_for_specialty("gastroenterology");
        let names: Vec<_> = listed.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"SOAP"));
        assert!(names.contains(&"Gastroenterology"));
        assert!(!names.contains(&"Otolaryngology"));
    }

    #[test]
    fn duplicate_section_keys_are_rejected() {
        let mut catalog = TemplateCatalog::new();
        let template = Template {
            id: Uuid::new_v4(),
            name: "Broken".to_string(),
            specialty: GENERAL_SPECIALTY.to_string(),
            sections: vec![
                TemplateSection::new("plan", "Plan"),
                TemplateSection::new("plan", "Plan Again"),
            ],
        };
        assert!(matches!(
            catalog.register(template),
            Err(CatalogError::DuplicateSection { .. })
        ));
    }

    #[test]
    fn empty_template_is_rejected() {
        let mut catalog = TemplateCatalog::new();
        let template = Template {
            id: Uuid::new_v4(),
            name: "Empty".to_string(),
            specialty: GENERAL_SPECIALTY.to_string(),
            sections: vec![],
        };
        assert!(matches!(
            catalog.register(template),
            Err(CatalogError::EmptyTemplate(_))
        ));
    }

    #[test]
    fn reregistering_keeps_listing_stable() {
        let mut catalog = TemplateCatalog::with_builtins();
        let before = catalog.list_all().len();
        let mut soap = catalog.get_template(SOAP_TEMPLATE_ID).unwrap().clone();
        soap.name = "SOAP v2".to_string();
        catalog.register(soap).unwrap();
        assert_eq!(catalog.list_all().len(), before);
        assert_eq!(catalog.get_template(SOAP_TEMPLATE_ID).unwrap().name, "SOAP v2");
    }
}
