//! Chart template catalog for CareScribe
//!
//! A `Template` is a named, ordered set of chart sections associated with a
//! medical specialty (SOAP is one template, not a privileged type). Section
//! keys are free-form identifiers so specialties can register arbitrary
//! sections (`endoscopy`, `audiometry`, `chronicDisease`, ...) alongside the
//! universal four. All consumers operate generically over "whatever sections
//! this template declares":
//!
//! - display metadata resolves through [`section_style`] with a declared
//!   fallback (first letter upper-cased, default color token)
//! - clipboard export goes through [`copy_all`], which preserves the
//!   template's declared section order
//!
//! Sessions reference templates by id; charts snapshot the section list at
//! generation time so later template edits never rewrite historical charts.

pub mod catalog;
pub mod error;
pub mod export;
pub mod template;

pub use catalog::{
    builtin_templates, TemplateCatalog, GASTROENTEROLOGY_TEMPLATE_ID, GENERAL_SPECIALTY,
    INTERNAL_MEDICINE_TEMPLATE_ID, OTOLARYNGOLOGY_TEMPLATE_ID, SOAP_TEMPLATE_ID,
};
pub use error::{CatalogError, CatalogResult};
pub use export::copy_all;
pub use template::{section_style, SectionStyle, Template, TemplateSection, DEFAULT_SECTION_COLOR};
