//! Documentation record assembly: generated prose, request examples and
//! the offline summary.

pub mod examples;
pub mod generator;
pub mod sections;
pub mod summary;

pub use examples::{generate_examples, render_examples, ExampleProfile, ExampleSet, MethodExample};
pub use generator::{clean_title, DocumentationAssembler, GeneratedProse};
pub use sections::{parse_sections, DocumentationSections, ParsedSections, SectionKey};
pub use summary::render_summary;
