mod engine;

pub use engine::{render_template, render_template_simple, template_exists, TemplateError};
