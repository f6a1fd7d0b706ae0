use crate::error::Result;
use crate::report::OrgReport;
use handlebars::Handlebars;
use std::fs;
use std::path::PathBuf;

const TEXT_TEMPLATE: &str = include_str!("../templates/text/org.hbs");
const HTML_TEMPLATE: &str = include_str!("../templates/html/org.hbs");

const REPORT_TEMPLATE: &str = "report";

/// Which template the report is rendered through.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Text,
    Html,
    Path(PathBuf),
}

/// Compiled template registry. Construction fails on an unreadable or
/// syntactically invalid template, before any report data exists.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new(source: &TemplateSource) -> Result<Self> {
        let mut registry = Handlebars::new();
        match source {
            TemplateSource::Text => {
                registry.register_template_string(REPORT_TEMPLATE, TEXT_TEMPLATE)?;
            }
            TemplateSource::Html => {
                registry.register_template_string(REPORT_TEMPLATE, HTML_TEMPLATE)?;
            }
            TemplateSource::Path(path) => {
                let contents = fs::read_to_string(path)?;
                registry.register_template_string(REPORT_TEMPLATE, contents)?;
            }
        }
        Ok(Self { registry })
    }

    /// Renders the reports in the exact order supplied.
    pub fn render(&self, reports: &[OrgReport]) -> Result<String> {
        Ok(self.registry.render(REPORT_TEMPLATE, &reports)?)
    }
}
