use tera::{Context, Tera};

use crate::error::ExportError;
use crate::report::Report;

/// Markdown rendering of a report, used for terminal previews.
pub const MARKDOWN_TEMPLATE: &str = r#"# {{ title }}
{{ subtitle }}
{% for section in sections %}
## {{ section.title }}
{% for row in section.rows %}
- **{{ row.label }}:** {{ row.value }}{% if row.classification.status != "neutral" %} ({{ row.classification.status }}: {{ row.classification.label }}){% endif %}
{%- endfor %}
{% if section.text %}
{{ section.text }}
{% endif %}
{%- endfor %}

---
{{ footer }}
"#;

/// Render `report` through the Tera `template`.
///
/// The report's fields are the template variables: `title`, `subtitle`,
/// `patient_name`, `footer`, and `sections`, each with `title`, optional
/// `text`, and `rows` of `{label, value, classification}`.
pub fn render_report(template: &str, report: &Report) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template("report", template)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(report)?;
    Ok(tera.render("report", &context)?)
}

pub fn render_markdown(report: &Report) -> Result<String, ExportError> {
    render_report(MARKDOWN_TEMPLATE, report)
}
