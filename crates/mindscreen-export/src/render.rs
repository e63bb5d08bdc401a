use serde::Serialize;
use tera::{Context, Tera};

use mindscreen_core::models::outcome::ItemSummary;

use crate::error::ExportError;
use crate::{DISCLAIMER, ReportInput};

const TEMPLATE_NAME: &str = "report.md";

/// Built-in report layout.
///
/// Uses the same markdown-ish subset understood by [`crate::pdf::layout`]:
/// `#`/`##` headings, `- ` bullets, `> ` footer lines, blank-line paragraphs.
pub const REPORT_TEMPLATE: &str = r#"# {{ title }}

## Patient
- Name: {{ name }}
- Age: {{ age }}
- Assessment date: {{ assessment_date }}
- Generated: {{ generated_at }}

## Result
Score: {{ score }}

Severity: {{ severity }}

## Recommendation
{% for paragraph in advisory_paragraphs %}
{{ paragraph }}
{% endfor %}
{%- if crisis_advisory %}
## Crisis resources
{{ crisis_advisory }}
{% endif %}
{%- if items %}
## Item responses
{% for item in items -%}
- {{ item.number }}. {{ item.title }}: {{ item.statement }} ({{ item.ordinal }})
{% endfor %}
{%- endif %}
> {{ disclaimer }}
"#;

#[derive(Serialize)]
struct ReportContext<'a> {
    title: &'a str,
    name: &'a str,
    age: &'a str,
    assessment_date: String,
    generated_at: String,
    score: String,
    severity: &'static str,
    advisory_paragraphs: Vec<&'a str>,
    crisis_advisory: Option<&'a str>,
    items: &'a [ItemSummary],
    disclaimer: &'static str,
}

/// Render the report text for `input` with the built-in template.
pub fn render_report(input: &ReportInput) -> Result<String, ExportError> {
    render_template(TEMPLATE_NAME, REPORT_TEMPLATE, input)
}

/// Render a Tera template against a report input.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
pub fn render_template(
    template_name: &str,
    template_content: &str,
    input: &ReportInput,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let report = ReportContext {
        title: &input.title,
        name: &input.patient.name,
        age: &input.patient.age,
        assessment_date: input.patient.assessment_date.to_string(),
        generated_at: input
            .generated_at
            .strftime("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        score: input.score.to_string(),
        severity: input.severity.label(),
        advisory_paragraphs: paragraphs(&input.advisory),
        crisis_advisory: input.crisis_advisory.as_deref(),
        items: &input.items,
        disclaimer: DISCLAIMER,
    };

    // Convert the report to a Tera context via serde_json
    let value = serde_json::to_value(&report)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Split text into paragraphs on blank-line boundaries.
///
/// Returns trimmed slices of `text`; whitespace-only lines count as blank.
pub fn paragraphs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                out.push(text[s..end].trim());
            }
        } else {
            start.get_or_insert(line_start);
            end = offset;
        }
    }
    if let Some(s) = start {
        out.push(text[s..end].trim());
    }
    out
}
