use serde::Serialize;
use tera::{Context, Tera};

use baplan_core::models::plan::GeneratedPlan;

use crate::error::ClientError;

const TEMPLATE_NAME: &str = "plan.txt";

const PLAN_TEMPLATE: &str = "\
Your Behavioral Activation Plan (survey #{{ id }})

Summary
{{ summary }}
{% for section in sections %}
{{ section.heading }}
{% for item in section.items %}  - {{ item }}
{% endfor %}{% endfor %}";

#[derive(Serialize)]
struct PlanContext<'a> {
    id: i64,
    summary: &'a str,
    sections: Vec<SectionContext<'a>>,
}

#[derive(Serialize)]
struct SectionContext<'a> {
    heading: &'static str,
    items: &'a [String],
}

/// Render a plan as plain text.
///
/// The summary is always shown. A list section is only shown when it has at
/// least one entry.
pub fn render_plan(id: i64, plan: &GeneratedPlan) -> Result<String, ClientError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, PLAN_TEMPLATE)?;

    let sections = plan
        .sections()
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(heading, items)| SectionContext { heading, items })
        .collect();
    let context = Context::from_serialize(PlanContext {
        id,
        summary: &plan.summary,
        sections,
    })?;

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_not_html_escaped() {
        let plan = GeneratedPlan {
            summary: "Rest & recover <gently>".to_string(),
            ..Default::default()
        };
        let text = render_plan(1, &plan).unwrap();
        assert!(text.contains("Rest & recover <gently>"));
    }
}
