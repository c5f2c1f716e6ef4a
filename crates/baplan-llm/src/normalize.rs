//! Coercion of a model reply into a [`GeneratedPlan`].
//!
//! Models do not reliably honour the requested shape. The contract here:
//!
//! - the reply must be a JSON object, optionally wrapped in a Markdown
//!   code fence;
//! - `objectives`, `smartGoals`, `actionSteps` and `reminders` become
//!   ordered string lists. An array keeps its order, a keyed mapping
//!   contributes its values in the order the reply lists them, a missing or
//!   null field is empty, and a lone scalar becomes a one-entry list;
//! - list entries that are strings are trimmed (blank ones dropped),
//!   numbers and booleans are written out, nulls are dropped, and nested
//!   arrays or objects collapse to their text values joined by `"; "`;
//! - `summary` is the string given, or `""` when missing.
//!
//! Mapping order is the order the keys appear in the reply text, with no
//! sorting of any kind. Integer-like keys are not special: `{"2":"b","1":"a"}`
//! yields `["b", "a"]`.

use serde_json::Value;

use baplan_core::models::plan::GeneratedPlan;

use crate::error::PlanError;

/// Parse raw reply text into a plan.
pub fn parse_plan(text: &str) -> Result<GeneratedPlan, PlanError> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| PlanError::MalformedResponse(format!("reply is not JSON: {e}")))?;
    normalize_plan(&value)
}

/// Coerce an already-parsed reply into a plan.
pub fn normalize_plan(value: &Value) -> Result<GeneratedPlan, PlanError> {
    let Value::Object(map) = value else {
        return Err(PlanError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            kind(value)
        )));
    };

    Ok(GeneratedPlan {
        summary: map.get("summary").and_then(entry_text).unwrap_or_default(),
        objectives: coerce_list(map.get("objectives")),
        smart_goals: coerce_list(map.get("smartGoals")),
        action_steps: coerce_list(map.get("actionSteps")),
        reminders: coerce_list(map.get("reminders")),
    })
}

/// Coerce a sequence-or-mapping value into an ordered list of strings.
pub fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(entry_text).collect(),
        Some(Value::Object(map)) => map.values().filter_map(entry_text).collect(),
        Some(scalar) => entry_text(scalar).into_iter().collect(),
    }
}

fn entry_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => join_texts(items.iter()),
        Value::Object(map) => join_texts(map.values()),
    }
}

fn join_texts<'a>(values: impl Iterator<Item = &'a Value>) -> Option<String> {
    let parts: Vec<String> = values.filter_map(entry_text).collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

/// Remove a surrounding ```` ``` ```` or ```` ```json ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim().contains('{') => body.trim(),
        _ => inner.trim(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
