use serde::Serialize;
use serde_json::{Map, Value};

use crate::resolve::{get_value, get_value_or, is_truthy};

const ORGANIZATION: &[&str] = &["Organization", "organization"];
const INVESTIGATORS: &[&str] = &["PrincipalInvestigators", "principal_investigators"];
const PI_NAME: &[&str] = &["FullName", "full_name", "Name", "name"];

/// Fixed-shape tabular view of one project record.
///
/// Columns always appear in [`FlatRow::COLUMNS`] order; absent values are JSON null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatRow {
    #[serde(rename = "ApplId")]
    pub appl_id: Value,
    #[serde(rename = "ProjectNum")]
    pub project_num: Value,
    #[serde(rename = "ProjectTitle")]
    pub project_title: Value,
    #[serde(rename = "FiscalYear")]
    pub fiscal_year: Value,
    #[serde(rename = "AwardAmount")]
    pub award_amount: Value,
    #[serde(rename = "OrgName")]
    pub org_name: Value,
    #[serde(rename = "OrgCity")]
    pub org_city: Value,
    #[serde(rename = "OrgState")]
    pub org_state: Value,
    #[serde(rename = "PI_Names")]
    pub pi_names: Value,
    #[serde(rename = "ProjectStartDate")]
    pub project_start_date: Value,
    #[serde(rename = "ProjectEndDate")]
    pub project_end_date: Value,
}

impl FlatRow {
    pub const COLUMNS: [&'static str; 11] = [
        "ApplId",
        "ProjectNum",
        "ProjectTitle",
        "FiscalYear",
        "AwardAmount",
        "OrgName",
        "OrgCity",
        "OrgState",
        "PI_Names",
        "ProjectStartDate",
        "ProjectEndDate",
    ];

    /// Cell values in [`FlatRow::COLUMNS`] order.
    pub fn values(&self) -> [&Value; 11] {
        [
            &self.appl_id,
            &self.project_num,
            &self.project_title,
            &self.fiscal_year,
            &self.award_amount,
            &self.org_name,
            &self.org_city,
            &self.org_state,
            &self.pi_names,
            &self.project_start_date,
            &self.project_end_date,
        ]
    }
}

/// Flattens a project record that may use PascalCase or snake_case keys.
///
/// Never fails: missing fields become null and investigator entries that are not
/// objects are skipped. Every investigator's name is collected and joined with `"; "`.
pub fn flatten_project(project: &Value) -> FlatRow {
    let org = organization(project);

    let names: Vec<String> = investigators(project)
        .iter()
        .filter(|pi| pi.is_object())
        .filter_map(pi_name)
        .collect();

    let field = |aliases: &[&str]| get_value_or(project, aliases, Value::Null);
    let org_field = |aliases: &[&str]| get_value_or(&org, aliases, Value::Null);

    FlatRow {
        appl_id: field(&["ApplId", "appl_id"]),
        project_num: field(&["ProjectNum", "project_num"]),
        project_title: field(&["ProjectTitle", "project_title"]),
        fiscal_year: field(&["FiscalYear", "fiscal_year"]),
        award_amount: field(&["AwardAmount", "award_amount"]),
        org_name: org_field(&["OrgName", "org_name"]),
        org_city: org_field(&["OrgCity", "org_city"]),
        org_state: org_field(&["OrgState", "org_state"]),
        pi_names: if names.is_empty() {
            Value::Null
        } else {
            Value::String(names.join("; "))
        },
        project_start_date: field(&["ProjectStartDate", "project_start_date"]),
        project_end_date: field(&["ProjectEndDate", "project_end_date"]),
    }
}

/// Display name of the first investigator, if the list starts with an object.
///
/// Unlike [`flatten_project`] this looks at the first entry only.
pub fn first_pi_name(project: &Value) -> Option<Value> {
    let first = investigators(project).first()?;
    if !first.is_object() {
        return None;
    }
    get_value(first, PI_NAME).filter(|v| !v.is_null()).cloned()
}

/// The nested organization record, or an empty object when absent or falsy.
pub(crate) fn organization(project: &Value) -> Value {
    match get_value(project, ORGANIZATION) {
        Some(v) if is_truthy(v) => v.clone(),
        _ => Value::Object(Map::new()),
    }
}

fn investigators(project: &Value) -> &[Value] {
    get_value(project, INVESTIGATORS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// First truthy value among the name aliases, looked up verbatim.
fn pi_name(pi: &Value) -> Option<String> {
    PI_NAME
        .iter()
        .filter_map(|alias| pi.get(*alias))
        .find(|v| is_truthy(v))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}
