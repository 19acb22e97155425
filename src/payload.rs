use serde::{Deserialize, Serialize};

/// Fields requested from the server when the caller does not override them.
pub const DEFAULT_INCLUDE_FIELDS: [&str; 10] = [
    "ApplId",
    "ProjectTitle",
    "ProjectNum",
    "FiscalYear",
    "AwardAmount",
    "Organization",
    "PrincipalInvestigators",
    "AgencyIcFundings",
    "ProjectStartDate",
    "ProjectEndDate",
];

/// Optional filter lists. An empty list means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub fiscal_years: Vec<u32>,
    pub keywords: Vec<String>,
    pub activity_codes: Vec<String>,
    pub org_names: Vec<String>,
    pub pi_names: Vec<String>,
}

/// Name matcher for the `pi_names` criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiName {
    pub first_name: String,
    pub last_name: String,
    pub any_name: String,
}

impl PiName {
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            any_name: name.into(),
            ..Self::default()
        }
    }
}

/// The `criteria` object. Empty lists are left out of the JSON entirely; the API
/// treats an empty array differently from an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fiscal_years: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub org_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pi_names: Vec<PiName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub criteria: Criteria,
    pub offset: u32,
    pub limit: u32,
    pub include_fields: Vec<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        build_payload(&SearchFilters::default(), 0, 10, None)
    }
}

/// Builds the `projects/search` request body.
///
/// A missing or empty `include_fields` is replaced by [`DEFAULT_INCLUDE_FIELDS`].
pub fn build_payload(
    filters: &SearchFilters,
    offset: u32,
    limit: u32,
    include_fields: Option<Vec<String>>,
) -> SearchRequest {
    let criteria = Criteria {
        fiscal_years: filters.fiscal_years.clone(),
        keywords: filters.keywords.clone(),
        activity_codes: filters.activity_codes.clone(),
        org_names: filters.org_names.clone(),
        pi_names: filters.pi_names.iter().map(PiName::any).collect(),
    };

    let include_fields = match include_fields {
        Some(fields) if !fields.is_empty() => fields,
        _ => DEFAULT_INCLUDE_FIELDS.iter().map(|s| s.to_string()).collect(),
    };

    SearchRequest {
        criteria,
        offset,
        limit,
        include_fields,
    }
}
