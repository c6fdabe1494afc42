//! View model handed to the section views.
//!
//! The aggregate payload is decoded one section at a time: a section that is
//! missing, `null`, or not a list becomes an empty list without affecting its
//! neighbours. Inside a list each item is decoded on its own, so one bad item
//! is skipped and the rest are kept. A `null` field reads as its empty value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioViewModel {
    pub stats: Vec<Stat>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillCategory>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub personal_info: PersonalInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    #[serde(deserialize_with = "text")]
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub highlights: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub status: String,
    pub icon: String,
    pub description: String,
    pub tech: Vec<String>,
    pub github: bool,
    pub demo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub icon: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub degree: String,
    pub school: String,
    pub location: String,
    pub period: String,
    #[serde(deserialize_with = "text")]
    pub gpa: String,
    pub coursework: Vec<String>,
}

/// Backend entries are `{name, issuer}` objects; the bundled dataset uses bare names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certification {
    Bare(String),
    Named {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issuer: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PortfolioViewModel {
    /// Reshape an aggregate payload into the view model.
    pub fn from_payload(payload: &Value) -> Self {
        let portfolio = payload.get("portfolio");
        Self {
            stats: section(portfolio.and_then(|p| p.get("stats"))),
            experience: section(payload.get("experience")),
            projects: section(payload.get("projects")),
            skills: section(payload.get("skills")),
            education: section(payload.get("education")),
            certifications: section(payload.get("certifications")),
            personal_info: portfolio
                .and_then(|p| p.get("personalInfo"))
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
        }
    }
}

/// Decode one section list item by item, dropping items that do not fit `T`.
pub fn section<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .cloned()
            .map(normalize_item)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Drop `null` fields so they take their defaults, fold a backend `_id`
/// into `id`, and stringify numeric ids.
pub fn normalize_item(item: Value) -> Value {
    let Value::Object(mut fields) = item else {
        return item;
    };
    fields.retain(|key, value| key == "id" || key == "_id" || !value.is_null());
    let mongo_id = fields.remove("_id");
    let id = match fields.remove("id") {
        Some(v) if !v.is_null() => Some(v),
        _ => mongo_id,
    };
    match id {
        Some(Value::String(s)) => {
            fields.insert("id".to_string(), Value::String(s));
        }
        Some(Value::Number(n)) => {
            fields.insert("id".to_string(), Value::String(n.to_string()));
        }
        _ => {}
    }
    Value::Object(fields)
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn image_slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

impl Project {
    pub fn image_path(&self) -> String {
        format!("/images/projects/{}.png", image_slug(&self.title))
    }
}

impl Certification {
    pub fn name(&self) -> &str {
        match self {
            Certification::Bare(name) => name,
            Certification::Named { name, .. } => name,
        }
    }

    pub fn issuer(&self) -> Option<&str> {
        match self {
            Certification::Bare(_) => None,
            Certification::Named { issuer, .. } => issuer.as_deref(),
        }
    }

    pub fn image_path(&self) -> String {
        format!("/images/certifications/{}.png", image_slug(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_are_empty() {
        let vm = PortfolioViewModel::from_payload(&json!({}));
        assert_eq!(vm, PortfolioViewModel::default());
    }

    #[test]
    fn test_partial_payload() {
        let payload = json!({
            "experience": [
                {"role": "A", "company": "X"},
                {"role": "B", "company": "Y"},
                {"role": "C", "company": "Z"}
            ],
            "projects": null,
            "portfolio": {"stats": [{"value": "3+", "label": "Years Experience"}]}
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        assert_eq!(vm.experience.len(), 3);
        assert_eq!(vm.projects.len(), 0);
        assert_eq!(vm.stats[0].value, "3+");
        assert!(vm.skills.is_empty());
    }

    #[test]
    fn test_malformed_section_isolated() {
        let payload = json!({
            "skills": "not a list",
            "projects": [{"title": 7}],
            "education": [{"degree": "MS", "gpa": 3.8}]
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        assert!(vm.skills.is_empty());
        assert!(vm.projects.is_empty());
        assert_eq!(vm.education[0].gpa, "3.8");
    }

    #[test]
    fn test_null_fields_keep_items() {
        let payload = json!({
            "experience": [
                {"role": "Analyst", "company": "X", "location": null},
                {"role": "Engineer", "company": "Y", "highlights": null}
            ],
            "projects": [{"title": "SIEM", "status": null, "tech": ["Go"], "github": null}]
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        assert_eq!(vm.experience.len(), 2);
        assert_eq!(vm.experience[0].location, "");
        assert!(vm.experience[1].highlights.is_empty());
        assert_eq!(vm.projects.len(), 1);
        assert_eq!(vm.projects[0].status, "");
        assert!(!vm.projects[0].github);
    }

    #[test]
    fn test_bad_item_skipped_rest_kept() {
        let payload = json!({
            "projects": [{"title": "Good"}, {"title": 7}, "junk", {"title": "Also good"}]
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        let titles: Vec<&str> = vm.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Good", "Also good"]);
    }

    #[test]
    fn test_ids_normalized() {
        let payload = json!({
            "experience": [{"_id": "abc", "role": "R"}, {"id": 12, "_id": "zzz"}]
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        assert_eq!(vm.experience[0].id.as_deref(), Some("abc"));
        assert_eq!(vm.experience[1].id.as_deref(), Some("12"));
    }

    #[test]
    fn test_certification_shapes() {
        let payload = json!({
            "certifications": ["Google AI Essentials", {"name": "AWS CCP", "issuer": "Amazon"}]
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        assert_eq!(vm.certifications[0].name(), "Google AI Essentials");
        assert_eq!(vm.certifications[0].issuer(), None);
        assert_eq!(vm.certifications[1].issuer(), Some("Amazon"));
        assert_eq!(
            vm.certifications[0].image_path(),
            "/images/certifications/google-ai-essentials.png"
        );
    }

    #[test]
    fn test_personal_info_keeps_unknown_keys() {
        let payload = json!({
            "portfolio": {"personalInfo": {"bio": "hello", "tagline": "t"}}
        });
        let vm = PortfolioViewModel::from_payload(&payload);
        assert_eq!(vm.personal_info.bio.as_deref(), Some("hello"));
        assert_eq!(vm.personal_info.extra["tagline"], "t");
    }

    #[test]
    fn test_serializes_camel_case() {
        let out = serde_json::to_value(PortfolioViewModel::default()).unwrap();
        assert!(out.get("personalInfo").is_some());
        assert_eq!(out["stats"], json!([]));
    }
}
