use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Busy,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Unavailable => "unavailable",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Availability::Available),
            "busy" => Some(Availability::Busy),
            "unavailable" => Some(Availability::Unavailable),
            _ => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted engineer profile. `email` is stored lowercased; `specialties`
/// and `certifications` live in TEXT columns as JSON arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service_type: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub specialties: Vec<String>,
    pub terms_agreed: bool,
    pub marketing_opt_in: bool,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub certifications: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub rating: f64,
    pub total_projects: i64,
    pub availability: Availability,
    pub created_at: String,
}

impl EngineerProfile {
    /// Record-level schema checks, every failing field reported at once.
    pub fn validate(&self) -> Result<(), BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();
        if !(0.0..=5.0).contains(&self.rating) {
            errors.insert(
                "rating".to_string(),
                "rating must be between 0 and 5.".to_string(),
            );
        }
        if self.total_projects < 0 {
            errors.insert(
                "totalProjects".to_string(),
                "totalProjects must not be negative.".to_string(),
            );
        }
        if let Some(rate) = self.hourly_rate {
            if rate < 0.0 {
                errors.insert(
                    "hourlyRate".to_string(),
                    "hourlyRate must not be negative.".to_string(),
                );
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn from_row(row: &SqliteRow) -> Self {
        let specialties: String = row.get("specialties");
        let certifications: String = row.get("certifications");
        let availability: String = row.get("availability");

        EngineerProfile {
            id: row.get::<String, _>("id"),
            first_name: row.get::<String, _>("first_name"),
            last_name: row.get::<String, _>("last_name"),
            email: row.get::<String, _>("email"),
            phone: row.try_get::<Option<String>, _>("phone").unwrap_or(None),
            company: row.try_get::<Option<String>, _>("company").unwrap_or(None),
            service_type: row.try_get::<Option<String>, _>("service_type").unwrap_or(None),
            experience: row.try_get::<Option<String>, _>("experience").unwrap_or(None),
            location: row.try_get::<Option<String>, _>("location").unwrap_or(None),
            specialties: serde_json::from_str(&specialties).unwrap_or_default(),
            terms_agreed: row.get::<bool, _>("terms_agreed"),
            marketing_opt_in: row.get::<bool, _>("marketing_opt_in"),
            avatar_url: row.try_get::<Option<String>, _>("avatar_url").unwrap_or(None),
            bio: row.try_get::<Option<String>, _>("bio").unwrap_or(None),
            certifications: serde_json::from_str(&certifications).unwrap_or_default(),
            hourly_rate: row.try_get::<Option<f64>, _>("hourly_rate").unwrap_or(None),
            rating: row.get::<f64, _>("rating"),
            total_projects: row.get::<i64, _>("total_projects"),
            availability: Availability::parse(&availability).unwrap_or_default(),
            created_at: row.get::<String, _>("created_at"),
        }
    }
}

/// Incoming join-network submission. The form posts loosely typed values,
/// so the boundary accepts both shapes for `specialties` and coerces
/// checkbox-ish values to booleans before the record is built.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinNetworkRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service_type: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub specialties: Option<SpecialtiesInput>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub terms_agreed: bool,
    #[serde(default, deserialize_with = "loose_bool")]
    pub marketing_opt_in: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecialtiesInput {
    List(Vec<String>),
    Csv(String),
}

impl JoinNetworkRequest {
    /// Trimmed, non-empty specialty list regardless of input shape. A
    /// comma-separated string is split; an array is kept entry-for-entry.
    pub fn specialty_list(&self) -> Vec<String> {
        match &self.specialties {
            Some(SpecialtiesInput::List(items)) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(SpecialtiesInput::Csv(raw)) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Required fields that are absent, blank, or (for the terms box)
    /// unchecked, in the order the form lists them.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.email) {
            missing.push("email");
        }
        if blank(&self.first_name) {
            missing.push("firstName");
        }
        if blank(&self.last_name) {
            missing.push("lastName");
        }
        if !self.terms_agreed {
            missing.push("termsAgreed");
        }
        missing
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Accepts a boolean, a checkbox-style string ("true"/"on"/"yes"/"1"), or
/// a number; anything else reads as false.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct LooseBool;

    impl<'de> Visitor<'de> for LooseBool {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, string, or number")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "yes" | "1"
            ))
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<bool, D2::Error> {
            d.deserialize_any(LooseBool)
        }
    }

    deserializer.deserialize_any(LooseBool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> JoinNetworkRequest {
        serde_json::from_value(body).expect("request should deserialize")
    }

    #[test]
    fn csv_specialties_are_split_and_trimmed() {
        let req = request(json!({ "specialties": "SCADA, PVsyst,  NABCEP" }));
        assert_eq!(req.specialty_list(), vec!["SCADA", "PVsyst", "NABCEP"]);
    }

    #[test]
    fn array_specialties_are_trimmed_but_never_resplit() {
        let req = request(json!({ "specialties": ["SCADA, PVsyst", " NABCEP ", ""] }));
        assert_eq!(req.specialty_list(), vec!["SCADA, PVsyst", "NABCEP"]);
    }

    #[test]
    fn absent_specialties_read_as_empty() {
        let req = request(json!({}));
        assert!(req.specialty_list().is_empty());
    }

    #[test]
    fn checkbox_strings_coerce_to_booleans() {
        let req = request(json!({ "termsAgreed": "on", "marketingOptIn": "off" }));
        assert!(req.terms_agreed);
        assert!(!req.marketing_opt_in);

        let req = request(json!({ "termsAgreed": 1, "marketingOptIn": true }));
        assert!(req.terms_agreed);
        assert!(req.marketing_opt_in);

        let req = request(json!({ "termsAgreed": null }));
        assert!(!req.terms_agreed);
    }

    #[test]
    fn missing_fields_are_listed_in_form_order() {
        let req = request(json!({ "email": "  ", "lastName": "Doe" }));
        assert_eq!(req.missing_fields(), vec!["email", "firstName", "termsAgreed"]);

        let req = request(json!({
            "email": "a@b.c",
            "firstName": "A",
            "lastName": "B",
            "termsAgreed": true
        }));
        assert!(req.missing_fields().is_empty());
    }

    #[test]
    fn validate_reports_every_failing_field() {
        let mut profile = EngineerProfile {
            id: "p-1".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email: "jo@example.com".to_string(),
            phone: None,
            company: None,
            service_type: None,
            experience: None,
            location: None,
            specialties: Vec::new(),
            terms_agreed: true,
            marketing_opt_in: false,
            avatar_url: None,
            bio: None,
            certifications: Vec::new(),
            hourly_rate: Some(-5.0),
            rating: 7.5,
            total_projects: -1,
            availability: Availability::Available,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let errors = profile.validate().expect_err("profile should be invalid");
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("rating"));
        assert!(errors.contains_key("totalProjects"));
        assert!(errors.contains_key("hourlyRate"));

        profile.rating = 4.5;
        profile.total_projects = 12;
        profile.hourly_rate = Some(90.0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn profile_serializes_with_mongo_style_id() {
        let profile = EngineerProfile {
            id: "abc".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email: "jo@example.com".to_string(),
            phone: None,
            company: None,
            service_type: Some("solar-design".to_string()),
            experience: None,
            location: None,
            specialties: vec!["SCADA".to_string()],
            terms_agreed: true,
            marketing_opt_in: false,
            avatar_url: None,
            bio: None,
            certifications: Vec::new(),
            hourly_rate: None,
            rating: 0.0,
            total_projects: 0,
            availability: Availability::Available,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["serviceType"], "solar-design");
        assert_eq!(value["availability"], "available");
        assert_eq!(value["totalProjects"], 0);
    }
}
