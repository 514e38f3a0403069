use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Availability, EngineerProfile};

/// One card in the directory: an engineer or a provider service. Listings
/// come from the sample catalog or from profiles fetched off the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryListing {
    pub id: String,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub service_type: String,
    pub experience: Option<String>,
    pub location: String,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub total_projects: i64,
    pub hourly_rate: Option<f64>,
    pub availability: Availability,
}

impl DirectoryListing {
    pub fn from_profile(profile: &EngineerProfile) -> Self {
        DirectoryListing {
            id: profile.id.clone(),
            name: format!("{} {}", profile.first_name, profile.last_name)
                .trim()
                .to_string(),
            company: profile.company.clone(),
            email: Some(profile.email.clone()),
            service_type: profile.service_type.clone().unwrap_or_default(),
            experience: profile.experience.clone(),
            location: profile.location.clone().unwrap_or_default(),
            specialties: profile.specialties.clone(),
            rating: profile.rating,
            total_projects: profile.total_projects,
            hourly_rate: profile.hourly_rate,
            availability: profile.availability,
        }
    }
}

/// Search state for the listing pages: one free-text query plus a
/// multi-select value set per facet. Selections OR together within a facet
/// and AND across facets.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    pub query: String,
    pub service_types: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub specialties: BTreeSet<String>,
}

impl DirectoryFilter {
    pub fn matches(&self, listing: &DirectoryListing) -> bool {
        self.matches_query(listing) && self.matches_facets(listing)
    }

    fn matches_query(&self, listing: &DirectoryListing) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let mut fields: Vec<&str> = vec![listing.name.as_str(), listing.location.as_str()];
        if let Some(company) = &listing.company {
            fields.push(company);
        }
        if let Some(email) = &listing.email {
            fields.push(email);
        }
        fields
            .into_iter()
            .chain(listing.specialties.iter().map(String::as_str))
            .any(|field| field.to_lowercase().contains(&query))
    }

    fn matches_facets(&self, listing: &DirectoryListing) -> bool {
        if !self.service_types.is_empty() && !self.service_types.contains(&listing.service_type) {
            return false;
        }
        if !self.locations.is_empty() && !self.locations.contains(&listing.location) {
            return false;
        }
        if !self.specialties.is_empty()
            && !listing
                .specialties
                .iter()
                .any(|s| self.specialties.contains(s))
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, listings: &'a [DirectoryListing]) -> Vec<&'a DirectoryListing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }

    /// Facets with at least one selection, for the "active filters" badge.
    pub fn active_facets(&self) -> usize {
        [
            !self.service_types.is_empty(),
            !self.locations.is_empty(),
            !self.specialties.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Sorted, deduplicated values of one field across the catalog; feeds the
/// facet controls.
pub fn unique_values<F>(listings: &[DirectoryListing], field: F) -> Vec<String>
where
    F: Fn(&DirectoryListing) -> Vec<String>,
{
    let mut values: Vec<String> = listings
        .iter()
        .flat_map(field)
        .filter(|v| !v.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

pub fn unique_locations(listings: &[DirectoryListing]) -> Vec<String> {
    unique_values(listings, |l| vec![l.location.clone()])
}

pub fn unique_service_types(listings: &[DirectoryListing]) -> Vec<String> {
    unique_values(listings, |l| vec![l.service_type.clone()])
}

pub fn unique_specialties(listings: &[DirectoryListing]) -> Vec<String> {
    unique_values(listings, |l| l.specialties.clone())
}

pub fn service_type_label(slug: &str) -> &str {
    match slug {
        "solar-design" => "Solar Design",
        "installation" => "Installation",
        "electrical-work" => "Electrical Work",
        "maintenance" => "Maintenance",
        "quality-assurance" => "Quality Assurance",
        "inspection-commissioning" => "Inspection & Commissioning",
        "ic-team" => "I&C Team",
        "tools" => "Tools",
        other => other,
    }
}

pub fn experience_label(slug: &str) -> &str {
    match slug {
        "0-2" => "0-2 Years",
        "2-3" => "2-3 Years",
        "3-5" => "3-5 Years",
        "5-10" => "5-10 Years",
        "10+" => "10+ Years",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::catalog::sample_listings;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_filter_returns_everything() {
        let listings = sample_listings();
        let filter = DirectoryFilter::default();
        assert_eq!(filter.apply(&listings).len(), listings.len());
        assert_eq!(filter.active_facets(), 0);
    }

    #[test]
    fn query_searches_location_and_specialties_case_insensitively() {
        let listings = sample_listings();
        let filter = DirectoryFilter {
            query: "phoenix".to_string(),
            ..Default::default()
        };

        let hits = filter.apply(&listings);
        assert!(!hits.is_empty());
        for hit in &hits {
            let in_location = hit.location.to_lowercase().contains("phoenix");
            let in_specialties = hit
                .specialties
                .iter()
                .any(|s| s.to_lowercase().contains("phoenix"));
            assert!(in_location || in_specialties || hit.name.to_lowercase().contains("phoenix"));
        }
        // both the Phoenix service company and the Phoenix engineer
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn query_matches_names_and_companies() {
        let listings = sample_listings();
        let filter = DirectoryFilter {
            query: "SunTech".to_string(),
            ..Default::default()
        };
        let hits = filter.apply(&listings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "SunTech Designs");
    }

    #[test]
    fn facets_and_across_or_within() {
        let listings = sample_listings();

        // location AND specialty: only the Austin SCADA engineer survives
        let filter = DirectoryFilter {
            locations: set(&["Austin, TX"]),
            specialties: set(&["SCADA"]),
            ..Default::default()
        };
        let hits = filter.apply(&listings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ava Thompson");
        assert_eq!(filter.active_facets(), 2);

        // two locations OR together within the facet
        let filter = DirectoryFilter {
            locations: set(&["Austin, TX", "Denver, CO"]),
            ..Default::default()
        };
        assert_eq!(filter.apply(&listings).len(), 2);
    }

    #[test]
    fn specialty_facet_matches_exact_values_only() {
        let listings = sample_listings();
        let filter = DirectoryFilter {
            specialties: set(&["SCADA"]),
            ..Default::default()
        };
        // "SCADA Systems" is a different specialty string and must not match
        let hits = filter.apply(&listings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location, "Austin, TX");
    }

    #[test]
    fn query_and_facets_combine() {
        let listings = sample_listings();
        let filter = DirectoryFilter {
            query: "pvsyst".to_string(),
            locations: set(&["Phoenix, AZ"]),
            ..Default::default()
        };
        let hits = filter.apply(&listings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Priya Sharma");
    }

    #[test]
    fn unique_facet_values_are_sorted_and_deduplicated() {
        let listings = sample_listings();

        let locations = unique_locations(&listings);
        let mut sorted = locations.clone();
        sorted.sort();
        assert_eq!(locations, sorted);
        // two San Diego listings collapse to one facet value
        assert_eq!(
            locations.iter().filter(|l| *l == "San Diego, CA").count(),
            1
        );

        let specialties = unique_specialties(&listings);
        assert!(specialties.contains(&"SCADA".to_string()));
        assert!(specialties.contains(&"SCADA Systems".to_string()));

        let service_types = unique_service_types(&listings);
        // two electrical-work engineers collapse to one facet value
        assert_eq!(
            service_types.iter().filter(|t| *t == "electrical-work").count(),
            1
        );
    }

    #[test]
    fn labels_fall_back_to_the_slug() {
        assert_eq!(service_type_label("solar-design"), "Solar Design");
        assert_eq!(service_type_label("ic-team"), "I&C Team");
        assert_eq!(service_type_label("something-new"), "something-new");
        assert_eq!(experience_label("10+"), "10+ Years");
        assert_eq!(experience_label("veteran"), "veteran");
    }

    #[test]
    fn listing_from_profile_carries_contact_fields() {
        let profile = EngineerProfile {
            id: "p-9".to_string(),
            first_name: "Gauhar".to_string(),
            last_name: "Alam".to_string(),
            email: "gauhar@example.com".to_string(),
            phone: Some("+918409153351".to_string()),
            company: Some("Tech Solutions Inc.".to_string()),
            service_type: Some("solar-design".to_string()),
            experience: Some("0-2".to_string()),
            location: Some("Mumbai".to_string()),
            specialties: vec!["Solar Design".to_string(), "AutoCAD".to_string()],
            terms_agreed: true,
            marketing_opt_in: false,
            avatar_url: None,
            bio: None,
            certifications: Vec::new(),
            hourly_rate: None,
            rating: 4.8,
            total_projects: 15,
            availability: Availability::Available,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let listing = DirectoryListing::from_profile(&profile);
        assert_eq!(listing.name, "Gauhar Alam");
        assert_eq!(listing.service_type, "solar-design");
        assert_eq!(listing.location, "Mumbai");
        assert_eq!(listing.email.as_deref(), Some("gauhar@example.com"));

        let filter = DirectoryFilter {
            query: "autocad".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&listing));
    }
}
