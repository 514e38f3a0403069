use crate::client::directory::DirectoryListing;
use crate::models::Availability;

/// Listings the directory pages render before live data is wired in:
/// provider services on the find-services page, individual engineers on
/// the engineers page.
pub fn sample_listings() -> Vec<DirectoryListing> {
    vec![
        DirectoryListing {
            id: "svc-1".into(),
            name: "Arizona Solar Services".into(),
            company: None,
            email: None,
            service_type: "ic-team".into(),
            experience: None,
            location: "Phoenix, AZ".into(),
            specialties: strings(&["Utility Scale", "Commercial", "SCADA Systems"]),
            rating: 4.8,
            total_projects: 127,
            hourly_rate: None,
            availability: Availability::Available,
        },
        DirectoryListing {
            id: "svc-2".into(),
            name: "SunTech Designs".into(),
            company: None,
            email: None,
            service_type: "solar-design".into(),
            experience: None,
            location: "Los Angeles, CA".into(),
            specialties: strings(&["AutoCAD", "PVsyst", "Permit Drawings"]),
            rating: 4.9,
            total_projects: 89,
            hourly_rate: None,
            availability: Availability::Busy,
        },
        DirectoryListing {
            id: "svc-3".into(),
            name: "PowerTest Solutions".into(),
            company: None,
            email: None,
            service_type: "tools".into(),
            experience: None,
            location: "San Diego, CA".into(),
            specialties: strings(&["IV Curve Tracers", "Thermal Cameras", "Multimeters"]),
            rating: 4.7,
            total_projects: 203,
            hourly_rate: None,
            availability: Availability::Available,
        },
        DirectoryListing {
            id: "eng-1".into(),
            name: "Ava Thompson".into(),
            company: None,
            email: None,
            service_type: "inspection-commissioning".into(),
            experience: Some("10+".into()),
            location: "Austin, TX".into(),
            specialties: strings(&["Utility-Scale I&C", "SCADA", "Commissioning"]),
            rating: 4.9,
            total_projects: 120,
            hourly_rate: Some(85.0),
            availability: Availability::Available,
        },
        DirectoryListing {
            id: "eng-2".into(),
            name: "Miguel Santos".into(),
            company: None,
            email: None,
            service_type: "electrical-work".into(),
            experience: Some("5-10".into()),
            location: "San Diego, CA".into(),
            specialties: strings(&["Inverter Start-up", "Thermal Imaging", "Medium Voltage"]),
            rating: 4.8,
            total_projects: 98,
            hourly_rate: Some(92.0),
            availability: Availability::Busy,
        },
        DirectoryListing {
            id: "eng-3".into(),
            name: "Priya Sharma".into(),
            company: None,
            email: None,
            service_type: "solar-design".into(),
            experience: Some("10+".into()),
            location: "Phoenix, AZ".into(),
            specialties: strings(&["PV Design", "PVsyst", "Permit Drawings", "As-Builts"]),
            rating: 5.0,
            total_projects: 150,
            hourly_rate: Some(100.0),
            availability: Availability::Available,
        },
        DirectoryListing {
            id: "eng-4".into(),
            name: "Liam O'Connor".into(),
            company: None,
            email: None,
            service_type: "quality-assurance".into(),
            experience: Some("3-5".into()),
            location: "Denver, CO".into(),
            specialties: strings(&["QA/QC", "IV Curve Tracing", "String Commissioning"]),
            rating: 4.7,
            total_projects: 76,
            hourly_rate: Some(80.0),
            availability: Availability::Unavailable,
        },
        DirectoryListing {
            id: "eng-5".into(),
            name: "Sara Kim".into(),
            company: None,
            email: None,
            service_type: "electrical-work".into(),
            experience: Some("5-10".into()),
            location: "Los Angeles, CA".into(),
            specialties: strings(&["Protection Testing", "Relay Settings", "MV Switchgear"]),
            rating: 4.85,
            total_projects: 110,
            hourly_rate: Some(120.0),
            availability: Availability::Busy,
        },
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
