use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use super::domain::TenderSubmission;

const CATEGORIES: [&str; 5] = [
    "IT Services",
    "Construction",
    "Medical Equipment",
    "Office Supplies",
    "Consulting",
];

const ORGANIZATIONS: [&str; 5] = [
    "Ministry of Health",
    "Public Works Department",
    "Railways",
    "Defense",
    "Education Department",
];

const LOCATIONS: [&str; 6] = [
    "New Delhi",
    "Mumbai",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
];

pub const SAMPLE_CATALOG_SIZE: usize = 20;

/// Deterministic stand-in for a portal import, anchored at `now`.
pub fn sample_catalog(now: DateTime<Utc>) -> Vec<TenderSubmission> {
    (0..SAMPLE_CATALOG_SIZE)
        .map(|index| sample_tender(index, now))
        .collect()
}

fn sample_tender(index: usize, now: DateTime<Utc>) -> TenderSubmission {
    let category = CATEGORIES[index % CATEGORIES.len()];
    let organization = ORGANIZATIONS[(index * 3 + 1) % ORGANIZATIONS.len()];
    let location = LOCATIONS[(index * 5 + 2) % LOCATIONS.len()];

    // Spread values across four orders of magnitude and deadlines across 10..60 days.
    let estimated_value = 500_000.0 + (index as f64 * 2_473_000.0) % 49_500_000.0;
    let emd_amount = (estimated_value * (0.01 + (index % 4) as f64 * 0.005)).round();
    let published_days_ago = 1 + (index as i64 * 7) % 30;
    let deadline_days_ahead = 10 + (index as i64 * 11) % 51;

    let mut technical_specs = BTreeMap::new();
    technical_specs.insert(
        "compliance".to_string(),
        Value::String("ISO certified".to_string()),
    );
    technical_specs.insert("warranty".to_string(), Value::String("2 years".to_string()));

    TenderSubmission {
        tender_id: format!("GEM/2025/B/{:06}", 410_000 + index * 37),
        title: format!("Supply and Installation of {category}"),
        organization: organization.to_string(),
        description: "Tender for procurement and installation services as per government norms."
            .to_string(),
        estimated_value,
        emd_amount,
        category: category.to_string(),
        location: location.to_string(),
        published_date: now - Duration::days(published_days_ago),
        submission_deadline: now + Duration::days(deadline_days_ahead),
        status: "active".to_string(),
        source: "GeM".to_string(),
        eligibility_criteria: vec![
            "Registered company with GST".to_string(),
            "Minimum 3 years experience".to_string(),
            "Valid PAN and Aadhaar".to_string(),
        ],
        technical_specs,
    }
}
