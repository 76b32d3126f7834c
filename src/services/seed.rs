use chrono::{DateTime, Duration, Utc};

use crate::models::{Course, CourseId, NamedRef};

/// Roles linked to even course ids in a fresh mock service.
pub const DEFAULT_LINKED_ROLES: [i64; 2] = [1, 2];

pub fn companies() -> Vec<NamedRef> {
    vec![
        NamedRef::new(1, "ISO Safety"),
        NamedRef::new(2, "ASHR Construction"),
        NamedRef::new(3, "Mond Corp."),
        NamedRef::new(4, "Safety Culture"),
        NamedRef::new(5, "Acme Brick"),
    ]
}

pub fn job_roles() -> Vec<NamedRef> {
    vec![
        NamedRef::new(1, "Safety Officer"),
        NamedRef::new(2, "Site Manager"),
        NamedRef::new(3, "Forklift Operator"),
        NamedRef::new(4, "General Laborer"),
    ]
}

struct SeedRow {
    name: &'static str,
    price: Option<f64>,
    units: u32,
    companies: &'static [&'static str],
    age_days: i64,
    archived: bool,
    description: &'static str,
    validity: (Option<u32>, Option<u32>),
}

const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        name: "Working at Heights",
        price: None,
        units: 6,
        companies: &["ISO Safety", "ASHR Construction"],
        age_days: 0,
        archived: false,
        description: "Fall protection, harness inspection and rescue planning.",
        validity: (Some(365), Some(730)),
    },
    SeedRow {
        name: "Forklift Operation Basics",
        price: Some(149.0),
        units: 10,
        companies: &["Acme Brick"],
        age_days: 1,
        archived: false,
        description: "Pre-start checks, load charts and safe travel.",
        validity: (Some(180), Some(1095)),
    },
    SeedRow {
        name: "Fire Warden Training",
        price: None,
        units: 4,
        companies: &[],
        age_days: 3,
        archived: false,
        description: "Evacuation roles and extinguisher selection.",
        validity: (None, Some(365)),
    },
    SeedRow {
        name: "First Aid Refresher",
        price: Some(89.5),
        units: 3,
        companies: &["Mond Corp.", "Safety Culture", "ISO Safety"],
        age_days: 12,
        archived: false,
        description: "CPR and first response update.",
        validity: (Some(90), Some(365)),
    },
    SeedRow {
        name: "Manual Handling",
        price: None,
        units: 2,
        companies: &["ASHR Construction"],
        age_days: 45,
        archived: false,
        description: "Lifting technique and risk assessment.",
        validity: (None, None),
    },
    SeedRow {
        name: "Confined Space Entry",
        price: Some(220.0),
        units: 12,
        companies: &["ISO Safety"],
        age_days: 8,
        archived: false,
        description: "Permits, atmospheric testing and standby duties.",
        validity: (Some(365), Some(365)),
    },
    SeedRow {
        name: "Legacy Induction 2019",
        price: None,
        units: 5,
        companies: &[],
        age_days: 400,
        archived: true,
        description: "Superseded site induction.",
        validity: (None, None),
    },
];

/// Demo catalogue with modification times spread around `now`.
pub fn seed_courses(now: DateTime<Utc>) -> Vec<Course> {
    SEED_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let updated_at = now - Duration::days(row.age_days);
            Course {
                id: CourseId(i as i64 + 1),
                name: row.name.to_string(),
                is_paid: row.price.is_some(),
                price: row.price,
                total_units: row.units,
                company_count: row.companies.len() as u32,
                assigned_companies: if row.companies.is_empty() {
                    "None".to_string()
                } else {
                    row.companies.join(", ")
                },
                updated_at: Some(updated_at),
                deleted_at: row.archived.then_some(updated_at),
                description: Some(row.description.to_string()),
                enrollment_validity_days: row.validity.0,
                completion_validity_days: row.validity.1,
            }
        })
        .collect()
}
