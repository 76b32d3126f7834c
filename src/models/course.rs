use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CourseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub is_paid: bool,
    /// Only meaningful when `is_paid` is set.
    pub price: Option<f64>,
    pub total_units: u32,
    pub company_count: u32,
    /// Comma-joined company names, or `"None"`.
    pub assigned_companies: String,
    pub updated_at: Option<DateTime<Utc>>,
    /// Set when the course is archived.
    pub deleted_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub enrollment_validity_days: Option<u32>,
    pub completion_validity_days: Option<u32>,
}

impl Course {
    pub fn is_archived(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_active(&self) -> bool {
        !self.is_archived()
    }

    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) if self.is_paid && price != 0.0 => format!("${:.2}", price),
            _ => "Free".to_string(),
        }
    }

    /// Everything but the id, for handing back to a repository.
    pub fn to_new(&self) -> NewCourse {
        NewCourse {
            name: self.name.clone(),
            is_paid: self.is_paid,
            price: self.price,
            total_units: self.total_units,
            company_count: self.company_count,
            assigned_companies: self.assigned_companies.clone(),
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            description: self.description.clone(),
            enrollment_validity_days: self.enrollment_validity_days,
            completion_validity_days: self.completion_validity_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub is_paid: bool,
    pub price: Option<f64>,
    pub total_units: u32,
    pub company_count: u32,
    pub assigned_companies: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub enrollment_validity_days: Option<u32>,
    pub completion_validity_days: Option<u32>,
}

impl NewCourse {
    pub fn with_id(self, id: CourseId) -> Course {
        Course {
            id,
            name: self.name,
            is_paid: self.is_paid,
            price: self.price,
            total_units: self.total_units,
            company_count: self.company_count,
            assigned_companies: self.assigned_companies,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            description: self.description,
            enrollment_validity_days: self.enrollment_validity_days,
            completion_validity_days: self.completion_validity_days,
        }
    }
}

/// Options accepted by `CourseService::fetch_courses`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseQuery {
    /// `None` lists paid and free courses alike.
    pub is_paid: Option<bool>,
    /// Archived courses instead of active ones.
    pub archived: bool,
}

impl CourseQuery {
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(is_paid) = self.is_paid {
            if course.is_paid != is_paid {
                return false;
            }
        }
        course.is_archived() == self.archived
    }
}
