#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use courselist::models::{Course, CourseId};
use courselist::services::Notifier;

pub fn course(id: i64, name: &str) -> Course {
    Course {
        id: CourseId(id),
        name: name.to_string(),
        is_paid: false,
        price: None,
        total_units: 5,
        company_count: 0,
        assigned_companies: "None".to_string(),
        updated_at: None,
        deleted_at: None,
        description: None,
        enrollment_validity_days: None,
        completion_validity_days: None,
    }
}

pub fn course_with(id: i64, name: &str, units: u32, updated_at: Option<DateTime<Utc>>) -> Course {
    Course {
        total_units: units,
        updated_at,
        ..course(id, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Collects toasts so tests can assert on them.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter_map(|t| match t {
                Toast::Error(msg) => Some(msg),
                Toast::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter_map(|t| match t {
                Toast::Success(msg) => Some(msg),
                Toast::Error(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.toasts.lock().unwrap().push(Toast::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.toasts.lock().unwrap().push(Toast::Error(message.to_string()));
    }
}
