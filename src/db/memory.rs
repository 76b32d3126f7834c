use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::repository::CourseRepository;
use crate::error::AppError;
use crate::models::{Course, CourseId, NewCourse};

/// Process-lifetime course store.
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
    next_id: AtomicI64,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::with_courses(Vec::new())
    }

    /// Starts from existing records; new ids continue after the largest one.
    pub fn with_courses(courses: Vec<Course>) -> Self {
        let next_id = courses.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        Self {
            courses: RwLock::new(courses),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.read().await.clone())
    }

    async fn get(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        Ok(self.courses.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, course: NewCourse) -> Result<Course, AppError> {
        let id = CourseId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let course = course.with_id(id);
        self.courses.write().await.push(course.clone());
        Ok(course)
    }

    async fn update(&self, course: &Course) -> Result<bool, AppError> {
        let mut courses = self.courses.write().await;
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => {
                *slot = course.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CourseId) -> Result<bool, AppError> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        Ok(courses.len() != before)
    }
}
