use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Course, CourseId, NewCourse};

/// Storage for course records. Implementations own id assignment: an id is
/// never handed out twice, even after the course holding it is deleted.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses in insertion order.
    async fn list(&self) -> Result<Vec<Course>, AppError>;

    async fn get(&self, id: CourseId) -> Result<Option<Course>, AppError>;

    async fn insert(&self, course: NewCourse) -> Result<Course, AppError>;

    /// Replaces the stored record with the same id. Returns `false` when no
    /// such record exists.
    async fn update(&self, course: &Course) -> Result<bool, AppError>;

    /// Removes the record permanently. Returns `false` when it was absent.
    async fn delete(&self, id: CourseId) -> Result<bool, AppError>;
}
