use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::db::CourseRepository;
use crate::error::AppError;
use crate::models::{Course, CourseId, CourseQuery, NamedRef, SeatMap};
use crate::services::seed;

/// Backend contract consumed by the course table.
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn fetch_courses(&self, query: CourseQuery) -> Result<Vec<Course>, AppError>;
    async fn fetch_companies(&self) -> Result<Vec<NamedRef>, AppError>;
    async fn fetch_job_roles(&self) -> Result<Vec<NamedRef>, AppError>;
    async fn fetch_linked_job_roles(&self, course_id: CourseId) -> Result<Vec<NamedRef>, AppError>;
    /// Permanent removal, unlike `archive_courses`.
    async fn delete_course(&self, id: CourseId) -> Result<(), AppError>;
    async fn archive_courses(&self, ids: &[CourseId]) -> Result<(), AppError>;
    async fn restore_courses(&self, ids: &[CourseId]) -> Result<(), AppError>;
    async fn duplicate_course(&self, id: CourseId) -> Result<(), AppError>;
    async fn remove_course_from_job_role(
        &self,
        course_id: CourseId,
        job_role_id: i64,
    ) -> Result<(), AppError>;
    async fn assign_to_companies(&self, course_id: CourseId, seats: &SeatMap) -> Result<(), AppError>;
    async fn assign_to_job_roles(&self, course_id: CourseId, job_role_ids: &[i64]) -> Result<(), AppError>;
}

/// Simulated round-trip time per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub fetch_courses: Duration,
    pub fetch_reference: Duration,
    pub fetch_linked: Duration,
    pub mutate: Duration,
    pub duplicate: Duration,
    pub unlink: Duration,
    pub assign: Duration,
}

impl MockLatency {
    pub fn realistic() -> Self {
        Self {
            fetch_courses: Duration::from_millis(600),
            fetch_reference: Duration::from_millis(300),
            fetch_linked: Duration::from_millis(400),
            mutate: Duration::from_millis(500),
            duplicate: Duration::from_millis(800),
            unlink: Duration::from_millis(300),
            assign: Duration::from_millis(600),
        }
    }

    pub fn none() -> Self {
        Self {
            fetch_courses: Duration::ZERO,
            fetch_reference: Duration::ZERO,
            fetch_linked: Duration::ZERO,
            mutate: Duration::ZERO,
            duplicate: Duration::ZERO,
            unlink: Duration::ZERO,
            assign: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self::realistic()
    }
}

/// In-process stand-in for the course backend.
pub struct MockCourseService {
    repo: Arc<dyn CourseRepository>,
    latency: MockLatency,
    companies: Vec<NamedRef>,
    job_roles: Vec<NamedRef>,
    job_role_links: Mutex<BTreeMap<CourseId, BTreeSet<i64>>>,
    seat_assignments: Mutex<BTreeMap<CourseId, SeatMap>>,
}

impl MockCourseService {
    pub fn new(repo: Arc<dyn CourseRepository>, latency: MockLatency) -> Self {
        Self {
            repo,
            latency,
            companies: seed::companies(),
            job_roles: seed::job_roles(),
            job_role_links: Mutex::new(BTreeMap::new()),
            seat_assignments: Mutex::new(BTreeMap::new()),
        }
    }

    /// Links every even course id of the repository to the first two job roles.
    pub async fn with_seeded_links(self) -> Result<Self, AppError> {
        let courses = self.repo.list().await?;
        {
            let mut links = self.job_role_links.lock().await;
            for course in courses.iter().filter(|c| c.id.0 % 2 == 0) {
                links.insert(course.id, seed::DEFAULT_LINKED_ROLES.iter().copied().collect());
            }
        }
        Ok(self)
    }

    /// Seats last assigned to `course_id`.
    pub async fn seats_for(&self, course_id: CourseId) -> Option<SeatMap> {
        self.seat_assignments.lock().await.get(&course_id).cloned()
    }

    async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    async fn set_deleted_at(
        &self,
        ids: &[CourseId],
        deleted_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<usize, AppError> {
        let mut changed = 0;
        for course in self.repo.list().await? {
            if !ids.contains(&course.id) {
                continue;
            }
            let updated = Course {
                deleted_at,
                ..course
            };
            if self.repo.update(&updated).await? {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl CourseService for MockCourseService {
    async fn fetch_courses(&self, query: CourseQuery) -> Result<Vec<Course>, AppError> {
        self.delay(self.latency.fetch_courses).await;
        let courses: Vec<Course> = self
            .repo
            .list()
            .await?
            .into_iter()
            .filter(|c| query.matches(c))
            .collect();
        debug!("fetched {} courses ({:?})", courses.len(), query);
        Ok(courses)
    }

    async fn fetch_companies(&self) -> Result<Vec<NamedRef>, AppError> {
        self.delay(self.latency.fetch_reference).await;
        Ok(self.companies.clone())
    }

    async fn fetch_job_roles(&self) -> Result<Vec<NamedRef>, AppError> {
        self.delay(self.latency.fetch_reference).await;
        Ok(self.job_roles.clone())
    }

    async fn fetch_linked_job_roles(&self, course_id: CourseId) -> Result<Vec<NamedRef>, AppError> {
        self.delay(self.latency.fetch_linked).await;
        let links = self.job_role_links.lock().await;
        let Some(role_ids) = links.get(&course_id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .job_roles
            .iter()
            .filter(|role| role_ids.contains(&role.id))
            .cloned()
            .collect())
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), AppError> {
        self.delay(self.latency.mutate).await;
        if self.repo.delete(id).await? {
            self.job_role_links.lock().await.remove(&id);
            self.seat_assignments.lock().await.remove(&id);
            info!("deleted course {}", id);
        } else {
            debug!("delete of course {} skipped, already absent", id);
        }
        Ok(())
    }

    async fn archive_courses(&self, ids: &[CourseId]) -> Result<(), AppError> {
        self.delay(self.latency.mutate).await;
        let changed = self.set_deleted_at(ids, Some(Utc::now())).await?;
        info!("archived {} of {} courses", changed, ids.len());
        Ok(())
    }

    async fn restore_courses(&self, ids: &[CourseId]) -> Result<(), AppError> {
        self.delay(self.latency.mutate).await;
        let changed = self.set_deleted_at(ids, None).await?;
        info!("restored {} of {} courses", changed, ids.len());
        Ok(())
    }

    async fn duplicate_course(&self, id: CourseId) -> Result<(), AppError> {
        self.delay(self.latency.duplicate).await;
        let Some(original) = self.repo.get(id).await? else {
            debug!("duplicate of course {} skipped, not found", id);
            return Ok(());
        };
        let mut copy = original.to_new();
        copy.name = format!("Copy of {}", original.name);
        copy.updated_at = Some(Utc::now());
        let created = self.repo.insert(copy).await?;
        info!("duplicated course {} as {}", id, created.id);
        Ok(())
    }

    async fn remove_course_from_job_role(
        &self,
        course_id: CourseId,
        job_role_id: i64,
    ) -> Result<(), AppError> {
        self.delay(self.latency.unlink).await;
        if let Some(role_ids) = self.job_role_links.lock().await.get_mut(&course_id) {
            role_ids.remove(&job_role_id);
        }
        info!("unlinked course {} from job role {}", course_id, job_role_id);
        Ok(())
    }

    async fn assign_to_companies(&self, course_id: CourseId, seats: &SeatMap) -> Result<(), AppError> {
        self.delay(self.latency.assign).await;
        info!("assigned course {} to companies: {:?}", course_id, seats);
        self.seat_assignments
            .lock()
            .await
            .insert(course_id, seats.clone());
        Ok(())
    }

    async fn assign_to_job_roles(&self, course_id: CourseId, job_role_ids: &[i64]) -> Result<(), AppError> {
        self.delay(self.latency.assign).await;
        info!("assigned course {} to job roles: {:?}", course_id, job_role_ids);
        self.job_role_links
            .lock()
            .await
            .entry(course_id)
            .or_default()
            .extend(job_role_ids.iter().copied());
        Ok(())
    }
}
