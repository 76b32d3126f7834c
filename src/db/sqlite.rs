use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use crate::db::repository::CourseRepository;
use crate::error::AppError;
use crate::models::{Course, CourseId, NewCourse};

const SELECT_COURSES: &str = r#"
    SELECT
        id, name, is_paid, price, total_units, company_count, assigned_companies,
        updated_at, deleted_at, description,
        enrollment_validity_days, completion_validity_days
    FROM courses
"#;

#[derive(Debug, FromRow)]
struct CourseRow {
    id: i64,
    name: String,
    is_paid: bool,
    price: Option<f64>,
    total_units: i64,
    company_count: i64,
    assigned_companies: String,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
    description: Option<String>,
    enrollment_validity_days: Option<i64>,
    completion_validity_days: Option<i64>,
}

impl TryFrom<CourseRow> for Course {
    type Error = AppError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Course {
            id: CourseId(row.id),
            name: row.name,
            is_paid: row.is_paid,
            price: row.price,
            total_units: non_negative(row.total_units, "total_units")?,
            company_count: non_negative(row.company_count, "company_count")?,
            assigned_companies: row.assigned_companies,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            description: row.description,
            enrollment_validity_days: row
                .enrollment_validity_days
                .map(|d| non_negative(d, "enrollment_validity_days"))
                .transpose()?,
            completion_validity_days: row
                .completion_validity_days
                .map(|d| non_negative(d, "completion_validity_days"))
                .transpose()?,
        })
    }
}

fn non_negative(value: i64, column: &str) -> Result<u32, AppError> {
    u32::try_from(value)
        .map_err(|_| AppError::BadRequest(format!("Column {} out of range: {}", column, value)))
}

/// Course store backed by SQLite. Ids come from `AUTOINCREMENT`, so they
/// are never reused.
#[derive(Clone)]
pub struct SqliteCourseRepository {
    pool: SqlitePool,
}

impl SqliteCourseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // every connection to an in-memory database gets its own database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("course migrations applied");
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, AppError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!("{} ORDER BY id", SELECT_COURSES))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Course::try_from).collect()
    }

    async fn get(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!("{} WHERE id = ?1", SELECT_COURSES))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Course::try_from).transpose()
    }

    async fn insert(&self, course: NewCourse) -> Result<Course, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO courses
                (name, is_paid, price, total_units, company_count, assigned_companies,
                updated_at, deleted_at, description,
                enrollment_validity_days, completion_validity_days)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&course.name)
        .bind(course.is_paid)
        .bind(course.price)
        .bind(i64::from(course.total_units))
        .bind(i64::from(course.company_count))
        .bind(&course.assigned_companies)
        .bind(course.updated_at)
        .bind(course.deleted_at)
        .bind(&course.description)
        .bind(course.enrollment_validity_days.map(i64::from))
        .bind(course.completion_validity_days.map(i64::from))
        .execute(&self.pool)
        .await?;

        Ok(course.with_id(CourseId(result.last_insert_rowid())))
    }

    async fn update(&self, course: &Course) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE courses SET
                name = ?2, is_paid = ?3, price = ?4, total_units = ?5, company_count = ?6,
                assigned_companies = ?7, updated_at = ?8, deleted_at = ?9, description = ?10,
                enrollment_validity_days = ?11, completion_validity_days = ?12
            WHERE id = ?1
            "#,
        )
        .bind(course.id.0)
        .bind(&course.name)
        .bind(course.is_paid)
        .bind(course.price)
        .bind(i64::from(course.total_units))
        .bind(i64::from(course.company_count))
        .bind(&course.assigned_companies)
        .bind(course.updated_at)
        .bind(course.deleted_at)
        .bind(&course.description)
        .bind(course.enrollment_validity_days.map(i64::from))
        .bind(course.completion_validity_days.map(i64::from))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CourseId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
