mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::course;
use courselist::db::{CourseRepository, SqliteCourseRepository};
use courselist::models::CourseId;
use courselist::services::{CourseService, MockCourseService, MockLatency};

async fn repository() -> SqliteCourseRepository {
    let repo = SqliteCourseRepository::connect("sqlite::memory:")
        .await
        .expect("Failed to open database");
    repo.migrate().await.expect("Failed to migrate");
    repo
}

#[tokio::test]
async fn insert_assigns_increasing_ids() {
    let repo = repository().await;

    let a = repo.insert(course(100, "A").to_new()).await.unwrap();
    let b = repo.insert(course(100, "B").to_new()).await.unwrap();

    assert_eq!(a.id, CourseId(1));
    assert_eq!(b.id, CourseId(2));
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn round_trips_every_field() {
    let repo = repository().await;
    let stamp = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
    let mut new = course(0, "Confined Space Entry").to_new();
    new.is_paid = true;
    new.price = Some(220.0);
    new.total_units = 12;
    new.company_count = 1;
    new.assigned_companies = "ISO Safety".into();
    new.updated_at = Some(stamp);
    new.deleted_at = Some(stamp);
    new.description = Some("Permits".into());
    new.enrollment_validity_days = Some(365);
    new.completion_validity_days = Some(30);

    let inserted = repo.insert(new).await.unwrap();
    let loaded = repo.get(inserted.id).await.unwrap().unwrap();

    assert_eq!(loaded, inserted);
    assert!(loaded.is_archived());
}

#[tokio::test]
async fn update_and_delete_report_missing_rows() {
    let repo = repository().await;
    let mut inserted = repo.insert(course(0, "A").to_new()).await.unwrap();

    inserted.name = "Renamed".into();
    assert!(repo.update(&inserted).await.unwrap());
    assert_eq!(repo.get(inserted.id).await.unwrap().unwrap().name, "Renamed");

    assert!(repo.delete(inserted.id).await.unwrap());
    assert!(!repo.delete(inserted.id).await.unwrap());
    assert!(!repo.update(&inserted).await.unwrap());
    assert_eq!(repo.get(inserted.id).await.unwrap(), None);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let repo = repository().await;
    repo.insert(course(0, "A").to_new()).await.unwrap();
    let b = repo.insert(course(0, "B").to_new()).await.unwrap();

    repo.delete(b.id).await.unwrap();
    let c = repo.insert(course(0, "C").to_new()).await.unwrap();

    assert!(c.id > b.id);
}

#[tokio::test]
async fn mock_service_runs_on_sqlite() {
    let repo = repository().await;
    repo.insert(course(0, "Fire Warden").to_new()).await.unwrap();
    let service = MockCourseService::new(Arc::new(repo.clone()), MockLatency::none());

    service.duplicate_course(CourseId(1)).await.unwrap();
    service.archive_courses(&[CourseId(1)]).await.unwrap();

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].is_archived());
    assert_eq!(all[1].name, "Copy of Fire Warden");
    assert!(all[1].is_active());
}
