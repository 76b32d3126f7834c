use chrono::{DateTime, Days, Duration, TimeZone, Utc};

use crate::models::{Course, CourseFilters, LastModified};

/// Courses matching the search box and the filter panel.
///
/// Calendar days are taken in the time zone of `now`. Courses without a
/// modification time pass the date bucket.
pub fn filter_courses<Tz: TimeZone>(
    courses: &[Course],
    query: &str,
    filters: &CourseFilters,
    now: &DateTime<Tz>,
) -> Vec<Course> {
    let query = query.to_lowercase();
    courses
        .iter()
        .filter(|course| matches_course(course, &query, filters, now))
        .cloned()
        .collect()
}

fn matches_course<Tz: TimeZone>(
    course: &Course,
    query: &str,
    filters: &CourseFilters,
    now: &DateTime<Tz>,
) -> bool {
    if !query.is_empty() && !course.name.to_lowercase().contains(query) {
        return false;
    }
    if filters.min_units.is_some_and(|min| course.total_units < min) {
        return false;
    }
    if filters.max_units.is_some_and(|max| course.total_units > max) {
        return false;
    }
    match course.updated_at {
        Some(updated) => in_bucket(filters.last_modified, updated, now),
        None => true,
    }
}

/// Buckets are independent: `Last7Days` is a rolling window, not a superset
/// of the calendar-day buckets.
pub fn in_bucket<Tz: TimeZone>(bucket: LastModified, updated: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let updated = updated.with_timezone(&now.timezone());
    let today = now.date_naive();
    match bucket {
        LastModified::All => true,
        LastModified::Today => updated.date_naive() == today,
        LastModified::Yesterday => today.pred_opt() == Some(updated.date_naive()),
        LastModified::Last7Days => updated > days_before(now, 7),
        LastModified::Last30Days => updated > days_before(now, 30),
    }
}

/// `now` moved back `days` calendar days at the same wall-clock time, or by
/// elapsed days when that local time does not exist.
fn days_before<Tz: TimeZone>(now: &DateTime<Tz>, days: u64) -> DateTime<Tz> {
    now.clone()
        .checked_sub_days(Days::new(days))
        .unwrap_or_else(|| now.clone() - Duration::days(days as i64))
}
