use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courselist::Config;
use courselist::db::{CourseRepository, InMemoryCourseRepository, SqliteCourseRepository};
use courselist::services::{CoursesTable, MockCourseService, TracingNotifier, seed};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "courselist=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new_from_env()?;

    let repo: Arc<dyn CourseRepository> = match &config.database_url {
        Some(url) => {
            let repo = SqliteCourseRepository::connect(url).await?;
            repo.migrate().await?;
            if repo.list().await?.is_empty() {
                for course in seed::seed_courses(Utc::now()) {
                    repo.insert(course.to_new()).await?;
                }
                info!("seeded {}", url);
            }
            Arc::new(repo)
        }
        None => Arc::new(InMemoryCourseRepository::with_courses(seed::seed_courses(
            Utc::now(),
        ))),
    };

    let service = MockCourseService::new(repo, config.latency)
        .with_seeded_links()
        .await?;
    let table = CoursesTable::new(
        Arc::new(service),
        Arc::new(TracingNotifier),
        config.table_options(),
    );

    table.mount().await;
    let snapshot = table.view();
    if let Some(error) = &snapshot.state.error {
        return Err(error.clone().into());
    }

    let page = snapshot.page();
    info!(
        "page {} of {} ({} courses)",
        page.page_index + 1,
        page.page_count,
        page.total_rows
    );
    println!("{}", serde_json::to_string_pretty(&page)?);

    table.unmount();
    Ok(())
}
