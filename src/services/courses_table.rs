use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::{
    ColumnFilters, Course, CourseFilters, CourseId, CourseQuery, PaginationState, RowSelection,
    SeatMap, SortingState,
};
use crate::services::course_service::CourseService;
use crate::services::debounce::Debouncer;
use crate::services::notifier::Notifier;
use crate::table::{
    Action, CoursesTableState, Dialog, DialogKind, TablePage, Update, filter_courses, reduce,
};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Restricts the list to paid or free courses; `None` shows both.
    pub is_paid: Option<bool>,
    pub search_debounce: Duration,
    /// Shown until the first fetch returns.
    pub initial_courses: Vec<Course>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            is_paid: None,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            initial_courses: Vec::new(),
        }
    }
}

/// What the page renders: the reducer state with `courses` narrowed to the
/// filtered view.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub state: CoursesTableState,
    pub selected_count: usize,
}

impl TableSnapshot {
    pub fn page(&self) -> TablePage {
        TablePage::build(&self.state.courses, &self.state)
    }
}

/// Course list controller. Owns the table state, runs every side effect
/// against the course service and reports outcomes through the notifier.
///
/// Cloning yields another handle to the same table.
#[derive(Clone)]
pub struct CoursesTable {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<CoursesTableState>,
    service: Arc<dyn CourseService>,
    notifier: Arc<dyn Notifier>,
    is_paid: Mutex<Option<bool>>,
    search: Debouncer,
    fetch_generation: AtomicU64,
    job_roles_generation: AtomicU64,
    cancel: CancellationToken,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, CoursesTableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, action: Action) {
        if self.cancel.is_cancelled() {
            debug!("dropping {} after unmount", action.name());
            return;
        }
        debug!("dispatch {}", action.name());
        let mut state = self.lock_state();
        let previous = std::mem::take(&mut *state);
        *state = reduce(previous, action);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl CoursesTable {
    pub fn new(
        service: Arc<dyn CourseService>,
        notifier: Arc<dyn Notifier>,
        options: TableOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(CoursesTableState::new(options.initial_courses)),
                service,
                notifier,
                is_paid: Mutex::new(options.is_paid),
                search: Debouncer::new(options.search_debounce),
                fetch_generation: AtomicU64::new(0),
                job_roles_generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn dispatch(&self, action: Action) {
        self.inner.dispatch(action);
    }

    /// Raw reducer state, with the unfiltered course list.
    pub fn state(&self) -> CoursesTableState {
        self.inner.lock_state().clone()
    }

    pub fn view(&self) -> TableSnapshot {
        self.view_at(&Local::now())
    }

    pub fn view_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TableSnapshot {
        let mut state = self.state();
        state.courses = filter_courses(&state.courses, &state.search_query, &state.filters, now);
        let selected_count = state.row_selection.len();
        TableSnapshot {
            state,
            selected_count,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.read(|s| s.row_selection.len())
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.cancel.is_cancelled()
    }

    /// Stops the table: the pending search commit is dropped and no
    /// in-flight request may touch the state afterwards.
    pub fn unmount(&self) {
        info!("course table unmounted");
        self.inner.search.cancel();
        self.inner.cancel.cancel();
    }

    /// Initial load of courses together with the company and job-role lists.
    pub async fn mount(&self) {
        let generation = self.next_generation();
        self.dispatch(Action::FetchStart);

        let service = &self.inner.service;
        let query = self.course_query();
        let loaded = self
            .guard(async {
                tokio::try_join!(
                    service.fetch_courses(query),
                    service.fetch_companies(),
                    service.fetch_job_roles(),
                )
            })
            .await;
        let Some(loaded) = loaded else {
            return;
        };

        match loaded {
            Ok((courses, companies, job_roles)) => {
                if self.is_current(generation) {
                    info!("loaded {} courses", courses.len());
                    self.dispatch(Action::FetchSuccess(courses));
                } else {
                    debug!("initial course list superseded by a newer fetch");
                }
                self.dispatch(Action::SetAuxData {
                    companies,
                    job_roles,
                });
            }
            Err(e) if self.is_current(generation) => {
                warn!("initial load failed: {}", e);
                self.dispatch(Action::FetchError("Failed to load data".to_string()));
            }
            Err(e) => debug!("ignoring stale load failure: {}", e),
        }
    }

    /// Switches between paid and free listings and loads again.
    pub async fn set_paid(&self, is_paid: Option<bool>) {
        let changed = {
            let mut current = self.inner.is_paid.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != is_paid;
            *current = is_paid;
            changed
        };
        if changed {
            self.mount().await;
        }
    }

    /// Reloads the course list only.
    pub async fn fetch_courses(&self) {
        let generation = self.next_generation();
        let query = self.course_query();
        let Some(result) = self.guard(self.inner.service.fetch_courses(query)).await else {
            return;
        };
        if !self.is_current(generation) {
            debug!("dropping stale course list");
            return;
        }
        match result {
            Ok(courses) => self.dispatch(Action::FetchSuccess(courses)),
            Err(e) => {
                let message = e.user_message("Failed to fetch courses.");
                warn!("course refresh failed: {}", e);
                self.dispatch(Action::FetchError(message.clone()));
                self.inner.notifier.error(&message);
            }
        }
    }

    pub async fn refresh_data(&self) {
        self.fetch_courses().await;
    }

    /// Echoes the query at once and commits it as the global filter after
    /// the debounce window. A newer query replaces a pending one.
    pub fn handle_search(&self, query: impl Into<String>) {
        let query = query.into();
        self.dispatch(Action::SetSearchQuery(query.clone()));

        let inner = Arc::downgrade(&self.inner);
        self.inner.search.schedule(async move {
            if let Some(inner) = inner.upgrade() {
                debug!("committing search {:?}", query);
                inner.dispatch(Action::SetGlobalFilter(query));
            }
        });
    }

    pub fn set_global_filter(&self, value: impl Into<String>) {
        self.dispatch(Action::SetGlobalFilter(value.into()));
    }

    pub fn handle_filter_change(&self, filters: CourseFilters) {
        self.dispatch(Action::SetFilters(filters));
    }

    pub fn set_filter_open(&self, open: bool) {
        self.dispatch(Action::SetFilterOpen(open));
    }

    pub fn set_sorting(&self, update: impl Into<Update<SortingState>>) {
        self.dispatch(Action::SetSorting(update.into()));
    }

    pub fn set_pagination(&self, update: impl Into<Update<PaginationState>>) {
        self.dispatch(Action::SetPagination(update.into()));
    }

    pub fn set_row_selection(&self, update: impl Into<Update<RowSelection>>) {
        self.dispatch(Action::SetRowSelection(update.into()));
    }

    pub fn set_column_filters(&self, update: impl Into<Update<ColumnFilters>>) {
        self.dispatch(Action::SetColumnFilters(update.into()));
    }

    pub fn handle_open_add_dialog(&self) {
        self.dispatch(Action::OpenDialog(Dialog::Add));
    }

    pub fn handle_open_edit_dialog(&self, course: Course) {
        self.dispatch(Action::OpenDialog(Dialog::Edit(course)));
    }

    pub fn handle_open_delete_dialog(&self, course: Course) {
        self.dispatch(Action::OpenDialog(Dialog::Delete(course)));
    }

    pub fn handle_open_duplicate_dialog(&self, course: Course) {
        self.dispatch(Action::OpenDialog(Dialog::Duplicate(course)));
    }

    pub fn handle_open_archive_dialog(&self, course: Course) {
        self.dispatch(Action::OpenDialog(Dialog::Archive(course)));
    }

    pub fn handle_open_assign_dialog(&self, course: Course) {
        self.dispatch(Action::OpenDialog(Dialog::Assign(course)));
    }

    pub fn handle_bulk_archive(&self) {
        self.dispatch(Action::OpenDialog(Dialog::BulkArchive));
    }

    pub fn close_dialog(&self, kind: DialogKind) {
        self.dispatch(Action::CloseDialog(kind));
    }

    pub fn close_dialogs(&self) {
        self.dispatch(Action::CloseDialogs);
    }

    /// Opens the linked job roles dialog and loads its contents.
    pub async fn handle_open_show_job_roles_dialog(&self, course: Course) {
        let course_id = course.id;
        let load = self.inner.job_roles_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::OpenDialog(Dialog::ShowJobRoles(course)));

        let Some(result) = self
            .guard(self.inner.service.fetch_linked_job_roles(course_id))
            .await
        else {
            return;
        };
        let latest = self.inner.job_roles_generation.load(Ordering::SeqCst) == load;
        if !latest || !self.showing_job_roles_for(course_id) {
            debug!("job roles for course {} arrived after the dialog moved on", course_id);
            if latest {
                self.dispatch(Action::SetLoadingJobRoles(false));
            }
            return;
        }
        match result {
            Ok(roles) => self.dispatch(Action::SetLinkedJobRoles(roles)),
            Err(e) => {
                warn!("failed to load job roles for course {}: {}", course_id, e);
                self.inner.notifier.error("Failed to load job roles");
                self.dispatch(Action::SetLinkedJobRoles(Vec::new()));
            }
        }
    }

    /// Unlinks a job role from the course in the job roles dialog. The row
    /// disappears before the service confirms.
    pub async fn handle_remove_job_role(&self, job_role_id: i64) {
        let Some((course_id, remaining)) = self.read(|s| {
            let course = s.selected_course()?;
            let remaining = s
                .linked_job_roles
                .iter()
                .filter(|role| role.id != job_role_id)
                .cloned()
                .collect::<Vec<_>>();
            Some((course.id, remaining))
        }) else {
            return;
        };
        self.dispatch(Action::SetLinkedJobRoles(remaining));

        let call = self
            .inner
            .service
            .remove_course_from_job_role(course_id, job_role_id);
        match self.guard(call).await {
            None => {}
            Some(Ok(())) => {
                self.inner.notifier.success("Job role link removed.");
                self.fetch_courses().await;
            }
            Some(Err(e)) => {
                warn!("failed to unlink job role {} from course {}: {}", job_role_id, course_id, e);
                self.inner.notifier.error("An error occurred.");
            }
        }
    }

    pub async fn handle_delete(&self) {
        let Some(course) = self.dialog_course(DialogKind::Delete) else {
            return;
        };
        self.run_action(
            self.inner.service.delete_course(course.id),
            "Course deleted successfully.",
            "Delete failed",
        )
        .await;
    }

    pub async fn handle_duplicate_course(&self) {
        let Some(course) = self.dialog_course(DialogKind::Duplicate) else {
            return;
        };
        self.run_action(
            self.inner.service.duplicate_course(course.id),
            "Course duplicated successfully.",
            "Duplicate failed",
        )
        .await;
    }

    pub async fn handle_archive_course(&self) {
        let Some(course) = self.dialog_course(DialogKind::Archive) else {
            return;
        };
        let ids = [course.id];
        self.run_action(
            self.inner.service.archive_courses(&ids),
            "Course archived successfully.",
            "Archive failed",
        )
        .await;
    }

    /// Archives every checked course that is still in the filtered view.
    pub async fn on_bulk_archive_confirm(&self) {
        let ids = self.bulk_archive_targets();
        if ids.is_empty() {
            debug!("bulk archive confirmed with nothing selected");
            return;
        }
        self.run_action(
            self.inner.service.archive_courses(&ids),
            "Courses archived successfully.",
            "Bulk archive failed.",
        )
        .await;
    }

    pub async fn handle_assign_to_companies(&self, course_id: CourseId, seats: SeatMap) {
        self.run_action(
            self.inner.service.assign_to_companies(course_id, &seats),
            "Assigned to companies.",
            "Assignment failed",
        )
        .await;
    }

    pub async fn handle_assign_to_job_roles(&self, course_id: CourseId, job_role_ids: Vec<i64>) {
        self.run_action(
            self.inner.service.assign_to_job_roles(course_id, &job_role_ids),
            "Assigned to job roles.",
            "Assignment failed",
        )
        .await;
    }

    /// Ids the bulk archive would act on, in filtered-view order.
    pub fn bulk_archive_targets(&self) -> Vec<CourseId> {
        let snapshot = self.view();
        snapshot
            .state
            .row_selection
            .resolve(&snapshot.state.courses)
            .into_iter()
            .map(|course| course.id)
            .collect()
    }

    async fn run_action<F>(&self, call: F, success: &str, fallback: &str)
    where
        F: Future<Output = Result<(), AppError>>,
    {
        self.dispatch(Action::ActionStart);
        let Some(result) = self.guard(call).await else {
            return;
        };
        match result {
            Ok(()) => {
                self.inner.notifier.success(success);
                self.dispatch(Action::ActionSuccess);
                self.fetch_courses().await;
            }
            Err(e) => {
                let message = e.user_message(fallback);
                warn!("{}: {}", fallback, e);
                self.dispatch(Action::ActionError(message.clone()));
                self.inner.notifier.error(&message);
            }
        }
    }

    /// Resolves `fut` unless the table is unmounted first.
    async fn guard<T>(&self, fut: impl Future<Output = T>) -> Option<T> {
        tokio::select! {
            _ = self.inner.cancel.cancelled() => None,
            out = fut => Some(out),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&CoursesTableState) -> T) -> T {
        f(&*self.inner.lock_state())
    }

    fn dialog_course(&self, kind: DialogKind) -> Option<Course> {
        let course = self.read(|s| {
            s.dialog
                .is(kind)
                .then(|| s.selected_course().cloned())
                .flatten()
        });
        if course.is_none() {
            debug!("{:?} confirmed without a selected course", kind);
        }
        course
    }

    fn showing_job_roles_for(&self, course_id: CourseId) -> bool {
        self.read(|s| matches!(&s.dialog, Dialog::ShowJobRoles(c) if c.id == course_id))
    }

    fn course_query(&self) -> CourseQuery {
        CourseQuery {
            is_paid: *self.inner.is_paid.lock().unwrap_or_else(PoisonError::into_inner),
            archived: false,
        }
    }

    fn next_generation(&self) -> u64 {
        self.inner.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.fetch_generation.load(Ordering::SeqCst) == generation
    }
}
