use serde::Serialize;

use crate::models::{
    Course, CourseFilters, ColumnFilters, NamedRef, PaginationState, RowSelection, SortingState,
    table::default_sorting,
};

/// The workflow dialog currently on screen. At most one can be open.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "course")]
pub enum Dialog {
    #[default]
    None,
    Add,
    Edit(Course),
    Delete(Course),
    Duplicate(Course),
    Archive(Course),
    BulkArchive,
    Assign(Course),
    ShowJobRoles(Course),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogKind {
    Add,
    Edit,
    Delete,
    Duplicate,
    Archive,
    BulkArchive,
    Assign,
    ShowJobRoles,
}

impl Dialog {
    pub fn kind(&self) -> Option<DialogKind> {
        match self {
            Dialog::None => None,
            Dialog::Add => Some(DialogKind::Add),
            Dialog::Edit(_) => Some(DialogKind::Edit),
            Dialog::Delete(_) => Some(DialogKind::Delete),
            Dialog::Duplicate(_) => Some(DialogKind::Duplicate),
            Dialog::Archive(_) => Some(DialogKind::Archive),
            Dialog::BulkArchive => Some(DialogKind::BulkArchive),
            Dialog::Assign(_) => Some(DialogKind::Assign),
            Dialog::ShowJobRoles(_) => Some(DialogKind::ShowJobRoles),
        }
    }

    pub fn is(&self, kind: DialogKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn course(&self) -> Option<&Course> {
        match self {
            Dialog::Edit(c)
            | Dialog::Delete(c)
            | Dialog::Duplicate(c)
            | Dialog::Archive(c)
            | Dialog::Assign(c)
            | Dialog::ShowJobRoles(c) => Some(c),
            Dialog::None | Dialog::Add | Dialog::BulkArchive => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursesTableState {
    pub courses: Vec<Course>,
    pub is_loading: bool,
    pub is_processing: bool,
    pub error: Option<String>,

    pub all_companies: Vec<NamedRef>,
    pub all_job_roles: Vec<NamedRef>,

    pub sorting: SortingState,
    pub pagination: PaginationState,
    pub row_selection: RowSelection,
    pub column_filters: ColumnFilters,

    pub search_query: String,
    pub global_filter: String,
    pub filters: CourseFilters,
    pub is_filter_open: bool,

    pub dialog: Dialog,
    pub dialog_error: Option<String>,

    pub linked_job_roles: Vec<NamedRef>,
    pub is_loading_job_roles: bool,
}

impl CoursesTableState {
    /// State before the first fetch has returned.
    pub fn new(initial_courses: Vec<Course>) -> Self {
        Self {
            courses: initial_courses,
            is_loading: true,
            is_processing: false,
            error: None,
            all_companies: Vec::new(),
            all_job_roles: Vec::new(),
            sorting: default_sorting(),
            pagination: PaginationState::default(),
            row_selection: RowSelection::new(),
            column_filters: Vec::new(),
            search_query: String::new(),
            global_filter: String::new(),
            filters: CourseFilters::default(),
            is_filter_open: false,
            dialog: Dialog::None,
            dialog_error: None,
            linked_job_roles: Vec::new(),
            is_loading_job_roles: false,
        }
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.dialog.course()
    }
}

impl Default for CoursesTableState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
