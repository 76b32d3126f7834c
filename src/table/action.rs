use std::fmt;

use crate::models::{
    ColumnFilters, Course, CourseFilters, NamedRef, PaginationState, RowSelection, SortingState,
};
use crate::table::state::{Dialog, DialogKind};

/// A new value for a piece of table state: either given outright or computed
/// from the previous value.
pub enum Update<T> {
    Set(T),
    With(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    pub fn with(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Update::With(Box::new(f))
    }

    pub fn apply(self, previous: &T) -> T {
        match self {
            Update::Set(value) => value,
            Update::With(f) => f(previous),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Set(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Update::With(_) => f.write_str("With(..)"),
        }
    }
}

#[derive(Debug)]
pub enum Action {
    FetchStart,
    FetchSuccess(Vec<Course>),
    FetchError(String),
    SetAuxData {
        companies: Vec<NamedRef>,
        job_roles: Vec<NamedRef>,
    },

    SetSorting(Update<SortingState>),
    SetPagination(Update<PaginationState>),
    SetRowSelection(Update<RowSelection>),
    SetColumnFilters(Update<ColumnFilters>),

    SetSearchQuery(String),
    SetGlobalFilter(String),
    SetFilters(CourseFilters),
    SetFilterOpen(bool),

    ActionStart,
    ActionSuccess,
    ActionError(String),

    OpenDialog(Dialog),
    CloseDialog(DialogKind),
    CloseDialogs,

    SetLinkedJobRoles(Vec<NamedRef>),
    SetLoadingJobRoles(bool),
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::FetchStart => "FETCH_START",
            Action::FetchSuccess(_) => "FETCH_SUCCESS",
            Action::FetchError(_) => "FETCH_ERROR",
            Action::SetAuxData { .. } => "SET_AUX_DATA",
            Action::SetSorting(_) => "SET_SORTING",
            Action::SetPagination(_) => "SET_PAGINATION",
            Action::SetRowSelection(_) => "SET_ROW_SELECTION",
            Action::SetColumnFilters(_) => "SET_COLUMN_FILTERS",
            Action::SetSearchQuery(_) => "SET_SEARCH_QUERY",
            Action::SetGlobalFilter(_) => "SET_GLOBAL_FILTER",
            Action::SetFilters(_) => "SET_FILTERS",
            Action::SetFilterOpen(_) => "SET_FILTER_OPEN",
            Action::ActionStart => "ACTION_START",
            Action::ActionSuccess => "ACTION_SUCCESS",
            Action::ActionError(_) => "ACTION_ERROR",
            Action::OpenDialog(_) => "OPEN_DIALOG",
            Action::CloseDialog(_) => "CLOSE_DIALOG",
            Action::CloseDialogs => "CLOSE_DIALOGS",
            Action::SetLinkedJobRoles(_) => "SET_LINKED_JOB_ROLES",
            Action::SetLoadingJobRoles(_) => "SET_LOADING_JOB_ROLES",
        }
    }
}
