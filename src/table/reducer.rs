use crate::models::RowSelection;
use crate::table::action::Action;
use crate::table::state::{CoursesTableState, Dialog};

/// Applies one action to the table state. Pure: no I/O, no clock.
pub fn reduce(state: CoursesTableState, action: Action) -> CoursesTableState {
    match action {
        Action::FetchStart => CoursesTableState {
            is_loading: true,
            error: None,
            ..state
        },
        Action::FetchSuccess(courses) => CoursesTableState {
            is_loading: false,
            courses,
            ..state
        },
        Action::FetchError(message) => CoursesTableState {
            is_loading: false,
            error: Some(message),
            ..state
        },
        Action::SetAuxData {
            companies,
            job_roles,
        } => CoursesTableState {
            all_companies: companies,
            all_job_roles: job_roles,
            ..state
        },

        Action::SetSorting(update) => CoursesTableState {
            sorting: update.apply(&state.sorting),
            ..state
        },
        Action::SetPagination(update) => CoursesTableState {
            pagination: update.apply(&state.pagination),
            ..state
        },
        Action::SetRowSelection(update) => CoursesTableState {
            row_selection: update.apply(&state.row_selection),
            ..state
        },
        Action::SetColumnFilters(update) => CoursesTableState {
            column_filters: update.apply(&state.column_filters),
            ..state
        },

        Action::SetSearchQuery(query) => CoursesTableState {
            search_query: query,
            ..state
        },
        Action::SetGlobalFilter(value) => CoursesTableState {
            global_filter: value,
            ..state
        },
        Action::SetFilters(filters) => CoursesTableState { filters, ..state },
        Action::SetFilterOpen(open) => CoursesTableState {
            is_filter_open: open,
            ..state
        },

        Action::ActionStart => CoursesTableState {
            is_processing: true,
            dialog_error: None,
            ..state
        },
        // any successful mutation ends whatever workflow was on screen
        Action::ActionSuccess => CoursesTableState {
            is_processing: false,
            dialog: Dialog::None,
            row_selection: RowSelection::new(),
            ..state
        },
        Action::ActionError(message) => CoursesTableState {
            is_processing: false,
            error: Some(message.clone()),
            dialog_error: Some(message),
            ..state
        },

        Action::OpenDialog(dialog) => {
            let loading_roles = matches!(dialog, Dialog::ShowJobRoles(_));
            CoursesTableState {
                linked_job_roles: if loading_roles {
                    Vec::new()
                } else {
                    state.linked_job_roles
                },
                is_loading_job_roles: loading_roles || state.is_loading_job_roles,
                dialog,
                dialog_error: None,
                ..state
            }
        }
        Action::CloseDialog(kind) => {
            if state.dialog.is(kind) {
                CoursesTableState {
                    dialog: Dialog::None,
                    ..state
                }
            } else {
                state
            }
        }
        Action::CloseDialogs => CoursesTableState {
            dialog: Dialog::None,
            is_processing: false,
            dialog_error: None,
            ..state
        },

        Action::SetLinkedJobRoles(roles) => CoursesTableState {
            linked_job_roles: roles,
            is_loading_job_roles: false,
            ..state
        },
        Action::SetLoadingJobRoles(loading) => CoursesTableState {
            is_loading_job_roles: loading,
            ..state
        },
    }
}
