//! UI Components
//!
//! Pages and dialogs of the task app.

mod delete_confirm_button;
mod login_page;
mod new_task_dialog;
mod register_page;
mod status_view;
mod task_detail_dialog;
mod task_page;
mod task_row;

pub use delete_confirm_button::DeleteConfirmButton;
pub use login_page::LoginPage;
pub use new_task_dialog::NewTaskDialog;
pub use register_page::RegisterPage;
pub use status_view::{LoadingView, NotFound};
pub use task_detail_dialog::TaskDetailDialog;
pub use task_page::TaskPage;
pub use task_row::TaskRow;
