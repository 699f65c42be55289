//! Typed client for the braindump hub, with the board, dashboard and
//! questionnaire state that sits on top of it.

pub mod api;
pub mod board;
pub mod dashboard;
pub mod journal;

pub use api::{ApiClient, CurrentUser};
pub use board::KanbanBoard;
pub use dashboard::QuestionDashboard;
pub use journal::JournalRun;
