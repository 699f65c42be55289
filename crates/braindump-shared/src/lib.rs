//! Types and client-independent logic shared by the hub and its clients.

pub mod checklist;
pub mod export;
pub mod kanban;
pub mod ordering;
pub mod prompts;
pub mod questionnaire;
pub mod schemas;
