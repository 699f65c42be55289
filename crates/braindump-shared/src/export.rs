//! Markdown export of a finished session.

use chrono::NaiveDateTime;

use crate::schemas::{QuestionMode, SessionAnswer};

fn mode_slug(mode: QuestionMode) -> &'static str {
    match mode {
        QuestionMode::Normal => "normal",
        QuestionMode::Crisis => "crise",
    }
}

/// `2026-01-02_23-24-21_dump_normal.md`
pub fn export_filename(mode: QuestionMode, at: NaiveDateTime) -> String {
    format!(
        "{}_dump_{}.md",
        at.format("%Y-%m-%d_%H-%M-%S"),
        mode_slug(mode)
    )
}

pub fn render_markdown(mode: QuestionMode, answers: &[SessionAnswer], at: NaiveDateTime) -> String {
    let (emoji, title) = match mode {
        QuestionMode::Normal => ("🌿", "NORMAL"),
        QuestionMode::Crisis => ("🆘", "CRISE"),
    };

    let mut out = format!("# {emoji} Brain Dump - {title}\n\n");
    out.push_str(&format!(
        "📅 **Date:** {}\n\n",
        at.format("%d/%m/%Y %H:%M:%S")
    ));

    for answer in answers.iter().filter(|a| !a.is_blank()) {
        out.push_str(&format!(
            "## {}\n**Q:** {}\n**R:** {}\n\n",
            answer.category, answer.question, answer.answer
        ));
    }
    out
}
