//! Plain-text rendering of the board and notices

use std::fmt::Write;

use tb_core::kanban::BoardState;
use tb_core::notice::{Notice, NoticeLevel};
use tb_core::route::{nav_links, NavLink};
use tb_core::session::SessionState;
use tb_core::task::{Task, TaskStatus};

const EMPTY_BOARD: &str = "No tasks yet! Start adding some.";

fn task_line(out: &mut String, task: &Task) {
    let mark = if task.status == TaskStatus::Done { "x" } else { " " };
    let _ = write!(out, "  [{}] {}  {}", mark, task.id, task.title);
    if !task.assigned_to.is_empty() {
        let _ = write!(out, "  (@{})", task.assigned_to);
    }
    out.push('\n');
    if !task.description.is_empty() {
        let _ = writeln!(out, "        {}", task.description);
    }
}

/// Three columns, top to bottom
pub fn board(state: &BoardState) -> String {
    if state.is_empty() {
        return format!("{}\n", EMPTY_BOARD);
    }
    let mut out = String::new();
    for column in state.columns() {
        let tasks = state.column(column.id);
        let _ = writeln!(out, "{} ({})", column.title, tasks.len());
        for task in tasks {
            task_line(&mut out, task);
        }
        out.push('\n');
    }
    out
}

/// One list in server order
pub fn flat(state: &BoardState) -> String {
    if state.is_empty() {
        return format!("{}\n", EMPTY_BOARD);
    }
    let mut out = String::new();
    for task in state.flat() {
        task_line(&mut out, task);
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("ok: {}", notice.message),
        NoticeLevel::Error => format!("error: {}", notice.message),
    }
}

pub fn session(state: &SessionState) -> String {
    let mut out = String::new();
    let status = if state.is_authenticated() {
        "logged in"
    } else {
        "logged out"
    };
    let _ = writeln!(out, "Session: {}", status);
    let links: Vec<String> = nav_links(state)
        .into_iter()
        .map(|link| match link {
            NavLink::Go { label, route } => format!("{} {}", label, route),
            NavLink::Logout => "Logout".to_string(),
        })
        .collect();
    let _ = writeln!(out, "Navigation: {}", links.join(" | "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        assert_eq!(board(&BoardState::new()), "No tasks yet! Start adding some.\n");
    }

    #[test]
    fn test_board_groups_by_column() {
        let state = BoardState::from_tasks(vec![
            Task::new("a1", "Write report")
                .with_description("Q3 summary")
                .with_assignee("Alex"),
            Task::new("b2", "Ship it").with_status(TaskStatus::Done),
        ]);
        let text = board(&state);

        let todo = text.find("To Do (1)").unwrap();
        let done = text.find("Done (1)").unwrap();
        assert!(todo < text.find("a1  Write report  (@Alex)").unwrap());
        assert!(text.contains("In Progress (0)"));
        assert!(done < text.find("[x] b2  Ship it").unwrap());
        assert!(text.contains("Q3 summary"));
    }

    #[test]
    fn test_session_lists_links() {
        let text = session(&SessionState::Anonymous);
        assert!(text.contains("logged out"));
        assert!(text.contains("Login /login"));
        assert!(!text.contains("Logout"));
    }
}
