//! Checklist and ticket workflows built on [`Note`]
//!
//! These are the everyday operations run against a vault: resetting task
//! checkboxes, keeping a daily note's `pomodoros` property in sync with its
//! 🍅 lines, moving task reminders to the note's date, and closing tickets.

use crate::error::{NoteError, NoteResult};
use crate::lines::SearchOptions;
use crate::note::Note;
use crate::properties::scalar_to_string;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use quire_config::{DailyNotes, TaskProperties, TaskStates};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Checked, in-progress, cancelled, delegated or deferred task boxes
pub const CHECKED_TASK_PATTERN: &str = r"^(\s*-\s*)\[[px\-dc]\]";

/// Lines starting (after whitespace) with a tomato
pub const POMODORO_PATTERN: &str = r"^\s*🍅";

/// Property holding the pomodoro count
pub const POMODORO_PROPERTY: &str = "pomodoros";

/// Property holding a note's date
pub const DATE_PROPERTY: &str = "date";

/// Timestamp format for ticket end/update dates
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

static OPEN_TASK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*\[\s*\]\s+").expect("open task regex"));

static REMINDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(?P<date>\d{4}-\d{2}-\d{2})(?P<time>\s+\d{2}:\d{2})?").expect("reminder regex")
});

/// Reset every checked task box to `[ ]`; returns the rewritten lines
pub fn uncheck_all(note: &mut Note) -> NoteResult<Vec<String>> {
    let modified = note.replace_lines(CHECKED_TASK_PATTERN, "${1}[ ]")?;
    debug!(count = modified.len(), "Tasks unchecked");
    Ok(modified)
}

/// Checked task lines, without modifying anything
pub fn checked_tasks(note: &mut Note) -> NoteResult<Vec<String>> {
    note.find_lines(CHECKED_TASK_PATTERN, &SearchOptions::new())
}

/// Number of 🍅 lines in the body
pub fn count_pomodoros(note: &mut Note) -> NoteResult<usize> {
    Ok(note.find_lines(POMODORO_PATTERN, &SearchOptions::new())?.len())
}

/// Counted pomodoros against the recorded property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroStatus {
    /// 🍅 lines in the body
    pub counted: usize,
    /// Current `pomodoros` value, if it is a number
    pub recorded: Option<usize>,
}

impl PomodoroStatus {
    /// Whether the property already matches the count
    pub fn is_current(&self) -> bool {
        self.recorded == Some(self.counted)
    }
}

/// Compare the 🍅 count with the `pomodoros` property
pub fn pomodoro_status(note: &mut Note) -> NoteResult<PomodoroStatus> {
    let counted = count_pomodoros(note)?;
    let recorded = note
        .property(POMODORO_PROPERTY)?
        .and_then(scalar_to_string)
        .and_then(|value| value.trim().parse().ok());
    Ok(PomodoroStatus { counted, recorded })
}

/// Set `pomodoros` to the counted value when it differs
///
/// Returns the status seen before the update and whether the note changed.
/// A note without front matter is left alone.
pub fn sync_pomodoros(note: &mut Note) -> NoteResult<(PomodoroStatus, bool)> {
    let status = pomodoro_status(note)?;
    if status.is_current() {
        return Ok((status, false));
    }
    let changed = note.set_property(POMODORO_PROPERTY, &status.counted.to_string())?;
    Ok((status, changed))
}

/// Parse a note date: `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`
pub fn parse_note_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

/// The note's `date` property
pub fn note_date(note: &mut Note) -> NoteResult<NaiveDate> {
    let raw = note
        .property(DATE_PROPERTY)?
        .and_then(scalar_to_string)
        .ok_or_else(|| NoteError::validation("note does not have a 'date' property"))?;
    parse_note_date(&raw)
        .ok_or_else(|| NoteError::validation(format!("invalid date in note property: {raw}")))
}

/// Move open-task reminders (`@YYYY-MM-DD`, optionally with `HH:MM`) to the
/// note's date, keeping any time part
///
/// Returns how many reminders were rewritten.
pub fn sync_reminders(note: &mut Note) -> NoteResult<usize> {
    let date = note_date(note)?.format("%Y-%m-%d").to_string();
    let mut rewritten = 0;

    note.rewrite_lines(|line| {
        if !OPEN_TASK_REGEX.is_match(line) {
            return None;
        }
        let updated = REMINDER_REGEX.replace_all(line, |caps: &regex::Captures<'_>| {
            let time = caps.name("time").map_or("", |m| m.as_str());
            if &caps["date"] != date {
                rewritten += 1;
            }
            format!("@{date}{time}")
        });
        Some(updated.into_owned())
    })?;

    debug!(count = rewritten, date = %date, "Reminders synced");
    Ok(rewritten)
}

/// How a ticket is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    /// Work done; records an end date
    Resolved,
    /// Abandoned or no longer relevant
    Closed,
}

impl TicketAction {
    /// State value written for this action
    pub fn state<'a>(&self, states: &'a TaskStates) -> &'a str {
        match self {
            Self::Resolved => &states.resolved,
            Self::Closed => &states.closed,
        }
    }
}

impl fmt::Display for TicketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        })
    }
}

/// Mark a ticket as resolved or closed
///
/// Sets the state and update date (plus the end date when resolving) to
/// `now`, and drops the next step/date properties. Returns whether any edit
/// changed the note.
pub fn apply_ticket_action(
    note: &mut Note,
    action: TicketAction,
    properties: &TaskProperties,
    states: &TaskStates,
    now: NaiveDateTime,
) -> NoteResult<bool> {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

    let mut changed = note.set_property(&properties.state, action.state(states))?;
    if action == TicketAction::Resolved {
        changed |= note.set_property(&properties.end_date, &timestamp)?;
    }
    changed |= note.set_property(&properties.update, &timestamp)?;
    changed |= note.remove_property(&properties.next_step)?;
    changed |= note.remove_property(&properties.next_date)?;

    debug!(action = %action, changed, "Ticket action applied");
    Ok(changed)
}

/// Vault-relative reference of the daily note for `date`
pub fn daily_note_reference(date: NaiveDate, daily: &DailyNotes) -> String {
    let stem = format!("{}{}", date.format("%Y-%m-%d"), daily.suffix);
    let folder = daily.folder.trim_end_matches('/');
    if folder.is_empty() {
        stem
    } else {
        format!("{folder}/{stem}")
    }
}

/// The previous working day: Friday for Saturday, Sunday and Monday
pub fn last_business_day(today: NaiveDate) -> NaiveDate {
    let days_back = match today.weekday() {
        Weekday::Mon => 3,
        Weekday::Sun => 2,
        _ => 1,
    };
    today - chrono::Duration::days(days_back)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT).unwrap()
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_uncheck_all_keeps_indentation() {
        let mut note = Note::from_content(
            "---\ndone: [x]\n---\n- [x] a\n  - [p] b\n\t- [-] c\n- [ ] d\n- [d] e\n- [c] f\n- [?] g\n",
        );
        let modified = uncheck_all(&mut note).unwrap();

        assert_eq!(modified.len(), 5);
        assert_eq!(
            note.content().unwrap(),
            "---\ndone: [x]\n---\n- [ ] a\n  - [ ] b\n\t- [ ] c\n- [ ] d\n- [ ] e\n- [ ] f\n- [?] g\n"
        );
        assert!(checked_tasks(&mut note).unwrap().is_empty());
    }

    #[test]
    fn test_pomodoro_sync() {
        let mut note =
            Note::from_content("---\npomodoros: 1\n---\n🍅 one\n  🍅 two\nnot 🍅\n🍅 three\n");

        let status = pomodoro_status(&mut note).unwrap();
        assert_eq!(status, PomodoroStatus { counted: 3, recorded: Some(1) });
        assert!(!status.is_current());

        let (_, changed) = sync_pomodoros(&mut note).unwrap();
        assert!(changed);
        assert!(note.content().unwrap().starts_with("---\npomodoros: 3\n---\n"));

        let (status, changed) = sync_pomodoros(&mut note).unwrap();
        assert!(status.is_current());
        assert!(!changed);
    }

    #[test]
    fn test_pomodoro_string_value_and_missing_property() {
        let mut note = Note::from_content("---\npomodoros: \"2\"\n---\n🍅\n🍅\n");
        assert!(pomodoro_status(&mut note).unwrap().is_current());

        let mut note = Note::from_content("---\ntitle: day\n---\n🍅\n");
        let (status, changed) = sync_pomodoros(&mut note).unwrap();
        assert_eq!(status.recorded, None);
        assert!(changed);
        assert!(note.content().unwrap().contains("pomodoros: 1\n"));
    }

    #[test]
    fn test_parse_note_date() {
        assert_eq!(parse_note_date("2024-05-01"), Some(day("2024-05-01")));
        assert_eq!(parse_note_date("2024-05-01 09:30"), Some(day("2024-05-01")));
        assert_eq!(parse_note_date("May 1st"), None);
    }

    #[test]
    fn test_sync_reminders() {
        let mut note = Note::from_content(
            "---\ndate: 2024-05-03\n---\n\
             - [ ] call @2024-05-01 10:30 about it\n\
             - [ ] write @2024-05-02\n\
             - [x] done @2024-05-01\n\
             - [ ] already @2024-05-03\n\
             note @2024-05-01\n",
        );

        assert_eq!(sync_reminders(&mut note).unwrap(), 2);
        assert_eq!(
            note.body().unwrap(),
            "- [ ] call @2024-05-03 10:30 about it\n\
             - [ ] write @2024-05-03\n\
             - [x] done @2024-05-01\n\
             - [ ] already @2024-05-03\n\
             note @2024-05-01\n"
        );
        assert_eq!(sync_reminders(&mut note).unwrap(), 0);
    }

    #[test]
    fn test_sync_reminders_requires_date() {
        let mut note = Note::from_content("---\ntitle: x\n---\n- [ ] a @2024-05-01\n");
        assert!(matches!(
            sync_reminders(&mut note).unwrap_err(),
            NoteError::Validation(_)
        ));

        let mut note = Note::from_content("---\ndate: someday\n---\n");
        assert!(matches!(
            sync_reminders(&mut note).unwrap_err(),
            NoteError::Validation(_)
        ));
    }

    #[test]
    fn test_resolve_ticket() {
        let mut note = Note::from_content(
            "---\nestado: 🔄\nsiguiente_paso: llamar\nfecha_siguiente: 2024-05-02\n---\nDetalle\n",
        );
        let changed = apply_ticket_action(
            &mut note,
            TicketAction::Resolved,
            &TaskProperties::default(),
            &TaskStates::default(),
            at("2024-05-01 18:45"),
        )
        .unwrap();

        assert!(changed);
        assert_eq!(
            note.content().unwrap(),
            "---\nestado: ✔️\nfecha_realizacion: 2024-05-01 18:45\nactualizado: 2024-05-01 18:45\n---\nDetalle\n"
        );
    }

    #[test]
    fn test_close_ticket_is_idempotent() {
        let mut note = Note::from_content("---\nestado: 🔄\n---\n");
        let props = TaskProperties::default();
        let states = TaskStates::default();
        let now = at("2024-05-01 08:00");

        assert!(apply_ticket_action(&mut note, TicketAction::Closed, &props, &states, now).unwrap());
        assert!(!note.content().unwrap().contains("fecha_realizacion"));
        assert!(!apply_ticket_action(&mut note, TicketAction::Closed, &props, &states, now).unwrap());
    }

    #[test]
    fn test_daily_note_reference() {
        let daily = DailyNotes::default();
        assert_eq!(
            daily_note_reference(day("2024-05-01"), &daily),
            "CALENDARIO/NOTAS DIARIAS/2024-05-01 Notas diarias"
        );
        let flat = DailyNotes {
            folder: String::new(),
            suffix: String::new(),
        };
        assert_eq!(daily_note_reference(day("2024-05-01"), &flat), "2024-05-01");
    }

    #[test]
    fn test_last_business_day() {
        // 2024-05-06 is a Monday
        assert_eq!(last_business_day(day("2024-05-06")), day("2024-05-03"));
        assert_eq!(last_business_day(day("2024-05-05")), day("2024-05-03"));
        assert_eq!(last_business_day(day("2024-05-04")), day("2024-05-03"));
        assert_eq!(last_business_day(day("2024-05-08")), day("2024-05-07"));
    }
}
