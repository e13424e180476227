use chrono::NaiveDate;

use crate::models::Task;

/// Task categories in match-priority order. The first category with a
/// keyword hit wins, so "clean the meeting room" files under Home even
/// though "meeting" is a Work keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Home,
    Work,
    Bills,
    Studies,
    Shopping,
    Sport,
    Health,
    Transportation,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Home,
        Category::Work,
        Category::Bills,
        Category::Studies,
        Category::Shopping,
        Category::Sport,
        Category::Health,
        Category::Transportation,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::Work => "Work",
            Category::Bills => "Bills",
            Category::Studies => "Studies",
            Category::Shopping => "Shopping",
            Category::Sport => "Sport",
            Category::Health => "Health",
            Category::Transportation => "Transportation",
            Category::Other => "Other",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Home => &["clean", "cook", "laundry", "room", "house"],
            Category::Work => &["meeting", "project", "office", "deadline"],
            Category::Bills => &["payment", "invoice", "bill"],
            Category::Studies => &["exam", "study", "school"],
            Category::Shopping => &["buy", "shop", "store"],
            Category::Sport => &["run", "gym", "exercise"],
            Category::Health => &["doctor", "medicine", "hospital"],
            Category::Transportation => &["car", "drive", "bus"],
            Category::Other => &[],
        }
    }
}

/// Assign a category from title and description text, case-insensitively.
pub fn assign_category(title: &str, description: &str) -> Category {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    for category in Category::ALL {
        if category
            .keywords()
            .iter()
            .any(|kw| title.contains(kw) || description.contains(kw))
        {
            return category;
        }
    }
    Category::Other
}

/// Urgency score for a task at the given date. Recomputed on every render.
///
/// Completed tasks always score 0. Active tasks get +3 for importance plus
/// a due-date term: +5 due today, +3 due tomorrow, +2 due in 2-3 days,
/// +0 otherwise (overdue, far future, or no due date).
pub fn priority_score(task: &Task, today: NaiveDate) -> i32 {
    if task.is_done {
        return 0;
    }

    let mut score = 0;
    if task.is_important {
        score += 3;
    }

    if let Some(due) = task.due_date {
        score += match (due - today).num_days() {
            0 => 5,
            1 => 3,
            2..=3 => 2,
            _ => 0,
        };
    }

    score
}

/// Due-date bucket for the task list headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateGroup {
    Today,
    Tomorrow,
    ThisWeek,
    Upcoming,
    NoDate,
}

impl DateGroup {
    /// Display order of the group headers.
    pub const ORDER: [DateGroup; 5] = [
        DateGroup::Today,
        DateGroup::Tomorrow,
        DateGroup::ThisWeek,
        DateGroup::Upcoming,
        DateGroup::NoDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DateGroup::Today => "Today",
            DateGroup::Tomorrow => "Tomorrow",
            DateGroup::ThisWeek => "This Week",
            DateGroup::Upcoming => "Upcoming",
            DateGroup::NoDate => "No Date",
        }
    }
}

/// Bucket a due date by calendar-day distance from `today`. Day difference
/// is computed on dates, not timestamps, so the buckets are stable across
/// year boundaries.
pub fn date_group(due: Option<NaiveDate>, today: NaiveDate) -> DateGroup {
    let Some(due) = due else {
        return DateGroup::NoDate;
    };
    match (due - today).num_days() {
        0 => DateGroup::Today,
        1 => DateGroup::Tomorrow,
        2..=6 => DateGroup::ThisWeek,
        _ => DateGroup::Upcoming,
    }
}
