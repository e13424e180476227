use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, PartialEq)]
pub struct ParsedTask {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub important: bool,
}

/// Parse the title input of the add/edit dialog.
///
/// `@YYYY-MM-DD` sets the due date (the first valid occurrence wins) and a
/// standalone `!` marks the task important. Both markers are stripped from
/// the stored title and surrounding whitespace is collapsed.
pub fn parse_task_input(input: &str) -> ParsedTask {
    let due_re = Regex::new(r"@(\d{4}-\d{2}-\d{2})").unwrap();

    let mut due_date = None;

    // Due date
    for caps in due_re.captures_iter(input) {
        if let Some(date_match) = caps.get(1) {
            if due_date.is_none() {
                due_date = NaiveDate::parse_from_str(date_match.as_str(), "%Y-%m-%d").ok();
            }
        }
    }

    let without_due = due_re.replace_all(input, "");

    // Importance marker, plus whitespace collapse
    let mut important = false;
    let mut words: Vec<&str> = Vec::new();
    for word in without_due.split_whitespace() {
        if word == "!" {
            important = true;
        } else {
            words.push(word);
        }
    }

    ParsedTask {
        title: words.join(" "),
        due_date,
        important,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_with_due_date_in_middle() {
        let input = "Pay rent @2026-09-01 before noon";
        let expected = ParsedTask {
            title: "Pay rent before noon".to_string(),
            due_date: Some(date(2026, 9, 1)),
            important: false,
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_importance_marker() {
        let input = "Call the doctor !";
        let expected = ParsedTask {
            title: "Call the doctor".to_string(),
            due_date: None,
            important: true,
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_with_both_markers_and_extra_spaces() {
        let input = "  Buy groceries   ! @2026-08-10   ";
        let expected = ParsedTask {
            title: "Buy groceries".to_string(),
            due_date: Some(date(2026, 8, 10)),
            important: true,
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_first_valid_due_date_wins() {
        let input = "Plan trip @2026-08-10 @2026-08-20";
        let result = parse_task_input(input);
        assert_eq!(result.title, "Plan trip");
        assert_eq!(result.due_date, Some(date(2026, 8, 10)));
    }

    #[test]
    fn test_parse_invalid_due_date_is_stripped_and_ignored() {
        let input = "Renew passport @2026-13-40";
        let expected = ParsedTask {
            title: "Renew passport".to_string(),
            due_date: None,
            important: false,
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_invalid_then_valid_due_date() {
        let input = "Renew passport @2026-13-40 @2026-11-02";
        let result = parse_task_input(input);
        assert_eq!(result.due_date, Some(date(2026, 11, 2)));
    }

    #[test]
    fn test_exclamation_inside_a_word_is_not_a_marker() {
        let input = "Ship it! today";
        let expected = ParsedTask {
            title: "Ship it! today".to_string(),
            due_date: None,
            important: false,
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_collapses_whitespace_between_words() {
        let input = "Write   tests ! for the   parser";
        let expected = ParsedTask {
            title: "Write tests for the parser".to_string(),
            due_date: None,
            important: true,
        };
        let result = parse_task_input(input);
        assert_eq!(result, expected);
    }
}
