use chrono::NaiveDate;

// User account row. Passwords are stored as Argon2id PHC strings.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

// Task row
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub is_done: bool,
    pub is_important: bool,
    pub user_id: i64,
}

// Task that has not been inserted yet
#[derive(Clone, Debug)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub is_important: bool,
    pub user_id: i64,
}
