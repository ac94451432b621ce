use serde::Serialize;

/// A named work category belonging to a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    pub is_active: bool,
    /// Shown to crews as a task they can clock against.
    pub is_task: bool,
}

/// A user known to the store (office staff or crew lead).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}
