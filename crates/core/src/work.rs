// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Project-management types: tasks, epics, sprints, and bugs.
//!
//! `Task` and `Epic` are served by several API generations at once and get
//! hand-written `Deserialize` impls; `Sprint` and `Bug` come from the newer
//! surface and derive theirs.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::json;

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet started. Initial state for new tasks.
    Todo,
    InProgress,
    /// Awaiting review before completion.
    InReview,
    Done,
}

impl TaskStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::InReview => "in_review",
            TaskStatus::Done => "done",
        }
    }

    /// Returns true if this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "todo" | "open" => Ok(TaskStatus::Todo),
            "in_progress" | "in-progress" | "doing" => Ok(TaskStatus::InProgress),
            "in_review" | "in-review" | "review" => Ok(TaskStatus::InReview),
            "done" | "completed" => Ok(TaskStatus::Done),
            _ => Err(Error::InvalidTaskStatus(s.to_string())),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" | "med" | "normal" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" | "critical" => Ok(TaskPriority::Urgent),
            _ => Err(Error::InvalidTaskPriority(s.to_string())),
        }
    }
}

/// Lifecycle of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintState {
    /// Defined but not yet started.
    Planned,
    Active,
    Completed,
}

impl SprintState {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintState::Planned => "planned",
            SprintState::Active => "active",
            SprintState::Completed => "completed",
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SprintState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(SprintState::Planned),
            "active" => Ok(SprintState::Active),
            "completed" | "closed" => Ok(SprintState::Completed),
            _ => Err(Error::InvalidSprintState(s.to_string())),
        }
    }
}

/// Severity of a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugSeverity {
    Minor,
    Major,
    Critical,
}

impl BugSeverity {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            BugSeverity::Minor => "minor",
            BugSeverity::Major => "major",
            BugSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for BugSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BugSeverity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "minor" | "low" => Ok(BugSeverity::Minor),
            "major" | "high" => Ok(BugSeverity::Major),
            "critical" | "blocker" => Ok(BugSeverity::Critical),
            _ => Err(Error::InvalidSeverity(s.to_string())),
        }
    }
}

/// The primary unit of tracked work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    pub workspace_id: String,
    /// Epic this task rolls up to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<String>,
    /// Sprint this task is scheduled in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Assignee display name, when the API sent the nested-object form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    /// User who filed the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    /// Denormalized comment count for list rendering.
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in the initial state with medium priority.
    pub fn new(
        id: String,
        workspace_id: String,
        title: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Task {
            id,
            workspace_id,
            epic_id: None,
            sprint_id: None,
            title,
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee_id: None,
            assignee_name: None,
            reporter_id: None,
            due_date: None,
            labels: Vec::new(),
            comment_count: 0,
            created_at,
            updated_at: created_at,
        }
    }

    /// Normalize an API payload into a task.
    ///
    /// Unknown status/priority strings degrade to `Todo`/`Medium` with a
    /// warning; `updated_at` falls back to `created_at` when absent.
    pub fn from_value(v: &Value) -> Result<Self> {
        let assignee_keys: &[&str] = &["assignee", "assignee_id", "assigned_to"];
        let status = match json::opt_str(v, &["status", "state"]) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(status = %raw, "unknown task status, treating as todo");
                TaskStatus::Todo
            }),
            None => TaskStatus::Todo,
        };
        let priority = match json::opt_str(v, &["priority"]) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(priority = %raw, "unknown task priority, treating as medium");
                TaskPriority::Medium
            }),
            None => TaskPriority::Medium,
        };
        let created_at = json::req_timestamp(v, "task", &["created_at", "createdAt"])?;
        Ok(Task {
            id: json::req_str(v, "task", &["id", "_id"])?,
            workspace_id: json::req_ref(v, "task", &["workspace", "workspace_id"])?,
            epic_id: json::opt_ref(v, &["epic", "epic_id"]),
            sprint_id: json::opt_ref(v, &["sprint", "sprint_id"]),
            title: json::req_str(v, "task", &["title", "name"])?,
            description: json::opt_str(v, &["description", "desc"]),
            status,
            priority,
            assignee_id: json::opt_ref(v, assignee_keys),
            assignee_name: json::ref_display_name(v, assignee_keys, &["assignee_name"]),
            reporter_id: json::opt_ref(v, &["reporter", "reporter_id", "created_by"]),
            due_date: json::opt_timestamp(v, &["due_date", "dueDate", "due"]),
            labels: json::str_list(v, &["labels", "tags"]),
            comment_count: json::opt_i64(v, &["comment_count", "commentCount", "comments"])
                .unwrap_or(0),
            created_at,
            updated_at: json::opt_timestamp(v, &["updated_at", "updatedAt"]).unwrap_or(created_at),
        })
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Task::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A long-running initiative grouping tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Epic {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accent color used by clients, e.g. "#7048e8".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// IDs of tasks rolled up to this epic.
    pub task_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Epic {
    /// Normalize an API payload into an epic.
    pub fn from_value(v: &Value) -> Result<Self> {
        Ok(Epic {
            id: json::req_str(v, "epic", &["id", "_id"])?,
            workspace_id: json::req_ref(v, "epic", &["workspace", "workspace_id"])?,
            name: json::req_str(v, "epic", &["name", "title"])?,
            description: json::opt_str(v, &["description", "desc"]),
            color: json::opt_str(v, &["color", "colour"]),
            task_ids: json::id_list(v, &["tasks", "task_ids"]),
            start_date: json::opt_timestamp(v, &["start_date", "startDate"]),
            end_date: json::opt_timestamp(v, &["end_date", "endDate"]),
            created_at: json::req_timestamp(v, "epic", &["created_at", "createdAt"])?,
        })
    }
}

impl<'de> Deserialize<'de> for Epic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Epic::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A time-boxed iteration of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    #[serde(alias = "_id")]
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub state: SprintState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A defect filed against a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    #[serde(alias = "_id")]
    pub id: String,
    /// The task this bug was filed against.
    pub task_id: String,
    pub title: String,
    pub severity: BugSeverity,
    /// Reproduction steps or free-form detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "work_tests.rs"]
mod tests;
