// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Task board repository: tasks, epics, sprints, bugs, and reports.

use serde_json::json;
use td_core::{Bug, Epic, Report, Sprint, Task, TaskStatus};
use td_store::Store;

use crate::error::Result;
use crate::http::Api;
use crate::repo::{decode, ignore_missing};
use crate::state::Fetched;

pub struct TaskRepo<A: Api> {
    api: A,
    store: Store,
}

impl<A: Api> TaskRepo<A> {
    pub fn new(api: A, store: Store) -> Self {
        TaskRepo { api, store }
    }

    /// Tasks in a workspace, optionally filtered by status.
    ///
    /// An unfiltered fetch replaces the cached set; a filtered one only
    /// upserts what came back, so rows outside the filter survive.
    pub async fn list(
        &mut self,
        workspace_id: &str,
        status: Option<TaskStatus>,
    ) -> Result<Fetched<Vec<Task>>> {
        let path = match status {
            Some(status) => format!("/workspaces/{workspace_id}/tasks?status={}", status.as_str()),
            None => format!("/workspaces/{workspace_id}/tasks"),
        };
        match self.api.get_json(&path).await.and_then(decode::<Vec<Task>>) {
            Ok(tasks) => {
                if status.is_none() {
                    self.store.replace_tasks(workspace_id, &tasks)?;
                } else {
                    for task in &tasks {
                        self.store.put_task(task)?;
                    }
                }
                Ok(Fetched::remote(tasks))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(workspace = %workspace_id, error = %err, "task list fetch failed, serving cache");
                let cached = self.store.list_tasks(workspace_id, status)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&mut self, id: &str) -> Result<Fetched<Task>> {
        let path = format!("/tasks/{id}");
        match self.api.get_json(&path).await.and_then(decode) {
            Ok(task) => {
                self.store.put_task(&task)?;
                Ok(Fetched::remote(task))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(task = %id, error = %err, "task fetch failed, serving cache");
                match self.store.get_task(id) {
                    Ok(task) => Ok(Fetched::cached(task)),
                    Err(cache_err) if cache_err.is_not_found() => Err(err),
                    Err(cache_err) => Err(cache_err.into()),
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn create(
        &mut self,
        workspace_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Task> {
        let body = json!({ "title": title, "description": description });
        let task: Task = decode(
            self.api
                .post_json(&format!("/workspaces/{workspace_id}/tasks"), body)
                .await?,
        )?;
        self.store.put_task(&task)?;
        Ok(task)
    }

    pub async fn update_status(&mut self, id: &str, status: TaskStatus) -> Result<()> {
        let body = json!({ "status": status.as_str() });
        self.api.patch_json(&format!("/tasks/{id}"), body).await?;
        ignore_missing(self.store.update_task_status(id, status))
    }

    pub async fn assign(
        &mut self,
        id: &str,
        assignee_id: Option<&str>,
        assignee_name: Option<&str>,
    ) -> Result<()> {
        let body = json!({ "assignee": assignee_id });
        self.api.patch_json(&format!("/tasks/{id}"), body).await?;
        ignore_missing(self.store.update_task_assignee(id, assignee_id, assignee_name))
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete(&format!("/tasks/{id}")).await?;
        ignore_missing(self.store.delete_task(id))
    }

    pub async fn epics(&mut self, workspace_id: &str) -> Result<Fetched<Vec<Epic>>> {
        let path = format!("/workspaces/{workspace_id}/epics");
        match self.api.get_json(&path).await.and_then(decode::<Vec<Epic>>) {
            Ok(epics) => {
                self.store.replace_epics(workspace_id, &epics)?;
                Ok(Fetched::remote(epics))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(workspace = %workspace_id, error = %err, "epic fetch failed, serving cache");
                let cached = self.store.list_epics(workspace_id)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn sprints(&mut self, workspace_id: &str) -> Result<Fetched<Vec<Sprint>>> {
        let path = format!("/workspaces/{workspace_id}/sprints");
        match self
            .api
            .get_json(&path)
            .await
            .and_then(decode::<Vec<Sprint>>)
        {
            Ok(sprints) => {
                self.store.replace_sprints(workspace_id, &sprints)?;
                Ok(Fetched::remote(sprints))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(workspace = %workspace_id, error = %err, "sprint fetch failed, serving cache");
                let cached = self.store.list_sprints(workspace_id)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn bugs(&mut self, task_id: &str) -> Result<Fetched<Vec<Bug>>> {
        let path = format!("/tasks/{task_id}/bugs");
        match self.api.get_json(&path).await.and_then(decode::<Vec<Bug>>) {
            Ok(bugs) => {
                self.store.replace_bugs(task_id, &bugs)?;
                Ok(Fetched::remote(bugs))
            }
            Err(err) if err.is_fallback_eligible() => {
                tracing::warn!(task = %task_id, error = %err, "bug fetch failed, serving cache");
                let cached = self.store.list_bugs(task_id)?;
                if cached.is_empty() {
                    Err(err)
                } else {
                    Ok(Fetched::cached(cached))
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn resolve_bug(&mut self, id: &str, resolved: bool) -> Result<()> {
        let body = json!({ "resolved": resolved });
        self.api.patch_json(&format!("/bugs/{id}"), body).await?;
        ignore_missing(self.store.set_bug_resolved(id, resolved))
    }

    /// Workspace summary report. Never cached; reports are point-in-time.
    pub async fn report(&mut self, workspace_id: &str) -> Result<Report> {
        decode(
            self.api
                .get_json(&format!("/workspaces/{workspace_id}/report"))
                .await?,
        )
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
