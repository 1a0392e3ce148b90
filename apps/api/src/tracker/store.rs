//! Job application storage behind a narrow create/list/delete contract.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::tracker::models::{JobApplication, NewJobApplication};

/// Repository seam for job applications. Handlers depend on this trait, not
/// on a concrete backend.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Returns all records in insertion order.
    async fn list(&self) -> Result<Vec<JobApplication>>;

    /// Assigns an id, fills defaults, appends, and returns the stored record.
    async fn create(&self, new: NewJobApplication) -> Result<JobApplication>;

    /// Removes the record with the given id. No-op when the id is absent.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Process-lifetime store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<Vec<JobApplication>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list(&self) -> Result<Vec<JobApplication>> {
        Ok(self.jobs.read().await.clone())
    }

    async fn create(&self, new: NewJobApplication) -> Result<JobApplication> {
        let job = JobApplication {
            id: Uuid::new_v4().to_string(),
            role: new.role,
            company: new.company,
            location: new.location,
            salary: new.salary,
            status: new.status,
            date_applied: new
                .date_applied
                .unwrap_or_else(|| Utc::now().date_naive().to_string()),
        };

        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.jobs.write().await.retain(|job| job.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job(role: &str, company: &str) -> NewJobApplication {
        serde_json::from_value(serde_json::json!({
            "role": role,
            "company": company,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_defaults() {
        let store = InMemoryJobStore::new();

        let first = store.create(new_job("Frontend Dev", "Google")).await.unwrap();
        let second = store.create(new_job("Backend Dev", "Acme")).await.unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.location, "Remote");
        assert_eq!(first.salary, "N/A");
        assert_eq!(first.status, "Applied");
        assert_eq!(first.date_applied, Utc::now().date_naive().to_string());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryJobStore::new();

        let first = store.create(new_job("A", "X")).await.unwrap();
        let second = store.create(new_job("B", "Y")).await.unwrap();

        let jobs = store.list().await.unwrap();
        assert_eq!(jobs, vec![first, second]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_matching_record() {
        let store = InMemoryJobStore::new();

        let keep = store.create(new_job("A", "X")).await.unwrap();
        let removed = store.create(new_job("B", "Y")).await.unwrap();

        store.delete(&removed.id).await.unwrap();

        let jobs = store.list().await.unwrap();
        assert_eq!(jobs, vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_of_absent_id_is_a_no_op() {
        let store = InMemoryJobStore::new();
        let job = store.create(new_job("A", "X")).await.unwrap();

        store.delete("no-such-id").await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![job]);
    }

    #[tokio::test]
    async fn test_create_respects_caller_supplied_date() {
        let store = InMemoryJobStore::new();

        let new: NewJobApplication = serde_json::from_value(serde_json::json!({
            "role": "A",
            "company": "X",
            "date_applied": "2026-07-01",
        }))
        .unwrap();

        let job = store.create(new).await.unwrap();
        assert_eq!(job.date_applied, "2026-07-01");
    }
}
