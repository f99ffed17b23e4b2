//! Publishing assembled forms.
//!
//! [`publish`] turns an [`AssembledForm`] into a [`PublishPlan`] and runs it
//! against a [`FormPublisher`], one awaited call at a time. The first rejected
//! call aborts the run. Nothing is retried or cleaned up: a form that was
//! already created stays on the service and its id is reported in the error.

pub mod client;
pub mod plan;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{ClientError, FormId, FormsClient};
pub use plan::{BatchUpdate, PublishPlan, Request, Stage};

use crate::story::AssembledForm;

/// The remote form service, reduced to the two calls publishing needs.
#[async_trait]
pub trait FormPublisher: Send + Sync {
    /// Create an empty form and return its id.
    async fn create(&self, title: &str) -> Result<FormId, ClientError>;

    /// Apply `requests` to an existing form.
    async fn batch_update(&self, form_id: &FormId, requests: &[Request]) -> Result<(), ClientError>;
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to create form: {0}")]
    Create(#[source] ClientError),

    #[error("{stage} batch rejected for form {form_id}: {source}")]
    Batch {
        stage: Stage,
        form_id: FormId,
        source: ClientError,
    },
}

impl PublishError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Create(_) => Stage::Create,
            Self::Batch { stage, .. } => *stage,
        }
    }

    /// The partially published form, if one was created.
    pub fn form_id(&self) -> Option<&FormId> {
        match self {
            Self::Create(_) => None,
            Self::Batch { form_id, .. } => Some(form_id),
        }
    }
}

/// Publish an assembled form and return the new form's id.
pub async fn publish<P>(publisher: &P, assembled: &AssembledForm) -> Result<FormId, PublishError>
where
    P: FormPublisher + ?Sized,
{
    publish_plan(publisher, &PublishPlan::new(assembled)).await
}

/// Run a prepared plan.
pub async fn publish_plan<P>(publisher: &P, plan: &PublishPlan) -> Result<FormId, PublishError>
where
    P: FormPublisher + ?Sized,
{
    let form_id = publisher.create(plan.title()).await.map_err(|e| {
        tracing::warn!(title = plan.title(), error = %e, "form creation rejected");
        PublishError::Create(e)
    })?;
    tracing::info!(%form_id, title = plan.title(), "created form");

    for (stage, batch) in plan.batches() {
        if batch.requests.is_empty() {
            tracing::debug!(%form_id, %stage, "nothing to send");
            continue;
        }
        publisher
            .batch_update(&form_id, &batch.requests)
            .await
            .map_err(|e| {
                tracing::warn!(%form_id, %stage, error = %e, "batch rejected");
                PublishError::Batch {
                    stage,
                    form_id: form_id.clone(),
                    source: e,
                }
            })?;
        tracing::info!(%form_id, %stage, items = batch.requests.len(), "batch applied");
    }

    Ok(form_id)
}
