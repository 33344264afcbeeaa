use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::models::{CreatedResource, ResourceFailure};

/// Boundary to the remote service that creates one resource per call.
///
/// Implementations normalize every failure into a [`ResourceFailure`] so the
/// engine never has to look at raw error text.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn create_resource(
        &self,
        title: &str,
        body: &str,
        labels: &BTreeSet<String>,
    ) -> Result<CreatedResource, ResourceFailure>;
}

