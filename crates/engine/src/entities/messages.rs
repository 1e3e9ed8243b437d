//! Chat transcript entity operations.

use std::sync::Arc;

use ghostagotchi_domain::Message;

use crate::infrastructure::ports::{MessageRepo, RepoError};

/// Chat transcript operations.
pub struct Messages {
    repo: Arc<dyn MessageRepo>,
}

impl Messages {
    pub fn new(repo: Arc<dyn MessageRepo>) -> Self {
        Self { repo }
    }

    pub async fn store(&self, message: &Message) -> Result<(), RepoError> {
        self.repo.store(message).await
    }
}
