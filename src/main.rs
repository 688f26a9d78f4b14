use std::sync::Arc;

use tracing::{info, warn};

use grc_workflows::adapters::{InMemoryFolderProvider, PostgresCycleTaskReader, PostgresWorkflowRepository};
use grc_workflows::application::{
    CopyWorkflowHandler, CreateWorkflowHandler, GetWorkflowStateHandler, UpdateWorkflowFrequencyHandler,
};
use grc_workflows::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.logging.init()?;
    config.validate()?;

    let registry = config.permissions.load_registry()?;
    info!(roles = registry.len(), "role registry ready");

    let pool = config.database.connect().await?;
    info!("database reachable");

    let repository = Arc::new(PostgresWorkflowRepository::new(pool.clone()));
    let reader = Arc::new(PostgresCycleTaskReader::new(pool));

    let mut create = CreateWorkflowHandler::new(repository.clone());
    if config.features.enable_folders {
        warn!("folders enabled with the in-memory provider; folder ids are not persisted externally");
        create = create.with_folder_provider(Arc::new(InMemoryFolderProvider::new()));
    }
    let _handlers = (
        create,
        CopyWorkflowHandler::new(repository.clone()),
        UpdateWorkflowFrequencyHandler::new(repository),
        GetWorkflowStateHandler::new(reader),
    );

    info!(
        folders = config.features.enable_folders,
        max_connections = config.database.max_connections,
        "grc-workflows ready"
    );
    Ok(())
}
