use std::sync::Arc;

use tokio::sync::Mutex;

use crate::app::error::Result;
use crate::config::Config;
use crate::provider::{DataProvider, HttpProvider};
use crate::render::{Board, RenderPipeline, SelectionController};

pub struct AppContext {
    pub config: Arc<Config>,
    pub provider: Arc<dyn DataProvider>,
    pub controller: SelectionController,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let provider: Arc<dyn DataProvider> = Arc::new(HttpProvider::new(&config.api)?);
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: Config, provider: Arc<dyn DataProvider>) -> Self {
        let pipeline = RenderPipeline::with_enrichment(provider.clone(), config.render.enrichment)
            .with_workers(config.render.workers);
        let board = Arc::new(Mutex::new(Board::new()));
        let controller = SelectionController::new(pipeline, board);

        Self {
            config: Arc::new(config),
            provider,
            controller,
        }
    }

    pub fn board(&self) -> &Arc<Mutex<Board>> {
        self.controller.board()
    }
}
