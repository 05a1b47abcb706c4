use measure_engine::config::MeasureConfig;
use measure_engine::types::{EngineError, MeasurementRow};
use measure_engine::MeasurementEngine;
use scene_port::Scene;

/// The engine as the panel drives it, plus the row currently hovered.
pub struct PanelSession<S: Scene> {
    pub engine: MeasurementEngine<S>,
    /// Row index under the mouse, if any.
    pub hovered_row: Option<usize>,
}

impl<S: Scene> PanelSession<S> {
    pub fn new(scene: S, config: MeasureConfig) -> Self {
        Self {
            engine: MeasurementEngine::new(scene, config),
            hovered_row: None,
        }
    }

    pub fn row(&self, index: usize) -> Result<&MeasurementRow, BridgeError> {
        self.engine
            .rows()
            .get(index)
            .ok_or(BridgeError::UnknownRow { index })
    }
}

/// Errors surfaced to the panel.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("no row at index {index}")]
    UnknownRow { index: usize },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
