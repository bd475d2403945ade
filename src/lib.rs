pub mod app;
pub mod config;
pub mod current;
pub mod diagnosis;
pub mod history;
pub mod inference;
pub mod logging;
pub mod mock;
pub mod paths;
pub mod sensor;
pub mod settings;
pub mod storage;

// Re-export commonly used types
pub use app::App;
pub use config::{ConfigStore, ServiceConfig};
pub use diagnosis::{CaptureRequest, Diagnoser, DiagnosisResult, Outcome};
pub use history::{HistoryRecord, HistoryStore};
pub use inference::{Classifier, InferenceError, RawPrediction};
