use log::{info, warn};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;

use super::error::ModelError;
#[cfg(feature = "onnx")]
use super::onnx::OnnxSession;
use super::session::{DenseSession, InferenceSession};
use crate::config::settings::ModelSettings;
use crate::features::{FEATURE_COUNT, FeatureVector};

// Neutral score for outputs the model could not produce
const UNKNOWN_SCORE: f64 = 0.5;

type SharedSession = Arc<dyn InferenceSession>;

/// Optional learned-model scoring. Loading happens at most once per adapter;
/// concurrent callers wait on the same attempt and a failed attempt is kept.
/// A session that once exceeds the timeout is not called again, since its
/// blocking thread may still be busy.
pub struct ModelAdapter {
    artifact: Option<PathBuf>,
    timeout: Duration,
    session: OnceCell<Option<SharedSession>>,
    load_attempts: AtomicUsize,
    timed_out: AtomicBool,
}

impl ModelAdapter {
    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self {
            artifact: settings.artifact().cloned(),
            timeout: Duration::from_millis(settings.timeout_ms),
            session: OnceCell::new(),
            load_attempts: AtomicUsize::new(0),
            timed_out: AtomicBool::new(false),
        }
    }

    pub fn disabled() -> Self {
        Self::from_settings(&ModelSettings::default())
    }

    pub fn with_session(session: SharedSession, timeout: Duration) -> Self {
        Self {
            artifact: None,
            timeout,
            session: OnceCell::new_with(Some(Some(session))),
            load_attempts: AtomicUsize::new(0),
            timed_out: AtomicBool::new(false),
        }
    }

    /// Whether a usable session is ready. Never fails.
    pub async fn ensure_loaded(&self) -> bool {
        self.session.get_or_init(|| self.load_once()).await.is_some()
    }

    async fn load_once(&self) -> Option<SharedSession> {
        let path = self.artifact.as_deref()?;
        self.load_attempts.fetch_add(1, Ordering::SeqCst);
        match self.load(path).await {
            Ok(session) => {
                info!(
                    "Loaded rush model from {} (input '{}', output '{}')",
                    path.display(),
                    session.input_name(),
                    session.output_name()
                );
                Some(session)
            }
            Err(e) => {
                warn!("Rush model unavailable, using heuristic: {}", e);
                None
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.session.get(), Some(Some(_)))
    }

    /// One score in [0, 1] per feature vector, in input order, or `None`
    /// when inference cannot be performed.
    pub async fn predict_batch(&self, features: &[FeatureVector]) -> Option<Vec<f64>> {
        if features.is_empty() || self.timed_out.load(Ordering::SeqCst) || !self.ensure_loaded().await {
            return None;
        }
        match self.try_predict(features).await {
            Ok(scores) => Some(scores),
            Err(e @ ModelError::Timeout(_)) => {
                self.timed_out.store(true, Ordering::SeqCst);
                warn!("Model inference timed out, heuristic scoring from now on: {}", e);
                None
            }
            Err(e) => {
                warn!("Model inference failed for {} rows, using heuristic: {}", features.len(), e);
                None
            }
        }
    }

    async fn load(&self, path: &Path) -> Result<SharedSession, ModelError> {
        let path = path.to_path_buf();
        let task = tokio::task::spawn_blocking(move || open_artifact(&path));
        timeout(self.timeout, task)
            .await
            .map_err(|_| ModelError::Timeout(self.timeout_ms()))?
            .map_err(|e| ModelError::Runtime(e.to_string()))?
    }

    async fn try_predict(&self, features: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        let session = match self.session.get() {
            Some(Some(session)) => Arc::clone(session),
            _ => return Err(ModelError::NotLoaded),
        };
        let rows = features.len();
        let input = build_input(features)?;

        let task = tokio::task::spawn_blocking(move || session.run(input));
        let output = timeout(self.timeout, task)
            .await
            .map_err(|_| ModelError::Timeout(self.timeout_ms()))?
            .map_err(|e| ModelError::Runtime(e.to_string()))??;

        stride_scores(&output, rows)
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

/// `.onnx` artifacts go through tract, anything else is read as a JSON dense layer
fn open_artifact(path: &Path) -> Result<SharedSession, ModelError> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    if extension.as_deref() == Some("onnx") {
        return open_onnx(path);
    }
    let json = std::fs::read_to_string(path)?;
    Ok(Arc::new(DenseSession::from_json(&json)?))
}

#[cfg(feature = "onnx")]
fn open_onnx(path: &Path) -> Result<SharedSession, ModelError> {
    Ok(Arc::new(OnnxSession::from_path(path)?))
}

#[cfg(not(feature = "onnx"))]
fn open_onnx(path: &Path) -> Result<SharedSession, ModelError> {
    Err(ModelError::Runtime(format!(
        "{} needs the `onnx` feature, which this build lacks",
        path.display()
    )))
}

fn build_input(features: &[FeatureVector]) -> Result<Array2<f32>, ModelError> {
    let flat: Vec<f32> = features
        .iter()
        .flat_map(|f| f.as_slice().iter().map(|&v| v as f32))
        .collect();
    Array2::from_shape_vec((features.len(), FEATURE_COUNT), flat)
        .map_err(|e| ModelError::Shape(e.to_string()))
}

/// Picks the first value of each row when the output carries several columns
fn stride_scores(output: &[f32], rows: usize) -> Result<Vec<f64>, ModelError> {
    if rows == 0 || output.len() < rows {
        return Err(ModelError::Shape(format!(
            "{} output values for {} rows",
            output.len(),
            rows
        )));
    }
    let stride = output.len() / rows;
    Ok((0..rows).map(|i| sanitize(output[i * stride])).collect())
}

fn sanitize(value: f32) -> f64 {
    let value = value as f64;
    if value.is_finite() { value.clamp(0.0, 1.0) } else { UNKNOWN_SCORE }
}
