pub mod adapter;
pub mod error;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod session;

pub use adapter::ModelAdapter;
pub use error::ModelError;
#[cfg(feature = "onnx")]
pub use onnx::OnnxSession;
pub use session::{DenseSession, InferenceSession};
