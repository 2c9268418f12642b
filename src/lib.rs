pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod report;
pub mod state;
pub mod stats;
pub mod ui;
pub mod visualizer;

pub use data::loader::{load_index, load_index_from_str};
pub use data::model::{ClusterSizeSample, Index};
pub use error::{LoadError, StatsError};
pub use gate::{AutoConfirm, Confirmation, LineGate};
pub use pipeline::{run, RunOptions};
pub use report::ReportFormat;
pub use stats::{summarize, Histogram, IndexReport, SummaryOptions};
pub use visualizer::{HistogramRenderer, NativeRenderer};
