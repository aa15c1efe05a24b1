//! Adapters turning a resolved secret into output artifacts

pub mod dotenv;
pub mod output;
pub mod pod_builder;

pub use dotenv::format_dotenv;
pub use output::write_output;
pub use pod_builder::{build_pod, format_pod, format_pod_with_image};
