mod batch;
mod generate;

// Generate commands
pub use generate::{GenerateArgs, run_generate};

// Batch commands
pub use batch::{BatchReport, run_batch};
