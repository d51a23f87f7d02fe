pub mod parallel_scan;
pub mod progress;
pub mod validation;
