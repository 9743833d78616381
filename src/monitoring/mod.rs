/*!
 * Monitoring
 * Structured tracing setup and run reports
 */

mod report;
mod tracer;

pub use report::{ContextReport, RunReport};
pub use tracer::init_tracing;
