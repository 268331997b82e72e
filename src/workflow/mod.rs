pub mod grade_flow;
pub mod submit_ctx;
pub mod submit_flow;

pub use grade_flow::GradeFlow;
pub use submit_ctx::SubmitCtx;
pub use submit_flow::SubmitFlow;
