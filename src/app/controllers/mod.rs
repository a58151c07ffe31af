//! Controllers - one synchronous request handler per filter binary.

pub mod email_filter;
pub mod source_filter;
