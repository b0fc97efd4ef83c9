pub mod csv;
pub mod json;

pub use json::{parse_request, ControlRequest, ControlResponse, RequestError};
