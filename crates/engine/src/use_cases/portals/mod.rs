//! Portal position use cases.

mod handle_request;
mod mapper;

pub use handle_request::{HandlePortalRequest, PortalRequestError};
pub use mapper::map_portal;
