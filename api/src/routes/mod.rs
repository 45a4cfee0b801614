pub mod ask;
pub mod root_route;
pub mod topics;
