pub mod link_routes;
pub mod section_routes;
