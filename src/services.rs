pub mod auth;
pub mod catalog_service;
pub mod order_service;
pub mod sla;
pub mod tenant_resolver;
