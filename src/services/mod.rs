pub mod admin_service;
pub mod catalog_service;
pub mod order_service;
pub mod partner_service;
pub mod review_service;
pub mod user_service;
