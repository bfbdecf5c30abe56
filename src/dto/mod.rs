pub mod catalog;
pub mod orders;
pub mod partners;
pub mod reviews;
pub mod users;
