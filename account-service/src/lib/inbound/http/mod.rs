pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
