pub mod health;
pub mod instrument;
pub mod page;
pub mod report;
pub mod sessions;
