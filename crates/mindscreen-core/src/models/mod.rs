pub mod outcome;
pub mod patient;
pub mod score;
pub mod severity;
