pub mod generation;
pub mod user;

pub use generation::GenerationRecord;
pub use user::User;
