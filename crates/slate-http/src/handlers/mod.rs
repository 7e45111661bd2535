pub mod answers;
pub mod assignments;
pub mod classes;
pub mod identities;
