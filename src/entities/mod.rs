pub mod prelude;

pub mod applications;
pub mod users;
