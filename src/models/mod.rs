pub mod claims;
pub mod product;
pub mod user;

pub use claims::*;
pub use product::*;
pub use user::*;
