pub mod admin;
pub mod forfeit;
pub mod lobby;
pub mod shared;
pub mod turn;

pub use admin::*;
pub use forfeit::*;
pub use lobby::*;
pub use turn::*;
