pub mod contexts;
pub mod events;
pub mod identity;
pub mod instructions;
pub mod state;

pub use contexts::*;
pub use events::*;
pub use state::*;
