pub mod contexts;
pub mod events;
pub mod index;
pub mod instructions;
pub mod lifecycle;
pub mod state;
pub mod storage;
pub mod summary;


pub use contexts::*;
pub use events::*;
pub use state::*;
