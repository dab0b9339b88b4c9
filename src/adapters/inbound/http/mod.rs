pub mod dto;
pub mod handlers;
pub mod router;
pub mod views;

pub use router::{create_router, AppState, MAX_BODY_BYTES};
pub use views::Views;
