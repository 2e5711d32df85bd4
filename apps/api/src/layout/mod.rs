// Layout model: navigation order plus which sections are shown, and in what order.

pub mod handlers;
pub mod ordering;
pub mod service;

pub use service::get_layout;
