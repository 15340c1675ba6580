//! PostgreSQL implementations of the store traits.

pub mod notification;
pub mod request;
pub mod user;

pub use notification::NotificationRepository;
pub use request::RequestRepository;
pub use user::UserRepository;
