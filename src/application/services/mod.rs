//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login and JWT validation
//! - **ContentService**: Generic document CRUD with image handling
//! - **NotificationService**: Notification banners with a single active one

pub mod auth_service;
pub mod content_service;
pub mod notification_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims};
pub use content_service::{ContentError, ContentService, ImageChange};
pub use notification_service::{NewNotification, NotificationChanges, NotificationService};
