//! # Domain Entities
//!
//! Content documents managed through the admin panel and read by the
//! marketing site, plus the admin accounts that edit them.
//!
//! ## Content
//!
//! - **Blog**: Blog post cards
//! - **Feature**: Feature highlight cards
//! - **ServiceOffering**: Service pages with features, inclusions and FAQs
//! - **TeamMember**: Team roster entries
//! - **Testimonial**: Customer quotes
//! - **Notification**: Site-wide banner (at most one active)
//!
//! ## Accounts
//!
//! - **User**: Admin panel account
//!
//! ## Repository Traits
//!
//! [`DocumentRepository`] is the generic data access contract; `UserRepository`
//! and `NotificationRepository` extend it with lookups specific to those
//! collections. Implementations live in the infrastructure layer.

mod document;
mod blog;
mod feature;
mod service_offering;
mod team_member;
mod testimonial;
mod notification;
mod user;

pub use document::{Document, DocumentMeta, DocumentRepository, Illustrated};

pub use blog::Blog;
pub use feature::Feature;
pub use service_offering::{Faq, ServiceOffering};
pub use team_member::TeamMember;
pub use testimonial::{Testimonial, TestimonialSize};
pub use notification::{Notification, NotificationRepository};
pub use user::{normalize_email, User, UserRepository, UserRole};
