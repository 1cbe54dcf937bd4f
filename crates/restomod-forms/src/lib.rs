//! Lead-generation forms and their validation
//!
//! Every form serializes with the field names the backend expects, and
//! `validate` reports all failing fields at once, in field order.

pub mod error;
pub mod forms;
pub mod rules;

pub use error::{FieldError, FormError, Problem};
pub use forms::{
    ContactForm, CustomRequest, JobApplication, LeadForm, LeadKind, NewsletterSignup,
    TestDriveBooking,
};
