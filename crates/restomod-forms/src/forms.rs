//! Lead form definitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FormError;
use crate::rules::Checker;

/// Which endpoint a lead goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadKind {
    Contact,
    Newsletter,
    CustomRequest,
    JobApplication,
    TestDrive,
}

impl fmt::Display for LeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contact => "contact",
            Self::Newsletter => "newsletter",
            Self::CustomRequest => "custom request",
            Self::JobApplication => "job application",
            Self::TestDrive => "test drive",
        };
        f.write_str(name)
    }
}

/// A submittable lead
pub trait LeadForm: Serialize + Send + Sync {
    fn kind(&self) -> LeadKind;

    fn validate(&self) -> Result<(), FormError>;

    /// Identifier substituted into the endpoint path, if the endpoint has one
    fn path_param(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "oggetto", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(rename = "messaggio")]
    pub message: String,
}

impl LeadForm for ContactForm {
    fn kind(&self) -> LeadKind {
        LeadKind::Contact
    }

    fn validate(&self) -> Result<(), FormError> {
        Checker::new()
            .required("name", &self.name)
            .email("email", &self.email)
            .optional_phone("phone", self.phone.as_deref())
            .required("message", &self.message)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSignup {
    pub email: String,
}

impl LeadForm for NewsletterSignup {
    fn kind(&self) -> LeadKind {
        LeadKind::Newsletter
    }

    fn validate(&self) -> Result<(), FormError> {
        Checker::new().email("email", &self.email).finish()
    }
}

/// Request for a bespoke build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "modelloBase")]
    pub base_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(rename = "dettagli")]
    pub details: String,
}

impl LeadForm for CustomRequest {
    fn kind(&self) -> LeadKind {
        LeadKind::CustomRequest
    }

    fn validate(&self) -> Result<(), FormError> {
        Checker::new()
            .required("name", &self.name)
            .email("email", &self.email)
            .optional_phone("phone", self.phone.as_deref())
            .required("base_model", &self.base_model)
            .optional_amount("budget", self.budget)
            .required("details", &self.details)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    /// Carried in the URL, not the body
    #[serde(skip)]
    pub job_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "letteraPresentazione", skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(rename = "cvUrl", skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
}

impl LeadForm for JobApplication {
    fn kind(&self) -> LeadKind {
        LeadKind::JobApplication
    }

    fn validate(&self) -> Result<(), FormError> {
        Checker::new()
            .required("job_id", &self.job_id)
            .required("name", &self.name)
            .email("email", &self.email)
            .optional_phone("phone", self.phone.as_deref())
            .finish()
    }

    fn path_param(&self) -> Option<&str> {
        Some(self.job_id.trim())
    }
}

/// Booking of a test drive for one catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDriveBooking {
    #[serde(rename = "restomod")]
    pub item_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    /// YYYY-MM-DD
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "fasciaOraria")]
    pub time_slot: String,
}

impl LeadForm for TestDriveBooking {
    fn kind(&self) -> LeadKind {
        LeadKind::TestDrive
    }

    fn validate(&self) -> Result<(), FormError> {
        Checker::new()
            .required("item_id", &self.item_id)
            .required("name", &self.name)
            .email("email", &self.email)
            .phone("phone", &self.phone)
            .date("date", &self.date)
            .required("time_slot", &self.time_slot)
            .finish()
    }
}
