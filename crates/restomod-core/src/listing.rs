//! Catalog-adjacent listings: blog posts, brands, job postings and packages

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A blog article as shown in the paged blog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub published_at: Option<OffsetDateTime>,
    pub cover_image: Option<String>,
}

/// A car manufacturer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// An open position at the workshop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

/// A restoration/customization service package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePackage {
    pub id: String,
    pub name: String,
    pub price: Option<f64>,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}
