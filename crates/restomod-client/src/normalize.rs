//! Backend record normalization
//!
//! The backend names fields in Italian and is inconsistent about shapes
//! (`costruttore` may be populated or a bare reference, images may be
//! objects or strings, prices may arrive as strings). Everything is mapped
//! to the canonical core types here, once, so nothing downstream needs
//! fallback chains.
//!
//! Records are repaired where possible and skipped (with a warning) only
//! when they lack an identifier.

use restomod_core::{BlogPost, Brand, CatalogItem, ItemStatus, JobPosting, ServicePackage};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::FetchCause;

const ID_KEYS: &[&str] = &["_id", "id"];

/// Totals reported alongside a page of blog posts
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPage {
    pub posts: Vec<BlogPost>,
    pub total_pages: Option<u32>,
    pub total_posts: Option<u64>,
}

pub fn restomods(body: Value) -> Result<Vec<CatalogItem>, FetchCause> {
    records(body, &["restomods", "data"])
        .map(|list| list.iter().filter_map(restomod).collect())
}

pub fn brands(body: Value) -> Result<Vec<Brand>, FetchCause> {
    records(body, &["brands", "data"]).map(|list| list.iter().filter_map(brand).collect())
}

pub fn jobs(body: Value) -> Result<Vec<JobPosting>, FetchCause> {
    records(body, &["jobs", "data"]).map(|list| list.iter().filter_map(job).collect())
}

pub fn packages(body: Value) -> Result<Vec<ServicePackage>, FetchCause> {
    records(body, &["packages", "pacchetti", "data"])
        .map(|list| list.iter().filter_map(package).collect())
}

pub fn blog_page(body: Value) -> Result<BlogPage, FetchCause> {
    let Value::Object(fields) = body else {
        return Err(FetchCause::Shape(
            "blog listing must be a JSON object".to_string(),
        ));
    };
    let envelope = Record(&fields);

    let posts = ["posts", "articoli", "data"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_array))
        .ok_or_else(|| FetchCause::Shape("blog listing has no posts array".to_string()))?;

    Ok(BlogPage {
        posts: posts.iter().filter_map(blog_post).collect(),
        total_pages: envelope
            .number(&["totalPages", "pagineTotali"])
            .and_then(|n| u32::try_from(n as u64).ok()),
        total_posts: envelope
            .number(&["totalPosts", "total", "totalCount"])
            .map(|n| n as u64),
    })
}

/// Accept a bare array, or an object wrapping the array under one of `keys`.
fn records(body: Value, keys: &[&str]) -> Result<Vec<Value>, FetchCause> {
    match body {
        Value::Array(list) => Ok(list),
        Value::Object(mut fields) => keys
            .iter()
            .find_map(|key| match fields.remove(*key) {
                Some(Value::Array(list)) => Some(list),
                _ => None,
            })
            .ok_or_else(|| {
                FetchCause::Shape(format!("expected an array under one of {:?}", keys))
            }),
        other => Err(FetchCause::Shape(format!(
            "expected an array, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn as_record(value: &Value) -> Option<Record<'_>> {
    match value {
        Value::Object(fields) => Some(Record(fields)),
        other => {
            warn!("Skipping record that is {} instead of an object", kind_of(other));
            None
        }
    }
}

fn restomod(value: &Value) -> Option<CatalogItem> {
    let record = as_record(value)?;
    let id = record.required_id("restomod")?;

    let price = record.number(&["prezzo", "price"]);
    if let Some(raw) = price
        && !(raw.is_finite() && raw >= 0.0)
    {
        warn!("Restomod {} has invalid price {}; treating as missing", id, raw);
    }

    let mut item = CatalogItem::new(
        id,
        record
            .text(&["nome", "name", "modello", "titolo"])
            .unwrap_or_default(),
    )
    .with_images(record.urls(&["immagini", "images"]))
    .with_status(
        record
            .text(&["stato", "status"])
            .map(|raw| ItemStatus::from_backend(&raw))
            .unwrap_or(ItemStatus::Unknown),
    );

    if let Some(price) = price {
        item = item.with_price(price);
    }
    item.brand_name = record.reference_name(&["costruttore", "brand", "marca"]);
    item.description = record.text(&["descrizione", "description"]);

    Some(item)
}

fn brand(value: &Value) -> Option<Brand> {
    let record = as_record(value)?;
    Some(Brand {
        id: record.required_id("brand")?,
        name: record.text(&["nome", "name"]).unwrap_or_default(),
        country: record.text(&["nazione", "paese", "country"]),
        description: record.text(&["descrizione", "description"]),
        logo_url: record.url(&["logo", "logoUrl"]),
    })
}

fn job(value: &Value) -> Option<JobPosting> {
    let record = as_record(value)?;
    Some(JobPosting {
        id: record.required_id("job")?,
        title: record
            .text(&["titolo", "title", "posizione"])
            .unwrap_or_default(),
        department: record.text(&["reparto", "department"]),
        location: record.text(&["sede", "location", "luogo"]),
        employment_type: record.text(&["tipoContratto", "tipo", "employmentType"]),
        description: record.text(&["descrizione", "description"]),
        active: record.flag(&["attivo", "active"]).unwrap_or(true),
    })
}

fn package(value: &Value) -> Option<ServicePackage> {
    let record = as_record(value)?;
    Some(ServicePackage {
        id: record.required_id("package")?,
        name: record.text(&["nome", "name"]).unwrap_or_default(),
        price: record
            .number(&["prezzo", "price"])
            .filter(|p| p.is_finite() && *p >= 0.0),
        description: record.text(&["descrizione", "description"]),
        features: record.strings(&["caratteristiche", "features", "servizi"]),
    })
}

fn blog_post(value: &Value) -> Option<BlogPost> {
    let record = as_record(value)?;
    Some(BlogPost {
        id: record.required_id("blog post")?,
        title: record.text(&["titolo", "title"]).unwrap_or_default(),
        slug: record.text(&["slug"]),
        excerpt: record.text(&["estratto", "riassunto", "excerpt"]),
        category: record.text(&["categoria", "category"]),
        author: record.reference_name(&["autore", "author"]),
        published_at: record.timestamp(&["dataPubblicazione", "publishedAt", "createdAt"]),
        cover_image: record.url(&["immagine", "copertina", "coverImage"]),
    })
}

/// Read access to one JSON object, always trying keys in the given order
struct Record<'a>(&'a Map<String, Value>);

impl<'a> Record<'a> {
    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    fn required_id(&self, what: &str) -> Option<String> {
        let id = self.id();
        if id.is_none() {
            warn!("Skipping {} without an identifier", what);
        }
        id
    }

    /// String, number, or Mongo extended JSON `{"$oid": "..."}`
    fn id(&self) -> Option<String> {
        match self.first(ID_KEYS)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(fields) => fields
                .get("$oid")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    /// Non-blank string under the first present key
    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Number, or a string holding one
    fn number(&self, keys: &[&str]) -> Option<f64> {
        match self.first(keys)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let parsed = s.trim().parse::<f64>().ok();
                if parsed.is_none() {
                    warn!("Ignoring non-numeric value {:?}", s);
                }
                parsed
            }
            _ => None,
        }
    }

    fn flag(&self, keys: &[&str]) -> Option<bool> {
        match self.first(keys)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "si" | "sì" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Name of a referenced document: populated object (`nome`/`name`) or
    /// a plain name. A bare ObjectId is an unpopulated reference, not a name.
    fn reference_name(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::Object(fields) => Record(fields).text(&["nome", "name"]),
            Value::String(s) if looks_like_object_id(s) => {
                debug!("Unpopulated reference {}", s);
                None
            }
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// URL given directly or as `{ "url": ... }`
    fn url(&self, keys: &[&str]) -> Option<String> {
        self.first(keys).and_then(url_of)
    }

    fn urls(&self, keys: &[&str]) -> Vec<String> {
        match self.first(keys) {
            Some(Value::Array(list)) => list.iter().filter_map(url_of).collect(),
            Some(single) => url_of(single).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn strings(&self, keys: &[&str]) -> Vec<String> {
        match self.first(keys) {
            Some(Value::Array(list)) => list
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn timestamp(&self, keys: &[&str]) -> Option<OffsetDateTime> {
        keys.iter()
            .filter_map(|key| self.0.get(*key).and_then(Value::as_str))
            .find_map(|raw| OffsetDateTime::parse(raw.trim(), &Rfc3339).ok())
    }
}

fn url_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(fields) => Record(fields).text(&["url", "src"]),
        _ => None,
    }
}

fn looks_like_object_id(value: &str) -> bool {
    value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit())
}
