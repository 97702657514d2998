use std::{fmt, str::FromStr};

use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::AppError;

/// A catalog item as stored in the `items` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64, created_at: OffsetDateTime) -> Self {
        Self {
            name: name.into(),
            price,
            created_at,
            updated_at: None,
        }
    }

    pub fn with_updated_at(mut self, updated_at: OffsetDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Encodes the item as a BSON document using the given timestamp keys.
    pub fn to_document(&self, naming: FieldNaming) -> Document {
        let mut doc = Document::new();
        doc.insert("name", self.name.as_str());
        doc.insert("price", self.price);
        doc.insert(
            naming.created_key(),
            bson::DateTime::from_time_0_3(self.created_at),
        );
        if let Some(updated_at) = self.updated_at {
            doc.insert(
                naming.updated_key(),
                bson::DateTime::from_time_0_3(updated_at),
            );
        }
        doc
    }

    /// Decodes an item written with either timestamp convention.
    pub fn from_document(doc: &Document) -> Result<Self, AppError> {
        let name = doc
            .get_str("name")
            .map_err(|_| AppError::InvalidItem("missing string field `name`".to_string()))?
            .to_string();

        let price = match doc.get("price") {
            Some(Bson::Double(v)) => *v,
            Some(Bson::Int32(v)) => f64::from(*v),
            Some(Bson::Int64(v)) => *v as f64,
            _ => {
                return Err(AppError::InvalidItem(format!(
                    "item {name:?} has no numeric `price`"
                )));
            }
        };

        let created_at = read_timestamp(doc, FieldNaming::created_key).ok_or_else(|| {
            AppError::InvalidItem(format!("item {name:?} has no creation timestamp"))
        })?;
        let updated_at = read_timestamp(doc, FieldNaming::updated_key);

        Ok(Self {
            name,
            price,
            created_at,
            updated_at,
        })
    }
}

fn read_timestamp(doc: &Document, key: fn(FieldNaming) -> &'static str) -> Option<OffsetDateTime> {
    [FieldNaming::Snake, FieldNaming::Camel]
        .into_iter()
        .find_map(|naming| doc.get_datetime(key(naming)).ok())
        .map(|dt| dt.to_time_0_3())
}

/// Key convention for the timestamp fields of persisted items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldNaming {
    /// `created_at` / `updated_at`
    #[default]
    Snake,
    /// `createdAt` / `updatedAt`
    Camel,
}

impl FieldNaming {
    pub fn created_key(self) -> &'static str {
        match self {
            FieldNaming::Snake => "created_at",
            FieldNaming::Camel => "createdAt",
        }
    }

    pub fn updated_key(self) -> &'static str {
        match self {
            FieldNaming::Snake => "updated_at",
            FieldNaming::Camel => "updatedAt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldNaming::Snake => "snake",
            FieldNaming::Camel => "camel",
        }
    }
}

impl fmt::Display for FieldNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldNaming {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(FieldNaming::Snake),
            "camel" | "camelcase" => Ok(FieldNaming::Camel),
            other => Err(AppError::Config(format!(
                "unknown field naming {other:?}, expected `snake` or `camel`"
            ))),
        }
    }
}
