//! Cafe model and related functionality

use serde::Serialize;
use sqlx::FromRow;

/// Cafe entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Every mutable column of a cafe
///
/// Used both for creation and for full-replace updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CafeFields {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl Cafe {
    /// The mutable part of this cafe
    pub fn fields(&self) -> CafeFields {
        CafeFields {
            name: self.name.clone(),
            map_url: self.map_url.clone(),
            img_url: self.img_url.clone(),
            location: self.location.clone(),
            seats: self.seats.clone(),
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price.clone(),
        }
    }
}
