//! Wire models for the offers service. Field names follow the service's
//! camelCase JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub province: String,
    pub district: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Credit,
    Debit,
}

/// A country in the location hierarchy backing the cascading search filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub name: String,
    /// ISO-style short code, e.g. `"LK"`.
    pub code: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    pub district_id: i64,
    pub is_active: bool,
}

/// A hotel promotion. The service is mid-migration from single `bank` /
/// `cardType` fields to the plural arrays; both shapes still appear, so both
/// are modeled and [`Self::bank_names`] / [`Self::card_type_list`] merge them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
    pub id: i64,
    pub hotel_name: String,
    pub description: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banks: Option<Vec<Bank>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_types: Option<Vec<CardType>>,
    /// Legacy single-bank field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    /// Legacy single-card field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    pub discount: f64,
    pub valid_from: String,
    pub valid_to: String,
    pub terms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

impl HotelOffer {
    /// Participating banks, merging the plural and legacy fields.
    #[must_use]
    pub fn bank_names(&self) -> Vec<&str> {
        if let Some(banks) = &self.banks {
            return banks.iter().map(|b| b.name.as_str()).collect();
        }
        self.bank.iter().map(|b| b.name.as_str()).collect()
    }

    /// Eligible card types, merging the plural and legacy fields.
    #[must_use]
    pub fn card_type_list(&self) -> Vec<CardType> {
        if let Some(types) = &self.card_types {
            return types.clone();
        }
        self.card_type.into_iter().collect()
    }
}

/// Spring-style page envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token scheme, e.g. `"Bearer"`.
    #[serde(rename = "type")]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub hotel_name: String,
    pub description: String,
    pub location: Location,
    pub bank_ids: Vec<i64>,
    pub card_types: Vec<CardType>,
    pub discount: f64,
    pub valid_from: String,
    pub valid_to: String,
    pub terms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
