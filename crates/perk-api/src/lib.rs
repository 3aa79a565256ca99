//! # perk-api
//!
//! Typed HTTP client for the hotel-offers REST service: login/register,
//! bank and offer reads, and bearer-protected offer writes. Unauthorized
//! responses are routed through the session manager's logout handle rather
//! than handled here.

pub mod client;
pub mod error;
pub mod models;
pub mod params;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    Bank, CardType, City, Country, CreateOfferRequest, District, HotelOffer, Location,
    LoginResponse, PaginatedResponse, Province, RegisterRequest,
};
pub use params::SearchParams;
