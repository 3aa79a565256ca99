//! Search filter parameters for `/offers/search`.

use crate::models::CardType;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Filters for the offer search endpoint. Multi-valued filters are sent as
/// repeated query pairs (`bankId=1&bankId=2`), which is what the service
/// expects for its `IN` semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub country: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub bank_ids: Vec<i64>,
    pub card_types: Vec<CardType>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SearchParams {
    /// Render the filters as query pairs. Location filters are emitted only
    /// when set; `page` and `size` are always present with their defaults.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for (key, value) in [
            ("country", &self.country),
            ("province", &self.province),
            ("district", &self.district),
            ("city", &self.city),
        ] {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        }

        for id in &self.bank_ids {
            pairs.push(("bankId".to_string(), id.to_string()));
        }
        for card_type in &self.card_types {
            pairs.push(("cardType".to_string(), card_type_param(*card_type)));
        }

        pairs.push(("page".to_string(), self.page.unwrap_or(0).to_string()));
        pairs.push((
            "size".to_string(),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
        ));
        pairs
    }
}

fn card_type_param(card_type: CardType) -> String {
    match card_type {
        CardType::Credit => "CREDIT".to_string(),
        CardType::Debit => "DEBIT".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_params_emit_only_paging_defaults() {
        let pairs = SearchParams::default().to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn multi_valued_filters_repeat_the_key() {
        let params = SearchParams {
            bank_ids: vec![1, 5],
            card_types: vec![CardType::Credit, CardType::Debit],
            ..SearchParams::default()
        };
        let pairs = params.to_query_pairs();

        let bank_values: Vec<_> = pairs
            .iter()
            .filter(|(k, _)| k == "bankId")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(bank_values, vec!["1", "5"]);

        let card_values: Vec<_> = pairs
            .iter()
            .filter(|(k, _)| k == "cardType")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(card_values, vec!["CREDIT", "DEBIT"]);
    }

    #[test]
    fn location_filters_emit_only_when_set() {
        let params = SearchParams {
            country: Some("LK".into()),
            city: Some("Colombo".into()),
            page: Some(2),
            size: Some(50),
            ..SearchParams::default()
        };
        let pairs = params.to_query_pairs();

        assert!(pairs.contains(&("country".to_string(), "LK".to_string())));
        assert!(pairs.contains(&("city".to_string(), "Colombo".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "province"));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("size".to_string(), "50".to_string())));
    }
}
