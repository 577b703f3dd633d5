use serde::Serialize;

use crate::proto::ProductResponse;

/// Locally exposed shape of a remote product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// Field-for-field copy of a wire record. No validation.
pub fn translate_to_local(remote: ProductResponse) -> ProductSummary {
    ProductSummary {
        id: remote.id,
        name: remote.name,
        price: remote.price,
        description: remote.description,
    }
}

impl From<ProductResponse> for ProductSummary {
    fn from(remote: ProductResponse) -> Self {
        translate_to_local(remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_keeps_every_field() {
        let remote = ProductResponse {
            id: 7,
            name: "Widget".to_string(),
            price: 19.99,
            description: "d".to_string(),
        };

        let local = translate_to_local(remote);

        assert_eq!(
            local,
            ProductSummary {
                id: 7,
                name: "Widget".to_string(),
                price: 19.99,
                description: "d".to_string(),
            }
        );
    }

    #[test]
    fn default_wire_record_translates_to_empty_fields() {
        let local = ProductSummary::from(ProductResponse::default());
        assert_eq!(local.id, 0);
        assert!(local.name.is_empty());
        assert!(local.description.is_empty());
    }

    #[test]
    fn summary_serializes_all_four_fields() {
        let json = serde_json::to_value(ProductSummary {
            id: 1,
            name: "Product 1".to_string(),
            price: 50.0,
            description: "First product".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Product 1",
                "price": 50.0,
                "description": "First product",
            })
        );
    }
}
