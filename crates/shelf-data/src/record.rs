//! Decoding catalog records into `Product`.

use serde::Deserialize;
use shelf_commerce::catalog::Product;
use shelf_commerce::{Price, ProductId};

use crate::DecodeError;

/// Record as sent by the catalog service. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    product_id: Option<u64>,
    name: Option<String>,
    color: Option<String>,
    gender: Option<String>,
    #[serde(default)]
    first_image: Option<String>,
    price: Option<RawPrice>,
    status: Option<String>,
    brand: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl RawPrice {
    fn text(&self) -> String {
        match self {
            RawPrice::Text(s) => s.clone(),
            RawPrice::Number(n) => n.to_string(),
        }
    }
}

/// Decode a response body into products, preserving order.
pub fn decode_products(body: &[u8]) -> Result<Vec<Product>, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawRecord = serde_json::from_value(item)
                .map_err(|e| DecodeError::Malformed(format!("record {}: {}", index, e)))?;
            normalize(index, raw)
        })
        .collect()
}

fn normalize(index: usize, raw: RawRecord) -> Result<Product, DecodeError> {
    let missing = |field: &'static str| DecodeError::MissingField { index, field };

    let id = raw.product_id.ok_or_else(|| missing("product_id"))?;
    let name = raw.name.ok_or_else(|| missing("name"))?;
    let color = raw.color.ok_or_else(|| missing("color"))?;
    let gender = raw.gender.ok_or_else(|| missing("gender"))?;
    let status = raw.status.ok_or_else(|| missing("status"))?;
    let brand = raw.brand.ok_or_else(|| missing("brand"))?;
    let price_text = raw.price.ok_or_else(|| missing("price"))?.text();
    let price = Price::parse(&price_text).map_err(|_| DecodeError::InvalidPrice {
        index,
        value: price_text.clone(),
    })?;

    Ok(Product {
        id: ProductId::new(id),
        name,
        brand,
        price,
        status,
        primary_image_url: raw.first_image,
        derived_description: Product::describe(&color, &gender),
    })
}
