//! schema.org JSON-LD for the shared page head.
//!
//! Built from `seo.jsonLd` with business facts as fallbacks for the type,
//! name and telephone. Sub-blocks (address, geo, rating, opening hours) are
//! emitted only when the content has them; nothing is invented.

use crate::content::{Business, JsonLd};
use serde_json::{Map, Value, json};

/// Schema.org type used when the content does not name one.
pub const DEFAULT_TYPE: &str = "LocalBusiness";

/// Build the JSON-LD object for the site.
pub fn business_json_ld(business: &Business, json_ld: Option<&JsonLd>) -> Value {
    let empty = JsonLd::default();
    let ld = json_ld.unwrap_or(&empty);

    let mut obj = Map::new();
    obj.insert("@context".into(), json!("https://schema.org"));
    obj.insert(
        "@type".into(),
        json!(ld.kind.as_deref().unwrap_or(DEFAULT_TYPE)),
    );
    obj.insert(
        "name".into(),
        json!(ld.name.as_deref().unwrap_or(business.name.as_str())),
    );
    obj.insert(
        "telephone".into(),
        json!(ld.telephone.as_deref().unwrap_or(business.phone.as_str())),
    );

    if let Some(address) = &ld.address {
        let mut addr = Map::new();
        addr.insert("@type".into(), json!("PostalAddress"));
        insert_opt(&mut addr, "streetAddress", address.street_address.as_deref());
        insert_opt(&mut addr, "addressLocality", address.city.as_deref());
        insert_opt(&mut addr, "addressRegion", address.state.as_deref());
        insert_opt(&mut addr, "postalCode", address.zip.as_deref());
        obj.insert("address".into(), Value::Object(addr));
    }

    if let Some(geo) = &ld.geo {
        obj.insert(
            "geo".into(),
            json!({
                "@type": "GeoCoordinates",
                "latitude": geo.latitude,
                "longitude": geo.longitude,
            }),
        );
    }

    if let Some(hours) = &ld.opening_hours {
        obj.insert("openingHours".into(), json!(hours));
    }

    if let Some(rating) = &ld.aggregate_rating {
        obj.insert(
            "aggregateRating".into(),
            json!({
                "@type": "AggregateRating",
                "ratingValue": rating.rating_value,
                "reviewCount": rating.review_count,
            }),
        );
    }

    Value::Object(obj)
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value {
        map.insert(key.into(), json!(v));
    }
}

/// Serialize for embedding in a `<script>` element.
///
/// `</` is escaped so content cannot close the script tag early.
pub fn to_script_body(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
