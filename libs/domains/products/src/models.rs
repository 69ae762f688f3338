use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

/// Flattened product entry - one per item of a group document's
/// `productList`, with the parent group's fields copied down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub product_name: String,
    pub product_group: ProductGroup,
    pub product_type: ProductType,
    pub insurer: Insurer,
    pub brokers: Vec<Broker>,
    pub status: String,
}

/// Parent product-group reference carried on every flattened entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductGroup {
    pub name: String,
    pub key: String,
}

/// Parent product-type reference carried on every flattened entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductType {
    pub name: String,
    pub key: String,
}

/// Insurer sub-document of a product entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insurer {
    #[serde(rename = "_id")]
    pub id: String,
    pub insurer_code: String,
    pub insurer_name: String,
}

/// Broker sub-document of a product entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub key: String,
    pub channel_name: String,
}

/// Raw query parameters as they arrive on the wire.
///
/// Everything is an optional string; `page` and `limit` are only parsed
/// during normalization so that garbage values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Free-text search across product, group, insurer, and broker keys
    pub param: Option<String>,
    /// Product status filter (matched case-insensitively)
    pub status: Option<String>,
    /// 1-based page number, defaults to 1
    pub page: Option<String>,
    /// Page size, defaults to 10
    pub limit: Option<String>,
}

/// Normalized filter and pagination window derived from [`ProductQuery`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Non-empty search text, if any
    pub search: Option<String>,
    /// Non-empty status text, if any
    pub status: Option<String>,
    /// 1-based page number, always >= 1
    pub page: i64,
    /// Page size, always >= 1; no upper bound is enforced
    pub limit: i64,
}

impl ProductFilter {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Normalize raw parameters: empty strings become `None`, and any
    /// unparseable or non-positive page/limit silently resets to its
    /// default.
    pub fn from_query(query: ProductQuery) -> Self {
        Self {
            search: query.param.filter(|s| !s.is_empty()),
            status: query.status.filter(|s| !s.is_empty()),
            page: parse_positive(query.page.as_deref(), Self::DEFAULT_PAGE),
            limit: parse_positive(query.limit.as_deref(), Self::DEFAULT_LIMIT),
        }
    }

    /// Number of group documents to skip for this page
    pub fn skip(&self) -> u64 {
        ((self.page - 1) * self.limit) as u64
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Response envelope for the product query endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

impl Product {
    /// Flatten one group document into per-product entries.
    ///
    /// Group documents are loosely typed; shape problems degrade instead
    /// of failing the request:
    /// - `productList` missing or not an array: the group contributes
    ///   zero entries (warned).
    /// - an entry that is not a sub-document: that entry is skipped
    ///   (warned).
    /// - a broker that is not a sub-document: that broker is dropped.
    /// - any missing or non-string leaf field reads as `""`.
    pub fn flatten_group(group: &Document) -> Vec<Product> {
        let entries = match group.get_array("productList") {
            Ok(entries) => entries,
            Err(_) => {
                let group_key = get_str(group, "key");
                warn!(group_key = %group_key, "productList missing or malformed, skipping group");
                return Vec::new();
            }
        };

        let product_group = ProductGroup {
            name: get_str(group, "name"),
            key: get_str(group, "key"),
        };
        let product_type = group
            .get_document("productType")
            .map(|doc| ProductType {
                name: get_str(doc, "name"),
                key: get_str(doc, "key"),
            })
            .unwrap_or_default();

        let mut products = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(doc) = entry.as_document() else {
                warn!(group_key = %product_group.key, "product entry is not a document, skipping");
                continue;
            };

            let insurer = doc
                .get_document("insurer")
                .map(|ins| Insurer {
                    id: get_str(ins, "_id"),
                    insurer_code: get_str(ins, "insurerCode"),
                    insurer_name: get_str(ins, "insurerName"),
                })
                .unwrap_or_default();

            let brokers = doc
                .get_array("brokers")
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Bson::as_document)
                        .map(|broker| Broker {
                            key: get_str(broker, "key"),
                            channel_name: get_str(broker, "channelName"),
                        })
                        .collect()
                })
                .unwrap_or_default();

            products.push(Product {
                id: get_str(doc, "id"),
                product_name: get_str(doc, "productName"),
                product_group: product_group.clone(),
                product_type: product_type.clone(),
                insurer,
                brokers,
                status: get_str(doc, "productStatus"),
            });
        }

        products
    }
}

/// Safe string accessor: missing or non-string fields read as empty.
fn get_str(doc: &Document, key: &str) -> String {
    doc.get_str(key).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn query(
        param: Option<&str>,
        status: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> ProductQuery {
        ProductQuery {
            param: param.map(String::from),
            status: status.map(String::from),
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    fn group_fixture() -> Document {
        doc! {
            "name": "Personal Health",
            "key": "PERSONAL_HEALTH",
            "productType": { "name": "Health", "key": "HEALTH" },
            "productList": [
                {
                    "id": "prd-001",
                    "productName": "Health Saver",
                    "productStatus": "ACTIVE",
                    "insurer": { "_id": "ins-01", "insurerCode": "AXA", "insurerName": "AXA Insurance" },
                    "brokers": [
                        { "key": "BRK-A", "channelName": "Direct" },
                        { "key": "BRK-B", "channelName": "Agent" }
                    ]
                },
                {
                    "id": "prd-002",
                    "productName": "Health Plus",
                    "productStatus": "INACTIVE",
                    "insurer": { "_id": "ins-02", "insurerCode": "MTL", "insurerName": "Muang Thai Life" },
                    "brokers": []
                }
            ]
        }
    }

    #[test]
    fn from_query_applies_defaults_when_absent() {
        let filter = ProductFilter::from_query(ProductQuery::default());
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn from_query_resets_invalid_page_and_limit() {
        for bad in ["0", "-3", "abc", ""] {
            let filter = ProductFilter::from_query(query(None, None, Some(bad), Some(bad)));
            assert_eq!(filter.page, 1, "page {:?}", bad);
            assert_eq!(filter.limit, 10, "limit {:?}", bad);
        }
    }

    #[test]
    fn from_query_keeps_valid_page_and_limit() {
        let filter = ProductFilter::from_query(query(None, None, Some("2"), Some("5")));
        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.skip(), 5);
    }

    #[test]
    fn from_query_drops_empty_strings() {
        let filter = ProductFilter::from_query(query(Some(""), Some(""), None, None));
        assert!(filter.search.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn from_query_keeps_search_and_status() {
        let filter = ProductFilter::from_query(query(Some("Health"), Some("active"), None, None));
        assert_eq!(filter.search.as_deref(), Some("Health"));
        assert_eq!(filter.status.as_deref(), Some("active"));
    }

    #[test]
    fn skip_is_page_minus_one_times_limit() {
        let filter = ProductFilter {
            page: 4,
            limit: 25,
            ..Default::default()
        };
        assert_eq!(filter.skip(), 75);
    }

    #[test]
    fn flatten_copies_parent_fields_onto_every_entry() {
        let products = Product::flatten_group(&group_fixture());

        assert_eq!(products.len(), 2);
        for product in &products {
            assert_eq!(product.product_group.name, "Personal Health");
            assert_eq!(product.product_group.key, "PERSONAL_HEALTH");
            assert_eq!(product.product_type.name, "Health");
            assert_eq!(product.product_type.key, "HEALTH");
        }
        assert_eq!(products[0].id, "prd-001");
        assert_eq!(products[0].product_name, "Health Saver");
        assert_eq!(products[0].status, "ACTIVE");
        assert_eq!(products[0].insurer.insurer_code, "AXA");
        assert_eq!(products[0].brokers.len(), 2);
        assert_eq!(products[1].id, "prd-002");
        assert!(products[1].brokers.is_empty());
    }

    #[test]
    fn flatten_skips_group_without_product_list() {
        let group = doc! { "name": "Empty", "key": "EMPTY" };
        assert!(Product::flatten_group(&group).is_empty());
    }

    #[test]
    fn flatten_skips_group_with_wrongly_typed_product_list() {
        let group = doc! { "name": "Odd", "key": "ODD", "productList": "not-an-array" };
        assert!(Product::flatten_group(&group).is_empty());
    }

    #[test]
    fn flatten_skips_malformed_entries_but_keeps_the_rest() {
        let group = doc! {
            "name": "Mixed",
            "key": "MIXED",
            "productType": { "name": "Motor", "key": "MOTOR" },
            "productList": [
                42,
                { "id": "prd-101", "productName": "Motor One", "productStatus": "ACTIVE" },
                "junk"
            ]
        };

        let products = Product::flatten_group(&group);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "prd-101");
    }

    #[test]
    fn flatten_drops_malformed_brokers_individually() {
        let group = doc! {
            "name": "Brokered",
            "key": "BROKERED",
            "productList": [{
                "id": "prd-201",
                "productName": "Broker Heavy",
                "brokers": [
                    { "key": "BRK-1", "channelName": "Direct" },
                    7,
                    { "key": "BRK-2", "channelName": "Online" }
                ]
            }]
        };

        let products = Product::flatten_group(&group);
        assert_eq!(products.len(), 1);
        let brokers = &products[0].brokers;
        assert_eq!(brokers.len(), 2);
        assert_eq!(brokers[0].key, "BRK-1");
        assert_eq!(brokers[1].key, "BRK-2");
    }

    #[test]
    fn flatten_defaults_missing_leaf_fields_to_empty_strings() {
        let group = doc! {
            "key": "SPARSE",
            "productList": [{ "productName": 123, "insurer": "nope" }]
        };

        let products = Product::flatten_group(&group);
        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.id, "");
        assert_eq!(product.product_name, "");
        assert_eq!(product.status, "");
        assert_eq!(product.product_group.name, "");
        assert_eq!(product.product_group.key, "SPARSE");
        assert_eq!(product.product_type, ProductType::default());
        assert_eq!(product.insurer, Insurer::default());
        assert!(product.brokers.is_empty());
    }

    #[test]
    fn product_serializes_with_wire_field_names() {
        let products = Product::flatten_group(&group_fixture());
        let value = serde_json::to_value(&products[0]).unwrap();

        assert_eq!(value["productName"], "Health Saver");
        assert_eq!(value["productGroup"]["key"], "PERSONAL_HEALTH");
        assert_eq!(value["productType"]["name"], "Health");
        assert_eq!(value["insurer"]["_id"], "ins-01");
        assert_eq!(value["insurer"]["insurerCode"], "AXA");
        assert_eq!(value["brokers"][0]["channelName"], "Direct");
        assert_eq!(value["status"], "ACTIVE");
    }
}
