//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::ProductFilter;
use crate::repository::ProductRepository;

/// Escape `$regex` metacharacters so user input matches literally.
///
/// Each of `. * + ? ^ $ { } ( ) | [ ] \` gets a preceding backslash;
/// every other character passes through unchanged. This stops pattern
/// injection only - input length and pathological patterns are not
/// bounded here.
pub fn escape_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(
            ch,
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Document>,
}

impl MongoProductRepository {
    /// Repository over the default `products` collection
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Document>("products");
        Self { collection }
    }

    /// Repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    /// Build the MongoDB filter document from a normalized filter.
    ///
    /// Search text fans out as a case-insensitive `$or` over the keys a
    /// caller might paste (product type, group, product name, insurer
    /// code, broker key); the status filter is uppercased and matched
    /// against the nested product status. With neither present the
    /// filter matches everything.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut mongo_filter = doc! {};

        if let Some(ref search) = filter.search {
            let pattern = escape_pattern(search);
            mongo_filter.insert(
                "$or",
                vec![
                    doc! { "productType.key": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "key": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "productList.productName": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "productList.insurer.insurerCode": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "productList.brokers.key": { "$regex": pattern.as_str(), "$options": "i" } },
                ],
            );
        }

        if let Some(ref status) = filter.status {
            let pattern = escape_pattern(&status.to_uppercase());
            mongo_filter.insert(
                "productList.productStatus",
                doc! { "$regex": pattern, "$options": "i" },
            );
        }

        mongo_filter
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    /// Sort, skip, and limit apply to group documents; flattening happens
    /// after this returns, so a page boundary can split one group's
    /// product list.
    #[instrument(skip(self))]
    async fn find_groups(&self, filter: ProductFilter) -> ProductResult<Vec<Document>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "productList.productName": 1 })
            .skip(filter.skip())
            .limit(filter.limit)
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let groups: Vec<Document> = cursor.try_collect().await?;

        tracing::debug!(count = groups.len(), "fetched group documents");
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_prefixes_every_metacharacter() {
        let input = r".*+?^${}()|[]\";
        let escaped = escape_pattern(input);
        assert_eq!(escaped, r"\.\*\+\?\^\$\{\}\(\)\|\[\]\\");
    }

    #[test]
    fn escape_leaves_plain_text_unchanged() {
        for input in ["Health Saver 123", "MOTOR-2024", "under_score", ""] {
            assert_eq!(escape_pattern(input), input);
        }
    }

    #[test]
    fn escape_touches_only_metacharacters_in_mixed_input() {
        assert_eq!(escape_pattern("a.b*c"), r"a\.b\*c");
        assert_eq!(escape_pattern("(AXA)|MTL"), r"\(AXA\)\|MTL");
    }

    #[test]
    fn build_filter_is_empty_without_search_or_status() {
        let filter_doc = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(filter_doc.is_empty());
    }

    #[test]
    fn build_filter_fans_search_out_over_five_fields() {
        let filter = ProductFilter {
            search: Some("Health".to_string()),
            ..Default::default()
        };
        let filter_doc = MongoProductRepository::build_filter(&filter);

        let clauses = filter_doc.get_array("$or").unwrap();
        let fields: Vec<&str> = clauses
            .iter()
            .map(|clause| {
                clause
                    .as_document()
                    .unwrap()
                    .keys()
                    .next()
                    .unwrap()
                    .as_str()
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                "productType.key",
                "key",
                "productList.productName",
                "productList.insurer.insurerCode",
                "productList.brokers.key",
            ]
        );

        for clause in clauses {
            let clause = clause.as_document().unwrap();
            let matcher = clause.values().next().unwrap().as_document().unwrap();
            assert_eq!(matcher.get_str("$regex").unwrap(), "Health");
            assert_eq!(matcher.get_str("$options").unwrap(), "i");
        }
    }

    #[test]
    fn build_filter_escapes_search_text() {
        let filter = ProductFilter {
            search: Some("a.b".to_string()),
            ..Default::default()
        };
        let filter_doc = MongoProductRepository::build_filter(&filter);

        let clauses = filter_doc.get_array("$or").unwrap();
        let first = clauses[0].as_document().unwrap();
        let matcher = first.get_document("productType.key").unwrap();
        assert_eq!(matcher.get_str("$regex").unwrap(), r"a\.b");
    }

    #[test]
    fn build_filter_uppercases_and_escapes_status() {
        let filter = ProductFilter {
            status: Some("active+".to_string()),
            ..Default::default()
        };
        let filter_doc = MongoProductRepository::build_filter(&filter);

        assert!(!filter_doc.contains_key("$or"));
        let matcher = filter_doc
            .get_document("productList.productStatus")
            .unwrap();
        assert_eq!(matcher.get_str("$regex").unwrap(), r"ACTIVE\+");
        assert_eq!(matcher.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn build_filter_combines_search_and_status() {
        let filter = ProductFilter {
            search: Some("Health".to_string()),
            status: Some("active".to_string()),
            ..Default::default()
        };
        let filter_doc = MongoProductRepository::build_filter(&filter);

        assert!(filter_doc.contains_key("$or"));
        assert!(filter_doc.contains_key("productList.productStatus"));
    }
}
