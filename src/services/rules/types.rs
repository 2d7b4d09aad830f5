use crate::core::types::QueryArgs;
use serde::{Deserialize, Serialize};

/// Ordered filters for `list_rules`.
///
/// Filters are signed and sent in the order they are added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilters(QueryArgs);

impl RuleFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, e.g. `filter("type", "url")`
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_query_args(&self) -> &QueryArgs {
        &self.0
    }
}

impl From<RuleFilters> for QueryArgs {
    fn from(filters: RuleFilters) -> Self {
        filters.0
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RuleFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single page-hint condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phint {
    pub key: String,
    pub value: String,
    pub operator: String,
}

impl Phint {
    /// `key` equals `value`
    pub fn is(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operator: "is".to_string(),
        }
    }
}

/// Rule subtype, carried in the `type` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RuleKind {
    Phint {
        phints: Vec<Phint>,
    },
    Url {
        urls: Vec<String>,
        #[serde(default)]
        referrer: bool,
        #[serde(default)]
        exact: bool,
    },
}

/// A self-classification rule mapping site data to categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(flatten)]
    pub kind: RuleKind,
    pub partner_id: u64,
    #[serde(default)]
    pub site_ids: Vec<u64>,
    #[serde(default)]
    pub category_ids: Vec<u64>,
}

impl ClassificationRule {
    pub fn phint(name: impl Into<String>, partner_id: u64, phints: Vec<Phint>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: RuleKind::Phint { phints },
            partner_id,
            site_ids: Vec::new(),
            category_ids: Vec::new(),
        }
    }

    pub fn url(name: impl Into<String>, partner_id: u64, urls: Vec<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: RuleKind::Url {
                urls,
                referrer: false,
                exact: false,
            },
            partner_id,
            site_ids: Vec::new(),
            category_ids: Vec::new(),
        }
    }

    pub fn with_site_ids(mut self, site_ids: Vec<u64>) -> Self {
        self.site_ids = site_ids;
        self
    }

    pub fn with_category_ids(mut self, category_ids: Vec<u64>) -> Self {
        self.category_ids = category_ids;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_keep_insertion_order() {
        let filters = RuleFilters::new().filter("type", "url").filter("partner_id", 123);
        let args: QueryArgs = filters.into();

        let keys: Vec<_> = args.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "partner_id"]);
        assert_eq!(args.concatenated_values(), "url123");
    }

    #[test]
    fn test_phint_rule_shape() {
        let rule = ClassificationRule::phint("Phint Example", 123, vec![Phint::is("x", "123")])
            .with_site_ids(vec![1234])
            .with_category_ids(vec![12345]);

        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "name": "Phint Example",
                "type": "phint",
                "phints": [{"key": "x", "value": "123", "operator": "is"}],
                "partner_id": 123,
                "site_ids": [1234],
                "category_ids": [12345]
            })
        );
    }

    #[test]
    fn test_url_rule_parses() {
        let rule: ClassificationRule = serde_json::from_value(json!({
            "id": 77,
            "name": "URL Example",
            "type": "url",
            "urls": ["http://shop.yoursite.com"],
            "referrer": false,
            "exact": false,
            "partner_id": 123,
            "site_ids": [1234],
            "category_ids": [123_456]
        }))
        .unwrap();

        assert_eq!(rule.id, Some(77));
        assert_eq!(
            rule.kind,
            RuleKind::Url {
                urls: vec!["http://shop.yoursite.com".to_string()],
                referrer: false,
                exact: false,
            }
        );
    }
}
