//! Request assembly for the xapian-bridge service.

use ekn_query::QueryDescription;
use url::Url;

use crate::error::BridgeError;

const QUERY_ENDPOINT: &str = "/query";
const FIX_ENDPOINT: &str = "/fix";

/// Handle on a running xapian-bridge instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XapianBridge {
    /// Hostname of the xapian-bridge service.
    pub host: String,
    pub port: u16,
    /// ISO 639 language code used for term stemming and spelling
    /// correction; empty to skip language-specific handling.
    pub language: String,
}

impl Default for XapianBridge {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3004,
            language: String::new(),
        }
    }
}

impl XapianBridge {
    /// Build the `/query` request uri for a query description.
    ///
    /// `domain_params` carry the per-database parameters the caller's domain
    /// layer resolved (shard path, manifest path). Parameters with empty
    /// values are omitted entirely, as are `limit` when unbounded and
    /// `sortBy` when the sort criterion has no value slot.
    pub fn query_uri(
        &self,
        query: &QueryDescription,
        domain_params: &[(String, String)],
    ) -> Result<Url, BridgeError> {
        let compiled = query.compile()?;

        let mut params: Vec<(String, String)> = vec![
            ("cutoff".to_string(), query.cutoff().to_string()),
            ("lang".to_string(), self.language.clone()),
        ];
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params.push(("offset".to_string(), query.offset.to_string()));
        params.push(("order".to_string(), compiled.order.as_param().to_string()));
        params.push(("q".to_string(), compiled.query_parser_string));
        if let Some(sort_value) = compiled.sort_value {
            params.push(("sortBy".to_string(), sort_value.to_string()));
        }

        self.build_uri(QUERY_ENDPOINT, domain_params, &params)
    }

    /// Build the `/fix` request uri, asking the service for a
    /// stopword-corrected version of the raw search terms.
    pub fn fix_uri(
        &self,
        query: &QueryDescription,
        domain_params: &[(String, String)],
    ) -> Result<Url, BridgeError> {
        let params = [("q".to_string(), query.search_terms.clone())];
        self.build_uri(FIX_ENDPOINT, domain_params, &params)
    }

    fn build_uri(
        &self,
        endpoint: &str,
        domain_params: &[(String, String)],
        params: &[(String, String)],
    ) -> Result<Url, BridgeError> {
        let mut uri = Url::parse(&format!("http://{}:{}{}", self.host, self.port, endpoint))?;
        {
            let mut pairs = uri.query_pairs_mut();
            for (key, value) in domain_params.iter().chain(params.iter()) {
                if value.is_empty() {
                    continue;
                }
                pairs.append_pair(key, value);
            }
        }
        Ok(uri)
    }
}

#[cfg(feature = "native")]
mod native {
    use ekn_query::QueryDescription;
    use url::Url;

    use super::XapianBridge;
    use crate::error::BridgeError;
    use crate::results::{parse_query_results, FixedQuery, QueryResults};

    impl XapianBridge {
        /// Send a query and decode the result envelope.
        pub async fn query(
            &self,
            query: &QueryDescription,
            domain_params: &[(String, String)],
        ) -> Result<QueryResults, BridgeError> {
            let uri = self.query_uri(query, domain_params)?;
            tracing::debug!(%uri, "querying xapian-bridge");
            let body = self.fetch(uri).await?;
            Ok(parse_query_results(&body)?)
        }

        /// Ask the service for a stopword-corrected version of the query
        /// and return a description with the correction applied.
        pub async fn get_fixed_query(
            &self,
            query: &QueryDescription,
            domain_params: &[(String, String)],
        ) -> Result<QueryDescription, BridgeError> {
            let uri = self.fix_uri(query, domain_params)?;
            tracing::debug!(%uri, "fetching query correction");
            let body = self.fetch(uri).await?;
            let fixed: FixedQuery = serde_json::from_str(&body)?;
            Ok(fixed.apply(query))
        }

        async fn fetch(&self, uri: Url) -> Result<String, BridgeError> {
            let response = reqwest::get(uri.clone()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(BridgeError::Status {
                    status: status.as_u16(),
                    uri: uri.to_string(),
                });
            }
            Ok(response.text().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ekn_query::{QueryMode, SortCriterion, SortOrder};
    use std::collections::HashMap;

    fn query_params(uri: &Url) -> HashMap<String, String> {
        uri.query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn assembles_the_query_endpoint() {
        let bridge = XapianBridge::default();
        let query = QueryDescription {
            search_terms: "little search".to_string(),
            mode: QueryMode::Delimited,
            ..Default::default()
        };
        let uri = bridge.query_uri(&query, &[]).unwrap();

        assert_eq!(uri.host_str(), Some("127.0.0.1"));
        assert_eq!(uri.port(), Some(3004));
        assert_eq!(uri.path(), "/query");

        let params = query_params(&uri);
        assert_eq!(
            params["q"],
            "((exact_title:Little_Search) OR (title:little AND title:search))"
        );
        assert_eq!(params["cutoff"], "10");
        assert_eq!(params["order"], "asc");
        assert_eq!(params["offset"], "0");
        assert_eq!(params["sortBy"], "1");
    }

    #[test]
    fn omits_empty_and_absent_parameters() {
        let bridge = XapianBridge::default();
        let query = QueryDescription {
            search_terms: "cats".to_string(),
            sort: SortCriterion::SequenceNumber,
            ..Default::default()
        };
        let uri = bridge.query_uri(&query, &[]).unwrap();
        let params = query_params(&uri);

        // no language configured, unbounded limit, no sort-value slot
        assert!(!params.contains_key("lang"));
        assert!(!params.contains_key("limit"));
        assert!(!params.contains_key("sortBy"));
    }

    #[test]
    fn carries_pagination_language_and_domain_params() {
        let bridge = XapianBridge {
            language: "en".to_string(),
            ..Default::default()
        };
        let query = QueryDescription {
            search_terms: "cats".to_string(),
            limit: Some(25),
            offset: 50,
            order: SortOrder::Descending,
            ..Default::default()
        };
        let domain_params = [("path".to_string(), "/var/lib/content/db".to_string())];
        let uri = bridge.query_uri(&query, &domain_params).unwrap();
        let params = query_params(&uri);

        assert_eq!(params["lang"], "en");
        assert_eq!(params["limit"], "25");
        assert_eq!(params["offset"], "50");
        assert_eq!(params["order"], "desc");
        assert_eq!(params["path"], "/var/lib/content/db");
    }

    #[test]
    fn match_all_terms_tightens_the_cutoff() {
        let bridge = XapianBridge::default();
        let query = QueryDescription {
            search_terms: "cats".to_string(),
            match_all_terms: true,
            ..Default::default()
        };
        let uri = bridge.query_uri(&query, &[]).unwrap();
        assert_eq!(query_params(&uri)["cutoff"], "20");
    }

    #[test]
    fn invalid_ids_fail_before_any_uri_is_built() {
        let bridge = XapianBridge::default();
        let query = QueryDescription {
            ids: vec!["ekn://bad1/somehash".to_string()],
            ..Default::default()
        };
        let err = bridge.query_uri(&query, &[]).unwrap_err();
        assert!(matches!(err, BridgeError::Query(_)));
    }

    #[test]
    fn fix_endpoint_sends_the_raw_terms() {
        let bridge = XapianBridge::default();
        let query = QueryDescription {
            search_terms: "the best cats".to_string(),
            ..Default::default()
        };
        let uri = bridge.fix_uri(&query, &[]).unwrap();
        assert_eq!(uri.path(), "/fix");
        assert_eq!(query_params(&uri)["q"], "the best cats");
    }
}
