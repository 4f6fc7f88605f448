//! The list query: cross-entity lookups followed by the list call.

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiError, Backend, Params, extract_id};
use crate::entity::Entity;
use crate::listing::criteria::{FilterCriteria, FilterKind};
use crate::listing::page::{PageRequest, PaginationStrategy, ResultPage};

/// Criteria and page a fetch was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub criteria: FilterCriteria,
    pub page: PageRequest,
}

/// What a fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<E> {
    /// A page the server sliced and counted.
    Page(ResultPage<E>),
    /// The whole collection, to be filtered and sliced locally.
    All(Vec<E>),
}

/// Run `query` for entity `E` against `backend`.
///
/// Lookup filters are first resolved into identifiers through a search on the
/// related resource, capped at `lookup_limit` matches. A lookup that matches
/// nothing short-circuits to an empty page without calling the list endpoint.
pub async fn fetch<E: Entity>(
    backend: &dyn Backend,
    query: &ListQuery,
    lookup_limit: usize,
) -> Result<Fetched<E>, ApiError> {
    if E::STRATEGY == PaginationStrategy::FetchAllLocal {
        let envelope = backend.list(E::RESOURCE, &Params::new()).await?;
        return Ok(Fetched::All(decode(envelope.data)));
    }

    let mut params: Params = vec![
        ("page".to_string(), query.page.number.to_string()),
        ("limit".to_string(), query.page.size.to_string()),
    ];

    for field in E::filter_fields() {
        let Some(value) = query.criteria.get(field.key) else {
            continue;
        };
        match field.kind {
            FilterKind::Lookup { resource, param } => {
                let ids = resolve_lookup(backend, resource, value, lookup_limit).await?;
                if ids.is_empty() {
                    debug!(resource, value, "lookup matched nothing");
                    return Ok(Fetched::Page(ResultPage::empty()));
                }
                params.push((param.to_string(), ids.join(",")));
            }
            _ => params.push((field.key.to_string(), value.to_string())),
        }
    }

    let envelope = backend.list(E::RESOURCE, &params).await?;
    let items = decode(envelope.data);
    Ok(match envelope.total {
        Some(total) => Fetched::Page(ResultPage::from_server(items, total, query.page.size)),
        None => {
            debug!(resource = E::RESOURCE, "list answered without a total");
            Fetched::All(items)
        }
    })
}

async fn resolve_lookup(
    backend: &dyn Backend,
    resource: &str,
    text: &str,
    limit: usize,
) -> Result<Vec<String>, ApiError> {
    let params: Params = vec![
        ("page".to_string(), "1".to_string()),
        ("limit".to_string(), limit.to_string()),
        ("search".to_string(), text.to_string()),
    ];
    let envelope = backend.list(resource, &params).await?;
    Ok(envelope.data.iter().filter_map(extract_id).take(limit).collect())
}

fn decode<E: Entity>(data: Vec<Value>) -> Vec<E> {
    data.into_iter()
        .filter_map(|raw| match serde_json::from_value::<E>(raw) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(resource = E::RESOURCE, %err, "skipping unreadable record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::entity::{Attendance, Faq, User};
    use crate::listing::page::PageSize;

    fn query(criteria: FilterCriteria, number: usize, size: usize) -> ListQuery {
        ListQuery {
            criteria,
            page: PageRequest {
                number,
                size: PageSize::try_from(size).unwrap(),
            },
        }
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_server_fetch_sends_page_and_filters() {
        let backend = FakeBackend::new().with_list(
            "user",
            vec![json!({"_id": "u1", "name": "Ada"})],
            Some(31),
        );
        let q = query(FilterCriteria::new().with("status", "Y"), 2, 25);

        let fetched = fetch::<User>(&backend, &q, 100).await.unwrap();

        let Fetched::Page(page) = fetched else {
            panic!("expected a server page");
        };
        assert_eq!(page.total_count, 31);
        assert_eq!(page.total_pages, 2);
        assert_eq!(
            backend.list_calls("user"),
            vec![params(&[("page", "2"), ("limit", "25"), ("status", "Y")])]
        );
    }

    #[tokio::test]
    async fn test_lookup_resolves_names_into_ids() {
        let backend = FakeBackend::new()
            .with_list("student", vec![json!({"_id": "s1"}), json!({"_id": "s2"})], Some(2))
            .with_list("attendance", vec![], Some(0));
        let q = query(FilterCriteria::new().with("studentName", "ada"), 1, 10);

        fetch::<Attendance>(&backend, &q, 100).await.unwrap();

        assert_eq!(
            backend.list_calls("student"),
            vec![params(&[("page", "1"), ("limit", "100"), ("search", "ada")])]
        );
        let sent = &backend.list_calls("attendance")[0];
        assert!(sent.contains(&("studentIds".to_string(), "s1,s2".to_string())));
        assert!(!sent.iter().any(|(k, _)| k == "studentName"));
    }

    #[tokio::test]
    async fn test_lookup_is_capped() {
        let students: Vec<_> = (0..150).map(|i| json!({"_id": format!("s{i}")})).collect();
        let backend = FakeBackend::new().with_list("student", students, None);
        let q = query(FilterCriteria::new().with("studentName", "a"), 1, 10);

        fetch::<Attendance>(&backend, &q, 100).await.unwrap();

        let sent = &backend.list_calls("attendance")[0];
        let ids = sent.iter().find(|(k, _)| k == "studentIds").unwrap();
        assert_eq!(ids.1.split(',').count(), 100);
    }

    #[tokio::test]
    async fn test_empty_lookup_skips_list_call() {
        let backend = FakeBackend::new().with_list("student", vec![], Some(0));
        let q = query(FilterCriteria::new().with("studentName", "nobody"), 1, 10);

        let fetched = fetch::<Attendance>(&backend, &q, 100).await.unwrap();

        assert_eq!(fetched, Fetched::Page(ResultPage::empty()));
        assert!(backend.list_calls("attendance").is_empty());
    }

    #[tokio::test]
    async fn test_local_strategy_fetches_everything_without_params() {
        let backend = FakeBackend::new().with_list(
            "faq",
            vec![json!({"_id": "f1", "question": "Q?"}), json!("garbage")],
            None,
        );
        let q = query(FilterCriteria::new().with("question", "Q"), 3, 10);

        let fetched = fetch::<Faq>(&backend, &q, 100).await.unwrap();

        let Fetched::All(items) = fetched else {
            panic!("expected the full collection");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(backend.list_calls("faq"), vec![Params::new()]);
    }

    #[tokio::test]
    async fn test_bare_array_on_server_strategy_is_kept_whole() {
        let backend = FakeBackend::new().with_list(
            "user",
            vec![json!({"_id": "u1"}), json!({"_id": "u2"})],
            None,
        );
        let fetched = fetch::<User>(&backend, &query(FilterCriteria::new(), 1, 10), 100)
            .await
            .unwrap();
        assert!(matches!(fetched, Fetched::All(items) if items.len() == 2));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let backend = FakeBackend::new().with_list_error("user", ApiError::Timeout);
        let err = fetch::<User>(&backend, &query(FilterCriteria::new(), 1, 10), 100)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Timeout);
    }
}
