mod support;

use esorm_query::{Error, QueryBuilder, QueryOutput, RangeMode, SortDirection};
use serde_json::json;
use std::sync::Arc;
use support::{Call, RecordingService};

fn builder(service: &Arc<RecordingService>) -> QueryBuilder {
    QueryBuilder::for_index(service.clone(), "products")
}

#[tokio::test]
async fn get_sends_the_introspected_request() {
    let service = Arc::new(RecordingService::new());
    let mut query = builder(&service);
    query
        .select(["name"])
        .where_eq("status", "active")
        .where_gte("price", 5.0)
        .order_by("price", "asc")
        .limit(10);

    let expected = query.to_request().unwrap();
    query.get().await.unwrap();

    assert_eq!(
        service.last_call(),
        Some(Call::Search {
            index: expected.index,
            body: expected.body,
        })
    );
}

#[tokio::test]
async fn get_returns_hits_in_engine_order() {
    let service = Arc::new(RecordingService::new().with_search_response(json!({
        "hits": {"hits": [
            {"_id": "2", "_source": {"name": "b"}},
            {"_id": "1", "_source": {"name": "a"}}
        ]}
    })));

    let output = builder(&service).get().await.unwrap();
    let documents = output.into_documents().unwrap();

    let ids: Vec<_> = documents.iter().map(|d| d.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(documents[1].source["name"], "a");
}

#[tokio::test]
async fn terminal_operations_reset_clause_state_but_keep_index() {
    let service = Arc::new(RecordingService::new().with_count_response(json!({"count": 3})));
    let pristine = builder(&service).to_request().unwrap();

    let mut query = builder(&service);
    query
        .select(["name"])
        .where_eq("status", "active")
        .where_not("status", "hidden")
        .where_lt("price", 100.0)
        .order_by("name", "asc")
        .group_by_sorted("brand", 2, "price", SortDirection::Desc)
        .aggr("byBrand", "brand", Some(5))
        .limit(5)
        .offset(10);
    query.get().await.unwrap();
    assert_eq!(query.to_request().unwrap(), pristine);

    query.where_eq("status", "active").limit(1);
    assert_eq!(query.count().await.unwrap(), 3);
    assert_eq!(query.to_request().unwrap(), pristine);

    query.where_eq("status", "active");
    query.find(1).await.unwrap();
    assert_eq!(query.to_request().unwrap(), pristine);

    query.where_eq("status", "active");
    query.find_many([1, 2]).await.unwrap();
    assert_eq!(query.to_request().unwrap(), pristine);
    assert_eq!(query.index_name(), Some("products"));
}

#[tokio::test]
async fn state_is_reset_even_when_the_service_fails() {
    let service = Arc::new(RecordingService::failing());
    let pristine = builder(&service).to_request().unwrap();

    let mut query = builder(&service);
    query.where_eq("status", "active").limit(5);

    let err = query.get().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.to_string(), "Search service error: connection refused");
    assert_eq!(query.to_request().unwrap(), pristine);
}

#[tokio::test]
async fn every_terminal_operation_resets_on_failure() {
    let service = Arc::new(RecordingService::failing());
    let pristine = builder(&service).to_request().unwrap();
    let mut query = builder(&service);

    query.where_eq("status", "active").order_by("name", "asc");
    assert!(matches!(query.count().await, Err(Error::Transport(_))));
    assert_eq!(query.to_request().unwrap(), pristine);

    query.where_eq("status", "active").limit(3);
    assert!(matches!(query.find(7).await, Err(Error::Transport(_))));
    assert_eq!(query.to_request().unwrap(), pristine);

    query.select(["name"]).group_by("brand", 2);
    assert!(matches!(query.find_many([7, 8]).await, Err(Error::Transport(_))));
    assert_eq!(query.to_request().unwrap(), pristine);

    assert_eq!(service.calls().len(), 3);
    assert_eq!(query.index_name(), Some("products"));
}

#[tokio::test]
async fn aggregation_query_returns_buckets() {
    let service = Arc::new(RecordingService::new().with_search_response(json!({
        "hits": {"hits": []},
        "aggregations": {
            "byCategory": {"buckets": [
                {"key": "books", "doc_count": 4},
                {"key": "games", "doc_count": 1}
            ]}
        }
    })));

    let mut query = builder(&service);
    query.aggr("byCategory", "category", None);
    let buckets = query.get().await.unwrap().into_buckets().unwrap();

    assert_eq!(buckets["byCategory"].len(), 2);
    assert_eq!(buckets["byCategory"][0]["key"], "books");

    let Some(Call::Search { body, .. }) = service.last_call() else {
        panic!("expected a search call");
    };
    assert_eq!(body["_source"], json!(false));
    assert_eq!(
        body["aggs"],
        json!({"byCategory": {"terms": {"field": "category"}}})
    );
}

#[tokio::test]
async fn keyed_aggregation_buckets_are_kept() {
    let service = Arc::new(RecordingService::new().with_search_response(json!({
        "hits": {"hits": []},
        "aggregations": {
            "byStatus": {"buckets": {
                "errors": {"doc_count": 2},
                "warnings": {"doc_count": 5}
            }}
        }
    })));

    let mut query = builder(&service);
    query.aggr_raw(
        "byStatus",
        json!({"filters": {"filters": {
            "errors": {"term": {"level": "error"}},
            "warnings": {"term": {"level": "warn"}}
        }}}),
    );
    let buckets = query.get().await.unwrap().into_buckets().unwrap();

    assert_eq!(buckets["byStatus"].len(), 2);
    assert_eq!(buckets["byStatus"][0], json!({"key": "errors", "doc_count": 2}));
    assert_eq!(buckets["byStatus"][1]["key"], "warnings");
}

#[tokio::test]
async fn count_strips_everything_but_the_query() {
    let service = Arc::new(RecordingService::new().with_count_response(json!({"count": 42})));

    let mut query = builder(&service);
    query
        .select(["name"])
        .where_eq("status", "active")
        .aggr("byBrand", "brand", None)
        .order_by("price", "desc")
        .group_by("brand", 2)
        .limit(5)
        .offset(5);
    assert_eq!(query.count().await.unwrap(), 42);

    assert_eq!(
        service.last_call(),
        Some(Call::Count {
            index: "products".into(),
            body: json!({"query": {"bool": {
                "filter": [],
                "must": [{"term": {"status": "active"}}],
                "must_not": []
            }}}),
        })
    );
}

#[tokio::test]
async fn count_defaults_to_zero_when_absent() {
    let service = Arc::new(RecordingService::new());
    assert_eq!(builder(&service).count().await.unwrap(), 0);
}

#[tokio::test]
async fn find_returns_none_for_missing_document() {
    let service = Arc::new(RecordingService::new().with_document("10", json!({"name": "lamp"})));
    let mut query = builder(&service);

    let found = query.find(10).await.unwrap().unwrap();
    assert_eq!(found.source["name"], "lamp");
    assert!(query.find(11).await.unwrap().is_none());
}

#[tokio::test]
async fn find_many_flags_each_requested_id() {
    let service = Arc::new(RecordingService::new().with_document("10", json!({"name": "lamp"})));

    let docs = builder(&service).find_many([10, 11]).await.unwrap();
    assert_eq!(docs.len(), 2);
    assert!(docs[0].is_found());
    assert!(!docs[1].is_found());
    assert_eq!(
        service.last_call(),
        Some(Call::MultiGet {
            index: "products".into(),
            ids: vec!["10".into(), "11".into()],
        })
    );
}

#[tokio::test]
async fn executing_without_index_fails_without_dispatch() {
    let service = Arc::new(RecordingService::new());
    let mut query = QueryBuilder::new(service.clone());
    query.where_eq("status", "active");

    assert!(matches!(query.get().await, Err(Error::MissingIndex)));
    assert!(matches!(query.count().await, Err(Error::MissingIndex)));
    assert!(service.calls().is_empty());

    query.index("products");
    assert!(matches!(
        query.get().await.unwrap(),
        QueryOutput::Documents(docs) if docs.is_empty()
    ));
}

#[tokio::test]
async fn legacy_range_mode_keeps_only_latest_bound() {
    let service = Arc::new(RecordingService::new());
    let mut query = builder(&service).with_range_mode(RangeMode::LastWins);
    query.where_gt("price", 10.0).where_lt("price", 5.0);
    query.get().await.unwrap();

    let Some(Call::Search { body, .. }) = service.last_call() else {
        panic!("expected a search call");
    };
    assert_eq!(
        body["query"]["bool"]["filter"],
        json!([{"range": {"price": {"lt": 5.0}}}])
    );
}
