use loadreport_common::{
    AnalysisResult, EndpointMetrics, EndpointTable, Priority, Recommendation, RecommendationKind,
    Sample, SampleError, SummaryMetrics,
};

fn endpoint(label: &str, requests: u64) -> EndpointMetrics {
    EndpointMetrics {
        label: label.to_string(),
        requests,
        errors: 0,
        error_rate: 0.0,
        avg: 10.0,
        min: 10,
        max: 10,
        p50: 10,
        p90: 10,
        p95: 10,
        p99: 10,
    }
}

fn summary() -> SummaryMetrics {
    SummaryMetrics {
        total_requests: 3,
        total_errors: 0,
        error_rate: 0.0,
        throughput: 1.5,
        total_bytes: 300,
        duration: 2.0,
        start_time: 1_000,
        end_time: 3_000,
    }
}

#[test]
fn test_sample_rejects_empty_label() {
    assert_eq!(Sample::new("", 1_000, 10, true, 0), Err(SampleError::EmptyLabel));
    assert_eq!(SampleError::EmptyLabel.to_string(), "label must not be empty");

    let s = Sample::new("login", 1_000, 10, false, 42).unwrap();
    assert_eq!(s.label(), "login");
    assert_eq!(s.timestamp(), 1_000);
    assert_eq!(s.elapsed(), 10);
    assert!(!s.success());
    assert_eq!(s.bytes(), 42);
}

#[test]
fn test_endpoint_table_keeps_first_seen_order() {
    let mut table = EndpointTable::new();
    table.insert(endpoint("search", 1));
    table.insert(endpoint("login", 1));
    table.insert(endpoint("checkout", 1));

    let labels: Vec<&str> = table.labels().collect();
    assert_eq!(labels, vec!["search", "login", "checkout"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("login").map(|m| m.requests), Some(1));
    assert!(table.get("missing").is_none());
}

#[test]
fn test_endpoint_table_replace_keeps_position() {
    let mut table = EndpointTable::new();
    table.insert(endpoint("a", 1));
    table.insert(endpoint("b", 1));
    table.insert(endpoint("a", 9));

    let labels: Vec<&str> = table.labels().collect();
    assert_eq!(labels, vec!["a", "b"]);
    assert_eq!(table.get("a").map(|m| m.requests), Some(9));
}

#[test]
fn test_endpoint_table_serializes_as_ordered_array() {
    let table = EndpointTable::from(vec![endpoint("z", 1), endpoint("a", 2)]);
    let json = serde_json::to_value(&table).unwrap();
    let arr = json.as_array().expect("table should serialize as an array");
    assert_eq!(arr[0]["label"], "z");
    assert_eq!(arr[1]["label"], "a");

    let decoded: EndpointTable = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, table);
    assert_eq!(decoded.get("a").map(|m| m.requests), Some(2));
}

#[test]
fn test_recommendation_serializes_snake_case() {
    let rec = Recommendation {
        kind: RecommendationKind::ResponseTime,
        priority: Priority::High,
        endpoint: Some("login".to_string()),
        message: "login average response time is too long (6000ms)".to_string(),
    };
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["kind"], "response_time");
    assert_eq!(json["priority"], "high");
    assert_eq!(RecommendationKind::ResponseTime.as_name(), "response_time");
    assert_eq!(Priority::Medium.as_name(), "medium");
}

#[test]
fn test_needs_optimization() {
    let mut result = AnalysisResult {
        summary: summary(),
        by_endpoint: EndpointTable::from(vec![endpoint("login", 3)]),
        recommendations: vec![],
    };
    assert!(!result.needs_optimization());

    result.recommendations.push(Recommendation {
        kind: RecommendationKind::Throughput,
        priority: Priority::Medium,
        endpoint: None,
        message: "low".to_string(),
    });
    assert!(result.needs_optimization());
}
