mod common;

use apigauge::config::probe_config::ProbeConfig;
use apigauge::engine::ProbeEngine;
use apigauge::http_probe::prelude::*;
use apigauge::report::{History, render_history};
use apigauge::scoring::FAILED_CYCLE_LATENCY_MS;

use common::{closed_port, local_transport, start_test_server};

#[tokio::test]
async fn hardened_endpoint_scores_full_security_over_plain_http() {
    let addr = start_test_server().await;
    let engine = ProbeEngine::new(local_transport(), History::new());

    let cycle = engine
        .run_probe_cycle(ProbeRequest::new(format!("http://{addr}/hardened"), Method::Get))
        .await
        .unwrap();

    assert_eq!(cycle.outcomes.len(), 3);
    assert!(cycle.outcomes.iter().all(|o| !o.failed));
    let report = cycle.report;
    assert_eq!(report.functionality, 100.0);
    assert_eq!(report.security, 100.0);
    assert!(report.avg_latency_ms < FAILED_CYCLE_LATENCY_MS);
    assert!(report.reliability > 0.0 && report.reliability <= 100.0);
    assert_eq!(report.reliability, report.performance);
}

#[tokio::test]
async fn one_security_header_over_plain_http_scores_75() {
    let addr = start_test_server().await;
    let engine = ProbeEngine::new(local_transport(), History::new());

    let report = engine
        .probe(ProbeRequest::new(format!("http://{addr}/nosniff"), Method::Get))
        .await
        .report;

    assert_eq!(report.security, 75.0);
}

#[tokio::test]
async fn non_200_status_halves_functionality() {
    let addr = start_test_server().await;
    let engine = ProbeEngine::new(local_transport(), History::new());

    let report = engine
        .probe(ProbeRequest::new(format!("http://{addr}/gone"), Method::Delete))
        .await
        .report;

    assert_eq!(report.functionality, 50.0);
    assert_eq!(report.security, 50.0);
    assert_eq!(report.failed_attempts, 0);
}

#[tokio::test]
async fn unreachable_host_yields_zeroed_report() {
    let addr = closed_port().await;
    let engine = ProbeEngine::new(local_transport(), History::new());

    let cycle = engine
        .run_probe_cycle(ProbeRequest::new(format!("http://{addr}/"), Method::Get))
        .await
        .unwrap();

    assert_eq!(cycle.outcomes.len(), 3);
    assert!(cycle.outcomes.iter().all(|o| o.failed));
    let report = cycle.report;
    assert_eq!(report.functionality, 0.0);
    assert_eq!(report.reliability, 0.0);
    assert_eq!(report.performance, 0.0);
    assert_eq!(report.security, 0.0);
    assert_eq!(report.avg_latency_ms, 1000.0);
    assert_eq!(engine.list_history().len(), 1);
}

#[tokio::test]
async fn configured_targets_flow_through_validation_into_history() {
    let addr = start_test_server().await;
    let yaml = format!(
        r#"
targets:
  - url: http://{addr}/private
    auth: Bearer letmein
  - url: http://{addr}/private
  - url: ""
  - url: http://{addr}/hardened
    method: post
    body: '{{"title": "foo"}}'
"#
    );
    let config = ProbeConfig::from_yaml(&yaml).unwrap();
    let engine = ProbeEngine::new(local_transport(), History::new()).with_attempts(2);

    let mut rejected = 0;
    for target in &config.targets {
        match target.to_request() {
            Ok(request) => {
                engine.run_probe_cycle(request).await.unwrap();
            }
            Err(_) => rejected += 1,
        }
    }

    assert_eq!(rejected, 1);
    let history = engine.list_history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].functionality, 100.0);
    assert_eq!(history[1].functionality, 50.0);
    assert_eq!(history[2].method, Method::Post);
    assert_eq!(history[2].attempts, 2);

    let rendered = render_history(&history, None);
    assert_eq!(rendered.matches("Functionality: ").count(), 3);
    assert!(rendered.contains(&format!("| POST | http://{addr}/hardened")));
}
