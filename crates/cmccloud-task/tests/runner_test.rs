//! End-to-end orchestration scenarios over a scripted transport

mod common;

use cmccloud_task::{
    ApiErrorOrigin, ApiRequest, CancellationToken, ErrorKind, Params, RawResponse, StateSets,
    TaskError, TaskRunner, TimingProfile,
};
use common::ScriptedTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn stop_request() -> ApiRequest {
    ApiRequest::post("server_action/stop", Params::new().with_id("s-1"))
}

#[tokio::test(start_paused = true)]
async fn test_task_polls_until_done() {
    let transport = ScriptedTransport::new()
        .submits("server_action/stop", "t1")
        .task_states("t1", &["WAIT", "PROCESSING", "DONE"]);
    let runner = TaskRunner::new(&transport);

    let status = assert_ok!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert_eq!(status.id, "t1");
    assert!(status.is_done());
    assert_eq!(status.get::<u32>("progress"), Some(0));
    assert_eq!(transport.queries("t1"), 3);
    assert_eq!(transport.log()[0], "POST server_action/stop {id: s-1}");
}

#[tokio::test(start_paused = true)]
async fn test_submission_error_is_wrapped_and_never_polls() {
    let transport = ScriptedTransport::new().rejects("server_action/stop", 404, "server not found");
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.api_code(), Some(404));
    let message = err.to_string();
    assert!(message.contains("server_action/stop"), "{message}");
    assert!(message.contains("{id: s-1}"), "{message}");
    assert_eq!(transport.log().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_embedded_error_in_ok_submission() {
    let transport = ScriptedTransport::new().on(
        "server_action/stop",
        RawResponse::ok(r#"{"error_code": 12, "error_text": "server is locked"}"#),
    );
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert!(matches!(
        err.innermost(),
        TaskError::Api {
            code: 12,
            origin: ApiErrorOrigin::Embedded,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_on_submission() {
    let transport = ScriptedTransport::new().on(
        "server_action/stop",
        RawResponse::transport_failure("connection refused"),
    );
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_empty_task_id_is_malformed() {
    let transport = ScriptedTransport::new().on(
        "server_action/stop",
        RawResponse::ok(r#"{"jobid": ""}"#),
    );
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert_eq!(err.kind(), ErrorKind::MalformedSubmission);
    assert_eq!(transport.log().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_task_error_state_fails() {
    let transport = ScriptedTransport::new()
        .submits("server_action/stop", "t1")
        .task_states("t1", &["WAIT", "ERROR", "DONE"]);
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert_eq!(err.kind(), ErrorKind::TaskFailed);
    assert!(err.to_string().contains("ERROR"));
    assert_eq!(transport.queries("t1"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_task_with_custom_states() {
    let transport = ScriptedTransport::new()
        .submits("server_action/start", "t1")
        .task_states("t1", &["QUEUED", "RUNNING", "FINISHED"]);
    let runner = TaskRunner::new(&transport);
    let states = StateSets::new(["QUEUED", "RUNNING"], ["FINISHED"]);

    let status = assert_ok!(
        runner
            .run_task_with_states(
                ApiRequest::post("server_action/start", Params::new().with_id("s-1")),
                &states,
                TimingProfile::SHORT,
            )
            .await
    );
    assert_eq!(status.status, "FINISHED");
}

#[tokio::test(start_paused = true)]
async fn test_task_times_out() {
    let transport = ScriptedTransport::new()
        .submits("server_action/stop", "t1")
        .task_states("t1", &["PROCESSING"]);
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(runner.run_task(stop_request(), TimingProfile::SHORT).await);

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.to_string().contains("PROCESSING"));
}

#[tokio::test(start_paused = true)]
async fn test_unpaid_order_never_polls() {
    let transport = ScriptedTransport::new()
        .on(
            "server/create",
            RawResponse::ok(r#"{"jobid": "t1", "price": 120000, "paid": false}"#),
        )
        .task_states("t1", &["DONE"]);
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(
        runner
            .run_order(
                ApiRequest::post("server/create", Params::new().with("name", "web-01")),
                TimingProfile::LONG,
            )
            .await
    );

    match err {
        TaskError::UnpaidOrder {
            action,
            params,
            body,
        } => {
            assert_eq!(action, "server/create");
            assert_eq!(params, "{name: web-01}");
            assert!(body.contains("\"paid\": false"));
        }
        other => panic!("expected UnpaidOrder, got {other:?}"),
    }
    assert_eq!(transport.queries("t1"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_paid_order_waits_for_task() {
    let transport = ScriptedTransport::new()
        .on(
            "volume/resize",
            RawResponse::ok(r#"{"jobid": "t7", "price": 5000, "paid": true}"#),
        )
        .task_states("t7", &["WAIT", "DONE"]);
    let runner = TaskRunner::new(&transport);

    let outcome = assert_ok!(
        runner
            .run_order(
                ApiRequest::post("volume/resize", Params::new().with_id("v-1").with("size", 200)),
                TimingProfile::LONG,
            )
            .await
    );

    assert_eq!(outcome.order.price, 5000);
    assert_eq!(outcome.order.task_id, "t7");
    assert!(outcome.status.is_done());
}

#[tokio::test(start_paused = true)]
async fn test_order_poll_failure_names_task() {
    let transport = ScriptedTransport::new()
        .on(
            "snapshot/create",
            RawResponse::ok(r#"{"jobid": "t9", "price": 10, "paid": true}"#),
        )
        .task_states("t9", &["ERROR"]);
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(
        runner
            .run_order(
                ApiRequest::post("snapshot/create", Params::new().with("volume_id", "v-1")),
                TimingProfile::SHORT,
            )
            .await
    );

    assert_eq!(err.kind(), ErrorKind::TaskFailed);
    assert!(err.to_string().contains("(t9)"));
}

#[tokio::test(start_paused = true)]
async fn test_bulk_delete_stops_at_failed_submission() {
    let transport = ScriptedTransport::new()
        .submits("firewall_vpc/delete_rule", "t-a")
        .rejects("firewall_vpc/delete_rule", 400, "rule is locked")
        .submits("firewall_vpc/delete_rule", "t-c")
        .task_states("t-a", &["DONE"]);
    let runner = TaskRunner::new(&transport);

    let err = assert_err!(
        runner
            .run_bulk_delete("firewall_vpc/delete_rule", &["a", "b", "c"], TimingProfile::SHORT)
            .await
    );

    match &err {
        TaskError::BulkSubmit { id, .. } => assert_eq!(id, "b"),
        other => panic!("expected BulkSubmit, got {other:?}"),
    }
    assert_eq!(transport.submissions("firewall_vpc/delete_rule"), 2);
    assert_eq!(transport.queries("t-a"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_bulk_delete_reports_first_failure_by_submission_order() {
    let transport = ScriptedTransport::new()
        .submits("firewall_vpc/delete_rule", "t-a")
        .submits("firewall_vpc/delete_rule", "t-b")
        .submits("firewall_vpc/delete_rule", "t-c")
        .task_states("t-a", &["PROCESSING", "PROCESSING", "DONE"])
        .task_states("t-b", &["PROCESSING", "ERROR"])
        .task_states("t-c", &["ERROR"]);
    let runner = TaskRunner::new(&transport).with_bulk_concurrency(3);

    let err = assert_err!(
        runner
            .run_bulk_delete("firewall_vpc/delete_rule", &["a", "b", "c"], TimingProfile::SHORT)
            .await
    );

    match &err {
        TaskError::BulkPoll { task_id, .. } => assert_eq!(task_id, "t-b"),
        other => panic!("expected BulkPoll, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::TaskFailed);
}

#[tokio::test(start_paused = true)]
async fn test_bulk_delete_success_in_submission_order() {
    let transport = ScriptedTransport::new()
        .submits("firewall_vpc/delete_rule", "t-a")
        .submits("firewall_vpc/delete_rule", "t-b")
        .task_states("t-a", &["WAIT", "WAIT", "DONE"])
        .task_states("t-b", &["DONE"]);
    let runner = TaskRunner::new(&transport);

    let statuses = assert_ok!(
        runner
            .run_bulk_delete("firewall_vpc/delete_rule", &["a", "b"], TimingProfile::SHORT)
            .await
    );

    let ids: Vec<&str> = statuses.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["t-a", "t-b"]);
    assert_eq!(transport.log()[0], "DELETE firewall_vpc/delete_rule {id: a}");
}

#[tokio::test(start_paused = true)]
async fn test_bulk_delete_of_nothing() {
    let transport = ScriptedTransport::new();
    let runner = TaskRunner::new(&transport);
    let ids: [&str; 0] = [];

    let statuses = assert_ok!(
        runner
            .run_bulk_delete("firewall_vpc/delete_rule", &ids, TimingProfile::SHORT)
            .await
    );
    assert!(statuses.is_empty());
    assert!(transport.log().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_runs_share_transport() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .submits("server_action/stop", "t1")
            .submits("server_action/start", "t2")
            .task_states("t1", &["PROCESSING", "DONE"])
            .task_states("t2", &["WAIT", "WAIT", "WAIT", "DONE"]),
    );
    let runner = TaskRunner::new(Arc::clone(&transport));

    let (stop, start) = tokio::join!(
        runner.run_task(stop_request(), TimingProfile::SHORT),
        runner.run_task(
            ApiRequest::post("server_action/start", Params::new().with_id("s-2")),
            TimingProfile::SHORT,
        ),
    );

    assert_eq!(assert_ok!(stop).id, "t1");
    assert_eq!(assert_ok!(start).id, "t2");
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_aborts_wait() {
    let transport = ScriptedTransport::new()
        .submits("server_action/restore_snapshot", "t1")
        .task_states("t1", &["PROCESSING"]);
    let token = CancellationToken::new();
    let runner = TaskRunner::new(&transport).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(90)).await;
        token.cancel();
    });

    let err = assert_err!(
        runner
            .run_task(
                ApiRequest::post(
                    "server_action/restore_snapshot",
                    Params::new().with_id("s-1").with("snapshot_id", "snap-1"),
                ),
                TimingProfile::SUPER_LONG,
            )
            .await
    );

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    canceller.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_paid_order_with_numeric_task_id() {
    let transport = ScriptedTransport::new()
        .on(
            "server/create",
            RawResponse::ok(r#"{"jobid": 1700, "price": 5, "paid": true}"#),
        )
        .task_states("1700", &["WAIT", "DONE"]);
    let runner = TaskRunner::new(&transport);

    let outcome = assert_ok!(
        runner
            .run_order(
                ApiRequest::post("server/create", Params::new().with("name", "web-01")),
                TimingProfile::SHORT,
            )
            .await
    );

    assert_eq!(outcome.order.task_id, "1700");
    assert!(outcome.status.is_done());
    assert_eq!(transport.queries("1700"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_status_body_with_numeric_id() {
    let transport = ScriptedTransport::new()
        .submits("server_action/stop", "t1")
        .on_task("t1", RawResponse::ok(r#"{"id": 1700, "status": "DONE"}"#));
    let runner = TaskRunner::new(&transport);

    let status = assert_ok!(runner.run_task(stop_request(), TimingProfile::SHORT).await);
    assert_eq!(status.id, "1700");
}

#[tokio::test(start_paused = true)]
async fn test_status_body_echoing_jobid() {
    let transport = ScriptedTransport::new()
        .submits("server_action/stop", "t1")
        .on_task(
            "t1",
            RawResponse::ok(r#"{"id": "t1", "jobid": "t1", "status": "DONE"}"#),
        );
    let runner = TaskRunner::new(&transport);

    let status = assert_ok!(runner.run_task(stop_request(), TimingProfile::SHORT).await);
    assert_eq!(status.id, "t1");
    assert_eq!(status.get::<String>("jobid").as_deref(), Some("t1"));
}
