//! Tests for task polling against a mock server: terminal delivery,
//! reaped tasks, and cancellation.

use std::sync::mpsc;
use std::time::Duration;

use abiquo_api::config::ApiEndpoint;
use abiquo_api::{
    callbacks, AbiquoConfig, ApiClient, Credentials, Representation, RestLink, TaskDto,
    TaskMonitor, TaskState, VirtualDatacenter,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = AbiquoConfig::builder()
        .endpoint(ApiEndpoint::new(server.uri()).unwrap())
        .credentials(Credentials::basic("admin", "xabiquo").unwrap())
        .build()
        .unwrap();
    ApiClient::new(config)
}

fn pending_task(server: &MockServer) -> TaskDto {
    let mut task = TaskDto {
        task_id: Some("abc".to_string()),
        state: Some(TaskState::Pending),
        ..TaskDto::default()
    };
    task.add_link(RestLink::new("self", format!("{}/tasks/abc", server.uri())));
    task
}

fn task_xml(state: &str) -> String {
    format!(
        r#"<task><taskId>abc</taskId><state>{state}</state><type>DEPLOY</type></task>"#
    )
}

#[tokio::test]
async fn polling_to_success_delivers_exactly_one_success_callback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(task_xml("IN_PROGRESS"), TaskDto::MEDIA_TYPE),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(task_xml("FINISHED_SUCCESSFULLY"), TaskDto::MEDIA_TYPE),
        )
        .mount(&server)
        .await;

    let (outcome_tx, outcome_rx) = mpsc::channel();
    let success_tx = outcome_tx.clone();
    let monitor = TaskMonitor::new(client_for(&server)).with_interval(Duration::from_millis(10));
    let handle = monitor
        .watch(
            pending_task(&server),
            callbacks(
                move |task: TaskDto| success_tx.send(("success", task.state)).unwrap(),
                move |task: TaskDto| outcome_tx.send(("failure", task.state)).unwrap(),
            ),
        )
        .unwrap();
    handle.wait().await;

    let outcomes: Vec<_> = outcome_rx.try_iter().collect();
    assert_eq!(
        outcomes,
        vec![("success", Some(TaskState::FinishedSuccessfully))]
    );
}

#[tokio::test]
async fn polling_to_a_failed_state_delivers_the_failure_callback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(task_xml("FINISHED_UNSUCCESSFULLY"), TaskDto::MEDIA_TYPE),
        )
        .mount(&server)
        .await;

    let (outcome_tx, outcome_rx) = mpsc::channel();
    let success_tx = outcome_tx.clone();
    let monitor = TaskMonitor::new(client_for(&server)).with_interval(Duration::from_millis(10));
    let handle = monitor
        .watch(
            pending_task(&server),
            callbacks(
                move |_| success_tx.send("success").unwrap(),
                move |_| outcome_tx.send("failure").unwrap(),
            ),
        )
        .unwrap();
    handle.wait().await;

    let outcomes: Vec<_> = outcome_rx.try_iter().collect();
    assert_eq!(outcomes, vec!["failure"]);
}

#[tokio::test]
async fn a_reaped_task_is_judged_from_the_last_known_state() {
    let server = MockServer::start().await;
    // 303 means the server already dropped the task; the last state we
    // saw was PENDING, so the outcome is a failure.
    Mock::given(method("GET"))
        .and(path("/tasks/abc"))
        .respond_with(ResponseTemplate::new(303))
        .mount(&server)
        .await;

    let (outcome_tx, outcome_rx) = mpsc::channel();
    let success_tx = outcome_tx.clone();
    let monitor = TaskMonitor::new(client_for(&server)).with_interval(Duration::from_millis(10));
    let handle = monitor
        .watch(
            pending_task(&server),
            callbacks(
                move |task: TaskDto| success_tx.send(("success", task.state)).unwrap(),
                move |task: TaskDto| outcome_tx.send(("failure", task.state)).unwrap(),
            ),
        )
        .unwrap();
    handle.wait().await;

    let outcomes: Vec<_> = outcome_rx.try_iter().collect();
    assert_eq!(outcomes, vec![("failure", Some(TaskState::Pending))]);
}

#[tokio::test]
async fn cancelling_a_watch_delivers_no_callback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(task_xml("IN_PROGRESS"), TaskDto::MEDIA_TYPE),
        )
        .mount(&server)
        .await;

    let (outcome_tx, outcome_rx) = mpsc::channel();
    let success_tx = outcome_tx.clone();
    let monitor = TaskMonitor::new(client_for(&server)).with_interval(Duration::from_millis(10));
    let handle = monitor
        .watch(
            pending_task(&server),
            callbacks(
                move |_| success_tx.send("success").unwrap(),
                move |_| outcome_tx.send("failure").unwrap(),
            ),
        )
        .unwrap();
    handle.cancel();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(outcome_rx.try_iter().next().is_none());
}

#[tokio::test]
async fn deploying_an_appliance_yields_a_task_watchable_to_success() {
    let server = MockServer::start().await;
    let base = server.uri();
    let deploy_task_xml = |state: &str| {
        format!(
            r#"<task><taskId>deploy-1</taskId><state>{state}</state><type>DEPLOY</type><link rel="self" href="{base}/tasks/deploy-1"/></task>"#
        )
    };

    Mock::given(method("GET"))
        .and(path("/cloud/virtualdatacenters/5"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<virtualdatacenter>
                    <id>5</id>
                    <name>vdc</name>
                    <link rel="edit" href="{base}/cloud/virtualdatacenters/5"/>
                    <link rel="virtualappliances" href="{base}/cloud/virtualdatacenters/5/virtualappliances"/>
                </virtualdatacenter>"#
            ),
            "application/vnd.abiquo.virtualdatacenter+xml",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cloud/virtualdatacenters/5/virtualappliances"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<virtualappliances>
                    <virtualappliance>
                        <id>9</id>
                        <name>web</name>
                        <link rel="edit" href="{base}/cloud/virtualdatacenters/5/virtualappliances/9"/>
                        <link rel="deploy" href="{base}/cloud/virtualdatacenters/5/virtualappliances/9/action/deploy"/>
                    </virtualappliance>
                </virtualappliances>"#
            ),
            "application/vnd.abiquo.virtualappliances+xml",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(
            "/cloud/virtualdatacenters/5/virtualappliances/9/action/deploy",
        ))
        .respond_with(ResponseTemplate::new(202).set_body_raw(
            format!(
                r#"<acceptedrequest>
                    <message>queued</message>
                    <link rel="status" href="{base}/tasks/deploy-1"/>
                </acceptedrequest>"#
            ),
            "application/vnd.abiquo.acceptedrequest+xml",
        ))
        .expect(1)
        .mount(&server)
        .await;
    // The first fetch through the status link and the first poll both see
    // the task still running; the next poll sees it finish.
    Mock::given(method("GET"))
        .and(path("/tasks/deploy-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(deploy_task_xml("IN_PROGRESS"), TaskDto::MEDIA_TYPE),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/deploy-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(deploy_task_xml("FINISHED_SUCCESSFULLY"), TaskDto::MEDIA_TYPE),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let vdc = VirtualDatacenter::find_by_id(&client, 5).await.unwrap().unwrap();
    let appliances = vdc.virtual_appliances().await.unwrap();
    let accepted = appliances[0].deploy().await.unwrap();
    assert!(accepted.status_link().unwrap().href.ends_with("/tasks/deploy-1"));

    let task = accepted.task(&client).await.unwrap().unwrap();
    assert_eq!(task.state, Some(TaskState::InProgress));

    let (outcome_tx, outcome_rx) = mpsc::channel();
    let success_tx = outcome_tx.clone();
    let monitor = TaskMonitor::new(client).with_interval(Duration::from_millis(10));
    let handle = monitor
        .watch(
            task,
            callbacks(
                move |task: TaskDto| success_tx.send(("success", task.task_id)).unwrap(),
                move |task: TaskDto| outcome_tx.send(("failure", task.task_id)).unwrap(),
            ),
        )
        .unwrap();
    handle.wait().await;

    let outcomes: Vec<_> = outcome_rx.try_iter().collect();
    assert_eq!(outcomes, vec![("success", Some("deploy-1".to_string()))]);
}

#[tokio::test]
async fn a_task_without_a_self_link_is_rejected_up_front() {
    let server = MockServer::start().await;
    let monitor = TaskMonitor::new(client_for(&server));
    let task = TaskDto {
        task_id: Some("abc".to_string()),
        ..TaskDto::default()
    };

    let result = monitor.watch(task, callbacks(|_| {}, |_| {}));
    assert!(result.is_err());
}
