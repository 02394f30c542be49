//! End-to-end tests for datacenter operations against a mock Abiquo
//! server: create, find-by-id absence mapping, link-driven navigation,
//! and wrapper state transitions.

use abiquo_api::config::ApiEndpoint;
use abiquo_api::resources::infrastructure::DATACENTERS_PATH;
use abiquo_api::rest::link::rels;
use abiquo_api::{
    AbiquoConfig, ApiClient, ApiError, Credentials, Datacenter, QueryOptions, Representation,
    ResourceState,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = AbiquoConfig::builder()
        .endpoint(ApiEndpoint::new(server.uri()).unwrap())
        .credentials(Credentials::basic("admin", "xabiquo").unwrap())
        .build()
        .unwrap();
    ApiClient::new(config)
}

fn datacenter_xml(server: &MockServer, id: i32, name: &str, location: &str) -> String {
    format!(
        r#"<datacenter>
            <id>{id}</id>
            <name>{name}</name>
            <location>{location}</location>
            <link rel="edit" href="{base}/admin/datacenters/{id}"/>
            <link rel="racks" href="{base}/admin/datacenters/{id}/racks"/>
        </datacenter>"#,
        base = server.uri()
    )
}

#[tokio::test]
async fn saving_a_transient_datacenter_persists_it_with_server_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DATACENTERS_PATH))
        .and(header(
            "Content-Type",
            "application/vnd.abiquo.datacenter+xml",
        ))
        .and(body_string_contains("Honolulu"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(
            datacenter_xml(&server, 1, "DC", "Honolulu"),
            "application/vnd.abiquo.datacenter+xml",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut datacenter = Datacenter::new(client, "DC", "Honolulu");
    assert_eq!(datacenter.state(), ResourceState::Transient);

    datacenter.save().await.unwrap();

    assert_eq!(datacenter.state(), ResourceState::Persisted);
    assert_eq!(datacenter.id(), Some(1));
    let edit = datacenter.dto().search_link(rels::EDIT).unwrap();
    assert!(edit.href.ends_with("/admin/datacenters/1"));
}

#[tokio::test]
async fn find_by_id_maps_404_to_absence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/datacenters/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = Datacenter::find_by_id(&client, 99).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn find_by_id_returns_a_persisted_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/datacenters/7"))
        .and(header("Accept", "application/vnd.abiquo.datacenter+xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            datacenter_xml(&server, 7, "west", "Lisbon"),
            "application/vnd.abiquo.datacenter+xml",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let datacenter = Datacenter::find_by_id(&client, 7).await.unwrap().unwrap();
    assert_eq!(datacenter.state(), ResourceState::Persisted);
    assert_eq!(datacenter.dto().location.as_deref(), Some("Lisbon"));
}

#[tokio::test]
async fn listing_parses_every_collection_element() {
    let server = MockServer::start().await;
    let body = format!(
        "<datacenters>{}{}</datacenters>",
        datacenter_xml(&server, 1, "one", "A"),
        datacenter_xml(&server, 2, "two", "B")
    );
    Mock::given(method("GET"))
        .and(path(DATACENTERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "application/vnd.abiquo.datacenters+xml"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let datacenters = Datacenter::list(&client).await.unwrap();
    assert_eq!(datacenters.len(), 2);
    assert_eq!(datacenters[1].dto().name.as_deref(), Some("two"));
}

#[tokio::test]
async fn navigation_follows_the_racks_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/datacenters/1/racks"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<racks><rack><id>5</id><name>r5</name></rack></racks>"#,
            "application/vnd.abiquo.racks+xml",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/datacenters/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            datacenter_xml(&server, 1, "DC", "Honolulu"),
            "application/vnd.abiquo.datacenter+xml",
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let datacenter = Datacenter::find_by_id(&client, 1).await.unwrap().unwrap();
    let racks = datacenter.racks().await.unwrap();
    assert_eq!(racks.len(), 1);
    assert_eq!(racks[0].dto().name.as_deref(), Some("r5"));

    let found = datacenter
        .find_rack(|rack| rack.name.as_deref() == Some("r5"))
        .await
        .unwrap();
    assert!(found.is_some());
    let missing = datacenter
        .find_rack(|rack| rack.name.as_deref() == Some("r6"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn unmapped_error_statuses_surface_with_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATACENTERS_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("internal storage failure"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Datacenter::list(&client).await.unwrap_err();
    match error {
        ApiError::Http(http) => {
            assert_eq!(http.status(), Some(500));
            assert!(http.to_string().contains("internal storage failure"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn query_options_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(wiremock::matchers::query_param("severity", "ERROR"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<events><event><severity>ERROR</severity></event></events>"#,
            "application/vnd.abiquo.events+xml",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = QueryOptions::new().put("severity", "ERROR");
    let events = abiquo_api::Event::list(&client, &options).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity(), Some("ERROR"));
}
