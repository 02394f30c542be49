//! Tests for the link model and the request binder chain through the
//! public API: link lookup on representations, identifier extraction,
//! and URI splicing with query/matrix preservation.

use abiquo_api::clients::{HttpMethod, OutgoingRequest};
use abiquo_api::resources::infrastructure::DatacenterDto;
use abiquo_api::rest::binder::{append_path_segment, append_query_options, bind_edit_link, bind_link};
use abiquo_api::rest::link::rels;
use abiquo_api::rest::{BindError, LinkError, QueryOptions, Representation, RestLink};

fn datacenter_with_links(links: &[(&str, &str)]) -> DatacenterDto {
    let mut dto = DatacenterDto {
        name: Some("DC".to_string()),
        ..DatacenterDto::default()
    };
    for (rel, href) in links {
        dto.add_link(RestLink::new(*rel, *href));
    }
    dto
}

#[test]
fn added_link_is_found_by_relation() {
    let dto = datacenter_with_links(&[(rels::EDIT, "http://h/admin/datacenters/3")]);
    let link = dto.search_link(rels::EDIT).unwrap();
    assert_eq!(link.href, "http://h/admin/datacenters/3");
    assert!(dto.search_link(rels::RACKS).is_none());
}

#[test]
fn duplicate_relations_resolve_to_the_first_added() {
    let dto = datacenter_with_links(&[
        (rels::EDIT, "http://h/first"),
        (rels::EDIT, "http://h/second"),
    ]);
    assert_eq!(dto.search_link(rels::EDIT).unwrap().href, "http://h/first");
}

#[test]
fn bind_link_preserves_query_and_matrix_parameters_across_the_hop() {
    let mut request = OutgoingRequest::new(HttpMethod::Get, "http://h/a?x=1;y=2");
    let link = RestLink::new(rels::EDIT, "http://h/b");
    bind_link(&mut request, &link).unwrap();
    assert_eq!(request.target, "http://h/b?x=1;y=2");
}

#[test]
fn bind_edit_link_without_edit_relation_leaves_the_request_unmodified() {
    let dto = datacenter_with_links(&[(rels::RACKS, "http://h/admin/datacenters/3/racks")]);
    let mut request = OutgoingRequest::new(HttpMethod::Delete, "http://h/original");

    let error = bind_edit_link(&mut request, &dto).unwrap_err();
    assert!(matches!(
        error,
        BindError::Link(LinkError::MissingLink { resource: "Datacenter", .. })
    ));
    assert_eq!(request.target, "http://h/original");
    assert!(request.body.is_none());
}

#[test]
fn id_from_link_parses_the_trailing_segment() {
    let dto = datacenter_with_links(&[(rels::EDIT, "http://h/admin/datacenters/42")]);
    assert_eq!(dto.id_from_link(rels::EDIT).unwrap(), 42);
}

#[test]
fn id_from_link_with_non_numeric_tail_is_malformed() {
    let dto = datacenter_with_links(&[(rels::EDIT, "http://h/admin/datacenters/latest")]);
    assert!(matches!(
        dto.id_from_link(rels::EDIT),
        Err(LinkError::MalformedIdentifier { .. })
    ));
}

#[test]
fn query_options_accumulate_in_insertion_order() {
    let mut request = OutgoingRequest::new(HttpMethod::Get, "http://h/events");
    let options = QueryOptions::new()
        .put("severity", "INFO")
        .put("limit", "25")
        .put("severity", "WARNING");
    append_query_options(&mut request, &options);
    assert_eq!(
        request.target,
        "http://h/events?severity=INFO&limit=25&severity=WARNING"
    );
}

#[test]
fn path_segment_lands_before_the_query_suffix() {
    let mut request = OutgoingRequest::new(HttpMethod::Get, "http://h/admin/datacenters?limit=5");
    append_path_segment(&mut request, "7").unwrap();
    assert_eq!(request.target, "http://h/admin/datacenters/7?limit=5");
}
