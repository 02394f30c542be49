//! The representation contract.
//!
//! A representation is any serializable payload type that owns a
//! collection of [`RestLink`]s. The trait supplies the link search and
//! identifier extraction logic shared by every resource in the API.
//!
//! # Implementing a representation
//!
//! ```rust
//! use abiquo_api::rest::{Representation, RestLink};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(rename = "datacenter", default)]
//! pub struct DatacenterDto {
//!     #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
//!     pub links: Vec<RestLink>,
//!     pub name: String,
//! }
//!
//! impl Representation for DatacenterDto {
//!     const MEDIA_TYPE: &'static str = "application/vnd.abiquo.datacenter+xml";
//!     const NAME: &'static str = "Datacenter";
//!
//!     fn links(&self) -> &[RestLink] { &self.links }
//!     fn links_mut(&mut self) -> &mut Vec<RestLink> { &mut self.links }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::rest::errors::LinkError;
use crate::rest::link::{rels, RestLink};

/// A resource payload carrying hypermedia links.
///
/// A representation fetched from the server always carries at least a
/// `self` or `edit` link sufficient to address itself; a representation
/// constructed client-side (for create) typically carries none yet, or
/// only links to its parent added by calling code before save.
pub trait Representation:
    Serialize + DeserializeOwned + Clone + Send + Sync + Sized
{
    /// The vendor media type used for Accept/Content-Type negotiation.
    const MEDIA_TYPE: &'static str;

    /// The resource type name, used in error messages.
    const NAME: &'static str;

    /// The links attached to this representation, in insertion order.
    fn links(&self) -> &[RestLink];

    /// Mutable access to the link collection.
    fn links_mut(&mut self) -> &mut Vec<RestLink>;

    /// Finds the first link with the given relation.
    ///
    /// Linear scan; first match wins when duplicates exist. Lookup order
    /// is the order links were populated from the server response or
    /// added by the client.
    fn search_link(&self, rel: &str) -> Option<&RestLink> {
        self.links().iter().find(|link| link.rel == rel)
    }

    /// Finds the first link with the given relation, or fails.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MissingLink`] naming the relation and the
    /// representation type when the relation is absent.
    fn require_link(&self, rel: &str) -> Result<&RestLink, LinkError> {
        self.search_link(rel).ok_or_else(|| LinkError::MissingLink {
            rel: rel.to_string(),
            resource: Self::NAME,
        })
    }

    /// Appends a link.
    ///
    /// No uniqueness check is performed: duplicates are allowed at this
    /// layer, and lookups resolve them with the first-match policy.
    fn add_link(&mut self, link: RestLink) {
        self.links_mut().push(link);
    }

    /// Returns the conventional self-mutation link.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MissingLink`] when no `edit` link is present.
    fn edit_link(&self) -> Result<&RestLink, LinkError> {
        self.require_link(rels::EDIT)
    }

    /// Extracts the numeric identifier from the trailing path segment of
    /// the link with the given relation.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MissingLink`] when the relation is absent and
    /// [`LinkError::MalformedIdentifier`] when the trailing segment is
    /// not an integer.
    fn id_from_link(&self, rel: &str) -> Result<i32, LinkError> {
        let link = self.require_link(rel)?;
        parse_trailing_id(&link.href)
    }

    /// The identifier of this representation, extracted from its `edit`
    /// link.
    ///
    /// # Errors
    ///
    /// Fails as [`Representation::id_from_link`] does.
    fn id(&self) -> Result<i32, LinkError> {
        self.id_from_link(rels::EDIT)
    }
}

/// A collection payload whose items are representations.
///
/// Collections are read-only on the wire: they are fetched and unwrapped,
/// never sent as request bodies.
pub trait ResourceCollection: DeserializeOwned + Send {
    /// The element representation type.
    type Item: Representation;

    /// The vendor media type of the collection document.
    const MEDIA_TYPE: &'static str;

    /// Consumes the collection, yielding its items in document order.
    fn into_items(self) -> Vec<Self::Item>;
}

/// Parses the trailing path segment of an href as an integer identifier.
fn parse_trailing_id(href: &str) -> Result<i32, LinkError> {
    let trimmed = href.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or("");
    segment
        .parse::<i32>()
        .map_err(|_| LinkError::MalformedIdentifier {
            href: href.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename = "probe", default)]
    struct Probe {
        #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
        links: Vec<RestLink>,
        name: String,
    }

    impl Representation for Probe {
        const MEDIA_TYPE: &'static str = "application/vnd.abiquo.probe+xml";
        const NAME: &'static str = "Probe";

        fn links(&self) -> &[RestLink] {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Vec<RestLink> {
            &mut self.links
        }
    }

    #[test]
    fn test_add_then_search_link_round_trip() {
        let mut probe = Probe::default();
        probe.add_link(RestLink::new("edit", "http://api/admin/probes/7"));

        let found = probe.search_link("edit").unwrap();
        assert_eq!(found.href, "http://api/admin/probes/7");
    }

    #[test]
    fn test_first_match_wins_on_duplicate_relations() {
        let mut probe = Probe::default();
        probe.add_link(RestLink::new("edit", "http://api/first"));
        probe.add_link(RestLink::new("edit", "http://api/second"));

        // Duplicates are allowed; lookup is pinned to the first insertion.
        assert_eq!(probe.links().len(), 2);
        assert_eq!(probe.search_link("edit").unwrap().href, "http://api/first");
    }

    #[test]
    fn test_search_link_absent_returns_none() {
        let probe = Probe::default();
        assert!(probe.search_link("enterprise").is_none());
    }

    #[test]
    fn test_require_link_absent_fails_with_missing_link() {
        let probe = Probe::default();
        let error = probe.require_link("edit").unwrap_err();
        assert_eq!(
            error,
            LinkError::MissingLink {
                rel: "edit".to_string(),
                resource: "Probe",
            }
        );
    }

    #[test]
    fn test_id_from_link_parses_trailing_segment() {
        let mut probe = Probe::default();
        probe.add_link(RestLink::new("edit", "http://api/admin/datacenters/42"));
        assert_eq!(probe.id_from_link("edit").unwrap(), 42);
    }

    #[test]
    fn test_id_from_link_tolerates_trailing_slash() {
        let mut probe = Probe::default();
        probe.add_link(RestLink::new("edit", "http://api/admin/datacenters/42/"));
        assert_eq!(probe.id().unwrap(), 42);
    }

    #[test]
    fn test_id_from_link_non_numeric_tail_fails() {
        let mut probe = Probe::default();
        probe.add_link(RestLink::new("edit", "http://api/admin/datacenters/latest"));
        assert!(matches!(
            probe.id_from_link("edit"),
            Err(LinkError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_id_from_link_missing_relation_fails() {
        let probe = Probe::default();
        assert!(matches!(
            probe.id_from_link("edit"),
            Err(LinkError::MissingLink { .. })
        ));
    }

    #[test]
    fn test_links_survive_xml_round_trip() {
        let mut probe = Probe {
            name: "p1".to_string(),
            ..Probe::default()
        };
        probe.add_link(
            RestLink::new("edit", "http://api/admin/probes/1")
                .with_type("application/vnd.abiquo.probe+xml"),
        );
        probe.add_link(RestLink::new("datacenter", "http://api/admin/datacenters/3"));

        let xml = quick_xml::se::to_string(&probe).unwrap();
        let parsed: Probe = quick_xml::de::from_str(&xml).unwrap();

        assert_eq!(parsed.links.len(), 2);
        assert_eq!(parsed.search_link("edit").unwrap().href, "http://api/admin/probes/1");
        assert_eq!(parsed.id_from_link("datacenter").unwrap(), 3);
    }
}
