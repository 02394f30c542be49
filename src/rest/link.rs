//! The hypermedia link model.
//!
//! Every representation returned by the Abiquo API carries a collection of
//! `<link rel=".." href=".." type=".."/>` elements. Links are how resources
//! are addressed: apart from the fixed top-level collection paths, the SDK
//! never builds a URL by hand, it follows a link discovered on a
//! previously fetched representation.

use serde::{Deserialize, Serialize};

/// A named, typed hypermedia relation attached to a representation.
///
/// Immutable once created; construction helpers return a new value.
///
/// # Example
///
/// ```rust
/// use abiquo_api::rest::RestLink;
///
/// let link = RestLink::new("edit", "http://api/admin/datacenters/1")
///     .with_type("application/vnd.abiquo.datacenter+xml");
/// assert_eq!(link.rel, "edit");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "link")]
pub struct RestLink {
    /// The relation name (contract key), e.g. `"edit"`.
    #[serde(rename = "@rel")]
    pub rel: String,
    /// The absolute URI of the related resource.
    #[serde(rename = "@href")]
    pub href: String,
    /// The media type of the related resource, when advertised.
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// A human-readable title, when advertised.
    #[serde(rename = "@title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RestLink {
    /// Creates a link with a relation and href.
    #[must_use]
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            media_type: None,
            title: None,
        }
    }

    /// Returns a copy of this link with the given media type.
    #[must_use]
    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Returns a copy of this link with the given title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Link relation vocabulary.
///
/// These strings are contract keys: the server advertises them on
/// representations, and operation declarations name them to drive request
/// binding.
pub mod rels {
    /// Self-mutation relation used for update and delete.
    pub const EDIT: &str = "edit";
    /// Self-addressing relation on read-only representations.
    pub const SELF: &str = "self";
    /// Owning enterprise of a resource.
    pub const ENTERPRISE: &str = "enterprise";
    /// Owning datacenter of a resource.
    pub const DATACENTER: &str = "datacenter";
    /// Owning rack of a machine.
    pub const RACK: &str = "rack";
    /// Racks collection of a datacenter.
    pub const RACKS: &str = "racks";
    /// Machines collection of a rack.
    pub const MACHINES: &str = "machines";
    /// Owning virtual appliance of a virtual machine.
    pub const VIRTUALAPPLIANCE: &str = "virtualappliance";
    /// Virtual appliances collection of a virtual datacenter.
    pub const VIRTUALAPPLIANCES: &str = "virtualappliances";
    /// Virtual machines collection of a virtual appliance.
    pub const VIRTUALMACHINES: &str = "virtualmachines";
    /// Storage tier of a pool.
    pub const TIER: &str = "tier";
    /// Tiers collection of a datacenter.
    pub const TIERS: &str = "tiers";
    /// Role of a user.
    pub const ROLE: &str = "role";
    /// Privileges collection of a role.
    pub const PRIVILEGES: &str = "privileges";
    /// Single privilege relation.
    pub const PRIVILEGE: &str = "privilege";
    /// Tasks collection of an asynchronous resource.
    pub const TASKS: &str = "tasks";
    /// Limits relation on an enterprise/datacenter pairing.
    pub const LIMITS: &str = "limits";
    /// Users collection of an enterprise.
    pub const USERS: &str = "users";
    /// Storage devices collection of a datacenter.
    pub const DEVICES: &str = "devices";
    /// Storage pools collection of a device.
    pub const POOLS: &str = "pools";
    /// Public networks collection of a datacenter.
    pub const PUBLICNETWORK: &str = "publicnetwork";
    /// Private networks collection of a virtual datacenter.
    pub const PRIVATENETWORK: &str = "privatenetwork";
    /// External networks collection of an enterprise in a datacenter.
    pub const EXTERNALNETWORK: &str = "externalnetwork";
    /// Unmanaged networks collection of an enterprise in a datacenter.
    pub const UNMANAGEDNETWORK: &str = "unmanagednetwork";
    /// Deploy action of a virtual appliance or machine.
    pub const DEPLOY: &str = "deploy";
    /// Undeploy action of a virtual appliance or machine.
    pub const UNDEPLOY: &str = "undeploy";
    /// Status link of an asynchronous task.
    pub const STATUS: &str = "status";
}
