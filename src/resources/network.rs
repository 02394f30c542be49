//! VLAN networks.
//!
//! One wire shape serves all four network kinds; the kind is fixed by the
//! collection relation the network was fetched from (or created under),
//! not by a wire field this client interprets.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::resources::{require_state, ResourceState};
use crate::rest::errors::ApiError;
use crate::rest::link::{rels, RestLink};
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// Which collection a network belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkKind {
    /// Datacenter-wide, externally routable.
    Public,
    /// Scoped to one virtual datacenter.
    Private,
    /// Enterprise-assigned, externally managed addressing.
    External,
    /// Addressing delegated entirely to the outside.
    Unmanaged,
}

impl NetworkKind {
    /// The link relation of this kind's collection.
    #[must_use]
    pub const fn rel(&self) -> &'static str {
        match self {
            Self::Public => rels::PUBLICNETWORK,
            Self::Private => rels::PRIVATENETWORK,
            Self::External => rels::EXTERNALNETWORK,
            Self::Unmanaged => rels::UNMANAGEDNETWORK,
        }
    }
}

/// Wire representation of a VLAN network.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "network", default)]
pub struct NetworkDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(rename = "primaryDNS", skip_serializing_if = "Option::is_none")]
    pub primary_dns: Option<String>,
    #[serde(rename = "secondaryDNS", skip_serializing_if = "Option::is_none")]
    pub secondary_dns: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for NetworkDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.vlan+xml";
    const NAME: &'static str = "Network";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of a network collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "networks", default)]
pub struct NetworksDto {
    #[serde(rename = "network")]
    collection: Vec<NetworkDto>,
}

impl ResourceCollection for NetworksDto {
    type Item = NetworkDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.vlans+xml";

    fn into_items(self) -> Vec<NetworkDto> {
        self.collection
    }
}

mod ops {
    use super::{BinderSpec, HttpMethod, NetworkDto, RemoteOperation, Representation};

    pub const NETWORK_UPDATE: RemoteOperation = RemoteOperation {
        name: "network.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: NetworkDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const NETWORK_DELETE: RemoteOperation = RemoteOperation {
        name: "network.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: NetworkDto::MEDIA_TYPE,
        absent_on: &[404],
    };
}

/// A network wrapper, tagged with the kind of collection it came from.
#[derive(Clone, Debug)]
pub struct Network {
    client: ApiClient,
    dto: NetworkDto,
    kind: NetworkKind,
    state: ResourceState,
}

impl Network {
    /// Builds a private network representation seeded with the configured
    /// defaults (tag range low end and primary DNS), ready for
    /// [`VirtualDatacenter::create_private_network`](crate::resources::VirtualDatacenter::create_private_network).
    #[must_use]
    pub fn build_private(
        client: &ApiClient,
        name: impl Into<String>,
        address: impl Into<String>,
        mask: u8,
        gateway: impl Into<String>,
    ) -> NetworkDto {
        let defaults = client.config().network_defaults();
        NetworkDto {
            name: Some(name.into()),
            tag: Some(defaults.vlan_tag_min),
            address: Some(address.into()),
            mask: Some(mask),
            gateway: Some(gateway.into()),
            primary_dns: Some(defaults.primary_dns.clone()),
            ..NetworkDto::default()
        }
    }

    pub(crate) fn persisted(client: ApiClient, dto: NetworkDto, kind: NetworkKind) -> Self {
        Self {
            client,
            dto,
            kind,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &NetworkDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut NetworkDto {
        &mut self.dto
    }

    /// The collection kind this network was fetched from.
    #[must_use]
    pub const fn kind(&self) -> NetworkKind {
        self.kind
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Pushes local field changes to the server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self.client.update(&ops::NETWORK_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this network. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::NETWORK_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }
}
