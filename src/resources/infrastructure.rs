//! Physical infrastructure: datacenters, racks, and machines.
//!
//! Datacenters are a top-level collection with a fixed path; racks and
//! machines are reached through the links a fetched datacenter or rack
//! carries.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut datacenter = Datacenter::new(client.clone(), "DC", "Honolulu");
//! datacenter.save().await?;
//! for rack in datacenter.racks().await? {
//!     println!("{:?}", rack.dto().name);
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::resources::network::{Network, NetworkKind, NetworksDto};
use crate::resources::storage::{StorageDevice, StorageDevicesDto};
use crate::resources::{require_state, ResourceState};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::{rels, RestLink};
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// Fixed path of the top-level datacenters collection.
pub const DATACENTERS_PATH: &str = "/admin/datacenters";

/// Wire representation of a datacenter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "datacenter", default)]
pub struct DatacenterDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for DatacenterDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.datacenter+xml";
    const NAME: &'static str = "Datacenter";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the datacenters collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "datacenters", default)]
pub struct DatacentersDto {
    #[serde(rename = "datacenter")]
    collection: Vec<DatacenterDto>,
}

impl ResourceCollection for DatacentersDto {
    type Item = DatacenterDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.datacenters+xml";

    fn into_items(self) -> Vec<DatacenterDto> {
        self.collection
    }
}

/// Wire representation of a rack.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "rack", default)]
pub struct RackDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "vlanIdMin", skip_serializing_if = "Option::is_none")]
    pub vlan_id_min: Option<u16>,
    #[serde(rename = "vlanIdMax", skip_serializing_if = "Option::is_none")]
    pub vlan_id_max: Option<u16>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for RackDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.rack+xml";
    const NAME: &'static str = "Rack";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the racks collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "racks", default)]
pub struct RacksDto {
    #[serde(rename = "rack")]
    collection: Vec<RackDto>,
}

impl ResourceCollection for RacksDto {
    type Item = RackDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.racks+xml";

    fn into_items(self) -> Vec<RackDto> {
        self.collection
    }
}

/// Wire representation of a physical machine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "machine", default)]
pub struct MachineDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "hypervisorType", skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "cpu", skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    #[serde(rename = "ram", skip_serializing_if = "Option::is_none")]
    pub ram_mb: Option<u32>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for MachineDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.machine+xml";
    const NAME: &'static str = "Machine";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the machines collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "machines", default)]
pub struct MachinesDto {
    #[serde(rename = "machine")]
    collection: Vec<MachineDto>,
}

impl ResourceCollection for MachinesDto {
    type Item = MachineDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.machines+xml";

    fn into_items(self) -> Vec<MachineDto> {
        self.collection
    }
}

mod ops {
    use super::{
        BinderSpec, DatacenterDto, DatacentersDto, HttpMethod, MachineDto, MachinesDto, RackDto,
        RacksDto, RemoteOperation, Representation, ResourceCollection, StorageDevicesDto,
        NetworksDto,
    };
    use crate::rest::link::rels;

    pub const DATACENTER_LIST: RemoteOperation = RemoteOperation {
        name: "datacenter.list",
        method: HttpMethod::Get,
        binder: BinderSpec::None,
        accept: DatacentersDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DATACENTER_READ: RemoteOperation = RemoteOperation {
        name: "datacenter.read",
        method: HttpMethod::Get,
        binder: BinderSpec::Path,
        accept: DatacenterDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const DATACENTER_CREATE: RemoteOperation = RemoteOperation {
        name: "datacenter.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Body,
        accept: DatacenterDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DATACENTER_UPDATE: RemoteOperation = RemoteOperation {
        name: "datacenter.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: DatacenterDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DATACENTER_DELETE: RemoteOperation = RemoteOperation {
        name: "datacenter.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: DatacenterDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const DATACENTER_RACKS: RemoteOperation = RemoteOperation {
        name: "datacenter.racks",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::RACKS },
        accept: RacksDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DATACENTER_DEVICES: RemoteOperation = RemoteOperation {
        name: "datacenter.devices",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::DEVICES },
        accept: StorageDevicesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DATACENTER_PUBLIC_NETWORKS: RemoteOperation = RemoteOperation {
        name: "datacenter.publicnetworks",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::PUBLICNETWORK },
        accept: NetworksDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const RACK_CREATE: RemoteOperation = RemoteOperation {
        name: "rack.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::RACKS },
        accept: RackDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const RACK_UPDATE: RemoteOperation = RemoteOperation {
        name: "rack.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: RackDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const RACK_DELETE: RemoteOperation = RemoteOperation {
        name: "rack.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: RackDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const RACK_MACHINES: RemoteOperation = RemoteOperation {
        name: "rack.machines",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::MACHINES },
        accept: MachinesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const MACHINE_UPDATE: RemoteOperation = RemoteOperation {
        name: "machine.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: MachineDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const MACHINE_DELETE: RemoteOperation = RemoteOperation {
        name: "machine.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: MachineDto::MEDIA_TYPE,
        absent_on: &[404],
    };
}

/// A datacenter wrapper.
#[derive(Clone, Debug)]
pub struct Datacenter {
    client: ApiClient,
    dto: DatacenterDto,
    state: ResourceState,
}

impl Datacenter {
    /// Builds a transient datacenter; call [`save`](Self::save) to create
    /// it on the server.
    #[must_use]
    pub fn new(client: ApiClient, name: impl Into<String>, location: impl Into<String>) -> Self {
        let dto = DatacenterDto {
            name: Some(name.into()),
            location: Some(location.into()),
            ..DatacenterDto::default()
        };
        Self {
            client,
            dto,
            state: ResourceState::Transient,
        }
    }

    pub(crate) fn persisted(client: ApiClient, dto: DatacenterDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// Lists all datacenters.
    pub async fn list(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        let items = client
            .list::<DatacentersDto>(&ops::DATACENTER_LIST, DATACENTERS_PATH, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Self::persisted(client.clone(), dto))
            .collect())
    }

    /// Fetches one datacenter by id; `Ok(None)` when it does not exist.
    pub async fn find_by_id(client: &ApiClient, id: i32) -> Result<Option<Self>, ApiError> {
        let dto = client
            .read::<DatacenterDto>(&ops::DATACENTER_READ, DATACENTERS_PATH, id)
            .await?;
        Ok(dto.map(|dto| Self::persisted(client.clone(), dto)))
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &DatacenterDto {
        &self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// The server-assigned id, once persisted.
    #[must_use]
    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    /// Creates this datacenter on the server. Valid only on a transient
    /// wrapper; the held representation is replaced with the server's
    /// response, links included.
    pub async fn save(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Transient, "save")?;
        self.dto = self
            .client
            .create(&ops::DATACENTER_CREATE, DATACENTERS_PATH, &self.dto)
            .await?;
        self.state = ResourceState::Persisted;
        Ok(())
    }

    /// Pushes local field changes to the server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self.client.update(&ops::DATACENTER_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this datacenter. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::DATACENTER_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Lists the racks of this datacenter.
    pub async fn racks(&self) -> Result<Vec<Rack>, ApiError> {
        let link = self.dto.require_link(rels::RACKS)?;
        let items = self
            .client
            .follow_collection::<RacksDto>(&ops::DATACENTER_RACKS, link, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Rack::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Returns the first rack matching the predicate, scanning in server
    /// order.
    pub async fn find_rack<P>(&self, predicate: P) -> Result<Option<Rack>, ApiError>
    where
        P: Fn(&RackDto) -> bool,
    {
        Ok(self
            .racks()
            .await?
            .into_iter()
            .find(|rack| predicate(&rack.dto)))
    }

    /// Lists the storage devices of this datacenter.
    pub async fn devices(&self) -> Result<Vec<StorageDevice>, ApiError> {
        let link = self.dto.require_link(rels::DEVICES)?;
        let items = self
            .client
            .follow_collection::<StorageDevicesDto>(
                &ops::DATACENTER_DEVICES,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| StorageDevice::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Lists the public networks of this datacenter.
    pub async fn public_networks(&self) -> Result<Vec<Network>, ApiError> {
        let link = self.dto.require_link(rels::PUBLICNETWORK)?;
        let items = self
            .client
            .follow_collection::<NetworksDto>(
                &ops::DATACENTER_PUBLIC_NETWORKS,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Network::persisted(self.client.clone(), dto, NetworkKind::Public))
            .collect())
    }

    /// Registers a storage device under this datacenter; see
    /// [`StorageDevice::build`] for a seeded representation.
    pub async fn create_device(
        &self,
        device: crate::resources::storage::StorageDeviceDto,
    ) -> Result<StorageDevice, ApiError> {
        require_state(self.state, ResourceState::Persisted, "register a device under")?;
        let link = self.dto.require_link(rels::DEVICES)?;
        let dto = self
            .client
            .create_linked(&crate::resources::storage::ops::DEVICE_CREATE, link, &device)
            .await?;
        Ok(StorageDevice::persisted(self.client.clone(), dto))
    }

    /// Lists the storage tiers of this datacenter.
    pub async fn tiers(&self) -> Result<Vec<crate::resources::storage::Tier>, ApiError> {
        let link = self.dto.require_link(rels::TIERS)?;
        let items = self
            .client
            .follow_collection::<crate::resources::storage::TiersDto>(
                &crate::resources::storage::ops::DATACENTER_TIERS,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| crate::resources::storage::Tier::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Creates a rack under this datacenter and returns its wrapper,
    /// already persisted.
    pub async fn create_rack(&self, rack: RackDto) -> Result<Rack, ApiError> {
        require_state(self.state, ResourceState::Persisted, "create a rack under")?;
        let link = self.dto.require_link(rels::RACKS)?;
        let dto = self
            .client
            .create_linked(&ops::RACK_CREATE, link, &rack)
            .await?;
        Ok(Rack::persisted(self.client.clone(), dto))
    }
}

/// A rack wrapper.
#[derive(Clone, Debug)]
pub struct Rack {
    client: ApiClient,
    dto: RackDto,
    state: ResourceState,
}

impl Rack {
    /// Builds a rack representation with the configured VLAN tag range,
    /// ready for [`Datacenter::create_rack`].
    #[must_use]
    pub fn build(client: &ApiClient, name: impl Into<String>) -> RackDto {
        let defaults = client.config().network_defaults();
        RackDto {
            name: Some(name.into()),
            vlan_id_min: Some(defaults.vlan_tag_min),
            vlan_id_max: Some(defaults.vlan_tag_max),
            ..RackDto::default()
        }
    }

    pub(crate) fn persisted(client: ApiClient, dto: RackDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &RackDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut RackDto {
        &mut self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Pushes local field changes to the server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self.client.update(&ops::RACK_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this rack. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::RACK_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Lists the physical machines of this rack.
    pub async fn machines(&self) -> Result<Vec<Machine>, ApiError> {
        let link = self.dto.require_link(rels::MACHINES)?;
        let items = self
            .client
            .follow_collection::<MachinesDto>(&ops::RACK_MACHINES, link, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Machine::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Returns the first machine matching the predicate.
    pub async fn find_machine<P>(&self, predicate: P) -> Result<Option<Machine>, ApiError>
    where
        P: Fn(&MachineDto) -> bool,
    {
        Ok(self
            .machines()
            .await?
            .into_iter()
            .find(|machine| predicate(&machine.dto)))
    }
}

/// A physical machine wrapper. Machines are discovered through their
/// rack, never created directly by this client.
#[derive(Clone, Debug)]
pub struct Machine {
    client: ApiClient,
    dto: MachineDto,
    state: ResourceState,
}

impl Machine {
    pub(crate) fn persisted(client: ApiClient, dto: MachineDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &MachineDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut MachineDto {
        &mut self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Pushes local field changes to the server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self.client.update(&ops::MACHINE_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Removes this machine from its rack. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::MACHINE_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }
}
