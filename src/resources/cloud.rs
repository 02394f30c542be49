//! Cloud resources: virtual datacenters, virtual appliances, and virtual
//! machines.
//!
//! Virtual datacenters are a top-level collection; a new one names its
//! enterprise and physical datacenter through parent links derived from
//! already-fetched representations. Appliances and machines below are
//! fully link-driven, including the deploy/undeploy actions that answer
//! with a queued task.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::resources::enterprise::EnterpriseDto;
use crate::resources::infrastructure::DatacenterDto;
use crate::resources::network::{Network, NetworkDto, NetworkKind, NetworksDto};
use crate::resources::{require_state, ResourceState};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::{rels, RestLink};
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};
use crate::tasks::{AcceptedRequest, TaskDto, TasksDto};

/// Fixed path of the top-level virtual datacenters collection.
pub const VIRTUAL_DATACENTERS_PATH: &str = "/cloud/virtualdatacenters";

/// Wire representation of a virtual datacenter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "virtualdatacenter", default)]
pub struct VirtualDatacenterDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "hypervisorType", skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for VirtualDatacenterDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.virtualdatacenter+xml";
    const NAME: &'static str = "VirtualDatacenter";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the virtual datacenters collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "virtualdatacenters", default)]
pub struct VirtualDatacentersDto {
    #[serde(rename = "virtualdatacenter")]
    collection: Vec<VirtualDatacenterDto>,
}

impl ResourceCollection for VirtualDatacentersDto {
    type Item = VirtualDatacenterDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.virtualdatacenters+xml";

    fn into_items(self) -> Vec<VirtualDatacenterDto> {
        self.collection
    }
}

/// Wire representation of a virtual appliance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "virtualappliance", default)]
pub struct VirtualApplianceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for VirtualApplianceDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.virtualappliance+xml";
    const NAME: &'static str = "VirtualAppliance";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the virtual appliances collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "virtualappliances", default)]
pub struct VirtualAppliancesDto {
    #[serde(rename = "virtualappliance")]
    collection: Vec<VirtualApplianceDto>,
}

impl ResourceCollection for VirtualAppliancesDto {
    type Item = VirtualApplianceDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.virtualappliances+xml";

    fn into_items(self) -> Vec<VirtualApplianceDto> {
        self.collection
    }
}

/// Wire representation of a virtual machine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "virtualmachine", default)]
pub struct VirtualMachineDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    #[serde(rename = "ram", skip_serializing_if = "Option::is_none")]
    pub ram_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for VirtualMachineDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.virtualmachine+xml";
    const NAME: &'static str = "VirtualMachine";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the virtual machines collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "virtualmachines", default)]
pub struct VirtualMachinesDto {
    #[serde(rename = "virtualmachine")]
    collection: Vec<VirtualMachineDto>,
}

impl ResourceCollection for VirtualMachinesDto {
    type Item = VirtualMachineDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.virtualmachines+xml";

    fn into_items(self) -> Vec<VirtualMachineDto> {
        self.collection
    }
}

mod ops {
    use super::{
        AcceptedRequest, BinderSpec, HttpMethod, NetworkDto, NetworksDto, RemoteOperation,
        Representation, ResourceCollection, TasksDto, VirtualApplianceDto, VirtualAppliancesDto,
        VirtualDatacenterDto, VirtualDatacentersDto, VirtualMachineDto, VirtualMachinesDto,
    };
    use crate::rest::link::rels;

    pub const VDC_LIST: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.list",
        method: HttpMethod::Get,
        binder: BinderSpec::None,
        accept: VirtualDatacentersDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VDC_READ: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.read",
        method: HttpMethod::Get,
        binder: BinderSpec::Path,
        accept: VirtualDatacenterDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const VDC_CREATE: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Body,
        accept: VirtualDatacenterDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VDC_UPDATE: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: VirtualDatacenterDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VDC_DELETE: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: VirtualDatacenterDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const VDC_APPLIANCES: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.virtualappliances",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::VIRTUALAPPLIANCES },
        accept: VirtualAppliancesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VDC_PRIVATE_NETWORKS: RemoteOperation = RemoteOperation {
        name: "virtualdatacenter.privatenetworks",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::PRIVATENETWORK },
        accept: NetworksDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const PRIVATE_NETWORK_CREATE: RemoteOperation = RemoteOperation {
        name: "privatenetwork.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::PRIVATENETWORK },
        accept: NetworkDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VAPP_CREATE: RemoteOperation = RemoteOperation {
        name: "virtualappliance.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::VIRTUALAPPLIANCES },
        accept: VirtualApplianceDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VAPP_UPDATE: RemoteOperation = RemoteOperation {
        name: "virtualappliance.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: VirtualApplianceDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VAPP_DELETE: RemoteOperation = RemoteOperation {
        name: "virtualappliance.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: VirtualApplianceDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const VAPP_MACHINES: RemoteOperation = RemoteOperation {
        name: "virtualappliance.virtualmachines",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::VIRTUALMACHINES },
        accept: VirtualMachinesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VAPP_DEPLOY: RemoteOperation = RemoteOperation {
        name: "virtualappliance.deploy",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::DEPLOY },
        accept: AcceptedRequest::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VAPP_UNDEPLOY: RemoteOperation = RemoteOperation {
        name: "virtualappliance.undeploy",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::UNDEPLOY },
        accept: AcceptedRequest::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VM_UPDATE: RemoteOperation = RemoteOperation {
        name: "virtualmachine.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: VirtualMachineDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VM_DELETE: RemoteOperation = RemoteOperation {
        name: "virtualmachine.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: VirtualMachineDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const VM_DEPLOY: RemoteOperation = RemoteOperation {
        name: "virtualmachine.deploy",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::DEPLOY },
        accept: AcceptedRequest::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VM_UNDEPLOY: RemoteOperation = RemoteOperation {
        name: "virtualmachine.undeploy",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::UNDEPLOY },
        accept: AcceptedRequest::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const VM_TASKS: RemoteOperation = RemoteOperation {
        name: "virtualmachine.tasks",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::TASKS },
        accept: TasksDto::MEDIA_TYPE,
        absent_on: &[],
    };
}

/// A virtual datacenter wrapper.
#[derive(Clone, Debug)]
pub struct VirtualDatacenter {
    client: ApiClient,
    dto: VirtualDatacenterDto,
    state: ResourceState,
}

impl VirtualDatacenter {
    /// Builds a transient virtual datacenter whose parent links point at
    /// the given enterprise and physical datacenter.
    ///
    /// # Errors
    ///
    /// Fails when either parent representation carries no `edit` link,
    /// i.e. was never fetched from the server.
    pub fn new(
        client: ApiClient,
        name: impl Into<String>,
        hypervisor_type: impl Into<String>,
        datacenter: &DatacenterDto,
        enterprise: &EnterpriseDto,
    ) -> Result<Self, ApiError> {
        let datacenter_link = parent_link(datacenter.edit_link()?, rels::DATACENTER);
        let enterprise_link = parent_link(enterprise.edit_link()?, rels::ENTERPRISE);
        let mut dto = VirtualDatacenterDto {
            name: Some(name.into()),
            hypervisor_type: Some(hypervisor_type.into()),
            ..VirtualDatacenterDto::default()
        };
        dto.add_link(datacenter_link);
        dto.add_link(enterprise_link);
        Ok(Self {
            client,
            dto,
            state: ResourceState::Transient,
        })
    }

    pub(crate) fn persisted(client: ApiClient, dto: VirtualDatacenterDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// Lists all virtual datacenters visible to the caller.
    pub async fn list(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        let items = client
            .list::<VirtualDatacentersDto>(
                &ops::VDC_LIST,
                VIRTUAL_DATACENTERS_PATH,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Self::persisted(client.clone(), dto))
            .collect())
    }

    /// Fetches one virtual datacenter by id; `Ok(None)` when it does not
    /// exist.
    pub async fn find_by_id(client: &ApiClient, id: i32) -> Result<Option<Self>, ApiError> {
        let dto = client
            .read::<VirtualDatacenterDto>(&ops::VDC_READ, VIRTUAL_DATACENTERS_PATH, id)
            .await?;
        Ok(dto.map(|dto| Self::persisted(client.clone(), dto)))
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &VirtualDatacenterDto {
        &self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Creates this virtual datacenter on the server.
    pub async fn save(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Transient, "save")?;
        self.dto = self
            .client
            .create(&ops::VDC_CREATE, VIRTUAL_DATACENTERS_PATH, &self.dto)
            .await?;
        self.state = ResourceState::Persisted;
        Ok(())
    }

    /// Pushes local field changes to the server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self.client.update(&ops::VDC_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this virtual datacenter. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::VDC_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Lists the virtual appliances of this virtual datacenter.
    pub async fn virtual_appliances(&self) -> Result<Vec<VirtualAppliance>, ApiError> {
        let link = self.dto.require_link(rels::VIRTUALAPPLIANCES)?;
        let items = self
            .client
            .follow_collection::<VirtualAppliancesDto>(
                &ops::VDC_APPLIANCES,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| VirtualAppliance::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Returns the first appliance matching the predicate.
    pub async fn find_virtual_appliance<P>(
        &self,
        predicate: P,
    ) -> Result<Option<VirtualAppliance>, ApiError>
    where
        P: Fn(&VirtualApplianceDto) -> bool,
    {
        Ok(self
            .virtual_appliances()
            .await?
            .into_iter()
            .find(|appliance| predicate(&appliance.dto)))
    }

    /// Creates a virtual appliance under this virtual datacenter.
    pub async fn create_virtual_appliance(
        &self,
        name: impl Into<String>,
    ) -> Result<VirtualAppliance, ApiError> {
        require_state(self.state, ResourceState::Persisted, "create an appliance under")?;
        let link = self.dto.require_link(rels::VIRTUALAPPLIANCES)?;
        let payload = VirtualApplianceDto {
            name: Some(name.into()),
            ..VirtualApplianceDto::default()
        };
        let dto = self
            .client
            .create_linked(&ops::VAPP_CREATE, link, &payload)
            .await?;
        Ok(VirtualAppliance::persisted(self.client.clone(), dto))
    }

    /// Lists the private networks of this virtual datacenter.
    pub async fn private_networks(&self) -> Result<Vec<Network>, ApiError> {
        let link = self.dto.require_link(rels::PRIVATENETWORK)?;
        let items = self
            .client
            .follow_collection::<NetworksDto>(
                &ops::VDC_PRIVATE_NETWORKS,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Network::persisted(self.client.clone(), dto, NetworkKind::Private))
            .collect())
    }

    /// Creates a private network under this virtual datacenter; see
    /// [`Network::build_private`] for a seeded representation.
    pub async fn create_private_network(&self, network: NetworkDto) -> Result<Network, ApiError> {
        require_state(self.state, ResourceState::Persisted, "create a network under")?;
        let link = self.dto.require_link(rels::PRIVATENETWORK)?;
        let dto = self
            .client
            .create_linked(&ops::PRIVATE_NETWORK_CREATE, link, &network)
            .await?;
        Ok(Network::persisted(self.client.clone(), dto, NetworkKind::Private))
    }
}

/// A virtual appliance wrapper.
#[derive(Clone, Debug)]
pub struct VirtualAppliance {
    client: ApiClient,
    dto: VirtualApplianceDto,
    state: ResourceState,
}

impl VirtualAppliance {
    pub(crate) fn persisted(client: ApiClient, dto: VirtualApplianceDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &VirtualApplianceDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut VirtualApplianceDto {
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
        self.dto = self.client.update(&ops::VAPP_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this appliance. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::VAPP_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Lists the virtual machines of this appliance.
    pub async fn virtual_machines(&self) -> Result<Vec<VirtualMachine>, ApiError> {
        let link = self.dto.require_link(rels::VIRTUALMACHINES)?;
        let items = self
            .client
            .follow_collection::<VirtualMachinesDto>(
                &ops::VAPP_MACHINES,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| VirtualMachine::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Deploys every machine in this appliance; answers with the queued
    /// task acknowledgement.
    pub async fn deploy(&self) -> Result<AcceptedRequest, ApiError> {
        require_state(self.state, ResourceState::Persisted, "deploy")?;
        let link = self.dto.require_link(rels::DEPLOY)?;
        self.client.post_action(&ops::VAPP_DEPLOY, link).await
    }

    /// Undeploys every machine in this appliance.
    pub async fn undeploy(&self) -> Result<AcceptedRequest, ApiError> {
        require_state(self.state, ResourceState::Persisted, "undeploy")?;
        let link = self.dto.require_link(rels::UNDEPLOY)?;
        self.client.post_action(&ops::VAPP_UNDEPLOY, link).await
    }
}

/// A virtual machine wrapper. Machines are discovered through their
/// appliance.
#[derive(Clone, Debug)]
pub struct VirtualMachine {
    client: ApiClient,
    dto: VirtualMachineDto,
    state: ResourceState,
}

impl VirtualMachine {
    pub(crate) fn persisted(client: ApiClient, dto: VirtualMachineDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &VirtualMachineDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut VirtualMachineDto {
        &mut self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Pushes local field changes (cpu, ram) to the server.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self.client.update(&ops::VM_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this machine. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::VM_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Deploys this machine; answers with the queued task acknowledgement.
    pub async fn deploy(&self) -> Result<AcceptedRequest, ApiError> {
        require_state(self.state, ResourceState::Persisted, "deploy")?;
        let link = self.dto.require_link(rels::DEPLOY)?;
        self.client.post_action(&ops::VM_DEPLOY, link).await
    }

    /// Undeploys this machine.
    pub async fn undeploy(&self) -> Result<AcceptedRequest, ApiError> {
        require_state(self.state, ResourceState::Persisted, "undeploy")?;
        let link = self.dto.require_link(rels::UNDEPLOY)?;
        self.client.post_action(&ops::VM_UNDEPLOY, link).await
    }

    /// Lists the tasks the server ran or is running for this machine.
    pub async fn tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        let link = self.dto.require_link(rels::TASKS)?;
        self.client
            .follow_collection::<TasksDto>(&ops::VM_TASKS, link, &QueryOptions::new())
            .await
    }
}

/// Retargets a parent's `edit` link under the relation a child payload
/// must name it with.
fn parent_link(edit: &RestLink, rel: &str) -> RestLink {
    let mut link = RestLink::new(rel, edit.href.clone());
    link.media_type = edit.media_type.clone();
    link
}
