//! Storage: devices, pools, and tiers.
//!
//! Devices are registered under a datacenter; pools are discovered on a
//! device and assigned a tier through a link. Tiers belong to the
//! datacenter and can only be renamed or toggled, never created here.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::resources::{require_state, ResourceState};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::{rels, RestLink};
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// Wire representation of a storage device.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "device", default)]
pub struct StorageDeviceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "storageTechnology", skip_serializing_if = "Option::is_none")]
    pub storage_technology: Option<String>,
    #[serde(rename = "managementIp", skip_serializing_if = "Option::is_none")]
    pub management_ip: Option<String>,
    #[serde(rename = "managementPort", skip_serializing_if = "Option::is_none")]
    pub management_port: Option<u16>,
    #[serde(rename = "serviceIp", skip_serializing_if = "Option::is_none")]
    pub service_ip: Option<String>,
    #[serde(rename = "servicePort", skip_serializing_if = "Option::is_none")]
    pub service_port: Option<u16>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for StorageDeviceDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.storagedevice+xml";
    const NAME: &'static str = "StorageDevice";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the storage devices collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "devices", default)]
pub struct StorageDevicesDto {
    #[serde(rename = "device")]
    collection: Vec<StorageDeviceDto>,
}

impl ResourceCollection for StorageDevicesDto {
    type Item = StorageDeviceDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.storagedevices+xml";

    fn into_items(self) -> Vec<StorageDeviceDto> {
        self.collection
    }
}

/// Wire representation of a storage pool.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "storagePool", default)]
pub struct StoragePoolDto {
    #[serde(rename = "idStorage", skip_serializing_if = "Option::is_none")]
    pub id_storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "totalSizeInMb", skip_serializing_if = "Option::is_none")]
    pub total_size_mb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for StoragePoolDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.storagepool+xml";
    const NAME: &'static str = "StoragePool";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the storage pools collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "storagePools", default)]
pub struct StoragePoolsDto {
    #[serde(rename = "storagePool")]
    collection: Vec<StoragePoolDto>,
}

impl ResourceCollection for StoragePoolsDto {
    type Item = StoragePoolDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.storagepools+xml";

    fn into_items(self) -> Vec<StoragePoolDto> {
        self.collection
    }
}

/// Wire representation of a storage tier.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "tier", default)]
pub struct TierDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for TierDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.tier+xml";
    const NAME: &'static str = "Tier";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the tiers collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "tiers", default)]
pub struct TiersDto {
    #[serde(rename = "tier")]
    collection: Vec<TierDto>,
}

impl ResourceCollection for TiersDto {
    type Item = TierDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.tiers+xml";

    fn into_items(self) -> Vec<TierDto> {
        self.collection
    }
}

pub(crate) mod ops {
    use super::{
        BinderSpec, HttpMethod, RemoteOperation, Representation, ResourceCollection,
        StorageDeviceDto, StoragePoolsDto, TierDto, TiersDto,
    };
    use crate::rest::link::rels;

    pub const DEVICE_CREATE: RemoteOperation = RemoteOperation {
        name: "storagedevice.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::DEVICES },
        accept: StorageDeviceDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DEVICE_UPDATE: RemoteOperation = RemoteOperation {
        name: "storagedevice.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: StorageDeviceDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DEVICE_DELETE: RemoteOperation = RemoteOperation {
        name: "storagedevice.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: StorageDeviceDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const DEVICE_POOLS: RemoteOperation = RemoteOperation {
        name: "storagedevice.pools",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::POOLS },
        accept: StoragePoolsDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const POOL_TIER: RemoteOperation = RemoteOperation {
        name: "storagepool.tier",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::TIER },
        accept: TierDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const TIER_UPDATE: RemoteOperation = RemoteOperation {
        name: "tier.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: TierDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const DATACENTER_TIERS: RemoteOperation = RemoteOperation {
        name: "datacenter.tiers",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::TIERS },
        accept: TiersDto::MEDIA_TYPE,
        absent_on: &[],
    };
}

/// A storage device wrapper.
#[derive(Clone, Debug)]
pub struct StorageDevice {
    client: ApiClient,
    dto: StorageDeviceDto,
    state: ResourceState,
}

impl StorageDevice {
    /// Builds a device representation with the configured management
    /// port, ready for [`Datacenter::create_device`](crate::resources::Datacenter::create_device).
    #[must_use]
    pub fn build(
        client: &ApiClient,
        name: impl Into<String>,
        technology: impl Into<String>,
        management_ip: impl Into<String>,
    ) -> StorageDeviceDto {
        let defaults = client.config().network_defaults();
        StorageDeviceDto {
            name: Some(name.into()),
            storage_technology: Some(technology.into()),
            management_ip: Some(management_ip.into()),
            management_port: Some(defaults.management_port),
            ..StorageDeviceDto::default()
        }
    }

    pub(crate) fn persisted(client: ApiClient, dto: StorageDeviceDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &StorageDeviceDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut StorageDeviceDto {
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
        self.dto = self.client.update(&ops::DEVICE_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Unregisters this device. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::DEVICE_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Lists the pools discovered on this device.
    pub async fn pools(&self) -> Result<Vec<StoragePool>, ApiError> {
        let link = self.dto.require_link(rels::POOLS)?;
        let items = self
            .client
            .follow_collection::<StoragePoolsDto>(&ops::DEVICE_POOLS, link, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| StoragePool::persisted(self.client.clone(), dto))
            .collect())
    }
}

/// A storage pool wrapper. Pools are discovered on their device, never
/// created by this client.
#[derive(Clone, Debug)]
pub struct StoragePool {
    client: ApiClient,
    dto: StoragePoolDto,
}

impl StoragePool {
    pub(crate) fn persisted(client: ApiClient, dto: StoragePoolDto) -> Self {
        Self { client, dto }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &StoragePoolDto {
        &self.dto
    }

    /// Fetches the tier this pool is assigned to; `Ok(None)` when the
    /// assignment is gone.
    pub async fn tier(&self) -> Result<Option<Tier>, ApiError> {
        let link = self.dto.require_link(rels::TIER)?;
        let dto = self
            .client
            .follow::<TierDto>(&ops::POOL_TIER, link, &QueryOptions::new())
            .await?;
        Ok(dto.map(|dto| Tier::persisted(self.client.clone(), dto)))
    }
}

/// A storage tier wrapper.
#[derive(Clone, Debug)]
pub struct Tier {
    client: ApiClient,
    dto: TierDto,
}

impl Tier {
    pub(crate) fn persisted(client: ApiClient, dto: TierDto) -> Self {
        Self { client, dto }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &TierDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut TierDto {
        &mut self.dto
    }

    /// Pushes local field changes (name, enabled) to the server.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        self.dto = self.client.update(&ops::TIER_UPDATE, &self.dto).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_dto_wire_names() {
        let xml = r#"<device>
            <name>filer01</name>
            <storageTechnology>NETAPP</storageTechnology>
            <managementIp>10.0.0.5</managementIp>
            <managementPort>8180</managementPort>
        </device>"#;
        let dto: StorageDeviceDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(dto.storage_technology.as_deref(), Some("NETAPP"));
        assert_eq!(dto.management_port, Some(8180));
    }

    #[test]
    fn test_pool_dto_parses_size_and_identifier() {
        let xml = r#"<storagePool><idStorage>aggr0</idStorage><name>aggr0</name><totalSizeInMb>1048576</totalSizeInMb><enabled>true</enabled></storagePool>"#;
        let dto: StoragePoolDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(dto.id_storage.as_deref(), Some("aggr0"));
        assert_eq!(dto.total_size_mb, Some(1_048_576));
        assert_eq!(dto.enabled, Some(true));
    }

    #[test]
    fn test_tiers_collection_parses() {
        let xml = r#"<tiers><tier><id>1</id><name>gold</name><enabled>true</enabled></tier></tiers>"#;
        let collection: TiersDto = quick_xml::de::from_str(xml).unwrap();
        let tiers = collection.into_items();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].name.as_deref(), Some("gold"));
    }
}
