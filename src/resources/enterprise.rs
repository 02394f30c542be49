//! Tenancy and identity: enterprises, users, roles, and privileges.
//!
//! Enterprises and roles are top-level collections; users hang off their
//! enterprise and privileges off their role. Resource limits travel as a
//! nested value struct inside the enterprise representation, and the
//! allowed-datacenter list crosses the wire as a comma-separated id
//! string decoded to a `BTreeSet<i32>` at the boundary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::resources::network::{Network, NetworkKind, NetworksDto};
use crate::resources::{require_state, ResourceState};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::{rels, RestLink};
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// Fixed path of the top-level enterprises collection.
pub const ENTERPRISES_PATH: &str = "/admin/enterprises";
/// Fixed path of the top-level roles collection.
pub const ROLES_PATH: &str = "/admin/roles";

/// Comma-separated id list codec (`"1,3,5"` on the wire).
mod id_list {
    use std::collections::BTreeSet;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        ids: &BTreeSet<i32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&joined)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeSet<i32>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i32>()
                    .map_err(|_| D::Error::custom(format!("invalid id '{part}' in id list")))
            })
            .collect()
    }
}

/// Soft and hard resource quotas, nested inside an enterprise.
///
/// Zero means unlimited, matching the server's convention.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "limits", default)]
pub struct ResourceLimits {
    #[serde(rename = "cpuSoft")]
    pub cpu_soft: i64,
    #[serde(rename = "cpuHard")]
    pub cpu_hard: i64,
    #[serde(rename = "ramSoft")]
    pub ram_soft_mb: i64,
    #[serde(rename = "ramHard")]
    pub ram_hard_mb: i64,
    #[serde(rename = "storageSoft")]
    pub storage_soft: i64,
    #[serde(rename = "storageHard")]
    pub storage_hard: i64,
    #[serde(rename = "vlansSoft")]
    pub vlans_soft: i64,
    #[serde(rename = "vlansHard")]
    pub vlans_hard: i64,
    #[serde(rename = "publicIpsSoft")]
    pub public_ips_soft: i64,
    #[serde(rename = "publicIpsHard")]
    pub public_ips_hard: i64,
}

/// Wire representation of an enterprise.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "enterprise", default)]
pub struct EnterpriseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "limits", skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceLimits>,
    /// Datacenters this enterprise may use, as ids.
    #[serde(
        rename = "allowedDatacenters",
        with = "id_list",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub allowed_datacenter_ids: BTreeSet<i32>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for EnterpriseDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.enterprise+xml";
    const NAME: &'static str = "Enterprise";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the enterprises collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "enterprises", default)]
pub struct EnterprisesDto {
    #[serde(rename = "enterprise")]
    collection: Vec<EnterpriseDto>,
}

impl ResourceCollection for EnterprisesDto {
    type Item = EnterpriseDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.enterprises+xml";

    fn into_items(self) -> Vec<EnterpriseDto> {
        self.collection
    }
}

/// Wire representation of a user.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "user", default)]
pub struct UserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Virtual datacenters this user may see, as ids.
    #[serde(
        rename = "availableVirtualDatacenters",
        with = "id_list",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub available_virtual_datacenter_ids: BTreeSet<i32>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for UserDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.user+xml";
    const NAME: &'static str = "User";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the users collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "users", default)]
pub struct UsersDto {
    #[serde(rename = "user")]
    collection: Vec<UserDto>,
}

impl ResourceCollection for UsersDto {
    type Item = UserDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.users+xml";

    fn into_items(self) -> Vec<UserDto> {
        self.collection
    }
}

/// Wire representation of a role.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "role", default)]
pub struct RoleDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for RoleDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.role+xml";
    const NAME: &'static str = "Role";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the roles collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "roles", default)]
pub struct RolesDto {
    #[serde(rename = "role")]
    collection: Vec<RoleDto>,
}

impl ResourceCollection for RolesDto {
    type Item = RoleDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.roles+xml";

    fn into_items(self) -> Vec<RoleDto> {
        self.collection
    }
}

/// Wire representation of a privilege. Read-only.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "privilege", default)]
pub struct PrivilegeDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for PrivilegeDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.privilege+xml";
    const NAME: &'static str = "Privilege";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the privileges collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "privileges", default)]
pub struct PrivilegesDto {
    #[serde(rename = "privilege")]
    collection: Vec<PrivilegeDto>,
}

impl ResourceCollection for PrivilegesDto {
    type Item = PrivilegeDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.privileges+xml";

    fn into_items(self) -> Vec<PrivilegeDto> {
        self.collection
    }
}

/// A privilege, as granted by a role. Server-managed, never mutated by
/// this client.
#[derive(Clone, Debug)]
pub struct Privilege {
    dto: PrivilegeDto,
}

impl Privilege {
    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &PrivilegeDto {
        &self.dto
    }

    /// The privilege name, e.g. `"ENTERPRISE_ADMINISTER_ALL"`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.dto.name.as_deref()
    }
}

mod ops {
    use super::{
        BinderSpec, EnterpriseDto, EnterprisesDto, HttpMethod, NetworksDto, PrivilegesDto,
        RemoteOperation, Representation, ResourceCollection, RoleDto, RolesDto, UserDto, UsersDto,
    };
    use crate::rest::link::rels;

    pub const ENTERPRISE_LIST: RemoteOperation = RemoteOperation {
        name: "enterprise.list",
        method: HttpMethod::Get,
        binder: BinderSpec::None,
        accept: EnterprisesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const ENTERPRISE_READ: RemoteOperation = RemoteOperation {
        name: "enterprise.read",
        method: HttpMethod::Get,
        binder: BinderSpec::Path,
        accept: EnterpriseDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const ENTERPRISE_CREATE: RemoteOperation = RemoteOperation {
        name: "enterprise.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Body,
        accept: EnterpriseDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const ENTERPRISE_UPDATE: RemoteOperation = RemoteOperation {
        name: "enterprise.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: EnterpriseDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const ENTERPRISE_DELETE: RemoteOperation = RemoteOperation {
        name: "enterprise.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: EnterpriseDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const ENTERPRISE_USERS: RemoteOperation = RemoteOperation {
        name: "enterprise.users",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::USERS },
        accept: UsersDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const ENTERPRISE_EXTERNAL_NETWORKS: RemoteOperation = RemoteOperation {
        name: "enterprise.externalnetworks",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::EXTERNALNETWORK },
        accept: NetworksDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const ENTERPRISE_UNMANAGED_NETWORKS: RemoteOperation = RemoteOperation {
        name: "enterprise.unmanagednetworks",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::UNMANAGEDNETWORK },
        accept: NetworksDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const USER_CREATE: RemoteOperation = RemoteOperation {
        name: "user.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Link { rel: rels::USERS },
        accept: UserDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const USER_UPDATE: RemoteOperation = RemoteOperation {
        name: "user.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: UserDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const USER_DELETE: RemoteOperation = RemoteOperation {
        name: "user.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: UserDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const USER_ROLE: RemoteOperation = RemoteOperation {
        name: "user.role",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::ROLE },
        accept: RoleDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const ROLE_LIST: RemoteOperation = RemoteOperation {
        name: "role.list",
        method: HttpMethod::Get,
        binder: BinderSpec::None,
        accept: RolesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const ROLE_READ: RemoteOperation = RemoteOperation {
        name: "role.read",
        method: HttpMethod::Get,
        binder: BinderSpec::Path,
        accept: RoleDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const ROLE_PRIVILEGES: RemoteOperation = RemoteOperation {
        name: "role.privileges",
        method: HttpMethod::Get,
        binder: BinderSpec::Link { rel: rels::PRIVILEGES },
        accept: PrivilegesDto::MEDIA_TYPE,
        absent_on: &[],
    };
}

/// An enterprise wrapper.
#[derive(Clone, Debug)]
pub struct Enterprise {
    client: ApiClient,
    dto: EnterpriseDto,
    state: ResourceState,
}

impl Enterprise {
    /// Builds a transient enterprise.
    #[must_use]
    pub fn new(client: ApiClient, name: impl Into<String>) -> Self {
        let dto = EnterpriseDto {
            name: Some(name.into()),
            ..EnterpriseDto::default()
        };
        Self {
            client,
            dto,
            state: ResourceState::Transient,
        }
    }

    pub(crate) fn persisted(client: ApiClient, dto: EnterpriseDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// Lists all enterprises.
    pub async fn list(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        let items = client
            .list::<EnterprisesDto>(&ops::ENTERPRISE_LIST, ENTERPRISES_PATH, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Self::persisted(client.clone(), dto))
            .collect())
    }

    /// Fetches one enterprise by id; `Ok(None)` when it does not exist.
    pub async fn find_by_id(client: &ApiClient, id: i32) -> Result<Option<Self>, ApiError> {
        let dto = client
            .read::<EnterpriseDto>(&ops::ENTERPRISE_READ, ENTERPRISES_PATH, id)
            .await?;
        Ok(dto.map(|dto| Self::persisted(client.clone(), dto)))
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &EnterpriseDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut EnterpriseDto {
        &mut self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Creates this enterprise on the server.
    pub async fn save(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Transient, "save")?;
        self.dto = self
            .client
            .create(&ops::ENTERPRISE_CREATE, ENTERPRISES_PATH, &self.dto)
            .await?;
        self.state = ResourceState::Persisted;
        Ok(())
    }

    /// Pushes local field changes (limits, allowed datacenters) to the
    /// server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self
            .client
            .update(&ops::ENTERPRISE_UPDATE, &self.dto)
            .await?;
        Ok(())
    }

    /// Deletes this enterprise. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client
            .delete(&ops::ENTERPRISE_DELETE, &self.dto)
            .await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Lists the users of this enterprise.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let link = self.dto.require_link(rels::USERS)?;
        let items = self
            .client
            .follow_collection::<UsersDto>(&ops::ENTERPRISE_USERS, link, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| User::persisted(self.client.clone(), dto))
            .collect())
    }

    /// Returns the first user matching the predicate.
    pub async fn find_user<P>(&self, predicate: P) -> Result<Option<User>, ApiError>
    where
        P: Fn(&UserDto) -> bool,
    {
        Ok(self
            .users()
            .await?
            .into_iter()
            .find(|user| predicate(&user.dto)))
    }

    /// Creates a user under this enterprise.
    pub async fn create_user(&self, user: UserDto) -> Result<User, ApiError> {
        require_state(self.state, ResourceState::Persisted, "create a user under")?;
        let link = self.dto.require_link(rels::USERS)?;
        let dto = self
            .client
            .create_linked(&ops::USER_CREATE, link, &user)
            .await?;
        Ok(User::persisted(self.client.clone(), dto))
    }

    /// Lists the external networks reserved for this enterprise.
    pub async fn external_networks(&self) -> Result<Vec<Network>, ApiError> {
        let link = self.dto.require_link(rels::EXTERNALNETWORK)?;
        let items = self
            .client
            .follow_collection::<NetworksDto>(
                &ops::ENTERPRISE_EXTERNAL_NETWORKS,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Network::persisted(self.client.clone(), dto, NetworkKind::External))
            .collect())
    }

    /// Lists the unmanaged networks reserved for this enterprise.
    pub async fn unmanaged_networks(&self) -> Result<Vec<Network>, ApiError> {
        let link = self.dto.require_link(rels::UNMANAGEDNETWORK)?;
        let items = self
            .client
            .follow_collection::<NetworksDto>(
                &ops::ENTERPRISE_UNMANAGED_NETWORKS,
                link,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Network::persisted(self.client.clone(), dto, NetworkKind::Unmanaged))
            .collect())
    }
}

/// A user wrapper.
#[derive(Clone, Debug)]
pub struct User {
    client: ApiClient,
    dto: UserDto,
    state: ResourceState,
}

impl User {
    pub(crate) fn persisted(client: ApiClient, dto: UserDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &UserDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut UserDto {
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
        self.dto = self.client.update(&ops::USER_UPDATE, &self.dto).await?;
        Ok(())
    }

    /// Deletes this user. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client.delete(&ops::USER_DELETE, &self.dto).await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }

    /// Fetches this user's role; `Ok(None)` when the role is gone.
    pub async fn role(&self) -> Result<Option<Role>, ApiError> {
        let link = self.dto.require_link(rels::ROLE)?;
        let dto = self
            .client
            .follow::<RoleDto>(&ops::USER_ROLE, link, &QueryOptions::new())
            .await?;
        Ok(dto.map(|dto| Role::persisted(self.client.clone(), dto)))
    }
}

/// A role wrapper. Roles are managed server-side; this client reads them
/// and walks their privileges.
#[derive(Clone, Debug)]
pub struct Role {
    client: ApiClient,
    dto: RoleDto,
}

impl Role {
    pub(crate) fn persisted(client: ApiClient, dto: RoleDto) -> Self {
        Self { client, dto }
    }

    /// Lists all roles.
    pub async fn list(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        let items = client
            .list::<RolesDto>(&ops::ROLE_LIST, ROLES_PATH, &QueryOptions::new())
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Self::persisted(client.clone(), dto))
            .collect())
    }

    /// Fetches one role by id; `Ok(None)` when it does not exist.
    pub async fn find_by_id(client: &ApiClient, id: i32) -> Result<Option<Self>, ApiError> {
        let dto = client
            .read::<RoleDto>(&ops::ROLE_READ, ROLES_PATH, id)
            .await?;
        Ok(dto.map(|dto| Self::persisted(client.clone(), dto)))
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &RoleDto {
        &self.dto
    }

    /// Lists the privileges this role grants.
    pub async fn privileges(&self) -> Result<Vec<Privilege>, ApiError> {
        let link = self.dto.require_link(rels::PRIVILEGES)?;
        let items = self
            .client
            .follow_collection::<PrivilegesDto>(&ops::ROLE_PRIVILEGES, link, &QueryOptions::new())
            .await?;
        Ok(items.into_iter().map(|dto| Privilege { dto }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_datacenters_decode_from_comma_list() {
        let xml = r#"<enterprise><name>acme</name><allowedDatacenters>3,1,5</allowedDatacenters></enterprise>"#;
        let dto: EnterpriseDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(
            dto.allowed_datacenter_ids,
            BTreeSet::from([1, 3, 5])
        );
    }

    #[test]
    fn test_allowed_datacenters_encode_sorted() {
        let dto = EnterpriseDto {
            name: Some("acme".to_string()),
            allowed_datacenter_ids: BTreeSet::from([5, 1, 3]),
            ..EnterpriseDto::default()
        };
        let xml = quick_xml::se::to_string(&dto).unwrap();
        assert!(xml.contains("<allowedDatacenters>1,3,5</allowedDatacenters>"));
    }

    #[test]
    fn test_malformed_id_list_fails_to_decode() {
        let xml = r#"<enterprise><allowedDatacenters>1,two,3</allowedDatacenters></enterprise>"#;
        let result: Result<EnterpriseDto, _> = quick_xml::de::from_str(xml);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_id_list_is_an_empty_set() {
        let xml = r#"<enterprise><allowedDatacenters></allowedDatacenters></enterprise>"#;
        let dto: EnterpriseDto = quick_xml::de::from_str(xml).unwrap();
        assert!(dto.allowed_datacenter_ids.is_empty());
    }

    #[test]
    fn test_limits_nest_inside_enterprise() {
        let xml = r#"<enterprise>
            <name>acme</name>
            <limits>
                <cpuSoft>10</cpuSoft><cpuHard>20</cpuHard>
                <ramSoft>4096</ramSoft><ramHard>8192</ramHard>
                <storageSoft>0</storageSoft><storageHard>0</storageHard>
                <vlansSoft>2</vlansSoft><vlansHard>4</vlansHard>
                <publicIpsSoft>1</publicIpsSoft><publicIpsHard>2</publicIpsHard>
            </limits>
        </enterprise>"#;
        let dto: EnterpriseDto = quick_xml::de::from_str(xml).unwrap();
        let limits = dto.limits.unwrap();
        assert_eq!(limits.cpu_hard, 20);
        assert_eq!(limits.ram_soft_mb, 4096);
        assert_eq!(limits.storage_hard, 0);
    }

    #[test]
    fn test_user_available_vdcs_decode() {
        let xml = r#"<user><nick>jdoe</nick><email>jdoe@example.com</email><availableVirtualDatacenters>7,9</availableVirtualDatacenters></user>"#;
        let dto: UserDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(dto.available_virtual_datacenter_ids, BTreeSet::from([7, 9]));
    }
}
