//! Pricing templates.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::resources::{require_state, ResourceState};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::RestLink;
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// Fixed path of the top-level pricing templates collection.
pub const PRICING_TEMPLATES_PATH: &str = "/admin/rules/pricingtemplates";

/// Wire representation of a pricing template.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "pricingTemplate", default)]
pub struct PricingTemplateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "chargingPeriod", skip_serializing_if = "Option::is_none")]
    pub charging_period: Option<u8>,
    #[serde(rename = "minimumCharge", skip_serializing_if = "Option::is_none")]
    pub minimum_charge: Option<f64>,
    #[serde(rename = "minimumChargePeriod", skip_serializing_if = "Option::is_none")]
    pub minimum_charge_period: Option<u8>,
    #[serde(rename = "standingChargePeriod", skip_serializing_if = "Option::is_none")]
    pub standing_charge_period: Option<f64>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for PricingTemplateDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.pricingtemplate+xml";
    const NAME: &'static str = "PricingTemplate";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the pricing templates collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "pricingTemplates", default)]
pub struct PricingTemplatesDto {
    #[serde(rename = "pricingTemplate")]
    collection: Vec<PricingTemplateDto>,
}

impl ResourceCollection for PricingTemplatesDto {
    type Item = PricingTemplateDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.pricingtemplates+xml";

    fn into_items(self) -> Vec<PricingTemplateDto> {
        self.collection
    }
}

mod ops {
    use super::{
        BinderSpec, HttpMethod, PricingTemplateDto, PricingTemplatesDto, RemoteOperation,
        Representation, ResourceCollection,
    };

    pub const TEMPLATE_LIST: RemoteOperation = RemoteOperation {
        name: "pricingtemplate.list",
        method: HttpMethod::Get,
        binder: BinderSpec::None,
        accept: PricingTemplatesDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const TEMPLATE_READ: RemoteOperation = RemoteOperation {
        name: "pricingtemplate.read",
        method: HttpMethod::Get,
        binder: BinderSpec::Path,
        accept: PricingTemplateDto::MEDIA_TYPE,
        absent_on: &[404],
    };
    pub const TEMPLATE_CREATE: RemoteOperation = RemoteOperation {
        name: "pricingtemplate.create",
        method: HttpMethod::Post,
        binder: BinderSpec::Body,
        accept: PricingTemplateDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const TEMPLATE_UPDATE: RemoteOperation = RemoteOperation {
        name: "pricingtemplate.update",
        method: HttpMethod::Put,
        binder: BinderSpec::PayloadAndLink,
        accept: PricingTemplateDto::MEDIA_TYPE,
        absent_on: &[],
    };
    pub const TEMPLATE_DELETE: RemoteOperation = RemoteOperation {
        name: "pricingtemplate.delete",
        method: HttpMethod::Delete,
        binder: BinderSpec::EditLink,
        accept: PricingTemplateDto::MEDIA_TYPE,
        absent_on: &[404],
    };
}

/// A pricing template wrapper.
#[derive(Clone, Debug)]
pub struct PricingTemplate {
    client: ApiClient,
    dto: PricingTemplateDto,
    state: ResourceState,
}

impl PricingTemplate {
    /// Builds a transient pricing template.
    #[must_use]
    pub fn new(client: ApiClient, name: impl Into<String>) -> Self {
        let dto = PricingTemplateDto {
            name: Some(name.into()),
            ..PricingTemplateDto::default()
        };
        Self {
            client,
            dto,
            state: ResourceState::Transient,
        }
    }

    pub(crate) fn persisted(client: ApiClient, dto: PricingTemplateDto) -> Self {
        Self {
            client,
            dto,
            state: ResourceState::Persisted,
        }
    }

    /// Lists all pricing templates.
    pub async fn list(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        let items = client
            .list::<PricingTemplatesDto>(
                &ops::TEMPLATE_LIST,
                PRICING_TEMPLATES_PATH,
                &QueryOptions::new(),
            )
            .await?;
        Ok(items
            .into_iter()
            .map(|dto| Self::persisted(client.clone(), dto))
            .collect())
    }

    /// Fetches one template by id; `Ok(None)` when it does not exist.
    pub async fn find_by_id(client: &ApiClient, id: i32) -> Result<Option<Self>, ApiError> {
        let dto = client
            .read::<PricingTemplateDto>(&ops::TEMPLATE_READ, PRICING_TEMPLATES_PATH, id)
            .await?;
        Ok(dto.map(|dto| Self::persisted(client.clone(), dto)))
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &PricingTemplateDto {
        &self.dto
    }

    /// A mutable view for local edits before [`update`](Self::update).
    pub fn dto_mut(&mut self) -> &mut PricingTemplateDto {
        &mut self.dto
    }

    /// The wrapper lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ResourceState {
        self.state
    }

    /// Creates this template on the server.
    pub async fn save(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Transient, "save")?;
        self.dto = self
            .client
            .create(&ops::TEMPLATE_CREATE, PRICING_TEMPLATES_PATH, &self.dto)
            .await?;
        self.state = ResourceState::Persisted;
        Ok(())
    }

    /// Pushes local field changes to the server via the `edit` link.
    pub async fn update(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "update")?;
        self.dto = self
            .client
            .update(&ops::TEMPLATE_UPDATE, &self.dto)
            .await?;
        Ok(())
    }

    /// Deletes this template. The wrapper becomes terminal.
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        require_state(self.state, ResourceState::Persisted, "delete")?;
        self.client
            .delete(&ops::TEMPLATE_DELETE, &self.dto)
            .await?;
        self.state = ResourceState::Deleted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_dto_wire_names() {
        let xml = r#"<pricingTemplate>
            <name>standard</name>
            <chargingPeriod>3</chargingPeriod>
            <minimumCharge>10.5</minimumCharge>
        </pricingTemplate>"#;
        let dto: PricingTemplateDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(dto.charging_period, Some(3));
        assert_eq!(dto.minimum_charge, Some(10.5));
    }
}
