use std::fmt;

use audit_core::{Device, DeviceId};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{ApiError, ApiSettings, ConfigError, Credentials};

const LISTING_FIELDS: &str = "computername,client,location";
const LISTING_ORDER: &str = "id asc";
const PROCESSOR_FIELDS: &str = "processorname";
const PROCESSOR_NAME_FIELD: &str = "ProcessorName";
const CLIENT_ID_HEADER: &str = "clientid";

/// Answer to a processor lookup that reached the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorReply {
    Name(String),
    Missing(MissingReason),
}

/// Why a processor reply carried no usable name. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    HttpStatus { status: u16, body: String },
    NoProcessor,
    NoProcessorName,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::HttpStatus { status, body } => write!(f, "http status {status}: {body}"),
            MissingReason::NoProcessor => write!(f, "no processor found"),
            MissingReason::NoProcessorName => write!(f, "no processor name found"),
        }
    }
}

/// Remote inventory of managed endpoints.
#[async_trait::async_trait]
pub trait InventoryApi: Send + Sync {
    /// One page of devices in ascending id order; pages start at 1.
    async fn list_page(&self, page: u32, page_size: u32) -> Result<Vec<Device>, ApiError>;

    /// `Err` means the attempt may be retried.
    async fn processor(&self, device_id: DeviceId) -> Result<ProcessorReply, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ApiComputer {
    #[serde(rename = "Id")]
    id: DeviceId,
    #[serde(rename = "ComputerName", default)]
    computer_name: Option<String>,
    #[serde(rename = "Client", default)]
    client: Option<NamedRef>,
    #[serde(rename = "Location", default)]
    location: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    #[serde(rename = "Name", default)]
    name: Option<String>,
}

impl From<ApiComputer> for Device {
    fn from(computer: ApiComputer) -> Self {
        let name_of = |named: Option<NamedRef>| named.and_then(|n| n.name).unwrap_or_default();
        Device {
            id: computer.id,
            computer_name: computer.computer_name.unwrap_or_default(),
            client: name_of(computer.client),
            location: name_of(computer.location),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestInventoryApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestInventoryApi {
    pub fn new(settings: &ApiSettings, credentials: &Credentials) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&settings.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(CLIENT_ID_HEADER),
            header_value(CLIENT_ID_HEADER, &credentials.client_id)?,
        );
        let mut bearer = header_value(
            "Authorization",
            &format!("Bearer {}", credentials.access_token),
        )?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn computers_url(&self, page: u32, page_size: u32) -> Result<Url, ApiError> {
        let mut url = self.join("computers")?;
        // Form encoding: the space in the order clause goes out as `+`.
        url.query_pairs_mut()
            .append_pair("includefields", LISTING_FIELDS)
            .append_pair("orderby", LISTING_ORDER)
            .append_pair("pagesize", &page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn processors_url(&self, device_id: DeviceId) -> Result<Url, ApiError> {
        let mut url = self.join(&format!("computers/{device_id}/processors"))?;
        url.query_pairs_mut()
            .append_pair("includefields", PROCESSOR_FIELDS);
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, ApiError> {
        self.client.get(url).send().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl InventoryApi for ReqwestInventoryApi {
    async fn list_page(&self, page: u32, page_size: u32) -> Result<Vec<Device>, ApiError> {
        let response = self.get(self.computers_url(page, page_size)?).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let computers: Vec<ApiComputer> =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(computers.into_iter().map(Device::from).collect())
    }

    async fn processor(&self, device_id: DeviceId) -> Result<ProcessorReply, ApiError> {
        let response = self.get(self.processors_url(device_id)?).await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Ok(ProcessorReply::Missing(MissingReason::HttpStatus {
                status: status.as_u16(),
                body,
            }));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let value: Value =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(processor_reply(&value))
    }
}

fn processor_reply(value: &Value) -> ProcessorReply {
    let Some(first) = value.as_array().and_then(|items| items.first()) else {
        return ProcessorReply::Missing(MissingReason::NoProcessor);
    };
    match first.get(PROCESSOR_NAME_FIELD).and_then(Value::as_str) {
        Some(name) => ProcessorReply::Name(name.to_string()),
        None => ProcessorReply::Missing(MissingReason::NoProcessorName),
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    // Without a trailing slash `Url::join` would replace the last segment.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|err| ConfigError::InvalidHeader {
        name,
        reason: err.to_string(),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
