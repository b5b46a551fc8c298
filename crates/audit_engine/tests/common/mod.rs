#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use audit_core::{Device, DeviceId};
use audit_engine::{ApiError, InventoryApi, MissingReason, ProcessorReply, RetryPolicy};

/// How the fake answers processor lookups for one device.
#[derive(Debug, Clone)]
pub enum Script {
    Name(&'static str),
    Missing,
    FailThen(u32, &'static str),
    AlwaysFail,
    Panic,
}

#[derive(Default)]
pub struct ScriptedApi {
    pages: Vec<Vec<Device>>,
    failing_page: Option<u32>,
    scripts: HashMap<DeviceId, Script>,
    calls: Mutex<HashMap<DeviceId, u32>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, pages: Vec<Vec<Device>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub fn with_script(mut self, id: DeviceId, script: Script) -> Self {
        self.scripts.insert(id, script);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, id: DeviceId) -> u32 {
        self.calls.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl InventoryApi for ScriptedApi {
    async fn list_page(&self, page: u32, _page_size: u32) -> Result<Vec<Device>, ApiError> {
        if self.failing_page == Some(page) {
            return Err(ApiError::HttpStatus(500));
        }
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    async fn processor(&self, device_id: DeviceId) -> Result<ProcessorReply, ApiError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(device_id).or_insert(0);
            *entry += 1;
            *entry
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.scripts.get(&device_id).cloned().unwrap_or(Script::Missing) {
            Script::Name(name) => Ok(ProcessorReply::Name(name.to_string())),
            Script::Missing => Ok(ProcessorReply::Missing(MissingReason::NoProcessor)),
            Script::FailThen(failures, name) if call > failures => {
                Ok(ProcessorReply::Name(name.to_string()))
            }
            Script::FailThen(..) | Script::AlwaysFail => {
                Err(ApiError::Network("connection reset".to_string()))
            }
            Script::Panic => panic!("lookup task blew up"),
        }
    }
}

pub fn device(id: DeviceId) -> Device {
    Device {
        id,
        computer_name: format!("WS-{id:03}"),
        client: "Acme".to_string(),
        location: "HQ".to_string(),
    }
}

pub fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(1),
        max_delay: Some(Duration::from_millis(5)),
    }
}
