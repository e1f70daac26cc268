//! Generic vendor services and the vendor's composed landing page.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::draft::SectionPayload;
use crate::notify::Notifier;
use crate::store::{CollectionView, Endpoint, ResourceStore, StoreStatus};
use crate::transport::{Method, Request, Transport};
use crate::Resource;

/// A service a vendor sells (tour, cleaning, photography, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "services")]
pub struct VendorService {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub vendor_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// A vendor's landing page as stored remotely: one JSON object per section.
///
/// Sections the vendor never saved are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "vendor_pages")]
pub struct VendorPage {
    #[resource(id)]
    #[serde(default)]
    pub vendor_id: String,
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl VendorPage {
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }
}

const FETCH_SERVICES: Endpoint =
    Endpoint::read("fetch_services", "services", "Failed to load services");
const CREATE_SERVICE: Endpoint = Endpoint::create(
    "create_service",
    "service",
    "Service added successfully",
    "Failed to add service",
);
const UPDATE_SERVICE: Endpoint = Endpoint::update(
    "update_service",
    "service",
    "Service updated successfully",
    "Failed to update service",
);
const DELETE_SERVICE: Endpoint = Endpoint::delete(
    "delete_service",
    "Service deleted successfully",
    "Failed to delete service",
);

const FETCH_PAGE: Endpoint = Endpoint::read("fetch_page", "page", "Failed to load page");
const SAVE_SECTION: Endpoint = Endpoint::update(
    "save_page_section",
    "page",
    "Section saved successfully",
    "Failed to save section",
)
.ignoring_body();

#[derive(Clone)]
pub struct ServiceStore<T> {
    services: ResourceStore<VendorService, T>,
}

impl<T: Transport> ServiceStore<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            services: ResourceStore::new(transport, notifier),
        }
    }

    pub fn loading(&self) -> bool {
        self.services.loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.services.subscribe()
    }

    pub fn services(&self) -> Vec<VendorService> {
        self.services.items()
    }

    pub fn view(&self) -> CollectionView<VendorService> {
        self.services.view()
    }

    pub fn store(&self) -> &ResourceStore<VendorService, T> {
        &self.services
    }

    pub fn fetch_services(&self, vendor_id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.services.read_collection(FETCH_SERVICES, format!("/vendors/{vendor_id}/services"))
    }

    pub fn create_service(
        &self,
        vendor_id: &str,
        service: &VendorService,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.services.create(
            CREATE_SERVICE,
            format!("/vendors/{vendor_id}/services"),
            service,
            true,
        )
    }

    pub fn update_service(
        &self,
        service: &VendorService,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.services.update(UPDATE_SERVICE, format!("/services/{}", service.id), service)
    }

    pub fn delete_service(&self, id: &str) -> impl Future<Output = bool> + Send + 'static {
        self.services.delete(DELETE_SERVICE, format!("/services/{id}"), id)
    }
}

/// Store for the page-composition editor's source document.
///
/// The fetched page is read-only input for a `PageDocument`; saving goes
/// section by section and never rewrites the cached page.
#[derive(Clone)]
pub struct PageStore<T> {
    pages: ResourceStore<VendorPage, T>,
}

impl<T: Transport> PageStore<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            pages: ResourceStore::new(transport, notifier),
        }
    }

    pub fn loading(&self) -> bool {
        self.pages.loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.pages.subscribe()
    }

    pub fn page(&self) -> Option<VendorPage> {
        self.pages.selected()
    }

    pub fn store(&self) -> &ResourceStore<VendorPage, T> {
        &self.pages
    }

    pub fn fetch_page(&self, vendor_id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.pages.read_one(FETCH_PAGE, format!("/vendors/{vendor_id}/page"))
    }

    /// Persist one section of the vendor's page.
    pub fn save_page_section(
        &self,
        vendor_id: &str,
        payload: &SectionPayload,
    ) -> impl Future<Output = bool> + Send + 'static {
        let request = Request::new(
            Method::Put,
            format!("/vendors/{vendor_id}/page/{}", payload.section),
        )
        .with_body(payload.values.clone());
        self.pages.send(SAVE_SECTION, request)
    }
}
