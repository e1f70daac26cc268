//! Medical-service packages.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::notify::Notifier;
use crate::store::{CollectionView, Endpoint, ResourceStore, StoreStatus};
use crate::transport::Transport;
use crate::Resource;

/// A bundled treatment offer from a clinic or hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "medical_packages")]
pub struct MedicalPackage {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    pub hospital: String,
    #[serde(default)]
    pub treatment: String,
    pub price: f64,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub description: String,
}

const FETCH_PACKAGES: Endpoint =
    Endpoint::read("fetch_packages", "packages", "Failed to load medical packages");
const FETCH_PACKAGE: Endpoint =
    Endpoint::read("fetch_package", "package", "Medical package not found");
// The package form navigates away after creating, so the list is not tracked
// and the response body is not needed.
const CREATE_PACKAGE: Endpoint = Endpoint::create(
    "create_package",
    "package",
    "Package created successfully",
    "Failed to create package",
)
.ignoring_body();
const UPDATE_PACKAGE: Endpoint = Endpoint::update(
    "update_package",
    "package",
    "Package updated successfully",
    "Failed to update package",
);
const DELETE_PACKAGE: Endpoint = Endpoint::delete(
    "delete_package",
    "Package deleted successfully",
    "Failed to delete package",
);

#[derive(Clone)]
pub struct MedicalStore<T> {
    packages: ResourceStore<MedicalPackage, T>,
}

impl<T: Transport> MedicalStore<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            packages: ResourceStore::new(transport, notifier),
        }
    }

    pub fn loading(&self) -> bool {
        self.packages.loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.packages.subscribe()
    }

    pub fn packages(&self) -> Vec<MedicalPackage> {
        self.packages.items()
    }

    pub fn package(&self) -> Option<MedicalPackage> {
        self.packages.selected()
    }

    pub fn view(&self) -> CollectionView<MedicalPackage> {
        self.packages.view()
    }

    pub fn store(&self) -> &ResourceStore<MedicalPackage, T> {
        &self.packages
    }

    pub fn fetch_packages(&self) -> impl Future<Output = ()> + Send + 'static {
        self.packages.read_collection(FETCH_PACKAGES, "/medical-packages".into())
    }

    pub fn fetch_package(&self, id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.packages.read_one(FETCH_PACKAGE, format!("/medical-packages/{id}"))
    }

    pub fn create_package(
        &self,
        package: &MedicalPackage,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.packages.create(CREATE_PACKAGE, "/medical-packages".into(), package, false)
    }

    pub fn update_package(
        &self,
        package: &MedicalPackage,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.packages.update(
            UPDATE_PACKAGE,
            format!("/medical-packages/{}", package.id),
            package,
        )
    }

    pub fn delete_package(&self, id: &str) -> impl Future<Output = bool> + Send + 'static {
        self.packages.delete(DELETE_PACKAGE, format!("/medical-packages/{id}"), id)
    }
}
