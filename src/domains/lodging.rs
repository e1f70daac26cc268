//! Lodging listings.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::notify::Notifier;
use crate::store::{CollectionView, Endpoint, ResourceStore, StoreStatus};
use crate::transport::Transport;
use crate::Resource;

/// A bookable property listed by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "listings")]
pub struct Listing {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub max_guests: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

const FETCH_LISTINGS: Endpoint =
    Endpoint::read("fetch_listings", "listings", "Failed to load listings");
const FETCH_VENDOR_LISTINGS: Endpoint =
    Endpoint::read("fetch_vendor_listings", "listings", "Failed to load your listings");
const FETCH_LISTING: Endpoint = Endpoint::read("fetch_listing", "listing", "Listing not found");
const CREATE_LISTING: Endpoint = Endpoint::create(
    "create_listing",
    "listing",
    "Listing created successfully",
    "Failed to create listing",
);
const UPDATE_LISTING: Endpoint = Endpoint::update(
    "update_listing",
    "listing",
    "Listing updated successfully",
    "Failed to update listing",
);
const DELETE_LISTING: Endpoint = Endpoint::delete(
    "delete_listing",
    "Listing deleted successfully",
    "Failed to delete listing",
);

/// Store for lodging listings: a browse collection and one selected listing.
#[derive(Clone)]
pub struct LodgingStore<T> {
    listings: ResourceStore<Listing, T>,
}

impl<T: Transport> LodgingStore<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            listings: ResourceStore::new(transport, notifier),
        }
    }

    pub fn loading(&self) -> bool {
        self.listings.loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.listings.subscribe()
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.listings.items()
    }

    pub fn listing(&self) -> Option<Listing> {
        self.listings.selected()
    }

    pub fn view(&self) -> CollectionView<Listing> {
        self.listings.view()
    }

    /// The underlying generic store.
    pub fn store(&self) -> &ResourceStore<Listing, T> {
        &self.listings
    }

    /// All public listings.
    pub fn fetch_listings(&self) -> impl Future<Output = ()> + Send + 'static {
        self.listings.read_collection(FETCH_LISTINGS, "/listings".into())
    }

    /// Listings owned by one vendor (the vendor dashboard).
    pub fn fetch_vendor_listings(
        &self,
        vendor_id: &str,
    ) -> impl Future<Output = ()> + Send + 'static {
        self.listings
            .read_collection(FETCH_VENDOR_LISTINGS, format!("/vendors/{vendor_id}/listings"))
    }

    pub fn fetch_listing(&self, id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.listings.read_one(FETCH_LISTING, format!("/listings/{id}"))
    }

    /// Create a listing and append the server's copy to the collection.
    pub fn create_listing(&self, listing: &Listing) -> impl Future<Output = bool> + Send + 'static {
        self.listings.create(CREATE_LISTING, "/listings".into(), listing, true)
    }

    pub fn update_listing(&self, listing: &Listing) -> impl Future<Output = bool> + Send + 'static {
        self.listings.update(UPDATE_LISTING, format!("/listings/{}", listing.id), listing)
    }

    pub fn delete_listing(&self, id: &str) -> impl Future<Output = bool> + Send + 'static {
        self.listings.delete(DELETE_LISTING, format!("/listings/{id}"), id)
    }
}
