//! Currency transfer rates.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::notify::Notifier;
use crate::store::{CollectionView, Endpoint, ResourceStore, StoreStatus};
use crate::transport::Transport;
use crate::Resource;

/// Conversion rate and flat fee for one currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "transfer_rates")]
pub struct TransferRate {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    /// Flat fee in the target currency.
    #[serde(default)]
    pub fee: f64,
}

impl TransferRate {
    /// Amount received for `amount` sent, after the fee, rounded to cents.
    /// Never negative.
    pub fn quote(&self, amount: f64) -> f64 {
        let received = (amount * self.rate - self.fee).max(0.0);
        (received * 100.0).round() / 100.0
    }

    pub fn pair(&self) -> String {
        format!("{}/{}", self.from_currency, self.to_currency)
    }
}

const FETCH_RATES: Endpoint =
    Endpoint::read("fetch_rates", "rates", "Failed to load transfer rates");
const FETCH_RATE: Endpoint = Endpoint::read("fetch_rate", "rate", "Transfer rate not found");
const CREATE_RATE: Endpoint =
    Endpoint::create("create_rate", "rate", "Rate added successfully", "Failed to add rate");
const UPDATE_RATE: Endpoint =
    Endpoint::update("update_rate", "rate", "Rate updated successfully", "Failed to update rate");
const DELETE_RATE: Endpoint =
    Endpoint::delete("delete_rate", "Rate deleted successfully", "Failed to delete rate");

#[derive(Clone)]
pub struct TransferStore<T> {
    rates: ResourceStore<TransferRate, T>,
}

impl<T: Transport> TransferStore<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            rates: ResourceStore::new(transport, notifier),
        }
    }

    pub fn loading(&self) -> bool {
        self.rates.loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.rates.subscribe()
    }

    pub fn rates(&self) -> Vec<TransferRate> {
        self.rates.items()
    }

    pub fn rate(&self) -> Option<TransferRate> {
        self.rates.selected()
    }

    /// Cached rate for a currency pair, if fetched.
    pub fn rate_for(&self, from: &str, to: &str) -> Option<TransferRate> {
        self.rates
            .items()
            .into_iter()
            .find(|rate| rate.from_currency == from && rate.to_currency == to)
    }

    pub fn view(&self) -> CollectionView<TransferRate> {
        self.rates.view()
    }

    pub fn store(&self) -> &ResourceStore<TransferRate, T> {
        &self.rates
    }

    pub fn fetch_rates(&self) -> impl Future<Output = ()> + Send + 'static {
        self.rates.read_collection(FETCH_RATES, "/transfer-rates".into())
    }

    pub fn fetch_rate(&self, id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.rates.read_one(FETCH_RATE, format!("/transfer-rates/{id}"))
    }

    pub fn create_rate(&self, rate: &TransferRate) -> impl Future<Output = bool> + Send + 'static {
        self.rates.create(CREATE_RATE, "/transfer-rates".into(), rate, true)
    }

    pub fn update_rate(&self, rate: &TransferRate) -> impl Future<Output = bool> + Send + 'static {
        self.rates.update(UPDATE_RATE, format!("/transfer-rates/{}", rate.id), rate)
    }

    pub fn delete_rate(&self, id: &str) -> impl Future<Output = bool> + Send + 'static {
        self.rates.delete(DELETE_RATE, format!("/transfer-rates/{id}"), id)
    }
}
