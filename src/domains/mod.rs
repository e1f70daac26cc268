//! Per-domain stores and the bundle that wires them up.
//!
//! Every domain store wraps one or more `ResourceStore`s with named
//! operations and fixed endpoints. `Stores` builds them all once, from one
//! transport and one notifier, so pages receive their dependencies instead
//! of reaching for globals.

mod lodging;
mod medical;
mod rooms;
mod services;
mod transfer;

use std::sync::Arc;

use crate::notify::Notifier;
use crate::transport::Transport;

pub use lodging::{Listing, LodgingStore};
pub use medical::{MedicalPackage, MedicalStore};
pub use rooms::{Room, RoomStore};
pub use services::{PageStore, ServiceStore, VendorPage, VendorService};
pub use transfer::{TransferRate, TransferStore};

/// All domain stores of the application.
#[derive(Clone)]
pub struct Stores<T> {
    pub lodging: LodgingStore<T>,
    pub rooms: RoomStore<T>,
    pub medical: MedicalStore<T>,
    pub transfer: TransferStore<T>,
    pub services: ServiceStore<T>,
    pub pages: PageStore<T>,
}

impl<T: Transport> Stores<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            lodging: LodgingStore::new(transport.clone(), Arc::clone(&notifier)),
            rooms: RoomStore::new(transport.clone(), Arc::clone(&notifier)),
            medical: MedicalStore::new(transport.clone(), Arc::clone(&notifier)),
            transfer: TransferStore::new(transport.clone(), Arc::clone(&notifier)),
            services: ServiceStore::new(transport.clone(), Arc::clone(&notifier)),
            pages: PageStore::new(transport, notifier),
        }
    }

    /// Whether any store has a call in flight.
    pub fn any_loading(&self) -> bool {
        self.lodging.loading()
            || self.rooms.loading()
            || self.medical.loading()
            || self.transfer.loading()
            || self.services.loading()
            || self.pages.loading()
    }
}

#[cfg(feature = "http")]
impl Stores<crate::transport::HttpTransport> {
    /// Build every store over HTTP from a client config.
    pub fn connect(
        config: crate::config::ClientConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, crate::error::TransportError> {
        let transport = crate::transport::HttpTransport::new(config)?;
        Ok(Self::new(transport, notifier))
    }
}
