extern crate self as marketplace_sync;

pub mod config;
pub mod domains;
pub mod draft;
mod error;
mod notify;
mod resource;
pub mod store;
pub mod transport;

pub use config::{ClientConfig, EditorConfig};
pub use domains::{
    Listing, LodgingStore, MedicalPackage, MedicalStore, PageStore, Room, RoomStore,
    ServiceStore, Stores, TransferRate, TransferStore, VendorPage, VendorService,
};
pub use draft::{
    DraftEditor, EditableSection, LoadOutcome, PageDocument, SaveFailurePolicy, Section,
    SectionName, SectionPayload, SectionState,
};
pub use error::{DecodeError, DraftError, TransportError};
pub use notify::{BufferNotifier, LogNotifier, Notice, NoticeLevel, Notifier};
pub use resource::Resource;
pub use store::{CollectionView, Endpoint, Outcome, ResourceStore, StoreStatus};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{Method, Request, Response, ScriptedTransport, Transport};

// Derive macros share their trait's name
pub use marketplace_sync_macros::{Resource, Section};
