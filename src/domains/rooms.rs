//! Hotel rooms.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::notify::Notifier;
use crate::store::{CollectionView, Endpoint, ResourceStore, StoreStatus};
use crate::transport::Transport;
use crate::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[resource(collection = "rooms")]
pub struct Room {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub hotel_id: String,
    pub room_type: String,
    pub price: f64,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_capacity() -> u32 {
    2
}

fn default_available() -> bool {
    true
}

const FETCH_ROOMS: Endpoint = Endpoint::read("fetch_rooms", "rooms", "Failed to load rooms");
const FETCH_ROOM: Endpoint = Endpoint::read("fetch_room", "room", "Room not found");
const ADD_ROOM: Endpoint =
    Endpoint::create("add_room", "room", "Room added successfully", "Failed to add room");
const UPDATE_ROOM: Endpoint =
    Endpoint::update("update_room", "room", "Room updated successfully", "Failed to update room");
const DELETE_ROOM: Endpoint =
    Endpoint::delete("delete_room", "Room deleted successfully", "Failed to delete room");

/// Store for the rooms of the hotel currently being managed.
#[derive(Clone)]
pub struct RoomStore<T> {
    rooms: ResourceStore<Room, T>,
}

impl<T: Transport> RoomStore<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            rooms: ResourceStore::new(transport, notifier),
        }
    }

    pub fn loading(&self) -> bool {
        self.rooms.loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.rooms.subscribe()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.items()
    }

    pub fn room(&self) -> Option<Room> {
        self.rooms.selected()
    }

    pub fn view(&self) -> CollectionView<Room> {
        self.rooms.view()
    }

    pub fn store(&self) -> &ResourceStore<Room, T> {
        &self.rooms
    }

    pub fn fetch_rooms(&self, hotel_id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.rooms.read_collection(FETCH_ROOMS, format!("/hotels/{hotel_id}/rooms"))
    }

    pub fn fetch_room(&self, id: &str) -> impl Future<Output = ()> + Send + 'static {
        self.rooms.read_one(FETCH_ROOM, format!("/rooms/{id}"))
    }

    /// Add a room to a hotel; the created room joins the local list.
    pub fn add_room(
        &self,
        hotel_id: &str,
        room: &Room,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.rooms.create(ADD_ROOM, format!("/hotels/{hotel_id}/rooms"), room, true)
    }

    pub fn update_room(&self, room: &Room) -> impl Future<Output = bool> + Send + 'static {
        self.rooms.update(UPDATE_ROOM, format!("/rooms/{}", room.id), room)
    }

    pub fn delete_room(&self, id: &str) -> impl Future<Output = bool> + Send + 'static {
        self.rooms.delete(DELETE_ROOM, format!("/rooms/{id}"), id)
    }
}
