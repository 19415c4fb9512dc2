//! ParkEase store
//!
//! Users, sessions, locations and bookings on top of a [`BlobStore`].
//! Each operation first waits out its simulated latency, then runs its
//! read-modify-write section under `write_lock` so the uniqueness
//! invariants hold when the store is shared between tasks.

use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::api::{Operation, ParkingApi, Registration};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::events::{StoreEvent, EVENT_CAPACITY};
use crate::ids::TickGenerator;
use crate::models::{
    seed_locations, Booking, BookingRequest, Coordinates, Location, NewLocation, Role, Session,
    Slot, SlotStatus, SlotToggle, Stats, User, UserProfile, REFERENCE_POINT,
};
use crate::password::{hash_password, verify_password};
use crate::storage::{BlobStore, BookingTable, LocationTable, SessionSlot, UserTable};

pub struct ParkingStore<B: BlobStore> {
    blobs: B,
    config: StoreConfig,
    ids: TickGenerator,
    /// Demo catalogue; slot counts change in memory only
    seeds: Mutex<Vec<Location>>,
    write_lock: tokio::sync::Mutex<()>,
    events: broadcast::Sender<StoreEvent>,
}

impl<B: BlobStore> ParkingStore<B> {
    pub fn new(blobs: B, config: StoreConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            blobs,
            config,
            ids: TickGenerator::new(),
            seeds: Mutex::new(seed_locations()),
            write_lock: tokio::sync::Mutex::new(()),
            events,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn users(&self) -> UserTable<'_> {
        UserTable::new(&self.blobs)
    }

    fn locations(&self) -> LocationTable<'_> {
        LocationTable::new(&self.blobs)
    }

    fn bookings(&self) -> BookingTable<'_> {
        BookingTable::new(&self.blobs)
    }

    fn session(&self) -> SessionSlot<'_> {
        SessionSlot::new(&self.blobs)
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    async fn simulate(&self, op: Operation) {
        let delay = self.config.latency.apply(op.base_delay());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn seed_snapshot(&self) -> Result<Vec<Location>> {
        let seeds = self.seeds.lock().map_err(|_| Error::StoragePoisoned)?;
        Ok(seeds.clone())
    }

    fn is_seed(&self, id: &str) -> Result<bool> {
        Ok(self.seed_snapshot()?.iter().any(|l| l.id == id))
    }

    fn all_locations(&self) -> Result<Vec<Location>> {
        let mut all = self.seed_snapshot()?;
        all.extend(self.locations().all()?);
        Ok(all)
    }

    // --- Auth ---

    #[instrument(skip(self, password, admin_code))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        admin_code: Option<&str>,
    ) -> Result<Registration> {
        self.simulate(Operation::Register).await;

        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::Validation("Missing fields".to_string()));
        }
        if self.users().find_by_email(email)?.is_some() {
            return Err(Error::Conflict("Email already exists".to_string()));
        }

        let role = if admin_code == Some(self.config.admin_code.as_str()) {
            Role::Admin
        } else {
            Role::User
        };
        let password_hash = hash_password(password)?;

        let _guard = self.write_lock.lock().await;
        let users = self.users();
        let user = User::new(email.to_string(), password_hash, role, users.count()? + 1);
        let custom_id = user.custom_id.clone();
        users.insert(user)?;

        info!(email, %role, %custom_id, "Account registered");
        let message = match role {
            Role::Admin => "Admin Account created!",
            Role::User => "Account created! Please login.",
        };
        Ok(Registration {
            custom_id,
            role,
            message: message.to_string(),
        })
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.simulate(Operation::Login).await;

        let registered = self
            .users()
            .find_by_email(email)?
            .filter(|user| verify_password(password, &user.password_hash));

        let session = match registered {
            Some(user) => Session::for_user(&user, self.ids.session_token()),
            None if self.accepts_legacy_login(email, password) => {
                let role = if email.contains("admin") {
                    Role::Admin
                } else {
                    Role::User
                };
                warn!(email, %role, "Signing in through legacy credential fallback");
                Session::synthesized(email, role, self.ids.legacy_session_token())
            }
            None => {
                return Err(Error::Authentication(
                    "Invalid credentials. Password must be 6+ chars.".to_string(),
                ))
            }
        };

        let _guard = self.write_lock.lock().await;
        self.session().store(&session)?;
        info!(email, role = %session.role, "Session started");
        self.emit(StoreEvent::SessionStarted {
            email: session.email.clone(),
        });
        Ok(session)
    }

    fn accepts_legacy_login(&self, email: &str, password: &str) -> bool {
        self.config.legacy_login_fallback
            && !email.is_empty()
            && password.chars().count() >= self.config.min_fallback_password_len
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.simulate(Operation::Logout).await;

        let _guard = self.write_lock.lock().await;
        self.session().clear()?;
        info!("Session cleared");
        self.emit(StoreEvent::LoggedOut);
        Ok(())
    }

    pub async fn current_session(&self) -> Result<Option<Session>> {
        self.session().current()
    }

    #[instrument(skip(self))]
    pub async fn user_profile(&self, email: &str) -> Result<UserProfile> {
        self.simulate(Operation::GetProfile).await;

        self.users()
            .find_by_email(email)?
            .map(|u| u.profile())
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    // --- Locations ---

    pub async fn get_locations(&self) -> Result<Vec<Location>> {
        self.simulate(Operation::GetLocations).await;
        self.all_locations()
    }

    pub async fn get_location_by_id(&self, id: &str) -> Result<Option<Location>> {
        self.simulate(Operation::GetLocationById).await;
        Ok(self.all_locations()?.into_iter().find(|l| l.id == id))
    }

    #[instrument(skip(self, data), fields(name = %data.name))]
    pub async fn add_location(&self, data: NewLocation) -> Result<Location> {
        self.simulate(Operation::AddLocation).await;

        if data.name.trim().is_empty() {
            return Err(Error::Validation("Location name is required".to_string()));
        }
        if !data.price.is_finite() || data.price < 0.0 {
            return Err(Error::Validation("Price must not be negative".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let coordinates = Coordinates::jittered(REFERENCE_POINT, &mut rand::thread_rng());
        let location = data.into_location(self.ids.location_id(), coordinates);
        self.locations().insert(location.clone())?;

        info!(id = %location.id, "Location added");
        self.emit(StoreEvent::LocationAdded {
            id: location.id.clone(),
        });
        Ok(location)
    }

    #[instrument(skip(self))]
    pub async fn delete_location(&self, id: &str) -> Result<()> {
        self.simulate(Operation::DeleteLocation).await;

        let _guard = self.write_lock.lock().await;
        if self.is_seed(id)? || !self.locations().remove(id)? {
            warn!(id, "Refusing to delete demo or unknown location");
            return Err(Error::Forbidden("Cannot delete demo data".to_string()));
        }

        info!(id, "Location deleted");
        self.emit(StoreEvent::LocationDeleted { id: id.to_string() });
        Ok(())
    }

    // --- Bookings ---

    /// Every booking in the table, regardless of owner
    pub async fn get_bookings(&self) -> Result<Vec<Booking>> {
        self.simulate(Operation::GetBookings).await;
        self.bookings().all()
    }

    /// Bookings by account id, or by email when the id matches nothing
    #[instrument(skip(self))]
    pub async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        self.simulate(Operation::GetBookings).await;

        let bookings = self.bookings().for_user(user_id)?;
        if !bookings.is_empty() || !user_id.contains('@') {
            return Ok(bookings);
        }
        match self.users().find_by_email(user_id)? {
            Some(user) => self.bookings().for_user(&user.custom_id),
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self, request), fields(location = %request.location_name))]
    pub async fn save_booking(&self, request: BookingRequest) -> Result<Booking> {
        self.simulate(Operation::SaveBooking).await;

        if request.duration == 0 {
            return Err(Error::Validation(
                "Duration must be at least one hour".to_string(),
            ));
        }
        if !request.price.is_finite() || request.price < 0.0 {
            return Err(Error::Validation("Price must not be negative".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let booking = self.insert_booking(request)?;

        info!(id = %booking.id, "Booking created");
        self.emit(StoreEvent::BookingCreated {
            id: booking.id.clone(),
        });
        Ok(booking)
    }

    /// Caller holds `write_lock`
    fn insert_booking(&self, mut request: BookingRequest) -> Result<Booking> {
        if request.user_id.is_none() {
            request.user_id = self.session().current()?.map(|s| s.custom_id);
        }

        let mut seeds = self.seeds.lock().map_err(|_| Error::StoragePoisoned)?;
        let seed = seeds.iter_mut().find(|l| match &request.location_id {
            Some(id) => &l.id == id,
            None => l.name == request.location_name,
        });

        if let Some(seed) = &seed {
            if seed.slots == 0 && self.config.enforce_capacity {
                return Err(Error::Conflict(format!("{} is full", seed.name)));
            }
        }

        let booking = Booking::from_request(self.ids.booking_id(), request);
        self.bookings().insert(booking.clone())?;

        if let Some(seed) = seed {
            seed.slots = seed.slots.saturating_sub(1);
        }
        Ok(booking)
    }

    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, id: &str) -> Result<Booking> {
        self.simulate(Operation::CancelBooking).await;

        let _guard = self.write_lock.lock().await;
        let booking = self.bookings().cancel(id)?;

        info!(id, "Booking cancelled");
        self.emit(StoreEvent::BookingCancelled { id: id.to_string() });
        Ok(booking)
    }

    // --- Admin ---

    pub async fn get_stats(&self) -> Result<Stats> {
        self.simulate(Operation::GetStats).await;
        Ok(Stats::default())
    }

    /// A fresh random bay layout on every call
    pub async fn get_admin_slots(&self) -> Result<Vec<Slot>> {
        self.simulate(Operation::GetAdminSlots).await;
        Ok(self.generate_slots())
    }

    fn generate_slots(&self) -> Vec<Slot> {
        let mut rng = rand::thread_rng();
        (1..=self.config.admin_slot_count)
            .map(|i| Slot {
                id: format!("A-{}", i),
                status: SlotStatus::sample(i, &mut rng),
            })
            .collect()
    }

    /// Computes the next status only; nothing is stored
    pub async fn toggle_slot_status(&self, id: &str, current: SlotStatus) -> Result<SlotToggle> {
        self.simulate(Operation::ToggleSlotStatus).await;
        Ok(SlotToggle {
            slot_id: id.to_string(),
            new_status: current.toggled(),
        })
    }
}

impl<B: BlobStore> ParkingApi for ParkingStore<B> {
    async fn register(
        &self,
        email: &str,
        password: &str,
        admin_code: Option<&str>,
    ) -> Result<Registration> {
        ParkingStore::register(self, email, password, admin_code).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        ParkingStore::login(self, email, password).await
    }

    async fn logout(&self) -> Result<()> {
        ParkingStore::logout(self).await
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        ParkingStore::current_session(self).await
    }

    async fn get_locations(&self) -> Result<Vec<Location>> {
        ParkingStore::get_locations(self).await
    }

    async fn get_location_by_id(&self, id: &str) -> Result<Option<Location>> {
        ParkingStore::get_location_by_id(self, id).await
    }

    async fn add_location(&self, data: NewLocation) -> Result<Location> {
        ParkingStore::add_location(self, data).await
    }

    async fn delete_location(&self, id: &str) -> Result<()> {
        ParkingStore::delete_location(self, id).await
    }

    async fn get_bookings(&self) -> Result<Vec<Booking>> {
        ParkingStore::get_bookings(self).await
    }

    async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        ParkingStore::user_bookings(self, user_id).await
    }

    async fn save_booking(&self, request: BookingRequest) -> Result<Booking> {
        ParkingStore::save_booking(self, request).await
    }

    async fn cancel_booking(&self, id: &str) -> Result<Booking> {
        ParkingStore::cancel_booking(self, id).await
    }

    async fn get_stats(&self) -> Result<Stats> {
        ParkingStore::get_stats(self).await
    }

    async fn get_admin_slots(&self) -> Result<Vec<Slot>> {
        ParkingStore::get_admin_slots(self).await
    }

    async fn toggle_slot_status(&self, id: &str, current: SlotStatus) -> Result<SlotToggle> {
        ParkingStore::toggle_slot_status(self, id, current).await
    }

    async fn user_profile(&self, email: &str) -> Result<UserProfile> {
        ParkingStore::user_profile(self, email).await
    }
}
