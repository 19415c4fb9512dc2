//! Line-oriented console
//!
//! Stands in for the web pages: parses one command per line, calls the
//! store through [`ParkingApi`] and renders the reply as JSON.

use parkease_core::{
    BookingRequest, Error, NewLocation, ParkingApi, Reply, Result, SlotStatus,
};
use serde::Serialize;
use serde_json::Value;

pub const HELP: &str = "\
commands:
  register <email> <password> [admin-code]
  login <email> <password>
  logout
  whoami
  locations
  location <id>
  add-location <price> <slots> <name> | <address>
  delete-location <id>
  book <location-id> <YYYY-MM-DDTHH:MM:SS> <hours>
  bookings
  my-bookings
  cancel <booking-id>
  stats
  slots
  toggle <slot-id> <FREE|OCCUPIED|RESERVED|MAINTENANCE>
  profile <email>
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Register {
        email: String,
        password: String,
        admin_code: Option<String>,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    WhoAmI,
    Locations,
    Location(String),
    AddLocation(NewLocation),
    DeleteLocation(String),
    Book {
        location_id: String,
        start_time: String,
        hours: u32,
    },
    Bookings,
    MyBookings,
    Cancel(String),
    Stats,
    Slots,
    Toggle {
        slot_id: String,
        current: SlotStatus,
    },
    Profile(String),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let command = match (verb, args.as_slice()) {
            ("register", [email, password]) => Command::Register {
                email: email.to_string(),
                password: password.to_string(),
                admin_code: None,
            },
            ("register", [email, password, code]) => Command::Register {
                email: email.to_string(),
                password: password.to_string(),
                admin_code: Some(code.to_string()),
            },
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("whoami", []) => Command::WhoAmI,
            ("locations", []) => Command::Locations,
            ("location", [id]) => Command::Location(id.to_string()),
            ("add-location", [price, slots, ..]) => {
                let price = price
                    .parse()
                    .map_err(|_| format!("invalid price: {}", price))?;
                let slots = slots
                    .parse()
                    .map_err(|_| format!("invalid slot count: {}", slots))?;
                let rest = args[2..].join(" ");
                let (name, address) = rest.split_once('|').unwrap_or((rest.as_str(), ""));
                Command::AddLocation(NewLocation {
                    name: name.trim().to_string(),
                    address: address.trim().to_string(),
                    price,
                    slots,
                    ..Default::default()
                })
            }
            ("delete-location", [id]) => Command::DeleteLocation(id.to_string()),
            ("book", [location_id, start_time, hours]) => Command::Book {
                location_id: location_id.to_string(),
                start_time: start_time.to_string(),
                hours: hours
                    .parse()
                    .map_err(|_| format!("invalid hours: {}", hours))?,
            },
            ("bookings", []) => Command::Bookings,
            ("my-bookings", []) => Command::MyBookings,
            ("cancel", [id]) => Command::Cancel(id.to_string()),
            ("stats", []) => Command::Stats,
            ("slots", []) => Command::Slots,
            ("toggle", [slot_id, status]) => Command::Toggle {
                slot_id: slot_id.to_string(),
                current: status.parse()?,
            },
            ("profile", [email]) => Command::Profile(email.to_string()),
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => return Err(format!("unrecognized command: {} (try `help`)", line.trim())),
        };
        Ok(Some(command))
    }
}

/// Bare JSON for reads, a failure reply for errors
fn read_reply<T: Serialize>(result: Result<T>) -> Value {
    match result {
        Ok(value) => to_json(&value),
        Err(err) => reply_json(Reply::failure(&err)),
    }
}

fn reply_json(reply: Reply) -> Value {
    to_json(&reply)
}

/// Null when the value cannot be rendered
fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize reply");
        Value::Null
    })
}

pub struct Console<'a, A: ParkingApi> {
    api: &'a A,
}

impl<'a, A: ParkingApi> Console<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn execute(&self, command: Command) -> Value {
        match command {
            Command::Register {
                email,
                password,
                admin_code,
            } => reply_json(Reply::from_result(
                self.api
                    .register(&email, &password, admin_code.as_deref())
                    .await,
            )),
            Command::Login { email, password } => {
                reply_json(Reply::from_result(self.api.login(&email, &password).await))
            }
            Command::Logout => reply_json(Reply::from_result(self.api.logout().await)),
            Command::WhoAmI => read_reply(self.api.current_session().await),
            Command::Locations => read_reply(self.api.get_locations().await),
            Command::Location(id) => read_reply(self.api.get_location_by_id(&id).await),
            Command::AddLocation(data) => {
                reply_json(Reply::from_result(self.api.add_location(data).await))
            }
            Command::DeleteLocation(id) => {
                reply_json(Reply::from_result(self.api.delete_location(&id).await))
            }
            Command::Book {
                location_id,
                start_time,
                hours,
            } => reply_json(Reply::from_result(
                self.book(&location_id, &start_time, hours).await,
            )),
            Command::Bookings => read_reply(self.api.get_bookings().await),
            Command::MyBookings => read_reply(self.my_bookings().await),
            Command::Cancel(id) => {
                reply_json(Reply::from_result(self.api.cancel_booking(&id).await))
            }
            Command::Stats => read_reply(self.api.get_stats().await),
            Command::Slots => read_reply(self.api.get_admin_slots().await),
            Command::Toggle { slot_id, current } => reply_json(Reply::from_result(
                self.api.toggle_slot_status(&slot_id, current).await,
            )),
            Command::Profile(email) => read_reply(self.api.user_profile(&email).await),
            Command::Help => Value::String(HELP.to_string()),
            Command::Quit => Value::Null,
        }
    }

    /// Price is the location's hourly rate times the hours booked
    async fn book(
        &self,
        location_id: &str,
        start_time: &str,
        hours: u32,
    ) -> Result<parkease_core::Booking> {
        let start_time = start_time
            .parse()
            .map_err(|_| Error::Validation("Invalid time format".to_string()))?;
        let location = self
            .api
            .get_location_by_id(location_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Location {} not found", location_id)))?;

        let request = BookingRequest {
            user_id: None,
            location_id: Some(location.id),
            location_name: location.name,
            start_time,
            duration: hours,
            price: location.price * f64::from(hours),
        };
        self.api.save_booking(request).await
    }

    async fn my_bookings(&self) -> Result<Vec<parkease_core::Booking>> {
        let session = self
            .api
            .current_session()
            .await?
            .ok_or_else(|| Error::Authentication("Not signed in".to_string()))?;
        self.api.user_bookings(&session.custom_id).await
    }
}
