//! Command executor
//!
//! Owns the parking lot on behalf of a command stream, runs each parsed
//! command against it and renders one output line per command.

use super::parser::Command;
use crate::error::{Error, Result};
use crate::lot::{Driver, ParkOutcome, ParkingLot, SlotNumber, Ticket};
use crate::metrics;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const NO_MATCH: &str = "No parked car matches the query";

/// Result of one command, rendered as the protocol output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Created { capacity: u32 },
    Parked { registration: String, slot: SlotNumber },
    LotFull,
    Vacated(Ticket<Driver>),
    NotVacated { slot: i64 },
    Slot(SlotNumber),
    Slots(Vec<SlotNumber>),
    Registrations(Vec<String>),
    NoMatch,
    NotRecognized,
    Failed { query: String, reason: String },
}

impl Response {
    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failed { .. } | Response::NotRecognized)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Created { capacity } => write!(f, "Created parking of {} slots", capacity),
            Response::Parked { registration, slot } => write!(
                f,
                "Car with vehicle registration number \"{}\" has been parked at slot number {}",
                registration, slot
            ),
            Response::LotFull => {
                write!(f, "Sorry, Parking Lot is full, No Parking Slots Available.")
            }
            Response::Vacated(ticket) => write!(
                f,
                "Slot number {} vacated, the car with vehicle registration number \"{}\" left the space, the driver of the car was of age {}",
                ticket.slot(),
                ticket.identity(),
                ticket.payload().age
            ),
            Response::NotVacated { slot } => write!(f, "Slot number {} cannot be vacated.", slot),
            Response::Slot(slot) => write!(f, "{}", slot),
            Response::Slots(slots) => {
                let joined: Vec<String> = slots.iter().map(ToString::to_string).collect();
                write!(f, "{}", joined.join(","))
            }
            Response::Registrations(registrations) => write!(f, "{}", registrations.join(",")),
            Response::NoMatch => write!(f, "{}", NO_MATCH),
            Response::NotRecognized => write!(f, "Query not recognized."),
            Response::Failed { query, reason } => {
                write!(f, "Error in Query - {} : {}", query, reason)
            }
        }
    }
}

/// Totals for one command stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Runs protocol commands against a parking lot
#[derive(Debug, Default)]
pub struct CommandExecutor {
    lot: Option<ParkingLot<Driver>>,
}

impl CommandExecutor {
    /// Executor with no lot; the stream has to create one first
    pub fn new() -> Self {
        Self { lot: None }
    }

    /// Executor with a lot already created
    pub fn with_lot(lot: ParkingLot<Driver>) -> Self {
        metrics::update_occupancy(&lot.stats());
        Self { lot: Some(lot) }
    }

    pub fn lot(&self) -> Option<&ParkingLot<Driver>> {
        self.lot.as_ref()
    }

    /// Parse and run one line
    ///
    /// Blank lines produce no response.
    pub fn execute_line(&mut self, line: &str) -> Option<Response> {
        let query = line.trim_end_matches(['\r', '\n']);
        if query.trim().is_empty() {
            return None;
        }

        let response = match query.parse::<Command>() {
            Ok(command) => {
                let keyword = command.keyword();
                let response = self.execute(command).unwrap_or_else(|e| Response::Failed {
                    query: query.to_string(),
                    reason: e.to_string(),
                });
                metrics::record_command(keyword, !response.is_failure());
                response
            }
            Err(Error::UnknownCommand(keyword)) => {
                warn!(keyword = %keyword, "Query not recognized");
                metrics::record_command("unknown", false);
                Response::NotRecognized
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Malformed query");
                metrics::record_command("malformed", false);
                Response::Failed {
                    query: query.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        Some(response)
    }

    /// Run a parsed command
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        debug!(command = %command, "Executing");

        if self.lot.is_none() {
            if let Command::CreateParkingLot { capacity } = command {
                let lot = ParkingLot::new(capacity)?;
                metrics::update_occupancy(&lot.stats());
                let capacity = lot.capacity();
                self.lot = Some(lot);
                return Ok(Response::Created { capacity });
            }
        }

        let lot = self.lot.as_mut().ok_or(Error::NotInitialized)?;

        let response = match command {
            Command::CreateParkingLot { capacity } => {
                lot.initialize(capacity)?;
                Response::Created {
                    capacity: lot.capacity(),
                }
            }
            Command::Park {
                registration,
                driver_age,
            } => {
                let outcome = lot.park(registration.as_str(), Driver::new(driver_age));
                metrics::record_admission(&outcome);
                match outcome? {
                    ParkOutcome::Parked(slot) => Response::Parked { registration, slot },
                    ParkOutcome::Full => Response::LotFull,
                }
            }
            Command::Leave { slot } => {
                let ticket = SlotNumber::try_from(slot)
                    .ok()
                    .and_then(|number| lot.leave(number));
                metrics::record_departure(ticket.is_some());
                match ticket {
                    Some(ticket) => Response::Vacated(ticket),
                    None => Response::NotVacated { slot },
                }
            }
            Command::SlotForRegistration { registration } => match lot.slot_for(&registration) {
                Some(slot) => Response::Slot(slot),
                None => Response::NoMatch,
            },
            Command::SlotsForDriverAge { age } => {
                let slots = lot.slots_where(|driver| driver.age == age);
                if slots.is_empty() {
                    Response::NoMatch
                } else {
                    Response::Slots(slots)
                }
            }
            Command::RegistrationsForDriverAge { age } => {
                let registrations: Vec<String> = lot
                    .identities_where(|driver| driver.age == age)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if registrations.is_empty() {
                    Response::NoMatch
                } else {
                    Response::Registrations(registrations)
                }
            }
        };

        metrics::update_occupancy(&lot.stats());
        Ok(response)
    }

    /// Execute every line of `input`, writing one response line each to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for line in input.lines() {
            let line = line?;
            if let Some(response) = self.execute_line(&line) {
                summary.executed += 1;
                if response.is_failure() {
                    summary.failed += 1;
                }
                writeln!(output, "{}", response)?;
            }
        }
        output.flush()?;

        info!(
            executed = summary.executed,
            failed = summary.failed,
            "Command stream complete"
        );
        Ok(summary)
    }
}
