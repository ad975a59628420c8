//! Command line parsing

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed protocol command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `Create_parking_lot <capacity>`
    CreateParkingLot { capacity: i64 },
    /// `Park <registration> driver_age <age>`
    Park { registration: String, driver_age: u32 },
    /// `Leave <slot>`
    Leave { slot: i64 },
    /// `Slot_number_for_car_with_number <registration>`
    SlotForRegistration { registration: String },
    /// `Slot_numbers_for_driver_of_age <age>`
    SlotsForDriverAge { age: u32 },
    /// `Vehicle_registration_number_for_driver_of_age <age>`
    RegistrationsForDriverAge { age: u32 },
}

impl Command {
    /// Protocol keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::CreateParkingLot { .. } => "Create_parking_lot",
            Command::Park { .. } => "Park",
            Command::Leave { .. } => "Leave",
            Command::SlotForRegistration { .. } => "Slot_number_for_car_with_number",
            Command::SlotsForDriverAge { .. } => "Slot_numbers_for_driver_of_age",
            Command::RegistrationsForDriverAge { .. } => {
                "Vehicle_registration_number_for_driver_of_age"
            }
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = tokens.split_first() else {
            return Err(Error::UnknownCommand(String::new()));
        };

        match keyword {
            "Create_parking_lot" => {
                let [capacity] = arity::<1>(keyword, args)?;
                Ok(Command::CreateParkingLot {
                    capacity: parse_int(capacity, "capacity")?,
                })
            }
            "Park" => {
                let [registration, marker, age] = arity::<3>(keyword, args)?;
                if marker != "driver_age" {
                    return Err(Error::InvalidCommand(format!(
                        "expected \"driver_age\", found \"{}\"",
                        marker
                    )));
                }
                Ok(Command::Park {
                    registration: registration.to_string(),
                    driver_age: parse_age(age)?,
                })
            }
            "Leave" => {
                let [slot] = arity::<1>(keyword, args)?;
                Ok(Command::Leave {
                    slot: parse_int(slot, "slot number")?,
                })
            }
            "Slot_number_for_car_with_number" => {
                let [registration] = arity::<1>(keyword, args)?;
                Ok(Command::SlotForRegistration {
                    registration: registration.to_string(),
                })
            }
            "Slot_numbers_for_driver_of_age" => {
                let [age] = arity::<1>(keyword, args)?;
                Ok(Command::SlotsForDriverAge {
                    age: parse_age(age)?,
                })
            }
            "Vehicle_registration_number_for_driver_of_age" => {
                let [age] = arity::<1>(keyword, args)?;
                Ok(Command::RegistrationsForDriverAge {
                    age: parse_age(age)?,
                })
            }
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CreateParkingLot { capacity } => write!(f, "{} {}", self.keyword(), capacity),
            Command::Park {
                registration,
                driver_age,
            } => write!(f, "{} {} driver_age {}", self.keyword(), registration, driver_age),
            Command::Leave { slot } => write!(f, "{} {}", self.keyword(), slot),
            Command::SlotForRegistration { registration } => {
                write!(f, "{} {}", self.keyword(), registration)
            }
            Command::SlotsForDriverAge { age } | Command::RegistrationsForDriverAge { age } => {
                write!(f, "{} {}", self.keyword(), age)
            }
        }
    }
}

fn arity<'a, const N: usize>(keyword: &str, args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| {
        Error::InvalidCommand(format!(
            "{} takes {} argument(s), got {}",
            keyword,
            N,
            args.len()
        ))
    })
}

fn parse_int(token: &str, what: &str) -> Result<i64> {
    token
        .parse()
        .map_err(|_| Error::InvalidCommand(format!("invalid {} \"{}\"", what, token)))
}

fn parse_age(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| Error::InvalidCommand(format!("invalid driver age \"{}\"", token)))
}
