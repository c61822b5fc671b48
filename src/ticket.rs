//! Ticket status values.
//!
//! Tickets start as `Pending`. Any status may be set from any other; no
//! ordering between the three values is enforced.

use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Pending,
    InProgress,
    Completed,
}

impl TicketStatus {
    /// Status assigned to every newly created ticket.
    pub const INITIAL: TicketStatus = TicketStatus::Pending;

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the three status names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ticket status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TicketStatus::Pending),
            "In Progress" => Ok(TicketStatus::InProgress),
            "Completed" => Ok(TicketStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        for status in [
            TicketStatus::Pending,
            TicketStatus::InProgress,
            TicketStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<TicketStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("pending".parse::<TicketStatus>().is_err());
        assert!("InProgress".parse::<TicketStatus>().is_err());
        assert!(" Completed".parse::<TicketStatus>().is_err());
        assert!("".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_initial_is_pending() {
        assert_eq!(TicketStatus::INITIAL.to_string(), "Pending");
    }
}
