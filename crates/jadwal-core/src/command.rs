//! Text command classification
//!
//! Turns a free-text WhatsApp message into a [`Command`] without touching
//! HTTP or the store, so every branch is unit-testable in isolation.

use crate::schedule::Schedule;

/// Marker phrase separating the slot from the team name in a booking
const BOOKING_MARKER: &str = "atas nama";

/// Classified inbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "jadwal" — show the current schedule
    ShowSchedule,
    /// "book <slot> atas nama <team>" — reserve a free slot
    Book { slot: String, team: String },
    /// A booking attempt without the "atas nama" marker
    MalformedBooking,
    /// A booking attempt where no mentioned slot is free
    SlotUnavailable,
    /// Anything else — answered with the greeting/help text
    Unrecognized,
}

/// Classify a message body against the current schedule.
///
/// Slot labels are scanned in ascending label order; the first label that
/// both appears in the message and is currently free wins. The team name is
/// whatever follows the last occurrence of the marker, trimmed and
/// title-cased. An empty extracted name does not fail the command: the scan
/// moves on to the remaining slots.
pub fn parse_command(body: &str, schedule: &Schedule) -> Command {
    let msg = body.to_lowercase();

    if msg.contains("jadwal") {
        return Command::ShowSchedule;
    }

    if msg.contains("book") {
        for (slot, _) in schedule.iter() {
            if msg.contains(slot) && schedule.is_free(slot) {
                let Some((_, after)) = msg.rsplit_once(BOOKING_MARKER) else {
                    return Command::MalformedBooking;
                };
                let team = title_case(after.trim());
                if team.is_empty() {
                    continue;
                }
                return Command::Book {
                    slot: slot.to_string(),
                    team,
                };
            }
        }
        return Command::SlotUnavailable;
    }

    Command::Unrecognized
}

/// Title-case a name: uppercase each letter that follows a non-letter,
/// lowercase the rest. "tim garuda-b" becomes "Tim Garuda-B".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}
