//! Reply text composition
//!
//! The exact strings the bot sends back over WhatsApp. Kept in one place so
//! they can be asserted byte-for-byte.

use crate::schedule::Schedule;

/// Reply for a booking attempt without the "atas nama" marker
pub const MALFORMED_BOOKING: &str =
    "❌ Format booking salah. Gunakan: *book [jam] atas nama [Nama Tim Anda]*";

/// Reply when no mentioned slot is free
pub const SLOT_UNAVAILABLE: &str = "❌ Jam tersebut tidak tersedia atau sudah dibooking.";

/// Greeting/help reply for unrecognized messages
pub const GREETING: &str = "⚽ Halo! Ketik *jadwal* untuk melihat jadwal lapangan,\natau ketik *book 18.00 atas nama Tim Kamu* untuk booking.";

/// Per-slot availability listing, one line per slot in ascending order
pub fn schedule_overview(schedule: &Schedule) -> String {
    let mut text = String::from("📅 Jadwal tersedia:\n");
    for (slot, booking) in schedule.iter() {
        match booking {
            None => text.push_str(&format!("- {}: ✅ Tersedia\n", slot)),
            Some(team) => text.push_str(&format!("- {}: ❌ Sudah dibooking oleh {}\n", slot, team)),
        }
    }
    text
}

/// Confirmation for a successful booking
pub fn booking_confirmed(slot: &str, team: &str) -> String {
    format!("✅ Booking berhasil untuk jam {} atas nama {}!", slot, team)
}
