//! Integration tests driving both data screens end to end over the
//! in-memory fake client.

mod helpers;
mod license_cycle_test;
mod peripheral_cycle_test;
