//! Equipment maintenance core for GearGuard.
//!
//! Tracks assets, maintenance teams, and technicians, and drives
//! maintenance requests from creation to resolution. The heart of the
//! crate is the scheduling engine: it decides who handles a request and
//! when, rejects overlapping schedules for the same technician or asset,
//! enforces the request lifecycle, and regenerates recurring preventive
//! work on its original cadence.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Equipment`, `Team`, `Technician`,
//!   `MaintenanceRequest`, `TimeWindow`, `RecurrenceRule`
//! - **`registry`**: Entity registration and snapshot lookups with
//!   referential integrity
//! - **`store`**: The request collection; snapshot reads and transactional
//!   mutation
//! - **`lifecycle`**: The status state machine
//! - **`engine`**: Assignment resolution, conflict detection, lifecycle
//!   side effects, recurrence generation
//! - **`reporting`**: Read-only aggregated views (overdue, workload,
//!   history, board)
//! - **`error`**: The crate-wide error taxonomy
//! - **`logging`**: `tracing` subscriber setup for hosts without one
//!
//! # Architecture
//!
//! Persistence, transports, and authentication are external
//! collaborators: this crate holds state in memory and exposes typed
//! operations plus serde-friendly models for whatever sits on top. All
//! writes funnel through [`engine::MaintenanceEngine`], which runs each
//! conflict check and the write it guards inside one store transaction.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use gearguard_core::engine::MaintenanceEngine;
//! use gearguard_core::models::{
//!     Equipment, NewRequest, RecurrenceRule, RequestStatus, RequestType, Team, Technician,
//! };
//!
//! let engine = MaintenanceEngine::new();
//! engine.registry().register_technician(Technician::new("priya_patel"));
//! engine
//!     .registry()
//!     .register_team(Team::new("Plumbing Team").with_member("priya_patel"))
//!     .unwrap();
//! engine
//!     .registry()
//!     .register_equipment(
//!         Equipment::new("WP-2024-004")
//!             .with_name("Water Pump System WP-300")
//!             .with_default_team("Plumbing Team"),
//!     )
//!     .unwrap();
//!
//! let start = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();
//! let id = engine
//!     .create_request(
//!         NewRequest::new(
//!             "Seal inspection",
//!             "WP-2024-004",
//!             RequestType::Preventive,
//!             start,
//!             60,
//!         )
//!         .with_recurrence(RecurrenceRule::days(30)),
//!     )
//!     .unwrap();
//!
//! engine.transition(id, RequestStatus::InProgress).unwrap();
//! engine.transition(id, RequestStatus::Repaired).unwrap();
//!
//! // The next occurrence is already on the books, 30 days out.
//! let upcoming = engine.reports().upcoming_preventive(
//!     &gearguard_core::models::TimeWindow::new(start, start + chrono::Duration::days(60)),
//! );
//! assert_eq!(upcoming.len(), 1);
//! ```

pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod registry;
pub mod reporting;
pub mod store;
