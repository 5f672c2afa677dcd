//! Entity model.
//!
//! Plain data records for everything the studio client keeps in its store.
//! Every record carries an entity-local `id`; the store never enforces
//! uniqueness, producers (seed data, remote service, UI edits) do.
//!
//! # Module Structure
//!
//! - `people`: students and instructors
//! - `facility`: rooms and equipment
//! - `finance`: transactions
//! - `schedule`: agenda entries and the instructor rota (escala)
//! - `account`: signed-in user session and the subscription catalog

mod account;
mod facility;
mod finance;
mod people;
mod schedule;

pub use account::{Addon, SubscriptionPlan, UserRole, UserSession};
pub use facility::{Equipment, EquipmentStatus, Room};
pub use finance::{PaymentStatus, Transaction, TransactionKind};
pub use people::{Instructor, Student, StudentStatus};
pub use schedule::{AgendaItem, AgendaStatus, EscalaItem};
