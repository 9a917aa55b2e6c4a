//! Record builders and a fixed clock shared by domain and adapter unit tests.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use mockable::Clock;

use super::directory::UserDirectory;
use super::store::UserCollection;
use super::user::{RegistrationDate, UserFields, UserId, UserRecord};

/// Clock pinned to one instant.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 14.02.2025 16:45 UTC, the "now" every test directory sees.
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 14, 16, 45, 0)
        .single()
        .expect("valid instant")
}

pub(crate) fn directory_with(records: Vec<UserRecord>) -> UserDirectory {
    UserDirectory::new(
        Arc::new(UserCollection::with_records(records)),
        Arc::new(FixedClock(fixed_now())),
        utc_offset(),
    )
}

pub(crate) fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset")
}

pub(crate) fn fixed_date() -> RegistrationDate {
    let instant = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid instant");
    RegistrationDate::from_instant(instant, utc_offset())
}

pub(crate) fn record_named(id: u64, name: &str) -> UserRecord {
    let fields = UserFields::new(
        name,
        "Tester",
        format!("user{id}@example.com"),
        vec!["rust".to_owned()],
    )
    .expect("valid fields");
    UserRecord::new(UserId::new(id).expect("valid id"), fields, fixed_date())
}

pub(crate) fn record(id: u64) -> UserRecord {
    record_named(id, &format!("User {id}"))
}
