//! DTOs for decoding the remote `GET /users` payload.

use serde::Deserialize;

use crate::domain::ports::RawUserRecord;

#[derive(Debug, Deserialize)]
pub(super) struct RemoteUserDto {
    pub(super) id: u64,
    pub(super) name: String,
    #[serde(default)]
    pub(super) surname: Option<String>,
    pub(super) email: String,
    #[serde(default)]
    pub(super) skills: Option<Vec<String>>,
    pub(super) date: String,
}

impl From<RemoteUserDto> for RawUserRecord {
    fn from(value: RemoteUserDto) -> Self {
        let RemoteUserDto {
            id,
            name,
            surname,
            email,
            skills,
            date,
        } = value;
        Self {
            id,
            name,
            surname: surname.unwrap_or_default(),
            email,
            skills: skills.unwrap_or_default(),
            date,
        }
    }
}
