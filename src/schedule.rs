use serde::Deserialize;

/// Envelope every schedule API endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct ApiResult<T> {
    pub result: T,
}

/// Stage metadata as returned by the API.
#[derive(Debug, Deserialize)]
pub struct SalmonStage {
    pub image: String,
    pub name: String,
}

/// Weapon metadata as returned by the API.
#[derive(Debug, Deserialize)]
pub struct SalmonWeapon {
    pub id: i64,
    pub image: String,
    pub name: String,
}

/// One cooperative-mode rotation as returned by `/coop/schedule`.
/// Times are epoch-seconds. Stage and weapons are missing for
/// rotations the API has not announced details for yet.
#[derive(Debug, Deserialize)]
pub struct RawSalmonEntry {
    pub start_t: i64,
    pub end_t: i64,
    pub stage: Option<SalmonStage>,
    pub weapons: Option<Vec<SalmonWeapon>>,
}

/// Display-oriented form of a salmon rotation, times in epoch-milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SalmonRotation {
    pub start: i64,
    pub end: i64,
    pub stage: Option<String>,
    pub weapons: Option<Vec<String>>,
}

impl From<RawSalmonEntry> for SalmonRotation {
    fn from(raw: RawSalmonEntry) -> Self {
        Self {
            start: raw.start_t * 1000,
            end: raw.end_t * 1000,
            stage: raw.stage.map(|stage| stage.name),
            weapons: raw
                .weapons
                .map(|weapons| weapons.into_iter().map(|weapon| weapon.name).collect()),
        }
    }
}

/// One versus-mode rotation as returned by `/schedule`.
#[derive(Debug, Deserialize)]
pub struct RawBattleSchedule {
    pub start_t: i64,
    pub end_t: i64,
    pub rule: String,
    pub maps: Vec<String>,
}

/// The three versus-mode buckets `/schedule` returns together.
/// Each bucket is in chronological order, nearest rotation first.
#[derive(Debug, Deserialize)]
pub struct ScheduleBucket {
    pub regular: Vec<RawBattleSchedule>,
    pub gachi: Vec<RawBattleSchedule>,
    pub league: Vec<RawBattleSchedule>,
}
