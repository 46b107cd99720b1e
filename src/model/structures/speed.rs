use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Game-speed categories tallied by the activity feed.
/// The serialized names are the feed's own keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, Display)]
pub enum Speed {
    #[strum(serialize = "ultraBullet")]
    UltraBullet,
    #[strum(serialize = "bullet")]
    Bullet,
    #[strum(serialize = "blitz")]
    Blitz,
    #[strum(serialize = "rapid")]
    Rapid
}

impl Speed {
    /// Ultrabullet, bullet and blitz count as fast formats.
    pub fn is_fast(&self) -> bool {
        !matches!(self, Speed::Rapid)
    }
}
