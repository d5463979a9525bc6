//! Player roster types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character class as shown in-game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    #[serde(rename = "素问")]
    Suwen,
    #[serde(rename = "神相")]
    Shenxiang,
    #[serde(rename = "铁衣")]
    Tieyi,
    #[serde(rename = "血河")]
    Xuehe,
    #[serde(rename = "云瑶")]
    Yunyao,
    #[serde(rename = "鸿音")]
    Hongyin,
    #[serde(rename = "九灵")]
    Jiuling,
    #[serde(rename = "龙吟")]
    Longyin,
    #[serde(rename = "沧澜")]
    Canglan,
    #[serde(rename = "碎梦")]
    Suimeng,
    #[serde(rename = "荒羽")]
    Huangyu,
    #[serde(rename = "玄机")]
    Xuanji,
    #[serde(rename = "潮光")]
    Chaoguang,
    #[default]
    #[serde(rename = "其他")]
    Other,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 14] = [
        PlayerClass::Suwen,
        PlayerClass::Shenxiang,
        PlayerClass::Tieyi,
        PlayerClass::Xuehe,
        PlayerClass::Yunyao,
        PlayerClass::Hongyin,
        PlayerClass::Jiuling,
        PlayerClass::Longyin,
        PlayerClass::Canglan,
        PlayerClass::Suimeng,
        PlayerClass::Huangyu,
        PlayerClass::Xuanji,
        PlayerClass::Chaoguang,
        PlayerClass::Other,
    ];

    /// In-game label
    pub fn label(&self) -> &'static str {
        match self {
            PlayerClass::Suwen => "素问",
            PlayerClass::Shenxiang => "神相",
            PlayerClass::Tieyi => "铁衣",
            PlayerClass::Xuehe => "血河",
            PlayerClass::Yunyao => "云瑶",
            PlayerClass::Hongyin => "鸿音",
            PlayerClass::Jiuling => "九灵",
            PlayerClass::Longyin => "龙吟",
            PlayerClass::Canglan => "沧澜",
            PlayerClass::Suimeng => "碎梦",
            PlayerClass::Huangyu => "荒羽",
            PlayerClass::Xuanji => "玄机",
            PlayerClass::Chaoguang => "潮光",
            PlayerClass::Other => "其他",
        }
    }

    /// Parse an in-game label. Anything unrecognised is `Other`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.label() == label)
            .unwrap_or(PlayerClass::Other)
    }

    /// Display colour as `#rrggbb`
    pub fn color(&self) -> &'static str {
        match self {
            PlayerClass::Suwen => "#ffc0cb",
            PlayerClass::Shenxiang => "#87ceeb",
            PlayerClass::Tieyi => "#ffd700",
            PlayerClass::Xuehe => "#b22222",
            PlayerClass::Yunyao => "#ff6b6b",
            PlayerClass::Hongyin => "#daa520",
            PlayerClass::Jiuling => "#9370db",
            PlayerClass::Longyin => "#98fb98",
            PlayerClass::Canglan => "#4682b4",
            PlayerClass::Suimeng => "#87ceeb",
            PlayerClass::Huangyu => "#8b4513",
            PlayerClass::Xuanji => "#a9a9a9",
            PlayerClass::Chaoguang => "#00ced1",
            PlayerClass::Other => "#ffffff",
        }
    }

    /// Display colour as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unique identifier for a Player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A guild member as imported from the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    /// Character name
    pub name: String,

    pub combat_power: u64,

    pub class: PlayerClass,

    /// Hall (sub-group) the player belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,

    /// Rank label inside the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl Player {
    /// Create a player with a freshly generated id
    pub fn new(name: impl Into<String>, combat_power: u64, class: PlayerClass) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.into(),
            combat_power,
            class,
            hall: None,
            position: None,
            level: None,
        }
    }

    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_hall(mut self, hall: impl Into<String>) -> Self {
        self.hall = Some(hall.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Hall label, treating a blank hall as absent
    pub fn hall(&self) -> Option<&str> {
        self.hall.as_deref().filter(|h| !h.trim().is_empty())
    }
}
