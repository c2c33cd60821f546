//! Static lookups: d100 injury locations and weapon critical types

use serde::{Deserialize, Serialize};

use super::criticals::CritType;

/// Body locations a critical can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "right leg")]
    RightLeg,
    #[serde(rename = "left leg")]
    LeftLeg,
    #[serde(rename = "right arm")]
    RightArm,
    #[serde(rename = "left arm")]
    LeftArm,
    #[serde(rename = "chest")]
    Chest,
    #[serde(rename = "abdomen")]
    Abdomen,
    #[serde(rename = "back")]
    Back,
    #[serde(rename = "right hand")]
    RightHand,
    #[serde(rename = "left hand")]
    LeftHand,
    #[serde(rename = "neck")]
    Neck,
    #[serde(rename = "head")]
    Head,
    #[serde(rename = "right eye")]
    RightEye,
    #[serde(rename = "left eye")]
    LeftEye,
}

impl Location {
    pub fn all() -> &'static [Location] {
        &[
            Location::RightLeg,
            Location::LeftLeg,
            Location::RightArm,
            Location::LeftArm,
            Location::Chest,
            Location::Abdomen,
            Location::Back,
            Location::RightHand,
            Location::LeftHand,
            Location::Neck,
            Location::Head,
            Location::RightEye,
            Location::LeftEye,
        ]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Location::RightLeg => "right leg",
            Location::LeftLeg => "left leg",
            Location::RightArm => "right arm",
            Location::LeftArm => "left arm",
            Location::Chest => "chest",
            Location::Abdomen => "abdomen",
            Location::Back => "back",
            Location::RightHand => "right hand",
            Location::LeftHand => "left hand",
            Location::Neck => "neck",
            Location::Head => "head",
            Location::RightEye => "right eye",
            Location::LeftEye => "left eye",
        };
        write!(f, "{}", s)
    }
}

/// d100 ranges (inclusive) for each location. Ordered and covering 1-100.
pub const INJURY_LOCATIONS: [(i32, i32, Location); 13] = [
    (1, 8, Location::RightLeg),
    (9, 16, Location::LeftLeg),
    (17, 24, Location::RightArm),
    (25, 32, Location::LeftArm),
    (33, 50, Location::Chest),
    (51, 62, Location::Abdomen),
    (63, 72, Location::Back),
    (73, 78, Location::RightHand),
    (79, 84, Location::LeftHand),
    (85, 90, Location::Neck),
    (91, 96, Location::Head),
    (97, 98, Location::RightEye),
    (99, 100, Location::LeftEye),
];

/// Where a d100 roll lands
pub fn injury_location(roll: i32) -> Option<Location> {
    INJURY_LOCATIONS
        .iter()
        .find(|(start, end, _)| *start <= roll && roll <= *end)
        .map(|(_, _, loc)| *loc)
}

/// Critical type dealt by a weapon base
pub fn critical_type_for(weapon_base: &str) -> Option<CritType> {
    let crit = match weapon_base.to_lowercase().as_str() {
        "brawling" | "mace" | "morning star" | "war hammer" | "cudgel" | "crowbill"
        | "flail" | "quarterstaff" | "club" => CritType::Crush,
        "broadsword" | "longsword" | "short sword" | "falchion" | "scimitar" | "handaxe"
        | "backsword" | "katana" | "bastard sword" | "two-handed sword" | "battle axe" => {
            CritType::Slash
        }
        "dagger" | "main gauche" | "rapier" | "estoc" | "spear" | "pike" | "trident"
        | "javelin" | "arrow" => CritType::Puncture,
        _ => return None,
    };
    Some(crit)
}
