//! The fixed palette of image categories a board is dealt from.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// An image category. Each dealt category appears on exactly two tiles.
///
/// Declaration order is the palette order used when dealing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumCount, EnumIter,
)]
#[strum(serialize_all = "title_case")]
#[allow(missing_docs)]
pub enum Category {
    BeamingFace,
    BirthdayCake,
    CatFace,
    CherryBlossom,
    DogFace,
    Doughnut,
    FloppyDisk,
    FourLeafClover,
    Globe,
    Guitar,
    Laptop,
    RedHeart,
    RingedPlanet,
    Rocket,
    Violin,
    Watermelon,
}

impl Category {
    /// 1-based position in the palette.
    pub fn id(self) -> u8 {
        self as u8 + 1
    }

    /// Looks a category up by its 1-based palette position.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::iter().nth(usize::from(id).checked_sub(1)?)
    }

    /// Emoji drawn by the terminal front end.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::BeamingFace => "😁",
            Category::BirthdayCake => "🎂",
            Category::CatFace => "🐱",
            Category::CherryBlossom => "🌸",
            Category::DogFace => "🐶",
            Category::Doughnut => "🍩",
            Category::FloppyDisk => "💾",
            Category::FourLeafClover => "🍀",
            Category::Globe => "🌎",
            Category::Guitar => "🎸",
            Category::Laptop => "💻",
            Category::RedHeart => "❤️",
            Category::RingedPlanet => "🪐",
            Category::Rocket => "🚀",
            Category::Violin => "🎻",
            Category::Watermelon => "🍉",
        }
    }

    /// Image asset name for graphical front ends.
    pub fn asset(self) -> &'static str {
        match self {
            Category::BeamingFace => "images/beaming-face-with-smiling-eyes_1f601.png",
            Category::BirthdayCake => "images/birthday-cake_1f382.png",
            Category::CatFace => "images/cat-face_1f431.png",
            Category::CherryBlossom => "images/cherry-blossom_1f338.png",
            Category::DogFace => "images/dog-face_1f436.png",
            Category::Doughnut => "images/doughnut_1f369.png",
            Category::FloppyDisk => "images/floppy-disk_1f4be.png",
            Category::FourLeafClover => "images/four-leaf-clover_1f340.png",
            Category::Globe => "images/globe-showing-americas_1f30e.png",
            Category::Guitar => "images/guitar_1f3b8.png",
            Category::Laptop => "images/laptop_1f4bb.png",
            Category::RedHeart => "images/red-heart_2764-fe0f.png",
            Category::RingedPlanet => "images/ringed-planet_1fa90.png",
            Category::Rocket => "images/rocket_1f680.png",
            Category::Violin => "images/violin_1f3bb.png",
            Category::Watermelon => "images/watermelon_1f349.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_declaration_order() {
        let ids: Vec<u8> = Category::iter().map(Category::id).collect();
        let expected: Vec<u8> = (1..=16).collect();
        assert_eq!(ids, expected);
        assert_eq!(Category::COUNT, 16);
    }

    #[test]
    fn test_from_id_inverts_id() {
        for category in Category::iter() {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
        assert_eq!(Category::from_id(0), None);
        assert_eq!(Category::from_id(17), None);
    }

    #[test]
    fn test_display_is_title_case() {
        assert_eq!(Category::FourLeafClover.to_string(), "Four Leaf Clover");
    }
}
