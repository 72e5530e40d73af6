use serde::{Deserialize, Serialize};

/// Kind of a single grid cell.
///
/// The generator only emits `Wall`, `Floor`, `Door`, `Entrance`, `Exit` and
/// `Shop`. The remaining variants are reserved for other generators and for
/// gameplay collaborators that decorate a level after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Wall,
    Floor,
    Door,
    Entrance,
    Exit,
    Water,
    Lava,
    Trap,
    Shop,
    Chest,
}

impl TileType {
    /// Every tile type, in declaration order.
    pub const ALL: [TileType; 10] = [
        TileType::Wall,
        TileType::Floor,
        TileType::Door,
        TileType::Entrance,
        TileType::Exit,
        TileType::Water,
        TileType::Lava,
        TileType::Trap,
        TileType::Shop,
        TileType::Chest,
    ];

    pub fn is_walkable(&self) -> bool {
        matches!(
            self,
            TileType::Floor
                | TileType::Door
                | TileType::Entrance
                | TileType::Exit
                | TileType::Water
                | TileType::Trap
                | TileType::Shop
                | TileType::Chest
        )
    }

    pub fn blocks_vision(&self) -> bool {
        matches!(self, TileType::Wall | TileType::Door)
    }

    /// Character used when printing a level as text
    pub fn glyph(&self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
            TileType::Door => '+',
            TileType::Entrance => '<',
            TileType::Exit => '>',
            TileType::Water => '~',
            TileType::Lava => '^',
            TileType::Trap => '!',
            TileType::Shop => '$',
            TileType::Chest => '=',
        }
    }

    /// Inverse of [`TileType::glyph`]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.glyph() == glyph)
    }
}
