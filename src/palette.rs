// The four drawing colours and the actions a button can trigger.

/// One of the four drawing colours. Order matters: it's the render order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    #[default]
    Blue,
    Green,
    Red,
    Yellow,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 4] = [Self::Blue, Self::Green, Self::Red, Self::Yellow];

    pub const fn index(self) -> usize {
        match self {
            Self::Blue => 0,
            Self::Green => 1,
            Self::Red => 2,
            Self::Yellow => 3,
        }
    }

    /// 0x00RRGGBB, the pixel format every surface uses.
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Blue => 0x00_00_00_FF,
            Self::Green => 0x00_00_FF_00,
            Self::Red => 0x00_FF_00_00,
            Self::Yellow => 0x00_FF_FF_00,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Blue => "BLUE",
            Self::Green => "GREEN",
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
        }
    }
}

/// What a button does when the fingertip hovers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Clear,
    Select(PaletteColor),
}
