//! Draw order.

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Background,
    Pipes,
    Ground,
    Bird,
    Overlay,
}

impl Layer {
    /// Sprite z for this layer. Later variants draw on top.
    pub const fn z(self) -> f32 {
        match self {
            Self::Background => 0.0,
            Self::Pipes => 1.0,
            Self::Ground => 2.0,
            Self::Bird => 3.0,
            Self::Overlay => 10.0,
        }
    }
}
