use crate::foundation::error::{BlitError, BlitResult};

macro_rules! named_rules {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident = $text:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every rule, in identifier order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Display name used by the reference tooling.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Numeric identifier (position in [`Self::ALL`]).
            pub const fn id(self) -> u32 {
                self as u32
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_rules! {
    /// Pixel-merge rules understood by a combination engine.
    pub enum CombinationRule {
        ClearWord = "clearWord",
        BitAnd = "bitAnd",
        BitAndInvert = "bitAndInvert",
        SourceWord = "sourceWord",
        BitInvertAnd = "bitInvertAnd",
        DestinationWord = "destinationWord",
        BitXor = "bitXor",
        BitOr = "bitOr",
        BitInvertAndInvert = "bitInvertAndInvert",
        BitInvertXor = "bitInvertXor",
        BitInvertDestination = "bitInvertDestination",
        BitOrInvert = "bitOrInvert",
        BitInvertSource = "bitInvertSource",
        BitInvertOr = "bitInvertOr",
        BitInvertOrInvert = "bitInvertOrInvert",
        DestinationWordAlt1 = "destinationWord_alt1",
        DestinationWordAlt2 = "destinationWord_alt2",
        DestinationWordAlt3 = "destinationWord_alt3",
        AddWord = "addWord",
        SubWord = "subWord",
        RgbAdd = "rgbAdd",
        RgbSub = "rgbSub",
        OldRgbDiff = "OLDrgbDiff",
        OldTallyIntoMap = "OLDtallyIntoMap",
        AlphaBlend = "alphaBlend",
        PixPaint = "pixPaint",
        PixMask = "pixMask",
        RgbMax = "rgbMax",
        RgbMin = "rgbMin",
        RgbMinInvert = "rgbMinInvert",
        AlphaBlendConst = "alphaBlendConst",
        AlphaPaintConst = "alphaPaintConst",
        RgbDiff = "rgbDiff",
        TallyIntoMap = "tallyIntoMap",
        AlphaBlendScaled = "alphaBlendScaled",
        AlphaBlendScaledAlt1 = "alphaBlendScaled_alt1",
        AlphaBlendScaledAlt2 = "alphaBlendScaled_alt2",
        RgbMul = "rgbMul",
        PixSwap = "pixSwap",
        PixClear = "pixClear",
        FixAlpha = "fixAlpha",
        RgbComponentAlpha = "rgbComponentAlpha",
    }
}

named_rules! {
    /// Pixel predicates understood by a comparison engine.
    pub enum MatchRule {
        PixelMatch = "pixelMatch",
        NotANotB = "notAnotB",
        NotAMatchB = "notAmatchB",
    }
}

impl CombinationRule {
    /// Rules whose result never depends on the source.
    pub const fn ignores_source(self) -> bool {
        matches!(
            self,
            Self::ClearWord | Self::DestinationWord | Self::BitInvertDestination
        )
    }

    /// Rules that are never given a halftone: the source-independent ones.
    pub const fn ignores_halftone(self) -> bool {
        self.ignores_source()
    }

    /// Rules that take a constant source alpha byte.
    pub const fn takes_source_alpha(self) -> bool {
        matches!(self, Self::AlphaBlendConst | Self::AlphaPaintConst)
    }

    /// Rules that accumulate into the indexed colour-map table instead of the destination.
    pub const fn writes_lookup_table(self) -> bool {
        matches!(self, Self::TallyIntoMap | Self::OldTallyIntoMap)
    }

    /// The 4-bit boolean truth table for rules `0..=15`, or `None` for arithmetic rules.
    ///
    /// Bit `(s << 1) | d` of the result is the output for source bit `s`, destination bit `d`.
    /// The `_alt` identifiers are aliases of `destinationWord`.
    pub const fn truth_table(self) -> Option<u8> {
        let table = match self {
            Self::ClearWord => 0b0000,
            Self::BitAnd => 0b1000,
            Self::BitAndInvert => 0b0100,
            Self::SourceWord => 0b1100,
            Self::BitInvertAnd => 0b0010,
            Self::DestinationWord
            | Self::DestinationWordAlt1
            | Self::DestinationWordAlt2
            | Self::DestinationWordAlt3 => 0b1010,
            Self::BitXor => 0b0110,
            Self::BitOr => 0b1110,
            Self::BitInvertAndInvert => 0b0001,
            Self::BitInvertXor => 0b1001,
            Self::BitInvertDestination => 0b0101,
            Self::BitOrInvert => 0b1101,
            Self::BitInvertSource => 0b0011,
            Self::BitInvertOr => 0b1011,
            Self::BitInvertOrInvert => 0b0111,
            _ => return None,
        };
        Some(table)
    }
}

impl std::str::FromStr for CombinationRule {
    type Err = BlitError;

    fn from_str(s: &str) -> BlitResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.name() == s)
            .ok_or_else(|| BlitError::config(format!("unrecognised combination rule '{s}'")))
    }
}

impl std::str::FromStr for MatchRule {
    type Err = BlitError;

    fn from_str(s: &str) -> BlitResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.name() == s)
            .ok_or_else(|| BlitError::config(format!("unrecognised match rule '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/rules.rs"]
mod tests;
