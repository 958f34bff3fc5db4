// SPDX-License-Identifier: MIT

//! Variable scopes — which property pickers a design-tool variable shows up in.

bitflags::bitflags! {
    /// Scope set written to `com.figma.scopes`.
    ///
    /// Flag names are the exact strings the design tool uses, so
    /// `iter_names` doubles as the serializer:
    ///
    /// ```
    /// use n_tokens::scope::VariableScopes;
    ///
    /// let s = VariableScopes::FRAME_FILL | VariableScopes::SHAPE_FILL;
    /// assert_eq!(s.names(), vec!["FRAME_FILL", "SHAPE_FILL"]);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct VariableScopes: u8 {
        const ALL_SCOPES    = 1 << 0;
        const ALL_FILLS     = 1 << 1;
        const FRAME_FILL    = 1 << 2;
        const SHAPE_FILL    = 1 << 3;
        const TEXT_FILL     = 1 << 4;
        const STROKE_COLOR  = 1 << 5;
        const EFFECT_COLOR  = 1 << 6;
    }
}

impl VariableScopes {
    /// Palette primitives: hidden from every picker, only reachable by alias.
    pub const PRIMITIVE: Self = Self::empty();

    /// Grounds, stark and black/white utilities.
    pub const SURFACE: Self = Self::FRAME_FILL.union(Self::SHAPE_FILL);

    /// Intents and semantic hues.
    pub const ACCENT: Self = Self::ALL_FILLS
        .union(Self::STROKE_COLOR)
        .union(Self::EFFECT_COLOR);

    /// Every on-color.
    pub const FOREGROUND: Self = Self::TEXT_FILL
        .union(Self::SHAPE_FILL)
        .union(Self::STROKE_COLOR);

    /// Scope names in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }

    /// Parse scope names, skipping ones this tool doesn't know.
    #[must_use]
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .filter_map(Self::from_name)
            .fold(Self::empty(), Self::union)
    }
}
