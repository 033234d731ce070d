//! Keyword-valued style properties and the axis/edge vocabulary.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Declares a keyword enum with the shared derive set.
macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            Serialize,
            Deserialize,
            Display,
            EnumString,
        )]
        #[serde(rename_all = "kebab-case")]
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }
    };
}

keyword_enum! {
    /// [§ 2.1 direction](https://www.w3.org/TR/css-writing-modes-4/#direction)
    ///
    /// Inline base direction. `Inherit` takes the owner's resolved direction.
    Direction {
        /// Use the owner's direction, or LTR at the root.
        #[default]
        Inherit,
        /// Left to right.
        Ltr,
        /// Right to left.
        Rtl,
    }
}

keyword_enum! {
    /// [§ 5.1 flex-direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
    ///
    /// "The flex-direction property specifies how flex items are placed in the
    /// flex container, by setting the direction of the flex container's main
    /// axis."
    FlexDirection {
        /// Main axis runs top to bottom.
        #[default]
        Column,
        /// Main axis runs bottom to top.
        ColumnReverse,
        /// Main axis runs in the inline direction.
        Row,
        /// Main axis runs against the inline direction.
        RowReverse,
    }
}

keyword_enum! {
    /// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
    Justify {
        /// "Flex items are packed toward the start of the line."
        #[default]
        FlexStart,
        /// "Flex items are packed toward the center of the line."
        Center,
        /// "Flex items are packed toward the end of the line."
        FlexEnd,
        /// "Flex items are evenly distributed in the line."
        SpaceBetween,
        /// Half-size spaces before the first and after the last item.
        SpaceAround,
        /// Equal spaces before, between and after every item.
        SpaceEvenly,
    }
}

keyword_enum! {
    /// [§ 8.3 align-items / align-self](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
    /// and [§ 8.4 align-content](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
    ///
    /// One enum serves all three properties; not every keyword is meaningful
    /// for every property.
    Align {
        /// align-self only: defer to the owner's align-items.
        #[default]
        Auto,
        /// Pack toward the cross-start edge.
        FlexStart,
        /// Center in the cross axis.
        Center,
        /// Pack toward the cross-end edge.
        FlexEnd,
        /// Fill the line's cross size.
        Stretch,
        /// Align first baselines.
        Baseline,
        /// align-content only.
        SpaceBetween,
        /// align-content only.
        SpaceAround,
    }
}

keyword_enum! {
    /// [§ 2.1 position](https://www.w3.org/TR/css-position-3/#position-property)
    PositionType {
        /// In flow, offset by the position edges.
        #[default]
        Relative,
        /// Out of flow, placed against the owner's padding box.
        Absolute,
    }
}

keyword_enum! {
    /// [§ 5.2 flex-wrap](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
    Wrap {
        /// "The flex container is single-line."
        #[default]
        NoWrap,
        /// "The flex container is multi-line."
        Wrap,
        /// Multi-line with the cross-start and cross-end directions swapped.
        WrapReverse,
    }
}

keyword_enum! {
    /// [§ 3 overflow](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    Overflow {
        /// Content may overflow.
        #[default]
        Visible,
        /// Content is clipped.
        Hidden,
        /// Content scrolls; affects AtMost sizing of the container.
        Scroll,
    }
}

keyword_enum! {
    /// [§ 2 display](https://www.w3.org/TR/css-display-3/#the-display-properties)
    Display {
        /// Participates in layout.
        #[default]
        Flex,
        /// Removed from layout; its subtree is zeroed out.
        None,
    }
}

keyword_enum! {
    /// Box edges, physical, logical and shorthand.
    Edge {
        /// Physical left.
        #[default]
        Left,
        /// Physical top.
        Top,
        /// Physical right.
        Right,
        /// Physical bottom.
        Bottom,
        /// Logical start of the row axis.
        Start,
        /// Logical end of the row axis.
        End,
        /// Shorthand for left and right (and start/end).
        Horizontal,
        /// Shorthand for top and bottom.
        Vertical,
        /// Shorthand for every edge.
        All,
    }
}

keyword_enum! {
    /// Width or height.
    Dimension {
        /// Horizontal extent.
        #[default]
        Width,
        /// Vertical extent.
        Height,
    }
}

keyword_enum! {
    /// How an available size constrains a measurement.
    MeasureMode {
        /// No constraint; the size is undefined.
        #[default]
        Undefined,
        /// The size is fixed.
        Exactly,
        /// The size is an upper bound only.
        AtMost,
    }
}

keyword_enum! {
    /// Classification of a node. Nodes with a measure callback are `Text`.
    NodeType {
        /// A regular container.
        #[default]
        Default,
        /// A measured leaf; rounding keeps its glyph box from shrinking.
        Text,
    }
}

keyword_enum! {
    /// Opt-in engine behaviours.
    ExperimentalFeature {
        /// Recompute flex basis on every layout generation.
        #[default]
        WebFlexBasis,
    }
}

keyword_enum! {
    /// Unit tag of a [`Value`](crate::Value).
    Unit {
        /// Not set.
        #[default]
        Undefined,
        /// Absolute points.
        Point,
        /// Percentage of the owner size.
        Percent,
        /// `auto`.
        Auto,
    }
}

impl Edge {
    /// The four physical edges in layout-array order.
    pub const PHYSICAL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    /// Index into the nine-slot edge table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Dimension {
    /// Index into a two-slot dimension table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FlexDirection {
    /// Row or row-reverse.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Column or column-reverse.
    #[must_use]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }

    /// Row-reverse or column-reverse.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    /// Apply the inline direction: RTL swaps row and row-reverse.
    #[must_use]
    pub const fn resolve(self, direction: Direction) -> Self {
        match (direction, self) {
            (Direction::Rtl, Self::Row) => Self::RowReverse,
            (Direction::Rtl, Self::RowReverse) => Self::Row,
            _ => self,
        }
    }

    /// The cross axis for this main axis. A column's cross axis is the row
    /// resolved for `direction`; a row's cross axis is always column.
    #[must_use]
    pub const fn cross(self, direction: Direction) -> Self {
        if self.is_column() {
            Self::Row.resolve(direction)
        } else {
            Self::Column
        }
    }

    /// The physical edge items start from on this axis.
    #[must_use]
    pub const fn leading_edge(self) -> Edge {
        match self {
            Self::Column => Edge::Top,
            Self::ColumnReverse => Edge::Bottom,
            Self::Row => Edge::Left,
            Self::RowReverse => Edge::Right,
        }
    }

    /// The physical edge opposite [`leading_edge`](Self::leading_edge).
    #[must_use]
    pub const fn trailing_edge(self) -> Edge {
        match self {
            Self::Column => Edge::Bottom,
            Self::ColumnReverse => Edge::Top,
            Self::Row => Edge::Right,
            Self::RowReverse => Edge::Left,
        }
    }

    /// The dimension measured along this axis.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        if self.is_row() {
            Dimension::Width
        } else {
            Dimension::Height
        }
    }
}
