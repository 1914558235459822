//! Panel capability system
//!
//! Views declare what kind of input they take right now. The keyboard
//! middleware routes keys by capability instead of by view type.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PanelCapabilities: u32 {
        /// Printable keys are typed into a text field
        const TEXT_INPUT = 1 << 0;

        /// Up/Down move through a list even while typing
        const ITEM_NAVIGATION = 1 << 1;
    }
}

impl PanelCapabilities {
    pub fn accepts_text_input(self) -> bool {
        self.contains(Self::TEXT_INPUT)
    }

    pub fn supports_item_navigation(self) -> bool {
        self.contains(Self::ITEM_NAVIGATION)
    }
}
