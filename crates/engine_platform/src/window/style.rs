// crates/engine_platform/src/window/style.rs

use bitflags::bitflags;
use engine_shared::WindowCreationFlags;

bitflags! {
    /// Window style bits, Win32 values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u32 {
        const POPUP        = 0x8000_0000;
        const CHILD        = 0x4000_0000;
        const VISIBLE      = 0x1000_0000;
        const MAXIMIZE     = 0x0100_0000;
        const CAPTION      = 0x00C0_0000;
        const SYSMENU      = 0x0008_0000;
        const THICKFRAME   = 0x0004_0000;
        const MINIMIZEBOX  = 0x0002_0000;
        const MAXIMIZEBOX  = 0x0001_0000;

        const OVERLAPPED_WINDOW = Self::CAPTION.bits()
            | Self::SYSMENU.bits()
            | Self::THICKFRAME.bits()
            | Self::MINIMIZEBOX.bits()
            | Self::MAXIMIZEBOX.bits();
    }
}

bitflags! {
    /// Extended window style bits, Win32 values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExStyleFlags: u32 {
        const DLG_MODAL_FRAME = 0x0000_0001;
        const TOPMOST         = 0x0000_0008;
        const ACCEPT_FILES    = 0x0000_0010;
        const WINDOW_EDGE     = 0x0000_0100;
        const CLIENT_EDGE     = 0x0000_0200;
        const STATIC_EDGE     = 0x0002_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowStyle {
    pub style: StyleFlags,
    pub ex_style: ExStyleFlags,
}

impl WindowStyle {
    pub fn new(style: StyleFlags, ex_style: ExStyleFlags) -> Self {
        Self { style, ex_style }
    }

    /// Style for a new window. Borderless wins over the child style.
    pub fn for_creation(flags: WindowCreationFlags, has_parent: bool) -> Self {
        let mut style = StyleFlags::OVERLAPPED_WINDOW;
        if has_parent {
            style = StyleFlags::CAPTION | StyleFlags::SYSMENU | StyleFlags::THICKFRAME;
        }
        if flags.contains(WindowCreationFlags::BORDERLESS) {
            style = StyleFlags::POPUP;
        }

        let mut ex_style = ExStyleFlags::empty();
        if flags.contains(WindowCreationFlags::DRAG_AND_DROP) {
            ex_style |= ExStyleFlags::ACCEPT_FILES;
        }
        Self { style, ex_style }
    }

    /// Same style with caption, sizing frame and edge decorations removed.
    pub fn without_decorations(self) -> Self {
        Self {
            style: self.style - (StyleFlags::CAPTION | StyleFlags::THICKFRAME),
            ex_style: self.ex_style
                - (ExStyleFlags::DLG_MODAL_FRAME
                    | ExStyleFlags::WINDOW_EDGE
                    | ExStyleFlags::CLIENT_EDGE
                    | ExStyleFlags::STATIC_EDGE),
        }
    }

    pub fn has_frame(&self) -> bool {
        self.style.intersects(StyleFlags::CAPTION | StyleFlags::THICKFRAME)
    }
}
