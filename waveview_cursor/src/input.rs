// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

bitflags::bitflags! {
    /// Keyboard modifiers held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control (Command on macOS hosts).
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Super.
        const META    = 0b0000_1000;
    }
}

/// Pointer button of a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button, or a touch.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Auxiliary,
}

/// Keys the diagram reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any other key.
    Other,
}

/// Input delivered to the diagram by the host, in window coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A button was pressed.
    PointerDown {
        /// Pointer position.
        pos: Point,
        /// Button pressed.
        button: PointerButton,
    },
    /// The pointer moved, with or without a button held.
    PointerMove {
        /// Pointer position.
        pos: Point,
    },
    /// The primary button was released.
    PointerUp {
        /// Pointer position.
        pos: Point,
    },
    /// The primary button was double-clicked.
    DoubleClick {
        /// Pointer position.
        pos: Point,
    },
    /// The pointer left the window.
    PointerLeave,
    /// A key was pressed.
    Key {
        /// Key pressed.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
}
