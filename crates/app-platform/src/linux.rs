//! Linux and other Unix desktops

use crate::NativeCommand;

/// Clipboard writers in preference order; Wayland first, then X11
pub(crate) const CLIPBOARD_COMMANDS: &[NativeCommand] = &[
    NativeCommand {
        program: "wl-copy",
        args: &[],
    },
    NativeCommand {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    NativeCommand {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

pub(crate) const OPEN_COMMAND: NativeCommand = NativeCommand {
    program: "xdg-open",
    args: &[],
};
