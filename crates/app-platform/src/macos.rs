//! macOS

use crate::NativeCommand;

pub(crate) const CLIPBOARD_COMMANDS: &[NativeCommand] = &[NativeCommand {
    program: "pbcopy",
    args: &[],
}];

pub(crate) const OPEN_COMMAND: NativeCommand = NativeCommand {
    program: "open",
    args: &[],
};
