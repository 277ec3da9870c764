//! Windows

use crate::NativeCommand;

pub(crate) const CLIPBOARD_COMMANDS: &[NativeCommand] = &[NativeCommand {
    program: "clip",
    args: &[],
}];

// FileProtocolHandler hands the URL to ShellExecute as one argument; cmd.exe
// would split it on `&`, `|`, and `^`.
pub(crate) const OPEN_COMMAND: NativeCommand = NativeCommand {
    program: "rundll32",
    args: &["url.dll,FileProtocolHandler"],
};
