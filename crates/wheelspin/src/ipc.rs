use std::io::Write;
use std::os::unix::net::UnixStream;
use strum::{Display as StrumDisplay, EnumString};

pub const SOCKET_PATH: &str = "/tmp/prizewheel.sock";

/// Line commands accepted on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Spin,
    Show,
}

pub fn send_command(command: Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to the prize wheel at {}: {}. Is prizewheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", command)?;
    Ok(())
}
