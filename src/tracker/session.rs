// Interactive tracker session

use super::address::is_valid_btc;
use super::explorer::{AddressReport, Explorer};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Main prompt
pub const PROMPT: &str = "rapss> ";

/// Prompt for the address after `track`
pub const ADDRESS_PROMPT: &str = "Bitcoin Address: ";

/// Tracked addresses for one shell session
#[derive(Debug, Default)]
pub struct Session {
    current: Option<String>,
    history: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and start tracking an address, returning the trimmed address
    pub fn track(&mut self, address: &str) -> Result<String, String> {
        let address = address.trim();
        if !is_valid_btc(address) {
            return Err("Invalid address".to_string());
        }

        self.current = Some(address.to_string());
        self.history.push(address.to_string());
        Ok(address.to_string())
    }

    /// Most recently tracked address
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Every tracked address, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

/// Shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Track,
    Refresh,
    History,
    Exit,
}

impl ShellCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "track" => Some(ShellCommand::Track),
            "refresh" => Some(ShellCommand::Refresh),
            "history" => Some(ShellCommand::History),
            "exit" => Some(ShellCommand::Exit),
            _ => None,
        }
    }
}

/// Line-oriented tracker shell
pub struct Shell<E> {
    session: Session,
    explorer: E,
}

impl<E: Explorer> Shell<E> {
    pub fn new(explorer: E) -> Self {
        Self {
            session: Session::new(),
            explorer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands until `exit` or end of input
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        loop {
            let Some(line) = prompt(&mut input, out, PROMPT).await? else {
                break;
            };

            match ShellCommand::parse(&line) {
                Some(ShellCommand::Track) => {
                    let Some(address) = prompt(&mut input, out, ADDRESS_PROMPT).await? else {
                        break;
                    };

                    match self.session.track(&address) {
                        Ok(address) => self.show(&address, out).await?,
                        Err(msg) => writeln!(out, "{}\n", msg)?,
                    }
                }
                Some(ShellCommand::Refresh) => match self.session.current().map(str::to_string) {
                    Some(address) => self.show(&address, out).await?,
                    None => writeln!(out, "No address tracked yet.\n")?,
                },
                Some(ShellCommand::History) => self.print_history(out)?,
                Some(ShellCommand::Exit) => {
                    writeln!(out, "Goodbye.")?;
                    break;
                }
                None => writeln!(out, "Unknown command\n")?,
            }
        }

        out.flush()
    }

    async fn show<W: Write>(&self, address: &str, out: &mut W) -> io::Result<()> {
        match self.explorer.fetch(address).await {
            Ok(stats) => {
                let report = AddressReport::from_stats(address, &stats);
                writeln!(out, "\n{}\n\n", report)
            }
            Err(e) => {
                log::warn!("Fetch for {} failed: {}", address, e);
                writeln!(out, "Failed to fetch data.")
            }
        }
    }

    fn print_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nTracked History:")?;

        let history = self.session.history();
        if history.is_empty() {
            return writeln!(out, "No tracked addresses.\n");
        }

        for (i, address) in history.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, address)?;
        }
        writeln!(out)
    }
}

/// Print the startup banner
pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "========================================")?;
    writeln!(out, "          RAPSS  EXPLORER               ")?;
    writeln!(out, "========================================")?;
    writeln!(out, "Bitcoin Real-Time Address Tracker\n")
}

// Write a prompt and read one line, None at end of input.
// Bytes that are not UTF-8 are replaced rather than ending the session.
async fn prompt<R, W>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", text)?;
    out.flush()?;

    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
