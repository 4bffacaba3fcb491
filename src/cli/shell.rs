//! Interactive menu loop.
//!
//! Generic over the input and output streams so the same loop runs on
//! stdin/stdout and on in-memory buffers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::application::{AppError, Ledger, Session};
use crate::domain::{parse_amount, Direction};

const HEADER: &str = "--- Transfer system ---";

const GUEST_MENU: &str = "\
1. Register
2. Log in
3. Exit
Choose (1-3): ";

const USER_MENU: &str = "\
1. Transfer money
2. My balance
3. Transfer history
4. Log out
5. Exit program
Choose (1-5): ";

enum Flow {
    Continue,
    Exit,
}

/// Drives a [`Ledger`] from line-oriented input.
///
/// End of input is treated like choosing "exit".
pub struct Shell<R, W> {
    ledger: Ledger,
    session: Option<Session>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ledger: Ledger, input: R, output: W) -> Self {
        Self {
            ledger,
            session: None,
            input,
            output,
        }
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Run menus until the user exits or input ends.
    ///
    /// Only I/O failures are returned; ledger errors are reported to the
    /// user and the loop carries on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let flow = match self.active_session() {
                Some(session) => self.user_menu(&session)?,
                None => self.guest_menu()?,
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn active_session(&self) -> Option<Session> {
        self.session
            .as_ref()
            .filter(|session| self.ledger.is_active(session))
            .cloned()
    }

    fn guest_menu(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n{}", HEADER)?;
        writeln!(self.output, "You are not logged in.")?;
        let Some(choice) = self.prompt(GUEST_MENU)? else {
            return Ok(Flow::Exit);
        };

        match choice.as_str() {
            "1" => self.register(),
            "2" => self.login(),
            "3" => self.goodbye(),
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn user_menu(&mut self, session: &Session) -> Result<Flow> {
        let name = self.ledger.current_user(session)?.name.clone();

        writeln!(self.output, "\n{}", HEADER)?;
        writeln!(self.output, "Logged in as: {}", name)?;
        let Some(choice) = self.prompt(USER_MENU)? else {
            return Ok(Flow::Exit);
        };

        match choice.as_str() {
            "1" => self.transfer(session, &name),
            "2" => {
                let balance = self.ledger.balance_of(session)?;
                writeln!(self.output, "\nYour balance: {}", balance)?;
                Ok(Flow::Continue)
            }
            "3" => self.history(&name),
            "4" => {
                self.ledger.logout();
                self.session = None;
                writeln!(self.output, "You have logged out.")?;
                Ok(Flow::Continue)
            }
            "5" => self.goodbye(),
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn register(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Your name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(balance) = self.prompt("Opening balance (whole number): ")? else {
            return Ok(Flow::Exit);
        };

        let balance = match parse_amount(&balance) {
            Ok(balance) => balance,
            Err(err) => return self.report(AppError::from(err)),
        };

        match self.ledger.register(&name, &password, balance) {
            Ok(_) => writeln!(self.output, "Registration successful!")?,
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(Flow::Exit);
        };

        match self.ledger.login(&name, &password) {
            Ok(session) => {
                self.session = Some(session);
                writeln!(self.output, "Welcome, {}!", name)?;
            }
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    fn transfer(&mut self, session: &Session, name: &str) -> Result<Flow> {
        let mut others = self.ledger.list_other_users(name);
        others.sort_by(|a, b| a.name.cmp(&b.name));

        writeln!(self.output, "\nAvailable users:")?;
        if others.is_empty() {
            writeln!(self.output, "No other users.")?;
        }
        for other in &others {
            writeln!(self.output, "  {} (balance: {})", other.name, other.balance)?;
        }

        let Some(to_name) = self.prompt("Recipient name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt("Amount (whole number): ")? else {
            return Ok(Flow::Exit);
        };

        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(err) => return self.report(AppError::from(err)),
        };

        match self.ledger.transfer(session, &to_name, amount) {
            Ok(_) => writeln!(self.output, "Transfer complete!")?,
            Err(err) => return self.report(err),
        }
        Ok(Flow::Continue)
    }

    fn history(&mut self, name: &str) -> Result<Flow> {
        let transfers = self.ledger.transfers_for(name);
        if transfers.is_empty() {
            writeln!(self.output, "No transfers yet.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\nYour transfers:")?;
        for transfer in &transfers {
            match transfer.direction_for(name) {
                Some(Direction::Outgoing) => writeln!(
                    self.output,
                    "  You -> {}: {}",
                    transfer.to_name, transfer.amount
                )?,
                Some(Direction::Incoming) => writeln!(
                    self.output,
                    "  {} -> You: {}",
                    transfer.from_name, transfer.amount
                )?,
                None => {}
            }
        }
        Ok(Flow::Continue)
    }

    fn goodbye(&mut self) -> Result<Flow> {
        writeln!(self.output, "Goodbye!")?;
        Ok(Flow::Exit)
    }

    fn report(&mut self, err: AppError) -> Result<Flow> {
        writeln!(self.output, "Error: {}", err)?;
        Ok(Flow::Continue)
    }

    /// Print `label` and read one trimmed line. `None` means end of input.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD instead of failing the read.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}
