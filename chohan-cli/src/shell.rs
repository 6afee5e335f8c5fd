//! Interactive console table.
//!
//! Owns every prompt loop: the engine only judges single lines, this layer
//! keeps asking until it gets one the engine accepts.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chohan_game::{
    DiceSource, Ending, RoundOutcome, Session, SessionError, WagerInput, constants::BONUS_AMOUNT,
};
use log::{debug, info, warn};

pub const INTRO: &str = "\
Cho-Han

In this traditional Japanese dice game, two dice are rolled in a bamboo
cup by the dealer sitting on the floor. The player must guess if the
dice total to an even (cho) or odd (han) number.
Should you get a 2 or a 7 on a dice roll, you will receive a 10 mon bonus!
";

const PROMPT: &str = "np: ";
const FAREWELL: &str = "Thanks for playing!";
const OUT_OF_MONEY: &str = "You have run out of sufficient money!";

/// Console front end over any line source and sink.
pub struct Table<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Table<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play until the player quits, runs dry, or input ends.
    ///
    /// End of input at either prompt is treated as walking away.
    pub fn play<D: DiceSource>(&mut self, session: &mut Session<D>) -> Result<Ending> {
        writeln!(self.output, "{INTRO}")?;

        loop {
            if let Some(ending) = session.ending() {
                return self.close(ending);
            }

            let Some(wager) = self.take_wager(session)? else {
                return self.close(Ending::Quit);
            };

            self.narrate_cup()?;

            let Some(outcome) = self.take_call(session)? else {
                warn!("input closed with {wager} mon on the table");
                return self.close(Ending::Quit);
            };

            debug!(
                "round {}: dice {}-{} total {} call {} won {} purse {}",
                session.stats().rounds,
                outcome.dice.first,
                outcome.dice.second,
                outcome.total,
                outcome.call,
                outcome.won,
                outcome.purse_after
            );
            self.announce(&outcome)?;
        }
    }

    /// Betting prompt; `None` means quit (typed or end of input).
    fn take_wager<D: DiceSource>(&mut self, session: &mut Session<D>) -> Result<Option<u64>> {
        writeln!(
            self.output,
            "You have {} mon. How much do you bet? (or QUIT)",
            purse_label(session.purse(), session.stats().wins > 0)
        )?;
        loop {
            let Some(line) = self.read_line()? else {
                warn!("input closed at the betting prompt");
                return Ok(None);
            };
            match session.place_wager(&line) {
                Ok(WagerInput::Quit) => return Ok(None),
                Ok(WagerInput::Amount(wager)) => return Ok(Some(wager)),
                Err(SessionError::Wager(rejection)) => writeln!(self.output, "{rejection}")?,
                Err(err) => return Err(err).context("betting prompt out of phase"),
            }
        }
    }

    /// Cho/han prompt; `None` only when input ends.
    fn take_call<D: DiceSource>(
        &mut self,
        session: &mut Session<D>,
    ) -> Result<Option<RoundOutcome>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match session.place_call(&line) {
                Ok(outcome) => return Ok(Some(outcome)),
                Err(SessionError::Call(rejection)) => writeln!(self.output, "{rejection}")?,
                Err(err) => return Err(err).context("call prompt out of phase"),
            }
        }
    }

    fn narrate_cup(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "The dealer swirls the cup and you hear the rattle of dice."
        )?;
        writeln!(
            self.output,
            "The dealer slams the cup on the floor, still covering the"
        )?;
        writeln!(self.output, "dice and asks for your bet.")?;
        writeln!(self.output)?;
        writeln!(self.output, "    CHO (even) or HAN (odd)?")?;
        Ok(())
    }

    fn announce(&mut self, outcome: &RoundOutcome) -> Result<()> {
        let (first_name, second_name) = outcome.numeral_names();
        writeln!(self.output, "The dealer lifts the cup to reveal:")?;
        writeln!(self.output, "   {first_name} - {second_name}")?;
        writeln!(
            self.output,
            "     {} - {}",
            outcome.dice.first, outcome.dice.second
        )?;

        if outcome.bonus {
            writeln!(
                self.output,
                "Congratulations! You rolled a {} and got a {BONUS_AMOUNT} mon bonus!",
                outcome.total
            )?;
        }

        match outcome.fee {
            Some(fee) if outcome.won => {
                writeln!(self.output, "You won! You take {} mon.", outcome.wager)?;
                writeln!(self.output, "The house collects a {fee:?} mon fee.")?;
            }
            _ => writeln!(self.output, "You lost!")?,
        }
        Ok(())
    }

    fn close(&mut self, ending: Ending) -> Result<Ending> {
        info!("session ended: {ending:?}");
        if ending == Ending::Depleted {
            writeln!(self.output, "{OUT_OF_MONEY}")?;
        }
        writeln!(self.output, "{FAREWELL}")?;
        self.output.flush().context("flushing console output")?;
        Ok(ending)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush().context("flushing prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading console input")?;
        Ok((read > 0).then_some(line))
    }
}

/// Whole mon until the first fee is taken, then always with a fraction
/// (`5000`, later `5880.0`), the way the table has always shown it.
fn purse_label(purse: f64, fee_taken: bool) -> String {
    if fee_taken {
        format!("{purse:?}")
    } else {
        purse.to_string()
    }
}
