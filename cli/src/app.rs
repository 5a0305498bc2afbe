// Interactive loop: reads commands, forwards them to the session, prints the split.
use anyhow::Result;
use engine::data::KeyValueStore;
use engine::{Change, EngineError, SplitSession};
use shared::models::ParticipantId;
use shared::utils::parse_amount;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::commands::{help_text, Command};
use crate::config::AppConfig;
use crate::view;

enum Flow {
    Continue,
    Quit,
}

pub struct App<S> {
    session: SplitSession<S>,
    config: AppConfig,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: SplitSession<S>, config: AppConfig) -> Self {
        Self { session, config }
    }

    #[cfg(test)]
    pub fn session(&self) -> &SplitSession<S> {
        &self.session
    }

    /// Runs until `quit` or end of input. Storage problems are reported on
    /// `output` and never end the loop.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W, load_error: Option<EngineError>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        write_out(output, "Bill Splitter - type 'help' for commands\n").await?;
        if let Some(e) = load_error {
            write_out(output, &format!("! Could not load all saved data ({}), unreadable parts were reset.\n", e)).await?;
        }
        self.print_split(output).await?;

        loop {
            write_out(output, "> ").await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            tracing::debug!(?command, "Handling command");
            if let Flow::Quit = self.handle(command, &mut lines, output).await? {
                break;
            }
        }

        if self.session.is_dirty() {
            if let Err(e) = self.session.save().await {
                write_out(output, &format!("! Could not save before leaving: {}\n", e)).await?;
            }
        }
        Ok(())
    }

    async fn handle<R, W>(&mut self, command: Command, lines: &mut Lines<R>, output: &mut W) -> Result<Flow>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let outcome = match command {
            Command::Bill(raw) => self.session.set_bill(parse_amount(&raw)).await,
            Command::Tip(raw) => {
                let tip_percentage = self.config.tip.clamp(parse_amount(&raw));
                self.session.set_tip_percentage(tip_percentage).await
            }
            Command::Add(name) => {
                if name.trim().is_empty() {
                    write_out(output, "A friend needs a name.\n").await?;
                    return Ok(Flow::Continue);
                }
                self.session.add_participant(&name).await
            }
            Command::Expense { index, raw } => match self.participant_at(index) {
                Some(id) => self.session.update_expense(id, &raw).await,
                None => return self.no_such_friend(index, output).await,
            },
            Command::Delete { index } => match self.participant_at(index) {
                Some(id) => {
                    if self.config.confirm_delete && !self.confirm_delete(id, lines, output).await? {
                        write_out(output, "Kept.\n").await?;
                        return Ok(Flow::Continue);
                    }
                    self.session.delete_participant(id).await
                }
                None => return self.no_such_friend(index, output).await,
            },
            Command::Show => Ok(Change::Unchanged),
            Command::Help => {
                let help = help_text(&self.config.tip.presets, self.config.tip.max_percentage);
                write_out(output, &help).await?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(message) => {
                write_out(output, &format!("{}\n", message)).await?;
                return Ok(Flow::Continue);
            }
        };

        if let Err(e) = outcome {
            // The session already logged it; the change stays in memory.
            write_out(output, &format!("! Could not save: {}\n", e)).await?;
        }
        self.print_split(output).await?;
        Ok(Flow::Continue)
    }

    fn participant_at(&self, index: usize) -> Option<ParticipantId> {
        index
            .checked_sub(1)
            .and_then(|position| self.session.state().participants.get(position))
            .map(|p| p.id)
    }

    async fn confirm_delete<R, W>(&self, id: ParticipantId, lines: &mut Lines<R>, output: &mut W) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let name = self.session.participant(id).map(|p| p.name.clone()).unwrap_or_default();
        write_out(output, &format!("Delete {}? [y/N] ", name)).await?;
        let answer = lines.next_line().await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    async fn no_such_friend<W: AsyncWrite + Unpin>(&self, index: usize, output: &mut W) -> Result<Flow> {
        write_out(output, &format!("No friend #{} (there are {}).\n", index, self.session.state().participant_count())).await?;
        Ok(Flow::Continue)
    }

    async fn print_split<W: AsyncWrite + Unpin>(&self, output: &mut W) -> Result<()> {
        let text = view::render(self.session.state(), &self.session.summary(), &self.config.display);
        write_out(output, &text).await
    }
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
