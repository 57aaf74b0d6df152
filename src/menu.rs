//! Interactive menu loop.
//!
//! Renders the catalog, reads one line, dispatches it, repeats. Input that is
//! not a catalog key is sent to the device shell as typed. Nothing dispatched
//! from here can end the loop except the exit key or closed input.

use crate::catalog::{ArgSpec, Catalog, Kind, Operation};
use crate::commands::{perform, Context};
use crate::console::Tone;
use crate::launcher::Launcher;

pub(crate) const TITLE: &str = "ADB Menu Options (type a shell command such as 'whoami' to run it on the device)";
const PROMPT: &str = "Select menu (type 0 for exit) >> ";

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exit,
    InputClosed,
}

pub struct InteractionLoop<'a, L> {
    catalog: &'a Catalog,
    ctx: Context<'a, L>,
}

impl<'a, L: Launcher> InteractionLoop<'a, L> {
    pub fn new(catalog: &'a Catalog, ctx: Context<'a, L>) -> Self {
        Self { catalog, ctx }
    }

    pub async fn run(&self) -> Outcome {
        loop {
            self.render();

            let Some(line) = self.ctx.console().read_line(PROMPT) else {
                self.ctx.console().warn("Input closed, exiting");
                return Outcome::InputClosed;
            };

            if !self.dispatch(line.trim()).await {
                return Outcome::Exit;
            }
        }
    }

    fn render(&self) {
        let console = self.ctx.console();
        console.say(Tone::Heading, TITLE);
        console.print("");
        for line in self.catalog.render_lines() {
            console.print(&line);
        }
        console.print("");
    }

    /// Handle one line of input. Returns `false` when the operator chose exit.
    pub async fn dispatch(&self, choice: &str) -> bool {
        if choice.is_empty() {
            return true;
        }

        match self.catalog.resolve(choice) {
            Some(op) => self.run_operation(op).await,
            None => {
                self.passthrough(choice).await;
                true
            }
        }
    }

    async fn run_operation(&self, op: &Operation) -> bool {
        let console = self.ctx.console();

        let action = match op.kind {
            Kind::Exit => {
                console.say(Tone::Heading, "Exiting...");
                return false;
            }
            Kind::Run(action) => action,
        };

        console.say(Tone::Action, &format!("→ Running: {}", op.label));
        let arg = match op.arg_spec() {
            ArgSpec::Prompt { label, default } => match console.prompt(label, default) {
                Some(value) => value,
                None => {
                    console.warn(&format!("{} cancelled", op.label));
                    return true;
                }
            },
            ArgSpec::None => String::new(),
        };
        tracing::debug!(key = op.key, ?action, arg = %arg, "dispatching");

        perform(&self.ctx, action, &arg).await;
        console.say(Tone::Muted, "Done!");
        true
    }

    async fn passthrough(&self, command: &str) {
        let console = self.ctx.console();
        console.say(Tone::Action, &format!("→ Running Custom Command: {command}"));

        let result = self.ctx.executor.shell(command).await;
        match result.output() {
            Some("") => console.say(Tone::Muted, "(no output)"),
            Some(output) => console.print(output),
            None => {}
        }
        console.print("");
    }
}
