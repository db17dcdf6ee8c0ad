use super::{Command, CommandContext, CommandError};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Clone, Default)]
pub struct ClsCommand;

impl Command for ClsCommand {
    fn name(&self) -> &'static str {
        "cls"
    }

    fn help(&self) -> &'static str {
        "Clear the screen."
    }

    fn execute(&self, _: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
        write!(ctx.streams.out, "{}", CLEAR_SCREEN)?;
        ctx.streams.out.flush()?;
        Ok(0)
    }
}
